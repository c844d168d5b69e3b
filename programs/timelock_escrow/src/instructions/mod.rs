pub mod lock;
pub mod unlock;

pub use lock::*;
pub use unlock::*;
