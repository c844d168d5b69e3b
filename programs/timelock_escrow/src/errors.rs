// errors.rs
use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    #[msg("Amount must be greater than 0")]
    InvalidAmount,

    #[msg("Expiration must be in the future")]
    InvalidExpiration,

    #[msg("Lock has not expired yet")]
    LockNotExpired,

    #[msg("Destination does not match the escrow's recipient")]
    DestinationMismatch,

    #[msg("Destination cannot be the escrow account itself")]
    DestinationIsEscrow,

    #[msg("Cluster clock is before the unix epoch")]
    InvalidClock,
}
