// Anchor account discriminator prefixed to every escrow account.
pub const DISCRIMINATOR_LEN: usize = 8;

// Escrow account layout: discriminator | destination (32) | expiration (u64 LE)
pub const DESTINATION_OFFSET: usize = DISCRIMINATOR_LEN;
pub const EXPIRATION_OFFSET: usize = DESTINATION_OFFSET + 32;
pub const ESCROW_ACCOUNT_LEN: usize = EXPIRATION_OFFSET + 8; // 48 bytes
