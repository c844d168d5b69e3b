use anchor_lang::prelude::*;

#[event]
pub struct EscrowLocked {
    pub escrow: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub expiration: u64,
}

#[event]
pub struct EscrowReleased {
    pub escrow: Pubkey,
    pub destination: Pubkey,
    /// Whole closed balance, rent reserve included.
    pub amount: u64,
    pub released_at: u64,
}
