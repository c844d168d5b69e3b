use anchor_lang::prelude::*;

use crate::constants::*;

/// A single time lock. The account's own lamports (principal plus rent
/// reserve) are the escrowed funds, so nothing here records the amount or who
/// paid it.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Escrow {
    pub destination: Pubkey, // recipient on release
    pub expiration: u64,     // unix timestamp, seconds
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscrowStatus {
    Active,
    Expired,
}

impl Escrow {
    pub const LEN: usize = DISCRIMINATOR_LEN + Escrow::INIT_SPACE;

    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expiration
    }

    /// A closed escrow has no account at all, so only the two live states exist.
    pub fn status(&self, now: u64) -> EscrowStatus {
        if self.is_expired(now) {
            EscrowStatus::Expired
        } else {
            EscrowStatus::Active
        }
    }

    pub fn seconds_remaining(&self, now: u64) -> u64 {
        self.expiration.saturating_sub(now)
    }
}

const _: () = assert!(Escrow::LEN == ESCROW_ACCOUNT_LEN);
