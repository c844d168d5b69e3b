// lib.rs
#![allow(unexpected_cfgs, deprecated)]

use anchor_lang::prelude::*;

pub mod client;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod processor;
pub mod state;

use instructions::*;

declare_id!("5sYUaDHLxz9FXmYvw7h89zHxTZ1SgaJQZPFzJaNFUU5K");

#[program]
pub mod timelock_escrow {
    use super::*;

    // Deposit `amount` lamports into a fresh escrow account, releasable to
    // `destination` once the cluster clock reaches `expiration`.
    pub fn lock(ctx: Context<Lock>, amount: u64, expiration: u64) -> Result<()> {
        ctx.accounts.lock(amount, expiration)
    }

    // Permissionless: anyone may release an expired escrow to its recipient.
    pub fn unlock(ctx: Context<Unlock>) -> Result<()> {
        ctx.accounts.unlock()
    }
}
