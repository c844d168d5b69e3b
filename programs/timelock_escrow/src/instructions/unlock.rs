// instructions/unlock.rs
use anchor_lang::prelude::*;

use crate::events::EscrowReleased;
use crate::ledger::ProgramLedger;
use crate::processor;
use crate::state::Escrow;

#[derive(Accounts)]
pub struct Unlock<'info> {
    #[account(mut)]
    pub escrow: Account<'info, Escrow>,

    /// CHECK: Compared against escrow.destination before any lamports move
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,
}

impl<'info> Unlock<'info> {
    pub fn unlock(&mut self) -> Result<()> {
        let mut ledger = ProgramLedger::new(vec![
            self.escrow.to_account_info(),
            self.destination.to_account_info(),
        ]);

        let release = processor::unlock(&mut ledger, &self.escrow.key(), &self.destination.key())?;

        emit!(EscrowReleased {
            escrow: self.escrow.key(),
            destination: self.destination.key(),
            amount: release.amount,
            released_at: release.released_at,
        });

        msg!(
            "Released {} lamports to {}",
            release.amount,
            self.destination.key()
        );
        Ok(())
    }
}
