// instructions/lock.rs
use anchor_lang::prelude::*;

use crate::events::EscrowLocked;
use crate::ledger::ProgramLedger;
use crate::processor;

#[derive(Accounts)]
pub struct Lock<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Recipient on release; only its key is stored
    pub destination: UncheckedAccount<'info>,

    /// Fresh keypair; the signature proves nobody else holds this address
    #[account(mut)]
    pub escrow: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Lock<'info> {
    pub fn lock(&mut self, amount: u64, expiration: u64) -> Result<()> {
        let mut ledger = ProgramLedger::new(vec![
            self.payer.to_account_info(),
            self.escrow.to_account_info(),
        ])
        .with_system_program(self.system_program.to_account_info());

        let record = processor::lock(
            &mut ledger,
            &self.payer.key(),
            &self.destination.key(),
            &self.escrow.key(),
            amount,
            expiration,
        )?;

        emit!(EscrowLocked {
            escrow: self.escrow.key(),
            destination: record.destination,
            amount,
            expiration: record.expiration,
        });

        msg!(
            "Locked {} lamports for {} until {}",
            amount, record.destination, record.expiration
        );
        Ok(())
    }
}
