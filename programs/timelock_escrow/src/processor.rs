use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_error::ProgramError;

use crate::errors::EscrowError;
use crate::ledger::Ledger;
use crate::state::Escrow;

/// Outcome of a successful unlock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    pub amount: u64,
    pub released_at: u64,
}

fn now<L: Ledger>(ledger: &L) -> Result<u64> {
    u64::try_from(ledger.unix_timestamp()?).map_err(|_| error!(EscrowError::InvalidClock))
}

/// Funds a fresh escrow account at `escrow` from `payer` with `amount`
/// lamports plus the rent-exempt minimum for the record, releasable to
/// `destination` from `expiration` on.
pub fn lock<L: Ledger>(
    ledger: &mut L,
    payer: &Pubkey,
    destination: &Pubkey,
    escrow: &Pubkey,
    amount: u64,
    expiration: u64,
) -> Result<Escrow> {
    require!(amount > 0, EscrowError::InvalidAmount);
    require!(expiration > now(ledger)?, EscrowError::InvalidExpiration);
    require_keys_neq!(*destination, *escrow, EscrowError::DestinationIsEscrow);

    // An address that already holds lamports would leave the escrow with more
    // than the payer deposited.
    if ledger.lamports(escrow)? != 0 {
        return Err(ProgramError::AccountAlreadyInitialized.into());
    }

    let record = Escrow {
        destination: *destination,
        expiration,
    };

    let deposit = ledger
        .minimum_balance(Escrow::LEN)?
        .checked_add(amount)
        .ok_or(ProgramError::ArithmeticOverflow)?;
    ledger.transfer(payer, escrow, deposit)?;
    ledger.create_record(escrow, &record)?;

    Ok(record)
}

/// Closes an expired escrow into its recipient, rent reserve included.
/// Callable by anyone.
pub fn unlock<L: Ledger>(ledger: &mut L, escrow: &Pubkey, destination: &Pubkey) -> Result<Release> {
    let record = ledger.load_record(escrow)?;

    require_keys_eq!(
        *destination,
        record.destination,
        EscrowError::DestinationMismatch
    );

    let now = now(ledger)?;
    require!(record.is_expired(now), EscrowError::LockNotExpired);

    let amount = ledger.delete_record(escrow, destination)?;

    Ok(Release {
        amount,
        released_at: now,
    })
}
