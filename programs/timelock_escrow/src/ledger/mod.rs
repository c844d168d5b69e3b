use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_error::ProgramError;
use anchor_lang::system_program::{self, Allocate, Assign, Transfer};

use crate::errors::EscrowError;
use crate::state::Escrow;

#[cfg(test)]
pub mod sim;

/// Everything the escrow logic needs from the host chain. The on-chain program
/// plugs in [`ProgramLedger`]; tests use an in-memory ledger with a settable
/// clock.
pub trait Ledger {
    /// Current cluster time in unix seconds.
    fn unix_timestamp(&self) -> Result<i64>;

    fn lamports(&self, key: &Pubkey) -> Result<u64>;

    /// Lamports an account of `data_len` bytes must hold to stay rent exempt.
    fn minimum_balance(&self, data_len: usize) -> Result<u64>;

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<()>;

    /// Allocates `Escrow::LEN` bytes at `key`, hands the account to this
    /// program and writes `escrow` into it. The account must already hold
    /// at least `minimum_balance(Escrow::LEN)` lamports.
    fn create_record(&mut self, key: &Pubkey, escrow: &Escrow) -> Result<()>;

    fn load_record(&self, key: &Pubkey) -> Result<Escrow>;

    /// Moves the record's entire balance to `destination` and deallocates
    /// it. Returns the lamports moved.
    fn delete_record(&mut self, key: &Pubkey, destination: &Pubkey) -> Result<u64>;
}

/// Ledger backed by the accounts of the executing instruction.
pub struct ProgramLedger<'info> {
    accounts: Vec<AccountInfo<'info>>,
    system_program: Option<AccountInfo<'info>>,
}

impl<'info> ProgramLedger<'info> {
    pub fn new(accounts: Vec<AccountInfo<'info>>) -> Self {
        Self {
            accounts,
            system_program: None,
        }
    }

    pub fn with_system_program(mut self, system_program: AccountInfo<'info>) -> Self {
        self.system_program = Some(system_program);
        self
    }

    fn account(&self, key: &Pubkey) -> Result<&AccountInfo<'info>> {
        self.accounts
            .iter()
            .find(|info| info.key == key)
            .ok_or_else(|| error!(ErrorCode::AccountNotEnoughKeys))
    }

    fn system_program(&self) -> Result<AccountInfo<'info>> {
        self.system_program
            .clone()
            .ok_or_else(|| error!(ErrorCode::AccountNotEnoughKeys))
    }
}

impl<'info> Ledger for ProgramLedger<'info> {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(Clock::get()?.unix_timestamp)
    }

    fn lamports(&self, key: &Pubkey) -> Result<u64> {
        Ok(self.account(key)?.lamports())
    }

    fn minimum_balance(&self, data_len: usize) -> Result<u64> {
        Ok(Rent::get()?.minimum_balance(data_len))
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<()> {
        let from = self.account(from)?.clone();
        let to = self.account(to)?.clone();

        // Program-owned accounts can be debited directly; everything else goes
        // through the system program with the source's signature.
        if from.owner == &crate::ID {
            let debited = from
                .lamports()
                .checked_sub(lamports)
                .ok_or(ProgramError::InsufficientFunds)?;
            let credited = to
                .lamports()
                .checked_add(lamports)
                .ok_or(ProgramError::ArithmeticOverflow)?;
            **from.try_borrow_mut_lamports()? = debited;
            **to.try_borrow_mut_lamports()? = credited;
            return Ok(());
        }

        system_program::transfer(
            CpiContext::new(self.system_program()?, Transfer { from, to }),
            lamports,
        )
    }

    fn create_record(&mut self, key: &Pubkey, escrow: &Escrow) -> Result<()> {
        let record = self.account(key)?.clone();
        let system_program = self.system_program()?;

        system_program::allocate(
            CpiContext::new(
                system_program.clone(),
                Allocate {
                    account_to_allocate: record.clone(),
                },
            ),
            Escrow::LEN as u64,
        )?;
        system_program::assign(
            CpiContext::new(
                system_program,
                Assign {
                    account_to_assign: record.clone(),
                },
            ),
            &crate::ID,
        )?;

        let mut data = record.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        escrow.try_serialize(&mut writer)
    }

    fn load_record(&self, key: &Pubkey) -> Result<Escrow> {
        let record = self.account(key)?;
        if record.owner != &crate::ID || record.data_is_empty() {
            return err!(ErrorCode::AccountNotInitialized);
        }
        let data = record.try_borrow_data()?;
        Escrow::try_deserialize(&mut &data[..])
    }

    // Same steps as Anchor's `close = <target>` constraint: drain, hand back to
    // the system program, drop the data. The closed account is then skipped
    // when `Account<Escrow>` exits, so its data is not written back.
    fn delete_record(&mut self, key: &Pubkey, destination: &Pubkey) -> Result<u64> {
        require_keys_neq!(*key, *destination, EscrowError::DestinationIsEscrow);
        let record = self.account(key)?.clone();
        let destination = self.account(destination)?.clone();

        let amount = record.lamports();
        let credited = destination
            .lamports()
            .checked_add(amount)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        **destination.try_borrow_mut_lamports()? = credited;
        **record.try_borrow_mut_lamports()? = 0;

        record.assign(&system_program::ID);
        record.realloc(0, false)?;

        Ok(amount)
    }
}
