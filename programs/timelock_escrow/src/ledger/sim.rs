use std::collections::HashMap;

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_error::ProgramError;
use anchor_lang::solana_program::rent::Rent;
use anchor_lang::system_program;

use super::Ledger;
use crate::errors::EscrowError;
use crate::state::Escrow;

#[derive(Clone, Debug, Default)]
pub struct SimAccount {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

/// In-memory ledger with a hand-driven clock and the cluster's default rent.
#[derive(Clone, Debug, Default)]
pub struct SimLedger {
    now: i64,
    accounts: HashMap<Pubkey, SimAccount>,
}

impl SimLedger {
    pub fn new(now: i64) -> Self {
        Self {
            now,
            accounts: HashMap::new(),
        }
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn set_clock(&mut self, now: i64) {
        self.now = now;
    }

    pub fn advance(&mut self, seconds: i64) {
        self.now += seconds;
    }

    /// Creates (or tops up) a system-owned wallet.
    pub fn fund(&mut self, key: Pubkey, lamports: u64) -> Result<()> {
        let account = self.accounts.entry(key).or_insert_with(|| SimAccount {
            owner: system_program::ID,
            ..SimAccount::default()
        });
        account.lamports = account
            .lamports
            .checked_add(lamports)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn account(&self, key: &Pubkey) -> Option<&SimAccount> {
        self.accounts.get(key)
    }

    pub fn exists(&self, key: &Pubkey) -> bool {
        self.accounts.contains_key(key)
    }

    pub fn balance(&self, key: &Pubkey) -> u64 {
        self.accounts.get(key).map_or(0, |account| account.lamports)
    }

    /// Program accounts, like `getProgramAccounts` against this program.
    pub fn program_accounts(&self) -> impl Iterator<Item = (&Pubkey, &SimAccount)> {
        self.accounts
            .iter()
            .filter(|(_, account)| account.owner == crate::ID)
    }

    /// Runs `f` as one transaction: on error every account is restored.
    pub fn transact<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.accounts.clone();
        let result = f(self);
        if result.is_err() {
            self.accounts = snapshot;
        }
        result
    }
}

impl Ledger for SimLedger {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(self.now)
    }

    fn lamports(&self, key: &Pubkey) -> Result<u64> {
        Ok(self.balance(key))
    }

    fn minimum_balance(&self, data_len: usize) -> Result<u64> {
        Ok(Rent::default().minimum_balance(data_len))
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<()> {
        let source = self
            .accounts
            .get_mut(from)
            .ok_or(ProgramError::InsufficientFunds)?;
        source.lamports = source
            .lamports
            .checked_sub(lamports)
            .ok_or(ProgramError::InsufficientFunds)?;

        let target = self.accounts.entry(*to).or_insert_with(|| SimAccount {
            owner: system_program::ID,
            ..SimAccount::default()
        });
        target.lamports = target
            .lamports
            .checked_add(lamports)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        Ok(())
    }

    fn create_record(&mut self, key: &Pubkey, escrow: &Escrow) -> Result<()> {
        let reserve = self.minimum_balance(Escrow::LEN)?;
        let account = self.accounts.entry(*key).or_insert_with(|| SimAccount {
            owner: system_program::ID,
            ..SimAccount::default()
        });
        if account.owner != system_program::ID || !account.data.is_empty() {
            return Err(ProgramError::AccountAlreadyInitialized.into());
        }
        // The runtime refuses to commit a new account below the rent-exempt
        // minimum.
        if account.lamports < reserve {
            return Err(ProgramError::AccountNotRentExempt.into());
        }

        let mut data = Vec::with_capacity(Escrow::LEN);
        escrow.try_serialize(&mut data)?;
        account.data = data;
        account.owner = crate::ID;
        Ok(())
    }

    fn load_record(&self, key: &Pubkey) -> Result<Escrow> {
        match self.accounts.get(key) {
            Some(account) if account.owner == crate::ID && !account.data.is_empty() => {
                Escrow::try_deserialize(&mut account.data.as_slice())
            }
            _ => err!(ErrorCode::AccountNotInitialized),
        }
    }

    fn delete_record(&mut self, key: &Pubkey, destination: &Pubkey) -> Result<u64> {
        require_keys_neq!(*key, *destination, EscrowError::DestinationIsEscrow);
        let record = self
            .accounts
            .remove(key)
            .ok_or_else(|| error!(ErrorCode::AccountNotInitialized))?;
        self.fund(*destination, record.lamports)?;
        Ok(record.lamports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_below_rent_exempt_minimum_is_refused() {
        let mut ledger = SimLedger::new(0);
        let (payer, key) = (Pubkey::new_unique(), Pubkey::new_unique());
        let escrow = Escrow {
            destination: Pubkey::new_unique(),
            expiration: 10,
        };
        let reserve = ledger.minimum_balance(Escrow::LEN).unwrap();
        ledger.fund(payer, 10 * reserve).unwrap();

        ledger.transfer(&payer, &key, reserve - 1).unwrap();
        let err = ledger.create_record(&key, &escrow).unwrap_err();
        assert_eq!(err, Error::from(ProgramError::AccountNotRentExempt));

        ledger.transfer(&payer, &key, 1).unwrap();
        ledger.create_record(&key, &escrow).unwrap();
        assert_eq!(ledger.load_record(&key).unwrap(), escrow);
    }

    #[test]
    fn rent_reserve_for_escrow_matches_cluster_default() {
        let ledger = SimLedger::new(0);
        assert_eq!(ledger.minimum_balance(Escrow::LEN).unwrap(), 1_224_960);
    }

    #[test]
    fn fund_overflow_is_an_error() {
        let mut ledger = SimLedger::new(0);
        let key = Pubkey::new_unique();
        ledger.fund(key, u64::MAX).unwrap();

        let err = ledger.fund(key, 1).unwrap_err();
        assert_eq!(err, Error::from(ProgramError::ArithmeticOverflow));
        assert_eq!(ledger.balance(&key), u64::MAX);
    }
}
