//! Off-chain helpers for building escrow transactions and finding escrows.

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{system_program, InstructionData};

use crate::constants::{DESTINATION_OFFSET, ESCROW_ACCOUNT_LEN};
use crate::state::Escrow;

/// `escrow` must be a freshly generated keypair and co-sign the transaction.
pub fn lock_instruction(
    payer: &Pubkey,
    destination: &Pubkey,
    escrow: &Pubkey,
    amount: u64,
    expiration: u64,
) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::Lock {
            payer: *payer,
            destination: *destination,
            escrow: *escrow,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: crate::instruction::Lock { amount, expiration }.data(),
    }
}

/// Needs no signature beyond the fee payer's.
pub fn unlock_instruction(escrow: &Pubkey, destination: &Pubkey) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::Unlock {
            escrow: *escrow,
            destination: *destination,
        }
        .to_account_metas(None),
        data: crate::instruction::Unlock {}.data(),
    }
}

/// `dataSize` + `memcmp` filter selecting the escrows payable to one
/// recipient from the program's accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DestinationFilter {
    pub data_size: u64,
    pub offset: usize,
    pub bytes: [u8; 32],
}

impl DestinationFilter {
    pub fn new(destination: &Pubkey) -> Self {
        Self {
            data_size: ESCROW_ACCOUNT_LEN as u64,
            offset: DESTINATION_OFFSET,
            bytes: destination.to_bytes(),
        }
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        data.len() as u64 == self.data_size
            && data.get(self.offset..self.offset + self.bytes.len()) == Some(&self.bytes[..])
    }
}

pub fn decode_escrow(data: &[u8]) -> Result<Escrow> {
    require_eq!(
        data.len(),
        ESCROW_ACCOUNT_LEN,
        ErrorCode::AccountDidNotDeserialize
    );
    Escrow::try_deserialize(&mut &data[..])
}
