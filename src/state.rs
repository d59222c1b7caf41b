// state.rs
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

use crate::error::CounterError;

/// Marks account data as holding a live `Counter`.
pub const COUNTER_DISCRIMINATOR: [u8; 8] = [255, 176, 4, 245, 188, 253, 124, 25];

/// The counter record. Stored as discriminator, authority, count.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counter {
    pub authority: Pubkey,
    pub count: u64,
}

impl Counter {
    /// Size of the record itself (authority + count).
    pub const SIZE: usize = 32 + 8;
    /// Size of the account data, discriminator included.
    pub const LEN: usize = 8 + Self::SIZE;

    pub fn new(authority: Pubkey) -> Self {
        Self {
            authority,
            count: 0,
        }
    }

    /// Whether the data holds a counter record.
    pub fn is_initialized(data: &[u8]) -> bool {
        data.len() >= Self::LEN && data[..8] == COUNTER_DISCRIMINATOR
    }

    pub fn load(data: &[u8]) -> Result<Self, ProgramError> {
        if !Self::is_initialized(data) {
            return Err(CounterError::NotFound.into());
        }

        Ok(Self::try_from_slice(&data[8..Self::LEN])?)
    }

    pub fn store(&self, data: &mut [u8]) -> Result<(), ProgramError> {
        if data.len() < Self::LEN {
            return Err(ProgramError::AccountDataTooSmall);
        }
        data[..8].copy_from_slice(&COUNTER_DISCRIMINATOR);
        self.serialize(&mut &mut data[8..Self::LEN])?;
        Ok(())
    }

    pub fn check_authority(&self, caller: &Pubkey) -> Result<(), CounterError> {
        if self.authority != *caller {
            return Err(CounterError::Unauthorized);
        }
        Ok(())
    }

    /// Add one to the count. Fails at `u64::MAX` instead of wrapping.
    pub fn increment(&mut self, caller: &Pubkey) -> Result<u64, CounterError> {
        self.check_authority(caller)?;
        self.count = self.count.checked_add(1).ok_or(CounterError::Overflow)?;
        Ok(self.count)
    }

    /// Subtract one from the count. Fails at zero.
    pub fn decrement(&mut self, caller: &Pubkey) -> Result<u64, CounterError> {
        self.check_authority(caller)?;
        self.count = self.count.checked_sub(1).ok_or(CounterError::Underflow)?;
        Ok(self.count)
    }

    pub fn set(&mut self, caller: &Pubkey, value: u64) -> Result<u64, CounterError> {
        self.check_authority(caller)?;
        self.count = value;
        Ok(self.count)
    }
}
