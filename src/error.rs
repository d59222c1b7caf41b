use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;
use solana_program::program_error::ProgramError;
use thiserror::Error;

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, FromPrimitive)]
pub enum CounterError {
    #[error("Counter account is already initialized")]
    AlreadyInitialized = 900,
    #[error("Signer is not the counter authority")]
    Unauthorized,
    #[error("Arithmetic underflow")]
    Underflow,
    #[error("Arithmetic overflow")]
    Overflow,
    #[error("Counter account does not exist")]
    NotFound,
    #[error("Not enough lamports to fund the counter account")]
    InsufficientFunds,
    #[error("Lamport balance would exceed u64::MAX")]
    BalanceOverflow,
}

impl CounterError {
    /// Decode the code carried by `ProgramError::Custom`.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_u32(code)
    }
}

impl From<CounterError> for ProgramError {
    fn from(e: CounterError) -> Self {
        ProgramError::Custom(e.into())
    }
}

impl From<CounterError> for u32 {
    fn from(e: CounterError) -> Self {
        e as u32
    }
}
