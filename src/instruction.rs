// instruction.rs
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterInstruction {
    /// Accounts: `[signer, writable] authority`, `[signer, writable] counter`, `[] system_program`
    Initialize,
    /// Accounts: `[signer] authority`, `[writable] counter`
    Increment,
    /// Accounts: `[signer] authority`, `[writable] counter`
    Decrement,
    /// Accounts: `[signer] authority`, `[writable] counter`
    Set { value: u64 },
    /// Accounts: `[signer, writable] authority`, `[writable] counter`
    Close,
}

#[derive(BorshSerialize, BorshDeserialize)]
struct SetPayload {
    value: u64,
}

impl CounterInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        // Ensure the input has at least 8 bytes for the variant
        if input.len() < 8 {
            return Err(ProgramError::InvalidInstructionData);
        }

        let (ix_discriminator, rest) = input.split_at(8);

        Ok(match ix_discriminator {
            [0, 0, 0, 0, 0, 0, 0, 0] => Self::Initialize,
            [1, 0, 0, 0, 0, 0, 0, 0] => Self::Increment,
            [2, 0, 0, 0, 0, 0, 0, 0] => Self::Decrement,
            [3, 0, 0, 0, 0, 0, 0, 0] => {
                let payload = SetPayload::try_from_slice(rest)
                    .map_err(|_| ProgramError::InvalidInstructionData)?;
                Self::Set {
                    value: payload.value,
                }
            }
            [4, 0, 0, 0, 0, 0, 0, 0] => Self::Close,
            _ => return Err(ProgramError::InvalidInstructionData),
        })
    }

    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        let discriminator: u64 = match self {
            Self::Initialize => 0,
            Self::Increment => 1,
            Self::Decrement => 2,
            Self::Set { .. } => 3,
            Self::Close => 4,
        };
        let mut data = Vec::with_capacity(16);
        data.extend_from_slice(&discriminator.to_le_bytes());
        if let Self::Set { value } = self {
            SetPayload { value: *value }.serialize(&mut data)?;
        }
        Ok(data)
    }
}

/// Create a counter at `counter`, owned by `authority`. Both must sign.
pub fn initialize(
    program_id: &Pubkey,
    authority: &Pubkey,
    counter: &Pubkey,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(*counter, true),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: CounterInstruction::Initialize.pack()?,
    })
}

pub fn increment(
    program_id: &Pubkey,
    authority: &Pubkey,
    counter: &Pubkey,
) -> Result<Instruction, ProgramError> {
    update(program_id, authority, counter, CounterInstruction::Increment)
}

pub fn decrement(
    program_id: &Pubkey,
    authority: &Pubkey,
    counter: &Pubkey,
) -> Result<Instruction, ProgramError> {
    update(program_id, authority, counter, CounterInstruction::Decrement)
}

pub fn set(
    program_id: &Pubkey,
    authority: &Pubkey,
    counter: &Pubkey,
    value: u64,
) -> Result<Instruction, ProgramError> {
    update(
        program_id,
        authority,
        counter,
        CounterInstruction::Set { value },
    )
}

/// Close `counter` and send its lamports to `authority`.
pub fn close(
    program_id: &Pubkey,
    authority: &Pubkey,
    counter: &Pubkey,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(*counter, false),
        ],
        data: CounterInstruction::Close.pack()?,
    })
}

fn update(
    program_id: &Pubkey,
    authority: &Pubkey,
    counter: &Pubkey,
    instruction: CounterInstruction,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(*counter, false),
        ],
        data: instruction.pack()?,
    })
}
