use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::invoke,
    program_error::ProgramError,
    pubkey::Pubkey,
    system_instruction, system_program,
    sysvar::{rent::Rent, Sysvar},
};

use crate::{error::CounterError, instruction::CounterInstruction, state::Counter};

// program entrypoint's implementation
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = CounterInstruction::unpack(instruction_data)?;

    match instruction {
        // 0: Initialize
        CounterInstruction::Initialize => {
            msg!("Instruction: Initialize");
            process_initialize(program_id, accounts)
        }

        // 1: Increment
        CounterInstruction::Increment => {
            msg!("Instruction: Increment");
            process_update(program_id, accounts, |counter, caller| {
                counter.increment(caller)
            })
        }

        // 2: Decrement
        CounterInstruction::Decrement => {
            msg!("Instruction: Decrement");
            process_update(program_id, accounts, |counter, caller| {
                counter.decrement(caller)
            })
        }

        // 3: Set
        CounterInstruction::Set { value } => {
            msg!("Instruction: Set");
            process_update(program_id, accounts, |counter, caller| {
                counter.set(caller, value)
            })
        }

        // 4: Close
        CounterInstruction::Close => {
            msg!("Instruction: Close");
            process_close(program_id, accounts)
        }
    }
}

pub fn process_initialize(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let accounts_iter = &mut accounts.iter();
    let authority = next_account_info(accounts_iter)?;
    let counter_account = next_account_info(accounts_iter)?;
    let system_program_account = next_account_info(accounts_iter)?;

    require_signer(authority)?;
    if !system_program::check_id(system_program_account.key) {
        msg!("Expected the system program, got {}", system_program_account.key);
        return Err(ProgramError::IncorrectProgramId);
    }

    if counter_account.owner == program_id {
        // The slot already belongs to us: only an empty one may be initialized.
        if Counter::is_initialized(&counter_account.data.borrow()) {
            msg!("Counter {} is already initialized", counter_account.key);
            return Err(CounterError::AlreadyInitialized.into());
        }
    } else if system_program::check_id(counter_account.owner) {
        require_signer(counter_account)?;
        create_counter_account(
            program_id,
            authority,
            counter_account,
            system_program_account,
        )?;
    } else {
        msg!("Counter {} is owned by {}", counter_account.key, counter_account.owner);
        return Err(ProgramError::IncorrectProgramId);
    }

    let counter = Counter::new(*authority.key);
    counter.store(&mut counter_account.data.borrow_mut()[..])?;
    msg!(
        "Counter {} initialized for authority {}",
        counter_account.key,
        authority.key
    );

    Ok(())
}

fn create_counter_account<'a>(
    program_id: &Pubkey,
    payer: &AccountInfo<'a>,
    counter_account: &AccountInfo<'a>,
    system_program_account: &AccountInfo<'a>,
) -> ProgramResult {
    let rent_lamports = Rent::get()?.minimum_balance(Counter::LEN);
    let current_lamports = counter_account.lamports();
    let accounts = [
        payer.clone(),
        counter_account.clone(),
        system_program_account.clone(),
    ];

    if current_lamports == 0 {
        msg!(
            "Creating counter account {} with {} lamports",
            counter_account.key,
            rent_lamports
        );
        return invoke(
            &system_instruction::create_account(
                payer.key,
                counter_account.key,
                rent_lamports,
                Counter::LEN as u64,
                program_id,
            ),
            &accounts,
        );
    }

    // Someone already sent lamports here: top up, then allocate and assign.
    let top_up = rent_lamports.saturating_sub(current_lamports);
    if top_up > 0 {
        invoke(
            &system_instruction::transfer(payer.key, counter_account.key, top_up),
            &accounts,
        )?;
    }
    invoke(
        &system_instruction::allocate(counter_account.key, Counter::LEN as u64),
        &accounts,
    )?;
    invoke(
        &system_instruction::assign(counter_account.key, program_id),
        &accounts,
    )
}

/// Load, transition and store a counter the authority is mutating.
fn process_update<F>(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    transition: F,
) -> ProgramResult
where
    F: FnOnce(&mut Counter, &Pubkey) -> Result<u64, CounterError>,
{
    let accounts_iter = &mut accounts.iter();
    let authority = next_account_info(accounts_iter)?;
    let counter_account = next_account_info(accounts_iter)?;

    require_signer(authority)?;
    let mut counter = load_counter(program_id, counter_account)?;

    let count = transition(&mut counter, authority.key).inspect_err(|e| {
        msg!("Counter {} rejected update: {}", counter_account.key, e);
    })?;
    counter.store(&mut counter_account.data.borrow_mut()[..])?;
    msg!("Counter {} count: {}", counter_account.key, count);

    Ok(())
}

pub fn process_close(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let accounts_iter = &mut accounts.iter();
    let authority = next_account_info(accounts_iter)?;
    let counter_account = next_account_info(accounts_iter)?;

    require_signer(authority)?;
    let counter = load_counter(program_id, counter_account)?;
    counter.check_authority(authority.key)?;

    let reclaimed = counter_account.lamports();
    let new_authority_lamports = authority
        .lamports()
        .checked_add(reclaimed)
        .ok_or(ProgramError::ArithmeticOverflow)?;

    **authority.try_borrow_mut_lamports()? = new_authority_lamports;
    **counter_account.try_borrow_mut_lamports()? = 0;
    counter_account.assign(&system_program::ID);
    // Free the data so the address can be created again in the same transaction.
    counter_account.realloc(0, false)?;

    msg!(
        "Counter {} closed, {} lamports returned to {}",
        counter_account.key,
        reclaimed,
        authority.key
    );

    Ok(())
}

fn require_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        msg!("{} should be a signer", account.key);
        return Err(ProgramError::MissingRequiredSignature);
    }
    Ok(())
}

fn load_counter(
    program_id: &Pubkey,
    counter_account: &AccountInfo,
) -> Result<Counter, ProgramError> {
    if counter_account.owner != program_id {
        if system_program::check_id(counter_account.owner) {
            msg!("Counter {} does not exist", counter_account.key);
            return Err(CounterError::NotFound.into());
        }
        msg!(
            "Counter {} is owned by {}",
            counter_account.key,
            counter_account.owner
        );
        return Err(ProgramError::IncorrectProgramId);
    }
    Counter::load(&counter_account.data.borrow())
}
