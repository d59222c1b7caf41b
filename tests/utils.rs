#![allow(dead_code)]

use counter_program::{processor::process_instruction, state::Counter};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::{Transaction, TransactionError},
};

pub const PROGRAM: Pubkey = counter_program::ID;

pub const AUTHORITY_FUNDS: u64 = 1_000_000_000;

pub fn program_test() -> ProgramTest {
    let mut program_test =
        ProgramTest::new("counter_program", PROGRAM, processor!(process_instruction));
    program_test.prefer_bpf(false);
    program_test
}

/// Send `instructions` paid by the context payer and signed by `signers`.
pub async fn send(
    context: &ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let mut all_signers: Vec<&Keypair> = vec![&context.payer];
    all_signers.extend_from_slice(signers);

    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &all_signers[..],
        context.last_blockhash,
    );
    context.banks_client.process_transaction(tx).await
}

/// Fund a fresh authority and create a counter it owns.
pub async fn create_counter(context: &ProgramTestContext) -> (Keypair, Keypair) {
    let authority = Keypair::new();
    let counter = Keypair::new();

    send(
        context,
        &[
            system_instruction::transfer(
                &context.payer.pubkey(),
                &authority.pubkey(),
                AUTHORITY_FUNDS,
            ),
            counter_program::instruction::initialize(
                &PROGRAM,
                &authority.pubkey(),
                &counter.pubkey(),
            )
            .unwrap(),
        ],
        &[&authority, &counter],
    )
    .await
    .unwrap();

    (authority, counter)
}

pub async fn fetch_counter(context: &ProgramTestContext, address: Pubkey) -> Option<Counter> {
    let account = context.banks_client.get_account(address).await.unwrap()?;
    Some(Counter::load(&account.data).expect("account must hold a counter"))
}

pub async fn balance(context: &ProgramTestContext, address: Pubkey) -> u64 {
    context.banks_client.get_balance(address).await.unwrap()
}

/// The instruction error a failed transaction ended with.
pub fn instruction_error(result: Result<(), BanksClientError>) -> InstructionError {
    match result.expect_err("transaction should fail").unwrap() {
        TransactionError::InstructionError(_, error) => error,
        other => panic!("unexpected transaction error: {other:?}"),
    }
}
