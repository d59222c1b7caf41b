#![allow(unexpected_cfgs)]

#[cfg(not(feature = "no-entrypoint"))]
pub mod entrypoint; // entrypoint where the Solana program process starts
pub mod error; // custom program errors
pub mod instruction; // instruction discriminators, payloads and client-side builders
pub mod ledger; // host-side keyed store of counter accounts
pub mod processor; // where instruction logics are processed
pub mod state; // counter account layout and its transitions

solana_program::declare_id!("HnPvs5dR5MBXiCEqKbyZMuPPrt3uTRBbuWsGdePbvDJN");
