//! Off-chain model of the program: counters kept in a map keyed by account
//! address, together with the lamport balances of the identities that fund
//! and reclaim them.
//!
//! Every operation goes through the same [`Counter`] transitions the on-chain
//! processor uses, and either applies completely or leaves the ledger as it
//! was.

use std::collections::BTreeMap;

use solana_program::{pubkey::Pubkey, rent::Rent};

use crate::{error::CounterError, state::Counter};

#[derive(Clone, Copy, Debug)]
struct Slot {
    counter: Counter,
    deposit: u64,
}

#[derive(Debug)]
pub struct Ledger {
    rent: Rent,
    slots: BTreeMap<Pubkey, Slot>,
    balances: BTreeMap<Pubkey, u64>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(Rent::default())
    }
}

impl Ledger {
    pub fn new(rent: Rent) -> Self {
        Self {
            rent,
            slots: BTreeMap::new(),
            balances: BTreeMap::new(),
        }
    }

    /// Lamports held against every counter account.
    pub fn storage_deposit(&self) -> u64 {
        self.rent.minimum_balance(Counter::LEN)
    }

    pub fn fund(&mut self, identity: Pubkey, lamports: u64) -> Result<u64, CounterError> {
        let balance = self
            .balance(&identity)
            .checked_add(lamports)
            .ok_or(CounterError::BalanceOverflow)?;
        self.balances.insert(identity, balance);
        Ok(balance)
    }

    pub fn balance(&self, identity: &Pubkey) -> u64 {
        self.balances.get(identity).copied().unwrap_or_default()
    }

    /// Create a counter at `address` owned by `caller`, who pays the deposit.
    pub fn initialize(&mut self, address: Pubkey, caller: Pubkey) -> Result<Counter, CounterError> {
        if self.slots.contains_key(&address) {
            return Err(CounterError::AlreadyInitialized);
        }

        let deposit = self.storage_deposit();
        let remaining = self
            .balance(&caller)
            .checked_sub(deposit)
            .ok_or(CounterError::InsufficientFunds)?;
        self.balances.insert(caller, remaining);

        let counter = Counter::new(caller);
        self.slots.insert(address, Slot { counter, deposit });
        Ok(counter)
    }

    pub fn increment(&mut self, address: &Pubkey, caller: &Pubkey) -> Result<u64, CounterError> {
        self.update(address, |counter| counter.increment(caller))
    }

    pub fn decrement(&mut self, address: &Pubkey, caller: &Pubkey) -> Result<u64, CounterError> {
        self.update(address, |counter| counter.decrement(caller))
    }

    pub fn set(
        &mut self,
        address: &Pubkey,
        caller: &Pubkey,
        value: u64,
    ) -> Result<u64, CounterError> {
        self.update(address, |counter| counter.set(caller, value))
    }

    /// Remove the counter and return its deposit to the authority.
    pub fn close(&mut self, address: &Pubkey, caller: &Pubkey) -> Result<u64, CounterError> {
        let slot = self.slots.get(address).ok_or(CounterError::NotFound)?;
        slot.counter.check_authority(caller)?;

        let authority = slot.counter.authority;
        let reclaimed = slot.deposit;
        let credited = self
            .balance(&authority)
            .checked_add(reclaimed)
            .ok_or(CounterError::BalanceOverflow)?;

        self.slots.remove(address);
        self.balances.insert(authority, credited);
        Ok(reclaimed)
    }

    pub fn fetch(&self, address: &Pubkey) -> Result<&Counter, CounterError> {
        self.slots
            .get(address)
            .map(|slot| &slot.counter)
            .ok_or(CounterError::NotFound)
    }

    /// Every live counter, ordered by address.
    pub fn counters(&self) -> impl Iterator<Item = (&Pubkey, &Counter)> {
        self.slots.iter().map(|(address, slot)| (address, &slot.counter))
    }

    fn update<F>(&mut self, address: &Pubkey, transition: F) -> Result<u64, CounterError>
    where
        F: FnOnce(&mut Counter) -> Result<u64, CounterError>,
    {
        let slot = self.slots.get_mut(address).ok_or(CounterError::NotFound)?;
        // Work on a copy so a rejected transition leaves the slot untouched.
        let mut counter = slot.counter;
        let count = transition(&mut counter)?;
        slot.counter = counter;
        Ok(count)
    }
}
