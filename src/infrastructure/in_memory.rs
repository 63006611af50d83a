use crate::domain::account::ExternalAccount;
use crate::domain::address::Address;
use crate::domain::ports::{AccountStore, LedgerStore, RegistryStore};
use crate::domain::registry::RegistryState;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Ledger {
    state: Option<RegistryState>,
    accounts: HashMap<Address, ExternalAccount>,
}

/// A thread-safe in-memory store for the registry state and external accounts.
///
/// Both live under one `RwLock`, so a `commit` is never observed half
/// applied. Clones share the same data. Ideal for testing or single runs
/// where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistryStore for InMemoryStore {
    async fn load(&self) -> Result<Option<RegistryState>> {
        Ok(self.ledger.read().await.state.clone())
    }

    async fn save(&self, state: RegistryState) -> Result<()> {
        self.ledger.write().await.state = Some(state);
        Ok(())
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn store(&self, account: ExternalAccount) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.accounts.insert(account.address, account);
        Ok(())
    }

    async fn get(&self, address: Address) -> Result<Option<ExternalAccount>> {
        let ledger = self.ledger.read().await;
        Ok(ledger.accounts.get(&address).cloned())
    }

    async fn get_all(&self) -> Result<Vec<ExternalAccount>> {
        let ledger = self.ledger.read().await;
        let mut all: Vec<ExternalAccount> = ledger.accounts.values().cloned().collect();
        all.sort_by_key(|account| account.address);
        Ok(all)
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn commit(&self, state: RegistryState, accounts: Vec<ExternalAccount>) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.state = Some(state);
        for account in accounts {
            ledger.accounts.insert(account.address, account);
        }
        Ok(())
    }
}
