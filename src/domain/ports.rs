use super::account::ExternalAccount;
use super::address::Address;
use super::registry::RegistryState;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RegistryStore: Send + Sync {
    async fn load(&self) -> Result<Option<RegistryState>>;
    async fn save(&self, state: RegistryState) -> Result<()>;
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn store(&self, account: ExternalAccount) -> Result<()>;
    async fn get(&self, address: Address) -> Result<Option<ExternalAccount>>;
    async fn get_all(&self) -> Result<Vec<ExternalAccount>>;
}

/// Registry state and external accounts behind one handle.
///
/// `commit` writes the state and every given account as a single unit:
/// after an error, none of them has changed.
#[async_trait]
pub trait LedgerStore: RegistryStore + AccountStore {
    async fn commit(&self, state: RegistryState, accounts: Vec<ExternalAccount>) -> Result<()>;
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;

pub type LedgerStoreFactory = Box<dyn Fn() -> LedgerStoreBox + Send + Sync>;
