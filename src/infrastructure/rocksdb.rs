use crate::domain::account::ExternalAccount;
use crate::domain::address::Address;
use crate::domain::ports::{AccountStore, LedgerStore, RegistryStore};
use crate::domain::registry::RegistryState;
use crate::error::{RegistryError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding the single registry state record.
pub const CF_REGISTRY: &str = "registry";
/// Column Family for storing external accounts.
pub const CF_ACCOUNTS: &str = "accounts";

const REGISTRY_KEY: &[u8] = b"state";

/// A persistent store implementation using RocksDB.
///
/// Serves both the registry state and the external accounts from separate
/// Column Families. Values are JSON; account keys are the raw address bytes,
/// so iteration yields accounts ordered by address.
///
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating the
    /// "registry" and "accounts" column families if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_registry = ColumnFamilyDescriptor::new(CF_REGISTRY, Options::default());
        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_registry, cf_accounts])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            RegistryError::InternalError(Box::new(std::io::Error::other(format!(
                "Column family '{}' not found",
                name
            ))))
        })
    }
}

#[async_trait]
impl RegistryStore for RocksDBStore {
    async fn load(&self) -> Result<Option<RegistryState>> {
        let cf = self.cf(CF_REGISTRY)?;
        match self.db.get_cf(cf, REGISTRY_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, state: RegistryState) -> Result<()> {
        let cf = self.cf(CF_REGISTRY)?;
        let value = serde_json::to_vec(&state)?;
        self.db.put_cf(cf, REGISTRY_KEY, value)?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for RocksDBStore {
    async fn store(&self, account: ExternalAccount) -> Result<()> {
        let cf = self.cf(CF_ACCOUNTS)?;
        let value = serde_json::to_vec(&account)?;
        self.db.put_cf(cf, account.address.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, address: Address) -> Result<Option<ExternalAccount>> {
        let cf = self.cf(CF_ACCOUNTS)?;
        match self.db.get_cf(cf, address.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<ExternalAccount>> {
        let cf = self.cf(CF_ACCOUNTS)?;

        let mut accounts = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            accounts.push(serde_json::from_slice(&value)?);
        }

        Ok(accounts)
    }
}

#[async_trait]
impl LedgerStore for RocksDBStore {
    /// Writes the state and the accounts through one `WriteBatch`, which
    /// RocksDB applies atomically across both column families.
    async fn commit(&self, state: RegistryState, accounts: Vec<ExternalAccount>) -> Result<()> {
        let registry_cf = self.cf(CF_REGISTRY)?;
        let accounts_cf = self.cf(CF_ACCOUNTS)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(registry_cf, REGISTRY_KEY, serde_json::to_vec(&state)?);
        for account in &accounts {
            batch.put_cf(
                accounts_cf,
                account.address.as_bytes(),
                serde_json::to_vec(account)?,
            );
        }

        self.db.write(batch)?;
        Ok(())
    }
}
