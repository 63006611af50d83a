use crate::config::RegistryConfig;
use crate::domain::account::ExternalAccount;
use crate::domain::address::Address;
use crate::domain::call::{Call, CallKind};
use crate::domain::person::Person;
use crate::domain::ports::LedgerStoreBox;
use crate::domain::registry::RegistryState;
use crate::domain::wei::Wei;
use crate::error::{RegistryError, Result};
use tokio::sync::Mutex;

/// The main entry point for running calls against a person registry.
///
/// `RegistryService` owns the storage backends and applies one call at a
/// time: every operation holds the service lock from the first read to the
/// last write, so calls observe a single global order.
///
/// Each operation works on copies of the stored state and writes back only
/// after every check has passed. A rejected call changes nothing, and a call
/// that moves value commits the registry and the account together.
pub struct RegistryService {
    config: RegistryConfig,
    store: LedgerStoreBox,
    lock: Mutex<()>,
}

impl RegistryService {
    /// Creates a new `RegistryService` instance.
    ///
    /// # Arguments
    ///
    /// * `config` - Rules applied when creating a person.
    /// * `store` - The store for the registry state and external accounts.
    pub fn new(config: RegistryConfig, store: LedgerStoreBox) -> Self {
        Self {
            config,
            store,
            lock: Mutex::new(()),
        }
    }

    /// Creates the registry with `owner` unless the store already holds one.
    ///
    /// The owner of an existing registry never changes. Returns the effective
    /// owner.
    pub async fn deploy(&self, owner: Address) -> Result<Address> {
        let _guard = self.lock.lock().await;

        if let Some(state) = self.store.load().await? {
            if state.owner() != owner {
                tracing::warn!(
                    requested = %owner,
                    existing = %state.owner(),
                    "Registry already deployed, keeping existing owner"
                );
            }
            return Ok(state.owner());
        }

        self.store.save(RegistryState::new(owner)).await?;
        tracing::info!(%owner, "Registry deployed");
        Ok(owner)
    }

    pub async fn is_deployed(&self) -> Result<bool> {
        Ok(self.store.load().await?.is_some())
    }

    pub async fn owner(&self) -> Result<Address> {
        Ok(self.load_state().await?.owner())
    }

    /// The value currently held by the registry.
    pub async fn balance(&self) -> Result<Wei> {
        Ok(self.load_state().await?.balance())
    }

    /// The balance of an external account; unknown accounts hold nothing.
    pub async fn account_balance(&self, address: Address) -> Result<Wei> {
        Ok(self.load_account(address).await?.balance)
    }

    /// Credits an external account out of thin air, the way a test chain
    /// funds its genesis accounts.
    pub async fn fund(&self, address: Address, amount: Wei) -> Result<Wei> {
        if amount.is_zero() {
            return Err(RegistryError::ValidationError(
                "Funding amount must be positive".to_string(),
            ));
        }
        let _guard = self.lock.lock().await;

        let mut account = self.load_account(address).await?;
        account.credit(amount)?;
        let balance = account.balance;
        self.store.store(account).await?;

        tracing::debug!(%address, %amount, %balance, "Account funded");
        Ok(balance)
    }

    /// Registers a person paid for by `caller`.
    ///
    /// Fails if the age is over the limit, the payment is below the minimum,
    /// or the caller cannot cover the payment.
    pub async fn create_person(
        &self,
        caller: Address,
        payment: Wei,
        name: &str,
        age: u32,
        height: u32,
    ) -> Result<Person> {
        let _guard = self.lock.lock().await;

        let mut state = self.load_state().await?;
        let person = state
            .create_person(caller, payment, name, age, height, &self.config)?
            .clone();

        let mut account = self.load_account(caller).await?;
        account.debit(payment)?;

        self.store.commit(state, vec![account]).await?;

        tracing::info!(
            creator = %caller,
            name = %person.name,
            age = person.age,
            height = person.height,
            senior = person.senior,
            %payment,
            "Person created"
        );
        Ok(person)
    }

    /// The currently registered person, if any.
    pub async fn get_person(&self) -> Result<Option<Person>> {
        Ok(self.load_state().await?.person().cloned())
    }

    /// Removes the registered person. Owner only.
    ///
    /// The record slot is shared, so `target` is logged but does not select
    /// what gets removed.
    pub async fn delete_person(&self, caller: Address, target: Address) -> Result<Option<Person>> {
        let _guard = self.lock.lock().await;

        let mut state = self.load_state().await?;
        let removed = state.delete_person(caller)?;
        self.store.save(state).await?;

        match &removed {
            Some(person) => tracing::info!(
                %target,
                name = %person.name,
                creator = %person.creator,
                "Person deleted"
            ),
            None => tracing::info!(%target, "Delete requested but no person registered"),
        }
        Ok(removed)
    }

    /// Transfers the registry's whole balance to the owner's account. Owner only.
    pub async fn withdraw_all(&self, caller: Address) -> Result<Wei> {
        let _guard = self.lock.lock().await;

        let mut state = self.load_state().await?;
        let amount = state.withdraw_all(caller)?;

        let mut account = self.load_account(caller).await?;
        account.credit(amount)?;

        self.store.commit(state, vec![account]).await?;

        match amount.to_ether() {
            Some(ether) => tracing::info!(owner = %caller, %amount, %ether, "Balance withdrawn"),
            None => tracing::info!(owner = %caller, %amount, "Balance withdrawn"),
        }
        Ok(amount)
    }

    /// Dispatches a scripted call to the matching operation.
    pub async fn process_call(&self, call: Call) -> Result<()> {
        match call.op {
            CallKind::Fund => {
                let amount = required(call.value, "value")?;
                self.fund(call.from, amount).await?;
            }
            CallKind::Create => {
                let payment = call.value.unwrap_or(Wei::ZERO);
                let name = required(call.name, "name")?;
                let age = required(call.age, "age")?;
                let height = required(call.height, "height")?;
                self.create_person(call.from, payment, &name, age, height)
                    .await?;
            }
            CallKind::Get => match self.get_person().await? {
                Some(person) => tracing::info!(
                    caller = %call.from,
                    name = %person.name,
                    age = person.age,
                    height = person.height,
                    senior = person.senior,
                    "Person read"
                ),
                None => tracing::info!(caller = %call.from, "No person registered"),
            },
            CallKind::Delete => {
                let target = required(call.target, "target")?;
                self.delete_person(call.from, target).await?;
            }
            CallKind::Withdraw => {
                self.withdraw_all(call.from).await?;
            }
        }
        Ok(())
    }

    /// Consumes the service and returns the final registry state and all
    /// external accounts, ordered by address.
    pub async fn into_results(self) -> Result<(RegistryState, Vec<ExternalAccount>)> {
        let state = self.load_state().await?;
        let accounts = self.store.get_all().await?;
        Ok((state, accounts))
    }

    async fn load_state(&self) -> Result<RegistryState> {
        self.store
            .load()
            .await?
            .ok_or(RegistryError::NotDeployed)
    }

    async fn load_account(&self, address: Address) -> Result<ExternalAccount> {
        Ok(self
            .store
            .get(address)
            .await?
            .unwrap_or_else(|| ExternalAccount::new(address)))
    }
}

fn required<T>(field: Option<T>, name: &str) -> Result<T> {
    field.ok_or_else(|| RegistryError::ValidationError(format!("Missing field '{}'", name)))
}
