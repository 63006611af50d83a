use super::address::Address;
use super::person::Person;
use super::wei::Wei;
use crate::config::{DEFAULT_MAX_AGE, RegistryConfig};
use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};

/// The state of a person registry.
///
/// Holds at most one person and the value paid into the registry. Every
/// operation validates its inputs before touching any field, so a rejected
/// operation leaves the state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    owner: Address,
    person: Option<Person>,
    balance: Wei,
}

impl RegistryState {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            person: None,
            balance: Wei::ZERO,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn balance(&self) -> Wei {
        self.balance
    }

    /// Stores a new person, replacing any existing one, and keeps the payment.
    pub fn create_person(
        &mut self,
        caller: Address,
        payment: Wei,
        name: &str,
        age: u32,
        height: u32,
        config: &RegistryConfig,
    ) -> Result<&Person> {
        let max_age = config.max_age.min(DEFAULT_MAX_AGE);
        if age > max_age {
            return Err(RegistryError::AgeLimitExceeded { age, max: max_age });
        }
        if payment.is_zero() || payment < config.min_payment {
            return Err(RegistryError::InsufficientPayment {
                paid: payment,
                required: config.min_payment,
            });
        }
        let balance = self.balance.checked_add(payment).ok_or_else(|| {
            RegistryError::ValidationError("Registry balance overflow".to_string())
        })?;

        self.balance = balance;
        Ok(&*self.person.insert(Person::new(
            name,
            age,
            height,
            config.senior_age,
            caller,
        )))
    }

    pub fn person(&self) -> Option<&Person> {
        self.person.as_ref()
    }

    /// Removes the stored person. Only the owner may do this.
    pub fn delete_person(&mut self, caller: Address) -> Result<Option<Person>> {
        self.ensure_owner(caller)?;
        Ok(self.person.take())
    }

    /// Drains the whole balance. Only the owner may do this.
    pub fn withdraw_all(&mut self, caller: Address) -> Result<Wei> {
        self.ensure_owner(caller)?;
        Ok(std::mem::take(&mut self.balance))
    }

    fn ensure_owner(&self, caller: Address) -> Result<()> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized { caller })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn one_ether() -> Wei {
        Wei::from_ether(dec!(1)).unwrap()
    }

    #[test]
    fn test_create_person_too_old() {
        let config = RegistryConfig::default();
        let mut state = RegistryState::new(addr(0));
        let before = state.clone();

        let result = state.create_person(addr(1), one_ether(), "Methusela", 200, 190, &config);
        assert!(matches!(
            result,
            Err(RegistryError::AgeLimitExceeded { age: 200, max: 150 })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_age_ceiling_cannot_be_raised_by_config() {
        let config = RegistryConfig {
            max_age: 500,
            ..Default::default()
        };
        let mut state = RegistryState::new(addr(0));

        let result = state.create_person(addr(1), one_ether(), "Methusela", 200, 190, &config);
        assert!(matches!(
            result,
            Err(RegistryError::AgeLimitExceeded { age: 200, max: 150 })
        ));
        assert!(state.person().is_none());
    }

    #[test]
    fn test_create_person_at_age_limit() {
        let config = RegistryConfig::default();
        let mut state = RegistryState::new(addr(0));
        assert!(state
            .create_person(addr(1), one_ether(), "Old", 150, 170, &config)
            .is_ok());
    }

    #[test]
    fn test_create_person_for_free() {
        let config = RegistryConfig::default();
        let mut state = RegistryState::new(addr(0));

        let result = state.create_person(addr(1), Wei::new(1000), "Nobody", 50, 190, &config);
        assert!(matches!(
            result,
            Err(RegistryError::InsufficientPayment { .. })
        ));
        let result = state.create_person(addr(1), Wei::ZERO, "Nobody", 50, 190, &config);
        assert!(matches!(
            result,
            Err(RegistryError::InsufficientPayment { .. })
        ));
        assert_eq!(state.balance(), Wei::ZERO);
        assert!(state.person().is_none());
    }

    #[test]
    fn test_create_person_sets_senior_and_balance() {
        let config = RegistryConfig::default();
        let mut state = RegistryState::new(addr(0));

        let person = state
            .create_person(addr(1), one_ether(), "Bernie", 92, 190, &config)
            .unwrap();
        assert!(person.senior);
        assert_eq!(person.age, 92);
        assert_eq!(person.creator, addr(1));
        assert_eq!(state.balance(), one_ether());
    }

    #[test]
    fn test_create_person_overwrites() {
        let config = RegistryConfig::default();
        let mut state = RegistryState::new(addr(0));
        state
            .create_person(addr(1), one_ether(), "First", 30, 180, &config)
            .unwrap();
        state
            .create_person(addr(2), one_ether(), "Second", 40, 170, &config)
            .unwrap();

        assert_eq!(state.person().unwrap().name, "Second");
        assert_eq!(state.balance(), Wei::new(2 * one_ether().value()));
    }

    #[test]
    fn test_delete_person_owner_only() {
        let config = RegistryConfig::default();
        let mut state = RegistryState::new(addr(0));
        state
            .create_person(addr(2), one_ether(), "RobinWilliams", 29, 160, &config)
            .unwrap();

        assert!(matches!(
            state.delete_person(addr(2)),
            Err(RegistryError::Unauthorized { .. })
        ));
        assert!(state.person().is_some());

        let removed = state.delete_person(addr(0)).unwrap();
        assert_eq!(removed.unwrap().name, "RobinWilliams");
        assert!(state.person().is_none());
        // Deleting an empty slot is not an error.
        assert!(state.delete_person(addr(0)).unwrap().is_none());
    }

    #[test]
    fn test_withdraw_all_owner_only() {
        let config = RegistryConfig::default();
        let mut state = RegistryState::new(addr(0));
        state
            .create_person(addr(1), one_ether(), "Payer", 30, 180, &config)
            .unwrap();

        assert!(matches!(
            state.withdraw_all(addr(1)),
            Err(RegistryError::Unauthorized { .. })
        ));
        assert_eq!(state.balance(), one_ether());

        assert_eq!(state.withdraw_all(addr(0)).unwrap(), one_ether());
        assert_eq!(state.balance(), Wei::ZERO);
        assert_eq!(state.withdraw_all(addr(0)).unwrap(), Wei::ZERO);
    }
}
