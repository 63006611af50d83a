use super::address::Address;
use super::wei::Wei;
use crate::error::RegistryError;
use serde::{Deserialize, Serialize};

/// An external account (wallet) that pays into and receives from the registry.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ExternalAccount {
    pub address: Address,
    pub balance: Wei,
}

impl ExternalAccount {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            balance: Wei::ZERO,
        }
    }

    /// Adds funds to the account.
    pub fn credit(&mut self, amount: Wei) -> Result<(), RegistryError> {
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            RegistryError::ValidationError(format!("Balance overflow for {}", self.address))
        })?;
        Ok(())
    }

    /// Removes funds from the account if sufficient
    pub fn debit(&mut self, amount: Wei) -> Result<(), RegistryError> {
        match self.balance.checked_sub(amount) {
            Some(remaining) => {
                self.balance = remaining;
                Ok(())
            }
            None => Err(RegistryError::InsufficientFunds {
                address: self.address,
                available: self.balance,
                required: amount,
            }),
        }
    }
}
