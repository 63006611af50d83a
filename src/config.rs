use crate::domain::wei::Wei;
use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum payment accepted by `create_person` unless configured otherwise: 1 ether.
pub const DEFAULT_MIN_PAYMENT: Wei = Wei::new(1_000_000_000_000_000_000);
/// Oldest age a person may be registered with. Configs may lower it, never raise it.
pub const DEFAULT_MAX_AGE: u32 = 150;
/// Age from which a person is flagged as senior.
pub const DEFAULT_SENIOR_AGE: u32 = 65;

/// Rules applied by the registry when creating a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub min_payment: Wei,
    pub max_age: u32,
    pub senior_age: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            min_payment: DEFAULT_MIN_PAYMENT,
            max_age: DEFAULT_MAX_AGE,
            senior_age: DEFAULT_SENIOR_AGE,
        }
    }
}

impl RegistryConfig {
    /// Loads a config from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let config: Self = serde_json::from_slice(&bytes).map_err(|e| {
            RegistryError::ValidationError(format!("Invalid config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_payment.is_zero() {
            return Err(RegistryError::ValidationError(
                "min_payment must be positive".to_string(),
            ));
        }
        if self.max_age > DEFAULT_MAX_AGE {
            return Err(RegistryError::ValidationError(format!(
                "max_age {} exceeds the ceiling of {}",
                self.max_age, DEFAULT_MAX_AGE
            )));
        }
        if self.senior_age > self.max_age {
            return Err(RegistryError::ValidationError(format!(
                "senior_age {} exceeds max_age {}",
                self.senior_age, self.max_age
            )));
        }
        Ok(())
    }
}
