use crate::domain::address::Address;
use crate::domain::wei::Wei;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Age {age} exceeds the limit of {max}")]
    AgeLimitExceeded { age: u32, max: u32 },
    #[error("Payment of {paid} wei is below the required {required} wei")]
    InsufficientPayment { paid: Wei, required: Wei },
    #[error("Caller {caller} is not the registry owner")]
    Unauthorized { caller: Address },
    #[error("Account {address} holds {available} wei, {required} wei required")]
    InsufficientFunds {
        address: Address,
        available: Wei,
        required: Wei,
    },
    #[error("Registry has not been deployed")]
    NotDeployed,
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for RegistryError {
    fn from(err: rocksdb::Error) -> Self {
        RegistryError::InternalError(Box::new(err))
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::InternalError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
