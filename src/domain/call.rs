use super::address::Address;
use super::wei::Wei;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    /// Credit an external account. Not a registry operation.
    Fund,
    Create,
    Get,
    Delete,
    Withdraw,
}

/// One invocation against the registry, as read from a call script.
///
/// Which of the optional fields are required depends on `op`.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct Call {
    pub op: CallKind,
    pub from: Address,
    #[serde(default)]
    pub value: Option<Wei>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub target: Option<Address>,
}

impl Call {
    pub fn new(op: CallKind, from: Address) -> Self {
        Self {
            op,
            from,
            value: None,
            name: None,
            age: None,
            height: None,
            target: None,
        }
    }

    pub fn fund(from: Address, value: Wei) -> Self {
        Self {
            value: Some(value),
            ..Self::new(CallKind::Fund, from)
        }
    }

    pub fn create(from: Address, value: Wei, name: &str, age: u32, height: u32) -> Self {
        Self {
            value: Some(value),
            name: Some(name.to_string()),
            age: Some(age),
            height: Some(height),
            ..Self::new(CallKind::Create, from)
        }
    }

    pub fn delete(from: Address, target: Address) -> Self {
        Self {
            target: Some(target),
            ..Self::new(CallKind::Delete, from)
        }
    }
}
