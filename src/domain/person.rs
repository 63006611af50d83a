use super::address::Address;
use serde::{Deserialize, Serialize};

/// A registered person.
///
/// `senior` is derived from `age` when the record is built and is never set
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub height: u32,
    pub senior: bool,
    /// The account that paid for this record.
    pub creator: Address,
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        height: u32,
        senior_age: u32,
        creator: Address,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            height,
            senior: age >= senior_age,
            creator,
        }
    }
}
