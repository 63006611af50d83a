use crate::domain::account::ExternalAccount;
use crate::domain::address::Address;
use crate::domain::registry::RegistryState;
use crate::domain::wei::Wei;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct RegistryRow<'a> {
    owner: Address,
    balance: Wei,
    name: Option<&'a str>,
    age: Option<u32>,
    height: Option<u32>,
    senior: Option<bool>,
    creator: Option<Address>,
}

impl<'a> From<&'a RegistryState> for RegistryRow<'a> {
    fn from(state: &'a RegistryState) -> Self {
        let person = state.person();
        Self {
            owner: state.owner(),
            balance: state.balance(),
            name: person.map(|p| p.name.as_str()),
            age: person.map(|p| p.age),
            height: person.map(|p| p.height),
            senior: person.map(|p| p.senior),
            creator: person.map(|p| p.creator),
        }
    }
}

/// Writes the final registry state as CSV.
///
/// Output is two CSV blocks separated by a blank line: a single registry row
/// (`owner,balance,name,age,height,senior,creator`, person columns empty when
/// nobody is registered) followed by one `address,balance` row per account.
pub struct StateWriter<W: Write> {
    writer: W,
}

impl<W: Write> StateWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_state(&mut self, state: &RegistryState, accounts: &[ExternalAccount]) -> Result<()> {
        {
            let mut wtr = csv::Writer::from_writer(&mut self.writer);
            wtr.serialize(RegistryRow::from(state))?;
            wtr.flush()?;
        }

        writeln!(self.writer)?;

        let mut wtr = csv::Writer::from_writer(&mut self.writer);
        if accounts.is_empty() {
            wtr.write_record(["address", "balance"])?;
        }
        for account in accounts {
            wtr.serialize(account)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
