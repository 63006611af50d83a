#![allow(dead_code)]

use people_registry::application::service::RegistryService;
use people_registry::config::RegistryConfig;
use people_registry::domain::address::Address;
use people_registry::domain::wei::Wei;
use people_registry::infrastructure::in_memory::InMemoryStore;
use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "op,from,value,name,age,height,target";
pub const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

/// Deterministic test account `n`: twenty bytes of `n`. Account 0 deploys.
pub fn account(n: u8) -> Address {
    Address::new([n; 20])
}

pub fn ether(n: u128) -> Wei {
    Wei::new(n * ONE_ETHER)
}

/// An in-memory registry deployed by `account(0)`.
pub async fn deployed_service() -> RegistryService {
    let service = RegistryService::new(RegistryConfig::default(), Box::new(InMemoryStore::new()));
    service.deploy(account(0)).await.unwrap();
    service
}

/// Writes a call script with the standard header followed by `rows`.
pub fn write_calls(rows: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn fund_row(n: u8, value: &str) -> String {
    format!("fund,{},{}", account(n), value)
}

pub fn create_row(n: u8, value: &str, name: &str, age: u32, height: u32) -> String {
    format!("create,{},{},{},{},{}", account(n), value, name, age, height)
}

pub fn delete_row(caller: u8, target: u8) -> String {
    format!("delete,{},,,,,{}", account(caller), account(target))
}

pub fn withdraw_row(caller: u8) -> String {
    format!("withdraw,{}", account(caller))
}
