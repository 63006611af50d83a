//! Domain layer: value types, the registry state machine and storage ports.
//!
//! Nothing in here performs I/O. The application layer loads state through
//! the ports, applies one transition and writes the result back.

pub mod account;
pub mod address;
pub mod call;
pub mod person;
pub mod ports;
pub mod registry;
pub mod wei;
