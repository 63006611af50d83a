//! Application layer orchestrating registry calls.
//!
//! This module defines the `RegistryService`, which loads state through the
//! storage ports, applies one domain transition per call and moves value
//! between the registry and external accounts.

pub mod service;
