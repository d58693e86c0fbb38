//! Configuration management
//!
//! Holds the few tunables of the crypto core: the network address prefix and
//! the default confidence of the primality test. Values come from the
//! environment or from a TOML file; the global instance is never mutated.

pub mod settings;

pub use settings::{Config, DEFAULT_ADDRESS_PREFIX, GLOBAL_CONFIG};
