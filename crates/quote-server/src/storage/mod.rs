//! Storage layer
//!
//! Holds the authoritative in-memory quote sequence and mirrors it to a
//! JSON file on every mutation.

pub mod store;

pub use store::{QuoteStore, StoreError};
