//! Quote Types - Pure type definitions for the Quote API
//!
//! This crate contains only plain data types with no async runtime
//! dependencies, shared between the server and its tests.

pub mod quote;

pub use quote::*;
