//! Common types shared across validatehound crates.

pub mod error;

pub use error::{Error, Result};
