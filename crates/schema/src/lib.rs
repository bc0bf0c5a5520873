//! Record schemas and validation for validatehound.
//!
//! This crate maps bundle file names to BloodHound record schemas and
//! checks every record of a loaded bundle against them.

pub mod registry;
pub mod schema;
pub mod validation;

pub use registry::{SchemaDescriptor, SchemaRegistry, Violation};
pub use validation::{validate, ValidationReport, ValidationResult, NOT_A_LIST};
