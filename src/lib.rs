//! EAN-13 column validator.
//!
//! Reads comma-separated records, locates the `ean` column in the header and counts how many
//! rows carry a valid EAN-13 code.

pub mod ean;
pub mod process;
pub mod types;
