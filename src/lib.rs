//! `OpenAPI` 3.0 document model with source positions
//!
//! A document is parsed into a positioned YAML tree, indexed for `$ref`
//! resolution, and built into a [`low`] model that remembers where every value
//! was written. The [`high`] model is a plain-data projection of it.
//!
//! ```no_run
//! use strata::config::BuildConfig;
//! use strata::high;
//! use strata::low::DocumentBuilder;
//!
//! # fn main() -> Result<(), strata::error::Error> {
//! let content = std::fs::read_to_string("openapi.yaml")?;
//! let outcome = DocumentBuilder::new(BuildConfig::default()).build_from_str(&content)?;
//! for error in &outcome.errors {
//!     eprintln!("{error}");
//! }
//! let document = high::Document::from(&outcome.document);
//! println!("{} operations", document.operation_count());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fs;
pub mod high;
pub mod index;
pub mod low;
pub mod rolodex;
pub mod yaml;
