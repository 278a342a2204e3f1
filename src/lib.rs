//! eprints-xml library
//!
//! This crate provides the core functionality for the `eprints-xml` binary.
//! Keep the crate root minimal: implementation and tests live in their modules.
//!
//! ## Overview
//!
//! Two independent batch transformations over bibliographic metadata:
//!
//! - [`mapper`] - Rewrites JSON records into EPrints XML, one file per chunk of records
//! - [`filter`] - Strips record fields not on an allow-list from an EPrints XML file
//! - [`records`] - Loads records from JSON exports (arrays, JSON Lines, search-index hits)
//! - [`models`] - Tagged value model the mapper dispatches on
//! - [`xml`] - In-memory element tree with a quick-xml reader and indenting writer
//! - [`report`] - Progress reporting passed into the components
//! - [`cli`] - Command-line interface
//! - [`config`] - TOML configuration for transform runs
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use eprints_xml::{errors::AppResult, mapper, records, report::TracingReporter};
//! use std::path::Path;
//!
//! # fn example() -> AppResult<()> {
//! let records = records::load_records(Path::new("export.json"))?;
//! let files = mapper::transform(
//!     Path::new("out"),
//!     "edoc-data-",
//!     &records,
//!     None,
//!     &mut TracingReporter,
//! )?;
//! assert!(!files.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filter;
pub mod mapper;
pub mod models;
pub mod records;
pub mod report;
pub mod utils;
pub mod xml;
