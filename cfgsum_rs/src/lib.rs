//! # cfgsum
//!
//! **Calculator inventory** for bracketed-section `.cfg` files.
//!
//! Every `[Section]` declaring a `type=` is a calculator instance. cfgsum
//! collects them across many files, groups them by type, collapses sections
//! with identical settings into one row, and cross-references the native
//! sources that register each calculator and read its settings.
//!
//! ## Pipeline
//!
//! 1. [`cfg::ConfigParser`] - tolerant section parser (first key wins)
//! 2. [`native::NativeMiner`] - registration pairs and `init` defaults
//! 3. [`inventory::Inventory`] - grouping, dedup, native join
//! 4. [`report::emit`] - three stacked blocks per type sheet + summary sheet
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use cfgsum::runner::{run, RunOptions};
//!
//! let mut options = RunOptions::new("deals/cfg_files.csv");
//! options.output = "summary.xlsx".into();
//! options.native_list = Some("native_files.csv".into());
//! let summary = run(&options).unwrap();
//! println!("{} type sheets", summary.emitted.type_sheets);
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! cfgsum -i deal.cfg                          # single file
//! cfgsum -i cfg_files.csv -c cpp_files.csv    # list files + native join
//! cfgsum -i cfg_files.csv -o summary.json     # JSON instead of xlsx
//! ```

/// Command-line arguments ([`Args`](args::Args)).
pub mod args;

/// Bracketed-section parser.
pub mod cfg;

/// Optional `.cfgsum/config.toml` support.
pub mod config;

/// Fatal input errors.
pub mod error;

/// Input list files and path display helpers.
pub mod fs_utils;

/// Grouping & dedup engine.
pub mod inventory;

/// Native source mining.
///
/// - [`native::scanner`] - brace-depth routine isolation
/// - [`native::register`] - registration table
/// - [`native::defaults`] - settings accessor defaults
pub mod native;

/// Sheet layout and xlsx/JSON writers.
pub mod report;

/// End-to-end pipeline.
pub mod runner;

pub mod types;

pub use error::InputError;
pub use types::{DefaultLiteral, DefaultPropertyEntry, FunctorRecord, PropertyMap, RegistrationEntry};
