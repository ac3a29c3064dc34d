//! # schooldir - School Registry Lookup
//!
//! schooldir loads a school registry (UDISE records) from a plain
//! comma-separated file and answers the two queries a student registration
//! form needs: search-as-you-type over code, school name and district, and
//! exact code lookup for auto-filling the school.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`directory`] - Registry parsing, loading and querying
//! - [`registration`] - Student form, validation and the code lookup policy
//! - [`tui`] - Interactive registration form
//! - [`output`] - Terminal and JSON formatting of results
//! - [`utils`] - Configuration, logging and progress display
//!
//! ## Quick Start
//!
//! ```no_run
//! use schooldir::directory::{ParseMode, load_from_path};
//! use std::path::Path;
//!
//! let loaded = load_from_path(Path::new("data/schools.csv"), ParseMode::Lenient).unwrap();
//! let directory = loaded.directory;
//!
//! for school in directory.search("khordha") {
//!     println!("{} {}", school.udise_code, school.school_name);
//! }
//!
//! if let Some(school) = directory.find_by_exact_code("21150100101") {
//!     println!("{} ({})", school.school_name, school.district);
//! }
//! ```

pub mod directory;
pub mod output;
pub mod registration;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;
