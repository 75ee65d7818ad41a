//! # cmake-build Library
//!
//! This library provides the core functionality for resolving named build
//! configurations from a declarative JSON catalog and driving CMake with the
//! result. It is designed to be used by the `cmake-build` command-line tool
//! but can also be integrated into other applications that need inheritable
//! build configurations.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use cmake_build::catalog::Catalog;
//! use cmake_build::plan::{build_plan, Overrides};
//!
//! let catalog = Catalog::parse(
//!     r#"{"default": "release",
//!         "configurations": {
//!             "base":    {"options": {"CMAKE_BUILD_TYPE": "Debug"}},
//!             "release": {"inherits": "base",
//!                         "options": {"CMAKE_BUILD_TYPE": "Release"}}}}"#,
//! ).unwrap();
//!
//! let requested = catalog.default_configurations().unwrap();
//! let plan = build_plan(&requested, &catalog, &Overrides::default(), Path::new("/proj")).unwrap();
//! assert_eq!(plan.options["CMAKE_BUILD_TYPE"], "Release");
//! assert_eq!(plan.build_directory, "build-proj-release");
//! ```
//!
//! ## Core Concepts
//!
//! - **Catalog (`catalog`)**: the read-only document mapping configuration
//!   names to nested parameter mappings, each optionally naming a parent via
//!   `inherits`.
//! - **Deep Merge (`merge`)**: the recursive mapping merge that folds one
//!   configuration onto another.
//! - **Inheritance Resolution (`resolve`)**: walks `inherits` chains
//!   ancestor-first with cycle detection, and computes the global merge order
//!   for multiple requested configurations.
//! - **Execution Plan (`plan`)**: layers defaults, resolved configurations
//!   and CLI overrides into the frozen parameter set handed to the build
//!   tools.
//! - **Execution Driver (`runner`)**: performs the generate and build
//!   invocations inside the build directory, with a push/pop working
//!   directory discipline.
//!
//! ## Execution Flow
//!
//! 1. Load the catalog once (`catalog::Catalog::from_file`).
//! 2. Resolve the requested names into a merge order (`resolve`).
//! 3. Build the execution plan (`plan::build_plan`).
//! 4. Drive the external tools (`runner::execute`).

pub mod catalog;
pub mod error;
pub mod merge;
pub mod plan;
pub mod resolve;
pub mod runner;

#[cfg(test)]
mod merge_proptest;
