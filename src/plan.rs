//! # Execution Plan Construction
//!
//! This module turns a set of requested configuration names into a frozen
//! [`ExecutionPlan`]: the fully resolved parameter set handed to the external
//! build tools. Construction follows a fixed layering order, which is part of
//! the contract:
//!
//! 1. Built-in defaults (including the derived build-directory name).
//! 2. Each requested configuration's inheritance chain, oldest ancestor
//!    first, deep-merged onto the working document.
//! 3. Command-line overrides, in a fixed order, applied last so they always
//!    win.
//! 4. Normalization: a single-string `cmake-target` becomes a one-element
//!    sequence, and `source-directory` is resolved against the project
//!    directory.
//! 5. If `clean-build` resolved to true, the build directory is deleted
//!    recursively before the plan is returned.
//!
//! Resolution works on a raw JSON document so that configurations may carry
//! arbitrary keys; the document is deserialized into the typed plan only once
//! all layers have been applied. The catalog itself is never mutated: each
//! merge clones the ancestor spec onto the working document, so specs stay
//! reusable across multiple requested configurations in one invocation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{Catalog, StringOrList};
use crate::error::{Error, Result};
use crate::merge::deep_merge;
use crate::resolve::merge_order;

/// Source directory used when neither the catalog nor the CLI names one.
pub const DEFAULT_SOURCE_DIRECTORY: &str = "src";
/// Build command used when neither the catalog nor the CLI names one.
pub const DEFAULT_BUILD_COMMAND: &str = "make";
/// Generator executable used when neither the catalog nor the CLI names one.
pub const DEFAULT_CMAKE_EXE: &str = "cmake";
/// Build target used when neither the catalog nor the CLI names one.
pub const DEFAULT_CMAKE_TARGET: &str = "all";

/// Command-line overrides layered on top of the merged configuration.
///
/// Fields are applied in declaration order; `options` entries are `KEY=VALUE`
/// strings split on the first `=`, so values may themselves contain `=`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub clean_build: Option<bool>,
    pub build_directory: Option<String>,
    pub source_directory: Option<String>,
    pub generator: Option<String>,
    pub cmake_exe: Option<String>,
    pub cmake_target: Option<Vec<String>>,
    /// Raw `KEY=VALUE` option overrides, in the order given on the command
    /// line.
    pub options: Vec<String>,
}

/// The fully resolved, frozen parameter set for one build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExecutionPlan {
    /// Directory the build takes place in, relative to the invocation's
    /// working directory unless overridden with an absolute path.
    pub build_directory: String,
    /// Whether the build directory was wiped before this plan was returned.
    pub clean_build: bool,
    /// Absolute path to the directory holding the top-level CMakeLists.txt.
    pub source_directory: PathBuf,
    /// Command invoked for the build step, e.g. `make`.
    pub build_command: String,
    /// Executable invoked for the generate step, e.g. `cmake`.
    pub cmake_exe: String,
    /// Targets passed to the build command. Always a sequence: a bare string
    /// anywhere in the inheritance chain is normalized on deserialization.
    #[serde(deserialize_with = "one_or_many")]
    pub cmake_target: Vec<String>,
    /// CMake generator passed via `-G`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    /// `-D` define flags passed to the generate step.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// Directory the configuration document lives in.
    #[serde(default)]
    pub project_directory: PathBuf,
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrList::deserialize(deserializer)?.into_vec())
}

/// Derive the default build-directory name from the project directory's
/// basename and the requested configuration names, in request order:
/// project `proj` with configurations `["a", "b"]` yields `build-proj-a-b`.
pub fn derive_build_directory(project_dir: &Path, requested: &[String]) -> String {
    let basename = project_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("build-{}", basename);
    for configuration in requested {
        name.push('-');
        name.push_str(configuration);
    }
    name
}

/// Build the execution plan for the requested configurations.
///
/// See the module documentation for the layering order. `project_dir` is the
/// directory the configuration document was loaded from; relative source
/// directories are resolved against it.
///
/// # Errors
///
/// - Propagates `UnknownConfiguration` and `InheritanceCycle` from chain
///   resolution.
/// - `Error::MalformedOverride` for a `-o` override without `=`.
/// - `Error::ConfigParse` if the merged document does not form a valid plan.
/// - `Error::Io` if a requested clean build fails to delete the directory.
pub fn build_plan(
    requested: &[String],
    catalog: &Catalog,
    overrides: &Overrides,
    project_dir: &Path,
) -> Result<ExecutionPlan> {
    let mut doc = seed_defaults(project_dir, requested);

    for name in merge_order(requested, catalog)? {
        // merge_order only yields names present in the catalog.
        if let Some(spec) = catalog.get(&name) {
            log::debug!("merging configuration '{}'", name);
            deep_merge(&mut doc, &spec.0);
        }
    }

    apply_overrides(&mut doc, overrides)?;

    let mut plan: ExecutionPlan =
        serde_json::from_value(Value::Object(doc)).map_err(|err| Error::ConfigParse {
            message: format!("resolved configuration is not a valid execution plan: {}", err),
        })?;

    plan.source_directory = project_dir.join(&plan.source_directory);
    plan.project_directory = project_dir.to_path_buf();

    if plan.clean_build {
        let build_dir = Path::new(&plan.build_directory);
        if build_dir.exists() {
            log::info!("clean build requested, removing '{}'", plan.build_directory);
            fs::remove_dir_all(build_dir)?;
        }
    }

    Ok(plan)
}

fn seed_defaults(project_dir: &Path, requested: &[String]) -> Map<String, Value> {
    let mut doc = Map::new();
    doc.insert(
        "build-directory".to_string(),
        Value::String(derive_build_directory(project_dir, requested)),
    );
    doc.insert("clean-build".to_string(), Value::Bool(false));
    doc.insert(
        "source-directory".to_string(),
        Value::String(DEFAULT_SOURCE_DIRECTORY.to_string()),
    );
    doc.insert(
        "build-command".to_string(),
        Value::String(DEFAULT_BUILD_COMMAND.to_string()),
    );
    doc.insert(
        "cmake-exe".to_string(),
        Value::String(DEFAULT_CMAKE_EXE.to_string()),
    );
    doc.insert(
        "cmake-target".to_string(),
        Value::String(DEFAULT_CMAKE_TARGET.to_string()),
    );
    doc.insert("options".to_string(), Value::Object(Map::new()));
    doc
}

/// Apply CLI overrides onto the merged document. The order is fixed and part
/// of the contract: clean-build, build-directory, source-directory,
/// generator, cmake-exe, cmake-target, then `-o` option overrides.
fn apply_overrides(doc: &mut Map<String, Value>, overrides: &Overrides) -> Result<()> {
    if let Some(clean) = overrides.clean_build {
        doc.insert("clean-build".to_string(), Value::Bool(clean));
    }
    if let Some(dir) = &overrides.build_directory {
        doc.insert("build-directory".to_string(), Value::String(dir.clone()));
    }
    if let Some(dir) = &overrides.source_directory {
        doc.insert("source-directory".to_string(), Value::String(dir.clone()));
    }
    if let Some(generator) = &overrides.generator {
        doc.insert("generator".to_string(), Value::String(generator.clone()));
    }
    if let Some(exe) = &overrides.cmake_exe {
        doc.insert("cmake-exe".to_string(), Value::String(exe.clone()));
    }
    if let Some(targets) = &overrides.cmake_target {
        doc.insert(
            "cmake-target".to_string(),
            Value::Array(targets.iter().cloned().map(Value::String).collect()),
        );
    }

    for raw in &overrides.options {
        let (key, value) = raw.split_once('=').ok_or_else(|| Error::MalformedOverride {
            raw: raw.clone(),
        })?;
        let slot = doc
            .entry("options".to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        let options = slot.as_object_mut().ok_or_else(|| Error::ConfigParse {
            message: "\"options\" must be a mapping of KEY to VALUE".to_string(),
        })?;
        options.insert(key.to_string(), Value::String(value.to_string()));
    }

    Ok(())
}
