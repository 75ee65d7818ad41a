//! CLI argument parsing and dispatch

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use cmake_build::catalog::Catalog;
use cmake_build::plan::{self, Overrides};
use cmake_build::runner;

/// Resolve a named build configuration and drive CMake with it
#[derive(Parser, Debug)]
#[command(name = "cmake-build")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Name of the build configuration(s) to use
    #[arg(value_name = "CONFIGURATION")]
    configuration: Vec<String>,

    /// Pass the argument to cmake prepended with -D
    #[arg(short, long = "options", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// Use the specified cmake generator
    #[arg(short = 'G', long, value_name = "NAME")]
    generator: Option<String>,

    /// Use the specified cmake executable
    #[arg(short = 'e', long, value_name = "FILE")]
    cmake_exe: Option<String>,

    /// Build the specified cmake target(s)
    #[arg(short = 't', long, value_name = "TARGET", num_args = 1..)]
    cmake_target: Option<Vec<String>>,

    /// Load the build configuration catalog from FILE
    #[arg(short = 'c', long, value_name = "FILE", default_value = "build.json")]
    configuration_file: PathBuf,

    /// Choose whether or not to delete the build directory at the beginning
    /// of the build
    #[arg(short = 'C', long, value_name = "(true|false)", value_parser = parse_bool)]
    clean_build: Option<bool>,

    /// List build configurations
    #[arg(short, long)]
    list: bool,

    /// Show the resolved build configuration
    #[arg(short, long)]
    print: bool,

    /// Directory where the main CMakeLists.txt file is located
    #[arg(short = 's', long, value_name = "DIR")]
    source_directory: Option<String>,

    /// Directory in which the build will take place
    #[arg(short = 'b', long, value_name = "DIR")]
    build_directory: Option<String>,
}

/// Lenient boolean parser for `-C`: accepts the usual spellings in either
/// case.
fn parse_bool(raw: &str) -> std::result::Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "true" | "t" | "y" | "1" | "on" => Ok(true),
        "no" | "false" | "f" | "n" | "0" | "off" => Ok(false),
        _ => Err(format!("boolean value expected, got \"{}\"", raw)),
    }
}

/// The project directory is where the configuration document lives; relative
/// source directories resolve against it.
fn project_directory(configuration_file: &Path) -> Result<PathBuf> {
    let absolute = fs::canonicalize(configuration_file).with_context(|| {
        format!(
            "Configuration file not found: {}",
            configuration_file.display()
        )
    })?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| absolute.clone()))
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let catalog = Catalog::from_file(&self.configuration_file).with_context(|| {
            format!(
                "Failed to load build catalog from {}",
                self.configuration_file.display()
            )
        })?;

        if self.list {
            for name in catalog.names() {
                println!("{}", name);
            }
            return Ok(());
        }

        let project_dir = project_directory(&self.configuration_file)?;
        let requested = if self.configuration.is_empty() {
            catalog.default_configurations()?
        } else {
            self.configuration.clone()
        };
        log::debug!("requested configurations: {:?}", requested);

        let overrides = Overrides {
            clean_build: self.clean_build,
            build_directory: self.build_directory.clone(),
            source_directory: self.source_directory.clone(),
            generator: self.generator.clone(),
            cmake_exe: self.cmake_exe.clone(),
            cmake_target: self.cmake_target.clone(),
            options: self.options.clone(),
        };

        let plan = plan::build_plan(&requested, &catalog, &overrides, &project_dir)?;

        if self.print {
            println!("{}", serde_json::to_string_pretty(&plan)?);
            return Ok(());
        }

        runner::execute(&plan)?;
        Ok(())
    }
}
