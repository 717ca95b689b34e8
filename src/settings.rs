use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, ensure};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use fpick::app_dirs;

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    picker: PickerSection,
    engine: EngineSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PickerSection {
    root: Option<PathBuf>,
    initial_query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EngineSection {
    program: Option<PathBuf>,
    args: Option<Vec<String>>,
}

pub(crate) struct ResolvedConfig {
    pub(crate) root: PathBuf,
    pub(crate) initial_query: String,
    pub(crate) engine_program: PathBuf,
    pub(crate) engine_args: Vec<String>,
}

impl ResolvedConfig {
    pub(crate) fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Root: {}", self.root.display());
        println!("  Engine: {}", self.engine_program.display());
        if !self.engine_args.is_empty() {
            println!("  Engine args: {}", self.engine_args.join(" "));
        }
        if !self.initial_query.is_empty() {
            println!("  Initial query: {}", self.initial_query);
        }
    }
}

pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("fpick")
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    match app_dirs::get_config_dir() {
        Ok(dir) => vec![dir.join("fpick.toml")],
        Err(_) => Vec::new(),
    }
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(root) = &cli.root {
            self.picker.root = Some(root.clone());
        }
        if let Some(query) = &cli.initial_query {
            self.picker.initial_query = Some(query.clone());
        }
        if let Some(engine) = &cli.engine {
            self.engine.program = Some(engine.clone());
        }
        if !cli.engine_args.is_empty() {
            self.engine.args = Some(cli.engine_args.clone());
        }
    }

    fn resolve(self) -> Result<ResolvedConfig> {
        let root = resolve_root(self.picker.root)?;
        Ok(ResolvedConfig {
            root,
            initial_query: self.picker.initial_query.unwrap_or_default(),
            engine_program: self
                .engine
                .program
                .unwrap_or_else(|| PathBuf::from("fpick-engine")),
            engine_args: self.engine.args.unwrap_or_default(),
        })
    }
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let mut root = match root {
        Some(path) => path,
        None => env::current_dir().context("failed to determine working directory")?,
    };

    if root.is_relative() {
        root = env::current_dir()
            .context("failed to resolve current directory for root")?
            .join(root);
    }

    root = fs::canonicalize(&root)
        .with_context(|| format!("failed to canonicalize picker root {}", root.display()))?;

    let metadata = fs::metadata(&root)
        .with_context(|| format!("failed to inspect picker root {}", root.display()))?;
    ensure!(metadata.is_dir(), "picker root must be a directory");

    Ok(root)
}
