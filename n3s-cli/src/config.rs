use crate::cli::Cli;
use crate::error::{CliError, CliResult};
use n3s_graph_compact::{DecodeOptions, EncodeOptions, ReconstructOptions, WriteOptions};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "n3s.toml";

/// TOML structure of `n3s.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub decode: DecodeSection,
    pub encode: EncodeSection,
}

/// `[decode]` table
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeSection {
    pub dynamic: Option<bool>,
    pub exclude: Vec<String>,
    pub allow_variables: Option<bool>,
}

/// `[encode]` table
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeSection {
    pub comments: Option<bool>,
}

impl FileConfig {
    pub fn parse(text: &str) -> CliResult<Self> {
        Ok(toml::from_str(text)?)
    }
}

fn read_config(path: &Path) -> CliResult<FileConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("failed to read {}: {e}", path.display())))?;
    FileConfig::parse(&text)
}

/// Load `--config` if given, otherwise `./n3s.toml` when it exists.
pub fn load(config_override: Option<&Path>) -> CliResult<FileConfig> {
    if let Some(path) = config_override {
        return read_config(path);
    }
    let local = std::env::current_dir()?.join(CONFIG_FILE);
    if local.is_file() {
        tracing::debug!(path = %local.display(), "using local config");
        read_config(&local)
    } else {
        Ok(FileConfig::default())
    }
}

/// Effective conversion options after merging flags over the file.
#[derive(Debug)]
pub struct Settings {
    pub decode: DecodeOptions,
    pub encode: EncodeOptions,
}

/// Merge the command line over `file`: a flag that is set wins, otherwise
/// the file value, otherwise the default.
pub fn resolve(cli: &Cli, file: FileConfig) -> CliResult<Settings> {
    let mut write = WriteOptions::new()
        .with_dynamic_preamble(cli.dynamic || file.decode.dynamic.unwrap_or(false));
    for pattern in file.decode.exclude.iter().chain(&cli.exclude) {
        write = write.with_exclude(Regex::new(pattern)?);
    }

    let reconstruct = ReconstructOptions::new()
        .with_allow_variables(cli.allow_variables || file.decode.allow_variables.unwrap_or(false));

    let encode = EncodeOptions::new().with_comments(file.encode.comments.unwrap_or(true));

    Ok(Settings {
        decode: DecodeOptions { reconstruct, write },
        encode,
    })
}
