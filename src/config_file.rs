use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const PROJECT_CONFIG_NAME: &str = ".loglabrc";

/// Subcommands that may carry a `name = <args>` line of their own.
pub const COMMAND_KEYS: [&str; 4] = ["parse", "scan", "pi", "check-config"];

/// Global option whose value must not be mistaken for the subcommand.
const CONFIG_FILE_FLAG: &str = "--config-file";

/// Check `key = value` config text.
///
/// Blank lines and lines starting with `#` (after trimming) are skipped.
/// Every other line needs an `=` with a non-empty key before it; the value
/// may be empty.
pub fn validate_config(text: &str) -> Result<(), ConfigError> {
    for (idx, raw) in text.split('\n').enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, _value)) = raw.split_once('=') else {
            return Err(ConfigError::MissingEquals {
                line_number: idx + 1,
                line: raw.to_string(),
            });
        };

        if key.trim().is_empty() {
            return Err(ConfigError::EmptyKey {
                line_number: idx + 1,
                line: raw.to_string(),
            });
        }
    }
    Ok(())
}

/// Settings read from a single config file.
///
/// `defaults = <args>` goes in front of every invocation. A line keyed by a
/// subcommand (`pi = --workers 4`) is spliced in right after that subcommand.
/// Any other key is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub source: Option<PathBuf>,
    pub defaults: Option<String>,
    pub commands: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Candidate files, most specific first: `.loglabrc` in the working
    /// directory and each of its parents, then the XDG location, then `~`.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(cwd) = env::current_dir() {
            paths.extend(cwd.ancestors().map(|dir| dir.join(PROJECT_CONFIG_NAME)));
        }
        if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("loglab").join("config.ini"));
        }
        if let Some(home) = env::var_os("HOME") {
            let home = PathBuf::from(home);
            paths.push(home.join(".config").join("loglab").join("config.ini"));
            paths.push(home.join(PROJECT_CONFIG_NAME));
        }

        paths
    }

    /// First existing file among [`ConfigFile::search_paths`].
    pub fn discover() -> Option<PathBuf> {
        Self::search_paths().into_iter().find(|path| path.is_file())
    }

    /// Load `custom_path` when given (it must exist), otherwise the first
    /// discovered file. No file at all yields an empty config.
    pub fn load(custom_path: Option<&Path>) -> Result<Self> {
        match custom_path.map(Path::to_path_buf).or_else(Self::discover) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Read, validate and parse one config file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        validate_config(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config file");
        let mut config = Self::parse_content(&content);
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse already validated content
    fn parse_content(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            let key = key.trim();
            let value = value.trim().to_string();
            if key == "defaults" {
                config.defaults = Some(value);
            } else if COMMAND_KEYS.contains(&key) {
                config.commands.insert(key.to_string(), value);
            } else {
                tracing::debug!(key, "ignoring unknown config key");
            }
        }

        config
    }

    /// Splice configured arguments into a raw argument list.
    ///
    /// Defaults follow the program name. Per-command arguments follow the
    /// subcommand, which is the first positional argument; nothing after it
    /// is looked at, so a file named like a subcommand is left alone.
    pub fn process_args(&self, args: Vec<String>) -> Result<Vec<String>> {
        let mut result = Vec::with_capacity(args.len());
        let mut args = args.into_iter();

        if let Some(program) = args.next() {
            result.push(program);
        }

        if let Some(defaults) = &self.defaults {
            let default_args = shell_words::split(defaults)
                .context("Invalid defaults: failed to parse arguments")?;
            result.extend(default_args);
        }

        let mut command_seen = false;
        let mut pending_value = false;
        for arg in args {
            let is_command = !command_seen && !pending_value && !arg.starts_with('-');
            pending_value = !command_seen && arg == CONFIG_FILE_FLAG;

            let command_args = if is_command {
                command_seen = true;
                self.commands.get_key_value(&arg)
            } else {
                None
            };
            result.push(arg);

            if let Some((command, command_args)) = command_args {
                let extra = shell_words::split(command_args).with_context(|| {
                    format!("Invalid arguments for '{}': failed to parse", command)
                })?;
                result.extend(extra);
            }
        }

        Ok(result)
    }

    /// Describe which file is active, what it sets, and where loglab looked.
    pub fn show<W: Write>(custom_path: Option<&Path>, out: &mut W) -> Result<()> {
        let config = Self::load(custom_path)?;

        match &config.source {
            Some(path) => writeln!(out, "Active config: {}", path.display())?,
            None => writeln!(out, "Active config: none")?,
        }
        if let Some(defaults) = &config.defaults {
            writeln!(out, "  defaults = {}", defaults)?;
        }
        for (command, value) in &config.commands {
            writeln!(out, "  {} = {}", command, value)?;
        }

        if custom_path.is_none() {
            writeln!(out, "Searched (first existing wins):")?;
            for path in Self::search_paths() {
                let marker = if path.is_file() { "*" } else { " " };
                writeln!(out, "  {} {}", marker, path.display())?;
            }
        }
        Ok(())
    }
}
