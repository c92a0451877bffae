//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. CLI flags (applied by the caller after loading)
//! 2. Environment variables (`EML_REPL_LOG`, `EML_REPL_EVAL_CMD`, `NO_COLOR`)
//! 3. TOML file specified via `--config`
//! 4. `./eml-repl.toml` in the current directory
//! 5. `$XDG_CONFIG_HOME/eml-repl/eml-repl.toml` (or `~/.config/...`)
//! 6. Built-in defaults

use crate::error::ConfigError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

mod defaults;
mod types;

use defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};
pub use defaults::{ENV_EVAL_CMD, ENV_LOG, ENV_NO_COLOR};
pub use types::{
    Config, ConfigSource, DisplayConfig, EvaluatorConfig, EvaluatorKind, GlobalConfigInitResult,
    LoadedConfig, LoggingConfig, ReplConfig,
};

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from `--config`).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    Ok(load_config_with_source(path_override)?.config)
}

/// Load configuration and report which file it came from.
pub fn load_config_with_source(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_config_text(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&text)?;
    apply_env_overrides(&mut config, &env_lookup)?;
    validate(&config)?;
    tracing::debug!(source = ?source, "configuration loaded");
    Ok(LoadedConfig { config, source })
}

/// Read config text from the highest-precedence available source.
fn read_config_text<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    // An explicit path must exist; the others are optional.
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }
    if let Ok(text) = read_file(Path::new(CONFIG_FILE_NAME)) {
        return Ok((text, ConfigSource::Local));
    }
    if let Some(dir) = config_root() {
        let global = dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }
    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(level) = non_empty_env(env_lookup, ENV_LOG) {
        config.logging.level = level;
    }
    if non_empty_env(env_lookup, ENV_NO_COLOR).is_some() {
        config.display.color = false;
    }
    if let Some(line) = non_empty_env(env_lookup, ENV_EVAL_CMD) {
        set_command_evaluator(&mut config.evaluator, &line)?;
    }
    Ok(())
}

fn non_empty_env<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Switch the evaluator to `kind = "command"` from a `program args...` line.
pub fn set_command_evaluator(
    evaluator: &mut EvaluatorConfig,
    command_line: &str,
) -> Result<(), ConfigError> {
    let mut parts = command_line.split_whitespace().map(str::to_string);
    let Some(program) = parts.next() else {
        return Err(ConfigError::Invalid(
            "evaluator command line is empty".to_string(),
        ));
    };
    evaluator.kind = EvaluatorKind::Command;
    evaluator.program = Some(program);
    evaluator.args = parts.collect();
    Ok(())
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.evaluator.kind == EvaluatorKind::Command
        && config
            .evaluator
            .program
            .as_deref()
            .map_or(true, |p| p.trim().is_empty())
    {
        return Err(ConfigError::Invalid(
            "evaluator.program is required when evaluator.kind = \"command\"".to_string(),
        ));
    }
    if config.evaluator.timeout_secs == Some(0) {
        return Err(ConfigError::Invalid(
            "evaluator.timeout_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Paths and `init`
// ---------------------------------------------------------------------------

/// Resolve the base config directory from env/home conventions.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

/// Per-user config path (`~/.config/eml-repl/eml-repl.toml`).
pub fn default_global_config_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Write the default template to the global config path.
///
/// Without `force` an existing file is left alone. With `force` the existing
/// file is copied to a timestamped backup first.
pub fn initialize_default_global_config(
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    let path = default_global_config_path().ok_or_else(|| {
        ConfigError::Invalid("unable to resolve the per-user config directory".to_string())
    })?;
    initialize_config_at_path(&path, force)
}

fn initialize_config_at_path(
    path: &Path,
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if path.exists() {
        if !force {
            return Ok(GlobalConfigInitResult::AlreadyInitialized {
                path: path.to_path_buf(),
            });
        }
        let backup_path = backup_path_for(path);
        std::fs::copy(path, &backup_path)?;
        std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
        return Ok(GlobalConfigInitResult::Overwritten {
            path: path.to_path_buf(),
            backup_path,
        });
    }

    // create_new keeps a concurrently created file intact.
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())?;
            Ok(GlobalConfigInitResult::Created {
                path: path.to_path_buf(),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Ok(GlobalConfigInitResult::AlreadyInitialized {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}

fn backup_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut suffix = 0usize;
    loop {
        let name = match suffix {
            0 => format!("{file_name}.{timestamp}.bak"),
            n => format!("{file_name}.{timestamp}.{n}.bak"),
        };
        let candidate = path.with_file_name(name);
        if !candidate.exists() {
            return candidate;
        }
        suffix += 1;
    }
}
