use calico_core::error::{CalicoError, Result};
use calico_core::{BuildOptions, Policy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_NAME: &str = "my_archive.calico";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
    pub name: Option<String>,
    pub deterministic: Option<bool>,
    pub overwrite: Option<bool>,
    pub max_files: Option<usize>,
}

impl Config {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn name(&self) -> String {
        self.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_string())
    }

    pub fn build_options(&self) -> BuildOptions {
        let defaults = Policy::default();
        BuildOptions {
            deterministic: self.deterministic.unwrap_or(false),
            policy: Policy {
                max_files: self.max_files.unwrap_or(defaults.max_files),
                allow_overwrite: self.overwrite.unwrap_or(defaults.allow_overwrite),
            },
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    let v = value.trim();
    if ["true", "1", "yes"].iter().any(|t| v.eq_ignore_ascii_case(t)) {
        Ok(true)
    } else if ["false", "0", "no"].iter().any(|f| v.eq_ignore_ascii_case(f)) {
        Ok(false)
    } else {
        Err(CalicoError::Config(format!(
            "CALICO_{key}={value:?}: expected true/false, yes/no or 1/0"
        )))
    }
}

/// Reads `CALICO_*` variables out of `vars`.
pub fn read_env<I>(vars: I) -> Result<Config>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut cfg = Config::default();
    for (key, value) in vars {
        let Some(key) = key.strip_prefix("CALICO_") else {
            continue;
        };
        match key {
            "OUTPUT_DIR" => cfg.output_dir = Some(PathBuf::from(value)),
            "NAME" => cfg.name = Some(value),
            "DETERMINISTIC" => cfg.deterministic = Some(parse_bool(key, &value)?),
            "OVERWRITE" => cfg.overwrite = Some(parse_bool(key, &value)?),
            "MAX_FILES" => {
                let n = value.trim().parse().map_err(|e| {
                    CalicoError::Config(format!("CALICO_MAX_FILES={value:?}: {e}"))
                })?;
                cfg.max_files = Some(n);
            }
            _ => {}
        }
    }
    Ok(cfg)
}

/// Reads YAML or JSON config from file
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let cfg = if is_json {
        serde_json::from_str(&content)
            .map_err(|e| CalicoError::Config(format!("{}: {e}", path.display())))?
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| CalicoError::Config(format!("{}: {e}", path.display())))?
    };
    Ok(cfg)
}

/// Merge configs by priority: env < file < cli
pub fn merge_configs(env: Config, file: Config, cli: Config) -> Config {
    fn pick<T>(env: Option<T>, file: Option<T>, cli: Option<T>) -> Option<T> {
        cli.or(file).or(env)
    }

    Config {
        output_dir: pick(env.output_dir, file.output_dir, cli.output_dir),
        name: pick(env.name, file.name, cli.name),
        deterministic: pick(env.deterministic, file.deterministic, cli.deterministic),
        overwrite: pick(env.overwrite, file.overwrite, cli.overwrite),
        max_files: pick(env.max_files, file.max_files, cli.max_files),
    }
}
