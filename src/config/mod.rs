use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "teamzones";

fn default_verbose() -> bool {
    false
}

fn default_json() -> bool {
    false
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// Cached team list (JSON array of team rows)
    #[serde(default)]
    pub teams: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default = "default_json")]
    pub json: bool,
}

impl FileConfig {
    /// First readable config from the search paths
    pub fn load() -> Option<Self> {
        Self::load_from(&get_config_paths())
    }

    pub fn load_from(paths: &[PathBuf]) -> Option<Self> {
        for path in paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "failed to parse config file"
                        );
                    }
                }
            }
        }
        None
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from(format!("{}.toml", CONFIG_NAME)));
    paths.push(PathBuf::from(format!(".{}.toml", CONFIG_NAME)));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(CONFIG_NAME).join("config.toml"));
        paths.push(config_dir.join(format!("{}.toml", CONFIG_NAME)));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}.toml", CONFIG_NAME)));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_parse_all_keys() {
        let config: FileConfig = toml::from_str(
            r#"
            teams = "cache/teams.json"
            verbose = true
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.teams, Some(PathBuf::from("cache/teams.json")));
        assert!(config.verbose);
        assert!(config.json);
    }

    #[test]
    fn test_load_from_skips_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let invalid = dir.path().join("invalid.toml");
        let valid = dir.path().join("valid.toml");
        fs::write(&invalid, "teams = [").unwrap();
        fs::write(&valid, "teams = \"t.json\"").unwrap();

        let config = FileConfig::load_from(&[missing, invalid, valid]).unwrap();
        assert_eq!(config.teams, Some(PathBuf::from("t.json")));
    }

    #[test]
    fn test_load_from_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::load_from(&[dir.path().join("none.toml")]).is_none());
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::from_file(&dir.path().join("none.toml")).is_err());

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "verbose = \"yes\"").unwrap();
        assert!(FileConfig::from_file(&bad).is_err());
    }
}
