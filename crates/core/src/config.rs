use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    endpoint::Endpoint,
    error::{Result, TldwError},
};

pub const ENV_API_ORIGIN: &str = "TLDW_API_ORIGIN";
pub const ENV_ENVIRONMENT: &str = "TLDW_ENV";

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub endpoint: Endpoint,
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_origin: Option<String>,
    environment: Option<String>,
}

/// Get the path of the user config file
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tldw").join("config.toml"))
}

impl Settings {
    /// Defaults, then the user config file, then environment variables
    pub fn load() -> Result<Self> {
        let file = match get_config_path() {
            Some(path) if path.is_file() => {
                let raw = read_config(&path)?;
                Some((path, raw))
            }
            _ => None,
        };

        Self::from_sources(
            file.as_ref().map(|(path, raw)| (path.as_path(), raw.as_str())),
            |key| std::env::var(key).ok(),
        )
    }

    /// `file` is the config file's path and contents; the path is only used
    /// in error reports.
    pub fn from_sources(
        file: Option<(&Path, &str)>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some((path, raw)) = file {
            let parsed: FileSettings =
                toml::from_str(raw).map_err(|source| TldwError::ConfigParse {
                    path: path.to_path_buf(),
                    source,
                })?;
            settings.apply(parsed.environment.as_deref(), parsed.api_origin.as_deref())?;
        }

        settings.apply(
            env(ENV_ENVIRONMENT).as_deref(),
            env(ENV_API_ORIGIN).as_deref(),
        )?;

        Ok(settings)
    }

    // an explicit origin beats a named environment in the same layer
    fn apply(&mut self, environment: Option<&str>, api_origin: Option<&str>) -> Result<()> {
        if let Some(name) = environment.filter(|v| !v.trim().is_empty()) {
            self.endpoint = Endpoint::from_environment(name)?;
        }
        if let Some(origin) = api_origin.filter(|v| !v.trim().is_empty()) {
            self.endpoint = Endpoint::custom(origin)?;
        }
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| TldwError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn toml_file(raw: &str) -> Option<(&Path, &str)> {
        Some((Path::new("/etc/tldw/config.toml"), raw))
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_production() {
        let settings = Settings::from_sources(None, env_of(&[])).unwrap();
        assert_eq!(settings.endpoint, Endpoint::Production);
    }

    #[test]
    fn file_selects_environment() {
        let settings =
            Settings::from_sources(toml_file("environment = \"local\""), env_of(&[])).unwrap();
        assert_eq!(settings.endpoint, Endpoint::Local);
    }

    #[test]
    fn env_overrides_file() {
        let settings = Settings::from_sources(
            toml_file("api_origin = \"http://file.example\""),
            env_of(&[(ENV_API_ORIGIN, "http://env.example:9000/")]),
        )
        .unwrap();
        assert_eq!(settings.endpoint.origin(), "http://env.example:9000");
    }

    #[test]
    fn origin_beats_environment_in_same_layer() {
        let settings = Settings::from_sources(
            None,
            env_of(&[
                (ENV_ENVIRONMENT, "local"),
                (ENV_API_ORIGIN, "https://staging.example"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.endpoint.origin(), "https://staging.example");
    }

    #[test]
    fn bad_toml_is_reported_against_its_path() {
        let err = Settings::from_sources(toml_file("api_origin = "), env_of(&[])).unwrap_err();
        match err {
            TldwError::ConfigParse { path, .. } => {
                assert_eq!(path, Path::new("/etc/tldw/config.toml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
