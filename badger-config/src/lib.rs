use log::{info, warn};
use logging::LoggingConfig;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use thiserror::Error;
use toml::Table;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub mod logging;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Couldn't read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Couldn't parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Couldn't serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings of the host that the modules run in.
#[serde_inline_default]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BasicConfiguration {
    /// Name of the server, used by text templates.
    #[serde_inline_default("A Badger Server".to_string())]
    pub server_name: String,
    /// Suffix of the language files modules load, `<module>_<language>.lang`.
    #[serde_inline_default("en".to_string())]
    pub language: String,
    /// The world inventories fall back to when a restricted world has to be
    /// left or entered from another restricted world.
    #[serde_inline_default("world".to_string())]
    pub default_world: String,
    /// Folder holding one data folder per module.
    #[serde_inline_default(PathBuf::from("modules"))]
    pub modules_folder: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for BasicConfiguration {
    fn default() -> Self {
        Self {
            server_name: "A Badger Server".to_string(),
            language: "en".to_string(),
            default_world: "world".to_string(),
            modules_folder: PathBuf::from("modules"),
            logging: LoggingConfig::default(),
        }
    }
}

pub trait LoadTomlConfiguration {
    /// Loads the configuration at `path`, writing the defaults there first
    /// when the file does not exist yet.
    fn load(path: &Path) -> Result<Self, ConfigError>
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let config = if path.exists() {
            let file_content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

            toml::from_str(&file_content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            let content = Self::default();

            if let Err(err) = fs::write(path, toml::to_string(&content)?) {
                warn!("Couldn't write default config to {:?}. Reason: {}", path, err);
            }

            content
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError>;
}

impl LoadTomlConfiguration for BasicConfiguration {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_world.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_world must name a world".to_string(),
            ));
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::Invalid("language must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A module's own configuration file, living in the module's data folder.
///
/// Loading merges the defaults into whatever is on disk: keys the file lacks
/// are filled in from [`Default`], keys it has (including ones this version
/// does not know) are kept, and the merged document is written back.
pub trait ModuleConfiguration: Sized + Default + Serialize + DeserializeOwned {
    const FILE_NAME: &'static str = "config.toml";

    /// Never fails: a file that can't be read or parsed is reported and the
    /// defaults are used without touching the file.
    fn load(data_folder: &Path) -> Self {
        match Self::try_load(data_folder) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err}. Falling back to the default configuration");
                Self::default()
            }
        }
    }

    fn try_load(data_folder: &Path) -> Result<Self, ConfigError> {
        let path = data_folder.join(Self::FILE_NAME);
        let defaults = Table::try_from(Self::default())?;

        let (mut table, existed) = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            let table = content
                .parse::<Table>()
                .map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;
            (table, true)
        } else {
            (Table::new(), false)
        };

        let changed = merge_defaults(&mut table, defaults);
        let config = table
            .clone()
            .try_into::<Self>()
            .map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;

        if changed || !existed {
            if let Err(err) = write_table(&path, &table) {
                warn!("{err}");
            } else {
                info!("Saved configuration defaults to {:?}", path);
            }
        }
        Ok(config)
    }
}

/// Copies every key of `defaults` that `target` lacks into `target`,
/// descending into nested tables. Returns whether anything was added.
pub fn merge_defaults(target: &mut Table, defaults: Table) -> bool {
    let mut changed = false;
    for (key, default) in defaults {
        match target.get_mut(&key) {
            None => {
                target.insert(key, default);
                changed = true;
            }
            Some(toml::Value::Table(existing)) => {
                if let toml::Value::Table(default) = default {
                    changed |= merge_defaults(existing, default);
                }
            }
            Some(_) => {}
        }
    }
    changed
}

fn write_table(path: &Path, table: &Table) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, toml::to_string(table)?).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde::{Deserialize, Serialize};

    use super::{BasicConfiguration, LoadTomlConfiguration, ModuleConfiguration};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "kebab-case")]
    struct Sample {
        worlds: Vec<String>,
        interact_blacklist: Vec<String>,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                worlds: vec![],
                interact_blacklist: vec!["ENDER_CHEST".into(), "CHEST".into()],
            }
        }
    }

    impl ModuleConfiguration for Sample {}

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Sample::load(dir.path());
        assert_eq!(config, Sample::default());

        let written = fs::read_to_string(dir.path().join("config.toml")).unwrap();
        assert!(written.contains("interact-blacklist"));
    }

    #[test]
    fn defaults_merge_into_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "worlds = [\"Creative\"]\nextra = 5\n").unwrap();

        let config = Sample::load(dir.path());
        assert_eq!(config.worlds, vec!["Creative".to_string()]);
        assert_eq!(config.interact_blacklist, vec!["ENDER_CHEST", "CHEST"]);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("extra = 5"));
        assert!(written.contains("interact-blacklist"));
    }

    #[test]
    fn broken_file_falls_back_without_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "worlds = [unterminated").unwrap();

        let config = Sample::load(dir.path());
        assert_eq!(config, Sample::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "worlds = [unterminated");
    }

    #[test]
    fn basic_configuration_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.toml");
        fs::write(&path, "server_name = \"Badgers\"\n").unwrap();

        let config = BasicConfiguration::load(&path).unwrap();
        assert_eq!(config.server_name, "Badgers");
        assert_eq!(config.language, "en");
        assert_eq!(config.default_world, "world");
    }
}
