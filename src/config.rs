//! Generation options, and the config file they can be loaded from.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    assemble::NameFormat,
    error::{ConfigError, SerdeError},
    text::Patterns,
};

/// The only config file version we understand.
const SUPPORTED_VERSION: u32 = 1;

/// What to generate, and how to name it.
#[derive(Clone, Debug)]
pub struct GenerateConfig {
    pub paths: SectionConfig,
    /// Whether to declare the reusable schemas under `components`.
    pub schemas: bool,
    pub type_name_format: NameFormat,
}

impl GenerateConfig {
    pub fn from_options(options: ConfigFileOptions) -> Result<Self, ConfigError> {
        let paths = match options.paths {
            None => SectionConfig::default(),
            Some(SectionOption::Enabled(enabled)) => SectionConfig {
                enabled,
                ..Default::default()
            },
            Some(SectionOption::Filtered { include, exclude }) => SectionConfig {
                enabled: true,
                include: Patterns::new(include)?,
                exclude: Patterns::new(exclude)?,
            },
        };
        let schemas = match options.schemas {
            None => true,
            Some(SectionOption::Enabled(enabled)) => enabled,
            Some(SectionOption::Filtered { include, exclude }) => {
                if !include.is_empty() || !exclude.is_empty() {
                    tracing::warn!("`include` and `exclude` only apply to paths; ignoring them for schemas");
                }
                true
            }
        };
        Ok(Self {
            paths,
            schemas,
            type_name_format: options.type_name_format.unwrap_or_default(),
        })
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            paths: SectionConfig::default(),
            schemas: true,
            type_name_format: NameFormat::default(),
        }
    }
}

/// Which paths to generate types for.
#[derive(Clone, Debug)]
pub struct SectionConfig {
    pub enabled: bool,
    /// If not empty, only paths that match one of these are kept.
    pub include: Patterns,
    /// Paths that match any of these are dropped, even if included.
    pub exclude: Patterns,
}

impl SectionConfig {
    /// Returns `true` if the path template passes both filters.
    pub fn retains(&self, template: &str) -> bool {
        (self.include.is_empty() || self.include.matches_any(template))
            && !self.exclude.matches_any(template)
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include: Patterns::default(),
            exclude: Patterns::default(),
        }
    }
}

/// A YAML or TOML config file.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub options: ConfigFileOptions,
}

impl ConfigFile {
    /// Loads a config file, choosing the format by extension: `.toml`
    /// files are TOML, and everything else is YAML.
    ///
    /// Relative `input` and `output` paths are resolved against the
    /// directory that contains the config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_owned(), err))?;
        let parse_err = |err: SerdeError| ConfigError::Parse(path.to_owned(), err);
        let file: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|err| parse_err(err.into()))?,
            _ => serde_yaml::from_str(&contents).map_err(|err| parse_err(err.into()))?,
        };
        if let Some(version) = file.version
            && version != SUPPORTED_VERSION
        {
            return Err(ConfigError::UnsupportedVersion(version));
        }
        let dir = path.parent().unwrap_or(Path::new(""));
        Ok(Self {
            input: file.input.map(|input| dir.join(input)),
            output: file.output.map(|output| dir.join(output)),
            ..file
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFileOptions {
    #[serde(default)]
    pub type_name_format: Option<NameFormat>,
    #[serde(default)]
    pub paths: Option<SectionOption>,
    #[serde(default)]
    pub schemas: Option<SectionOption>,
}

/// A section toggle, or a filtered section that's implicitly enabled.
#[derive(Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum SectionOption {
    Enabled(bool),
    Filtered {
        #[serde(default)]
        include: Vec<String>,
        #[serde(default)]
        exclude: Vec<String>,
    },
}
