//! User configuration documents for benchplan.
//!
//! A user document supplies global default flags, per-benchmark overrides and,
//! optionally, an explicit list of benchmarks to plan. Documents are loaded
//! from TOML or YAML.
//!
//! # Examples
//!
//! ```
//! use benchplan_config::UserConfig;
//!
//! let config = UserConfig::from_yaml_str(r#"
//!     flags:
//!       zone: us-central1-a
//!     fio_small:
//!       name: fio
//!       flag_matrix: sizes
//!       flag_matrix_defs:
//!         sizes:
//!           block_size: [4, 64]
//!       flag_matrix_filters:
//!         sizes: "block_size > 4"
//!       num_jobs: 8
//! "#).unwrap();
//!
//! let fio = config.override_for("fio_small").unwrap();
//! assert_eq!(fio.alias.as_deref(), Some("fio"));
//! assert_eq!(fio.flag_matrix.as_deref(), Some("sizes"));
//! assert_eq!(fio.flags.len(), 1);
//! assert_eq!(config.flags.len(), 1);
//! ```
//!
//! Fall back to an empty document when the file is missing:
//!
//! ```
//! use benchplan_config::UserConfig;
//!
//! let config = UserConfig::load("benchplan.yaml").unwrap_or_default();
//! assert!(config.benchmarks.is_empty());
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use thiserror::Error;


/// Key selecting an alternate benchmark module for an override entry.
pub const ALIAS_KEY: &str = "name";

/// Key selecting the flag matrix to expand.
pub const FLAG_MATRIX_KEY: &str = "flag_matrix";

/// Key holding the named flag matrix definitions.
pub const FLAG_MATRIX_DEFS_KEY: &str = "flag_matrix_defs";

/// Key holding the named flag matrix filters.
pub const FLAG_MATRIX_FILTERS_KEY: &str = "flag_matrix_filters";

/// An opaque flag value.
pub type FlagValue = Value;

/// Flag assignments keyed by flag name.
pub type Flags = BTreeMap<String, FlagValue>;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A parsed user configuration document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserConfig {
    /// Global default flags applied to every benchmark.
    #[serde(default)]
    pub flags: Flags,

    /// Explicit benchmark list, each entry a single `{label: override}` mapping.
    #[serde(default)]
    pub benchmarks: Vec<BTreeMap<String, BenchmarkOverride>>,

    /// Per-benchmark overrides keyed by requested label.
    #[serde(flatten)]
    pub overrides: BTreeMap<String, BenchmarkOverride>,
}

impl UserConfig {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a document from a file.
    ///
    /// Files ending in `.toml` are parsed as TOML, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            _ => Self::from_yaml_file(path),
        }
    }

    /// Loads a document from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a document from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a document from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses a document from a YAML string.
    ///
    /// An empty document parses as [`UserConfig::default`].
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets a global default flag.
    pub fn with_flag(mut self, name: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.flags.insert(name.into(), value.into());
        self
    }

    /// Adds a per-benchmark override.
    pub fn with_override(mut self, label: impl Into<String>, entry: BenchmarkOverride) -> Self {
        self.overrides.insert(label.into(), entry);
        self
    }

    /// Appends an entry to the explicit benchmark list.
    pub fn with_listed(mut self, label: impl Into<String>, entry: BenchmarkOverride) -> Self {
        self.benchmarks
            .push(BTreeMap::from([(label.into(), entry)]));
        self
    }

    /// Returns the override for a requested label, if any.
    pub fn override_for(&self, label: &str) -> Option<&BenchmarkOverride> {
        self.overrides.get(label)
    }
}

/// A per-benchmark override entry with its reserved keys split out.
///
/// Deserializes from a mapping (or null, meaning "no overrides"). The alias and
/// flag matrix keys are consumed; every other key is a literal flag override.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Option<Mapping>")]
pub struct BenchmarkOverride {
    /// Benchmark module to use instead of the requested label.
    pub alias: Option<String>,

    /// Name of the flag matrix to expand.
    pub flag_matrix: Option<String>,

    /// Flag matrix definitions by name.
    pub flag_matrix_defs: BTreeMap<String, FlagMatrixDef>,

    /// Filter expressions by flag matrix name.
    pub flag_matrix_filters: BTreeMap<String, String>,

    /// Literal flag overrides.
    pub flags: Flags,
}

impl BenchmarkOverride {
    /// Creates an empty override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves this entry to a different benchmark module.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets a literal flag override.
    pub fn with_flag(mut self, name: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.flags.insert(name.into(), value.into());
        self
    }

    /// Selects the flag matrix to expand.
    pub fn with_flag_matrix(mut self, name: impl Into<String>) -> Self {
        self.flag_matrix = Some(name.into());
        self
    }

    /// Adds a named flag matrix definition.
    pub fn with_matrix_def(mut self, name: impl Into<String>, def: FlagMatrixDef) -> Self {
        self.flag_matrix_defs.insert(name.into(), def);
        self
    }

    /// Adds a filter expression for a named flag matrix.
    pub fn with_matrix_filter(mut self, name: impl Into<String>, filter: impl Into<String>) -> Self {
        self.flag_matrix_filters.insert(name.into(), filter.into());
        self
    }
}

impl TryFrom<Option<Mapping>> for BenchmarkOverride {
    type Error = ConfigError;

    fn try_from(mapping: Option<Mapping>) -> Result<Self, Self::Error> {
        let mut entry = BenchmarkOverride::default();
        for (key, value) in mapping.unwrap_or_default() {
            let key = key_string(key)?;
            match key.as_str() {
                ALIAS_KEY => entry.alias = Some(string_value(ALIAS_KEY, value)?),
                FLAG_MATRIX_KEY => entry.flag_matrix = Some(string_value(FLAG_MATRIX_KEY, value)?),
                FLAG_MATRIX_DEFS_KEY => {
                    for (name, def) in mapping_value(FLAG_MATRIX_DEFS_KEY, value)? {
                        let name = key_string(name)?;
                        let def = FlagMatrixDef::try_from(mapping_value(&name, def)?)?;
                        entry.flag_matrix_defs.insert(name, def);
                    }
                }
                FLAG_MATRIX_FILTERS_KEY => {
                    for (name, filter) in mapping_value(FLAG_MATRIX_FILTERS_KEY, value)? {
                        let name = key_string(name)?;
                        // A null filter accepts every combination.
                        if filter.is_null() {
                            continue;
                        }
                        let filter = string_value(&name, filter)?;
                        entry.flag_matrix_filters.insert(name, filter);
                    }
                }
                _ => {
                    entry.flags.insert(key, value);
                }
            }
        }
        Ok(entry)
    }
}

/// A named flag matrix: flag axes in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagMatrixDef {
    axes: Vec<FlagAxis>,
}

/// One axis of a flag matrix: a flag and its candidate values.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagAxis {
    pub flag: String,
    pub values: Vec<FlagValue>,
}

impl FlagMatrixDef {
    /// Creates a matrix with no axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an axis.
    ///
    /// # Example
    ///
    /// ```
    /// use benchplan_config::FlagMatrixDef;
    ///
    /// let matrix = FlagMatrixDef::new()
    ///     .with_axis("threads", [1, 2, 4])
    ///     .with_axis("mode", ["read", "write"]);
    /// assert_eq!(matrix.axes().len(), 2);
    /// assert_eq!(matrix.combination_count(), 6);
    /// ```
    pub fn with_axis<I, V>(mut self, flag: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FlagValue>,
    {
        self.axes.push(FlagAxis {
            flag: flag.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Returns the axes in declaration order.
    pub fn axes(&self) -> &[FlagAxis] {
        &self.axes
    }

    /// Returns true if the matrix has no axes.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Number of combinations before filtering, saturating at `usize::MAX`.
    pub fn combination_count(&self) -> usize {
        self.axes
            .iter()
            .fold(1usize, |count, axis| count.saturating_mul(axis.values.len()))
    }
}

impl TryFrom<Mapping> for FlagMatrixDef {
    type Error = ConfigError;

    fn try_from(mapping: Mapping) -> Result<Self, Self::Error> {
        let mut axes = Vec::with_capacity(mapping.len());
        for (flag, values) in mapping {
            let flag = key_string(flag)?;
            let Value::Sequence(values) = values else {
                return Err(ConfigError::Invalid(format!(
                    "flag matrix axis `{flag}` must be a list of values"
                )));
            };
            axes.push(FlagAxis { flag, values });
        }
        Ok(Self { axes })
    }
}

fn key_string(key: Value) -> Result<String, ConfigError> {
    match key {
        Value::String(s) => Ok(s),
        other => Err(ConfigError::Invalid(format!(
            "expected a string key, found {other:?}"
        ))),
    }
}

fn string_value(key: &str, value: Value) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ConfigError::Invalid(format!(
            "`{key}` must be a string, found {other:?}"
        ))),
    }
}

fn mapping_value(key: &str, value: Value) -> Result<Mapping, ConfigError> {
    match value {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        other => Err(ConfigError::Invalid(format!(
            "`{key}` must be a mapping, found {other:?}"
        ))),
    }
}
