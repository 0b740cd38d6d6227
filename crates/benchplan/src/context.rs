//! Resolution context passed into every planning entry point.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target operating system of the benchmark VMs.
///
/// Selects which benchmark-module table is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OsType {
    #[default]
    Linux,
    Windows,
}

impl OsType {
    pub fn as_str(self) -> &'static str {
        match self {
            OsType::Linux => "linux",
            OsType::Windows => "windows",
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(OsType::Linux),
            "windows" => Ok(OsType::Windows),
            other => Err(format!("unknown os_type \"{other}\"")),
        }
    }
}

/// Process-level settings that influence resolution.
///
/// # Example
///
/// ```
/// use benchplan::{OsType, ResolutionContext};
///
/// let ctx = ResolutionContext::new()
///     .with_os_type(OsType::Windows)
///     .with_flag_matrix("disks")
///     .with_explicit_benchmarks(true);
///
/// assert_eq!(ctx.os_type, OsType::Windows);
/// assert_eq!(ctx.flag_matrix.as_deref(), Some("disks"));
/// assert!(ctx.benchmarks_explicit);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Operating system the benchmarks target.
    pub os_type: OsType,

    /// Global flag matrix selection; wins over per-benchmark selectors.
    pub flag_matrix: Option<String>,

    /// Whether the caller explicitly requested benchmarks.
    ///
    /// When false and the user document carries a benchmark list, the list
    /// is planned instead of the requested tokens.
    pub benchmarks_explicit: bool,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_os_type(mut self, os_type: OsType) -> Self {
        self.os_type = os_type;
        self
    }

    pub fn with_flag_matrix(mut self, name: impl Into<String>) -> Self {
        self.flag_matrix = Some(name.into());
        self
    }

    pub fn with_explicit_benchmarks(mut self, explicit: bool) -> Self {
        self.benchmarks_explicit = explicit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_type_parse() {
        assert_eq!("linux".parse::<OsType>(), Ok(OsType::Linux));
        assert_eq!("Windows".parse::<OsType>(), Ok(OsType::Windows));
        assert!("plan9".parse::<OsType>().is_err());
    }

    #[test]
    fn test_os_type_display() {
        assert_eq!(OsType::Linux.to_string(), "linux");
        assert_eq!(OsType::Windows.to_string(), "windows");
    }
}
