//! Per-benchmark configuration building.

use std::collections::BTreeMap;

use benchplan_config::{BenchmarkOverride, FlagMatrixDef, Flags, UserConfig};
use tracing::{debug, warn};

use crate::context::ResolutionContext;
use crate::error::{PlanError, Result};
use crate::filter::FlagFilter;
use crate::matrix::expand_matrix;
use crate::registry::{BenchmarkModule, ModuleRegistry};

/// Identifies one resolved configuration: the requested label and the index
/// of the accepted flag combination that produced it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigKey {
    pub name: String,
    pub variant: usize,
}

impl ConfigKey {
    pub fn new(name: impl Into<String>, variant: usize) -> Self {
        Self {
            name: name.into(),
            variant,
        }
    }
}

/// A benchmark module with its fully merged flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub module: BenchmarkModule,
    pub flags: Flags,
}

/// Resolved configurations, ordered by label then variant.
pub type ResolvedConfigs = BTreeMap<ConfigKey, ResolvedConfig>;

/// Builds resolved configurations from requested labels and a user document.
///
/// Flags are layered in this order, later layers winning:
/// 1. global defaults from the document's `flags`
/// 2. the label's literal flag overrides
/// 3. the selected flag matrix combination
pub struct ConfigBuilder<'a, R: ModuleRegistry + ?Sized> {
    ctx: &'a ResolutionContext,
    registry: &'a R,
}

impl<'a, R: ModuleRegistry + ?Sized> ConfigBuilder<'a, R> {
    pub fn new(ctx: &'a ResolutionContext, registry: &'a R) -> Self {
        Self { ctx, registry }
    }

    /// Builds configurations for concrete benchmark labels.
    ///
    /// Each label takes its override from the document's per-benchmark
    /// entries, or none if the document has no entry for it.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownBenchmark`] for the first label (or alias)
    /// without a module, and [`PlanError::FilterEvaluation`] if a filter
    /// fails. No partial result is returned.
    pub fn build<'n, I>(&self, names: I, user_config: &UserConfig) -> Result<ResolvedConfigs>
    where
        I: IntoIterator<Item = &'n str>,
    {
        let empty = BenchmarkOverride::default();
        let mut configs = ResolvedConfigs::new();
        for name in names {
            let entry = user_config.override_for(name).unwrap_or(&empty);
            self.build_entry(name, entry, &user_config.flags, &mut configs)?;
        }
        Ok(configs)
    }

    /// Builds configurations for the document's explicit benchmark list.
    ///
    /// A label listed more than once keeps every entry; later entries take
    /// the next variant indices.
    pub fn build_listed(&self, user_config: &UserConfig) -> Result<ResolvedConfigs> {
        let mut configs = ResolvedConfigs::new();
        for (name, entry) in user_config.benchmarks.iter().flatten() {
            self.build_entry(name, entry, &user_config.flags, &mut configs)?;
        }
        Ok(configs)
    }

    /// Resolves one label and appends a configuration per accepted combination.
    pub fn build_entry(
        &self,
        name: &str,
        entry: &BenchmarkOverride,
        defaults: &Flags,
        configs: &mut ResolvedConfigs,
    ) -> Result<()> {
        let module_name = entry.alias.as_deref().unwrap_or(name);
        let module = self
            .registry
            .lookup(self.ctx.os_type, module_name)
            .ok_or_else(|| PlanError::UnknownBenchmark {
                name: module_name.to_string(),
                os_type: self.ctx.os_type,
            })?;

        let matrix_name = self.ctx.flag_matrix.as_deref().or(entry.flag_matrix.as_deref());
        let empty = FlagMatrixDef::default();
        let matrix = matrix_name
            .and_then(|matrix| entry.flag_matrix_defs.get(matrix))
            .unwrap_or(&empty);
        let filter = matrix_name
            .and_then(|matrix| entry.flag_matrix_filters.get(matrix))
            .filter(|source| !source.trim().is_empty())
            .map(|source| FlagFilter::parse(source))
            .transpose()
            .map_err(|source| PlanError::FilterEvaluation {
                benchmark: name.to_string(),
                source,
            })?;

        let mut base = defaults.clone();
        base.extend(entry.flags.iter().map(|(k, v)| (k.clone(), v.clone())));

        let combinations =
            expand_matrix(&base, matrix, filter.as_ref()).map_err(|source| {
                PlanError::FilterEvaluation {
                    benchmark: name.to_string(),
                    source,
                }
            })?;

        if combinations.is_empty() {
            warn!(
                benchmark = name,
                flag_matrix = matrix_name.unwrap_or_default(),
                "No flag combination accepted; benchmark dropped"
            );
            return Ok(());
        }

        let first_variant = configs.keys().filter(|key| key.name == name).count();
        debug!(
            benchmark = name,
            module = module.name(),
            variants = combinations.len(),
            "Resolved benchmark configuration"
        );
        for (offset, flags) in combinations.into_iter().enumerate() {
            configs.insert(
                ConfigKey::new(name, first_variant + offset),
                ResolvedConfig {
                    module: module.clone(),
                    flags,
                },
            );
        }
        Ok(())
    }
}
