//! Planning entry point.

use std::collections::BTreeSet;

use benchplan_config::UserConfig;
use tracing::info;

use crate::builder::{ConfigBuilder, ResolvedConfigs};
use crate::context::ResolutionContext;
use crate::error::Result;
use crate::groups::{has_group_markers, parse_groups, strip_group_markers, ParallelGroups};
use crate::registry::ModuleRegistry;
use crate::resolver::resolve_sets;
use crate::sets::{SetRegistry, STANDARD_SET};

/// What to run: resolved configurations plus optional parallel grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkPlan {
    /// Resolved configurations keyed by label and variant.
    pub configs: ResolvedConfigs,

    /// Groups to run concurrently, in scheduling order.
    ///
    /// `None` means run one benchmark at a time, in `configs` order.
    pub groups: Option<ParallelGroups>,
}

impl BenchmarkPlan {
    /// Returns true if the plan carries no parallel grouping.
    pub fn is_sequential(&self) -> bool {
        self.groups.is_none()
    }

    /// Distinct benchmark labels in the plan.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.configs.keys().map(|key| key.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// Turns requested tokens and a user document into a [`BenchmarkPlan`].
///
/// # Example
///
/// ```
/// use benchplan::{Planner, StaticModuleRegistry};
/// use benchplan_config::UserConfig;
///
/// let registry = StaticModuleRegistry::builtin();
/// let planner = Planner::new(&registry);
///
/// let plan = planner
///     .plan(&["ping", "(iperf", "netperf)"], &UserConfig::new())
///     .unwrap();
/// assert_eq!(plan.len(), 3);
/// assert_eq!(plan.groups.unwrap().len(), 2);
/// ```
pub struct Planner<'a, R: ModuleRegistry + ?Sized> {
    registry: &'a R,
    sets: SetRegistry,
    ctx: ResolutionContext,
}

impl<'a, R: ModuleRegistry + ?Sized> Planner<'a, R> {
    /// Creates a planner over the built-in sets and a default context.
    pub fn new(registry: &'a R) -> Self {
        Self {
            registry,
            sets: SetRegistry::builtin(),
            ctx: ResolutionContext::default(),
        }
    }

    pub fn with_sets(mut self, sets: SetRegistry) -> Self {
        self.sets = sets;
        self
    }

    pub fn with_context(mut self, ctx: ResolutionContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.ctx
    }

    /// Plans the requested tokens.
    ///
    /// An empty request plans the standard set. When the caller did not ask
    /// for benchmarks explicitly and the document lists benchmarks, the list
    /// is planned instead and no grouping is produced.
    ///
    /// # Errors
    ///
    /// Fails on malformed group markers, unknown benchmarks and filter
    /// errors. Nothing is returned on failure.
    pub fn plan<S: AsRef<str>>(&self, tokens: &[S], user_config: &UserConfig) -> Result<BenchmarkPlan> {
        let builder = ConfigBuilder::new(&self.ctx, self.registry);

        if !self.ctx.benchmarks_explicit && !user_config.benchmarks.is_empty() {
            let configs = builder.build_listed(user_config)?;
            info!(
                listed = user_config.benchmarks.len(),
                configs = configs.len(),
                os_type = %self.ctx.os_type,
                "Planned benchmarks listed in user config"
            );
            return Ok(BenchmarkPlan {
                configs,
                groups: None,
            });
        }

        let groups = if has_group_markers(tokens) {
            Some(parse_groups(tokens)?)
        } else {
            None
        };

        let requested: Vec<String> = if tokens.is_empty() {
            vec![STANDARD_SET.to_string()]
        } else {
            tokens
                .iter()
                .map(|token| strip_group_markers(token.as_ref()).to_string())
                .collect()
        };
        let names = resolve_sets(&self.sets, requested);
        let configs = builder.build(names.iter().map(String::as_str), user_config)?;

        info!(
            benchmarks = names.len(),
            configs = configs.len(),
            parallel_groups = groups.as_ref().map_or(0, Vec::len),
            os_type = %self.ctx.os_type,
            "Planned benchmarks"
        );
        Ok(BenchmarkPlan { configs, groups })
    }
}

/// Plans `tokens` with the built-in sets.
pub fn plan<S, R>(
    tokens: &[S],
    user_config: &UserConfig,
    ctx: &ResolutionContext,
    registry: &R,
) -> Result<BenchmarkPlan>
where
    S: AsRef<str>,
    R: ModuleRegistry + ?Sized,
{
    Planner::new(registry)
        .with_context(ctx.clone())
        .plan(tokens, user_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ConfigKey;
    use crate::error::PlanError;
    use crate::registry::StaticModuleRegistry;
    use crate::sets::BenchmarkSet;
    use crate::test_utils::small_registry;
    use benchplan_config::BenchmarkOverride;

    static NETWORK: &[BenchmarkSet] = &[
        BenchmarkSet {
            name: "network_set",
            description: "Network benchmarks",
            members: &["iperf", "netperf", "latency_set"],
        },
        BenchmarkSet {
            name: "latency_set",
            description: "Latency benchmarks",
            members: &["ping"],
        },
    ];

    #[test]
    fn test_empty_request_plans_standard_set() {
        let registry = StaticModuleRegistry::builtin();
        let plan = Planner::new(&registry)
            .plan::<&str>(&[], &UserConfig::new())
            .unwrap();

        let standard = SetRegistry::builtin().lookup(STANDARD_SET).unwrap();
        let expected: BTreeSet<&str> = standard.members.iter().copied().collect();
        assert_eq!(plan.labels(), expected);
        assert!(plan.is_sequential());
    }

    #[test]
    fn test_nested_sets_with_custom_table() {
        let registry = small_registry();
        let plan = Planner::new(&registry)
            .with_sets(SetRegistry::new(NETWORK))
            .plan(&["network_set", "fio"], &UserConfig::new())
            .unwrap();

        let labels: Vec<&str> = plan.labels().into_iter().collect();
        assert_eq!(labels, vec!["fio", "iperf", "netperf", "ping"]);
    }

    #[test]
    fn test_groups_follow_original_token_order() {
        let registry = small_registry();
        let plan = Planner::new(&registry)
            .plan(&["ping", "(fio", "iperf)", "netperf"], &UserConfig::new())
            .unwrap();

        assert_eq!(
            plan.groups,
            Some(vec![
                vec!["ping".to_string()],
                vec!["fio".to_string(), "iperf".to_string()],
                vec!["netperf".to_string()],
            ])
        );
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn test_malformed_groups_abort() {
        let registry = small_registry();
        let planner = Planner::new(&registry);
        assert!(matches!(
            planner.plan(&["(fio", "iperf"], &UserConfig::new()),
            Err(PlanError::UnclosedGroup)
        ));
        assert!(matches!(
            planner.plan(&["fio)"], &UserConfig::new()),
            Err(PlanError::UnmatchedClose(_))
        ));
    }

    #[test]
    fn test_listed_benchmarks_win_unless_explicit() {
        let registry = small_registry();
        let user_config = UserConfig::new().with_listed("netperf", BenchmarkOverride::new());

        let plan = Planner::new(&registry)
            .plan(&["(fio", "iperf)"], &user_config)
            .unwrap();
        assert_eq!(plan.labels().into_iter().collect::<Vec<_>>(), vec!["netperf"]);
        assert!(plan.is_sequential());

        let explicit = ResolutionContext::new().with_explicit_benchmarks(true);
        let plan = plan_fn(&["(fio", "iperf)"], &user_config, &explicit, &registry);
        assert_eq!(plan.labels().into_iter().collect::<Vec<_>>(), vec!["fio", "iperf"]);
        assert!(!plan.is_sequential());
    }

    fn plan_fn(
        tokens: &[&str],
        user_config: &UserConfig,
        ctx: &ResolutionContext,
        registry: &StaticModuleRegistry,
    ) -> BenchmarkPlan {
        plan(tokens, user_config, ctx, registry).unwrap()
    }

    #[test]
    fn test_single_variant_key() {
        let registry = small_registry();
        let plan = Planner::new(&registry)
            .plan(&["fio"], &UserConfig::new())
            .unwrap();
        assert!(plan.configs.contains_key(&ConfigKey::new("fio", 0)));
        assert!(!plan.is_empty());
    }
}
