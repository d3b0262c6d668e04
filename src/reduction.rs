//! Reduction options: the declared options of the contextual-bandit learner
//! family, and the learner chain they select.
//!
//! Groups are assembled explicitly here and parsed in a fixed order; there is
//! no global registry.

use serde::Serialize;

use crate::options::{
    make_option, reconcile, MergePolicy, OptionError, OptionGroup, OptionInfo, OptionStore,
    Reconciled,
};

/// Which learner chain the reduction stack should be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerChain {
    /// Conditional contextual bandit with slates (`--ccb_explore_adf`).
    Slates,
    /// Plain contextual bandit (`--cb_explore_adf`).
    ContextualBandit,
    /// No exploration reduction; base regression learner only.
    Base,
}

impl LearnerChain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slates => "slates",
            Self::ContextualBandit => "contextual_bandit",
            Self::Base => "base",
        }
    }
}

/// Typed values of every built-in option after Parse/Bind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReductionConfig {
    // General
    pub data: String,
    pub initial_regressor: Vec<String>,
    pub final_regressor: String,
    pub predictions: String,
    pub cache: bool,
    pub cache_file: Vec<String>,
    pub testonly: bool,
    pub quiet: bool,
    pub passes: u64,
    pub bit_precision: u32,
    pub learning_rate: f32,
    pub power_t: f32,
    pub random_seed: u64,
    pub save_resume: bool,
    pub holdout_off: bool,
    // Input format
    pub dsjson: bool,
    pub json: bool,
    // Feature interactions
    pub interactions: Vec<String>,
    pub quadratic: Vec<String>,
    pub cubic: Vec<String>,
    // Exploration
    pub cb_explore_adf: bool,
    pub ccb_explore_adf: bool,
    pub epsilon: f32,
    pub cb_type: String,
    pub first: u64,
    pub bag: u64,
    pub cover: u64,
    pub softmax: bool,
    pub lambda: f32,
}

impl ReductionConfig {
    /// Declare and parse every built-in group against `store`.
    pub fn parse(store: &mut OptionStore) -> Result<Self, OptionError> {
        let mut config = Self::default();
        store.add_and_parse(config.general_group())?;
        store.add_and_parse(config.input_group())?;
        store.add_and_parse(config.interaction_group())?;
        store.add_and_parse(config.exploration_group())?;
        Ok(config)
    }

    /// Pick the learner chain.
    ///
    /// A slates model stays on the slates chain even if the current
    /// invocation only names `--cb_explore_adf`.
    pub fn learner_chain(&self, is_ccb_model: bool) -> LearnerChain {
        if is_ccb_model || self.ccb_explore_adf {
            LearnerChain::Slates
        } else if self.cb_explore_adf {
            LearnerChain::ContextualBandit
        } else {
            LearnerChain::Base
        }
    }

    fn general_group(&mut self) -> OptionGroup<'_> {
        let mut group = OptionGroup::new("General");
        group
            .add(make_option("data", &mut self.data).short_name('d').help("Example set"))
            .add(
                make_option("initial_regressor", &mut self.initial_regressor)
                    .short_name('i')
                    .help("Initial regressor(s)"),
            )
            .add(
                make_option("final_regressor", &mut self.final_regressor)
                    .short_name('f')
                    .help("Final regressor"),
            )
            .add(
                make_option("predictions", &mut self.predictions)
                    .short_name('p')
                    .help("File to output predictions to"),
            )
            .add(make_option("cache", &mut self.cache).short_name('c').help("Use a cache"))
            .add(make_option("cache_file", &mut self.cache_file).help("The location(s) of cache files"))
            .add(
                make_option("testonly", &mut self.testonly)
                    .short_name('t')
                    .help("Ignore label information and just test"),
            )
            .add(make_option("quiet", &mut self.quiet).help("Don't output diagnostics"))
            .add(
                make_option("passes", &mut self.passes)
                    .default_value(1)
                    .help("Number of training passes"),
            )
            .add(
                make_option("bit_precision", &mut self.bit_precision)
                    .short_name('b')
                    .default_value(18)
                    .help("Number of bits in the feature table"),
            )
            .add(
                make_option("learning_rate", &mut self.learning_rate)
                    .short_name('l')
                    .default_value(0.5)
                    .help("Set learning rate"),
            )
            .add(
                make_option("power_t", &mut self.power_t)
                    .default_value(0.5)
                    .help("T power value"),
            )
            .add(make_option("random_seed", &mut self.random_seed).help("Seed random number generator"))
            .add(make_option("save_resume", &mut self.save_resume).help("Save extra state so learning can be resumed later"))
            .add(make_option("holdout_off", &mut self.holdout_off).help("No holdout data in multiple passes"));
        group
    }

    fn input_group(&mut self) -> OptionGroup<'_> {
        let mut group = OptionGroup::new("Input");
        group
            .add(make_option("dsjson", &mut self.dsjson).help("Enable Decision Service JSON examples"))
            .add(make_option("json", &mut self.json).help("Enable JSON examples"));
        group
    }

    fn interaction_group(&mut self) -> OptionGroup<'_> {
        let mut group = OptionGroup::new("Feature Interactions");
        group
            .add(
                make_option("interactions", &mut self.interactions)
                    .help("Create feature interactions of any level between namespaces"),
            )
            .add(
                make_option("quadratic", &mut self.quadratic)
                    .short_name('q')
                    .help("Create and use quadratic features"),
            )
            .add(make_option("cubic", &mut self.cubic).help("Create and use cubic features"));
        group
    }

    fn exploration_group(&mut self) -> OptionGroup<'_> {
        let mut group = OptionGroup::new("Contextual Bandit Exploration");
        group
            .add(
                make_option("cb_explore_adf", &mut self.cb_explore_adf)
                    .help("Online explore-exploit for a contextual bandit problem with multiline action dependent features"),
            )
            .add(
                make_option("ccb_explore_adf", &mut self.ccb_explore_adf)
                    .help("Do Conditional Contextual Bandit learning with multiline action dependent features"),
            )
            .add(
                make_option("epsilon", &mut self.epsilon)
                    .default_value(0.05)
                    .help("Epsilon-greedy exploration"),
            )
            .add(
                make_option("cb_type", &mut self.cb_type)
                    .default_value("mtr".to_string())
                    .help("Contextual bandit method to use"),
            )
            .add(make_option("first", &mut self.first).help("Tau-first exploration"))
            .add(make_option("bag", &mut self.bag).help("Bagging-based exploration"))
            .add(make_option("cover", &mut self.cover).help("Online cover based exploration"))
            .add(make_option("softmax", &mut self.softmax).help("Softmax exploration"))
            .add(
                make_option("lambda", &mut self.lambda)
                    .default_value(-1.0)
                    .help("Parameter for softmax"),
            );
        group
    }
}

/// Fully resolved configuration for a model load.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedModel {
    pub learner_chain: LearnerChain,
    pub is_ccb_model: bool,
    pub config: ReductionConfig,
    /// Header tokens dropped by the exclusion policy.
    pub skipped_header_tokens: Vec<String>,
    /// Value tokens no option claimed.
    pub unclaimed_tokens: Vec<String>,
    pub options: Vec<OptionInfo>,
}

/// Merge a model header into the current invocation and resolve every
/// built-in option.
///
/// Fails on the first configuration error, including flags no group declares.
pub fn resolve_model_options<C, H>(
    current: &[C],
    header: &[H],
    policy: &MergePolicy,
) -> Result<ResolvedModel, OptionError>
where
    C: AsRef<str>,
    H: AsRef<str>,
{
    let Reconciled {
        mut store,
        is_ccb_model,
        skipped,
    } = reconcile(current, header, policy);

    let config = ReductionConfig::parse(&mut store)?;
    store.check_unregistered()?;

    let unclaimed_tokens = store.pending_tokens().to_vec();
    if !unclaimed_tokens.is_empty() {
        tracing::warn!(tokens = ?unclaimed_tokens, "Value tokens not claimed by any option");
    }

    let learner_chain = config.learner_chain(is_ccb_model);
    tracing::info!(
        learner_chain = learner_chain.as_str(),
        is_ccb_model,
        "Resolved model options"
    );

    Ok(ResolvedModel {
        learner_chain,
        is_ccb_model,
        config,
        skipped_header_tokens: skipped,
        unclaimed_tokens,
        options: store.get_all_options().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_tokens() {
        let mut store = OptionStore::default();
        let config = ReductionConfig::parse(&mut store).unwrap();
        assert_eq!(config.bit_precision, 18);
        assert_eq!(config.epsilon, 0.05);
        assert_eq!(config.cb_type, "mtr");
        assert_eq!(config.lambda, -1.0);
        assert!(config.interactions.is_empty());
        assert!(store.get_all_options().iter().all(|o| !o.supplied));
    }

    #[test]
    fn builtin_names_are_unique() {
        let mut store = OptionStore::default();
        assert!(ReductionConfig::parse(&mut store).is_ok());
        assert_eq!(store.get_all_options().len(), 29);
    }

    #[test]
    fn learner_chain_choice() {
        let mut config = ReductionConfig::default();
        assert_eq!(config.learner_chain(false), LearnerChain::Base);
        config.cb_explore_adf = true;
        assert_eq!(config.learner_chain(false), LearnerChain::ContextualBandit);
        assert_eq!(config.learner_chain(true), LearnerChain::Slates);
    }
}
