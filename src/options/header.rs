//! Header merge: fold a saved model's option tokens into an [`OptionStore`].
//!
//! Merging is split into two pure steps over raw tokens:
//!
//! ```text
//! header tokens ─┬─ filter_header_tokens ─→ kept tokens ─→ store buffer
//!                └─ detect_variant ───────→ is_ccb_model
//! ```
//!
//! Neither step needs to know which options exist or how many values they
//! take; arity is resolved later by Parse/Bind.

use crate::options::store::OptionStore;
use crate::options::token;

/// Option that carries the feature-interaction specification.
pub const INTERACTIONS_FLAG: &str = "interactions";

/// Option that marks the slates (CCB) contextual-bandit reduction.
pub const CCB_EXPLORE_ADF_FLAG: &str = "ccb_explore_adf";

/// Which header tokens survive a merge, and how the variant is detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePolicy {
    /// Drop the interaction specification (re-derived by the current run).
    pub skip_interactions: bool,
    /// Option names treated as the interaction specification.
    pub interaction_flags: Vec<String>,
    /// Option name whose presence marks the slates variant.
    pub variant_flag: String,
}

impl MergePolicy {
    pub fn new(skip_interactions: bool) -> Self {
        Self {
            skip_interactions,
            interaction_flags: vec![INTERACTIONS_FLAG.to_string()],
            variant_flag: CCB_EXPLORE_ADF_FLAG.to_string(),
        }
    }

    fn drops(&self, name: &str) -> bool {
        self.skip_interactions && self.interaction_flags.iter().any(|f| f == name)
    }
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Header tokens split by the exclusion policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredHeader {
    /// Tokens to append, in header order.
    pub kept: Vec<String>,
    /// Interaction flags and their values, in header order.
    pub skipped: Vec<String>,
}

/// Outcome of merging a header into a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMerge {
    /// The header describes the slates contextual-bandit variant.
    pub is_ccb_model: bool,
    /// Header tokens left out of the store.
    pub skipped: Vec<String>,
}

/// Split header tokens into kept and skipped.
///
/// A dropped interaction flag takes every value token after it, up to the
/// next flag or the end of the stream, so flag and values leave together.
/// Every occurrence is dropped.
pub fn filter_header_tokens<S: AsRef<str>>(header: &[S], policy: &MergePolicy) -> FilteredHeader {
    let mut filtered = FilteredHeader::default();
    let mut skipping = false;

    for raw in header {
        let raw = raw.as_ref();
        if let Some(flag) = token::parse_flag(raw) {
            skipping = policy.drops(flag.name);
        }

        if skipping {
            filtered.skipped.push(raw.to_string());
        } else {
            filtered.kept.push(raw.to_string());
        }
    }

    filtered
}

/// Whether any flag token in `header` names `variant_flag`.
pub fn detect_variant<S: AsRef<str>>(header: &[S], variant_flag: &str) -> bool {
    header
        .iter()
        .filter_map(|raw| token::parse_flag(raw.as_ref()))
        .any(|flag| !flag.short && flag.name == variant_flag)
}

/// Whether the header describes a slates (`--ccb_explore_adf`) model.
pub fn detect_ccb_model<S: AsRef<str>>(header: &[S]) -> bool {
    detect_variant(header, CCB_EXPLORE_ADF_FLAG)
}

/// Merge header tokens into `store` using the default policy.
pub fn merge_options_from_header_strings<S: AsRef<str>>(
    header: &[S],
    skip_interactions: bool,
    store: &mut OptionStore,
) -> HeaderMerge {
    merge_with_policy(header, &MergePolicy::new(skip_interactions), store)
}

/// Merge header tokens into `store`.
///
/// Kept tokens are appended after anything already pending. Variant
/// detection reads the raw header, so dropped tokens never affect it.
pub fn merge_with_policy<S: AsRef<str>>(
    header: &[S],
    policy: &MergePolicy,
    store: &mut OptionStore,
) -> HeaderMerge {
    let is_ccb_model = detect_variant(header, &policy.variant_flag);
    let FilteredHeader { kept, skipped } = filter_header_tokens(header, policy);

    if !skipped.is_empty() {
        tracing::debug!(skipped = ?skipped, "Dropped interaction options from model header");
    }
    tracing::debug!(
        merged = kept.len(),
        is_ccb_model,
        "Merged model header options"
    );

    store.append_tokens(kept);
    HeaderMerge {
        is_ccb_model,
        skipped,
    }
}
