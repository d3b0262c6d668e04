//! Pipeline: seed, merge, and hand back a store ready for option groups.

use crate::options::header::{merge_with_policy, MergePolicy};
use crate::options::store::OptionStore;

/// A store holding the current invocation's tokens followed by the merged
/// header tokens, plus what the merge learned about the header.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub store: OptionStore,
    /// The saved model is the slates (CCB) variant.
    pub is_ccb_model: bool,
    /// Header tokens left out by the exclusion policy.
    pub skipped: Vec<String>,
}

/// Combine the current invocation with a model header.
///
/// The current invocation's tokens come first in the buffer, so for scalar
/// options they win over the header's values during Parse/Bind. The caller
/// declares option groups against `Reconciled::store` afterwards.
pub fn reconcile<C, H>(current: &[C], header: &[H], policy: &MergePolicy) -> Reconciled
where
    C: AsRef<str>,
    H: AsRef<str>,
{
    let mut store = OptionStore::new(current.iter().map(|t| t.as_ref().to_string()).collect());
    let merge = merge_with_policy(header, policy, &mut store);

    Reconciled {
        store,
        is_ccb_model: merge.is_ccb_model,
        skipped: merge.skipped,
    }
}
