use serde::{Deserialize, Serialize};

use crate::options::{MergePolicy, CCB_EXPLORE_ADF_FLAG, INTERACTIONS_FLAG};

/// Root settings container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub merge: MergeSettings,
}

/// How model header options are merged into the current invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSettings {
    /// Option names dropped from the header when excluding interactions
    /// (default: `["interactions"]`).
    #[serde(default = "default_interaction_flags")]
    pub interaction_flags: Vec<String>,
    /// Option name marking the slates variant (default: `ccb_explore_adf`).
    #[serde(default = "default_variant_flag")]
    pub variant_flag: String,
}

fn default_interaction_flags() -> Vec<String> {
    vec![INTERACTIONS_FLAG.to_string()]
}

fn default_variant_flag() -> String {
    CCB_EXPLORE_ADF_FLAG.to_string()
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            interaction_flags: default_interaction_flags(),
            variant_flag: default_variant_flag(),
        }
    }
}

impl MergeSettings {
    /// Build the merge policy for one run.
    pub fn policy(&self, skip_interactions: bool) -> MergePolicy {
        MergePolicy {
            skip_interactions,
            interaction_flags: self.interaction_flags.clone(),
            variant_flag: self.variant_flag.clone(),
        }
    }
}
