//! Option reconciliation for model resumption.
//!
//! A saved model's header records the options that produced it. When the
//! model is loaded, those tokens are merged with the current invocation's
//! tokens and resolved against the options the learner declares:
//!
//! ```text
//! current tokens ─→ OptionStore ←─ merge(header tokens, policy) ─→ is_ccb_model
//!                        │
//!                  add_and_parse(group)…  ─→ bound values + supplied flags
//!                        │
//!                 check_unregistered()
//! ```
//!
//! Merging filters raw tokens without knowing any option's arity; binding is
//! arity-aware and happens only once options are declared.

mod descriptor;
mod error;
mod header;
mod pipeline;
mod store;
pub mod token;

pub use descriptor::{make_option, Arity, OptionGroup, OptionValue, ScalarValue, TypedOption};
pub use error::OptionError;
pub use header::{
    detect_ccb_model, detect_variant, filter_header_tokens, merge_options_from_header_strings,
    merge_with_policy, FilteredHeader, HeaderMerge, MergePolicy, CCB_EXPLORE_ADF_FLAG,
    INTERACTIONS_FLAG,
};
pub use pipeline::{reconcile, Reconciled};
pub use store::{OptionInfo, OptionStore};
