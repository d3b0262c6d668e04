//! Option reconciliation for resuming and scoring saved online-learning models.

pub mod config;
pub mod logging;
pub mod options;
pub mod reduction;
