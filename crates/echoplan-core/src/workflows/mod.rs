//! # Workflows Module
//!
//! Top-level entry points. Each workflow takes already loaded tables plus a
//! validated configuration, runs the engine stages in order while reporting
//! phases through a [`crate::engine::progress::ProgressReporter`], and returns
//! in-memory results for the caller to persist.
//!
//! - **Assembly Planning** ([`plan`]) - Library + assembly matrix to a
//!   validated pick list
//! - **Library Update** ([`update`]) - Subtracts an executed pick list from
//!   the library stock
//! - **Spotting** ([`spot`]) - Grid spotting of rectangular plate regions

pub mod plan;
pub mod spot;
pub mod update;
