//! # Engine Module
//!
//! The planning engine: everything between a loaded library and assembly matrix
//! and a validated list of dispenser transfers.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Device constraints, assembly targets,
//!   rounding policy and spotting regions, each behind a validating builder
//! - **Stages** ([`tasks`]) - One module per pipeline step: pair expansion,
//!   volume calculation, diluent fill, validation, emission, ledger update
//!   and region spotting
//! - **Progress Monitoring** ([`progress`]) - Phase events for front ends
//! - **Error Handling** ([`error`]) - A single error type whose variants always
//!   carry every offending part or well found by the failing check
//!
//! Stages never touch the filesystem. Loading and saving tables is the job of
//! [`crate::core::io`], and ordering the stages is the job of [`crate::workflows`].

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
pub(crate) mod utils;
