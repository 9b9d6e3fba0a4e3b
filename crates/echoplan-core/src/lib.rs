//! # echoplan Core Library
//!
//! Pick-list planning for acoustic liquid handlers that pool DNA parts from a
//! source library plate into destination wells for Golden Gate (MoClo) assembly.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so the numeric planning logic stays
//! free of I/O and easy to test in isolation.
//!
//! - **[`core`]: The Foundation.** Typed records for wells, part libraries,
//!   assembly requests and transfers, plus CSV readers and writers for the tables
//!   exchanged with the lab (library sheet, assembly matrix, pick list).
//!
//! - **[`engine`]: The Logic Core.** The individual planning stages: pair
//!   expansion, volume calculation, diluent fill-up, plan validation, pick-list
//!   emission and the post-run library ledger update. Every stage is a pure
//!   function over in-memory data.
//!
//! - **[`workflows`]: The Public API.** Composes the engine stages into complete
//!   procedures (assembly planning, region spotting, library update) with
//!   progress reporting and structured logging.

pub mod core;
pub mod engine;
pub mod workflows;
