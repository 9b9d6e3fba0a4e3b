//! # Core Module
//!
//! Fundamental data types and table I/O for pick-list planning.
//!
//! ## Overview
//!
//! Everything in the planning engine operates on the typed records defined
//! here instead of loosely typed spreadsheet columns. A library row, an assembly
//! row and a transfer each have a fixed field set, and well coordinates are
//! parsed into [`models::well::WellId`] values that know which plate formats
//! they fit on.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Wells, plate formats, part libraries,
//!   assembly requests, transfer plans and pick lists
//! - **Table I/O** ([`io`]) - CSV readers and writers for the library sheet,
//!   the assembly matrix and the device pick list
//!
//! The engine never calls into [`io`]; callers load tables, hand the typed
//! values to a workflow, and decide themselves whether to persist the result.

pub mod io;
pub mod models;
