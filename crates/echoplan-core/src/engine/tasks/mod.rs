//! Planning stages.
//!
//! Each submodule is one step of the pick-list pipeline and is a pure function
//! over in-memory records. The [`crate::workflows`] layer decides the order in
//! which they run and which of them gate the others.

pub mod diluent;
pub mod emit;
pub mod ledger;
pub mod pairs;
pub mod spotting;
pub mod validation;
pub mod volumes;
