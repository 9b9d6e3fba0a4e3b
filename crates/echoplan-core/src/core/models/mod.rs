//! Typed records for the tables the planner consumes and produces.
//!
//! - [`well`] - Well coordinates and plate formats
//! - [`library`] - Source plate part library and the designated diluent well
//! - [`assembly`] - Destination wells and the parts each one requires
//! - [`transfer`] - Planned transfers and device pick-list rows

pub mod assembly;
pub mod library;
pub mod transfer;
pub mod well;
