pub mod aggregate;
pub mod rounding;
