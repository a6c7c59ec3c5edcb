//! Utility modules

pub mod fuzzy;

pub use fuzzy::similarity;
