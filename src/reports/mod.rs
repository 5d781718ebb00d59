//! Report generators, one module per artifact family.

pub mod churn;
pub mod clones;
pub mod halstead;
pub mod maintainability;
pub mod mccabe;

pub(crate) mod radon;
