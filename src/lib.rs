//! divlint - consistency checker for administrative-division datasets
//!
//! Loads every YAML file of one country into a division model, then checks
//! parent links, per-entity timelines and lineage reciprocity.

pub mod cli;
pub mod dataset;
pub mod observability;
pub mod validation;
