//! Cross-module tests for the reticle pipeline.
//!
//! - `determinism.rs`: Same snapshot, same answer, same draw list
//! - `properties.rs`: `proptest` properties of targeting and classification
//! - `helpers.rs`: Scene factories shared with the unit tests

pub mod helpers;
