#![warn(clippy::pedantic)]
// The library exists for the caliper binary and its tests; public-API
// documentation lints don't apply.
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod cache;
pub mod compare;
pub mod error;
pub mod expand;
pub mod extract;
pub mod loader;
pub mod metrics;
pub mod name;
pub mod packages;
pub mod report;
pub mod stats;
pub mod suggest;
