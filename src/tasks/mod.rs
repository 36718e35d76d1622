//! Background tasks module
//!
//! This module contains the periodic sampler that advances a running countdown.

pub mod sampler;

// Re-export main items
pub use sampler::{spawn_sampler, SamplerHandle};
