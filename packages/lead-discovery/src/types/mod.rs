//! Data types shared across the discovery pipeline.

pub mod candidate;
pub mod config;
pub mod item;
