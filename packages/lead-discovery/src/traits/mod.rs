//! Core trait abstractions for the discovery engine.

pub mod searcher;
