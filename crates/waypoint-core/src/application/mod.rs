//! Application services - the tour engine and its persistence plumbing

/// The guided-tour engine
pub mod engine;

/// State loading and the fire-and-forget persistence writer
pub mod persistence;
