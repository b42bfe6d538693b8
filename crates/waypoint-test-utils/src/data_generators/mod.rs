//! Test data generators for the Waypoint platform.
//!
//! This module provides functions for generating flows, steps, and IDs
//! for tests that don't care about the exact content.

mod flows;

// Re-export all data generators for easy access
pub use flows::*;
