//! Mocks and fakes for the Waypoint platform interfaces.

pub mod state_store;
