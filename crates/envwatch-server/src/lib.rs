//! Shared library surface for the envwatch server and its tests.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
