//! envwatch CLI - client library and binary for a running envwatch server.

pub mod client;

pub use client::EnvwatchClient;
