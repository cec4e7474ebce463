//! Shared test utilities for the hostsctl workspace.
//!
//! A dev-dependency only, never published.
//!
//! - [`fixtures`] sample hosts files
//! - [`hosts`] [`TestHosts`] temporary hosts file with assertion helpers

pub mod fixtures;
pub mod hosts;

pub use hosts::TestHosts;
