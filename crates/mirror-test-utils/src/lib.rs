//! Shared test utilities for the directory-mirror workspace.
//!
//! This crate provides standardised fixtures so crate test suites don't each
//! grow their own. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`tree`]: [`MirrorFixture`], a temporary source/replica/log layout
//! - [`clock`]: [`ManualClock`], a clock that only moves when told to
//! - [`faulty`]: [`FaultyFs`], a local filesystem with injectable failures

pub mod clock;
pub mod faulty;
pub mod tree;

pub use clock::ManualClock;
pub use faulty::FaultyFs;
pub use tree::MirrorFixture;
