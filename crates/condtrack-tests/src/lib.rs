//! Integration test crate for condtrack.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It drives the full tracker from `condtrack-tracking` over frames built
//! with `condtrack-core`.

#[cfg(test)]
mod tracking;

#[cfg(test)]
mod config;
