// ABOUTME: Domain service layer for the account-linking flow
// ABOUTME: Protocol-agnostic logic that route handlers delegate to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers authenticate and parse; everything after that lives here so
//! the flow can be exercised without HTTP.

/// Code exchange, profile lookup, and connection persistence
pub mod linking;

pub use linking::ConnectionLinker;
