// ABOUTME: Domain models for linked wearable provider accounts
// ABOUTME: Provider tags, OAuth token sets, profile metadata, and the persisted connection record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Connection models
//!
//! An [`ExternalConnection`] is the single persisted record per `(user_id, provider)`.
//! It is assembled from the [`TokenSet`] returned by the token endpoint and the
//! [`DeviceInfo`] resolved from the provider profile.

mod connection;
mod provider;
mod token;

pub use connection::{AuthenticatedUser, DeviceInfo, ExternalConnection, ProfileInfo};
pub use provider::ProviderKind;
pub use token::{AuthorizationGrant, TokenSet};
