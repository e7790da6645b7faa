// ABOUTME: Domain models re-exported from wearable-core
// ABOUTME: External connections, token sets, profiles, and provider tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use wearable_core::models::*;
