// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Plumb integration tests.
//!
//! # Components
//!
//! - [`FakeContainer`] - in-memory container that records every call and can
//!   be told to fail for chosen types
//! - [`fixtures`] - component types and a small built-in/custom catalog

pub mod fake_container;
pub mod fixtures;

pub use fake_container::{ContainerCall, FakeContainer};
