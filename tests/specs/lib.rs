// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for the `seasync` binary.
//!
//! The spec files under `cli/` are compiled as integration tests of the
//! `seasync` crate, which owns the binary they drive.
