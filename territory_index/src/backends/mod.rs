// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations.
//!
//! - `grid`: uniform grid with configurable cell size.

pub(crate) mod grid;

pub use grid::{Grid, GridI64, GridScalar};
