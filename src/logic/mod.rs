// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Filesystem operations: tree listing, recursive removal and ZIP packaging.

pub mod archive;
pub mod remove;
pub mod tree;
