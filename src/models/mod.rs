// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: plain data types shared by the reporter and the filesystem helpers.

pub mod constants;
pub mod tree;
