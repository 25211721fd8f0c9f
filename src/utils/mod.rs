// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Pure string helpers with no filesystem access.

pub mod entities;
pub mod strpos;
pub mod timespan;

/// Convert Latin-1 accented characters to numeric HTML entities.
pub use entities::convert_chars_to_entities;
/// Find every (possibly overlapping) occurrence of a substring.
pub use strpos::{find_all, find_all_ignore_case};
/// Render a number of seconds as a human-readable timespan.
pub use timespan::{Breakdown, timespan};
