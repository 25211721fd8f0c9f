// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Locate every occurrence of a substring, overlapping matches included.

/// Return the byte offsets of all occurrences of `needle` in `haystack`.
///
/// The search starts at `offset` and resumes one byte past each hit rather
/// than past the whole match, so `find_all("aaa", "aa", true, 0)` yields
/// `[0, 1]`. With `case_sensitive` unset ASCII letters are compared without
/// regard to case; other bytes must match exactly, which keeps offsets valid
/// for UTF-8 input.
///
/// An empty needle, or an offset past the end of the haystack, finds nothing.
pub fn find_all(haystack: &str, needle: &str, case_sensitive: bool, offset: usize) -> Vec<usize> {
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    let mut indexes = Vec::new();

    if pat.is_empty() || offset > hay.len() {
        return indexes;
    }

    let mut from = offset;
    while let Some(pos) = find_from(hay, pat, case_sensitive, from) {
        indexes.push(pos);
        from = pos + 1;
    }

    indexes
}

/// Case-insensitive shorthand for [`find_all`].
pub fn find_all_ignore_case(haystack: &str, needle: &str, offset: usize) -> Vec<usize> {
    find_all(haystack, needle, false, offset)
}

fn find_from(hay: &[u8], pat: &[u8], case_sensitive: bool, from: usize) -> Option<usize> {
    if from + pat.len() > hay.len() {
        return None;
    }

    hay[from..]
        .windows(pat.len())
        .position(|window| {
            if case_sensitive {
                window == pat
            } else {
                window.eq_ignore_ascii_case(pat)
            }
        })
        .map(|pos| pos + from)
}
