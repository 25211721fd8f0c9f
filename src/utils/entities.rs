// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Replace accented Latin-1 characters with numeric HTML entities.

/// First code point covered by the entity table (`À`).
pub const FIRST_ENTITY: char = '\u{C0}';
/// Last code point covered by the entity table (`ÿ`).
pub const LAST_ENTITY: char = '\u{FF}';

/// Numeric entity for `ch`, when it falls in the supported Latin-1 range.
///
/// The range includes `×` and `÷` so the table has no gaps.
pub fn entity_for(ch: char) -> Option<String> {
    (FIRST_ENTITY..=LAST_ENTITY)
        .contains(&ch)
        .then(|| format!("&#{};", u32::from(ch)))
}

/// Convert every character in `U+00C0..=U+00FF` to its `&#NNN;` form.
///
/// Anything outside the table passes through untouched. Entity text is plain
/// ASCII, so converting already converted text is a no-op.
///
/// # Examples
///
/// ```
/// use webhelpers::utils::convert_chars_to_entities;
///
/// assert_eq!(convert_chars_to_entities("Café"), "Caf&#233;");
/// ```
pub fn convert_chars_to_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match entity_for(ch) {
            Some(entity) => out.push_str(&entity),
            None => out.push(ch),
        }
    }
    out
}
