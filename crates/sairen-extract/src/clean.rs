// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text normalization applied to every extracted fragment.

/// Collapses whitespace runs to single spaces, drops non-ASCII characters,
/// and trims both ends.
///
/// Unicode whitespace (e.g. non-breaking spaces) separates words before it is
/// dropped, so `"a\u{a0}b"` becomes `"a b"`, not `"ab"`. The output never
/// contains two consecutive spaces, and cleaning clean text is a no-op.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else if c.is_ascii() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}
