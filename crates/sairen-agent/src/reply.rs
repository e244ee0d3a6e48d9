// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-processing of model replies shown to users.

/// Keeps ASCII word characters, whitespace, and `. , ? !`, then collapses
/// whitespace runs to single spaces and trims.
pub fn clean_reply(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|&c| {
            c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || ".,?!".contains(c)
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
