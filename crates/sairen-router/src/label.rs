// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of request actions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// What the dispatcher does with a request.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ActionLabel {
    /// Conversational reply grounded in reference content.
    #[default]
    Chat,
    /// On-demand page extraction; answered with a fixed notice.
    ExtractText,
    /// Product search.
    Search,
    /// Order status lookup.
    CheckOrder,
}

impl ActionLabel {
    /// Decodes untrusted model output into a label.
    ///
    /// The text is trimmed and lower-cased, then must match a label exactly.
    /// Anything else decodes to [`ActionLabel::Chat`].
    pub fn decode(raw: &str) -> Self {
        raw.trim().to_lowercase().parse().unwrap_or_default()
    }

    /// Every label, in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Labels quoted and comma-separated, as they appear in prompts.
    pub fn quoted_list() -> String {
        Self::all()
            .map(|label| format!("\"{label}\""))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
