// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay and host chrome styles.

/// Style an overlay asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusBarStyle {
    /// Dark content on a light background.
    #[default]
    Black,
    /// Light content on a dark background.
    White,
    /// Hidden. Never merged with neighbours and never bound to the host.
    Hide,
    /// Excluded from reconciliation entirely.
    Ignore,
}

impl StatusBarStyle {
    /// Resolves the style for a pass. While an in-call override is active,
    /// `Black` and `White` both become `White`.
    #[must_use]
    pub const fn resolved(self, in_call: bool) -> Self {
        match self {
            Self::Black | Self::White if in_call => Self::White,
            other => other,
        }
    }
}

/// The host's system chrome style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChromeStyle {
    /// Dark content.
    #[default]
    Default,
    /// Light content.
    LightContent,
}

impl ChromeStyle {
    /// Chrome style for a global slot holding `style`.
    #[must_use]
    pub const fn for_slot(style: StatusBarStyle, in_call: bool) -> Self {
        if in_call {
            return Self::LightContent;
        }
        match style {
            StatusBarStyle::Black => Self::Default,
            _ => Self::LightContent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_call_coerces_visible_styles_only() {
        assert_eq!(StatusBarStyle::Black.resolved(true), StatusBarStyle::White);
        assert_eq!(StatusBarStyle::White.resolved(true), StatusBarStyle::White);
        assert_eq!(StatusBarStyle::Hide.resolved(true), StatusBarStyle::Hide);
        assert_eq!(StatusBarStyle::Ignore.resolved(true), StatusBarStyle::Ignore);
        assert_eq!(StatusBarStyle::Black.resolved(false), StatusBarStyle::Black);
    }

    #[test]
    fn chrome_style_follows_slot() {
        assert_eq!(
            ChromeStyle::for_slot(StatusBarStyle::Black, false),
            ChromeStyle::Default
        );
        assert_eq!(
            ChromeStyle::for_slot(StatusBarStyle::White, false),
            ChromeStyle::LightContent
        );
        assert_eq!(
            ChromeStyle::for_slot(StatusBarStyle::Black, true),
            ChromeStyle::LightContent
        );
    }
}
