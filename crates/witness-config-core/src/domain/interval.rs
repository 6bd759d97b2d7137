//! Feed publishing interval and the numbered menu used to pick it.
//!
//! The interactive flow never accepts free-text intervals: the operator picks
//! one of five numbered choices.  Values read back from an older store are
//! mapped onto the closest menu entry by [`FeedInterval::closest_to`].

use std::fmt;

/// How often the bot runtime publishes a feed price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedInterval {
    ThreeMinutes,
    TenMinutes,
    ThirtyMinutes,
    OneHour,
    SixHours,
    /// Caller-supplied text passed through unchecked by the quick path.
    Custom(String),
}

/// Menu entries in display order; menu number = index + 1.
pub const MENU: [FeedInterval; 5] = [
    FeedInterval::ThreeMinutes,
    FeedInterval::TenMinutes,
    FeedInterval::ThirtyMinutes,
    FeedInterval::OneHour,
    FeedInterval::SixHours,
];

impl Default for FeedInterval {
    /// `10min` is the recommended interval.
    fn default() -> Self {
        FeedInterval::TenMinutes
    }
}

impl FeedInterval {
    /// The on-disk label, e.g. `"10min"`.
    pub fn label(&self) -> &str {
        match self {
            FeedInterval::ThreeMinutes => "3min",
            FeedInterval::TenMinutes => "10min",
            FeedInterval::ThirtyMinutes => "30min",
            FeedInterval::OneHour => "1hour",
            FeedInterval::SixHours => "6hour",
            FeedInterval::Custom(text) => text,
        }
    }

    /// Interval length in minutes; `None` for [`FeedInterval::Custom`].
    pub fn minutes(&self) -> Option<u64> {
        match self {
            FeedInterval::ThreeMinutes => Some(3),
            FeedInterval::TenMinutes => Some(10),
            FeedInterval::ThirtyMinutes => Some(30),
            FeedInterval::OneHour => Some(60),
            FeedInterval::SixHours => Some(360),
            FeedInterval::Custom(_) => None,
        }
    }

    /// Matches an exact menu label.
    pub fn from_label(label: &str) -> Option<Self> {
        MENU.iter().find(|i| i.label() == label).cloned()
    }

    /// Maps a 1-based menu number to its interval.
    pub fn from_menu_choice(choice: usize) -> Option<Self> {
        choice.checked_sub(1).and_then(|i| MENU.get(i)).cloned()
    }

    /// The 1-based menu number, or `None` for [`FeedInterval::Custom`].
    pub fn menu_choice(&self) -> Option<usize> {
        MENU.iter().position(|i| i == self).map(|i| i + 1)
    }

    /// Maps an arbitrary stored value to the closest menu entry.
    ///
    /// Exact labels win; otherwise the text is read as a duration (`5m`,
    /// `2h`, `600s`, `15min`, `1 hour`, or a bare number of minutes) and the
    /// nearest entry is chosen, ties going to the shorter interval.  Anything
    /// unreadable, and `None`, yields the default.
    pub fn closest_to(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        if let Some(exact) = Self::from_label(raw) {
            return exact;
        }
        match parse_minutes(raw) {
            Some(minutes) => MENU
                .iter()
                .min_by_key(|i| i.minutes().map_or(u64::MAX, |m| m.abs_diff(minutes)))
                .cloned()
                .unwrap_or_default(),
            None => Self::default(),
        }
    }
}

impl fmt::Display for FeedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a loose duration string into whole minutes.
fn parse_minutes(text: &str) -> Option<u64> {
    let text = text.to_ascii_lowercase();
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (digits, unit) = text.split_at(split);
    let value: u64 = digits.parse().ok()?;
    let per_unit_seconds = match unit.trim() {
        "" | "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3600,
        _ => return None,
    };
    Some(value.saturating_mul(per_unit_seconds) / 60)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
