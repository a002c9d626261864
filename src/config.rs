// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Options of a [`ChineseCalendar`](crate::ChineseCalendar).

use chrono::FixedOffset;

use crate::error::{CalendarError, Result};

/// Largest accepted display offset magnitude; chrono's `FixedOffset` stays
/// strictly within one day.
const MAX_OFFSET_SECONDS: i32 = 86_399;

/// Calendar options.
///
/// The lunar and sexagenary computations always use Beijing civil days;
/// the display offset only localizes the instants handed back to callers.
///
/// # Example
///
/// ```
/// use nongli::CalendarOptions;
///
/// let options = CalendarOptions::default()
///     .with_night_zi_hour(true)
///     .with_display_offset(0);
///
/// assert!(options.validate().is_ok());
/// assert!(options.night_zi_hour());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CalendarOptions {
    /// Give 23:00–24:00 the day pillar of the current day.
    night_zi_hour: bool,
    /// Offset from UTC of displayed instants, in seconds.
    display_offset_seconds: i32,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            night_zi_hour: false,
            display_offset_seconds: 8 * 3_600,
        }
    }
}

impl CalendarOptions {
    /// Sets whether the night Zi hour keeps the current day pillar.
    pub fn with_night_zi_hour(mut self, night_zi_hour: bool) -> Self {
        self.night_zi_hour = night_zi_hour;
        self
    }

    /// Sets the UTC offset, in seconds, of displayed instants.
    pub fn with_display_offset(mut self, seconds: i32) -> Self {
        self.display_offset_seconds = seconds;
        self
    }

    pub fn night_zi_hour(&self) -> bool {
        self.night_zi_hour
    }

    pub fn display_offset_seconds(&self) -> i32 {
        self.display_offset_seconds
    }

    /// The display offset as a chrono offset.
    pub fn display_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.display_offset_seconds).ok_or(CalendarError::Range {
            what: "display offset (s)",
            value: f64::from(self.display_offset_seconds),
            min: -f64::from(MAX_OFFSET_SECONDS),
            max: f64::from(MAX_OFFSET_SECONDS),
        })
    }

    /// Checks that every option is usable.
    pub fn validate(&self) -> Result<()> {
        self.display_offset().map(|_| ())
    }
}
