// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for calendar computations.
//!
//! Every failure is a permanent rejection of the input: the computations are
//! deterministic and perform no I/O, so there is nothing to retry.

/// Error type for all fallible operations in this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// A year (or Julian Day) lies outside the domain of the model that
    /// would have to evaluate it.
    #[error("{what} {value} is outside the supported range {min}..={max}")]
    Range {
        /// Which model rejected the input.
        what: &'static str,
        /// The offending value.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },

    /// The requested lunar date does not exist.
    #[error("lunar date {year}-{}{month}-{day} does not exist: {reason}", leap_prefix(.leap))]
    InvalidLunarDate {
        /// Lunar year.
        year: i32,
        /// Lunar month number (1–12).
        month: u32,
        /// Day of the lunar month.
        day: u32,
        /// Whether the leap month was requested.
        leap: bool,
        /// Why the date was rejected.
        reason: &'static str,
    },

    /// A civil date-time field is out of its range (e.g. month 13).
    #[error("invalid civil date-time field {field} = {value}")]
    InvalidCivilDate {
        /// Name of the field.
        field: &'static str,
        /// The offending value.
        value: i64,
    },
}

fn leap_prefix(leap: &bool) -> &'static str {
    if *leap {
        "leap "
    } else {
        ""
    }
}

impl CalendarError {
    pub(crate) fn year_range(what: &'static str, year: i32, min: i32, max: i32) -> Self {
        Self::Range {
            what,
            value: f64::from(year),
            min: f64::from(min),
            max: f64::from(max),
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, CalendarError>;
