// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The [`ChineseCalendar`] engine.
//!
//! The free functions of [`lunar`](crate::lunar) and
//! [`sexagenary`](crate::sexagenary) rebuild the lunar window of a year on
//! every call.  The engine keeps the windows in a [`TermCache`] and applies
//! its [`CalendarOptions`]; the results are identical.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::cache::TermCache;
use crate::civil::CivilDateTime;
use crate::config::CalendarOptions;
use crate::error::{CalendarError, Result};
use crate::lunar::{self, LunarDate};
use crate::lunar_month::LunarWindow;
use crate::sexagenary::{self, FourPillars};
use crate::solar_term::{self, SolarTerm};

/// Everything the calendar knows about one civil day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayInfo {
    /// The civil date-time asked about (Beijing time).
    pub civil: CivilDateTime,
    /// 0 = Sunday.
    pub weekday: u32,
    pub lunar: LunarDate,
    pub pillars: FourPillars,
    /// Solar term falling on this day.
    pub solar_term: Option<SolarTerm>,
    /// Index into [`STAR_SIGNS`](crate::sexagenary::STAR_SIGNS).
    pub star_sign: u32,
}

/// Lunisolar calendar with a per-year cache.
///
/// The engine is `Sync`; share it behind an `Arc` to reuse the cache across
/// threads.
///
/// ```rust
/// use nongli::{CalendarOptions, ChineseCalendar, LunarDate};
///
/// let calendar = ChineseCalendar::new(CalendarOptions::default()).unwrap();
/// assert_eq!(
///     calendar.gregorian_to_lunar(2024, 2, 10).unwrap(),
///     LunarDate::new(2024, 1, 1, false)
/// );
/// assert_eq!(calendar.leap_month(2023).unwrap(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ChineseCalendar {
    options: CalendarOptions,
    cache: TermCache,
}

impl ChineseCalendar {
    /// Creates an engine after validating `options`.
    pub fn new(options: CalendarOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            cache: TermCache::new(),
        })
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    pub fn cache(&self) -> &TermCache {
        &self.cache
    }

    /// Lunar window of `year`, from the cache.
    pub fn window(&self, year: i32) -> Result<Arc<LunarWindow>> {
        self.cache.window(year)
    }

    /// Lunar date of a civil (Beijing) date.
    pub fn gregorian_to_lunar(&self, year: i32, month: u32, day: u32) -> Result<LunarDate> {
        lunar::to_lunar(&self.cache, &CivilDateTime::date(year, month, day)?)
    }

    /// Civil (Beijing) date of a lunar date.
    pub fn lunar_to_gregorian(&self, date: LunarDate) -> Result<CivilDateTime> {
        lunar::to_civil(&self.cache, &date)
    }

    /// Month doubled by the leap month of lunar `year`, or 0.
    pub fn leap_month(&self, year: i32) -> Result<u32> {
        lunar::leap_month_of(&self.cache, year)
    }

    /// Number of days (29 or 30) of a lunar month.
    pub fn lunar_days(&self, year: i32, month: u32, leap: bool) -> Result<u32> {
        lunar::days_in_lunar_month(&self.cache, year, month, leap)
    }

    /// Four pillars of a Beijing civil date-time, honoring the night Zi
    /// hour option.
    pub fn cycle(&self, at: &CivilDateTime) -> Result<FourPillars> {
        sexagenary::pillars(&self.cache, at, self.options.night_zi_hour())
    }

    /// The 26 solar terms around civil `year`, localized to the display
    /// offset.
    pub fn year_solar_terms(&self, year: i32) -> Result<Vec<(SolarTerm, DateTime<FixedOffset>)>> {
        let offset = self.options.display_offset()?;
        solar_term::year_solar_terms(year)?
            .into_iter()
            .map(|(term, t)| {
                t.to_offset(offset)
                    .map(|local| (term, local))
                    .ok_or(CalendarError::year_range(
                        "displayable year",
                        year,
                        solar_term::MIN_YEAR,
                        solar_term::MAX_YEAR,
                    ))
            })
            .collect()
    }

    /// Lunar date, pillars, solar term and star sign of a civil day.
    pub fn day(&self, at: &CivilDateTime) -> Result<DayInfo> {
        let lunar = lunar::to_lunar(&self.cache, at)?;
        let pillars = self.cycle(at)?;
        let day_number = at.day_number();
        let solar_term = self.window(at.year)?.term_on(day_number);
        Ok(DayInfo {
            civil: *at,
            weekday: at.weekday(),
            lunar,
            pillars,
            solar_term,
            star_sign: sexagenary::star_sign(at.month, at.day)?,
        })
    }
}
