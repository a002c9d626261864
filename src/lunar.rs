// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Lunisolar dates (农历)
//!
//! Conversion between civil dates and dates of the Chinese lunisolar
//! calendar.  Civil dates are read as Beijing (UTC+8) civil days; a lunar
//! date names the month by its number 1..=12 and an explicit leap flag.
//!
//! ```rust
//! use nongli::lunar::{gregorian_to_lunar, lunar_to_gregorian, LunarDate};
//!
//! let new_year = gregorian_to_lunar(2023, 1, 22).unwrap();
//! assert_eq!(new_year, LunarDate::new(2023, 1, 1, false));
//!
//! let civil = lunar_to_gregorian(LunarDate::new(2023, 2, 1, true)).unwrap();
//! assert_eq!((civil.year, civil.month, civil.day), (2023, 3, 22));
//! ```

use std::sync::Arc;

use super::civil::CivilDateTime;
use crate::error::{CalendarError, Result};
use crate::lunar_month::LunarWindow;
use crate::solar_term::{check_year, MAX_YEAR, MIN_YEAR};

/// A date of the lunisolar calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LunarDate {
    /// Lunar year; its first day is the new year (春节).
    pub year: i32,
    /// Month number, 1..=12.
    pub month: u32,
    /// Day of the month, 1..=30.
    pub day: u32,
    /// Whether this is the leap repetition of `month`.
    pub leap: bool,
}

impl LunarDate {
    /// Build a lunar date without checking that it exists.
    ///
    /// [`lunar_to_gregorian`] rejects dates that do not.
    pub const fn new(year: i32, month: u32, day: u32, leap: bool) -> Self {
        Self {
            year,
            month,
            day,
            leap,
        }
    }

    fn invalid(&self, reason: &'static str) -> CalendarError {
        CalendarError::InvalidLunarDate {
            year: self.year,
            month: self.month,
            day: self.day,
            leap: self.leap,
            reason,
        }
    }
}

impl std::fmt::Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let leap = if self.leap { "L" } else { "" };
        write!(f, "{}-{}{:02}-{:02}", self.year, leap, self.month, self.day)
    }
}

/// Where the converters obtain lunar windows from.
pub(crate) trait WindowSource {
    fn window(&self, year: i32) -> Result<Arc<LunarWindow>>;
}

/// Builds every window afresh.
pub(crate) struct Uncached;

impl WindowSource for Uncached {
    fn window(&self, year: i32) -> Result<Arc<LunarWindow>> {
        LunarWindow::build(year).map(Arc::new)
    }
}

/// Lunar years reachable from civil dates of the solar-term domain: the
/// first civil days of `MIN_YEAR` still belong to lunar year `MIN_YEAR − 1`.
pub(crate) fn check_lunar_year(year: i32) -> Result<()> {
    if (MIN_YEAR - 1..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::year_range("lunar year", year, MIN_YEAR - 1, MAX_YEAR))
    }
}

/// Window index of a lunar month, or why the month does not exist.
fn month_index(window: &LunarWindow, date: &LunarDate) -> Result<usize> {
    if !(1..=12).contains(&date.month) {
        return Err(date.invalid("month must be 1..=12"));
    }
    let leap_code = window.leap_code();
    let code = date.month + 2;
    if date.leap {
        if leap_code < 3 {
            return Err(date.invalid("the year has no leap month"));
        }
        if leap_code != code {
            return Err(date.invalid("the leap month of the year is another month"));
        }
        return Ok(code as usize);
    }
    let index = if leap_code == 0 {
        code - 1
    } else {
        code + u32::from(code > leap_code) - 1
    };
    Ok(index as usize)
}

pub(crate) fn to_lunar(source: &impl WindowSource, date: &CivilDateTime) -> Result<LunarDate> {
    check_year(date.year)?;
    let day_number = date.day_number();

    let mut window = source.window(date.year)?;
    if day_number < window.new_moons()[0].day_number() {
        window = source.window(date.year - 1)?;
    }
    let index = window
        .month_index_of(day_number)
        .ok_or(CalendarError::year_range("lunar window year", date.year, MIN_YEAR, MAX_YEAR))?;

    let code = window.codes()[index];
    let first_day = window.new_moons()[index].day_number();
    Ok(LunarDate {
        year: window.year() + code.year_offset(),
        month: code.month(),
        day: (day_number - first_day + 1) as u32,
        leap: code.is_leap(),
    })
}

pub(crate) fn to_civil(source: &impl WindowSource, date: &LunarDate) -> Result<CivilDateTime> {
    check_lunar_year(date.year)?;
    let window = source.window(date.year)?;
    let index = month_index(&window, date)?;
    let length = window.month_lengths()[index];
    if date.day == 0 || date.day > length {
        return Err(date.invalid(if length == 29 {
            "the month has 29 days"
        } else {
            "the month has 30 days"
        }));
    }
    let day_number = window.new_moons()[index].day_number() + i64::from(date.day) - 1;
    Ok(CivilDateTime::from_day_number(day_number, 0))
}

pub(crate) fn days_in_lunar_month(
    source: &impl WindowSource,
    year: i32,
    month: u32,
    leap: bool,
) -> Result<u32> {
    check_lunar_year(year)?;
    let date = LunarDate::new(year, month, 1, leap);
    let window = source.window(year)?;
    let index = month_index(&window, &date)?;
    Ok(window.month_lengths()[index])
}

pub(crate) fn leap_month_of(source: &impl WindowSource, year: i32) -> Result<u32> {
    check_lunar_year(year)?;
    Ok(source.window(year)?.leap_month())
}

/// Lunar date of a civil (Beijing) date.
pub fn gregorian_to_lunar(year: i32, month: u32, day: u32) -> Result<LunarDate> {
    to_lunar(&Uncached, &CivilDateTime::date(year, month, day)?)
}

/// Civil (Beijing) date of a lunar date; the time of day is midnight.
pub fn lunar_to_gregorian(date: LunarDate) -> Result<CivilDateTime> {
    to_civil(&Uncached, &date)
}

/// Number of days (29 or 30) of a lunar month.
pub fn lunar_days(year: i32, month: u32, leap: bool) -> Result<u32> {
    days_in_lunar_month(&Uncached, year, month, leap)
}

/// Month doubled by the leap month of lunar `year`, or 0.
pub fn leap_month(year: i32) -> Result<u32> {
    leap_month_of(&Uncached, year)
}
