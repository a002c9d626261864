// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil calendar dates and their Julian Day numbers.
//!
//! Dates up to 1582-10-04 are read on the proleptic Julian calendar, dates
//! from 1582-10-15 on the Gregorian calendar.  Years use astronomical
//! numbering (year 0 = 1 BCE).  The Julian Day of a civil date-time is taken
//! on whatever clock the fields are expressed in; no time-zone or ΔT
//! adjustment happens here.
//!
//! ```rust
//! use nongli::CivilDateTime;
//!
//! let noon = CivilDateTime::new(2000, 1, 1, 12, 0, 0, 0).unwrap();
//! assert_eq!(noon.to_julian_day().unwrap().value(), 2_451_545.0);
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use tracing::debug;

use super::instant::Time;
use super::scales::JD;
use crate::error::{CalendarError, Result};

/// Earliest civil year with a non-negative Julian Day.
pub const MIN_YEAR: i32 = -4712;

/// Latest civil year accepted.
pub const MAX_YEAR: i32 = 9999;

/// Julian Day of -4712-01-01T00:00 (Julian calendar).
const MIN_JD: f64 = -0.5;

/// Julian Day of 10000-01-01T00:00 (Gregorian calendar).
const MAX_JD: f64 = 5_373_484.5;

const MS_PER_DAY: i64 = 86_400_000;

/// Calendar system a civil date is read on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarSystem {
    /// Proleptic Julian calendar, up to 1582-10-04.
    Julian,
    /// Gregorian calendar, from 1582-10-15.
    Gregorian,
}

impl CalendarSystem {
    /// Calendar system of a date.
    ///
    /// The ten dates 1582-10-05..=14 never existed; they are reported as
    /// Gregorian because that is the calendar their Julian Day is taken from.
    pub fn for_date(year: i32, month: u32, day: u32) -> Self {
        if (year, month, day) <= (1582, 10, 4) {
            Self::Julian
        } else {
            Self::Gregorian
        }
    }

    /// Calendar system in force on a day number (midnight-based JDN).
    pub fn for_day_number(day_number: i64) -> Self {
        if day_number < Time::<JD>::GREGORIAN_REFORM.day_number() {
            Self::Julian
        } else {
            Self::Gregorian
        }
    }
}

/// Leap-year rule of the calendar in force during `year`.
///
/// 1582 and earlier follow the Julian rule, later years the Gregorian one.
pub fn is_leap_year(year: i32) -> bool {
    if year <= 1582 {
        year.rem_euclid(4) == 0
    } else {
        year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
    }
}

/// Number of days in a civil month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Julian Day Number (noon-based integer) of a civil date.
fn day_number_of(year: i32, month: u32, day: u32) -> i64 {
    let a = (14 - i64::from(month)) / 12;
    let y = i64::from(year) + 4800 - a;
    let m = i64::from(month) + 12 * a - 3;
    let base = i64::from(day) + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4);
    match CalendarSystem::for_date(year, month, day) {
        CalendarSystem::Julian => base - 32_083,
        CalendarSystem::Gregorian => base - y.div_euclid(100) + y.div_euclid(400) - 32_045,
    }
}

/// Inverse of [`day_number_of`] (Meeus, ch. 7).
fn date_of_day_number(z: i64) -> (i32, u32, u32) {
    let a = match CalendarSystem::for_day_number(z) {
        CalendarSystem::Julian => z,
        CalendarSystem::Gregorian => {
            let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
            z + 1 + alpha - alpha.div_euclid(4)
        }
    };
    let b = a + 1524;
    let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
    let d = (365.25 * c as f64).floor() as i64;
    let e = ((b - d) as f64 / 30.6001).floor() as i64;
    let day = b - d - (30.6001 * e as f64).floor() as i64;
    let month = if e < 14 { e - 1 } else { e - 13 };
    let year = if month > 2 { c - 4716 } else { c - 4715 };
    (year as i32, month as u32, day as u32)
}

/// A civil date and time of day.
///
/// The calendar system is implied by the date (see [`CalendarSystem`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl CivilDateTime {
    /// Build a validated civil date-time.
    ///
    /// The reform-gap dates 1582-10-05..=14 are accepted; see
    /// [`to_julian_day`](Self::to_julian_day).
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Result<Self> {
        let invalid = |field: &'static str, value: u32| CalendarError::InvalidCivilDate {
            field,
            value: i64::from(value),
        };
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::year_range("civil year", year, MIN_YEAR, MAX_YEAR));
        }
        if !(1..=12).contains(&month) {
            return Err(invalid("month", month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(invalid("day", day));
        }
        if hour > 23 {
            return Err(invalid("hour", hour));
        }
        if minute > 59 {
            return Err(invalid("minute", minute));
        }
        if second > 59 {
            return Err(invalid("second", second));
        }
        if millisecond > 999 {
            return Err(invalid("millisecond", millisecond));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        })
    }

    /// Midnight at the start of a civil date.
    pub fn date(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    /// Calendar system this date is read on.
    pub fn calendar_system(&self) -> CalendarSystem {
        CalendarSystem::for_date(self.year, self.month, self.day)
    }

    fn millis_of_day(&self) -> i64 {
        i64::from(self.hour) * 3_600_000
            + i64::from(self.minute) * 60_000
            + i64::from(self.second) * 1_000
            + i64::from(self.millisecond)
    }

    /// Midnight-based day number of the date (`floor(JD + 0.5)`).
    pub fn day_number(&self) -> i64 {
        let (year, month, day) = self.reform_adjusted();
        day_number_of(year, month, day)
    }

    /// The date the Julian Day is computed from: reform-gap dates collapse
    /// onto 1582-10-15.
    fn reform_adjusted(&self) -> (i32, u32, u32) {
        if self.year == 1582 && self.month == 10 && (5..=14).contains(&self.day) {
            debug!(
                day = self.day,
                "1582-10-{:02} does not exist; using 1582-10-15", self.day
            );
            (1582, 10, 15)
        } else {
            (self.year, self.month, self.day)
        }
    }

    /// Continuous Julian Day of this date-time.
    ///
    /// Fails only for years outside [`MIN_YEAR`]..=[`MAX_YEAR`].  The
    /// nonexistent dates 1582-10-05..=14 are not rejected: they take the
    /// Julian Day of 1582-10-15 at the same time of day.
    pub fn to_julian_day(&self) -> Result<Time<JD>> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(CalendarError::year_range(
                "civil year",
                self.year,
                MIN_YEAR,
                MAX_YEAR,
            ));
        }
        let fraction = self.millis_of_day() as f64 / MS_PER_DAY as f64;
        Ok(Time::new(self.day_number() as f64 - 0.5 + fraction))
    }

    /// Civil date-time of a Julian Day, rounded to the millisecond.
    pub fn from_julian_day(jd: Time<JD>) -> Result<Self> {
        let value = jd.value();
        if !(MIN_JD..MAX_JD).contains(&value) {
            return Err(CalendarError::Range {
                what: "Julian Day",
                value,
                min: MIN_JD,
                max: MAX_JD,
            });
        }
        let shifted = value + 0.5;
        let mut z = shifted.floor() as i64;
        let mut ms = ((shifted - z as f64) * MS_PER_DAY as f64).round() as i64;
        if ms >= MS_PER_DAY {
            z += 1;
            ms -= MS_PER_DAY;
        }
        Ok(Self::from_day_number(z, ms))
    }

    pub(crate) fn from_day_number(day_number: i64, millis: i64) -> Self {
        let (year, month, day) = date_of_day_number(day_number);
        Self {
            year,
            month,
            day,
            hour: (millis / 3_600_000) as u32,
            minute: (millis / 60_000 % 60) as u32,
            second: (millis / 1_000 % 60) as u32,
            millisecond: (millis % 1_000) as u32,
        }
    }

    /// Day of the week, 0 = Sunday … 6 = Saturday.
    pub fn weekday(&self) -> u32 {
        (self.day_number() + 1).rem_euclid(7) as u32
    }

    /// Same date-time on chrono's proleptic Gregorian calendar.
    ///
    /// Historical (Julian-calendar) dates are converted through their Julian
    /// Day, so the result names the same day, not the same field values.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let days_from_ce = i32::try_from(self.day_number() - 1_721_425).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days_from_ce)?.and_hms_milli_opt(
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
        )
    }

    /// Civil date-time naming the same day as a proleptic Gregorian chrono value.
    pub fn from_naive(naive: NaiveDateTime) -> Result<Self> {
        let day_number = i64::from(naive.date().num_days_from_ce()) + 1_721_425;
        let civil = Self::from_day_number(day_number, 0);
        if !(MIN_YEAR..=MAX_YEAR).contains(&civil.year) {
            return Err(CalendarError::year_range(
                "civil year",
                civil.year,
                MIN_YEAR,
                MAX_YEAR,
            ));
        }
        let time = naive.time();
        Ok(Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second().min(59),
            millisecond: (time.nanosecond() / 1_000_000).min(999),
            ..civil
        })
    }
}

impl std::fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// Julian Day of a civil date-time given by its fields.
pub fn to_julian_day(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<Time<JD>> {
    CivilDateTime::new(year, month, day, hour, minute, second, 0)?.to_julian_day()
}

/// Civil date-time of a Julian Day.
pub fn from_julian_day(jd: Time<JD>) -> Result<CivilDateTime> {
    CivilDateTime::from_julian_day(jd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> CivilDateTime {
        CivilDateTime::new(y, m, d, h, mi, s, 0).unwrap()
    }

    #[test]
    fn j2000_noon() {
        let jd = dt(2000, 1, 1, 12, 0, 0).to_julian_day().unwrap();
        assert_eq!(jd.value(), 2_451_545.0);
    }

    #[test]
    fn gregorian_reform_boundary() {
        let first = dt(1582, 10, 15, 12, 0, 0).to_julian_day().unwrap();
        assert_eq!(first, Time::<JD>::GREGORIAN_REFORM);
        let last_julian = dt(1582, 10, 4, 12, 0, 0).to_julian_day().unwrap();
        assert_eq!(last_julian.value(), 2_299_160.0);
    }

    #[test]
    fn reform_gap_collapses_onto_boundary_day() {
        let gap = dt(1582, 10, 10, 6, 0, 0).to_julian_day().unwrap();
        assert_eq!(gap.value(), 2_299_160.75);
        assert_eq!(gap.day_number(), Time::<JD>::GREGORIAN_REFORM.day_number());
    }

    #[test]
    fn epoch_constants() {
        assert_eq!(CivilDateTime::date(-4712, 1, 1).unwrap().to_julian_day().unwrap().value(), -0.5);
        assert_eq!(CivilDateTime::date(1858, 11, 17).unwrap().to_julian_day().unwrap().value(), 2_400_000.5);
        assert_eq!(CivilDateTime::date(1970, 1, 1).unwrap().to_julian_day().unwrap().value(), 2_440_587.5);
        assert_eq!(CivilDateTime::date(-1000, 3, 1).unwrap().to_julian_day().unwrap().value(), 1_355_867.5);
    }

    #[test]
    fn inverse_of_known_days() {
        assert_eq!(
            CivilDateTime::from_julian_day(Time::new(2_451_545.0)).unwrap(),
            dt(2000, 1, 1, 12, 0, 0)
        );
        assert_eq!(
            CivilDateTime::from_julian_day(Time::new(2_299_160.0)).unwrap(),
            dt(1582, 10, 4, 12, 0, 0)
        );
        assert_eq!(
            CivilDateTime::from_julian_day(Time::new(-0.5)).unwrap(),
            CivilDateTime::date(-4712, 1, 1).unwrap()
        );
    }

    #[test]
    fn roundtrip_with_milliseconds() {
        let original = CivilDateTime::new(-1, 3, 1, 18, 30, 15, 250).unwrap();
        let back = CivilDateTime::from_julian_day(original.to_julian_day().unwrap()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn rounding_never_yields_day_with_24_hours() {
        let almost_midnight = Time::<JD>::new(2_451_545.5 - 1e-10);
        let civil = CivilDateTime::from_julian_day(almost_midnight).unwrap();
        assert_eq!(civil, CivilDateTime::date(2000, 1, 2).unwrap());
    }

    #[test]
    fn leap_years_follow_calendar_in_force() {
        assert!(is_leap_year(1500));
        assert!(!is_leap_year(1700));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-1));
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(1200, 2), 29);
    }

    #[test]
    fn validation() {
        assert!(matches!(
            CivilDateTime::new(2023, 13, 1, 0, 0, 0, 0),
            Err(CalendarError::InvalidCivilDate { field: "month", .. })
        ));
        assert!(matches!(
            CivilDateTime::new(2023, 2, 29, 0, 0, 0, 0),
            Err(CalendarError::InvalidCivilDate { field: "day", .. })
        ));
        assert!(matches!(
            CivilDateTime::new(2023, 2, 1, 24, 0, 0, 0),
            Err(CalendarError::InvalidCivilDate { field: "hour", .. })
        ));
        assert!(matches!(
            CivilDateTime::new(10_000, 1, 1, 0, 0, 0, 0),
            Err(CalendarError::Range { .. })
        ));
        assert!(CivilDateTime::from_julian_day(Time::new(-1.0)).is_err());
        assert!(CivilDateTime::from_julian_day(Time::new(MAX_JD)).is_err());
    }

    #[test]
    fn calendar_system_selection() {
        assert_eq!(CalendarSystem::for_date(1582, 10, 4), CalendarSystem::Julian);
        assert_eq!(CalendarSystem::for_date(1582, 10, 15), CalendarSystem::Gregorian);
        assert_eq!(dt(1000, 1, 1, 0, 0, 0).calendar_system(), CalendarSystem::Julian);
    }

    #[test]
    fn weekday_of_j2000_is_saturday() {
        assert_eq!(CivilDateTime::date(2000, 1, 1).unwrap().weekday(), 6);
        // The reform skipped dates but not weekdays: Thursday 4 → Friday 15.
        assert_eq!(CivilDateTime::date(1582, 10, 4).unwrap().weekday(), 4);
        assert_eq!(CivilDateTime::date(1582, 10, 15).unwrap().weekday(), 5);
    }

    #[test]
    fn chrono_bridge() {
        let civil = CivilDateTime::new(2024, 2, 10, 8, 30, 5, 125).unwrap();
        let naive = civil.to_naive().unwrap();
        assert_eq!(naive.to_string(), "2024-02-10 08:30:05.125");
        assert_eq!(CivilDateTime::from_naive(naive).unwrap(), civil);

        // Julian 1582-10-04 is proleptic Gregorian 1582-10-14.
        let julian = CivilDateTime::date(1582, 10, 4).unwrap();
        assert_eq!(julian.to_naive().unwrap().date().to_string(), "1582-10-14");
    }

    #[test]
    fn display() {
        let civil = CivilDateTime::new(-500, 7, 4, 3, 2, 1, 9).unwrap();
        assert_eq!(civil.to_string(), "-500-07-04T03:02:01.009");
    }
}
