// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Lunar month window
//!
//! A [`LunarWindow`] lays out the months around one lunar year, from the
//! new moon before the preceding winter solstice onwards:
//!
//! * 16 Zhongqi (中气) instants, the first being the Dongzhi of `year − 1`;
//! * 16 Jie (节) instants, the first being the Xiaohan of `year − 1`;
//! * 16 new moons (朔), the first being the last one on or before that
//!   Dongzhi;
//! * 15 [`MonthCode`]s, one per new-moon interval.
//!
//! Every instant is on the [`CST`] clock: the lunar calendar is defined by
//! Beijing civil days whatever zone results are displayed in.
//!
//! ## Month codes
//!
//! Code 0 is the 11th month of `year − 1`, code 2 the 1st month of `year`
//! and code 14 the 1st month of `year + 1`.  A leap month repeats the month
//! before it and carries a half code: 3.5 is the leap 2nd month.
//!
//! When the 13 new moons from one winter solstice to the next enclose 13
//! months, one of them contains no Zhongqi and is leap.  The scan looks for
//! the first interval whose opening new moon falls after the previous
//! Zhongqi while the next new moon falls on or before the current one.
//! Once found, the leap month latches and every later interval reads the
//! Zhongqi one place earlier.

use tracing::{debug, trace};

use super::civil::CivilDateTime;
use super::instant::Time;
use super::scales::{CST, CST_OFFSET, JD};
use crate::delta_t::delta_t_days;
use crate::error::{CalendarError, Result};
use crate::lunar::check_lunar_year;
use crate::new_moon::{reference_synodic_month_index, true_new_moon};
use crate::solar_term::{adjusted_terms, SolarTerm};

/// Number of entries in each instant table of a window.
pub const WINDOW_LEN: usize = 16;

/// Number of month intervals in a window.
pub const MONTHS_PER_WINDOW: usize = WINDOW_LEN - 1;

/// New moons computed before aligning the window on the winter solstice.
const NEW_MOON_CANDIDATES: usize = 20;

/// Position of a new-moon interval within a window.
///
/// See the [module documentation](self) for the numbering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthCode {
    ordinal: u32,
    leap: bool,
}

impl MonthCode {
    /// A regular month.
    pub const fn regular(ordinal: u32) -> Self {
        Self {
            ordinal,
            leap: false,
        }
    }

    /// The leap month following month `ordinal`.
    pub const fn leap_after(ordinal: u32) -> Self {
        Self {
            ordinal,
            leap: true,
        }
    }

    /// Numeric code; leap months are half-integers.
    pub fn value(self) -> f64 {
        f64::from(self.ordinal) + if self.leap { 0.5 } else { 0.0 }
    }

    /// Integer part of the code.
    pub const fn ordinal(self) -> u32 {
        self.ordinal
    }

    pub const fn is_leap(self) -> bool {
        self.leap
    }

    /// Lunar month number, 1..=12.
    pub const fn month(self) -> u32 {
        (self.ordinal + 10) % 12 + 1
    }

    /// Lunar year of the month relative to the window year: −1, 0 or +1.
    pub const fn year_offset(self) -> i32 {
        ((self.ordinal + 10) / 12) as i32 - 1
    }
}

/// Leap detection state while scanning a window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum LeapScan {
    NoLeapYet,
    LeapFound(usize),
}

impl LeapScan {
    /// Places the Zhongqi index lags the interval index by.
    fn shift(self) -> usize {
        match self {
            Self::NoLeapYet => 0,
            Self::LeapFound(_) => 1,
        }
    }

    /// Code of interval `i` (`i ≥ 1`) and the state after it.
    fn classify(
        self,
        i: usize,
        new_moons: &[i64; WINDOW_LEN],
        zhongqi: &[i64; WINDOW_LEN],
    ) -> (MonthCode, Self) {
        let ordinal = (i - self.shift()) as u32;
        match self {
            Self::NoLeapYet if new_moons[i] > zhongqi[i - 1] && new_moons[i + 1] <= zhongqi[i] => {
                (MonthCode::leap_after(ordinal - 1), Self::LeapFound(i))
            }
            _ => (MonthCode::regular(ordinal), self),
        }
    }
}

/// Month codes from the day numbers of a window's new moons and Zhongqi.
///
/// If the 12th Zhongqi after the opening Dongzhi falls on or after the 13th
/// new moon, the leap month may sit anywhere in the window and every
/// interval is scanned.  Otherwise the first 13 intervals are regular and
/// only the last two are tested.
pub(crate) fn month_codes(
    new_moons: &[i64; WINDOW_LEN],
    zhongqi: &[i64; WINDOW_LEN],
) -> ([MonthCode; MONTHS_PER_WINDOW], LeapScan) {
    let first_scanned = if zhongqi[12] >= new_moons[13] { 1 } else { 13 };

    let mut codes = [MonthCode::regular(0); MONTHS_PER_WINDOW];
    let mut scan = LeapScan::NoLeapYet;
    for (i, code) in codes.iter_mut().enumerate() {
        if i < first_scanned {
            *code = MonthCode::regular(i as u32);
        } else {
            let (next_code, next_scan) = scan.classify(i, new_moons, zhongqi);
            *code = next_code;
            scan = next_scan;
        }
    }
    (codes, scan)
}

/// Months, solar terms and new moons around one lunar year.
#[derive(Debug, Clone, PartialEq)]
pub struct LunarWindow {
    year: i32,
    zhongqi: [Time<CST>; WINDOW_LEN],
    jie: [Time<CST>; WINDOW_LEN],
    new_moons: [Time<CST>; WINDOW_LEN],
    codes: [MonthCode; MONTHS_PER_WINDOW],
}

fn to_cst(t: Time<JD>) -> Time<CST> {
    Time::from_days(t.quantity() + CST_OFFSET)
}

/// Zhongqi (`odd == false`) or Jie (`odd == true`) instants: three from
/// the six closing terms of `year − 1`, then thirteen of `year`.
fn term_table(previous: &[Time<JD>], current: &[Time<JD>], odd: bool) -> [Time<CST>; WINDOW_LEN] {
    let parity = usize::from(odd);
    std::array::from_fn(|i| match i {
        0..=2 => to_cst(previous[2 * i + parity]),
        _ => to_cst(current[2 * (i - 3) + parity]),
    })
}

impl LunarWindow {
    /// Compute the window of lunar `year`.
    ///
    /// Lunar years −1001..=3000 are accepted; the first days of civil year
    /// −1000 belong to lunar year −1001.
    #[tracing::instrument(level = "debug")]
    pub fn build(year: i32) -> Result<Self> {
        check_lunar_year(year)?;
        // Dongzhi .. Jingzhe of the previous year, then the 26 terms of this one.
        let previous = adjusted_terms(year - 1, 18..=23)?;
        let current = adjusted_terms(year, 0..=25)?;
        let zhongqi = term_table(&previous, &current, false);
        let jie = term_table(&previous, &current, true);

        let new_moons = Self::align_new_moons(year, zhongqi[0])?;

        let moon_days = new_moons.map(|t| t.day_number());
        let zhongqi_days = zhongqi.map(|t| t.day_number());
        let (codes, scan) = month_codes(&moon_days, &zhongqi_days);
        if let LeapScan::LeapFound(interval) = scan {
            debug!(year, interval, code = codes[interval].value(), "leap month latched");
        }

        Ok(Self {
            year,
            zhongqi,
            jie,
            new_moons,
            codes,
        })
    }

    /// Sixteen new moons, the first being the last one on or before the
    /// Dongzhi that opens the window.
    fn align_new_moons(year: i32, dongzhi: Time<CST>) -> Result<[Time<CST>; WINDOW_LEN]> {
        let november = CivilDateTime::date(year - 1, 11, 1)?.to_julian_day()?;
        let k0 = reference_synodic_month_index(november);

        let mut candidates = [Time::<CST>::new(0.0); NEW_MOON_CANDIDATES];
        for (i, slot) in candidates.iter_mut().enumerate() {
            let jde = true_new_moon(k0 + i as i64);
            let ut = jde - delta_t_days(year, i as f64 - 1.0)?;
            *slot = to_cst(ut);
        }

        let solstice_day = dongzhi.day_number();
        let after = (1..=NEW_MOON_CANDIDATES - WINDOW_LEN + 1)
            .find(|&j| candidates[j].day_number() > solstice_day)
            .ok_or(CalendarError::Range {
                what: "new-moon window year",
                value: f64::from(year),
                min: f64::from(crate::solar_term::MIN_YEAR),
                max: f64::from(crate::solar_term::MAX_YEAR),
            })?;
        trace!(year, k0, first = after - 1, "aligned new moons on the winter solstice");

        Ok(std::array::from_fn(|i| candidates[after - 1 + i]))
    }

    /// Lunar year of month codes 2..=13.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zhongqi instants from the Dongzhi of `year − 1`.
    pub fn zhongqi(&self) -> &[Time<CST>; WINDOW_LEN] {
        &self.zhongqi
    }

    /// Jie instants from the Xiaohan of `year − 1`.
    pub fn jie(&self) -> &[Time<CST>; WINDOW_LEN] {
        &self.jie
    }

    pub fn new_moons(&self) -> &[Time<CST>; WINDOW_LEN] {
        &self.new_moons
    }

    pub fn codes(&self) -> &[MonthCode; MONTHS_PER_WINDOW] {
        &self.codes
    }

    /// Rounded code of the window's leap month (`floor(code + 0.5)`), or 0.
    pub fn leap_code(&self) -> u32 {
        self.codes
            .iter()
            .skip(1)
            .find(|c| c.is_leap())
            .map_or(0, |c| c.ordinal() + 1)
    }

    /// Leap month of `year`, 0 if none.
    ///
    /// A leap 11th or 12th month of `year − 1` also shows up at the start of
    /// this window; it is not reported here.
    pub fn leap_month(&self) -> u32 {
        self.leap_code().saturating_sub(2)
    }

    /// Length in days of each month interval.
    pub fn month_lengths(&self) -> [u32; MONTHS_PER_WINDOW] {
        std::array::from_fn(|i| {
            (self.new_moons[i + 1].day_number() - self.new_moons[i].day_number()) as u32
        })
    }

    /// Solar term falling on a CST day number, if the window lists one.
    pub fn term_on(&self, day_number: i64) -> Option<SolarTerm> {
        let table_index = |i: usize| if i < 3 { 18 + 2 * i } else { 2 * (i - 3) };
        let zhongqi = self
            .zhongqi
            .iter()
            .position(|t| t.day_number() == day_number)
            .map(table_index);
        let jie = self
            .jie
            .iter()
            .position(|t| t.day_number() == day_number)
            .map(|i| table_index(i) + 1);
        zhongqi.or(jie).map(SolarTerm::from_index)
    }

    /// Interval containing a CST day number, if the window covers it.
    pub fn month_index_of(&self, day_number: i64) -> Option<usize> {
        (0..MONTHS_PER_WINDOW).find(|&i| {
            self.new_moons[i].day_number() <= day_number
                && day_number < self.new_moons[i + 1].day_number()
        })
    }
}
