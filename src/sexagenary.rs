// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Sexagenary cycle (干支)
//!
//! Year, month, day and hour each carry one of the 60 stem–branch pairs of
//! the sexagenary cycle, the "four pillars" (四柱):
//!
//! * the **year** changes at Lichun (立春), not on 1 January;
//! * the **month** changes at each of the 12 Jie (节) terms;
//! * the **day** runs continuously with the Julian Day;
//! * the **hour** covers two clock hours, the Zi (子) hour being
//!   23:00–01:00.
//!
//! Civil fields are read as Beijing time, the clock the solar terms are
//! compared on.  Boundaries are compared by civil day: a date on which a
//! Jie falls already belongs to the new month.

use super::civil::CivilDateTime;
use crate::error::{CalendarError, Result};
use crate::lunar::{Uncached, WindowSource};
use crate::solar_term::{check_year, MAX_YEAR, MIN_YEAR};

/// Names of the ten heavenly stems (天干).
pub const STEMS: [&str; 10] = [
    "Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui",
];

/// Names of the twelve earthly branches (地支).
pub const BRANCHES: [&str; 12] = [
    "Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai",
];

/// Animals of the twelve branches (生肖), in branch order.
pub const ANIMALS: [&str; 12] = [
    "Rat", "Ox", "Tiger", "Rabbit", "Dragon", "Snake", "Horse", "Goat", "Monkey", "Rooster",
    "Dog", "Pig",
];

/// Western star signs in [`star_sign`] order, from Aquarius.
pub const STAR_SIGNS: [&str; 12] = [
    "Aquarius",
    "Pisces",
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
];

/// One of the 60 stem–branch pairs.
///
/// Only pairs whose stem and branch have the same parity exist; the
/// constructors never produce any other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SexagenaryPair {
    stem: u8,
    branch: u8,
}

impl SexagenaryPair {
    /// Pair at position `index` of the cycle (0 = Jia-Zi); wraps modulo 60.
    pub const fn from_index(index: u32) -> Self {
        let index = index % 60;
        Self {
            stem: (index % 10) as u8,
            branch: (index % 12) as u8,
        }
    }

    /// Pair from a stem (0..10) and branch (0..12), if it exists.
    pub const fn new(stem: u8, branch: u8) -> Option<Self> {
        if stem < 10 && branch < 12 && stem % 2 == branch % 2 {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// Position in the cycle, 0..60.
    pub const fn index(self) -> u32 {
        // Inverse of (i mod 10, i mod 12): 6·s − 5·b (mod 60).
        ((6 * self.stem as i32 - 5 * self.branch as i32).rem_euclid(60)) as u32
    }

    pub const fn stem(self) -> u8 {
        self.stem
    }

    pub const fn branch(self) -> u8 {
        self.branch
    }

    /// Index into [`ANIMALS`]; the animal follows the branch.
    pub const fn zodiac_animal(self) -> u8 {
        self.branch
    }

    /// The pair one step earlier in the cycle.
    pub const fn previous(self) -> Self {
        Self::from_index(self.index() + 59)
    }
}

impl std::fmt::Display for SexagenaryPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            STEMS[usize::from(self.stem)],
            BRANCHES[usize::from(self.branch)].to_lowercase()
        )
    }
}

/// Pillars of one instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourPillars {
    pub year: SexagenaryPair,
    pub month: SexagenaryPair,
    pub day: SexagenaryPair,
    pub hour: SexagenaryPair,
}

impl std::fmt::Display for FourPillars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

#[inline]
fn cycle_of(value: i64) -> SexagenaryPair {
    SexagenaryPair::from_index(value.rem_euclid(60) as u32)
}

pub(crate) fn pillars(
    source: &impl WindowSource,
    at: &CivilDateTime,
    night_zi_hour: bool,
) -> Result<FourPillars> {
    check_year(at.year)?;

    // Exact hour boundaries are read one second late.
    let nudged = CivilDateTime {
        second: at.second.max(1),
        ..*at
    };
    let jd = nudged.to_julian_day()?;
    let day_number = jd.day_number();

    let mut year = at.year;
    let mut window = source.window(year)?;
    if day_number < window.jie()[1].day_number() {
        year -= 1;
        window = source.window(year)?;
    }

    let next_jie = window
        .jie()
        .iter()
        .position(|t| t.day_number() > day_number)
        .ok_or(CalendarError::year_range("sexagenary year", at.year, MIN_YEAR, MAX_YEAR))?;
    let months_since_jia_zi = (i64::from(year) + 4712) * 12 + next_jie as i64 - 2;

    // Midnight-based day count, advanced one hour so that the Zi hour
    // 23:00–01:00 falls in a single block.
    let day_count = jd.value() + 0.5 + 1.0 / 24.0;

    let mut day = cycle_of((day_count + 49.0).floor() as i64);
    if night_zi_hour && at.hour >= 23 {
        day = day.previous();
    }

    Ok(FourPillars {
        year: cycle_of(i64::from(year) + 4712 + 24),
        month: cycle_of(months_since_jia_zi + 50),
        day,
        hour: cycle_of((day_count * 12.0 + 48.0).floor() as i64),
    })
}

/// Four pillars of a Beijing civil date-time.
///
/// With `night_zi_hour`, 23:00–24:00 keeps the Zi hour of the following day
/// but the day pillar of the current one.
pub fn cycle(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    night_zi_hour: bool,
) -> Result<FourPillars> {
    let at = CivilDateTime::new(year, month, day, hour, minute, second, 0)?;
    pillars(&Uncached, &at, night_zi_hour)
}

/// Western star sign of a civil month and day, 0 = Aquarius.
pub fn star_sign(month: u32, day: u32) -> Result<u32> {
    const FIRST_DAYS: [u32; 12] = [20, 19, 21, 20, 21, 22, 23, 23, 23, 24, 22, 22];
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidCivilDate {
            field: "month",
            value: i64::from(month),
        });
    }
    if !(1..=31).contains(&day) {
        return Err(CalendarError::InvalidCivilDate {
            field: "day",
            value: i64::from(day),
        });
    }
    let sign = month - 1;
    Ok(if day < FIRST_DAYS[sign as usize] {
        (sign + 11) % 12
    } else {
        sign
    })
}
