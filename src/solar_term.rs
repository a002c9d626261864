// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar terms (节气)
//!
//! The 24 solar terms are the instants at which the Sun's apparent ecliptic
//! longitude reaches a multiple of 15°.  They are computed here from
//!
//! 1. the vernal equinox of the year, from a millennium polynomial fit
//!    (Meeus, ch. 27, tables 27.A/27.B);
//! 2. the tropical-year length, as the distance to the next equinox;
//! 3. Kepler's equation solved in closed form for 26 true anomalies 15°
//!    apart, with an eccentricity `e(T)` and a longitude-of-perihelion
//!    offset `d(T)` that drift over the millennia.
//!
//! The resulting **mean** instants are corrected by the periodic
//! [`perturbation`](crate::perturbation::perturbation) series and shifted
//! from dynamical time to Universal Time with [ΔT](crate::delta_t) to give
//! the **adjusted** instants.
//!
//! Index 0 of every table is the vernal equinox of the requested year and
//! index 18 its winter solstice; indices 24 and 25 are the Chunfen and
//! Qingming of the following year.
//!
//! ## Valid Time Range
//! Years −1000..=3000.

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use qtty::Days;

use super::instant::Time;
use super::scales::{JD, UT};
use crate::delta_t::delta_t_days;
use crate::error::{CalendarError, Result};
use crate::perturbation::perturbation;

/// Earliest year for which solar terms are computed.
pub const MIN_YEAR: i32 = -1000;

/// Latest year for which solar terms are computed.
pub const MAX_YEAR: i32 = 3000;

/// Number of entries in a yearly table: 24 terms plus the first two of the
/// following year.
pub const TERMS_PER_TABLE: usize = 26;

/// The 24 solar terms, in order of increasing solar longitude from the
/// vernal equinox.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolarTerm {
    Chunfen,
    Qingming,
    Guyu,
    Lixia,
    Xiaoman,
    Mangzhong,
    Xiazhi,
    Xiaoshu,
    Dashu,
    Liqiu,
    Chushu,
    Bailu,
    Qiufen,
    Hanlu,
    Shuangjiang,
    Lidong,
    Xiaoxue,
    Daxue,
    Dongzhi,
    Xiaohan,
    Dahan,
    Lichun,
    Yushui,
    Jingzhe,
}

impl SolarTerm {
    /// All terms, starting from the vernal equinox.
    pub const ALL: [SolarTerm; 24] = [
        Self::Chunfen,
        Self::Qingming,
        Self::Guyu,
        Self::Lixia,
        Self::Xiaoman,
        Self::Mangzhong,
        Self::Xiazhi,
        Self::Xiaoshu,
        Self::Dashu,
        Self::Liqiu,
        Self::Chushu,
        Self::Bailu,
        Self::Qiufen,
        Self::Hanlu,
        Self::Shuangjiang,
        Self::Lidong,
        Self::Xiaoxue,
        Self::Daxue,
        Self::Dongzhi,
        Self::Xiaohan,
        Self::Dahan,
        Self::Lichun,
        Self::Yushui,
        Self::Jingzhe,
    ];

    /// Position in [`ALL`](Self::ALL), 0 = Chunfen.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Term at a table index; indices wrap every 24 entries.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 24]
    }

    /// Mid-point terms (中气): the even indices, which decide leap months.
    pub const fn is_zhongqi(self) -> bool {
        self.index() % 2 == 0
    }

    /// Node terms (节): the odd indices, which bound the sexagenary months.
    pub const fn is_jie(self) -> bool {
        !self.is_zhongqi()
    }

    /// Apparent solar longitude at the term, in degrees.
    pub fn longitude(self) -> f64 {
        15.0 * self.index() as f64
    }

    /// Pinyin name of the term.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chunfen => "Chunfen",
            Self::Qingming => "Qingming",
            Self::Guyu => "Guyu",
            Self::Lixia => "Lixia",
            Self::Xiaoman => "Xiaoman",
            Self::Mangzhong => "Mangzhong",
            Self::Xiazhi => "Xiazhi",
            Self::Xiaoshu => "Xiaoshu",
            Self::Dashu => "Dashu",
            Self::Liqiu => "Liqiu",
            Self::Chushu => "Chushu",
            Self::Bailu => "Bailu",
            Self::Qiufen => "Qiufen",
            Self::Hanlu => "Hanlu",
            Self::Shuangjiang => "Shuangjiang",
            Self::Lidong => "Lidong",
            Self::Xiaoxue => "Xiaoxue",
            Self::Daxue => "Daxue",
            Self::Dongzhi => "Dongzhi",
            Self::Xiaohan => "Xiaohan",
            Self::Dahan => "Dahan",
            Self::Lichun => "Lichun",
            Self::Yushui => "Yushui",
            Self::Jingzhe => "Jingzhe",
        }
    }
}

impl std::fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A contiguous run of one year's solar-term instants.
///
/// Indices are table indices (0 = that year's vernal equinox, up to 25).
#[derive(Debug, Clone, PartialEq)]
pub struct SolarTermSet {
    year: i32,
    first: usize,
    instants: Vec<Time<JD>>,
}

impl SolarTermSet {
    /// Year whose vernal equinox is index 0.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Table indices covered by this set.
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.first..=self.first + self.instants.len() - 1
    }

    /// Instant at a table index, if the set covers it.
    pub fn get(&self, index: usize) -> Option<Time<JD>> {
        index
            .checked_sub(self.first)
            .and_then(|offset| self.instants.get(offset).copied())
    }

    /// `(index, term, instant)` triples in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, SolarTerm, Time<JD>)> + '_ {
        self.instants
            .iter()
            .enumerate()
            .map(move |(offset, &t)| {
                let index = self.first + offset;
                (index, SolarTerm::from_index(index), t)
            })
    }

    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }
}

pub(crate) fn check_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::year_range("solar-term year", year, MIN_YEAR, MAX_YEAR))
    }
}

fn equinox_jde(year: i32) -> f64 {
    let y = f64::from(year);
    if (1000..=3000).contains(&year) {
        let m = (y - 2000.0) / 1000.0;
        2_451_623.809_84 + 365_242.374_04 * m + 0.051_69 * m * m - 0.004_11 * m.powi(3)
            - 0.000_57 * m.powi(4)
    } else {
        let m = y / 1000.0;
        1_721_139.291_89 + 365_242.137_4 * m + 0.061_34 * m * m + 0.001_11 * m.powi(3)
            - 0.000_71 * m.powi(4)
    }
}

/// Mean instant of the March equinox of `year`, dynamical time.
pub fn vernal_equinox(year: i32) -> Result<Time<JD>> {
    check_year(year)?;
    Ok(Time::new(equinox_jde(year)))
}

/// Length of the tropical year starting at the March equinox of `year`.
pub fn tropical_year(year: i32) -> Result<Days> {
    check_year(year)?;
    Ok(Days::new(equinox_jde(year + 1) - equinox_jde(year)))
}

/// Which reflection was applied to bring an angle into the domain of the
/// half-angle anomaly formula.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Reflection {
    None,
    OneYear,
    TwoYears,
}

/// Time since perihelion, in days, at which the true anomaly reaches `theta`.
fn time_since_perihelion(theta: f64, e: f64, year_length: f64) -> f64 {
    let (theta, reflection) = if theta > 3.0 * PI {
        (4.0 * PI - theta, Reflection::TwoYears)
    } else if theta > PI {
        (2.0 * PI - theta, Reflection::OneYear)
    } else {
        (theta, Reflection::None)
    };

    // Eccentric anomaly via tan(E/2), then Kepler's equation for the mean
    // anomaly.
    let eccentric = 2.0 * (((1.0 - e) / (1.0 + e)).sqrt() * (theta / 2.0).tan()).atan();
    let correction = e * (1.0 - e * e).sqrt() * theta.sin() / (1.0 + e * theta.cos());
    let t = (eccentric - correction) * year_length / (2.0 * PI);

    match reflection {
        Reflection::None => t,
        Reflection::OneYear => year_length - t,
        Reflection::TwoYears => 2.0 * year_length - t,
    }
}

/// The 26 unadjusted term instants without a domain check.
pub(crate) fn mean_terms(year: i32) -> [Time<JD>; TERMS_PER_TABLE] {
    let equinox = equinox_jde(year);
    let year_length = equinox_jde(year + 1) - equinox;

    let t = Time::<JD>::new(equinox).julian_millennia().value();
    let e = 0.016_708_634_2 - 0.000_420_365_4 * t - 0.000_012_673_4 * t.powi(2)
        + 0.000_000_144_4 * t.powi(3)
        - 0.000_000_000_2 * t.powi(4)
        + 0.000_000_000_3 * t.powi(5);

    let tt = f64::from(year) / 1000.0;
    let perihelion = (111.255_869_39 - 17.011_993_451_833_3 * tt
        - 0.044_091_890_166_673 * tt.powi(2)
        - 4.373_561_666_613_45e-4 * tt.powi(3)
        + 8.167_166_666_023_86e-6 * tt.powi(4))
    .to_radians();

    let step = 2.0 * PI / 24.0;
    let origin = time_since_perihelion(perihelion, e, year_length);
    std::array::from_fn(|i| {
        let theta = step * i as f64 + perihelion;
        Time::new(equinox + time_since_perihelion(theta, e, year_length) - origin)
    })
}

/// Mean (unperturbed, dynamical-time) instants of the 26 terms from the
/// March equinox of `year`.
pub fn mean_solar_terms(year: i32) -> Result<SolarTermSet> {
    check_year(year)?;
    Ok(SolarTermSet {
        year,
        first: 0,
        instants: mean_terms(year).to_vec(),
    })
}

/// Month argument of ΔT for a table index: the terms are spread over the
/// year from late March on.
#[inline]
fn delta_t_month(index: usize) -> f64 {
    ((index + 1) / 2) as f64 + 3.0
}

/// Adjusted instants for `indices` without the solar-term domain check.
///
/// The values are Universal Time expressed on the [`JD`] axis.
pub(crate) fn adjusted_terms(year: i32, indices: RangeInclusive<usize>) -> Result<Vec<Time<JD>>> {
    let mean = mean_terms(year);
    indices
        .map(|i| {
            let jd = mean[i];
            Ok(jd + perturbation(jd) - delta_t_days(year, delta_t_month(i))?)
        })
        .collect()
}

/// Perturbation- and ΔT-corrected instants for table indices
/// `start..=end`, as Julian Days on the Universal Time axis.
pub fn adjusted_solar_terms(year: i32, start: usize, end: usize) -> Result<SolarTermSet> {
    check_year(year)?;
    if start > end || end >= TERMS_PER_TABLE {
        return Err(CalendarError::Range {
            what: "solar-term index",
            value: end.max(start) as f64,
            min: 0.0,
            max: (TERMS_PER_TABLE - 1) as f64,
        });
    }
    Ok(SolarTermSet {
        year,
        first: start,
        instants: adjusted_terms(year, start..=end)?,
    })
}

/// The 26 terms from the Dongzhi before civil year `year` to the Xiaohan
/// after it, which cover every term falling inside the year.
///
/// Six terms of `year − 1` (Dongzhi to Jingzhe) are followed by terms 0–19
/// of `year`.  Localize with [`Time::to_offset`].
pub fn year_solar_terms(year: i32) -> Result<Vec<(SolarTerm, Time<UT>)>> {
    check_year(year)?;
    let previous = adjusted_terms(year - 1, 18..=23)?;
    let current = adjusted_terms(year, 0..=19)?;
    Ok((18..=23)
        .zip(previous)
        .chain((0..=19).zip(current))
        .map(|(i, t)| (SolarTerm::from_index(i), Time::<UT>::new(t.value())))
        .collect())
}
