// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): the TT↔UT correction
//!
//! Piecewise-polynomial model for **ΔT = TT − UT** after Espenak & Meeus,
//! *Five Millennium Canon of Solar Eclipses* (NASA/TP-2006-214141), the
//! expressions published at
//! <https://eclipse.gsfc.nasa.gov/SEhelp/deltatpoly2004.html>.
//!
//! The model is evaluated at the decimal year
//!
//! ```text
//! y = year + (month − 0.5) / 12
//! ```
//!
//! and split into thirteen year ranges, each with its own polynomial in a
//! normalized time variable.  The polynomials assume a lunar secular
//! acceleration of −26″/cy²; the Canon's ELP-2000/82 lunar ephemeris uses
//! −25.858″/cy², so a small correction `c = −0.000012932 (y − 1955)²` is
//! added outside 1955..2005, where the tabulated ΔT was derived
//! independently of any lunar ephemeris.
//!
//! ## Valid Time Range
//! −1999 to 3000.  Requests outside that range are rejected with
//! [`CalendarError::Range`] rather than extrapolated.
//!
//! ## Quick Example
//! ```rust
//! use nongli::delta_t::delta_t_seconds;
//!
//! let dt = delta_t_seconds(2000, 1.0).unwrap();
//! assert!((dt.value() - 63.87).abs() < 0.01);
//! ```

use super::instant::Time;
use super::scales::JD;
use crate::error::{CalendarError, Result};
use qtty::{Day, Days, Seconds};

/// Earliest year accepted by the model.
pub const MIN_YEAR: i32 = -1999;

/// Latest year accepted by the model.
pub const MAX_YEAR: i32 = 3000;

/// Evaluates `c0 + c1·t + c2·t² + …` by Horner's rule.
#[inline]
fn poly(t: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
}

/// Long-term parabola shared by the ranges before −500 and after 2150.
#[inline]
fn long_term(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// ΔT in seconds without the lunar-ephemeris correction.
fn uncorrected(year: i32, y: f64) -> f64 {
    match year {
        i32::MIN..=-501 => long_term(y),
        -500..=499 => poly(
            y / 100.0,
            &[
                10_583.6,
                -1_014.41,
                33.783_11,
                -5.952_053,
                -0.179_845_2,
                0.022_174_192,
                0.009_031_652_1,
            ],
        ),
        500..=1599 => poly(
            (y - 1000.0) / 100.0,
            &[
                1_574.2,
                -556.01,
                71.234_72,
                0.319_781,
                -0.850_346_3,
                -0.005_050_998,
                0.008_357_207_3,
            ],
        ),
        1600..=1699 => poly(y - 1600.0, &[120.0, -0.9808, -0.01532, 1.0 / 7129.0]),
        1700..=1799 => poly(
            y - 1700.0,
            &[8.83, 0.1603, -0.005_928_5, 0.000_133_36, -1.0 / 1_174_000.0],
        ),
        1800..=1859 => poly(
            y - 1800.0,
            &[
                13.72,
                -0.332_447,
                0.006_861_2,
                0.004_111_6,
                -0.000_374_36,
                0.000_012_127_2,
                -0.000_000_169_9,
                0.000_000_000_875,
            ],
        ),
        1860..=1899 => poly(
            y - 1860.0,
            &[
                7.62,
                0.5737,
                -0.251_754,
                0.016_806_68,
                -0.000_447_362_4,
                1.0 / 233_174.0,
            ],
        ),
        1900..=1919 => poly(
            y - 1900.0,
            &[-2.79, 1.494_119, -0.059_893_9, 0.006_196_6, -0.000_197],
        ),
        1920..=1940 => poly(y - 1920.0, &[21.2, 0.844_93, -0.0761, 0.002_093_6]),
        1941..=1960 => poly(y - 1950.0, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0]),
        1961..=1985 => poly(y - 1975.0, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0]),
        1986..=2004 => poly(
            y - 2000.0,
            &[
                63.86,
                0.3345,
                -0.060_374,
                0.001_727_5,
                0.000_651_814,
                0.000_023_735_99,
            ],
        ),
        2005..=2049 => poly(y - 2000.0, &[62.92, 0.322_17, 0.005_589]),
        2050..=2149 => long_term(y) - 0.5628 * (2150.0 - y),
        _ => long_term(y),
    }
}

/// Lunar-ephemeris correction applied outside 1955..2005.
#[inline]
fn ephemeris_correction(year: i32, y: f64) -> f64 {
    if (1955..2005).contains(&year) {
        0.0
    } else {
        -0.000_012_932 * (y - 1955.0) * (y - 1955.0)
    }
}

fn check_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::year_range("ΔT year", year, MIN_YEAR, MAX_YEAR))
    }
}

/// Returns **ΔT** in seconds for the given year and (fractional) month.
///
/// `month` may lie outside 1..=12: month 0 is December and month −1 is
/// November of the previous year, which is how the new-moon table reaches
/// back before January.
pub fn delta_t_seconds(year: i32, month: f64) -> Result<Seconds> {
    check_year(year)?;
    let y = f64::from(year) + (month - 0.5) / 12.0;
    Ok(Seconds::new(
        uncorrected(year, y) + ephemeris_correction(year, y),
    ))
}

/// ΔT in minutes.
pub fn delta_t_minutes(year: i32, month: f64) -> Result<f64> {
    Ok(delta_t_seconds(year, month)?.value() / 60.0)
}

/// ΔT in days, the unit the solar-term and new-moon pipelines subtract.
pub fn delta_t_days(year: i32, month: f64) -> Result<Days> {
    Ok(delta_t_seconds(year, month)?.to::<Day>())
}

/// ΔT for an arbitrary Julian Day, used by the [`UT`](crate::UT) scale.
///
/// The year is clamped into the model domain so that scale conversions stay
/// total.
pub(crate) fn delta_t_days_at(jd: Days) -> Days {
    let y = Time::<JD>::from_days(jd).decimal_year();
    let clamped = y.clamp(f64::from(MIN_YEAR), f64::from(MAX_YEAR) + 0.999);
    let year = clamped.floor() as i32;
    let seconds = uncorrected(year, clamped) + ephemeris_correction(year, clamped);
    Seconds::new(seconds).to::<Day>()
}
