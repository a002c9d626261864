// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # New moons (朔)
//!
//! Instants of true new moon after Meeus, *Astronomical Algorithms*
//! (1991), ch. 47 (ch. 49 in the 2nd edition).  Lunations are counted by a
//! signed index `k` from the new moon of 2000-01-06:
//!
//! ```text
//! JDE(k) = 2451550.09765 + 29.530588853·k + 0.0001337·T² − …
//! ```
//!
//! refined by 25 periodic terms in the Sun's and Moon's mean anomalies, the
//! Moon's argument of latitude and the longitude of its ascending node, and
//! 14 planetary arguments.  Results are dynamical time ([`JD`]).
//!
//! ```rust
//! use nongli::new_moon::{reference_synodic_month_index, true_new_moon};
//! use nongli::{Time, JD};
//!
//! let k = reference_synodic_month_index(Time::<JD>::J2000);
//! let nm = true_new_moon(k + 1);
//! assert!((nm.value() - 2_451_550.26).abs() < 0.01);
//! ```

use qtty::{Days, Simplify};

use super::instant::Time;
use super::scales::JD;

/// Mean length of the synodic month.
pub const SYNODIC_MONTH: Days = Days::new(29.530_588_853);

/// Mean new moon of lunation 0 (2000-01-06).
pub const NEW_MOON_EPOCH: Time<JD> = Time::new(2_451_550.097_650_462_8);

#[inline]
fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

/// Lunation index of the mean new moon at or before `jd`.
pub fn reference_synodic_month_index(jd: Time<JD>) -> i64 {
    ((jd - NEW_MOON_EPOCH) / SYNODIC_MONTH).simplify().value().floor() as i64
}

/// Mean new moon of lunation `k`, with the secular quartic but no periodic
/// terms.
pub fn mean_time_of_phase(k: i64) -> Time<JD> {
    let mean = NEW_MOON_EPOCH + SYNODIC_MONTH * k as f64;
    let t = mean.julian_centuries().value();
    mean + Days::new(0.000_133_7 * t.powi(2) - 0.000_000_15 * t.powi(3)
        + 0.000_000_000_73 * t.powi(4))
}

/// Instant of true new moon of lunation `k`.
pub fn true_new_moon(k: i64) -> Time<JD> {
    let kf = k as f64;
    let t = (NEW_MOON_EPOCH + SYNODIC_MONTH * kf).julian_centuries().value();
    let (t2, t3, t4) = (t * t, t.powi(3), t.powi(4));

    // Sun's mean anomaly, Moon's mean anomaly, Moon's argument of latitude
    // and longitude of the ascending node, in degrees.
    let m = 2.5534 + 29.105_356_69 * kf - 0.000_021_8 * t2 - 0.000_000_11 * t3;
    let mp = 201.5643 + 385.816_935_28 * kf + 0.010_743_8 * t2 + 0.000_012_39 * t3
        - 0.000_000_058 * t4;
    let f = 160.7108 + 390.670_502_74 * kf - 0.001_634_1 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4;
    let omega = 124.7746 - 1.563_755_8 * kf + 0.002_069_1 * t2 + 0.000_002_15 * t3;

    // Eccentricity of Earth's orbit.
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    #[rustfmt::skip]
    let lunar = -0.4072 * sin_deg(mp)
        + 0.17241 * e * sin_deg(m)
        + 0.01608 * sin_deg(2.0 * mp)
        + 0.01039 * sin_deg(2.0 * f)
        + 0.00739 * e * sin_deg(mp - m)
        - 0.00514 * e * sin_deg(mp + m)
        + 0.00208 * e * e * sin_deg(2.0 * m)
        - 0.00111 * sin_deg(mp - 2.0 * f)
        - 0.00057 * sin_deg(mp + 2.0 * f)
        + 0.00056 * e * sin_deg(2.0 * mp + m)
        - 0.00042 * sin_deg(3.0 * mp)
        + 0.00042 * e * sin_deg(m + 2.0 * f)
        + 0.00038 * e * sin_deg(m - 2.0 * f)
        - 0.00024 * e * sin_deg(2.0 * mp - m)
        - 0.00017 * sin_deg(omega)
        - 0.00007 * sin_deg(mp + 2.0 * m)
        + 0.00004 * sin_deg(2.0 * mp - 2.0 * f)
        + 0.00004 * sin_deg(3.0 * m)
        + 0.00003 * sin_deg(mp + m - 2.0 * f)
        + 0.00003 * sin_deg(2.0 * mp + 2.0 * f)
        - 0.00003 * sin_deg(mp + m + 2.0 * f)
        + 0.00003 * sin_deg(mp - m + 2.0 * f)
        - 0.00002 * sin_deg(mp - m - 2.0 * f)
        - 0.00002 * sin_deg(3.0 * mp + m)
        + 0.00002 * sin_deg(4.0 * mp);

    #[rustfmt::skip]
    let planetary = 0.000325 * sin_deg(299.77 + 0.107408 * kf - 0.009173 * t2)
        + 0.000165 * sin_deg(251.88 + 0.016321 * kf)
        + 0.000164 * sin_deg(251.83 + 26.651886 * kf)
        + 0.000126 * sin_deg(349.42 + 36.412478 * kf)
        + 0.000110 * sin_deg(84.66 + 18.206239 * kf)
        + 0.000062 * sin_deg(141.74 + 53.303771 * kf)
        + 0.000060 * sin_deg(207.14 + 2.453732 * kf)
        + 0.000056 * sin_deg(154.84 + 7.306860 * kf)
        + 0.000047 * sin_deg(34.52 + 27.261239 * kf)
        + 0.000042 * sin_deg(207.19 + 0.121824 * kf)
        + 0.000040 * sin_deg(291.34 + 1.844379 * kf)
        + 0.000037 * sin_deg(161.72 + 24.198154 * kf)
        + 0.000035 * sin_deg(239.56 + 25.513099 * kf)
        + 0.000023 * sin_deg(331.55 + 3.592518 * kf);

    mean_time_of_phase(k) + Days::new(lunar + planetary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lunation_zero() {
        assert!((true_new_moon(0).value() - 2_451_550.260_248_251_3).abs() < 1e-8);
    }

    #[test]
    fn mean_phase_is_close_to_epoch_grid() {
        let mean = mean_time_of_phase(100);
        let grid = NEW_MOON_EPOCH + SYNODIC_MONTH * 100.0;
        assert!((mean - grid).abs() < Days::new(1e-5));
    }

    #[test]
    fn meeus_example_49a() {
        // New moon of 1977 February, k = −283: JDE 2443192.65118.
        assert!((true_new_moon(-283).value() - 2_443_192.651_18).abs() < 1e-4);
    }

    #[test]
    fn reference_index() {
        assert_eq!(reference_synodic_month_index(NEW_MOON_EPOCH), 0);
        assert_eq!(
            reference_synodic_month_index(NEW_MOON_EPOCH - Days::new(1.0)),
            -1
        );
        let k = reference_synodic_month_index(Time::new(2_459_966.5));
        assert_eq!(k, 285);
    }

    #[test]
    fn true_moons_are_spaced_like_synodic_months() {
        let mut previous = true_new_moon(-37_000);
        for k in (-37_000..12_500).step_by(97).skip(1) {
            let here = true_new_moon(k);
            let gap = (here - true_new_moon(k - 1)).value();
            assert!((29.26..29.84).contains(&gap), "k = {k}: gap {gap}");
            assert!(here > previous);
            previous = here;
        }
    }
}
