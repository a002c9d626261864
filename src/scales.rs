// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! | Marker | Description | Relation to JD(TT) |
//! |--------|-------------|--------------------|
//! | [`JD`]  | Julian Day, dynamical time | identity |
//! | [`UT`]  | Julian Day, Universal Time | `JD − ΔT` |
//! | [`CST`] | China Standard Time civil clock | `JD − ΔT + 8 h` |
//!
//! The solar-term and new-moon formulas yield dynamical time ([`JD`]).  The
//! lunisolar calendar is defined on the civil clock of one fixed time zone,
//! so month and term boundaries are compared on [`CST`].

use super::instant::TimeScale;
use qtty::Days;

/// Julian Date on the Terrestrial Time axis, the identity scale.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// Universal Time, the civil time scale tied to Earth's rotation.
///
/// The conversion to JD(TT) adds **ΔT** from the polynomial model in
/// [`delta_t`](crate::delta_t); the inverse uses a three-iteration
/// fixed-point solver.  Outside the model's −1999..=3000 domain the value at
/// the nearest bound is used, since a scale conversion cannot fail.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_jd_tt(ut_value: Days) -> Days {
        ut_value + super::delta_t::delta_t_days_at(ut_value)
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        // dΔT/dJD is tiny, so the iteration converges immediately.
        let mut ut = jd_tt;
        for _ in 0..3 {
            ut = jd_tt - super::delta_t::delta_t_days_at(ut);
        }
        ut
    }
}

/// China Standard Time (UTC+8) civil clock on the Julian-day axis.
///
/// A value of this scale is `JD(UT) + 8 h`, so
/// [`Time::day_number`](super::instant::Time::day_number) yields the
/// Beijing civil day.  Lunar month boundaries are always compared here,
/// whatever offset the caller displays results in.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct CST;

/// Offset of the China Standard Time civil clock from UT.
pub const CST_OFFSET: Days = Days::new(8.0 / 24.0);

impl TimeScale for CST {
    const LABEL: &'static str = "CST";

    #[inline]
    fn to_jd_tt(value: Days) -> Days {
        UT::to_jd_tt(value - CST_OFFSET)
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        UT::from_jd_tt(jd_tt) + CST_OFFSET
    }
}

/// Generate pairwise `From<Time<A>> for Time<B>` implementations.
macro_rules! impl_time_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl From<super::instant::Time<$first>> for super::instant::Time<$rest> {
                #[inline]
                fn from(t: super::instant::Time<$first>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl From<super::instant::Time<$rest>> for super::instant::Time<$first> {
                #[inline]
                fn from(t: super::instant::Time<$rest>) -> Self {
                    t.to::<$first>()
                }
            }
        )+

        impl_time_conversions!($($rest),+);
    };
}

impl_time_conversions!(JD, UT, CST);
