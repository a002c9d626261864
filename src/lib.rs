// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Chinese lunisolar calendar (农历) computed from astronomical first
//! principles.
//!
//! # Pipeline
//!
//! ```text
//! civil date ──► Julian Day ──► solar terms ─┐
//!                    │                        ├─► lunar window ─► lunar date
//!                    └────────► new moons ────┘        │
//!                                                      └────────► four pillars
//! ```
//!
//! - [`civil`]: civil date-times on the Julian/Gregorian calendars and their
//!   Julian Days.
//! - [`delta_t`]: ΔT = TT − UT, Espenak & Meeus polynomials.
//! - [`perturbation`]: periodic correction of mean equinox/solstice instants.
//! - [`solar_term`]: the 24 solar terms of a year.
//! - [`new_moon`]: true new moons by lunation index.
//! - [`lunar_month`]: the months of a lunar year and its leap month.
//! - [`lunar`]: conversion between civil and lunar dates.
//! - [`sexagenary`]: stem–branch pillars of year, month, day and hour.
//! - [`ChineseCalendar`]: the same operations behind a per-year cache.
//!
//! # Time scales
//!
//! Instants are [`Time<S>`] values whose scale marker fixes their meaning:
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Day, dynamical time |
//! | [`UT`] | Universal Time (Earth rotation) |
//! | [`CST`] | China Standard Time civil clock |
//!
//! The solvers work in dynamical time; ΔT takes them to Universal Time and
//! a fixed +8 h to the Beijing civil clock on which lunar months and solar
//! terms are compared.
//!
//! # Example
//!
//! ```rust
//! use nongli::{gregorian_to_lunar, leap_month, sexagenary, LunarDate};
//!
//! assert_eq!(gregorian_to_lunar(2023, 1, 22).unwrap(), LunarDate::new(2023, 1, 1, false));
//! assert_eq!(leap_month(2023).unwrap(), 2);
//!
//! let pillars = sexagenary::cycle(2023, 1, 22, 12, 0, 0, false).unwrap();
//! // Lichun has not passed yet: still the Renyin year.
//! assert_eq!(pillars.year.to_string(), "Renyin");
//! ```

pub mod cache;
pub mod calendar;
pub mod civil;
pub mod config;
pub mod delta_t;
pub mod error;
pub(crate) mod instant;
mod julian_date_ext;
pub mod lunar;
pub mod lunar_month;
pub mod new_moon;
pub mod perturbation;
pub(crate) mod scales;
pub mod sexagenary;
pub mod solar_term;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use cache::TermCache;
pub use calendar::{ChineseCalendar, DayInfo};
pub use civil::{CalendarSystem, CivilDateTime};
pub use config::CalendarOptions;
pub use error::{CalendarError, Result};
pub use instant::{Time, TimeScale};
pub use lunar::{gregorian_to_lunar, leap_month, lunar_days, lunar_to_gregorian, LunarDate};
pub use lunar_month::{LunarWindow, MonthCode};
pub use scales::{CST, CST_OFFSET, JD, UT};
pub use sexagenary::{FourPillars, SexagenaryPair};
pub use solar_term::{SolarTerm, SolarTermSet};

/// Julian Day in dynamical time.
pub type JulianDate = Time<JD>;

/// Julian Day on the Beijing civil clock.
pub type BeijingTime = Time<CST>;
