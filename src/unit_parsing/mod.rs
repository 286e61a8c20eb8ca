// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into frequencies, which may have a unit attached.

mod error;

pub use error::UnitParseError;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumString, IntoStaticStr)]
#[allow(non_camel_case_types)]
pub enum FreqFormat {
    /// Hertz
    Hz,

    /// kiloHertz
    kHz,

    /// MegaHertz
    MHz,

    /// GigaHertz
    GHz,

    /// A bare number, which is treated as Hertz.
    NoUnit,
}

impl FreqFormat {
    /// The number of Hz in one of this unit.
    pub fn hz_per_unit(self) -> f64 {
        match self {
            FreqFormat::Hz | FreqFormat::NoUnit => 1.0,
            FreqFormat::kHz => 1e3,
            FreqFormat::MHz => 1e6,
            FreqFormat::GHz => 1e9,
        }
    }
}

/// Parse a string that may have a unit of frequency attached to it.
pub fn parse_freq(s: &str) -> Result<(f64, FreqFormat), UnitParseError> {
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return Ok((number, FreqFormat::NoUnit));
    };

    // That didn't work; let's search over our supported formats.
    let suffix = s
        .trim()
        .trim_start_matches(|c| char::is_numeric(c) || c == '.')
        .trim();
    for freq_format in FreqFormat::iter().filter(|&ff| ff != FreqFormat::NoUnit) {
        let freq_format_str: &'static str = freq_format.into();
        if suffix.to_uppercase() == freq_format_str.to_uppercase() {
            let prefix = s.trim().trim_end_matches(char::is_alphabetic).trim();
            let number: f64 = match prefix.parse() {
                Ok(n) => n,
                Err(_) => {
                    return Err(UnitParseError::GotFreqUnitButCantParse {
                        input: s.to_string(),
                        unit: freq_format_str,
                    })
                }
            };
            return Ok((number, freq_format));
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type: "frequency",
    })
}

/// Parse a frequency string into a whole number of Hz. Fractional Hz are
/// rounded to the nearest integer, so that the same input always lands on the
/// same value.
pub fn parse_freq_hz(s: &str) -> Result<u64, UnitParseError> {
    let (number, freq_format) = parse_freq(s)?;
    freq_to_hz(number * freq_format.hz_per_unit()).ok_or_else(|| {
        UnitParseError::NotAFrequency {
            input: s.to_string(),
        }
    })
}

/// Round a frequency [Hz] to an integer, if it's finite, non-negative and
/// representable.
fn freq_to_hz(freq: f64) -> Option<u64> {
    let rounded = freq.round();
    // 2^64 is exactly representable; anything at or above it doesn't fit.
    if rounded.is_finite() && rounded >= 0.0 && rounded < u64::MAX as f64 {
        Some(rounded as u64)
    } else {
        None
    }
}

/// Format a frequency [Hz] with the largest unit that keeps it at or above 1,
/// e.g. "97.1 MHz".
pub(crate) fn display_freq(freq_hz: u64) -> String {
    let freq_format = [FreqFormat::GHz, FreqFormat::MHz, FreqFormat::kHz]
        .into_iter()
        .find(|ff| freq_hz as f64 >= ff.hz_per_unit())
        .unwrap_or(FreqFormat::Hz);
    let unit: &'static str = freq_format.into();
    let number = format!("{:.9}", freq_hz as f64 / freq_format.hz_per_unit());
    let number = number.trim_end_matches('0').trim_end_matches('.');
    format!("{number} {unit}")
}
