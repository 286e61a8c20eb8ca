// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Both the `plan` and `table`
//! subcommands need a spectral window, so the window arguments are shared
//! between them.

mod printers;
#[cfg(test)]
mod tests;

pub(crate) use printers::{display_warnings, InfoPrinter, Warn};

use clap::Parser;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    constants::{DEFAULT_CHANNEL_WIDTH_HZ, DEFAULT_END_FREQ_HZ, DEFAULT_START_FREQ_HZ},
    planner::{ConfigurationError, SpectralWindow},
    unit_parsing::{display_freq, parse_freq_hz, UnitParseError},
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref START_FREQ_HELP: String =
        format!("The lowest frequency of the spectral window, and the first channel frequency. Units may be given (e.g. 88MHz); bare numbers are Hz. Default: {}", display_freq(DEFAULT_START_FREQ_HZ));

    static ref END_FREQ_HELP: String =
        format!("The frequency just above the top of the spectral window; it is not a channel itself. Must be a whole, even number of channel widths above the start frequency. Default: {}", display_freq(DEFAULT_END_FREQ_HZ));

    static ref CHANNEL_WIDTH_HELP: String =
        format!("The width of each synthesizer channel, which is also the sample rate of each modulated carrier. Default: {}", display_freq(DEFAULT_CHANNEL_WIDTH_HZ));
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(MulticarrierError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(MulticarrierError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(MulticarrierError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Frequencies in argument files may be written either as strings with units
/// ("97.1 MHz") or as bare numbers of Hz.
#[derive(Deserialize)]
#[serde(untagged)]
enum FreqValue {
    Int(u64),
    Float(f64),
    Str(String),
}

impl From<FreqValue> for String {
    fn from(v: FreqValue) -> String {
        match v {
            FreqValue::Int(i) => i.to_string(),
            FreqValue::Float(f) => f.to_string(),
            FreqValue::Str(s) => s,
        }
    }
}

pub(super) fn deserialize_freq<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FreqValue>::deserialize(deserializer)?.map(String::from))
}

pub(super) fn deserialize_freqs<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FreqValue>>::deserialize(deserializer)?
        .map(|v| v.into_iter().map(String::from).collect()))
}

#[derive(Parser, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct WindowArgs {
    #[clap(long, help = START_FREQ_HELP.as_str(), help_heading = "SPECTRAL WINDOW")]
    #[serde(default, deserialize_with = "deserialize_freq")]
    pub(super) start_freq: Option<String>,

    #[clap(long, help = END_FREQ_HELP.as_str(), help_heading = "SPECTRAL WINDOW")]
    #[serde(default, deserialize_with = "deserialize_freq")]
    pub(super) end_freq: Option<String>,

    #[clap(long, alias = "bband-rate", help = CHANNEL_WIDTH_HELP.as_str(), help_heading = "SPECTRAL WINDOW")]
    #[serde(default, alias = "bband_rate", deserialize_with = "deserialize_freq")]
    pub(super) channel_width: Option<String>,
}

impl WindowArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            start_freq: self.start_freq.or(other.start_freq),
            end_freq: self.end_freq.or(other.end_freq),
            channel_width: self.channel_width.or(other.channel_width),
        }
    }

    pub(super) fn parse(self) -> Result<SpectralWindow, WindowArgsError> {
        let WindowArgs {
            start_freq,
            end_freq,
            channel_width,
        } = self;

        let parse = |arg: &'static str, value: Option<String>, default: u64| match value {
            Some(s) => parse_freq_hz(&s).map_err(|err| WindowArgsError::Parse { arg, err }),
            None => Ok(default),
        };
        let start_freq_hz = parse("start frequency", start_freq, DEFAULT_START_FREQ_HZ)?;
        let end_freq_hz = parse("end frequency", end_freq, DEFAULT_END_FREQ_HZ)?;
        let channel_width_hz = parse("channel width", channel_width, DEFAULT_CHANNEL_WIDTH_HZ)?;
        debug!("Window: {start_freq_hz} Hz to {end_freq_hz} Hz in {channel_width_hz} Hz channels");

        let window = SpectralWindow::new(start_freq_hz, end_freq_hz, channel_width_hz)?;

        let mut printer = InfoPrinter::new("Spectral window".into());
        printer.push_block(vec![
            format!(
                "{} to {}",
                display_freq(window.start_freq_hz()),
                display_freq(window.end_freq_hz())
            )
            .into(),
            format!("centred on {}", display_freq(window.centre_freq_hz())).into(),
        ]);
        printer.push_line(
            format!(
                "{} channels of {}",
                window.num_channels(),
                display_freq(window.channel_width_hz())
            )
            .into(),
        );
        printer.display();

        Ok(window)
    }
}

#[derive(Error, Debug)]
pub(super) enum WindowArgsError {
    #[error("Couldn't parse the {arg}: {err}")]
    Parse {
        arg: &'static str,
        err: UnitParseError,
    },

    #[error(transparent)]
    Window(#[from] ConfigurationError),
}
