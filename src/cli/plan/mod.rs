// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plan the synthesizer channels for a set of carriers, and work out how the
//! rest of the signal chain must be configured.


use std::{collections::HashSet, path::PathBuf};

use clap::Parser;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vec1::Vec1;

use super::common::{
    deserialize_freq, deserialize_freqs, display_warnings, InfoPrinter, Warn, WindowArgs,
    ARG_FILE_HELP,
};
use crate::{
    constants::{DEFAULT_AUDIO_RATE_HZ, DEFAULT_FREQUENCIES_HZ, DEFAULT_MAX_DEVIATION_HZ},
    flowgraph::{Carrier, RationalResampler},
    io::{can_write_to_file, PlanOutputType, PlanWriteError, PLAN_OUTPUT_EXTENSIONS},
    params::PlanParams,
    unit_parsing::{display_freq, parse_freq, parse_freq_hz, UnitParseError},
    MulticarrierError,
};

lazy_static::lazy_static! {
    static ref FREQUENCIES_HELP: String =
        format!("The frequency of each carrier, in synthesizer input order. Each must be one of the window's channel frequencies. Units may be given (e.g. 96.2MHz); bare numbers are Hz. Default: {}",
                DEFAULT_FREQUENCIES_HZ.iter().map(|&f| display_freq(f)).join(", "));

    static ref AUDIO_RATE_HELP: String =
        format!("The sample rate of each carrier's audio. Default: {}", display_freq(DEFAULT_AUDIO_RATE_HZ));

    static ref MAX_DEVIATION_HELP: String =
        format!("The peak frequency deviation of each carrier at full-scale audio. Default: {} kHz", DEFAULT_MAX_DEVIATION_HZ / 1e3);

    static ref OUTPUT_HELP: String =
        format!("Write the plan to this file. Supported formats: {}", *PLAN_OUTPUT_EXTENSIONS);
}

#[derive(Parser, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct PlanCliArgs {
    /// The number of carriers. If given, it must match the number of
    /// frequencies.
    #[clap(short = 'n', long, help_heading = "CARRIERS")]
    pub(super) num_carriers: Option<usize>,

    #[clap(
        short,
        long,
        multiple_values(true),
        help = FREQUENCIES_HELP.as_str(),
        help_heading = "CARRIERS"
    )]
    #[serde(default, deserialize_with = "deserialize_freqs")]
    pub(super) frequencies: Option<Vec<String>>,

    /// The constant gain applied to each modulated carrier, in the same order
    /// as the frequencies. Default: 1 / (number of carriers) each
    #[clap(short, long, multiple_values(true), help_heading = "CARRIERS")]
    pub(super) amplitudes: Option<Vec<f64>>,

    #[clap(long, help = AUDIO_RATE_HELP.as_str(), help_heading = "SIGNAL CHAIN")]
    #[serde(default, deserialize_with = "deserialize_freq")]
    pub(super) audio_rate: Option<String>,

    #[clap(long, help = MAX_DEVIATION_HELP.as_str(), help_heading = "SIGNAL CHAIN")]
    #[serde(default, deserialize_with = "deserialize_freq")]
    pub(super) max_deviation: Option<String>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl PlanCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            num_carriers: self.num_carriers.or(other.num_carriers),
            frequencies: self.frequencies.or(other.frequencies),
            amplitudes: self.amplitudes.or(other.amplitudes),
            audio_rate: self.audio_rate.or(other.audio_rate),
            max_deviation: self.max_deviation.or(other.max_deviation),
            output: self.output.or(other.output),
        }
    }
}

#[derive(Parser, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct PlanArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "window")]
    #[serde(default)]
    pub(super) window_args: WindowArgs,

    #[clap(flatten)]
    #[serde(rename = "carriers")]
    #[serde(default)]
    pub(super) plan_args: PlanCliArgs,
}

impl PlanArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<PlanArgs, MulticarrierError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let PlanArgs {
                args_file: _,
                window_args,
                plan_args,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(PlanArgs {
                args_file: None,
                window_args: cli_args.window_args.merge(window_args),
                plan_args: cli_args.plan_args.merge(plan_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<PlanParams, MulticarrierError> {
        debug!("{:#?}", self);

        // Expose all the struct fields to ensure they're all used.
        let PlanArgs {
            args_file: _,
            window_args,
            plan_args:
                PlanCliArgs {
                    num_carriers,
                    frequencies,
                    amplitudes,
                    audio_rate,
                    max_deviation,
                    output,
                },
        } = self;

        let window = window_args.parse()?;

        // Carrier frequencies.
        let freqs_hz = match frequencies {
            Some(freqs) => freqs
                .into_iter()
                .map(|s| {
                    parse_freq_hz(&s).map_err(|err| PlanArgsError::ParseFrequency { input: s, err })
                })
                .collect::<Result<Vec<u64>, _>>()?,
            None => DEFAULT_FREQUENCIES_HZ.to_vec(),
        };
        let freqs_hz = Vec1::try_from_vec(freqs_hz).map_err(|_| PlanArgsError::NoFrequencies)?;
        if let Some(n) = num_carriers {
            if n != freqs_hz.len() {
                return Err(PlanArgsError::FrequencyListMismatch {
                    num_carriers: n,
                    num_frequencies: freqs_hz.len(),
                }
                .into());
            }
        }
        let num_carriers = freqs_hz.len();

        // Amplitudes.
        let amplitudes = match amplitudes {
            Some(amps) => {
                if amps.len() != num_carriers {
                    return Err(PlanArgsError::AmplitudeListMismatch {
                        num_carriers,
                        num_amplitudes: amps.len(),
                    }
                    .into());
                }
                if let Some(&amp) = amps.iter().find(|a| !a.is_finite()) {
                    return Err(PlanArgsError::AmplitudeNotFinite(amp).into());
                }
                amps
            }
            None => vec![1.0 / num_carriers as f64; num_carriers],
        };

        // Signal chain.
        let audio_rate_hz = match audio_rate {
            Some(s) => parse_freq_hz(&s).map_err(PlanArgsError::ParseAudioRate)?,
            None => DEFAULT_AUDIO_RATE_HZ,
        };
        if audio_rate_hz == 0 {
            return Err(PlanArgsError::ZeroAudioRate.into());
        }
        let max_deviation_hz = match max_deviation {
            Some(s) => {
                let (number, freq_format) =
                    parse_freq(&s).map_err(PlanArgsError::ParseMaxDeviation)?;
                let max_dev = number * freq_format.hz_per_unit();
                if !max_dev.is_finite() || max_dev <= 0.0 {
                    return Err(PlanArgsError::BadMaxDeviation(s).into());
                }
                max_dev
            }
            None => DEFAULT_MAX_DEVIATION_HZ,
        };

        // Output file.
        let output = match output {
            Some(file) => {
                let output_type = PlanOutputType::from_path(&file).map_err(PlanArgsError::Output)?;
                can_write_to_file(&file).map_err(PlanArgsError::Output)?;
                Some((file, output_type))
            }
            None => None,
        };

        // Things that are allowed, but probably not wanted.
        let mut seen = HashSet::with_capacity(num_carriers);
        let duplicates = freqs_hz
            .iter()
            .filter(|f| !seen.insert(**f))
            .unique()
            .map(|&f| display_freq(f))
            .join(", ");
        if !duplicates.is_empty() {
            format!("These frequencies were requested more than once, so their carriers share a channel: {duplicates}").warn();
        }
        if num_carriers > window.num_channels() {
            [
                format!(
                    "There are {num_carriers} carriers, but only {} synthesizer channels.",
                    window.num_channels()
                )
                .into(),
                "The extra carriers won't be transmitted.".into(),
            ]
            .warn();
        }
        // Carson's rule puts most of a WBFM carrier's power within twice the
        // peak deviation (plus the audio bandwidth).
        if (window.channel_width_hz() as f64) < 2.0 * max_deviation_hz {
            format!(
                "The channel width ({}) is less than twice the maximum deviation ({} kHz); carriers will spill into neighbouring channels",
                display_freq(window.channel_width_hz()),
                max_deviation_hz / 1e3
            )
            .warn();
        }
        let total_amplitude: f64 = amplitudes.iter().map(|a| a.abs()).sum();
        if total_amplitude > 1.0 {
            format!("The carrier amplitudes sum to {total_amplitude}; the combined signal may clip")
                .warn();
        }

        let carriers = freqs_hz
            .iter()
            .zip(amplitudes)
            .map(|(&freq_hz, amplitude)| Carrier { freq_hz, amplitude })
            .collect::<Vec<_>>();
        let carriers = Vec1::try_from_vec(carriers).map_err(|_| PlanArgsError::NoFrequencies)?;

        let mut printer = InfoPrinter::new("Carriers".into());
        printer.push_line(format!("{num_carriers} carriers").into());
        match RationalResampler::new(audio_rate_hz, window.channel_width_hz()) {
            Some(r) => printer.push_block(vec![
                format!("Audio at {}", display_freq(audio_rate_hz)).into(),
                format!(
                    "resampled by {}/{} to {}",
                    r.interpolation,
                    r.decimation,
                    display_freq(window.channel_width_hz())
                )
                .into(),
            ]),
            None => trace!("No resampler for a {audio_rate_hz} Hz audio rate"),
        }
        printer.push_line(format!("Maximum deviation: {} kHz", max_deviation_hz / 1e3).into());
        if let Some((file, _)) = &output {
            printer.push_line(format!("Writing the plan to {}", file.display()).into());
        }
        printer.display();

        display_warnings();

        Ok(PlanParams {
            window,
            carriers,
            audio_rate_hz,
            max_deviation_hz,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), MulticarrierError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub(super) enum PlanArgsError {
    #[error("No carrier frequencies were given")]
    NoFrequencies,

    #[error("Couldn't parse carrier frequency '{input}': {err}")]
    ParseFrequency { input: String, err: UnitParseError },

    #[error("{num_carriers} carriers were asked for, but {num_frequencies} frequencies were given")]
    FrequencyListMismatch {
        num_carriers: usize,
        num_frequencies: usize,
    },

    #[error("There are {num_carriers} carriers, but {num_amplitudes} amplitudes were given")]
    AmplitudeListMismatch {
        num_carriers: usize,
        num_amplitudes: usize,
    },

    #[error("Carrier amplitudes must be finite, but got {0}")]
    AmplitudeNotFinite(f64),

    #[error("Couldn't parse the audio rate: {0}")]
    ParseAudioRate(UnitParseError),

    #[error("The audio rate cannot be 0")]
    ZeroAudioRate,

    #[error("Couldn't parse the maximum deviation: {0}")]
    ParseMaxDeviation(UnitParseError),

    #[error("The maximum deviation must be a positive frequency, but got '{0}'")]
    BadMaxDeviation(String),

    #[error(transparent)]
    Output(PlanWriteError),
}
