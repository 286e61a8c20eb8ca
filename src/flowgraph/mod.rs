// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Settings for the signal chain that turns audio streams into one wideband
//! multicarrier FM signal.
//!
//! Each audio stream is resampled up to the channel width, frequency modulated,
//! scaled by a constant gain and fed into one input of a polyphase synthesizer.
//! None of that signal processing happens here; this module only describes
//! how each stage must be configured, and which synthesizer channel each
//! carrier lands on.


use std::f64::consts::TAU;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::planner::{plan_channels, ChannelMap, SpectralWindow, UnresolvedFrequencyError};

/// A carrier that should be transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub freq_hz: u64,

    /// The constant gain applied to the modulated carrier.
    pub amplitude: f64,
}

/// Resample by `interpolation / decimation`. Both are reduced by their greatest
/// common divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationalResampler {
    pub interpolation: u64,
    pub decimation: u64,
}

impl RationalResampler {
    /// Get the resampler that converts `input_rate_hz` to `output_rate_hz`.
    /// Returns `None` if either rate is 0.
    pub fn new(input_rate_hz: u64, output_rate_hz: u64) -> Option<RationalResampler> {
        if input_rate_hz == 0 || output_rate_hz == 0 {
            return None;
        }
        let g = gcd(input_rate_hz, output_rate_hz);
        Some(RationalResampler {
            interpolation: output_rate_hz / g,
            decimation: input_rate_hz / g,
        })
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Everything needed to configure the chain for a single carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierChain {
    /// The synthesizer input that this carrier is fed into.
    pub port: usize,

    pub freq_hz: u64,

    /// The synthesizer channel this carrier lands on. `None` if there are more
    /// carriers than synthesizer channels and this one doesn't fit.
    pub channel: Option<usize>,

    pub amplitude: f64,

    /// Audio rate -> channel width.
    pub resampler: RationalResampler,

    /// The FM modulator's sensitivity [radians per sample per unit amplitude].
    pub fm_sensitivity: f64,
}

/// How the polyphase synthesizer must be configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizerConfig {
    pub num_channels: usize,

    /// The channel for each synthesizer input.
    pub channel_map: ChannelMap,

    /// The sample rate of the combined output.
    pub output_rate_hz: u64,

    /// The frequency at the centre of the combined output.
    pub centre_freq_hz: u64,

    /// The number of synthesizer inputs without a carrier; these are fed
    /// silence.
    pub num_idle_inputs: usize,
}

/// The sensitivity of an FM modulator running at `sample_rate_hz` that swings
/// a full-scale input by `max_deviation_hz`.
pub fn fm_sensitivity(max_deviation_hz: f64, sample_rate_hz: u64) -> f64 {
    TAU * max_deviation_hz / sample_rate_hz as f64
}

/// A complete description of a multicarrier transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmitPlan {
    pub window: SpectralWindow,
    pub audio_rate_hz: u64,
    pub max_deviation_hz: f64,
    pub synthesizer: SynthesizerConfig,
    pub carriers: Vec<CarrierChain>,
}

impl TransmitPlan {
    /// Plan the synthesizer channels for `carriers` and work out how every
    /// stage of the chain must be configured. `audio_rate_hz` must not be 0.
    pub fn new(
        window: SpectralWindow,
        carriers: &[Carrier],
        audio_rate_hz: u64,
        max_deviation_hz: f64,
    ) -> Result<TransmitPlan, UnresolvedFrequencyError> {
        let requests_hz: Vec<u64> = carriers.iter().map(|c| c.freq_hz).collect();
        let channel_map = plan_channels(&window, &requests_hz)?;

        let num_channels = window.num_channels();
        let channel_width_hz = window.channel_width_hz();
        // The window's channel width is never 0, so this only fails on a 0
        // audio rate; fall back to passing samples through untouched.
        let resampler = RationalResampler::new(audio_rate_hz, channel_width_hz).unwrap_or(
            RationalResampler {
                interpolation: 1,
                decimation: 1,
            },
        );
        debug!(
            "Resampling audio by {}/{}",
            resampler.interpolation, resampler.decimation
        );
        let sensitivity = fm_sensitivity(max_deviation_hz, channel_width_hz);

        let carriers = carriers
            .iter()
            .enumerate()
            .map(|(port, c)| CarrierChain {
                port,
                freq_hz: c.freq_hz,
                channel: (port < num_channels).then(|| channel_map[port]),
                amplitude: c.amplitude,
                resampler,
                fm_sensitivity: sensitivity,
            })
            .collect::<Vec<_>>();

        Ok(TransmitPlan {
            window,
            audio_rate_hz,
            max_deviation_hz,
            synthesizer: SynthesizerConfig {
                num_channels,
                output_rate_hz: window.output_rate_hz(),
                centre_freq_hz: window.centre_freq_hz(),
                num_idle_inputs: num_channels - carriers.len().min(num_channels),
                channel_map,
            },
            carriers,
        })
    }
}

/// The polyphase synthesizer, as far as channel planning is concerned.
pub trait ChannelSynthesizer {
    /// Route each synthesizer input to the channel at the same position in
    /// `map`.
    fn set_channel_map(&mut self, map: &ChannelMap);
}

/// Keeps a synthesizer's channel routing in step with the requested carrier
/// frequencies.
///
/// Every change re-plans from scratch. If planning fails, the previous
/// frequencies and channel map stay in place and the synthesizer isn't
/// touched.
pub struct Transmitter<S: ChannelSynthesizer> {
    window: SpectralWindow,
    requests_hz: Vec<u64>,
    channel_map: ChannelMap,
    synthesizer: S,
}

impl<S: ChannelSynthesizer> Transmitter<S> {
    pub fn new(
        window: SpectralWindow,
        requests_hz: Vec<u64>,
        mut synthesizer: S,
    ) -> Result<Transmitter<S>, UnresolvedFrequencyError> {
        let channel_map = plan_channels(&window, &requests_hz)?;
        synthesizer.set_channel_map(&channel_map);
        Ok(Transmitter {
            window,
            requests_hz,
            channel_map,
            synthesizer,
        })
    }

    /// Move the carriers to new frequencies.
    pub fn set_frequencies(
        &mut self,
        requests_hz: Vec<u64>,
    ) -> Result<&ChannelMap, UnresolvedFrequencyError> {
        let channel_map = plan_channels(&self.window, &requests_hz)?;
        debug!("Re-planned channels for {} carriers", requests_hz.len());
        self.requests_hz = requests_hz;
        self.apply(channel_map);
        Ok(&self.channel_map)
    }

    /// Use a different spectral window for the current frequencies.
    pub fn set_window(
        &mut self,
        window: SpectralWindow,
    ) -> Result<&ChannelMap, UnresolvedFrequencyError> {
        let channel_map = plan_channels(&window, &self.requests_hz)?;
        debug!("Re-planned channels for a new spectral window");
        self.window = window;
        self.apply(channel_map);
        Ok(&self.channel_map)
    }

    fn apply(&mut self, channel_map: ChannelMap) {
        self.synthesizer.set_channel_map(&channel_map);
        self.channel_map = channel_map;
    }

    pub fn window(&self) -> &SpectralWindow {
        &self.window
    }

    pub fn frequencies_hz(&self) -> &[u64] {
        &self.requests_hz
    }

    pub fn channel_map(&self) -> &ChannelMap {
        &self.channel_map
    }

    pub fn synthesizer(&self) -> &S {
        &self.synthesizer
    }

    pub fn into_synthesizer(self) -> S {
        self.synthesizer
    }
}
