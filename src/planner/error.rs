// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors that can occur when planning channels.

use thiserror::Error;

/// The spectral window can't be split into synthesizer channels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("The channel width cannot be 0 Hz")]
    ZeroChannelWidth,

    #[error("The end frequency ({end_freq_hz} Hz) is not a whole number of channel widths ({channel_width_hz} Hz) above the start frequency ({start_freq_hz} Hz)")]
    NotAligned {
        start_freq_hz: u64,
        end_freq_hz: u64,
        channel_width_hz: u64,
    },

    #[error("The end frequency ({end_freq_hz} Hz) must be greater than the start frequency ({start_freq_hz} Hz)")]
    EmptyWindow {
        start_freq_hz: u64,
        end_freq_hz: u64,
    },

    #[error("The spectral window holds an odd number of channels ({num_channels}), so its centre is not on a channel boundary")]
    OddChannelCount { num_channels: u64 },

    #[error("The spectral window would have {num_channels} channels, but the synthesizer has at most {max}")]
    TooManyChannels { num_channels: u64, max: usize },
}

/// A requested carrier frequency doesn't land on any synthesizer channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Carrier {port} was requested at {freq_hz} Hz, which {reason}")]
pub struct UnresolvedFrequencyError {
    /// The position of the offending request (i.e. the synthesizer input).
    pub port: usize,

    pub freq_hz: u64,

    pub reason: UnresolvedReason,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    #[error("is outside of the spectral window ({start_freq_hz} Hz to {end_freq_hz} Hz)")]
    OutsideWindow {
        start_freq_hz: u64,
        end_freq_hz: u64,
    },

    #[error("is not a whole number of channel widths ({channel_width_hz} Hz) above the start of the window ({start_freq_hz} Hz)")]
    Misaligned {
        start_freq_hz: u64,
        channel_width_hz: u64,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    UnresolvedFrequency(#[from] UnresolvedFrequencyError),
}
