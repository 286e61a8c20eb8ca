// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Assign the channels of a polyphase synthesizer to requested carrier
//! frequencies.
//!
//! The synthesizer numbers its channels like the bins of a frequency-domain
//! transform: channel 0 sits at the centre of the spectral window, increasing
//! channel indices walk up to the top of the window, and then wrap around to
//! the bottom of the window and walk back up towards the centre. Planning
//! turns a list of requested carrier frequencies (one per synthesizer input)
//! into the list of channel indices the synthesizer expects (the "channel
//! map").
//!
//! All frequencies are integer Hz so that lookups are exact.

mod error;

pub use error::{ConfigurationError, PlanError, UnresolvedFrequencyError, UnresolvedReason};

use std::{
    collections::{BTreeMap, HashMap},
    ops::Deref,
};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_NUM_CHANNELS;

/// The contiguous range of frequencies that the combined output signal
/// occupies, split into channels of equal width starting at `start_freq`. The
/// width of the window must be a whole, even number of channels (or a single
/// channel); this is checked on construction, so a [`SpectralWindow`] is always
/// valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpectralWindow {
    start_freq_hz: u64,
    end_freq_hz: u64,
    channel_width_hz: u64,
}

impl SpectralWindow {
    pub fn new(
        start_freq_hz: u64,
        end_freq_hz: u64,
        channel_width_hz: u64,
    ) -> Result<SpectralWindow, ConfigurationError> {
        if channel_width_hz == 0 {
            return Err(ConfigurationError::ZeroChannelWidth);
        }
        if end_freq_hz <= start_freq_hz {
            return Err(ConfigurationError::EmptyWindow {
                start_freq_hz,
                end_freq_hz,
            });
        }
        // Channels are laid out from start_freq, so only the window's width
        // has to be a whole number of channels.
        if (end_freq_hz - start_freq_hz) % channel_width_hz != 0 {
            return Err(ConfigurationError::NotAligned {
                start_freq_hz,
                end_freq_hz,
                channel_width_hz,
            });
        }
        let num_channels = (end_freq_hz - start_freq_hz) / channel_width_hz;
        // The upper half of the window starts at its centre, which must land on
        // a channel boundary. A single channel has no upper half.
        if num_channels > 1 && num_channels % 2 == 1 {
            return Err(ConfigurationError::OddChannelCount { num_channels });
        }
        if num_channels > MAX_NUM_CHANNELS as u64 {
            return Err(ConfigurationError::TooManyChannels {
                num_channels,
                max: MAX_NUM_CHANNELS,
            });
        }

        Ok(SpectralWindow {
            start_freq_hz,
            end_freq_hz,
            channel_width_hz,
        })
    }

    pub fn start_freq_hz(&self) -> u64 {
        self.start_freq_hz
    }

    pub fn end_freq_hz(&self) -> u64 {
        self.end_freq_hz
    }

    pub fn channel_width_hz(&self) -> u64 {
        self.channel_width_hz
    }

    /// The number of synthesizer channels that fit inside the window.
    pub fn num_channels(&self) -> usize {
        // At most MAX_NUM_CHANNELS; checked on construction.
        ((self.end_freq_hz - self.start_freq_hz) / self.channel_width_hz) as usize
    }

    /// The frequency in the middle of the window. The synthesizer output is
    /// centred here.
    pub fn centre_freq_hz(&self) -> u64 {
        self.start_freq_hz + (self.end_freq_hz - self.start_freq_hz) / 2
    }

    /// The sample rate of the synthesizer's combined output, i.e. the width of
    /// the window.
    pub fn output_rate_hz(&self) -> u64 {
        self.end_freq_hz - self.start_freq_hz
    }

    /// The frequency that the synthesizer places channel `slot` at, or `None`
    /// if the slot doesn't exist.
    ///
    /// The lower `n / 2` slots cover the upper half of the window, starting
    /// from its centre; the remaining slots cover the lower half, starting from
    /// `start_freq`. A single-channel window only has a lower half.
    pub fn slot_freq_hz(&self, slot: usize) -> Option<u64> {
        let num_channels = self.num_channels();
        if slot >= num_channels {
            return None;
        }

        let half = num_channels / 2;
        let grid_index = if slot < half {
            num_channels - half + slot
        } else {
            slot - half
        };
        Some(self.start_freq_hz + grid_index as u64 * self.channel_width_hz)
    }

    /// All of the channel frequencies in the window, ascending.
    pub fn channel_freqs_hz(&self) -> impl Iterator<Item = u64> + '_ {
        (self.start_freq_hz..self.end_freq_hz).step_by(self.channel_width_hz as usize)
    }

    /// Explain why `freq_hz` isn't one of this window's channel frequencies.
    /// Returns `None` if it is.
    fn why_unresolved(&self, freq_hz: u64) -> Option<UnresolvedReason> {
        if !(self.start_freq_hz..self.end_freq_hz).contains(&freq_hz) {
            Some(UnresolvedReason::OutsideWindow {
                start_freq_hz: self.start_freq_hz,
                end_freq_hz: self.end_freq_hz,
            })
        } else if (freq_hz - self.start_freq_hz) % self.channel_width_hz != 0 {
            Some(UnresolvedReason::Misaligned {
                start_freq_hz: self.start_freq_hz,
                channel_width_hz: self.channel_width_hz,
            })
        } else {
            None
        }
    }
}

impl<'de> Deserialize<'de> for SpectralWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Unchecked {
            start_freq_hz: u64,
            end_freq_hz: u64,
            channel_width_hz: u64,
        }

        let w = Unchecked::deserialize(deserializer)?;
        SpectralWindow::new(w.start_freq_hz, w.end_freq_hz, w.channel_width_hz)
            .map_err(serde::de::Error::custom)
    }
}

/// Which synthesizer channel each frequency of a [`SpectralWindow`] lands on.
///
/// A table belongs to exactly one planning run; [`plan`] consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyIndexTable {
    window: SpectralWindow,

    /// Keyed by frequency [Hz], so iteration is in ascending frequency.
    slots: BTreeMap<u64, usize>,
}

impl FrequencyIndexTable {
    pub fn build(window: &SpectralWindow) -> FrequencyIndexTable {
        let slots: BTreeMap<u64, usize> = (0..window.num_channels())
            .filter_map(|slot| window.slot_freq_hz(slot).map(|freq| (freq, slot)))
            .collect();
        debug_assert_eq!(slots.len(), window.num_channels());
        trace!("Built a frequency index table with {} slots", slots.len());

        FrequencyIndexTable {
            window: *window,
            slots,
        }
    }

    pub fn window(&self) -> &SpectralWindow {
        &self.window
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The channel that `freq_hz` lands on, if it is (still) in the table.
    pub fn get(&self, freq_hz: u64) -> Option<usize> {
        self.slots.get(&freq_hz).copied()
    }

    /// Pairs of (frequency [Hz], channel), ascending in frequency.
    pub fn iter(&self) -> impl Iterator<Item = (u64, usize)> + '_ {
        self.slots.iter().map(|(&freq, &slot)| (freq, slot))
    }
}

/// The channel index for each synthesizer input, in input order. Always as long
/// as the synthesizer has channels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelMap(Vec<usize>);

impl ChannelMap {
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for ChannelMap {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<ChannelMap> for Vec<usize> {
    fn from(map: ChannelMap) -> Vec<usize> {
        map.0
    }
}

/// Resolve the requested carrier frequencies against `table` and produce the
/// channel map.
///
/// The map starts with the channel of each request (in request order).
/// Channels that nothing asked for follow in ascending-frequency order, and the
/// whole thing is cut to the number of synthesizer channels. Requesting the
/// same frequency more than once yields the same channel each time; that
/// channel is not reused for the leftovers.
///
/// Any request that isn't exactly one of the window's channel frequencies is an
/// error, and no map is produced.
pub fn plan(
    requests_hz: &[u64],
    mut table: FrequencyIndexTable,
) -> Result<ChannelMap, UnresolvedFrequencyError> {
    let num_channels = table.window.num_channels();

    // Where each frequency is requested for the last time. Once we pass that
    // position, the frequency leaves the table.
    let last_occurrence: HashMap<u64, usize> = requests_hz
        .iter()
        .enumerate()
        .map(|(port, &freq)| (freq, port))
        .collect();

    let mut map = Vec::with_capacity(requests_hz.len() + table.len());
    for (port, &freq_hz) in requests_hz.iter().enumerate() {
        let slot = match table.get(freq_hz) {
            Some(s) => s,
            None => {
                return Err(UnresolvedFrequencyError {
                    port,
                    freq_hz,
                    reason: table
                        .window
                        .why_unresolved(freq_hz)
                        .unwrap_or(UnresolvedReason::Misaligned {
                            start_freq_hz: table.window.start_freq_hz,
                            channel_width_hz: table.window.channel_width_hz,
                        }),
                })
            }
        };
        trace!("Carrier {port} ({freq_hz} Hz) -> channel {slot}");
        map.push(slot);

        if last_occurrence.get(&freq_hz) == Some(&port) {
            table.slots.remove(&freq_hz);
        }
    }

    // Everything left over, ascending in frequency.
    map.extend(table.slots.into_values());
    map.truncate(num_channels);
    debug_assert_eq!(map.len(), num_channels);
    debug!("Channel map: {map:?}");

    Ok(ChannelMap(map))
}

/// Build a fresh index table for `window` and plan the requests against it.
pub fn plan_channels(
    window: &SpectralWindow,
    requests_hz: &[u64],
) -> Result<ChannelMap, UnresolvedFrequencyError> {
    plan(requests_hz, FrequencyIndexTable::build(window))
}

/// Validate the window and plan the requests in one go.
pub fn plan_frequencies(
    start_freq_hz: u64,
    end_freq_hz: u64,
    channel_width_hz: u64,
    requests_hz: &[u64],
) -> Result<ChannelMap, PlanError> {
    let window = SpectralWindow::new(start_freq_hz, end_freq_hz, channel_width_hz)?;
    Ok(plan_channels(&window, requests_hz)?)
}
