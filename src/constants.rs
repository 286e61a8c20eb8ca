// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All frequencies are in Hz.
 */

/// The bottom of the FM broadcast band.
pub const DEFAULT_START_FREQ_HZ: u64 = 88_000_000;

/// The top of the FM broadcast band.
pub const DEFAULT_END_FREQ_HZ: u64 = 108_000_000;

/// The width of each synthesizer channel, which is also the sample rate of each
/// modulated carrier.
pub const DEFAULT_CHANNEL_WIDTH_HZ: u64 = 200_000;

pub const DEFAULT_AUDIO_RATE_HZ: u64 = 48_000;

/// Broadcast wideband FM swings +/- 75 kHz.
pub const DEFAULT_MAX_DEVIATION_HZ: f64 = 75e3;

pub const DEFAULT_FREQUENCIES_HZ: [u64; 4] = [92_000_000, 96_000_000, 100_000_000, 104_000_000];

/// The most channels a synthesizer is built with.
pub const MAX_NUM_CHANNELS: usize = 65536;
