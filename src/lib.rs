// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Channel planning for a multicarrier wideband FM transmitter.
//!
//! Several audio streams are each frequency modulated and combined into one
//! wideband signal by a polyphase synthesizer. The synthesizer has one input
//! per channel of a spectral window; [`planner`] works out which channel each
//! carrier is fed into, and [`flowgraph`] describes how the rest of the chain
//! must be configured around that.

mod cli;
pub mod constants;
pub mod flowgraph;
mod io;
mod params;
pub mod planner;
pub mod unit_parsing;

// Re-exports.
pub use cli::{Multicarrier, MulticarrierError};
