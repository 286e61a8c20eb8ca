// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all multicarrier-related errors. This should be the *only*
//! error enum that is publicly visible from the command-line interface.

use thiserror::Error;

use super::{common::WindowArgsError, plan::PlanArgsError};
use crate::{
    io::PlanWriteError,
    params::TransmitPlanError,
    planner::{ConfigurationError, PlanError, UnresolvedFrequencyError},
};

/// The *only* publicly visible error from the `multicarrier` binary. Each
/// category carries a hint on how to fix the problem, unless it's "generic".
#[derive(Error, Debug)]
pub enum MulticarrierError {
    /// An error related to the spectral window.
    #[error("{0}\n\nThe window must hold an even number of channels (or exactly one), counted up from the start frequency.")]
    Window(String),

    /// A carrier couldn't be given a channel.
    #[error("{0}\n\nEvery carrier must sit exactly on one of the window's channel frequencies; 'multicarrier table' lists them.")]
    Plan(String),

    /// An error related to the carrier arguments.
    #[error("{0}\n\nGive one frequency per carrier; amplitudes are optional, but if given, there must be one per carrier.")]
    Carriers(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files are toml or json, with the same groups and names as the command-line arguments.")]
    ArgFile(String),

    /// An error related to writing out the plan.
    #[error("{0}")]
    Output(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<WindowArgsError> for MulticarrierError {
    fn from(e: WindowArgsError) -> Self {
        Self::Window(e.to_string())
    }
}

impl From<PlanArgsError> for MulticarrierError {
    fn from(e: PlanArgsError) -> Self {
        match e {
            PlanArgsError::Output(e) => Self::from(e),
            _ => Self::Carriers(e.to_string()),
        }
    }
}

impl From<ConfigurationError> for MulticarrierError {
    fn from(e: ConfigurationError) -> Self {
        Self::Window(e.to_string())
    }
}

impl From<UnresolvedFrequencyError> for MulticarrierError {
    fn from(e: UnresolvedFrequencyError) -> Self {
        Self::Plan(e.to_string())
    }
}

impl From<PlanError> for MulticarrierError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Configuration(e) => Self::from(e),
            PlanError::UnresolvedFrequency(e) => Self::from(e),
        }
    }
}

impl From<TransmitPlanError> for MulticarrierError {
    fn from(e: TransmitPlanError) -> Self {
        match e {
            TransmitPlanError::Unresolved(e) => Self::from(e),
            TransmitPlanError::Write(e) => Self::from(e),
        }
    }
}

impl From<PlanWriteError> for MulticarrierError {
    fn from(e: PlanWriteError) -> Self {
        Self::Output(e.to_string())
    }
}

impl From<std::io::Error> for MulticarrierError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<toml::ser::Error> for MulticarrierError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
