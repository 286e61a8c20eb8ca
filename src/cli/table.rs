// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! List which synthesizer channel each frequency of a spectral window lands on.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, Warn, WindowArgs, ARG_FILE_HELP};
use crate::{params::TableParams, MulticarrierError};

/// Above this many channels, the table gets long.
const LONG_TABLE: usize = 1024;

#[derive(Parser, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct TableArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "window")]
    #[serde(default)]
    pub(super) window_args: WindowArgs,

    /// List the table in channel order, rather than in frequency order.
    #[clap(long, help_heading = "OUTPUT")]
    #[serde(default)]
    pub(super) by_channel: bool,
}

impl TableArgs {
    pub(super) fn merge(self) -> Result<TableArgs, MulticarrierError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let TableArgs {
                args_file: _,
                window_args,
                by_channel,
            } = unpack_arg_file!(arg_file);

            Ok(TableArgs {
                args_file: None,
                window_args: cli_args.window_args.merge(window_args),
                by_channel: cli_args.by_channel || by_channel,
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<TableParams, MulticarrierError> {
        let TableArgs {
            args_file: _,
            window_args,
            by_channel,
        } = self;

        let window = window_args.parse()?;
        if window.num_channels() > LONG_TABLE {
            format!("The table has {} rows", window.num_channels()).warn();
        }
        display_warnings();

        Ok(TableParams { window, by_channel })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), MulticarrierError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run();
        Ok(())
    }
}
