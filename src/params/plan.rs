// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use itertools::Itertools;
use log::info;
use thiserror::Error;
use vec1::Vec1;

use crate::{
    cli::InfoPrinter,
    flowgraph::{Carrier, TransmitPlan},
    io::{write_plan, PlanOutputType, PlanWriteError},
    planner::{SpectralWindow, UnresolvedFrequencyError},
    unit_parsing::display_freq,
};

pub(crate) struct PlanParams {
    pub(crate) window: SpectralWindow,

    /// One per synthesizer input, in input order.
    pub(crate) carriers: Vec1<Carrier>,

    pub(crate) audio_rate_hz: u64,
    pub(crate) max_deviation_hz: f64,

    /// Where the plan gets written, if anywhere.
    pub(crate) output: Option<(PathBuf, PlanOutputType)>,
}

impl PlanParams {
    pub(crate) fn run(&self) -> Result<TransmitPlan, TransmitPlanError> {
        let PlanParams {
            window,
            carriers,
            audio_rate_hz,
            max_deviation_hz,
            output,
        } = self;

        let plan = TransmitPlan::new(*window, carriers, *audio_rate_hz, *max_deviation_hz)?;

        let mut printer = InfoPrinter::new("Channel plan".into());
        let block = plan
            .carriers
            .iter()
            .map(|c| {
                let channel = match c.channel {
                    Some(ch) => format!("channel {ch}"),
                    None => "no channel (not transmitted)".to_string(),
                };
                format!(
                    "Carrier {}: {} -> {channel}, amplitude {}",
                    c.port,
                    display_freq(c.freq_hz),
                    c.amplitude
                )
                .into()
            })
            .collect::<Vec<_>>();
        printer.push_block(block);
        printer.push_line(
            format!(
                "Channel map: [{}]",
                plan.synthesizer.channel_map.iter().join(", ")
            )
            .into(),
        );
        if plan.synthesizer.num_idle_inputs > 0 {
            printer.push_line(
                format!(
                    "{} synthesizer inputs are idle",
                    plan.synthesizer.num_idle_inputs
                )
                .into(),
            );
        }
        printer.display();

        if let Some((file, output_type)) = output {
            write_plan(&plan, file, *output_type)?;
            info!("Channel plan written to {}", file.display());
        }

        Ok(plan)
    }
}

#[derive(Error, Debug)]
pub(crate) enum TransmitPlanError {
    #[error(transparent)]
    Unresolved(#[from] UnresolvedFrequencyError),

    #[error(transparent)]
    Write(#[from] PlanWriteError),
}
