// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::info;

use crate::{
    planner::{FrequencyIndexTable, SpectralWindow},
    unit_parsing::display_freq,
};

pub(crate) struct TableParams {
    pub(crate) window: SpectralWindow,

    /// List rows in channel order rather than frequency order.
    pub(crate) by_channel: bool,
}

impl TableParams {
    /// Log every (frequency, channel) pair of the window, and hand them back.
    pub(crate) fn run(&self) -> Vec<(u64, usize)> {
        let table = FrequencyIndexTable::build(&self.window);
        let mut rows = table.iter().collect::<Vec<_>>();
        if self.by_channel {
            rows.sort_unstable_by_key(|&(_, slot)| slot);
        }

        info!("{:>14} | channel", "frequency");
        for &(freq_hz, slot) in &rows {
            info!("{:>14} | {slot:>7}", display_freq(freq_hz));
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_orders() {
        let window = SpectralWindow::new(88_000_000, 108_000_000, 5_000_000).unwrap();
        let rows = TableParams {
            window,
            by_channel: false,
        }
        .run();
        assert_eq!(
            rows,
            vec![
                (88_000_000, 2),
                (93_000_000, 3),
                (98_000_000, 0),
                (103_000_000, 1)
            ]
        );

        let rows = TableParams {
            window,
            by_channel: true,
        }
        .run();
        assert_eq!(
            rows,
            vec![
                (98_000_000, 0),
                (103_000_000, 1),
                (88_000_000, 2),
                (93_000_000, 3)
            ]
        );
    }
}
