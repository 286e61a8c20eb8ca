// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pretty printers for reporting information.

use std::{borrow::Cow, sync::Mutex};

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNING_PRINTER: Mutex<Blocks> = Mutex::new(Blocks::default());
}

/// Lines of text, grouped into blocks. The first line of each block gets a
/// branch in the tree drawn down the left side.
#[derive(Default)]
struct Blocks(Vec<Vec<Cow<'static, str>>>);

impl Blocks {
    fn push_line(&mut self, line: Cow<'static, str>) {
        self.0.push(vec![line]);
    }

    fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.0.push(block);
    }

    /// Draw the tree, one log message per line, and forget the lines.
    fn drain_with(&mut self, mut log_line: impl FnMut(char, &str)) {
        let num_blocks = self.0.len();
        for (i_block, block) in self.0.drain(..).enumerate() {
            let num_lines = block.len();
            for (i_line, line) in block.iter().enumerate() {
                let symbol = match (i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks) {
                    (0, false, _) => VERTICAL_AND_RIGHT,
                    (0, _, false) => VERTICAL_AND_RIGHT,
                    (0, true, true) => UP_AND_RIGHT,
                    _ => VERTICAL,
                };
                log_line(symbol, line);
            }
        }
    }
}

/// Report a titled group of facts at the info level.
pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Blocks,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: Blocks::default(),
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push_line(line);
    }

    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.push_block(block);
    }

    pub(crate) fn display(mut self) {
        log::info!("{}", console::style(&self.title).bold());
        self.blocks
            .drain_with(|symbol, line| log::info!("{symbol} {line}"));
        log::info!("");
    }
}

pub(crate) trait Warn {
    fn warn(self);
}

impl Warn for &'static str {
    fn warn(self) {
        WARNING_PRINTER.lock().unwrap().push_line(self.into());
    }
}

impl Warn for String {
    fn warn(self) {
        WARNING_PRINTER.lock().unwrap().push_line(self.into());
    }
}

impl Warn for Cow<'static, str> {
    fn warn(self) {
        WARNING_PRINTER.lock().unwrap().push_line(self);
    }
}

impl Warn for Vec<Cow<'static, str>> {
    fn warn(self) {
        WARNING_PRINTER.lock().unwrap().push_block(self);
    }
}

impl<const N: usize> Warn for [Cow<'static, str>; N] {
    fn warn(self) {
        WARNING_PRINTER.lock().unwrap().push_block(self.to_vec());
    }
}

/// Print out any warnings that have been collected while the arguments were
/// being checked. Nothing is printed if there aren't any.
pub(crate) fn display_warnings() {
    let mut warnings = WARNING_PRINTER.lock().unwrap();
    log::debug!("Displaying warnings");
    if warnings.0.is_empty() {
        return;
    }

    log::warn!("{}", console::style("Warnings").bold());
    warnings.drain_with(|symbol, line| log::warn!("{symbol} {line}"));
    log::warn!("");
}
