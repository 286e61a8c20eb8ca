// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to write out channel plans.

mod error;
#[cfg(test)]
mod tests;

pub(crate) use error::PlanWriteError;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

use itertools::Itertools;
use log::{debug, trace};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{cli::Warn, flowgraph::TransmitPlan};

#[derive(Debug, Display, EnumIter, EnumString, Clone, Copy, PartialEq, Eq)]
/// All supported plan output formats.
pub(crate) enum PlanOutputType {
    #[strum(serialize = "json")]
    Json,
    #[strum(serialize = "toml")]
    Toml,
    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
}

lazy_static::lazy_static! {
    pub(crate) static ref PLAN_OUTPUT_EXTENSIONS: String = PlanOutputType::iter().join(", ");
}

impl PlanOutputType {
    /// Work out the output type from a file's extension.
    pub(crate) fn from_path(file: &Path) -> Result<PlanOutputType, PlanWriteError> {
        file.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| PlanOutputType::from_str(&e.to_lowercase()).ok())
            .ok_or_else(|| PlanWriteError::UnsupportedExt {
                file: file.display().to_string(),
            })
    }
}

/// Write `plan` to `file` in the format `output_type`.
pub(crate) fn write_plan(
    plan: &TransmitPlan,
    file: &Path,
    output_type: PlanOutputType,
) -> Result<(), PlanWriteError> {
    debug!("Writing the channel plan to {} ({output_type})", file.display());

    let mut f = BufWriter::new(File::create(file)?);
    match output_type {
        PlanOutputType::Json => {
            serde_json::to_writer_pretty(&mut f, plan)?;
            writeln!(f)?;
        }
        PlanOutputType::Toml => {
            let s = toml::to_string(plan)?;
            f.write_all(s.as_bytes())?;
        }
        PlanOutputType::Yaml => serde_yaml::to_writer(&mut f, plan)?,
    }
    f.flush()?;

    Ok(())
}

/// Check that we'll be able to write to `file` before doing any work, and warn
/// if it will be overwritten.
pub(crate) fn can_write_to_file(file: &Path) -> Result<(), PlanWriteError> {
    trace!("Testing whether we can write to {}", file.display());

    if file.is_dir() {
        return Err(PlanWriteError::IsADirectory {
            file: file.display().to_string(),
        });
    }

    let exists = can_write_to_file_inner(file)?;
    if exists {
        format!("Will overwrite the existing file '{}'", file.display()).warn();
    }

    Ok(())
}

fn can_write_to_file_inner(file: &Path) -> Result<bool, PlanWriteError> {
    let file_exists = file.exists();

    match std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(file)
        .map_err(|e| e.kind())
    {
        // File is writable.
        Ok(_) => {
            // If the file in question didn't already exist, `OpenOptions::new`
            // creates it as part of its work. We don't want to keep the 0-sized
            // file; remove it if it didn't exist before.
            if !file_exists {
                std::fs::remove_file(file)?;
            }
        }

        // File doesn't exist. Attempt to make the directories leading up to the
        // file; if this fails, then we can't write the file anyway.
        Err(std::io::ErrorKind::NotFound) => {
            if let Some(p) = file.parent() {
                match std::fs::DirBuilder::new()
                    .recursive(true)
                    .create(p)
                    .map_err(|e| e.kind())
                {
                    Ok(()) => (),
                    Err(std::io::ErrorKind::PermissionDenied) => {
                        return Err(PlanWriteError::NewDirectory(p.to_path_buf()))
                    }
                    Err(e) => return Err(PlanWriteError::IO(e.into())),
                }
            }
        }

        Err(std::io::ErrorKind::PermissionDenied) => {
            return Err(PlanWriteError::FileNotWritable {
                file: file.display().to_string(),
            })
        }

        Err(e) => {
            return Err(PlanWriteError::IO(e.into()));
        }
    }

    Ok(file_exists)
}
