// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use tempfile::TempDir;

use super::*;
use crate::{flowgraph::Carrier, planner::SpectralWindow};

fn get_plan() -> TransmitPlan {
    let window = SpectralWindow::new(88_000_000, 108_000_000, 5_000_000).unwrap();
    let carriers = [
        Carrier {
            freq_hz: 98_000_000,
            amplitude: 0.5,
        },
        Carrier {
            freq_hz: 88_000_000,
            amplitude: 0.5,
        },
    ];
    TransmitPlan::new(window, &carriers, 48_000, 75e3).unwrap()
}

#[test]
fn test_output_type_from_path() {
    for (file, expected) in [
        ("plan.json", PlanOutputType::Json),
        ("plan.toml", PlanOutputType::Toml),
        ("plan.yaml", PlanOutputType::Yaml),
        ("plan.YML", PlanOutputType::Yaml),
        ("/some/dir/plan.JSON", PlanOutputType::Json),
    ] {
        let result = PlanOutputType::from_path(&PathBuf::from(file));
        assert!(result.is_ok(), "{file}: {}", result.unwrap_err());
        assert_eq!(result.unwrap(), expected);
    }

    for file in ["plan.txt", "plan", "plan.json.bak"] {
        let result = PlanOutputType::from_path(&PathBuf::from(file));
        assert!(
            matches!(result, Err(PlanWriteError::UnsupportedExt { .. })),
            "{file}"
        );
    }
}

#[test]
fn test_output_extensions_string() {
    assert_eq!(PLAN_OUTPUT_EXTENSIONS.as_str(), "json, toml, yaml");
}

#[test]
fn test_write_plan_all_formats() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let plan = get_plan();

    for output_type in PlanOutputType::iter() {
        let file = tmp_dir.path().join(format!("plan.{output_type}"));
        let result = write_plan(&plan, &file, output_type);
        assert!(result.is_ok(), "{output_type}: {}", result.unwrap_err());

        let contents = std::fs::read_to_string(&file).unwrap();
        let read_back: TransmitPlan = match output_type {
            PlanOutputType::Json => serde_json::from_str(&contents).unwrap(),
            PlanOutputType::Toml => toml::from_str(&contents).unwrap(),
            PlanOutputType::Yaml => serde_yaml::from_str(&contents).unwrap(),
        };
        assert_eq!(read_back.window, plan.window, "{output_type}");
        assert_eq!(read_back.synthesizer, plan.synthesizer, "{output_type}");
        assert_eq!(read_back.carriers.len(), 2, "{output_type}");
        assert_eq!(read_back.carriers[1].channel, Some(2), "{output_type}");
    }
}

#[test]
fn test_can_write_to_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");

    // Directories aren't plans.
    let result = can_write_to_file(tmp_dir.path());
    assert!(matches!(result, Err(PlanWriteError::IsADirectory { .. })));

    // Missing parent directories are created, but the file itself isn't left
    // behind.
    let file = tmp_dir.path().join("a").join("b").join("plan.json");
    let result = can_write_to_file(&file);
    assert!(result.is_ok(), "{}", result.unwrap_err());
    assert!(file.parent().unwrap().exists());
    assert!(!file.exists());

    // Existing files are left alone.
    std::fs::write(&file, "hello").unwrap();
    let result = can_write_to_file(&file);
    assert!(result.is_ok(), "{}", result.unwrap_err());
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "hello");
}
