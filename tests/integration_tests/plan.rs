// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests for the `plan` subcommand.

use tempfile::TempDir;

use crate::{get_cmd_output, multicarrier};
use multicarrier_wbfm::flowgraph::TransmitPlan;

#[test]
fn test_plan_fm_band() {
    for sub_command in ["plan", "channel-map"] {
        #[rustfmt::skip]
        let cmd = multicarrier()
            .args([
                sub_command,
                "--channel-width", "5MHz",
                "-f", "98MHz", "88MHz",
            ])
            .ok();
        assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
        let (stdout, _) = get_cmd_output(cmd);
        assert!(stdout.contains("Channel map: [0, 2, 3, 1]"), "{stdout}");
        assert!(stdout.contains("Carrier 1: 88 MHz -> channel 2"), "{stdout}");
        assert!(stdout.contains("2 synthesizer inputs are idle"), "{stdout}");
    }
}

#[test]
fn test_plan_bad_window() {
    #[rustfmt::skip]
    let cmd = multicarrier()
        .args([
            "plan",
            "--start-freq", "100", "--end-freq", "220", "--channel-width", "50",
            "-f", "100",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(
        stderr.contains("The end frequency (220 Hz) is not a whole number of channel widths (50 Hz) above the start frequency (100 Hz)"),
        "{stderr}"
    );

    // Aligned, but 3 channels.
    #[rustfmt::skip]
    let cmd = multicarrier()
        .args([
            "plan",
            "--start-freq", "100", "--end-freq", "250", "--channel-width", "50",
            "-f", "100",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("odd number of channels (3)"), "{stderr}");
}

#[test]
fn test_plan_unresolved_frequency() {
    #[rustfmt::skip]
    let args = [
        "plan",
        "--channel-width", "5MHz",
        "-f", "98MHz", "92MHz",
    ];
    let cmd = multicarrier().args(args).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("Carrier 1 was requested at 92000000 Hz, which is not a whole number of channel widths (5000000 Hz) above the start of the window (88000000 Hz)"),
        "{stderr}"
    );

    // A dry run only checks the arguments.
    let cmd = multicarrier().args(args).arg("--dry-run").ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run -- exiting now."), "{stdout}");
}

#[test]
fn test_plan_amplitude_mismatch() {
    let cmd = multicarrier()
        .args(["plan", "-f", "92MHz", "96MHz", "-a", "0.5"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("There are 2 carriers, but 1 amplitudes were given"),
        "{stderr}"
    );
}

#[test]
fn test_plan_output_and_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("plan.json");
    let args_toml = tmp_dir.path().join("args.toml");

    #[rustfmt::skip]
    let cmd = multicarrier()
        .args([
            "plan",
            "--save-toml", &format!("{}", args_toml.display()),
            "--bband-rate", "5MHz",
            "-f", "103MHz",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let plan: TransmitPlan =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(plan.synthesizer.channel_map.to_vec(), vec![1, 2, 3, 0]);
    assert_eq!(plan.synthesizer.num_idle_inputs, 3);
    assert_eq!(plan.carriers.len(), 1);
    assert_eq!(plan.carriers[0].channel, Some(1));

    // The saved arguments reproduce the run.
    std::fs::remove_file(&output).unwrap();
    let cmd = multicarrier()
        .args(["plan", &format!("{}", args_toml.display())])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let replayed: TransmitPlan =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(replayed.synthesizer, plan.synthesizer);
}

#[test]
fn test_plan_more_carriers_than_channels() {
    #[rustfmt::skip]
    let cmd = multicarrier()
        .args([
            "plan",
            "--channel-width", "5MHz",
            "-f", "88MHz", "93MHz", "98MHz", "103MHz", "93MHz",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "{stderr}");
    assert!(stdout.contains("Carrier 4: 93 MHz -> no channel"), "{stdout}");
    assert!(stdout.contains("only 4 synthesizer channels"), "{stdout}");
}

#[test]
fn test_plan_window_off_the_absolute_grid() {
    // Channels are 75, 125, 175 and 225 Hz.
    #[rustfmt::skip]
    let cmd = multicarrier()
        .args([
            "plan",
            "--start-freq", "75", "--end-freq", "275", "--channel-width", "50",
            "-f", "225", "75",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Channel map: [1, 2, 3, 0]"), "{stdout}");
}
