// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests for the `table` subcommand.

use crate::{get_cmd_output, multicarrier};

#[test]
fn test_table_fm_band() {
    let cmd = multicarrier()
        .args(["table", "--channel-width", "5MHz"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    let rows = stdout
        .lines()
        .filter(|l| l.contains(" MHz |"))
        .map(|l| l.split('|').last().unwrap().trim().to_string())
        .collect::<Vec<_>>();
    assert_eq!(rows, vec!["2", "3", "0", "1"]);
}

#[test]
fn test_table_by_channel() {
    let cmd = multicarrier()
        .args(["slots", "--channel-width", "5MHz", "--by-channel"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    let freqs = stdout
        .lines()
        .filter(|l| l.contains(" MHz |"))
        .map(|l| {
            let row = l.split('|').next().unwrap();
            row.split_whitespace().rev().nth(1).unwrap().to_string()
        })
        .collect::<Vec<_>>();
    assert_eq!(freqs, vec!["98", "103", "88", "93"]);
}

#[test]
fn test_table_bad_channel_width() {
    let cmd = multicarrier()
        .args(["table", "--channel-width", "five"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Couldn't parse the channel width"), "{stderr}");
}

#[test]
fn test_table_too_many_channels() {
    let cmd = multicarrier()
        .args(["table", "--channel-width", "1"])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("would have 20000000 channels, but the synthesizer has at most 65536"),
        "{stderr}"
    );
    assert!(!stdout.contains(" Hz |"), "{stdout}");
}
