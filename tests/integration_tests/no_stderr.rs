// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{get_cmd_output, multicarrier};

#[test]
fn test_plan_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("plan.yaml");

    let cmd = multicarrier()
        .args(["plan", "--output", &format!("{}", output.display())])
        .ok();
    assert!(
        cmd.is_ok(),
        "plan failed with default arguments: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_table_no_stderr() {
    let cmd = multicarrier().args(["table", "-v"]).ok();
    assert!(
        cmd.is_ok(),
        "table failed with default arguments: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
