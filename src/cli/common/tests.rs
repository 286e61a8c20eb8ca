// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the window arguments and argument-file helpers.

use indoc::indoc;

use super::*;

#[test]
fn test_window_args_defaults() {
    let window = WindowArgs::default().parse().unwrap();
    assert_eq!(window.start_freq_hz(), DEFAULT_START_FREQ_HZ);
    assert_eq!(window.end_freq_hz(), DEFAULT_END_FREQ_HZ);
    assert_eq!(window.channel_width_hz(), DEFAULT_CHANNEL_WIDTH_HZ);
    assert_eq!(window.num_channels(), 100);
}

#[test]
fn test_window_args_with_units() {
    let window = WindowArgs {
        start_freq: Some("88 MHz".to_string()),
        end_freq: Some("0.108GHz".to_string()),
        channel_width: Some("5000 kHz".to_string()),
    }
    .parse()
    .unwrap();
    assert_eq!(window, SpectralWindow::new(88_000_000, 108_000_000, 5_000_000).unwrap());
}

#[test]
fn test_window_args_errors() {
    let result = WindowArgs {
        start_freq: Some("88 parsecs".to_string()),
        ..Default::default()
    }
    .parse();
    assert!(matches!(
        result,
        Err(WindowArgsError::Parse {
            arg: "start frequency",
            ..
        })
    ));

    let result = WindowArgs {
        start_freq: Some("100".to_string()),
        end_freq: Some("250".to_string()),
        channel_width: Some("50".to_string()),
    }
    .parse();
    assert!(matches!(
        result,
        Err(WindowArgsError::Window(
            ConfigurationError::OddChannelCount { num_channels: 3 }
        ))
    ));

    let result = WindowArgs {
        channel_width: Some("0".to_string()),
        ..Default::default()
    }
    .parse();
    assert!(matches!(
        result,
        Err(WindowArgsError::Window(ConfigurationError::ZeroChannelWidth))
    ));
}

#[test]
fn test_window_args_merge_prefers_the_first() {
    let cli = WindowArgs {
        start_freq: Some("90MHz".to_string()),
        ..Default::default()
    };
    let file = WindowArgs {
        start_freq: Some("88MHz".to_string()),
        end_freq: Some("100MHz".to_string()),
        channel_width: None,
    };
    let merged = cli.merge(file);
    assert_eq!(
        merged,
        WindowArgs {
            start_freq: Some("90MHz".to_string()),
            end_freq: Some("100MHz".to_string()),
            channel_width: None,
        }
    );
}

#[test]
fn test_window_args_from_files() {
    // Numbers and strings can be mixed, and the baseband rate is another name
    // for the channel width.
    let from_toml: WindowArgs = toml::from_str(indoc! {r#"
        start_freq = 88000000
        end_freq = "108 MHz"
        bband_rate = 200e3
    "#})
    .unwrap();
    assert_eq!(
        from_toml,
        WindowArgs {
            start_freq: Some("88000000".to_string()),
            end_freq: Some("108 MHz".to_string()),
            channel_width: Some("200000".to_string()),
        }
    );
    assert_eq!(from_toml.parse().unwrap().num_channels(), 100);

    let from_json: WindowArgs = serde_json::from_str(indoc! {r#"
        {
            "channel_width": "5MHz"
        }
    "#})
    .unwrap();
    assert_eq!(
        from_json,
        WindowArgs {
            channel_width: Some("5MHz".to_string()),
            ..Default::default()
        }
    );
}

#[test]
fn test_arg_file_types() {
    assert_eq!(ARG_FILE_TYPES_COMMA_SEPARATED.as_str(), "toml, json");
    assert!(ARG_FILE_HELP.ends_with("toml, json"));
}
