//! Command-line options for the configurator.

use clap::Parser;
use std::path::PathBuf;

use crate::serial::{SerialConfig, DEFAULT_BAUD_RATE};

/// Edit macro keypad pin mappings and push them to the device
#[derive(Parser, Debug)]
#[command(name = "macropad-config", version, about)]
pub struct CliArgs {
    /// Configuration file to pre-select for loading
    #[arg(short, long, env = "MACROPAD_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Serial device of the keypad (detected when omitted)
    #[arg(short, long, env = "MACROPAD_PORT", value_name = "PATH")]
    pub port: Option<String>,

    /// Serial baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud: u32,

    /// Byte sent after a save to make the device reload: a single character or 0xNN
    #[arg(long, value_name = "BYTE", default_value = "1", value_parser = parse_reset_byte)]
    pub reset_byte: u8,

    /// Load the configuration file right away
    #[arg(short, long, requires = "config")]
    pub load: bool,
}

/// Runtime configuration derived from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub config_path: Option<PathBuf>,
    pub port: Option<String>,
    pub serial: SerialConfig,
    pub load_on_start: bool,
}

impl CliArgs {
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            config_path: self.config,
            port: self.port,
            serial: SerialConfig {
                baud_rate: self.baud,
                reset_signal: self.reset_byte,
            },
            load_on_start: self.load,
        }
    }
}

/// Accepts a single ASCII character (`1`), hex (`0x04`) or a decimal byte (`13`).
pub fn parse_reset_byte(value: &str) -> Result<u8, String> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).map_err(|e| format!("invalid hex byte '{}': {}", value, e));
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        (Some(_), None) => Err(format!("'{}' is not an ASCII character", value)),
        (None, _) => Err("reset byte must not be empty".to_string()),
        _ => value
            .parse::<u8>()
            .map_err(|_| format!("expected a single character or 0xNN, got '{}'", value)),
    }
}
