//! Configuration system for the serial transmitter model.
//!
//! This module defines the configuration structures and enums used to
//! parameterize a transmitter instance. It provides:
//! 1. **Defaults:** Reference board clock, baud rate and simulation budget.
//! 2. **Structures:** General, clock and serial line settings.
//! 3. **Enums:** Bit order and load trigger mode.
//!
//! Clock frequency and baud rate are fixed per deployment. A transmitter reads
//! them once at construction; retuning means building a new instance.

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::constants::{REFERENCE_BAUD, REFERENCE_CLOCK_HZ};

/// Default configuration constants.
///
/// These values describe the reference development board used by the
/// tutorial projects when a field is not overridden.
mod defaults {
    /// Reference board oscillator frequency (50 MHz).
    pub const CLOCK_HZ: u64 = super::REFERENCE_CLOCK_HZ;

    /// Reference serial link speed (9600 baud).
    pub const BAUD_RATE: u64 = super::REFERENCE_BAUD;

    /// Default cycle budget for `run_until_idle` (enough for ~190 frames at 9600/50 MHz).
    pub const MAX_CYCLES: u64 = 10_000_000;
}

/// Order in which the eight data bits are placed on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum BitOrder {
    /// Least-significant bit first (standard RS-232).
    #[default]
    #[serde(alias = "lsb", alias = "LSB")]
    Lsb,
    /// Most-significant bit first.
    #[serde(alias = "msb", alias = "MSB")]
    Msb,
}

/// What causes the transmitter to load a new frame while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LoadMode {
    /// A single-cycle `load` strobe, honoured only while not busy.
    #[default]
    Strobe,
    /// Reload the held byte whenever idle; the `load` input is ignored.
    Implicit,
    /// Reload when idle and the held byte differs from the last byte sent.
    #[serde(alias = "On_Change", alias = "Change")]
    OnChange,
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use uartsim_core::config::{BitOrder, Config, LoadMode};
///
/// let json = r#"{
///     "clock": { "frequency_hz": 12000000 },
///     "serial": {
///         "baud_rate": 115200,
///         "bit_order": "Msb",
///         "load_mode": "OnChange"
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.serial.bit_order, BitOrder::Msb);
/// assert_eq!(config.serial.load_mode, LoadMode::OnChange);
/// assert_eq!(config.divider_threshold().unwrap(), 104);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Clock domain settings
    #[serde(default)]
    pub clock: ClockConfig,
    /// Serial line settings
    #[serde(default)]
    pub serial: SerialConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or any error from
    /// [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the clock and baud rate produce a usable divider.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either rate is zero, the baud rate exceeds
    /// the clock, or the threshold overflows the divider counter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.divider_threshold().map(|_| ())
    }

    /// Clock edges per bit period: `floor(frequency_hz / baud_rate)`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Config::validate`].
    pub fn divider_threshold(&self) -> Result<u32, ConfigError> {
        self.serial.divider_threshold(self.clock.frequency_hz)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Log every bit transition at trace level
    #[serde(default)]
    pub trace_line: bool,

    /// Cycle budget for draining the byte queue
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default cycle budget.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_line: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Clock domain configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    /// Oscillator frequency in Hz
    #[serde(default = "ClockConfig::default_frequency")]
    pub frequency_hz: u64,
}

impl ClockConfig {
    /// Returns the reference board clock frequency.
    fn default_frequency() -> u64 {
        defaults::CLOCK_HZ
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            frequency_hz: defaults::CLOCK_HZ,
        }
    }
}

/// Serial line configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SerialConfig {
    /// Target baud rate
    #[serde(default = "SerialConfig::default_baud")]
    pub baud_rate: u64,

    /// Data bit order on the line
    #[serde(default)]
    pub bit_order: BitOrder,

    /// Load trigger
    #[serde(default)]
    pub load_mode: LoadMode,

    /// Reset the bit-period divider when a frame is loaded.
    ///
    /// Disabling this reproduces the free-running divider design whose first
    /// start bit after an idle period is shortened.
    #[serde(default = "SerialConfig::default_reset_divider")]
    pub reset_divider_on_load: bool,
}

impl SerialConfig {
    /// Returns the reference baud rate.
    fn default_baud() -> u64 {
        defaults::BAUD_RATE
    }

    /// Divider reset on load is on unless explicitly disabled.
    fn default_reset_divider() -> bool {
        true
    }

    /// Computes the divider threshold for the given clock.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either rate is zero, the baud rate exceeds
    /// the clock, or the threshold does not fit in `u32`.
    pub fn divider_threshold(&self, clock_hz: u64) -> Result<u32, ConfigError> {
        if clock_hz == 0 {
            return Err(ConfigError::ZeroClock);
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::ZeroBaud);
        }
        if self.baud_rate > clock_hz {
            return Err(ConfigError::BaudExceedsClock {
                clock_hz,
                baud: self.baud_rate,
            });
        }
        let threshold = clock_hz / self.baud_rate;
        u32::try_from(threshold).map_err(|_| ConfigError::DividerOverflow(threshold))
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: defaults::BAUD_RATE,
            bit_order: BitOrder::default(),
            load_mode: LoadMode::default(),
            reset_divider_on_load: true,
        }
    }
}

/// Baud rate actually produced by a divider threshold.
///
/// Integer division rounds the threshold down, so the real rate is slightly
/// above the target.
pub fn effective_baud(clock_hz: u64, threshold: u32) -> f64 {
    clock_hz as f64 / f64::from(threshold.max(1))
}

/// Relative error of the produced baud rate against the target, in percent.
pub fn baud_error_percent(clock_hz: u64, baud: u64, threshold: u32) -> f64 {
    let target = baud.max(1) as f64;
    (effective_baud(clock_hz, threshold) - target) / target * 100.0
}
