//! Configuration for the selector model and its harness.
//!
//! This module defines the immutable configuration record handed to the model
//! when it is built. It provides:
//! 1. **Defaults:** the reference pinout and timing of the hardware.
//! 2. **Pin layout:** which `ui_in`/`uo_out` bits carry which signal.
//! 3. **Timing:** disconnect window length and reset-release filter.
//! 4. **General:** trace output and the runaway-cycle guard for scripts.
//!
//! Configuration is supplied as JSON (CLI `--config`, Python dict) or built
//! with `Config::default()`. Every field is optional; `{}` is the reference
//! hardware.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{PIN_WIDTH, SEL_COUNT, SEL_WIDTH};
use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    use crate::common::constants::{I_ENABLE, I_SEL_EN, I_SEL_MASK, I_STROBE, O_READY};

    /// `ui_in` mask of the selector value.
    pub const SEL_MASK: u8 = I_SEL_MASK;

    /// `ui_in` bit of the selector latch write-enable.
    pub const SEL_EN: u8 = I_SEL_EN;

    /// `ui_in` bit of the master enable gate.
    pub const ENABLE: u8 = I_ENABLE;

    /// `ui_in` bit of the commit strobe.
    pub const STROBE: u8 = I_STROBE;

    /// `uo_out` bit of READY.
    pub const READY: u8 = O_READY;

    /// Cycles READY is held low after a strobe edge.
    pub const DISCONNECT_CYCLES: u8 = 2;

    /// Consecutive `ena && rst_n` cycles needed to leave reset.
    pub const RELEASE_CYCLES: u8 = 2;

    /// Script cycle budget.
    pub const MAX_CYCLES: u64 = 100_000;
}

/// Root configuration record.
///
/// ```
/// use selsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace": true },
///     "scu": { "disconnect_cycles": 3 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.scu.disconnect_cycles, 3);
/// assert_eq!(config.pins.strobe, 0x80);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Harness options.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pin bit positions.
    #[serde(default)]
    pub pins: PinLayout,
    /// Control unit timing.
    #[serde(default)]
    pub scu: ScuConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, [`ConfigError::Layout`] or
    /// [`ConfigError::Timing`] when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Config::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks the pin layout and timing parameters.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError::Layout`] or [`ConfigError::Timing`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pins.validate()?;
        self.scu.validate()
    }
}

/// Harness options that do not change the modeled hardware.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Emit one report line per clock cycle.
    #[serde(default)]
    pub trace: bool,

    /// Upper bound on cycles a stimulus script may consume.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Decoded view of one `ui_in` vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFields {
    /// Selector value (0-15).
    pub sel: u8,
    /// Selector latch write-enable.
    pub sel_en: bool,
    /// Master enable gate.
    pub enable: bool,
    /// Commit strobe level.
    pub strobe: bool,
}

/// Bit positions of every modeled signal.
///
/// The selector field must be [`SEL_WIDTH`] contiguous bits; every flag must
/// be a single bit and no two fields may overlap. The seven `uo_out` bits
/// other than READY carry indicator lines 8..=14 in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PinLayout {
    /// `ui_in` selector mask.
    #[serde(default = "PinLayout::default_sel_mask")]
    pub sel_mask: u8,
    /// `ui_in` selector write-enable bit.
    #[serde(default = "PinLayout::default_sel_en")]
    pub sel_en: u8,
    /// `ui_in` enable bit.
    #[serde(default = "PinLayout::default_enable")]
    pub enable: u8,
    /// `ui_in` strobe bit.
    #[serde(default = "PinLayout::default_strobe")]
    pub strobe: u8,
    /// `uo_out` READY bit.
    #[serde(default = "PinLayout::default_ready")]
    pub ready: u8,
}

impl PinLayout {
    fn default_sel_mask() -> u8 {
        defaults::SEL_MASK
    }

    fn default_sel_en() -> u8 {
        defaults::SEL_EN
    }

    fn default_enable() -> u8 {
        defaults::ENABLE
    }

    fn default_strobe() -> u8 {
        defaults::STROBE
    }

    fn default_ready() -> u8 {
        defaults::READY
    }

    /// Bits of the control flags (`SEL_EN | ENABLE | STROBE`).
    pub const fn control_mask(&self) -> u8 {
        self.sel_en | self.enable | self.strobe
    }

    /// `ui_in` bits that no field claims. They must be driven low.
    pub const fn reserved_mask(&self) -> u8 {
        !(self.sel_mask | self.control_mask())
    }

    /// Index of the READY bit within `uo_out`.
    pub const fn ready_bit(&self) -> u32 {
        self.ready.trailing_zeros()
    }

    /// Decodes a raw `ui_in` value.
    pub const fn decode(&self, raw: u8) -> InputFields {
        InputFields {
            sel: (raw & self.sel_mask).wrapping_shr(self.sel_mask.trailing_zeros()),
            sel_en: (raw & self.sel_en) != 0,
            enable: (raw & self.enable) != 0,
            strobe: (raw & self.strobe) != 0,
        }
    }

    /// Places a selector value into its `ui_in` field.
    pub const fn encode_sel(&self, sel: u8) -> u8 {
        sel.wrapping_shl(self.sel_mask.trailing_zeros()) & self.sel_mask
    }

    /// Spreads indicator lines 8..=14 over the non-READY bits of `uo_out`.
    pub fn pack_high(&self, high: u8) -> u8 {
        let mut packed = 0u8;
        let mut src = 0;
        for dst in (0..PIN_WIDTH).filter(|b| *b != self.ready_bit()) {
            if (high >> src) & 1 == 1 {
                packed |= 1 << dst;
            }
            src += 1;
        }
        packed
    }

    /// Inverse of [`PinLayout::pack_high`].
    pub fn unpack_high(&self, uo_out: u8) -> u8 {
        let mut high = 0u8;
        let mut dst = 0;
        for src in (0..PIN_WIDTH).filter(|b| *b != self.ready_bit()) {
            if (uo_out >> src) & 1 == 1 {
                high |= 1 << dst;
            }
            dst += 1;
        }
        high
    }

    /// Checks field widths and overlaps.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Layout`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let shift = self.sel_mask.trailing_zeros();
        if self.sel_mask.count_ones() != SEL_WIDTH
            || u32::from(self.sel_mask >> shift) != SEL_COUNT - 1
        {
            return Err(ConfigError::Layout(format!(
                "sel_mask {:#04x} must be {SEL_WIDTH} contiguous bits",
                self.sel_mask
            )));
        }
        for (name, bit) in [
            ("sel_en", self.sel_en),
            ("enable", self.enable),
            ("strobe", self.strobe),
            ("ready", self.ready),
        ] {
            if bit.count_ones() != 1 {
                return Err(ConfigError::Layout(format!(
                    "{name} {bit:#04x} must be a single bit"
                )));
            }
        }
        let fields = [self.sel_mask, self.sel_en, self.enable, self.strobe];
        let claimed: u32 = fields.iter().map(|f| f.count_ones()).sum();
        if claimed != (self.sel_mask | self.control_mask()).count_ones() {
            return Err(ConfigError::Layout("ui_in fields overlap".to_string()));
        }
        Ok(())
    }
}

impl Default for PinLayout {
    fn default() -> Self {
        Self {
            sel_mask: defaults::SEL_MASK,
            sel_en: defaults::SEL_EN,
            enable: defaults::ENABLE,
            strobe: defaults::STROBE,
            ready: defaults::READY,
        }
    }
}

/// Control unit timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScuConfig {
    /// Cycles READY stays low after a strobe edge, counting the edge cycle.
    #[serde(default = "ScuConfig::default_disconnect_cycles")]
    pub disconnect_cycles: u8,

    /// Consecutive `ena && rst_n` cycles required to leave reset.
    #[serde(default = "ScuConfig::default_release_cycles")]
    pub release_cycles: u8,
}

impl ScuConfig {
    fn default_disconnect_cycles() -> u8 {
        defaults::DISCONNECT_CYCLES
    }

    fn default_release_cycles() -> u8 {
        defaults::RELEASE_CYCLES
    }

    /// Rejects zero-length windows.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Timing`] when either parameter is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.disconnect_cycles == 0 {
            return Err(ConfigError::Timing(
                "disconnect_cycles must be at least 1".to_string(),
            ));
        }
        if self.release_cycles == 0 {
            return Err(ConfigError::Timing(
                "release_cycles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScuConfig {
    fn default() -> Self {
        Self {
            disconnect_cycles: defaults::DISCONNECT_CYCLES,
            release_cycles: defaults::RELEASE_CYCLES,
        }
    }
}
