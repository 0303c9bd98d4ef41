//! Identification options
//!
//! Policy knobs for passive identification, loaded from rc-style
//! `OPTIONS=name:value` lines.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    DEFEND_NOTICE_ONE_IN, PACK_SENSE_FAIL_ONE_IN, SENSED_IDENT_ONE_IN, TIMED_NOTICE_DELAY,
};

/// Options parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}

/// User-configurable identification policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyOptions {
    /// Turns after the last wield before timed flags are noticed
    pub timed_notice_delay: i64,
    /// 1-in-N chance per sensing pass to fully identify a sensed worn item
    pub sensed_ident_one_in: u32,
    /// 1-in-N chance that sensing skips a pack item
    pub pack_sense_fail_one_in: u32,
    /// 1-in-N chance that being attacked reveals armour bonuses
    pub defend_notice_one_in: u32,
    /// Jewelry with an obvious property is identified on wearing
    pub easy_learn: bool,
}

impl Default for IdentifyOptions {
    fn default() -> Self {
        Self {
            timed_notice_delay: TIMED_NOTICE_DELAY,
            sensed_ident_one_in: SENSED_IDENT_ONE_IN,
            pack_sense_fail_one_in: PACK_SENSE_FAIL_ONE_IN,
            defend_notice_one_in: DEFEND_NOTICE_ONE_IN,
            easy_learn: true,
        }
    }
}

impl IdentifyOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            }
        }

        Ok(options)
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if let Some((key, value)) = opt.split_once(':') {
            return self.set_option(key.trim(), value.trim());
        }
        if let Some((key, value)) = opt.split_once('=') {
            return self.set_option(key.trim(), value.trim());
        }

        let (negated, name) = match opt.strip_prefix('!') {
            Some(name) => (true, name),
            None => (false, opt),
        };
        self.set_bool_option(name, !negated)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "easy_learn" => self.easy_learn = value,
            "timed_notice_delay"
            | "sensed_ident_one_in"
            | "pack_sense_fail_one_in"
            | "defend_notice_one_in" => {
                return Err(OptionsError::MissingValue(name.to_string()));
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "timed_notice_delay" => {
                self.timed_notice_delay = value.parse().map_err(|_| invalid())?;
                if self.timed_notice_delay < 0 {
                    return Err(invalid());
                }
            }
            "sensed_ident_one_in" => {
                self.sensed_ident_one_in = value.parse().map_err(|_| invalid())?;
            }
            "pack_sense_fail_one_in" => {
                self.pack_sense_fail_one_in = value.parse().map_err(|_| invalid())?;
            }
            "defend_notice_one_in" => {
                self.defend_notice_one_in = value.parse().map_err(|_| invalid())?;
            }
            "easy_learn" => {
                self.easy_learn = match value {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(invalid()),
                };
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        let contents = self.to_config_string();
        std::fs::write(path, contents).map_err(|e| OptionsError::IoError(e.to_string()))
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let mut lines = Vec::new();
        lines.push("# Identification options".to_string());
        lines.push(format!("OPTIONS=timed_notice_delay:{}", self.timed_notice_delay));
        lines.push(format!("OPTIONS=sensed_ident_one_in:{}", self.sensed_ident_one_in));
        lines.push(format!(
            "OPTIONS=pack_sense_fail_one_in:{}",
            self.pack_sense_fail_one_in
        ));
        lines.push(format!(
            "OPTIONS=defend_notice_one_in:{}",
            self.defend_notice_one_in
        ));
        lines.push(format!(
            "OPTIONS={}",
            if self.easy_learn { "easy_learn" } else { "!easy_learn" }
        ));
        lines.join("\n")
    }
}
