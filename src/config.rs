//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! command line overrides. [`YumaConfig::validate`] runs after the last layer.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::services::almanac_fetcher::{AlmanacFetcher, AlmanacTransport, FetchOptions};
use crate::app::services::almanac_parser::ParseOptions;
use crate::app::services::table_reader::{ReadOptions, is_valid_time_format};
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_TIME_FORMAT, MAX_DISPLAY_PRECISION,
    NAVCEN_ALMANAC_BASE_URL,
};
use crate::{Error, Result};

/// Parser behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Fail when a required column is null in every record
    pub strict: bool,

    /// Log recoverable diagnostics at warning level instead of debug
    pub verbose: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            strict: true,
            verbose: true,
        }
    }
}

/// Table assembly and display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    /// strftime pattern for the Time column; `null` keeps raw timestamps
    pub time_format: Option<String>,

    /// Digits after the decimal point when printing floats
    pub float_precision: Option<usize>,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            time_format: Some(DEFAULT_TIME_FORMAT.to_string()),
            float_precision: None,
        }
    }
}

/// Almanac download settings
///
/// `save_dir` is where [`YumaConfig::fetch_almanac`] caches downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub base_url: String,
    pub save_dir: PathBuf,
    pub overwrite: bool,
    pub raise_on_fail: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: NAVCEN_ALMANAC_BASE_URL.to_string(),
            save_dir: PathBuf::from("almanacs"),
            overwrite: false,
            raise_on_fail: false,
        }
    }
}

/// Global configuration for almanac processing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YumaConfig {
    pub parsing: ParsingConfig,
    pub reading: ReadingConfig,
    pub fetch: FetchConfig,
}

impl YumaConfig {
    /// Load a configuration file, filling absent keys with defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;

        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Per-user config location, e.g. `~/.config/yuma-tools/config.json`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Defaults overlaid with the explicit config file, or the per-user file
    /// when one exists
    ///
    /// An explicit path that cannot be read is an error; a missing per-user
    /// file is not.
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::load(path);
        }

        match Self::default_config_path() {
            Some(path) if path.is_file() => {
                debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Check the combined configuration
    pub fn validate(&self) -> Result<()> {
        if self.fetch.base_url.trim().is_empty() {
            return Err(Error::configuration("Fetch base URL cannot be empty"));
        }

        if let Some(precision) = self.reading.float_precision {
            if precision > MAX_DISPLAY_PRECISION {
                return Err(Error::configuration(format!(
                    "Float precision {} exceeds the maximum of {}",
                    precision, MAX_DISPLAY_PRECISION
                )));
            }
        }

        if let Some(format) = &self.reading.time_format {
            if !is_valid_time_format(format) {
                return Err(Error::configuration(format!(
                    "Invalid time format '{}'",
                    format
                )));
            }
        }

        Ok(())
    }

    /// Enable or disable the strict required-field check
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.parsing.strict = strict;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.parsing.verbose = verbose;
        self
    }

    /// Render the Time column with a strftime pattern
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.reading.time_format = Some(format.into());
        self
    }

    /// Keep the Time column as raw timestamps
    pub fn with_raw_time(mut self) -> Self {
        self.reading.time_format = None;
        self
    }

    pub fn with_float_precision(mut self, precision: usize) -> Self {
        self.reading.float_precision = Some(precision);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.fetch.base_url = base_url.into();
        self
    }

    pub fn with_save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.fetch.save_dir = save_dir.into();
        self
    }

    /// Parser options for these settings
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::strict(self.parsing.strict).with_verbose(self.parsing.verbose)
    }

    /// Reader options for these settings
    pub fn read_options(&self) -> ReadOptions {
        let options = ReadOptions::default()
            .with_strict(self.parsing.strict)
            .with_verbose(self.parsing.verbose);

        match &self.reading.time_format {
            Some(format) => options.with_time_format(format.clone()),
            None => options.with_raw_time(),
        }
    }

    /// Fetcher options for these settings
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            base_url: self.fetch.base_url.clone(),
            overwrite: self.fetch.overwrite,
            raise_on_fail: self.fetch.raise_on_fail,
        }
    }

    /// Fetch the almanac for `date` into the configured save directory
    pub fn fetch_almanac<T: AlmanacTransport>(
        &self,
        transport: T,
        date: NaiveDate,
    ) -> Result<Option<PathBuf>> {
        AlmanacFetcher::new(transport, self.fetch_options()).fetch(date, &self.fetch.save_dir)
    }
}
