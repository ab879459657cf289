//! Configuration module for `MySchool`

use crate::core::models::course::{parse_credit_points, validate_credit_points};
use crate::core::models::{RecordDefaults, StudyMode};
use crate::core::ranking::EnrolmentPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside string values
const DIR_VARIABLE: &str = "$MY_SCHOOL";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory searched for `results.txt`, `courses.txt` and `students.txt`
    #[serde(default)]
    pub data_dir: String,
    /// Append-only report file
    #[serde(default)]
    pub report_file: String,
}

/// Enrolment-sufficiency thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrolmentConfig {
    /// Minimum enrolments for undergraduates
    pub undergraduate_min: usize,
    /// Minimum enrolments for full-time postgraduates
    pub postgraduate_full_time_min: usize,
    /// Minimum enrolments for part-time postgraduates
    pub postgraduate_part_time_min: usize,
    /// Marker appended to under-enrolled student names
    pub marker: String,
}

impl Default for EnrolmentConfig {
    fn default() -> Self {
        let policy = EnrolmentPolicy::default();
        Self {
            undergraduate_min: policy.undergraduate_min,
            postgraduate_full_time_min: policy.postgraduate_full_time_min,
            postgraduate_part_time_min: policy.postgraduate_part_time_min,
            marker: policy.marker,
        }
    }
}

/// Values applied to records whose input omits them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Study mode for undergraduates (`FT` or `PT`)
    pub undergraduate_mode: String,
    /// Credit points for electives with an empty credit field
    pub elective_credit_points: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let defaults = RecordDefaults::default();
        Self {
            undergraduate_mode: defaults.undergraduate_mode.code().to_string(),
            elective_credit_points: defaults.elective_credit_points,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Enrolment thresholds
    #[serde(default)]
    pub enrolment: EnrolmentConfig,
    /// Record defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override input data directory
    pub data_dir: Option<String>,
    /// Override report file path
    pub report_file: Option<String>,
}

impl Config {
    /// Every key accepted by [`get`](Config::get), [`set`](Config::set) and [`unset`](Config::unset)
    pub const KEYS: [&'static str; 11] = [
        "level",
        "file",
        "verbose",
        "data_dir",
        "report_file",
        "undergraduate_min",
        "postgraduate_full_time_min",
        "postgraduate_part_time_min",
        "marker",
        "undergraduate_mode",
        "elective_credit_points",
    ];

    /// Get the `$MY_SCHOOL` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/myschool`
    /// - macOS: `~/Library/Application Support/myschool`
    /// - Windows: `%APPDATA%\myschool`
    #[must_use]
    pub fn get_myschool_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("myschool")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled; numeric sections already fall back through serde.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.data_dir.is_empty() && !defaults.paths.data_dir.is_empty() {
            self.paths.data_dir.clone_from(&defaults.paths.data_dir);
            changed = true;
        }
        if self.paths.report_file.is_empty() && !defaults.paths.report_file.is_empty() {
            self.paths
                .report_file
                .clone_from(&defaults.paths.report_file);
            changed = true;
        }

        if self.enrolment.marker.is_empty() && !defaults.enrolment.marker.is_empty() {
            self.enrolment.marker.clone_from(&defaults.enrolment.marker);
            changed = true;
        }
        if self.defaults.undergraduate_mode.is_empty()
            && !defaults.defaults.undergraduate_mode.is_empty()
        {
            self.defaults
                .undergraduate_mode
                .clone_from(&defaults.defaults.undergraduate_mode);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not touched.
    /// Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir.clone_from(data_dir);
        }
        if let Some(report_file) = &overrides.report_file {
            self.paths.report_file.clone_from(report_file);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// the directory returned by [`get_myschool_dir`](Self::get_myschool_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_myschool_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$MY_SCHOOL` to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_myschool_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults and `$MY_SCHOOL` is expanded
    /// in path-like values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.report_file = Self::expand_variables(&config.paths.report_file);

        Ok(config)
    }

    /// Load configuration from the compiled-in defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML, which
    /// cannot happen for a released binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults if not found
    ///
    /// An existing file has newly introduced fields merged in from the defaults
    /// and is re-saved. Any read or parse problem falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `data_dir`, `report_file`,
    /// `undergraduate_min`, `postgraduate_full_time_min`,
    /// `postgraduate_part_time_min`, `marker`, `undergraduate_mode`,
    /// `elective_credit_points`. Dashes are accepted in place of underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "data_dir" => Some(self.paths.data_dir.clone()),
            "report_file" => Some(self.paths.report_file.clone()),
            "undergraduate_min" => Some(self.enrolment.undergraduate_min.to_string()),
            "postgraduate_full_time_min" => {
                Some(self.enrolment.postgraduate_full_time_min.to_string())
            }
            "postgraduate_part_time_min" => {
                Some(self.enrolment.postgraduate_part_time_min.to_string())
            }
            "marker" => Some(self.enrolment.marker.clone()),
            "undergraduate_mode" => Some(self.defaults.undergraduate_mode.clone()),
            "elective_credit_points" => Some(self.defaults.elective_credit_points.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Values are validated for their field type. Call [`save()`](Config::save)
    /// to persist the change.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let parse_count = |v: &str| {
            v.parse::<usize>()
                .map_err(|_| format!("Invalid count for '{key}': '{v}'"))
        };

        match key.replace('-', "_").as_str() {
            "level" => {
                if crate::logger::parse_level(value).is_none() {
                    return Err(format!("Invalid log level: '{value}'"));
                }
                self.logging.level = value.trim().to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "data_dir" => self.paths.data_dir = value.to_string(),
            "report_file" => self.paths.report_file = value.to_string(),
            "undergraduate_min" => self.enrolment.undergraduate_min = parse_count(value)?,
            "postgraduate_full_time_min" => {
                self.enrolment.postgraduate_full_time_min = parse_count(value)?;
            }
            "postgraduate_part_time_min" => {
                self.enrolment.postgraduate_part_time_min = parse_count(value)?;
            }
            "marker" => self.enrolment.marker = value.to_string(),
            "undergraduate_mode" => {
                let mode = value.parse::<StudyMode>().map_err(|e| e.to_string())?;
                self.defaults.undergraduate_mode = mode.code().to_string();
            }
            "elective_credit_points" => {
                self.defaults.elective_credit_points =
                    parse_credit_points(value).map_err(|e| e.to_string())?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is unknown
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "report_file" => self
                .paths
                .report_file
                .clone_from(&defaults.paths.report_file),
            "undergraduate_min" => {
                self.enrolment.undergraduate_min = defaults.enrolment.undergraduate_min;
            }
            "postgraduate_full_time_min" => {
                self.enrolment.postgraduate_full_time_min =
                    defaults.enrolment.postgraduate_full_time_min;
            }
            "postgraduate_part_time_min" => {
                self.enrolment.postgraduate_part_time_min =
                    defaults.enrolment.postgraduate_part_time_min;
            }
            "marker" => self.enrolment.marker.clone_from(&defaults.enrolment.marker),
            "undergraduate_mode" => self
                .defaults
                .undergraduate_mode
                .clone_from(&defaults.defaults.undergraduate_mode),
            "elective_credit_points" => {
                self.defaults.elective_credit_points = defaults.defaults.elective_credit_points;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Enrolment thresholds for this run
    #[must_use]
    pub fn enrolment_policy(&self) -> EnrolmentPolicy {
        EnrolmentPolicy {
            undergraduate_min: self.enrolment.undergraduate_min,
            postgraduate_full_time_min: self.enrolment.postgraduate_full_time_min,
            postgraduate_part_time_min: self.enrolment.postgraduate_part_time_min,
            marker: self.enrolment.marker.clone(),
        }
    }

    /// Record construction defaults for this run
    ///
    /// # Errors
    /// Returns an error if the configured undergraduate mode or elective
    /// credit points are invalid
    pub fn record_defaults(&self) -> Result<RecordDefaults, String> {
        let undergraduate_mode = self
            .defaults
            .undergraduate_mode
            .parse::<StudyMode>()
            .map_err(|e| format!("Invalid config 'undergraduate_mode': {e}"))?;
        let elective_credit_points =
            validate_credit_points(self.defaults.elective_credit_points)
                .map_err(|e| format!("Invalid config 'elective_credit_points': {e}"))?;
        Ok(RecordDefaults {
            undergraduate_mode,
            elective_credit_points,
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  report_file = \"{}\"", self.paths.report_file)?;

        writeln!(f, "\n[enrolment]")?;
        writeln!(f, "  undergraduate_min = {}", self.enrolment.undergraduate_min)?;
        writeln!(
            f,
            "  postgraduate_full_time_min = {}",
            self.enrolment.postgraduate_full_time_min
        )?;
        writeln!(
            f,
            "  postgraduate_part_time_min = {}",
            self.enrolment.postgraduate_part_time_min
        )?;
        writeln!(f, "  marker = \"{}\"", self.enrolment.marker)?;

        writeln!(f, "\n[defaults]")?;
        writeln!(
            f,
            "  undergraduate_mode = \"{}\"",
            self.defaults.undergraduate_mode
        )?;
        writeln!(
            f,
            "  elective_credit_points = {}",
            self.defaults.elective_credit_points
        )?;

        Ok(())
    }
}
