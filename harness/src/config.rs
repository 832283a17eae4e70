//! Run configuration: what the harness needs to drive one exploration.
//!
//! `RunConfig` is the validated form. `RunArgs` is the raw command-line form,
//! where the bound may still be missing (the binary then prompts for it).
//!
//! Only `bound` and the exploration policy are normative (they land in
//! `run_config.json`). `out_dir` and `quiet` affect where output goes, never
//! what is computed.

use std::path::PathBuf;

use moo_search::policy::{ExplorePolicyV1, DEFAULT_PROGRESS_INTERVAL};

/// Error building or validating a run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A flag that takes a value was last on the command line.
    MissingValue { flag: String },
    /// A value did not parse as an integer.
    InvalidNumber { flag: String, value: String },
    /// An unrecognized flag, or a second positional argument.
    UnexpectedArgument { arg: String },
    /// The bound must be at least 1.
    BoundTooSmall { bound: i64 },
    /// The bound does not fit the state representation.
    BoundTooLarge { bound: i64 },
    /// `--progress-every 0`.
    ZeroProgressInterval,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue { flag } => write!(f, "{flag} requires a value"),
            Self::InvalidNumber { flag, value } => {
                write!(f, "{flag}: not an integer: {value:?}")
            }
            Self::UnexpectedArgument { arg } => write!(f, "unexpected argument: {arg}"),
            Self::BoundTooSmall { .. } => write!(f, "n must be at least 1"),
            Self::BoundTooLarge { bound } => write!(f, "n is too large: {bound}"),
            Self::ZeroProgressInterval => write!(f, "--progress-every must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// N.
    pub bound: u32,
    pub max_pops: Option<u64>,
    pub max_known_states: Option<u64>,
    pub progress_interval: u64,
    /// Persist the bundle here when set.
    pub out_dir: Option<PathBuf>,
    /// Suppress progress lines.
    pub quiet: bool,
}

impl RunConfig {
    /// Unbounded exhaustive run with default cadence.
    #[must_use]
    pub fn new(bound: u32) -> Self {
        Self {
            bound,
            max_pops: None,
            max_known_states: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            out_dir: None,
            quiet: false,
        }
    }

    /// Pre-execution validation.
    ///
    /// # Errors
    ///
    /// [`ConfigError::BoundTooSmall`] for a zero bound,
    /// [`ConfigError::ZeroProgressInterval`] for a zero interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bound < 1 {
            return Err(ConfigError::BoundTooSmall {
                bound: i64::from(self.bound),
            });
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        Ok(())
    }

    /// The exploration policy this configuration implies.
    #[must_use]
    pub fn to_policy(&self) -> ExplorePolicyV1 {
        ExplorePolicyV1 {
            max_pops: self.max_pops,
            max_known_states: self.max_known_states,
            progress_interval: self.progress_interval,
        }
    }

    /// Normative projection written to `run_config.json`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "bound": self.bound,
            "policy": self.to_policy().to_json_value(),
            "schema_version": "run_config.v1",
        })
    }
}

/// Command-line arguments before the bound is known.
///
/// Grammar:
/// `[N] [--max-pops K] [--max-known-states K] [--progress-every K] [--out DIR] [--quiet]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    pub bound: Option<i64>,
    pub max_pops: Option<u64>,
    pub max_known_states: Option<u64>,
    pub progress_interval: Option<u64>,
    pub out_dir: Option<PathBuf>,
    pub quiet: bool,
}

impl RunArgs {
    /// Parse arguments (program name already stripped).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown flags, missing values, or
    /// non-integer values.
    pub fn parse<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--max-pops" => parsed.max_pops = Some(flag_u64(&arg, args.next())?),
                "--max-known-states" => {
                    parsed.max_known_states = Some(flag_u64(&arg, args.next())?);
                }
                "--progress-every" => {
                    parsed.progress_interval = Some(flag_u64(&arg, args.next())?);
                }
                "--out" => {
                    let dir = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue { flag: arg.clone() })?;
                    parsed.out_dir = Some(PathBuf::from(dir));
                }
                "--quiet" => parsed.quiet = true,
                _ if parsed.bound.is_none() && !arg.starts_with("--") => {
                    parsed.bound = Some(parse_bound(&arg)?);
                }
                _ => return Err(ConfigError::UnexpectedArgument { arg }),
            }
        }
        Ok(parsed)
    }

    /// Resolve into a validated [`RunConfig`] using `bound`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `bound` is out of range or the progress
    /// interval is zero.
    pub fn into_config(self, bound: i64) -> Result<RunConfig, ConfigError> {
        if bound < 1 {
            return Err(ConfigError::BoundTooSmall { bound });
        }
        let bound = u32::try_from(bound).map_err(|_| ConfigError::BoundTooLarge { bound })?;
        let config = RunConfig {
            bound,
            max_pops: self.max_pops,
            max_known_states: self.max_known_states,
            progress_interval: self.progress_interval.unwrap_or(DEFAULT_PROGRESS_INTERVAL),
            out_dir: self.out_dir,
            quiet: self.quiet,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Parse a bound typed by a user (surrounding whitespace ignored).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidNumber`] if `text` is not an integer.
pub fn parse_bound(text: &str) -> Result<i64, ConfigError> {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidNumber {
            flag: "n".into(),
            value: trimmed.to_string(),
        })
}

fn flag_u64(flag: &str, value: Option<String>) -> Result<u64, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue {
        flag: flag.to_string(),
    })?;
    value.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
        flag: flag.to_string(),
        value,
    })
}
