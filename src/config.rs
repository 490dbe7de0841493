//! Engine configuration: cache geometry plus the knobs the host can set
//! before constructing an [`crate::engine::Engine`].

use serde::Deserialize;
use std::path::Path;

/// Cache geometry and simulation knobs.
///
/// All fields have defaults matching the values used throughout the system
/// this crate models (a 16 MiB, 64-byte-line, direct-mapped LLC). Load one
/// from a TOML file with [`Config::load`], or build one programmatically:
///
/// ```
/// use memtrans::config::Config;
///
/// let cfg = Config {
///     cache_size: 128,
///     associativity: 2,
///     ..Config::default()
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Total cache size in bytes.
    #[serde(default = "defaults::cache_size")]
    pub cache_size: u64,

    /// Bytes per cache line. Must be a power of two.
    #[serde(default = "defaults::line_size")]
    pub line_size: u64,

    /// Set associativity. `1` means direct-mapped; any value `> 1` selects
    /// the LRU set implementation with that many ways.
    #[serde(default = "defaults::associativity")]
    pub associativity: u64,

    /// Width of the DRAM bus in bytes, as consumed by the transfer analyzer.
    #[serde(default = "defaults::bus_width")]
    pub bus_width: u64,

    /// When set, the host may drive `Engine::access_instruction_fetch` and
    /// have it actually record a load; when unset that method is a no-op.
    #[serde(default = "defaults::sim_instructions")]
    pub sim_instructions: bool,

    /// Where the final report is written.
    #[serde(default = "defaults::output_path")]
    pub output_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cache_size: defaults::cache_size(),
            line_size: defaults::line_size(),
            associativity: defaults::associativity(),
            bus_width: defaults::bus_width(),
            sim_instructions: defaults::sim_instructions(),
            output_path: defaults::output_path(),
        }
    }
}

mod defaults {
    pub fn cache_size() -> u64 {
        16 * 1024 * 1024
    }

    pub fn line_size() -> u64 {
        64
    }

    pub fn associativity() -> u64 {
        1
    }

    pub fn bus_width() -> u64 {
        8
    }

    pub fn sim_instructions() -> bool {
        false
    }

    pub fn output_path() -> String {
        "memtrans.out".into()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid cache layout: {0}")]
    InvalidLayout(String),
}

impl Config {
    /// Load a [`Config`] from a TOML file, falling back to the default for
    /// any field the file omits.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&text)?;
        Ok(config)
    }

    /// Number of sets implied by this configuration.
    pub fn num_sets(&self) -> u64 {
        self.cache_size / (self.line_size * self.associativity)
    }

    /// Validate the power-of-two and divisibility invariants from the data
    /// model. Called by `Engine::new`; fatal (at the host's discretion) if
    /// it returns an error, since a misconfigured cache cannot be simulated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        use crate::bits::is_power_of_two;

        if self.line_size == 0 || !is_power_of_two(self.line_size) {
            return Err(ConfigError::InvalidLayout(format!(
                "line_size must be a power of two, got {}",
                self.line_size
            )));
        }
        if self.associativity == 0 {
            return Err(ConfigError::InvalidLayout(
                "associativity must be >= 1".into(),
            ));
        }
        if self.cache_size % (self.line_size * self.associativity) != 0 {
            return Err(ConfigError::InvalidLayout(format!(
                "cache_size {} is not divisible by line_size * associativity ({})",
                self.cache_size,
                self.line_size * self.associativity
            )));
        }
        let num_sets = self.num_sets();
        if num_sets == 0 || !is_power_of_two(num_sets) {
            return Err(ConfigError::InvalidLayout(format!(
                "derived set count must be a power of two, got {num_sets}"
            )));
        }
        if self.bus_width == 0 || !is_power_of_two(self.bus_width) {
            return Err(ConfigError::InvalidLayout(format!(
                "bus_width must be a power of two, got {}",
                self.bus_width
            )));
        }
        if self.line_size % self.bus_width != 0 {
            return Err(ConfigError::InvalidLayout(format!(
                "line_size {} is not a multiple of bus_width {}",
                self.line_size, self.bus_width
            )));
        }
        Ok(())
    }
}
