//! Configuration for organizing a season directory.

use std::{fmt, fs};

use anyhow::Context;
use itertools::Itertools;
use serde::Deserialize;

use crate::organize::scan::DEFAULT_TRASH_EXTENSIONS;

/// Config from the user config file.
#[derive(Debug, Default, Deserialize)]
pub struct OrgSeasonConfig {
    #[serde(default)]
    pub auto: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub dryrun: bool,
    #[serde(default)]
    pub trash_extensions: Vec<String>,
    #[serde(default)]
    pub verbose: bool,
}

/// Wrapper needed for parsing the config section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    orgseason: OrgSeasonConfig,
}

/// Options given on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOptions {
    pub auto: bool,
    pub debug: bool,
    pub dryrun: bool,
    pub trash_extensions: Vec<String>,
    pub verbose: bool,
}

/// Final config created from CLI arguments and user config file.
#[derive(Debug, Clone)]
pub struct OrganizeConfig {
    /// Proceed without asking for confirmation.
    pub auto: bool,
    pub debug: bool,
    /// Only print the plan.
    pub dryrun: bool,
    /// Lowercase extensions without the leading dot.
    pub trash_extensions: Vec<String>,
    pub verbose: bool,
}

impl OrgSeasonConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    pub fn get_user_config() -> anyhow::Result<Self> {
        let Some(path) = crate::config::config_path() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.orgseason)
            .with_context(|| "Failed to parse config TOML")
    }
}

impl OrganizeConfig {
    /// Create config from command line options and the user config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    pub fn from_cli(cli: CliOptions) -> anyhow::Result<Self> {
        let user_config = OrgSeasonConfig::get_user_config()?;
        Ok(Self::merge(user_config, cli))
    }

    /// Combine user config and command line options.
    /// Flags are enabled if set in either, trash extensions from both are added to the defaults.
    #[must_use]
    pub fn merge(user_config: OrgSeasonConfig, cli: CliOptions) -> Self {
        let trash_extensions = DEFAULT_TRASH_EXTENSIONS
            .iter()
            .map(ToString::to_string)
            .chain(user_config.trash_extensions)
            .chain(cli.trash_extensions)
            .map(|extension| extension.trim().trim_start_matches('.').to_lowercase())
            .filter(|extension| !extension.is_empty())
            .unique()
            .collect();

        Self {
            auto: cli.auto || user_config.auto,
            debug: cli.debug || user_config.debug,
            dryrun: cli.dryrun || user_config.dryrun,
            trash_extensions,
            verbose: cli.verbose || user_config.verbose,
        }
    }
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self::merge(OrgSeasonConfig::default(), CliOptions::default())
    }
}

impl fmt::Display for OrganizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config:")?;
        writeln!(f, "  auto:    {}", crate::colorize_bool(self.auto))?;
        writeln!(f, "  debug:   {}", crate::colorize_bool(self.debug))?;
        writeln!(f, "  dryrun:  {}", crate::colorize_bool(self.dryrun))?;
        writeln!(f, "  verbose: {}", crate::colorize_bool(self.verbose))?;
        write!(f, "  trash:   [{}]", self.trash_extensions.join(", "))
    }
}
