//! Flags shared by every command.

use cif_dict::DictConfig;

/// Parsed command-line flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// `--json`: machine-readable output where supported.
    pub json: bool,
    /// `--quiet`: no diagnostic summary on stderr and no diagnostic logging.
    pub quiet: bool,
    /// `--limit=<n>`: maximum diagnostics kept per file (0 = unlimited).
    pub limit: Option<usize>,
}

impl CliOptions {
    /// Split `args` into flags and positional arguments.
    ///
    /// Flags may appear anywhere. Unknown `--` flags are an error.
    pub fn parse(args: &[String]) -> Result<(CliOptions, Vec<String>), String> {
        let mut options = CliOptions::default();
        let mut positional = Vec::new();

        for arg in args {
            if arg == "--json" {
                options.json = true;
            } else if arg == "--quiet" || arg == "-q" {
                options.quiet = true;
            } else if let Some(limit) = arg.strip_prefix("--limit=") {
                let limit = limit
                    .parse()
                    .map_err(|_| format!("invalid diagnostic limit '{limit}'"))?;
                options.limit = Some(limit);
            } else if arg.starts_with("--") {
                return Err(format!("unknown option '{arg}'"));
            } else {
                positional.push(arg.clone());
            }
        }

        Ok((options, positional))
    }

    /// Builder configuration for these flags.
    pub fn dict_config(&self) -> DictConfig {
        let mut config = if self.quiet {
            DictConfig::quiet()
        } else {
            DictConfig::default()
        };
        if let Some(limit) = self.limit {
            config = config.with_limit(limit);
        }
        config
    }
}
