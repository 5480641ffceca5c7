use crate::domain::model::Notation;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "boxofports")]
#[command(about = "Expand SIM port specifications for multi-port cellular gateways")]
pub struct CliConfig {
    /// TOML file overriding the `*` port table and default output format
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Expand a port specification (list, range, `*`, or CSV file)
    Expand {
        spec: String,

        /// Output notation; defaults to the configured format
        #[arg(long, value_enum)]
        format: Option<Notation>,

        /// Print a JSON array instead of a comma-joined list
        #[arg(long)]
        json: bool,
    },

    /// Convert individual ports between 1A and 1.01 notation
    Convert {
        #[arg(required = true)]
        ports: Vec<String>,

        #[arg(long, value_enum)]
        to: Notation,
    },

    /// Show the numeric board and slot of each port
    Locate {
        #[arg(required = true)]
        ports: Vec<String>,
    },

    /// Pair ports with IMEIs for a batch IMEI change
    ImeiPlan {
        /// Port specification or CSV file with a 'port' column
        #[arg(long)]
        ports: String,

        /// Comma-separated IMEIs or CSV file with an 'imei' column
        #[arg(long)]
        imeis: String,

        #[arg(long)]
        json: bool,
    },

    /// Write a CSV template for IMEI changes
    ImeiTemplate {
        /// Ports to include; three sample rows when omitted
        #[arg(long)]
        ports: Option<String>,

        #[arg(short, long, default_value = "imei_template.csv")]
        output: PathBuf,
    },

    /// Read an IMEI change file (CSV or JSON) and show the resulting batch
    ImeiImport {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Expand { spec, .. } => validate_non_empty_string("spec", spec),
            Command::Convert { .. } | Command::Locate { .. } => Ok(()),
            Command::ImeiPlan { ports, imeis, .. } => {
                validate_non_empty_string("ports", ports)?;
                validate_non_empty_string("imeis", imeis)
            }
            Command::ImeiTemplate { output, .. } => {
                validate_path("output", &output.to_string_lossy())
            }
            Command::ImeiImport { file, .. } => validate_path("file", &file.to_string_lossy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expand_command() {
        let config =
            CliConfig::try_parse_from(["boxofports", "expand", "1A-1D", "--format", "decimal"])
                .unwrap();
        match config.command {
            Command::Expand { spec, format, json } => {
                assert_eq!(spec, "1A-1D");
                assert_eq!(format, Some(Notation::Decimal));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let config =
            CliConfig::try_parse_from(["boxofports", "locate", "4D", "--verbose"]).unwrap();
        assert!(config.verbose);
        assert!(config.config.is_none());
    }

    #[test]
    fn test_validate_rejects_blank_spec() {
        let config = CliConfig::try_parse_from(["boxofports", "expand", "  "]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_convert_requires_ports() {
        assert!(CliConfig::try_parse_from(["boxofports", "convert", "--to", "alpha"]).is_err());
    }
}
