//! Core CLI definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "piratedb")]
#[command(about = "Pirate101 game data extractor", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "PIRATEDB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the SQLite database from an extracted archive
    #[command(visible_alias = "b")]
    Build {
        /// Directory holding the JSON-exported templates
        archive: PathBuf,

        /// Output database (replaced if it exists)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// English locale strings as a JSON object of key to text
        #[arg(short, long)]
        locale: Option<PathBuf>,
    },

    /// Classify one template and print its projected record
    #[command(visible_alias = "c")]
    Classify {
        /// Directory holding the JSON-exported templates
        archive: PathBuf,

        /// Template path inside the archive (e.g. ObjectData/Items/Hat.xml)
        path: String,
    },

    /// Scan an archive and print per-kind record counts
    #[command(visible_alias = "s")]
    Scan {
        /// Directory holding the JSON-exported templates
        archive: PathBuf,

        /// Print every record as JSON instead of counts
        #[arg(long)]
        json: bool,
    },

    /// Show or create the configuration file
    Config {
        /// Show the effective configuration
        #[arg(long)]
        show: bool,

        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["piratedb", "-vv", "build", "Root", "-o", "out.db"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Build {
                archive,
                output,
                locale,
            } => {
                assert_eq!(archive, PathBuf::from("Root"));
                assert_eq!(output, Some(PathBuf::from("out.db")));
                assert_eq!(locale, None);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["piratedb", "scan", "Root", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }
}
