use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use clap_complete::aot::Shell;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use folio_lookup::{LookupArgs, config::RawOkapiConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Use configuration file.
    #[arg(
        short = 'C',
        long,
        value_name = "PATH",
        env = "FOLIO_LOOKUP_CONFIG_PATH",
        global = true
    )]
    pub config: Option<PathBuf>,
    #[command(flatten)]
    pub okapi: OkapiArgs,
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

/// Settings which take precedence over the configuration file.
#[derive(Args, Debug, Default)]
pub struct OkapiArgs {
    /// Base URL of the Okapi gateway.
    #[arg(long, value_name = "URL", env = "FOLIO_OKAPI_URL", global = true)]
    pub okapi_url: Option<String>,
    /// Okapi API token.
    #[arg(
        long,
        value_name = "TOKEN",
        env = "FOLIO_OKAPI_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub okapi_token: Option<String>,
    /// FOLIO tenant identifier.
    #[arg(long, value_name = "ID", env = "FOLIO_TENANT_ID", global = true)]
    pub tenant_id: Option<String>,
    /// Accession number prefix.
    #[arg(long, value_name = "PREFIX", env = "FOLIO_AN_PREFIX", global = true)]
    pub an_prefix: Option<String>,
}

impl From<OkapiArgs> for RawOkapiConfig {
    fn from(args: OkapiArgs) -> Self {
        Self {
            okapi_url: args.okapi_url,
            okapi_token: args.okapi_token,
            tenant_id: args.tenant_id,
            an_prefix: args.an_prefix,
        }
    }
}

/// The identifier of the record to retrieve.
#[derive(Args, Debug, Default)]
#[command(group(ArgGroup::new("identifier").multiple(false)))]
pub struct IdentifierArgs {
    /// Look up the instance of the item with this barcode.
    #[arg(short, long, group = "identifier")]
    pub barcode: Option<String>,
    /// Look up the instance with this accession number.
    #[arg(short, long, group = "identifier")]
    pub accession_number: Option<String>,
    /// Look up the instance with this id.
    #[arg(short, long, group = "identifier")]
    pub instance_id: Option<String>,
}

impl From<IdentifierArgs> for LookupArgs {
    fn from(args: IdentifierArgs) -> Self {
        Self {
            barcode: args.barcode,
            accession_number: args.accession_number,
            instance_id: args.instance_id,
        }
    }
}

#[derive(Debug, Copy, Clone, ValueEnum, Default)]
pub enum OutputFormat {
    /// One field per line.
    #[default]
    Text,
    /// A JSON object.
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check the configuration file for errors.
    CheckConfig,
    /// Generate a shell completions script.
    #[clap(hide = true)]
    Completions {
        /// The shell for which to generate the script.
        shell: Shell,
    },
    /// Generate configuration file.
    #[clap(hide = true)]
    DefaultConfig,
    /// Retrieve a record from FOLIO.
    ///
    /// Provide at most one identifier. If no identifier is provided, the empty record is printed.
    Get {
        #[command(flatten)]
        identifier: IdentifierArgs,
        /// Output format.
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
        /// Print the instance record returned by FOLIO instead of the normalized record.
        #[arg(long, conflicts_with = "format")]
        raw: bool,
        /// Also look up a cover thumbnail.
        #[arg(long)]
        thumbnail: bool,
        /// Do not fail if there is no matching record.
        #[arg(long)]
        ignore_missing: bool,
    },
    /// Print the instance id corresponding to an accession number.
    Id {
        /// The accession number.
        accession_number: String,
    },
    /// Print the accession number corresponding to an instance id.
    AccessionNumber {
        /// The instance id.
        instance_id: String,
    },
    /// Build a record from a saved FOLIO response.
    Parse {
        /// A file containing the JSON response.
        file: PathBuf,
        /// Output format.
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}
