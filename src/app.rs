mod cli;

use std::{
    fs::read_to_string,
    io::{Write, stdout},
    path::Path,
};

use anyhow::{Result, anyhow};
use etcetera::{AppStrategy, AppStrategyArgs, choose_app_strategy};
use folio_lookup::{
    Client, Error, Folio, OkapiConfig, Record,
    accession::{accession_number_from_id, id_from_accession_number},
    config::{self, RawOkapiConfig},
    logger::{debug, info},
};
use serde_json::Value;

use crate::output::{owriteln, suggest};

pub use self::cli::{Cli, Command, OutputFormat};

/// Run the CLI.
pub fn run_cli<C: Client>(cli: Cli, client: C) -> Result<()> {
    info!("folio-lookup version: {}", env!("CARGO_PKG_VERSION"));

    let (config_path, missing_ok) = match cli.config {
        Some(path) => (path, false),
        None => {
            let strategy = choose_app_strategy(AppStrategyArgs {
                top_level_domain: "edu".to_owned(),
                author: env!("CARGO_PKG_NAME").to_owned(),
                app_name: env!("CARGO_PKG_NAME").to_owned(),
            })?;
            (strategy.config_dir().join("config.toml"), true)
        }
    };

    let load_settings = || -> Result<RawOkapiConfig> {
        let settings = config::load(&config_path, missing_ok)?.override_with(cli.okapi.into());
        debug!("Using settings: {settings:?}");
        Ok(settings)
    };

    match cli.command {
        Command::CheckConfig => {
            config::validate(&config_path)?;
        }
        Command::Completions { shell: _ } => {
            unreachable!(
                "Request for completions script should have been handled earlier and the program should have exited then."
            );
        }
        Command::DefaultConfig => {
            config::write_default(&mut stdout().lock())?;
        }
        Command::Get {
            identifier,
            format,
            raw,
            thumbnail,
            ignore_missing,
        } => {
            let folio = Folio::new(OkapiConfig::try_from(load_settings()?)?, client);

            let record = match folio.record(identifier.into()) {
                Ok(record) => record,
                Err(Error::NotFound(identifier)) if ignore_missing => {
                    info!("No record found for '{identifier}'");
                    return Ok(());
                }
                Err(err @ Error::NotFound(_)) => {
                    suggest!(
                        "Check the identifier, or use `--ignore-missing` to skip missing records."
                    );
                    return Err(err.into());
                }
                Err(err) => return Err(err.into()),
            };

            let thumbnail = thumbnail.then(|| record.thumbnail_url(folio.client()));
            if thumbnail == Some("") {
                info!("No thumbnail found for '{}'", record.id);
            }

            if raw {
                let raw_data = record.raw_data.as_ref().unwrap_or(&Value::Null);
                owriteln!("{}", serde_json::to_string_pretty(raw_data)?)?;
            } else {
                print_record(&record, format, thumbnail)?;
            }
        }
        Command::Id { accession_number } => {
            owriteln!("{}", id_from_accession_number(&accession_number)?)?;
        }
        Command::AccessionNumber { instance_id } => {
            let prefix = load_settings()?
                .an_prefix
                .ok_or_else(|| anyhow!("Missing configuration setting 'okapi.an_prefix'"))?;
            owriteln!("{}", accession_number_from_id(&instance_id, &prefix))?;
        }
        Command::Parse { file, format } => {
            let folio = Folio::new(offline_config(load_settings()?)?, client);
            let record = folio.record_from_json(&read_response(&file)?)?;
            print_record(&record, format, None)?;
        }
    }

    Ok(())
}

/// Settings for commands which do not contact the server, so that only the accession number
/// prefix is required.
fn offline_config(settings: RawOkapiConfig) -> Result<OkapiConfig> {
    let an_prefix = settings
        .an_prefix
        .ok_or_else(|| anyhow!("Missing configuration setting 'okapi.an_prefix'"))?;
    Ok(OkapiConfig::new(
        settings.okapi_url.unwrap_or_default(),
        settings.okapi_token.unwrap_or_default(),
        settings.tenant_id.unwrap_or_default(),
        an_prefix,
    ))
}

fn read_response(path: &Path) -> Result<String> {
    read_to_string(path)
        .map_err(|err| anyhow!("Failed to read response file '{}': {err}", path.display()))
}

fn print_record(record: &Record, format: OutputFormat, thumbnail: Option<&str>) -> Result<()> {
    let mut lock = stdout().lock();
    match format {
        OutputFormat::Text => {
            writeln!(lock, "{record}")?;
            if let Some(url) = thumbnail {
                writeln!(lock, "thumbnail:        {url}")?;
            }
        }
        OutputFormat::Json => {
            let mut value = serde_json::to_value(record)?;
            if let (Some(object), Some(url)) = (value.as_object_mut(), thumbnail) {
                object.insert("thumbnail".to_owned(), url.into());
            }
            writeln!(lock, "{}", serde_json::to_string_pretty(&value)?)?;
        }
    }
    Ok(())
}
