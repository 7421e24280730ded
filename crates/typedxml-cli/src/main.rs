use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use typedxml::adapter::{DEFAULT_NAME, DEFAULT_SUFFIX};
use typedxml::{
    export_settings, import_settings, AdapterConfig, Diagnostics, DirectoryBundle, Mapping,
    Outcome, WriterConfig, XmlSettingsAdapter,
};

mod json;

#[derive(Debug, Parser)]
#[command(
    name = "typedxml",
    version,
    about = "Export and import settings as typed XML documents"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Export a JSON settings file into a bundle directory
    Export {
        #[command(flatten)]
        target: Target,
        /// Write a single line without XML declaration
        #[arg(long)]
        compact: bool,
    },
    /// Merge a bundle's settings document into a JSON settings file
    Import {
        #[command(flatten)]
        target: Target,
    },
    /// Decode a settings document and print it as JSON
    Show {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

#[derive(Debug, clap::Args)]
struct Target {
    /// JSON settings file
    #[arg(short, long, value_name = "SETTINGS")]
    settings: PathBuf,
    /// Bundle directory holding the XML document
    #[arg(short, long, value_name = "DIR")]
    bundle: PathBuf,
    /// Document name, without suffix
    #[arg(long, default_value = DEFAULT_NAME)]
    name: String,
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    suffix: String,
}

impl Target {
    fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig::named(self.name.as_str()).with_suffix(self.suffix.as_str())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Export { target, compact } => export(&target, compact),
        Command::Import { target } => import(&target),
        Command::Show { input } => show(&input),
    }
}

fn export(target: &Target, compact: bool) -> Result<()> {
    let settings = read_settings(&target.settings)?
        .with_context(|| format!("settings file {} not found", target.settings.display()))?;

    let writer = if compact {
        WriterConfig::compact()
    } else {
        WriterConfig::default()
    };
    let config = target.adapter_config().with_writer(writer);
    let mut locator = Some(XmlSettingsAdapter::with_config(settings, config));
    let mut bundle = DirectoryBundle::new(&target.bundle);
    let mut diagnostics = Diagnostics::new();

    let outcome = export_settings(&mut locator, &mut bundle, &mut diagnostics)
        .context("failed to export settings")?;
    match outcome {
        Outcome::Exported { filename, bytes } => {
            info!(%filename, bytes, "exported settings");
            Ok(())
        }
        other => bail!("settings were not exported: {other:?}"),
    }
}

fn import(target: &Target) -> Result<()> {
    let settings = read_settings(&target.settings)?.unwrap_or_default();
    let mut locator = Some(XmlSettingsAdapter::with_config(
        settings,
        target.adapter_config(),
    ));
    let bundle = DirectoryBundle::new(&target.bundle);
    let mut diagnostics = Diagnostics::new();

    let outcome = import_settings(&mut locator, &bundle, &mut diagnostics)
        .context("failed to import settings")?;
    let Outcome::Imported { filename, keys } = outcome else {
        warn!(?outcome, "nothing imported");
        return Ok(());
    };
    info!(%filename, keys = keys.len(), "imported settings");

    let settings = locator
        .map(XmlSettingsAdapter::into_settings)
        .unwrap_or_default();
    write_settings(&target.settings, &settings)
}

fn show(input: &Path) -> Result<()> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("failed to read input file {}", input.display()))?;
    let mut diagnostics = Diagnostics::new();
    let Some(value) = typedxml::from_bytes(&bytes, &mut diagnostics)
        .with_context(|| format!("failed to parse {}", input.display()))?
    else {
        bail!("{} carries no settings data", input.display());
    };

    let mut output = serde_json::to_string_pretty(&json::from_value(&value))?;
    output.push('\n');
    io::stdout()
        .write_all(output.as_bytes())
        .context("failed to write stdout")?;
    Ok(())
}

/// `Ok(None)` if the file does not exist
fn read_settings(path: &Path) -> Result<Option<Mapping>> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file {}", path.display()))
        }
    };
    let parsed: serde_json::Value = serde_json::from_str(&data)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    match parsed {
        serde_json::Value::Object(entries) => Ok(Some(json::to_mapping(entries))),
        _ => bail!("settings file {} must hold a JSON object", path.display()),
    }
}

fn write_settings(path: &Path, settings: &Mapping) -> Result<()> {
    let object = serde_json::Value::Object(json::from_mapping(settings));
    let mut data = serde_json::to_string_pretty(&object)?;
    data.push('\n');
    std::fs::write(path, data)
        .with_context(|| format!("failed to write settings file {}", path.display()))
}
