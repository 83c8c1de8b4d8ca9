// SPDX-License-Identifier: MPL-2.0
//! Command-line front end.
//!
//! [`parse_args`] turns the process arguments into [`CliArgs`]; [`run`]
//! executes one [`Command`] against a store and writes the result to `out`.
//! Messages mirror the toasts of the admin panel.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::application::port::Storage;
use crate::application::store::SettingsStore;
use crate::error::{Error, Result};
use crate::ui::{DashboardView, FormField, FormFields};

use super::config::{self, Config};

pub const HELP: &str = "\
smartpos-settings - manage SmartPOS admin settings

USAGE:
    smartpos-settings [OPTIONS] <COMMAND> [ARGS]

OPTIONS:
    --config-dir <DIR>    Directory holding settings.toml
    --data-dir <DIR>      Directory holding the settings slot
    -h, --help            Print this help

COMMANDS:
    show [--json]         Print the current settings
    set <field=value>...  Change form fields (e.g. companyName=Acme taxRate=18)
    reset                 Restore factory defaults
    export [PATH|-]       Write a snapshot (default: configured file name)
    import <PATH>         Replace settings with a snapshot
    toggle <KEY>          Switch a function on or off
    functions             List functions and their state
    logo <PATH>           Set the company logo (max 2 MiB)
    remove-logo           Remove the company logo
    paths                 Print the resolved config and data locations
";

/// A parsed subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show { json: bool },
    Set(Vec<(FormField, String)>),
    Reset,
    /// `None` uses the configured file name; `-` writes to stdout.
    Export { path: Option<PathBuf> },
    Import { path: PathBuf },
    Toggle { key: String },
    Functions,
    Logo { path: PathBuf },
    RemoveLogo,
    Paths,
    Help,
}

/// Parsed process arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub command: Command,
}

/// Parses process arguments.
///
/// # Errors
///
/// Returns [`Error::Usage`] for unknown commands, missing operands, or
/// malformed `field=value` pairs.
pub fn parse_args(mut args: pico_args::Arguments) -> Result<CliArgs> {
    let help = args.contains(["-h", "--help"]);
    let config_dir: Option<PathBuf> = args.opt_value_from_str("--config-dir")?;
    let data_dir: Option<PathBuf> = args.opt_value_from_str("--data-dir")?;
    let json = args.contains("--json");
    let subcommand = args.subcommand()?;

    let operands = args
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|raw| Error::Usage(format!("argument is not UTF-8: {raw:?}")))
        })
        .collect::<Result<Vec<String>>>()?;

    let command = if help {
        Command::Help
    } else {
        parse_command(subcommand.as_deref(), operands, json)?
    };

    Ok(CliArgs {
        config_dir,
        data_dir,
        command,
    })
}

fn parse_command(name: Option<&str>, operands: Vec<String>, json: bool) -> Result<Command> {
    let mut operands = operands.into_iter();

    let command = match name {
        None | Some("help") => Command::Help,
        Some("show") => Command::Show { json },
        Some("set") => {
            let pairs = operands
                .by_ref()
                .map(|pair| parse_assignment(&pair))
                .collect::<Result<Vec<_>>>()?;
            if pairs.is_empty() {
                return Err(Error::Usage("set needs at least one field=value".into()));
            }
            Command::Set(pairs)
        }
        Some("reset") => Command::Reset,
        Some("export") => Command::Export {
            path: operands.next().map(PathBuf::from),
        },
        Some("import") => Command::Import {
            path: PathBuf::from(required(&mut operands, "snapshot path")?),
        },
        Some("toggle") => Command::Toggle {
            key: required(&mut operands, "function key")?,
        },
        Some("functions") => Command::Functions,
        Some("logo") => Command::Logo {
            path: PathBuf::from(required(&mut operands, "logo path")?),
        },
        Some("remove-logo") => Command::RemoveLogo,
        Some("paths") => Command::Paths,
        Some(other) => return Err(Error::Usage(format!("unknown command `{other}`"))),
    };

    if let Some(extra) = operands.next() {
        return Err(Error::Usage(format!("unexpected argument `{extra}`")));
    }
    Ok(command)
}

fn required(operands: &mut impl Iterator<Item = String>, what: &str) -> Result<String> {
    operands
        .next()
        .ok_or_else(|| Error::Usage(format!("missing {what}")))
}

fn parse_assignment(pair: &str) -> Result<(FormField, String)> {
    let (id, value) = pair
        .split_once('=')
        .ok_or_else(|| Error::Usage(format!("expected field=value, got `{pair}`")))?;
    let field = FormField::from_id(id.trim()).ok_or_else(|| {
        let known: Vec<_> = FormField::ALL.iter().map(|field| field.id()).collect();
        Error::Usage(format!("unknown field `{id}`; expected one of: {}", known.join(", ")))
    })?;
    Ok((field, value.to_string()))
}

/// Executes `command`, writing human-readable output to `out`.
///
/// # Errors
///
/// Returns the operation's error, or [`Error::Io`] when reading input files
/// or writing output fails.
pub fn run<S: Storage>(
    command: Command,
    store: &mut SettingsStore<S>,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Help => write!(out, "{HELP}")?,
        Command::Show { json } => show(store, json, out)?,
        Command::Set(assignments) => {
            let mut fields = FormFields::from_settings(store.current());
            for (field, value) in assignments {
                fields.set(field, value);
            }
            let report = store.save(fields.to_patch())?;
            if let Some(first) = report.rejected.first() {
                for err in &report.rejected {
                    writeln!(out, "rejected: {err}")?;
                }
                return Err(first.clone().into());
            }
            writeln!(out, "Settings saved successfully!")?;
        }
        Command::Reset => {
            store.try_reset()?;
            writeln!(out, "Settings reset to default!")?;
        }
        Command::Export { path } => {
            let snapshot = store.export_snapshot()?;
            let path = path.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
            if path.as_os_str() == "-" {
                out.write_all(&snapshot)?;
            } else {
                fs::write(&path, &snapshot)?;
                writeln!(out, "Settings exported successfully! ({})", path.display())?;
            }
        }
        Command::Import { path } => {
            let bytes = fs::read(&path)?;
            let report = store.import_snapshot(&bytes)?;
            for err in &report.discarded {
                writeln!(out, "discarded: {err}")?;
            }
            writeln!(out, "Settings imported successfully!")?;
        }
        Command::Toggle { key } => {
            let enabled = store.toggle_function(&key)?;
            store.persist()?;
            let state = if enabled { "enabled" } else { "disabled" };
            writeln!(out, "{key}: {state}")?;
        }
        Command::Functions => {
            for entry in store.current().functions.entries() {
                let mark = if entry.enabled { 'x' } else { ' ' };
                writeln!(
                    out,
                    "[{mark}] {:<16} {:<18} {}",
                    entry.key.as_str(),
                    entry.name,
                    entry.description
                )?;
            }
        }
        Command::Logo { path } => {
            let bytes = fs::read(&path)?;
            store.set_logo(bytes)?;
            store.persist()?;
            writeln!(out, "Logo updated successfully!")?;
        }
        Command::RemoveLogo => {
            store.remove_logo();
            store.persist()?;
            writeln!(out, "Logo removed!")?;
        }
        Command::Paths => {
            let config_file = config::config_path_with_override(None);
            let data_dir = config.data_dir();
            writeln!(out, "config: {}", display_or_unknown(config_file))?;
            writeln!(out, "data:   {}", display_or_unknown(data_dir))?;
            writeln!(out, "slot:   {} ({:?})", config.storage.key, config.storage.backend)?;
        }
    }
    Ok(())
}

fn show<S: Storage>(store: &SettingsStore<S>, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        out.write_all(&store.export_snapshot()?)?;
        return Ok(());
    }
    let settings = store.current();
    let view = DashboardView::from_settings(settings);
    writeln!(out, "{}", view.page_title)?;
    for (field, value) in FormFields::from_settings(settings).iter() {
        writeln!(out, "  {:<16} {value}", field.id())?;
    }
    let logo = match &settings.branding.logo {
        Some(logo) => format!("{}, {} bytes", logo.format().mime_type(), logo.len()),
        None => "none".to_string(),
    };
    writeln!(out, "  {:<16} {logo}", "logo")?;
    let enabled = view.menu.iter().filter(|entry| entry.enabled).count();
    writeln!(out, "  {:<16} {enabled} of {} enabled", "functions", view.menu.len())?;
    Ok(())
}

fn display_or_unknown(path: Option<PathBuf>) -> String {
    path.map_or_else(|| "<unknown>".to_string(), |path| path.display().to_string())
}
