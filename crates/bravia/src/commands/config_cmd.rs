//! Config subcommand handlers.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use bravia_core::CredentialStore;
use bravia_config::{config_path, PskStorage, StoredCredentials};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct ConfigSummary {
    address: String,
    psk_configured: bool,
    path: String,
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let stored = StoredCredentials::load()?;
            let summary = ConfigSummary {
                address: stored.address(),
                psk_configured: !stored.token().expose_secret().is_empty(),
                path: config_path().display().to_string(),
            };

            let rendered = output::render_single(
                &global.output,
                &summary,
                |s| {
                    format!(
                        "address: {}\npsk:     {}\npath:    {}",
                        if s.address.is_empty() { "(unset)" } else { s.address.as_str() },
                        if s.psk_configured { "(configured)" } else { "(unset)" },
                        s.path,
                    )
                },
                |s| s.address.clone(),
            );
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::SetAddress { address } => {
            let stored = StoredCredentials::load()?;
            stored.set_address(address.trim())?;
            if !global.quiet {
                eprintln!("{} address saved", output::check_mark());
            }
            Ok(())
        }

        ConfigCommand::SetPsk { file } => {
            let psk = rpassword::prompt_password("Pre-shared key: ").map_err(|e| {
                CliError::Validation {
                    field: "interactive".into(),
                    reason: format!("prompt failed: {e}"),
                }
            })?;
            if psk.is_empty() {
                return Err(CliError::Validation {
                    field: "psk".into(),
                    reason: "pre-shared key cannot be empty".into(),
                });
            }

            let storage = if file {
                PskStorage::PlainFile
            } else {
                PskStorage::Keyring
            };
            let stored = StoredCredentials::load()?;
            stored.set_psk(&SecretString::from(psk), storage)?;
            if !global.quiet {
                eprintln!("{} pre-shared key saved", output::check_mark());
            }
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
