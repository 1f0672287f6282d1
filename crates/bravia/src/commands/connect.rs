//! Interactive setup wizard: address, PSK, connectivity check.

use std::sync::Arc;
use std::time::Duration;

use dialoguer::{Input, Select};
use secrecy::SecretString;

use bravia_api::{BraviaClient, TransportConfig};
use bravia_core::{CommandRelay, CredentialStore};
use bravia_config::{config_path, PskStorage, StoredCredentials};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let stored = StoredCredentials::load()?;

    eprintln!("Bravia remote — connection wizard");
    eprintln!("   Config path: {}\n", config_path().display());

    // 1. TV address
    let current = stored.address();
    let mut address_prompt = Input::new().with_prompt("TV address (IP or host[:port])");
    if !current.is_empty() {
        address_prompt = address_prompt.default(current);
    }
    let address: String = address_prompt.interact_text().map_err(prompt_err)?;

    if address.trim().is_empty() {
        return Err(CliError::Validation {
            field: "address".into(),
            reason: "address cannot be empty".into(),
        });
    }

    // 2. Pre-shared key
    let psk = rpassword::prompt_password("Pre-shared key: ").map_err(prompt_err)?;
    if psk.is_empty() {
        return Err(CliError::Validation {
            field: "psk".into(),
            reason: "pre-shared key cannot be empty".into(),
        });
    }

    // 3. Where to keep it
    let store_choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let store_selection = Select::new()
        .with_prompt("Where to store the pre-shared key?")
        .items(store_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let storage = if store_selection == 0 {
        PskStorage::Keyring
    } else {
        PskStorage::PlainFile
    };

    stored.set_address(address.trim())?;
    stored.set_psk(&SecretString::from(psk), storage)?;

    // 4. Connectivity check: a forced discovery proves the address
    // answers and the PSK is at least plausible.
    let transport = TransportConfig {
        timeout: Duration::from_secs(global.timeout),
    };
    let client = BraviaClient::new(&transport).map_err(|e| CliError::from_api(e, &address))?;
    let relay = CommandRelay::with_client(client, Arc::new(stored) as Arc<dyn CredentialStore>);

    let table = relay
        .fetch_command_table(true)
        .await
        .map_err(|e| CliError::from_relay(e, &address))?;

    eprintln!(
        "\n{} connected — TV reports {} commands",
        output::check_mark(),
        table.len()
    );
    if global.psk.is_some() {
        eprintln!("   (the --psk flag is no longer needed; the key is stored)");
    }
    Ok(())
}
