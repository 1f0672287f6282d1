// ── Command relay ──
//
// Owns the network session, the cached command-name → IRCC-code table,
// and the single-flight request slot. Invariants:
//
//   * at most one outbound TV request exists at any instant;
//   * starting a new request (fetch or send) cancels the previous one
//     first, and the superseded call resolves `Cancelled`;
//   * a cancelled request never mutates the table or reports success,
//     even if its response arrives after cancellation;
//   * the table is replaced atomically on a successful fetch, never
//     merged — readers always see a consistent whole-table snapshot.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use bravia_api::{BraviaClient, CommandEntry, TransportConfig};

use crate::command::SemanticCommand;
use crate::credentials::CredentialStore;
use crate::error::RelayError;

/// Immutable name → IRCC-code mapping fetched from the TV.
///
/// A non-empty table implies the device connection was validated at
/// least once. Populated on first successful fetch or explicit
/// reconnect, discarded only by a forced reload.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: HashMap<String, String>,
}

impl CommandTable {
    pub(crate) fn from_entries(entries: Vec<CommandEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.name, e.value)).collect(),
        }
    }

    /// The activation code registered under `name`, if the TV has one.
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, code)` pairs (listing order is unspecified).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }
}

/// The single-slot in-flight request handle. The sequence number lets
/// a finishing request clear the slot only if it still owns it.
struct InFlight {
    seq: u64,
    token: CancellationToken,
}

/// Relays semantic commands to the TV with single-flight semantics.
///
/// The cached table and the in-flight slot are owned exclusively by
/// this instance; concurrent readers get whole-table snapshots via
/// [`cached_table`](Self::cached_table).
pub struct CommandRelay {
    client: BraviaClient,
    credentials: Arc<dyn CredentialStore>,
    table: ArcSwapOption<CommandTable>,
    in_flight: Mutex<Option<InFlight>>,
    next_seq: AtomicU64,
}

impl CommandRelay {
    /// Create a relay with a default-transport HTTP client.
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Result<Self, RelayError> {
        let client = BraviaClient::new(&TransportConfig::default())?;
        Ok(Self::with_client(client, credentials))
    }

    /// Create a relay with a pre-built API client (custom timeout,
    /// shared `reqwest::Client`, ...).
    pub fn with_client(client: BraviaClient, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            client,
            credentials,
            table: ArcSwapOption::const_empty(),
            in_flight: Mutex::new(None),
            next_seq: AtomicU64::new(0),
        }
    }

    /// The current table snapshot, if one has been fetched.
    pub fn cached_table(&self) -> Option<Arc<CommandTable>> {
        self.table.load_full()
    }

    /// Fetch the command table, preferring the cache.
    ///
    /// With a non-empty cache and `force_reload == false` this returns
    /// without any network call. Otherwise it issues a discovery
    /// request — after checking that an address is configured at all —
    /// and replaces the cache atomically on success.
    pub async fn fetch_command_table(
        &self,
        force_reload: bool,
    ) -> Result<Arc<CommandTable>, RelayError> {
        if !force_reload {
            if let Some(cached) = self.table.load_full() {
                if !cached.is_empty() {
                    debug!(commands = cached.len(), "using cached command table");
                    return Ok(cached);
                }
            }
        }

        let address = self.credentials.address();
        if address.is_empty() {
            return Err(RelayError::MissingCredentials);
        }

        let (seq, token) = self.begin_request();
        debug!(seq, force_reload, "fetching command table");

        let result = tokio::select! {
            biased;
            () = token.cancelled() => return Err(RelayError::Cancelled),
            result = self.client.remote_controller_info(&address) => result,
        };

        // A newer call may have cancelled us between the response
        // arriving and this check — a superseded fetch must not
        // publish its table.
        if token.is_cancelled() {
            debug!(seq, "fetch superseded after response");
            return Err(RelayError::Cancelled);
        }
        self.finish_request(seq);

        let entries = result?;
        let table = Arc::new(CommandTable::from_entries(entries));
        debug!(seq, commands = table.len(), "command table replaced");
        self.table.store(Some(Arc::clone(&table)));
        Ok(table)
    }

    /// Send one semantic command to the TV.
    ///
    /// The device code comes from the cached table — a missing table
    /// or entry resolves [`RelayError::UnknownCommand`] with zero
    /// network calls. Any in-flight request is cancelled before the
    /// new one is issued.
    pub async fn send_command(&self, command: SemanticCommand) -> Result<(), RelayError> {
        let code = self
            .table
            .load_full()
            .and_then(|table| table.code_for(command.device_name()).map(String::from))
            .ok_or_else(|| {
                warn!(%command, "command missing from cached table");
                RelayError::UnknownCommand {
                    name: command.to_string(),
                }
            })?;

        let address = self.credentials.address();
        if address.is_empty() {
            return Err(RelayError::MissingCredentials);
        }

        let (seq, token) = self.begin_request();
        debug!(seq, %command, "sending IRCC command");

        let psk = self.credentials.token();
        let result = tokio::select! {
            biased;
            () = token.cancelled() => return Err(RelayError::Cancelled),
            result = self.client.send_ircc(&address, &psk, &code) => result,
        };

        if token.is_cancelled() {
            debug!(seq, %command, "send superseded after response");
            return Err(RelayError::Cancelled);
        }
        self.finish_request(seq);

        result?;
        debug!(seq, %command, "command delivered");
        Ok(())
    }

    /// Cancel and clear any in-flight request. Idempotent; callable
    /// with nothing in flight.
    pub fn cancel_ongoing(&self) {
        let mut slot = self.in_flight.lock().expect("in-flight lock poisoned");
        if let Some(in_flight) = slot.take() {
            debug!(seq = in_flight.seq, "cancelling in-flight request");
            in_flight.token.cancel();
        }
    }

    /// Cancel the previous request (if any) and install a fresh
    /// in-flight handle. The cancel-then-replace happens under one
    /// lock acquisition, so two racing callers cannot both believe
    /// they own the slot.
    fn begin_request(&self) -> (u64, CancellationToken) {
        let mut slot = self.in_flight.lock().expect("in-flight lock poisoned");
        if let Some(previous) = slot.take() {
            debug!(seq = previous.seq, "superseding in-flight request");
            previous.token.cancel();
        }
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        *slot = Some(InFlight {
            seq,
            token: token.clone(),
        });
        (seq, token)
    }

    /// Clear the slot, but only if this request still owns it — a
    /// newer request may have replaced the handle already.
    fn finish_request(&self, seq: u64) {
        let mut slot = self.in_flight.lock().expect("in-flight lock poisoned");
        if slot.as_ref().is_some_and(|f| f.seq == seq) {
            *slot = None;
        }
    }
}
