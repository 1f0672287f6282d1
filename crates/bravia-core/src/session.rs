// ── Session / presentation boundary ──
//
// Ties the pipeline together: raw input → recognizer → interpret →
// relay, with outcomes published on a broadcast channel. This replaces
// the original's delegate-protocol callbacks; the presentation layer
// subscribes instead of implementing handler interfaces.
//
// Error-surfacing policy (see RelayError::alerts_user): cancellation
// is fully silent, an unknown command becomes a reload cue, and only
// missing credentials / transport failures become alerts.

use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, watch};
use tracing::debug;

use crate::command::{GesturePrimitive, Haptic, SemanticCommand};
use crate::error::RelayError;
use crate::gesture::{GestureRecognizer, TouchEvent};
use crate::mode::{interpret, Interpretation, Mode, ModeEvent};
use crate::relay::CommandRelay;

const EVENT_CHANNEL_SIZE: usize = 64;

/// Events the core publishes to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A command reached the TV; drive haptics from the category.
    CommandSent {
        command: SemanticCommand,
        haptic: Haptic,
    },
    /// Double tap — show the fixed action-menu grid.
    ActionMenuRequested,
    /// The active mode changed.
    ModeChanged { mode: Mode },
    /// A table fetch succeeded.
    TableLoaded { command_count: usize },
    /// The cached table had no entry for this command — the caller's
    /// cue to force a reload, not an alert.
    StaleTable { command: SemanticCommand },
    /// User-visible failure (missing credentials or network).
    Alert { message: String },
}

/// One user's remote-control session: recognizer state, active mode,
/// and the relay, glued together behind channels.
pub struct RemoteSession {
    relay: Arc<CommandRelay>,
    recognizer: Mutex<GestureRecognizer>,
    mode: watch::Sender<Mode>,
    events: broadcast::Sender<SessionEvent>,
}

impl RemoteSession {
    /// Create a session in the default mode (app control).
    pub fn new(relay: Arc<CommandRelay>) -> Self {
        let (mode, _) = watch::channel(Mode::default());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self {
            relay,
            recognizer: Mutex::new(GestureRecognizer::new()),
            mode,
            events,
        }
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// The currently active mode.
    pub fn mode(&self) -> Mode {
        *self.mode.borrow()
    }

    /// Observe mode changes.
    pub fn watch_mode(&self) -> watch::Receiver<Mode> {
        self.mode.subscribe()
    }

    /// The relay, for callers that need direct table access.
    pub fn relay(&self) -> &Arc<CommandRelay> {
        &self.relay
    }

    // ── Input ────────────────────────────────────────────────────

    /// Feed one touch event from the presentation layer.
    pub async fn touch(&self, event: TouchEvent) {
        let primitive = self
            .recognizer
            .lock()
            .expect("recognizer lock poisoned")
            .on_touch(event);
        if let Some(primitive) = primitive {
            self.dispatch(primitive).await;
        }
    }

    /// Feed an absolute crown position.
    pub async fn rotate(&self, position: i64) {
        let primitive = self
            .recognizer
            .lock()
            .expect("recognizer lock poisoned")
            .on_rotation(position);
        if let Some(primitive) = primitive {
            self.dispatch(primitive).await;
        }
    }

    /// Dispatch an already-recognized primitive through the active
    /// mode's mapping.
    pub async fn dispatch(&self, primitive: GesturePrimitive) {
        let mode = self.mode();
        match interpret(mode, primitive) {
            None => debug!(%primitive, %mode, "primitive has no mapping"),
            Some(Interpretation::Event(ModeEvent::OpenActionMenu)) => {
                let _ = self.events.send(SessionEvent::ActionMenuRequested);
            }
            Some(Interpretation::Command(command)) => self.send(command).await,
        }
    }

    /// Switch the active mode, announcing the change and dispatching
    /// the mode's activation command (Tv / Home).
    pub async fn set_mode(&self, mode: Mode) {
        if self.mode() == mode {
            return;
        }
        // send() drops the value when no receiver is alive; the mode
        // must change even if nobody holds a watch_mode() handle.
        self.mode.send_replace(mode);
        let _ = self.events.send(SessionEvent::ModeChanged { mode });
        if let Some(command) = mode.activation_command() {
            self.send(command).await;
        }
    }

    // ── Relay plumbing ───────────────────────────────────────────

    /// Send a command and publish the classified outcome.
    pub async fn send(&self, command: SemanticCommand) {
        match self.relay.send_command(command).await {
            Ok(()) => {
                let _ = self.events.send(SessionEvent::CommandSent {
                    command,
                    haptic: command.haptic(),
                });
            }
            Err(RelayError::Cancelled) => {
                // Superseded by a newer request; nothing to report.
                debug!(%command, "send superseded");
            }
            Err(RelayError::UnknownCommand { .. }) => {
                let _ = self.events.send(SessionEvent::StaleTable { command });
            }
            Err(err) => {
                let _ = self.events.send(SessionEvent::Alert {
                    message: err.to_string(),
                });
            }
        }
    }

    /// (Re)load the command table and publish the outcome.
    pub async fn reload_table(&self, force: bool) {
        match self.relay.fetch_command_table(force).await {
            Ok(table) => {
                let _ = self.events.send(SessionEvent::TableLoaded {
                    command_count: table.len(),
                });
            }
            Err(RelayError::Cancelled) => {
                debug!("table fetch superseded");
            }
            Err(err) => {
                let _ = self.events.send(SessionEvent::Alert {
                    message: err.to_string(),
                });
            }
        }
    }
}
