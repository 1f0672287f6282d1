//! Gesture-to-command dispatch and network relay for a wrist-worn
//! Bravia remote.
//!
//! The crate owns everything between raw input events and the TV's
//! wire protocol:
//!
//! - **[`GestureRecognizer`]** — synchronous state machine turning a
//!   continuous pointer/crown stream into discrete
//!   [`GesturePrimitive`]s.
//!
//! - **[`interpret`]** — pure (mode, primitive) → command mapping with
//!   an explicit base-mapping fallback, switched by the active
//!   [`Mode`] (app navigation vs. TV control).
//!
//! - **[`CommandRelay`]** — owns the cached name→IRCC-code
//!   [`CommandTable`] and enforces single-flight request semantics:
//!   at most one outbound TV request exists at any instant, a newer
//!   call cancels the older one, and a superseded call resolves
//!   [`RelayError::Cancelled`] rather than reporting a stale outcome.
//!
//! - **[`RemoteSession`]** — the presentation boundary: feeds input
//!   into the pipeline and publishes [`SessionEvent`]s (haptic cues,
//!   alerts, mode changes) on a broadcast channel instead of
//!   delegate callbacks.

pub mod command;
pub mod credentials;
pub mod error;
pub mod gesture;
pub mod mode;
pub mod relay;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{GesturePrimitive, Haptic, SemanticCommand};
pub use credentials::{CredentialStore, MemoryCredentials};
pub use error::RelayError;
pub use gesture::{GestureRecognizer, Point, TouchEvent};
pub use mode::{interpret, Interpretation, Mode, ModeEvent};
pub use relay::{CommandRelay, CommandTable};
pub use session::{RemoteSession, SessionEvent};
