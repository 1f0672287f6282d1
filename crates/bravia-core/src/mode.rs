// ── Mode handler ──
//
// A single pure function over (mode, primitive) pairs replaces the
// original's handler-subclass dispatch. Unmapped primitives in a
// specialized mode resolve exactly as in the base mapping — delegated
// explicitly, never silently dropped.

use serde::{Deserialize, Serialize};

use crate::command::{GesturePrimitive, SemanticCommand};

/// The active gesture-to-command mapping strategy.
///
/// Exactly one mode is active at any time; there is no "no mode" state
/// after initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Mode {
    /// Swipes navigate the on-screen UI (directional moves + confirm).
    #[default]
    AppControl,
    /// Swipes flip channels.
    TvControl,
}

impl Mode {
    /// The command conceptually re-dispatched when this mode is
    /// selected: entering TV control activates the tuner, returning
    /// to app control goes home.
    pub fn activation_command(self) -> Option<SemanticCommand> {
        match self {
            Self::AppControl => Some(SemanticCommand::Home),
            Self::TvControl => Some(SemanticCommand::Tv),
        }
    }
}

/// An interpretation outcome that is not a device command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// Open the fixed action-menu grid (double tap in every mode).
    OpenActionMenu,
}

/// What a primitive means under the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    Command(SemanticCommand),
    Event(ModeEvent),
}

/// Translate a raw primitive into its meaning under `mode`.
///
/// Pure: no side effects, no network, same inputs always yield the
/// same result. Primitives without a meaning in either the mode's own
/// table or the base mapping return `None`.
pub fn interpret(mode: Mode, primitive: GesturePrimitive) -> Option<Interpretation> {
    use Interpretation::{Command, Event};

    match (mode, primitive) {
        // ── App-navigation mappings ──────────────────────────────
        (Mode::AppControl, GesturePrimitive::SwipeUp) => Some(Command(SemanticCommand::Up)),
        (Mode::AppControl, GesturePrimitive::SwipeDown) => Some(Command(SemanticCommand::Down)),
        (Mode::AppControl, GesturePrimitive::SwipeLeft) => Some(Command(SemanticCommand::Left)),
        (Mode::AppControl, GesturePrimitive::SwipeRight) => Some(Command(SemanticCommand::Right)),
        (Mode::AppControl, GesturePrimitive::Tap) => Some(Command(SemanticCommand::Confirm)),

        // ── TV-control mappings ──────────────────────────────────
        (Mode::TvControl, GesturePrimitive::SwipeLeft | GesturePrimitive::SwipeDown) => {
            Some(Command(SemanticCommand::ChannelDown))
        }
        (Mode::TvControl, GesturePrimitive::SwipeRight | GesturePrimitive::SwipeUp) => {
            Some(Command(SemanticCommand::ChannelUp))
        }

        // ── Base mapping (shared fallback for both modes) ────────
        (_, GesturePrimitive::DoubleTap) => Some(Event(ModeEvent::OpenActionMenu)),
        (_, GesturePrimitive::LongPress) => Some(Command(SemanticCommand::Power)),
        (_, GesturePrimitive::RotaryIncrement) => Some(Command(SemanticCommand::VolumeUp)),
        (_, GesturePrimitive::RotaryDecrement) => Some(Command(SemanticCommand::VolumeDown)),
        (_, GesturePrimitive::Tap) => None,
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    const ALL_PRIMITIVES: [GesturePrimitive; 9] = [
        GesturePrimitive::Tap,
        GesturePrimitive::DoubleTap,
        GesturePrimitive::LongPress,
        GesturePrimitive::SwipeUp,
        GesturePrimitive::SwipeDown,
        GesturePrimitive::SwipeLeft,
        GesturePrimitive::SwipeRight,
        GesturePrimitive::RotaryIncrement,
        GesturePrimitive::RotaryDecrement,
    ];

    #[test]
    fn interpret_is_pure() {
        for mode in [Mode::AppControl, Mode::TvControl] {
            for primitive in ALL_PRIMITIVES {
                assert_eq!(interpret(mode, primitive), interpret(mode, primitive));
            }
        }
    }

    #[test]
    fn app_control_swipes_are_directional_moves() {
        let cases = [
            (GesturePrimitive::SwipeUp, SemanticCommand::Up),
            (GesturePrimitive::SwipeDown, SemanticCommand::Down),
            (GesturePrimitive::SwipeLeft, SemanticCommand::Left),
            (GesturePrimitive::SwipeRight, SemanticCommand::Right),
            (GesturePrimitive::Tap, SemanticCommand::Confirm),
        ];
        for (primitive, command) in cases {
            assert_eq!(
                interpret(Mode::AppControl, primitive),
                Some(Interpretation::Command(command))
            );
        }
    }

    #[test]
    fn tv_control_swipes_flip_channels() {
        assert_eq!(
            interpret(Mode::TvControl, GesturePrimitive::SwipeLeft),
            Some(Interpretation::Command(SemanticCommand::ChannelDown))
        );
        assert_eq!(
            interpret(Mode::TvControl, GesturePrimitive::SwipeDown),
            Some(Interpretation::Command(SemanticCommand::ChannelDown))
        );
        assert_eq!(
            interpret(Mode::TvControl, GesturePrimitive::SwipeRight),
            Some(Interpretation::Command(SemanticCommand::ChannelUp))
        );
        assert_eq!(
            interpret(Mode::TvControl, GesturePrimitive::SwipeUp),
            Some(Interpretation::Command(SemanticCommand::ChannelUp))
        );
    }

    #[test]
    fn switching_mode_remaps_the_same_swipe() {
        assert_eq!(
            interpret(Mode::AppControl, GesturePrimitive::SwipeLeft),
            Some(Interpretation::Command(SemanticCommand::Left))
        );
        assert_eq!(
            interpret(Mode::TvControl, GesturePrimitive::SwipeLeft),
            Some(Interpretation::Command(SemanticCommand::ChannelDown))
        );
    }

    #[test]
    fn base_mapping_applies_in_both_modes() {
        for mode in [Mode::AppControl, Mode::TvControl] {
            assert_eq!(
                interpret(mode, GesturePrimitive::DoubleTap),
                Some(Interpretation::Event(ModeEvent::OpenActionMenu))
            );
            assert_eq!(
                interpret(mode, GesturePrimitive::LongPress),
                Some(Interpretation::Command(SemanticCommand::Power))
            );
            assert_eq!(
                interpret(mode, GesturePrimitive::RotaryIncrement),
                Some(Interpretation::Command(SemanticCommand::VolumeUp))
            );
            assert_eq!(
                interpret(mode, GesturePrimitive::RotaryDecrement),
                Some(Interpretation::Command(SemanticCommand::VolumeDown))
            );
        }
    }

    #[test]
    fn tv_control_tap_falls_back_to_base_mapping_none() {
        assert_eq!(interpret(Mode::TvControl, GesturePrimitive::Tap), None);
    }

    #[test]
    fn activation_commands() {
        assert_eq!(
            Mode::TvControl.activation_command(),
            Some(SemanticCommand::Tv)
        );
        assert_eq!(
            Mode::AppControl.activation_command(),
            Some(SemanticCommand::Home)
        );
    }

    #[test]
    fn default_mode_is_app_control() {
        assert_eq!(Mode::default(), Mode::AppControl);
    }

    // `SemanticCommand::iter` keeps the enum and its device-name table
    // honest: every variant has a non-empty name.
    #[test]
    fn every_command_has_a_device_name() {
        for command in SemanticCommand::iter() {
            assert!(!command.device_name().is_empty());
        }
    }
}
