// ── Command vocabulary ──
//
// The two closed enumerations the rest of the pipeline is built on:
// semantic remote commands (device-independent actions) and raw
// gesture primitives (discrete recognized touches/rotations).

use serde::{Deserialize, Serialize};

/// A device-independent remote-control action.
///
/// Each command carries the name the TV's command table keys on
/// ([`device_name`](Self::device_name)) — the opaque IRCC code itself
/// is looked up at relay time, never stored here.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum SemanticCommand {
    VolumeUp,
    VolumeDown,
    Power,
    Tv,
    Youtube,
    Netflix,
    Home,
    Back,
    Guide,
    Up,
    Down,
    Left,
    Right,
    Confirm,
    ChannelUp,
    ChannelDown,
}

impl SemanticCommand {
    /// The name this command is registered under in the TV's command
    /// table. Several differ from the variant name (`TvPower`,
    /// `YouTubex`, `GGuide`, `Return` are what the firmware reports).
    pub fn device_name(self) -> &'static str {
        match self {
            Self::VolumeUp => "VolumeUp",
            Self::VolumeDown => "VolumeDown",
            Self::Power => "TvPower",
            Self::Tv => "Tv",
            Self::Youtube => "YouTubex",
            Self::Netflix => "Netflix",
            Self::Home => "Home",
            Self::Back => "Return",
            Self::Guide => "GGuide",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Confirm => "Confirm",
            Self::ChannelUp => "ChannelUp",
            Self::ChannelDown => "ChannelDown",
        }
    }

    /// Haptic category for the presentation layer: repeated volume
    /// nudges get the light click, everything else the success tap.
    pub fn haptic(self) -> Haptic {
        match self {
            Self::VolumeUp | Self::VolumeDown => Haptic::Click,
            _ => Haptic::Success,
        }
    }

    /// The fixed command grid shown when the action-menu event fires.
    pub fn action_menu() -> [Self; 6] {
        [
            Self::Power,
            Self::Tv,
            Self::Guide,
            Self::Youtube,
            Self::Netflix,
            Self::Home,
        ]
    }
}

/// Haptic feedback category, consumed only by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    /// Light tick for repeatable adjustments (volume).
    Click,
    /// Confirmation tap for discrete actions.
    Success,
}

/// A discrete recognized touch/rotation gesture.
///
/// Produced transiently by [`GestureRecognizer`](crate::gesture::GestureRecognizer);
/// carries no persisted identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum GesturePrimitive {
    Tap,
    DoubleTap,
    LongPress,
    SwipeUp,
    SwipeDown,
    SwipeLeft,
    SwipeRight,
    RotaryIncrement,
    RotaryDecrement,
}
