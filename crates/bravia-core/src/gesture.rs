// ── Gesture recognizer ──
//
// State machine over a single continuous pointer/rotation stream.
// Every classification is synchronous on receipt of an event; the
// recognizer never blocks and emits at most one primitive per event.
//
// Taps, double-taps, and long-presses arrive pre-recognized from the
// platform gesture system (they are exclusive alternatives with their
// own duration/distance thresholds) and pass through 1:1; this module
// only has real work to do for swipes and crown rotation.

use crate::command::GesturePrimitive;

/// A pointer coordinate in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Raw touch input from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// Finger down — starts (or re-arms) swipe tracking.
    Down(Point),
    /// Finger up — classifies the swipe, if any.
    Up(Point),
    /// Pre-recognized single tap.
    Tap,
    /// Pre-recognized double tap.
    DoubleTap,
    /// Pre-recognized long press.
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SwipeState {
    Idle,
    TrackingSwipe { origin: Point },
}

/// Converts the continuous input stream into discrete
/// [`GesturePrimitive`]s with directional disambiguation and crown
/// debouncing.
#[derive(Debug)]
pub struct GestureRecognizer {
    state: SwipeState,
    /// Last observed absolute crown position; `None` until the first
    /// rotation event establishes the baseline.
    crown_position: Option<i64>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self {
            state: SwipeState::Idle,
            crown_position: None,
        }
    }

    /// Feed one touch event; returns the recognized primitive, if any.
    pub fn on_touch(&mut self, event: TouchEvent) -> Option<GesturePrimitive> {
        match event {
            TouchEvent::Down(origin) => {
                self.state = SwipeState::TrackingSwipe { origin };
                None
            }
            TouchEvent::Up(end) => {
                let SwipeState::TrackingSwipe { origin } = self.state else {
                    // Release without a press we saw — nothing to classify.
                    return None;
                };
                self.state = SwipeState::Idle;
                classify_swipe(origin, end)
            }
            // Exclusive alternatives recognized upstream; any partial
            // swipe tracking is abandoned.
            TouchEvent::Tap => {
                self.state = SwipeState::Idle;
                Some(GesturePrimitive::Tap)
            }
            TouchEvent::DoubleTap => {
                self.state = SwipeState::Idle;
                Some(GesturePrimitive::DoubleTap)
            }
            TouchEvent::LongPress => {
                self.state = SwipeState::Idle;
                Some(GesturePrimitive::LongPress)
            }
        }
    }

    /// Feed an absolute crown position; emits an increment/decrement
    /// when the integer position moves, nothing on equality.
    pub fn on_rotation(&mut self, position: i64) -> Option<GesturePrimitive> {
        let previous = self.crown_position.replace(position)?;
        match position.cmp(&previous) {
            std::cmp::Ordering::Greater => Some(GesturePrimitive::RotaryIncrement),
            std::cmp::Ordering::Less => Some(GesturePrimitive::RotaryDecrement),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Directional disambiguation: vertical wins when |dy| > |dx|,
/// horizontal otherwise; the sign picks the direction. A release with
/// zero displacement has no direction and emits nothing.
fn classify_swipe(origin: Point, end: Point) -> Option<GesturePrimitive> {
    let dx = end.x - origin.x;
    let dy = end.y - origin.y;

    if dx == 0.0 && dy == 0.0 {
        return None;
    }

    if dy.abs() > dx.abs() {
        if dy > 0.0 {
            Some(GesturePrimitive::SwipeDown)
        } else {
            Some(GesturePrimitive::SwipeUp)
        }
    } else if dx > 0.0 {
        Some(GesturePrimitive::SwipeRight)
    } else {
        Some(GesturePrimitive::SwipeLeft)
    }
}
