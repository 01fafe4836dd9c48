//! Normalized pointer, wheel and keyboard events.
//!
//! The host translates platform input into [`InputEvent`] values and sends
//! them through the channel returned by
//! [`InputQueue::new`](crate::resources::input::InputQueue::new). Coordinates
//! are screen space in logical pixels with the origin at the top-left of the
//! viewport. The serde tagging lets scripted sessions be written as JSON:
//!
//! ```json
//! { "type": "wheel", "x": 640, "y": 360, "delta_y": -120 }
//! { "type": "key", "code": "escape" }
//! ```

use serde::{Deserialize, Serialize};

/// Keys the viewport reacts to. Everything else arrives as `Other`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum KeyCode {
    Escape,
    #[serde(other)]
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Negative `delta_y` zooms in.
    Wheel { x: f32, y: f32, delta_y: f32 },
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    Key { code: KeyCode },
}
