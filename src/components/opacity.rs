use bevy_ecs::prelude::Component;

/// Opacity of an item in `[0, 1]`.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Opacity(f32);

impl Opacity {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(&self) -> f32 {
        self.0
    }

    pub fn set(&mut self, value: f32) {
        self.0 = value.clamp(0.0, 1.0);
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self(1.0)
    }
}
