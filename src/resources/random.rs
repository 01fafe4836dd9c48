//! Seeded random source.
//!
//! Initial layout, drift velocities and layout jitter all draw from the same
//! [`RandomSource`] so a run is reproducible from the configured seed.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone)]
pub struct RandomSource(pub fastrand::Rng);

impl RandomSource {
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}
