//! Buoyancy-biased Galton board: lattice geometry, particle paths and the
//! per-frame updater that moves particles and tallies where they land.
//!
//! Rendering lives in the `galton` binary; this crate only touches
//! `Transform`s and its own components and resources.

pub mod buoyancy;
pub mod lattice;
pub mod particle;
pub mod path;
pub mod settings;
pub mod tally;
pub mod trajectory;

use bevy::prelude::*;

pub use buoyancy::BuoyancyModel;
pub use lattice::Lattice;
pub use particle::{plan_particles, Particle, ParticleLanded};
pub use settings::{BoardSettings, SettingsError};
pub use tally::Tally;
pub use trajectory::Trajectory;

/// Screen pixels per board unit.
#[derive(Resource, Debug, Clone, Copy)]
pub struct BoardScale(pub f32);

#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FrameClock {
    pub frame: u64,
    pub frames_per_move: f32,
}

/// Systems that advance the simulation by one frame. Gate this set to
/// control when particles move.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationSet;

/// Registers resources derived from [`BoardSettings`] and runs the updater in
/// `FixedUpdate` at the configured frame rate.
pub struct GaltonBoardPlugin {
    pub settings: BoardSettings,
}

impl Plugin for GaltonBoardPlugin {
    fn build(&self, app: &mut App) {
        let settings = &self.settings;
        app.insert_resource(settings.clone())
            .insert_resource(BuoyancyModel::from_settings(settings))
            .insert_resource(BoardScale(settings.pixels_per_unit))
            .insert_resource(FrameClock {
                frame: 0,
                frames_per_move: settings.frames_per_move(),
            })
            .insert_resource(Tally::new(settings.bin_count()))
            .insert_resource(Time::<Fixed>::from_hz(f64::from(settings.frame_rate)))
            .add_event::<ParticleLanded>()
            .add_systems(
                FixedUpdate,
                (
                    particle::advance_frame,
                    particle::update_particles,
                    tally::tally_landings,
                )
                    .chain()
                    .in_set(SimulationSet),
            );
    }
}
