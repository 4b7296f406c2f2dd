use bevy::prelude::*;
use glam::Vec2;
use rand::Rng;

use crate::buoyancy::{ease_out_cubic, BuoyancyModel};
use crate::lattice::Lattice;
use crate::path::{BinStacks, PathNumber};
use crate::settings::BoardSettings;
use crate::trajectory::{StackLayout, Trajectory};
use crate::{BoardScale, FrameClock};

#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub trajectory: Trajectory,
    pub bin_index: usize,
    /// Frame after which the particle leaves the spawn point.
    pub start_frame: u64,
    pub active: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleLanded {
    pub bin_index: usize,
}

/// Outcome of advancing one particle by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Inactive, or its start frame has not passed yet.
    Waiting,
    Moving(Vec2),
    Landed,
}

impl Particle {
    pub fn new(trajectory: Trajectory, bin_index: usize, start_frame: u64) -> Self {
        Self {
            trajectory,
            bin_index,
            start_frame,
            active: true,
        }
    }

    pub fn step(&mut self, frame: u64, frames_per_move: f32, model: &BuoyancyModel) -> Step {
        if !self.active || frame <= self.start_frame {
            return Step::Waiting;
        }

        let base_progress = (frame - self.start_frame) as f32 / frames_per_move;
        if base_progress <= 1.0 {
            let progress = ease_out_cubic(model.apply(base_progress));
            Step::Moving(self.trajectory.point_from_proportion(progress))
        } else {
            self.active = false;
            Step::Landed
        }
    }
}

/// Draws a path for every particle and precomputes its trajectory. Stack
/// slots are handed out in creation order, not landing order.
pub fn plan_particles<R: Rng + ?Sized>(settings: &BoardSettings, rng: &mut R) -> Vec<Particle> {
    let collision_points = Lattice::new(settings).collision_points();
    let stack = StackLayout {
        row_capacity: settings.stack_row_capacity,
        dot_width: settings.dot_width,
        dot_height: settings.dot_height,
        rise: settings.bin_rise,
    };
    let mut stacks = BinStacks::new(settings.bin_count());

    (0..settings.particle_count)
        .map(|i| {
            let path = PathNumber::random(&mut *rng, settings.pin_rows);
            let bin_index = path.bin_index();
            let stack_position = stacks.push(bin_index);
            let trajectory = Trajectory::through_lattice(
                settings.particle_start(),
                &collision_points,
                &path,
                &stack,
                stack_position,
            );
            let start_frame = i as u64 * u64::from(settings.particle_delay);
            Particle::new(trajectory, bin_index, start_frame)
        })
        .collect()
}

pub fn advance_frame(mut clock: ResMut<FrameClock>) {
    clock.frame += 1;
}

pub fn update_particles(
    mut query: Query<(&mut Particle, &mut Transform)>,
    clock: Res<FrameClock>,
    model: Res<BuoyancyModel>,
    scale: Res<BoardScale>,
    mut landed: EventWriter<ParticleLanded>,
) {
    for (mut particle, mut transform) in &mut query {
        match particle.step(clock.frame, clock.frames_per_move, &model) {
            Step::Waiting => {}
            Step::Moving(position) => {
                let z = transform.translation.z;
                transform.translation = (position * scale.0).extend(z);
            }
            Step::Landed => {
                landed.send(ParticleLanded {
                    bin_index: particle.bin_index,
                });
            }
        }
    }
}
