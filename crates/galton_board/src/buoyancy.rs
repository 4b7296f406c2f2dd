use bevy::prelude::*;
use std::f32::consts::PI;

use crate::settings::BoardSettings;

/// Buoyancy-vs-drag model that nudges a particle's progress along its path.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BuoyancyModel {
    pub fluid_density: f32,
    pub particle_density: f32,
    pub particle_volume: f32,
    pub gravity: f32,
    pub fluid_viscosity: f32,
    pub time_step: f32,
    pub movement_duration: f32,
}

impl BuoyancyModel {
    pub fn from_settings(settings: &BoardSettings) -> Self {
        Self {
            fluid_density: settings.fluid_density,
            particle_density: settings.particle_density,
            particle_volume: settings.particle_volume,
            gravity: settings.gravity,
            fluid_viscosity: settings.fluid_viscosity,
            time_step: settings.time_step,
            movement_duration: settings.movement_duration,
        }
    }

    fn particle_mass(&self) -> f32 {
        self.particle_density * self.particle_volume
    }

    /// Net upward acceleration: (buoyant force - weight) / mass.
    pub fn acceleration(&self) -> f32 {
        let mass = self.particle_mass();
        let displaced = self.fluid_density * self.particle_volume;

        let buoyant_force = displaced * self.gravity;
        let weight = mass * self.gravity;

        (buoyant_force - weight) / mass
    }

    /// Stokes-drag terminal velocity of a sphere with the particle's volume.
    pub fn terminal_velocity(&self) -> f32 {
        let net_force = self.acceleration() * self.particle_mass();
        let radius = (self.particle_volume * 3.0 / (4.0 * PI)).cbrt();
        let drag_coefficient = 6.0 * PI * self.fluid_viscosity * radius;

        net_force / drag_coefficient
    }

    /// Maps linear progress in [0, 1] to buoyancy-biased progress in [0, 1].
    pub fn apply(&self, progress: f32) -> f32 {
        let time = progress * self.movement_duration;
        let velocity = (self.acceleration() * time).min(self.terminal_velocity());

        (progress + velocity * self.time_step / 10.0).clamp(0.0, 1.0)
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> BuoyancyModel {
        BuoyancyModel::from_settings(&BoardSettings::default())
    }

    #[test]
    fn lighter_particle_rises() {
        // (1000 - 900) / 900 * 9.81
        let a = model().acceleration();
        assert!((a - 1.09).abs() < 1e-3, "acceleration was {a}");
    }

    #[test]
    fn heavier_particle_sinks() {
        let m = BuoyancyModel {
            particle_density: 1200.0,
            ..model()
        };
        assert!(m.acceleration() < 0.0);
        assert!(m.terminal_velocity() < 0.0);
    }

    #[test]
    fn terminal_velocity_far_exceeds_short_runs() {
        // Stokes drag on a 6 cm sphere in water barely limits anything here.
        let m = model();
        assert!(m.terminal_velocity() > m.acceleration() * m.movement_duration);
    }

    #[test]
    fn apply_pushes_progress_forward_and_clamps() {
        let m = model();
        assert_eq!(m.apply(0.0), 0.0);

        let half = m.apply(0.5);
        let expected = 0.5 + m.acceleration() * 1.0 * m.time_step / 10.0;
        assert!((half - expected).abs() < 1e-6);

        assert_eq!(m.apply(1.0), 1.0);
    }

    #[test]
    fn apply_is_capped_by_terminal_velocity() {
        let m = BuoyancyModel {
            fluid_viscosity: 10.0,
            ..model()
        };
        let vt = m.terminal_velocity();
        assert!(vt < m.acceleration() * m.movement_duration * 0.5);
        let out = m.apply(0.5);
        assert!((out - (0.5 + vt * m.time_step / 10.0)).abs() < 1e-6);
    }

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }
}
