use bevy::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Largest lattice the table and path numbers are laid out for.
pub const MAX_PIN_ROWS: usize = 12;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Everything that shapes the board, the particles and the buoyancy model.
///
/// Lengths are in board units; [`BoardSettings::pixels_per_unit`] maps them to
/// the screen. Physics quantities are SI.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Seconds the running phase lasts.
    pub animation_duration: f32,
    pub particle_count: usize,
    /// Frames between two consecutive particle starts.
    pub particle_delay: u32,
    pub pin_size: f32,
    pub vertical_gap: f32,
    pub horizontal_gap: f32,
    pub pin_rows: usize,
    pub start_x: f32,
    pub start_y: f32,
    /// Seconds a particle needs to traverse its whole trajectory.
    pub movement_duration: f32,
    pub particle_size: f32,
    pub particle_start: [f32; 2],

    pub fluid_density: f32,
    pub particle_density: f32,
    pub particle_volume: f32,
    pub gravity: f32,
    pub fluid_viscosity: f32,
    pub time_step: f32,

    pub frame_rate: f32,
    pub stack_row_capacity: u32,
    pub dot_width: f32,
    pub dot_height: f32,
    /// Height between the last collision point and the top of a bin stack.
    pub bin_rise: f32,
    pub pixels_per_unit: f32,
    pub hold_duration: f32,
    pub seed: Option<u64>,
    pub exit_when_done: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            animation_duration: 16.0,
            particle_count: 200,
            particle_delay: 1,
            pin_size: 0.2,
            vertical_gap: 0.6,
            horizontal_gap: 0.4,
            pin_rows: 7,
            start_x: -3.0,
            start_y: -3.0,
            movement_duration: 2.0,
            particle_size: 0.05,
            particle_start: [-3.0, -4.3],
            fluid_density: 1000.0,
            particle_density: 900.0,
            particle_volume: 0.001,
            gravity: 9.81,
            fluid_viscosity: 0.001,
            time_step: 0.016,
            frame_rate: 60.0,
            stack_row_capacity: 3,
            dot_width: 0.1,
            dot_height: 0.1,
            bin_rise: 2.4,
            pixels_per_unit: 70.0,
            hold_duration: 3.0,
            seed: None,
            exit_when_done: false,
        }
    }
}

impl BoardSettings {
    /// Reads a JSON settings file. Fields left out keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| SettingsError::Parse {
            path: display,
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=MAX_PIN_ROWS).contains(&self.pin_rows) {
            return Err(invalid(
                "pin_rows",
                format!("must be between 1 and {MAX_PIN_ROWS}, got {}", self.pin_rows),
            ));
        }
        if self.particle_count == 0 {
            return Err(invalid("particle_count", "must be at least 1".into()));
        }
        if self.stack_row_capacity == 0 {
            return Err(invalid("stack_row_capacity", "must be at least 1".into()));
        }

        let strictly_positive = [
            ("animation_duration", self.animation_duration),
            ("movement_duration", self.movement_duration),
            ("frame_rate", self.frame_rate),
            ("pixels_per_unit", self.pixels_per_unit),
            ("fluid_density", self.fluid_density),
            ("particle_density", self.particle_density),
            ("particle_volume", self.particle_volume),
            ("gravity", self.gravity),
            ("fluid_viscosity", self.fluid_viscosity),
            ("time_step", self.time_step),
        ];
        for (field, value) in strictly_positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("pin_size", self.pin_size),
            ("vertical_gap", self.vertical_gap),
            ("horizontal_gap", self.horizontal_gap),
            ("particle_size", self.particle_size),
            ("dot_width", self.dot_width),
            ("dot_height", self.dot_height),
            ("bin_rise", self.bin_rise),
            ("hold_duration", self.hold_duration),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }

        Ok(())
    }

    pub fn bin_count(&self) -> usize {
        self.pin_rows + 1
    }

    pub fn path_count(&self) -> u32 {
        1 << self.pin_rows
    }

    pub fn frames_per_move(&self) -> f32 {
        self.movement_duration * self.frame_rate
    }

    pub fn total_frames(&self) -> u64 {
        (self.animation_duration * self.frame_rate).round() as u64
    }

    pub fn particle_start(&self) -> Vec2 {
        Vec2::from(self.particle_start)
    }
}

fn invalid(field: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = BoardSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bin_count(), 8);
        assert_eq!(settings.path_count(), 128);
        assert_eq!(settings.frames_per_move(), 120.0);
        assert_eq!(settings.total_frames(), 960);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = BoardSettings::from_json(r#"{ "particle_count": 50, "seed": 7 }"#).unwrap();
        assert_eq!(settings.particle_count, 50);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.pin_rows, 7);
        assert_eq!(settings.particle_start(), Vec2::new(-3.0, -4.3));
    }

    #[test]
    fn rejects_out_of_range_rows() {
        for rows in [0, MAX_PIN_ROWS + 1] {
            let settings = BoardSettings {
                pin_rows: rows,
                ..Default::default()
            };
            match settings.validate() {
                Err(SettingsError::Invalid { field, .. }) => assert_eq!(field, "pin_rows"),
                other => panic!("expected pin_rows error, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_positive_physics() {
        let settings = BoardSettings {
            fluid_viscosity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "fluid_viscosity", .. })
        ));

        let settings = BoardSettings {
            pin_size: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "pin_size", .. })
        ));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = BoardSettings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
