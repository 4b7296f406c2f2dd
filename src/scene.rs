use bevy::color::Alpha;
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use galton_board::{plan_particles, BoardScale, BoardSettings, Lattice};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6, PI};

use crate::layout::SceneLayout;
use crate::phase::FadeIn;

pub const BLUE: Color = Color::srgb(0.345, 0.769, 0.867);
pub const GREEN_A: Color = Color::srgb(0.788, 0.886, 0.682);
pub const YELLOW: Color = Color::srgb(1.0, 1.0, 0.0);

const STROKE_PX: f32 = 2.0;
const PIN_STROKE_PX: f32 = 1.5;
/// Angle of the first hexagon vertex, measured from +X.
const PIN_START_ANGLE: f32 = 0.5;

const CONTAINER_Z: f32 = 0.0;
const PIN_Z: f32 = 1.0;
const PARTICLE_Z: f32 = 2.0;

pub fn to_screen(position: Vec2, scale: &BoardScale, z: f32) -> Vec3 {
    (position * scale.0).extend(z)
}

pub fn setup(
    mut commands: Commands,
    settings: Res<BoardSettings>,
    scale: Res<BoardScale>,
    layout: Res<SceneLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let frame = layout.bounds.size() * scale.0;
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: frame.x,
                min_height: frame.y,
            },
            ..OrthographicProjection::default_2d()
        },
        Transform::from_translation(to_screen(layout.bounds.center(), &scale, 0.0)),
    ));

    spawn_container(&mut commands, &scale, layout.container);

    let radius = settings.pin_size * scale.0;
    let edges = hexagon_edges(radius, PIN_START_ANGLE);
    for pin in Lattice::new(&settings).pin_positions() {
        let center = to_screen(pin, &scale, PIN_Z);
        for (offset, angle) in edges {
            commands.spawn((
                Sprite {
                    color: BLUE.with_alpha(0.0),
                    custom_size: Some(Vec2::new(radius, PIN_STROKE_PX)),
                    ..default()
                },
                Transform::from_translation(center + offset.extend(0.0))
                    .with_rotation(Quat::from_rotation_z(angle)),
                FadeIn::new(1.0, 1.0, 1.0),
            ));
        }
    }

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let particle_mesh = meshes.add(Circle::new(settings.particle_size * scale.0));
    let particle_material = materials.add(ColorMaterial::from(GREEN_A.with_alpha(0.0)));
    let start = to_screen(settings.particle_start(), &scale, PARTICLE_Z);
    let particles = plan_particles(&settings, &mut rng);
    debug!("planned {} trajectories", particles.len());

    for particle in particles {
        commands.spawn((
            particle,
            Mesh2d(particle_mesh.clone()),
            MeshMaterial2d(particle_material.clone()),
            Transform::from_translation(start),
            FadeIn::new(1.0, 0.0, 0.8),
        ));
    }
}

/// Midpoint offset and direction of each side of a regular hexagon with
/// circumradius `radius` whose first vertex sits at `start_angle` from +X.
/// Each side is `radius` long.
pub fn hexagon_edges(radius: f32, start_angle: f32) -> [(Vec2, f32); 6] {
    let apothem = radius * FRAC_PI_6.cos();
    std::array::from_fn(|k| {
        let normal = start_angle + k as f32 * PI / 3.0 + FRAC_PI_6;
        (Vec2::from_angle(normal) * apothem, normal + FRAC_PI_2)
    })
}

/// Translucent fill plus four edge strips.
fn spawn_container(commands: &mut Commands, scale: &BoardScale, container: Rect) {
    let size = container.size() * scale.0;
    let center = to_screen(container.center(), scale, CONTAINER_Z);

    commands.spawn((
        Sprite {
            color: BLUE.with_alpha(0.0),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center),
        FadeIn::new(0.0, 1.0, 0.15),
    ));

    let half = size / 2.0;
    let edges = [
        (Vec2::new(0.0, half.y), Vec2::new(size.x, STROKE_PX)),
        (Vec2::new(0.0, -half.y), Vec2::new(size.x, STROKE_PX)),
        (Vec2::new(-half.x, 0.0), Vec2::new(STROKE_PX, size.y)),
        (Vec2::new(half.x, 0.0), Vec2::new(STROKE_PX, size.y)),
    ];
    for (offset, edge_size) in edges {
        commands.spawn((
            Sprite {
                color: BLUE.with_alpha(0.0),
                custom_size: Some(edge_size),
                ..default()
            },
            Transform::from_translation(center + offset.extend(0.1)),
            FadeIn::new(0.0, 1.0, 1.0),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexagon_sides_join_the_rotated_vertices() {
        let radius = 2.0;
        let vertices: Vec<Vec2> = (0..6)
            .map(|k| Vec2::from_angle(PIN_START_ANGLE + k as f32 * PI / 3.0) * radius)
            .collect();

        for (k, (mid, angle)) in hexagon_edges(radius, PIN_START_ANGLE).into_iter().enumerate() {
            let half_side = Vec2::from_angle(angle) * radius / 2.0;
            assert!((mid - half_side).abs_diff_eq(vertices[k], 1e-4));
            assert!((mid + half_side).abs_diff_eq(vertices[(k + 1) % 6], 1e-4));
        }
    }

    #[test]
    fn first_vertex_is_measured_from_the_x_axis() {
        let (mid, angle) = hexagon_edges(1.0, PIN_START_ANGLE)[0];
        let first = mid - Vec2::from_angle(angle) * 0.5;
        assert!(first.abs_diff_eq(Vec2::new(0.5f32.cos(), 0.5f32.sin()), 1e-4));
    }
}
