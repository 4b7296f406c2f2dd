//! Drives the updater inside a headless Bevy app, one fixed tick at a time.

use bevy::prelude::*;
use galton_board::{
    plan_particles, BoardSettings, FrameClock, GaltonBoardPlugin, Particle, Tally,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn board_app(settings: BoardSettings) -> (App, Vec<Entity>) {
    let mut app = App::new();
    app.add_plugins(GaltonBoardPlugin {
        settings: settings.clone(),
    });

    let mut rng = StdRng::seed_from_u64(42);
    let entities = plan_particles(&settings, &mut rng)
        .into_iter()
        .map(|particle| app.world_mut().spawn((particle, Transform::default())).id())
        .collect();
    (app, entities)
}

fn tick(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

#[test]
fn particles_start_one_after_another() {
    let settings = BoardSettings {
        particle_count: 5,
        ..Default::default()
    };
    let (mut app, entities) = board_app(settings);

    tick(&mut app, 3);

    assert_eq!(app.world().resource::<FrameClock>().frame, 3);
    let world = app.world();
    // Particle i starts moving once the frame counter passes i.
    assert_ne!(world.get::<Transform>(entities[0]).unwrap().translation, Vec3::ZERO);
    assert_ne!(world.get::<Transform>(entities[2]).unwrap().translation, Vec3::ZERO);
    assert_eq!(world.get::<Transform>(entities[3]).unwrap().translation, Vec3::ZERO);
    assert_eq!(world.get::<Transform>(entities[4]).unwrap().translation, Vec3::ZERO);
}

#[test]
fn every_particle_lands_in_its_planned_bin() {
    let settings = BoardSettings {
        particle_count: 30,
        ..Default::default()
    };
    let scale = settings.pixels_per_unit;
    let bins = settings.bin_count();
    let (mut app, entities) = board_app(settings);

    // Last particle starts at frame 29 and needs 120 frames plus one to land.
    tick(&mut app, 29 + 121);

    let mut expected = vec![0u32; bins];
    for &entity in &entities {
        let world = app.world();
        let particle = world.get::<Particle>(entity).unwrap();
        assert!(!particle.active);
        expected[particle.bin_index] += 1;

        let resting = particle.trajectory.end() * scale;
        let translation = world.get::<Transform>(entity).unwrap().translation;
        assert!(translation.truncate().abs_diff_eq(resting, 1e-2));
    }

    let tally = app.world().resource::<Tally>();
    assert_eq!(tally.total(), 30);
    assert_eq!(tally.bins(), expected.as_slice());
}

#[test]
fn nothing_is_counted_before_the_first_move_completes() {
    let settings = BoardSettings {
        particle_count: 10,
        ..Default::default()
    };
    let (mut app, _) = board_app(settings);

    tick(&mut app, 120);
    assert_eq!(app.world().resource::<Tally>().total(), 0);

    tick(&mut app, 1);
    assert_eq!(app.world().resource::<Tally>().total(), 1);
}
