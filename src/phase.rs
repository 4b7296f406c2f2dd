use bevy::color::Alpha;
use bevy::prelude::*;
use galton_board::{BoardSettings, FrameClock, SimulationSet, Tally};

/// Seconds of intro: container, pins, results table, counter.
pub const INTRO_SECONDS: f32 = 4.0;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScenePhase {
    #[default]
    Intro,
    Running,
    Finished,
}

#[derive(Resource)]
pub struct PhaseTimer(pub Timer);

/// Intro -> Running -> Finished. The simulation only ticks while running and
/// never past `total_frames`. Needs `StatesPlugin` and `GaltonBoardPlugin`.
pub struct PhasePlugin;

impl Plugin for PhasePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<ScenePhase>()
            .configure_sets(
                FixedUpdate,
                SimulationSet
                    .run_if(in_state(ScenePhase::Running))
                    .run_if(frames_remaining),
            )
            .add_systems(Startup, start_intro)
            .add_systems(
                Update,
                (
                    advance_intro.run_if(in_state(ScenePhase::Intro)),
                    hold.run_if(in_state(ScenePhase::Finished)),
                ),
            )
            .add_systems(
                FixedUpdate,
                finish_running
                    .after(SimulationSet)
                    .run_if(in_state(ScenePhase::Running)),
            )
            .add_systems(OnEnter(ScenePhase::Finished), start_hold);
    }
}

/// Raises an entity's alpha from 0 to `alpha` over `duration` seconds,
/// starting `delay` seconds after launch.
#[derive(Component, Debug, Clone, Copy)]
pub struct FadeIn {
    pub delay: f32,
    pub duration: f32,
    pub alpha: f32,
}

impl FadeIn {
    pub fn new(delay: f32, duration: f32, alpha: f32) -> Self {
        Self {
            delay,
            duration,
            alpha,
        }
    }

    pub fn alpha_at(&self, elapsed: f32) -> f32 {
        if elapsed < self.delay {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return self.alpha;
        }
        ((elapsed - self.delay) / self.duration).min(1.0) * self.alpha
    }

    pub fn is_done(&self, elapsed: f32) -> bool {
        elapsed >= self.delay + self.duration
    }
}

/// Particles that had not landed when the run ended.
pub fn stragglers(tally: &Tally, settings: &BoardSettings) -> usize {
    settings
        .particle_count
        .saturating_sub(tally.total() as usize)
}

fn frames_remaining(clock: Res<FrameClock>, settings: Res<BoardSettings>) -> bool {
    clock.frame < settings.total_frames()
}

pub fn start_intro(mut commands: Commands, settings: Res<BoardSettings>) {
    info!(
        "galton board: {} rows, {} particles, {}s run at {} fps",
        settings.pin_rows, settings.particle_count, settings.animation_duration, settings.frame_rate
    );
    commands.insert_resource(PhaseTimer(Timer::from_seconds(INTRO_SECONDS, TimerMode::Once)));
}

pub fn fade_in(
    mut commands: Commands,
    time: Res<Time>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(
        Entity,
        &FadeIn,
        Option<&mut Sprite>,
        Option<&mut TextColor>,
        Option<&MeshMaterial2d<ColorMaterial>>,
    )>,
) {
    let elapsed = time.elapsed_secs();

    for (entity, fade, sprite, text_color, material) in &mut query {
        let alpha = fade.alpha_at(elapsed);

        if let Some(mut sprite) = sprite {
            sprite.color.set_alpha(alpha);
        }
        if let Some(mut text_color) = text_color {
            text_color.0.set_alpha(alpha);
        }
        if let Some(material) = material.and_then(|handle| materials.get_mut(&handle.0)) {
            material.color.set_alpha(alpha);
        }

        if fade.is_done(elapsed) {
            commands.entity(entity).remove::<FadeIn>();
        }
    }
}

pub fn advance_intro(
    time: Res<Time>,
    mut timer: ResMut<PhaseTimer>,
    mut next: ResMut<NextState<ScenePhase>>,
) {
    if timer.0.tick(time.delta()).just_finished() {
        info!("intro done, releasing particles");
        next.set(ScenePhase::Running);
    }
}

pub fn finish_running(
    clock: Res<FrameClock>,
    settings: Res<BoardSettings>,
    mut next: ResMut<NextState<ScenePhase>>,
) {
    if clock.frame >= settings.total_frames() {
        next.set(ScenePhase::Finished);
    }
}

pub fn start_hold(
    mut commands: Commands,
    settings: Res<BoardSettings>,
    clock: Res<FrameClock>,
    tally: Res<Tally>,
) {
    info!(
        "run finished after {} frames: {} of {} particles landed, bins {:?}",
        clock.frame,
        tally.total(),
        settings.particle_count,
        tally.bins()
    );
    let missing = stragglers(&tally, &settings);
    if missing > 0 {
        warn!("animation_duration ended with {missing} particles still in flight");
    }
    commands.insert_resource(PhaseTimer(Timer::from_seconds(
        settings.hold_duration,
        TimerMode::Once,
    )));
}

pub fn hold(
    time: Res<Time>,
    settings: Res<BoardSettings>,
    mut timer: ResMut<PhaseTimer>,
    mut exit: EventWriter<AppExit>,
) {
    if timer.0.tick(time.delta()).just_finished() && settings.exit_when_done {
        info!("hold over, exiting");
        exit.send(AppExit::Success);
    }
}
