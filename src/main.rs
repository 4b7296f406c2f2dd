use anyhow::Context;
use bevy::prelude::*;
use clap::Parser;
use galton_board::{GaltonBoardPlugin, Tally};

mod cli;
mod hud;
mod layout;
mod phase;
mod scene;

use layout::SceneLayout;
use phase::PhasePlugin;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let settings = args.settings().context("failed to load board settings")?;
    settings.validate().context("board settings out of range")?;
    let layout = SceneLayout::new(&settings);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Galton board".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(layout)
        .add_plugins((GaltonBoardPlugin { settings }, PhasePlugin))
        .add_systems(Startup, (scene::setup, hud::setup))
        .add_systems(
            Update,
            (
                phase::fade_in,
                hud::refresh.run_if(resource_changed::<Tally>),
            ),
        )
        .run();

    Ok(())
}
