use bevy::color::Alpha;
use bevy::prelude::*;
use bevy::sprite::Anchor;
use galton_board::{BoardScale, BoardSettings, Tally};
use glam::Vec2;

use crate::layout::{SceneLayout, CELL_HEIGHT, CELL_WIDTH};
use crate::phase::FadeIn;
use crate::scene::{to_screen, YELLOW};

const LABEL_GAP: f32 = 0.25;
const HUD_Z: f32 = 3.0;

/// Results-table cell showing one bin's count.
#[derive(Component)]
pub struct BinCell(pub usize);

#[derive(Component)]
pub struct ItemsCount;

pub fn setup(
    mut commands: Commands,
    settings: Res<BoardSettings>,
    scale: Res<BoardScale>,
    layout: Res<SceneLayout>,
) {
    let bins = settings.bin_count();
    let table_fade = FadeIn::new(2.0, 1.0, 1.0);

    for index in 0..bins {
        let position = Vec2::new(layout.cell_x(index, bins), layout.table_center.y);
        commands.spawn((
            BinCell(index),
            Text2d::new("0"),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(Color::WHITE.with_alpha(0.0)),
            Transform::from_translation(to_screen(position, &scale, HUD_Z)),
            table_fade,
        ));

        // Inner separators only, no outer frame.
        if index + 1 < bins {
            let x = layout.cell_x(index, bins) + CELL_WIDTH / 2.0;
            commands.spawn((
                Sprite {
                    color: YELLOW.with_alpha(0.0),
                    custom_size: Some(Vec2::new(1.0, CELL_HEIGHT * scale.0)),
                    ..default()
                },
                Transform::from_translation(to_screen(
                    Vec2::new(x, layout.table_center.y),
                    &scale,
                    HUD_Z,
                )),
                table_fade,
            ));
        }
    }

    let counter_fade = FadeIn::new(3.0, 1.0, 1.0);
    commands.spawn((
        ItemsCount,
        Text2d::new("0"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::WHITE.with_alpha(0.0)),
        Anchor::CenterLeft,
        Transform::from_translation(to_screen(layout.counter, &scale, HUD_Z)),
        counter_fade,
    ));
    commands.spawn((
        Text2d::new("Items count:"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::WHITE.with_alpha(0.0)),
        Anchor::CenterRight,
        Transform::from_translation(to_screen(
            layout.counter - Vec2::X * LABEL_GAP,
            &scale,
            HUD_Z,
        )),
        counter_fade,
    ));
}

pub fn refresh(
    tally: Res<Tally>,
    mut cells: Query<(&BinCell, &mut Text2d), Without<ItemsCount>>,
    mut counter: Query<&mut Text2d, With<ItemsCount>>,
) {
    for (cell, mut text) in &mut cells {
        if let Some(count) = tally.bins().get(cell.0) {
            text.0 = count.to_string();
        }
    }
    for mut text in &mut counter {
        text.0 = tally.total().to_string();
    }
}
