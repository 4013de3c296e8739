use bevy::prelude::*;
use bevy::utils::{HashMap, HashSet};
use bevy::window::PrimaryWindow;

use crate::organisms::{OrganismId, OrganismKind, Origin};
use crate::world::Arena;

/// Height reserved above the dish for the population counters
pub const COUNTER_BAR_HEIGHT: f32 = 40.0;

/// Draws the dish and turns mouse and keyboard input into arena operations.
///
/// Expects an [`Arena`] resource to be inserted before the app runs.
pub struct PetriDishPlugin;

impl Plugin for PetriDishPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Selection>()
            .init_resource::<SpriteIndex>()
            .add_systems(Startup, setup_dish)
            .add_systems(
                Update,
                (
                    select_kind,
                    place_on_click,
                    clear_dish,
                    dump_snapshot,
                    advance_dish,
                    sync_sprites,
                    update_counters,
                )
                    .chain(),
            );
    }
}

/// Organism type the next click will place
#[derive(Resource, Default)]
pub struct Selection {
    pub kind: Option<OrganismKind>,
}

#[derive(Resource, Default)]
struct SpriteIndex(HashMap<OrganismId, Entity>);

#[derive(Component)]
struct OrganismSprite;

#[derive(Component)]
struct CounterText;

fn setup_dish(mut commands: Commands, arena: Res<Arena>) {
    commands.spawn(Camera2dBundle::default());

    commands.spawn(SpriteBundle {
        sprite: Sprite {
            color: Color::rgb(0.92, 0.94, 0.88),
            custom_size: Some(Vec2::new(arena.width(), arena.height())),
            ..default()
        },
        transform: Transform::from_xyz(0.0, -COUNTER_BAR_HEIGHT / 2.0, 0.0),
        ..default()
    });

    commands.spawn((
        TextBundle::from_section(
            arena.statistics().summary_line(),
            TextStyle {
                font_size: 18.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        }),
        CounterText,
    ));

    info!("Petri dish ready: 1-4 select predator/virus/prey/reproducer, click to place, C clears, S dumps a snapshot");
}

/// Toolbar: number keys pick the organism type to place
fn select_kind(keys: Res<Input<KeyCode>>, mut selection: ResMut<Selection>) {
    let picked = [
        (KeyCode::Key1, OrganismKind::Predator),
        (KeyCode::Key2, OrganismKind::Virus),
        (KeyCode::Key3, OrganismKind::Prey),
        (KeyCode::Key4, OrganismKind::Reproducer),
    ]
    .into_iter()
    .find(|(key, _)| keys.just_pressed(*key))
    .map(|(_, kind)| kind);

    if let Some(kind) = picked {
        selection.kind = Some(kind);
        info!("[TOOLBAR] Selected {}", kind);
    }
}

/// Place the selected type where the dish was clicked. Without a selection clicks do nothing.
fn place_on_click(
    buttons: Res<Input<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    selection: Res<Selection>,
    mut arena: ResMut<Arena>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(kind) = selection.kind else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let Some(local) = window_to_dish(cursor, window, &arena) else {
        return;
    };
    // Clicks mark the middle of the top edge
    let half = arena.tuning().default_size / 2.0;
    arena.place(kind, Vec2::new(local.x - half, local.y));
}

fn clear_dish(keys: Res<Input<KeyCode>>, mut arena: ResMut<Arena>) {
    if keys.just_pressed(KeyCode::C) {
        arena.clear_all();
    }
}

fn dump_snapshot(keys: Res<Input<KeyCode>>, arena: Res<Arena>) {
    if !keys.just_pressed(KeyCode::S) {
        return;
    }
    match arena.snapshot_json() {
        Ok(json) => info!("[SNAPSHOT] {}", json),
        Err(err) => error!("Failed to serialize snapshot: {err}"),
    }
}

fn advance_dish(time: Res<Time>, mut arena: ResMut<Arena>) {
    arena.step(time.delta());
}

/// Keep one sprite per live organism
fn sync_sprites(
    mut commands: Commands,
    arena: Res<Arena>,
    mut index: ResMut<SpriteIndex>,
    mut sprites: Query<(&mut Transform, &mut Sprite), With<OrganismSprite>>,
) {
    let live: HashSet<OrganismId> = arena.all().map(|organism| organism.id()).collect();
    index.0.retain(|id, entity| {
        let keep = live.contains(id);
        if !keep {
            commands.entity(*entity).despawn();
        }
        keep
    });

    for organism in arena.snapshot() {
        let translation = dish_to_world(Vec2::new(organism.x, organism.y), organism.size, &arena);
        let size = Some(Vec2::splat(organism.size));

        if let Some(&entity) = index.0.get(&organism.id) {
            if let Ok((mut transform, mut sprite)) = sprites.get_mut(entity) {
                transform.translation = translation;
                sprite.custom_size = size;
            }
            continue;
        }

        let entity = commands
            .spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: organism_color(organism.kind, organism.origin),
                        custom_size: size,
                        ..default()
                    },
                    transform: Transform::from_translation(translation),
                    ..default()
                },
                OrganismSprite,
            ))
            .id();
        index.0.insert(organism.id, entity);
    }
}

fn update_counters(arena: Res<Arena>, mut texts: Query<&mut Text, With<CounterText>>) {
    let line = arena.statistics().summary_line();
    for mut text in texts.iter_mut() {
        if let Some(section) = text.sections.first_mut() {
            if section.value != line {
                section.value = line.clone();
            }
        }
    }
}

fn organism_color(kind: OrganismKind, origin: Origin) -> Color {
    match (kind, origin) {
        (OrganismKind::Virus, Origin::Infection) => Color::ORANGE,
        (OrganismKind::Predator, _) => Color::rgb(0.85, 0.15, 0.15),
        (OrganismKind::Virus, _) => Color::rgb(0.55, 0.2, 0.75),
        (OrganismKind::Prey, _) => Color::rgb(0.2, 0.7, 0.3),
        (OrganismKind::Reproducer, _) => Color::rgb(0.2, 0.4, 0.85),
    }
}

/// Top-left of the dish in window coordinates
fn dish_origin(window: &Window, arena: &Arena) -> Vec2 {
    Vec2::new(
        (window.width() - arena.width()) / 2.0,
        (window.height() - arena.height() + COUNTER_BAR_HEIGHT) / 2.0,
    )
}

/// Window cursor position to dish coordinates; `None` outside the dish
fn window_to_dish(cursor: Vec2, window: &Window, arena: &Arena) -> Option<Vec2> {
    let local = cursor - dish_origin(window, arena);
    let inside = local.x >= 0.0
        && local.y >= 0.0
        && local.x <= arena.width()
        && local.y <= arena.height();
    inside.then_some(local)
}

/// Dish top-left corner plus size to the centre of a sprite in world space.
/// Dish y grows downward, world y upward, and the dish is centred below the counter bar.
fn dish_to_world(position: Vec2, size: f32, arena: &Arena) -> Vec3 {
    let centre = position + Vec2::splat(size / 2.0);
    Vec3::new(
        centre.x - arena.width() / 2.0,
        arena.height() / 2.0 - centre.y - COUNTER_BAR_HEIGHT / 2.0,
        1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organisms::EcosystemTuning;

    fn arena() -> Arena {
        Arena::seeded(EcosystemTuning::default(), 1).unwrap()
    }

    #[test]
    fn dish_corners_map_into_world_space() {
        let arena = arena();
        let top_left = dish_to_world(Vec2::ZERO, 20.0, &arena);
        assert_eq!(top_left, Vec3::new(-240.0, 240.0 - COUNTER_BAR_HEIGHT / 2.0, 1.0));

        let bottom_right = dish_to_world(Vec2::new(480.0, 480.0), 20.0, &arena);
        assert_eq!(bottom_right, Vec3::new(240.0, -240.0 - COUNTER_BAR_HEIGHT / 2.0, 1.0));
    }

    #[test]
    fn infection_viruses_are_drawn_differently() {
        assert_ne!(
            organism_color(OrganismKind::Virus, Origin::Placed),
            organism_color(OrganismKind::Virus, Origin::Infection)
        );
    }
}
