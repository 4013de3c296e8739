use bevy::log::LogPlugin;
use bevy::prelude::*;
use petri_dish::view::{PetriDishPlugin, COUNTER_BAR_HEIGHT};
use petri_dish::{Arena, EcosystemTuning};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Environment variable naming an optional JSON tuning file
const TUNING_ENV: &str = "PETRI_TUNING";
const WINDOW_MARGIN: f32 = 20.0;

fn main() {
    // Initialize tracing subscriber for better error visibility
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tuning = match std::env::var_os(TUNING_ENV) {
        Some(path) => {
            info!("Loading tuning from {}", path.to_string_lossy());
            EcosystemTuning::load(&path)
        }
        None => Ok(EcosystemTuning::classic()),
    };
    let arena = match tuning.and_then(Arena::new) {
        Ok(arena) => arena,
        Err(err) => {
            error!("Invalid tuning: {err}");
            std::process::exit(1);
        }
    };

    let resolution = (
        arena.width() + 2.0 * WINDOW_MARGIN,
        arena.height() + COUNTER_BAR_HEIGHT + 2.0 * WINDOW_MARGIN,
    );

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Petri Dish".into(),
                        resolution: resolution.into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .insert_resource(arena)
        .add_plugins(PetriDishPlugin)
        .run();
}
