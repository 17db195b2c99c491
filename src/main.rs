use std::path::PathBuf;
use std::time::Instant;
use std::{env, process};

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use ninja_frog::asset::Assets;
use ninja_frog::audio::{self, NullAudio};
use ninja_frog::config::Settings;
use ninja_frog::constants::{LOOP_TIME, TICKS_PER_SECOND};
use ninja_frog::formatter::{self, TickFormatter};
use ninja_frog::input::InputState;
use ninja_frog::render::DrawList;
use ninja_frog::timing::TickTimings;
use ninja_frog::world::World;

/// How often rolling tick statistics are logged.
const STATS_PERIOD: u64 = 10 * TICKS_PER_SECOND as u64;

/// A fixed input pattern: run back and forth, jumping and dashing periodically.
fn scripted_input(tick: u64) -> InputState {
    let heading_right = (tick / 90) % 2 == 0;
    InputState {
        left: !heading_right,
        right: heading_right,
        jump: tick % 45 == 0,
        dash: tick % 120 == 60,
        ..Default::default()
    }
}

fn run() -> anyhow::Result<()> {
    let settings_path = env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref()).context("Could not load settings")?;

    let assets = Assets::placeholder().context("Could not build placeholder assets")?;
    let mut world = World::new(settings.clone(), assets).context("Could not create world")?;
    let mut audio = NullAudio::new();
    let mut frame = DrawList::new(settings.viewport);
    let mut timings = TickTimings::new();

    info!(
        levels = settings.total_levels,
        seed = ?settings.seed,
        "Starting game loop ({:.3}ms)",
        LOOP_TIME.as_secs_f32() * 1000.0
    );

    loop {
        if settings.ticks.is_some_and(|limit| world.tick_count() >= limit) {
            info!("Tick limit reached");
            break;
        }

        let start = Instant::now();

        world.tick(&scripted_input(world.tick_count()))?;
        formatter::set_tick(world.tick_count());

        frame.clear();
        world.render(&mut frame)?;
        audio::dispatch(&mut audio, &world.drain_events());

        if world.is_game_over() {
            info!(level = world.level(), "Game over");
            break;
        }

        let elapsed = start.elapsed();
        timings.record(elapsed, LOOP_TIME);
        if elapsed < LOOP_TIME {
            spin_sleep::sleep(LOOP_TIME - elapsed);
        } else {
            warn!("Game loop behind schedule by: {:?}", elapsed - LOOP_TIME);
        }

        if world.tick_count() % STATS_PERIOD == 0 {
            info!(draw_calls = frame.commands().len(), "{}", timings.summary());
        }
    }

    info!("{}", timings.summary());
    Ok(())
}

pub fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().event_format(TickFormatter))
        .with(ErrorLayer::default())
        .init();

    if let Err(e) = run() {
        error!("{:#}", e);
        process::exit(1);
    }
}
