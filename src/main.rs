//! Object Arena headless runner
//!
//! Spawns a seeded batch of objects, drives the tick loop and logs what the
//! registry publishes. Usage: `object-arena [settings.json]`

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use env_logger::{Builder, Env};
use log::LevelFilter;

use object_arena::sim::{ResponseTable, Spawner, tick};
use object_arena::{GameObjects, ObjectRef, Settings};

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    // Only fails if a logger is already installed
    let _ = Builder::from_env(env).try_init();
}

fn main() {
    let path = std::env::args_os().nth(1).map(PathBuf::from);

    // Settings decide the log level, so read them before logging exists
    let loaded = path.map(|path| {
        let result = Settings::from_file(&path);
        (path, result)
    });
    let verbose = matches!(&loaded, Some((_, Ok(s))) if s.verbose);
    init_logging(verbose);

    let settings = match loaded {
        Some((path, Ok(settings))) => {
            log::info!("Loaded settings from {}", path.display());
            settings.sanitized()
        }
        Some((path, Err(e))) => {
            log::warn!("{} ({}), using defaults", e, path.display());
            Settings::default()
        }
        None => Settings::default(),
    };
    log::info!("Object Arena starting with seed: {}", settings.seed);

    let mut objects = GameObjects::new();

    // Stand-in for a renderer: remembers how many objects were last published
    let visible = Rc::new(Cell::new(0usize));
    let sink = Rc::clone(&visible);
    let subscription = objects.subscribe(move |items: &[ObjectRef]| sink.set(items.len()));

    let mut spawner = Spawner::new(settings.seed);
    for object in spawner.spawn_batch(&settings) {
        objects.spawn(object);
    }
    log::info!("Spawned {} objects", visible.get());

    let responses = ResponseTable::default();
    let arena = settings.remove_offscreen.then(|| settings.arena());
    let (mut collisions, mut destroyed, mut escaped) = (0usize, 0usize, 0usize);

    for _ in 0..settings.ticks {
        let report = tick(&mut objects, &responses, arena);
        collisions += report.collisions.len();
        destroyed += report.destroyed;
        escaped += report.escaped;
        if objects.is_empty() {
            log::info!("Arena is empty");
            break;
        }
    }

    let evil = objects
        .items()
        .iter()
        .filter(|o| o.borrow().is_evil)
        .count();
    log::info!(
        "Done: {} collisions, {} destroyed, {} escaped, {} remaining ({} evil)",
        collisions,
        destroyed,
        escaped,
        visible.get(),
        evil
    );

    subscription.unsubscribe();
    objects.empty();
}
