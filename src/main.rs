//! Headless walkthrough: builds the configured puzzle, plays a few scripted
//! gestures against it and hands the result to a logging export sink.
//!
//! Usage: `jigblock [config.toml|config.json] [seed]`

use anyhow::Context;
use glam::DVec3;
use jigblock::{
    init_logging, interaction_config, Config, ExportBundle, ExportSink, MaterialSlot, Pointer,
    PuzzleSession, Ray, TextureHandle,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Logs what a file writer would receive.
struct LogSink;

impl ExportSink for LogSink {
    fn write(&mut self, bundle: &ExportBundle<'_>) -> anyhow::Result<()> {
        let mesh = bundle.merged();
        let count = |slot: MaterialSlot| mesh.materials.iter().filter(|m| **m == slot).count();
        tracing::info!(
            "Export: {} vertices, {} top / {} side / {} bottom triangles, side {}, bottom {}, texture {:?}",
            mesh.positions.len(),
            count(MaterialSlot::Top),
            count(MaterialSlot::Side),
            count(MaterialSlot::Bottom),
            bundle.side_color,
            bundle.bottom_color,
            bundle.texture
        );
        Ok(())
    }
}

/// Pointer straight above `(x, y)`; screen x tracks world x one to one.
fn pointer_above(x: f64, y: f64) -> Pointer {
    Pointer::new(Ray::new(DVec3::new(x, y, 500.0), DVec3::NEG_Z), x)
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(p) => PathBuf::from(p),
        None => Config::default_path()?,
    };
    let seed: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed '{}'", s))?,
        None => 42,
    };

    let config = Config::load_or_default(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    tracing::info!(
        "Difficulty {} (snap at {} mm)",
        config.play.difficulty,
        config.play.snap_distance()
    );

    let mut session = PuzzleSession::new(
        config.puzzle.clone(),
        Some(TextureHandle(1)),
        interaction_config(&config.play),
    )?;

    // Drag piece 0 away, then drop it back near its slot.
    let home = session
        .transforms()
        .first()
        .copied()
        .context("puzzle has no pieces")?;
    // Grab off-centre so a later press does not land on the rotate disc.
    let (gx, gy) = (home.x + 5.0, home.y + 5.0);
    session.pointer_down(&pointer_above(gx, gy));
    session.pointer_move(&pointer_above(gx + 140.0, gy + 30.0));
    match session.pointer_up() {
        Some(snap) => tracing::info!("Unexpected snap to piece {}", snap.neighbor_index),
        None => tracing::info!("Dropped piece 0 away from its neighbours"),
    }

    session.pointer_down(&pointer_above(gx + 140.0, gy + 30.0));
    session.pointer_move(&pointer_above(gx + 0.8, gy - 0.6));
    tracing::info!("Highlighted while dragging: {:?}", session.highlights());
    match session.pointer_up() {
        Some(snap) => tracing::info!(
            "Piece 0 snapped to piece {} on its {} edge ({:.2} mm)",
            snap.neighbor_index,
            snap.edge,
            snap.distance
        ),
        None => tracing::info!("Piece 0 did not snap"),
    }

    let mut rng = StdRng::seed_from_u64(seed);
    session.scatter(&mut rng);
    let snappable = (0..session.pieces().len())
        .filter(|&i| {
            jigblock::play::best_snap(
                i,
                session.transforms(),
                session.pieces(),
                session.controller().config().snap_distance,
            )
            .is_some()
        })
        .count();
    tracing::info!("{} pieces can snap right after scattering", snappable);

    session.assemble();
    session.export(&mut LogSink)?;

    Ok(())
}
