use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gait_core::clock::{FixedStep, FrameClock, WallClock};
use gait_core::config::{self, SceneConfig};
use gait_core::math::{Color, Vec3};
use gait_core::render::{pack_instances, CountingSink, DrawCommand};
use gait_core::{Scene, VERSION};

#[derive(Parser, Debug)]
#[command(name = "gait", version = VERSION, about = "Procedural walking figure driver")]
struct Cli {
    /// Scene configuration (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory that relative asset paths are resolved against
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,
    /// Override the path file from the config
    #[arg(long, global = true)]
    path: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the assets and print what was read
    Inspect,
    /// Run a fixed number of frames at a fixed step
    Simulate {
        #[arg(long, default_value_t = 600)]
        frames: u64,
        #[arg(long, default_value_t = 1.0 / 60.0)]
        delta: f32,
        /// Write one JSON snapshot per frame (JSON Lines)
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Run against the wall clock
    Play {
        #[arg(long, default_value_t = 5.0)]
        seconds: f32,
    },
    /// Plot the ground track from above and save it as PNG
    Trace {
        #[arg(long, default_value_t = 1200)]
        frames: u64,
        #[arg(long, default_value_t = 1.0 / 60.0)]
        delta: f32,
        #[arg(long, default_value_t = 512)]
        size: u32,
        #[arg(long, default_value = "trace.png")]
        out: PathBuf,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn build_scene(cli: &Cli) -> Result<Scene> {
    let cfg = match &cli.config {
        Some(p) => config::load_from_path(p).with_context(|| format!("reading config {}", p.display()))?,
        None => SceneConfig::default(),
    };
    let mut assets = cfg.assets.relative_to(&cli.dir);
    if let Some(p) = &cli.path { assets.path = p.clone(); }

    let mut scene = Scene::from_config(&cfg);
    let status = scene.load_assets(&assets);
    if status.geometry.is_err() { println!("Error loading geometry"); }
    if status.path.is_err() { println!("Error loading path"); }
    Ok(scene)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut scene = build_scene(&cli)?;
    match cli.cmd {
        Command::Inspect => inspect(&scene),
        Command::Simulate { frames, delta, json } => simulate(&mut scene, frames, delta, json.as_deref())?,
        Command::Play { seconds } => play(&mut scene, seconds),
        Command::Trace { frames, delta, size, out } => trace(&mut scene, frames, delta, size, &out)?,
    }
    Ok(())
}

fn inspect(scene: &Scene) {
    let f = &scene.figure;
    for (name, part) in [("torso", &f.torso), ("left leg", &f.left_leg), ("right leg", &f.right_leg)] {
        println!("{:<10} length={:.3} width={:.3}", name, part.length, part.width);
    }
    println!("speed: {:.3} (leg cadence {:.3} Hz)", f.speed, f.leg_frequency());
    println!("path spacing: {}", f.path_spacing);
    println!("control points: {}{}", f.control_points().len(), if f.path().is_followable() { "" } else { " (too few to follow)" });
    for (i, p) in f.control_points().iter().enumerate() {
        println!("  [{}] ({:.3}, {:.3}, {:.3})", i, p.x, p.y, p.z);
    }
}

fn simulate(scene: &mut Scene, frames: u64, delta: f32, json: Option<&Path>) -> Result<()> {
    let mut out = match json {
        Some(p) => Some(std::io::BufWriter::new(std::fs::File::create(p).with_context(|| format!("creating {}", p.display()))?)),
        None => None,
    };
    let mut clock = FixedStep { step: delta };
    let mut last: Vec<DrawCommand> = Vec::new();
    for _ in 0..frames {
        last.clear();
        scene.frame(clock.delta(), &mut last);
        if let Some(w) = out.as_mut() {
            writeln!(w, "{}", scene.snapshot().to_json()?)?;
        }
    }
    if let Some(mut w) = out { w.flush()?; }

    let f = &scene.figure;
    let p = f.position();
    println!("{} frames, t={:.3}s path_t={:.3}", scene.frame_index(), f.time, f.path_t);
    println!("position ({:.3}, {:.3}, {:.3}) heading {:.1}°", p.x, p.y, p.z, f.heading());
    println!("legs: left {:.1}° right {:.1}°", f.left_leg.angle, f.right_leg.angle);
    println!("last frame: {} draws, {} bytes of instance data", last.len(), pack_instances(&last).len());
    if let Some(p) = json { println!("Wrote snapshots to {}", p.display()); }
    Ok(())
}

fn play(scene: &mut Scene, seconds: f32) {
    let mut clock = WallClock::new();
    let mut elapsed = 0.0f32;
    let mut next_report = 0.0f32;
    while elapsed < seconds {
        std::thread::sleep(std::time::Duration::from_millis(16));
        let dt = clock.delta();
        elapsed += dt;
        let mut sink = CountingSink::default();
        scene.frame(dt, &mut sink);
        if elapsed >= next_report {
            let p = scene.figure.position();
            log::info!(
                "frame {} t={:.2}s pos=({:.2}, {:.2}) heading={:.1} draws={}",
                scene.frame_index(), scene.figure.time, p.x, p.z, scene.figure.heading(), sink.cubes + sink.lines
            );
            next_report += 1.0;
        }
    }
}

fn trace(scene: &mut Scene, frames: u64, delta: f32, size: u32, out: &Path) -> Result<()> {
    let mut track = Vec::with_capacity(frames as usize);
    let mut clock = FixedStep { step: delta };
    for _ in 0..frames {
        scene.tick(clock.delta());
        track.push(scene.figure.position());
    }
    let points = scene.figure.control_points();

    let (mut lo, mut hi) = (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN));
    for p in points.iter().chain(track.iter()) {
        lo = lo.min(*p);
        hi = hi.max(*p);
    }
    if points.is_empty() && track.is_empty() { lo = Vec3::splat(-1.0); hi = Vec3::splat(1.0); }
    let extent = (hi.x - lo.x).max(hi.z - lo.z).max(1e-3);
    let size = size.max(16);
    let margin = size as f32 * 0.05;
    let scale = (size as f32 - 2.0 * margin) / extent;
    let to_px = |p: Vec3| -> (i64, i64) {
        (((p.x - lo.x) * scale + margin) as i64, ((p.z - lo.z) * scale + margin) as i64)
    };

    let mut img = image::RgbaImage::from_pixel(size, size, image::Rgba(scene.clear_color.to_rgba8()));
    let mut plot = |x: i64, y: i64, c: Color| {
        if x >= 0 && y >= 0 && (x as u32) < size && (y as u32) < size {
            img.put_pixel(x as u32, y as u32, image::Rgba(c.to_rgba8()));
        }
    };
    for p in &track {
        let (x, y) = to_px(*p);
        plot(x, y, Color::RED);
    }
    for p in points {
        let (x, y) = to_px(*p);
        for dy in -2..=2 {
            for dx in -2..=2 { plot(x + dx, y + dy, Color::BLUE); }
        }
    }
    img.save(out).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {}x{} trace of {} frames to {}", size, size, frames, out.display());
    Ok(())
}
