//! Headless demo: load the scene mesh, rain particles on it and push every
//! frame's positions to a render backend.

use anyhow::{Context, Result};
use asset::obj;
use corelib::FileSource;
use particles::{ParticleSystem, SimParams};
use rand::{SeedableRng, rngs::StdRng};
use renderer::{CpuBackend, GpuMesh, PointCloud};

const LOG_EVERY: u64 = 100;

#[derive(Clone, Debug, PartialEq)]
struct Options {
    obj: String,
    frames: u64,
    particles: usize,
    seed: Option<u64>,
    flock: bool,
    collide: bool,
    obstacle: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            obj: "assets/pyramid.obj".to_owned(),
            frames: 600,
            particles: SimParams::MAX_NUM_PARTICLES,
            seed: None,
            flock: false,
            collide: false,
            obstacle: true,
        }
    }
}

impl Options {
    // Accept: --obj=PATH --frames=N --particles=N --seed=N --flock --collide --no-obstacle
    fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut opts = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            if let Some(v) = arg.strip_prefix("--obj=") {
                opts.obj = v.to_owned();
            } else if let Some(v) = arg.strip_prefix("--frames=") {
                match v.parse() {
                    Ok(n) => opts.frames = n,
                    Err(_) => log::warn!("Bad frame count '{}', keeping {}", v, opts.frames),
                }
            } else if let Some(v) = arg.strip_prefix("--particles=") {
                match v.parse() {
                    Ok(n) => opts.particles = n,
                    Err(_) => log::warn!("Bad particle count '{}', keeping {}", v, opts.particles),
                }
            } else if let Some(v) = arg.strip_prefix("--seed=") {
                match v.parse() {
                    Ok(n) => opts.seed = Some(n),
                    Err(_) => log::warn!("Bad seed '{}', using entropy", v),
                }
            } else if arg == "--flock" {
                opts.flock = true;
            } else if arg == "--collide" {
                opts.collide = true;
            } else if arg == "--no-obstacle" {
                opts.obstacle = false;
            } else {
                log::warn!("Unknown argument '{}', ignored.", arg);
            }
        }
        opts
    }

    fn sim_params(&self) -> SimParams {
        let params = SimParams::default().with_count(self.particles);
        if self.obstacle {
            params
        } else {
            params.with_obstacle(None)
        }
    }
}

fn run(opts: &Options) -> Result<()> {
    let source = FileSource::default();
    let mesh = obj::load_obj(&source, &opts.obj)
        .with_context(|| format!("Failed to load mesh {}", opts.obj))?;

    let mut backend = CpuBackend::new();
    let scene = GpuMesh::upload(&mut backend, "scene", &mesh)?;

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut swarm = ParticleSystem::new(opts.sim_params(), &mut rng);
    let cloud = PointCloud::upload(&mut backend, "particles", swarm.positions())?;

    let mut respawned = 0usize;
    for _ in 0..opts.frames {
        respawned += swarm.update();
        if opts.flock {
            swarm.flock();
        }
        if opts.collide {
            swarm.collide_all();
        }
        cloud.refresh(&mut backend, swarm.positions())?;

        if swarm.frame() % LOG_EVERY == 0 {
            log::info!(
                "Frame {}: centroid {:.3?}, {} respawns so far",
                swarm.frame(),
                swarm.centroid(),
                respawned
            );
        }
    }

    log::info!(
        "Draw calls: {:?}, {:?}; {} bytes uploaded",
        scene.draw_call(),
        cloud.draw_call(),
        backend.bytes_written()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = Options::parse(&args);
    log::info!(
        "Starting particle demo. mesh={}, frames={}, particles={}, seed={:?}, flock={}, collide={}, obstacle={}",
        opts.obj,
        opts.frames,
        opts.particles,
        opts.seed,
        opts.flock,
        opts.collide,
        opts.obstacle
    );

    run(&opts)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
