use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::{Duration, Instant};

use yacast_rs::{
    renderer::{
        Minimap, PostFx, RenderConfig, Renderer, Rgba, Scene, Software, TextureSeed,
    },
    sim::{InputCmd, TicRunner, demo},
    world::{LevelAtmosphere, procgen},
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Atmosphere {
    Default,
    Clear,
    Crypt,
    Toxic,
}

impl Atmosphere {
    fn preset(self) -> LevelAtmosphere {
        match self {
            Atmosphere::Default => LevelAtmosphere::default(),
            Atmosphere::Clear => LevelAtmosphere::clear(),
            Atmosphere::Crypt => LevelAtmosphere::crypt(),
            Atmosphere::Toxic => LevelAtmosphere::toxic(),
        }
    }
}

/// Walk the built-in demo level with the software raycaster.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value_t = 960)]
    width: usize,
    #[arg(long, default_value_t = 600)]
    height: usize,
    /// Texture noise seed.
    #[arg(long, default_value_t = 0x5EED_CA57)]
    seed: u32,
    /// Fresh textures every run (overrides --seed).
    #[arg(long)]
    random_textures: bool,
    #[arg(long, value_enum, default_value_t = Atmosphere::Crypt)]
    atmosphere: Atmosphere,
    #[arg(long)]
    no_postfx: bool,
    #[arg(long)]
    no_minimap: bool,
}

const NUMBER_KEYS: [Key; 3] = [Key::Key1, Key::Key2, Key::Key3];

fn read_input(win: &Window) -> InputCmd {
    let mut cmd = InputCmd::default();

    /* movement --------------------------------------------------------- */
    if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
        cmd.forward += 1.0;
    }
    if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
        cmd.forward -= 1.0;
    }
    if win.is_key_down(Key::A) {
        cmd.strafe -= 1.0;
    }
    if win.is_key_down(Key::D) {
        cmd.strafe += 1.0;
    }
    if win.is_key_down(Key::Left) {
        cmd.turn -= 1.0;
    }
    if win.is_key_down(Key::Right) {
        cmd.turn += 1.0;
    }
    if win.is_key_down(Key::PageUp) {
        cmd.look += 1.0;
    }
    if win.is_key_down(Key::PageDown) {
        cmd.look -= 1.0;
    }

    /* modifiers & actions --------------------------------------------- */
    cmd.run = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
    cmd.fire = win.is_key_down(Key::LeftCtrl) || win.is_key_down(Key::RightCtrl);
    cmd.use_act = win.is_key_pressed(Key::Space, KeyRepeat::No); // edge-trigger
    cmd.jump = win.is_key_pressed(Key::J, KeyRepeat::No);
    cmd.crouch = win.is_key_down(Key::C);
    cmd.aim = win.is_key_down(Key::Z);
    cmd.throw = win.is_key_pressed(Key::B, KeyRepeat::No);

    for (i, &key) in NUMBER_KEYS.iter().enumerate() {
        if win.is_key_pressed(key, KeyRepeat::No) {
            cmd.weapon = Some((i + 1) as u8);
            break;
        }
    }
    cmd
}

/// Copy `src` into `dst` translated by (`dx`, `dy`); uncovered pixels go black.
fn blit_shifted(src: &[Rgba], dst: &mut [Rgba], w: usize, h: usize, dx: i32, dy: i32) {
    for y in 0..h {
        let sy = y as i32 - dy;
        let row = &mut dst[y * w..(y + 1) * w];
        if !(0..h as i32).contains(&sy) {
            row.fill(0xFF00_0000);
            continue;
        }
        for (x, px) in row.iter_mut().enumerate() {
            let sx = x as i32 - dx;
            *px = if (0..w as i32).contains(&sx) {
                src[sy as usize * w + sx as usize]
            } else {
                0xFF00_0000
            };
        }
    }
}

/// Paste the minimap into the top-left corner with a small margin.
fn overlay(minimap: &Minimap, dst: &mut [Rgba], w: usize, h: usize) {
    const MARGIN: usize = 8;
    let mw = minimap.width().min(w.saturating_sub(MARGIN));
    let mh = minimap.height().min(h.saturating_sub(MARGIN));
    for y in 0..mh {
        let src = &minimap.buffer()[y * minimap.width()..y * minimap.width() + mw];
        let at = (y + MARGIN) * w + MARGIN;
        dst[at..at + mw].copy_from_slice(src);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        texture_seed: if args.random_textures {
            TextureSeed::Random
        } else {
            TextureSeed::Fixed(args.seed)
        },
        post_fx: if args.no_postfx {
            PostFx::empty()
        } else {
            PostFx::all()
        },
        ..RenderConfig::default()
    };
    let (w, h) = (config.width, config.height);

    let bank = procgen::build_bank(config.texture_seed.resolve())
        .context("generating procedural textures")?;
    let mut map = demo::level().context("building demo level")?;
    let atmosphere = args.atmosphere.preset();
    let mut sim = TicRunner::demo(u64::from(args.seed));

    let mut minimap = Minimap::new(config.minimap_cell);
    let mut renderer = Software::new(config);
    let mut present = vec![0u32; w * h];
    let mut entities = Vec::new();
    let mut particles = Vec::new();

    let mut win = Window::new("yacast - software raycaster", w, h, WindowOptions::default())?;
    win.set_target_fps(60);
    info!("{}x{} window, {:?} atmosphere", w, h, args.atmosphere);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let cmd = read_input(&win);
        sim.pump(&mut map, cmd);

        sim.snapshot(&mut entities);
        sim.particles(&mut particles);
        let camera = sim.camera();

        let t0 = Instant::now();
        let scene = Scene {
            map: &map,
            camera: &camera,
            atmosphere: &atmosphere,
            entities: &entities,
            particles: &particles,
            view_model: sim.view_model(),
            muzzle_flash: sim.muzzle_flash(),
            effects: sim.effects(),
            time: sim.time(),
        };
        renderer.begin_frame(w, h);
        renderer.draw_scene(&scene, &bank);

        let shake = renderer.shake_offset();
        let mut result = Ok(());
        renderer.end_frame(|fb, fw, fh| {
            blit_shifted(fb, &mut present, fw, fh, shake.x, shake.y);
            if !args.no_minimap {
                minimap.render(&map, &camera, &entities);
                overlay(&minimap, &mut present, fw, fh);
            }
            acc_time += t0.elapsed();
            acc_frames += 1;
            result = win.update_with_buffer(&present, fw, fh);
        });
        result?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            let stats = renderer.stats();
            info!(
                "avg render: {:.2} ms ({:.1} FPS), {} sprites, {} lights",
                avg_ms,
                1000.0 / avg_ms,
                stats.sprites_drawn,
                stats.lights
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
