//! Runs a grid of spinning cubes through the vertex stage and writes the
//! accepted triangles as a wireframe PNG.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use image::{Rgba, RgbaImage};
use log::info;

use agl_vertex::clipper::ClipPlane;
use agl_vertex::math::fixed::TRI_FRACTION_BITS;
use agl_vertex::mesh::{CUBE_FACES, CUBE_VERTICES};
use agl_vertex::prelude::*;

const COLOR_BACKGROUND: Rgba<u8> = Rgba([24, 24, 24, 255]);
const COLOR_WIREFRAME: Rgba<u8> = Rgba([0, 255, 0, 255]);
const COLOR_PARTIAL: Rgba<u8> = Rgba([255, 160, 0, 255]);

#[derive(Parser, Debug)]
#[command(about = "Project a grid of cubes through the fixed-point vertex stage")]
struct Args {
    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Write window-space depth.
    #[arg(long)]
    depth: bool,

    /// User clip plane `a,b,c,d` in eye space; may be repeated up to six times.
    #[arg(long = "clip-plane", value_parser = parse_plane)]
    clip_planes: Vec<[f32; 4]>,

    /// Cubes per side of the grid.
    #[arg(long, default_value_t = 5)]
    grid: i32,

    /// Rotation of every cube about Y, in degrees.
    #[arg(long, default_value_t = 30.0)]
    angle: f32,

    /// Distance from the eye to the grid.
    #[arg(long, default_value_t = 12.0)]
    distance: f32,

    #[arg(short, long, default_value = "cubes.png")]
    output: PathBuf,
}

fn parse_plane(s: &str) -> Result<[f32; 4], String> {
    let values = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    values
        .try_into()
        .map_err(|v: Vec<f32>| format!("expected 4 coefficients, got {}", v.len()))
}

#[derive(Default, Debug)]
struct Stats {
    triangles: usize,
    rejected: usize,
    partial: usize,
    rejected_by_plane: [usize; 6],
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.clip_planes.len() > MAX_CLIP_PLANES {
        return Err(format!("at most {MAX_CLIP_PLANES} clip planes are supported").into());
    }

    let mut ctx = Context::new(i32::try_from(args.width)?, i32::try_from(args.height)?);
    if args.depth {
        ctx.enable(GL_DEPTH_TEST);
    }
    // Planes are given in eye space, so register them under an identity model-view.
    for (i, plane) in args.clip_planes.iter().enumerate() {
        let name = GL_CLIP_PLANE0 + i as u32;
        ctx.clip_planef(name, plane);
        ctx.enable(name);
    }
    if ctx.get_error() != GL_NO_ERROR {
        return Err("failed to configure the context".into());
    }
    info!("vertex pipeline: {}", ctx.pipeline());

    let aspect = args.width as f32 / args.height.max(1) as f32;
    let projection = Mat4::perspective(60f32.to_radians(), aspect, 1.0, 100.0);
    let rotation = Mat4::rotation_y(args.angle.to_radians()) * Mat4::rotation_x(0.4);

    let mut img = RgbaImage::from_pixel(args.width, args.height, COLOR_BACKGROUND);
    let mut stats = Stats::default();
    let half = (args.grid - 1) as f32 * 0.5;

    for gy in 0..args.grid {
        for gx in 0..args.grid {
            let modelview = Mat4::translation(
                (gx as f32 - half) * 3.0,
                (gy as f32 - half) * 3.0,
                -args.distance,
            ) * rotation;
            ctx.set_modelview(modelview);
            let mvp = Matrixx::from(&(projection * modelview));

            for face in CUBE_FACES {
                let mut tri = face.map(|i| {
                    let object = CUBE_VERTICES[i];
                    Vertex::new(object, mvp.point3(&object))
                });
                stats.triangles += 1;

                if ctx.process_primitive(&mut tri) {
                    stats.rejected += 1;
                    for (n, plane) in ClipPlane::ALL.iter().enumerate() {
                        if ctx.cull().contains(plane.flag()) {
                            stats.rejected_by_plane[n] += 1;
                        }
                    }
                    continue;
                }

                let partial = tri.iter().any(Vertex::is_clipped);
                if partial {
                    // Needs a tessellating clipper; draw only edges with both ends valid.
                    stats.partial += 1;
                }
                let color = if partial { COLOR_PARTIAL } else { COLOR_WIREFRAME };
                for k in 0..3 {
                    let (a, b) = (&tri[k], &tri[(k + 1) % 3]);
                    if !a.is_clipped() && !b.is_clipped() {
                        draw_line(&mut img, window_xy(a), window_xy(b), color);
                    }
                }
            }
        }
    }

    info!(
        "{} triangles: {} trivially rejected, {} partially clipped",
        stats.triangles, stats.rejected, stats.partial
    );
    for (plane, count) in ClipPlane::ALL.iter().zip(stats.rejected_by_plane) {
        if count > 0 {
            info!("  rejected by {plane:?}: {count}");
        }
    }

    img.save(&args.output)?;
    println!(
        "wrote {} ({} of {} triangles rejected)",
        args.output.display(),
        stats.rejected,
        stats.triangles
    );
    Ok(())
}

/// Window position in whole pixels, from the rasterizer's 28.4 format.
fn window_xy(v: &Vertex) -> (i32, i32) {
    (v.window.x >> TRI_FRACTION_BITS, v.window.y >> TRI_FRACTION_BITS)
}

/// DDA line in window coordinates (origin bottom-left).
fn draw_line(img: &mut RgbaImage, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: Rgba<u8>) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let steps = dx.abs().max(dy.abs()).max(1);
    let x_increment = dx as f32 / steps as f32;
    let y_increment = dy as f32 / steps as f32;
    let (w, h) = (img.width() as i32, img.height() as i32);

    let mut x = x0 as f32;
    let mut y = y0 as f32;
    for _ in 0..=steps {
        let px = x.round() as i32;
        let py = h - 1 - y.round() as i32;
        if (0..w).contains(&px) && (0..h).contains(&py) {
            img.put_pixel(px as u32, py as u32, color);
        }
        x += x_increment;
        y += y_increment;
    }
}
