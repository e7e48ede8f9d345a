// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless

#![allow(clippy::print_stdout, reason = "The summary is the output")]

use anyhow::{bail, Context, Result};
use clap::Parser;
use fatline::backend::RecordingBackend;
use fatline::peniko::color::palette::css;
use fatline::shapes::{circle, line_length, quadratic_bezier, segmentize};
use fatline::{
    Distribution, LineBuilder, LineOptions, LineParams, MaterialParams, Point3, PointInput, Ray,
    RaycastParams,
};

struct Scene {
    name: &'static str,
    build: fn(&Args) -> PointInput,
}

const SCENES: &[Scene] = &[
    Scene {
        name: "circle",
        build: |args| PointInput::Points(circle(1., args.segments, None, 0.)),
    },
    Scene {
        name: "rings",
        build: |args| {
            PointInput::Polylines(
                (1..=3)
                    .map(|i| circle(i as f32 * 0.5, args.segments, None, i as f32 * 0.1))
                    .collect(),
            )
        },
    },
    Scene {
        name: "bezier",
        build: |args| {
            PointInput::Points(quadratic_bezier(
                Point3::new(-1., 0., 0.),
                Point3::new(0., 2., 0.),
                Point3::new(1., 0., 0.),
                args.segments,
            ))
        },
    },
    Scene {
        name: "zigzag",
        build: |args| {
            let corners = [
                Point3::new(-1., -1., 0.),
                Point3::new(-0.5, 1., 0.),
                Point3::new(0., -1., 0.),
                Point3::new(0.5, 1., 0.),
                Point3::new(1., -1., 0.),
            ];
            let total = line_length(&corners);
            PointInput::Points(segmentize(&corners, total / args.segments.max(1) as f32))
        },
    },
];

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.print_scenes {
        println!("Available scenes:");
        for (idx, scene) in SCENES.iter().enumerate() {
            println!("{idx}: {}", scene.name);
        }
        return Ok(());
    }

    let scene = match SCENES
        .iter()
        .find(|scene| scene.name.eq_ignore_ascii_case(&args.scene))
    {
        Some(scene) => scene,
        None => {
            let parsed = args.scene.parse::<usize>().context(format!(
                "'{}' didn't match any scene, trying to parse as index",
                args.scene
            ))?;
            let Some(scene) = SCENES.get(parsed) else {
                bail!("{parsed} doesn't fit in scenes (len {})", SCENES.len());
            };
            scene
        }
    };
    log::info!("Building scene '{}'", scene.name);

    let params = LineParams {
        points: (scene.build)(&args),
        widths: Some(vec![1., 1., 3., 3., 1., 1.]),
        width_distribution: Distribution::Even,
        ..Default::default()
    };
    let material_params = MaterialParams {
        line_width: args.line_width,
        colors: vec![css::RED, css::GOLD, css::ROYAL_BLUE],
        color_distribution: Distribution::StartEnd,
        use_colors: true,
        ..Default::default()
    };
    let (mut line, mut material) = LineBuilder::create(
        params,
        material_params,
        LineOptions {
            updatable: true,
            lazy: true,
        },
        RecordingBackend::new(),
    )?;
    line.flush();
    material.flush(line.backend_mut());

    let aggregate = line.aggregate();
    println!(
        "{}: {} polylines, {} points, {} vertices, {} triangles",
        scene.name,
        aggregate.polylines.len(),
        aggregate.point_count(),
        aggregate.vertex_count(),
        aggregate.triangle_count()
    );
    for attribute in aggregate.attributes() {
        println!(
            "  {:<12} {} x {} values",
            attribute.name,
            attribute.components,
            attribute.data.len() / attribute.components as usize
        );
    }
    if let Some(texture) = material.color_texture() {
        println!("  color texture: {} texels", texture.width());
    }
    println!("  backend commands: {}", line.backend().commands.len());

    let ray = Ray::looking_at(
        Point3::new(args.ray_x, args.ray_y, 10.),
        Point3::new(args.ray_x, args.ray_y, 0.),
    );
    let hits = line.raycast(
        &ray,
        &RaycastParams {
            threshold: args.threshold,
            line_width: args.line_width,
            units_per_pixel: args.units_per_pixel,
        },
    );
    println!(
        "Ray at ({}, {}) hits {} segments",
        args.ray_x,
        args.ray_y,
        hits.len()
    );
    for hit in hits {
        println!(
            "  index {} of polyline {:?} at ({:.3}, {:.3}, {:.3}), distance {:.3}",
            hit.index, hit.polyline, hit.point.x, hit.point.y, hit.point.z, hit.distance
        );
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Which scene (name) to build
    /// If no scenes have that name, an index can be specified instead
    #[arg(long, short, default_value = "0")]
    scene: String,
    /// Display a list of all scene names
    #[arg(long, short)]
    print_scenes: bool,
    /// Number of segments of generated curves
    #[arg(long, default_value_t = 64)]
    segments: usize,
    /// Base line width in pixels
    #[arg(long, default_value_t = 4.)]
    line_width: f32,
    /// X coordinate of the probing ray
    #[arg(long, default_value_t = 1.)]
    ray_x: f32,
    /// Y coordinate of the probing ray
    #[arg(long, default_value_t = 0.)]
    ray_y: f32,
    /// Raycast slack in pixels
    #[arg(long, default_value_t = 1.)]
    threshold: f32,
    /// World units covered by one pixel
    #[arg(long, default_value_t = 0.01)]
    units_per_pixel: f32,
}
