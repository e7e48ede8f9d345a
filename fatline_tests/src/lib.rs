// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fatline tests.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![allow(
    missing_debug_implementations,
    missing_docs,
    clippy::missing_assert_message,
    reason = "Test fixtures"
)]

use anyhow::{ensure, Result};
use fatline::backend::RecordingBackend;
use fatline::{
    Line, LineAggregate, LineBuilder, LineMaterial, LineOptions, LineParams, MaterialParams,
    Point3, PointInput,
};

/// The parameters of a test line.
pub struct TestParams {
    pub name: String,
    pub params: LineParams,
    pub material: MaterialParams,
    pub options: LineOptions,
}

impl TestParams {
    pub fn new(name: impl Into<String>, points: impl Into<PointInput>) -> Self {
        Self {
            name: name.into(),
            params: LineParams {
                points: points.into(),
                ..Default::default()
            },
            material: MaterialParams::default(),
            options: LineOptions::default(),
        }
    }
}

/// Points along the x axis, one unit apart.
pub fn straight(count: usize) -> Vec<Point3> {
    (0..count).map(|i| Point3::new(i as f32, 0., 0.)).collect()
}

/// The unit square, closed by repeating its first corner.
pub fn square_loop() -> Vec<Point3> {
    vec![
        Point3::new(0., 0., 0.),
        Point3::new(1., 0., 0.),
        Point3::new(1., 1., 0.),
        Point3::new(0., 1., 0.),
        Point3::new(0., 0., 0.),
    ]
}

/// Build a line with a recording backend, then check its buffers for consistency.
pub fn build(params: TestParams) -> Result<(Line<RecordingBackend>, LineMaterial)> {
    let (line, material) = LineBuilder::create(
        params.params,
        params.material,
        params.options,
        RecordingBackend::new(),
    )?;
    check_aggregate(line.aggregate()).map_err(|e| e.context(params.name))?;
    Ok((line, material))
}

/// Check the structural invariants of an aggregate.
pub fn check_aggregate(aggregate: &LineAggregate) -> Result<()> {
    let vertices = aggregate.vertex_count();
    for attribute in aggregate.attributes() {
        ensure!(
            attribute.data.len() == vertices * attribute.components as usize,
            "attribute '{}' has {} values for {vertices} vertices",
            attribute.name,
            attribute.data.len()
        );
    }
    ensure!(aggregate.indices.len() % 3 == 0, "partial triangle");
    for range in &aggregate.polylines {
        let indices = &aggregate.indices[range.indices.clone()];
        ensure!(
            indices.iter().all(|index| range.vertices.contains(index)),
            "polyline {range:?} references a foreign vertex"
        );
        let points = (range.vertices.end - range.vertices.start) as usize / 2;
        ensure!(
            indices.len() == 6 * points.saturating_sub(1),
            "polyline {range:?} has {} indices",
            indices.len()
        );
    }
    for (vertex, pair) in aggregate.side.chunks_exact(2).enumerate() {
        ensure!(pair == [1., -1.], "vertex pair {vertex} has sides {pair:?}");
        ensure!(
            aggregate.position(2 * vertex) == aggregate.position(2 * vertex + 1),
            "vertex pair {vertex} does not share its position"
        );
    }
    Ok(())
}
