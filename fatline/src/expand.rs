// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion of polylines into doubled-vertex ribbons.

use core::fmt;

use log::debug;

use crate::{LineAggregate, Point3, Polyline, PolylineRange};

/// Where the per-point width multipliers come from.
///
/// Widths are addressed by the global index of a point, counting across all polylines of a
/// line object in order. Each point has an "up" and a "down" width, applied to its
/// `side = +1` and `side = -1` vertex respectively.
#[derive(Clone, Copy, Default)]
pub enum WidthSource<'a> {
    /// Every point gets width `(1, 1)`.
    #[default]
    Default,
    /// A table of two values per point. Points past the end of the table get `(1, 1)`.
    Table(&'a [f32]),
    /// A callback from point index to `[up, down]`.
    Callback(&'a dyn Fn(usize) -> [f32; 2]),
}

impl fmt::Debug for WidthSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Table(table) => f.debug_tuple("Table").field(table).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl WidthSource<'_> {
    /// The `[up, down]` widths of the point with global index `point`.
    pub fn resolve(&self, point: usize) -> [f32; 2] {
        match self {
            Self::Default => [1., 1.],
            Self::Table(table) => match table.get(point * 2..point * 2 + 2) {
                Some(&[up, down]) => [up, down],
                _ => [1., 1.],
            },
            Self::Callback(callback) => callback(point),
        }
    }
}

/// Expand polylines into a single [`LineAggregate`].
///
/// Polylines are expanded independently and concatenated; indices of each polyline are
/// offset by the number of vertices emitted before it, so polylines never share vertices.
/// A polyline with a single point contributes two vertices and no triangles.
pub fn expand(polylines: &[Polyline], widths: &WidthSource<'_>) -> LineAggregate {
    let mut aggregate = LineAggregate::new();
    let mut point_base = 0;
    for polyline in polylines {
        expand_polyline(&mut aggregate, polyline, widths, point_base);
        point_base += polyline.len();
    }
    debug!(
        "Expanded {} polylines into {} vertices and {} triangles",
        polylines.len(),
        aggregate.vertex_count(),
        aggregate.triangle_count()
    );
    aggregate
}

fn expand_polyline(
    aggregate: &mut LineAggregate,
    polyline: &Polyline,
    widths: &WidthSource<'_>,
    point_base: usize,
) {
    let len = polyline.len();
    if len == 0 {
        return;
    }
    let last = len - 1;
    let closed = polyline.is_closed();
    let vertex_base = aggregate.vertex_count() as u32;
    let index_start = aggregate.indices.len();

    for (j, point) in polyline.points().enumerate() {
        let counter = if last == 0 {
            0.
        } else {
            j as f32 / last as f32
        };
        // Open ends clamp to the point itself, closed loops wrap past the shared end point.
        let previous = match j {
            0 if closed => polyline.point(len - 2),
            0 => point,
            _ => polyline.point(j - 1),
        };
        let next = match j {
            _ if j < last => polyline.point(j + 1),
            _ if closed => polyline.point(1),
            _ => point,
        };

        push_twice(&mut aggregate.positions, point);
        push_twice(&mut aggregate.previous, previous);
        push_twice(&mut aggregate.next, next);
        aggregate.counters.extend_from_slice(&[counter, counter]);
        aggregate.uvs.extend_from_slice(&[counter, 0., counter, 1.]);
        aggregate.side.extend_from_slice(&[1., -1.]);
        aggregate
            .widths
            .extend_from_slice(&widths.resolve(point_base + j));

        let n = vertex_base + 2 * j as u32;
        aggregate
            .color_pointers
            .extend_from_slice(&[n as f32, (n + 1) as f32]);
        if j < last {
            aggregate
                .indices
                .extend_from_slice(&[n, n + 1, n + 2, n + 2, n + 1, n + 3]);
        }
    }

    aggregate.polylines.push(PolylineRange {
        vertices: vertex_base..vertex_base + 2 * len as u32,
        indices: index_start..aggregate.indices.len(),
    });
}

#[inline]
fn push_twice(buffer: &mut Vec<f32>, point: Point3) {
    let [x, y, z] = point.to_array();
    buffer.extend_from_slice(&[x, y, z, x, y, z]);
}
