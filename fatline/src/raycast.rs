// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-testing rays against expanded lines.

use crate::{LineAggregate, Point3, Ray};

/// Tolerances of a [`raycast`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastParams {
    /// Extra slack around the line, in pixels.
    pub threshold: f32,
    /// The base line width of the material, in pixels.
    pub line_width: f32,
    /// Size of one pixel in world units at the depth of the line.
    ///
    /// Fatline has no camera, so the caller provides this conversion.
    pub units_per_pixel: f32,
}

impl Default for RaycastParams {
    fn default() -> Self {
        Self {
            threshold: 1.,
            line_width: 1.,
            units_per_pixel: 1.,
        }
    }
}

/// A segment hit by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit<'a> {
    /// Distance from the ray origin to the closest point on the ray.
    pub distance: f32,
    /// Closest point on the segment, in world space.
    pub point: Point3,
    /// Position in the index buffer of the first triangle of the segment.
    pub index: usize,
    /// The polyline the segment belongs to, if the aggregate records polyline ranges.
    pub polyline: Option<usize>,
    /// The aggregate which was hit.
    pub object: &'a LineAggregate,
}

/// Find every segment of `aggregate` which passes close enough to `ray`.
///
/// Each segment is rebuilt from the triangles covering it, displaced by the offset table when
/// there is one. A segment is hit when its distance to the ray is at most
/// `threshold + line_width * width / 2` pixels, where `width` is the larger of the up and down
/// widths at the start of the segment.
///
/// Hits are sorted by increasing distance along the ray.
pub fn raycast<'a>(aggregate: &'a LineAggregate, ray: &Ray, params: &RaycastParams) -> Vec<Hit<'a>> {
    let Some((center, radius)) = aggregate.bounding_sphere() else {
        return Vec::new();
    };
    let max_width = aggregate
        .widths
        .iter()
        .fold(0_f32, |max, width| max.max(width.abs()));
    if !ray.intersects_sphere(center, radius + precision(params, max_width)) {
        return Vec::new();
    }

    let mut hits = Vec::new();
    let mut last_segment = None;
    for (triangle, vertices) in aggregate.indices.chunks_exact(3).enumerate() {
        let (Some(&lo), Some(&hi)) = (vertices.iter().min(), vertices.iter().max()) else {
            continue;
        };
        // Both triangles of a segment cover the same pair of points.
        let segment = (lo / 2, hi / 2);
        if last_segment == Some(segment) || segment.0 == segment.1 {
            continue;
        }
        last_segment = Some(segment);

        let start = 2 * segment.0 as usize;
        let end = 2 * segment.1 as usize;
        let v0 = aggregate.position(start) + aggregate.offset(start);
        let v1 = aggregate.position(end) + aggregate.offset(end);
        let width = aggregate.widths[start].max(aggregate.widths[start + 1]);
        let precision = precision(params, width);

        let approach = ray.approach_segment(v0, v1);
        if approach.distance_squared > precision * precision {
            continue;
        }
        hits.push(Hit {
            distance: approach.ray_t,
            point: approach.point_on_segment,
            index: triangle * 3,
            polyline: aggregate.polyline_of(start as u32),
            object: aggregate,
        });
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

fn precision(params: &RaycastParams, width: f32) -> f32 {
    (params.threshold + params.line_width * width / 2.) * params.units_per_pixel
}
