// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers which generate or reshape point lists.

use core::f32::consts::TAU;

use crate::Point3;

/// Total length of the polyline through `points`.
pub fn line_length(points: &[Point3]) -> f32 {
    points.windows(2).map(|pair| pair[0].distance(pair[1])).sum()
}

/// The shortest and longest segment of the polyline through `points`.
///
/// Returns `None` for fewer than two points.
pub fn segment_length_range(points: &[Point3]) -> Option<(f32, f32)> {
    points
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .fold(None, |range, length| match range {
            None => Some((length, length)),
            Some((min, max)) => Some((f32::min(min, length), f32::max(max, length))),
        })
}

/// Split the segment `a..b` into `count` equal parts, returning the `count + 1` end points.
pub fn divide_segment(a: Point3, b: Point3, count: usize) -> Vec<Point3> {
    if count == 0 {
        return vec![a];
    }
    let step = (b - a) * (count as f32).recip();
    (0..=count).map(|i| a + step * i as f32).collect()
}

/// Subdivide every segment longer than `max_len` into equal parts no longer than `max_len`.
///
/// Joints shared by two segments appear once in the output.
pub fn segmentize(points: &[Point3], max_len: f32) -> Vec<Point3> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut out = vec![first];
    for pair in points.windows(2) {
        let length = pair[0].distance(pair[1]);
        if max_len > 0. && length > max_len {
            let count = (length / max_len).ceil() as usize;
            out.extend(divide_segment(pair[0], pair[1], count).into_iter().skip(1));
        } else {
            out.push(pair[1]);
        }
    }
    out
}

/// Points on a circle around the origin in the plane at height `z`.
///
/// Returns `segments + 1` points, `angle_step` radians apart. Without a step the points cover
/// a full turn, so that the last point lands on the first (up to rounding).
pub fn circle(radius: f32, segments: usize, angle_step: Option<f32>, z: f32) -> Vec<Point3> {
    let step = angle_step.unwrap_or(TAU / segments.max(1) as f32);
    (0..=segments)
        .map(|i| {
            let (sin, cos) = (i as f32 * step).sin_cos();
            Point3::new(cos * radius, sin * radius, z)
        })
        .collect()
}

/// Sample the quadratic Bézier curve `p0, p1, p2` at `t = i / segments` for `i < segments`.
///
/// The end point `p2` itself is not included.
pub fn quadratic_bezier(p0: Point3, p1: Point3, p2: Point3, segments: usize) -> Vec<Point3> {
    (0..segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1. - t;
            p0 * (u * u) + p1 * (2. * t * u) + p2 * (t * t)
        })
        .collect()
}
