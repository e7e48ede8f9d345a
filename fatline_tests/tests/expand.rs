// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ribbon expansion scenarios and properties.

#![allow(clippy::missing_assert_message, reason = "Tests")]

use fatline::{expand, normalize, Point3, PointInput, Polyline, WidthSource};
use fatline_tests::{build, check_aggregate, square_loop, straight, TestParams};

fn previous(aggregate: &fatline::LineAggregate, vertex: usize) -> Point3 {
    Point3::from_slice(&aggregate.previous[vertex * 3..vertex * 3 + 3])
}

fn next(aggregate: &fatline::LineAggregate, vertex: usize) -> Point3 {
    Point3::from_slice(&aggregate.next[vertex * 3..vertex * 3 + 3])
}

#[test]
fn open_three_points() {
    let (line, _) = build(TestParams::new("open_three_points", straight(3))).unwrap();
    let aggregate = line.aggregate();
    assert_eq!(aggregate.vertex_count(), 6);
    assert_eq!(aggregate.triangle_count(), 4);
    // Point 0 clamps backwards, point 2 clamps forwards.
    assert_eq!(previous(aggregate, 0), Point3::new(0., 0., 0.));
    assert_eq!(next(aggregate, 4), Point3::new(2., 0., 0.));
    assert_eq!(next(aggregate, 5), Point3::new(2., 0., 0.));
}

#[test]
fn closed_three_points() {
    let points = vec![
        Point3::new(0., 0., 0.),
        Point3::new(1., 0., 0.),
        Point3::new(0., 0., 0.),
    ];
    let (line, _) = build(TestParams::new("closed_three_points", points)).unwrap();
    let aggregate = line.aggregate();
    assert_eq!(previous(aggregate, 0), Point3::new(1., 0., 0.));
    assert_eq!(next(aggregate, 4), Point3::new(1., 0., 0.));
}

#[test]
fn closed_loop_detection_is_exact() {
    let mut points = square_loop();
    let aggregate = expand(&[Polyline::from_points(&points)], &WidthSource::Default);
    assert_eq!(previous(&aggregate, 0), aggregate.position(2 * (points.len() - 2)));

    // A tiny gap means an open polyline.
    points[4].x = 1e-6;
    let aggregate = expand(&[Polyline::from_points(&points)], &WidthSource::Default);
    assert_eq!(previous(&aggregate, 0), aggregate.position(0));
}

#[test]
fn counts_for_many_lengths() {
    for len in 1..20 {
        let aggregate = expand(
            &[Polyline::from_points(&straight(len))],
            &WidthSource::Default,
        );
        check_aggregate(&aggregate).unwrap();
        assert_eq!(aggregate.vertex_count(), 2 * len);
        assert_eq!(aggregate.uvs.len(), 2 * 2 * len);
        assert_eq!(aggregate.triangle_count(), 2 * (len - 1));
        assert!(aggregate
            .indices
            .iter()
            .all(|&index| (index as usize) < 2 * len));
    }
}

#[test]
fn second_polyline_starts_after_first() {
    for (first, second) in [(2, 2), (3, 5), (7, 1)] {
        let input = PointInput::Polylines(vec![straight(first), straight(second)]);
        let aggregate = expand(&normalize(&input).unwrap(), &WidthSource::Default);
        check_aggregate(&aggregate).unwrap();
        let range = &aggregate.polylines[1];
        assert_eq!(range.vertices.start as usize, 2 * first);
        if let Some(&lowest) = aggregate.indices[range.indices.clone()].iter().min() {
            assert_eq!(lowest as usize, 2 * first);
        }
    }
}

#[test]
fn flat_and_point_inputs_expand_identically() {
    let points = square_loop();
    let flat: Vec<f32> = points.iter().flat_map(|p| p.to_array()).collect();
    let (from_points, _) = build(TestParams::new("points", points)).unwrap();
    let (from_flat, _) = build(TestParams::new("flat", flat)).unwrap();
    assert_eq!(from_points.aggregate(), from_flat.aggregate());
}

#[test]
fn empty_input_is_a_no_op() {
    let (line, _) = build(TestParams::new("empty", PointInput::default())).unwrap();
    assert!(line.aggregate().is_empty());
    assert!(line.aggregate().indices.is_empty());
    assert_eq!(line.backend().upload_count(), 1);
}
