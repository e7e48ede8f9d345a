// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line object lifecycle: uploads, in-place updates and appends.

#![allow(clippy::missing_assert_message, reason = "Tests")]

use fatline::backend::Command;
use fatline::peniko::color::palette::css;
use fatline::{
    Error, LineAggregate, LineBuilder, LineOptions, LineParams, MaterialParams, Point3, PointInput,
};
use fatline_tests::{build, check_aggregate, square_loop, straight, TestParams};

fn updatable(name: &str, points: Vec<Point3>) -> TestParams {
    let mut params = TestParams::new(name, points);
    params.options.updatable = true;
    params
}

#[test]
fn set_width_is_idempotent() {
    let (mut line, _) = build(updatable("idempotent", straight(4))).unwrap();
    let widths: Vec<f32> = (0..8).map(|i| i as f32 * 0.5).collect();

    line.set_widths(&widths).unwrap();
    let once = line.backend().buffer(LineAggregate::WIDTH).unwrap().to_vec();
    line.set_widths(&widths).unwrap();
    let twice = line.backend().buffer(LineAggregate::WIDTH).unwrap();

    assert_eq!(once, twice);
    assert_eq!(line.backend().buffer_f32(LineAggregate::WIDTH), Some(widths));
    // Updates never re-create buffers.
    assert_eq!(line.backend().upload_count(), 1);
}

#[test]
fn updates_reject_wrong_topology() {
    let (mut line, _) = build(updatable("mismatch", straight(4))).unwrap();
    assert_eq!(
        line.set_widths(&[1.; 6]),
        Err(Error::LengthMismatch {
            buffer: LineAggregate::WIDTH,
            expected: 8,
            actual: 6,
        })
    );
    // The rejected update left the buffer alone.
    assert_eq!(
        line.backend().buffer_f32(LineAggregate::WIDTH),
        Some(vec![1.; 8])
    );
}

#[test]
fn static_lines_are_not_updatable() {
    let (mut line, _) = build(TestParams::new("static", straight(2))).unwrap();
    assert_eq!(
        line.set_widths(&[1.; 4]),
        Err(Error::NotUpdatable(LineAggregate::WIDTH))
    );
    assert_eq!(
        line.set_offsets(&[0.; 12]),
        Err(Error::NotUpdatable(LineAggregate::OFFSET))
    );
}

#[test]
fn offsets_update_in_place() {
    let mut params = updatable("offsets", straight(2));
    params.params.offsets = Some(vec![0.; 12]);
    let (mut line, _) = build(params).unwrap();

    let moved = [0., 1., 0.].repeat(4);
    line.set_offsets(&moved).unwrap();
    assert_eq!(line.backend().buffer_f32(LineAggregate::OFFSET), Some(moved));
    assert_eq!(line.aggregate().offset(3), Point3::new(0., 1., 0.));
}

#[test]
fn lazy_lines_defer_uploads() {
    let mut params = TestParams::new("lazy", straight(3));
    params.options = LineOptions {
        updatable: true,
        lazy: true,
    };
    let (mut line, _) = build(params).unwrap();
    assert!(line.is_upload_pending());
    assert_eq!(line.backend().upload_count(), 0);

    // CPU buffers are already complete and take updates.
    line.set_widths(&[2.; 6]).unwrap();
    line.add_points(&PointInput::Points(straight(2))).unwrap();
    assert_eq!(line.aggregate().vertex_count(), 10);
    assert!(line.backend().commands.is_empty());

    line.flush();
    assert!(!line.is_upload_pending());
    assert_eq!(line.backend().upload_count(), 1);
    assert_eq!(line.backend().indices(), line.aggregate().indices);

    line.set_widths(&[3.; 10]).unwrap();
    assert!(matches!(
        line.backend().commands.last(),
        Some(Command::Write {
            name: LineAggregate::WIDTH,
            ..
        })
    ));
}

#[test]
fn set_points_rebuilds() {
    let (mut line, _) = build(TestParams::new("rebuild", straight(3))).unwrap();
    let polylines = fatline::normalize(&PointInput::Points(square_loop())).unwrap();
    line.set_points(polylines);
    check_aggregate(line.aggregate()).unwrap();
    assert_eq!(line.aggregate().vertex_count(), 10);
    assert_eq!(line.backend().upload_count(), 2);
    assert_eq!(
        line.backend().buffer_f32(LineAggregate::POSITION).unwrap(),
        line.aggregate().positions
    );
}

#[test]
fn builder_append_keeps_tables_aligned() {
    let mut params = TestParams::new("append", straight(3));
    params.params.widths = Some(vec![2., 2.]);
    params.material.colors = vec![css::RED];
    let (mut line, mut material) = build(params).unwrap();

    let extra = LineParams {
        points: PointInput::Polylines(vec![straight(2), square_loop()]),
        widths: Some(vec![5., 5.]),
        ..Default::default()
    };
    let extra_material = MaterialParams {
        colors: vec![css::BLUE],
        ..Default::default()
    };
    LineBuilder::append(&mut line, &mut material, extra, &extra_material).unwrap();
    check_aggregate(line.aggregate()).unwrap();

    let aggregate = line.aggregate();
    assert_eq!(aggregate.polylines.len(), 3);
    assert_eq!(aggregate.widths.len(), aggregate.vertex_count());
    assert_eq!(aggregate.widths[..6], [2.; 6]);
    assert!(aggregate.widths[6..].iter().all(|&w| w == 5.));
    assert_eq!(
        material.color_table().unwrap().len(),
        aggregate.vertex_count()
    );

    let mut backend = fatline::backend::RecordingBackend::new();
    material.flush(&mut backend);
    assert!(matches!(
        backend.commands.last(),
        Some(Command::UploadColors { width: 20, .. })
    ));
}

#[test]
fn builder_append_keeps_callback_widths() {
    let mut params = TestParams::new("callback_append", straight(2));
    params.params.width_callback = Some(Box::new(|_| [5., 5.]));
    let (mut line, mut material) = build(params).unwrap();
    assert_eq!(line.aggregate().widths, [5.; 4]);

    let extra = LineParams {
        points: PointInput::Points(straight(2)),
        widths: Some(vec![2., 2.]),
        ..Default::default()
    };
    LineBuilder::append(&mut line, &mut material, extra, &MaterialParams::default()).unwrap();
    check_aggregate(line.aggregate()).unwrap();
    assert_eq!(line.aggregate().widths, [5., 5., 5., 5., 2., 2., 2., 2.]);
}
