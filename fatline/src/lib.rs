// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fatline turns 3D polylines into "fat line" ribbon meshes.
//!
//! Every input point is doubled into two vertices which share a position but sit on opposite
//! sides of the line. Each vertex also carries the position of its neighbors along the polyline
//! (`previous` and `next`), so that a vertex shader can compute a screen-space perpendicular
//! and push the vertex out by half the line width. The result is a line whose thickness is
//! independent of the camera, with per-point widths and per-segment colors.
//!
//! # Usage
//!
//! Most users want [`LineBuilder`], which normalizes the input points, resamples width and color
//! tables onto them and hands the resulting buffers to a [`Backend`]:
//!
//! ```
//! use fatline::{LineBuilder, LineOptions, LineParams, MaterialParams, Point3, PointInput};
//! use fatline::backend::RecordingBackend;
//!
//! let params = LineParams {
//!     points: PointInput::Points(vec![
//!         Point3::new(0., 0., 0.),
//!         Point3::new(1., 0., 0.),
//!         Point3::new(2., 1., 0.),
//!     ]),
//!     ..Default::default()
//! };
//! let (line, _material) = LineBuilder::create(
//!     params,
//!     MaterialParams::default(),
//!     LineOptions::default(),
//!     RecordingBackend::new(),
//! )?;
//! assert_eq!(line.aggregate().vertex_count(), 6);
//! # Ok::<(), fatline::Error>(())
//! ```
//!
//! The lower level pieces are usable on their own:
//!
//! - [`normalize`] converts any accepted [`PointInput`] shape into a list of [`Polyline`]s.
//! - [`expand`] builds a [`LineAggregate`] from polylines.
//! - [`distribute_widths`] and [`distribute_colors`] resample short attribute tables using a
//!   [`Distribution`] policy.
//! - [`raycast`] hit-tests a ray against the segments of an aggregate.
//!
//! Nothing here talks to a GPU. Uploading buffers, binding shaders and issuing draws is the
//! job of the host engine, reached through the [`Backend`] trait.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(
    clippy::cast_possible_truncation,
    reason = "Buffers are f32 and u32 to match GPU vertex formats"
)]

mod aggregate;
pub mod backend;
mod builder;
mod distribute;
mod expand;
mod line;
mod material;
pub mod math;
mod points;
mod raycast;
pub mod shapes;

pub use glam;
pub use peniko;

pub use aggregate::{LineAggregate, PolylineRange, VertexAttribute};
pub use backend::Backend;
pub use builder::LineBuilder;
pub use distribute::{distribute_colors, distribute_widths, Distribution, Rgb8};
pub use expand::{expand, WidthSource};
pub use line::{Line, LineOptions, LineParams, WidthCallback};
pub use material::{ColorSampling, ColorTexture, LineMaterial, MaterialParams, MaterialUniforms};
pub use math::{Point3, Ray};
pub use points::{normalize, PointInput, Polyline};
pub use raycast::{raycast, Hit, RaycastParams};

use thiserror::Error;

/// Errors that can occur in Fatline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A flat numeric point buffer did not hold whole `x, y, z` triples.
    #[error("Point buffer {polyline} has {len} values, which is not a multiple of 3")]
    InvalidInputShape {
        /// Index of the offending buffer in the input.
        polyline: usize,
        /// Number of values in the buffer.
        len: usize,
    },
    /// An in-place update was given an array which doesn't match the current topology.
    ///
    /// Changing the number of vertices requires a full rebuild through
    /// [`Line::set_points`].
    #[error("Buffer '{buffer}' holds {expected} values but {actual} were supplied")]
    LengthMismatch {
        /// Name of the vertex attribute being updated.
        buffer: &'static str,
        /// Number of values required by the current vertex count.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// An in-place update was requested on a line which was not created as updatable.
    #[error("Buffer '{0}' was not created as updatable")]
    NotUpdatable(&'static str),
    /// An in-place update targeted a buffer the line doesn't have.
    #[error("Line has no '{0}' buffer")]
    MissingBuffer(&'static str),
}

/// A specialized `Result` type for Fatline operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
