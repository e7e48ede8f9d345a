// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalization of the accepted point collection shapes.

use log::warn;

use crate::{Error, Point3, Result};

/// The point collection shapes accepted as line input.
///
/// A "line object" may hold several disjoint polylines. They are expanded independently and
/// their geometry is concatenated into one set of buffers.
#[derive(Clone, Debug, PartialEq)]
pub enum PointInput {
    /// A single polyline given as points.
    Points(Vec<Point3>),
    /// Several polylines given as points.
    Polylines(Vec<Vec<Point3>>),
    /// A single polyline given as a flat `x, y, z, x, y, z, ...` buffer.
    Flat(Vec<f32>),
    /// Several polylines, each given as a flat `x, y, z, ...` buffer.
    FlatPolylines(Vec<Vec<f32>>),
}

impl Default for PointInput {
    fn default() -> Self {
        Self::Points(Vec::new())
    }
}

impl From<Vec<Point3>> for PointInput {
    fn from(value: Vec<Point3>) -> Self {
        Self::Points(value)
    }
}

impl From<Vec<Vec<Point3>>> for PointInput {
    fn from(value: Vec<Vec<Point3>>) -> Self {
        Self::Polylines(value)
    }
}

impl From<Vec<f32>> for PointInput {
    fn from(value: Vec<f32>) -> Self {
        Self::Flat(value)
    }
}

impl From<Vec<Vec<f32>>> for PointInput {
    fn from(value: Vec<Vec<f32>>) -> Self {
        Self::FlatPolylines(value)
    }
}

impl PointInput {
    /// Total number of points across all polylines.
    ///
    /// Trailing values of a flat buffer which don't form a whole point are not counted.
    pub fn point_count(&self) -> usize {
        match self {
            Self::Points(points) => points.len(),
            Self::Polylines(lines) => lines.iter().map(Vec::len).sum(),
            Self::Flat(coords) => coords.len() / 3,
            Self::FlatPolylines(lines) => lines.iter().map(|l| l.len() / 3).sum(),
        }
    }
}

/// A polyline stored as a flat `x, y, z` coordinate sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    coords: Vec<f32>,
}

impl Polyline {
    /// Create a polyline from a flat coordinate buffer.
    ///
    /// Returns [`Error::InvalidInputShape`] if the length is not a multiple of three.
    pub fn from_flat(coords: Vec<f32>) -> Result<Self> {
        if coords.len() % 3 != 0 {
            return Err(Error::InvalidInputShape {
                polyline: 0,
                len: coords.len(),
            });
        }
        Ok(Self { coords })
    }

    /// Create a polyline from points.
    pub fn from_points(points: &[Point3]) -> Self {
        Self {
            coords: bytemuck::cast_slice::<Point3, f32>(points).to_vec(),
        }
    }

    /// The flat coordinate buffer, three values per point.
    pub fn coords(&self) -> &[f32] {
        &self.coords
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.coords.len() / 3
    }

    /// Returns `true` if the polyline has no points.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The point at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn point(&self, index: usize) -> Point3 {
        Point3::from_slice(&self.coords[index * 3..index * 3 + 3])
    }

    /// Iterate over the points.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point3> + '_ {
        self.coords.chunks_exact(3).map(Point3::from_slice)
    }

    /// Whether the first and last points coincide exactly.
    ///
    /// No tolerance is applied: a loop has to be closed with the very same coordinates.
    pub fn is_closed(&self) -> bool {
        let len = self.len();
        len > 1 && self.point(0) == self.point(len - 1)
    }

    fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }
}

/// Convert any accepted point collection into a list of flat polylines.
///
/// Empty input gives an empty list. Empty polylines are skipped, as are polylines with
/// non-finite coordinates (with a warning). A flat buffer whose length is not a multiple of
/// three is rejected with [`Error::InvalidInputShape`].
pub fn normalize(input: &PointInput) -> Result<Vec<Polyline>> {
    let polylines = match input {
        PointInput::Points(points) => vec![Polyline::from_points(points)],
        PointInput::Polylines(lines) => lines.iter().map(|l| Polyline::from_points(l)).collect(),
        PointInput::Flat(coords) => vec![flat_polyline(0, coords)?],
        PointInput::FlatPolylines(lines) => lines
            .iter()
            .enumerate()
            .map(|(i, coords)| flat_polyline(i, coords))
            .collect::<Result<_>>()?,
    };
    Ok(polylines
        .into_iter()
        .filter(|polyline| !polyline.is_empty())
        .filter(|polyline| {
            let finite = polyline.is_finite();
            if !finite {
                warn!("A polyline contains NaN or infinite coordinates, ignoring it.");
            }
            finite
        })
        .collect())
}

fn flat_polyline(index: usize, coords: &[f32]) -> Result<Polyline> {
    if coords.len() % 3 != 0 {
        return Err(Error::InvalidInputShape {
            polyline: index,
            len: coords.len(),
        });
    }
    Ok(Polyline {
        coords: coords.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::{normalize, PointInput, Polyline};
    use crate::{Error, Point3};

    fn three_points() -> Vec<Point3> {
        vec![
            Point3::new(0., 0., 0.),
            Point3::new(1., 2., 3.),
            Point3::new(4., 5., 6.),
        ]
    }

    #[test]
    fn all_shapes_agree() {
        let flat = vec![0., 0., 0., 1., 2., 3., 4., 5., 6.];
        let expected = vec![Polyline::from_flat(flat.clone()).unwrap()];

        assert_eq!(
            normalize(&PointInput::Points(three_points())).unwrap(),
            expected
        );
        assert_eq!(
            normalize(&PointInput::Polylines(vec![three_points()])).unwrap(),
            expected
        );
        assert_eq!(normalize(&PointInput::Flat(flat.clone())).unwrap(), expected);
        assert_eq!(
            normalize(&PointInput::FlatPolylines(vec![flat])).unwrap(),
            expected
        );
    }

    #[test]
    fn multiple_polylines_keep_order() {
        let input = PointInput::Polylines(vec![
            three_points(),
            vec![Point3::new(9., 9., 9.), Point3::new(8., 8., 8.)],
        ]);
        let polylines = normalize(&input).unwrap();
        assert_eq!(polylines.len(), 2);
        assert_eq!(polylines[0].len(), 3);
        assert_eq!(polylines[1].point(1), Point3::new(8., 8., 8.));
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(normalize(&PointInput::default()).unwrap().is_empty());
        assert!(normalize(&PointInput::FlatPolylines(vec![]))
            .unwrap()
            .is_empty());
        assert!(normalize(&PointInput::Polylines(vec![vec![]]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn ragged_flat_buffer_is_rejected() {
        let input = PointInput::FlatPolylines(vec![vec![0.; 6], vec![0.; 7]]);
        assert_eq!(
            normalize(&input),
            Err(Error::InvalidInputShape {
                polyline: 1,
                len: 7
            })
        );
    }

    #[test]
    fn nan_polyline_is_skipped() {
        let input = PointInput::FlatPolylines(vec![vec![f32::NAN, 0., 0.], vec![1., 1., 1.]]);
        let polylines = normalize(&input).unwrap();
        assert_eq!(polylines.len(), 1);
        assert_eq!(polylines[0].point(0), Point3::new(1., 1., 1.));
    }

    #[test]
    fn closed_detection_is_exact() {
        let mut points = three_points();
        points.push(points[0]);
        assert!(Polyline::from_points(&points).is_closed());

        points[3].x += 1e-6;
        assert!(!Polyline::from_points(&points).is_closed());
    }
}
