// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::Point3;

/// Vertex and index buffers of an expanded line object.
///
/// # Invariants
///
/// * Every input point contributes two consecutive vertices, the `side = +1` copy first.
/// * All per-vertex streams hold `vertex_count()` entries times their component count.
/// * Indices of a polyline never reference vertices of another polyline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineAggregate {
    /// Vertex positions, three values per vertex.
    pub positions: Vec<f32>,
    /// Triangle indices, three per triangle.
    pub indices: Vec<u32>,
    /// Texture coordinates, two values per vertex.
    pub uvs: Vec<f32>,
    /// Normalized position along the polyline, one value per vertex.
    pub counters: Vec<f32>,
    /// Position of the preceding point, three values per vertex.
    pub previous: Vec<f32>,
    /// Position of the following point, three values per vertex.
    pub next: Vec<f32>,
    /// `+1` or `-1`, one value per vertex.
    pub side: Vec<f32>,
    /// Width multiplier, one value per vertex (up and down copy of each point).
    pub widths: Vec<f32>,
    /// Optional per-vertex displacement, three values per vertex.
    pub offsets: Option<Vec<f32>>,
    /// Index into the color lookup, one value per vertex.
    pub color_pointers: Vec<f32>,
    /// Ranges of the individual polylines.
    pub polylines: Vec<PolylineRange>,
}

/// Where the data of one polyline lives inside a [`LineAggregate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolylineRange {
    /// Range of vertices.
    pub vertices: Range<u32>,
    /// Range in the index buffer.
    pub indices: Range<usize>,
}

/// A named vertex attribute buffer, as handed to a rendering backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexAttribute<'a> {
    /// Attribute name, as used by the line shaders.
    pub name: &'static str,
    /// Number of `f32` components per vertex.
    pub components: u32,
    /// The attribute data.
    pub data: &'a [f32],
}

impl LineAggregate {
    /// Attribute name of [`positions`](Self::positions).
    pub const POSITION: &'static str = "position";
    /// Attribute name of [`previous`](Self::previous).
    pub const PREVIOUS: &'static str = "previous";
    /// Attribute name of [`next`](Self::next).
    pub const NEXT: &'static str = "next";
    /// Attribute name of [`side`](Self::side).
    pub const SIDE: &'static str = "side";
    /// Attribute name of [`widths`](Self::widths).
    pub const WIDTH: &'static str = "width";
    /// Attribute name of [`counters`](Self::counters).
    pub const COUNTERS: &'static str = "counters";
    /// Attribute name of [`uvs`](Self::uvs).
    pub const UV: &'static str = "uv";
    /// Attribute name of [`offsets`](Self::offsets).
    pub const OFFSET: &'static str = "offset";
    /// Attribute name of [`color_pointers`](Self::color_pointers).
    pub const COLOR_POINTER: &'static str = "colorPointer";

    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the aggregate holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[doc(alias = "clear")]
    /// Drops all vertex data, keeping the offset table if there is one.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.indices.clear();
        self.uvs.clear();
        self.counters.clear();
        self.previous.clear();
        self.next.clear();
        self.side.clear();
        self.widths.clear();
        self.color_pointers.clear();
        self.polylines.clear();
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of input points, which is half the number of vertices.
    pub fn point_count(&self) -> usize {
        self.vertex_count() / 2
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `index`.
    pub fn position(&self, index: usize) -> Point3 {
        Point3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    /// Displacement of vertex `index`, zero without an offset table.
    pub fn offset(&self, index: usize) -> Point3 {
        match &self.offsets {
            Some(offsets) if offsets.len() >= index * 3 + 3 => {
                Point3::from_slice(&offsets[index * 3..index * 3 + 3])
            }
            _ => Point3::ZERO,
        }
    }

    /// The polyline containing vertex `vertex`.
    pub fn polyline_of(&self, vertex: u32) -> Option<usize> {
        self.polylines
            .iter()
            .position(|range| range.vertices.contains(&vertex))
    }

    /// Lists the vertex attribute buffers in the layout expected by the line shaders.
    ///
    /// The offset attribute is only listed if the aggregate has an offset table.
    pub fn attributes(&self) -> Vec<VertexAttribute<'_>> {
        let mut attributes = vec![
            VertexAttribute {
                name: Self::POSITION,
                components: 3,
                data: &self.positions,
            },
            VertexAttribute {
                name: Self::PREVIOUS,
                components: 3,
                data: &self.previous,
            },
            VertexAttribute {
                name: Self::NEXT,
                components: 3,
                data: &self.next,
            },
            VertexAttribute {
                name: Self::SIDE,
                components: 1,
                data: &self.side,
            },
            VertexAttribute {
                name: Self::WIDTH,
                components: 1,
                data: &self.widths,
            },
            VertexAttribute {
                name: Self::COUNTERS,
                components: 1,
                data: &self.counters,
            },
            VertexAttribute {
                name: Self::UV,
                components: 2,
                data: &self.uvs,
            },
            VertexAttribute {
                name: Self::COLOR_POINTER,
                components: 1,
                data: &self.color_pointers,
            },
        ];
        if let Some(offsets) = &self.offsets {
            attributes.push(VertexAttribute {
                name: Self::OFFSET,
                components: 3,
                data: offsets,
            });
        }
        attributes
    }

    /// Appends another aggregate to this one.
    ///
    /// Indices of `other` are rebased onto the vertices already present. If only one side has
    /// an offset table, the other side is padded with zero offsets.
    pub fn append(&mut self, other: &Self) {
        let vertex_base = self.vertex_count() as u32;
        let index_base = self.indices.len();

        match (&mut self.offsets, &other.offsets) {
            (Some(offsets), Some(other_offsets)) => offsets.extend_from_slice(other_offsets),
            (Some(offsets), None) => offsets.resize(offsets.len() + other.positions.len(), 0.),
            (None, Some(other_offsets)) => {
                let mut offsets = vec![0.; self.positions.len()];
                offsets.extend_from_slice(other_offsets);
                self.offsets = Some(offsets);
            }
            (None, None) => {}
        }

        self.positions.extend_from_slice(&other.positions);
        self.indices
            .extend(other.indices.iter().map(|index| index + vertex_base));
        self.uvs.extend_from_slice(&other.uvs);
        self.counters.extend_from_slice(&other.counters);
        self.previous.extend_from_slice(&other.previous);
        self.next.extend_from_slice(&other.next);
        self.side.extend_from_slice(&other.side);
        self.widths.extend_from_slice(&other.widths);
        self.color_pointers.extend(
            other
                .color_pointers
                .iter()
                .map(|pointer| pointer + vertex_base as f32),
        );
        self.polylines
            .extend(other.polylines.iter().map(|range| PolylineRange {
                vertices: range.vertices.start + vertex_base..range.vertices.end + vertex_base,
                indices: range.indices.start + index_base..range.indices.end + index_base,
            }));
    }

    /// A sphere enclosing every vertex, including its offset.
    ///
    /// Returns `None` for an empty aggregate.
    pub fn bounding_sphere(&self) -> Option<(Point3, f32)> {
        if self.is_empty() {
            return None;
        }
        let first = self.position(0) + self.offset(0);
        let (min, max) = (0..self.vertex_count())
            .map(|i| self.position(i) + self.offset(i))
            .fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        let center = min.lerp(max, 0.5);
        Some((center, center.distance(max)))
    }
}

#[cfg(test)]
mod tests {
    use super::{LineAggregate, PolylineRange};
    use crate::{expand, Point3, Polyline, WidthSource};

    fn segment(a: Point3, b: Point3) -> LineAggregate {
        expand(&[Polyline::from_points(&[a, b])], &WidthSource::Default)
    }

    #[test]
    fn append_rebases_indices() {
        let mut first = segment(Point3::ZERO, Point3::new(1., 0., 0.));
        let second = segment(Point3::new(0., 1., 0.), Point3::new(1., 1., 0.));
        first.append(&second);

        assert_eq!(first.vertex_count(), 8);
        assert_eq!(first.indices, [0, 1, 2, 2, 1, 3, 4, 5, 6, 6, 5, 7]);
        assert_eq!(
            first.polylines[1],
            PolylineRange {
                vertices: 4..8,
                indices: 6..12,
            }
        );
        assert_eq!(first.color_pointers[4..], [4., 5., 6., 7.]);
    }

    #[test]
    fn append_pads_missing_offsets() {
        let mut first = segment(Point3::ZERO, Point3::new(1., 0., 0.));
        let mut second = segment(Point3::new(0., 1., 0.), Point3::new(1., 1., 0.));
        second.offsets = Some(vec![1.; 12]);
        first.append(&second);

        let offsets = first.offsets.as_ref().unwrap();
        assert_eq!(offsets.len(), 24);
        assert_eq!(first.offset(0), Point3::ZERO);
        assert_eq!(first.offset(4), Point3::new(1., 1., 1.));
    }

    #[test]
    fn attributes_follow_offsets() {
        let mut aggregate = segment(Point3::ZERO, Point3::new(1., 0., 0.));
        assert!(aggregate
            .attributes()
            .iter()
            .all(|a| a.name != LineAggregate::OFFSET));

        aggregate.offsets = Some(vec![0.; 12]);
        let attributes = aggregate.attributes();
        for attribute in &attributes {
            assert_eq!(
                attribute.data.len(),
                aggregate.vertex_count() * attribute.components as usize,
                "{}",
                attribute.name
            );
        }
        assert_eq!(attributes.last().unwrap().name, LineAggregate::OFFSET);
    }

    #[test]
    fn bounding_sphere_encloses_points() {
        let aggregate = segment(Point3::new(-1., 0., 0.), Point3::new(1., 0., 0.));
        let (center, radius) = aggregate.bounding_sphere().unwrap();
        assert_eq!(center, Point3::ZERO);
        assert_eq!(radius, 1.);
        assert!(LineAggregate::new().bounding_sphere().is_none());
    }
}
