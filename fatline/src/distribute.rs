// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resampling of short width and color tables onto the points of a line.

use bytemuck::{Pod, Zeroable};
use log::debug;
use peniko::Color;

/// How a table shorter than the number of points is stretched to cover all of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Cycle through the table, wrapping back to the first entry when exhausted.
    Repeat,
    /// Sample the table at evenly spaced positions, rounding down (no interpolation).
    Even,
    /// Copy the table to the start and repeat its last entry to the end.
    Start,
    /// Repeat the first entry up to the point where the table is copied to the end.
    End,
    /// Copy the first half of the table to the start and the second half to the end.
    ///
    /// The gap in between repeats the last entry of the first half. A table with a single
    /// entry has an empty first half, in which case that entry fills the gap.
    StartEnd,
    /// Emit every entry twice, regardless of the number of points.
    None,
}

/// A color with 8 bits per channel, as stored in the color lookup texture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque black, also used as the leading sentinel of a distributed color table.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a new color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for Rgb8 {
    /// Scales each unit-range channel by 255 and truncates. Alpha is dropped.
    fn from(color: Color) -> Self {
        let [r, g, b, _] = color.components;
        Self::new((r * 255.) as u8, (g * 255.) as u8, (b * 255.) as u8)
    }
}

/// Stretch a width table over `point_count` points.
///
/// `widths` holds an up and a down value per point. When it covers fewer than `point_count`
/// points, the result has exactly two values per point (except for [`Distribution::None`],
/// which ignores the point count). An odd trailing value is used for both up and down.
///
/// An empty table is returned as is. A table which already covers every point is returned
/// unchanged, except that an odd trailing value is completed into a pair.
pub fn distribute_widths(point_count: usize, widths: &[f32], policy: Distribution) -> Vec<f32> {
    let pairs: Vec<[f32; 2]> = widths
        .chunks(2)
        .map(|pair| [pair[0], *pair.get(1).unwrap_or(&pair[0])])
        .collect();
    if pairs.is_empty() {
        return Vec::new();
    }
    if point_count <= pairs.len() {
        return pairs.into_iter().flatten().collect();
    }

    let distributed: Vec<f32> = match policy {
        Distribution::None => widths.iter().flat_map(|&w| [w, w]).collect(),
        Distribution::Even => {
            // The last point always takes the last entry of the table.
            let mut sampled = sample_evenly(&pairs, point_count - 1);
            sampled.push(pairs[pairs.len() - 1]);
            sampled.into_iter().flatten().collect()
        }
        _ => fill(&pairs, point_count, policy)
            .into_iter()
            .flatten()
            .collect(),
    };
    debug!(
        "Distributed {} widths over {point_count} points ({policy:?}) into {} values",
        widths.len(),
        distributed.len()
    );
    distributed
}

/// Stretch a color table over the segments between `point_count` points.
///
/// Colors are assigned per segment, so a line of `n` points needs `n - 1` colors. The output
/// starts with two black sentinel entries and then holds every segment color twice, matching
/// the doubled vertex layout.
///
/// An empty table, or one which already covers every segment, is copied (up to the number of
/// segments) without applying `policy`.
pub fn distribute_colors(point_count: usize, colors: &[Color], policy: Distribution) -> Vec<Rgb8> {
    let segments = point_count.saturating_sub(1);
    let table: Vec<Rgb8> = colors.iter().copied().map(Rgb8::from).collect();

    let logical: Vec<Rgb8> = if table.is_empty() || segments <= table.len() {
        table.into_iter().take(segments).collect()
    } else {
        match policy {
            Distribution::None => table,
            Distribution::Even => sample_evenly(&table, segments),
            _ => fill(&table, segments, policy),
        }
    };

    let mut distributed = Vec::with_capacity(2 + logical.len() * 2);
    distributed.extend_from_slice(&[Rgb8::BLACK, Rgb8::BLACK]);
    distributed.extend(logical.iter().flat_map(|&color| [color, color]));
    debug!(
        "Distributed {} colors over {point_count} points ({policy:?}) into {} entries",
        colors.len(),
        distributed.len()
    );
    distributed
}

/// Stretch a non-empty `table` to `len` entries using one of the padding policies.
fn fill<T: Copy>(table: &[T], len: usize, policy: Distribution) -> Vec<T> {
    let missing = len.saturating_sub(table.len());
    let mut out = Vec::with_capacity(len);
    match policy {
        Distribution::Start => {
            out.extend_from_slice(table);
            out.extend(core::iter::repeat(table[table.len() - 1]).take(missing));
        }
        Distribution::End => {
            out.extend(core::iter::repeat(table[0]).take(missing));
            out.extend_from_slice(table);
        }
        Distribution::StartEnd => {
            let half = table.len() / 2;
            out.extend_from_slice(&table[..half]);
            out.extend(core::iter::repeat(table[half.max(1) - 1]).take(missing));
            out.extend_from_slice(&table[half..]);
        }
        Distribution::Repeat => {
            out.extend(table.iter().copied().cycle().take(len));
        }
        Distribution::Even => out = sample_evenly(table, len),
        Distribution::None => out.extend_from_slice(table),
    }
    out
}

/// Sample `samples` entries of a non-empty `table` with a step of `table.len() / samples`.
fn sample_evenly<T: Copy>(table: &[T], samples: usize) -> Vec<T> {
    let step = table.len() as f32 / samples as f32;
    (0..samples)
        .map(|k| {
            let index = (k as f32 * step).floor() as usize;
            table[index.min(table.len() - 1)]
        })
        .collect()
}
