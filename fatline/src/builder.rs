// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use log::debug;

use crate::{
    distribute_colors, distribute_widths, normalize, Backend, Line, LineMaterial, LineOptions,
    LineParams, MaterialParams, Polyline, Result, Rgb8,
};

/// Builds line objects together with their material.
///
/// The builder resamples the width table of [`LineParams`] and the color table of
/// [`MaterialParams`] onto the actual number of points, using their distribution policies.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineBuilder;

impl LineBuilder {
    /// Create a line and its material.
    ///
    /// The material only gets a color lookup texture if `material_params.colors` is not empty.
    pub fn create<B: Backend>(
        mut params: LineParams,
        material_params: MaterialParams,
        options: LineOptions,
        backend: B,
    ) -> Result<(Line<B>, LineMaterial)> {
        let polylines = normalize(&params.points)?;
        let point_count = point_count(&polylines);

        params.widths = params
            .widths
            .take()
            .map(|widths| distribute_widths(point_count, &widths, params.width_distribution));
        let colors = (!material_params.colors.is_empty()).then(|| {
            distribute_colors(
                point_count,
                &material_params.colors,
                material_params.color_distribution,
            )
        });

        let line = Line::from_polylines(polylines, params, options, backend);
        let mut material = LineMaterial::new(material_params);
        if let Some(colors) = colors {
            material.set_color_table(colors);
        }
        Ok((line, material))
    }

    /// Append polylines to an existing line and its material.
    ///
    /// The widths of `params` are distributed over the new points only and appended to the
    /// width table of `line`. Likewise the colors of `material_params` are distributed over the
    /// new points and appended to the color table of `material`. Tables missing on either side
    /// are padded with unit widths, black texels and zero offsets so that every table stays
    /// aligned with the points. The line is then re-expanded.
    pub fn append<B: Backend>(
        line: &mut Line<B>,
        material: &mut LineMaterial,
        params: LineParams,
        material_params: &MaterialParams,
    ) -> Result<()> {
        let added = normalize(&params.points)?;
        let existing_points = line.point_count();
        let added_points = point_count(&added);
        debug!("Appending {added_points} points to a line of {existing_points} points");

        let widths = params
            .widths
            .map(|widths| distribute_widths(added_points, &widths, params.width_distribution));
        // Without a table the existing points keep the widths they were expanded with,
        // callback-derived ones included.
        let existing = line.widths().or_else(|| {
            widths
                .is_some()
                .then_some(line.aggregate().widths.as_slice())
        });
        if let Some(table) = concat_tables(existing, widths, existing_points * 2, 1.) {
            line.set_width_table(Some(table));
        }

        if let Some(table) = concat_tables(line.offsets(), params.offsets, existing_points * 6, 0.)
        {
            line.set_offset_table(Some(table));
        }
        if let Some(callback) = params.width_callback {
            line.set_width_callback(Some(callback));
        }

        if !material_params.colors.is_empty() {
            let colors = distribute_colors(
                added_points,
                &material_params.colors,
                material_params.color_distribution,
            );
            let table = concat_tables(
                material.color_table(),
                Some(colors),
                existing_points * 2,
                Rgb8::BLACK,
            );
            if let Some(table) = table {
                material.set_color_table(table);
            }
        }

        let mut polylines = line.polylines().to_vec();
        polylines.extend(added);
        line.set_points(polylines);
        Ok(())
    }
}

fn point_count(polylines: &[Polyline]) -> usize {
    polylines.iter().map(Polyline::len).sum()
}

/// Join an existing table, sized to `existing_len`, with an added one.
///
/// Returns `None` when neither table exists.
fn concat_tables<T: Copy>(
    existing: Option<&[T]>,
    added: Option<Vec<T>>,
    existing_len: usize,
    fill: T,
) -> Option<Vec<T>> {
    if existing.is_none() && added.is_none() {
        return None;
    }
    let mut table = existing.map(<[T]>::to_vec).unwrap_or_default();
    table.resize(existing_len, fill);
    table.extend(added.unwrap_or_default());
    Some(table)
}
