// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use log::{debug, trace};

use crate::{
    expand, normalize, raycast, Backend, Distribution, Error, Hit, LineAggregate, PointInput,
    Polyline, RaycastParams, Ray, Result, WidthSource,
};

/// A callback from global point index to `[up, down]` widths.
pub type WidthCallback = Box<dyn Fn(usize) -> [f32; 2]>;

/// How a [`Line`] treats its backend buffers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineOptions {
    /// Create the width and offset buffers so that they can be overwritten in place with
    /// [`Line::set_widths`] and [`Line::set_offsets`].
    pub updatable: bool,
    /// Defer buffer uploads until [`Line::flush`] is called.
    ///
    /// The CPU side buffers are always rebuilt immediately.
    pub lazy: bool,
}

/// The geometry of a line object.
pub struct LineParams {
    /// The polylines.
    pub points: PointInput,
    /// Widths, two per point. Takes precedence over [`width_callback`](Self::width_callback).
    pub widths: Option<Vec<f32>>,
    /// How [`widths`](Self::widths) is stretched when shorter than the number of points.
    ///
    /// Only used by [`LineBuilder`](crate::LineBuilder); [`Line`] takes the table as is.
    pub width_distribution: Distribution,
    /// Per-vertex displacement, three values per vertex.
    pub offsets: Option<Vec<f32>>,
    /// Computes the widths of a point when there is no width table.
    pub width_callback: Option<WidthCallback>,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            points: PointInput::default(),
            widths: None,
            width_distribution: Distribution::Start,
            offsets: None,
            width_callback: None,
        }
    }
}

impl fmt::Debug for LineParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineParams")
            .field("points", &self.points)
            .field("widths", &self.widths)
            .field("width_distribution", &self.width_distribution)
            .field("offsets", &self.offsets)
            .field("width_callback", &self.width_callback.as_ref().map(|_| ".."))
            .finish()
    }
}

/// A line object: a set of polylines, their expanded buffers and the backend drawing them.
///
/// The aggregate is rebuilt from scratch whenever the points change. Widths and offsets can
/// additionally be overwritten in place as long as the number of vertices stays the same.
pub struct Line<B: Backend> {
    backend: B,
    options: LineOptions,
    polylines: Vec<Polyline>,
    widths: Option<Vec<f32>>,
    offsets: Option<Vec<f32>>,
    width_callback: Option<WidthCallback>,
    aggregate: LineAggregate,
    upload_pending: bool,
}

impl<B: Backend> Line<B> {
    /// Create a line and expand its points.
    pub fn new(params: LineParams, options: LineOptions, backend: B) -> Result<Self> {
        let polylines = normalize(&params.points)?;
        Ok(Self::from_polylines(polylines, params, options, backend))
    }

    /// Create a line from already normalized polylines. `params.points` is ignored.
    pub fn from_polylines(
        polylines: Vec<Polyline>,
        params: LineParams,
        options: LineOptions,
        backend: B,
    ) -> Self {
        let mut line = Self {
            backend,
            options,
            polylines: Vec::new(),
            widths: params.widths,
            offsets: params.offsets,
            width_callback: params.width_callback,
            aggregate: LineAggregate::new(),
            upload_pending: false,
        };
        line.set_points(polylines);
        line
    }

    /// The expanded buffers.
    pub fn aggregate(&self) -> &LineAggregate {
        &self.aggregate
    }

    /// The polylines, as flat coordinate buffers.
    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    /// Total number of points.
    pub fn point_count(&self) -> usize {
        self.polylines.iter().map(Polyline::len).sum()
    }

    /// The options this line was created with.
    pub fn options(&self) -> LineOptions {
        self.options
    }

    /// The width table used for expansion, two values per point.
    pub fn widths(&self) -> Option<&[f32]> {
        self.widths.as_deref()
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consume the line, returning its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Whether buffers are waiting for [`flush`](Self::flush).
    pub fn is_upload_pending(&self) -> bool {
        self.upload_pending
    }

    /// Append polylines and re-expand.
    pub fn add_points(&mut self, points: &PointInput) -> Result<()> {
        let mut polylines = core::mem::take(&mut self.polylines);
        polylines.extend(normalize(points)?);
        self.set_points(polylines);
        Ok(())
    }

    /// Replace all polylines and re-expand.
    pub fn set_points(&mut self, polylines: Vec<Polyline>) {
        self.polylines = polylines;

        let widths = match (&self.widths, &self.width_callback) {
            (Some(table), _) => WidthSource::Table(table),
            (None, Some(callback)) => WidthSource::Callback(callback.as_ref()),
            (None, None) => WidthSource::Default,
        };
        self.aggregate = expand(&self.polylines, &widths);

        if let Some(offsets) = &mut self.offsets {
            let len = self.aggregate.positions.len();
            if offsets.len() != len {
                debug!(
                    "Resizing offset table from {} to {len} values to match the new points",
                    offsets.len()
                );
                offsets.resize(len, 0.);
            }
        }
        self.aggregate.offsets = self.offsets.clone();
        self.upload();
    }

    /// Replace the width table used by later expansions, without touching the buffers.
    pub fn set_width_table(&mut self, widths: Option<Vec<f32>>) {
        self.widths = widths;
    }

    /// The offset table, three values per vertex.
    pub fn offsets(&self) -> Option<&[f32]> {
        self.offsets.as_deref()
    }

    /// Replace the offset table used by later expansions, without touching the buffers.
    pub fn set_offset_table(&mut self, offsets: Option<Vec<f32>>) {
        self.offsets = offsets;
    }

    /// Replace the width callback used by later expansions, without touching the buffers.
    ///
    /// A width table, if present, still takes precedence.
    pub fn set_width_callback(&mut self, callback: Option<WidthCallback>) {
        self.width_callback = callback;
    }

    /// Overwrite the widths in place, one value per vertex.
    ///
    /// The line must be [updatable](LineOptions::updatable) and `widths` must hold exactly one
    /// value per vertex. The values also become the width table of later expansions.
    pub fn set_widths(&mut self, widths: &[f32]) -> Result<()> {
        if !self.options.updatable {
            return Err(Error::NotUpdatable(LineAggregate::WIDTH));
        }
        check_len(
            LineAggregate::WIDTH,
            self.aggregate.vertex_count(),
            widths.len(),
        )?;
        self.widths = Some(widths.to_vec());
        self.aggregate.widths.copy_from_slice(widths);
        self.write(LineAggregate::WIDTH, widths);
        Ok(())
    }

    /// Overwrite the offsets in place, three values per vertex.
    ///
    /// The line must be [updatable](LineOptions::updatable) and have been created with an
    /// offset table.
    pub fn set_offsets(&mut self, offsets: &[f32]) -> Result<()> {
        if !self.options.updatable {
            return Err(Error::NotUpdatable(LineAggregate::OFFSET));
        }
        let Some(current) = &mut self.offsets else {
            return Err(Error::MissingBuffer(LineAggregate::OFFSET));
        };
        check_len(LineAggregate::OFFSET, current.len(), offsets.len())?;
        current.copy_from_slice(offsets);
        self.aggregate.offsets = Some(offsets.to_vec());
        self.write(LineAggregate::OFFSET, offsets);
        Ok(())
    }

    /// Upload buffers deferred by a lazy line.
    pub fn flush(&mut self) {
        if self.upload_pending {
            self.backend.upload(&self.aggregate, self.options.updatable);
            self.upload_pending = false;
        }
    }

    /// Hit-test the line. See [`raycast`](crate::raycast).
    pub fn raycast(&self, ray: &Ray, params: &RaycastParams) -> Vec<Hit<'_>> {
        raycast(&self.aggregate, ray, params)
    }

    fn upload(&mut self) {
        if self.options.lazy {
            trace!("Deferring upload of {} vertices", self.aggregate.vertex_count());
            self.upload_pending = true;
        } else {
            self.backend.upload(&self.aggregate, self.options.updatable);
            self.upload_pending = false;
        }
    }

    fn write(&mut self, name: &'static str, data: &[f32]) {
        // A pending upload will carry the new values.
        if !self.upload_pending {
            self.backend.write(name, data);
        }
    }
}

impl<B: Backend + fmt::Debug> fmt::Debug for Line<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("backend", &self.backend)
            .field("options", &self.options)
            .field("polylines", &self.polylines.len())
            .field("vertices", &self.aggregate.vertex_count())
            .field("upload_pending", &self.upload_pending)
            .finish_non_exhaustive()
    }
}

fn check_len(buffer: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            buffer,
            expected,
            actual,
        })
    }
}
