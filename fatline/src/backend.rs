// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between line objects and the rendering engine that draws them.
//!
//! Fatline never touches a GPU. A [`Line`](crate::Line) hands its buffers to a [`Backend`],
//! which is expected to turn them into vertex buffers, uniform blocks and textures of the host
//! engine. [`RecordingBackend`] is a CPU implementation that keeps a log of what it was asked
//! to do, which is enough for tests and headless tools.

use std::collections::BTreeMap;

use crate::{ColorTexture, LineAggregate, MaterialUniforms};

/// Receives the buffers of a line object.
pub trait Backend {
    /// Create (or re-create) every vertex buffer and the index buffer of `aggregate`.
    ///
    /// `updatable` tells whether the width and offset buffers will later be written in place.
    fn upload(&mut self, aggregate: &LineAggregate, updatable: bool);

    /// Overwrite the contents of an existing, updatable vertex buffer.
    ///
    /// The number of values always equals the size the buffer was created with.
    fn write(&mut self, name: &'static str, data: &[f32]);

    /// Write the material uniform block.
    fn write_uniforms(&mut self, uniforms: &MaterialUniforms);

    /// Create (or re-create) the color lookup texture.
    fn upload_colors(&mut self, texture: &ColorTexture);
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn upload(&mut self, aggregate: &LineAggregate, updatable: bool) {
        (**self).upload(aggregate, updatable);
    }

    fn write(&mut self, name: &'static str, data: &[f32]) {
        (**self).write(name, data);
    }

    fn write_uniforms(&mut self, uniforms: &MaterialUniforms) {
        (**self).write_uniforms(uniforms);
    }

    fn upload_colors(&mut self, texture: &ColorTexture) {
        (**self).upload_colors(texture);
    }
}

/// A command received by a [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// A vertex buffer was created.
    Upload {
        /// Attribute name.
        name: &'static str,
        /// Components per vertex.
        components: u32,
        /// Whether the buffer accepts in-place writes.
        updatable: bool,
        /// Buffer contents.
        data: Vec<u8>,
    },
    /// The index buffer was created.
    UploadIndices(Vec<u8>),
    /// A vertex buffer was overwritten in place.
    Write {
        /// Attribute name.
        name: &'static str,
        /// New buffer contents.
        data: Vec<u8>,
    },
    /// The material uniforms were written.
    WriteUniforms(Vec<u8>),
    /// The color lookup texture was created.
    UploadColors {
        /// Width of the texture in texels.
        width: u32,
        /// RGB8 texel data.
        data: Vec<u8>,
    },
}

/// A backend that records every command and mirrors the resulting buffer contents.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    /// Commands in the order they were received.
    pub commands: Vec<Command>,
    buffers: BTreeMap<&'static str, Vec<u8>>,
    updatable: BTreeMap<&'static str, bool>,
    indices: Vec<u8>,
}

impl RecordingBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of the vertex buffer `name`, as raw bytes.
    pub fn buffer(&self, name: &str) -> Option<&[u8]> {
        self.buffers.get(name).map(Vec::as_slice)
    }

    /// Current contents of the vertex buffer `name`, as `f32` values.
    pub fn buffer_f32(&self, name: &str) -> Option<Vec<f32>> {
        self.buffer(name)
            .map(|bytes| bytemuck::pod_collect_to_vec::<u8, f32>(bytes))
    }

    /// Current contents of the index buffer.
    pub fn indices(&self) -> Vec<u32> {
        bytemuck::pod_collect_to_vec(&self.indices)
    }

    /// Number of full uploads received.
    pub fn upload_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, Command::UploadIndices(_)))
            .count()
    }

    /// Forget the command log, keeping the mirrored buffers.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Backend for RecordingBackend {
    fn upload(&mut self, aggregate: &LineAggregate, updatable: bool) {
        self.buffers.clear();
        self.updatable.clear();
        for attribute in aggregate.attributes() {
            let updatable = updatable
                && matches!(
                    attribute.name,
                    LineAggregate::WIDTH | LineAggregate::OFFSET
                );
            let data = bytemuck::cast_slice::<f32, u8>(attribute.data).to_vec();
            self.buffers.insert(attribute.name, data.clone());
            self.updatable.insert(attribute.name, updatable);
            self.commands.push(Command::Upload {
                name: attribute.name,
                components: attribute.components,
                updatable,
                data,
            });
        }
        self.indices = bytemuck::cast_slice::<u32, u8>(&aggregate.indices).to_vec();
        self.commands
            .push(Command::UploadIndices(self.indices.clone()));
    }

    fn write(&mut self, name: &'static str, data: &[f32]) {
        let bytes = bytemuck::cast_slice::<f32, u8>(data).to_vec();
        debug_assert!(
            self.updatable.get(name).copied().unwrap_or(false),
            "buffer '{name}' is not updatable"
        );
        self.buffers.insert(name, bytes.clone());
        self.commands.push(Command::Write { name, data: bytes });
    }

    fn write_uniforms(&mut self, uniforms: &MaterialUniforms) {
        self.commands
            .push(Command::WriteUniforms(bytemuck::bytes_of(uniforms).to_vec()));
    }

    fn upload_colors(&mut self, texture: &ColorTexture) {
        self.commands.push(Command::UploadColors {
            width: texture.width(),
            data: texture.data().to_vec(),
        });
    }
}
