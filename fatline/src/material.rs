// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bytemuck::{Pod, Zeroable};
use peniko::color::palette;
use peniko::Color;

use crate::{Backend, Distribution, Rgb8};

/// How the color lookup texture is sampled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorSampling {
    /// Nearest texel, giving hard color changes between segments.
    #[default]
    Exact,
    /// Linear filtering, blending neighboring segment colors.
    Smooth,
}

/// Appearance of a line.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialParams {
    /// Base width of the line, multiplied by the per-vertex widths.
    pub line_width: f32,
    /// Base color.
    pub color: Color,
    /// Overall opacity.
    pub opacity: f32,
    /// Size of the render target in pixels.
    pub resolution: [f32; 2],
    /// Whether the line gets thinner with distance, instead of having a constant pixel width.
    pub size_attenuation: bool,
    /// Length of one dash period, in counter units.
    pub dash_array: f32,
    /// Shift of the dash pattern along the line.
    pub dash_offset: f32,
    /// Fraction of each dash period which is hidden.
    pub dash_ratio: f32,
    /// Whether dashing is enabled.
    pub use_dash: bool,
    /// Counter value beyond which the line is cut off.
    pub visibility: f32,
    /// Fragments with an alpha below this are discarded.
    pub alpha_test: f32,
    /// Texture repeat.
    pub repeat: [f32; 2],
    /// Texture offset.
    pub uv_offset: [f32; 2],
    /// Whether the color lookup texture is applied.
    pub use_colors: bool,
    /// Whether the host engine's color map texture is sampled.
    pub use_map: bool,
    /// Whether the host engine's alpha map texture is sampled.
    pub use_alpha_map: bool,
    /// Segment colors, stretched over the line by [`color_distribution`](Self::color_distribution).
    pub colors: Vec<Color>,
    /// How [`colors`](Self::colors) is stretched when shorter than the number of segments.
    pub color_distribution: Distribution,
    /// How the color lookup texture is sampled.
    pub color_sampling: ColorSampling,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            line_width: 1.,
            color: palette::css::WHITE,
            opacity: 1.,
            resolution: [1., 1.],
            size_attenuation: false,
            dash_array: 0.,
            dash_offset: 0.,
            dash_ratio: 0.5,
            use_dash: false,
            visibility: 1.,
            alpha_test: 0.,
            repeat: [1., 1.],
            uv_offset: [0., 0.],
            use_colors: false,
            use_map: false,
            use_alpha_map: false,
            colors: Vec::new(),
            color_distribution: Distribution::StartEnd,
            color_sampling: ColorSampling::Exact,
        }
    }
}

/// Uniform block of the line shaders.
///
/// This data structure must be kept in sync with the uniform declarations of the host
/// engine's line shaders. Booleans are encoded as `0.0` or `1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct MaterialUniforms {
    /// Base color, with the opacity in the alpha channel.
    pub color: [f32; 4],
    /// Render target size in pixels.
    pub resolution: [f32; 2],
    /// Texture repeat.
    pub repeat: [f32; 2],
    /// Texture offset.
    pub uv_offset: [f32; 2],
    /// Base line width.
    pub line_width: f32,
    /// Size attenuation flag.
    pub size_attenuation: f32,
    /// Dash period.
    pub dash_array: f32,
    /// Dash offset.
    pub dash_offset: f32,
    /// Dash ratio.
    pub dash_ratio: f32,
    /// Dash flag.
    pub use_dash: f32,
    /// Visibility cutoff.
    pub visibility: f32,
    /// Alpha test threshold.
    pub alpha_test: f32,
    /// Color texture flag.
    pub use_colors: f32,
    /// Number of texels in the color texture.
    pub color_count: f32,
    /// Color map flag.
    pub use_map: f32,
    /// Alpha map flag.
    pub use_alpha_map: f32,
    /// Pads the block to a multiple of 16 bytes.
    pub _padding: [f32; 2],
}

/// The color lookup texture: one RGB8 row with a texel per vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTexture {
    texels: Vec<Rgb8>,
    sampling: ColorSampling,
}

impl ColorTexture {
    /// Create a texture from a distributed color table.
    pub fn new(texels: Vec<Rgb8>, sampling: ColorSampling) -> Self {
        Self { texels, sampling }
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.texels.len() as u32
    }

    /// The texels.
    pub fn texels(&self) -> &[Rgb8] {
        &self.texels
    }

    /// Raw texel bytes, three per texel.
    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }

    /// The sampling mode.
    pub fn sampling(&self) -> ColorSampling {
        self.sampling
    }
}

/// Material state of a line: parameters, color lookup and what needs re-uploading.
#[derive(Clone, Debug)]
pub struct LineMaterial {
    params: MaterialParams,
    colors: Option<ColorTexture>,
    uniforms_dirty: bool,
    colors_dirty: bool,
}

impl LineMaterial {
    /// Create a material without a color lookup texture.
    pub fn new(params: MaterialParams) -> Self {
        Self {
            params,
            colors: None,
            uniforms_dirty: true,
            colors_dirty: false,
        }
    }

    /// The current parameters.
    pub fn params(&self) -> &MaterialParams {
        &self.params
    }

    /// Replace all parameters. The color lookup texture is kept.
    pub fn set_params(&mut self, params: MaterialParams) {
        self.params = params;
        self.uniforms_dirty = true;
    }

    /// The distributed color table, if any.
    pub fn color_table(&self) -> Option<&[Rgb8]> {
        self.colors.as_ref().map(ColorTexture::texels)
    }

    /// The color lookup texture, if any.
    pub fn color_texture(&self) -> Option<&ColorTexture> {
        self.colors.as_ref()
    }

    /// Replace the distributed color table.
    pub fn set_color_table(&mut self, table: Vec<Rgb8>) {
        self.colors = Some(ColorTexture::new(table, self.params.color_sampling));
        self.colors_dirty = true;
        // The texel count is part of the uniforms.
        self.uniforms_dirty = true;
    }

    /// Set the base line width.
    pub fn set_line_width(&mut self, value: f32) {
        self.params.line_width = value;
        self.uniforms_dirty = true;
    }

    /// Set the visibility cutoff.
    pub fn set_visibility(&mut self, value: f32) {
        self.params.visibility = value;
        self.uniforms_dirty = true;
    }

    /// Set the render target size.
    pub fn set_resolution(&mut self, value: [f32; 2]) {
        self.params.resolution = value;
        self.uniforms_dirty = true;
    }

    /// Enable or disable size attenuation.
    pub fn set_size_attenuation(&mut self, value: bool) {
        self.params.size_attenuation = value;
        self.uniforms_dirty = true;
    }

    /// Set the dash period.
    pub fn set_dash_array(&mut self, value: f32) {
        self.params.dash_array = value;
        self.uniforms_dirty = true;
    }

    /// Set the dash offset.
    pub fn set_dash_offset(&mut self, value: f32) {
        self.params.dash_offset = value;
        self.uniforms_dirty = true;
    }

    /// Set the dash ratio.
    pub fn set_dash_ratio(&mut self, value: f32) {
        self.params.dash_ratio = value;
        self.uniforms_dirty = true;
    }

    /// Enable or disable dashing.
    pub fn set_use_dash(&mut self, value: bool) {
        self.params.use_dash = value;
        self.uniforms_dirty = true;
    }

    /// Enable or disable the color lookup texture.
    pub fn set_use_colors(&mut self, value: bool) {
        self.params.use_colors = value;
        self.uniforms_dirty = true;
    }

    /// Enable or disable sampling of the color map.
    pub fn set_use_map(&mut self, value: bool) {
        self.params.use_map = value;
        self.uniforms_dirty = true;
    }

    /// Enable or disable sampling of the alpha map.
    pub fn set_use_alpha_map(&mut self, value: bool) {
        self.params.use_alpha_map = value;
        self.uniforms_dirty = true;
    }

    /// Set the alpha test threshold.
    pub fn set_alpha_test(&mut self, value: f32) {
        self.params.alpha_test = value;
        self.uniforms_dirty = true;
    }

    /// The uniform block for the current parameters.
    pub fn uniforms(&self) -> MaterialUniforms {
        let p = &self.params;
        let [r, g, b, _] = p.color.components;
        MaterialUniforms {
            color: [r, g, b, p.opacity],
            resolution: p.resolution,
            repeat: p.repeat,
            uv_offset: p.uv_offset,
            line_width: p.line_width,
            size_attenuation: flag(p.size_attenuation),
            dash_array: p.dash_array,
            dash_offset: p.dash_offset,
            dash_ratio: p.dash_ratio,
            use_dash: flag(p.use_dash),
            visibility: p.visibility,
            alpha_test: p.alpha_test,
            use_colors: flag(p.use_colors),
            color_count: self.colors.as_ref().map_or(1., |c| c.width() as f32),
            use_map: flag(p.use_map),
            use_alpha_map: flag(p.use_alpha_map),
            _padding: [0.; 2],
        }
    }

    /// The uniform block, if it changed since it was last taken.
    pub fn take_uniforms(&mut self) -> Option<MaterialUniforms> {
        if !self.uniforms_dirty {
            return None;
        }
        self.uniforms_dirty = false;
        Some(self.uniforms())
    }

    /// Send whatever changed to `backend`.
    pub fn flush(&mut self, backend: &mut impl Backend) {
        if let Some(uniforms) = self.take_uniforms() {
            backend.write_uniforms(&uniforms);
        }
        if self.colors_dirty {
            if let Some(colors) = &self.colors {
                backend.upload_colors(colors);
            }
            self.colors_dirty = false;
        }
    }
}

fn flag(value: bool) -> f32 {
    if value {
        1.
    } else {
        0.
    }
}
