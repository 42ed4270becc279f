// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Downsample-depth lane.
//!
//! Builds the low-resolution depth surface read by occlusion queries. Scene
//! color carries view-space depth in alpha; the shader samples a 2x2 footprint
//! and turns it back into post-projection depth with two projection terms.

use super::{PassContext, RenderPassLane};
use umbra_core::{
    lane::{Lane, LaneKind},
    math::{Extent2D, Vec2, Vec4},
    renderer::{
        BlendState, DepthStencilState, DownsampleDepthParameters, FeatureLevel, RasterizerState,
        ScreenQuad, Viewport,
    },
    SceneView,
};

/// Shader constants for downsampling `view` into a surface of `downsampled_size`.
pub fn downsample_depth_parameters(
    view: &SceneView,
    downsampled_size: Extent2D,
) -> DownsampleDepthParameters {
    let texel_x = 1.0 / downsampled_size.width.max(1) as f32;
    let texel_y = 1.0 / downsampled_size.height.max(1) as f32;
    DownsampleDepthParameters {
        projection_scale_bias: Vec2::new(view.projection.cols[2].z, view.projection.cols[3].z),
        source_texel_offsets01: Vec4::new(0.0, 0.0, texel_x, 0.0),
        source_texel_offsets23: Vec4::new(0.0, texel_y, texel_x, texel_y),
    }
}

/// Renders the small depth surface used by downsized occlusion queries.
#[derive(Debug, Default)]
pub struct DownsampleDepthLane;

impl DownsampleDepthLane {
    /// Creates a new `DownsampleDepthLane`.
    pub fn new() -> Self {
        Self
    }

    /// Whether the pass runs with these targets and capabilities.
    pub fn is_enabled(&self, ctx: &PassContext<'_>) -> bool {
        ctx.targets.use_downsized_occlusion_queries()
            && ctx.capabilities.feature_level >= FeatureLevel::Sm3
    }
}

impl Lane for DownsampleDepthLane {
    fn strategy_name(&self) -> &'static str {
        "DownsampleDepth"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::DepthDownsample
    }
}

impl RenderPassLane for DownsampleDepthLane {
    fn render(&self, ctx: &mut PassContext<'_>) -> bool {
        if !self.is_enabled(ctx) {
            return false;
        }

        ctx.targets.begin_rendering_small_depth_surface();
        let factor = ctx.targets.small_depth_downsample_factor().max(1);
        let buffer_size = ctx.targets.buffer_size();
        let downsampled_buffer = buffer_size.div_floor(factor);
        let source = ctx.targets.scene_color_texture();

        let encoder = &mut *ctx.encoder;
        encoder.push_debug_group("DownsampleDepth");
        let mut dirty = false;
        for view in &ctx.family.views {
            let params = downsample_depth_parameters(view, downsampled_buffer);

            encoder.set_blend_state(BlendState::NO_COLOR_WRITES);
            encoder.set_rasterizer_state(RasterizerState::SOLID_NO_CULL);
            encoder.set_depth_stencil_state(DepthStencilState::WRITE_ALWAYS);

            let rect = view.rect;
            let min_x = rect.min_x / factor;
            let min_y = rect.min_y / factor;
            let size = rect.size().div_floor(factor);
            encoder.set_viewport(Viewport {
                min_x,
                min_y,
                max_x: min_x + size.width,
                max_y: min_y + size.height,
                min_depth: 0.0,
                max_depth: 1.0,
            });

            let quad = ScreenQuad {
                x: 0.0,
                y: 0.0,
                width: size.width as f32,
                height: size.height as f32,
                u: rect.min_x as f32,
                v: rect.min_y as f32,
                size_u: rect.width() as f32,
                size_v: rect.height() as f32,
                target_size: size,
                texture_size: buffer_size,
            };
            encoder.draw_downsample_depth(source, &params, &quad);
            dirty = true;
        }
        encoder.pop_debug_group();
        dirty
    }
}
