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

//! G-buffer clear lane.

use super::PassContext;
use umbra_core::{
    lane::{Lane, LaneKind},
    math::LinearRgba,
    renderer::{
        BlendState, DepthStencilState, RasterizerState, ShowFlags, Viewport, FAR_DEPTH,
    },
    ViewFamily,
};

/// Clear values of the G-buffer targets, in binding order.
const GBUFFER_CLEAR_COLORS: [LinearRgba; 6] = [
    LinearRgba::TRANSPARENT,
    LinearRgba::new(0.5, 0.5, 0.5, 0.0),
    LinearRgba::new(0.0, 0.0, 0.0, 1.0),
    LinearRgba::new(0.0, 0.0, 0.0, 0.0),
    LinearRgba::new(0.0, 1.0, 1.0, 1.0),
    LinearRgba::new(1.0, 1.0, 1.0, 1.0),
];

/// The scene-color clear value of a family.
///
/// View modes that accumulate into scene color start from transparent black;
/// everything else starts from the first view's background color.
pub fn scene_clear_color(family: &ViewFamily) -> LinearRgba {
    let clear_black = family
        .show_flags
        .intersects(ShowFlags::SHADER_COMPLEXITY | ShowFlags::STATIONARY_LIGHT_OVERLAP);
    match family.views.first() {
        Some(view) if !clear_black => view.background_color,
        _ => LinearRgba::TRANSPARENT,
    }
}

/// Clears the G-buffer, either with a hardware clear or with a far-plane quad.
///
/// Both paths leave the same values in pixels no geometry touched. Which one
/// runs, if any, is the agent's decision.
#[derive(Debug, Default)]
pub struct GBufferClearLane;

impl GBufferClearLane {
    /// Creates a new `GBufferClearLane`.
    pub fn new() -> Self {
        Self
    }

    /// Clears every G-buffer target with one hardware clear.
    pub fn clear_view(&self, ctx: &mut PassContext<'_>) {
        let color = scene_clear_color(ctx.family);
        log::trace!("Hardware G-buffer clear to {color:?}");
        ctx.targets.clear_gbuffer_targets(color);
    }

    /// Draws a quad at the far plane over each view.
    ///
    /// The depth test rejects the quad wherever geometry was drawn, so only
    /// background pixels receive the clear values. Must run with the scene
    /// color targets bound.
    pub fn clear_at_max_depth(&self, ctx: &mut PassContext<'_>) {
        let mut colors = GBUFFER_CLEAR_COLORS;
        colors[0] = scene_clear_color(ctx.family);
        let target_count = ctx.targets.gbuffer_target_count().count();
        let colors = &colors[..target_count];

        let encoder = &mut *ctx.encoder;
        encoder.push_debug_group("ClearGBufferAtMaxZ");
        encoder.set_rasterizer_state(RasterizerState::SOLID_NO_CULL);
        encoder.set_blend_state(BlendState::opaque(target_count as u32));
        encoder.set_depth_stencil_state(DepthStencilState::TEST_GREATER_EQUAL);

        let multi_view = ctx.family.is_multi_view();
        for (view_index, view) in ctx.family.views.iter().enumerate() {
            if multi_view {
                encoder.push_debug_group(&format!("ClearView{view_index}"));
            }
            encoder.set_viewport(Viewport::from_rect(view.rect));
            encoder.draw_clear_quad(FAR_DEPTH, colors);
            if multi_view {
                encoder.pop_debug_group();
            }
        }
        encoder.pop_debug_group();
    }
}

impl Lane for GBufferClearLane {
    fn strategy_name(&self) -> &'static str {
        "GBufferClear"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::SceneClear
    }
}
