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

//! Depth-only pre-pass lane.

use super::{begin_view_group, end_view_group, DynamicPrimitiveDrawer, PassContext, RenderPassLane};
use umbra_core::{
    lane::{Lane, LaneKind},
    renderer::{
        BlendState, ClearRequest, DepthDrawingMode, DepthStencilState, DrawingPolicy, ShowFlags,
        Viewport,
    },
    scene::{PrimitiveSceneProxy, PrimitiveViewRelevance},
    RendererConfig, SceneView,
};

/// Whether a dynamic primitive is drawn into the depth pre-pass of `view`.
///
/// A primitive qualifies when it opts in as an occluder, is static (or movable
/// occluders are allowed) and covers enough of the screen. Accurate-depth debug
/// modes admit every primitive. In both cases the primitive must be opaque and
/// rendered in the main pass.
pub fn is_dynamic_occluder(
    proxy: &dyn PrimitiveSceneProxy,
    relevance: PrimitiveViewRelevance,
    view: &SceneView,
    config: &RendererConfig,
    requires_accurate_depth: bool,
) -> bool {
    let mut occluder = proxy.should_use_as_occluder()
        && (!proxy.is_movable() || config.render_movable_objects_in_depth_only_pass)
        && proxy.bounds().exceeds_screen_radius(
            view.view_origin,
            config.min_screen_radius_for_depth_prepass,
            view.lod_distance_factor,
        );
    occluder |= requires_accurate_depth;
    occluder && relevance.opaque && relevance.render_in_main_pass
}

/// Lays down occluder depth before the base pass.
///
/// The pre-pass targets are always bound and depth is always cleared to the far
/// plane, so the base pass starts from a known depth buffer even when the policy
/// disables the occluder draws.
#[derive(Debug, Default)]
pub struct DepthPrepassLane;

impl DepthPrepassLane {
    /// Creates a new `DepthPrepassLane`.
    pub fn new() -> Self {
        Self
    }

    fn render_view(&self, ctx: &mut PassContext<'_>, view_index: usize, view: &SceneView) -> bool {
        let requires_accurate_depth = ctx.family.show_flags.contains(ShowFlags::SHADER_COMPLEXITY);
        let encoder = &mut *ctx.encoder;

        encoder.set_blend_state(BlendState::NO_COLOR_WRITES);
        encoder.set_depth_stencil_state(DepthStencilState::WRITE_GREATER_EQUAL);
        encoder.set_viewport(Viewport::from_rect(view.rect));

        let occluders = &view.visibility.static_mesh_occluders;
        let lists = &ctx.scene.depth_draw_lists;
        let mut dirty =
            lists
                .position_only
                .draw_visible(encoder, view_index, occluders, DrawingPolicy::PositionOnlyDepth);

        let depth_mode = if requires_accurate_depth {
            DepthDrawingMode::AllOccluders
        } else {
            DepthDrawingMode::NonMaskedOnly
        };
        dirty |= lists.depth.draw_visible(
            encoder,
            view_index,
            occluders,
            DrawingPolicy::Depth(depth_mode),
        );

        let visibility = &view.visibility;
        let mut drawer =
            DynamicPrimitiveDrawer::new(encoder, view_index, DrawingPolicy::Depth(depth_mode));
        for &id in &visibility.visible_dynamic_primitives {
            let Some(proxy) = ctx.scene.primitive(id) else {
                log::warn!("Visible dynamic primitive {id:?} is not in the scene");
                continue;
            };
            if is_dynamic_occluder(
                proxy,
                visibility.relevance(id),
                view,
                ctx.config,
                requires_accurate_depth,
            ) {
                drawer.set_primitive(id);
                proxy.draw_dynamic_elements(&mut drawer, view);
            }
        }
        dirty | drawer.is_dirty()
    }
}

impl Lane for DepthPrepassLane {
    fn strategy_name(&self) -> &'static str {
        "DepthPrepass"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::DepthPrepass
    }
}

impl RenderPassLane for DepthPrepassLane {
    fn render(&self, ctx: &mut PassContext<'_>) -> bool {
        ctx.targets.begin_rendering_prepass();
        ctx.encoder.clear(&ClearRequest::far_depth_and_stencil());

        let mut dirty = false;
        if ctx.policy.use_depth_only_prepass {
            let family = ctx.family;
            for (view_index, view) in family.views.iter().enumerate() {
                let opened = begin_view_group(&mut *ctx.encoder, family, view_index);
                dirty |= self.render_view(ctx, view_index, view);
                end_view_group(&mut *ctx.encoder, opened);
            }
        }

        ctx.targets.finish_rendering_prepass();
        log::trace!("Depth pre-pass finished, dirty: {dirty}");
        dirty
    }
}
