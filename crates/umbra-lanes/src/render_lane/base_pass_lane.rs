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

//! Base pass lane: populates the G-buffer.

use super::{
    begin_view_group, draw_base_pass_static_data, end_view_group, DynamicPrimitiveDrawer,
    PassContext, RenderPassLane,
};
use umbra_core::{
    lane::{Lane, LaneKind},
    renderer::{
        BlendState, CommandEncoder, DepthPriorityGroup, DepthStencilState, DrawingPolicy,
        ShowFlags, Viewport,
    },
    scene::{MeshElement, PrimitiveDrawInterface},
    view::BatchedElements,
    SceneView, ViewFamily,
};

/// Number of G-buffer targets the opaque base-pass blend writes.
const BASE_PASS_COLOR_TARGETS: u32 = 4;

/// Whether view elements are left to the editor compositing pass.
pub fn should_composite_editor_primitives(family: &ViewFamily) -> bool {
    family
        .show_flags
        .contains(ShowFlags::COMPOSITE_EDITOR_PRIMITIVES)
}

/// Draws the static, dynamic and view-attached opaque geometry of every view.
///
/// Under the shader-complexity view mode, blending is additive and depth is
/// tested without writes so every overlapping fragment contributes its cost.
#[derive(Debug, Default)]
pub struct BasePassLane;

impl BasePassLane {
    /// Creates a new `BasePassLane`.
    pub fn new() -> Self {
        Self
    }

    fn bind_view_state(encoder: &mut dyn CommandEncoder, show_flags: ShowFlags, view: &SceneView) {
        if show_flags.contains(ShowFlags::SHADER_COMPLEXITY) {
            encoder.set_blend_state(BlendState::ADDITIVE);
            encoder.set_depth_stencil_state(DepthStencilState::TEST_GREATER_EQUAL);
        } else {
            encoder.set_blend_state(BlendState::opaque(BASE_PASS_COLOR_TARGETS));
            encoder.set_depth_stencil_state(DepthStencilState::WRITE_GREATER_EQUAL);
        }
        encoder.set_viewport(Viewport::from_rect(view.rect));
    }

    fn render_view(&self, ctx: &mut PassContext<'_>, view_index: usize, view: &SceneView) -> bool {
        let family = ctx.family;
        let encoder = &mut *ctx.encoder;
        let mut dirty = draw_base_pass_static_data(
            encoder,
            &ctx.scene.base_pass_draw_lists,
            ctx.policy,
            view_index,
            &view.visibility.static_mesh_visibility,
        );

        encoder.push_debug_group("Dynamic");
        let wireframe = family.show_flags.contains(ShowFlags::WIREFRAME);
        let visibility = &view.visibility;
        let mut drawer = DynamicPrimitiveDrawer::new(encoder, view_index, DrawingPolicy::BasePass);
        for &id in &visibility.visible_dynamic_primitives {
            let relevance = visibility.relevance(id);
            if !(visibility.is_primitive_visible(id)
                && (relevance.opaque || wireframe)
                && relevance.render_in_main_pass)
            {
                continue;
            }
            match ctx.scene.primitive(id) {
                Some(proxy) => {
                    drawer.set_primitive(id);
                    proxy.draw_dynamic_elements(&mut drawer, view);
                }
                None => log::warn!("Visible dynamic primitive {id:?} is not in the scene"),
            }
        }

        if !should_composite_editor_primitives(family) {
            dirty |= Self::draw_view_elements(
                &mut drawer,
                view_index,
                DepthPriorityGroup::World,
                &view.elements.world_meshes,
                &view.elements.world_batched,
            );
            // Foreground last so it composites over world elements.
            dirty |= Self::draw_view_elements(
                &mut drawer,
                view_index,
                DepthPriorityGroup::Foreground,
                &view.elements.foreground_meshes,
                &view.elements.foreground_batched,
            );
        }

        dirty |= drawer.is_dirty();
        let encoder = drawer.encoder();
        encoder.pop_debug_group();
        dirty
    }

    fn draw_view_elements(
        drawer: &mut DynamicPrimitiveDrawer<'_>,
        view_index: usize,
        group: DepthPriorityGroup,
        meshes: &[MeshElement],
        batched: &BatchedElements,
    ) -> bool {
        drawer.set_view_group(group);
        for element in meshes {
            drawer.draw_mesh(element);
        }
        if !batched.has_primitives() {
            return false;
        }
        drawer
            .encoder()
            .draw_batched_elements(view_index, group, batched);
        true
    }
}

impl Lane for BasePassLane {
    fn strategy_name(&self) -> &'static str {
        "DeferredBasePass"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::BasePass
    }
}

impl RenderPassLane for BasePassLane {
    fn render(&self, ctx: &mut PassContext<'_>) -> bool {
        let family = ctx.family;
        let mut dirty = false;
        for (view_index, view) in family.views.iter().enumerate() {
            let opened = begin_view_group(&mut *ctx.encoder, family, view_index);
            Self::bind_view_state(&mut *ctx.encoder, family.show_flags, view);
            dirty |= self.render_view(ctx, view_index, view);
            end_view_group(&mut *ctx.encoder, opened);
        }
        log::trace!("Base pass finished, dirty: {dirty}");
        dirty
    }
}
