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

//! A command encoder and render targets that log every call instead of
//! talking to a GPU.

use umbra_core::{
    math::{Extent2D, IntRect, LinearRgba},
    renderer::{
        BlendState, ClearRequest, CommandEncoder, DepthPriorityGroup, DepthStencilState,
        DownsampleDepthParameters, GBufferTargetCount, MeshDrawCommand, RasterizerState,
        SceneRenderTargets, ScreenQuad, TextureId, Viewport,
    },
    view::BatchedElements,
};

/// Logs commands, indented by debug-group depth.
#[derive(Default)]
pub struct TracingEncoder {
    depth: usize,
    draw_calls: u32,
}

impl TracingEncoder {
    /// Number of mesh draws issued since the last reset.
    pub fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    /// Resets the per-frame counters.
    pub fn reset(&mut self) {
        self.draw_calls = 0;
    }

    fn trace(&self, message: std::fmt::Arguments<'_>) {
        log::debug!("{:indent$}{}", "", message, indent = self.depth * 2);
    }
}

impl CommandEncoder for TracingEncoder {
    fn push_debug_group(&mut self, label: &str) {
        self.trace(format_args!("[{label}]"));
        self.depth += 1;
    }

    fn pop_debug_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn set_blend_state(&mut self, state: BlendState) {
        self.trace(format_args!("blend {state:?}"));
    }

    fn set_depth_stencil_state(&mut self, state: DepthStencilState) {
        self.trace(format_args!("depth {state:?}"));
    }

    fn set_rasterizer_state(&mut self, state: RasterizerState) {
        self.trace(format_args!("raster {state:?}"));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.trace(format_args!("viewport {viewport:?}"));
    }

    fn clear(&mut self, request: &ClearRequest) {
        self.trace(format_args!("clear {request:?}"));
    }

    fn draw_mesh(&mut self, command: &MeshDrawCommand) {
        self.draw_calls += 1;
        self.trace(format_args!(
            "draw view {} {:?} with {:?}",
            command.view_index, command.source, command.policy
        ));
    }

    fn draw_batched_elements(
        &mut self,
        view_index: usize,
        group: DepthPriorityGroup,
        elements: &BatchedElements,
    ) {
        self.trace(format_args!(
            "batched view {view_index} {group:?}: {} lines, {} sprites",
            elements.lines, elements.sprites
        ));
    }

    fn draw_clear_quad(&mut self, depth: f32, colors: &[LinearRgba]) {
        self.trace(format_args!("clear quad at depth {depth}, {} targets", colors.len()));
    }

    fn draw_downsample_depth(
        &mut self,
        source: TextureId,
        params: &DownsampleDepthParameters,
        quad: &ScreenQuad,
    ) {
        self.trace(format_args!("downsample depth from {source:?} {params:?} {quad:?}"));
    }
}

/// Render targets that only track their size.
pub struct TracingTargets {
    buffer_size: Extent2D,
    sample_count: u32,
}

impl TracingTargets {
    /// Creates targets with the given MSAA sample count.
    pub fn new(sample_count: u32) -> Self {
        Self {
            buffer_size: Extent2D::default(),
            sample_count,
        }
    }
}

impl SceneRenderTargets for TracingTargets {
    fn allocate(&mut self, family_size: Extent2D) {
        if family_size != self.buffer_size {
            log::info!(
                "Allocating scene targets {}x{}",
                family_size.width,
                family_size.height
            );
            self.buffer_size = family_size;
        }
    }

    fn begin_rendering_prepass(&mut self) {
        log::debug!("targets: begin pre-pass");
    }

    fn finish_rendering_prepass(&mut self) {
        log::debug!("targets: finish pre-pass");
    }

    fn begin_rendering_scene_color(&mut self) {
        log::debug!("targets: begin scene color");
    }

    fn clear_gbuffer_targets(&mut self, color: LinearRgba) {
        log::debug!("targets: hardware clear to {color:?}");
    }

    fn gbuffer_target_count(&self) -> GBufferTargetCount {
        GBufferTargetCount::Five
    }

    fn gbuffer_sample_count(&self) -> u32 {
        self.sample_count
    }

    fn resolve_scene_color(&mut self, rect: IntRect) {
        log::debug!("targets: resolve scene color {rect:?}");
    }

    fn resolve_scene_depth(&mut self) {
        log::debug!("targets: resolve scene depth");
    }

    fn resolve_scene_depth_to_auxiliary_texture(&mut self) {
        log::debug!("targets: resolve auxiliary depth");
    }

    fn begin_rendering_small_depth_surface(&mut self) {
        log::debug!("targets: begin small depth surface");
    }

    fn use_downsized_occlusion_queries(&self) -> bool {
        true
    }

    fn small_depth_downsample_factor(&self) -> u32 {
        2
    }

    fn buffer_size(&self) -> Extent2D {
        self.buffer_size
    }

    fn scene_depth_texture(&self) -> TextureId {
        TextureId(0)
    }

    fn gbuffer_a_texture(&self) -> TextureId {
        TextureId(1)
    }

    fn scene_color_texture(&self) -> TextureId {
        TextureId(2)
    }
}
