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

use crate::math::LinearRgba;
use crate::renderer::api::{
    BlendState, ClearRequest, DepthPriorityGroup, DepthStencilState, DownsampleDepthParameters,
    MeshDrawCommand, RasterizerState, ScreenQuad, TextureId, Viewport,
};
use crate::view::BatchedElements;

/// A trait for an object that records a sequence of GPU commands.
///
/// The frame passes issue every state change, clear and draw through this
/// trait in strict order. The device may execute the recorded stream
/// asynchronously but never reorders it.
pub trait CommandEncoder {
    /// Opens a named debug group. Groups nest and must be closed in reverse order.
    fn push_debug_group(&mut self, label: &str);

    /// Closes the innermost debug group.
    fn pop_debug_group(&mut self);

    /// Binds the blend state of the current color targets.
    fn set_blend_state(&mut self, state: BlendState);

    /// Binds the depth state.
    fn set_depth_stencil_state(&mut self, state: DepthStencilState);

    /// Binds the rasterizer state.
    fn set_rasterizer_state(&mut self, state: RasterizerState);

    /// Sets the viewport.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clears the currently bound targets.
    fn clear(&mut self, request: &ClearRequest);

    /// Draws one mesh.
    fn draw_mesh(&mut self, command: &MeshDrawCommand);

    /// Draws batched simple elements of one priority group.
    fn draw_batched_elements(
        &mut self,
        view_index: usize,
        group: DepthPriorityGroup,
        elements: &BatchedElements,
    );

    /// Draws a full-viewport quad at `depth`, writing `colors[i]` to color target `i`.
    fn draw_clear_quad(&mut self, depth: f32, colors: &[LinearRgba]);

    /// Draws the depth downsample quad, sampling view-space depth from the
    /// alpha channel of `source`.
    fn draw_downsample_depth(
        &mut self,
        source: TextureId,
        params: &DownsampleDepthParameters,
        quad: &ScreenQuad,
    );
}
