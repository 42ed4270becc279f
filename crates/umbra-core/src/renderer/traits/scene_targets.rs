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

use crate::math::{Extent2D, IntRect, LinearRgba};
use crate::renderer::api::{GBufferTargetCount, TextureId};

/// The shared scene render targets: depth, scene color, the G-buffer and the
/// small depth surface used by occlusion queries.
///
/// Binding, clearing and resolving targets goes through this trait. Every
/// `begin_*` call binds a target set that stays bound until the next one.
pub trait SceneRenderTargets {
    /// Allocates or resizes every target for a family of `family_size`.
    fn allocate(&mut self, family_size: Extent2D);

    /// Binds the depth target for the depth-only pass.
    fn begin_rendering_prepass(&mut self);

    /// Finishes the depth-only pass.
    fn finish_rendering_prepass(&mut self);

    /// Binds scene color and the G-buffer for the base pass.
    fn begin_rendering_scene_color(&mut self);

    /// Clears every G-buffer target to `color` with a single hardware clear.
    fn clear_gbuffer_targets(&mut self, color: LinearRgba);

    /// Number of simultaneously bound G-buffer color targets. Fixed for the session.
    fn gbuffer_target_count(&self) -> GBufferTargetCount;

    /// MSAA sample count of the G-buffer.
    fn gbuffer_sample_count(&self) -> u32;

    /// Resolves scene color over `rect` for sampling.
    fn resolve_scene_color(&mut self, rect: IntRect);

    /// Resolves scene depth for sampling.
    fn resolve_scene_depth(&mut self);

    /// Resolves depth into a second, shader-readable copy.
    fn resolve_scene_depth_to_auxiliary_texture(&mut self);

    /// Binds the small depth surface for the downsample pass.
    fn begin_rendering_small_depth_surface(&mut self);

    /// Whether occlusion queries use the downsampled depth surface.
    fn use_downsized_occlusion_queries(&self) -> bool;

    /// Ratio between full-resolution and small depth.
    fn small_depth_downsample_factor(&self) -> u32;

    /// Size of the full-resolution targets.
    fn buffer_size(&self) -> Extent2D;

    /// The resolved scene depth texture.
    fn scene_depth_texture(&self) -> TextureId;

    /// The first G-buffer texture.
    fn gbuffer_a_texture(&self) -> TextureId;

    /// Texture holding scene color; its alpha carries view-space depth.
    fn scene_color_texture(&self) -> TextureId;
}
