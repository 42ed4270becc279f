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

//! Rendering lanes - hot path for the deferred frame passes.

use umbra_core::{
    lane::Lane,
    renderer::{CommandEncoder, DeviceCapabilities, PipelinePolicy, SceneRenderTargets},
    scene::Scene,
    RendererConfig, ViewFamily,
};

mod base_pass_lane;
mod depth_prepass_lane;
mod downsample_depth_lane;
mod dynamic_drawer;
mod gbuffer_clear_lane;
mod static_draw_lists;

#[cfg(test)]
pub(crate) mod test_support;

pub use base_pass_lane::*;
pub use depth_prepass_lane::*;
pub use downsample_depth_lane::*;
pub use dynamic_drawer::*;
pub use gbuffer_clear_lane::*;
pub use static_draw_lists::*;

/// Everything a pass reads or writes while it runs.
///
/// The context is assembled by the agent for each pass invocation. The scene is
/// borrowed immutably: the only mutation a frame performs on it (the static
/// draw-list sort) happens before any pass runs.
pub struct PassContext<'a> {
    /// The command stream of the view family.
    pub encoder: &'a mut dyn CommandEncoder,
    /// The scene render targets.
    pub targets: &'a mut dyn SceneRenderTargets,
    /// The views being rendered, with their visibility results.
    pub family: &'a ViewFamily,
    /// The scene storage.
    pub scene: &'a Scene,
    /// The policy resolved for this frame.
    pub policy: &'a PipelinePolicy,
    /// The configuration snapshot of this frame.
    pub config: &'a RendererConfig,
    /// The platform capabilities.
    pub capabilities: &'a DeviceCapabilities,
}

/// A frame pass driven by a [`PassContext`].
///
/// Lanes report whether they issued at least one draw. The flag is purely
/// informational and never gates a later pass.
pub trait RenderPassLane: Lane {
    /// Encodes the pass.
    ///
    /// # Returns
    ///
    /// `true` if anything was drawn.
    fn render(&self, ctx: &mut PassContext<'_>) -> bool;
}

/// Opens a `View{index}` debug group when the family has more than one view.
///
/// Returns whether a group was opened, to be handed back to [`end_view_group`].
pub fn begin_view_group(
    encoder: &mut dyn CommandEncoder,
    family: &ViewFamily,
    view_index: usize,
) -> bool {
    if family.is_multi_view() {
        encoder.push_debug_group(&format!("View{view_index}"));
        true
    } else {
        false
    }
}

/// Closes a group opened by [`begin_view_group`].
pub fn end_view_group(encoder: &mut dyn CommandEncoder, opened: bool) {
    if opened {
        encoder.pop_debug_group();
    }
}
