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

//! Per-frame outcome returned by the agent.

use umbra_core::renderer::{ClearMode, PipelinePolicy};

/// What a frame did.
///
/// Dirty flags are informational: they tell whether a pass drew anything and
/// never influence later passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// The family had rendering disabled and no work was issued.
    pub skipped: bool,
    /// The policy the frame was rendered with.
    pub policy: PipelinePolicy,
    /// The depth pre-pass drew at least one occluder.
    pub prepass_dirty: bool,
    /// The base pass (or its lightmap-density replacement) drew something.
    pub base_pass_dirty: bool,
    /// The base pass was skipped for a temporal-reprojection phase.
    pub base_pass_skipped: bool,
    /// The clear mechanism that ran, [`ClearMode::None`] if none did.
    pub executed_clear: ClearMode,
    /// The small depth surface for downsized occlusion queries was rendered.
    pub downsampled_depth: bool,
    /// The G-buffer was resolved by the custom multi-target pass.
    pub custom_gbuffer_resolve: bool,
    /// Occlusion queries were issued.
    pub occlusion_tested: bool,
    /// The deferred lighting block ran.
    pub lighting_rendered: bool,
    /// A light-shaft occlusion mask was produced.
    pub light_shaft_produced: bool,
    /// The light-shaft mask was dropped after the fog pass.
    pub light_shaft_released: bool,
    /// Scene color was resolved at the end of the frame.
    pub final_scene_color_resolved: bool,
}

impl FrameReport {
    /// A report for a frame rendered with `policy`, before any pass ran.
    pub fn new(policy: PipelinePolicy) -> Self {
        Self {
            skipped: false,
            policy,
            prepass_dirty: false,
            base_pass_dirty: false,
            base_pass_skipped: false,
            executed_clear: ClearMode::None,
            downsampled_depth: false,
            custom_gbuffer_resolve: false,
            occlusion_tested: false,
            lighting_rendered: false,
            light_shaft_produced: false,
            light_shaft_released: false,
            final_scene_color_resolved: false,
        }
    }

    /// A report for a frame that did not render.
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::new(PipelinePolicy::default())
        }
    }

    /// Whether any geometry pass drew.
    pub fn is_dirty(&self) -> bool {
        self.prepass_dirty || self.base_pass_dirty
    }
}
