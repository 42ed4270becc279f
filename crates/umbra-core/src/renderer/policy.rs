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

//! Per-frame pipeline policy.
//!
//! The policy condenses configuration, platform capabilities and show flags
//! into the few decisions that reshape the pass graph: whether a depth-only
//! pre-pass runs, how the G-buffer is cleared, and how it is resolved. It is
//! resolved once at the start of a frame and is read-only afterwards.

use crate::config::RendererConfig;
use crate::renderer::api::{DeviceCapabilities, FeatureLevel};
use crate::renderer::ShowFlags;
use crate::scene::DrawType;

/// Explicit user override of the depth-only pre-pass decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthPrepassOverride {
    /// Keep the platform and quality decision.
    #[default]
    Unset,
    /// Never run the pre-pass.
    ForceOff,
    /// Always run the pre-pass.
    ForceOn,
}

impl DepthPrepassOverride {
    /// Maps a configuration value: `0` forces off, `1` forces on, anything else is unset.
    pub fn from_config_value(value: i32) -> Self {
        match value {
            0 => DepthPrepassOverride::ForceOff,
            1 => DepthPrepassOverride::ForceOn,
            _ => DepthPrepassOverride::Unset,
        }
    }
}

/// How the G-buffer is cleared before the base pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClearMode {
    /// No clear. Valid when every pixel is known to be covered.
    None,
    /// One hardware clear of every G-buffer target before the base pass.
    #[default]
    HardwareClear,
    /// A far-plane quad drawn after the base pass, touching only empty pixels.
    FarPlaneQuadClear,
}

impl ClearMode {
    /// Maps a configuration value: `0` none, `1` hardware, `2` far-plane quad.
    ///
    /// Unknown values fall back to [`ClearMode::HardwareClear`].
    pub fn from_config_value(value: i32) -> Self {
        match value {
            0 => ClearMode::None,
            1 => ClearMode::HardwareClear,
            2 => ClearMode::FarPlaneQuadClear,
            other => {
                log::warn!("Unknown clear scene method {other}, using a hardware clear");
                ClearMode::HardwareClear
            }
        }
    }
}

/// Inputs of the depth-only pre-pass decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthPrepassInputs {
    /// The platform supports windowed (multiple) configurations.
    pub supports_windowed_mode: bool,
    /// High-quality lightmaps are allowed and the lighting show flag is on.
    pub high_quality_lit: bool,
    /// Explicit user override.
    pub user_override: DepthPrepassOverride,
    /// A debug view mode needs pre-pass depth to match final depth exactly.
    pub requires_accurate_depth: bool,
}

/// Resolves whether the depth-only pre-pass runs.
///
/// Later rules take precedence: the platform sets a baseline, the quality and
/// lighting combination refines it, an explicit override replaces it, and a
/// debug view mode needing accurate depth forces it on.
pub fn resolve_depth_prepass(inputs: DepthPrepassInputs) -> bool {
    // Fixed-configuration platforms are tuned for a pre-pass.
    let mut use_prepass = if inputs.supports_windowed_mode {
        inputs.high_quality_lit
    } else {
        true
    };

    match inputs.user_override {
        DepthPrepassOverride::ForceOff => use_prepass = false,
        DepthPrepassOverride::ForceOn => use_prepass = true,
        DepthPrepassOverride::Unset => {}
    }

    if inputs.requires_accurate_depth {
        use_prepass = true;
    }
    use_prepass
}

/// Applies the show-flag overrides to the configured clear mode.
///
/// Wireframe, shader complexity and stationary-light overlap need every pixel
/// initialized and force a hardware clear.
pub fn resolve_clear_mode(configured: ClearMode, show_flags: ShowFlags) -> ClearMode {
    if show_flags.intersects(ShowFlags::FORCE_HARDWARE_CLEAR) {
        ClearMode::HardwareClear
    } else {
        configured
    }
}

/// Whether occlusion queries are issued this frame.
///
/// Wireframe disables them unless the view is frozen or has a parent view,
/// which need stable query results.
pub fn is_occlusion_testing(
    occlusion_enabled: bool,
    wireframe: bool,
    frozen: bool,
    has_view_parent: bool,
) -> bool {
    occlusion_enabled && (!wireframe || frozen || has_view_parent)
}

/// The per-frame decisions that shape the pass graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PipelinePolicy {
    /// Whether the depth-only pre-pass draws occluders.
    pub use_depth_only_prepass: bool,
    /// How the G-buffer is cleared.
    pub clear_mode: ClearMode,
    /// Whether the G-buffer is resolved by a custom multi-target pass.
    pub requires_custom_gbuffer_resolve: bool,
}

impl PipelinePolicy {
    /// Resolves the policy of a frame.
    ///
    /// # Arguments
    ///
    /// * `config`: The frame's configuration snapshot.
    /// * `capabilities`: The platform capabilities.
    /// * `show_flags`: The family's show flags.
    /// * `gbuffer_sample_count`: MSAA sample count of the G-buffer.
    pub fn resolve(
        config: &RendererConfig,
        capabilities: &DeviceCapabilities,
        show_flags: ShowFlags,
        gbuffer_sample_count: u32,
    ) -> Self {
        let use_depth_only_prepass = resolve_depth_prepass(DepthPrepassInputs {
            supports_windowed_mode: capabilities.supports_windowed_mode,
            high_quality_lit: config.allow_high_quality_lightmaps
                && show_flags.contains(ShowFlags::LIGHTING),
            user_override: DepthPrepassOverride::from_config_value(
                config.depth_only_pass_override,
            ),
            requires_accurate_depth: show_flags.contains(ShowFlags::SHADER_COMPLEXITY),
        });

        let clear_mode = resolve_clear_mode(
            ClearMode::from_config_value(config.clear_scene_method),
            show_flags,
        );

        let requires_custom_gbuffer_resolve =
            capabilities.feature_level >= FeatureLevel::Sm5 && gbuffer_sample_count > 1;

        Self {
            use_depth_only_prepass,
            clear_mode,
            requires_custom_gbuffer_resolve,
        }
    }

    /// Order in which the base pass traverses static draw types.
    ///
    /// With a pre-pass, masked geometry goes first and benefits from exact
    /// depth. Without one, opaque geometry goes first and lays down occlusion
    /// for the more expensive masked pass.
    pub fn static_draw_order(&self) -> [DrawType; 2] {
        if self.use_depth_only_prepass {
            [DrawType::Masked, DrawType::Opaque]
        } else {
            [DrawType::Opaque, DrawType::Masked]
        }
    }

    /// Whether static lists are sorted front to back this frame.
    pub fn sorts_static_draw_lists(&self) -> bool {
        !self.use_depth_only_prepass
    }
}
