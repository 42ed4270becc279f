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

//! Defines the DeferredShadingAgent, the orchestrator of a deferred frame.

use super::{FrameReport, RendererServices};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use umbra_core::{
    lane::Lane,
    math::Extent2D,
    renderer::{
        policy::is_occlusion_testing, ClearMode, CommandEncoder, DeviceCapabilities,
        FeatureLevel, PipelinePolicy, RenderError, SceneRenderTargets, ShowFlags,
    },
    scene::Scene,
    RendererConfig, ViewFamily,
};
use umbra_lanes::render_lane::{
    begin_view_group, end_view_group, sort_base_pass_static_data, BasePassLane,
    DepthPrepassLane, DownsampleDepthLane, GBufferClearLane, PassContext, RenderPassLane,
};

/// Size of the render-target pool overlay drawn at the end of a frame.
const TEXTURE_POOL_OVERLAY_SIZE: Extent2D = Extent2D::new(280, 140);

/// Tracks the G-buffer clear of a single frame.
///
/// Both clear points of the frame ask the state before clearing; only the point
/// matching the pending mode is granted the clear, and only once.
#[derive(Debug, Clone, Copy)]
struct ClearState {
    pending: ClearMode,
    executed: ClearMode,
}

impl ClearState {
    fn new(mode: ClearMode) -> Self {
        Self {
            pending: mode,
            executed: ClearMode::None,
        }
    }

    /// Returns `true` if the caller at clear point `mode` must clear now.
    fn take(&mut self, mode: ClearMode) -> bool {
        if mode == ClearMode::None || self.pending != mode {
            return false;
        }
        debug_assert_eq!(self.executed, ClearMode::None, "G-buffer cleared twice");
        self.pending = ClearMode::None;
        self.executed = mode;
        true
    }

    fn executed(&self) -> ClearMode {
        self.executed
    }
}

/// The agent that renders a view family with the deferred shading pipeline.
///
/// The agent owns the geometry lanes and walks the frame sequence: resource
/// setup, visibility, policy resolution, depth pre-pass, G-buffer clear, base
/// pass, resolves, occlusion, lighting, atmosphere, translucency and finishing.
pub struct DeferredShadingAgent {
    // Configuration snapshot shared with the frames that read it.
    config: Arc<RendererConfig>,
    // Platform capabilities, fixed for the session.
    capabilities: DeviceCapabilities,
    // Depth-only occluder pass.
    depth_prepass: DepthPrepassLane,
    // G-buffer population pass.
    base_pass: BasePassLane,
    // Hardware and far-plane quad clears.
    gbuffer_clear: GBufferClearLane,
    // Low-resolution depth for occlusion queries.
    downsample_depth: DownsampleDepthLane,
    // --- Frame statistics ---
    // Policy the last rendered frame used.
    last_policy: Option<PipelinePolicy>,
    // CPU duration of the last render() call.
    last_frame_time: Duration,
    // Total number of frames rendered since agent creation.
    frame_count: u64,
}

impl DeferredShadingAgent {
    /// Creates an agent with the default configuration.
    pub fn new(capabilities: DeviceCapabilities) -> Self {
        Self::with_config(capabilities, RendererConfig::default())
    }

    /// Creates an agent with an explicit configuration.
    pub fn with_config(capabilities: DeviceCapabilities, config: RendererConfig) -> Self {
        let agent = Self {
            config: Arc::new(config),
            capabilities,
            depth_prepass: DepthPrepassLane::new(),
            base_pass: BasePassLane::new(),
            gbuffer_clear: GBufferClearLane::new(),
            downsample_depth: DownsampleDepthLane::new(),
            last_policy: None,
            last_frame_time: Duration::ZERO,
            frame_count: 0,
        };
        log::info!(
            "DeferredShadingAgent created for {:?} with lanes [{}]",
            capabilities.feature_level,
            agent
                .lanes()
                .iter()
                .map(|l| l.strategy_name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        agent
    }

    /// Creates an agent whose configuration is loaded from a RON file.
    pub fn from_config_file(
        capabilities: DeviceCapabilities,
        path: impl AsRef<Path>,
    ) -> Result<Self, RenderError> {
        let config = RendererConfig::load(path)?;
        Ok(Self::with_config(capabilities, config))
    }

    /// Replaces the configuration. Takes effect at the next frame.
    pub fn update_config(&mut self, config: RendererConfig) {
        log::info!("DeferredShadingAgent: renderer config updated");
        self.config = Arc::new(config);
    }

    /// The current configuration snapshot.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// The platform capabilities.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    /// Number of frames rendered since creation.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// CPU duration of the last rendered frame.
    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }

    /// The policy of the last rendered frame, if any.
    pub fn last_policy(&self) -> Option<PipelinePolicy> {
        self.last_policy
    }

    /// The lanes owned by the agent, in the order the frame runs them.
    pub fn lanes(&self) -> Vec<&dyn Lane> {
        vec![
            &self.depth_prepass as &dyn Lane,
            &self.gbuffer_clear,
            &self.base_pass,
            &self.downsample_depth,
        ]
    }

    /// Renders one frame of `family`.
    ///
    /// Visibility results are written into the family's views, static draw
    /// lists are sorted when the policy asks for it, and the scene's atmosphere
    /// flags and motion-blur history are updated.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoViews`] if rendering is enabled and the family
    /// has no views. No work is issued in that case.
    pub fn render(
        &mut self,
        family: &mut ViewFamily,
        scene: &mut Scene,
        services: &mut RendererServices,
        encoder: &mut dyn CommandEncoder,
        targets: &mut dyn SceneRenderTargets,
    ) -> Result<FrameReport, RenderError> {
        let start = Instant::now();
        let flags = family.show_flags;

        if !flags.contains(ShowFlags::RENDERING) {
            log::trace!("DeferredShadingAgent: rendering disabled, frame skipped");
            return Ok(FrameReport::skipped());
        }
        if family.views.is_empty() {
            return Err(RenderError::NoViews);
        }

        let config = Arc::clone(&self.config);
        let caps = self.capabilities;
        let level = caps.feature_level;

        services.hooks.initialize_system_textures();
        targets.allocate(family.family_size);

        let mut results = services
            .visibility
            .compute_visibility(scene, family)
            .into_iter();
        for view in &mut family.views {
            view.visibility = results.next().unwrap_or_default();
        }
        let family: &ViewFamily = family;

        let policy = PipelinePolicy::resolve(&config, &caps, flags, targets.gbuffer_sample_count());
        log::debug!("DeferredShadingAgent: frame {} policy {:?}", self.frame_count, policy);
        let mut report = FrameReport::new(policy);

        sort_base_pass_static_data(
            &mut scene.base_pass_draw_lists,
            &policy,
            family.average_view_origin(),
        );

        let first = &family.views[0];
        let reprojecting =
            first.temporal_reprojection_phase && flags.contains(ShowFlags::TEMPORAL_REPROJECTION);
        report.occlusion_tested = is_occlusion_testing(
            config.occlusion_queries,
            flags.contains(ShowFlags::WIREFRAME),
            first.is_frozen(),
            first.has_view_parent(),
        );

        let mut clear_state = ClearState::new(policy.clear_mode);

        let mut light_shafts = {
            let mut ctx = PassContext {
                encoder: &mut *encoder,
                targets: &mut *targets,
                family,
                scene: &*scene,
                policy: &policy,
                config: &*config,
                capabilities: &caps,
            };

            services.hooks.commit_dynamic_buffers();
            if let Some(fx) = services.fx.as_mut() {
                fx.pre_render();
            }

            report.prepass_dirty = self.depth_prepass.render(&mut ctx);

            if clear_state.take(ClearMode::HardwareClear) {
                self.gbuffer_clear.clear_view(&mut ctx);
            }

            ctx.targets.begin_rendering_scene_color();

            if reprojecting {
                report.base_pass_skipped = true;
            } else if flags.contains(ShowFlags::LIGHT_MAP_DENSITY) && config.allow_debug_view_modes
            {
                report.base_pass_dirty = services
                    .lighting
                    .render_light_map_densities(&mut *ctx.encoder, &family.views);
            } else {
                report.base_pass_dirty = self.base_pass.render(&mut ctx);
            }

            if clear_state.take(ClearMode::FarPlaneQuadClear) {
                self.gbuffer_clear.clear_at_max_depth(&mut ctx);
            }
            report.executed_clear = clear_state.executed();

            if policy.requires_custom_gbuffer_resolve {
                services
                    .hooks
                    .render_custom_gbuffer_resolve(&mut *ctx.encoder, family);
                report.custom_gbuffer_resolve = true;
            } else {
                ctx.targets.resolve_scene_color(family.family_rect());
                ctx.targets.resolve_scene_depth();
            }
            if level >= FeatureLevel::Sm4 && !level.supports_depth_read_while_bound() {
                ctx.targets.resolve_scene_depth_to_auxiliary_texture();
            }

            services
                .hooks
                .render_custom_depth(&mut *ctx.encoder, &family.views);

            if let Some(fx) = services.fx.as_mut() {
                fx.post_render_opaque(
                    &family.views,
                    ctx.targets.scene_depth_texture(),
                    ctx.targets.gbuffer_a_texture(),
                );
            }

            report.downsampled_depth = self.downsample_depth.render(&mut ctx);

            services
                .hooks
                .render_post_opaque_extensions(&mut *ctx.encoder, &family.views);

            if report.occlusion_tested {
                services
                    .hooks
                    .begin_occlusion_tests(&mut *ctx.encoder, &family.views);
            }

            if flags.contains(ShowFlags::LIGHTING)
                && level.supports_deferred_lighting()
                && !reprojecting
            {
                render_lighting(&mut *ctx.encoder, services, family);
                report.lighting_rendered = true;
            }

            if flags.contains(ShowFlags::STATIONARY_LIGHT_OVERLAP) && level >= FeatureLevel::Sm4 {
                services
                    .lighting
                    .render_stationary_light_overlap(&mut *ctx.encoder, &family.views);
            }

            if flags.contains(ShowFlags::LIGHT_SHAFTS) {
                services
                    .atmosphere
                    .render_light_shaft_occlusion(&mut *ctx.encoder, family)
            } else {
                None
            }
        };
        report.light_shaft_produced = light_shafts.is_some();

        if services.atmosphere.should_render_atmosphere(family) {
            if let Some(fog) = scene.atmospheric_fog.as_mut() {
                fog.sync_light_shaft_mask(light_shafts.is_some());
                if scene.is_editor_scene {
                    services.atmosphere.precompute_atmosphere_textures(fog, family);
                }
                services
                    .atmosphere
                    .render_atmosphere(encoder, family, fog, light_shafts.as_ref());
            }
        }

        if services.atmosphere.should_render_fog(family) {
            services
                .atmosphere
                .render_fog(encoder, family, light_shafts.as_ref());
        }
        report.light_shaft_released = light_shafts.take().is_some();

        if flags.contains(ShowFlags::TRANSLUCENCY) {
            if flags.contains(ShowFlags::REFRACTION) {
                services
                    .translucency
                    .render_distortion(encoder, &family.views);
            }
            services
                .translucency
                .render_translucency(encoder, &family.views);
        }

        if flags.contains(ShowFlags::LIGHT_SHAFTS) {
            services.atmosphere.render_light_shaft_bloom(encoder, family);
        }

        if !policy.requires_custom_gbuffer_resolve {
            targets.resolve_scene_color(family.family_rect());
            report.final_scene_color_resolved = true;
        }

        for (view_index, view) in family.views.iter().enumerate() {
            let opened = begin_view_group(encoder, family, view_index);
            services
                .hooks
                .finish_render_view_target(encoder, view_index, view);
            end_view_group(encoder, opened);
        }

        render_finish(&config, family, scene, services, encoder);

        self.last_frame_time = start.elapsed();
        self.last_policy = Some(policy);
        self.frame_count += 1;
        log::trace!(
            "DeferredShadingAgent: frame {} encoded in {:?}",
            self.frame_count,
            self.last_frame_time
        );
        Ok(report)
    }
}

/// Ends the frame: pool overlay, family hook, then the motion blur history.
fn render_finish(
    config: &RendererConfig,
    family: &ViewFamily,
    scene: &mut Scene,
    services: &mut RendererServices,
    encoder: &mut dyn CommandEncoder,
) {
    if config.visualize_texture_pool {
        services
            .hooks
            .visualize_texture_pool(encoder, TEXTURE_POOL_OVERLAY_SIZE);
    }
    services.hooks.finish_family(encoder, family);
    if family.show_flags.contains(ShowFlags::MOTION_BLUR) {
        scene.update_motion_blur_cache();
    }
}

/// Runs the deferred lighting block.
///
/// The translucent volume is cleared before injection, and injection precedes
/// filtering.
fn render_lighting(
    encoder: &mut dyn CommandEncoder,
    services: &mut RendererServices,
    family: &ViewFamily,
) {
    let lighting = services.lighting.as_mut();
    for (view_index, view) in family.views.iter().enumerate() {
        let opened = begin_view_group(encoder, family, view_index);
        lighting.process_composition_lighting(encoder, view_index, view);
        end_view_group(encoder, opened);
    }

    lighting.clear_translucent_volume_lighting(encoder);
    if family.show_flags.contains(ShowFlags::DIRECT_LIGHTING) {
        lighting.render_lights(encoder, &family.views);
    }
    lighting.inject_ambient_cubemap_translucent_volume_lighting(encoder, &family.views);
    lighting.composite_indirect_translucent_volume_lighting(encoder, &family.views);
    lighting.filter_translucent_volume_lighting(encoder);
    lighting.render_deferred_reflections(encoder, &family.views);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_state_grants_only_the_pending_mode() {
        let mut state = ClearState::new(ClearMode::FarPlaneQuadClear);
        assert!(!state.take(ClearMode::HardwareClear));
        assert!(state.take(ClearMode::FarPlaneQuadClear));
        assert_eq!(state.executed(), ClearMode::FarPlaneQuadClear);
    }

    #[test]
    fn test_clear_state_clears_at_most_once() {
        let mut state = ClearState::new(ClearMode::HardwareClear);
        assert!(state.take(ClearMode::HardwareClear));
        assert!(!state.take(ClearMode::HardwareClear));
        assert!(!state.take(ClearMode::FarPlaneQuadClear));
        assert_eq!(state.executed(), ClearMode::HardwareClear);
    }

    #[test]
    fn test_clear_state_none_never_clears() {
        let mut state = ClearState::new(ClearMode::None);
        assert!(!state.take(ClearMode::None));
        assert!(!state.take(ClearMode::HardwareClear));
        assert!(!state.take(ClearMode::FarPlaneQuadClear));
        assert_eq!(state.executed(), ClearMode::None);
    }

    #[test]
    fn test_lanes_are_listed_in_frame_order() {
        let agent = DeferredShadingAgent::new(DeviceCapabilities::default());
        let names: Vec<_> = agent.lanes().iter().map(|l| l.strategy_name()).collect();
        assert_eq!(
            names,
            ["DepthPrepass", "GBufferClear", "DeferredBasePass", "DownsampleDepth"]
        );
        assert_eq!(agent.frame_count(), 0);
        assert!(agent.last_policy().is_none());
    }

    #[test]
    fn test_update_config_replaces_snapshot() {
        let mut agent = DeferredShadingAgent::new(DeviceCapabilities::default());
        agent.update_config(RendererConfig {
            clear_scene_method: 2,
            ..Default::default()
        });
        assert_eq!(agent.config().clear_scene_method, 2);
    }

    #[test]
    fn test_missing_config_file_is_a_config_error() {
        let result = DeferredShadingAgent::from_config_file(
            DeviceCapabilities::default(),
            "/definitely/not/here/renderer.ron",
        );
        assert!(matches!(result, Err(RenderError::Config(_))));
    }
}
