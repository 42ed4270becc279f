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

//! Collaborators invoked at fixed points of the frame.
//!
//! The orchestrator never looks inside these systems. It calls each entry point
//! exactly where the frame sequence requires it and hands over the data that
//! entry point needs.

use super::CommandEncoder;
use crate::math::Extent2D;
use crate::renderer::api::TextureId;
use crate::renderer::ShowFlags;
use crate::scene::{AtmosphericFog, Scene, ViewVisibility};
use crate::view::{SceneView, ViewFamily};

/// The light-shaft occlusion mask.
///
/// Produced once per frame by [`AtmosphereRenderer::render_light_shaft_occlusion`],
/// lent to the atmosphere and fog passes, then dropped.
#[derive(Debug, PartialEq, Eq)]
pub struct LightShaftOutput {
    /// Texture holding the occlusion mask.
    pub occlusion_mask: TextureId,
}

/// Determines what each view can see.
pub trait VisibilityProvider {
    /// Computes one [`ViewVisibility`] per view of `family`, in view order.
    ///
    /// Missing entries are treated as empty results.
    fn compute_visibility(&mut self, scene: &Scene, family: &ViewFamily) -> Vec<ViewVisibility>;
}

/// Particle and effect simulation that needs to know about frame progress.
pub trait FxSystem {
    /// A new frame's rendering is starting.
    fn pre_render(&mut self);

    /// Opaque geometry and a valid depth buffer exist.
    fn post_render_opaque(
        &mut self,
        views: &[SceneView],
        scene_depth: TextureId,
        gbuffer_a: TextureId,
    );
}

/// Deferred lighting entry points.
pub trait LightingRenderer {
    /// Ambient cubemaps, ambient occlusion and deferred decals for one view.
    fn process_composition_lighting(
        &mut self,
        encoder: &mut dyn CommandEncoder,
        view_index: usize,
        view: &SceneView,
    );

    /// Clears the translucent lighting volume.
    fn clear_translucent_volume_lighting(&mut self, encoder: &mut dyn CommandEncoder);

    /// Renders direct lighting.
    fn render_lights(&mut self, encoder: &mut dyn CommandEncoder, views: &[SceneView]);

    /// Injects ambient cubemap lighting into the translucent volume.
    fn inject_ambient_cubemap_translucent_volume_lighting(
        &mut self,
        encoder: &mut dyn CommandEncoder,
        views: &[SceneView],
    );

    /// Composites indirect lighting into the translucent volume.
    fn composite_indirect_translucent_volume_lighting(
        &mut self,
        encoder: &mut dyn CommandEncoder,
        views: &[SceneView],
    );

    /// Filters the translucent volume.
    fn filter_translucent_volume_lighting(&mut self, encoder: &mut dyn CommandEncoder);

    /// Reflections that only touch opaque pixels.
    fn render_deferred_reflections(&mut self, encoder: &mut dyn CommandEncoder, views: &[SceneView]);

    /// Stationary-light overlap debug view.
    fn render_stationary_light_overlap(
        &mut self,
        encoder: &mut dyn CommandEncoder,
        views: &[SceneView],
    );

    /// Lightmap-density debug view, replacing the base pass. Returns whether anything drew.
    fn render_light_map_densities(
        &mut self,
        encoder: &mut dyn CommandEncoder,
        views: &[SceneView],
    ) -> bool;
}

/// Light shafts, atmosphere and fog.
pub trait AtmosphereRenderer {
    /// Renders light-shaft occlusion. Returns the mask if one was produced.
    fn render_light_shaft_occlusion(
        &mut self,
        encoder: &mut dyn CommandEncoder,
        family: &ViewFamily,
    ) -> Option<LightShaftOutput>;

    /// Whether the atmosphere pass should run for `family`.
    fn should_render_atmosphere(&self, family: &ViewFamily) -> bool {
        family.show_flags.contains(ShowFlags::ATMOSPHERIC_FOG)
    }

    /// Precomputes atmosphere lookup textures (editor scenes only).
    fn precompute_atmosphere_textures(&mut self, fog: &AtmosphericFog, family: &ViewFamily);

    /// Renders the atmosphere.
    fn render_atmosphere(
        &mut self,
        encoder: &mut dyn CommandEncoder,
        family: &ViewFamily,
        fog: &AtmosphericFog,
        light_shafts: Option<&LightShaftOutput>,
    );

    /// Whether the fog pass should run for `family`.
    fn should_render_fog(&self, family: &ViewFamily) -> bool {
        family.show_flags.contains(ShowFlags::FOG)
    }

    /// Renders height fog.
    fn render_fog(
        &mut self,
        encoder: &mut dyn CommandEncoder,
        family: &ViewFamily,
        light_shafts: Option<&LightShaftOutput>,
    );

    /// Renders light-shaft bloom.
    fn render_light_shaft_bloom(&mut self, encoder: &mut dyn CommandEncoder, family: &ViewFamily);
}

/// Refraction and translucent geometry.
pub trait TranslucencyRenderer {
    /// Renders distortion (refraction).
    fn render_distortion(&mut self, encoder: &mut dyn CommandEncoder, views: &[SceneView]);

    /// Renders translucent geometry.
    fn render_translucency(&mut self, encoder: &mut dyn CommandEncoder, views: &[SceneView]);
}

/// The remaining fixed invocation points of the frame.
pub trait FrameHooks {
    /// Makes sure the shared system textures exist.
    fn initialize_system_textures(&mut self);

    /// Flushes deferred dynamic vertex and index buffer writes.
    fn commit_dynamic_buffers(&mut self);

    /// Resolves a multi-sampled G-buffer with a custom multi-target pass.
    fn render_custom_gbuffer_resolve(&mut self, encoder: &mut dyn CommandEncoder, family: &ViewFamily);

    /// Renders custom depth for downstream effects.
    fn render_custom_depth(&mut self, encoder: &mut dyn CommandEncoder, views: &[SceneView]);

    /// Post-opaque extension point.
    fn render_post_opaque_extensions(&mut self, encoder: &mut dyn CommandEncoder, views: &[SceneView]);

    /// Issues occlusion queries.
    fn begin_occlusion_tests(&mut self, encoder: &mut dyn CommandEncoder, views: &[SceneView]);

    /// Finalizes one view into its target (tone mapping, post processing).
    fn finish_render_view_target(
        &mut self,
        encoder: &mut dyn CommandEncoder,
        view_index: usize,
        view: &SceneView,
    );

    /// Draws the render-target pool overlay in a `size` region.
    fn visualize_texture_pool(&mut self, encoder: &mut dyn CommandEncoder, size: Extent2D);

    /// Shared end-of-frame work.
    fn finish_family(&mut self, encoder: &mut dyn CommandEncoder, family: &ViewFamily);
}
