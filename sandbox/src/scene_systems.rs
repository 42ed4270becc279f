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

//! Stand-in scene systems for the sandbox: distance-based visibility, and
//! lighting, atmosphere, translucency and finishing passes that only log.

use umbra_core::{
    math::{BoundingSphere, Extent2D, Mat4, Vec3},
    renderer::{
        AtmosphereRenderer, CommandEncoder, FrameHooks, LightShaftOutput, LightingRenderer,
        TextureId, TranslucencyRenderer, VisibilityProvider,
    },
    scene::{
        AtmosphericFog, DrawList, DrawType, MeshElement, PrimitiveDrawInterface,
        PrimitiveSceneProxy, PrimitiveViewRelevance, Scene, ViewVisibility, VisibilityMap,
    },
    SceneView, ViewFamily,
};

/// Marks everything within `max_distance` of a view as visible.
pub struct DistanceCulling {
    pub max_distance: f32,
}

impl DistanceCulling {
    fn mark_list(&self, list: &DrawList, view: &SceneView, map: &mut VisibilityMap) {
        for batch in list.batches() {
            let in_range = batch.origin.distance_squared(view.view_origin)
                <= self.max_distance * self.max_distance;
            map.set(batch.id.0, in_range);
        }
    }
}

impl VisibilityProvider for DistanceCulling {
    fn compute_visibility(&mut self, scene: &Scene, family: &ViewFamily) -> Vec<ViewVisibility> {
        family
            .views
            .iter()
            .map(|view| {
                let mut visibility = ViewVisibility::default();
                for draw_type in DrawType::ALL {
                    for list in scene.base_pass_draw_lists.lists_of(draw_type) {
                        self.mark_list(list, view, &mut visibility.static_mesh_visibility);
                    }
                }
                let depth = &scene.depth_draw_lists;
                self.mark_list(&depth.position_only, view, &mut visibility.static_mesh_occluders);
                self.mark_list(&depth.depth, view, &mut visibility.static_mesh_occluders);

                for (id, proxy) in scene.primitives() {
                    let bounds = proxy.bounds();
                    let reach = self.max_distance + bounds.radius;
                    if bounds.origin.distance_squared(view.view_origin) <= reach * reach {
                        visibility.add_dynamic_primitive(id, PrimitiveViewRelevance::OPAQUE_MAIN_PASS);
                    }
                }
                log::debug!(
                    "Visibility: {} static, {} dynamic",
                    visibility.static_mesh_visibility.count_visible(),
                    visibility.visible_dynamic_primitives.len()
                );
                visibility
            })
            .collect()
    }
}

/// A movable crate made of an opaque body and a masked decal.
pub struct MovableCrate {
    pub position: Vec3,
}

impl PrimitiveSceneProxy for MovableCrate {
    fn bounds(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, 1.5)
    }

    fn is_movable(&self) -> bool {
        true
    }

    fn should_use_as_occluder(&self) -> bool {
        true
    }

    fn local_to_world(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    fn draw_dynamic_elements(&self, pdi: &mut dyn PrimitiveDrawInterface, _view: &SceneView) {
        pdi.draw_mesh(&MeshElement::opaque(0));
        pdi.draw_mesh(&MeshElement::masked(1));
    }
}

pub struct LoggingLighting;

impl LightingRenderer for LoggingLighting {
    fn process_composition_lighting(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        view_index: usize,
        _view: &SceneView,
    ) {
        log::debug!("lighting: composition for view {view_index}");
    }

    fn clear_translucent_volume_lighting(&mut self, _encoder: &mut dyn CommandEncoder) {
        log::debug!("lighting: clear translucent volume");
    }

    fn render_lights(&mut self, _encoder: &mut dyn CommandEncoder, views: &[SceneView]) {
        log::debug!("lighting: direct lights for {} view(s)", views.len());
    }

    fn inject_ambient_cubemap_translucent_volume_lighting(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _views: &[SceneView],
    ) {
        log::debug!("lighting: inject ambient cubemap");
    }

    fn composite_indirect_translucent_volume_lighting(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _views: &[SceneView],
    ) {
        log::debug!("lighting: composite indirect");
    }

    fn filter_translucent_volume_lighting(&mut self, _encoder: &mut dyn CommandEncoder) {
        log::debug!("lighting: filter translucent volume");
    }

    fn render_deferred_reflections(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {
        log::debug!("lighting: reflections");
    }

    fn render_stationary_light_overlap(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _views: &[SceneView],
    ) {
        log::debug!("lighting: stationary light overlap");
    }

    fn render_light_map_densities(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _views: &[SceneView],
    ) -> bool {
        log::debug!("lighting: lightmap density");
        true
    }
}

pub struct LoggingAtmosphere;

impl AtmosphereRenderer for LoggingAtmosphere {
    fn render_light_shaft_occlusion(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _family: &ViewFamily,
    ) -> Option<LightShaftOutput> {
        Some(LightShaftOutput {
            occlusion_mask: TextureId(3),
        })
    }

    fn precompute_atmosphere_textures(&mut self, _fog: &AtmosphericFog, _family: &ViewFamily) {
        log::debug!("atmosphere: precompute textures");
    }

    fn render_atmosphere(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _family: &ViewFamily,
        fog: &AtmosphericFog,
        light_shafts: Option<&LightShaftOutput>,
    ) {
        log::debug!(
            "atmosphere: flags {:?}, light shafts {:?}",
            fog.render_flags,
            light_shafts
        );
    }

    fn render_fog(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _family: &ViewFamily,
        light_shafts: Option<&LightShaftOutput>,
    ) {
        log::debug!("fog: light shafts {light_shafts:?}");
    }

    fn render_light_shaft_bloom(&mut self, _encoder: &mut dyn CommandEncoder, _family: &ViewFamily) {
        log::debug!("light shaft bloom");
    }
}

pub struct LoggingTranslucency;

impl TranslucencyRenderer for LoggingTranslucency {
    fn render_distortion(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {
        log::debug!("translucency: distortion");
    }

    fn render_translucency(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {
        log::debug!("translucency: translucent geometry");
    }
}

pub struct LoggingHooks;

impl FrameHooks for LoggingHooks {
    fn initialize_system_textures(&mut self) {}

    fn commit_dynamic_buffers(&mut self) {}

    fn render_custom_gbuffer_resolve(&mut self, _encoder: &mut dyn CommandEncoder, _family: &ViewFamily) {
        log::debug!("hooks: custom G-buffer resolve");
    }

    fn render_custom_depth(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {}

    fn render_post_opaque_extensions(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {}

    fn begin_occlusion_tests(&mut self, _encoder: &mut dyn CommandEncoder, views: &[SceneView]) {
        log::debug!("hooks: occlusion queries for {} view(s)", views.len());
    }

    fn finish_render_view_target(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        view_index: usize,
        _view: &SceneView,
    ) {
        log::debug!("hooks: finish view {view_index}");
    }

    fn visualize_texture_pool(&mut self, _encoder: &mut dyn CommandEncoder, size: Extent2D) {
        log::debug!("hooks: texture pool overlay {}x{}", size.width, size.height);
    }

    fn finish_family(&mut self, _encoder: &mut dyn CommandEncoder, _family: &ViewFamily) {}
}
