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

//! Shared recording collaborators for the agent integration tests.
//!
//! Every mock appends to one shared event log, so the interleaving of encoder,
//! render-target and collaborator calls can be asserted on.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use umbra_agents::render_agent::{DeferredShadingAgent, FrameReport, RendererServices};
use umbra_core::{
    math::{Extent2D, IntRect, LinearRgba, Vec3},
    renderer::{
        AtmosphereRenderer, BlendState, ClearRequest, CommandEncoder, DepthPriorityGroup,
        DepthStencilState, DownsampleDepthParameters, DrawingPolicy, FrameHooks, FxSystem,
        GBufferTargetCount, LightShaftOutput, LightingRenderer, MeshDrawCommand, MeshSource,
        RasterizerState, RenderError, SceneRenderTargets, ScreenQuad, ShowFlags, TextureId,
        TranslucencyRenderer, Viewport, VisibilityProvider,
    },
    scene::{
        AtmosphericFog, DrawListKey, DrawType, LightingTechnique, Scene, StaticMeshBatch,
        StaticMeshId, ViewVisibility, VisibilityMap,
    },
    view::BatchedElements,
    SceneView, ViewFamily,
};

pub type EventLog = Rc<RefCell<Vec<String>>>;

fn record(log: &EventLog, event: impl Into<String>) {
    log.borrow_mut().push(event.into());
}

/// Installs a test logger so agent logs show up with `--nocapture`.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Device doubles
// ─────────────────────────────────────────────────────────────────────────────

/// Records encoder calls into the shared log, and keeps the typed data.
pub struct MockEncoder {
    log: EventLog,
    pub draws: Vec<MeshDrawCommand>,
    pub blend_states: Vec<BlendState>,
    pub depth_states: Vec<DepthStencilState>,
}

fn describe_source(source: &MeshSource) -> String {
    match source {
        MeshSource::Static {
            list: DrawListKey::BasePass { draw_type, .. },
            mesh,
        } => format!("{}:{}", draw_type.label(), mesh.0),
        MeshSource::Static {
            list: DrawListKey::PositionOnlyDepth,
            mesh,
        } => format!("PositionOnly:{}", mesh.0),
        MeshSource::Static {
            list: DrawListKey::Depth,
            mesh,
        } => format!("Depth:{}", mesh.0),
        MeshSource::Dynamic { primitive, .. } => format!("Dynamic:{}", primitive.0),
        MeshSource::ViewElement { group, .. } => format!("Element:{group:?}"),
    }
}

impl MockEncoder {
    /// Base-pass static draws, as `Opaque:{id}` / `Masked:{id}` labels.
    pub fn base_pass_draws(&self) -> Vec<String> {
        self.draws
            .iter()
            .filter(|d| d.policy == DrawingPolicy::BasePass)
            .map(|d| describe_source(&d.source))
            .collect()
    }

    /// Number of draws issued by the depth pre-pass.
    pub fn depth_draw_count(&self) -> usize {
        self.draws
            .iter()
            .filter(|d| d.policy != DrawingPolicy::BasePass)
            .count()
    }
}

impl CommandEncoder for MockEncoder {
    fn push_debug_group(&mut self, label: &str) {
        record(&self.log, format!("push:{label}"));
    }

    fn pop_debug_group(&mut self) {
        record(&self.log, "pop");
    }

    fn set_blend_state(&mut self, state: BlendState) {
        self.blend_states.push(state);
    }

    fn set_depth_stencil_state(&mut self, state: DepthStencilState) {
        self.depth_states.push(state);
    }

    fn set_rasterizer_state(&mut self, _state: RasterizerState) {}

    fn set_viewport(&mut self, _viewport: Viewport) {}

    fn clear(&mut self, _request: &ClearRequest) {
        record(&self.log, "clear_depth");
    }

    fn draw_mesh(&mut self, command: &MeshDrawCommand) {
        record(&self.log, format!("draw:{}", describe_source(&command.source)));
        self.draws.push(*command);
    }

    fn draw_batched_elements(
        &mut self,
        view_index: usize,
        group: DepthPriorityGroup,
        _elements: &BatchedElements,
    ) {
        record(&self.log, format!("batched:{view_index}:{group:?}"));
    }

    fn draw_clear_quad(&mut self, _depth: f32, _colors: &[LinearRgba]) {
        record(&self.log, "clear_quad");
    }

    fn draw_downsample_depth(
        &mut self,
        _source: TextureId,
        _params: &DownsampleDepthParameters,
        _quad: &ScreenQuad,
    ) {
        record(&self.log, "downsample");
    }
}

/// Scene render targets logging into the shared log.
pub struct MockTargets {
    log: EventLog,
    pub sample_count: u32,
    pub downsized_occlusion: bool,
    pub resolved_rects: Vec<IntRect>,
}

impl SceneRenderTargets for MockTargets {
    fn allocate(&mut self, family_size: Extent2D) {
        record(
            &self.log,
            format!("allocate:{}x{}", family_size.width, family_size.height),
        );
    }

    fn begin_rendering_prepass(&mut self) {
        record(&self.log, "begin_prepass");
    }

    fn finish_rendering_prepass(&mut self) {
        record(&self.log, "finish_prepass");
    }

    fn begin_rendering_scene_color(&mut self) {
        record(&self.log, "begin_scene_color");
    }

    fn clear_gbuffer_targets(&mut self, _color: LinearRgba) {
        record(&self.log, "clear_gbuffer");
    }

    fn gbuffer_target_count(&self) -> GBufferTargetCount {
        GBufferTargetCount::Five
    }

    fn gbuffer_sample_count(&self) -> u32 {
        self.sample_count
    }

    fn resolve_scene_color(&mut self, rect: IntRect) {
        record(&self.log, "resolve_scene_color");
        self.resolved_rects.push(rect);
    }

    fn resolve_scene_depth(&mut self) {
        record(&self.log, "resolve_scene_depth");
    }

    fn resolve_scene_depth_to_auxiliary_texture(&mut self) {
        record(&self.log, "resolve_aux_depth");
    }

    fn begin_rendering_small_depth_surface(&mut self) {
        record(&self.log, "begin_small_depth");
    }

    fn use_downsized_occlusion_queries(&self) -> bool {
        self.downsized_occlusion
    }

    fn small_depth_downsample_factor(&self) -> u32 {
        2
    }

    fn buffer_size(&self) -> Extent2D {
        Extent2D::new(1280, 720)
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

// ─────────────────────────────────────────────────────────────────────────────
// Collaborator doubles
// ─────────────────────────────────────────────────────────────────────────────

/// Marks every static batch and primitive below `visible_count` as visible.
struct MockVisibility {
    log: EventLog,
    visible_count: usize,
}

impl VisibilityProvider for MockVisibility {
    fn compute_visibility(&mut self, _scene: &Scene, family: &ViewFamily) -> Vec<ViewVisibility> {
        record(&self.log, "visibility");
        let visible = VisibilityMap::from_visible(0..self.visible_count);
        family
            .views
            .iter()
            .map(|_| ViewVisibility {
                static_mesh_visibility: visible.clone(),
                static_mesh_occluders: visible.clone(),
                ..Default::default()
            })
            .collect()
    }
}

struct MockFx {
    log: EventLog,
}

impl FxSystem for MockFx {
    fn pre_render(&mut self) {
        record(&self.log, "fx_pre_render");
    }

    fn post_render_opaque(
        &mut self,
        _views: &[SceneView],
        scene_depth: TextureId,
        gbuffer_a: TextureId,
    ) {
        record(
            &self.log,
            format!("fx_post_render_opaque:{}:{}", scene_depth.0, gbuffer_a.0),
        );
    }
}

struct MockLighting {
    log: EventLog,
    density_dirty: bool,
}

impl LightingRenderer for MockLighting {
    fn process_composition_lighting(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        view_index: usize,
        _view: &SceneView,
    ) {
        record(&self.log, format!("composition:{view_index}"));
    }

    fn clear_translucent_volume_lighting(&mut self, _encoder: &mut dyn CommandEncoder) {
        record(&self.log, "clear_translucent_volume");
    }

    fn render_lights(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {
        record(&self.log, "render_lights");
    }

    fn inject_ambient_cubemap_translucent_volume_lighting(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _views: &[SceneView],
    ) {
        record(&self.log, "inject_ambient");
    }

    fn composite_indirect_translucent_volume_lighting(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _views: &[SceneView],
    ) {
        record(&self.log, "composite_indirect");
    }

    fn filter_translucent_volume_lighting(&mut self, _encoder: &mut dyn CommandEncoder) {
        record(&self.log, "filter_translucent_volume");
    }

    fn render_deferred_reflections(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {
        record(&self.log, "reflections");
    }

    fn render_stationary_light_overlap(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _views: &[SceneView],
    ) {
        record(&self.log, "stationary_overlap");
    }

    fn render_light_map_densities(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _views: &[SceneView],
    ) -> bool {
        record(&self.log, "light_map_density");
        self.density_dirty
    }
}

struct MockAtmosphere {
    log: EventLog,
    produces_light_shafts: bool,
}

impl AtmosphereRenderer for MockAtmosphere {
    fn render_light_shaft_occlusion(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _family: &ViewFamily,
    ) -> Option<LightShaftOutput> {
        record(&self.log, "light_shaft_occlusion");
        self.produces_light_shafts.then_some(LightShaftOutput {
            occlusion_mask: TextureId(7),
        })
    }

    fn precompute_atmosphere_textures(&mut self, _fog: &AtmosphericFog, _family: &ViewFamily) {
        record(&self.log, "precompute_atmosphere");
    }

    fn render_atmosphere(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _family: &ViewFamily,
        _fog: &AtmosphericFog,
        light_shafts: Option<&LightShaftOutput>,
    ) {
        record(&self.log, format!("atmosphere:{}", light_shafts.is_some()));
    }

    fn render_fog(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        _family: &ViewFamily,
        light_shafts: Option<&LightShaftOutput>,
    ) {
        record(&self.log, format!("fog:{}", light_shafts.is_some()));
    }

    fn render_light_shaft_bloom(&mut self, _encoder: &mut dyn CommandEncoder, _family: &ViewFamily) {
        record(&self.log, "light_shaft_bloom");
    }
}

struct MockTranslucency {
    log: EventLog,
}

impl TranslucencyRenderer for MockTranslucency {
    fn render_distortion(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {
        record(&self.log, "distortion");
    }

    fn render_translucency(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {
        record(&self.log, "translucency");
    }
}

struct MockHooks {
    log: EventLog,
}

impl FrameHooks for MockHooks {
    fn initialize_system_textures(&mut self) {
        record(&self.log, "init_system_textures");
    }

    fn commit_dynamic_buffers(&mut self) {
        record(&self.log, "commit_dynamic_buffers");
    }

    fn render_custom_gbuffer_resolve(&mut self, _encoder: &mut dyn CommandEncoder, _family: &ViewFamily) {
        record(&self.log, "custom_gbuffer_resolve");
    }

    fn render_custom_depth(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {
        record(&self.log, "custom_depth");
    }

    fn render_post_opaque_extensions(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {
        record(&self.log, "post_opaque_extensions");
    }

    fn begin_occlusion_tests(&mut self, _encoder: &mut dyn CommandEncoder, _views: &[SceneView]) {
        record(&self.log, "occlusion_tests");
    }

    fn finish_render_view_target(
        &mut self,
        _encoder: &mut dyn CommandEncoder,
        view_index: usize,
        _view: &SceneView,
    ) {
        record(&self.log, format!("finish_view:{view_index}"));
    }

    fn visualize_texture_pool(&mut self, _encoder: &mut dyn CommandEncoder, size: Extent2D) {
        record(&self.log, format!("texture_pool:{}x{}", size.width, size.height));
    }

    fn finish_family(&mut self, _encoder: &mut dyn CommandEncoder, _family: &ViewFamily) {
        record(&self.log, "finish_family");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Harness
// ─────────────────────────────────────────────────────────────────────────────

/// Behaviour knobs of the recording collaborators.
#[derive(Debug, Clone, Copy)]
pub struct HarnessOptions {
    pub with_fx: bool,
    pub produces_light_shafts: bool,
    pub density_dirty: bool,
    pub gbuffer_sample_count: u32,
    pub downsized_occlusion: bool,
    pub visible_count: usize,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            with_fx: false,
            produces_light_shafts: true,
            density_dirty: true,
            gbuffer_sample_count: 1,
            downsized_occlusion: true,
            visible_count: 16,
        }
    }
}

/// Bundles the recording collaborators and the device doubles of one test.
pub struct Harness {
    log: EventLog,
    pub services: RendererServices,
    pub encoder: MockEncoder,
    pub targets: MockTargets,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_options(HarnessOptions::default())
    }

    pub fn with_options(options: HarnessOptions) -> Self {
        init_logger();
        let log = EventLog::default();
        let mut services = RendererServices::new(
            Box::new(MockVisibility {
                log: log.clone(),
                visible_count: options.visible_count,
            }),
            Box::new(MockLighting {
                log: log.clone(),
                density_dirty: options.density_dirty,
            }),
            Box::new(MockAtmosphere {
                log: log.clone(),
                produces_light_shafts: options.produces_light_shafts,
            }),
            Box::new(MockTranslucency { log: log.clone() }),
            Box::new(MockHooks { log: log.clone() }),
        );
        if options.with_fx {
            services = services.with_fx(Box::new(MockFx { log: log.clone() }));
        }
        Self {
            encoder: MockEncoder {
                log: log.clone(),
                draws: Vec::new(),
                blend_states: Vec::new(),
                depth_states: Vec::new(),
            },
            targets: MockTargets {
                log: log.clone(),
                sample_count: options.gbuffer_sample_count,
                downsized_occlusion: options.downsized_occlusion,
                resolved_rects: Vec::new(),
            },
            services,
            log,
        }
    }

    pub fn render(
        &mut self,
        agent: &mut DeferredShadingAgent,
        family: &mut ViewFamily,
        scene: &mut Scene,
    ) -> Result<FrameReport, RenderError> {
        agent.render(
            family,
            scene,
            &mut self.services,
            &mut self.encoder,
            &mut self.targets,
        )
    }

    pub fn events(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.log.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.count(event) > 0
    }

    /// Index of the first occurrence of `event`. Panics if it never happened.
    pub fn position(&self, event: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .position(|e| e == event)
            .unwrap_or_else(|| panic!("event '{event}' not recorded in {:?}", self.events()))
    }

    /// Index of the last occurrence of `event`. Panics if it never happened.
    pub fn last_position(&self, event: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .rposition(|e| e == event)
            .unwrap_or_else(|| panic!("event '{event}' not recorded in {:?}", self.events()))
    }

    /// Asserts that `events` were all recorded, in this order.
    pub fn assert_order(&self, events: &[&str]) {
        let positions: Vec<usize> = events.iter().map(|e| self.position(e)).collect();
        for (pair, names) in positions.windows(2).zip(events.windows(2)) {
            assert!(
                pair[0] < pair[1],
                "'{}' must precede '{}' in {:?}",
                names[0],
                names[1],
                self.events()
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scene and view builders
// ─────────────────────────────────────────────────────────────────────────────

pub const FAMILY_SIZE: Extent2D = Extent2D::new(1280, 720);

/// A single-view family with `flags`.
pub fn single_view_family(flags: ShowFlags) -> ViewFamily {
    ViewFamily::new(FAMILY_SIZE, flags).with_view(SceneView::new(IntRect::from_extent(FAMILY_SIZE)))
}

/// A split-screen family with `flags`.
pub fn split_screen_family(flags: ShowFlags) -> ViewFamily {
    ViewFamily::new(FAMILY_SIZE, flags)
        .with_view(SceneView::new(IntRect::new(0, 0, 640, 720)))
        .with_view(SceneView::new(IntRect::new(640, 0, 1280, 720)))
}

fn batch(id: usize, distance: f32) -> StaticMeshBatch {
    StaticMeshBatch {
        id: StaticMeshId(id),
        origin: Vec3::new(0.0, 0.0, distance),
    }
}

/// A scene with two opaque batches (far then near), one masked batch and one
/// position-only occluder, plus an atmospheric fog component.
pub fn test_scene() -> Scene {
    let mut scene = Scene::new();
    let lists = &mut scene.base_pass_draw_lists;
    let opaque = lists.get_mut(LightingTechnique::NoLightMap, DrawType::Opaque);
    opaque.add(batch(0, 50.0));
    opaque.add(batch(1, 5.0));
    lists
        .get_mut(LightingTechnique::NoLightMap, DrawType::Masked)
        .add(batch(2, 20.0));
    scene.depth_draw_lists.position_only.add(batch(3, 10.0));
    scene.atmospheric_fog = Some(AtmosphericFog::default());
    scene
}

/// Ids of the opaque no-lightmap batches, in list order.
pub fn opaque_batch_order(scene: &Scene) -> Vec<usize> {
    scene
        .base_pass_draw_lists
        .get(LightingTechnique::NoLightMap, DrawType::Opaque)
        .batches()
        .iter()
        .map(|b| b.id.0)
        .collect()
}
