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

//! Recording doubles shared by the lane unit tests.

use umbra_core::{
    math::{BoundingSphere, Extent2D, IntRect, LinearRgba, Mat4, Vec3},
    renderer::{
        BlendState, ClearRequest, DepthPriorityGroup, DepthStencilState, DeviceCapabilities,
        DownsampleDepthParameters, GBufferTargetCount, MeshDrawCommand, MeshSource,
        PipelinePolicy, RasterizerState, ScreenQuad, TextureId, Viewport,
    },
    renderer::{CommandEncoder, SceneRenderTargets},
    scene::{MeshElement, PrimitiveDrawInterface, PrimitiveSceneProxy, Scene},
    view::BatchedElements,
    RendererConfig, SceneView, ViewFamily,
};

use super::PassContext;

/// Records every encoder call, both as a readable event and as typed data.
#[derive(Default)]
pub struct RecordingEncoder {
    pub events: Vec<String>,
    pub draws: Vec<MeshDrawCommand>,
    pub blend_states: Vec<BlendState>,
    pub depth_states: Vec<DepthStencilState>,
    pub rasterizer_states: Vec<RasterizerState>,
    pub viewports: Vec<Viewport>,
    pub clears: Vec<ClearRequest>,
    pub clear_quads: Vec<(f32, Vec<LinearRgba>)>,
    pub downsamples: Vec<(TextureId, DownsampleDepthParameters, ScreenQuad)>,
}

impl RecordingEncoder {
    pub fn sources(&self) -> Vec<MeshSource> {
        self.draws.iter().map(|d| d.source).collect()
    }

    pub fn groups(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| e.strip_prefix("push:"))
            .collect()
    }
}

impl CommandEncoder for RecordingEncoder {
    fn push_debug_group(&mut self, label: &str) {
        self.events.push(format!("push:{label}"));
    }

    fn pop_debug_group(&mut self) {
        self.events.push("pop".to_string());
    }

    fn set_blend_state(&mut self, state: BlendState) {
        self.events.push("blend".to_string());
        self.blend_states.push(state);
    }

    fn set_depth_stencil_state(&mut self, state: DepthStencilState) {
        self.events.push("depth".to_string());
        self.depth_states.push(state);
    }

    fn set_rasterizer_state(&mut self, state: RasterizerState) {
        self.events.push("raster".to_string());
        self.rasterizer_states.push(state);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.events.push("viewport".to_string());
        self.viewports.push(viewport);
    }

    fn clear(&mut self, request: &ClearRequest) {
        self.events.push("clear".to_string());
        self.clears.push(*request);
    }

    fn draw_mesh(&mut self, command: &MeshDrawCommand) {
        self.events.push(format!("draw:{}", command.view_index));
        self.draws.push(*command);
    }

    fn draw_batched_elements(
        &mut self,
        view_index: usize,
        group: DepthPriorityGroup,
        _elements: &BatchedElements,
    ) {
        self.events.push(format!("batched:{view_index}:{group:?}"));
    }

    fn draw_clear_quad(&mut self, depth: f32, colors: &[LinearRgba]) {
        self.events.push("clear_quad".to_string());
        self.clear_quads.push((depth, colors.to_vec()));
    }

    fn draw_downsample_depth(
        &mut self,
        source: TextureId,
        params: &DownsampleDepthParameters,
        quad: &ScreenQuad,
    ) {
        self.events.push("downsample".to_string());
        self.downsamples.push((source, *params, *quad));
    }
}

/// Scene render targets with configurable capabilities that log their calls.
pub struct RecordingTargets {
    pub events: Vec<String>,
    pub gbuffer_clears: Vec<LinearRgba>,
    pub target_count: GBufferTargetCount,
    pub downsized_occlusion: bool,
    pub downsample_factor: u32,
    pub buffer_size: Extent2D,
}

impl Default for RecordingTargets {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            gbuffer_clears: Vec::new(),
            target_count: GBufferTargetCount::Five,
            downsized_occlusion: true,
            downsample_factor: 2,
            buffer_size: Extent2D::new(1280, 720),
        }
    }
}

impl SceneRenderTargets for RecordingTargets {
    fn allocate(&mut self, family_size: Extent2D) {
        self.events
            .push(format!("allocate:{}x{}", family_size.width, family_size.height));
    }

    fn begin_rendering_prepass(&mut self) {
        self.events.push("begin_prepass".to_string());
    }

    fn finish_rendering_prepass(&mut self) {
        self.events.push("finish_prepass".to_string());
    }

    fn begin_rendering_scene_color(&mut self) {
        self.events.push("begin_scene_color".to_string());
    }

    fn clear_gbuffer_targets(&mut self, color: LinearRgba) {
        self.events.push("clear_gbuffer".to_string());
        self.gbuffer_clears.push(color);
    }

    fn gbuffer_target_count(&self) -> GBufferTargetCount {
        self.target_count
    }

    fn gbuffer_sample_count(&self) -> u32 {
        1
    }

    fn resolve_scene_color(&mut self, _rect: IntRect) {
        self.events.push("resolve_scene_color".to_string());
    }

    fn resolve_scene_depth(&mut self) {
        self.events.push("resolve_scene_depth".to_string());
    }

    fn resolve_scene_depth_to_auxiliary_texture(&mut self) {
        self.events.push("resolve_aux_depth".to_string());
    }

    fn begin_rendering_small_depth_surface(&mut self) {
        self.events.push("begin_small_depth".to_string());
    }

    fn use_downsized_occlusion_queries(&self) -> bool {
        self.downsized_occlusion
    }

    fn small_depth_downsample_factor(&self) -> u32 {
        self.downsample_factor
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

/// A primitive emitting a fixed list of elements.
pub struct TestPrimitive {
    pub bounds: BoundingSphere,
    pub movable: bool,
    pub occluder: bool,
    pub elements: Vec<MeshElement>,
}

impl TestPrimitive {
    /// A static occluder of radius `radius` at `origin` emitting one opaque element.
    pub fn occluder(origin: Vec3, radius: f32) -> Self {
        Self {
            bounds: BoundingSphere::new(origin, radius),
            movable: false,
            occluder: true,
            elements: vec![MeshElement::opaque(0)],
        }
    }
}

impl PrimitiveSceneProxy for TestPrimitive {
    fn bounds(&self) -> BoundingSphere {
        self.bounds
    }

    fn is_movable(&self) -> bool {
        self.movable
    }

    fn should_use_as_occluder(&self) -> bool {
        self.occluder
    }

    fn local_to_world(&self) -> Mat4 {
        Mat4::from_translation(self.bounds.origin)
    }

    fn draw_dynamic_elements(&self, pdi: &mut dyn PrimitiveDrawInterface, _view: &SceneView) {
        for element in &self.elements {
            pdi.draw_mesh(element);
        }
    }
}

/// The read-only inputs of a pass, owned so a [`PassContext`] can borrow them.
pub struct Fixture {
    pub family: ViewFamily,
    pub scene: Scene,
    pub policy: PipelinePolicy,
    pub config: RendererConfig,
    pub capabilities: DeviceCapabilities,
}

impl Fixture {
    pub fn new(family: ViewFamily) -> Self {
        Self {
            family,
            scene: Scene::new(),
            policy: PipelinePolicy::default(),
            config: RendererConfig::default(),
            capabilities: DeviceCapabilities::default(),
        }
    }

    pub fn context<'a>(
        &'a self,
        encoder: &'a mut RecordingEncoder,
        targets: &'a mut RecordingTargets,
    ) -> PassContext<'a> {
        PassContext {
            encoder,
            targets,
            family: &self.family,
            scene: &self.scene,
            policy: &self.policy,
            config: &self.config,
            capabilities: &self.capabilities,
        }
    }
}
