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

//! Render-side scene storage.
//!
//! The scene owns everything that persists across frames: the static draw
//! lists, the dynamic primitive proxies, the atmospheric fog component and the
//! motion-blur history. The frame passes only read it, except for re-sorting
//! the base-pass lists and refreshing the motion-blur cache.

pub mod atmosphere;
pub mod draw_list;
pub mod motion_blur;
pub mod primitive;
pub mod visibility;

pub use self::atmosphere::{AtmosphereRenderFlags, AtmosphericFog};
pub use self::draw_list::{
    BasePassDrawLists, DepthDrawLists, DrawList, DrawListKey, DrawType, LightingTechnique,
    StaticMeshBatch, StaticMeshId,
};
pub use self::motion_blur::MotionBlurCache;
pub use self::primitive::{
    MeshElement, PrimitiveDrawInterface, PrimitiveId, PrimitiveSceneProxy,
    PrimitiveViewRelevance,
};
pub use self::visibility::{ViewVisibility, VisibilityMap};

/// The render-side scene.
#[derive(Default)]
pub struct Scene {
    primitives: Vec<Box<dyn PrimitiveSceneProxy>>,
    /// The fourteen base-pass static lists.
    pub base_pass_draw_lists: BasePassDrawLists,
    /// The two depth-pass static lists.
    pub depth_draw_lists: DepthDrawLists,
    /// Atmospheric fog component, if the scene has one.
    pub atmospheric_fog: Option<AtmosphericFog>,
    /// Whether the scene is edited rather than played.
    pub is_editor_scene: bool,
    /// Transform history for motion blur.
    pub motion_blur_cache: MotionBlurCache,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dynamic primitive and returns its id.
    pub fn add_primitive(&mut self, proxy: Box<dyn PrimitiveSceneProxy>) -> PrimitiveId {
        self.primitives.push(proxy);
        PrimitiveId(self.primitives.len() - 1)
    }

    /// The primitive with `id`, if any.
    pub fn primitive(&self, id: PrimitiveId) -> Option<&dyn PrimitiveSceneProxy> {
        self.primitives.get(id.0).map(|p| p.as_ref())
    }

    /// Every primitive with its id.
    pub fn primitives(&self) -> impl Iterator<Item = (PrimitiveId, &dyn PrimitiveSceneProxy)> {
        self.primitives
            .iter()
            .enumerate()
            .map(|(i, p)| (PrimitiveId(i), p.as_ref()))
    }

    /// Number of primitives.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Snapshots every primitive's current transform into the motion-blur cache.
    pub fn update_motion_blur_cache(&mut self) {
        let transforms: Vec<_> = self
            .primitives
            .iter()
            .enumerate()
            .map(|(i, p)| (PrimitiveId(i), p.local_to_world()))
            .collect();
        self.motion_blur_cache.update(transforms);
    }
}
