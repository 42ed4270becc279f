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

//! Dynamic primitives.
//!
//! A primitive proxy is the render-side view of a scene object that draws
//! itself every frame instead of living in a static draw list.

use crate::math::{BoundingSphere, Mat4};
use crate::view::SceneView;

/// Index of a primitive in the scene and in the per-view primitive maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub usize);

/// A mesh element emitted by a primitive or attached to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshElement {
    /// Index of the element within its owner.
    pub index: u32,
    /// Whether the element uses an alpha-masked material.
    pub masked: bool,
}

impl MeshElement {
    /// An opaque element.
    pub const fn opaque(index: u32) -> Self {
        Self {
            index,
            masked: false,
        }
    }

    /// A masked element.
    pub const fn masked(index: u32) -> Self {
        Self {
            index,
            masked: true,
        }
    }
}

/// Per-view relevance of a primitive, computed by visibility determination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrimitiveViewRelevance {
    /// The primitive has opaque (or masked) materials.
    pub opaque: bool,
    /// The primitive renders in the main pass rather than only in auxiliary passes.
    pub render_in_main_pass: bool,
}

impl PrimitiveViewRelevance {
    /// Relevance of a regular opaque primitive.
    pub const OPAQUE_MAIN_PASS: Self = Self {
        opaque: true,
        render_in_main_pass: true,
    };
}

/// Sink for the mesh elements a primitive emits while drawing itself.
pub trait PrimitiveDrawInterface {
    /// Draws one mesh element with the policy of the current pass.
    fn draw_mesh(&mut self, element: &MeshElement);
}

/// The render-side proxy of a dynamic primitive.
pub trait PrimitiveSceneProxy: Send + Sync {
    /// World-space bounding sphere.
    fn bounds(&self) -> BoundingSphere;

    /// Whether the primitive can move between frames.
    fn is_movable(&self) -> bool;

    /// Whether the primitive opts in as a depth-pass occluder.
    fn should_use_as_occluder(&self) -> bool;

    /// Current local-to-world transform.
    fn local_to_world(&self) -> Mat4;

    /// Emits the primitive's mesh elements for `view` into `pdi`.
    fn draw_dynamic_elements(&self, pdi: &mut dyn PrimitiveDrawInterface, view: &SceneView);
}
