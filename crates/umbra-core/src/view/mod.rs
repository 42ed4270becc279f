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

//! Views and view families.
//!
//! A [`SceneView`] is one camera into the scene for the current frame. A
//! [`ViewFamily`] is the ordered set of views rendered together (for example
//! split-screen) with the show flags they share.

use crate::math::{Extent2D, IntRect, LinearRgba, Mat4, Vec3};
use crate::renderer::ShowFlags;
use crate::scene::{MeshElement, ViewVisibility};

/// Persistent per-view state that outlives a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Visibility is frozen for debugging.
    pub is_frozen: bool,
    /// The view is a child of another view (e.g. a scene capture).
    pub has_view_parent: bool,
}

/// Batched simple elements (lines, points, sprites) of one priority group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchedElements {
    /// Number of batched lines.
    pub lines: u32,
    /// Number of batched sprites.
    pub sprites: u32,
}

impl BatchedElements {
    /// Whether there is anything to draw.
    pub fn has_primitives(&self) -> bool {
        self.lines > 0 || self.sprites > 0
    }
}

/// Editor and debug elements attached to a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewElements {
    /// Mesh elements of the world priority group.
    pub world_meshes: Vec<MeshElement>,
    /// Batched elements of the world priority group.
    pub world_batched: BatchedElements,
    /// Mesh elements of the foreground priority group.
    pub foreground_meshes: Vec<MeshElement>,
    /// Batched elements of the foreground priority group.
    pub foreground_batched: BatchedElements,
}

/// One camera into the scene for the current frame.
#[derive(Debug, Clone)]
pub struct SceneView {
    /// Pixel rectangle of the view within the family.
    pub rect: IntRect,
    /// World-space camera position.
    pub view_origin: Vec3,
    /// Projection matrix (reversed depth).
    pub projection: Mat4,
    /// Scale applied to distances for LOD and occluder screen-size tests.
    pub lod_distance_factor: f32,
    /// Color of pixels no geometry covers.
    pub background_color: LinearRgba,
    /// Persistent state, absent for transient views.
    pub state: Option<ViewState>,
    /// This frame is a temporal-reprojection phase reusing a history buffer.
    pub temporal_reprojection_phase: bool,
    /// Editor and debug elements.
    pub elements: ViewElements,
    /// Visibility of this frame, filled by the visibility collaborator.
    pub visibility: ViewVisibility,
}

impl SceneView {
    /// Creates a view covering `rect` with an identity projection at the origin.
    pub fn new(rect: IntRect) -> Self {
        Self {
            rect,
            view_origin: Vec3::ZERO,
            projection: Mat4::IDENTITY,
            lod_distance_factor: 1.0,
            background_color: LinearRgba::BLACK,
            state: None,
            temporal_reprojection_phase: false,
            elements: ViewElements::default(),
            visibility: ViewVisibility::default(),
        }
    }

    /// Whether the view's visibility is frozen.
    pub fn is_frozen(&self) -> bool {
        self.state.is_some_and(|s| s.is_frozen)
    }

    /// Whether the view has a parent view.
    pub fn has_view_parent(&self) -> bool {
        self.state.is_some_and(|s| s.has_view_parent)
    }
}

/// The views rendered together in one frame.
#[derive(Debug, Clone)]
pub struct ViewFamily {
    /// The views, in render order.
    pub views: Vec<SceneView>,
    /// Show flags shared by every view.
    pub show_flags: ShowFlags,
    /// Size of the family's render target.
    pub family_size: Extent2D,
}

impl ViewFamily {
    /// Creates an empty family.
    pub fn new(family_size: Extent2D, show_flags: ShowFlags) -> Self {
        Self {
            views: Vec::new(),
            show_flags,
            family_size,
        }
    }

    /// Adds a view.
    pub fn with_view(mut self, view: SceneView) -> Self {
        self.views.push(view);
        self
    }

    /// Whether the family renders more than one view.
    pub fn is_multi_view(&self) -> bool {
        self.views.len() > 1
    }

    /// The whole family target, regardless of where the views sit in it.
    pub fn family_rect(&self) -> IntRect {
        IntRect::from_extent(self.family_size)
    }

    /// The average camera position of the views, used as the sort origin.
    pub fn average_view_origin(&self) -> Vec3 {
        if self.views.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self
            .views
            .iter()
            .fold(Vec3::ZERO, |acc, v| acc + v.view_origin);
        sum / self.views.len() as f32
    }
}
