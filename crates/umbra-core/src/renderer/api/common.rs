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

//! Device capabilities, identifiers and small value types shared by the passes.

use crate::math::{Extent2D, IntRect, LinearRgba};
use serde::{Deserialize, Serialize};

/// The far-plane depth value under the reversed depth convention.
pub const FAR_DEPTH: f32 = 0.0;

/// The near-plane depth value under the reversed depth convention.
pub const NEAR_DEPTH: f32 = 1.0;

/// Shader-model feature level of the device, ordered from least to most capable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum FeatureLevel {
    /// Shader model 3 class hardware.
    Sm3,
    /// Shader model 4 class hardware.
    Sm4,
    /// Shader model 5 class hardware.
    #[default]
    Sm5,
}

impl FeatureLevel {
    /// Whether the deferred lighting block can run.
    pub fn supports_deferred_lighting(self) -> bool {
        self >= FeatureLevel::Sm4
    }

    /// Whether the depth buffer can be bound as a target and sampled at the same time.
    /// Below this level a separate shader-readable depth copy is resolved.
    pub fn supports_depth_read_while_bound(self) -> bool {
        self >= FeatureLevel::Sm5
    }
}

/// Capabilities of the platform, fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    /// Shader-model feature level.
    pub feature_level: FeatureLevel,
    /// Whether the platform supports windowed (multiple) configurations.
    /// Fixed-configuration platforms always use a depth-only pre-pass.
    pub supports_windowed_mode: bool,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            feature_level: FeatureLevel::Sm5,
            supports_windowed_mode: true,
        }
    }
}

/// An opaque handle to a texture owned by the render-target collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Number of simultaneously bound G-buffer color targets on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GBufferTargetCount {
    /// Scene color only.
    #[default]
    One,
    /// Scene color and four G-buffer targets.
    Five,
    /// Scene color, four G-buffer targets and one extra target.
    Six,
}

impl GBufferTargetCount {
    /// The count as a number.
    pub fn count(self) -> usize {
        match self {
            GBufferTargetCount::One => 1,
            GBufferTargetCount::Five => 5,
            GBufferTargetCount::Six => 6,
        }
    }
}

/// Priority group of view elements. Foreground elements always draw over world elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthPriorityGroup {
    /// Elements depth-tested against the scene.
    World,
    /// Elements drawn on top of the scene.
    Foreground,
}

/// A viewport in pixels with a depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge.
    pub min_x: u32,
    /// Top edge.
    pub min_y: u32,
    /// Right edge.
    pub max_x: u32,
    /// Bottom edge.
    pub max_y: u32,
    /// Minimum depth.
    pub min_depth: f32,
    /// Maximum depth.
    pub max_depth: f32,
}

impl Viewport {
    /// A viewport covering `rect` with the full `[0, 1]` depth range.
    pub fn from_rect(rect: IntRect) -> Self {
        Self {
            min_x: rect.min_x,
            min_y: rect.min_y,
            max_x: rect.max_x,
            max_y: rect.max_y,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// A viewport covering `extent` from the origin.
    pub fn from_extent(extent: Extent2D) -> Self {
        Self::from_rect(IntRect::from_extent(extent))
    }
}

/// Clear of the currently bound targets. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearRequest {
    /// Color for every bound color target.
    pub color: Option<LinearRgba>,
    /// Depth value.
    pub depth: Option<f32>,
    /// Stencil value.
    pub stencil: Option<u32>,
}

impl ClearRequest {
    /// Clears depth to the far plane and stencil to zero, leaving color untouched.
    pub const fn far_depth_and_stencil() -> Self {
        Self {
            color: None,
            depth: Some(FAR_DEPTH),
            stencil: Some(0),
        }
    }
}
