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

//! Family-wide show flags.
//!
//! Show flags switch features and debug view modes for every view of a family.
//! They feed the pipeline policy and gate individual passes of the frame.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Feature and debug view-mode switches for a view family.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ShowFlags: u32 {
        /// Master switch. When cleared, nothing is rendered.
        const RENDERING = 1 << 0;
        /// Dynamic and static lighting.
        const LIGHTING = 1 << 1;
        /// Direct (per light) lighting inside the lighting block.
        const DIRECT_LIGHTING = 1 << 2;
        /// Wireframe debug view mode.
        const WIREFRAME = 1 << 3;
        /// Shader-cost debug view mode.
        const SHADER_COMPLEXITY = 1 << 4;
        /// Stationary-light overlap debug view mode.
        const STATIONARY_LIGHT_OVERLAP = 1 << 5;
        /// Lightmap-density debug view mode.
        const LIGHT_MAP_DENSITY = 1 << 6;
        /// Temporal reprojection of previous frames.
        const TEMPORAL_REPROJECTION = 1 << 7;
        /// Light-shaft occlusion and bloom.
        const LIGHT_SHAFTS = 1 << 8;
        /// Height fog.
        const FOG = 1 << 9;
        /// Atmospheric fog.
        const ATMOSPHERIC_FOG = 1 << 10;
        /// Translucent geometry.
        const TRANSLUCENCY = 1 << 11;
        /// Refraction (distortion) ahead of translucency.
        const REFRACTION = 1 << 12;
        /// Motion blur, including the per-primitive history cache.
        const MOTION_BLUR = 1 << 13;
        /// Editor primitives are composited by a later editor pass.
        const COMPOSITE_EDITOR_PRIMITIVES = 1 << 14;
    }
}

impl ShowFlags {
    /// Flags of the debug view modes that need every pixel initialized.
    pub const FORCE_HARDWARE_CLEAR: Self = Self::WIREFRAME
        .union(Self::SHADER_COMPLEXITY)
        .union(Self::STATIONARY_LIGHT_OVERLAP);

    /// The default in-game preset: every feature on, every debug mode off.
    pub fn game() -> Self {
        Self::RENDERING
            | Self::LIGHTING
            | Self::DIRECT_LIGHTING
            | Self::LIGHT_SHAFTS
            | Self::FOG
            | Self::ATMOSPHERIC_FOG
            | Self::TRANSLUCENCY
            | Self::REFRACTION
            | Self::MOTION_BLUR
    }
}

impl Default for ShowFlags {
    fn default() -> Self {
        Self::game()
    }
}
