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

//! Draw submissions issued by the frame passes.

use super::common::DepthPriorityGroup;
use crate::math::{Extent2D, Vec2, Vec4};
use crate::scene::{DrawListKey, PrimitiveId, StaticMeshId};

/// Which masked materials a depth pass draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthDrawingMode {
    /// Skip masked materials; they are depth-tested in the base pass instead.
    #[default]
    NonMaskedOnly,
    /// Draw every occluder, masked or not, so pre-pass depth equals final depth.
    AllOccluders,
}

/// The drawing policy (vertex format and shader family) a mesh is submitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawingPolicy {
    /// Depth only, with a position-only vertex stream.
    PositionOnlyDepth,
    /// Depth only, with the full vertex stream.
    Depth(DepthDrawingMode),
    /// G-buffer output.
    BasePass,
}

/// Where a submitted mesh comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshSource {
    /// A pre-batched static mesh from a scene draw list.
    Static {
        /// The list the batch belongs to.
        list: DrawListKey,
        /// The batch.
        mesh: StaticMeshId,
    },
    /// An element emitted by a dynamic primitive.
    Dynamic {
        /// The emitting primitive.
        primitive: PrimitiveId,
        /// Index of the element within the primitive.
        element: u32,
    },
    /// A mesh element attached to the view itself (editor widgets, debug shapes).
    ViewElement {
        /// Priority group of the element.
        group: DepthPriorityGroup,
        /// Index of the element within its group.
        element: u32,
    },
}

/// A single mesh draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshDrawCommand {
    /// Index of the view within its family.
    pub view_index: usize,
    /// The mesh being drawn.
    pub source: MeshSource,
    /// The drawing policy.
    pub policy: DrawingPolicy,
}

/// Shader constants of the depth downsample pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct DownsampleDepthParameters {
    /// Projection terms turning view-space depth into post-projection depth:
    /// `(P[2][2], P[3][2])`.
    pub projection_scale_bias: Vec2,
    /// UV offsets of the first two samples of the 2x2 footprint.
    pub source_texel_offsets01: Vec4,
    /// UV offsets of the last two samples of the 2x2 footprint.
    pub source_texel_offsets23: Vec4,
}

/// A screen-space quad mapping a source region of a texture onto a target region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenQuad {
    /// Destination left edge, in target pixels.
    pub x: f32,
    /// Destination top edge, in target pixels.
    pub y: f32,
    /// Destination width, in target pixels.
    pub width: f32,
    /// Destination height, in target pixels.
    pub height: f32,
    /// Source left edge, in texture pixels.
    pub u: f32,
    /// Source top edge, in texture pixels.
    pub v: f32,
    /// Source width, in texture pixels.
    pub size_u: f32,
    /// Source height, in texture pixels.
    pub size_v: f32,
    /// Size of the bound target.
    pub target_size: Extent2D,
    /// Size of the sampled texture.
    pub texture_size: Extent2D,
}
