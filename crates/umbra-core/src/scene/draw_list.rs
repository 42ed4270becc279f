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

//! Static draw lists.
//!
//! Static geometry is pre-batched into a fixed set of lists when the scene is
//! built. The base pass owns one list per lighting technique and draw type;
//! the depth pass owns a position-only occluder list and a general depth list.
//! Batch membership never changes during a frame, only the order of batches.

use crate::math::Vec3;
use crate::renderer::api::{DrawingPolicy, MeshDrawCommand, MeshSource};
use crate::renderer::traits::CommandEncoder;
use crate::scene::visibility::VisibilityMap;

/// Index of a static mesh batch into the per-view static visibility maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StaticMeshId(pub usize);

/// How a batch receives its lighting.
///
/// The declaration order is the base-pass traversal order: the four
/// techniques without a lightmap first, then the three lightmapped ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LightingTechnique {
    /// No lightmap and no precomputed indirect lighting.
    NoLightMap,
    /// Simple dynamic lighting only.
    SimpleDynamicLighting,
    /// Indirect lighting from a cached volume.
    CachedVolumeIndirect,
    /// Indirect lighting from a single cached point sample.
    CachedPointIndirect,
    /// High-quality directional lightmap.
    HighQualityLightMap,
    /// High-quality lightmap plus a distance-field shadow map.
    DistanceFieldShadowMapLightMap,
    /// Low-quality lightmap.
    LowQualityLightMap,
}

impl LightingTechnique {
    /// Number of lighting techniques.
    pub const COUNT: usize = 7;

    /// Every technique, in base-pass traversal order.
    pub const ALL: [LightingTechnique; Self::COUNT] = [
        LightingTechnique::NoLightMap,
        LightingTechnique::SimpleDynamicLighting,
        LightingTechnique::CachedVolumeIndirect,
        LightingTechnique::CachedPointIndirect,
        LightingTechnique::HighQualityLightMap,
        LightingTechnique::DistanceFieldShadowMapLightMap,
        LightingTechnique::LowQualityLightMap,
    ];

    /// Position of the technique in [`LightingTechnique::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether the technique samples a lightmap.
    #[inline]
    pub fn is_lightmapped(self) -> bool {
        matches!(
            self,
            LightingTechnique::HighQualityLightMap
                | LightingTechnique::DistanceFieldShadowMapLightMap
                | LightingTechnique::LowQualityLightMap
        )
    }
}

/// Whether a batch is fully opaque or alpha-masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrawType {
    /// Fully opaque.
    Opaque,
    /// Alpha-tested.
    Masked,
}

impl DrawType {
    /// Number of draw types.
    pub const COUNT: usize = 2;

    /// Every draw type.
    pub const ALL: [DrawType; Self::COUNT] = [DrawType::Opaque, DrawType::Masked];

    /// Position of the draw type in [`DrawType::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label used in debug groups.
    pub fn label(self) -> &'static str {
        match self {
            DrawType::Opaque => "Opaque",
            DrawType::Masked => "Masked",
        }
    }
}

/// Identity of a static draw list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawListKey {
    /// One of the fourteen base-pass lists.
    BasePass {
        /// Lighting technique of the list.
        technique: LightingTechnique,
        /// Draw type of the list.
        draw_type: DrawType,
    },
    /// Occluders drawn with a position-only vertex stream.
    PositionOnlyDepth,
    /// Remaining depth-pass geometry.
    Depth,
}

/// A pre-batched static mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticMeshBatch {
    /// Index into the per-view static visibility maps.
    pub id: StaticMeshId,
    /// Representative point used for front-to-back sorting.
    pub origin: Vec3,
}

/// An ordered, sortable list of static batches sharing a drawing policy.
#[derive(Debug, Clone)]
pub struct DrawList {
    key: DrawListKey,
    batches: Vec<StaticMeshBatch>,
}

impl DrawList {
    /// Creates an empty list.
    pub fn new(key: DrawListKey) -> Self {
        Self {
            key,
            batches: Vec::new(),
        }
    }

    /// The identity of the list.
    pub fn key(&self) -> DrawListKey {
        self.key
    }

    /// Appends a batch. Scene-build time only.
    pub fn add(&mut self, batch: StaticMeshBatch) {
        self.batches.push(batch);
    }

    /// The batches in traversal order.
    pub fn batches(&self) -> &[StaticMeshBatch] {
        &self.batches
    }

    /// Number of batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Whether the list holds no batch.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Reorders the batches by ascending distance from `view_position`.
    ///
    /// The sort is stable: batches at equal distance keep their relative order,
    /// so sorting twice from the same position changes nothing.
    pub fn sort_front_to_back(&mut self, view_position: Vec3) {
        self.batches.sort_by(|a, b| {
            let da = a.origin.distance_squared(view_position);
            let db = b.origin.distance_squared(view_position);
            da.total_cmp(&db)
        });
    }

    /// Draws every batch marked visible in `visibility`.
    ///
    /// # Returns
    ///
    /// `true` if at least one draw was issued.
    pub fn draw_visible(
        &self,
        encoder: &mut dyn CommandEncoder,
        view_index: usize,
        visibility: &VisibilityMap,
        policy: DrawingPolicy,
    ) -> bool {
        let mut dirty = false;
        for batch in &self.batches {
            if !visibility.is_visible(batch.id.0) {
                continue;
            }
            encoder.draw_mesh(&MeshDrawCommand {
                view_index,
                source: MeshSource::Static {
                    list: self.key,
                    mesh: batch.id,
                },
                policy,
            });
            dirty = true;
        }
        dirty
    }
}

/// The fourteen base-pass lists, indexed by draw type then lighting technique.
#[derive(Debug, Clone)]
pub struct BasePassDrawLists {
    lists: [[DrawList; LightingTechnique::COUNT]; DrawType::COUNT],
}

impl BasePassDrawLists {
    /// Creates the fourteen empty lists.
    pub fn new() -> Self {
        Self {
            lists: std::array::from_fn(|d| {
                std::array::from_fn(|t| {
                    DrawList::new(DrawListKey::BasePass {
                        technique: LightingTechnique::ALL[t],
                        draw_type: DrawType::ALL[d],
                    })
                })
            }),
        }
    }

    /// The list for `technique` and `draw_type`.
    #[inline]
    pub fn get(&self, technique: LightingTechnique, draw_type: DrawType) -> &DrawList {
        &self.lists[draw_type.index()][technique.index()]
    }

    /// Mutable access to the list for `technique` and `draw_type`.
    #[inline]
    pub fn get_mut(&mut self, technique: LightingTechnique, draw_type: DrawType) -> &mut DrawList {
        &mut self.lists[draw_type.index()][technique.index()]
    }

    /// Every list of `draw_type`, in traversal order.
    pub fn lists_of(&self, draw_type: DrawType) -> &[DrawList; LightingTechnique::COUNT] {
        &self.lists[draw_type.index()]
    }

    /// Sorts each of the fourteen lists independently, front to back.
    pub fn sort_front_to_back(&mut self, view_position: Vec3) {
        for list in self.lists.iter_mut().flatten() {
            list.sort_front_to_back(view_position);
        }
    }

    /// Total number of batches across all lists.
    pub fn batch_count(&self) -> usize {
        self.lists.iter().flatten().map(DrawList::len).sum()
    }
}

impl Default for BasePassDrawLists {
    fn default() -> Self {
        Self::new()
    }
}

/// The two static lists of the depth-only pass.
#[derive(Debug, Clone)]
pub struct DepthDrawLists {
    /// Good occluders, drawn first with a position-only vertex stream.
    pub position_only: DrawList,
    /// Remaining static depth geometry.
    pub depth: DrawList,
}

impl Default for DepthDrawLists {
    fn default() -> Self {
        Self {
            position_only: DrawList::new(DrawListKey::PositionOnlyDepth),
            depth: DrawList::new(DrawListKey::Depth),
        }
    }
}
