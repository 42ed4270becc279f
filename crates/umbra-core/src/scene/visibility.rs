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

//! Per-view visibility results.
//!
//! Visibility determination is done by an external collaborator. Its output is
//! stored per view and consumed read-only by the passes. Indices past the end
//! of a map are not visible, so an empty result draws nothing.

use super::primitive::{PrimitiveId, PrimitiveViewRelevance};

/// A dense visibility bitmap indexed by static mesh or primitive index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityMap {
    bits: Vec<bool>,
}

impl VisibilityMap {
    /// Creates a map of `len` invisible entries.
    pub fn with_len(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Creates a map where exactly `visible` indices are set.
    pub fn from_visible(visible: impl IntoIterator<Item = usize>) -> Self {
        let mut map = Self::default();
        for index in visible {
            map.set(index, true);
        }
        map
    }

    /// Sets the visibility of `index`, growing the map as needed.
    pub fn set(&mut self, index: usize, visible: bool) {
        if index >= self.bits.len() {
            if !visible {
                return;
            }
            self.bits.resize(index + 1, false);
        }
        self.bits[index] = visible;
    }

    /// Whether `index` is visible.
    #[inline]
    pub fn is_visible(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Number of visible entries.
    pub fn count_visible(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }
}

/// Everything the visibility collaborator produces for one view.
#[derive(Debug, Clone, Default)]
pub struct ViewVisibility {
    /// Static batches visible in the view.
    pub static_mesh_visibility: VisibilityMap,
    /// Static batches visible in the view and eligible as occluders.
    pub static_mesh_occluders: VisibilityMap,
    /// Dynamic primitives to consider for drawing, in draw order.
    pub visible_dynamic_primitives: Vec<PrimitiveId>,
    /// Per-primitive visibility bits.
    pub primitive_visibility: VisibilityMap,
    /// Per-primitive relevance, indexed by primitive.
    pub primitive_relevance: Vec<PrimitiveViewRelevance>,
}

impl ViewVisibility {
    /// Whether the primitive is visible in this view.
    #[inline]
    pub fn is_primitive_visible(&self, id: PrimitiveId) -> bool {
        self.primitive_visibility.is_visible(id.0)
    }

    /// The primitive's relevance; an unknown primitive is irrelevant.
    #[inline]
    pub fn relevance(&self, id: PrimitiveId) -> PrimitiveViewRelevance {
        self.primitive_relevance
            .get(id.0)
            .copied()
            .unwrap_or_default()
    }

    /// Marks a primitive visible with `relevance` and queues it for dynamic drawing.
    pub fn add_dynamic_primitive(&mut self, id: PrimitiveId, relevance: PrimitiveViewRelevance) {
        self.primitive_visibility.set(id.0, true);
        if self.primitive_relevance.len() <= id.0 {
            self.primitive_relevance
                .resize(id.0 + 1, PrimitiveViewRelevance::default());
        }
        self.primitive_relevance[id.0] = relevance;
        self.visible_dynamic_primitives.push(id);
    }
}
