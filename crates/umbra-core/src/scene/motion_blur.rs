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

//! Per-primitive transform history for motion blur.

use super::primitive::PrimitiveId;
use crate::math::Mat4;
use std::collections::HashMap;

/// Transforms captured at the end of the previous frame.
///
/// Motion blur compares a primitive's current transform with the one stored
/// here to build its velocity.
#[derive(Debug, Clone, Default)]
pub struct MotionBlurCache {
    transforms: HashMap<PrimitiveId, Mat4>,
    updates: u64,
}

impl MotionBlurCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the history with this frame's transforms.
    pub fn update(&mut self, transforms: impl IntoIterator<Item = (PrimitiveId, Mat4)>) {
        self.transforms.clear();
        self.transforms.extend(transforms);
        self.updates += 1;
    }

    /// The transform the primitive had when the cache was last updated.
    pub fn previous_transform(&self, id: PrimitiveId) -> Option<Mat4> {
        self.transforms.get(&id).copied()
    }

    /// Number of updates since creation.
    pub fn update_count(&self) -> u64 {
        self.updates
    }
}
