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

//! Provides bounding volumes used for occluder eligibility.

use super::vector::Vec3;
use serde::{Deserialize, Serialize};

/// A bounding sphere, the cheapest conservative bound of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// World-space center of the sphere.
    pub origin: Vec3,
    /// Radius of the sphere.
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    #[inline]
    pub const fn new(origin: Vec3, radius: f32) -> Self {
        Self { origin, radius }
    }

    /// Tests whether the sphere covers more than `min_screen_radius` of the screen
    /// as seen from `view_origin`.
    ///
    /// The test is `radius² > min_screen_radius² × distance² × lod_distance_factor²`,
    /// a projection-free approximation of the screen footprint.
    #[inline]
    pub fn exceeds_screen_radius(
        &self,
        view_origin: Vec3,
        min_screen_radius: f32,
        lod_distance_factor: f32,
    ) -> bool {
        let lod_distance_sq = self.origin.distance_squared(view_origin)
            * lod_distance_factor
            * lod_distance_factor;
        self.radius * self.radius > min_screen_radius * min_screen_radius * lod_distance_sq
    }
}
