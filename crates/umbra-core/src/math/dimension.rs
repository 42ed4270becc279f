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

//! Provides integer pixel extents and rectangles.
//!
//! These types describe render-target sizes and view rectangles. They use
//! unsigned integer components, matching the way viewports are specified to the device.

use serde::{Deserialize, Serialize};

/// A two-dimensional extent, typically representing width and height.
///
/// This is commonly used for render-target dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Extent2D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Divides both components by `factor` using integer division.
    ///
    /// A `factor` of zero is treated as one.
    #[inline]
    pub fn div_floor(self, factor: u32) -> Self {
        let factor = factor.max(1);
        Self::new(self.width / factor, self.height / factor)
    }
}

/// A half-open pixel rectangle `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntRect {
    /// Left edge, inclusive.
    pub min_x: u32,
    /// Top edge, inclusive.
    pub min_y: u32,
    /// Right edge, exclusive.
    pub max_x: u32,
    /// Bottom edge, exclusive.
    pub max_y: u32,
}

impl IntRect {
    /// Creates a rectangle from its corners.
    #[inline]
    pub const fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a rectangle anchored at the origin covering `extent`.
    #[inline]
    pub const fn from_extent(extent: Extent2D) -> Self {
        Self::new(0, 0, extent.width, extent.height)
    }

    /// Width of the rectangle in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    /// Height of the rectangle in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Size of the rectangle as an extent.
    #[inline]
    pub fn size(&self) -> Extent2D {
        Extent2D::new(self.width(), self.height())
    }
}
