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

//! Fixed-function pipeline state bound by the frame passes.
//!
//! Depth uses the reversed convention: the far plane is `0.0`, the near plane
//! `1.0`, and a fragment passes when its depth is greater than or equal to the
//! stored value.

use bitflags::bitflags;

/// The comparison function used for depth and stencil testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    /// The test never passes.
    Never,
    /// The test passes if the new value is less than the existing value.
    Less,
    /// The test passes if the new value is equal to the existing value.
    Equal,
    /// The test passes if the new value is less than or equal to the existing value.
    LessEqual,
    /// The test passes if the new value is greater than the existing value.
    Greater,
    /// The test passes if the new value is not equal to the existing value.
    NotEqual,
    /// The test passes if the new value is greater than or equal to the existing value.
    GreaterEqual,
    /// The test always passes.
    #[default]
    Always,
}

/// Describes the state for depth testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilState {
    /// If `true`, depth values will be written to the depth buffer.
    pub depth_write_enabled: bool,
    /// The comparison function used for the depth test.
    pub depth_compare: CompareFunction,
}

impl DepthStencilState {
    /// Reversed-Z depth test with depth writes.
    pub const WRITE_GREATER_EQUAL: Self = Self {
        depth_write_enabled: true,
        depth_compare: CompareFunction::GreaterEqual,
    };
    /// Reversed-Z depth test without depth writes.
    pub const TEST_GREATER_EQUAL: Self = Self {
        depth_write_enabled: false,
        depth_compare: CompareFunction::GreaterEqual,
    };
    /// Unconditional depth write.
    pub const WRITE_ALWAYS: Self = Self {
        depth_write_enabled: true,
        depth_compare: CompareFunction::Always,
    };
}

bitflags! {
    /// Which color channels a blend state writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorWrites: u8 {
        /// Red channel.
        const RED = 1 << 0;
        /// Green channel.
        const GREEN = 1 << 1;
        /// Blue channel.
        const BLUE = 1 << 2;
        /// Alpha channel.
        const ALPHA = 1 << 3;
        /// All four channels.
        const ALL = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits() | Self::ALPHA.bits();
    }
}

/// How incoming fragments combine with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// The fragment replaces the stored value.
    #[default]
    Replace,
    /// `One * src + One * dst`, on color and alpha.
    Additive,
}

/// Blend state shared by every bound color target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendState {
    /// Blend equation.
    pub mode: BlendMode,
    /// Channel write mask applied to each target.
    pub write_mask: ColorWrites,
    /// Number of color targets the mask applies to.
    pub target_count: u32,
}

impl BlendState {
    /// Additive blending on the first target, used to accumulate overdraw cost.
    pub const ADDITIVE: Self = Self {
        mode: BlendMode::Additive,
        write_mask: ColorWrites::ALL,
        target_count: 1,
    };
    /// No color output at all, for depth-only rendering.
    pub const NO_COLOR_WRITES: Self = Self {
        mode: BlendMode::Replace,
        write_mask: ColorWrites::empty(),
        target_count: 1,
    };

    /// Opaque replacement writing every channel of `target_count` targets.
    pub const fn opaque(target_count: u32) -> Self {
        Self {
            mode: BlendMode::Replace,
            write_mask: ColorWrites::ALL,
            target_count,
        }
    }
}

/// Polygon fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    /// Filled triangles.
    #[default]
    Solid,
    /// Triangle edges only.
    Wireframe,
}

/// Face culling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    /// No culling.
    #[default]
    None,
    /// Cull front faces.
    Front,
    /// Cull back faces.
    Back,
}

/// Rasterizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RasterizerState {
    /// Fill mode.
    pub fill: FillMode,
    /// Cull mode.
    pub cull: CullMode,
}

impl RasterizerState {
    /// Solid fill without culling, used by full-screen quads.
    pub const SOLID_NO_CULL: Self = Self {
        fill: FillMode::Solid,
        cull: CullMode::None,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(!DepthStencilState::TEST_GREATER_EQUAL.depth_write_enabled);
        assert_eq!(
            DepthStencilState::WRITE_GREATER_EQUAL.depth_compare,
            CompareFunction::GreaterEqual
        );
        assert!(BlendState::NO_COLOR_WRITES.write_mask.is_empty());
        assert_eq!(BlendState::opaque(4).target_count, 4);
        assert_eq!(ColorWrites::ALL.bits(), 0b1111);
    }
}
