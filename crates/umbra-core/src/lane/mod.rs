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

//! # Lane Abstraction
//!
//! The base trait for the frame passes.
//!
//! A **Lane** is one self-contained pass of the deferred pipeline (depth
//! pre-pass, base pass, G-buffer clear, depth downsample). The orchestrating
//! agent owns its lanes and calls them at fixed points of the frame.
//!
//! ## Architecture
//!
//! 1. **`Lane`** (this trait): identity and classification shared by every pass.
//! 2. **Domain traits** extend `Lane` with an execution method, e.g.
//!    `RenderPassLane: Lane` in `umbra-lanes`.

use std::fmt;

/// Classification of the passes, used for logging and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Depth-only occluder pass.
    DepthPrepass,
    /// G-buffer population pass.
    BasePass,
    /// G-buffer clear (hardware or far-plane quad).
    SceneClear,
    /// Low-resolution depth for occlusion queries.
    DepthDownsample,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LaneKind::DepthPrepass => "DepthPrepass",
            LaneKind::BasePass => "BasePass",
            LaneKind::SceneClear => "SceneClear",
            LaneKind::DepthDownsample => "DepthDownsample",
        };
        f.write_str(name)
    }
}

/// Common identity shared by every frame pass.
pub trait Lane: Send + Sync {
    /// Human-readable name of the pass strategy, used in logs and debug groups.
    fn strategy_name(&self) -> &'static str;

    /// The kind of pass this lane implements.
    fn lane_kind(&self) -> LaneKind;
}
