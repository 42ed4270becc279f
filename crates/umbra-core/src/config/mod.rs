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

//! Renderer tunables.
//!
//! [`RendererConfig`] is an immutable snapshot of every tunable the frame passes
//! read. The orchestrator captures one snapshot at the start of a frame and
//! reads nothing else until the next frame, so tunables can change at runtime
//! without any global mutable state.
//!
//! Missing fields take their documented default, so a partial RON file such as
//! `(clear_scene_method: 2)` is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// An error raised while loading or saving a [`RendererConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access renderer config '{path}': {source}")]
    Io {
        /// The path that failed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The RON text could not be parsed.
    #[error("failed to parse renderer config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The configuration could not be serialized.
    #[error("failed to serialize renderer config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Immutable per-frame snapshot of the renderer tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// How the G-buffer is cleared: `0` no clear, `1` hardware clear,
    /// `2` far-plane quad clear. Other values fall back to a hardware clear.
    pub clear_scene_method: i32,
    /// Depth-only pass override: `0` forces it off, `1` forces it on, any other
    /// value leaves the platform/quality decision in place.
    pub depth_only_pass_override: i32,
    /// Allows movable primitives to be drawn as dynamic occluders in the depth pass.
    pub render_movable_objects_in_depth_only_pass: bool,
    /// Minimum screen radius a dynamic primitive must cover to be drawn in the depth pass.
    pub min_screen_radius_for_depth_prepass: f32,
    /// Static quality switch for high-quality lightmaps.
    pub allow_high_quality_lightmaps: bool,
    /// Globally permits debug view modes such as lightmap density.
    pub allow_debug_view_modes: bool,
    /// Enables hardware occlusion queries.
    pub occlusion_queries: bool,
    /// Draws the render-target pool overlay at the end of the frame.
    pub visualize_texture_pool: bool,
}

impl RendererConfig {
    /// Default for [`RendererConfig::clear_scene_method`].
    pub const DEFAULT_CLEAR_SCENE_METHOD: i32 = 1;
    /// Default for [`RendererConfig::min_screen_radius_for_depth_prepass`].
    pub const DEFAULT_MIN_SCREEN_RADIUS_FOR_DEPTH_PREPASS: f32 = 0.03;

    /// Parses a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Loads a configuration from a RON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        log::info!("Loaded renderer config from '{}'", path.display());
        Ok(config)
    }

    /// Serializes the configuration to pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_scene_method: Self::DEFAULT_CLEAR_SCENE_METHOD,
            depth_only_pass_override: -1,
            render_movable_objects_in_depth_only_pass: false,
            min_screen_radius_for_depth_prepass: Self::DEFAULT_MIN_SCREEN_RADIUS_FOR_DEPTH_PREPASS,
            allow_high_quality_lightmaps: true,
            allow_debug_view_modes: true,
            occlusion_queries: true,
            visualize_texture_pool: false,
        }
    }
}
