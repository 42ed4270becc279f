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

//! Scene atmospheric-fog component state read by the atmosphere pass.

use bitflags::bitflags;

bitflags! {
    /// Features the atmosphere pass skips.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AtmosphereRenderFlags: u32 {
        /// Skip the sun disk.
        const DISABLE_SUN_DISK = 1 << 0;
        /// Skip ground scattering.
        const DISABLE_GROUND_SCATTERING = 1 << 1;
        /// Skip light-shaft modulation.
        const DISABLE_LIGHT_SHAFT = 1 << 2;
    }
}

/// The scene's atmospheric fog component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtmosphericFog {
    /// Current render flags.
    pub render_flags: AtmosphereRenderFlags,
}

impl AtmosphericFog {
    /// Enables or disables light-shaft modulation depending on whether a
    /// light-shaft mask was produced this frame. Other flags are preserved.
    pub fn sync_light_shaft_mask(&mut self, mask_available: bool) {
        self.render_flags
            .set(AtmosphereRenderFlags::DISABLE_LIGHT_SHAFT, !mask_available);
    }
}
