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

//! Defines the collaborator bundle handed to the agent each frame.

use umbra_core::renderer::{
    AtmosphereRenderer, FrameHooks, FxSystem, LightingRenderer, TranslucencyRenderer,
    VisibilityProvider,
};

/// The external systems the agent calls at fixed points of the frame.
///
/// The FX system is optional; every other collaborator is required.
pub struct RendererServices {
    /// Produces the per-view visibility results.
    pub visibility: Box<dyn VisibilityProvider>,
    /// Particle and effects system, notified before rendering and after opaque geometry.
    pub fx: Option<Box<dyn FxSystem>>,
    /// Deferred lighting and lighting debug views.
    pub lighting: Box<dyn LightingRenderer>,
    /// Light shafts, atmosphere and fog.
    pub atmosphere: Box<dyn AtmosphereRenderer>,
    /// Distortion and translucency.
    pub translucency: Box<dyn TranslucencyRenderer>,
    /// Resource, resolve and finishing hooks.
    pub hooks: Box<dyn FrameHooks>,
}

impl RendererServices {
    /// Bundles the required collaborators, without an FX system.
    pub fn new(
        visibility: Box<dyn VisibilityProvider>,
        lighting: Box<dyn LightingRenderer>,
        atmosphere: Box<dyn AtmosphereRenderer>,
        translucency: Box<dyn TranslucencyRenderer>,
        hooks: Box<dyn FrameHooks>,
    ) -> Self {
        Self {
            visibility,
            fx: None,
            lighting,
            atmosphere,
            translucency,
            hooks,
        }
    }

    /// Attaches an FX system.
    pub fn with_fx(mut self, fx: Box<dyn FxSystem>) -> Self {
        self.fx = Some(fx);
        self
    }
}
