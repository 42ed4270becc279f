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

//! Acts as the **[A]gent** for the deferred rendering subsystem.
//!
//! The agent resolves the frame's pipeline policy, then walks a fixed pass
//! sequence. Geometry passes are delegated to the lanes of `umbra-lanes`;
//! lighting, atmosphere, translucency and FX are delegated to the collaborators
//! bundled in [`RendererServices`].

mod agent;
mod frame_report;
mod services;

pub use agent::*;
pub use frame_report::*;
pub use services::*;
