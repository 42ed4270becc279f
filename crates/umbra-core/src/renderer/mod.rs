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

//! Public contracts and policy for the deferred-shading frame.
//!
//! - [`api`]: plain data sent to the device (pipeline states, draw commands, clears).
//! - [`traits`]: the device, render-target and collaborator interfaces.
//! - [`policy`]: resolution of the per-frame [`PipelinePolicy`].
//! - [`show_flags`]: the family-wide feature and debug view-mode switches.

pub mod api;
pub mod error;
pub mod policy;
pub mod show_flags;
pub mod traits;

pub use self::api::*;
pub use self::error::RenderError;
pub use self::policy::{ClearMode, DepthPrepassOverride, PipelinePolicy};
pub use self::show_flags::ShowFlags;
pub use self::traits::*;
