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

//! Defines the error types for the frame orchestration.

use crate::config::ConfigError;
use thiserror::Error;

/// An error that aborts the rendering of a frame.
///
/// Empty inputs (no visible batches, disabled features) are never errors; they
/// simply produce passes that draw nothing.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The view family contains no views. Every pass assumes at least one.
    #[error("view family has no views")]
    NoViews,
    /// The renderer configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
