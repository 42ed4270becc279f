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

//! # Umbra Agents
//!
//! Agents own the lanes and decide when each one runs. The
//! [`DeferredShadingAgent`](render_agent::DeferredShadingAgent) sequences a full
//! deferred frame: pre-pass, G-buffer, lighting, atmosphere, translucency and
//! the final resolves.

#![warn(missing_docs)]

pub mod render_agent;
