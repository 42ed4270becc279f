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

//! Static draw-list scheduling for the base pass.
//!
//! The 14 base-pass buckets are traversed per view in two halves (masked and
//! opaque), whose relative order depends on whether a depth pre-pass ran.

use umbra_core::{
    math::Vec3,
    renderer::{CommandEncoder, DrawingPolicy, PipelinePolicy},
    scene::{BasePassDrawLists, DrawType, LightingTechnique, VisibilityMap},
};

/// Sorts every base-pass bucket front to back from `view_position`.
///
/// This is a rough per-bucket sort. It only happens when no depth pre-pass
/// runs; with a pre-pass the depth buffer already rejects occluded pixels.
///
/// # Returns
///
/// `true` if the buckets were sorted.
pub fn sort_base_pass_static_data(
    lists: &mut BasePassDrawLists,
    policy: &PipelinePolicy,
    view_position: Vec3,
) -> bool {
    if !policy.sorts_static_draw_lists() {
        return false;
    }
    log::trace!(
        "Sorting {} static batches front to back from {:?}",
        lists.batch_count(),
        view_position
    );
    lists.sort_front_to_back(view_position);
    true
}

fn draw_technique_group(
    encoder: &mut dyn CommandEncoder,
    lists: &BasePassDrawLists,
    draw_type: DrawType,
    lightmapped: bool,
    label: &str,
    view_index: usize,
    visibility: &VisibilityMap,
) -> bool {
    encoder.push_debug_group(label);
    let mut dirty = false;
    let techniques = LightingTechnique::ALL
        .into_iter()
        .filter(|t| t.is_lightmapped() == lightmapped);
    for technique in techniques {
        dirty |= lists.get(technique, draw_type).draw_visible(
            encoder,
            view_index,
            visibility,
            DrawingPolicy::BasePass,
        );
    }
    encoder.pop_debug_group();
    dirty
}

fn draw_static_draw_type(
    encoder: &mut dyn CommandEncoder,
    lists: &BasePassDrawLists,
    draw_type: DrawType,
    view_index: usize,
    visibility: &VisibilityMap,
) -> bool {
    let mut dirty = draw_technique_group(
        encoder,
        lists,
        draw_type,
        false,
        &format!("Static{}NoLightmap", draw_type.label()),
        view_index,
        visibility,
    );
    dirty |= draw_technique_group(
        encoder,
        lists,
        draw_type,
        true,
        &format!("Static{}Lightmapped", draw_type.label()),
        view_index,
        visibility,
    );
    dirty
}

/// Draws the visible batches of the 7 masked buckets.
pub fn draw_masked(
    encoder: &mut dyn CommandEncoder,
    lists: &BasePassDrawLists,
    view_index: usize,
    visibility: &VisibilityMap,
) -> bool {
    draw_static_draw_type(encoder, lists, DrawType::Masked, view_index, visibility)
}

/// Draws the visible batches of the 7 opaque buckets.
pub fn draw_opaque(
    encoder: &mut dyn CommandEncoder,
    lists: &BasePassDrawLists,
    view_index: usize,
    visibility: &VisibilityMap,
) -> bool {
    draw_static_draw_type(encoder, lists, DrawType::Opaque, view_index, visibility)
}

/// Draws the static base-pass data of one view in the order the policy dictates.
///
/// Masked goes first when a pre-pass ran, opaque first otherwise.
pub fn draw_base_pass_static_data(
    encoder: &mut dyn CommandEncoder,
    lists: &BasePassDrawLists,
    policy: &PipelinePolicy,
    view_index: usize,
    visibility: &VisibilityMap,
) -> bool {
    let mut dirty = false;
    for draw_type in policy.static_draw_order() {
        dirty |= match draw_type {
            DrawType::Masked => draw_masked(encoder, lists, view_index, visibility),
            DrawType::Opaque => draw_opaque(encoder, lists, view_index, visibility),
        };
    }
    dirty
}
