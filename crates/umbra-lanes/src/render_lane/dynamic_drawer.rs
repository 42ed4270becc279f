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

//! Submission of dynamic mesh elements.

use umbra_core::{
    renderer::{
        CommandEncoder, DepthDrawingMode, DepthPriorityGroup, DrawingPolicy, MeshDrawCommand,
        MeshSource,
    },
    scene::{MeshElement, PrimitiveDrawInterface, PrimitiveId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementOrigin {
    Primitive(PrimitiveId),
    View(DepthPriorityGroup),
}

/// Forwards the elements a primitive emits to the encoder under one drawing policy.
///
/// Call [`set_primitive`](Self::set_primitive) (or
/// [`set_view_group`](Self::set_view_group)) before handing the drawer to an
/// emitter, so each submitted element is tagged with where it came from.
pub struct DynamicPrimitiveDrawer<'a> {
    encoder: &'a mut dyn CommandEncoder,
    view_index: usize,
    policy: DrawingPolicy,
    origin: Option<ElementOrigin>,
    dirty: bool,
}

impl<'a> DynamicPrimitiveDrawer<'a> {
    /// Creates a drawer for the view at `view_index`.
    pub fn new(encoder: &'a mut dyn CommandEncoder, view_index: usize, policy: DrawingPolicy) -> Self {
        Self {
            encoder,
            view_index,
            policy,
            origin: None,
            dirty: false,
        }
    }

    /// Attributes the following elements to `primitive`.
    pub fn set_primitive(&mut self, primitive: PrimitiveId) {
        self.origin = Some(ElementOrigin::Primitive(primitive));
    }

    /// Attributes the following elements to the view's own elements in `group`.
    pub fn set_view_group(&mut self, group: DepthPriorityGroup) {
        self.origin = Some(ElementOrigin::View(group));
    }

    /// Whether any element has been submitted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Gives the encoder back for direct submissions between primitives.
    pub fn encoder(&mut self) -> &mut dyn CommandEncoder {
        &mut *self.encoder
    }

    fn accepts(&self, element: &MeshElement) -> bool {
        !(element.masked && self.policy == DrawingPolicy::Depth(DepthDrawingMode::NonMaskedOnly))
    }
}

impl PrimitiveDrawInterface for DynamicPrimitiveDrawer<'_> {
    fn draw_mesh(&mut self, element: &MeshElement) {
        if !self.accepts(element) {
            return;
        }
        let source = match self.origin {
            Some(ElementOrigin::Primitive(primitive)) => MeshSource::Dynamic {
                primitive,
                element: element.index,
            },
            Some(ElementOrigin::View(group)) => MeshSource::ViewElement {
                group,
                element: element.index,
            },
            None => {
                log::warn!("Dropping dynamic element {} without an origin", element.index);
                return;
            }
        };
        self.encoder.draw_mesh(&MeshDrawCommand {
            view_index: self.view_index,
            source,
            policy: self.policy,
        });
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_lane::test_support::RecordingEncoder;

    #[test]
    fn test_non_masked_depth_drops_masked_elements() {
        let mut encoder = RecordingEncoder::default();
        let mut drawer = DynamicPrimitiveDrawer::new(
            &mut encoder,
            0,
            DrawingPolicy::Depth(DepthDrawingMode::NonMaskedOnly),
        );
        drawer.set_primitive(PrimitiveId(4));
        drawer.draw_mesh(&MeshElement::masked(0));
        assert!(!drawer.is_dirty());
        drawer.draw_mesh(&MeshElement::opaque(1));
        assert!(drawer.is_dirty());
        assert_eq!(
            encoder.sources(),
            vec![MeshSource::Dynamic {
                primitive: PrimitiveId(4),
                element: 1
            }]
        );
    }

    #[test]
    fn test_all_occluders_and_base_pass_keep_masked_elements() {
        for policy in [
            DrawingPolicy::Depth(DepthDrawingMode::AllOccluders),
            DrawingPolicy::BasePass,
        ] {
            let mut encoder = RecordingEncoder::default();
            let mut drawer = DynamicPrimitiveDrawer::new(&mut encoder, 1, policy);
            drawer.set_view_group(DepthPriorityGroup::Foreground);
            drawer.draw_mesh(&MeshElement::masked(2));
            assert!(drawer.is_dirty());
            assert_eq!(encoder.draws.len(), 1);
            assert_eq!(encoder.draws[0].policy, policy);
            assert_eq!(
                encoder.draws[0].source,
                MeshSource::ViewElement {
                    group: DepthPriorityGroup::Foreground,
                    element: 2
                }
            );
        }
    }
}
