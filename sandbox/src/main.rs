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

// Umbra Sandbox
// Renders a few frames of a small scene through a logging device.

mod scene_systems;
mod tracing_device;

use anyhow::{Context, Result};
use scene_systems::{
    DistanceCulling, LoggingAtmosphere, LoggingHooks, LoggingLighting, LoggingTranslucency,
    MovableCrate,
};
use tracing_device::{TracingEncoder, TracingTargets};
use umbra_agents::render_agent::{DeferredShadingAgent, RendererServices};
use umbra_core::{
    math::{Extent2D, IntRect, Mat4, Vec3},
    renderer::{DeviceCapabilities, ShowFlags},
    scene::{
        AtmosphericFog, DrawType, LightingTechnique, Scene, StaticMeshBatch, StaticMeshId,
    },
    SceneView, ViewFamily,
};

const WINDOW_SIZE: Extent2D = Extent2D::new(1280, 720);

fn build_scene() -> Scene {
    let mut scene = Scene::new();
    let batches = [
        (LightingTechnique::HighQualityLightMap, DrawType::Opaque, 40.0),
        (LightingTechnique::NoLightMap, DrawType::Opaque, 8.0),
        (LightingTechnique::LowQualityLightMap, DrawType::Masked, 15.0),
        (LightingTechnique::SimpleDynamicLighting, DrawType::Opaque, 500.0),
    ];
    for (index, (technique, draw_type, distance)) in batches.into_iter().enumerate() {
        let batch = StaticMeshBatch {
            id: StaticMeshId(index),
            origin: Vec3::new(0.0, 0.0, -distance),
        };
        scene
            .base_pass_draw_lists
            .get_mut(technique, draw_type)
            .add(batch);
        if draw_type == DrawType::Opaque {
            scene.depth_draw_lists.position_only.add(batch);
        }
    }
    scene.add_primitive(Box::new(MovableCrate {
        position: Vec3::new(2.0, 0.0, -6.0),
    }));
    scene.atmospheric_fog = Some(AtmosphericFog::default());
    scene
}

fn build_family(show_flags: ShowFlags, split_screen: bool) -> ViewFamily {
    let aspect = WINDOW_SIZE.width as f32 / WINDOW_SIZE.height as f32;
    let rects = if split_screen {
        vec![
            IntRect::new(0, 0, WINDOW_SIZE.width / 2, WINDOW_SIZE.height),
            IntRect::new(WINDOW_SIZE.width / 2, 0, WINDOW_SIZE.width, WINDOW_SIZE.height),
        ]
    } else {
        vec![IntRect::from_extent(WINDOW_SIZE)]
    };
    rects
        .into_iter()
        .fold(ViewFamily::new(WINDOW_SIZE, show_flags), |family, rect| {
            let mut view = SceneView::new(rect);
            view.projection = Mat4::perspective_reversed_rh(60f32.to_radians(), aspect, 0.1, 1000.0);
            family.with_view(view)
        })
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/renderer.ron");
    let mut agent = DeferredShadingAgent::from_config_file(DeviceCapabilities::default(), config_path)
        .with_context(|| format!("failed to create the renderer from '{config_path}'"))?;

    let mut services = RendererServices::new(
        Box::new(DistanceCulling { max_distance: 100.0 }),
        Box::new(LoggingLighting),
        Box::new(LoggingAtmosphere),
        Box::new(LoggingTranslucency),
        Box::new(LoggingHooks),
    );
    let mut encoder = TracingEncoder::default();
    let mut targets = TracingTargets::new(1);
    let mut scene = build_scene();

    let frames = [
        ("game", ShowFlags::game(), false),
        ("split screen", ShowFlags::game(), true),
        ("shader complexity", ShowFlags::game() | ShowFlags::SHADER_COMPLEXITY, false),
        ("rendering off", ShowFlags::game() - ShowFlags::RENDERING, false),
    ];
    for (name, flags, split_screen) in frames {
        let mut family = build_family(flags, split_screen);
        encoder.reset();
        let report = agent
            .render(&mut family, &mut scene, &mut services, &mut encoder, &mut targets)
            .with_context(|| format!("frame '{name}' failed"))?;
        log::info!(
            "Frame '{name}': {} draws in {:?}, clear {:?}, pre-pass {}, dirty {}",
            encoder.draw_calls(),
            agent.last_frame_time(),
            report.executed_clear,
            report.policy.use_depth_only_prepass,
            report.is_dirty()
        );
    }

    log::info!("Rendered {} frames", agent.frame_count());
    Ok(())
}
