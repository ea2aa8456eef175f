//! The body tree and its per-frame update.

use chrono::{DateTime, Utc};
use glam::DVec3;
use orrery_bodies::{BodyCatalog, CelestialBody};
use orrery_lod::{
    BodyAssets, DisplayState, EMISSIVE_COLOR, FALLBACK_COLOR, TierAssets, placeholder_color,
};
use orrery_orbit::orbit_path_radii;
use tracing::{debug, info, warn};

use crate::loader::{AssetLoader, LoadStatus};
use crate::settings::SceneSettings;
use crate::snapshot::{
    Appearance, CLOUD_OPACITY, CLOUD_SCALE, CloudLayer, DrawItem, EMISSIVE_INTENSITY,
    FrameSnapshot, LABEL_OFFSET, Label, OrbitGuide, RING_INNER, RING_OUTER, RingLayer,
};
use crate::state::{RenderPhase, RenderState};

/// Inputs sampled by the host at the start of a frame.
#[derive(Clone, Debug)]
pub struct FrameInput {
    pub date: DateTime<Utc>,
    pub camera_position: DVec3,
    /// Path of the body under the pointer, if any.
    pub pointer_over: Option<String>,
}

/// Render node mirroring one [`CelestialBody`]; moons are owned by their parent.
#[derive(Clone, Debug)]
struct SceneNode {
    path: String,
    state: RenderState,
    moons: Vec<SceneNode>,
}

impl SceneNode {
    fn build(body: &CelestialBody, parent: &str) -> Self {
        let path = if parent.is_empty() {
            body.name.clone()
        } else {
            format!("{parent}/{}", body.name)
        };
        let moons = body.moons.iter().map(|m| SceneNode::build(m, &path)).collect();
        Self {
            state: RenderState::new(body.assets.is_some()),
            path,
            moons,
        }
    }

    fn find(&self, path: &str) -> Option<&SceneNode> {
        if self.path == path {
            return Some(self);
        }
        self.moons.iter().find_map(|m| m.find(path))
    }
}

/// A mounted scene: immutable bodies plus their per-frame render state.
pub struct Scene {
    catalog: BodyCatalog,
    settings: SceneSettings,
    nodes: Vec<SceneNode>,
    frame: u64,
}

impl Scene {
    pub fn new(catalog: BodyCatalog, settings: SceneSettings) -> Self {
        let nodes = catalog
            .bodies()
            .iter()
            .map(|b| SceneNode::build(b, ""))
            .collect();
        Self {
            catalog,
            settings,
            nodes,
            frame: 0,
        }
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Render state of the body at `path`, e.g. `Earth/Moon`.
    pub fn state(&self, path: &str) -> Option<&RenderState> {
        self.nodes
            .iter()
            .find_map(|n| n.find(path))
            .map(|n| &n.state)
    }

    /// Advance every body by one frame and describe what to draw.
    pub fn update(&mut self, input: &FrameInput, loader: &mut dyn AssetLoader) -> FrameSnapshot {
        loader.poll();

        let mut items = Vec::with_capacity(self.nodes.len());
        let frame = FrameContext {
            settings: &self.settings,
            input,
        };
        for (body, node) in self.catalog.bodies().iter().zip(self.nodes.iter_mut()) {
            frame.update_node(body, node, DVec3::ZERO, loader, &mut items);
        }

        let snapshot = FrameSnapshot {
            frame: self.frame,
            items,
        };
        self.frame += 1;
        snapshot
    }
}

struct FrameContext<'a> {
    settings: &'a SceneSettings,
    input: &'a FrameInput,
}

impl FrameContext<'_> {
    fn update_node(
        &self,
        body: &CelestialBody,
        node: &mut SceneNode,
        parent_position: DVec3,
        loader: &mut dyn AssetLoader,
        out: &mut Vec<DrawItem>,
    ) {
        let calculator = &self.settings.calculator;
        let local = calculator.position_at(&body.orbit(), self.input.date);
        let position = parent_position + local.to_world();
        let camera_distance = (self.input.camera_position - position).length();

        let state = &mut node.state;
        state.position = position;
        state.rotation += body.rotation_step();
        state.hovered = self.input.pointer_over.as_deref() == Some(node.path.as_str());

        if let Some(assets) = &body.assets {
            if let Some(next) = self.advance_phase(
                &node.path,
                body,
                assets,
                camera_distance,
                &state.phase,
                loader,
            ) {
                state.phase = next;
            }
        }

        out.push(self.draw_item(body, node, parent_position, camera_distance));

        for (moon, moon_node) in body.moons.iter().zip(node.moons.iter_mut()) {
            self.update_node(moon, moon_node, position, loader, out);
        }
    }

    /// The phase after this frame, or `None` if unchanged.
    fn advance_phase(
        &self,
        path: &str,
        body: &CelestialBody,
        assets: &BodyAssets,
        camera_distance: f64,
        phase: &RenderPhase,
        loader: &mut dyn AssetLoader,
    ) -> Option<RenderPhase> {
        let thresholds = self.settings.multipliers.thresholds_for(body.radius);

        let current = match phase {
            RenderPhase::Untextured | RenderPhase::Failed => return None,
            RenderPhase::Ready(display) => display.clone(),
            RenderPhase::Loading => {
                let baseline = assets.baseline()?;
                loader.request(baseline);
                match loader.status(baseline) {
                    LoadStatus::Pending => return None,
                    LoadStatus::Failed => {
                        warn!(
                            body = %path,
                            asset = %baseline,
                            "baseline texture failed; keeping placeholder"
                        );
                        return Some(RenderPhase::Failed);
                    }
                    LoadStatus::Ready => {
                        for handle in assets.all_handles() {
                            loader.request(handle);
                        }
                        info!(body = %path, "textures ready");
                        DisplayState::initial(&available_assets(assets, loader)).ok()?
                    }
                }
            }
        };

        let available = available_assets(assets, loader);
        let next = current.advance(
            camera_distance,
            &thresholds,
            &available,
            self.settings.retention,
        );
        if next.tier != current.tier {
            debug!(
                body = %path,
                from = %current.tier,
                to = %next.tier,
                distance = camera_distance,
                "LOD tier changed"
            );
        }
        Some(RenderPhase::Ready(next))
    }

    fn draw_item(
        &self,
        body: &CelestialBody,
        node: &SceneNode,
        parent_position: DVec3,
        camera_distance: f64,
    ) -> DrawItem {
        let geometry = &self.settings.geometry;
        let state = &node.state;

        let (appearance, segments) = match &state.phase {
            RenderPhase::Ready(display) => (
                Appearance::Textured {
                    tier: display.tier,
                    surface: display.surface.clone(),
                    clouds: display.clouds.clone().map(|texture| CloudLayer {
                        texture,
                        scale: CLOUD_SCALE,
                        opacity: CLOUD_OPACITY,
                    }),
                    ring: display.ring.clone().map(|texture| RingLayer {
                        texture,
                        inner_radius: body.radius * RING_INNER,
                        outer_radius: body.radius * RING_OUTER,
                        segments: geometry.ring_segments,
                    }),
                    emission: body.emissive.then_some((EMISSIVE_COLOR, EMISSIVE_INTENSITY)),
                },
                geometry.sphere_segments,
            ),
            RenderPhase::Failed => (
                Appearance::Placeholder {
                    color: FALLBACK_COLOR,
                },
                geometry.placeholder_segments,
            ),
            RenderPhase::Untextured | RenderPhase::Loading => (
                Appearance::Placeholder {
                    color: placeholder_color(body.emissive),
                },
                geometry.placeholder_segments,
            ),
        };

        let label = state.hovered.then(|| Label {
            text: body.name.clone(),
            position: state.position + DVec3::new(0.0, body.radius + LABEL_OFFSET, 0.0),
        });

        let orbit_guide = orbit_path_radii(body.distance, self.settings.calculator.scale_factor())
            .map(|(inner_radius, outer_radius)| OrbitGuide {
                center: parent_position,
                inner_radius,
                outer_radius,
                segments: geometry.orbit_path_segments,
            });

        DrawItem {
            path: node.path.clone(),
            position: state.position,
            radius: body.radius,
            tilt: body.tilt_radians(),
            rotation: state.rotation,
            segments,
            appearance,
            label,
            orbit_guide,
            camera_distance,
        }
    }
}

/// `assets` restricted to handles whose loads have completed.
fn available_assets(assets: &BodyAssets, loader: &dyn AssetLoader) -> BodyAssets {
    let ready = |tier: &TierAssets| TierAssets {
        surface: tier.surface.clone().filter(|h| loader.status(h) == LoadStatus::Ready),
        clouds: tier.clouds.clone().filter(|h| loader.status(h) == LoadStatus::Ready),
        ring: tier.ring.clone().filter(|h| loader.status(h) == LoadStatus::Ready),
    };
    BodyAssets {
        low: ready(&assets.low),
        medium: assets.medium.as_ref().map(ready),
        high: assets.high.as_ref().map(ready),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::ManualAssetLoader;
    use orrery_config::Config;
    use orrery_lod::Tier;
    use orrery_orbit::parse_date;

    fn settings() -> SceneSettings {
        SceneSettings::from_config(&Config::default()).unwrap()
    }

    fn input(camera: DVec3) -> FrameInput {
        FrameInput {
            date: parse_date("2000-01-01").unwrap(),
            camera_position: camera,
            pointer_over: None,
        }
    }

    fn textured(name: &str, radius: f64) -> CelestialBody {
        let mut body = CelestialBody::new(name, radius);
        let lower = name.to_lowercase();
        body.assets = Some(BodyAssets {
            low: TierAssets::surface(format!("low/{lower}.jpg")),
            medium: Some(TierAssets::surface(format!("med/{lower}.jpg"))),
            high: Some(TierAssets::surface(format!("high/{lower}.jpg"))),
        });
        body
    }

    #[test]
    fn test_placeholder_until_baseline_ready() {
        let catalog = BodyCatalog::new(vec![textured("Mars", 5.0)]).unwrap();
        let mut scene = Scene::new(catalog, settings());
        let mut loader = ManualAssetLoader::new();

        let snap = scene.update(&input(DVec3::new(0.0, 0.0, 10_000.0)), &mut loader);
        assert_eq!(
            snap.items[0].appearance,
            Appearance::Placeholder {
                color: placeholder_color(false)
            }
        );
        assert_eq!(loader.requests()[0].as_str(), "low/mars.jpg");

        loader.mark_ready("low/mars.jpg");
        let snap = scene.update(&input(DVec3::new(0.0, 0.0, 10_000.0)), &mut loader);
        assert!(matches!(
            snap.items[0].appearance,
            Appearance::Textured { tier: Tier::Low, .. }
        ));
        // All tiers requested once the baseline arrived.
        assert_eq!(loader.requests().len(), 3);
    }

    #[test]
    fn test_unloaded_low_tier_layers_are_not_shown() {
        let mut earth = CelestialBody::new("Earth", 10.0);
        earth.assets = Some(BodyAssets {
            low: TierAssets {
                surface: Some("low/earth.jpg".into()),
                clouds: Some("low/clouds.png".into()),
                ring: Some("low/ring.png".into()),
            },
            medium: None,
            high: None,
        });
        let mut scene = Scene::new(BodyCatalog::new(vec![earth]).unwrap(), settings());
        let mut loader = ManualAssetLoader::new();
        loader.mark_ready("low/earth.jpg");
        loader.mark_failed("low/clouds.png");

        let far = input(DVec3::new(0.0, 0.0, 10_000.0));
        for _ in 0..3 {
            let snap = scene.update(&far, &mut loader);
            let Appearance::Textured { clouds, ring, .. } = &snap.items[0].appearance else {
                panic!("Earth should be textured");
            };
            assert!(clouds.is_none(), "failed clouds texture displayed");
            assert!(ring.is_none(), "pending ring texture displayed");
        }

        loader.mark_ready("low/ring.png");
        let snap = scene.update(&far, &mut loader);
        let Appearance::Textured { clouds, ring, .. } = &snap.items[0].appearance else {
            panic!("Earth should be textured");
        };
        assert!(clouds.is_none());
        assert_eq!(ring.as_ref().unwrap().texture.as_str(), "low/ring.png");
    }

    #[test]
    fn test_unloaded_higher_tier_is_not_shown() {
        let catalog = BodyCatalog::new(vec![textured("Mars", 5.0)]).unwrap();
        let mut scene = Scene::new(catalog, settings());
        let mut loader = ManualAssetLoader::new();
        loader.mark_ready("low/mars.jpg");

        let close = input(DVec3::new(0.0, 0.0, 100.0));
        scene.update(&close, &mut loader);
        let display = scene.state("Mars").unwrap().phase.display().unwrap().clone();
        assert_eq!(display.tier, Tier::High);
        assert_eq!(display.surface.as_str(), "low/mars.jpg");

        loader.mark_ready("high/mars.jpg");
        scene.update(&close, &mut loader);
        let display = scene.state("Mars").unwrap().phase.display().unwrap().clone();
        assert_eq!(display.surface.as_str(), "high/mars.jpg");
    }

    #[test]
    fn test_failed_baseline_keeps_fallback_placeholder() {
        let catalog = BodyCatalog::new(vec![textured("Mars", 5.0)]).unwrap();
        let mut scene = Scene::new(catalog, settings());
        let mut loader = ManualAssetLoader::new();
        loader.mark_failed("low/mars.jpg");

        for _ in 0..3 {
            let snap = scene.update(&input(DVec3::new(0.0, 0.0, 50.0)), &mut loader);
            assert_eq!(
                snap.items[0].appearance,
                Appearance::Placeholder {
                    color: FALLBACK_COLOR
                }
            );
        }
        assert_eq!(scene.state("Mars").unwrap().phase, RenderPhase::Failed);
    }

    #[test]
    fn test_untextured_emissive_body_uses_emissive_placeholder() {
        let mut sun = CelestialBody::new("Sun", 60.0);
        sun.emissive = true;
        let mut scene = Scene::new(BodyCatalog::new(vec![sun]).unwrap(), settings());
        let snap = scene.update(&input(DVec3::Z * 1000.0), &mut ManualAssetLoader::instant());
        assert_eq!(
            snap.items[0].appearance,
            Appearance::Placeholder {
                color: EMISSIVE_COLOR
            }
        );
        assert!(snap.items[0].orbit_guide.is_none());
        assert_eq!(snap.items[0].segments, 32);
    }

    #[test]
    fn test_moon_position_relative_to_parent() {
        let mut earth = CelestialBody::new("Earth", 10.0);
        earth.distance = 1.0;
        earth.period_days = Some(365.25);
        let mut moon = CelestialBody::new("Moon", 2.7);
        moon.distance = 0.1;
        moon.period_days = Some(27.3);
        moon.initial_angle = std::f64::consts::FRAC_PI_2;
        earth.moons.push(moon);

        let mut scene = Scene::new(BodyCatalog::new(vec![earth]).unwrap(), settings());
        let snap = scene.update(&input(DVec3::ZERO), &mut ManualAssetLoader::new());

        let earth = snap.get("Earth").unwrap();
        let moon = snap.get("Earth/Moon").unwrap();
        assert!((earth.position - DVec3::new(350.0, 0.0, 0.0)).length() < 1e-9);
        assert!((moon.position - DVec3::new(350.0, 0.0, 35.0)).length() < 1e-9);
        assert_eq!(moon.orbit_guide.as_ref().unwrap().center, earth.position);
        assert!((moon.camera_distance - moon.position.length()).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_accumulates_per_frame() {
        let mut venus = CelestialBody::new("Venus", 9.5);
        venus.rotation_speed = 0.01;
        venus.rotation_direction = orrery_bodies::RotationDirection::Retrograde;
        let mut scene = Scene::new(BodyCatalog::new(vec![venus]).unwrap(), settings());
        let mut loader = ManualAssetLoader::new();
        for _ in 0..10 {
            scene.update(&input(DVec3::ZERO), &mut loader);
        }
        assert!((scene.state("Venus").unwrap().rotation + 0.1).abs() < 1e-12);
        assert_eq!(scene.frame(), 10);
    }

    #[test]
    fn test_label_visible_only_while_hovered() {
        let catalog = BodyCatalog::new(vec![CelestialBody::new("Mars", 5.0)]).unwrap();
        let mut scene = Scene::new(catalog, settings());
        let mut loader = ManualAssetLoader::new();

        let mut frame = input(DVec3::ZERO);
        frame.pointer_over = Some("Mars".to_string());
        let snap = scene.update(&frame, &mut loader);
        let label = snap.items[0].label.as_ref().unwrap();
        assert_eq!(label.text, "Mars");
        assert_eq!(label.position.y, 20.0);

        frame.pointer_over = None;
        let snap = scene.update(&frame, &mut loader);
        assert!(snap.items[0].label.is_none());
    }
}
