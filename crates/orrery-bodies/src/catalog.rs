//! Body catalogs: RON/JSON loading, texture shorthand expansion, and validation.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::Deserialize;

use orrery_lod::BodyAssets;

use crate::body::{CelestialBody, DEFAULT_ROTATION_SPEED, RotationDirection, TextureSet};
use crate::error::CatalogError;

const BUILTIN_RON: &str = include_str!("../data/solar_system.ron");

// ---------------------------------------------------------------------------
// On-disk schema
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    texture_root: String,
    bodies: Vec<BodyEntry>,
}

#[derive(Deserialize)]
struct BodyEntry {
    name: String,
    radius: f64,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    period_days: Option<f64>,
    #[serde(default)]
    initial_angle: f64,
    #[serde(default)]
    tilt_degrees: f64,
    #[serde(default = "default_rotation_speed")]
    rotation_speed: f64,
    #[serde(default)]
    rotation_direction: RotationDirection,
    #[serde(default)]
    emissive: bool,
    #[serde(default)]
    assets: Option<BodyAssets>,
    #[serde(default)]
    textures: Option<TextureSet>,
    #[serde(default)]
    moons: Vec<BodyEntry>,
}

fn default_rotation_speed() -> f64 {
    DEFAULT_ROTATION_SPEED
}

impl BodyEntry {
    fn into_body(self, root: &str, parent: &str) -> Result<CelestialBody, CatalogError> {
        let path = join_path(parent, &self.name);
        let assets = match (self.assets, self.textures) {
            (Some(_), Some(_)) => return Err(CatalogError::ConflictingTextures { path }),
            (Some(assets), None) => Some(assets),
            (None, Some(set)) => Some(set.expand(root)),
            (None, None) => None,
        };
        let moons = self
            .moons
            .into_iter()
            .map(|moon| moon.into_body(root, &path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CelestialBody {
            name: self.name,
            radius: self.radius,
            distance: self.distance,
            period_days: self.period_days,
            initial_angle: self.initial_angle,
            tilt_degrees: self.tilt_degrees,
            rotation_speed: self.rotation_speed,
            rotation_direction: self.rotation_direction,
            emissive: self.emissive,
            assets,
            moons,
        })
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

// ---------------------------------------------------------------------------
// BodyCatalog
// ---------------------------------------------------------------------------

/// The top-level bodies of a scene; moons hang off their parents.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyCatalog {
    bodies: Vec<CelestialBody>,
}

impl BodyCatalog {
    /// Wrap and validate an in-memory body list.
    pub fn new(bodies: Vec<CelestialBody>) -> Result<Self, CatalogError> {
        let catalog = Self { bodies };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The embedded solar system, Sun to Pluto.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_ron_str(BUILTIN_RON)
    }

    pub fn from_ron_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = ron::from_str(source)?;
        Self::from_file(file)
    }

    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(source)?;
        Self::from_file(file)
    }

    /// Load a `.ron` or `.json` catalog from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, CatalogError> = match ext.as_deref() {
            Some("ron") => Self::from_ron_str,
            Some("json") => Self::from_json_str,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };

        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = parse(&contents)?;
        log::info!(
            "Loaded {} bodies from {}",
            catalog.walk().count(),
            path.display()
        );
        Ok(catalog)
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let bodies = file
            .bodies
            .into_iter()
            .map(|entry| entry.into_body(&file.texture_root, ""))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(bodies)
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Depth-first traversal yielding `(path, body)`, parents before moons.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self
                .bodies
                .iter()
                .rev()
                .map(|b| (b.name.clone(), b))
                .collect(),
        }
    }

    /// Look up a body by slash-separated path, e.g. `Earth/Moon`.
    pub fn find(&self, path: &str) -> Option<&CelestialBody> {
        let mut segments = path.split('/');
        let first = segments.next()?;
        let mut body = self.bodies.iter().find(|b| b.name == first)?;
        for segment in segments {
            body = body.moons.iter().find(|m| m.name == segment)?;
        }
        Some(body)
    }

    /// Fail fast on anything the renderer could not display sensibly.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.bodies.is_empty() {
            return Err(CatalogError::Empty);
        }
        validate_siblings(&self.bodies, "")
    }
}

/// Names only need to be unique among siblings: paths identify bodies.
fn validate_siblings(bodies: &[CelestialBody], parent: &str) -> Result<(), CatalogError> {
    let mut names = FxHashSet::default();
    for body in bodies {
        if body.name.trim().is_empty() {
            return Err(CatalogError::EmptyName {
                parent: parent.to_string(),
            });
        }
        if !names.insert(body.name.as_str()) {
            return Err(CatalogError::DuplicateName {
                path: join_path(parent, &body.name),
            });
        }
        validate_body(body, parent)?;
    }
    Ok(())
}

fn validate_body(body: &CelestialBody, parent: &str) -> Result<(), CatalogError> {
    let path = join_path(parent, &body.name);

    let non_negative = [
        ("radius", body.radius),
        ("distance", body.distance),
        ("period_days", body.period_days.unwrap_or(0.0)),
    ];
    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(CatalogError::InvalidField { path, field, value });
        }
    }
    let finite = [
        ("initial_angle", body.initial_angle),
        ("tilt_degrees", body.tilt_degrees),
        ("rotation_speed", body.rotation_speed),
    ];
    for (field, value) in finite {
        if !value.is_finite() {
            return Err(CatalogError::InvalidField { path, field, value });
        }
    }

    if let Some(assets) = &body.assets {
        assets.validate().map_err(|source| CatalogError::Assets {
            path: path.clone(),
            source,
        })?;
    }

    validate_siblings(&body.moons, &path)
}

/// Iterator returned by [`BodyCatalog::walk`].
pub struct Walk<'a> {
    stack: Vec<(String, &'a CelestialBody)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (String, &'a CelestialBody);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, body) = self.stack.pop()?;
        for moon in body.moons.iter().rev() {
            self.stack.push((join_path(&path, &moon.name), moon));
        }
        Some((path, body))
    }
}
