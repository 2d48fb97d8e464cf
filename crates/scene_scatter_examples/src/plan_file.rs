use std::path::{Path, PathBuf};

use glam::{EulerRot, Quat, Vec3};
use scene_scatter::prelude::*;
use serde::{Deserialize, Serialize};

/// Scene description loaded from RON: one camera plus an ordered list of layers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneFile {
    pub seed: u64,
    pub camera: CameraDef,
    pub plan: ScenePlanDef,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenePlanDef {
    pub layers: Vec<LayerDef>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayerDef {
    pub id: String,
    pub request: PlacementRequest,
    pub pool: PoolDef,
    #[serde(default)]
    pub scale: Option<ScaleRange>,
}

/// Where a layer's asset sources come from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PoolDef {
    /// Explicit list of files.
    Paths(Vec<PathBuf>),
    /// Every file with `extension` directly inside `dir`.
    Dir { dir: PathBuf, extension: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraDef {
    pub location: [f32; 3],
    /// XYZ Euler angles in degrees.
    #[serde(default)]
    pub rotation_deg: [f32; 3],
    pub projection: ProjectionDef,
    #[serde(default)]
    pub clip: Option<(f32, f32)>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ProjectionDef {
    Perspective {
        focal_mm: f32,
        #[serde(default = "default_sensor_width")]
        sensor_width_mm: f32,
        resolution: (u32, u32),
    },
    FieldOfView {
        fov_x_deg: f32,
        fov_y_deg: f32,
    },
    Orthographic {
        scale: f32,
        resolution: (u32, u32),
    },
}

fn default_sensor_width() -> f32 {
    DEFAULT_SENSOR_WIDTH_MM
}

impl From<&ProjectionDef> for Projection {
    fn from(def: &ProjectionDef) -> Self {
        match *def {
            ProjectionDef::Perspective {
                focal_mm,
                sensor_width_mm,
                resolution,
            } => Projection::from_focal_length(focal_mm, sensor_width_mm, resolution),
            ProjectionDef::FieldOfView {
                fov_x_deg,
                fov_y_deg,
            } => Projection::perspective(fov_x_deg.to_radians(), fov_y_deg.to_radians()),
            ProjectionDef::Orthographic { scale, resolution } => {
                Projection::orthographic(scale, resolution)
            }
        }
    }
}

impl From<&CameraDef> for CameraModel {
    fn from(def: &CameraDef) -> Self {
        let [rx, ry, rz] = def.rotation_deg.map(f32::to_radians);
        // Extrinsic X, then Y, then Z.
        let rotation = Quat::from_euler(EulerRot::ZYX, rz, ry, rx);
        let camera = CameraModel::from_location_rotation(
            Vec3::from_array(def.location),
            rotation,
            (&def.projection).into(),
        );
        match def.clip {
            Some((start, end)) => camera.with_clip(start, end),
            None => camera,
        }
    }
}

impl PoolDef {
    /// Resolves the pool, reading relative paths against `root`.
    pub fn resolve(&self, id: &str, root: &Path) -> Result<AssetPool> {
        match self {
            PoolDef::Paths(paths) => Ok(AssetPool::from_paths(
                id,
                paths.iter().map(|p| root.join(p)),
            )),
            PoolDef::Dir { dir, extension } => AssetPool::scan_dir(id, root.join(dir), extension),
        }
    }
}

impl ScenePlanDef {
    /// Builds the runtime plan; directory pools are scanned here.
    pub fn to_plan(&self, root: &Path) -> Result<ScenePlan> {
        let mut plan = ScenePlan::new();
        for def in &self.layers {
            let pool = def.pool.resolve(&def.id, root)?;
            let mut layer = PlacementLayer::new(def.id.clone(), def.request.clone(), pool);
            if let Some(scale) = def.scale {
                layer = layer.with_scale(scale);
            }
            plan = plan.with_layer(layer);
        }
        Ok(plan)
    }
}

/// Reads and parses a [`SceneFile`] from a RON file.
pub fn load_scene_file(path: impl AsRef<Path>) -> anyhow::Result<SceneFile> {
    let bytes = std::fs::read(path.as_ref())?;
    let scene: SceneFile = ron::de::from_bytes(&bytes).map_err(|e| anyhow::anyhow!(e))?;
    Ok(scene)
}
