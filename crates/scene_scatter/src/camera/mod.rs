//! Read-only camera snapshot and world-to-view projection.
//!
//! [`CameraModel`] is the engine's copy of the host camera: its local (basis)
//! transform, an optional parent transform, a [`Projection`] and the clip
//! distances. The world transform is rebuilt from those parts every time a
//! [`CameraView`] is prepared, so a camera moved by an earlier randomization
//! step never projects through a stale matrix.
//!
//! Projection follows the usual DCC convention: the camera looks down its local
//! `-Z` axis with `+Y` up, and [`CameraView::project`] returns normalized frame
//! coordinates `x, y` in `[0, 1]` inside the frame plus the view depth `z`
//! along the forward axis.
use glam::{Affine3A, Quat, Vec2, Vec3};

use crate::error::{Error, Result};

pub mod visibility;

pub use visibility::{filter_visible, is_in_view, partition_visible};

/// Full-frame sensor width in millimeters.
pub const DEFAULT_SENSOR_WIDTH_MM: f32 = 36.0;
pub const DEFAULT_CLIP_START: f32 = 0.1;
pub const DEFAULT_CLIP_END: f32 = 100.0;

/// Camera projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Pinhole projection with full horizontal/vertical field of view in radians.
    Perspective { fov_x: f32, fov_y: f32 },
    /// Parallel projection with the frame size in world units.
    Orthographic { width: f32, height: f32 },
}

impl Projection {
    pub fn perspective(fov_x: f32, fov_y: f32) -> Self {
        Projection::Perspective { fov_x, fov_y }
    }

    /// Perspective projection from lens focal length and render resolution.
    ///
    /// The sensor width spans the larger image dimension; the other field of
    /// view follows from the aspect ratio.
    pub fn from_focal_length(focal_mm: f32, sensor_width_mm: f32, resolution: (u32, u32)) -> Self {
        let (w, h) = (resolution.0.max(1) as f32, resolution.1.max(1) as f32);
        let tan_major = sensor_width_mm / (2.0 * focal_mm);
        let (tan_x, tan_y) = if w >= h {
            (tan_major, tan_major * h / w)
        } else {
            (tan_major * w / h, tan_major)
        };
        Projection::Perspective {
            fov_x: 2.0 * tan_x.atan(),
            fov_y: 2.0 * tan_y.atan(),
        }
    }

    /// Orthographic projection whose larger frame dimension equals `scale`.
    pub fn orthographic(scale: f32, resolution: (u32, u32)) -> Self {
        let (w, h) = (resolution.0.max(1) as f32, resolution.1.max(1) as f32);
        if w >= h {
            Projection::Orthographic {
                width: scale,
                height: scale * h / w,
            }
        } else {
            Projection::Orthographic {
                width: scale * w / h,
                height: scale,
            }
        }
    }

    /// Half width/height of the frame at view depth `depth`.
    fn half_frame(&self, depth: f32) -> Vec2 {
        match *self {
            Projection::Perspective { fov_x, fov_y } => {
                Vec2::new((fov_x * 0.5).tan(), (fov_y * 0.5).tan()) * depth
            }
            Projection::Orthographic { width, height } => Vec2::new(width, height) * 0.5,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Projection::Perspective { fov_x, fov_y } => {
                let valid = |fov: f32| fov.is_finite() && fov > 0.0 && fov < std::f32::consts::PI;
                if !valid(fov_x) || !valid(fov_y) {
                    return Err(Error::DegenerateCamera(format!(
                        "field of view must lie in (0, pi), got fov_x={fov_x} fov_y={fov_y}"
                    )));
                }
            }
            Projection::Orthographic { width, height } => {
                if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
                    return Err(Error::DegenerateCamera(format!(
                        "orthographic frame must be > 0, got {width}x{height}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Snapshot of the host camera supplied once per placement pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraModel {
    /// Local transform of the camera object.
    pub basis: Affine3A,
    /// World transform of the camera's parent, if it has one.
    pub parent: Option<Affine3A>,
    pub projection: Projection,
    /// Near clip distance.
    pub clip_start: f32,
    /// Far clip distance.
    pub clip_end: f32,
}

impl CameraModel {
    pub fn new(basis: Affine3A, projection: Projection) -> Self {
        Self {
            basis,
            parent: None,
            projection,
            clip_start: DEFAULT_CLIP_START,
            clip_end: DEFAULT_CLIP_END,
        }
    }

    /// Camera at `location` with the given orientation.
    pub fn from_location_rotation(location: Vec3, rotation: Quat, projection: Projection) -> Self {
        Self::new(Affine3A::from_rotation_translation(rotation, location), projection)
    }

    /// Camera at `eye` aimed at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3, projection: Projection) -> Self {
        Self::new(Affine3A::look_at_rh(eye, target, up).inverse(), projection)
    }

    pub fn with_clip(mut self, clip_start: f32, clip_end: f32) -> Self {
        self.clip_start = clip_start;
        self.clip_end = clip_end;
        self
    }

    pub fn with_parent(mut self, parent: Affine3A) -> Self {
        self.parent = Some(parent);
        self
    }

    /// World transform recomputed from the basis and parent.
    pub fn world_transform(&self) -> Affine3A {
        match self.parent {
            Some(parent) => parent * self.basis,
            None => self.basis,
        }
    }

    /// World position of the camera.
    pub fn location(&self) -> Vec3 {
        self.world_transform().translation.into()
    }

    /// Checks clip distances, projection and transform for physical sense.
    pub fn validate(&self) -> Result<()> {
        let (near, far) = (self.clip_start, self.clip_end);
        if !near.is_finite() || !far.is_finite() || near <= 0.0 || near >= far {
            return Err(Error::DegenerateCamera(format!(
                "clip range must satisfy 0 < near < far, got near={near} far={far}"
            )));
        }
        self.projection.validate()?;

        let world = self.world_transform();
        let det = world.matrix3.determinant();
        if !world.is_finite() || !det.is_finite() || det.abs() <= f32::EPSILON {
            return Err(Error::DegenerateCamera(format!(
                "world transform is not invertible (determinant {det})"
            )));
        }
        Ok(())
    }

    /// Prepares a projection from the camera's current world transform.
    ///
    /// Scale on the world transform is discarded, only rotation and
    /// translation define the view.
    pub fn view(&self) -> CameraView {
        let (_, rotation, translation) = self.world_transform().to_scale_rotation_translation();
        let world_from_camera = Affine3A::from_rotation_translation(rotation, translation);
        CameraView {
            camera_from_world: world_from_camera.inverse(),
            projection: self.projection,
            clip_start: self.clip_start,
            clip_end: self.clip_end,
        }
    }

    /// Normalized frame coordinates and depth of a world point.
    pub fn world_to_camera_view(&self, point: Vec3) -> Vec3 {
        self.view().project(point)
    }
}

/// A camera refreshed for one filtering pass.
#[derive(Clone, Copy, Debug)]
pub struct CameraView {
    camera_from_world: Affine3A,
    projection: Projection,
    pub clip_start: f32,
    pub clip_end: f32,
}

impl CameraView {
    /// Maps a world point to `(x, y, depth)` with `x, y` normalized over the frame.
    ///
    /// A point on the camera plane of a perspective camera maps to `(0.5, 0.5, 0)`.
    pub fn project(&self, point: Vec3) -> Vec3 {
        let local = self.camera_from_world.transform_point3(point);
        let depth = -local.z;

        if depth == 0.0 && matches!(self.projection, Projection::Perspective { .. }) {
            return Vec3::new(0.5, 0.5, 0.0);
        }

        let half = self.projection.half_frame(depth);
        Vec3::new(
            (local.x + half.x) / (2.0 * half.x),
            (local.y + half.y) / (2.0 * half.y),
            depth,
        )
    }

    /// Whether a world point falls strictly inside the view frustum.
    pub fn sees(&self, point: Vec3) -> bool {
        is_in_view(self.project(point), self.clip_start, self.clip_end)
    }
}
