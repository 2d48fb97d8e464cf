//! Axis-aligned sampling volume and the corner-to-world recentering transform.
use std::fmt;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Box-shaped placement volume.
///
/// Samplers work in corner-origin coordinates `[0, extent)`. [`Domain::recenter`]
/// moves such a point so that the horizontal center of the box lands on world
/// `(0, 0)` and the bottom of the box sits at `base_height`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    /// Extent along world X.
    pub width: f32,
    /// Extent along world Y.
    pub depth: f32,
    /// Extent along world Z (up).
    pub height: f32,
    /// World Z of the bottom face after recentering.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_height: f32,
}

impl Domain {
    pub fn new(width: f32, depth: f32, height: f32) -> Self {
        Self {
            width,
            depth,
            height,
            base_height: 0.0,
        }
    }

    /// Sets the world height of the placement plane.
    pub fn with_base_height(mut self, base_height: f32) -> Self {
        self.base_height = base_height;
        self
    }

    pub fn extent(&self) -> Vec3 {
        Vec3::new(self.width, self.depth, self.height)
    }

    /// Translation applied to every corner-origin sample.
    pub fn offset(&self) -> Vec3 {
        Vec3::new(-self.width / 2.0, -self.depth / 2.0, self.base_height)
    }

    /// Maps a corner-origin sample into world space.
    #[inline]
    pub fn recenter(&self, local: Vec3) -> Vec3 {
        local + self.offset()
    }

    /// World-space `(min, max)` corners of the recentered box.
    pub fn world_bounds(&self) -> (Vec3, Vec3) {
        let min = self.offset();
        (min, min + self.extent())
    }

    /// Whether a corner-origin point lies in `[0, extent)` on every axis.
    pub fn contains_local(&self, p: Vec3) -> bool {
        p.x >= 0.0
            && p.x < self.width
            && p.y >= 0.0
            && p.y < self.depth
            && p.z >= 0.0
            && p.z < self.height
    }

    /// Whether a world-space point lies inside the closed recentered box.
    ///
    /// A sample just below the far face may round onto it after recentering.
    pub fn contains_world(&self, p: Vec3) -> bool {
        let (min, max) = self.world_bounds();
        p.cmpge(min).all() && p.cmple(max).all()
    }

    pub fn validate(&self) -> Result<()> {
        let extents = [self.width, self.depth, self.height];
        if extents.iter().any(|e| !e.is_finite() || *e <= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "domain extents must be finite and > 0, got {self}"
            )));
        }
        if !self.base_height.is_finite() {
            return Err(Error::InvalidConfig("domain base_height must be finite".into()));
        }
        Ok(())
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.depth, self.height)?;
        if self.base_height != 0.0 {
            write!(f, "@{}", self.base_height)?;
        }
        Ok(())
    }
}
