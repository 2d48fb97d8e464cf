use std::path::Path;

use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};
use scene_scatter::prelude::{CameraView, Domain, SceneOutcome, ScenePlan};
use tracing::info;

const LAYER_COLORS: [[u8; 3]; 6] = [
    [200, 40, 40],
    [40, 90, 200],
    [30, 150, 60],
    [200, 140, 20],
    [130, 50, 170],
    [20, 150, 160],
];

/// Output image and the world rectangle (XY plane) it covers.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub world_min: Vec2,
    pub world_max: Vec2,
    pub background: [u8; 3],
    /// Tint for the part of the base plane the camera sees.
    pub visible_tint: [u8; 3],
    /// Disc radius in pixels for an instance of scale 1.
    pub marker_radius: i32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), world_min: Vec2, world_max: Vec2) -> Self {
        Self {
            image_size,
            world_min,
            world_max,
            background: [235, 235, 235],
            visible_tint: [255, 250, 215],
            marker_radius: 6,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_marker_radius(mut self, marker_radius: i32) -> Self {
        self.marker_radius = marker_radius;
        self
    }
}

/// Top-down canvas looking down world `-Z`, `+Y` pointing up in the image.
pub struct TopDownCanvas {
    image: RgbImage,
    config: RenderConfig,
}

impl TopDownCanvas {
    pub fn new(config: RenderConfig) -> Self {
        let (w, h) = config.image_size;
        let image = RgbImage::from_pixel(w.max(1), h.max(1), Rgb(config.background));
        Self { image, config }
    }

    fn to_pixel(&self, p: Vec2) -> (i32, i32) {
        let span = (self.config.world_max - self.config.world_min).max(Vec2::splat(f32::EPSILON));
        let t = (p - self.config.world_min) / span;
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        ((t.x * w) as i32, ((1.0 - t.y) * h) as i32)
    }

    fn to_world(&self, x: u32, y: u32) -> Vec2 {
        let span = self.config.world_max - self.config.world_min;
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let t = Vec2::new((x as f32 + 0.5) / w, 1.0 - (y as f32 + 0.5) / h);
        self.config.world_min + t * span
    }

    fn put(&mut self, x: i32, y: i32, color: [u8; 3]) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    /// Tints every pixel whose point at height `z` the camera sees.
    pub fn shade_visible_plane(&mut self, view: &CameraView, z: f32) {
        let tint = self.config.visible_tint;
        for y in 0..self.image.height() {
            for x in 0..self.image.width() {
                let p = self.to_world(x, y);
                if view.sees(Vec3::new(p.x, p.y, z)) {
                    self.image.put_pixel(x, y, Rgb(tint));
                }
            }
        }
    }

    /// Outlines the footprint of a placement volume.
    pub fn draw_domain(&mut self, domain: &Domain, color: [u8; 3]) {
        let (min, max) = domain.world_bounds();
        let (x0, y1) = self.to_pixel(min.truncate());
        let (x1, y0) = self.to_pixel(max.truncate());
        for x in x0..=x1 {
            self.put(x, y0, color);
            self.put(x, y1, color);
        }
        for y in y0..=y1 {
            self.put(x0, y, color);
            self.put(x1, y, color);
        }
    }

    pub fn draw_disc(&mut self, center: Vec2, radius: i32, color: [u8; 3]) {
        let (cx, cy) = self.to_pixel(center);
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Small cross, used for candidates that were not picked.
    pub fn draw_cross(&mut self, center: Vec2, color: [u8; 3]) {
        let (cx, cy) = self.to_pixel(center);
        for d in -2..=2 {
            self.put(cx + d, cy, color);
            self.put(cx, cy + d, color);
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        self.image.save(path.as_ref())?;
        info!("Wrote {}.", path.as_ref().display());
        Ok(())
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Renders every layer of `outcome` from above: the camera's visible area at
/// each layer's base height, the volume footprints and the placed instances.
pub fn render_scene_to_png<H>(
    plan: &ScenePlan,
    outcome: &SceneOutcome<H>,
    view: &CameraView,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut canvas = TopDownCanvas::new(config.clone());
    if let Some(first) = plan.layers.first() {
        canvas.shade_visible_plane(view, first.request.domain.base_height);
    }

    for (i, layer) in plan.layers.iter().enumerate() {
        let color = LAYER_COLORS[i % LAYER_COLORS.len()];
        canvas.draw_domain(&layer.request.domain, color);

        let Some(done) = outcome.layer(&layer.id) else {
            continue;
        };
        for placement in &done.population.placements {
            let radius = ((config.marker_radius as f32) * placement.scale).round().max(1.0) as i32;
            canvas.draw_disc(placement.position.truncate(), radius, color);
        }
    }

    canvas.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_corners_map_to_image_corners() {
        let canvas = TopDownCanvas::new(RenderConfig::new(
            (100, 50),
            Vec2::new(-5.0, -2.5),
            Vec2::new(5.0, 2.5),
        ));
        assert_eq!(canvas.to_pixel(Vec2::new(-5.0, 2.5)), (0, 0));
        assert_eq!(canvas.to_pixel(Vec2::new(0.0, 0.0)), (50, 25));
        let p = canvas.to_world(0, 49);
        assert!(p.x < -4.9 && p.y < -2.4);
    }

    #[test]
    fn drawing_outside_the_image_is_ignored() {
        let mut canvas = TopDownCanvas::new(RenderConfig::new(
            (10, 10),
            Vec2::splat(-1.0),
            Vec2::splat(1.0),
        ));
        canvas.draw_disc(Vec2::new(50.0, 50.0), 3, [0, 0, 0]);
        canvas.draw_disc(Vec2::ZERO, 1, [1, 2, 3]);
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(5, 5).0, [1, 2, 3]);
        assert_eq!(image.get_pixel(0, 0).0, [235, 235, 235]);
    }
}
