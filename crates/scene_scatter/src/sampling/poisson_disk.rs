//! Poisson disk position sampling strategy.
use glam::Vec3;
use mint::Vector3;
use rand::Rng as RngCore;

use crate::sampling::{rand01, rand_index, random_unit_vector, PositionSampling};

/// Default number of candidates tried around an active point before it retires.
pub const DEFAULT_REJECTION_THRESHOLD: usize = 30;

/// Poisson disk sampling strategy.
#[derive(Debug, Clone)]
pub struct PoissonDiskSampling {
    /// Minimum distance between samples in world units.
    pub radius: f32,
    /// Consecutive failed candidates after which an active point is retired.
    pub rejection_threshold: usize,
}

impl PositionSampling for PoissonDiskSampling {
    fn generate(&self, domain_extent: Vector3<f32>, rng: &mut dyn RngCore) -> Vec<Vector3<f32>> {
        let bounds = Vec3::from(domain_extent);
        if !self.radius.is_finite()
            || self.radius <= 0.0
            || self.rejection_threshold == 0
            || !bounds.is_finite()
            || bounds.min_element() <= 0.0
        {
            return Vec::new();
        }

        let mut sampler = PoissonDiskSampler::new(self.radius, bounds, self.rejection_threshold);
        sampler.generate(rng).into_iter().map(Into::into).collect()
    }

    fn min_separation(&self) -> Option<f32> {
        Some(self.radius)
    }
}

impl PoissonDiskSampling {
    /// Create a new PoissonDiskSampling with specified radius.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            rejection_threshold: DEFAULT_REJECTION_THRESHOLD,
        }
    }

    /// Sets the number of attempts per active point.
    pub fn with_rejection_threshold(mut self, rejection_threshold: usize) -> Self {
        self.rejection_threshold = rejection_threshold;
        self
    }
}

struct PoissonDiskSampler {
    radius: f32,
    radius_squared: f32,
    rejection_threshold: usize,
    cell_size: f32,
    grid_dims: [usize; 3],
    grid: Vec<Option<Vec3>>,
    active_list: Vec<Vec3>,
    bounds: Vec3,
}

impl PoissonDiskSampler {
    pub fn new(radius: f32, bounds: Vec3, rejection_threshold: usize) -> Self {
        debug_assert!(radius > 0.0);
        let radius_squared = radius * radius;
        // At most one accepted sample per cell when the cell diagonal equals the radius.
        let cell_size = radius / 3f32.sqrt();
        let grid_dims = [
            (bounds.x / cell_size).ceil() as usize + 1,
            (bounds.y / cell_size).ceil() as usize + 1,
            (bounds.z / cell_size).ceil() as usize + 1,
        ];

        Self {
            radius,
            radius_squared,
            rejection_threshold,
            cell_size,
            grid_dims,
            grid: vec![None; grid_dims[0] * grid_dims[1] * grid_dims[2]],
            active_list: Vec::new(),
            bounds,
        }
    }

    #[inline]
    fn grid_index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.grid_dims[1] + y) * self.grid_dims[0] + x
    }

    #[inline]
    fn point_to_grid(&self, point: Vec3) -> [usize; 3] {
        let cell = |v: f32, dim: usize| {
            ((v / self.cell_size).floor() as isize).clamp(0, dim as isize - 1) as usize
        };
        [
            cell(point.x, self.grid_dims[0]),
            cell(point.y, self.grid_dims[1]),
            cell(point.z, self.grid_dims[2]),
        ]
    }

    fn in_bounds(&self, point: Vec3) -> bool {
        point.cmpge(Vec3::ZERO).all() && point.cmplt(self.bounds).all()
    }

    fn is_valid_point(&self, point: Vec3) -> bool {
        if !self.in_bounds(point) {
            return false;
        }

        let [gx, gy, gz] = self.point_to_grid(point);
        for z in gz.saturating_sub(2)..(gz + 3).min(self.grid_dims[2]) {
            for y in gy.saturating_sub(2)..(gy + 3).min(self.grid_dims[1]) {
                for x in gx.saturating_sub(2)..(gx + 3).min(self.grid_dims[0]) {
                    if let Some(existing) = self.grid[self.grid_index(x, y, z)] {
                        if point.distance_squared(existing) < self.radius_squared {
                            return false;
                        }
                    }
                }
            }
        }

        true
    }

    fn add_point(&mut self, point: Vec3) {
        let [gx, gy, gz] = self.point_to_grid(point);
        let idx = self.grid_index(gx, gy, gz);
        self.grid[idx] = Some(point);
        self.active_list.push(point);
    }

    fn generate_around_point(&mut self, rng: &mut dyn RngCore, point: Vec3) -> Option<Vec3> {
        for _ in 0..self.rejection_threshold {
            let direction = random_unit_vector(rng);
            let distance = self.radius + rand01(rng) * self.radius;
            let candidate = point + direction * distance;

            if self.is_valid_point(candidate) {
                return Some(candidate);
            }
        }

        None
    }

    pub fn generate(&mut self, rng: &mut dyn RngCore) -> Vec<Vec3> {
        let max = Vec3::new(
            self.bounds.x.next_down(),
            self.bounds.y.next_down(),
            self.bounds.z.next_down(),
        );
        let initial = Vec3::new(
            rand01(rng) * self.bounds.x,
            rand01(rng) * self.bounds.y,
            rand01(rng) * self.bounds.z,
        )
        .min(max);
        self.add_point(initial);

        let mut points = vec![initial];

        while !self.active_list.is_empty() {
            let slot = rand_index(rng, self.active_list.len());
            let active = self.active_list[slot];

            match self.generate_around_point(rng, active) {
                Some(p) => {
                    self.add_point(p);
                    points.push(p);
                }
                None => {
                    self.active_list.swap_remove(slot);
                }
            }
        }

        points
    }
}
