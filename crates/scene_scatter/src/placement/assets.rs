//! Asset pools and binding of placement positions to instantiated assets.
//!
//! The host scene owns asset loading. The engine only decides which sources to
//! activate and in what order, then drives an injected [`AssetInstantiator`]
//! to create instances and move them to the chosen positions.
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use rand::Rng as RngCore;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::placement::selection::choose_distinct_indices;

/// A source asset identified by a stable name and path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetSource {
    pub name: String,
    pub path: PathBuf,
}

impl AssetSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Source named after the file stem of `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path }
    }
}

/// Ordered set of sources an asset group draws from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetPool {
    /// Label used in diagnostics.
    pub id: String,
    sources: Vec<AssetSource>,
}

impl AssetPool {
    pub fn new(id: impl Into<String>, sources: Vec<AssetSource>) -> Self {
        Self {
            id: id.into(),
            sources,
        }
    }

    pub fn from_paths<I, P>(id: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(id, paths.into_iter().map(AssetSource::from_path).collect())
    }

    /// Collects the files in `dir` with the given extension, sorted by path.
    ///
    /// The directory is not searched recursively. The extension is compared
    /// case-insensitively and without the leading dot.
    pub fn scan_dir(id: impl Into<String>, dir: impl AsRef<Path>, extension: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let wanted = extension.trim_start_matches('.');
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let matches = path
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted));
            if matches && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let pool = Self::from_paths(id, paths);
        info!(
            "Asset pool '{}': {} '.{}' sources in {}.",
            pool.id,
            pool.len(),
            wanted,
            dir.display()
        );
        Ok(pool)
    }

    pub fn sources(&self) -> &[AssetSource] {
        &self.sources
    }

    pub fn get(&self, index: usize) -> Option<&AssetSource> {
        self.sources.get(index)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyAssetPool {
                pool: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Host capability for creating and moving asset instances.
pub trait AssetInstantiator {
    /// Host-side reference to a live instance.
    type Handle: Clone;

    /// Creates one live instance of `source` in the scene.
    fn instantiate(&mut self, source: &AssetSource) -> Result<Self::Handle>;

    /// Moves an instance to a world position.
    fn set_position(&mut self, handle: &Self::Handle, position: Vec3) -> Result<()>;

    /// Applies a uniform scale to an instance.
    fn set_scale(&mut self, _handle: &Self::Handle, _scale: f32) -> Result<()> {
        Ok(())
    }
}

/// An instance created by [`bind`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoundAsset<H> {
    /// Index of the source in its pool.
    pub source_index: usize,
    /// Name of the source.
    pub source_name: String,
    pub handle: H,
}

/// Decides which pool entries to activate for `requested` instances.
///
/// With enough sources, `requested` distinct sources are drawn at random.
/// Otherwise every source is used `requested / len` times in pool order and the
/// first `requested % len` sources once more; this branch consumes no
/// randomness.
pub fn plan_sources<R: RngCore>(
    requested: usize,
    pool: &AssetPool,
    rng: &mut R,
) -> Result<Vec<usize>> {
    pool.ensure_not_empty()?;
    let len = pool.len();

    if requested <= len {
        return Ok(choose_distinct_indices(len, requested, rng));
    }

    let full_passes = requested / len;
    let remainder = requested % len;
    let mut order = Vec::with_capacity(requested);
    for _ in 0..full_passes {
        order.extend(0..len);
    }
    order.extend(0..remainder);
    debug!(
        "Pool '{}' reused: {} full passes + {} remainder for {} instances.",
        pool.id, full_passes, remainder, requested
    );
    Ok(order)
}

/// Instantiates `requested` assets from `pool` in activation order.
pub fn bind<I, R>(
    requested: usize,
    pool: &AssetPool,
    instantiator: &mut I,
    rng: &mut R,
) -> Result<Vec<BoundAsset<I::Handle>>>
where
    I: AssetInstantiator + ?Sized,
    R: RngCore,
{
    let order = plan_sources(requested, pool, rng)?;
    let mut bound = Vec::with_capacity(order.len());
    for source_index in order {
        let source = &pool.sources[source_index];
        let handle = instantiator.instantiate(source)?;
        bound.push(BoundAsset {
            source_index,
            source_name: source.name.clone(),
            handle,
        });
    }
    Ok(bound)
}

/// Moves the i-th bound asset to `positions[i]`, applying `scales[i]` when given.
pub fn assign_positions<I>(
    bound: &[BoundAsset<I::Handle>],
    positions: &[Vec3],
    scales: Option<&[f32]>,
    instantiator: &mut I,
) -> Result<()>
where
    I: AssetInstantiator + ?Sized,
{
    if bound.len() != positions.len() {
        return Err(Error::InvalidConfig(format!(
            "{} bound assets but {} positions",
            bound.len(),
            positions.len()
        )));
    }
    if let Some(scales) = scales {
        if scales.len() != bound.len() {
            return Err(Error::InvalidConfig(format!(
                "{} bound assets but {} scales",
                bound.len(),
                scales.len()
            )));
        }
    }

    for (i, (asset, position)) in bound.iter().zip(positions).enumerate() {
        instantiator.set_position(&asset.handle, *position)?;
        if let Some(scales) = scales {
            instantiator.set_scale(&asset.handle, scales[i])?;
        }
    }
    Ok(())
}
