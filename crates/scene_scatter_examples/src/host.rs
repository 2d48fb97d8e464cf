use glam::Vec3;
use scene_scatter::prelude::{AssetInstantiator, AssetSource, Error, Result};
use tracing::debug;

/// One instance created by [`LoggingInstantiator`].
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRecord {
    pub source_name: String,
    pub position: Option<Vec3>,
    pub scale: f32,
}

/// Stand-in host that records instances instead of touching a real scene.
#[derive(Debug, Default)]
pub struct LoggingInstantiator {
    pub instances: Vec<InstanceRecord>,
}

impl LoggingInstantiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances that were given a position.
    pub fn placed(&self) -> impl Iterator<Item = &InstanceRecord> {
        self.instances.iter().filter(|i| i.position.is_some())
    }
}

impl AssetInstantiator for LoggingInstantiator {
    type Handle = usize;

    fn instantiate(&mut self, source: &AssetSource) -> Result<usize> {
        let handle = self.instances.len();
        debug!(
            "Instantiated '{}' from {} as #{}.",
            source.name,
            source.path.display(),
            handle
        );
        self.instances.push(InstanceRecord {
            source_name: source.name.clone(),
            position: None,
            scale: 1.0,
        });
        Ok(handle)
    }

    fn set_position(&mut self, handle: &usize, position: Vec3) -> Result<()> {
        let record = self
            .instances
            .get_mut(*handle)
            .ok_or_else(|| Error::Instantiation(format!("unknown instance #{handle}")))?;
        record.position = Some(position);
        Ok(())
    }

    fn set_scale(&mut self, handle: &usize, scale: f32) -> Result<()> {
        let record = self
            .instances
            .get_mut(*handle)
            .ok_or_else(|| Error::Instantiation(format!("unknown instance #{handle}")))?;
        record.scale = scale;
        Ok(())
    }
}
