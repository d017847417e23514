//! Static scene lists and visibility
//!
//! A [`Scene`] is an ordered, immutable sequence of entities describing
//! level geometry; each frame the visible subset is pushed into the render
//! queue after a bounding-sphere frustum test.

use super::entity::Entity;
use super::frustum::{cull_sphere, frustum_planes};
use super::queue::RenderQueue;
use crate::assets::AssetProvider;
use crate::sim::Camera;

/// Ordered static level geometry
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub entities: Vec<Entity>,
}

impl Scene {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Cull against the camera frustum and push survivors.
    ///
    /// An entity whose mesh is not loaded yet has no bounds to test; it is
    /// pushed through and the queue deals with the missing asset at exec.
    pub fn push_visible(
        &self,
        cam: &Camera,
        assets: &dyn AssetProvider,
        queue: &mut RenderQueue,
    ) {
        let planes = frustum_planes(&cam.view_proj());

        for entity in &self.entities {
            if let Some(mesh) = assets.mesh(entity.mesh)
                && cull_sphere(&planes, &mesh.bounding, entity.position, entity.scale)
            {
                continue;
            }
            queue.push(*entity);
        }
    }
}
