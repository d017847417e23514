//! The shaft level
//!
//! A static stack of wall segments, one band above and one below the
//! origin; the player wraps between bands instead of the world moving.

use glam::{Quat, Vec3};

use crate::consts::{SEGMENT_COUNT, SEGMENT_HEIGHT};
use crate::render::{Entity, Scene};

/// Fixed yaw per segment so the shaft texture seams don't line up
const SEGMENT_YAWS: [f32; SEGMENT_COUNT] = [0.1, 0.4, 2.4, 0.3, 1.7, 1.1, 2.1, 1.2, 3.4, 0.1];

/// Build the static shaft geometry
pub fn shaft_scene() -> Scene {
    let bands = SEGMENT_COUNT as i32;
    let mut entities = Vec::with_capacity(SEGMENT_COUNT * 2);

    for i in -bands..bands {
        let yaw = SEGMENT_YAWS[i.rem_euclid(bands) as usize];
        entities.push(Entity {
            position: Vec3::new(0.0, SEGMENT_HEIGHT * i as f32, 0.0),
            rotation: Quat::from_axis_angle(Vec3::Y, yaw),
            ..Default::default()
        });
    }

    Scene::new(entities)
}
