use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Default, Debug, PartialEq)]
pub struct Pose {
    pub orientation: Quat, // NB: default Quat is identity
    pub position: Vec3,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        orientation: Quat::IDENTITY,
        position: Vec3::ZERO,
    };

    // Spherical interpolation for the orientation, linear for the position
    pub fn interpolate(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            orientation: self.orientation.slerp(other.orientation, t),
            position: self.position.lerp(other.position, t),
        }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }
}
