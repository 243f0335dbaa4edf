//! Camera projection math: view frustum for culling and screen rays for
//! tap hit-testing.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
use hecs::{Entity, World};

use cyborg_core::components::{CameraLens, Transform};
use cyborg_core::types::{Aabb, Ray};

/// Current pose and lens of the camera node, if it exists.
pub fn camera_pose(world: &World, camera: Entity) -> Option<(Transform, CameraLens)> {
    let mut query = world.query_one::<(&Transform, &CameraLens)>(camera).ok()?;
    let (transform, lens) = query.get()?;
    Some((*transform, *lens))
}

/// World-to-clip matrix of a camera node. The camera looks down its local -Z.
pub fn view_projection(transform: &Transform, lens: &CameraLens) -> Mat4 {
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        transform.rotation.x,
        transform.rotation.y,
        transform.rotation.z,
    );
    let camera_to_world = Mat4::from_rotation_translation(rotation, transform.position);
    let view = camera_to_world.inverse();
    let projection = Mat4::perspective_rh(lens.fov_y, lens.aspect, lens.near, lens.far);
    projection * view
}

/// The six clip planes of a camera, as `(normal, d)` with the inside where
/// `normal·p + d >= 0`.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far.
    planes: [Vec4; 6],
}

impl Frustum {
    pub fn from_camera(transform: &Transform, lens: &CameraLens) -> Self {
        Self::from_view_projection(&view_projection(transform, lens))
    }

    /// Extract planes from a view-projection matrix with 0..1 clip depth.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let (r0, r1, r2, r3) = (vp.row(0), vp.row(1), vp.row(2), vp.row(3));
        Self {
            planes: [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r2, r3 - r2],
        }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }

    /// Conservative box test: false only when all eight corners lie outside
    /// one plane. Boxes straddling a corner of the frustum count as inside.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let corners = aabb.corners();
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            corners
                .iter()
                .any(|corner| normal.dot(*corner) + plane.w >= 0.0)
        })
    }
}

/// Ray from the camera through a viewport point (points, origin top-left).
pub fn screen_ray(
    transform: &Transform,
    lens: &CameraLens,
    viewport: Vec2,
    point: Vec2,
) -> Ray {
    let ndc_x = 2.0 * point.x / viewport.x - 1.0;
    let ndc_y = 1.0 - 2.0 * point.y / viewport.y;

    let inverse = view_projection(transform, lens).inverse();
    let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
    let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

    Ray::new(near, far - near)
}
