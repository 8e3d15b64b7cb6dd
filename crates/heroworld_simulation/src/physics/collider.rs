//! Static collision volume: parry TriMesh уровня
//!
//! Строится ОДИН раз из геометрии уровня, дальше только читается
//! (безопасно шарить между системами без синхронизации).
//!
//! Query: самый глубокий контакт капсулы с mesh (кандидаты отбирает BVH
//! внутри TriMesh), капсула выталкивается, запрос повторяется. Итоговый
//! контакт = суммарное смещение центра.

use bevy::prelude::*;
use bevy_rapier3d::parry::math::{Isometry, Point};
use bevy_rapier3d::parry::query::{self, PointQueryWithLocation};
use bevy_rapier3d::parry::shape::{Capsule as CapsuleShape, TriMesh};

use super::capsule::Capsule;
use crate::error::ConfigError;

/// Зазор, в пределах которого капсула над поверхностью ещё "касается" её.
/// Гасит float-шум после выталкивания: стоящий герой не теряет опору.
pub const CONTACT_SKIN: f32 = 1e-4;

/// Максимум выталкиваний за один query (угол стена + пол, стык треугольников)
pub const MAX_PUSHES: usize = 8;

/// Минимальная длина суммарного выталкивания, которую считаем направленной
const MIN_PUSH: f32 = 1e-10;

/// Контакт почти по нормали грани → берём точную нормаль треугольника
/// (EPA даёт шум, и стена с normal.y = 1e-7 стала бы полом)
const FACE_SNAP_COS: f32 = 0.99;

/// Контакт капсулы с миром: нормаль выталкивания + глубина
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Направление, в котором капсулу нужно вытолкнуть (unit)
    pub normal: Vec3,
    /// Глубина проникновения (>= 0)
    pub depth: f32,
}

/// Read-only запрос к статической геометрии мира.
///
/// Реализации обязаны быть детерминированными: один и тот же capsule-in
/// всегда даёт тот же contact-out.
pub trait CollisionVolume: Send + Sync + 'static {
    /// Пересекает ли капсула мир; если да, то нормаль и глубина выталкивания.
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact>;
}

/// Коллайдер статического уровня (None: пустой мир)
#[derive(Clone, Default)]
pub struct LevelCollider {
    mesh: Option<TriMesh>,
}

impl std::fmt::Debug for LevelCollider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelCollider")
            .field("triangles", &self.triangle_count())
            .finish()
    }
}

impl LevelCollider {
    /// Пустой набор индексов → пустой мир (TriMesh без треугольников не строится)
    pub fn from_mesh(vertices: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Result<Self, ConfigError> {
        if indices.is_empty() {
            return Ok(Self::default());
        }

        let points = vertices
            .into_iter()
            .map(|v| Point::new(v.x, v.y, v.z))
            .collect();
        let mesh = TriMesh::new(points, indices)
            .map_err(|err| ConfigError::InvalidLevelMesh(format!("{:?}", err)))?;

        Ok(Self { mesh: Some(mesh) })
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, |mesh| mesh.num_triangles())
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.is_none()
    }

    /// Самый глубокий контакт капсулы с mesh (или касание в пределах skin)
    fn deepest_contact(mesh: &TriMesh, capsule: &Capsule) -> Option<Contact> {
        let center = capsule.center();
        let shape = CapsuleShape::new_y(capsule.segment_length() * 0.5, capsule.radius);
        let capsule_pos = Isometry::translation(center.x, center.y, center.z);

        let contact = query::contact(
            &capsule_pos,
            &shape,
            &Isometry::identity(),
            mesh,
            CONTACT_SKIN,
        )
        .ok()
        .flatten()?;

        // normal2: нормаль поверхности mesh, смотрит на капсулу
        let mut normal = Vec3::new(contact.normal2.x, contact.normal2.y, contact.normal2.z);
        if !normal.is_finite() || normal == Vec3::ZERO {
            return None;
        }

        let (_, (triangle_index, _)) =
            mesh.project_local_point_and_get_location(&contact.point2, true);
        if let Some(face) = mesh.triangle(triangle_index).normal() {
            let face = Vec3::new(face.x, face.y, face.z);
            let face = if face.dot(normal) < 0.0 { -face } else { face };
            if face.dot(normal) > FACE_SNAP_COS {
                normal = face;
            }
        }

        Some(Contact {
            normal,
            depth: (-contact.dist).max(0.0),
        })
    }
}

impl CollisionVolume for LevelCollider {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact> {
        let mesh = self.mesh.as_ref()?;
        let mut working = *capsule;
        let mut last_contact: Option<Contact> = None;

        for _ in 0..MAX_PUSHES {
            let Some(contact) = Self::deepest_contact(mesh, &working) else {
                break;
            };
            last_contact = Some(contact);
            if contact.depth <= MIN_PUSH {
                break;
            }
            working.translate(contact.normal * contact.depth);
        }

        let last_contact = last_contact?;
        let push = working.center() - capsule.center();
        let depth = push.length();

        if depth > MIN_PUSH {
            Some(Contact {
                normal: push / depth,
                depth,
            })
        } else {
            // Касание без проникновения: направление берём у последнего контакта
            Some(Contact {
                normal: last_contact.normal,
                depth: 0.0,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::level::LevelGeometry;

    fn capsule_with_bottom(x: f32, bottom_y: f32, z: f32) -> Capsule {
        Capsule::new(
            Vec3::new(x, bottom_y + 0.5, z),
            Vec3::new(x, bottom_y + 1.5, z),
            0.5,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_level_never_collides() {
        let collider = LevelCollider::default();

        assert!(collider.is_empty());
        assert_eq!(collider.triangle_count(), 0);
        assert!(collider.capsule_intersect(&capsule_with_bottom(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_capsule_above_floor_has_no_contact() {
        let collider = LevelGeometry::new().ground(Vec3::ZERO, 50.0).build().unwrap();

        assert!(collider.capsule_intersect(&capsule_with_bottom(0.0, 0.5, 0.0)).is_none());
    }

    #[test]
    fn test_floor_contact_pushes_up() {
        let collider = LevelGeometry::new().ground(Vec3::ZERO, 50.0).build().unwrap();

        let contact = collider
            .capsule_intersect(&capsule_with_bottom(3.0, -0.2, 7.0))
            .unwrap();

        assert!(contact.normal.abs_diff_eq(Vec3::Y, 1e-3), "normal = {:?}", contact.normal);
        assert!((contact.depth - 0.2).abs() < 1e-3);
    }

    #[test]
    fn test_hovering_within_skin_is_still_contact() {
        let collider = LevelGeometry::new().ground(Vec3::ZERO, 50.0).build().unwrap();

        let contact = collider
            .capsule_intersect(&capsule_with_bottom(1.0, CONTACT_SKIN * 0.5, 1.0))
            .unwrap();

        assert_eq!(contact.depth, 0.0);
        assert!(contact.normal.y > 0.99);
    }

    #[test]
    fn test_wall_contact_pushes_sideways() {
        // Стена x = 5, смотрит в -X
        let collider = LevelGeometry::new()
            .add_box(Vec3::new(5.5, 2.0, 0.0), Vec3::new(0.5, 2.0, 10.0))
            .build()
            .unwrap();

        let contact = collider
            .capsule_intersect(&capsule_with_bottom(4.7, 1.0, 0.0))
            .unwrap();

        assert!(contact.normal.abs_diff_eq(Vec3::NEG_X, 1e-3), "normal = {:?}", contact.normal);
        assert!((contact.depth - 0.2).abs() < 1e-3);
    }

    #[test]
    fn test_corner_accumulates_both_pushes() {
        // Пол + стена x = 5: капсула утоплена и в пол, и в стену
        let collider = LevelGeometry::new()
            .ground(Vec3::ZERO, 50.0)
            .add_box(Vec3::new(5.5, 2.0, 0.0), Vec3::new(0.5, 2.0, 10.0))
            .build()
            .unwrap();

        let contact = collider
            .capsule_intersect(&capsule_with_bottom(4.7, -0.1, 0.0))
            .unwrap();

        assert!(contact.normal.x < -0.5, "normal = {:?}", contact.normal);
        assert!(contact.normal.y > 0.2, "normal = {:?}", contact.normal);
        assert!(contact.depth > 0.2);
    }

    #[test]
    fn test_dense_mesh_is_still_queried() {
        let mut level = LevelGeometry::new();
        for i in 0..20 {
            for j in 0..20 {
                let center = Vec3::new(i as f32 * 2.0 - 20.0, 0.0, j as f32 * 2.0 - 20.0);
                level = level.ground(center, 1.0);
            }
        }
        let collider = level.build().unwrap();

        assert_eq!(collider.triangle_count(), 800);

        let contact = collider
            .capsule_intersect(&capsule_with_bottom(0.3, -0.1, 0.3))
            .unwrap();
        assert!(contact.normal.y > 0.99);
    }
}
