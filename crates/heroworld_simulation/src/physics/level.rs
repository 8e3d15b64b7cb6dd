//! Builder статической геометрии уровня → [`LevelCollider`] (parry TriMesh)
//!
//! Уровень описывается треугольниками; quad/box хелперы сами выравнивают
//! winding так, чтобы нормали смотрели наружу (в сторону `facing`).

use bevy::prelude::*;

use super::collider::LevelCollider;
use crate::error::ConfigError;

/// Треугольник уровня в мировых координатах (CCW = лицевая сторона)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a).normalize_or_zero()
    }

    /// Нулевая площадь: в mesh не попадает
    pub fn is_degenerate(&self) -> bool {
        self.normal() == Vec3::ZERO
    }

    pub fn flipped(&self) -> Self {
        Self::new(self.a, self.c, self.b)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LevelGeometry {
    triangles: Vec<Triangle>,
}

impl LevelGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_triangle(mut self, triangle: Triangle) -> Self {
        self.triangles.push(triangle);
        self
    }

    /// Quad из 4 углов (по кругу); обе половины развёрнуты нормалью к `facing`
    pub fn add_quad(mut self, corners: [Vec3; 4], facing: Vec3) -> Self {
        let [a, b, c, d] = corners;
        for triangle in [Triangle::new(a, b, c), Triangle::new(a, c, d)] {
            let oriented = if triangle.normal().dot(facing) < 0.0 {
                triangle.flipped()
            } else {
                triangle
            };
            self.triangles.push(oriented);
        }
        self
    }

    /// Горизонтальная площадка (квадрат `half_extent` вокруг `center`), нормаль +Y
    pub fn ground(self, center: Vec3, half_extent: f32) -> Self {
        let e = half_extent;
        self.add_quad(
            [
                center + Vec3::new(-e, 0.0, -e),
                center + Vec3::new(e, 0.0, -e),
                center + Vec3::new(e, 0.0, e),
                center + Vec3::new(-e, 0.0, e),
            ],
            Vec3::Y,
        )
    }

    /// Axis-aligned box, 6 граней наружу
    pub fn add_box(mut self, center: Vec3, half_extents: Vec3) -> Self {
        let min = center - half_extents;
        let max = center + half_extents;

        for axis in 0..3 {
            let u = (axis + 1) % 3;
            let v = (axis + 2) % 3;

            for (side, sign) in [(min[axis], -1.0), (max[axis], 1.0)] {
                let corner = |cu: f32, cv: f32| {
                    let mut p = Vec3::ZERO;
                    p[axis] = side;
                    p[u] = cu;
                    p[v] = cv;
                    p
                };
                let mut facing = Vec3::ZERO;
                facing[axis] = sign;

                self = self.add_quad(
                    [
                        corner(min[u], min[v]),
                        corner(max[u], min[v]),
                        corner(max[u], max[v]),
                        corner(min[u], max[v]),
                    ],
                    facing,
                );
            }
        }
        self
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// TriMesh из невырожденных треугольников (без общих вершин)
    pub fn build(self) -> Result<LevelCollider, ConfigError> {
        let triangles: Vec<Triangle> = self
            .triangles
            .into_iter()
            .filter(|triangle| !triangle.is_degenerate())
            .collect();

        let mut vertices = Vec::with_capacity(triangles.len() * 3);
        let mut indices = Vec::with_capacity(triangles.len());
        for triangle in triangles {
            let base = vertices.len() as u32;
            vertices.extend([triangle.a, triangle.b, triangle.c]);
            indices.push([base, base + 1, base + 2]);
        }

        LevelCollider::from_mesh(vertices, indices)
    }

    /// Демо-остров для headless прогона: земля под спавном и всеми
    /// интерактивными зонами, бортики по краям, колонна у колодца.
    pub fn demo_island() -> Self {
        Self::new()
            .ground(Vec3::new(10.0, 0.0, 0.0), 40.0)
            // Бортики (не дают упасть с края)
            .add_box(Vec3::new(10.0, 1.0, -40.5), Vec3::new(40.0, 1.0, 0.5))
            .add_box(Vec3::new(10.0, 1.0, 40.5), Vec3::new(40.0, 1.0, 0.5))
            .add_box(Vec3::new(-30.5, 1.0, 0.0), Vec3::new(0.5, 1.0, 40.0))
            .add_box(Vec3::new(50.5, 1.0, 0.0), Vec3::new(0.5, 1.0, 40.0))
            // Колонна
            .add_box(Vec3::new(2.0, 2.0, -4.0), Vec3::new(1.0, 2.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_faces_up() {
        let level = LevelGeometry::new().ground(Vec3::ZERO, 5.0);

        assert_eq!(level.triangles().len(), 2);
        for triangle in level.triangles() {
            assert!(triangle.normal().abs_diff_eq(Vec3::Y, 1e-6));
        }
    }

    #[test]
    fn test_box_faces_point_outward() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let level = LevelGeometry::new().add_box(center, Vec3::new(1.0, 2.0, 0.5));

        assert_eq!(level.triangles().len(), 12);
        for triangle in level.triangles() {
            let face_center = (triangle.a + triangle.b + triangle.c) / 3.0;
            assert!(
                triangle.normal().dot(face_center - center) > 0.0,
                "inward face: {:?}",
                triangle
            );
        }
    }

    #[test]
    fn test_build_drops_degenerate_triangles() {
        let sliver = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        let empty = LevelGeometry::new().add_triangle(sliver).build().unwrap();
        assert!(empty.is_empty());

        let level = LevelGeometry::new()
            .add_triangle(sliver)
            .ground(Vec3::ZERO, 5.0)
            .build()
            .unwrap();
        assert_eq!(level.triangle_count(), 2);
    }
}
