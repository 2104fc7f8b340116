use glam::{Mat4, Vec3};
use model_showcase::math::{fit_distance, frame_bounds, AABB};
use model_showcase::scenes::{create_cone, create_dodecahedron};

#[cfg(test)]
mod aabb_tests {
    use super::*;

    #[test]
    fn test_aabb_union_creates_bounding_box() {
        let aabb1 = AABB::new(Vec3::ZERO, Vec3::splat(10.0));
        let aabb2 = AABB::new(Vec3::splat(5.0), Vec3::splat(15.0));

        let union = aabb1.union(&aabb2);

        assert_eq!(union.min, Vec3::ZERO);
        assert_eq!(union.max, Vec3::splat(15.0));
    }

    #[test]
    fn test_aabb_union_with_negative_coords() {
        let aabb1 = AABB::new(Vec3::splat(-10.0), Vec3::ZERO);
        let aabb2 = AABB::new(Vec3::splat(-5.0), Vec3::splat(5.0));

        let union = aabb1.union(&aabb2);

        assert_eq!(union.min, Vec3::splat(-10.0));
        assert_eq!(union.max, Vec3::splat(5.0));
    }

    #[test]
    fn test_aabb_from_no_points() {
        assert!(AABB::from_points(std::iter::empty::<Vec3>()).is_none());
    }

    #[test]
    fn test_transformed_by_rotation_grows_box() {
        let unit = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let rotated = unit.transformed(&Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4));
        let expected = 2.0_f32.sqrt();
        assert!((rotated.max.x - expected).abs() < 1e-5);
        assert!((rotated.max.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_transformed_by_scale_and_translation() {
        let unit = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let placed = unit.transformed(&Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::IDENTITY,
            Vec3::new(0.0, -1.0, 0.0),
        ));
        assert_eq!(placed.min, Vec3::new(-2.0, -3.0, -2.0));
        assert_eq!(placed.max, Vec3::new(2.0, 1.0, 2.0));
    }
}

#[cfg(test)]
mod framing_tests {
    use super::*;

    #[test]
    fn test_fit_distance_formula() {
        let d = fit_distance(2.0, 75.0, 1.5);
        let expected = 1.0 / (37.5_f32.to_radians()).tan() * 1.5;
        assert!((d - expected).abs() < 1e-5);
    }

    #[test]
    fn test_frame_bounds_on_plus_z() {
        let bounds = AABB::new(Vec3::new(-1.0, -3.0, -2.0), Vec3::new(3.0, 1.0, 2.0));
        let framing = frame_bounds(&bounds, 75.0, 1.5);

        assert_eq!(framing.target, Vec3::new(1.0, -1.0, 0.0));
        assert!((framing.distance - fit_distance(4.0, 75.0, 1.5)).abs() < 1e-5);
        assert_eq!(framing.position.x, framing.target.x);
        assert_eq!(framing.position.y, framing.target.y);
        assert!((framing.position.z - framing.distance).abs() < 1e-5);
    }
}

#[cfg(test)]
mod mesh_tests {
    use super::*;

    #[test]
    fn test_showcase_dodecahedron() {
        let mesh = create_dodecahedron(1.0, 1, [1.0; 4]);
        assert_eq!(mesh.triangle_count(), 144);
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_dodecahedron_normals_point_outward() {
        let mesh = create_dodecahedron(1.0, 0, [1.0; 4]);
        for tri in mesh.vertices.chunks_exact(3) {
            let centroid: Vec3 = tri.iter().map(|v| Vec3::from_array(v.position)).sum::<Vec3>() / 3.0;
            let normal = Vec3::from_array(tri[0].normal);
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_fallback_cone_bounds() {
        let cone = create_cone(1.0, 2.0, 32, [1.0; 4]);
        let bounds = cone.bounds().unwrap();
        assert!((bounds.max_extent() - 2.0).abs() < 1e-5);
        assert_eq!(cone.indices.len(), cone.vertices.len());
    }
}
