//! Integration tests for u-bookgen-core.

use approx::assert_relative_eq;
use nalgebra::{Point3, Rotation3, Vector3};
use u_bookgen_core::mesh::{HullMeshGenerator, Mesh, MeshGenerator};
use u_bookgen_core::report::FillReport;
use u_bookgen_core::sampler::{Sampler, DIMENSION_DRAWS};
use u_bookgen_core::settings::{Alignment, LayoutSettings};
use u_bookgen_core::transform::{Frame, Transform3D, AABB3D};
use u_bookgen_core::Error;

mod settings_tests {
    use super::*;

    #[test]
    fn test_builder_chain_validates() {
        let settings = LayoutSettings::new()
            .with_scale(2.0)
            .with_seed(17)
            .with_alignment(Alignment::Center)
            .with_lean(0.4, -0.5)
            .with_lean_angle(0.3, 0.5)
            .with_rotation(0.25)
            .with_book_height(0.25, 0.5)
            .with_book_width(0.04, 0.5)
            .with_book_depth(0.15, 0.5)
            .with_cover_thickness(0.003, 0.0)
            .with_textblock_offset(0.004, 1.0)
            .with_spine_curl(0.001, 1.0)
            .with_hinge_inset(0.001, 1.0)
            .with_hinge_width(0.003, 1.0);

        assert!(settings.validate().is_ok());
        assert_eq!(settings.seed, 17);
        assert_relative_eq!(settings.book_width.randomness, 0.5);
    }

    #[test]
    fn test_validation_errors_are_reported() {
        let cases = [
            LayoutSettings::default().with_scale(0.0),
            LayoutSettings::default().with_book_height(-0.1, 1.0),
            LayoutSettings::default().with_book_depth(0.1, -1.0),
            LayoutSettings::default().with_lean(1.5, 0.0),
            LayoutSettings::default().with_lean(0.5, -2.0),
            LayoutSettings::default().with_lean_angle(2.0, 0.0),
            LayoutSettings::default().with_book_width(0.003, 0.0),
        ];

        for settings in cases {
            let err = settings.validate().unwrap_err();
            assert!(err.is_validation(), "{}", err);
            assert!(matches!(err, Error::InvalidSettings(_)));
        }
    }
}

mod sampler_tests {
    use super::*;

    #[test]
    fn test_scale_multiplies_every_dimension() {
        let base = LayoutSettings::default().without_randomness();
        let scaled = base.clone().with_scale(3.0);

        let a = Sampler::new(0).sample(&base);
        let b = Sampler::new(0).sample(&scaled);

        assert_relative_eq!(b.cover_height, 3.0 * a.cover_height, epsilon = 1e-12);
        assert_relative_eq!(b.width(), 3.0 * a.width(), epsilon = 1e-12);
        assert_relative_eq!(b.cover_depth, 3.0 * a.cover_depth, epsilon = 1e-12);
        assert_relative_eq!(b.hinge_width, 3.0 * a.hinge_width, epsilon = 1e-12);
    }

    #[test]
    fn test_page_block_fits_inside_cover() {
        let settings = LayoutSettings::default();
        let mut sampler = Sampler::new(31);
        for _ in 0..200 {
            let p = sampler.sample(&settings);
            assert!(p.page_height < p.cover_height);
            assert!(p.page_depth < p.cover_depth);
            assert!(p.page_thickness > 0.0);
        }
    }

    #[test]
    fn test_streams_are_reproducible() {
        let settings = LayoutSettings::default().with_lean(0.5, 0.3);
        let mut a = Sampler::new(1234);
        let mut b = Sampler::new(1234);
        for _ in 0..50 {
            assert_eq!(a.sample(&settings), b.sample(&settings));
        }
    }

    #[test]
    fn test_flat_sample_uses_dimension_draws_only() {
        let settings = LayoutSettings::default();
        let mut flat = Sampler::new(5);
        let mut reference = Sampler::new(5);

        flat.sample_flat(&settings);
        for _ in DIMENSION_DRAWS {
            reference.unit();
        }
        assert_eq!(flat.unit(), reference.unit());
    }
}

mod transform_tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_frame_maps_local_axes() {
        let frame = Frame::from_direction_normal(
            Point3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, 2.0, 0.0),
            &Vector3::new(0.0, 0.0, 5.0),
        )
        .unwrap();

        assert_relative_eq!(frame.direction(), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(frame.depth_axis(), -Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(frame.normal(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(
            frame.to_world(&Vector3::new(1.0, 0.0, 1.0)),
            Point3::new(1.0, 1.0, 1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_frame_rejects_degenerate_input() {
        let origin = Point3::origin();
        assert!(matches!(
            Frame::from_direction_normal(origin, &Vector3::zeros(), &Vector3::z()),
            Err(Error::InvalidAnchor(_))
        ));
        assert!(matches!(
            Frame::from_direction_normal(origin, &Vector3::x(), &Vector3::new(-3.0, 0.0, 0.0)),
            Err(Error::InvalidAnchor(_))
        ));
    }

    #[test]
    fn test_transform_composition() {
        let rotate = Transform3D::new(
            Point3::origin(),
            Rotation3::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        let shift = Transform3D::new(Point3::new(1.0, 0.0, 0.0), Rotation3::identity());

        // rotate first, then shift
        let composed = shift.then(&rotate);
        let p = composed.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-12);

        // a frame placement equals mapping the local offset through the frame
        let frame =
            Frame::from_direction_normal(Point3::new(0.0, 0.0, 1.0), &Vector3::y(), &Vector3::z())
                .unwrap();
        let placed = frame.to_transform().then(&shift);
        assert_relative_eq!(
            placed.position,
            frame.to_world(&Vector3::new(1.0, 0.0, 0.0)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_aabb_union() {
        let a = AABB3D::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        let b = AABB3D::new(Point3::new(-1.0, 0.5, 0.5), Point3::new(0.5, 2.0, 0.5));
        let u = a.union(&b);

        assert_relative_eq!(u.min, Point3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(u.max, Point3::new(1.0, 2.0, 1.0));
        assert_eq!(a.union(&a), a);
    }
}

mod mesh_tests {
    use super::*;

    #[test]
    fn test_append_offsets_faces_and_creases() {
        let params = Sampler::new(3).sample_flat(&LayoutSettings::default());
        let hull = HullMeshGenerator::new();

        let mut mesh = Mesh::new();
        mesh.append(hull.generate(&params));
        mesh.append(hull.generate(&params));

        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.face_count(), 12);
        assert_eq!(mesh.creases.len(), 24);
        assert!(mesh.faces[6..].iter().flatten().all(|&i| (8..16).contains(&i)));
        assert!(mesh.creases[12..].iter().flatten().all(|&i| (8..16).contains(&i)));
    }

    #[test]
    fn test_uvs_dropped_when_mixed() {
        let params = Sampler::new(3).sample_flat(&LayoutSettings::default());

        let mut mesh = HullMeshGenerator::new().with_uvs(true).generate(&params);
        assert_eq!(mesh.uvs.as_ref().map(Vec::len), Some(6));

        mesh.append(HullMeshGenerator::new().generate(&params));
        assert!(mesh.uvs.is_none());
    }
}

mod report_tests {
    use super::*;

    #[test]
    fn test_report_tracks_last_commit() {
        let mut report = FillReport::new(0.5);
        for extent in [0.1, 0.2, 0.35] {
            report.commit(extent);
        }
        report.reject(0.52);

        assert_eq!(report.placed, 3);
        assert_relative_eq!(report.remaining(), 0.15, epsilon = 1e-12);
        assert_eq!(report.utilization_percent(), "70.0%");
    }
}

#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let settings = LayoutSettings::default()
            .with_seed(77)
            .with_alignment(Alignment::Spine)
            .with_lean(0.3, 0.5);

        let json = serde_json::to_string(&settings).unwrap();
        let restored: LayoutSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, restored);
    }
}
