mod support;

use nalgebra::Vector3;
use support::*;
use weight_mirror::{
    MirrorError, MirrorPlane, MirrorScope, MirrorSettings,
    float_types::Real, mirror_vertex_groups,
    blend::{BlendSummary, blend_center_group, blend_multiplier, blend_weight},
};

#[test]
fn multiplier_ramps_across_the_band() {
    let w = 0.05;
    assert!(approx_eq(blend_multiplier(-w, w), 0.0, 1e-12));
    assert!(approx_eq(blend_multiplier(0.0, w), 0.5, 1e-12));
    assert!(approx_eq(blend_multiplier(w, w), 1.0, 1e-12));

    let mut previous = blend_multiplier(-w, w);
    for step in 1..=20 {
        let d = -w + 2.0 * w * step as Real / 20.0;
        let m = blend_multiplier(d, w);
        assert!(m >= previous, "not monotone at d = {d}");
        previous = m;
    }
}

#[test]
fn weight_outside_the_band() {
    assert_eq!(blend_weight(0.7, -0.2, 0.05), 0.0);
    assert_eq!(blend_weight(0.7, 0.05, 0.05), 0.7);
    assert_eq!(blend_weight(0.7, 3.0, 0.05), 0.7);
}

#[test]
fn zero_width_is_rejected() {
    let mut mesh = grid_mesh();
    mesh.add_group(column_group("spine.c", [Some(0.3); 5]));
    let (mut scene, body) = scene_with(mesh, None);

    let err = blend_center_group(&mut scene, body, "spine.c", &MirrorPlane::YZ.normal(), 0.0)
        .unwrap_err();
    assert_eq!(err, MirrorError::InvalidBlendWidth(0.0));
    assert_columns(&scene, body, "spine.c", [Some(0.3); 5]);
}

#[test]
fn seam_vertices_are_not_doubled() {
    let mut mesh = grid_mesh();
    mesh.add_group(column_group("spine.c", [Some(0.3); 5]));
    let (mut scene, body) = scene_with(mesh, None);

    let zero = MirrorSettings {
        center_blend_width: 0.0,
        ..MirrorSettings::default()
    };
    let err = mirror_vertex_groups(&mut scene, body, MirrorScope::AllGroups, &zero).unwrap_err();
    assert!(err.is_configuration());
    assert_columns(&scene, body, "spine.c", [Some(0.3); 5]);

    mirror_vertex_groups(&mut scene, body, MirrorScope::AllGroups, &MirrorSettings::default())
        .unwrap();
    assert_columns(&scene, body, "spine.c", [Some(0.3); 5]);
}

#[test]
fn blend_on_a_scene() {
    let mut mesh = grid_mesh();
    mesh.add_group(column_group("spine.c", [Some(1.0); 5]));
    let (mut scene, body) = scene_with(mesh, None);

    let summary =
        blend_center_group(&mut scene, body, "spine.c", &MirrorPlane::YZ.normal(), 1.5).unwrap();
    assert_eq!(
        summary,
        BlendSummary {
            zeroed: 3,
            scaled: 9,
            unchanged: 3
        }
    );
    assert_columns(
        &scene,
        body,
        "spine.c",
        [Some(0.0), Some(1.0 / 6.0), Some(0.5), Some(5.0 / 6.0), Some(1.0)],
    );
}

#[test]
fn negated_normal_keeps_the_negative_side() {
    let mut mesh = grid_mesh();
    mesh.add_group(column_group("spine.c", [Some(1.0); 5]));
    let (mut scene, body) = scene_with(mesh, None);

    let normal = -Vector3::x();
    blend_center_group(&mut scene, body, "spine.c", &normal, 0.5).unwrap();
    assert_columns(
        &scene,
        body,
        "spine.c",
        [Some(1.0), Some(1.0), Some(0.5), Some(0.0), Some(0.0)],
    );
}

#[test]
fn blend_measures_world_distances() {
    let mut mesh = grid_mesh();
    mesh.add_group(column_group("spine.c", [Some(1.0); 5]));
    let world = nalgebra::Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0));
    let (mut scene, body) = scene_with_world(mesh, world, None);

    blend_center_group(&mut scene, body, "spine.c", &MirrorPlane::YZ.normal(), 0.5).unwrap();
    // World x runs from -1 to 3.
    assert_columns(
        &scene,
        body,
        "spine.c",
        [Some(0.0), Some(0.5), Some(1.0), Some(1.0), Some(1.0)],
    );
}

#[test]
fn negative_width_is_rejected() {
    let mut mesh = grid_mesh();
    mesh.add_group(column_group("spine.c", [Some(1.0); 5]));
    let (mut scene, body) = scene_with(mesh, None);

    let err = blend_center_group(&mut scene, body, "spine.c", &MirrorPlane::YZ.normal(), -0.1)
        .unwrap_err();
    assert_eq!(err, MirrorError::InvalidBlendWidth(-0.1));
    assert_columns(&scene, body, "spine.c", [Some(1.0); 5]);
}
