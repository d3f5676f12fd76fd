mod support;

use support::*;
use weight_mirror::{
    MirrorHost, MirrorOperator, MirrorSettings, Object, Scene,
    io::{IoError, read_scene, write_scene},
};

#[test]
fn scene_document_round_trip() {
    let world = nalgebra::Matrix4::new_translation(&nalgebra::Vector3::new(0.0, 2.0, 0.5));
    let (mut scene, body) = scene_with_world(rigged_grid(), world, Some("spine.c"));
    scene.add_object(Object::empty("Armature"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    write_scene(&scene, &path).unwrap();
    let loaded = read_scene(&path).unwrap();

    let id = loaded.find("Body").unwrap();
    assert_eq!(loaded.active_object(), Some(id));
    assert_eq!(loaded.world_transform(id).unwrap(), world);
    assert_eq!(loaded.active_group(id).unwrap().as_deref(), Some("spine.c"));
    assert_eq!(
        loaded.vertex_group_names(id).unwrap(),
        scene.vertex_group_names(body).unwrap()
    );
    for group in ["arm.l", "arm.r", "spine.c"] {
        assert_eq!(
            loaded.group_weights(id, group).unwrap(),
            scene.group_weights(body, group).unwrap()
        );
    }
    assert_eq!(loaded.mesh(id).unwrap().faces, scene.mesh(body).unwrap().faces);
    assert!(!loaded.is_mesh(loaded.find("Armature").unwrap()).unwrap());
}

#[test]
fn mirror_a_document() {
    let text = r#"{
        "active_object": "Body",
        "objects": [{
            "name": "Body",
            "mesh": {
                "vertices": [[1, 0, 0], [2, 0, 0], [2, 1, 0], [1, 1, 0],
                             [-1, 0, 0], [-2, 0, 0], [-2, 1, 0], [-1, 1, 0]],
                "faces": [[0, 1, 2, 3], [4, 7, 6, 5]],
                "groups": [{ "name": "hand.l", "weights": { "0": 0.2, "1": 0.9, "2": 0.9, "3": 0.2 } }],
                "active_group": "hand.l"
            }
        }]
    }"#;
    let mut scene = Scene::from_json_str(text).unwrap();
    let body = scene.active_object().unwrap();

    MirrorOperator::ActiveVertexGroup
        .execute(&mut scene, body, &MirrorSettings::default())
        .unwrap();

    let weights = scene.group_weights(body, "hand.r").unwrap();
    let expected = [(4, 0.2), (5, 0.9), (6, 0.9), (7, 0.2)];
    assert_eq!(weights.len(), expected.len());
    for ((v, w), (ev, ew)) in weights.iter().zip(expected) {
        assert_eq!(*v, ev);
        assert!(approx_eq(*w, ew, 1e-9), "vertex {v}: {w}");
    }

    let reloaded = Scene::from_json_str(&scene.to_json_string().unwrap()).unwrap();
    assert_eq!(reloaded.group_weights(body, "hand.r").unwrap(), weights);
    // Quads are written back as quads.
    assert_eq!(
        reloaded.mesh(body).unwrap().faces,
        vec![vec![0, 1, 2, 3], vec![4, 7, 6, 5]]
    );
}

#[test]
fn malformed_documents() {
    for text in [
        r#"{ "objects": [{ "name": "A" }, { "name": "A" }] }"#,
        r#"{ "active_object": "B", "objects": [{ "name": "A" }] }"#,
        r#"{ "objects": [{ "name": "A", "mesh": { "vertices": [[0, 0, 0]], "faces": [[0, 1, 2]] } }] }"#,
        r#"{ "objects": [{ "name": "A", "mesh": { "vertices": [[0, 0, 0]],
            "groups": [{ "name": "g.l" }, { "name": "g.l" }] } }] }"#,
    ] {
        assert!(Scene::from_json_str(text).is_err(), "{text}");
    }
    assert!(matches!(Scene::from_json_str("{ not json"), Err(IoError::Json(_))));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_scene(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, IoError::StdIo(_)));
}
