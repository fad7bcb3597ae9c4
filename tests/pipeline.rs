mod common;

use std::collections::BTreeSet;

use common::skinned_cube;
use proxyrig::scene::{FaceLabel, Scene, VertexId};
use proxyrig::{generate, generate_from_selection, Error, VIS_ATTR};

/// The skin binding attached to a proxy segment.
fn segment_skin<S: Scene>(scene: &S, segment: proxyrig::NodeId) -> proxyrig::NodeId {
    let shape = scene.shape_of(segment).unwrap();
    scene
        .inputs(shape)
        .unwrap()
        .into_iter()
        .find(|&n| scene.is_skin_deformer(n))
        .unwrap()
}

#[test]
fn end_to_end_two_joint_cube() {
    let cube = skinned_cube();
    let mut scene = cube.scene;
    scene.set_selection(&[cube.mesh]);

    let rig = generate_from_selection(&mut scene).unwrap();
    assert_eq!(rig.mesh, cube.mesh);
    assert_eq!(rig.skin, cube.skin);
    assert_eq!(rig.joints, vec![cube.j1, cube.j2]);
    assert_eq!(rig.segments.len(), 2);

    let (owner1, seg1) = rig.segments[0];
    let (owner2, seg2) = rig.segments[1];
    assert_eq!(owner1, cube.j1);
    assert_eq!(owner2, cube.j2);
    assert_eq!(scene.name(seg1).unwrap(), "Cube_J1_proxy");
    assert_eq!(scene.name(seg2).unwrap(), "Cube_J2_proxy");

    // every segment stays bound to the full original joint list
    for &(_, seg) in &rig.segments {
        let skin = segment_skin(&scene, seg);
        assert_eq!(scene.skin_influences(skin).unwrap(), vec![cube.j1, cube.j2]);
    }

    // the source mesh is untouched
    assert_eq!(scene.faces(cube.mesh).unwrap().len(), 6);
    assert_eq!(scene.vertices(cube.mesh).unwrap().len(), 8);
}

/// Face retention is label-driven: the faces surviving on each duplicate
/// are exactly the incident set recorded on the source, nothing else.
#[test]
fn labels_survive_duplication_and_deletion() {
    let cube = skinned_cube();
    let mut scene = cube.scene;
    let rig = generate(&mut scene, cube.mesh).unwrap();

    let bottom_verts: Vec<VertexId> = (0..4).map(VertexId).collect();
    let expected = scene.incident_faces(cube.mesh, &bottom_verts).unwrap();
    // bottom face plus the four sides
    assert_eq!(
        expected,
        [0u32, 2, 3, 4, 5].map(FaceLabel).into_iter().collect()
    );

    let (_, seg1) = rig.segments[0];
    let survived: BTreeSet<FaceLabel> = scene.faces(seg1).unwrap().into_iter().collect();
    assert_eq!(survived.len(), expected.len());
    assert_eq!(survived, expected);
}

/// Weights carry over onto the rebound segments through closest-point
/// matching; positions line up one-to-one here, so the rows do too.
#[test]
fn weights_carry_onto_segments() {
    let cube = skinned_cube();
    let mut scene = cube.scene;
    let rig = generate(&mut scene, cube.mesh).unwrap();

    let (_, seg1) = rig.segments[0];
    let skin = segment_skin(&scene, seg1);
    let pairs = scene.skin_weights(skin, VertexId(0)).unwrap();
    assert_eq!(pairs, vec![(cube.j1, 0.9), (cube.j2, 0.1)]);
    let pairs = scene.skin_weights(skin, VertexId(7)).unwrap();
    assert_eq!(pairs, vec![(cube.j1, 0.1), (cube.j2, 0.9)]);
}

#[test]
fn controls_drive_segment_visibility() {
    let cube = skinned_cube();
    let mut scene = cube.scene;
    let rig = generate(&mut scene, cube.mesh).unwrap();
    let rig_h = &rig.hierarchy;

    assert_eq!(rig_h.controls.len(), 2);
    for pair in &rig_h.controls {
        // the control group sits on its joint
        assert_eq!(
            scene.world_position(pair.group).unwrap(),
            scene.world_position(pair.joint).unwrap()
        );
        // vis defaults to 1 and mirrors onto the segment
        assert_eq!(scene.attr(pair.segment, "visibility").unwrap(), 1.0);
    }

    let first = &rig_h.controls[0];
    scene.set_attr(first.locator, VIS_ATTR, 0.0).unwrap();
    assert_eq!(scene.attr(first.segment, "visibility").unwrap(), 0.0);
    // the other segment is unaffected
    assert_eq!(
        scene
            .attr(rig_h.controls[1].segment, "visibility")
            .unwrap(),
        1.0
    );

    // a driven plug has no independent override path
    assert!(scene
        .set_attr(first.segment, "visibility", 1.0)
        .is_err());
}

#[test]
fn global_control_owns_the_hierarchy() {
    let cube = skinned_cube();
    let mut scene = cube.scene;
    let rig = generate(&mut scene, cube.mesh).unwrap();
    let rig_h = rig.hierarchy;

    assert_eq!(scene.parent(rig_h.segment_group), Some(rig_h.global_control));
    assert_eq!(scene.parent(rig_h.control_group), Some(rig_h.global_control));
    assert_eq!(scene.inherits_transform(rig_h.segment_group), Some(false));
    assert_eq!(scene.circle_radius(rig_h.global_control), Some(30.0));

    scene.set_attr(rig_h.global_control, VIS_ATTR, 0.0).unwrap();
    assert_eq!(scene.attr(rig_h.segment_group, "visibility").unwrap(), 0.0);
}

/// A joint dominating no vertices gets no segment and no control, but
/// stays bound as an influence on every segment that was built.
#[test]
fn empty_buckets_are_skipped() {
    let mut scene = proxyrig::MemoryScene::new();
    let mesh = scene.add_mesh("Cube", &common::CUBE_POSITIONS, &common::CUBE_FACES);
    let j1 = scene.add_joint("J1", [0.0, 0.0, 0.0]);
    let j2 = scene.add_joint("J2", [0.0, 2.0, 0.0]);
    // a third influence that never dominates anything
    let j3 = scene.add_joint("J3", [0.0, 9.0, 0.0]);
    let skin = scene.bind_skin(&[j1, j2, j3], mesh).unwrap();
    for v in 0..4 {
        scene
            .set_skin_weights(skin, VertexId(v), &[(j1, 0.9), (j2, 0.1)])
            .unwrap();
    }
    for v in 4..8 {
        scene
            .set_skin_weights(skin, VertexId(v), &[(j1, 0.1), (j2, 0.9)])
            .unwrap();
    }

    let rig = generate(&mut scene, mesh).unwrap();
    assert_eq!(rig.joints, vec![j1, j2, j3]);
    assert_eq!(rig.segments.len(), 2);
    assert!(rig.segments.iter().all(|&(joint, _)| joint != j3));
    assert!(scene.find("Cube_J3_proxy").is_none());
    for &(_, seg) in &rig.segments {
        let seg_skin = segment_skin(&scene, seg);
        assert_eq!(
            scene.skin_influences(seg_skin).unwrap(),
            vec![j1, j2, j3]
        );
    }
}

/// Discovery failures abort before anything is created.
#[test]
fn no_skin_creates_no_nodes() {
    let mut scene = proxyrig::MemoryScene::new();
    let mesh = scene.add_mesh(
        "Bare",
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        &[&[0, 1, 2]],
    );
    let before = scene.node_count();
    let err = generate(&mut scene, mesh).unwrap_err();
    assert!(matches!(err, Error::NoSkinFound { depth: 10, .. }));
    assert_eq!(scene.node_count(), before);
}

#[test]
fn no_joints_is_its_own_failure() {
    let mut scene = proxyrig::MemoryScene::new();
    let mesh = scene.add_mesh(
        "Bare",
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        &[&[0, 1, 2]],
    );
    scene.bind_skin(&[], mesh).unwrap();
    let before = scene.node_count();
    let err = generate(&mut scene, mesh).unwrap_err();
    assert!(matches!(err, Error::NoInfluencesFound { .. }));
    assert_eq!(scene.node_count(), before);
}

#[test]
fn selection_type_errors() {
    let cube = skinned_cube();
    let mut scene = cube.scene;

    scene.set_selection(&[]);
    assert!(matches!(
        generate_from_selection(&mut scene),
        Err(Error::NoSelection)
    ));

    scene.set_selection(&[cube.j1]);
    assert!(matches!(
        generate_from_selection(&mut scene),
        Err(Error::NotAMesh(name)) if name == "J1"
    ));
}

/// Exact matching modes refuse what closest matching papers over.
#[test]
fn weight_copy_matching_modes() {
    use proxyrig::scene::{InfluenceMatching, VertexMatching, WeightMatching};

    let cube = skinned_cube();
    let mut scene = cube.scene;
    // a standalone copy of the cube bound to one foreign joint
    let copy = scene.duplicate_mesh(cube.mesh).unwrap();
    let j3 = scene.add_joint("J3", [0.0, 1.0, 0.0]);
    let dst = scene.bind_skin(&[j3], copy).unwrap();

    // index-matched vertices carry over; the foreign influence soaks up
    // everything under closest-joint matching
    scene
        .copy_skin_weights(
            cube.skin,
            dst,
            WeightMatching {
                vertex: VertexMatching::Index,
                influence: InfluenceMatching::ClosestJoint,
            },
        )
        .unwrap();
    let pairs = scene.skin_weights(dst, VertexId(0)).unwrap();
    assert_eq!(pairs, vec![(j3, 1.0)]);

    // exact influence matching drops weights for unbound joints instead
    scene
        .copy_skin_weights(
            cube.skin,
            dst,
            WeightMatching {
                vertex: VertexMatching::Index,
                influence: InfluenceMatching::Exact,
            },
        )
        .unwrap();
    let pairs = scene.skin_weights(dst, VertexId(0)).unwrap();
    assert_eq!(pairs, vec![(j3, 0.0)]);
}

/// Re-running builds a second, independent rig; nothing is reused or
/// updated in place.
#[test]
fn reruns_are_independent() {
    let cube = skinned_cube();
    let mut scene = cube.scene;
    let first = generate(&mut scene, cube.mesh).unwrap();
    let second = generate(&mut scene, cube.mesh).unwrap();

    assert_eq!(second.segments.len(), 2);
    for (&(_, a), &(_, b)) in first.segments.iter().zip(&second.segments) {
        assert_ne!(a, b);
    }
    assert_ne!(
        first.hierarchy.global_control,
        second.hierarchy.global_control
    );
    // the host uniquified the second run's names
    assert!(scene.find("Cube_J1_proxy").is_some());
    assert!(scene.find("Cube_J1_proxy1").is_some());
}
