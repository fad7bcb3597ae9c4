use proxyrig::limb::{find_limb, find_limb_from_selection, pole_vector_position, LimbRigger};
use proxyrig::scene::{MemoryScene, NodeId, Scene, WorldPoint};
use proxyrig::Error;

/// A three-joint arm: shoulder at the origin, a bent elbow, wrist on the
/// z axis.
fn arm() -> (MemoryScene, NodeId, NodeId, NodeId) {
    let mut scene = MemoryScene::new();
    let root = scene.add_joint("shoulder", [0.0, 0.0, 0.0]);
    let mid = scene.add_joint("elbow", [0.0, 2.0, 5.0]);
    let end = scene.add_joint("wrist", [0.0, 0.0, 10.0]);
    scene.set_parent(mid, root).unwrap();
    scene.set_parent(end, mid).unwrap();
    (scene, root, mid, end)
}

#[test]
fn pole_sits_on_the_bend_plane() {
    let pos = pole_vector_position(
        WorldPoint::new(0.0, 0.0, 0.0),
        WorldPoint::new(0.0, 2.0, 5.0),
        WorldPoint::new(0.0, 0.0, 10.0),
    )
    .unwrap();
    // bend direction +y, pushed out by the 10-unit chain span
    assert_eq!(pos, WorldPoint::new(0.0, 10.0, 5.0));
}

#[test]
fn collinear_chains_have_no_bend_plane() {
    let err = pole_vector_position(
        WorldPoint::new(0.0, 0.0, 0.0),
        WorldPoint::new(0.0, 0.0, 5.0),
        WorldPoint::new(0.0, 0.0, 10.0),
    )
    .unwrap_err();
    assert!(matches!(err, Error::DegenerateChain));

    let err = pole_vector_position(
        WorldPoint::new(1.0, 1.0, 1.0),
        WorldPoint::new(2.0, 0.0, 0.0),
        WorldPoint::new(1.0, 1.0, 1.0),
    )
    .unwrap_err();
    assert!(matches!(err, Error::DegenerateChain));
}

#[test]
fn auto_find_walks_joint_children() {
    let (mut scene, root, mid, end) = arm();
    // non-joint children are skipped during discovery
    let loc = scene.create_locator("marker").unwrap();
    scene.set_parent(loc, root).unwrap();

    let limb = find_limb(&scene, root).unwrap();
    assert_eq!((limb.root, limb.mid, limb.end), (root, mid, end));

    scene.set_selection(&[root]);
    let limb = find_limb_from_selection(&scene).unwrap();
    assert_eq!(limb.root, root);
}

#[test]
fn auto_find_failures() {
    let (mut scene, _, _, end) = arm();
    let loc = scene.create_locator("marker").unwrap();

    scene.set_selection(&[]);
    assert!(matches!(
        find_limb_from_selection(&scene),
        Err(Error::NoSelection)
    ));

    scene.set_selection(&[loc]);
    assert!(matches!(
        find_limb_from_selection(&scene),
        Err(Error::NotAJoint(name)) if name == "marker"
    ));

    // the wrist has no joint children to continue the chain with
    assert!(matches!(
        find_limb(&scene, end),
        Err(Error::IncompleteLimb(name)) if name == "wrist"
    ));
}

#[test]
fn blend_attribute_drives_ik_visibility() {
    let (mut scene, root, _, _) = arm();
    let limb = find_limb(&scene, root).unwrap();
    let rigger = LimbRigger {
        controller_size: 4.0,
        controller_color: [0.1, 0.8, 0.1],
    };
    let rig = rigger.rig(&mut scene, &limb).unwrap();

    // FK controls nest root -> mid -> end
    let mid_grp = scene.parent(rig.fk_controls[1]).unwrap();
    assert_eq!(scene.parent(mid_grp), Some(rig.fk_controls[0]));
    let end_grp = scene.parent(rig.fk_controls[2]).unwrap();
    assert_eq!(scene.parent(end_grp), Some(rig.fk_controls[1]));

    // the pole control group sits where the bend plane says
    let pole_grp = scene.parent(rig.pole_control).unwrap();
    assert_eq!(
        scene.world_position(pole_grp).unwrap(),
        WorldPoint::new(0.0, 10.0, 5.0)
    );

    // IK controls are hidden until the blend rises
    let ik_grp = scene.parent(rig.ik_control).unwrap();
    assert_eq!(scene.attr(ik_grp, "visibility").unwrap(), 0.0);
    assert_eq!(scene.attr(pole_grp, "visibility").unwrap(), 0.0);
    scene.set_attr(rig.blend_control, "ikfkBlend", 1.0).unwrap();
    assert_eq!(scene.attr(ik_grp, "visibility").unwrap(), 1.0);
    assert_eq!(scene.attr(pole_grp, "visibility").unwrap(), 1.0);

    // display settings land on the controls
    assert_eq!(scene.circle_radius(rig.fk_controls[0]), Some(4.0));
    assert_eq!(scene.color(rig.ik_control), Some([0.1, 0.8, 0.1]));

    assert_eq!(scene.name(rig.group).unwrap(), "shoulder_rig_grp");
}
