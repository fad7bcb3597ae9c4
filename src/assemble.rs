//! Control hierarchy assembly over a set of proxy segments.

use crate::error::Error;
use crate::scene::{Axis, NodeFlag, NodeId, Scene, VISIBILITY};

/// Display radius of the global proxy control curve.
pub const GLOBAL_CONTROL_RADIUS: f64 = 30.0;

/// Name of the visibility-toggle attribute added to every proxy control.
pub const VIS_ATTR: &str = "vis";

/// One per-joint visibility control: a locator in its own group,
/// transform-matched to the joint, driving the paired segment.
#[derive(Debug, Clone)]
pub struct ControlPair {
    pub joint: NodeId,
    pub segment: NodeId,
    pub locator: NodeId,
    pub group: NodeId,
}

/// The assembled proxy rig: all segments in one group, all control groups
/// in another, both parented under the global control curve.
#[derive(Debug, Clone)]
pub struct RigHierarchy {
    pub global_control: NodeId,
    pub segment_group: NodeId,
    pub control_group: NodeId,
    pub controls: Vec<ControlPair>,
}

/// Build the control hierarchy for `(joint, segment)` pairs cut from
/// `mesh`. Joints whose bucket produced no segment are simply not in
/// `pairs` and get no control.
///
/// Each control carries a keyable `vis` attribute clamped to `0..=1`
/// (default 1) connected one-way to its segment's visibility — a pure
/// data-flow connection, not a constraint. The segment group keeps
/// world-space placement (`inheritsTransform` off) while staying visually
/// parented under the global control for selection convenience; its own
/// visibility is driven by a `vis` attribute on the global control.
///
/// This step is purely additive scene construction; host mutation failures
/// propagate as fatal.
pub fn assemble<S: Scene + ?Sized>(
    scene: &mut S,
    mesh: NodeId,
    pairs: &[(NodeId, NodeId)],
) -> Result<RigHierarchy, Error> {
    let mesh_name = scene.name(mesh)?;

    let mut controls = Vec::with_capacity(pairs.len());
    for &(joint, segment) in pairs {
        let joint_name = scene.name(joint)?;
        let locator = scene.create_locator(&format!("ac_{joint_name}_proxy"))?;
        let group = scene.group(&[locator], &format!("ac_{joint_name}_proxy_grp"))?;
        scene.match_transform(group, joint)?;
        scene.add_attr(locator, VIS_ATTR, 0.0, 1.0, 1.0)?;
        scene.connect_attr(locator, VIS_ATTR, segment, VISIBILITY)?;
        controls.push(ControlPair {
            joint,
            segment,
            locator,
            group,
        });
    }

    let segments: Vec<NodeId> = controls.iter().map(|c| c.segment).collect();
    let groups: Vec<NodeId> = controls.iter().map(|c| c.group).collect();
    let segment_group = scene.group(&segments, &format!("{mesh_name}_proxy_geo_grp"))?;
    let control_group = scene.group(&groups, &format!("{mesh_name}_proxy_ctrl_grp"))?;

    let global_control = scene.create_circle(
        &format!("ac_{mesh_name}_proxy_global"),
        GLOBAL_CONTROL_RADIUS,
        Axis::Y,
    )?;
    scene.add_attr(global_control, VIS_ATTR, 0.0, 1.0, 1.0)?;
    scene.connect_attr(global_control, VIS_ATTR, segment_group, VISIBILITY)?;
    scene.set_flag(segment_group, NodeFlag::InheritsTransform, false)?;
    scene.set_parent(segment_group, global_control)?;
    scene.set_parent(control_group, global_control)?;

    tracing::info!(
        mesh = %mesh_name,
        controls = controls.len(),
        "assembled proxy rig hierarchy"
    );
    Ok(RigHierarchy {
        global_control,
        segment_group,
        control_group,
        controls,
    })
}
