//! FK/IK limb rigging over a three-joint chain.
//!
//! The chain is rigged with nested FK circle controls, an IK end control, a
//! pole-vector control placed on the chain's bend plane, and a blend
//! control whose `ikfkBlend` attribute drives the IK controls' visibility.
//! The bend direction is computed from the joints' world positions rather
//! than read back from a host IK solver.

use crate::error::Error;
use crate::scene::{display_name, Axis, NodeId, Scene, WorldPoint, WorldVector, VISIBILITY};

/// Name of the FK/IK blend attribute on the blend control.
pub const IKFK_BLEND_ATTR: &str = "ikfkBlend";

/// Chains shorter than this are treated as degenerate.
const MIN_CHAIN_LENGTH: f64 = 1e-9;

/// The three joints of a limb chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LimbJoints {
    pub root: NodeId,
    pub mid: NodeId,
    pub end: NodeId,
}

/// Discover a limb chain from the current selection: the selected joint is
/// the root, its first joint child the mid, and the mid's first joint child
/// the end.
///
/// # Errors
/// * [Error::NoSelection] — nothing is selected.
/// * [Error::NotAJoint] — the selection is not a joint.
/// * [Error::IncompleteLimb] — the chain runs out before three joints.
pub fn find_limb_from_selection<S: Scene + ?Sized>(scene: &S) -> Result<LimbJoints, Error> {
    let root = scene
        .selection()
        .into_iter()
        .next()
        .ok_or(Error::NoSelection)?;
    find_limb(scene, root)
}

/// Discover a limb chain starting at `root`. See
/// [find_limb_from_selection].
pub fn find_limb<S: Scene + ?Sized>(scene: &S, root: NodeId) -> Result<LimbJoints, Error> {
    if !scene.is_joint(root) {
        return Err(Error::NotAJoint(display_name(scene, root)));
    }
    let mid = first_joint_child(scene, root)?;
    let end = first_joint_child(scene, mid)?;
    Ok(LimbJoints { root, mid, end })
}

fn first_joint_child<S: Scene + ?Sized>(scene: &S, joint: NodeId) -> Result<NodeId, Error> {
    scene
        .children(joint)?
        .into_iter()
        .find(|&child| scene.is_joint(child))
        .ok_or_else(|| Error::IncompleteLimb(display_name(scene, joint)))
}

/// Where to place a two-bone chain's pole-vector control.
///
/// The bend direction is the component of `mid - root` perpendicular to the
/// root→end axis; the control sits at the chain's midpoint, pushed out
/// along that direction by the root→end distance.
///
/// # Errors
/// * [Error::DegenerateChain] — the chain has zero length or its joints
///   are collinear, leaving the bend plane undefined.
pub fn pole_vector_position(
    root: WorldPoint,
    mid: WorldPoint,
    end: WorldPoint,
) -> Result<WorldPoint, Error> {
    let span: WorldVector = end - root;
    let length = span.norm();
    if length <= MIN_CHAIN_LENGTH {
        return Err(Error::DegenerateChain);
    }
    let to_mid = mid - root;
    let along = span * (to_mid.dot(&span) / (length * length));
    let bend = to_mid - along;
    if bend.norm() <= MIN_CHAIN_LENGTH {
        return Err(Error::DegenerateChain);
    }
    Ok(root + span * 0.5 + bend.normalize() * length)
}

/// The controls one [LimbRigger::rig] call created.
#[derive(Debug, Clone)]
pub struct LimbRig {
    /// Root, mid, end FK controls, nested in that order.
    pub fk_controls: [NodeId; 3],
    pub ik_control: NodeId,
    pub pole_control: NodeId,
    pub blend_control: NodeId,
    pub group: NodeId,
}

/// Builder for limb rigs, carrying the control display settings.
#[derive(Debug, Clone)]
pub struct LimbRigger {
    pub controller_size: f64,
    pub controller_color: [f64; 3],
}

impl Default for LimbRigger {
    fn default() -> Self {
        Self {
            controller_size: 5.0,
            controller_color: [0.0, 0.0, 0.0],
        }
    }
}

impl LimbRigger {
    /// Rig a limb chain.
    ///
    /// FK controls nest root→mid→end; the IK end control and pole-vector
    /// control become visible as `ikfkBlend` rises toward 1. Everything is
    /// gathered under one `<root>_rig_grp` group.
    pub fn rig<S: Scene + ?Sized>(&self, scene: &mut S, limb: &LimbJoints) -> Result<LimbRig, Error> {
        let root_name = scene.name(limb.root)?;
        tracing::info!(root = %root_name, "rigging limb");

        let (root_ctrl, root_grp) = self.fk_control(scene, limb.root)?;
        let (mid_ctrl, mid_grp) = self.fk_control(scene, limb.mid)?;
        let (end_ctrl, end_grp) = self.fk_control(scene, limb.end)?;
        scene.set_parent(mid_grp, root_ctrl)?;
        scene.set_parent(end_grp, mid_ctrl)?;

        let end_name = scene.name(limb.end)?;
        let ik_control = scene.create_circle(
            &format!("ac_ik_{end_name}"),
            self.controller_size,
            Axis::X,
        )?;
        scene.set_color(ik_control, self.controller_color)?;
        let ik_grp = scene.group(&[ik_control], &format!("ac_ik_{end_name}_grp"))?;
        scene.match_transform(ik_grp, limb.end)?;

        let root_pos = scene.world_position(limb.root)?;
        let mid_pos = scene.world_position(limb.mid)?;
        let end_pos = scene.world_position(limb.end)?;
        let pole_pos = pole_vector_position(root_pos, mid_pos, end_pos)?;
        let mid_name = scene.name(limb.mid)?;
        let pole_control = scene.create_locator(&format!("ac_ik_{mid_name}"))?;
        let pole_grp = scene.group(&[pole_control], &format!("ac_ik_{mid_name}_grp"))?;
        scene.set_world_position(pole_grp, pole_pos)?;

        let blend_control = scene.create_circle(
            &format!("ac_ikfk_blend_{root_name}"),
            self.controller_size / 8.0,
            Axis::Y,
        )?;
        scene.set_color(blend_control, self.controller_color)?;
        let blend_grp = scene.group(&[blend_control], &format!("ac_ikfk_blend_{root_name}_grp"))?;
        scene.set_world_position(
            blend_grp,
            root_pos + WorldVector::new(0.0, self.controller_size, 0.0),
        )?;
        scene.add_attr(blend_control, IKFK_BLEND_ATTR, 0.0, 1.0, 0.0)?;
        scene.connect_attr(blend_control, IKFK_BLEND_ATTR, ik_grp, VISIBILITY)?;
        scene.connect_attr(blend_control, IKFK_BLEND_ATTR, pole_grp, VISIBILITY)?;

        let group = scene.group(
            &[root_grp, ik_grp, pole_grp, blend_grp],
            &format!("{root_name}_rig_grp"),
        )?;

        Ok(LimbRig {
            fk_controls: [root_ctrl, mid_ctrl, end_ctrl],
            ik_control,
            pole_control,
            blend_control,
            group,
        })
    }

    /// One FK control: a colored circle in its own group, transform-matched
    /// to the joint.
    fn fk_control<S: Scene + ?Sized>(
        &self,
        scene: &mut S,
        joint: NodeId,
    ) -> Result<(NodeId, NodeId), Error> {
        let joint_name = scene.name(joint)?;
        let ctrl = scene.create_circle(
            &format!("ac_fk_{joint_name}"),
            self.controller_size,
            Axis::X,
        )?;
        scene.set_color(ctrl, self.controller_color)?;
        let grp = scene.group(&[ctrl], &format!("ac_fk_{joint_name}_grp"))?;
        scene.match_transform(grp, joint)?;
        Ok((ctrl, grp))
    }
}
