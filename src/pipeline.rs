//! The proxy rig pipeline: discovery, partitioning, decomposition,
//! rebinding, assembly.
//!
//! Stages run synchronously, each consuming the previous stage's output;
//! there is no feedback loop and no automatic retry. A run either completes
//! or aborts at the first error, leaving already-created nodes in the scene
//! (the host owns undo). Re-running over the same mesh builds a second,
//! independent rig — nothing is deduplicated or updated in place.

use crate::assemble::{self, RigHierarchy};
use crate::error::Error;
use crate::influence;
use crate::resolve::{find_connected, Direction};
use crate::scene::{display_name, NodeId, Scene};
use crate::segment;
use crate::skin;

/// How far upstream of the mesh's shape to look for the skin deformer and
/// its joints.
pub const SKIN_SEARCH_DEPTH: u32 = 10;

/// Everything one pipeline run produced (and the source nodes it found).
#[derive(Debug, Clone)]
pub struct ProxyRig {
    pub mesh: NodeId,
    pub skin: NodeId,
    pub joints: Vec<NodeId>,
    /// `(joint, segment)` for every joint that dominated at least one
    /// vertex, in joint discovery order.
    pub segments: Vec<(NodeId, NodeId)>,
    pub hierarchy: RigHierarchy,
}

/// Run the pipeline on the first currently-selected node.
///
/// # Errors
/// * [Error::NoSelection] — nothing is selected.
/// * Everything [generate] reports.
pub fn generate_from_selection<S: Scene + ?Sized>(scene: &mut S) -> Result<ProxyRig, Error> {
    let mesh = scene
        .selection()
        .into_iter()
        .next()
        .ok_or(Error::NoSelection)?;
    generate(scene, mesh)
}

/// Build a proxy rig for `mesh`.
///
/// Discovery walks the dependency graph upstream of the mesh's shape,
/// bounded to [SKIN_SEARCH_DEPTH] hops: the first skin deformer found is
/// the binding, and every joint within the bound is an influence. The
/// mesh's vertices are then partitioned by dominant influence, one segment
/// is cut per non-empty bucket, each segment is rebound to the full joint
/// list with weights copied over, and the control hierarchy is assembled
/// on top.
pub fn generate<S: Scene + ?Sized>(scene: &mut S, mesh: NodeId) -> Result<ProxyRig, Error> {
    if !scene.is_mesh(mesh) {
        return Err(Error::NotAMesh(display_name(scene, mesh)));
    }
    let mesh_name = scene.name(mesh)?;
    let shape = scene.shape_of(mesh)?;
    tracing::info!(mesh = %mesh_name, shape = %display_name(scene, shape), "generating proxy rig");

    let skins = find_connected(scene, shape, Direction::Upstream, SKIN_SEARCH_DEPTH, |s, n| {
        s.is_skin_deformer(n)
    });
    let skin = skins.first().copied().ok_or_else(|| Error::NoSkinFound {
        mesh: mesh_name.clone(),
        depth: SKIN_SEARCH_DEPTH,
    })?;

    let joints = find_connected(scene, shape, Direction::Upstream, SKIN_SEARCH_DEPTH, |s, n| {
        s.is_joint(n)
    });
    if joints.is_empty() {
        return Err(Error::NoInfluencesFound { mesh: mesh_name });
    }
    tracing::info!(
        skin = %display_name(scene, skin),
        joints = joints.len(),
        "found binding"
    );

    let partition = influence::partition(scene, mesh, &joints, skin)?;

    let mut segments = Vec::with_capacity(joints.len());
    for bucket in partition.buckets() {
        match segment::build_segment(scene, mesh, bucket.joint, &bucket.vertices)? {
            Some(seg) => {
                skin::rebind(scene, seg, &joints, skin)?;
                segments.push((bucket.joint, seg));
            }
            None => tracing::warn!(
                joint = %display_name(scene, bucket.joint),
                "joint dominates no vertices; skipping segment"
            ),
        }
    }

    let hierarchy = assemble::assemble(scene, mesh, &segments)?;
    Ok(ProxyRig {
        mesh,
        skin,
        joints,
        segments,
        hierarchy,
    })
}
