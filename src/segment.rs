//! Decomposing a skinned mesh into per-joint proxy segments.

use std::collections::BTreeSet;

use crate::error::Error;
use crate::scene::{FaceLabel, NodeId, Scene, VertexId};

/// Name given to the proxy segment of `joint` cut from `mesh`.
pub fn proxy_name(mesh: &str, joint: &str) -> String {
    format!("{mesh}_{joint}_proxy")
}

/// Cut the sub-mesh dominated by one joint out of a copy of `mesh`.
///
/// Returns `None` without touching the scene when `vertices` is empty — a
/// joint dominating nothing simply gets no segment. Otherwise the vertex
/// set is expanded to its incident faces on the source mesh, the source is
/// duplicated whole, and every duplicate face whose label is outside the
/// retained set is deleted in one batch. The duplicate is then renamed to
/// [proxy_name].
///
/// Retention is purely label-driven: duplication is an exact geometric
/// copy, so labels recorded on the source select the same faces on the
/// duplicate regardless of either mesh's name. The source mesh is never
/// mutated.
pub fn build_segment<S: Scene + ?Sized>(
    scene: &mut S,
    mesh: NodeId,
    joint: NodeId,
    vertices: &[VertexId],
) -> Result<Option<NodeId>, Error> {
    if vertices.is_empty() {
        return Ok(None);
    }

    let keep = scene.incident_faces(mesh, vertices)?;
    let duplicate = scene.duplicate_mesh(mesh)?;
    let doomed: BTreeSet<FaceLabel> = scene
        .faces(duplicate)?
        .into_iter()
        .filter(|label| !keep.contains(label))
        .collect();
    scene.delete_faces(duplicate, &doomed)?;

    let name = proxy_name(&scene.name(mesh)?, &scene.name(joint)?);
    scene.rename(duplicate, &name)?;
    tracing::debug!(
        segment = %name,
        faces = keep.len(),
        dropped = doomed.len(),
        "built proxy segment"
    );
    Ok(Some(duplicate))
}
