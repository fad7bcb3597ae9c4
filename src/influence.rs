//! Mapping vertices to the joint that influences them most.

use std::collections::HashMap;

use crate::error::Error;
use crate::scene::{display_name, NodeId, Scene, VertexId};

/// One joint's share of a [VertexPartition]. An empty vertex list is a
/// normal outcome: the joint dominates nothing, and no proxy segment will
/// be built for it.
#[derive(Debug, Clone)]
pub struct Bucket {
    pub joint: NodeId,
    pub vertices: Vec<VertexId>,
}

/// A total, disjoint partition of a mesh's vertices over a joint list:
/// every vertex appears in exactly one bucket, and buckets are kept in
/// joint-list order.
#[derive(Debug, Clone)]
pub struct VertexPartition {
    buckets: Vec<Bucket>,
}

impl VertexPartition {
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// The vertex list for one joint, if the joint is part of the
    /// partition.
    pub fn bucket(&self, joint: NodeId) -> Option<&[VertexId]> {
        self.buckets
            .iter()
            .find(|b| b.joint == joint)
            .map(|b| b.vertices.as_slice())
    }

    /// Total vertices across all buckets. Equal to the partitioned mesh's
    /// vertex count.
    pub fn total_vertices(&self) -> usize {
        self.buckets.iter().map(|b| b.vertices.len()).sum()
    }
}

/// The joint in `joints` contributing the largest skin weight to `vertex`.
///
/// Weights are read from the binding's `(joint, weight)` pairs; a listed
/// joint absent from the pairs weighs zero. Ties resolve to the
/// earliest-listed joint — a forward scan keeping the first maximum, which
/// keeps the result stable and deterministic.
///
/// # Errors
/// * [Error::NoInfluenceData] — the vertex has an empty weight list (a
///   degenerate binding), or `joints` is empty.
pub fn dominant_joint<S: Scene + ?Sized>(
    scene: &S,
    skin: NodeId,
    vertex: VertexId,
    joints: &[NodeId],
) -> Result<NodeId, Error> {
    let pairs = scene.skin_weights(skin, vertex)?;
    if pairs.is_empty() {
        return Err(Error::NoInfluenceData {
            skin: display_name(scene, skin),
            vertex,
        });
    }
    let mut best: Option<(NodeId, f64)> = None;
    for &joint in joints {
        // first occurrence wins if the host ever repeats an influence
        let weight = pairs
            .iter()
            .find(|(j, _)| *j == joint)
            .map(|(_, w)| *w)
            .unwrap_or(0.0);
        match best {
            Some((_, top)) if weight <= top => {}
            _ => best = Some((joint, weight)),
        }
    }
    best.map(|(joint, _)| joint)
        .ok_or_else(|| Error::NoInfluenceData {
            skin: display_name(scene, skin),
            vertex,
        })
}

/// Partition every vertex of `mesh` into per-joint buckets by dominant
/// influence.
///
/// Buckets are initialized up front, one per joint in `joints` order, so a
/// joint dominating no vertices is still representable (as an empty
/// bucket). Vertices are visited in the mesh's native order.
pub fn partition<S: Scene + ?Sized>(
    scene: &S,
    mesh: NodeId,
    joints: &[NodeId],
    skin: NodeId,
) -> Result<VertexPartition, Error> {
    let mut buckets: Vec<Bucket> = joints
        .iter()
        .map(|&joint| Bucket {
            joint,
            vertices: Vec::new(),
        })
        .collect();
    let slots: HashMap<NodeId, usize> = joints
        .iter()
        .enumerate()
        .map(|(slot, &joint)| (joint, slot))
        .collect();

    for vertex in scene.vertices(mesh)? {
        let owner = dominant_joint(scene, skin, vertex, joints)?;
        buckets[slots[&owner]].vertices.push(vertex);
    }

    let filled = buckets.iter().filter(|b| !b.vertices.is_empty()).count();
    tracing::debug!(
        joints = joints.len(),
        filled,
        vertices = buckets.iter().map(|b| b.vertices.len()).sum::<usize>(),
        "partitioned mesh by dominant influence"
    );
    Ok(VertexPartition { buckets })
}
