//! Rebinding proxy segments and carrying skin weights over.

use crate::error::Error;
use crate::scene::{display_name, NodeId, Scene, WeightMatching};

/// Bind `segment` to the full original joint list and copy weights over
/// from `source_skin`.
///
/// All original joints stay bound — not just the joint that owns the
/// segment — because deformation near a segment boundary can still depend
/// on neighboring joints. The copy matches vertices by closest point and
/// influences by closest joint: cutting faces out of the duplicate does not
/// guarantee index correspondence with the source, so this transfer is
/// best-effort rather than exact-preserving.
///
/// # Errors
/// * [Error::WeightTransfer] — the host rejected the binding or the copy.
///   The pipeline aborts; segments already created stay in the scene.
pub fn rebind<S: Scene + ?Sized>(
    scene: &mut S,
    segment: NodeId,
    joints: &[NodeId],
    source_skin: NodeId,
) -> Result<NodeId, Error> {
    let segment_name = display_name(scene, segment);
    let wrap = |source| Error::WeightTransfer {
        segment: segment_name.clone(),
        source,
    };

    let skin = scene.bind_skin(joints, segment).map_err(wrap)?;
    scene
        .copy_skin_weights(source_skin, skin, WeightMatching::CLOSEST)
        .map_err(wrap)?;
    tracing::debug!(segment = %segment_name, influences = joints.len(), "rebound segment");
    Ok(skin)
}
