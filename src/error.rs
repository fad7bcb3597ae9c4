//! Errors reported by the rigging pipelines.
//!
//! Every stage fails fast: the first error aborts the remaining stages,
//! nothing is retried, and scene nodes created before the failure are left
//! in place (the host owns undo, not this crate).

use crate::scene::{SceneError, VertexId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("nothing is selected")]
    NoSelection,
    #[error("`{0}` is not a mesh")]
    NotAMesh(String),
    #[error("`{0}` is not a joint")]
    NotAJoint(String),
    #[error("`{mesh}` has no skin deformer within {depth} upstream hops")]
    NoSkinFound { mesh: String, depth: u32 },
    #[error("`{mesh}` has no joints bound")]
    NoInfluencesFound { mesh: String },
    #[error("{vertex} of `{skin}` has no weight data")]
    NoInfluenceData { skin: String, vertex: VertexId },
    #[error("failed to transfer skin weights onto `{segment}`")]
    WeightTransfer {
        segment: String,
        #[source]
        source: SceneError,
    },
    #[error("joint chain under `{0}` is too short to rig as a limb")]
    IncompleteLimb(String),
    #[error("limb joints are collinear; the bend plane is undefined")]
    DegenerateChain,
    #[error(transparent)]
    SceneOperation(#[from] SceneError),
}
