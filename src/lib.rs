//! Procedural proxy-rig generation for skinned meshes: discover a mesh's
//! skin binding through the scene's dependency graph, partition the mesh by
//! dominant joint influence, cut one proxy segment per joint, rebind each
//! segment, and assemble per-joint visibility controls over the result.
//! Also carries an FK/IK limb-rig builder sharing the same scene
//! abstraction.
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod assemble;
pub mod error;
pub mod influence;
pub mod limb;
pub mod pipeline;
pub mod resolve;
pub mod scene;
pub mod segment;
pub mod skin;

pub use assemble::{RigHierarchy, GLOBAL_CONTROL_RADIUS, VIS_ATTR};
pub use error::Error;
pub use influence::{Bucket, VertexPartition};
pub use limb::{LimbJoints, LimbRig, LimbRigger};
pub use pipeline::{generate, generate_from_selection, ProxyRig, SKIN_SEARCH_DEPTH};
pub use resolve::{find_connected, Direction};
pub use scene::{
    FaceLabel, MemoryScene, NodeId, NodeKind, Scene, SceneError, VertexId, WorldPoint, WorldVector,
};
