//! The host scene abstraction: a narrow, injected capability through which
//! every pipeline stage queries and mutates the dependency graph.
//!
//! The host graph (a Maya-style DG) is cyclic and dynamically typed; this
//! module deliberately models only the handful of queries and mutations the
//! rigging pipeline needs, rather than the host's full node-type lattice.
//! Weight queries are bound into `(joint, weight)` pairs at this boundary so
//! no parallel-array pairing ever crosses into the core.

pub mod memory;
pub use memory::MemoryScene;

use std::collections::BTreeSet;
use std::fmt;

use nalgebra::{Point3, Vector3};

/// A point in the scene's world space.
pub type WorldPoint = Point3<f64>;

/// A vector in the scene's world space.
pub type WorldVector = Vector3<f64>;

/// Name of the visibility attribute carried by every scene node.
pub const VISIBILITY: &str = "visibility";

/// Handle to a node owned by the scene. Stable for the node's lifetime;
/// the node's *name* is not (duplication and [Scene::rename] change it).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Stable identifier of a vertex within one mesh. Survives duplication;
/// a vertex orphaned by face deletion disappears along with its id.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vtx[{}]", self.0)
    }
}

/// Stable label of a face within one mesh. Unlike a face's position in
/// [Scene::faces], the label survives duplication, deletion of other faces,
/// and renames, so labels recorded on a source mesh remain comparable
/// against its duplicates.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceLabel(pub u32);

impl fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f[{}]", self.0)
    }
}

/// The node types the pipeline can tell apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A mesh transform, parent of a [NodeKind::MeshShape].
    Mesh,
    /// The shape node holding a mesh's geometry.
    MeshShape,
    Joint,
    SkinDeformer,
    Locator,
    /// A curve shape used for rig controls.
    Curve,
    Group,
}

/// World axes, used as circle-curve normals.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn vector(self) -> WorldVector {
        match self {
            Axis::X => WorldVector::x(),
            Axis::Y => WorldVector::y(),
            Axis::Z => WorldVector::z(),
        }
    }
}

/// Boolean node flags settable through [Scene::set_flag].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NodeFlag {
    /// Whether the node's transform is composed with its parent's. Disabled
    /// on proxy segment groups so segments keep world-space placement.
    InheritsTransform,
}

/// How [Scene::copy_skin_weights] pairs up vertices across two meshes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VertexMatching {
    /// Match by identical [VertexId].
    Index,
    /// Match each destination vertex to the spatially nearest source vertex.
    ClosestPoint,
}

/// How [Scene::copy_skin_weights] maps source influences onto the
/// destination binding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InfluenceMatching {
    /// Only map influences bound on both sides; others are dropped.
    Exact,
    /// Fall back to the spatially nearest destination influence when a
    /// source influence is not part of the destination binding.
    ClosestJoint,
}

/// Matching mode pair for a weight copy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WeightMatching {
    pub vertex: VertexMatching,
    pub influence: InfluenceMatching,
}

impl WeightMatching {
    /// The best-effort mode used by the proxy pipeline: duplicated-and-cut
    /// meshes do not guarantee index correspondence with their source.
    pub const CLOSEST: Self = Self {
        vertex: VertexMatching::ClosestPoint,
        influence: InfluenceMatching::ClosestJoint,
    };
}

/// A failed scene mutation or query, carrying the attempted operation and
/// the name (or handle) of its target.
#[derive(Debug, Clone, thiserror::Error)]
#[error("scene operation `{op}` failed on `{target}`")]
pub struct SceneError {
    pub op: &'static str,
    pub target: String,
}

impl SceneError {
    pub fn new(op: &'static str, target: impl Into<String>) -> Self {
        Self {
            op,
            target: target.into(),
        }
    }
}

pub type SceneResult<T> = Result<T, SceneError>;

/// The scene capability. One shared, globally mutable host scene sits behind
/// this trait; the pipeline never owns node lifetime, only [NodeId] handles.
pub trait Scene {
    fn selection(&self) -> Vec<NodeId>;
    fn set_selection(&mut self, nodes: &[NodeId]);

    fn name(&self, node: NodeId) -> SceneResult<String>;
    /// Look a node up by its current name.
    fn find(&self, name: &str) -> Option<NodeId>;
    fn kind(&self, node: NodeId) -> SceneResult<NodeKind>;

    /// The shape child of a mesh transform.
    fn shape_of(&self, mesh: NodeId) -> SceneResult<NodeId>;
    /// Producers feeding `node`, one dependency hop away.
    fn inputs(&self, node: NodeId) -> SceneResult<Vec<NodeId>>;
    /// Consumers fed by `node`, one dependency hop away.
    fn outputs(&self, node: NodeId) -> SceneResult<Vec<NodeId>>;
    fn children(&self, node: NodeId) -> SceneResult<Vec<NodeId>>;
    fn world_position(&self, node: NodeId) -> SceneResult<WorldPoint>;
    fn set_world_position(&mut self, node: NodeId, position: WorldPoint) -> SceneResult<()>;

    /// A mesh's vertices, in the mesh's native order.
    fn vertices(&self, mesh: NodeId) -> SceneResult<Vec<VertexId>>;
    /// A mesh's face labels, in the mesh's native order.
    fn faces(&self, mesh: NodeId) -> SceneResult<Vec<FaceLabel>>;
    /// Every face with at least one corner in `vertices`.
    fn incident_faces(
        &self,
        mesh: NodeId,
        vertices: &[VertexId],
    ) -> SceneResult<BTreeSet<FaceLabel>>;

    /// The weight each bound influence contributes to `vertex`, as
    /// `(joint, weight)` pairs in the binding's influence order. Zero
    /// weights are included.
    fn skin_weights(&self, skin: NodeId, vertex: VertexId) -> SceneResult<Vec<(NodeId, f64)>>;
    /// The joints bound as influences of a skin, in binding order.
    fn skin_influences(&self, skin: NodeId) -> SceneResult<Vec<NodeId>>;

    /// Duplicate a mesh's geometry under a fresh name. The copy carries the
    /// source's vertex ids and face labels but none of its deformers.
    fn duplicate_mesh(&mut self, mesh: NodeId) -> SceneResult<NodeId>;
    /// Delete the given faces in one batch. Vertices referenced by no
    /// remaining face are removed with them.
    fn delete_faces(&mut self, mesh: NodeId, faces: &BTreeSet<FaceLabel>) -> SceneResult<()>;
    fn rename(&mut self, node: NodeId, name: &str) -> SceneResult<()>;

    /// Create a skin binding of `joints` over `mesh`.
    fn bind_skin(&mut self, joints: &[NodeId], mesh: NodeId) -> SceneResult<NodeId>;
    /// Copy weights from one skin binding onto another.
    fn copy_skin_weights(
        &mut self,
        source: NodeId,
        dest: NodeId,
        matching: WeightMatching,
    ) -> SceneResult<()>;

    fn create_locator(&mut self, name: &str) -> SceneResult<NodeId>;
    fn create_circle(&mut self, name: &str, radius: f64, normal: Axis) -> SceneResult<NodeId>;
    /// Group `nodes` under a fresh group node.
    fn group(&mut self, nodes: &[NodeId], name: &str) -> SceneResult<NodeId>;
    fn set_parent(&mut self, child: NodeId, parent: NodeId) -> SceneResult<()>;
    /// Move `target` to `source`'s world transform.
    fn match_transform(&mut self, target: NodeId, source: NodeId) -> SceneResult<()>;

    /// Add a keyable scalar attribute clamped to `min..=max`.
    fn add_attr(
        &mut self,
        node: NodeId,
        attr: &str,
        min: f64,
        max: f64,
        default: f64,
    ) -> SceneResult<()>;
    fn set_attr(&mut self, node: NodeId, attr: &str, value: f64) -> SceneResult<()>;
    /// Read an attribute, resolved through incoming connections.
    fn attr(&self, node: NodeId, attr: &str) -> SceneResult<f64>;
    /// Connect `src.src_attr` to drive `dst.dst_attr`, one-way. Once
    /// connected, the destination mirrors the source with no independent
    /// override path.
    fn connect_attr(
        &mut self,
        src: NodeId,
        src_attr: &str,
        dst: NodeId,
        dst_attr: &str,
    ) -> SceneResult<()>;
    fn set_flag(&mut self, node: NodeId, flag: NodeFlag, value: bool) -> SceneResult<()>;
    /// Set a control's display color.
    fn set_color(&mut self, node: NodeId, color: [f64; 3]) -> SceneResult<()>;

    fn is_mesh(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Ok(NodeKind::Mesh))
    }

    fn is_joint(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Ok(NodeKind::Joint))
    }

    fn is_skin_deformer(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Ok(NodeKind::SkinDeformer))
    }
}

/// A node's name for error reporting, falling back to the handle when the
/// node is gone.
pub fn display_name<S: Scene + ?Sized>(scene: &S, node: NodeId) -> String {
    scene.name(node).unwrap_or_else(|_| node.to_string())
}
