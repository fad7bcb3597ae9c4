//! An in-memory [Scene] implementation.
//!
//! This is the reference host used by the test suite and the sample
//! binaries. It keeps the same narrow contract a real host binding would:
//! nodes are handles, names are mutable (created names are uniquified on
//! collision, so re-running a tool never clobbers an earlier run's nodes),
//! vertex ids and face labels are stable across duplication, and deleting
//! faces drops the vertices they orphan.
//!
//! Transforms are modeled as world-space translations only; parenting
//! changes the hierarchy, not positions. That is all the rigging pipeline
//! observes through [Scene].

use std::collections::{BTreeSet, HashMap, HashSet};

use super::{
    Axis, FaceLabel, InfluenceMatching, NodeFlag, NodeId, NodeKind, Scene, SceneError,
    SceneResult, VertexId, VertexMatching, WeightMatching, WorldPoint, VISIBILITY,
};

/// Hop limit when resolving an attribute through its incoming connections.
const MAX_CONNECTION_HOPS: u32 = 64;

#[derive(Debug, Clone)]
struct AttrRecord {
    value: f64,
    range: Option<(f64, f64)>,
    incoming: Option<(NodeId, String)>,
}

impl AttrRecord {
    fn plain(value: f64) -> Self {
        Self {
            value,
            range: None,
            incoming: None,
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        match self.range {
            Some((min, max)) => value.clamp(min, max),
            None => value,
        }
    }
}

#[derive(Debug, Clone)]
struct MeshData {
    /// `(id, local position)` in native vertex order.
    verts: Vec<(VertexId, WorldPoint)>,
    /// `(label, corner ids)` in native face order.
    faces: Vec<(FaceLabel, Vec<VertexId>)>,
}

#[derive(Debug, Clone)]
struct SkinData {
    /// The shape this binding deforms.
    shape: NodeId,
    influences: Vec<NodeId>,
    /// Weight rows parallel to `influences`, one row per bound vertex.
    weights: HashMap<VertexId, Vec<f64>>,
}

#[derive(Debug, Clone)]
struct CurveData {
    radius: f64,
    normal: Axis,
}

#[derive(Debug)]
struct NodeRecord {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    translation: WorldPoint,
    inherits_transform: bool,
    color: Option<[f64; 3]>,
    attrs: HashMap<String, AttrRecord>,
    mesh: Option<MeshData>,
    skin: Option<SkinData>,
    curve: Option<CurveData>,
}

impl NodeRecord {
    fn new(name: String, kind: NodeKind) -> Self {
        let mut attrs = HashMap::new();
        attrs.insert(VISIBILITY.to_owned(), AttrRecord::plain(1.0));
        Self {
            name,
            kind,
            parent: None,
            children: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            translation: WorldPoint::origin(),
            inherits_transform: true,
            color: None,
            attrs,
            mesh: None,
            skin: None,
            curve: None,
        }
    }
}

/// The in-memory scene. See the [module docs](self).
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: Vec<NodeRecord>,
    selection: Vec<NodeId>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the scene. Nodes are never destroyed, so this
    /// also counts everything ever created.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a joint at a world position.
    pub fn add_joint(&mut self, name: &str, position: [f64; 3]) -> NodeId {
        let id = self.push(name, NodeKind::Joint);
        self.nodes[id.0 as usize].translation = WorldPoint::from(position);
        id
    }

    /// Create a mesh transform (with its shape child) from vertex positions
    /// and faces given as corner indices into `positions`.
    pub fn add_mesh(&mut self, name: &str, positions: &[[f64; 3]], faces: &[&[u32]]) -> NodeId {
        let mesh = self.push(name, NodeKind::Mesh);
        let shape_name = format!("{}Shape", self.nodes[mesh.0 as usize].name);
        let shape = self.push(&shape_name, NodeKind::MeshShape);
        self.adopt(mesh, shape);
        self.nodes[shape.0 as usize].mesh = Some(MeshData {
            verts: positions
                .iter()
                .enumerate()
                .map(|(i, &p)| (VertexId(i as u32), WorldPoint::from(p)))
                .collect(),
            faces: faces
                .iter()
                .enumerate()
                .map(|(i, corners)| {
                    (
                        FaceLabel(i as u32),
                        corners.iter().map(|&c| VertexId(c)).collect(),
                    )
                })
                .collect(),
        });
        mesh
    }

    /// Overwrite one vertex's weight row on a skin binding. Joints absent
    /// from the pairs weigh zero.
    pub fn set_skin_weights(
        &mut self,
        skin: NodeId,
        vertex: VertexId,
        weights: &[(NodeId, f64)],
    ) -> SceneResult<()> {
        let name = self.name(skin)?;
        let data = self.nodes[skin.0 as usize]
            .skin
            .as_mut()
            .ok_or_else(|| SceneError::new("skinPercent", name.clone()))?;
        let mut row = vec![0.0; data.influences.len()];
        for &(joint, w) in weights {
            let slot = data
                .influences
                .iter()
                .position(|&j| j == joint)
                .ok_or_else(|| SceneError::new("skinPercent", name.clone()))?;
            row[slot] = w;
        }
        data.weights.insert(vertex, row);
        Ok(())
    }

    /// Wire a dependency edge: `producer` feeds `consumer`.
    pub fn connect_dependency(&mut self, producer: NodeId, consumer: NodeId) -> SceneResult<()> {
        self.record(producer, "connect")?;
        self.record(consumer, "connect")?;
        self.nodes[producer.0 as usize].outputs.push(consumer);
        self.nodes[consumer.0 as usize].inputs.push(producer);
        Ok(())
    }

    /// Display radius of a circle control, if `node` is one.
    pub fn circle_radius(&self, node: NodeId) -> Option<f64> {
        self.nodes
            .get(node.0 as usize)
            .and_then(|rec| rec.curve.as_ref())
            .map(|c| c.radius)
    }

    /// Normal axis of a circle control, if `node` is one.
    pub fn circle_normal(&self, node: NodeId) -> Option<Axis> {
        self.nodes
            .get(node.0 as usize)
            .and_then(|rec| rec.curve.as_ref())
            .map(|c| c.normal)
    }

    /// Display color of a control, if one was applied.
    pub fn color(&self, node: NodeId) -> Option<[f64; 3]> {
        self.nodes.get(node.0 as usize).and_then(|rec| rec.color)
    }

    fn record(&self, node: NodeId, op: &'static str) -> SceneResult<&NodeRecord> {
        self.nodes
            .get(node.0 as usize)
            .ok_or_else(|| SceneError::new(op, node.to_string()))
    }

    fn push(&mut self, name: &str, kind: NodeKind) -> NodeId {
        let name = self.unique_name(name);
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeRecord::new(name, kind));
        id
    }

    /// Created and renamed nodes get host-style uniquified names: `base`,
    /// then `base1`, `base2`, ...
    fn unique_name(&self, base: &str) -> String {
        if self.find(base).is_none() {
            return base.to_owned();
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}{n}");
            if self.find(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    fn adopt(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes[child.0 as usize].parent {
            self.nodes[old.0 as usize].children.retain(|&c| c != child);
        }
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.push(child);
    }

    /// Resolve a mesh transform or shape to the shape record holding
    /// geometry.
    fn shape_id(&self, mesh: NodeId, op: &'static str) -> SceneResult<NodeId> {
        let rec = self.record(mesh, op)?;
        match rec.kind {
            NodeKind::MeshShape => Ok(mesh),
            NodeKind::Mesh => rec
                .children
                .iter()
                .copied()
                .find(|&c| self.nodes[c.0 as usize].kind == NodeKind::MeshShape)
                .ok_or_else(|| SceneError::new(op, rec.name.clone())),
            _ => Err(SceneError::new(op, rec.name.clone())),
        }
    }

    fn mesh_data(&self, mesh: NodeId, op: &'static str) -> SceneResult<(NodeId, &MeshData)> {
        let shape = self.shape_id(mesh, op)?;
        let rec = &self.nodes[shape.0 as usize];
        rec.mesh
            .as_ref()
            .map(|data| (shape, data))
            .ok_or_else(|| SceneError::new(op, rec.name.clone()))
    }

    fn skin_data(&self, skin: NodeId, op: &'static str) -> SceneResult<&SkinData> {
        let rec = self.record(skin, op)?;
        rec.skin
            .as_ref()
            .ok_or_else(|| SceneError::new(op, rec.name.clone()))
    }

    /// World position of a vertex: shape-local position offset by the mesh
    /// transform's translation.
    fn vertex_world(&self, shape: NodeId, vertex: VertexId, op: &'static str) -> SceneResult<WorldPoint> {
        let rec = &self.nodes[shape.0 as usize];
        let local = rec
            .mesh
            .as_ref()
            .and_then(|data| data.verts.iter().find(|(id, _)| *id == vertex))
            .map(|(_, p)| *p)
            .ok_or_else(|| SceneError::new(op, format!("{}.{vertex}", rec.name)))?;
        let offset = match rec.parent {
            Some(parent) => self.nodes[parent.0 as usize].translation.coords,
            None => nalgebra::Vector3::zeros(),
        };
        Ok(local + offset)
    }

    /// Read an attribute, following incoming connections up to
    /// [MAX_CONNECTION_HOPS]. Clamped ranges apply at every hop.
    fn resolve_attr(&self, node: NodeId, attr: &str, hops: u32) -> SceneResult<f64> {
        let name = &self.record(node, "getAttr")?.name;
        let rec = self.nodes[node.0 as usize]
            .attrs
            .get(attr)
            .ok_or_else(|| SceneError::new("getAttr", format!("{name}.{attr}")))?;
        match &rec.incoming {
            Some((src, src_attr)) if hops < MAX_CONNECTION_HOPS => {
                Ok(rec.clamp(self.resolve_attr(*src, src_attr, hops + 1)?))
            }
            _ => Ok(rec.value),
        }
    }

    fn nearest_joint(&self, joints: &[NodeId], to: WorldPoint) -> Option<NodeId> {
        joints
            .iter()
            .copied()
            .map(|j| {
                let d = (self.nodes[j.0 as usize].translation - to).norm_squared();
                (j, d)
            })
            .fold(None, |best: Option<(NodeId, f64)>, (j, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((j, d)),
            })
            .map(|(j, _)| j)
    }
}

impl Scene for MemoryScene {
    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn set_selection(&mut self, nodes: &[NodeId]) {
        self.selection = nodes.to_vec();
    }

    fn name(&self, node: NodeId) -> SceneResult<String> {
        Ok(self.record(node, "name")?.name.clone())
    }

    fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|rec| rec.name == name)
            .map(|i| NodeId(i as u32))
    }

    fn kind(&self, node: NodeId) -> SceneResult<NodeKind> {
        Ok(self.record(node, "nodeType")?.kind)
    }

    fn shape_of(&self, mesh: NodeId) -> SceneResult<NodeId> {
        self.shape_id(mesh, "listRelatives")
    }

    fn inputs(&self, node: NodeId) -> SceneResult<Vec<NodeId>> {
        Ok(self.record(node, "listConnections")?.inputs.clone())
    }

    fn outputs(&self, node: NodeId) -> SceneResult<Vec<NodeId>> {
        Ok(self.record(node, "listConnections")?.outputs.clone())
    }

    fn children(&self, node: NodeId) -> SceneResult<Vec<NodeId>> {
        Ok(self.record(node, "listRelatives")?.children.clone())
    }

    fn world_position(&self, node: NodeId) -> SceneResult<WorldPoint> {
        Ok(self.record(node, "xform")?.translation)
    }

    fn set_world_position(&mut self, node: NodeId, position: WorldPoint) -> SceneResult<()> {
        self.record(node, "xform")?;
        self.nodes[node.0 as usize].translation = position;
        Ok(())
    }

    fn vertices(&self, mesh: NodeId) -> SceneResult<Vec<VertexId>> {
        let (_, data) = self.mesh_data(mesh, "ls")?;
        Ok(data.verts.iter().map(|(id, _)| *id).collect())
    }

    fn faces(&self, mesh: NodeId) -> SceneResult<Vec<FaceLabel>> {
        let (_, data) = self.mesh_data(mesh, "ls")?;
        Ok(data.faces.iter().map(|(label, _)| *label).collect())
    }

    fn incident_faces(
        &self,
        mesh: NodeId,
        vertices: &[VertexId],
    ) -> SceneResult<BTreeSet<FaceLabel>> {
        let (_, data) = self.mesh_data(mesh, "polyListComponentConversion")?;
        let wanted: HashSet<VertexId> = vertices.iter().copied().collect();
        Ok(data
            .faces
            .iter()
            .filter(|(_, corners)| corners.iter().any(|c| wanted.contains(c)))
            .map(|(label, _)| *label)
            .collect())
    }

    fn skin_weights(&self, skin: NodeId, vertex: VertexId) -> SceneResult<Vec<(NodeId, f64)>> {
        let data = self.skin_data(skin, "skinPercent")?;
        let row = data.weights.get(&vertex).ok_or_else(|| {
            SceneError::new("skinPercent", format!("{}.{vertex}", self.nodes[skin.0 as usize].name))
        })?;
        Ok(data.influences.iter().copied().zip(row.iter().copied()).collect())
    }

    fn skin_influences(&self, skin: NodeId) -> SceneResult<Vec<NodeId>> {
        Ok(self.skin_data(skin, "skinCluster")?.influences.clone())
    }

    fn duplicate_mesh(&mut self, mesh: NodeId) -> SceneResult<NodeId> {
        let (shape, _) = self.mesh_data(mesh, "duplicate")?;
        let transform = self.nodes[shape.0 as usize]
            .parent
            .ok_or_else(|| SceneError::new("duplicate", self.nodes[shape.0 as usize].name.clone()))?;
        let base = format!("{}_dup", self.nodes[transform.0 as usize].name);
        let data = self.nodes[shape.0 as usize].mesh.clone();
        let translation = self.nodes[transform.0 as usize].translation;

        let copy = self.push(&base, NodeKind::Mesh);
        self.nodes[copy.0 as usize].translation = translation;
        let shape_name = format!("{}Shape", self.nodes[copy.0 as usize].name);
        let copy_shape = self.push(&shape_name, NodeKind::MeshShape);
        self.adopt(copy, copy_shape);
        self.nodes[copy_shape.0 as usize].mesh = data;
        Ok(copy)
    }

    fn delete_faces(&mut self, mesh: NodeId, faces: &BTreeSet<FaceLabel>) -> SceneResult<()> {
        let (shape, _) = self.mesh_data(mesh, "delete")?;
        let data = self.nodes[shape.0 as usize].mesh.as_mut().unwrap();
        data.faces.retain(|(label, _)| !faces.contains(label));
        let used: HashSet<VertexId> = data
            .faces
            .iter()
            .flat_map(|(_, corners)| corners.iter().copied())
            .collect();
        data.verts.retain(|(id, _)| used.contains(id));
        Ok(())
    }

    fn rename(&mut self, node: NodeId, name: &str) -> SceneResult<()> {
        let kind = self.record(node, "rename")?.kind;
        let fresh = self.unique_name(name);
        self.nodes[node.0 as usize].name = fresh;
        // the host renames a mesh's shape along with its transform
        if kind == NodeKind::Mesh {
            if let Ok(shape) = self.shape_id(node, "rename") {
                let shape_name = format!("{}Shape", self.nodes[node.0 as usize].name);
                let shape_name = self.unique_name(&shape_name);
                self.nodes[shape.0 as usize].name = shape_name;
            }
        }
        Ok(())
    }

    fn bind_skin(&mut self, joints: &[NodeId], mesh: NodeId) -> SceneResult<NodeId> {
        let (shape, data) = self.mesh_data(mesh, "skinCluster")?;
        for &joint in joints {
            let rec = self.record(joint, "skinCluster")?;
            if rec.kind != NodeKind::Joint {
                return Err(SceneError::new("skinCluster", rec.name.clone()));
            }
        }
        // a fresh binding weighs each vertex fully to its nearest joint
        let mut weights = HashMap::with_capacity(data.verts.len());
        let vert_ids: Vec<VertexId> = data.verts.iter().map(|(id, _)| *id).collect();
        for id in vert_ids {
            let pos = self.vertex_world(shape, id, "skinCluster")?;
            let mut row = vec![0.0; joints.len()];
            if let Some(nearest) = self.nearest_joint(joints, pos) {
                let slot = joints.iter().position(|&j| j == nearest).unwrap();
                row[slot] = 1.0;
            }
            weights.insert(id, row);
        }

        let skin = self.push("skinCluster", NodeKind::SkinDeformer);
        self.nodes[skin.0 as usize].skin = Some(SkinData {
            shape,
            influences: joints.to_vec(),
            weights,
        });
        for &joint in joints {
            self.connect_dependency(joint, skin)?;
        }
        self.connect_dependency(skin, shape)?;
        Ok(skin)
    }

    fn copy_skin_weights(
        &mut self,
        source: NodeId,
        dest: NodeId,
        matching: WeightMatching,
    ) -> SceneResult<()> {
        const OP: &str = "copySkinWeights";
        let src = self.skin_data(source, OP)?;
        let dst = self.skin_data(dest, OP)?;
        let src_shape = src.shape;
        let dst_shape = dst.shape;
        let src_influences = src.influences.clone();
        let dst_influences = dst.influences.clone();
        let src_rows = src.weights.clone();

        let src_verts: Vec<(VertexId, WorldPoint)> = src_rows
            .keys()
            .map(|&id| Ok((id, self.vertex_world(src_shape, id, OP)?)))
            .collect::<SceneResult<_>>()?;
        let dst_verts = {
            let (_, data) = self.mesh_data(dst_shape, OP)?;
            data.verts.iter().map(|(id, _)| *id).collect::<Vec<_>>()
        };

        let mut new_rows = HashMap::with_capacity(dst_verts.len());
        for vertex in dst_verts {
            let src_vertex = match matching.vertex {
                VertexMatching::Index => src_rows
                    .contains_key(&vertex)
                    .then_some(vertex)
                    .ok_or_else(|| SceneError::new(OP, format!("{vertex}")))?,
                VertexMatching::ClosestPoint => {
                    let here = self.vertex_world(dst_shape, vertex, OP)?;
                    src_verts
                        .iter()
                        .fold(None, |best: Option<(VertexId, f64)>, &(id, pos)| {
                            let d = (pos - here).norm_squared();
                            match best {
                                Some((_, bd)) if bd <= d => best,
                                _ => Some((id, d)),
                            }
                        })
                        .map(|(id, _)| id)
                        .ok_or_else(|| SceneError::new(OP, format!("{vertex}")))?
                }
            };
            let mut row = vec![0.0; dst_influences.len()];
            for (slot, &joint) in src_influences.iter().enumerate() {
                let w = src_rows[&src_vertex][slot];
                if w == 0.0 {
                    continue;
                }
                let target = match dst_influences.iter().position(|&j| j == joint) {
                    Some(i) => Some(i),
                    None => match matching.influence {
                        InfluenceMatching::Exact => None,
                        InfluenceMatching::ClosestJoint => {
                            let at = self.nodes[joint.0 as usize].translation;
                            self.nearest_joint(&dst_influences, at)
                                .and_then(|j| dst_influences.iter().position(|&dj| dj == j))
                        }
                    },
                };
                if let Some(i) = target {
                    row[i] += w;
                }
            }
            new_rows.insert(vertex, row);
        }

        self.nodes[dest.0 as usize].skin.as_mut().unwrap().weights = new_rows;
        Ok(())
    }

    fn create_locator(&mut self, name: &str) -> SceneResult<NodeId> {
        Ok(self.push(name, NodeKind::Locator))
    }

    fn create_circle(&mut self, name: &str, radius: f64, normal: Axis) -> SceneResult<NodeId> {
        let id = self.push(name, NodeKind::Curve);
        self.nodes[id.0 as usize].curve = Some(CurveData { radius, normal });
        Ok(id)
    }

    fn group(&mut self, nodes: &[NodeId], name: &str) -> SceneResult<NodeId> {
        for &node in nodes {
            self.record(node, "group")?;
        }
        let group = self.push(name, NodeKind::Group);
        for &node in nodes {
            self.adopt(group, node);
        }
        Ok(group)
    }

    fn set_parent(&mut self, child: NodeId, parent: NodeId) -> SceneResult<()> {
        self.record(child, "parent")?;
        self.record(parent, "parent")?;
        if child == parent {
            return Err(SceneError::new("parent", self.nodes[child.0 as usize].name.clone()));
        }
        self.adopt(parent, child);
        Ok(())
    }

    fn match_transform(&mut self, target: NodeId, source: NodeId) -> SceneResult<()> {
        let translation = self.record(source, "matchTransform")?.translation;
        self.record(target, "matchTransform")?;
        self.nodes[target.0 as usize].translation = translation;
        Ok(())
    }

    fn add_attr(
        &mut self,
        node: NodeId,
        attr: &str,
        min: f64,
        max: f64,
        default: f64,
    ) -> SceneResult<()> {
        let name = self.record(node, "addAttr")?.name.clone();
        let rec = &mut self.nodes[node.0 as usize];
        if rec.attrs.contains_key(attr) {
            return Err(SceneError::new("addAttr", format!("{name}.{attr}")));
        }
        rec.attrs.insert(
            attr.to_owned(),
            AttrRecord {
                value: default.clamp(min, max),
                range: Some((min, max)),
                incoming: None,
            },
        );
        Ok(())
    }

    fn set_attr(&mut self, node: NodeId, attr: &str, value: f64) -> SceneResult<()> {
        let name = self.record(node, "setAttr")?.name.clone();
        let rec = self.nodes[node.0 as usize]
            .attrs
            .get_mut(attr)
            .ok_or_else(|| SceneError::new("setAttr", format!("{name}.{attr}")))?;
        // a driven plug has no independent override path
        if rec.incoming.is_some() {
            return Err(SceneError::new("setAttr", format!("{name}.{attr}")));
        }
        rec.value = rec.clamp(value);
        Ok(())
    }

    fn attr(&self, node: NodeId, attr: &str) -> SceneResult<f64> {
        self.resolve_attr(node, attr, 0)
    }

    fn connect_attr(
        &mut self,
        src: NodeId,
        src_attr: &str,
        dst: NodeId,
        dst_attr: &str,
    ) -> SceneResult<()> {
        let src_name = self.record(src, "connectAttr")?.name.clone();
        if !self.nodes[src.0 as usize].attrs.contains_key(src_attr) {
            return Err(SceneError::new("connectAttr", format!("{src_name}.{src_attr}")));
        }
        let dst_name = self.record(dst, "connectAttr")?.name.clone();
        let rec = self.nodes[dst.0 as usize]
            .attrs
            .get_mut(dst_attr)
            .ok_or_else(|| SceneError::new("connectAttr", format!("{dst_name}.{dst_attr}")))?;
        rec.incoming = Some((src, src_attr.to_owned()));
        Ok(())
    }

    fn set_flag(&mut self, node: NodeId, flag: NodeFlag, value: bool) -> SceneResult<()> {
        self.record(node, "setAttr")?;
        match flag {
            NodeFlag::InheritsTransform => self.nodes[node.0 as usize].inherits_transform = value,
        }
        Ok(())
    }

    fn set_color(&mut self, node: NodeId, color: [f64; 3]) -> SceneResult<()> {
        self.record(node, "setAttr")?;
        self.nodes[node.0 as usize].color = Some(color);
        Ok(())
    }
}

impl MemoryScene {
    /// Whether a node composes its parent's transform.
    pub fn inherits_transform(&self, node: NodeId) -> Option<bool> {
        self.nodes.get(node.0 as usize).map(|rec| rec.inherits_transform)
    }

    /// A node's parent in the hierarchy.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0 as usize).and_then(|rec| rec.parent)
    }
}
