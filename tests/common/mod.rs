#![allow(dead_code)]

use proxyrig::scene::{MemoryScene, NodeId, Scene, VertexId};

/// A 2×2×2 cube skinned to a two-joint chain: the bottom four vertices
/// dominantly follow `j1`, the top four `j2`.
pub struct SkinnedCube {
    pub scene: MemoryScene,
    pub mesh: NodeId,
    pub shape: NodeId,
    pub skin: NodeId,
    pub j1: NodeId,
    pub j2: NodeId,
}

pub const CUBE_POSITIONS: [[f64; 3]; 8] = [
    [-1.0, 0.0, -1.0],
    [1.0, 0.0, -1.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [-1.0, 2.0, -1.0],
    [1.0, 2.0, -1.0],
    [1.0, 2.0, 1.0],
    [-1.0, 2.0, 1.0],
];

/// Face 0 is the bottom, face 1 the top, faces 2..=5 the sides.
pub const CUBE_FACES: [&[u32]; 6] = [
    &[0, 1, 2, 3],
    &[4, 5, 6, 7],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
];

pub fn skinned_cube() -> SkinnedCube {
    let mut scene = MemoryScene::new();
    let mesh = scene.add_mesh("Cube", &CUBE_POSITIONS, &CUBE_FACES);
    let shape = scene.shape_of(mesh).unwrap();
    let j1 = scene.add_joint("J1", [0.0, 0.0, 0.0]);
    let j2 = scene.add_joint("J2", [0.0, 2.0, 0.0]);
    let skin = scene.bind_skin(&[j1, j2], mesh).unwrap();
    for v in 0..4 {
        scene
            .set_skin_weights(skin, VertexId(v), &[(j1, 0.9), (j2, 0.1)])
            .unwrap();
    }
    for v in 4..8 {
        scene
            .set_skin_weights(skin, VertexId(v), &[(j1, 0.1), (j2, 0.9)])
            .unwrap();
    }
    SkinnedCube {
        scene,
        mesh,
        shape,
        skin,
        j1,
        j2,
    }
}
