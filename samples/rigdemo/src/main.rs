//! Builds a skinned tube in an in-memory scene, generates a proxy rig over
//! it, and rigs its joint chain as a limb.

mod cli;

use clap::Parser;
use cli::{Cli, LogFormat};
use proxyrig::limb::{find_limb, LimbRigger};
use proxyrig::scene::{MemoryScene, NodeId, Scene};

fn init_tracing(cli: &Cli) {
    let builder = tracing_subscriber::fmt().with_env_filter(cli.log_filter.clone());
    match cli.log_format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Full => builder.init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// A vertical tube: one ring of four vertices per level, one joint per
/// band between rings, joints chained root-down.
fn build_tube(scene: &mut MemoryScene, bands: u32) -> (NodeId, Vec<NodeId>) {
    let bands = bands.max(1) as usize;
    let mut positions = Vec::with_capacity((bands + 1) * 4);
    for level in 0..=bands {
        let h = level as f64 * 2.0;
        positions.extend_from_slice(&[
            [-1.0, h, -1.0],
            [1.0, h, -1.0],
            [1.0, h, 1.0],
            [-1.0, h, 1.0],
        ]);
    }
    let mut faces: Vec<Vec<u32>> = Vec::with_capacity(bands * 4);
    for band in 0..bands as u32 {
        let lo = band * 4;
        let hi = lo + 4;
        for i in 0..4 {
            let j = (i + 1) % 4;
            faces.push(vec![lo + i, lo + j, hi + j, hi + i]);
        }
    }
    let face_slices: Vec<&[u32]> = faces.iter().map(|f| f.as_slice()).collect();
    let mesh = scene.add_mesh("tube", &positions, &face_slices);

    let mut joints = Vec::with_capacity(bands);
    for band in 0..bands {
        let name = format!("spine{band}");
        let joint = scene.add_joint(&name, [0.0, band as f64 * 2.0 + 1.0, 0.0]);
        if let Some(&parent) = joints.last() {
            scene.set_parent(joint, parent).expect("joint chain");
        }
        joints.push(joint);
    }
    (mesh, joints)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let mut scene = MemoryScene::new();
    let (mesh, joints) = build_tube(&mut scene, cli.joints);
    tracing::info!(joints = joints.len(), "built demo tube");
    // the fresh binding weighs each vertex to its nearest joint, which is
    // exactly the banding the proxy rig should recover
    scene.bind_skin(&joints, mesh)?;
    scene.set_selection(&[mesh]);

    let rig = proxyrig::generate_from_selection(&mut scene)?;
    println!(
        "proxy rig over `{}`: {} segments under `{}`",
        scene.name(rig.mesh)?,
        rig.segments.len(),
        scene.name(rig.hierarchy.global_control)?,
    );
    for &(joint, segment) in &rig.segments {
        println!(
            "  {:<10} -> {} ({} faces)",
            scene.name(joint)?,
            scene.name(segment)?,
            scene.faces(segment)?.len(),
        );
    }

    if joints.len() >= 3 {
        let limb = find_limb(&scene, joints[0])?;
        let limb_rig = LimbRigger::default().rig(&mut scene, &limb)?;
        println!(
            "limb rig over `{}`: controls under `{}`",
            scene.name(limb.root)?,
            scene.name(limb_rig.group)?,
        );
    }
    Ok(())
}
