use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::{Quat, Vec3};
use gltf::animation::util::ReadOutputs;

use super::animation::{AnimationClip, Channel, ChannelValues, Interpolation};
use super::model::{ModelAsset, ModelNode, Transform};
use crate::scenes::MeshData;
use crate::types::Vertex;

/// Loading milestones reported to an observer
#[derive(Debug, Clone, PartialEq)]
pub enum LoadProgress {
    Started,
    Parsed { meshes: usize, animations: usize },
    Finished { triangles: usize, nodes: usize },
}

impl LoadProgress {
    /// Rough completion fraction for display
    pub fn fraction(&self) -> f32 {
        match self {
            Self::Started => 0.0,
            Self::Parsed { .. } => 0.5,
            Self::Finished { .. } => 1.0,
        }
    }
}

/// Loads a glTF/GLB file into a `ModelAsset`
pub fn load_model(path: impl AsRef<Path>, on_progress: &mut dyn FnMut(LoadProgress)) -> Result<ModelAsset> {
    let path = path.as_ref();
    on_progress(LoadProgress::Started);

    let (document, buffers, _images) =
        gltf::import(path).with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    on_progress(LoadProgress::Parsed {
        meshes: document.meshes().count(),
        animations: document.animations().count(),
    });

    let asset = model_from_document(&document, &buffers)?;

    on_progress(LoadProgress::Finished {
        triangles: asset.mesh.triangle_count(),
        nodes: asset.nodes.len(),
    });
    Ok(asset)
}

/// Converts an imported document into nodes, geometry and clips
pub fn model_from_document(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<ModelAsset> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .context("glTF file has no scenes")?;

    let mut asset = ModelAsset::default();
    let mut node_map = HashMap::new();

    for node in scene.nodes() {
        process_node(&node, None, buffers, &mut asset, &mut node_map)?;
    }

    if asset.mesh.is_empty() {
        bail!("glTF scene contains no triangle geometry");
    }

    for animation in document.animations() {
        if let Some(clip) = read_clip(&animation, buffers, &node_map) {
            log::debug!("Animation clip {:?}: {:.2}s", clip.name, clip.duration);
            asset.clips.push(clip);
        }
    }

    log::info!(
        "Model parsed: {} nodes, {} triangles, {} clips",
        asset.nodes.len(),
        asset.mesh.triangle_count(),
        asset.clips.len()
    );
    Ok(asset)
}

/// Depth-first so parents are stored before children
fn process_node(
    node: &gltf::Node,
    parent: Option<usize>,
    buffers: &[gltf::buffer::Data],
    asset: &mut ModelAsset,
    node_map: &mut HashMap<usize, usize>,
) -> Result<()> {
    let index = asset.nodes.len();
    node_map.insert(node.index(), index);

    let (translation, rotation, scale) = node.transform().decomposed();
    asset.nodes.push(ModelNode {
        name: node.name().map(str::to_string),
        parent,
        rest: Transform {
            translation: Vec3::from_array(translation),
            rotation: Quat::from_array(rotation),
            scale: Vec3::from_array(scale),
        },
    });

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!("Skipping {:?} primitive in mesh {:?}", primitive.mode(), mesh.name());
                continue;
            }
            asset.mesh.append(read_primitive(&primitive, buffers, index as u32)?);
        }
    }

    for child in node.children() {
        process_node(&child, Some(index), buffers, asset, node_map)?;
    }
    Ok(())
}

fn read_primitive(primitive: &gltf::Primitive, buffers: &[gltf::buffer::Data], node: u32) -> Result<MeshData> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .context("Mesh primitive has no positions")?
        .collect();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    if indices.iter().any(|&i| i as usize >= positions.len()) {
        bail!("Mesh primitive index out of range");
    }

    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(normals) => normals.collect(),
        None => compute_normals(&positions, &indices),
    };

    let base = primitive.material().pbr_metallic_roughness().base_color_factor();
    let colors: Vec<[f32; 4]> = match reader.read_colors(0) {
        Some(colors) => colors
            .into_rgba_f32()
            .map(|c| [c[0] * base[0], c[1] * base[1], c[2] * base[2], c[3] * base[3]])
            .collect(),
        None => vec![base; positions.len()],
    };

    let vertices = positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let normal = normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]);
            let color = colors.get(i).copied().unwrap_or(base);
            Vertex::new(*p, normal, color, node)
        })
        .collect();

    Ok(MeshData::new(vertices, indices))
}

/// Area-weighted vertex normals for primitives without a NORMAL attribute
fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = Vec3::from_array(positions[a]);
        let face = (Vec3::from_array(positions[b]) - pa).cross(Vec3::from_array(positions[c]) - pa);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals.into_iter().map(|n| n.normalize_or(Vec3::Y).to_array()).collect()
}

fn read_clip(
    animation: &gltf::Animation,
    buffers: &[gltf::buffer::Data],
    node_map: &HashMap<usize, usize>,
) -> Option<AnimationClip> {
    let mut channels = Vec::new();

    for channel in animation.channels() {
        let Some(&node) = node_map.get(&channel.target().node().index()) else {
            continue;
        };
        let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
        let Some(inputs) = reader.read_inputs() else {
            continue;
        };
        let times: Vec<f32> = inputs.collect();

        let (interpolation, cubic) = match channel.sampler().interpolation() {
            gltf::animation::Interpolation::Step => (Interpolation::Step, false),
            gltf::animation::Interpolation::Linear => (Interpolation::Linear, false),
            // in-tangent, value, out-tangent per key; sample the values linearly
            gltf::animation::Interpolation::CubicSpline => (Interpolation::Linear, true),
        };

        let values = match reader.read_outputs() {
            Some(ReadOutputs::Translations(it)) => {
                ChannelValues::Translation(keyframes(it.map(Vec3::from_array), cubic))
            }
            Some(ReadOutputs::Rotations(it)) => {
                ChannelValues::Rotation(keyframes(it.into_f32().map(Quat::from_array), cubic))
            }
            Some(ReadOutputs::Scales(it)) => ChannelValues::Scale(keyframes(it.map(Vec3::from_array), cubic)),
            Some(ReadOutputs::MorphTargetWeights(_)) | None => continue,
        };

        channels.push(Channel {
            node,
            times,
            values,
            interpolation,
        });
    }

    if channels.is_empty() {
        return None;
    }
    let name = animation
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("clip{}", animation.index()));
    Some(AnimationClip::new(name, channels))
}

fn keyframes<T>(values: impl Iterator<Item = T>, cubic: bool) -> Vec<T> {
    if cubic {
        values.skip(1).step_by(3).collect()
    } else {
        values.collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_error() {
        let mut seen = Vec::new();
        let result = load_model("/no/such/model.glb", &mut |p| seen.push(p));
        assert!(result.is_err());
        assert_eq!(seen, vec![LoadProgress::Started]);
    }

    #[test]
    fn test_compute_normals_single_triangle() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals = compute_normals(&positions, &[0, 1, 2]);
        for n in normals {
            assert_eq!(n, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_cubic_keyframes_take_values() {
        let flat = vec![10, 1, 20, 11, 2, 21];
        assert_eq!(keyframes(flat.into_iter(), true), vec![1, 2]);
    }

    #[test]
    fn test_progress_fraction_ordering() {
        let parsed = LoadProgress::Parsed { meshes: 1, animations: 0 };
        let finished = LoadProgress::Finished { triangles: 1, nodes: 1 };
        assert!(LoadProgress::Started.fraction() < parsed.fraction());
        assert!(parsed.fraction() < finished.fraction());
    }
}
