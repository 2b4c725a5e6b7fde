//! Skeleton retargeting: copies rest-pose transforms from an external
//! skeleton file into a kf animation's interpolators so the animation can be
//! replayed on that skeleton.

use crate::error::RetargetError;
use crate::parser::parse_nif;
use crate::types::{Block, Container};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The conventional skeleton location next to an exported kf: a sibling
/// file named `skeleton.nif`. A default for callers, not a rule of the
/// retarget itself.
pub fn default_skeleton_path(directory: &Path) -> PathBuf {
    directory.join("skeleton.nif")
}

/// Patches every controlled block's interpolator in `kf` with the rest
/// transform of the same-named node from the skeleton file.
///
/// The skeleton is opened, fully read, and dropped within this call. An
/// unreadable file fails as [`RetargetError::MissingSkeleton`] before any
/// mutation; a bone with no matching skeleton node is logged and skipped.
/// Matching is exact by name against plain nodes only, first occurrence in
/// parse order winning. Returns the number of interpolators patched.
pub fn apply_skeleton(kf: &mut Container, skeleton_path: &Path) -> Result<usize, RetargetError> {
    let bytes = fs::read(skeleton_path).map_err(|source| RetargetError::MissingSkeleton {
        path: skeleton_path.to_path_buf(),
        source,
    })?;
    let skeleton = parse_nif(&bytes)?;

    let mut targets = Vec::new();
    for block in &kf.blocks {
        if let Block::ControllerSequence(seq) = block {
            for cb in &seq.controlled_blocks {
                if let Some(index) = cb.interpolator {
                    targets.push((index, cb.node_name.clone()));
                }
            }
        }
    }

    let mut applied = 0;
    for (index, node_name) in targets {
        let Some(node) = skeleton.node_by_name(&node_name) else {
            info!(bone = %node_name, "failed to find bone in skeleton");
            continue;
        };
        // Rotation-only component; the scale baked into the matrix is
        // discarded in favor of the node's own scale scalar.
        let (_, rotation) = node.av_base.transform.rotation.scale_quat();
        match kf.blocks.get_mut(index).and_then(Block::as_interpolator_mut) {
            Some(interp) => {
                interp.scale = node.av_base.transform.scale;
                interp.translation = node.av_base.transform.translation;
                interp.rotation = rotation;
                applied += 1;
            }
            None => {
                warn!(bone = %node_name, index, "interpolator link does not resolve to a transform interpolator");
            }
        }
    }
    info!(applied, "finished applying skeleton to interpolators");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kf::{BoneTrack, ExportOptions, build_controller_sequence};
    use crate::types::{Matrix3x3, NiNode};
    use crate::writer::write_nif;
    use glam::Vec3;
    use std::io::Write;

    fn skeleton_with(names_and_x: &[(&str, f32)]) -> Container {
        let blocks = names_and_x
            .iter()
            .map(|(name, x)| {
                let mut node = NiNode::default();
                node.av_base.net_base.name = name.to_string();
                node.av_base.transform.translation = Vec3::new(*x, 0.0, 0.0);
                node.av_base.transform.rotation = Matrix3x3::default();
                node.av_base.transform.scale = 1.0;
                Block::Node(node)
            })
            .collect::<Vec<_>>();
        Container {
            roots: vec![Some(0)],
            blocks,
            ..Default::default()
        }
    }

    fn write_skeleton(dir: &Path, skeleton: &Container) -> PathBuf {
        let path = default_skeleton_path(dir);
        let bytes = write_nif(skeleton).unwrap();
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&bytes).unwrap();
        path
    }

    fn kf_for(bones: &[&str]) -> Container {
        let tracks = bones
            .iter()
            .map(|name| BoneTrack {
                name: name.to_string(),
                ..Default::default()
            })
            .collect::<Vec<_>>();
        build_controller_sequence(&tracks, &ExportOptions::default())
    }

    #[test]
    fn partial_skeleton_applies_only_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_skeleton(dir.path(), &skeleton_with(&[("Bip01", 3.0)]));

        let mut kf = kf_for(&["Bip01", "Bip01 Tail"]);
        let applied = apply_skeleton(&mut kf, &path).unwrap();
        assert_eq!(applied, 1);

        let interps: Vec<_> = kf
            .blocks
            .iter()
            .filter_map(Block::as_interpolator)
            .cloned()
            .collect();
        assert_eq!(interps.len(), 2);
        let patched = interps.iter().find(|i| i.translation.x == 3.0);
        assert!(patched.is_some());
        // The unmatched bone keeps its exported default untouched.
        let untouched = interps.iter().find(|i| i.translation == Vec3::ZERO);
        assert!(untouched.is_some());
    }

    #[test]
    fn retarget_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_skeleton(dir.path(), &skeleton_with(&[("Bip01", 3.0), ("Bip01 Spine", -1.0)]));

        let mut kf = kf_for(&["Bip01", "Bip01 Spine"]);
        apply_skeleton(&mut kf, &path).unwrap();
        let once = kf.blocks.clone();
        apply_skeleton(&mut kf, &path).unwrap();
        assert_eq!(kf.blocks, once);
    }

    #[test]
    fn missing_skeleton_is_a_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut kf = kf_for(&["Bip01"]);
        let err = apply_skeleton(&mut kf, &dir.path().join("skeleton.nif")).unwrap_err();
        assert!(matches!(err, RetargetError::MissingSkeleton { .. }));
    }

    #[test]
    fn duplicate_bone_names_use_first_in_parse_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_skeleton(
            dir.path(),
            &skeleton_with(&[("Bip01", 3.0), ("Bip01", 9.0)]),
        );

        let mut kf = kf_for(&["Bip01"]);
        apply_skeleton(&mut kf, &path).unwrap();
        let interp = kf.blocks.iter().find_map(Block::as_interpolator).unwrap();
        assert_eq!(interp.translation.x, 3.0);
    }
}
