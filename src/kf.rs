//! Kf export assembly: builds a controller-sequence block graph from loose
//! animation tracks and serializes it, with uniform scale correction applied
//! exactly once, after retargeting.

use crate::error::ExportError;
use crate::types::{
    Block, CYCLE_CLAMP, Container, ControlledBlock, KeyFloat, KeyQuaternion, KeyVec3,
    NiControllerSequence, NiTransformData, NiTransformInterpolator, NifHeader,
};
use crate::writer::write_nif;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// One animated bone's keyframe samples, as supplied by the scene source.
#[derive(Debug, Clone, Default)]
pub struct BoneTrack {
    pub name: String,
    pub rotations: Vec<KeyQuaternion>,
    pub translations: Vec<KeyVec3>,
    pub scales: Vec<KeyFloat>,
}

/// Export parameters, threaded explicitly through every call.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub sequence_name: String,
    pub start_time: f32,
    pub stop_time: f32,
    pub frequency: f32,
    pub cycle_type: u32,
    /// Power-of-ten exponent for the unit-scale correction; -1 shrinks all
    /// translations by 10.
    pub scale_correction_exponent: i32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            sequence_name: String::new(),
            start_time: 0.0,
            stop_time: 0.0,
            frequency: 1.0,
            cycle_type: CYCLE_CLAMP,
            scale_correction_exponent: 0,
        }
    }
}

/// Builds a container whose single root is a controller sequence with one
/// controlled block per track. Each track gets its own transform data block
/// and an interpolator (at identity rest transform) linking to it.
pub fn build_controller_sequence(tracks: &[BoneTrack], options: &ExportOptions) -> Container {
    let mut blocks = Vec::with_capacity(tracks.len() * 2 + 1);
    let mut controlled_blocks = Vec::with_capacity(tracks.len());

    for track in tracks {
        let data_index = blocks.len();
        blocks.push(Block::TransformData(NiTransformData {
            rotation_type: Default::default(),
            quaternion_keys: track.rotations.clone(),
            translation_interp: (!track.translations.is_empty()).then_some(Default::default()),
            translations: track.translations.clone(),
            scale_interp: (!track.scales.is_empty()).then_some(Default::default()),
            scales: track.scales.clone(),
        }));

        let interp_index = blocks.len();
        blocks.push(Block::TransformInterpolator(NiTransformInterpolator {
            data: Some(data_index),
            ..Default::default()
        }));

        controlled_blocks.push(ControlledBlock {
            node_name: track.name.clone(),
            interpolator: Some(interp_index),
        });
    }

    let sequence_index = blocks.len();
    blocks.push(Block::ControllerSequence(NiControllerSequence {
        name: options.sequence_name.clone(),
        controlled_blocks,
        start_time: options.start_time,
        stop_time: options.stop_time,
        frequency: options.frequency,
        cycle_type: options.cycle_type,
        text_keys: None,
    }));

    Container {
        header: NifHeader::default(),
        blocks,
        roots: vec![Some(sequence_index)],
    }
}

/// Multiplies every translation component in the graph by `factor`: node
/// translations, interpolator rest translations, and translation keys with
/// their tangents. Rotations and scale scalars are unit-independent and
/// stay untouched.
pub fn apply_scale(container: &mut Container, factor: f32) {
    for block in &mut container.blocks {
        match block {
            Block::Node(node) | Block::FadeNode(node) => {
                node.av_base.transform.translation *= factor;
            }
            Block::TransformInterpolator(interp) => {
                interp.translation *= factor;
            }
            Block::TransformData(data) => {
                for key in &mut data.translations {
                    key.value *= factor;
                    if let Some(tangent) = &mut key.forward_tangent {
                        *tangent *= factor;
                    }
                    if let Some(tangent) = &mut key.backward_tangent {
                        *tangent *= factor;
                    }
                }
            }
            _ => {}
        }
    }
}

/// Applies the scale correction and writes the container to `path`.
///
/// Scale correction happens here, after any retargeting, because retargeted
/// transforms come from the skeleton file in the target's native scale.
/// The bytes go to a temp file in the destination directory first and are
/// renamed into place, so a failed export leaves no partial file.
pub fn write_kf(
    container: &mut Container,
    path: &Path,
    scale_correction_exponent: i32,
) -> std::result::Result<(), ExportError> {
    let factor = 10f32.powi(scale_correction_exponent);
    if factor != 1.0 {
        apply_scale(container, factor);
    }
    let bytes = write_nif(container)?;

    let directory = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match directory {
        Some(dir) => tempfile::NamedTempFile::new_in(dir),
        None => tempfile::NamedTempFile::new(),
    }
    .map_err(|e| write_error(path, e))?;
    tmp.write_all(&bytes).map_err(|e| write_error(path, e))?;
    tmp.persist(path).map_err(|e| write_error(path, e.error))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote kf");
    Ok(())
}

fn write_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Write {
        path: path.to_path_buf(),
        source,
    }
}
