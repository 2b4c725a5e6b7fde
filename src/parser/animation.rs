use super::helpers::{
    check_key_count, read_key_float, read_key_quat, read_key_vec3, read_link, read_quat_wxyz,
    read_string, read_vector3,
};
use crate::error::{NifError, Result};
use crate::types::{
    ControlledBlock, KeyType, NiControllerSequence, NiTransformData, NiTransformInterpolator,
};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

pub fn parse_nitransforminterpolator_fields(
    cursor: &mut Cursor<&[u8]>,
) -> Result<NiTransformInterpolator> {
    let translation = read_vector3(cursor)?;
    let rotation = read_quat_wxyz(cursor)?;
    let scale = cursor.read_f32::<LittleEndian>()?;
    let data = read_link(cursor)?;
    Ok(NiTransformInterpolator {
        translation,
        rotation,
        scale,
        data,
    })
}

pub fn parse_nitransformdata_fields(cursor: &mut Cursor<&[u8]>) -> Result<NiTransformData> {
    // Rotation group: the type u32 follows the count even when the count is
    // zero. Euler (XYZ) rotation keys are not part of this block set.
    let num_rotation_keys = cursor.read_u32::<LittleEndian>()?;
    check_key_count(cursor, num_rotation_keys)?;
    let rotation_type = KeyType::from(cursor.read_u32::<LittleEndian>()?);
    if rotation_type == KeyType::XyzRotation {
        return Err(NifError::corrupt(
            cursor.position(),
            "euler rotation keys are not supported",
        ));
    }
    let mut quaternion_keys = Vec::with_capacity(num_rotation_keys as usize);
    for _ in 0..num_rotation_keys {
        quaternion_keys.push(read_key_quat(cursor, rotation_type)?);
    }

    // Translation and scale groups only carry a type when non-empty.
    let num_translation_keys = cursor.read_u32::<LittleEndian>()?;
    check_key_count(cursor, num_translation_keys)?;
    let mut translation_interp = None;
    let mut translations = Vec::with_capacity(num_translation_keys as usize);
    if num_translation_keys > 0 {
        let interp = KeyType::from(cursor.read_u32::<LittleEndian>()?);
        translation_interp = Some(interp);
        for _ in 0..num_translation_keys {
            translations.push(read_key_vec3(cursor, interp)?);
        }
    }

    let num_scale_keys = cursor.read_u32::<LittleEndian>()?;
    check_key_count(cursor, num_scale_keys)?;
    let mut scale_interp = None;
    let mut scales = Vec::with_capacity(num_scale_keys as usize);
    if num_scale_keys > 0 {
        let interp = KeyType::from(cursor.read_u32::<LittleEndian>()?);
        scale_interp = Some(interp);
        for _ in 0..num_scale_keys {
            scales.push(read_key_float(cursor, interp)?);
        }
    }

    Ok(NiTransformData {
        rotation_type,
        quaternion_keys,
        translation_interp,
        translations,
        scale_interp,
        scales,
    })
}

pub fn parse_nicontrollersequence_fields(
    cursor: &mut Cursor<&[u8]>,
) -> Result<NiControllerSequence> {
    let name = read_string(cursor)?;
    let num_controlled_blocks = cursor.read_u32::<LittleEndian>()?;
    check_key_count(cursor, num_controlled_blocks)?;
    let mut controlled_blocks = Vec::with_capacity(num_controlled_blocks as usize);
    for _ in 0..num_controlled_blocks {
        let node_name = read_string(cursor)?;
        let interpolator = read_link(cursor)?;
        controlled_blocks.push(ControlledBlock {
            node_name,
            interpolator,
        });
    }
    let start_time = cursor.read_f32::<LittleEndian>()?;
    let stop_time = cursor.read_f32::<LittleEndian>()?;
    let frequency = cursor.read_f32::<LittleEndian>()?;
    let cycle_type = cursor.read_u32::<LittleEndian>()?;
    let text_keys = read_link(cursor)?;
    Ok(NiControllerSequence {
        name,
        controlled_blocks,
        start_time,
        stop_time,
        frequency,
        cycle_type,
        text_keys,
    })
}
