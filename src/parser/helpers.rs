use crate::error::{NifError, Result};
use crate::types::{KeyFloat, KeyQuaternion, KeyType, KeyVec3, Matrix3x3, Quaternion, RecordLink};
use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::WINDOWS_1252;
use glam::Vec3;
use std::io::{Cursor, Read};

const MAX_STRING_LEN: u32 = 819200;
const MAX_LINK_COUNT: u32 = 50000;
const MAX_KEY_COUNT: u32 = 10000;

/// Reads `len` bytes and decodes as windows-1252 (the NIF string encoding).
/// Every byte maps to exactly one char and back, so decoding is lossless for
/// round-tripping.
pub fn read_nif_string(cursor: &mut Cursor<&[u8]>, len: u32) -> Result<String> {
    if len > MAX_STRING_LEN {
        return Err(NifError::corrupt(
            cursor.position(),
            format!("string length too long: {len}"),
        ));
    }
    if len == 0 {
        return Ok(String::new());
    }
    let mut buf = vec![0u8; len as usize];
    cursor.read_exact(&mut buf)?;
    let (decoded, _, _) = WINDOWS_1252.decode(&buf);
    Ok(decoded.into_owned())
}

/// Reads a u32-length-prefixed string.
pub fn read_string(cursor: &mut Cursor<&[u8]>) -> Result<String> {
    let len = cursor.read_u32::<LittleEndian>()?;
    read_nif_string(cursor, len)
}

/// Reads a block link: i32, -1 is null, anything below -1 is corruption.
/// Upper-bound validation against the block count happens after the block
/// loop, once the whole arena exists.
pub fn read_link(cursor: &mut Cursor<&[u8]>) -> Result<RecordLink> {
    let index = cursor.read_i32::<LittleEndian>()?;
    if index < -1 {
        Err(NifError::corrupt(
            cursor.position(),
            format!("invalid link index: {index}"),
        ))
    } else if index == -1 {
        Ok(None)
    } else {
        Ok(Some(index as usize))
    }
}

pub fn read_link_list(cursor: &mut Cursor<&[u8]>) -> Result<Vec<RecordLink>> {
    let count = cursor.read_u32::<LittleEndian>()?;
    if count > MAX_LINK_COUNT {
        return Err(NifError::corrupt(
            cursor.position(),
            format!("link list count too high: {count}"),
        ));
    }
    let mut links = Vec::with_capacity(count as usize);
    for _ in 0..count {
        links.push(read_link(cursor)?);
    }
    Ok(links)
}

pub fn read_vector3(cursor: &mut Cursor<&[u8]>) -> Result<Vec3> {
    Ok(Vec3::new(
        cursor.read_f32::<LittleEndian>()?,
        cursor.read_f32::<LittleEndian>()?,
        cursor.read_f32::<LittleEndian>()?,
    ))
}

pub fn read_matrix3x3(cursor: &mut Cursor<&[u8]>) -> Result<Matrix3x3> {
    let mut m = [[0f32; 3]; 3];
    for row in &mut m {
        for value in row.iter_mut() {
            *value = cursor.read_f32::<LittleEndian>()?;
        }
    }
    Ok(Matrix3x3(m))
}

/// Quaternions are stored w-first on disk.
pub fn read_quat_wxyz(cursor: &mut Cursor<&[u8]>) -> Result<Quaternion> {
    let w = cursor.read_f32::<LittleEndian>()?;
    let x = cursor.read_f32::<LittleEndian>()?;
    let y = cursor.read_f32::<LittleEndian>()?;
    let z = cursor.read_f32::<LittleEndian>()?;
    Ok(Quaternion::from_xyzw(x, y, z, w))
}

pub fn check_key_count(cursor: &Cursor<&[u8]>, count: u32) -> Result<()> {
    if count > MAX_KEY_COUNT {
        return Err(NifError::corrupt(
            cursor.position(),
            format!("too many keys: {count}"),
        ));
    }
    Ok(())
}

pub fn read_key_float(cursor: &mut Cursor<&[u8]>, key_type: KeyType) -> Result<KeyFloat> {
    let time = cursor.read_f32::<LittleEndian>()?;
    let value = cursor.read_f32::<LittleEndian>()?;
    let mut key = KeyFloat {
        time,
        value,
        ..Default::default()
    };
    match key_type {
        KeyType::Linear | KeyType::Const => {}
        KeyType::Quadratic => {
            key.forward_tangent = Some(cursor.read_f32::<LittleEndian>()?);
            key.backward_tangent = Some(cursor.read_f32::<LittleEndian>()?);
        }
        KeyType::TBC => {
            key.tension = Some(cursor.read_f32::<LittleEndian>()?);
            key.bias = Some(cursor.read_f32::<LittleEndian>()?);
            key.continuity = Some(cursor.read_f32::<LittleEndian>()?);
        }
        other => {
            return Err(NifError::corrupt(
                cursor.position(),
                format!("unsupported key type {other:?} for float key"),
            ));
        }
    }
    Ok(key)
}

pub fn read_key_vec3(cursor: &mut Cursor<&[u8]>, key_type: KeyType) -> Result<KeyVec3> {
    let time = cursor.read_f32::<LittleEndian>()?;
    let value = read_vector3(cursor)?;
    let mut key = KeyVec3 {
        time,
        value,
        ..Default::default()
    };
    match key_type {
        KeyType::Linear | KeyType::Const => {}
        KeyType::Quadratic => {
            key.forward_tangent = Some(read_vector3(cursor)?);
            key.backward_tangent = Some(read_vector3(cursor)?);
        }
        KeyType::TBC => {
            key.tension = Some(cursor.read_f32::<LittleEndian>()?);
            key.bias = Some(cursor.read_f32::<LittleEndian>()?);
            key.continuity = Some(cursor.read_f32::<LittleEndian>()?);
        }
        other => {
            return Err(NifError::corrupt(
                cursor.position(),
                format!("unsupported key type {other:?} for vec3 key"),
            ));
        }
    }
    Ok(key)
}

pub fn read_key_quat(cursor: &mut Cursor<&[u8]>, key_type: KeyType) -> Result<KeyQuaternion> {
    let time = cursor.read_f32::<LittleEndian>()?;
    let value = read_quat_wxyz(cursor)?;
    let mut key = KeyQuaternion {
        time,
        value,
        ..Default::default()
    };
    match key_type {
        KeyType::Linear | KeyType::Const => {}
        KeyType::Quadratic => {
            key.forward_tangent = Some(read_quat_wxyz(cursor)?);
            key.backward_tangent = Some(read_quat_wxyz(cursor)?);
        }
        KeyType::TBC => {
            key.tension = Some(cursor.read_f32::<LittleEndian>()?);
            key.bias = Some(cursor.read_f32::<LittleEndian>()?);
            key.continuity = Some(cursor.read_f32::<LittleEndian>()?);
        }
        other => {
            return Err(NifError::corrupt(
                cursor.position(),
                format!("unsupported key type {other:?} for quaternion key"),
            ));
        }
    }
    Ok(key)
}
