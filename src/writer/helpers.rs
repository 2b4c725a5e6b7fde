use crate::error::Result;
use crate::types::{KeyFloat, KeyQuaternion, KeyType, KeyVec3, Matrix3x3, Quaternion, RecordLink};
use byteorder::{LittleEndian, WriteBytesExt};
use encoding_rs::WINDOWS_1252;
use glam::Vec3;
use std::io::Write;

/// Writes a u32-length-prefixed windows-1252 string.
pub fn write_string(out: &mut Vec<u8>, value: &str) -> Result<()> {
    let (encoded, _, _) = WINDOWS_1252.encode(value);
    out.write_u32::<LittleEndian>(encoded.len() as u32)?;
    out.write_all(&encoded)?;
    Ok(())
}

pub fn write_link(out: &mut Vec<u8>, link: RecordLink) -> Result<()> {
    match link {
        Some(index) => out.write_i32::<LittleEndian>(index as i32)?,
        None => out.write_i32::<LittleEndian>(-1)?,
    }
    Ok(())
}

pub fn write_link_list(out: &mut Vec<u8>, links: &[RecordLink]) -> Result<()> {
    out.write_u32::<LittleEndian>(links.len() as u32)?;
    for link in links {
        write_link(out, *link)?;
    }
    Ok(())
}

pub fn write_vector3(out: &mut Vec<u8>, v: Vec3) -> Result<()> {
    out.write_f32::<LittleEndian>(v.x)?;
    out.write_f32::<LittleEndian>(v.y)?;
    out.write_f32::<LittleEndian>(v.z)?;
    Ok(())
}

pub fn write_matrix3x3(out: &mut Vec<u8>, m: &Matrix3x3) -> Result<()> {
    for row in &m.0 {
        for value in row {
            out.write_f32::<LittleEndian>(*value)?;
        }
    }
    Ok(())
}

pub fn write_quat_wxyz(out: &mut Vec<u8>, q: Quaternion) -> Result<()> {
    out.write_f32::<LittleEndian>(q.w)?;
    out.write_f32::<LittleEndian>(q.x)?;
    out.write_f32::<LittleEndian>(q.y)?;
    out.write_f32::<LittleEndian>(q.z)?;
    Ok(())
}

pub fn write_key_float(out: &mut Vec<u8>, key: &KeyFloat, key_type: KeyType) -> Result<()> {
    out.write_f32::<LittleEndian>(key.time)?;
    out.write_f32::<LittleEndian>(key.value)?;
    match key_type {
        KeyType::Quadratic => {
            out.write_f32::<LittleEndian>(key.forward_tangent.unwrap_or_default())?;
            out.write_f32::<LittleEndian>(key.backward_tangent.unwrap_or_default())?;
        }
        KeyType::TBC => {
            out.write_f32::<LittleEndian>(key.tension.unwrap_or_default())?;
            out.write_f32::<LittleEndian>(key.bias.unwrap_or_default())?;
            out.write_f32::<LittleEndian>(key.continuity.unwrap_or_default())?;
        }
        _ => {}
    }
    Ok(())
}

pub fn write_key_vec3(out: &mut Vec<u8>, key: &KeyVec3, key_type: KeyType) -> Result<()> {
    out.write_f32::<LittleEndian>(key.time)?;
    write_vector3(out, key.value)?;
    match key_type {
        KeyType::Quadratic => {
            write_vector3(out, key.forward_tangent.unwrap_or_default())?;
            write_vector3(out, key.backward_tangent.unwrap_or_default())?;
        }
        KeyType::TBC => {
            out.write_f32::<LittleEndian>(key.tension.unwrap_or_default())?;
            out.write_f32::<LittleEndian>(key.bias.unwrap_or_default())?;
            out.write_f32::<LittleEndian>(key.continuity.unwrap_or_default())?;
        }
        _ => {}
    }
    Ok(())
}

pub fn write_key_quat(out: &mut Vec<u8>, key: &KeyQuaternion, key_type: KeyType) -> Result<()> {
    out.write_f32::<LittleEndian>(key.time)?;
    write_quat_wxyz(out, key.value)?;
    match key_type {
        KeyType::Quadratic => {
            write_quat_wxyz(out, key.forward_tangent.unwrap_or(Quaternion::IDENTITY))?;
            write_quat_wxyz(out, key.backward_tangent.unwrap_or(Quaternion::IDENTITY))?;
        }
        KeyType::TBC => {
            out.write_f32::<LittleEndian>(key.tension.unwrap_or_default())?;
            out.write_f32::<LittleEndian>(key.bias.unwrap_or_default())?;
            out.write_f32::<LittleEndian>(key.continuity.unwrap_or_default())?;
        }
        _ => {}
    }
    Ok(())
}
