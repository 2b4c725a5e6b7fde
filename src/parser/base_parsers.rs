use super::helpers::{
    read_link, read_link_list, read_matrix3x3, read_nif_string, read_vector3,
};
use crate::error::{NifError, Result};
use crate::types::{
    BoundingBox, BoundingSphere, BoundingVolume, NiAVObject, NiNode, NiObjectNET, NiTransform,
};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

pub fn parse_niobjectnet_fields(cursor: &mut Cursor<&[u8]>) -> Result<NiObjectNET> {
    let name_len = cursor.read_u32::<LittleEndian>()?;
    let name = read_nif_string(cursor, name_len)?;
    let extra_data_link = read_link(cursor)?;
    let controller_link = read_link(cursor)?;
    Ok(NiObjectNET {
        name,
        extra_data_link,
        controller_link,
    })
}

pub fn parse_niavobject_fields(
    cursor: &mut Cursor<&[u8]>,
    net_base: NiObjectNET,
) -> Result<NiAVObject> {
    let flags = cursor.read_u16::<LittleEndian>()?;
    let translation = read_vector3(cursor)?;
    let rotation = read_matrix3x3(cursor)?;
    let scale = cursor.read_f32::<LittleEndian>()?;
    let velocity = read_vector3(cursor)?;
    let properties = read_link_list(cursor)?;

    let has_bounding_volume = cursor.read_u32::<LittleEndian>()? != 0;
    let mut bounding_volume = None;
    if has_bounding_volume {
        let volume_type = cursor.read_u32::<LittleEndian>()?;
        bounding_volume = match volume_type {
            0 => {
                let center = read_vector3(cursor)?;
                let radius = cursor.read_f32::<LittleEndian>()?;
                Some(BoundingVolume::Sphere(BoundingSphere { center, radius }))
            }
            1 => {
                let center = read_vector3(cursor)?;
                let axes = read_matrix3x3(cursor)?;
                let extent = read_vector3(cursor)?;
                Some(BoundingVolume::Box(BoundingBox {
                    center,
                    axes,
                    extent,
                }))
            }
            other => {
                return Err(NifError::corrupt(
                    cursor.position(),
                    format!("unsupported bounding volume type {other}"),
                ));
            }
        };
    }

    Ok(NiAVObject {
        net_base,
        flags,
        transform: NiTransform {
            rotation,
            translation,
            scale,
        },
        velocity,
        properties,
        bounding_volume,
    })
}

/// Shared by `NiNode` and `BSFadeNode`; the caller picks the block tag.
pub fn parse_ninode_fields(cursor: &mut Cursor<&[u8]>) -> Result<NiNode> {
    let net_base = parse_niobjectnet_fields(cursor)?;
    let av_base = parse_niavobject_fields(cursor, net_base)?;
    let children = read_link_list(cursor)?;
    let effects = read_link_list(cursor)?;
    Ok(NiNode {
        av_base,
        children,
        effects,
    })
}
