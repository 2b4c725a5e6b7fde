use super::helpers::{
    write_key_float, write_key_quat, write_key_vec3, write_link, write_link_list, write_matrix3x3,
    write_quat_wxyz, write_string, write_vector3,
};
use crate::error::Result;
use crate::types::{
    BoundingVolume, BsInvMarker, BsxFlagsData, ExtraFields, NiControllerSequence, NiNode,
    NiStringExtraData, NiTextKeyExtraData, NiTransformData, NiTransformInterpolator,
};
use byteorder::{LittleEndian, WriteBytesExt};

pub fn write_ninode_fields(out: &mut Vec<u8>, node: &NiNode) -> Result<()> {
    let net = &node.av_base.net_base;
    write_string(out, &net.name)?;
    write_link(out, net.extra_data_link)?;
    write_link(out, net.controller_link)?;

    let av = &node.av_base;
    out.write_u16::<LittleEndian>(av.flags)?;
    write_vector3(out, av.transform.translation)?;
    write_matrix3x3(out, &av.transform.rotation)?;
    out.write_f32::<LittleEndian>(av.transform.scale)?;
    write_vector3(out, av.velocity)?;
    write_link_list(out, &av.properties)?;

    match &av.bounding_volume {
        None => out.write_u32::<LittleEndian>(0)?,
        Some(BoundingVolume::Sphere(sphere)) => {
            out.write_u32::<LittleEndian>(1)?;
            out.write_u32::<LittleEndian>(0)?;
            write_vector3(out, sphere.center)?;
            out.write_f32::<LittleEndian>(sphere.radius)?;
        }
        Some(BoundingVolume::Box(bbox)) => {
            out.write_u32::<LittleEndian>(1)?;
            out.write_u32::<LittleEndian>(1)?;
            write_vector3(out, bbox.center)?;
            write_matrix3x3(out, &bbox.axes)?;
            write_vector3(out, bbox.extent)?;
        }
    }

    write_link_list(out, &node.children)?;
    write_link_list(out, &node.effects)?;
    Ok(())
}

fn write_extra_fields(out: &mut Vec<u8>, extra: &ExtraFields) -> Result<()> {
    write_link(out, extra.next_extra_data_link)?;
    out.write_u32::<LittleEndian>(extra.record_size)?;
    write_string(out, &extra.name)?;
    Ok(())
}

pub fn write_nistringextradata_fields(out: &mut Vec<u8>, data: &NiStringExtraData) -> Result<()> {
    write_extra_fields(out, &data.extra_base)?;
    write_string(out, &data.string_data)?;
    Ok(())
}

pub fn write_bsxflags_fields(out: &mut Vec<u8>, data: &BsxFlagsData) -> Result<()> {
    write_extra_fields(out, &data.extra_base)?;
    out.write_u32::<LittleEndian>(data.integer_data)?;
    Ok(())
}

pub fn write_bsinvmarker_fields(out: &mut Vec<u8>, data: &BsInvMarker) -> Result<()> {
    write_extra_fields(out, &data.extra_base)?;
    out.write_f32::<LittleEndian>(data.rotation_x)?;
    out.write_f32::<LittleEndian>(data.rotation_y)?;
    out.write_f32::<LittleEndian>(data.rotation_z)?;
    out.write_f32::<LittleEndian>(data.zoom)?;
    Ok(())
}

pub fn write_nitextkeyextradata_fields(out: &mut Vec<u8>, data: &NiTextKeyExtraData) -> Result<()> {
    write_extra_fields(out, &data.extra_base)?;
    out.write_u32::<LittleEndian>(data.text_keys.len() as u32)?;
    for key in &data.text_keys {
        out.write_f32::<LittleEndian>(key.time)?;
        write_string(out, &key.value)?;
    }
    Ok(())
}

pub fn write_nitransforminterpolator_fields(
    out: &mut Vec<u8>,
    interp: &NiTransformInterpolator,
) -> Result<()> {
    write_vector3(out, interp.translation)?;
    write_quat_wxyz(out, interp.rotation)?;
    out.write_f32::<LittleEndian>(interp.scale)?;
    write_link(out, interp.data)?;
    Ok(())
}

pub fn write_nitransformdata_fields(out: &mut Vec<u8>, data: &NiTransformData) -> Result<()> {
    // The rotation type is written even for an empty group; translation and
    // scale types only follow a nonzero count. Mirrors the parser exactly.
    out.write_u32::<LittleEndian>(data.quaternion_keys.len() as u32)?;
    out.write_u32::<LittleEndian>(data.rotation_type.raw())?;
    for key in &data.quaternion_keys {
        write_key_quat(out, key, data.rotation_type)?;
    }

    out.write_u32::<LittleEndian>(data.translations.len() as u32)?;
    if !data.translations.is_empty() {
        let interp = data.translation_interp.unwrap_or_default();
        out.write_u32::<LittleEndian>(interp.raw())?;
        for key in &data.translations {
            write_key_vec3(out, key, interp)?;
        }
    }

    out.write_u32::<LittleEndian>(data.scales.len() as u32)?;
    if !data.scales.is_empty() {
        let interp = data.scale_interp.unwrap_or_default();
        out.write_u32::<LittleEndian>(interp.raw())?;
        for key in &data.scales {
            write_key_float(out, key, interp)?;
        }
    }
    Ok(())
}

pub fn write_nicontrollersequence_fields(
    out: &mut Vec<u8>,
    seq: &NiControllerSequence,
) -> Result<()> {
    write_string(out, &seq.name)?;
    out.write_u32::<LittleEndian>(seq.controlled_blocks.len() as u32)?;
    for cb in &seq.controlled_blocks {
        write_string(out, &cb.node_name)?;
        write_link(out, cb.interpolator)?;
    }
    out.write_f32::<LittleEndian>(seq.start_time)?;
    out.write_f32::<LittleEndian>(seq.stop_time)?;
    out.write_f32::<LittleEndian>(seq.frequency)?;
    out.write_u32::<LittleEndian>(seq.cycle_type)?;
    write_link(out, seq.text_keys)?;
    Ok(())
}
