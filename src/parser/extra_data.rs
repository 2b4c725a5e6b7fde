use super::helpers::{check_key_count, read_link, read_nif_string, read_string};
use crate::error::Result;
use crate::types::{
    BsInvMarker, BsxFlagsData, ExtraFields, NiStringExtraData, NiTextKeyExtraData, TextKey,
};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

pub fn parse_extra_fields(cursor: &mut Cursor<&[u8]>) -> Result<ExtraFields> {
    let next_extra_data_link = read_link(cursor)?;
    let record_size = cursor.read_u32::<LittleEndian>()?;
    let name = read_string(cursor)?;
    Ok(ExtraFields {
        next_extra_data_link,
        record_size,
        name,
    })
}

pub fn parse_nistringextradata_fields(cursor: &mut Cursor<&[u8]>) -> Result<NiStringExtraData> {
    let extra_base = parse_extra_fields(cursor)?;
    let string_data = read_string(cursor)?;
    Ok(NiStringExtraData {
        extra_base,
        string_data,
    })
}

pub fn parse_bsxflags_fields(cursor: &mut Cursor<&[u8]>) -> Result<BsxFlagsData> {
    let extra_base = parse_extra_fields(cursor)?;
    let integer_data = cursor.read_u32::<LittleEndian>()?;
    Ok(BsxFlagsData {
        extra_base,
        integer_data,
    })
}

pub fn parse_bsinvmarker_fields(cursor: &mut Cursor<&[u8]>) -> Result<BsInvMarker> {
    let extra_base = parse_extra_fields(cursor)?;
    let rotation_x = cursor.read_f32::<LittleEndian>()?;
    let rotation_y = cursor.read_f32::<LittleEndian>()?;
    let rotation_z = cursor.read_f32::<LittleEndian>()?;
    let zoom = cursor.read_f32::<LittleEndian>()?;
    Ok(BsInvMarker {
        extra_base,
        rotation_x,
        rotation_y,
        rotation_z,
        zoom,
    })
}

pub fn parse_nitextkeyextradata_fields(cursor: &mut Cursor<&[u8]>) -> Result<NiTextKeyExtraData> {
    let extra_base = parse_extra_fields(cursor)?;
    let num_text_keys = cursor.read_u32::<LittleEndian>()?;
    check_key_count(cursor, num_text_keys)?;
    let mut text_keys = Vec::with_capacity(num_text_keys as usize);
    for _ in 0..num_text_keys {
        let time = cursor.read_f32::<LittleEndian>()?;
        let text_len = cursor.read_u32::<LittleEndian>()?;
        let value = read_nif_string(cursor, text_len)?;
        text_keys.push(TextKey { time, value });
    }
    Ok(NiTextKeyExtraData {
        extra_base,
        text_keys,
    })
}
