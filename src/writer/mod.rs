//! [`Container`] -> byte stream. Exact inverse of the parser: an unmodified
//! parsed container serializes back to the original bytes.

pub mod blocks;
pub mod helpers;

use crate::error::Result;
use crate::parser::validate_references;
use crate::types::{Block, Container};
use blocks::{
    write_bsinvmarker_fields, write_bsxflags_fields, write_nicontrollersequence_fields,
    write_ninode_fields, write_nistringextradata_fields, write_nitextkeyextradata_fields,
    write_nitransformdata_fields, write_nitransforminterpolator_fields,
};
use byteorder::{LittleEndian, WriteBytesExt};
use encoding_rs::WINDOWS_1252;
use helpers::{write_link, write_string};
use std::io::Write;

pub fn write_nif(container: &Container) -> Result<Vec<u8>> {
    validate_references(container, 0)?;

    let mut out = Vec::new();
    let (banner, _, _) = WINDOWS_1252.encode(&container.header.version_string);
    out.write_all(&banner)?;
    out.write_u8(b'\n')?;
    out.write_u32::<LittleEndian>(container.header.file_version)?;
    out.write_u32::<LittleEndian>(container.blocks.len() as u32)?;

    for block in &container.blocks {
        write_string(&mut out, block.type_name())?;
        write_block_fields(&mut out, block)?;
    }

    out.write_u32::<LittleEndian>(container.roots.len() as u32)?;
    for root in &container.roots {
        write_link(&mut out, *root)?;
    }
    Ok(out)
}

fn write_block_fields(out: &mut Vec<u8>, block: &Block) -> Result<()> {
    match block {
        Block::Node(node) | Block::FadeNode(node) => write_ninode_fields(out, node),
        Block::StringExtraData(data) => write_nistringextradata_fields(out, data),
        Block::BsxFlags(data) => write_bsxflags_fields(out, data),
        Block::InvMarker(data) => write_bsinvmarker_fields(out, data),
        Block::TextKeyExtraData(data) => write_nitextkeyextradata_fields(out, data),
        Block::ControllerSequence(seq) => write_nicontrollersequence_fields(out, seq),
        Block::TransformInterpolator(interp) => write_nitransforminterpolator_fields(out, interp),
        Block::TransformData(data) => write_nitransformdata_fields(out, data),
    }
}
