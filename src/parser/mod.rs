//! Byte stream -> [`Container`]. One sequential pass: header, block loop
//! dispatched on the type-name table, footer, then a reference-integrity
//! check over the whole arena.

pub mod animation;
pub mod base_parsers;
pub mod extra_data;
pub mod helpers;

use crate::error::{NifError, Result};
use crate::types::{Block, Container, NifHeader, SUPPORTED_VERSION};
use animation::{
    parse_nicontrollersequence_fields, parse_nitransformdata_fields,
    parse_nitransforminterpolator_fields,
};
use base_parsers::parse_ninode_fields;
use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::WINDOWS_1252;
use extra_data::{
    parse_bsinvmarker_fields, parse_bsxflags_fields, parse_nistringextradata_fields,
    parse_nitextkeyextradata_fields,
};
use helpers::{read_link, read_string};
use std::io::{Cursor, Read};

const MAX_HEADER_LINE: usize = 100;

pub fn parse_nif(data: &[u8]) -> Result<Container> {
    let mut cursor = Cursor::new(data);

    // Header banner: ASCII line terminated by '\n', kept verbatim.
    let mut header_bytes = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        if cursor.read(&mut byte)? == 0 {
            return Err(NifError::corrupt(cursor.position(), "eof in header"));
        }
        if byte[0] == b'\n' {
            break;
        }
        header_bytes.push(byte[0]);
        if header_bytes.len() > MAX_HEADER_LINE {
            return Err(NifError::corrupt(cursor.position(), "header line too long"));
        }
    }
    // Decoded as windows-1252 like every other string in the stream, so the
    // writer's re-encode reproduces the original bytes.
    let (decoded, _, _) = WINDOWS_1252.decode(&header_bytes);
    let version_string = decoded.into_owned();
    if !version_string.starts_with("NetImmerse File Format")
        && !version_string.starts_with("Gamebryo File Format")
    {
        return Err(NifError::corrupt(cursor.position(), "not a nif file"));
    }

    let file_version = read_u32_or_corrupt(&mut cursor)?;
    if file_version != SUPPORTED_VERSION {
        return Err(NifError::UnsupportedVersion(file_version));
    }

    let num_blocks = read_u32_or_corrupt(&mut cursor)?;
    let header = NifHeader {
        version_string,
        file_version,
    };

    let mut blocks: Vec<Block> = Vec::with_capacity(num_blocks.min(4096) as usize);
    for i in 0..num_blocks as usize {
        let block = parse_block(&mut cursor).map_err(|e| e.at_block(cursor.position(), i))?;
        blocks.push(block);
    }

    // Footer: root link list.
    let num_roots = read_u32_or_corrupt(&mut cursor)?;
    let mut roots = Vec::with_capacity(num_roots.min(4096) as usize);
    for _ in 0..num_roots {
        let offset = cursor.position();
        roots.push(read_link(&mut cursor).map_err(|e| corrupt_on_truncation(e, offset))?);
    }

    let container = Container {
        header,
        blocks,
        roots,
    };
    validate_references(&container, cursor.position())?;
    Ok(container)
}

fn read_u32_or_corrupt(cursor: &mut Cursor<&[u8]>) -> Result<u32> {
    let offset = cursor.position();
    cursor
        .read_u32::<LittleEndian>()
        .map_err(|e| NifError::corrupt(offset, format!("truncated stream: {e}")))
}

fn corrupt_on_truncation(err: NifError, offset: u64) -> NifError {
    match err {
        NifError::Io(e) => NifError::corrupt(offset, format!("truncated stream: {e}")),
        other => other,
    }
}

fn parse_block(cursor: &mut Cursor<&[u8]>) -> Result<Block> {
    let type_name = read_string(cursor)?;
    match type_name.as_str() {
        "NiNode" => parse_ninode_fields(cursor).map(Block::Node),
        "BSFadeNode" => parse_ninode_fields(cursor).map(Block::FadeNode),
        "NiStringExtraData" => parse_nistringextradata_fields(cursor).map(Block::StringExtraData),
        "BSXFlags" => parse_bsxflags_fields(cursor).map(Block::BsxFlags),
        "BSInvMarker" => parse_bsinvmarker_fields(cursor).map(Block::InvMarker),
        "NiTextKeyExtraData" => parse_nitextkeyextradata_fields(cursor).map(Block::TextKeyExtraData),
        "NiControllerSequence" => {
            parse_nicontrollersequence_fields(cursor).map(Block::ControllerSequence)
        }
        "NiTransformInterpolator" => {
            parse_nitransforminterpolator_fields(cursor).map(Block::TransformInterpolator)
        }
        "NiTransformData" => parse_nitransformdata_fields(cursor).map(Block::TransformData),
        // Block payloads are not self-sizing in this version, so an unknown
        // type cannot be skipped over.
        unknown => Err(NifError::UnsupportedBlockType(unknown.to_string())),
    }
}

/// Every link in every block, and every footer root, must land inside the
/// block arena. A dangling reference is corruption, never a silent skip.
pub fn validate_references(container: &Container, offset: u64) -> Result<()> {
    let len = container.blocks.len();
    for (index, block) in container.blocks.iter().enumerate() {
        for link in block.links() {
            if let Some(target) = link {
                if target >= len {
                    return Err(NifError::Corrupt {
                        offset,
                        block: Some(index),
                        reason: format!("link {target} out of range (block count {len})"),
                    });
                }
            }
        }
    }
    for root in &container.roots {
        if let Some(target) = *root {
            if target >= len {
                return Err(NifError::Corrupt {
                    offset,
                    block: None,
                    reason: format!("root link {target} out of range (block count {len})"),
                });
            }
        }
    }
    Ok(())
}
