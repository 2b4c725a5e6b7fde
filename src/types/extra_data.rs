use super::base::RecordLink;
use bitflags::bitflags;
use serde::{Serialize, Serializer};
use std::ops::Deref;

/// Base fields shared by every extra-data record in this version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraFields {
    /// Link to the next record in the chain hung off the owner node.
    pub next_extra_data_link: RecordLink,
    /// Shown as "Bytes Remaining" in NifSkope; carried verbatim.
    pub record_size: u32,
    /// Record name, e.g. "Prn" or "UPB" for string records, "BSX" for flags.
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NiStringExtraData {
    pub extra_base: ExtraFields,
    pub string_data: String,
}

impl Deref for NiStringExtraData {
    type Target = ExtraFields;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.extra_base
    }
}

/// Integer bitfield record ("BSXFlags" on disk). The raw value is kept for
/// round-tripping; [`BsxFlags`] gives the decoded view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BsxFlagsData {
    pub extra_base: ExtraFields,
    pub integer_data: u32,
}

impl BsxFlagsData {
    pub fn flags(&self) -> BsxFlags {
        BsxFlags::from_bits_retain(self.integer_data)
    }
}

impl Deref for BsxFlagsData {
    type Target = ExtraFields;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.extra_base
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct BsxFlags: u32 {
        const ANIMATED = 1;
        const HAVOK = 1 << 1;
        const RAGDOLL = 1 << 2;
        const COMPLEX = 1 << 3;
        const ADDON = 1 << 4;
        const EDITOR_MARKER = 1 << 5;
        const DYNAMIC = 1 << 6;
        const ARTICULATED = 1 << 7;
        const NEEDS_TRANSFORM_UPDATES = 1 << 8;
        const EXTERNAL_EMIT = 1 << 9;
    }
}

// Sinks see the same u32 the file carries, unknown bits included.
impl Serialize for BsxFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

/// Inventory display marker ("BSInvMarker" on disk): a per-item camera
/// orientation plus zoom for inventory previews.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BsInvMarker {
    pub extra_base: ExtraFields,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub zoom: f32,
}

impl Deref for BsInvMarker {
    type Target = ExtraFields;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.extra_base
    }
}

/// A single text keyframe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextKey {
    pub time: f32,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NiTextKeyExtraData {
    pub extra_base: ExtraFields,
    pub text_keys: Vec<TextKey>,
}

impl Deref for NiTextKeyExtraData {
    type Target = ExtraFields;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.extra_base
    }
}
