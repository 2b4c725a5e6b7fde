use super::base::{BoundingVolume, NiTransform, RecordLink};
use glam::Vec3;
use std::ops::Deref;

// --- Structs using Pure Composition ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NiObjectNET {
    pub name: String,
    pub extra_data_link: RecordLink,
    pub controller_link: RecordLink,
}

impl NiObjectNET {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NiAVObject {
    pub net_base: NiObjectNET,
    pub flags: u16,
    pub transform: NiTransform,
    pub velocity: Vec3,
    pub properties: Vec<RecordLink>,
    pub bounding_volume: Option<BoundingVolume>,
}

/// A scene-graph node. Both `NiNode` and `BSFadeNode` block kinds carry this
/// payload; the container's block tag keeps them apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NiNode {
    pub av_base: NiAVObject,
    pub children: Vec<RecordLink>,
    pub effects: Vec<RecordLink>,
}

impl NiNode {
    pub fn children(&self) -> &[RecordLink] {
        &self.children
    }
}

// --- Deref Implementations for Automatic Method/Field Forwarding ---

impl Deref for NiAVObject {
    type Target = NiObjectNET;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.net_base
    }
}

impl Deref for NiNode {
    type Target = NiAVObject;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.av_base
    }
}
