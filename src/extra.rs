//! Root-node extra-data interpretation. Pure: classifies the root block and
//! walks its extra-data chain once, producing [`RootAttributes`] for the
//! consuming scene builder to apply however it likes.

use crate::types::{Block, BsxFlags, Container, RecordLink};
use serde::Serialize;

/// Concrete kind of the root block. Unrecognized kinds fall back to `Node`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RootKind {
    #[default]
    Node,
    FadeNode,
}

/// Fixed attachment-point enumeration, keyed by the node names a "Prn"
/// string record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttachmentPoint {
    Back,
    Side,
    Quiver,
    Shield,
    Helm,
    Ring,
}

impl AttachmentPoint {
    const TABLE: [(AttachmentPoint, &'static str); 6] = [
        (AttachmentPoint::Back, "BackWeapon"),
        (AttachmentPoint::Side, "SideWeapon"),
        (AttachmentPoint::Quiver, "Quiver"),
        (AttachmentPoint::Shield, "Bip01 L ForearmTwist"),
        (AttachmentPoint::Helm, "Bip01 Head"),
        (AttachmentPoint::Ring, "Bip01 R Finger1"),
    ];

    pub fn node_name(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(point, _)| *point == self)
            .map(|(_, name)| *name)
            .expect("every attachment point is in the table")
    }

    /// Reverse lookup by node name, case-insensitive. Unknown names resolve
    /// to `None` rather than failing.
    pub fn from_node_name(name: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, node)| node.eq_ignore_ascii_case(name))
            .map(|(point, _)| *point)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryMarker {
    pub name: String,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub zoom: f32,
}

/// Root-level attributes decoded from a file's root node and its extra-data
/// chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RootAttributes {
    pub root_kind: RootKind,
    pub flags: u16,
    pub bsx_flags: Option<BsxFlags>,
    pub attachment_point: Option<AttachmentPoint>,
    pub behavior_string: Option<String>,
    pub inventory_markers: Vec<InventoryMarker>,
}

/// Interprets the container's root node. Side-effect free; returns defaults
/// when the file has no resolvable root node.
pub fn interpret_root(container: &Container) -> RootAttributes {
    let mut attrs = RootAttributes::default();
    let Some(root) = container.root_block() else {
        return attrs;
    };

    let node = match root {
        Block::FadeNode(node) => {
            attrs.root_kind = RootKind::FadeNode;
            node
        }
        Block::Node(node) => {
            attrs.root_kind = RootKind::Node;
            node
        }
        // Any other root kind defaults to a generic node with no chain.
        _ => return attrs,
    };
    attrs.flags = node.av_base.flags;

    // Walk the chain once; the step cap guards against link cycles.
    let mut link: RecordLink = node.av_base.net_base.extra_data_link;
    for _ in 0..container.blocks.len() {
        let Some(block) = container.block(link) else {
            break;
        };
        match block {
            Block::StringExtraData(data) => match data.extra_base.name.as_str() {
                // Attachment position; resolved against the fixed table.
                "Prn" => attrs.attachment_point = AttachmentPoint::from_node_name(&data.string_data),
                "UPB" => attrs.behavior_string = Some(data.string_data.clone()),
                _ => {}
            },
            Block::BsxFlags(data) => attrs.bsx_flags = Some(data.flags()),
            Block::InvMarker(data) => attrs.inventory_markers.push(InventoryMarker {
                name: data.extra_base.name.clone(),
                rotation_x: data.rotation_x,
                rotation_y: data.rotation_y,
                rotation_z: data.rotation_z,
                zoom: data.zoom,
            }),
            _ => {}
        }
        link = match block.extra_fields() {
            Some(extra) => extra.next_extra_data_link,
            None => break,
        };
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BsInvMarker, BsxFlagsData, ExtraFields, NiNode, NiStringExtraData,
        NiTransformInterpolator,
    };

    fn chained(name: &str, next: RecordLink) -> ExtraFields {
        ExtraFields {
            next_extra_data_link: next,
            record_size: 0,
            name: name.to_string(),
        }
    }

    fn root_with_chain(root: Block, rest: Vec<Block>) -> Container {
        let mut blocks = vec![root];
        blocks.extend(rest);
        Container {
            blocks,
            roots: vec![Some(0)],
            ..Default::default()
        }
    }

    #[test]
    fn full_chain_is_decoded() {
        let mut node = NiNode::default();
        node.av_base.flags = 14;
        node.av_base.net_base.extra_data_link = Some(1);
        let container = root_with_chain(
            Block::FadeNode(node),
            vec![
                Block::StringExtraData(NiStringExtraData {
                    extra_base: chained("Prn", Some(2)),
                    string_data: "SIDEWEAPON".to_string(),
                }),
                Block::StringExtraData(NiStringExtraData {
                    extra_base: chained("UPB", Some(3)),
                    string_data: "Mass = 0.0".to_string(),
                }),
                Block::BsxFlags(BsxFlagsData {
                    extra_base: chained("BSX", Some(4)),
                    integer_data: 0b11,
                }),
                Block::InvMarker(BsInvMarker {
                    extra_base: chained("INV", Some(5)),
                    zoom: 1.5,
                    ..Default::default()
                }),
                Block::InvMarker(BsInvMarker {
                    extra_base: chained("INV2", None),
                    zoom: 0.5,
                    ..Default::default()
                }),
            ],
        );

        let attrs = interpret_root(&container);
        assert_eq!(attrs.root_kind, RootKind::FadeNode);
        assert_eq!(attrs.flags, 14);
        assert_eq!(attrs.attachment_point, Some(AttachmentPoint::Side));
        assert_eq!(attrs.behavior_string.as_deref(), Some("Mass = 0.0"));
        assert_eq!(
            attrs.bsx_flags,
            Some(BsxFlags::ANIMATED | BsxFlags::HAVOK)
        );
        assert_eq!(attrs.inventory_markers.len(), 2);
        assert_eq!(attrs.inventory_markers[1].zoom, 0.5);
    }

    #[test]
    fn attachment_lookup_is_case_insensitive() {
        assert_eq!(
            AttachmentPoint::from_node_name("backweapon"),
            Some(AttachmentPoint::Back)
        );
        assert_eq!(
            AttachmentPoint::from_node_name("BIP01 head"),
            Some(AttachmentPoint::Helm)
        );
        assert_eq!(AttachmentPoint::from_node_name("NoSuchPoint"), None);
    }

    #[test]
    fn unmatched_prn_leaves_attachment_unset() {
        let mut node = NiNode::default();
        node.av_base.net_base.extra_data_link = Some(1);
        let container = root_with_chain(
            Block::Node(node),
            vec![Block::StringExtraData(NiStringExtraData {
                extra_base: chained("Prn", None),
                string_data: "SomewhereElse".to_string(),
            })],
        );
        let attrs = interpret_root(&container);
        assert_eq!(attrs.attachment_point, None);
    }

    #[test]
    fn prn_match_is_name_case_sensitive() {
        let mut node = NiNode::default();
        node.av_base.net_base.extra_data_link = Some(1);
        let container = root_with_chain(
            Block::Node(node),
            vec![Block::StringExtraData(NiStringExtraData {
                extra_base: chained("prn", None),
                string_data: "SideWeapon".to_string(),
            })],
        );
        // "prn" is not "Prn"; the record name match is exact.
        let attrs = interpret_root(&container);
        assert_eq!(attrs.attachment_point, None);
    }

    #[test]
    fn unknown_root_kind_defaults_to_generic() {
        let container = root_with_chain(
            Block::TransformInterpolator(NiTransformInterpolator::default()),
            vec![],
        );
        let attrs = interpret_root(&container);
        assert_eq!(attrs.root_kind, RootKind::Node);
        assert!(attrs.inventory_markers.is_empty());
    }

    #[test]
    fn attributes_serialize_for_sinks() {
        let attrs = RootAttributes {
            bsx_flags: Some(BsxFlags::ANIMATED | BsxFlags::HAVOK),
            attachment_point: Some(AttachmentPoint::Shield),
            ..Default::default()
        };
        let json = serde_json::to_value(&attrs).unwrap();
        // The flags field carries the raw bitfield value.
        assert_eq!(json["bsx_flags"], 3);
        assert_eq!(json["attachment_point"], "Shield");
    }

    #[test]
    fn cyclic_extra_chain_terminates() {
        let mut node = NiNode::default();
        node.av_base.net_base.extra_data_link = Some(1);
        let container = root_with_chain(
            Block::Node(node),
            vec![
                Block::StringExtraData(NiStringExtraData {
                    extra_base: chained("UPB", Some(2)),
                    string_data: "a".to_string(),
                }),
                Block::StringExtraData(NiStringExtraData {
                    extra_base: chained("UPB", Some(1)),
                    string_data: "b".to_string(),
                }),
            ],
        );
        let attrs = interpret_root(&container);
        assert!(attrs.behavior_string.is_some());
    }
}
