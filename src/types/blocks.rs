use super::animation::{NiControllerSequence, NiTransformData, NiTransformInterpolator};
use super::base::{NifHeader, RecordLink};
use super::extra_data::{BsInvMarker, BsxFlagsData, ExtraFields, NiStringExtraData, NiTextKeyExtraData};
use super::scene::NiNode;

/// One typed block in the file graph. The set is closed per stream version;
/// an unrecognized type name fails the parse (block payloads are not
/// self-sizing in this version, so skipping is impossible).
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Node(NiNode),
    FadeNode(NiNode),
    StringExtraData(NiStringExtraData),
    BsxFlags(BsxFlagsData),
    InvMarker(BsInvMarker),
    TextKeyExtraData(NiTextKeyExtraData),
    ControllerSequence(NiControllerSequence),
    TransformInterpolator(NiTransformInterpolator),
    TransformData(NiTransformData),
}

impl Block {
    /// On-disk type tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Node(_) => "NiNode",
            Block::FadeNode(_) => "BSFadeNode",
            Block::StringExtraData(_) => "NiStringExtraData",
            Block::BsxFlags(_) => "BSXFlags",
            Block::InvMarker(_) => "BSInvMarker",
            Block::TextKeyExtraData(_) => "NiTextKeyExtraData",
            Block::ControllerSequence(_) => "NiControllerSequence",
            Block::TransformInterpolator(_) => "NiTransformInterpolator",
            Block::TransformData(_) => "NiTransformData",
        }
    }

    /// Node payload, for either node kind.
    pub fn as_any_node(&self) -> Option<&NiNode> {
        match self {
            Block::Node(node) | Block::FadeNode(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&NiControllerSequence> {
        match self {
            Block::ControllerSequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_interpolator(&self) -> Option<&NiTransformInterpolator> {
        match self {
            Block::TransformInterpolator(interp) => Some(interp),
            _ => None,
        }
    }

    pub fn as_interpolator_mut(&mut self) -> Option<&mut NiTransformInterpolator> {
        match self {
            Block::TransformInterpolator(interp) => Some(interp),
            _ => None,
        }
    }

    /// Shared extra-data base fields, for any extra-data kind.
    pub fn extra_fields(&self) -> Option<&ExtraFields> {
        match self {
            Block::StringExtraData(data) => Some(&data.extra_base),
            Block::BsxFlags(data) => Some(&data.extra_base),
            Block::InvMarker(data) => Some(&data.extra_base),
            Block::TextKeyExtraData(data) => Some(&data.extra_base),
            _ => None,
        }
    }

    /// Every outgoing link, for reference-integrity checks.
    pub fn links(&self) -> Vec<RecordLink> {
        let mut links = Vec::new();
        match self {
            Block::Node(node) | Block::FadeNode(node) => {
                links.push(node.av_base.net_base.extra_data_link);
                links.push(node.av_base.net_base.controller_link);
                links.extend(node.av_base.properties.iter().copied());
                links.extend(node.children.iter().copied());
                links.extend(node.effects.iter().copied());
            }
            Block::StringExtraData(data) => links.push(data.extra_base.next_extra_data_link),
            Block::BsxFlags(data) => links.push(data.extra_base.next_extra_data_link),
            Block::InvMarker(data) => links.push(data.extra_base.next_extra_data_link),
            Block::TextKeyExtraData(data) => links.push(data.extra_base.next_extra_data_link),
            Block::ControllerSequence(seq) => {
                links.extend(seq.controlled_blocks.iter().map(|cb| cb.interpolator));
                links.push(seq.text_keys);
            }
            Block::TransformInterpolator(interp) => links.push(interp.data),
            Block::TransformData(_) => {}
        }
        links
    }
}

/// The full parsed representation of one file: header, block arena, and the
/// footer's root links. The container exclusively owns its blocks; all
/// cross-block references are indices into `blocks`, so cyclic or shared
/// children cannot leak or double-free.
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub header: NifHeader,
    pub blocks: Vec<Block>,
    pub roots: Vec<RecordLink>,
}

impl Container {
    pub fn block(&self, link: RecordLink) -> Option<&Block> {
        link.and_then(|index| self.blocks.get(index))
    }

    /// Plain scene nodes (`NiNode` only, not `BSFadeNode`) in parse order.
    pub fn nodes(&self) -> impl Iterator<Item = (usize, &NiNode)> {
        self.blocks.iter().enumerate().filter_map(|(index, block)| match block {
            Block::Node(node) => Some((index, node)),
            _ => None,
        })
    }

    /// First plain node with the given name, in parse order. Duplicate names
    /// are possible in principle; first occurrence wins.
    pub fn node_by_name(&self, name: &str) -> Option<&NiNode> {
        self.nodes().map(|(_, node)| node).find(|node| node.av_base.net_base.name == name)
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        match self.blocks.get(index)? {
            Block::Node(node) | Block::FadeNode(node) => Some(node.av_base.net_base.name.as_str()),
            Block::ControllerSequence(seq) => Some(seq.name.as_str()),
            block => block.extra_fields().map(|extra| extra.name.as_str()),
        }
    }

    /// Resolved child blocks of a node, skipping null links.
    pub fn children_of<'a>(&'a self, node: &'a NiNode) -> impl Iterator<Item = &'a Block> {
        node.children.iter().filter_map(|link| self.block(*link))
    }

    /// The first root that resolves to a block, if any.
    pub fn root_block(&self) -> Option<&Block> {
        self.roots.iter().find_map(|link| self.block(*link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scene::NiNode;

    fn named_node(name: &str) -> NiNode {
        let mut node = NiNode::default();
        node.av_base.net_base.name = name.to_string();
        node
    }

    #[test]
    fn node_by_name_takes_first_in_parse_order() {
        let mut first = named_node("Bip01");
        first.av_base.flags = 7;
        let second = named_node("Bip01");
        let container = Container {
            blocks: vec![Block::Node(first), Block::Node(second)],
            roots: vec![Some(0)],
            ..Default::default()
        };
        assert_eq!(container.node_by_name("Bip01").unwrap().av_base.flags, 7);
    }

    #[test]
    fn node_by_name_ignores_fade_nodes() {
        let container = Container {
            blocks: vec![Block::FadeNode(named_node("Scene Root"))],
            roots: vec![Some(0)],
            ..Default::default()
        };
        assert!(container.node_by_name("Scene Root").is_none());
    }
}
