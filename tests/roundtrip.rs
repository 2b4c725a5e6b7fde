use anyhow::Result;
use byteorder::{LittleEndian, WriteBytesExt};
use glam::Vec3;
use nifkit::error::NifError;
use nifkit::types::*;
use nifkit::{parse_nif, write_nif};
use std::io::Write;

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn sample_container() -> Container {
    let mut root = NiNode::default();
    root.av_base.net_base.name = "Scene Racine\u{e9}".to_string(); // exercises windows-1252
    root.av_base.net_base.extra_data_link = Some(1);
    root.av_base.flags = 0x000E;
    root.av_base.transform.scale = 1.0;
    root.av_base.bounding_volume = Some(BoundingVolume::Sphere(BoundingSphere {
        center: Vec3::new(0.5, -1.0, 2.0),
        radius: 12.5,
    }));
    root.children = vec![Some(4), None];

    let prn = NiStringExtraData {
        extra_base: ExtraFields {
            next_extra_data_link: Some(2),
            record_size: 16,
            name: "Prn".to_string(),
        },
        string_data: "SideWeapon".to_string(),
    };
    let bsx = BsxFlagsData {
        extra_base: ExtraFields {
            next_extra_data_link: Some(3),
            record_size: 4,
            name: "BSX".to_string(),
        },
        integer_data: 0b101,
    };
    let marker = BsInvMarker {
        extra_base: ExtraFields {
            next_extra_data_link: None,
            record_size: 20,
            name: "INV".to_string(),
        },
        rotation_x: 0.1,
        rotation_y: 0.2,
        rotation_z: 0.3,
        zoom: 1.25,
    };

    let mut child = NiNode::default();
    child.av_base.net_base.name = "Bip01".to_string();
    child.av_base.transform.translation = Vec3::new(1.0, 2.0, 3.0);
    child.av_base.transform.scale = 1.0;

    let data = NiTransformData {
        rotation_type: KeyType::TBC,
        quaternion_keys: vec![KeyQuaternion {
            time: 0.5,
            value: Quaternion::from_xyzw(0.0, 0.0, 0.0, 1.0),
            tension: Some(0.1),
            bias: Some(0.2),
            continuity: Some(0.3),
            ..Default::default()
        }],
        translation_interp: Some(KeyType::Quadratic),
        translations: vec![KeyVec3 {
            time: 0.5,
            value: Vec3::new(4.0, 5.0, 6.0),
            forward_tangent: Some(Vec3::X),
            backward_tangent: Some(Vec3::Y),
            ..Default::default()
        }],
        scale_interp: None,
        scales: vec![],
    };
    let interp = NiTransformInterpolator {
        translation: Vec3::new(7.0, 8.0, 9.0),
        rotation: Quaternion::from_xyzw(0.0, 0.0, 0.0, 1.0),
        scale: 1.0,
        data: Some(5),
    };
    let text_keys = NiTextKeyExtraData {
        extra_base: ExtraFields {
            next_extra_data_link: None,
            record_size: 0,
            name: String::new(),
        },
        text_keys: vec![
            TextKey {
                time: 0.0,
                value: "start".to_string(),
            },
            TextKey {
                time: 1.0,
                value: "end".to_string(),
            },
        ],
    };
    let sequence = NiControllerSequence {
        name: "Idle".to_string(),
        controlled_blocks: vec![ControlledBlock {
            node_name: "Bip01".to_string(),
            interpolator: Some(6),
        }],
        start_time: 0.0,
        stop_time: 1.0,
        frequency: 1.0,
        cycle_type: CYCLE_CLAMP,
        text_keys: Some(7),
    };

    Container {
        header: NifHeader::default(),
        blocks: vec![
            Block::FadeNode(root),
            Block::StringExtraData(prn),
            Block::BsxFlags(bsx),
            Block::InvMarker(marker),
            Block::Node(child),
            Block::TransformData(data),
            Block::TransformInterpolator(interp),
            Block::TextKeyExtraData(text_keys),
            Block::ControllerSequence(sequence),
        ],
        roots: vec![Some(0), Some(8)],
    }
}

#[test]
fn round_trip_is_byte_exact() -> Result<()> {
    init_logging();
    let bytes = write_nif(&sample_container())?;
    let parsed = parse_nif(&bytes)?;
    let rewritten = write_nif(&parsed)?;
    assert_eq!(bytes, rewritten);
    Ok(())
}

#[test]
fn banner_with_high_byte_round_trips() -> Result<()> {
    init_logging();
    // Exporters append non-ASCII windows-1252 bytes to the banner line; the
    // codec must give them back verbatim.
    let mut bytes = Vec::new();
    bytes.write_all(VERSION_STRING_4_0_0_2.as_bytes())?;
    bytes.push(0xE9);
    bytes.write_u8(b'\n')?;
    bytes.write_u32::<LittleEndian>(SUPPORTED_VERSION)?;
    bytes.write_u32::<LittleEndian>(0)?; // blocks
    bytes.write_u32::<LittleEndian>(0)?; // roots
    let parsed = parse_nif(&bytes)?;
    let rewritten = write_nif(&parsed)?;
    assert_eq!(bytes, rewritten);
    Ok(())
}

#[test]
fn parsed_graph_preserves_structure() {
    let bytes = write_nif(&sample_container()).unwrap();
    let parsed = parse_nif(&bytes).unwrap();
    assert_eq!(parsed.blocks.len(), 9);
    assert_eq!(parsed.roots.len(), 2);
    let root = parsed.root_block().unwrap();
    assert_eq!(root.type_name(), "BSFadeNode");
    let child = parsed.node_by_name("Bip01").unwrap();
    assert_eq!(child.av_base.transform.translation, Vec3::new(1.0, 2.0, 3.0));
    let seq = parsed
        .blocks
        .iter()
        .find_map(Block::as_sequence)
        .unwrap();
    assert_eq!(seq.controlled_blocks[0].node_name, "Bip01");
}

fn valid_single_node_bytes() -> Vec<u8> {
    let mut node = NiNode::default();
    node.av_base.net_base.name = "only".to_string();
    node.av_base.transform.scale = 1.0;
    let container = Container {
        blocks: vec![Block::Node(node)],
        roots: vec![Some(0)],
        ..Default::default()
    };
    write_nif(&container).unwrap()
}

#[test]
fn dangling_root_link_is_corruption() {
    let mut bytes = valid_single_node_bytes();
    // The footer root link occupies the final four bytes.
    let len = bytes.len();
    bytes[len - 4..].copy_from_slice(&5i32.to_le_bytes());
    let err = parse_nif(&bytes).unwrap_err();
    assert!(matches!(err, NifError::Corrupt { .. }), "got {err:?}");
}

#[test]
fn dangling_block_link_refuses_to_serialize() {
    let mut node = NiNode::default();
    node.children = vec![Some(42)];
    let container = Container {
        blocks: vec![Block::Node(node)],
        roots: vec![Some(0)],
        ..Default::default()
    };
    let err = write_nif(&container).unwrap_err();
    assert!(matches!(err, NifError::Corrupt { block: Some(0), .. }));
}

#[test]
fn truncated_stream_is_corruption_with_block_index() {
    let bytes = valid_single_node_bytes();
    let err = parse_nif(&bytes[..bytes.len() / 2]).unwrap_err();
    match err {
        NifError::Corrupt { block, .. } => assert_eq!(block, Some(0)),
        other => panic!("expected corruption, got {other:?}"),
    }
}

#[test]
fn bad_magic_is_corruption() {
    let err = parse_nif(b"Definitely not a nif\n\0\0\0\0").unwrap_err();
    assert!(matches!(err, NifError::Corrupt { .. }));
}

#[test]
fn unknown_version_is_its_own_error() {
    let mut bytes = Vec::new();
    bytes.write_all(VERSION_STRING_4_0_0_2.as_bytes()).unwrap();
    bytes.write_u8(b'\n').unwrap();
    bytes.write_u32::<LittleEndian>(0x14000005).unwrap();
    bytes.write_u32::<LittleEndian>(0).unwrap();
    let err = parse_nif(&bytes).unwrap_err();
    assert!(matches!(err, NifError::UnsupportedVersion(0x14000005)));
}

#[test]
fn unknown_block_type_is_its_own_error() {
    let mut bytes = Vec::new();
    bytes.write_all(VERSION_STRING_4_0_0_2.as_bytes()).unwrap();
    bytes.write_u8(b'\n').unwrap();
    bytes.write_u32::<LittleEndian>(SUPPORTED_VERSION).unwrap();
    bytes.write_u32::<LittleEndian>(1).unwrap();
    let name = b"NiCamera";
    bytes.write_u32::<LittleEndian>(name.len() as u32).unwrap();
    bytes.write_all(name).unwrap();
    let err = parse_nif(&bytes).unwrap_err();
    match err {
        NifError::UnsupportedBlockType(name) => assert_eq!(name, "NiCamera"),
        other => panic!("expected unsupported block type, got {other:?}"),
    }
}
