//! Core data structures representing parsed NIF/KF file blocks.

pub mod animation;
pub mod base;
pub mod blocks;
pub mod extra_data;
pub mod scene;

pub use animation::{
    CYCLE_CLAMP, CYCLE_LOOP, CYCLE_REVERSE, ControlledBlock, KeyFloat, KeyQuaternion, KeyType,
    KeyVec3, NiControllerSequence, NiTransformData, NiTransformInterpolator, Quaternion,
};
pub use base::{
    BoundingBox, BoundingSphere, BoundingVolume, Matrix3x3, NiTransform, NifHeader, RecordLink,
    SUPPORTED_VERSION, VERSION_STRING_4_0_0_2,
};
pub use blocks::{Block, Container};
pub use extra_data::{
    BsInvMarker, BsxFlags, BsxFlagsData, ExtraFields, NiStringExtraData, NiTextKeyExtraData,
    TextKey,
};
pub use scene::{NiAVObject, NiNode, NiObjectNET};
