use super::base::RecordLink;
use glam::Vec3;

pub type Quaternion = glam::Quat;

/// Interpolation type for a key group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyType {
    #[default]
    Linear,
    Quadratic, // Bezier interpolation
    TBC,       // Tension Bias Continuity interpolation
    XyzRotation,
    Const, // Step function - value is constant between keys
    Unknown(u32),
}

impl From<u32> for KeyType {
    fn from(value: u32) -> Self {
        match value {
            1 => KeyType::Linear,
            2 => KeyType::Quadratic,
            3 => KeyType::TBC,
            4 => KeyType::XyzRotation,
            5 => KeyType::Const,
            _ => KeyType::Unknown(value),
        }
    }
}

impl KeyType {
    pub fn raw(self) -> u32 {
        match self {
            KeyType::Linear => 1,
            KeyType::Quadratic => 2,
            KeyType::TBC => 3,
            KeyType::XyzRotation => 4,
            KeyType::Const => 5,
            KeyType::Unknown(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyFloat {
    pub time: f32,
    pub value: f32,
    pub forward_tangent: Option<f32>,  // For Quadratic keys
    pub backward_tangent: Option<f32>, // For Quadratic keys
    pub tension: Option<f32>,          // For TBC keys
    pub bias: Option<f32>,             // For TBC keys
    pub continuity: Option<f32>,       // For TBC keys
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyVec3 {
    pub time: f32,
    pub value: Vec3,
    pub forward_tangent: Option<Vec3>,
    pub backward_tangent: Option<Vec3>,
    pub tension: Option<f32>,
    pub bias: Option<f32>,
    pub continuity: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyQuaternion {
    pub time: f32,
    pub value: Quaternion,
    pub forward_tangent: Option<Quaternion>,
    pub backward_tangent: Option<Quaternion>,
    pub tension: Option<f32>,
    pub bias: Option<f32>,
    pub continuity: Option<f32>,
}

/// Keyframe block referenced by a transform interpolator ("NiTransformData"
/// on disk). Key-group layout: the rotation type is present even when the
/// rotation key count is zero; translation and scale types only follow a
/// nonzero count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NiTransformData {
    pub rotation_type: KeyType,
    pub quaternion_keys: Vec<KeyQuaternion>,
    pub translation_interp: Option<KeyType>,
    pub translations: Vec<KeyVec3>,
    pub scale_interp: Option<KeyType>,
    pub scales: Vec<KeyFloat>,
}

/// Per-bone rest transform sample plus a link to its keyframe data.
#[derive(Debug, Clone, PartialEq)]
pub struct NiTransformInterpolator {
    pub translation: Vec3,
    pub rotation: Quaternion,
    pub scale: f32,
    pub data: RecordLink,
}

impl Default for NiTransformInterpolator {
    fn default() -> Self {
        NiTransformInterpolator {
            translation: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: 1.0,
            data: None,
        }
    }
}

/// Pairs an animated node's name with its interpolator within a sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlledBlock {
    pub node_name: String,
    pub interpolator: RecordLink,
}

pub const CYCLE_LOOP: u32 = 0;
pub const CYCLE_REVERSE: u32 = 1;
pub const CYCLE_CLAMP: u32 = 2;

/// Root block of a kf animation ("NiControllerSequence" on disk).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NiControllerSequence {
    pub name: String,
    pub controlled_blocks: Vec<ControlledBlock>,
    pub start_time: f32,
    pub stop_time: f32,
    pub frequency: f32,
    pub cycle_type: u32,
    pub text_keys: RecordLink,
}
