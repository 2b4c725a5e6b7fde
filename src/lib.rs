//! Codec for Netimmerse/Gamebryo `.nif`/`.kf` block graphs.
//!
//! The container format is a versioned, typed block graph: a header, an
//! ordered block arena with index-based cross references, and a footer
//! listing the roots. On top of the codec this crate provides the extra-data
//! interpretation a scene builder needs on import, and the kf export path:
//! assembling a controller sequence from animation tracks, retargeting its
//! interpolators onto an external skeleton file, and writing the result.
//!
//! Every operation takes its [`Container`] explicitly; there is no
//! process-wide "current file" state.

pub mod error;
pub mod extra;
pub mod kf;
pub mod parser;
pub mod retarget;
pub mod types;
pub mod writer;

pub use error::{ExportError, NifError, RetargetError};
pub use extra::{AttachmentPoint, InventoryMarker, RootAttributes, RootKind, interpret_root};
pub use kf::{BoneTrack, ExportOptions, apply_scale, build_controller_sequence, write_kf};
pub use parser::parse_nif;
pub use retarget::{apply_skeleton, default_skeleton_path};
pub use types::*;
pub use writer::write_nif;
