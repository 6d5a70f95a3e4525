//! SPC main header decoding and encoding.
//!
//! This module handles the fixed-size block at the start of every file:
//! - Flag byte ([`TypeFlags`])
//! - Experiment type code ([`ExperimentType`])
//! - First/last X with width disambiguation ([`XRange`])
//! - The header record itself ([`Header`])

pub mod experiment;
pub mod flags;
pub mod range;
pub mod record;

pub use experiment::ExperimentType;
pub use flags::TypeFlags;
pub use range::{
    FieldWidth, PLAUSIBLE_LIMIT, WIDTH_SWITCH_LIMIT, XRange, decode_x_range,
    encode_x_range_single,
};
pub use record::{HEADER_LEN, Header, decode_header};
