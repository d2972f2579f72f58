//! Point records and their bitfields.
//!
//! Every record starts with the same base fields, [PointData]. The four supported formats differ
//! only in what follows: nothing, a gps time, a color, or both. [PointRecord] is the sum over
//! those formats.

mod classification;
mod data;
mod format;
mod record;
mod return_info;

pub use self::classification::{ClassificationFlags, class_name};
pub use self::data::PointData;
pub use self::format::Format;
pub use self::record::{PointRecord, decode_extension};
pub use self::return_info::ReturnInfo;
