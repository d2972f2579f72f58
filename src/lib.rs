//! Read and write [ASPRS LAS](https://www.asprs.org/committee-general/laser-las-file-format-exchange-activities.html)
//! point cloud data, versions 1.2 and 1.3, point formats 0 through 3.
//!
//! A whole file is decoded from one in-memory buffer, and a whole file is encoded into one
//! freshly sized buffer. Reading and writing are two distinct types.
//!
//! # Reading
//!
//! Open a file with `ReadHandle::open`, or decode bytes you already have:
//!
//! ```
//! use lasfile::{ReadHandle, WriteBuilder};
//! # let bytes = WriteBuilder::new().into_bytes().unwrap();
//! let las = ReadHandle::from_bytes(&bytes).unwrap();
//! println!("{} points", las.len());
//! for record in las.records() {
//!     let point = record.point_data();
//!     println!("({}, {}, {})", point.x, point.y, point.z);
//! }
//! ```
//!
//! # Writing
//!
//! Configure a `Header`, append point records, then encode:
//!
//! ```
//! use lasfile::{Header, PointData, PointRecord, ReadHandle, WriteBuilder};
//! use lasfile::point::Format;
//!
//! let mut header = Header::default();
//! header.point_format = Format::Format1;
//!
//! let mut builder = WriteBuilder::new();
//! builder.add_header(header).unwrap();
//! let point = PointData { x: 1., y: 2., z: 3., ..Default::default() };
//! builder.add_point_record(PointRecord::Format1 { point, gps_time: 42. }).unwrap();
//! let bytes = builder.into_bytes().unwrap();
//!
//! let las = ReadHandle::from_bytes(&bytes).unwrap();
//! assert_eq!(Some(42.), las.gps_time(0));
//! ```
//!
//! # Choosing the mode at runtime
//!
//! `LasFile` wraps both types behind a mode string (`"r"`, `"rh"` or `"w"`). Mutations on a
//! read-mode file fail with `Error::ReadOnlyViolation`.

#![deny(missing_docs, missing_debug_implementations, unsafe_code, unstable_features)]
#![warn(trivial_casts, unused_import_braces)]

pub mod field;
pub mod file;
pub mod geotiff;
pub mod header;
pub mod point;
pub mod vlr;

mod bounds;
mod color;
mod error;
mod transform;
mod vector;
mod version;

pub use crate::bounds::Bounds;
pub use crate::color::Color;
pub use crate::error::Error;
pub use crate::file::{FileMode, LasFile, ReadHandle, ReadOptions, WriteBuilder};
pub use crate::header::{Header, ProjectId};
pub use crate::point::{PointData, PointRecord};
pub use crate::transform::{RoundingMode, Transform};
pub use crate::vector::Vector;
pub use crate::version::Version;
pub use crate::vlr::Vlr;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
