use crate::{Transform, point::Format};
use std::path::PathBuf;
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The first four bytes of the file were not `LASF`.
    #[error("the file signature is not LASF: {0:?}")]
    InvalidSignature([u8; 4]),

    /// The path does not carry a `.las` extension.
    #[error("the file does not have a las extension: {0}")]
    WrongFileExtension(PathBuf),

    /// A mutation was attempted on a file opened for reading.
    #[error("the las file was opened for reading and cannot be modified")]
    ReadOnlyViolation,

    /// A point was looked up by index on a file opened for writing.
    #[error("points cannot be looked up by index on a las file opened for writing")]
    WriteOnlyLookup,

    /// The file mode string is not one of `r`, `rh`, or `w`.
    #[error("unsupported file mode: {0:?}")]
    UnsupportedFileMode(String),

    /// Wrapper around [std::io::Error].
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The buffer ends before a decoding stage has all of its bytes.
    #[error("the buffer is too short for the {what}: needed {needed} bytes, found {available}")]
    Truncated {
        /// The part of the file being decoded.
        what: &'static str,
        /// The number of bytes the stage needs.
        needed: usize,
        /// The number of bytes in the buffer.
        available: usize,
    },

    /// The point format code is not 0, 1, 2, or 3.
    #[error("unsupported point format: {0}")]
    UnsupportedPointFormat(u8),

    /// The point record length is too short for the point format.
    #[error("point format {format} needs {} bytes per record, but the header says {length}", .format.record_length())]
    PointRecordLength {
        /// The point format.
        format: Format,
        /// The point record length from the header.
        length: u16,
    },

    /// The variable length records run past the start of the point data.
    #[error("the vlrs end at byte {end}, after the point data starts at byte {offset_to_points}")]
    VlrOverrun {
        /// The end offset of the last vlr.
        end: usize,
        /// The offset to the point data from the header.
        offset_to_points: u32,
    },

    /// The vlr payload does not fit in a u16 length field.
    #[error("the vlr payload is too long: {0} bytes")]
    VlrTooLong(usize),

    /// The point record's format is not the header's point format.
    #[error("the header's point format is {expected}, but the record is format {found}")]
    PointFormatMismatch {
        /// The header's point format.
        expected: Format,
        /// The record's point format.
        found: Format,
    },

    /// The coordinate cannot be quantized into an `i32`.
    #[error("the transform {transform} cannot quantize {value} into an i32")]
    InverseTransform {
        /// The coordinate.
        value: f64,
        /// The transform.
        transform: Transform,
    },

    /// There are more points than the header's u32 point count can hold.
    #[error("too many points for a las 1.3 header: {0}")]
    TooManyPoints(usize),

    /// The header was replaced after points were appended.
    #[error("the header cannot be replaced after point records have been added")]
    HeaderAfterPoints,

    /// The builder was created without an output path.
    #[error("the builder has no output path, use into_bytes or write_to instead")]
    MissingPath,

    /// There is no point at this index.
    #[error("no point at index {0}")]
    NoSuchPoint(usize),
}
