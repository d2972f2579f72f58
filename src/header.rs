//! The las public header block.
//!
//! The header is decoded from the start of a buffer and encoded into the start of one. Fields at
//! offsets 0 through 110 are the same for every version. After them comes the per-return point
//! count array, whose length depends on the version, and then the scales, offsets, and bounds.
//! Version 1.3 adds a trailing offset to the waveform data.
//!
//! ```
//! use lasfile::Header;
//! let mut header = Header::default();
//! let mut buf = vec![0; 235];
//! assert_eq!(235, header.encode(&mut buf, 0));
//! let decoded = Header::decode(&buf).unwrap();
//! assert_eq!(header, decoded);
//! ```

use crate::{
    Bounds, Error, Result, Transform, Vector, Version, field,
    point::Format,
};
use chrono::{Datelike, NaiveDate, Utc};
use log::debug;
use std::fmt;
use uuid::Uuid;

/// The file signature, `LASF`.
pub const SIGNATURE: [u8; 4] = *b"LASF";

/// The size of every header this crate writes.
pub const HEADER_SIZE: u16 = 235;

const SYSTEM_IDENTIFIER_LEN: usize = 32;
const GENERATING_SOFTWARE_LEN: usize = 32;
const RETURN_COUNTS_OFFSET: usize = 111;
const WRITTEN_RETURN_COUNTS: usize = 5;

/// The four fields of the project GUID, as they are laid out in the header.
///
/// # Examples
///
/// ```
/// use lasfile::ProjectId;
/// use uuid::Uuid;
/// let uuid = Uuid::parse_str("936DA01F-9ABD-4D9D-80C7-02AF85C822A8").unwrap();
/// let project_id = ProjectId::from(uuid);
/// assert_eq!(0x936DA01F, project_id.data_1);
/// assert_eq!(uuid, Uuid::from(project_id));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProjectId {
    /// GUID data 1.
    pub data_1: u32,
    /// GUID data 2.
    pub data_2: u16,
    /// GUID data 3.
    pub data_3: u16,
    /// GUID data 4.
    pub data_4: [u8; 8],
}

impl From<Uuid> for ProjectId {
    fn from(uuid: Uuid) -> ProjectId {
        let (data_1, data_2, data_3, data_4) = uuid.as_fields();
        ProjectId {
            data_1,
            data_2,
            data_3,
            data_4: *data_4,
        }
    }
}

impl From<ProjectId> for Uuid {
    fn from(project_id: ProjectId) -> Uuid {
        Uuid::from_fields(
            project_id.data_1,
            project_id.data_2,
            project_id.data_3,
            &project_id.data_4,
        )
    }
}

/// A las header.
///
/// When building a file, `number_of_point_records`, `number_of_points_by_return`, and `bounds`
/// are summary fields: they are reset to their sentinels when the header is handed to a
/// [WriteBuilder](crate::WriteBuilder) and recomputed as points are added.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// The file source id, zero when unassigned.
    pub file_source_id: u16,

    /// Global encoding bits. Bit 0 is the gps time type.
    pub global_encoding: u16,

    /// The project GUID.
    pub project_id: ProjectId,

    /// The las version.
    pub version: Version,

    /// The system that generated the data, e.g. `MERGE` or a sensor name.
    pub system_identifier: String,

    /// The software that wrote the file.
    pub generating_software: String,

    /// The day of the year (January 1 is 1) the file was created.
    pub file_creation_day_of_year: u16,

    /// The year the file was created.
    pub file_creation_year: u16,

    /// The size of the header in bytes.
    pub header_size: u16,

    /// The byte offset from the start of the file to the first point record.
    pub offset_to_point_data: u32,

    /// The number of variable length records.
    pub number_of_variable_length_records: u32,

    /// The point format.
    pub point_format: Format,

    /// The size of one point record in bytes.
    pub point_data_record_length: u16,

    /// The number of point records.
    pub number_of_point_records: u32,

    /// The number of points per return, index 0 being the first return.
    ///
    /// Five entries for versions up to 1.3, seven after.
    pub number_of_points_by_return: Vec<u32>,

    /// The scale and offset for each axis.
    pub transforms: Vector<Transform>,

    /// The bounds of the points, in real coordinates.
    pub bounds: Bounds,

    /// The byte offset to the waveform data packet record, only present in 1.3 files.
    pub start_of_waveform_data_packet_record: u64,
}

impl Header {
    /// Decodes a header from the start of a buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// assert!(Header::decode(b"LASG").is_err());
    /// ```
    pub fn decode(buf: &[u8]) -> Result<Header> {
        check_len(buf, 4)?;
        let signature = field::read_bytes::<4>(buf, 0);
        if signature != SIGNATURE {
            return Err(Error::InvalidSignature(signature));
        }
        check_len(buf, 26)?;
        let version = Version::new(field::read_u8(buf, 24), field::read_u8(buf, 25));
        let return_count_len = version.return_count_len();
        let transforms_offset = RETURN_COUNTS_OFFSET + 4 * return_count_len;
        let bounds_offset = transforms_offset + 48;
        let end = bounds_offset + 48;
        check_len(
            buf,
            if version.has_waveform_start() { end + 8 } else { end },
        )?;

        let point_format = Format::new(field::read_u8(buf, 104))?;
        let number_of_points_by_return = (0..return_count_len)
            .map(|i| field::read_u32(buf, RETURN_COUNTS_OFFSET + 4 * i))
            .collect();
        let transform = |axis: usize| Transform {
            scale: field::read_f64(buf, transforms_offset + 8 * axis),
            offset: field::read_f64(buf, transforms_offset + 24 + 8 * axis),
        };
        let header = Header {
            file_source_id: field::read_u16(buf, 4),
            global_encoding: field::read_u16(buf, 6),
            project_id: ProjectId {
                data_1: field::read_u32(buf, 8),
                data_2: field::read_u16(buf, 12),
                data_3: field::read_u16(buf, 14),
                data_4: field::read_bytes(buf, 16),
            },
            version,
            system_identifier: field::read_text(buf, 26, SYSTEM_IDENTIFIER_LEN),
            generating_software: field::read_text(buf, 58, GENERATING_SOFTWARE_LEN),
            file_creation_day_of_year: field::read_u16(buf, 90),
            file_creation_year: field::read_u16(buf, 92),
            header_size: field::read_u16(buf, 94),
            offset_to_point_data: field::read_u32(buf, 96),
            number_of_variable_length_records: field::read_u32(buf, 100),
            point_format,
            point_data_record_length: field::read_u16(buf, 105),
            number_of_point_records: field::read_u32(buf, 107),
            number_of_points_by_return,
            transforms: Vector::new(transform(0), transform(1), transform(2)),
            bounds: Bounds {
                max: Vector::new(
                    field::read_f64(buf, bounds_offset),
                    field::read_f64(buf, bounds_offset + 16),
                    field::read_f64(buf, bounds_offset + 32),
                ),
                min: Vector::new(
                    field::read_f64(buf, bounds_offset + 8),
                    field::read_f64(buf, bounds_offset + 24),
                    field::read_f64(buf, bounds_offset + 40),
                ),
            },
            start_of_waveform_data_packet_record: if version.has_waveform_start() {
                field::read_u64(buf, end)
            } else {
                0
            },
        };
        if header.point_data_record_length < point_format.record_length() {
            return Err(Error::PointRecordLength {
                format: point_format,
                length: header.point_data_record_length,
            });
        }
        debug!(
            "decoded a las {} header: point format {}, {} points, {} vlrs",
            header.version,
            header.point_format,
            header.number_of_point_records,
            header.number_of_variable_length_records
        );
        Ok(header)
    }

    /// Encodes this header into `buf` at `offset`, returning the number of bytes written.
    ///
    /// The header is always written as las 1.3: the version, header size, and creation date
    /// (today, in UTC) are set on `self` before it is written. Only the first five per-return
    /// counts are written.
    ///
    /// # Panics
    ///
    /// Panics if `buf` has fewer than 235 bytes after `offset`.
    pub fn encode(&mut self, buf: &mut [u8], offset: usize) -> usize {
        let today = Utc::now().date_naive();
        self.file_creation_day_of_year = u16::try_from(today.ordinal()).unwrap_or_default();
        self.file_creation_year = u16::try_from(today.year()).unwrap_or_default();
        self.version = Version::new(1, 3);
        self.header_size = HEADER_SIZE;

        let buf = &mut buf[offset..offset + usize::from(HEADER_SIZE)];
        field::write_bytes(buf, 0, &SIGNATURE);
        field::write_u16(buf, 4, self.file_source_id);
        field::write_u16(buf, 6, self.global_encoding);
        field::write_u32(buf, 8, self.project_id.data_1);
        field::write_u16(buf, 12, self.project_id.data_2);
        field::write_u16(buf, 14, self.project_id.data_3);
        field::write_bytes(buf, 16, &self.project_id.data_4);
        field::write_u8(buf, 24, self.version.major);
        field::write_u8(buf, 25, self.version.minor);
        field::write_text(buf, 26, SYSTEM_IDENTIFIER_LEN, &self.system_identifier);
        field::write_text(buf, 58, GENERATING_SOFTWARE_LEN, &self.generating_software);
        field::write_u16(buf, 90, self.file_creation_day_of_year);
        field::write_u16(buf, 92, self.file_creation_year);
        field::write_u16(buf, 94, self.header_size);
        field::write_u32(buf, 96, self.offset_to_point_data);
        field::write_u32(buf, 100, self.number_of_variable_length_records);
        field::write_u8(buf, 104, self.point_format.into());
        field::write_u16(buf, 105, self.point_data_record_length);
        field::write_u32(buf, 107, self.number_of_point_records);
        for i in 0..WRITTEN_RETURN_COUNTS {
            let count = self.number_of_points_by_return.get(i).copied().unwrap_or(0);
            field::write_u32(buf, RETURN_COUNTS_OFFSET + 4 * i, count);
        }
        let transforms = [self.transforms.x, self.transforms.y, self.transforms.z];
        for (i, transform) in transforms.iter().enumerate() {
            field::write_f64(buf, 131 + 8 * i, transform.scale);
            field::write_f64(buf, 155 + 8 * i, transform.offset);
        }
        let bounds = [
            (self.bounds.max.x, self.bounds.min.x),
            (self.bounds.max.y, self.bounds.min.y),
            (self.bounds.max.z, self.bounds.min.z),
        ];
        for (i, (max, min)) in bounds.iter().enumerate() {
            field::write_f64(buf, 179 + 16 * i, *max);
            field::write_f64(buf, 187 + 16 * i, *min);
        }
        field::write_u64(buf, 227, self.start_of_waveform_data_packet_record);
        usize::from(HEADER_SIZE)
    }

    /// Returns the creation date, if the stored day and year make a real date.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let mut header = Header::default();
    /// header.file_creation_year = 2017;
    /// header.file_creation_day_of_year = 32;
    /// assert_eq!("2017-02-01", header.date().unwrap().to_string());
    /// header.file_creation_day_of_year = 0;
    /// assert!(header.date().is_none());
    /// ```
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(
            i32::from(self.file_creation_year),
            u32::from(self.file_creation_day_of_year),
        )
    }

    /// Returns the project id as a [Uuid].
    pub fn project_id(&self) -> Uuid {
        self.project_id.into()
    }

    /// Returns this header's point format's gps time flag.
    pub fn has_gps_time(&self) -> bool {
        self.point_format.has_gps_time()
    }

    /// Returns this header's point format's color flag.
    pub fn has_color(&self) -> bool {
        self.point_format.has_color()
    }

    /// Resets the summary fields to their empty sentinels.
    ///
    /// The point count and vlr count go to zero, the return counts to five zeros, and the bounds
    /// to `+INFINITY` minimums and `-INFINITY` maximums.
    pub fn clear_summary(&mut self) {
        self.number_of_point_records = 0;
        self.number_of_variable_length_records = 0;
        self.number_of_points_by_return = vec![0; WRITTEN_RETURN_COUNTS];
        self.bounds = Bounds::default();
    }
}

impl Default for Header {
    fn default() -> Header {
        let today = Utc::now().date_naive();
        Header {
            file_source_id: 0,
            global_encoding: 0,
            project_id: ProjectId::default(),
            version: Version::new(1, 3),
            system_identifier: "lasfile".to_string(),
            generating_software: format!("lasfile {}", env!("CARGO_PKG_VERSION")),
            file_creation_day_of_year: u16::try_from(today.ordinal()).unwrap_or_default(),
            file_creation_year: u16::try_from(today.year()).unwrap_or_default(),
            header_size: HEADER_SIZE,
            offset_to_point_data: u32::from(HEADER_SIZE),
            number_of_variable_length_records: 0,
            point_format: Format::Format0,
            point_data_record_length: Format::Format0.record_length(),
            number_of_point_records: 0,
            number_of_points_by_return: vec![0; WRITTEN_RETURN_COUNTS],
            transforms: Vector::default(),
            bounds: Bounds::default(),
            start_of_waveform_data_packet_record: 0,
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File Signature: LASF")?;
        writeln!(f, "File Source ID: {}", self.file_source_id)?;
        writeln!(f, "Global Encoding: {}", self.global_encoding)?;
        writeln!(f, "Project ID (GUID): {{{}}}", self.project_id())?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(
            f,
            "System ID: {}",
            field::display_text(&self.system_identifier, SYSTEM_IDENTIFIER_LEN)
        )?;
        writeln!(
            f,
            "Generating Software: {}",
            field::display_text(&self.generating_software, GENERATING_SOFTWARE_LEN)
        )?;
        writeln!(
            f,
            "File Creation Day/Year: {}/{}",
            self.file_creation_day_of_year, self.file_creation_year
        )?;
        writeln!(f, "Header Size: {}", self.header_size)?;
        writeln!(f, "Offset to Points: {}", self.offset_to_point_data)?;
        writeln!(f, "Number of VLRs: {}", self.number_of_variable_length_records)?;
        writeln!(f, "Point Format: {}", self.point_format)?;
        writeln!(f, "Point Record Length: {}", self.point_data_record_length)?;
        writeln!(f, "Number of Points: {}", self.number_of_point_records)?;
        writeln!(
            f,
            "Number of Points by Return: {:?}",
            self.number_of_points_by_return
        )?;
        writeln!(
            f,
            "Scale Factors: ({}, {}, {})",
            self.transforms.x.scale, self.transforms.y.scale, self.transforms.z.scale
        )?;
        writeln!(
            f,
            "Offsets: ({}, {}, {})",
            self.transforms.x.offset, self.transforms.y.offset, self.transforms.z.offset
        )?;
        writeln!(
            f,
            "Min: ({}, {}, {})",
            self.bounds.min.x, self.bounds.min.y, self.bounds.min.z
        )?;
        writeln!(
            f,
            "Max: ({}, {}, {})",
            self.bounds.max.x, self.bounds.max.y, self.bounds.max.z
        )?;
        write!(
            f,
            "Start of Waveform Data Packet Record: {}",
            self.start_of_waveform_data_packet_record
        )
    }
}

fn check_len(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        Err(Error::Truncated {
            what: "header",
            needed,
            available: buf.len(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(header: &mut Header) -> Vec<u8> {
        let mut buf = vec![0; 235];
        assert_eq!(235, header.encode(&mut buf, 0));
        buf
    }

    #[test]
    fn signature() {
        let mut buf = encoded(&mut Header::default());
        buf[3] = b'G';
        match Header::decode(&buf).unwrap_err() {
            Error::InvalidSignature(signature) => assert_eq!(*b"LASG", signature),
            err => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn truncated() {
        let buf = encoded(&mut Header::default());
        assert!(matches!(
            Header::decode(&buf[0..200]).unwrap_err(),
            Error::Truncated { needed: 235, .. }
        ));
    }

    #[test]
    fn encode_at_offset() {
        let mut header = Header::default();
        let mut buf = vec![0xFF; 240];
        assert_eq!(235, header.encode(&mut buf, 5));
        assert_eq!(*b"LASF", buf[5..9]);
        assert_eq!(0xFF, buf[4]);
        assert_eq!(header, Header::decode(&buf[5..]).unwrap());
    }

    #[test]
    fn sentinel_bounds() {
        let mut header = Header::default();
        header.clear_summary();
        let header = Header::decode(&encoded(&mut header)).unwrap();
        assert_eq!(0, header.number_of_point_records);
        assert_eq!(f64::INFINITY, header.bounds.min.x);
        assert_eq!(f64::NEG_INFINITY, header.bounds.max.z);
    }

    #[test]
    fn fixed_offsets() {
        let mut header = Header {
            file_source_id: 0x0102,
            point_format: Format::Format3,
            point_data_record_length: 34,
            number_of_point_records: 7,
            number_of_points_by_return: vec![1, 2, 3, 4, 5],
            ..Default::default()
        };
        header.bounds.grow_xyz(1., 2., 3.);
        header.bounds.grow_xyz(-1., -2., -3.);
        let buf = encoded(&mut header);
        assert_eq!([2, 1], buf[4..6]);
        assert_eq!([1, 3], buf[24..26]);
        assert_eq!(235, field::read_u16(&buf, 94));
        assert_eq!(3, buf[104]);
        assert_eq!(34, field::read_u16(&buf, 105));
        assert_eq!(7, field::read_u32(&buf, 107));
        assert_eq!(5, field::read_u32(&buf, 127));
        assert_eq!(0.001, field::read_f64(&buf, 131));
        assert_eq!(1., field::read_f64(&buf, 179));
        assert_eq!(-1., field::read_f64(&buf, 187));
        assert_eq!(-3., field::read_f64(&buf, 219));
    }

    #[test]
    fn version_1_2_has_no_waveform_field() {
        let mut buf = encoded(&mut Header::default());
        buf[25] = 2;
        let header = Header::decode(&buf[0..227]).unwrap();
        assert_eq!(Version::new(1, 2), header.version);
        assert_eq!(0, header.start_of_waveform_data_packet_record);
        assert_eq!(5, header.number_of_points_by_return.len());
    }

    #[test]
    fn version_1_3_has_waveform_field() {
        let mut header = Header {
            start_of_waveform_data_packet_record: 42,
            ..Default::default()
        };
        let header = Header::decode(&encoded(&mut header)).unwrap();
        assert_eq!(42, header.start_of_waveform_data_packet_record);
    }

    #[test]
    fn version_1_4_has_seven_return_counts() {
        let mut buf = encoded(&mut Header::default());
        buf[25] = 4;
        field::write_u32(&mut buf, 131, 6);
        field::write_u32(&mut buf, 135, 7);
        field::write_f64(&mut buf, 139, 0.5);
        let header = Header::decode(&buf).unwrap();
        assert_eq!(vec![0, 0, 0, 0, 0, 6, 7], header.number_of_points_by_return);
        assert_eq!(0.5, header.transforms.x.scale);
        assert_eq!(0, header.start_of_waveform_data_packet_record);
    }

    #[test]
    fn encode_normalizes_version() {
        let mut header = Header {
            version: Version::new(1, 2),
            header_size: 227,
            number_of_points_by_return: vec![1, 2, 3, 4, 5, 6, 7],
            ..Default::default()
        };
        let buf = encoded(&mut header);
        assert_eq!(Version::new(1, 3), header.version);
        assert_eq!(235, header.header_size);
        let decoded = Header::decode(&buf).unwrap();
        assert_eq!(vec![1, 2, 3, 4, 5], decoded.number_of_points_by_return);
    }

    #[test]
    fn encode_stamps_today() {
        let mut header = Header {
            file_creation_day_of_year: 1,
            file_creation_year: 1999,
            ..Default::default()
        };
        let _ = encoded(&mut header);
        assert_eq!(Some(Utc::now().date_naive()), header.date());
    }

    #[test]
    fn text_fields() {
        let mut header = Header {
            system_identifier: "MERGE".to_string(),
            generating_software: "x".repeat(40),
            ..Default::default()
        };
        let buf = encoded(&mut header);
        assert_eq!(0, buf[26 + 5]);
        let decoded = Header::decode(&buf).unwrap();
        assert_eq!("MERGE", decoded.system_identifier);
        assert_eq!("x".repeat(32), decoded.generating_software);
    }

    #[test]
    fn unsupported_point_format() {
        let mut buf = encoded(&mut Header::default());
        buf[104] = 6;
        assert!(matches!(
            Header::decode(&buf).unwrap_err(),
            Error::UnsupportedPointFormat(6)
        ));
    }

    #[test]
    fn short_record_length() {
        let mut buf = encoded(&mut Header::default());
        field::write_u16(&mut buf, 105, 19);
        assert!(matches!(
            Header::decode(&buf).unwrap_err(),
            Error::PointRecordLength { length: 19, .. }
        ));
    }

    #[test]
    fn project_id() {
        let uuid = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        let mut header = Header {
            project_id: uuid.into(),
            ..Default::default()
        };
        let decoded = Header::decode(&encoded(&mut header)).unwrap();
        assert_eq!(uuid, decoded.project_id());
    }

    #[test]
    fn display_pads_text() {
        let header = Header {
            system_identifier: "OTHER".to_string(),
            ..Default::default()
        };
        let display = header.to_string();
        assert!(display.contains(&format!("System ID: OTHER{}\n", " ".repeat(27))));
        assert!(display.contains("Version: 1.3\n"));
    }
}
