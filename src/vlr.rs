//! Variable length records store metadata that doesn't fit in the header.
//!
//! Vlrs sit back to back between the end of the header and the start of the point records. Each
//! one is a 54 byte prefix followed by `record_length_after_header` bytes of payload:
//!
//! ```
//! use lasfile::Vlr;
//! let vlr = Vlr::new("gadomski", 42, "Some really important data", vec![1, 2, 3]).unwrap();
//! assert_eq!(57, vlr.len());
//!
//! let mut buf = vec![0; vlr.len()];
//! assert_eq!(57, Vlr::encode_all(&[vlr.clone()], &mut buf, 0));
//! assert_eq!(vec![vlr], Vlr::decode_all(&buf, 0, 1).unwrap());
//! ```
//!
//! Projection records (user id `LASF_Projection`) are displayed with help from the
//! [geotiff](crate::geotiff) dictionary.

use crate::{
    Error, Result, field,
    geotiff::{self, GEO_DOUBLE_PARAMS_TAG, GEO_KEY_DIRECTORY_TAG, GeoKeyDirectory},
};
use log::debug;
use std::fmt;

/// The size of the fixed part of every vlr.
pub const VLR_HEADER_SIZE: usize = 54;

const USER_ID_LEN: usize = 16;
const DESCRIPTION_LEN: usize = 32;

/// A variable length record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vlr {
    /// Reserved, carried through unchanged.
    pub reserved: u16,

    /// The user that created this record.
    ///
    /// This value is often an official, "registered" user_id, such as "LASF_Spec" or
    /// "LASF_Projection".
    pub user_id: String,

    /// This value specifies the type of record, and depends on the user id.
    pub record_id: u16,

    /// The number of payload bytes after the 54 byte prefix.
    pub record_length_after_header: u16,

    /// Textual description of these data.
    pub description: String,

    /// The data themselves.
    pub data: Vec<u8>,
}

impl Vlr {
    /// Creates a new vlr, setting its length from its data.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Vlr;
    /// let vlr = Vlr::new("LASF_Projection", 34737, "", b"WGS 84|".to_vec()).unwrap();
    /// assert_eq!(7, vlr.record_length_after_header);
    /// assert!(Vlr::new("", 0, "", vec![0; 65536]).is_err());
    /// ```
    pub fn new(
        user_id: impl Into<String>,
        record_id: u16,
        description: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<Vlr> {
        let record_length_after_header =
            u16::try_from(data.len()).map_err(|_| Error::VlrTooLong(data.len()))?;
        Ok(Vlr {
            reserved: 0,
            user_id: user_id.into(),
            record_id,
            record_length_after_header,
            description: description.into(),
            data,
        })
    }

    /// Returns the total number of bytes this vlr occupies in a file, prefix included.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Vlr;
    /// assert_eq!(54, Vlr::default().len());
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        VLR_HEADER_SIZE + usize::from(self.record_length_after_header)
    }

    /// Decodes one vlr starting at `offset`.
    pub fn decode(buf: &[u8], offset: usize) -> Result<Vlr> {
        check_len(buf, offset + VLR_HEADER_SIZE)?;
        let record_length_after_header = field::read_u16(buf, offset + 20);
        let end = offset + VLR_HEADER_SIZE + usize::from(record_length_after_header);
        check_len(buf, end)?;
        Ok(Vlr {
            reserved: field::read_u16(buf, offset),
            user_id: field::read_text(buf, offset + 2, USER_ID_LEN),
            record_id: field::read_u16(buf, offset + 18),
            record_length_after_header,
            description: field::read_text(buf, offset + 22, DESCRIPTION_LEN),
            data: buf[offset + VLR_HEADER_SIZE..end].to_vec(),
        })
    }

    /// Decodes `count` vlrs laid back to back from `offset`.
    ///
    /// Each record starts where the previous one ended.
    pub fn decode_all(buf: &[u8], offset: usize, count: usize) -> Result<Vec<Vlr>> {
        let mut vlrs = Vec::with_capacity(count.min(buf.len() / VLR_HEADER_SIZE));
        let mut offset = offset;
        for _ in 0..count {
            let vlr = Vlr::decode(buf, offset)?;
            offset += vlr.len();
            vlrs.push(vlr);
        }
        debug!("decoded {} vlrs, ending at byte {}", vlrs.len(), offset);
        Ok(vlrs)
    }

    /// Encodes this vlr at `offset`, returning the number of bytes written.
    ///
    /// Text longer than its field is truncated. The length field is written as it is, and the
    /// payload is written up to that length.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is too short for [Vlr::len] bytes after `offset`.
    pub fn encode(&self, buf: &mut [u8], offset: usize) -> usize {
        let buf = &mut buf[offset..offset + self.len()];
        field::write_u16(buf, 0, self.reserved);
        field::write_text(buf, 2, USER_ID_LEN, &self.user_id);
        field::write_u16(buf, 18, self.record_id);
        field::write_u16(buf, 20, self.record_length_after_header);
        field::write_text(buf, 22, DESCRIPTION_LEN, &self.description);
        let payload = &mut buf[VLR_HEADER_SIZE..];
        let n = self.data.len().min(payload.len());
        payload[..n].copy_from_slice(&self.data[..n]);
        payload[n..].fill(0);
        self.len()
    }

    /// Encodes vlrs back to back from `offset`, returning the number of bytes written.
    pub fn encode_all(vlrs: &[Vlr], buf: &mut [u8], offset: usize) -> usize {
        vlrs.iter()
            .fold(offset, |offset, vlr| offset + vlr.encode(buf, offset))
            - offset
    }

    /// Returns true if this is a projection record.
    pub fn is_projection(&self) -> bool {
        self.user_id == "LASF_Projection"
    }
}

impl fmt::Display for Vlr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reserved: {}", self.reserved)?;
        writeln!(
            f,
            "User ID: {}",
            field::display_text(&self.user_id, USER_ID_LEN)
        )?;
        match geotiff::tag_name(self.record_id).filter(|_| self.is_projection()) {
            Some(name) => writeln!(f, "Record ID: {} ({})", self.record_id, name)?,
            None => writeln!(f, "Record ID: {}", self.record_id)?,
        }
        writeln!(f, "Record Length After Header: {}", self.record_length_after_header)?;
        writeln!(
            f,
            "Description: {}",
            field::display_text(&self.description, DESCRIPTION_LEN)
        )?;
        match self.record_id {
            GEO_KEY_DIRECTORY_TAG => match GeoKeyDirectory::parse(&self.data) {
                Ok(directory) => {
                    write!(
                        f,
                        "Data: GeoKeyDirectory version {}.{}.{}, {} keys",
                        directory.key_directory_version,
                        directory.key_revision,
                        directory.minor_revision,
                        directory.entries.len()
                    )?;
                    for entry in directory.entries {
                        write!(
                            f,
                            "\n    {} ({}): location {}, count {}, value {}",
                            geotiff::key_name(entry.key_id).unwrap_or("Unknown"),
                            entry.key_id,
                            entry.tiff_tag_location,
                            entry.count,
                            entry.value_offset
                        )?;
                    }
                    Ok(())
                }
                Err(_) => write!(f, "Data: {:?}", self.data),
            },
            GEO_DOUBLE_PARAMS_TAG => {
                let values: Vec<f64> = self
                    .data
                    .chunks_exact(8)
                    .map(|chunk| field::read_f64(chunk, 0))
                    .collect();
                write!(f, "Data: {values:?}")
            }
            _ => write!(
                f,
                "Data: {}",
                String::from_utf8_lossy(&self.data).trim_end_matches('\0').trim()
            ),
        }
    }
}

fn check_len(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        Err(Error::Truncated {
            what: "vlr",
            needed,
            available: buf.len(),
        })
    } else {
        Ok(())
    }
}
