use crate::{Error, Result};
use std::fmt;

/// Point record format.
///
/// Every format carries the same twenty bytes of base fields. Format 1 adds gps time, format 2
/// adds color, and format 3 adds both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Base fields only.
    #[default]
    Format0,
    /// Base fields and gps time.
    Format1,
    /// Base fields and color.
    Format2,
    /// Base fields, gps time, and color.
    Format3,
}

impl Format {
    /// Creates a format from its code.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::point::Format;
    /// assert_eq!(Format::Format2, Format::new(2).unwrap());
    /// assert!(Format::new(4).is_err());
    /// ```
    pub fn new(n: u8) -> Result<Format> {
        match n {
            0 => Ok(Format::Format0),
            1 => Ok(Format::Format1),
            2 => Ok(Format::Format2),
            3 => Ok(Format::Format3),
            _ => Err(Error::UnsupportedPointFormat(n)),
        }
    }

    /// Does this point format have a gps_time field?
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::point::Format;
    /// assert!(!Format::Format0.has_gps_time());
    /// assert!(Format::Format1.has_gps_time());
    /// ```
    pub fn has_gps_time(&self) -> bool {
        matches!(self, Format::Format1 | Format::Format3)
    }

    /// Does this point format have color fields?
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::point::Format;
    /// assert!(!Format::Format1.has_color());
    /// assert!(Format::Format2.has_color());
    /// ```
    pub fn has_color(&self) -> bool {
        matches!(self, Format::Format2 | Format::Format3)
    }

    /// The length of one point record in this format.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::point::Format;
    /// assert_eq!(34, Format::Format3.record_length());
    /// ```
    pub fn record_length(&self) -> u16 {
        let mut length = 20;
        if self.has_gps_time() {
            length += 8;
        }
        if self.has_color() {
            length += 6;
        }
        length
    }

    /// The byte offset of the color fields within a record, if this format has them.
    pub fn color_offset(&self) -> Option<usize> {
        match self {
            Format::Format2 => Some(20),
            Format::Format3 => Some(28),
            Format::Format0 | Format::Format1 => None,
        }
    }
}

impl From<Format> for u8 {
    fn from(format: Format) -> u8 {
        match format {
            Format::Format0 => 0,
            Format::Format1 => 1,
            Format::Format2 => 2,
            Format::Format3 => 3,
        }
    }
}

impl TryFrom<u8> for Format {
    type Error = Error;

    fn try_from(n: u8) -> Result<Format> {
        Format::new(n)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        for n in 0..4 {
            assert_eq!(n, u8::from(Format::new(n).unwrap()));
        }
        for n in 4..=255 {
            assert!(Format::new(n).is_err());
        }
    }

    #[test]
    fn has_gps_time() {
        assert!(!Format::Format0.has_gps_time());
        assert!(Format::Format1.has_gps_time());
        assert!(!Format::Format2.has_gps_time());
        assert!(Format::Format3.has_gps_time());
    }

    #[test]
    fn has_color() {
        assert!(!Format::Format0.has_color());
        assert!(!Format::Format1.has_color());
        assert!(Format::Format2.has_color());
        assert!(Format::Format3.has_color());
    }

    #[test]
    fn record_length() {
        assert_eq!(20, Format::Format0.record_length());
        assert_eq!(28, Format::Format1.record_length());
        assert_eq!(26, Format::Format2.record_length());
        assert_eq!(34, Format::Format3.record_length());
    }

    #[test]
    fn display() {
        assert_eq!("3", Format::Format3.to_string());
    }
}
