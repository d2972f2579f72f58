use crate::{
    Color, Result, Transform, Vector, field,
    point::{Format, PointData},
};

/// A point record, carrying exactly the fields of its format.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointRecord {
    /// Base fields only.
    Format0 {
        /// The base fields.
        point: PointData,
    },
    /// Base fields and gps time.
    Format1 {
        /// The base fields.
        point: PointData,
        /// The gps time.
        gps_time: f64,
    },
    /// Base fields and color.
    Format2 {
        /// The base fields.
        point: PointData,
        /// The color.
        color: Color,
    },
    /// Base fields, gps time, and color.
    Format3 {
        /// The base fields.
        point: PointData,
        /// The gps time.
        gps_time: f64,
        /// The color.
        color: Color,
    },
}

impl PointRecord {
    /// Builds a record of `format` from base fields and whichever extension fields it needs.
    ///
    /// Missing extension fields are zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Color, PointData, PointRecord};
    /// use lasfile::point::Format;
    /// let record = PointRecord::new(Format::Format2, PointData::default(), Some(1.), Some(Color::new(1, 2, 3)));
    /// assert_eq!(None, record.gps_time());
    /// assert_eq!(Some(Color::new(1, 2, 3)), record.color());
    /// ```
    pub fn new(format: Format, point: PointData, gps_time: Option<f64>, color: Option<Color>) -> PointRecord {
        let gps_time = gps_time.unwrap_or_default();
        let color = color.unwrap_or_default();
        match format {
            Format::Format0 => PointRecord::Format0 { point },
            Format::Format1 => PointRecord::Format1 { point, gps_time },
            Format::Format2 => PointRecord::Format2 { point, color },
            Format::Format3 => PointRecord::Format3 {
                point,
                gps_time,
                color,
            },
        }
    }

    /// Decodes the record of `format` at `offset`.
    ///
    /// The caller guarantees that `format.record_length()` bytes are available.
    pub fn decode(buf: &[u8], offset: usize, format: Format, transforms: &Vector<Transform>) -> PointRecord {
        let point = PointData::decode(buf, offset, transforms);
        let (gps_time, color) = decode_extension(buf, offset, format);
        PointRecord::new(format, point, gps_time, color)
    }

    /// Encodes this record at `offset`, returning the number of bytes written.
    pub fn encode(&self, buf: &mut [u8], offset: usize, transforms: &Vector<Transform>) -> Result<usize> {
        self.point_data().encode(buf, offset, transforms)?;
        if let Some(gps_time) = self.gps_time() {
            field::write_f64(buf, offset + 20, gps_time);
        }
        if let (Some(color), Some(color_offset)) = (self.color(), self.format().color_offset()) {
            field::write_u16(buf, offset + color_offset, color.red);
            field::write_u16(buf, offset + color_offset + 2, color.green);
            field::write_u16(buf, offset + color_offset + 4, color.blue);
        }
        Ok(usize::from(self.format().record_length()))
    }

    /// This record's format.
    pub fn format(&self) -> Format {
        match self {
            PointRecord::Format0 { .. } => Format::Format0,
            PointRecord::Format1 { .. } => Format::Format1,
            PointRecord::Format2 { .. } => Format::Format2,
            PointRecord::Format3 { .. } => Format::Format3,
        }
    }

    /// The base fields.
    pub fn point_data(&self) -> &PointData {
        match self {
            PointRecord::Format0 { point }
            | PointRecord::Format1 { point, .. }
            | PointRecord::Format2 { point, .. }
            | PointRecord::Format3 { point, .. } => point,
        }
    }

    /// The gps time, for formats 1 and 3.
    pub fn gps_time(&self) -> Option<f64> {
        match *self {
            PointRecord::Format1 { gps_time, .. } | PointRecord::Format3 { gps_time, .. } => Some(gps_time),
            PointRecord::Format0 { .. } | PointRecord::Format2 { .. } => None,
        }
    }

    /// The color, for formats 2 and 3.
    pub fn color(&self) -> Option<Color> {
        match *self {
            PointRecord::Format2 { color, .. } | PointRecord::Format3 { color, .. } => Some(color),
            PointRecord::Format0 { .. } | PointRecord::Format1 { .. } => None,
        }
    }
}

impl Default for PointRecord {
    fn default() -> PointRecord {
        PointRecord::Format0 {
            point: PointData::default(),
        }
    }
}

/// Decodes the fields that follow the base fields of the record at `offset`.
///
/// Gps time sits at byte 20 for formats 1 and 3. Color sits at byte 20 for format 2 and byte 28
/// for format 3.
///
/// # Examples
///
/// ```
/// use lasfile::point::{Format, decode_extension};
/// let mut buf = vec![0; 34];
/// buf[20..28].copy_from_slice(&1.5f64.to_le_bytes());
/// buf[28] = 7;
/// let (gps_time, color) = decode_extension(&buf, 0, Format::Format3);
/// assert_eq!(Some(1.5), gps_time);
/// assert_eq!(7, color.unwrap().red);
/// assert_eq!((None, None), decode_extension(&buf, 0, Format::Format0));
/// ```
pub fn decode_extension(buf: &[u8], offset: usize, format: Format) -> (Option<f64>, Option<Color>) {
    let gps_time = format
        .has_gps_time()
        .then(|| field::read_f64(buf, offset + 20));
    let color = format.color_offset().map(|color_offset| {
        let offset = offset + color_offset;
        Color::new(
            field::read_u16(buf, offset),
            field::read_u16(buf, offset + 2),
            field::read_u16(buf, offset + 4),
        )
    });
    (gps_time, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transforms() -> Vector<Transform> {
        Vector::new(
            Transform {
                scale: 0.01,
                offset: 0.,
            },
            Transform {
                scale: 0.01,
                offset: 0.,
            },
            Transform {
                scale: 0.001,
                offset: 0.,
            },
        )
    }

    #[test]
    fn format_3_scenario() {
        let mut buf = vec![0; 34];
        field::write_i32(&mut buf, 0, 100);
        field::write_i32(&mut buf, 4, 200);
        field::write_i32(&mut buf, 8, 300);
        field::write_f64(&mut buf, 20, 1234.5);
        field::write_u16(&mut buf, 28, 10);
        field::write_u16(&mut buf, 30, 20);
        field::write_u16(&mut buf, 32, 30);
        let record = PointRecord::decode(&buf, 0, Format::Format3, &transforms());
        let point = record.point_data();
        assert_eq!((1., 2., 0.3), (point.x, point.y, point.z));
        assert_eq!(Some(1234.5), record.gps_time());
        assert_eq!(Some(Color::new(10, 20, 30)), record.color());

        let mut out = vec![0; 34];
        assert_eq!(34, record.encode(&mut out, 0, &transforms()).unwrap());
        assert_eq!(buf, out);
    }

    #[test]
    fn format_2_color_offset() {
        let record = PointRecord::Format2 {
            point: PointData::default(),
            color: Color::new(1, 2, 3),
        };
        let mut buf = vec![0; 26];
        assert_eq!(26, record.encode(&mut buf, 0, &transforms()).unwrap());
        assert_eq!([1, 0, 2, 0, 3, 0], buf[20..26]);
    }

    #[test]
    fn format_1_gps_time() {
        let record = PointRecord::Format1 {
            point: PointData::default(),
            gps_time: -2.,
        };
        let mut buf = vec![0; 28];
        assert_eq!(28, record.encode(&mut buf, 0, &transforms()).unwrap());
        assert_eq!(-2., field::read_f64(&buf, 20));
        assert_eq!(None, record.color());
        assert_eq!(Format::Format1, record.format());
    }

    #[test]
    fn new_drops_fields_the_format_lacks() {
        let record = PointRecord::new(Format::Format0, PointData::default(), Some(1.), None);
        assert_eq!(PointRecord::default(), record);
        let record = PointRecord::new(Format::Format3, PointData::default(), None, None);
        assert_eq!(Some(0.), record.gps_time());
        assert_eq!(Some(Color::default()), record.color());
    }
}
