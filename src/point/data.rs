use crate::{
    Result, Transform, Vector, field,
    point::{ClassificationFlags, ReturnInfo},
};

/// The twenty bytes of base fields that every point format shares.
///
/// Coordinates are real values: the quantized integers in the file have already had the header's
/// scale and offset applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointData {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
    /// The z coordinate.
    pub z: f64,
    /// The pulse return magnitude.
    pub intensity: u16,
    /// Return number, number of returns, scan direction, and edge of flight line.
    pub return_info: ReturnInfo,
    /// Class code and the synthetic, key-point, and withheld flags.
    pub classification: ClassificationFlags,
    /// The scan angle rounded to an integer, -90 to +90 degrees.
    pub scan_angle_rank: i8,
    /// Free for the user.
    pub user_data: u8,
    /// The file this point originated from.
    pub point_source_id: u16,
}

impl PointData {
    /// Decodes the base fields of the record at `offset`.
    ///
    /// The caller guarantees that twenty bytes are available.
    pub fn decode(buf: &[u8], offset: usize, transforms: &Vector<Transform>) -> PointData {
        PointData {
            x: transforms.x.direct(field::read_i32(buf, offset)),
            y: transforms.y.direct(field::read_i32(buf, offset + 4)),
            z: transforms.z.direct(field::read_i32(buf, offset + 8)),
            intensity: field::read_u16(buf, offset + 12),
            return_info: field::read_u8(buf, offset + 14).into(),
            classification: field::read_u8(buf, offset + 15).into(),
            scan_angle_rank: field::read_i8(buf, offset + 16),
            user_data: field::read_u8(buf, offset + 17),
            point_source_id: field::read_u16(buf, offset + 18),
        }
    }

    /// Encodes the base fields at `offset`, quantizing the coordinates toward zero.
    ///
    /// Fails without writing anything if a coordinate doesn't fit in an i32 after quantization.
    pub fn encode(&self, buf: &mut [u8], offset: usize, transforms: &Vector<Transform>) -> Result<()> {
        let x = transforms.x.inverse(self.x)?;
        let y = transforms.y.inverse(self.y)?;
        let z = transforms.z.inverse(self.z)?;
        field::write_i32(buf, offset, x);
        field::write_i32(buf, offset + 4, y);
        field::write_i32(buf, offset + 8, z);
        field::write_u16(buf, offset + 12, self.intensity);
        field::write_u8(buf, offset + 14, self.return_info.into());
        field::write_u8(buf, offset + 15, self.classification.into());
        field::write_i8(buf, offset + 16, self.scan_angle_rank);
        field::write_u8(buf, offset + 17, self.user_data);
        field::write_u16(buf, offset + 18, self.point_source_id);
        Ok(())
    }

    /// The return number, from the return byte.
    pub fn return_number(&self) -> u8 {
        self.return_info.return_number()
    }

    /// The number of returns, from the return byte.
    pub fn number_of_returns(&self) -> u8 {
        self.return_info.number_of_returns()
    }

    /// The class code, from the classification byte.
    pub fn class_code(&self) -> u8 {
        self.classification.class_code()
    }

    /// Is this the first return of its pulse?
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::PointData;
    /// let mut point = PointData::default();
    /// point.return_info.set_return_number(1);
    /// point.return_info.set_number_of_returns(3);
    /// assert!(point.is_first_return());
    /// assert!(!point.is_last_return());
    /// ```
    pub fn is_first_return(&self) -> bool {
        self.return_number() == 1
    }

    /// Is this the last return of its pulse?
    pub fn is_last_return(&self) -> bool {
        self.return_number() > 0 && self.return_number() == self.number_of_returns()
    }

    /// Is this neither the first nor the last return of its pulse?
    pub fn is_intermediate_return(&self) -> bool {
        let return_number = self.return_number();
        return_number > 1 && return_number < self.number_of_returns()
    }
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
    fn layout() {
        let mut buf = vec![0; 20];
        field::write_i32(&mut buf, 0, 100);
        field::write_i32(&mut buf, 4, 200);
        field::write_i32(&mut buf, 8, 300);
        field::write_u16(&mut buf, 12, 1024);
        buf[14] = 0b0001_0001;
        buf[15] = 2;
        buf[16] = 0xF6;
        buf[17] = 7;
        field::write_u16(&mut buf, 18, 42);
        let point = PointData::decode(&buf, 0, &transforms());
        assert_eq!(1., point.x);
        assert_eq!(2., point.y);
        assert_eq!(0.3, point.z);
        assert_eq!(1024, point.intensity);
        assert_eq!(1, point.return_number());
        assert_eq!(2, point.number_of_returns());
        assert_eq!(2, point.class_code());
        assert_eq!(-10, point.scan_angle_rank);
        assert_eq!(7, point.user_data);
        assert_eq!(42, point.point_source_id);

        let mut out = vec![0; 20];
        point.encode(&mut out, 0, &transforms()).unwrap();
        assert_eq!(buf, out);
    }

    #[test]
    fn quantizes_toward_zero() {
        let point = PointData {
            x: 1.239,
            y: -1.239,
            z: 0.0005,
            ..Default::default()
        };
        let mut buf = vec![0; 20];
        point.encode(&mut buf, 0, &transforms()).unwrap();
        assert_eq!(123, field::read_i32(&buf, 0));
        assert_eq!(-123, field::read_i32(&buf, 4));
        assert_eq!(0, field::read_i32(&buf, 8));
    }

    #[test]
    fn out_of_range() {
        let point = PointData {
            z: 1e10,
            ..Default::default()
        };
        let mut buf = vec![0xAA; 20];
        assert!(point.encode(&mut buf, 0, &transforms()).is_err());
        assert!(buf.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn returns() {
        let mut point = PointData::default();
        point.return_info.set_return_number(2);
        point.return_info.set_number_of_returns(3);
        assert!(point.is_intermediate_return());
        assert!(!point.is_first_return());
        point.return_info.set_return_number(3);
        assert!(point.is_last_return());
        assert!(!point.is_intermediate_return());
        assert!(!PointData::default().is_last_return());
    }
}
