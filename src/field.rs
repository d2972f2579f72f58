//! Fixed-width little-endian fields at explicit byte offsets into a flat buffer.
//!
//! Every higher-level codec in this crate is written in terms of "read N bytes as type T at
//! offset O". These functions do no bounds checking of their own: callers compute offsets from a
//! buffer whose length they have already validated, and an out-of-range offset panics.
//!
//! ```
//! use lasfile::field;
//! let mut buf = vec![0; 6];
//! field::write_u16(&mut buf, 0, 0xABCD);
//! field::write_i32(&mut buf, 2, -2);
//! assert_eq!([0xCD, 0xAB], buf[0..2]);
//! assert_eq!(0xABCD, field::read_u16(&buf, 0));
//! assert_eq!(-2, field::read_i32(&buf, 2));
//! ```

use byteorder::{ByteOrder, LittleEndian};
use log::warn;

/// Reads one unsigned byte.
pub fn read_u8(buf: &[u8], offset: usize) -> u8 {
    buf[offset]
}

/// Reads one signed byte.
pub fn read_i8(buf: &[u8], offset: usize) -> i8 {
    i8::from_le_bytes([buf[offset]])
}

/// Reads a little-endian u16.
pub fn read_u16(buf: &[u8], offset: usize) -> u16 {
    LittleEndian::read_u16(&buf[offset..offset + 2])
}

/// Reads a little-endian u32.
pub fn read_u32(buf: &[u8], offset: usize) -> u32 {
    LittleEndian::read_u32(&buf[offset..offset + 4])
}

/// Reads a little-endian i32.
pub fn read_i32(buf: &[u8], offset: usize) -> i32 {
    LittleEndian::read_i32(&buf[offset..offset + 4])
}

/// Reads a little-endian u64.
pub fn read_u64(buf: &[u8], offset: usize) -> u64 {
    LittleEndian::read_u64(&buf[offset..offset + 8])
}

/// Reads a little-endian IEEE-754 double.
pub fn read_f64(buf: &[u8], offset: usize) -> f64 {
    LittleEndian::read_f64(&buf[offset..offset + 8])
}

/// Copies `N` raw bytes.
pub fn read_bytes<const N: usize>(buf: &[u8], offset: usize) -> [u8; N] {
    let mut bytes = [0; N];
    bytes.copy_from_slice(&buf[offset..offset + N]);
    bytes
}

/// Reads a fixed-width, nul-padded text field.
///
/// The text ends at the first nul. Bytes that are not valid utf8 are replaced rather than
/// rejected, since not all las data in the wild follows the ascii rule.
///
/// ```
/// use lasfile::field;
/// assert_eq!("LiDAR", field::read_text(&[76, 105, 68, 65, 82, 0, 33], 0, 7));
/// ```
pub fn read_text(buf: &[u8], offset: usize, width: usize) -> String {
    let bytes = &buf[offset..offset + width];
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(width);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Writes one unsigned byte.
pub fn write_u8(buf: &mut [u8], offset: usize, n: u8) {
    buf[offset] = n;
}

/// Writes one signed byte.
pub fn write_i8(buf: &mut [u8], offset: usize, n: i8) {
    buf[offset] = n.to_le_bytes()[0];
}

/// Writes a little-endian u16.
pub fn write_u16(buf: &mut [u8], offset: usize, n: u16) {
    LittleEndian::write_u16(&mut buf[offset..offset + 2], n);
}

/// Writes a little-endian u32.
pub fn write_u32(buf: &mut [u8], offset: usize, n: u32) {
    LittleEndian::write_u32(&mut buf[offset..offset + 4], n);
}

/// Writes a little-endian i32.
pub fn write_i32(buf: &mut [u8], offset: usize, n: i32) {
    LittleEndian::write_i32(&mut buf[offset..offset + 4], n);
}

/// Writes a little-endian u64.
pub fn write_u64(buf: &mut [u8], offset: usize, n: u64) {
    LittleEndian::write_u64(&mut buf[offset..offset + 8], n);
}

/// Writes a little-endian IEEE-754 double.
pub fn write_f64(buf: &mut [u8], offset: usize, n: f64) {
    LittleEndian::write_f64(&mut buf[offset..offset + 8], n);
}

/// Copies raw bytes.
pub fn write_bytes(buf: &mut [u8], offset: usize, bytes: &[u8]) {
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
}

/// Writes a fixed-width text field, nul-filling after the text.
///
/// Text longer than the field is truncated to `width` bytes.
///
/// ```
/// use lasfile::field;
/// let mut buf = [1; 5];
/// field::write_text(&mut buf, 0, 5, "Beer");
/// assert_eq!([66, 101, 101, 114, 0], buf);
/// ```
pub fn write_text(buf: &mut [u8], offset: usize, width: usize, s: &str) {
    let bytes = s.as_bytes();
    if bytes.len() > width {
        warn!("truncating {s:?} to {width} bytes");
    }
    let n = bytes.len().min(width);
    let field = &mut buf[offset..offset + width];
    field[..n].copy_from_slice(&bytes[..n]);
    field[n..].fill(0);
}

/// Pads text with spaces out to its wire width, for display.
///
/// On the wire the padding is nul; when shown to a person it is rendered as spaces.
///
/// ```
/// use lasfile::field;
/// assert_eq!("LASF_Projection ", field::display_text("LASF_Projection", 16));
/// ```
pub fn display_text(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_little_endian() {
        let mut buf = vec![0; 8];
        write_u32(&mut buf, 0, 0x0102_0304);
        assert_eq!([4, 3, 2, 1], buf[0..4]);
        write_u16(&mut buf, 4, 0x0506);
        assert_eq!([6, 5], buf[4..6]);
        assert_eq!(0x0102_0304, read_u32(&buf, 0));
        assert_eq!(0x0506, read_u16(&buf, 4));
    }

    #[test]
    fn signed() {
        let mut buf = vec![0; 5];
        write_i32(&mut buf, 0, i32::MIN);
        write_i8(&mut buf, 4, -90);
        assert_eq!(i32::MIN, read_i32(&buf, 0));
        assert_eq!(-90, read_i8(&buf, 4));
        assert_eq!(166, read_u8(&buf, 4));
    }

    #[test]
    fn wide() {
        let mut buf = vec![0; 17];
        write_u64(&mut buf, 1, u64::MAX - 1);
        write_f64(&mut buf, 9, -0.125);
        assert_eq!(0, buf[0]);
        assert_eq!(u64::MAX - 1, read_u64(&buf, 1));
        assert_eq!(-0.125, read_f64(&buf, 9));
        assert_eq!([0, 0, 0, 0, 0, 0, 0xC0, 0xBF], buf[9..17]);
    }

    #[test]
    fn bytes() {
        let mut buf = vec![0; 6];
        write_bytes(&mut buf, 2, b"LASF");
        assert_eq!(*b"LASF", read_bytes::<4>(&buf, 2));
    }

    #[test]
    fn read_text_empty() {
        assert_eq!("", read_text(&[0; 4], 0, 4));
        assert_eq!("", read_text(&[], 0, 0));
    }

    #[test]
    fn read_text_full_width() {
        assert_eq!("LASF", read_text(b"xLASF", 1, 4));
    }

    #[test]
    fn read_text_unicode() {
        assert_eq!("\u{1f496}", read_text(&[240, 159, 146, 150], 0, 4));
    }

    #[test]
    fn write_text_fills_with_nul() {
        let mut buf = [b' '; 6];
        write_text(&mut buf, 1, 4, "B");
        assert_eq!([b' ', b'B', 0, 0, 0, b' '], buf);
    }

    #[test]
    fn write_text_truncates() {
        let mut buf = [0; 3];
        write_text(&mut buf, 0, 3, "Beer");
        assert_eq!(*b"Bee", buf);
    }

    #[test]
    fn display_pads_with_spaces() {
        assert_eq!("ab  ", display_text("ab", 4));
        assert_eq!("abcdef", display_text("abcdef", 4));
    }
}
