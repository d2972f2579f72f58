use std::fmt;

const RETURN_NUMBER_MASK: u8 = 0b0000_0111;
const NUMBER_OF_RETURNS_MASK: u8 = 0b0011_1000;
const SCAN_DIRECTION_MASK: u8 = 0b0100_0000;
const EDGE_OF_FLIGHT_LINE_MASK: u8 = 0b1000_0000;

/// The return byte of a point record.
///
/// | Bits | Field |
/// | ---- | ----- |
/// | 0-2 | return number |
/// | 3-5 | number of returns |
/// | 6 | scan direction flag |
/// | 7 | edge of flight line |
///
/// The byte is the only storage; each accessor masks its own bits.
///
/// ```
/// use lasfile::point::ReturnInfo;
/// let mut info = ReturnInfo::new(0b1001_0010);
/// assert_eq!(2, info.return_number());
/// assert_eq!(2, info.number_of_returns());
/// assert!(info.edge_of_flight_line());
/// info.set_return_number(1);
/// assert_eq!(0b1001_0001, u8::from(info));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReturnInfo(u8);

impl ReturnInfo {
    /// Wraps a raw return byte.
    pub fn new(byte: u8) -> ReturnInfo {
        ReturnInfo(byte)
    }

    /// The return number of this point for its pulse, 0 through 7.
    pub fn return_number(&self) -> u8 {
        self.0 & RETURN_NUMBER_MASK
    }

    /// The number of returns for the pulse that produced this point, 0 through 7.
    pub fn number_of_returns(&self) -> u8 {
        (self.0 & NUMBER_OF_RETURNS_MASK) >> 3
    }

    /// The scan direction flag, true when the mirror was moving left to right.
    pub fn scan_direction_flag(&self) -> bool {
        self.0 & SCAN_DIRECTION_MASK != 0
    }

    /// True if this point is the last one on a scan line before it changes direction.
    pub fn edge_of_flight_line(&self) -> bool {
        self.0 & EDGE_OF_FLIGHT_LINE_MASK != 0
    }

    /// Sets the return number. Only the low three bits of `n` are kept.
    pub fn set_return_number(&mut self, n: u8) {
        self.0 = (self.0 & !RETURN_NUMBER_MASK) | (n & 0b111);
    }

    /// Sets the number of returns. Only the low three bits of `n` are kept.
    pub fn set_number_of_returns(&mut self, n: u8) {
        self.0 = (self.0 & !NUMBER_OF_RETURNS_MASK) | ((n & 0b111) << 3);
    }

    /// Sets the scan direction flag.
    pub fn set_scan_direction_flag(&mut self, flag: bool) {
        self.set(SCAN_DIRECTION_MASK, flag);
    }

    /// Sets the edge of flight line flag.
    pub fn set_edge_of_flight_line(&mut self, flag: bool) {
        self.set(EDGE_OF_FLIGHT_LINE_MASK, flag);
    }

    fn set(&mut self, mask: u8, flag: bool) {
        if flag {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }
}

impl From<u8> for ReturnInfo {
    fn from(byte: u8) -> ReturnInfo {
        ReturnInfo(byte)
    }
}

impl From<ReturnInfo> for u8 {
    fn from(info: ReturnInfo) -> u8 {
        info.0
    }
}

impl fmt::Display for ReturnInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "return={}, num. returns={}, scan direction={}, edge of flight line={}",
            self.return_number(),
            self.number_of_returns(),
            self.scan_direction_flag(),
            self.edge_of_flight_line()
        )
    }
}
