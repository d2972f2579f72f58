use std::fmt;

const CLASS_CODE_MASK: u8 = 0b0001_1111;
const SYNTHETIC_MASK: u8 = 0b0010_0000;
const KEY_POINT_MASK: u8 = 0b0100_0000;
const WITHHELD_MASK: u8 = 0b1000_0000;

/// The classification byte of a point record.
///
/// | Bits | Field |
/// | ---- | ----- |
/// | 0-4 | class code |
/// | 5 | synthetic |
/// | 6 | key-point |
/// | 7 | withheld |
///
/// ```
/// use lasfile::point::ClassificationFlags;
/// let flags = ClassificationFlags::new(0b1000_1001);
/// assert_eq!(9, flags.class_code());
/// assert_eq!("Water", flags.class_name());
/// assert!(flags.withheld());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClassificationFlags(u8);

impl ClassificationFlags {
    /// Wraps a raw classification byte.
    pub fn new(byte: u8) -> ClassificationFlags {
        ClassificationFlags(byte)
    }

    /// The ASPRS class code, 0 through 31.
    pub fn class_code(&self) -> u8 {
        self.0 & CLASS_CODE_MASK
    }

    /// The name of this point's class.
    pub fn class_name(&self) -> &'static str {
        class_name(self.class_code())
    }

    /// True if this point was created by a technique other than lidar collection.
    pub fn synthetic(&self) -> bool {
        self.0 & SYNTHETIC_MASK != 0
    }

    /// True if this point is a model key-point and should not be thinned.
    pub fn key_point(&self) -> bool {
        self.0 & KEY_POINT_MASK != 0
    }

    /// True if this point should not be included in processing.
    pub fn withheld(&self) -> bool {
        self.0 & WITHHELD_MASK != 0
    }

    /// Sets the class code. Only the low five bits of `code` are kept.
    pub fn set_class_code(&mut self, code: u8) {
        self.0 = (self.0 & !CLASS_CODE_MASK) | (code & CLASS_CODE_MASK);
    }

    /// Sets the synthetic flag.
    pub fn set_synthetic(&mut self, flag: bool) {
        self.set(SYNTHETIC_MASK, flag);
    }

    /// Sets the key-point flag.
    pub fn set_key_point(&mut self, flag: bool) {
        self.set(KEY_POINT_MASK, flag);
    }

    /// Sets the withheld flag.
    pub fn set_withheld(&mut self, flag: bool) {
        self.set(WITHHELD_MASK, flag);
    }

    fn set(&mut self, mask: u8, flag: bool) {
        if flag {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }
}

impl From<u8> for ClassificationFlags {
    fn from(byte: u8) -> ClassificationFlags {
        ClassificationFlags(byte)
    }
}

impl From<ClassificationFlags> for u8 {
    fn from(flags: ClassificationFlags) -> u8 {
        flags.0
    }
}

impl fmt::Display for ClassificationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "class={} ({}), synthetic={}, key-point={}, withheld={}",
            self.class_code(),
            self.class_name(),
            self.synthetic(),
            self.key_point(),
            self.withheld()
        )
    }
}

/// Returns the ASPRS name of a class code.
///
/// # Examples
///
/// ```
/// use lasfile::point::class_name;
/// assert_eq!("Ground", class_name(2));
/// assert_eq!("Reserved", class_name(10));
/// ```
pub fn class_name(code: u8) -> &'static str {
    match code {
        0 => "Created, never classified",
        1 => "Unclassified",
        2 => "Ground",
        3 => "Low vegetation",
        4 => "Medium vegetation",
        5 => "High vegetation",
        6 => "Building",
        7 => "Low point (noise)",
        8 => "Model key-point (mass point)",
        9 => "Water",
        12 => "Overlap points",
        10..=31 => "Reserved",
        _ => "Unknown class",
    }
}
