use std::fmt;

/// LAS version.
///
/// Files are decoded from any 1.x version that fits the header layout; they are always encoded
/// as 1.3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version.
    ///
    /// For now, always 1.
    pub major: u8,
    /// The minor version.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Version;
    /// let version = Version::new(1, 2);
    /// assert_eq!("1.2", version.to_string());
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// The number of per-return point counts stored in the header.
    ///
    /// Seven for versions after 1.3, five otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Version;
    /// assert_eq!(5, Version::new(1, 3).return_count_len());
    /// assert_eq!(7, Version::new(1, 4).return_count_len());
    /// ```
    pub fn return_count_len(&self) -> usize {
        if self.major == 1 && self.minor > 3 { 7 } else { 5 }
    }

    /// Does the header for this version carry a start-of-waveform-data offset?
    ///
    /// Only exactly 1.3 does, for the purposes of this codec.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Version;
    /// assert!(!Version::new(1, 2).has_waveform_start());
    /// assert!(Version::new(1, 3).has_waveform_start());
    /// assert!(!Version::new(1, 4).has_waveform_start());
    /// ```
    pub fn has_waveform_start(&self) -> bool {
        self.major == 1 && self.minor == 3
    }
}

impl Default for Version {
    fn default() -> Version {
        Version::new(1, 3)
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_count_len() {
        assert_eq!(5, Version::new(1, 0).return_count_len());
        assert_eq!(5, Version::new(1, 2).return_count_len());
        assert_eq!(5, Version::new(1, 3).return_count_len());
        assert_eq!(7, Version::new(1, 4).return_count_len());
    }

    #[test]
    fn has_waveform_start() {
        assert!(!Version::new(1, 0).has_waveform_start());
        assert!(!Version::new(1, 2).has_waveform_start());
        assert!(Version::new(1, 3).has_waveform_start());
        assert!(!Version::new(1, 4).has_waveform_start());
    }

    #[test]
    fn from_tuple() {
        assert_eq!(Version::new(1, 2), (1, 2).into());
    }

    #[test]
    fn ordering() {
        assert!(Version::new(1, 2) < Version::new(1, 3));
    }
}
