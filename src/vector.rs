/// An xyz triple, used for scales, offsets, and bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector<T> {
    /// X
    pub x: T,
    /// Y
    pub y: T,
    /// Z
    pub z: T,
}

impl<T> Vector<T> {
    /// Creates a vector from its three components.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Vector;
    /// let scale = Vector::new(0.01, 0.01, 0.001);
    /// assert_eq!(0.001, scale.z);
    /// ```
    pub fn new(x: T, y: T, z: T) -> Vector<T> {
        Vector { x, y, z }
    }
}
