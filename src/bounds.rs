use crate::{PointData, Vector};

/// Per-axis minimum and maximum of a set of points, in real coordinates.
///
/// The default is the empty sentinel: every minimum is `+INFINITY` and every maximum is
/// `-INFINITY`, so that the first point grown into it becomes both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// The minimum values.
    pub min: Vector<f64>,

    /// The maximum values.
    pub max: Vector<f64>,
}

impl Bounds {
    /// Grows the bounds to encompass this point in xyz space.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Bounds, PointData};
    /// let point = PointData { x: 1., y: 2., z: 3., ..Default::default() };
    /// let mut bounds = Bounds::default();
    /// bounds.grow(&point);
    /// assert_eq!(1., bounds.min.x);
    /// assert_eq!(3., bounds.max.z);
    /// ```
    pub fn grow(&mut self, point: &PointData) {
        self.grow_xyz(point.x, point.y, point.z);
    }

    /// Grows the bounds to encompass a bare coordinate.
    pub fn grow_xyz(&mut self, x: f64, y: f64, z: f64) {
        self.min.x = self.min.x.min(x);
        self.min.y = self.min.y.min(y);
        self.min.z = self.min.z.min(z);
        self.max.x = self.max.x.max(x);
        self.max.y = self.max.y.max(y);
        self.max.z = self.max.z.max(z);
    }

    /// Returns true if nothing has been grown into these bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Bounds;
    /// let mut bounds = Bounds::default();
    /// assert!(bounds.is_empty());
    /// bounds.grow_xyz(0., 0., 0.);
    /// assert!(!bounds.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds {
            min: Vector {
                x: f64::INFINITY,
                y: f64::INFINITY,
                z: f64::INFINITY,
            },
            max: Vector {
                x: f64::NEG_INFINITY,
                y: f64::NEG_INFINITY,
                z: f64::NEG_INFINITY,
            },
        }
    }
}
