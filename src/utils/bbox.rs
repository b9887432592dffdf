use nalgebra::Point2;

/// Integer pixel centroid of a bounding box
pub type Centroid = Point2<i32>;

/// Bounding box in the format (x, y, width, height) where (x, y) is the left-top corner
///
#[derive(Clone, Default, Debug, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    _x: i32,
    _y: i32,
    _width: i32,
    _height: i32,
}

impl BoundingBox {
    /// Constructor
    ///
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            _x: x,
            _y: y,
            _width: width,
            _height: height,
        }
    }

    pub fn x(&self) -> i32 {
        self._x
    }

    pub fn y(&self) -> i32 {
        self._y
    }

    pub fn width(&self) -> i32 {
        self._width
    }

    pub fn height(&self) -> i32 {
        self._height
    }

    /// Center of the box, rounded down to the pixel grid
    ///
    pub fn centroid(&self) -> Centroid {
        Centroid::new(
            (self._x + self._x + self._width).div_euclid(2),
            (self._y + self._y + self._height).div_euclid(2),
        )
    }

    pub fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self._x, self._y, self._width, self._height)
    }
}

impl From<(i32, i32, i32, i32)> for BoundingBox {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from(v: [i32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<&BoundingBox> for [i32; 4] {
    fn from(b: &BoundingBox) -> Self {
        [b._x, b._y, b._width, b._height]
    }
}

/// Euclidean distance between two centroids
///
pub fn centroid_distance(c1: &Centroid, c2: &Centroid) -> f32 {
    (c1 - c2).cast::<f32>().norm()
}

#[cfg(test)]
mod tests {
    use crate::utils::bbox::{centroid_distance, BoundingBox, Centroid};

    #[test]
    fn centroid_rounds_down() {
        let bb = BoundingBox::new(10, 20, 5, 7);
        assert_eq!(bb.centroid(), Centroid::new(12, 23));

        let bb = BoundingBox::new(-3, -3, 2, 1);
        assert_eq!(bb.centroid(), Centroid::new(-2, -3));
    }

    #[test]
    fn conversions() {
        let bb = BoundingBox::from((1, 2, 3, 4));
        assert_eq!(bb, BoundingBox::from([1, 2, 3, 4]));
        assert_eq!(<[i32; 4]>::from(&bb), [1, 2, 3, 4]);
        assert_eq!(bb.as_tuple(), (1, 2, 3, 4));
    }

    #[test]
    fn distance() {
        let d = centroid_distance(&Centroid::new(0, 0), &Centroid::new(3, 4));
        assert!((d - 5.0).abs() < 1e-6);
    }
}
