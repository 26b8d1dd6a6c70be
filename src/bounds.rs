/// Generic axis-aligned bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all the given points.
    ///
    /// An empty iterator yields the degenerate box at the origin.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a [f64; D]>,
    {
        let mut min = [f64::INFINITY; D];
        let mut max = [f64::NEG_INFINITY; D];
        let mut any = false;
        for p in points {
            any = true;
            for d in 0..D {
                if p[d] < min[d] { min[d] = p[d]; }
                if p[d] > max[d] { max[d] = p[d]; }
            }
        }
        if !any {
            return Self::new([0.0; D], [0.0; D]);
        }
        Self { min, max }
    }

    /// Length of the box along `axis`.
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Checks whether `point` lies at least `margin` inside every face of the box.
    pub fn contains_with_margin(&self, point: &[f64; D], margin: f64) -> bool {
        (0..D).all(|d| point[d] >= self.min[d] + margin && point[d] <= self.max[d] - margin)
    }
}

/// Which faces of a box are violated by some point, per axis as `(min side, max side)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sides<const D: usize> {
    pub lower: [bool; D],
    pub upper: [bool; D],
}

impl<const D: usize> Sides<D> {
    pub fn none() -> Self {
        Self { lower: [false; D], upper: [false; D] }
    }

    pub fn all() -> Self {
        Self { lower: [true; D], upper: [true; D] }
    }

    pub fn any(&self) -> bool {
        self.lower.iter().chain(self.upper.iter()).any(|&s| s)
    }

    /// Returns a copy of `bounds` pushed outwards by `amount` on each marked side.
    pub fn grow(&self, bounds: &BoundingBox<D>, amount: f64) -> BoundingBox<D> {
        let mut grown = *bounds;
        for d in 0..D {
            if self.lower[d] { grown.min[d] -= amount; }
            if self.upper[d] { grown.max[d] += amount; }
        }
        grown
    }
}
