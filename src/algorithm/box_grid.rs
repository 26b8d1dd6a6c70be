use crate::algorithm::SpatialAlgorithm;
use crate::bounds::BoundingBox;
use crate::error::NodeGridError;

/// Upper limit on the number of boxes in one grid.
pub const MAX_GRID_BOXES: usize = 1 << 24;

/// A spatial index based on a uniform grid of boxes whose side equals the cut-off.
///
/// Two keys can only be within the cut-off of each other if their boxes touch,
/// so pair search only looks at each box and its immediate neighbors. The
/// neighbor relation is stored "half only": every unordered pair of adjacent
/// boxes is registered once, which keeps symmetric pairs from being reported twice.
pub struct BoxGrid<const D: usize> {
    /// Number of boxes along each axis.
    pub grid_res: [usize; D],
    /// Linear index stride of each axis.
    pub grid_strides: [usize; D],
    /// Scale factor from coordinate to box index (inverse of the cut-off).
    pub grid_scale: f64,
    /// Maximum valid (fractional) box index along each axis.
    pub grid_limit: [f64; D],
    /// The covered region, snapped to a whole number of boxes.
    pub bounds: BoundingBox<D>,
    /// Box side.
    pub cut_off: f64,
    /// The boxes, each holding the keys located inside it.
    pub grid_bins: Vec<Vec<usize>>,
    /// Offsets to the neighboring boxes that a box is responsible for.
    pub half_offsets: Vec<[isize; D]>,
}

impl<const D: usize> BoxGrid<D> {
    /// Creates a new `BoxGrid` with boxes of side `cut_off` covering `bounds`.
    ///
    /// Every axis has at least one box; the upper bounds are pushed out so
    /// that the boxes tile the region exactly. Fails when the grid would hold
    /// more than [`MAX_GRID_BOXES`] boxes.
    pub fn new(cut_off: f64, bounds: &BoundingBox<D>) -> Result<Self, NodeGridError> {
        let too_large = NodeGridError::GridTooLarge { limit: MAX_GRID_BOXES };
        let mut grid_res = [1usize; D];
        let mut grid_strides = [1usize; D];
        let mut grid_limit = [0.0; D];
        let mut snapped = *bounds;
        let mut total = 1usize;

        for d in 0..D {
            let boxes = (bounds.extent(d) / cut_off).ceil().max(1.0);
            if !boxes.is_finite() || boxes > MAX_GRID_BOXES as f64 {
                return Err(too_large);
            }
            let n = boxes as usize;
            grid_res[d] = n;
            grid_strides[d] = total;
            grid_limit[d] = (n as f64) - 1e-5;
            snapped.max[d] = bounds.min[d] + (n as f64) * cut_off;
            total = match total.checked_mul(n) {
                Some(t) if t <= MAX_GRID_BOXES => t,
                _ => return Err(too_large),
            };
        }

        Ok(BoxGrid {
            grid_res,
            grid_strides,
            grid_scale: 1.0 / cut_off,
            grid_limit,
            bounds: snapped,
            cut_off,
            grid_bins: vec![Vec::new(); total],
            half_offsets: half_offsets::<D>(),
        })
    }

    /// Box coordinates of a linear box index.
    pub fn box_coords(&self, box_index: usize) -> [usize; D] {
        let mut coords = [0usize; D];
        for d in 0..D {
            coords[d] = (box_index / self.grid_strides[d]) % self.grid_res[d];
        }
        coords
    }

    /// Linear index of the neighbor at `offset`, if it lies inside the grid.
    fn neighbor_index(&self, coords: &[usize; D], offset: &[isize; D]) -> Option<usize> {
        let mut index = 0;
        for d in 0..D {
            let c = coords[d] as isize + offset[d];
            if c < 0 || c >= self.grid_res[d] as isize {
                return None;
            }
            index += (c as usize) * self.grid_strides[d];
        }
        Some(index)
    }

    /// Linear indices of the boxes this box is responsible for pairing with.
    pub fn local_boxes(&self, box_index: usize) -> Vec<usize> {
        let coords = self.box_coords(box_index);
        self.half_offsets
            .iter()
            .filter_map(|o| self.neighbor_index(&coords, o))
            .collect()
    }
}

/// All offsets in `{-1, 0, 1}^D` whose first non-zero component is positive.
///
/// Together with an offset and its negation this covers every neighbor exactly once.
fn half_offsets<const D: usize>() -> Vec<[isize; D]> {
    let count = 3usize.pow(D as u32);
    let mut offsets = Vec::with_capacity(count / 2);
    for k in 0..count {
        let mut o = [0isize; D];
        let mut rem = k;
        for d in 0..D {
            o[d] = (rem % 3) as isize - 1;
            rem /= 3;
        }
        if let Some(&first) = o.iter().find(|&&c| c != 0) {
            if first > 0 {
                offsets.push(o);
            }
        }
    }
    offsets
}

impl<const D: usize> SpatialAlgorithm<D> for BoxGrid<D> {
    fn build(cut_off: f64, bounds: &BoundingBox<D>) -> Result<Self, NodeGridError> {
        BoxGrid::new(cut_off, bounds)
    }

    fn domain_bounds(&self) -> &BoundingBox<D> {
        &self.bounds
    }

    fn cut_off(&self) -> f64 {
        self.cut_off
    }

    fn num_boxes(&self) -> usize {
        self.grid_bins.len()
    }

    fn containing_box(&self, location: &[f64; D]) -> usize {
        let mut index = 0;
        for d in 0..D {
            let i = ((location[d] - self.bounds.min[d]) * self.grid_scale).clamp(0.0, self.grid_limit[d]) as usize;
            index += i * self.grid_strides[d];
        }
        index
    }

    fn add_to_box(&mut self, box_index: usize, key: usize) {
        self.grid_bins[box_index].push(key);
    }

    fn box_contents(&self, box_index: usize) -> &[usize] {
        &self.grid_bins[box_index]
    }

    fn empty_boxes(&mut self) {
        self.grid_bins.iter_mut().for_each(|bin| bin.clear());
    }

    fn visit_pairs<L, F>(&self, location_of: L, mut visitor: F)
    where
        L: Fn(usize) -> [f64; D],
        F: FnMut(usize, usize),
    {
        let cut_off_sq = self.cut_off * self.cut_off;
        let within = |a: &[f64; D], b: &[f64; D]| {
            let d2: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
            d2 <= cut_off_sq
        };

        for (box_index, bin) in self.grid_bins.iter().enumerate() {
            if bin.is_empty() {
                continue;
            }
            let locations: Vec<[f64; D]> = bin.iter().map(|&k| location_of(k)).collect();

            // Pairs inside the box itself.
            for i in 0..bin.len() {
                for j in (i + 1)..bin.len() {
                    if within(&locations[i], &locations[j]) {
                        visitor(bin[i], bin[j]);
                    }
                }
            }

            for other in self.local_boxes(box_index) {
                let other_bin = &self.grid_bins[other];
                for &k in other_bin {
                    let pos = location_of(k);
                    for (i, &key) in bin.iter().enumerate() {
                        if within(&locations[i], &pos) {
                            visitor(key, k);
                        }
                    }
                }
            }
        }
    }
}
