/// Running first and second moments of a pixel region.
///
/// Sums are kept in `f64`: full-resolution frames push `Σx²` past the point
/// where `f32` keeps enough digits for a stable covariance.
#[derive(Debug)]
pub(crate) struct RegionAccumulator {
    pub indices: Vec<usize>,
    pub sum_x: f64,
    pub sum_y: f64,
    pub sum_xx: f64,
    pub sum_yy: f64,
    pub sum_xy: f64,
}

/// Centroid and covariance of a region.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RegionMoments {
    pub cx: f64,
    pub cy: f64,
    pub cxx: f64,
    pub cyy: f64,
    pub cxy: f64,
}

impl RegionAccumulator {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            sum_x: 0.0,
            sum_y: 0.0,
            sum_xx: 0.0,
            sum_yy: 0.0,
            sum_xy: 0.0,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.indices.clear();
        self.sum_x = 0.0;
        self.sum_y = 0.0;
        self.sum_xx = 0.0;
        self.sum_yy = 0.0;
        self.sum_xy = 0.0;
    }

    pub(crate) fn push(&mut self, idx: usize, x: usize, y: usize) {
        self.indices.push(idx);
        let xf = x as f64;
        let yf = y as f64;
        self.sum_x += xf;
        self.sum_y += yf;
        self.sum_xx += xf * xf;
        self.sum_yy += yf * yf;
        self.sum_xy += xf * yf;
    }

    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    pub(crate) fn moments(&self) -> Option<RegionMoments> {
        if self.indices.is_empty() {
            return None;
        }
        let n = self.indices.len() as f64;
        let cx = self.sum_x / n;
        let cy = self.sum_y / n;
        Some(RegionMoments {
            cx,
            cy,
            cxx: self.sum_xx / n - cx * cx,
            cyy: self.sum_yy / n - cy * cy,
            cxy: self.sum_xy / n - cx * cy,
        })
    }
}
