/// Read-only row access shared by the borrowed and owned image buffers.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}

/// First and second order intensity statistics of a single-channel image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntensityStats {
    pub mean: f32,
    pub std_dev: f32,
}

/// Mean and population standard deviation over every pixel of `image`.
///
/// Accumulates in `f64` so large 8-bit frames do not lose precision.
pub fn intensity_stats<I>(image: &I) -> IntensityStats
where
    I: ImageView,
    I::Pixel: Into<f64>,
{
    let n = (image.width() * image.height()) as f64;
    if n == 0.0 {
        return IntensityStats::default();
    }
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for y in 0..image.height() {
        for &px in image.row(y) {
            let v: f64 = px.into();
            sum += v;
            sum_sq += v * v;
        }
    }
    let mean = sum / n;
    let var = (sum_sq / n - mean * mean).max(0.0);
    IntensityStats {
        mean: mean as f32,
        std_dev: var.sqrt() as f32,
    }
}
