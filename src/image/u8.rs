/// Borrowed 8-bit grayscale view with an explicit row stride.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Sub-view covering rows `top..self.h`. Columns are unchanged.
    pub fn rows_from(&self, top: usize) -> ImageU8<'a> {
        let top = top.min(self.h);
        let start = (top * self.stride).min(self.data.len());
        ImageU8 {
            w: self.w,
            h: self.h - top,
            stride: self.stride,
            data: &self.data[start..],
        }
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
