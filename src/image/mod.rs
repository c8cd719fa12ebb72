pub mod f32;
pub mod frame;
pub mod io;
pub mod resample;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::frame::{GrayFrame, RgbFrame};
pub use self::traits::{intensity_stats, ImageView, ImageViewMut, IntensityStats};
pub use self::u8::ImageU8;
