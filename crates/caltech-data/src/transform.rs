// Transform: preprocessing applied to samples and targets on retrieval

use image::imageops::{self, FilterType};
use image::RgbImage;

/// A transform applied to each sample (or target) as it is read.
///
/// Transforms take their input by value and return a new value; they never
/// see or change the dataset's stored copy. Any `Fn(I) -> O + Send + Sync`
/// closure is a transform.
pub trait Transform<I>: Send + Sync {
    type Output;

    /// Apply the transform, returning the transformed value.
    fn apply(&self, input: I) -> Self::Output;
}

impl<I, O, F> Transform<I> for F
where
    F: Fn(I) -> O + Send + Sync,
{
    type Output = O;

    fn apply(&self, input: I) -> O {
        self(input)
    }
}

/// Chaining for any transform.
pub trait TransformExt<I>: Transform<I> + Sized {
    /// Run `self`, then feed its output to `next`.
    fn then<B>(self, next: B) -> Then<Self, B>
    where
        B: Transform<Self::Output>,
    {
        Then { first: self, second: next }
    }
}

impl<I, T: Transform<I>> TransformExt<I> for T {}

/// Returns its input unchanged. The default when no transform is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<I> Transform<I> for Identity {
    type Output = I;

    fn apply(&self, input: I) -> I {
        input
    }
}

/// Two transforms run in sequence. Built with [`TransformExt::then`].
#[derive(Debug, Clone)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<I, A, B> Transform<I> for Then<A, B>
where
    A: Transform<I>,
    B: Transform<A::Output>,
{
    type Output = B::Output;

    fn apply(&self, input: I) -> Self::Output {
        self.second.apply(self.first.apply(input))
    }
}

// Image transforms

/// Resize to exactly (width, height), ignoring aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct Resize {
    pub width: u32,
    pub height: u32,
    pub filter: FilterType,
}

impl Resize {
    /// Resize with the Lanczos3 filter.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            filter: FilterType::Lanczos3,
        }
    }

    pub fn filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

impl Transform<RgbImage> for Resize {
    type Output = RgbImage;

    fn apply(&self, img: RgbImage) -> RgbImage {
        if img.dimensions() == (self.width, self.height) {
            return img;
        }
        imageops::resize(&img, self.width, self.height, self.filter)
    }
}

/// Crop the central (width, height) region. Images smaller than the
/// crop along an axis keep their full extent on that axis.
#[derive(Debug, Clone, Copy)]
pub struct CenterCrop {
    pub width: u32,
    pub height: u32,
}

impl CenterCrop {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Transform<RgbImage> for CenterCrop {
    type Output = RgbImage;

    fn apply(&self, img: RgbImage) -> RgbImage {
        let (w, h) = img.dimensions();
        let cw = self.width.min(w);
        let ch = self.height.min(h);
        let x = (w - cw) / 2;
        let y = (h - ch) / 2;
        imageops::crop_imm(&img, x, y, cw, ch).to_image()
    }
}

/// Planar float image: `[C, H, W]` layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    pub data: Vec<f32>,
    pub shape: [usize; 3],
}

impl ImageTensor {
    pub fn channels(&self) -> usize {
        self.shape[0]
    }

    pub fn height(&self) -> usize {
        self.shape[1]
    }

    pub fn width(&self) -> usize {
        self.shape[2]
    }

    /// The `c`-th channel plane.
    pub fn channel(&self, c: usize) -> &[f32] {
        let plane = self.height() * self.width();
        &self.data[c * plane..(c + 1) * plane]
    }
}

/// Convert an RGB image to an [`ImageTensor`] with values in [0, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct ToTensor;

impl Transform<RgbImage> for ToTensor {
    type Output = ImageTensor;

    fn apply(&self, img: RgbImage) -> ImageTensor {
        let (w, h) = img.dimensions();
        let raw = img.as_raw();
        // [H, W, C] interleaved -> [C, H, W] planar
        let npix = (w * h) as usize;
        let mut data = vec![0.0f32; 3 * npix];
        for i in 0..npix {
            data[i] = raw[i * 3] as f32 / 255.0;
            data[npix + i] = raw[i * 3 + 1] as f32 / 255.0;
            data[2 * npix + i] = raw[i * 3 + 2] as f32 / 255.0;
        }
        ImageTensor {
            data,
            shape: [3, h as usize, w as usize],
        }
    }
}

/// Per-channel standardization: `(x - mean[c]) / std[c]`.
#[derive(Debug, Clone, Copy)]
pub struct Normalize {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Normalize {
    pub fn new(mean: [f32; 3], std: [f32; 3]) -> Self {
        Self { mean, std }
    }

    /// ImageNet channel statistics, for backbones pretrained on ImageNet.
    pub fn imagenet() -> Self {
        Self::new([0.485, 0.456, 0.406], [0.229, 0.224, 0.225])
    }
}

impl Transform<ImageTensor> for Normalize {
    type Output = ImageTensor;

    fn apply(&self, mut t: ImageTensor) -> ImageTensor {
        let plane = t.height() * t.width();
        for (c, chunk) in t.data.chunks_mut(plane.max(1)).enumerate().take(3) {
            for v in chunk {
                *v = (*v - self.mean[c]) / self.std[c];
            }
        }
        t
    }
}

// Target transforms

/// One-hot encode a class id into a vector of size `num_classes`.
///
/// Ids outside `0..num_classes` encode as all zeros.
#[derive(Debug, Clone, Copy)]
pub struct OneHot {
    pub num_classes: usize,
}

impl OneHot {
    pub fn new(num_classes: usize) -> Self {
        Self { num_classes }
    }
}

impl Transform<usize> for OneHot {
    type Output = Vec<f32>;

    fn apply(&self, class_idx: usize) -> Vec<f32> {
        let mut one_hot = vec![0.0; self.num_classes];
        if class_idx < self.num_classes {
            one_hot[class_idx] = 1.0;
        }
        one_hot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checker(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 0, 51])
            } else {
                Rgb([0, 255, 102])
            }
        })
    }

    #[test]
    fn identity_and_closure() {
        assert_eq!(Identity.apply(7usize), 7);
        let double = |x: usize| x * 2;
        assert_eq!(double.apply(4), 8);
    }

    #[test]
    fn then_composes_in_order() {
        let t = (|x: usize| x + 1).then(|x: usize| x * 10);
        assert_eq!(t.apply(2), 30);
    }

    #[test]
    fn resize_exact() {
        let out = Resize::new(4, 3).apply(checker(10, 8));
        assert_eq!(out.dimensions(), (4, 3));
    }

    #[test]
    fn center_crop_clamps() {
        let img = RgbImage::from_fn(6, 4, |x, _| Rgb([x as u8, 0, 0]));
        let out = CenterCrop::new(2, 10).apply(img);
        assert_eq!(out.dimensions(), (2, 4));
        assert_eq!(out.get_pixel(0, 0).0[0], 2);
    }

    #[test]
    fn to_tensor_is_planar() {
        let t = ToTensor.apply(checker(2, 1));
        assert_eq!(t.shape, [3, 1, 2]);
        assert_eq!(t.channel(0).to_vec(), vec![1.0f32, 0.0]);
        assert_eq!(t.channel(1).to_vec(), vec![0.0f32, 1.0]);
        assert!((t.channel(2)[0] - 0.2).abs() < 1e-6);
        assert!((t.channel(2)[1] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn normalize_per_channel() {
        let t = ImageTensor {
            data: vec![0.5, 0.5, 1.0, 1.0, 0.0, 0.0],
            shape: [3, 1, 2],
        };
        let out = Normalize::new([0.5, 0.0, 0.5], [1.0, 2.0, 0.5]).apply(t);
        assert_eq!(out.data, vec![0.0f32, 0.0, 0.5, 0.5, -1.0, -1.0]);
    }

    #[test]
    fn pipeline_resize_tensor_normalize() {
        let pipeline = Resize::new(4, 4).then(ToTensor).then(Normalize::imagenet());
        let out = pipeline.apply(checker(8, 8));
        assert_eq!(out.shape, [3, 4, 4]);
        assert_eq!(out.data.len(), 48);
    }

    #[test]
    fn one_hot() {
        let enc = OneHot::new(4);
        assert_eq!(enc.apply(2), vec![0.0f32, 0.0, 1.0, 0.0]);
        assert_eq!(enc.apply(9), vec![0.0f32; 4]);
    }
}
