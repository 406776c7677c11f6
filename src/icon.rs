//! Image types flowing through the asset pipelines.
//!
//! A pipeline consumes and produces [`ImageCollection`]s: lazy, single-pass
//! sequences of [`NamedImage`]s, where the name is the output filename.

use image::RgbaImage;

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A square size, `side` x `side`.
    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// The dimensions of an existing image.
    pub fn of(image: &RgbaImage) -> Self {
        Self::new(image.width(), image.height())
    }
}

/// A decoded image paired with the filename it will be written under.
///
/// Names are unique within one pipeline run; collection order is write order.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedImage {
    /// Output filename, e.g. `os_linux.png`.
    pub name: String,

    /// The pixel data in RGBA format.
    pub image: RgbaImage,
}

impl NamedImage {
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::of(&self.image)
    }

    /// Replaces the image, keeping the name.
    pub fn map_image(self, f: impl FnOnce(RgbaImage) -> RgbaImage) -> Self {
        Self {
            name: self.name,
            image: f(self.image),
        }
    }
}

/// A lazy, finite, non-restartable sequence of named images.
///
/// Each element is produced on demand; iterating it to the end exhausts it.
pub type ImageCollection = Box<dyn Iterator<Item = NamedImage>>;

/// Wraps any iterator of named images into an [`ImageCollection`].
pub fn collection<I>(images: I) -> ImageCollection
where
    I: IntoIterator<Item = NamedImage>,
    I::IntoIter: 'static,
{
    Box::new(images.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_image_keeps_name() {
        let named = NamedImage::new("os_arch.png", RgbaImage::new(4, 4));
        let mapped = named.map_image(|_| RgbaImage::new(8, 2));
        assert_eq!(mapped.name, "os_arch.png");
        assert_eq!(mapped.dimensions(), SizePx::new(8, 2));
    }

    #[test]
    fn collection_is_single_pass() {
        let mut images = collection(vec![
            NamedImage::new("a.png", RgbaImage::new(1, 1)),
            NamedImage::new("b.png", RgbaImage::new(1, 1)),
        ]);
        assert_eq!(images.next().map(|n| n.name), Some("a.png".to_string()));
        assert_eq!(images.next().map(|n| n.name), Some("b.png".to_string()));
        assert!(images.next().is_none());
    }
}
