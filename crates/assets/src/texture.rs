use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};

use crate::AssetError;
use crate::manifest::TextureSource;

/// Decoded image, always stored as tightly packed RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Channel count of the file before conversion to RGBA.
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl ImageData {
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];
    pub const BLACK: [u8; 4] = [0, 0, 0, 255];

    /// 1x1 image of a single colour.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self::solid_sized(1, 1, rgba)
    }

    pub fn solid_sized(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let texels = (width.max(1) * height.max(1)) as usize;
        Self {
            width: width.max(1),
            height: height.max(1),
            channels: 4,
            pixels: rgba.repeat(texels),
        }
    }

    fn from_rgba(img: RgbaImage, channels: u8) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            channels,
            pixels: img.into_raw(),
        }
    }

    fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Number of levels in a full mip chain for this size.
    pub fn mip_level_count(&self) -> u32 {
        32 - self.width.max(self.height).max(1).leading_zeros()
    }

    /// This image followed by successively halved levels down to 1x1.
    pub fn mip_chain(&self) -> Vec<ImageData> {
        let mut levels = vec![self.clone()];
        let Some(mut current) = self.to_rgba_image() else {
            return levels;
        };
        while current.width() > 1 || current.height() > 1 {
            let w = (current.width() / 2).max(1);
            let h = (current.height() / 2).max(1);
            current = imageops::resize(&current, w, h, FilterType::Triangle);
            levels.push(Self::from_rgba(current.clone(), self.channels));
        }
        levels
    }

    /// Resample to exactly `width` x `height`.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        match self.to_rgba_image() {
            Some(img) => Self::from_rgba(
                imageops::resize(&img, width, height, FilterType::Triangle),
                self.channels,
            ),
            None => Self::solid_sized(width, height, Self::BLACK),
        }
    }
}

/// Decode `path` to RGBA8, optionally flipping rows.
pub fn load_image(path: impl AsRef<Path>, flip_vertically: bool) -> Result<ImageData, AssetError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let channels = img.color().channel_count();
    let img: DynamicImage = if flip_vertically { img.flipv() } else { img };
    Ok(ImageData::from_rgba(img.to_rgba8(), channels))
}

/// Load a manifest texture, substituting a 1x1 `fallback` on failure.
pub fn load_texture_or_placeholder(source: &TextureSource, fallback: [u8; 4]) -> ImageData {
    match load_image(&source.path, source.flip_vertically) {
        Ok(image) => {
            tracing::debug!(
                texture = source.id.label(),
                width = image.width,
                height = image.height,
                "texture loaded"
            );
            image
        }
        Err(e) => {
            tracing::warn!(texture = source.id.label(), "{e}; using placeholder");
            ImageData::solid(fallback)
        }
    }
}

/// Load six cube-map faces. Faces are not flipped.
///
/// Every face is brought to the size of the first face that loads; faces
/// that fail are filled with black.
pub fn load_cubemap(faces: &[PathBuf; 6]) -> [ImageData; 6] {
    let loaded: Vec<Option<ImageData>> = faces
        .iter()
        .map(|path| match load_image(path, false) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("cube map face: {e}");
                None
            }
        })
        .collect();

    let (width, height) = loaded
        .iter()
        .flatten()
        .map(|img| (img.width, img.height))
        .next()
        .unwrap_or((1, 1));

    let mut faces_out = loaded.into_iter().map(|face| match face {
        Some(img) if img.width == width && img.height == height => img,
        Some(img) => {
            tracing::warn!(
                "cube map face is {}x{}, resizing to {width}x{height}",
                img.width,
                img.height
            );
            img.resized(width, height)
        }
        None => ImageData::solid_sized(width, height, ImageData::BLACK),
    });
    std::array::from_fn(|_| {
        faces_out
            .next()
            .unwrap_or_else(|| ImageData::solid_sized(width, height, ImageData::BLACK))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tabletop_common::TextureId;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_fn(width, height, |_, y| {
            if y == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        img.save(path).unwrap();
    }

    #[test]
    fn solid_placeholder() {
        let img = ImageData::solid(ImageData::WHITE);
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(img.pixels, vec![255, 255, 255, 255]);
    }

    #[test]
    fn mip_chain_halves_to_one() {
        let img = ImageData::solid_sized(8, 2, ImageData::BLACK);
        let chain = img.mip_chain();
        let sizes: Vec<_> = chain.iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        assert_eq!(chain.len() as u32, img.mip_level_count());
        for level in &chain {
            assert_eq!(level.pixels.len(), (level.width * level.height * 4) as usize);
        }
    }

    #[test]
    fn load_flips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stripe.png");
        write_png(&path, 2, 3);

        let upright = load_image(&path, false).unwrap();
        assert_eq!(&upright.pixels[..4], &[255, 0, 0, 255]);

        let flipped = load_image(&path, true).unwrap();
        assert_eq!(&flipped.pixels[..4], &[0, 0, 255, 255]);
        let last_row = ((flipped.height - 1) * flipped.width * 4) as usize;
        assert_eq!(&flipped.pixels[last_row..last_row + 4], &[255, 0, 0, 255]);
    }

    #[test]
    fn missing_texture_uses_placeholder() {
        let source = TextureSource {
            id: TextureId::CrateSpecular,
            path: PathBuf::from("/nonexistent/specular.jpg"),
            flip_vertically: true,
        };
        let img = load_texture_or_placeholder(&source, ImageData::BLACK);
        assert_eq!(img, ImageData::solid(ImageData::BLACK));
    }

    #[test]
    fn cubemap_fills_missing_faces() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        write_png(&good, 4, 4);
        let missing = dir.path().join("missing.png");

        let faces = [
            missing.clone(),
            good.clone(),
            missing.clone(),
            good.clone(),
            missing.clone(),
            missing,
        ];
        let cube = load_cubemap(&faces);
        for face in &cube {
            assert_eq!((face.width, face.height), (4, 4));
        }
        assert_eq!(&cube[0].pixels[..4], &ImageData::BLACK);
        assert_eq!(&cube[1].pixels[..4], &[255, 0, 0, 255]);
    }
}
