use tabletop_assets::ImageData;
use wgpu::util::{DeviceExt, TextureDataOrder};

/// A texture together with the view shaders sample it through.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

/// Colour space the texels are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Colour maps authored in sRGB.
    Srgb,
    /// Data maps such as specular intensity.
    Linear,
}

impl ColorSpace {
    pub fn format(self) -> wgpu::TextureFormat {
        match self {
            ColorSpace::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            ColorSpace::Linear => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// Concatenate a full mip chain level by level, as wgpu expects for
/// `TextureDataOrder::LayerMajor` with a single layer.
pub fn mip_chain_bytes(image: &ImageData) -> (u32, Vec<u8>) {
    let levels = image.mip_chain();
    let count = levels.len() as u32;
    let bytes = levels.into_iter().flat_map(|l| l.pixels).collect();
    (count, bytes)
}

/// Upload a 2D texture with a full mip chain.
pub fn upload_2d(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &ImageData,
    space: ColorSpace,
) -> GpuTexture {
    let (mip_level_count, data) = mip_chain_bytes(image);
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: space.format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        &data,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    GpuTexture { texture, view }
}

/// Upload six equally sized faces (+X, -X, +Y, -Y, +Z, -Z) as a cube map.
pub fn upload_cubemap(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    faces: &[ImageData; 6],
) -> GpuTexture {
    let (width, height) = (faces[0].width, faces[0].height);
    let data: Vec<u8> = faces.iter().flat_map(|f| f.pixels.iter().copied()).collect();
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some("skybox_cubemap"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: ColorSpace::Srgb.format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        &data,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some("skybox_cubemap_view"),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        ..Default::default()
    });
    GpuTexture { texture, view }
}

/// Repeating trilinear sampler for material maps.
pub fn material_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("material_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

/// Edge-clamped linear sampler for the cube map.
pub fn sky_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("sky_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_bytes_cover_every_level() {
        let image = ImageData::solid_sized(4, 4, ImageData::WHITE);
        let (count, bytes) = mip_chain_bytes(&image);
        assert_eq!(count, 3);
        assert_eq!(bytes.len(), (16 + 4 + 1) * 4);
    }

    #[test]
    fn placeholder_is_single_level() {
        let (count, bytes) = mip_chain_bytes(&ImageData::solid(ImageData::BLACK));
        assert_eq!(count, 1);
        assert_eq!(bytes, vec![0, 0, 0, 255]);
    }

    #[test]
    fn colour_spaces_pick_formats() {
        assert!(ColorSpace::Srgb.format().is_srgb());
        assert!(!ColorSpace::Linear.format().is_srgb());
    }
}
