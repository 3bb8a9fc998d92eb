pub const POSITION_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const NORMAL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const ALBEDO_SPEC_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Colour formats in attachment order.
pub const COLOR_FORMATS: [wgpu::TextureFormat; 3] =
    [POSITION_FORMAT, NORMAL_FORMAT, ALBEDO_SPEC_FORMAT];

/// Texture sized to the surface, with a view for attachment and sampling.
pub struct Target {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl Target {
    fn new(
        device: &wgpu::Device,
        label: &str,
        size: wgpu::Extent3d,
        format: wgpu::TextureFormat,
        usage: wgpu::TextureUsages,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Depth buffer for the forward pass. It receives the G-buffer depth
    /// by copy, so it must be a copy destination.
    pub fn scene_depth(device: &wgpu::Device, width: u32, height: u32) -> Self {
        Self::new(
            device,
            "scene_depth",
            extent(width, height),
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_DST,
        )
    }
}

fn extent(width: u32, height: u32) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: width.max(1),
        height: height.max(1),
        depth_or_array_layers: 1,
    }
}

/// Geometry-pass render targets.
pub struct GBuffer {
    pub position: Target,
    pub normal: Target,
    pub albedo_spec: Target,
    pub depth: Target,
    size: wgpu::Extent3d,
}

impl GBuffer {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = extent(width, height);
        let color_usage =
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        Self {
            position: Target::new(device, "gbuffer_position", size, POSITION_FORMAT, color_usage),
            normal: Target::new(device, "gbuffer_normal", size, NORMAL_FORMAT, color_usage),
            albedo_spec: Target::new(
                device,
                "gbuffer_albedo_spec",
                size,
                ALBEDO_SPEC_FORMAT,
                color_usage,
            ),
            depth: Target::new(
                device,
                "gbuffer_depth",
                size,
                DEPTH_FORMAT,
                wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            ),
            size,
        }
    }

    pub fn size(&self) -> wgpu::Extent3d {
        self.size
    }

    /// Colour views in attachment order.
    pub fn color_views(&self) -> [&wgpu::TextureView; 3] {
        [&self.position.view, &self.normal.view, &self.albedo_spec.view]
    }

    /// Copy the whole depth buffer into `dst`, which must match in size
    /// and format.
    pub fn copy_depth_to(&self, encoder: &mut wgpu::CommandEncoder, dst: &wgpu::Texture) {
        encoder.copy_texture_to_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.depth.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyTextureInfo {
                texture: dst,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            self.size,
        );
    }

    /// Layout of the bind group the lighting pass reads the G-buffer through.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gbuffer_bind_group_layout"),
            entries: &[entry(0), entry(1), entry(2)],
        })
    }

    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
    ) -> wgpu::BindGroup {
        let [position, normal, albedo_spec] = self.color_views();
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gbuffer_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(position),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(normal),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(albedo_spec),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_surfaces_are_clamped() {
        let e = extent(0, 0);
        assert_eq!((e.width, e.height, e.depth_or_array_layers), (1, 1, 1));
    }

    #[test]
    fn position_and_normal_keep_float_precision() {
        assert_eq!(COLOR_FORMATS[0], wgpu::TextureFormat::Rgba16Float);
        assert_eq!(COLOR_FORMATS[1], wgpu::TextureFormat::Rgba16Float);
        assert_eq!(COLOR_FORMATS[2], wgpu::TextureFormat::Rgba8Unorm);
        assert!(DEPTH_FORMAT.has_depth_aspect());
    }
}
