use glam::Vec3;
use std::collections::BTreeMap;
use std::num::NonZeroU64;
use tabletop_assets::{ImageData, SceneAssets};
use tabletop_common::TextureId;
use tabletop_render::{
    Draw, DrawItem, FrameInputs, FramePlan, Load, Pass, PassKind, RenderError, Shading,
};
use tabletop_scene::SceneObject;

use crate::gbuffer::{COLOR_FORMATS, GBuffer, Target};
use crate::mesh::{GpuMesh, Vertex, grass_quad, sky_layout, skybox_cube};
use crate::shaders;
use crate::state::{color_targets, depth_stencil_state, primitive_state};
use crate::texture::{
    ColorSpace, GpuTexture, material_sampler, sky_sampler, upload_2d, upload_cubemap,
};
use crate::uniforms::{GlobalsUniform, LightsUniform, ModelUniform, align_to, srgb_to_linear};

/// Model-matrix slots in the per-object uniform buffer.
const MAX_OBJECTS: usize = 16;

struct Pipelines {
    gbuffer: wgpu::RenderPipeline,
    resolve: wgpu::RenderPipeline,
    lit: wgpu::RenderPipeline,
    cutout: wgpu::RenderPipeline,
    sky: wgpu::RenderPipeline,
}

impl Pipelines {
    fn get(&self, shading: Shading) -> &wgpu::RenderPipeline {
        match shading {
            Shading::GBuffer => &self.gbuffer,
            Shading::DeferredResolve => &self.resolve,
            Shading::Lit => &self.lit,
            Shading::Cutout => &self.cutout,
            Shading::Sky => &self.sky,
        }
    }
}

struct Layouts {
    globals: wgpu::BindGroupLayout,
    model: wgpu::BindGroupLayout,
    material: wgpu::BindGroupLayout,
    gbuffer: wgpu::BindGroupLayout,
    sky: wgpu::BindGroupLayout,
}

impl Layouts {
    fn new(device: &wgpu::Device) -> Self {
        let uniform = |binding, visibility, dynamic: Option<u64>| wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: dynamic.is_some(),
                min_binding_size: dynamic.and_then(NonZeroU64::new),
            },
            count: None,
        };
        let texture = |binding, view_dimension| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension,
                multisampled: false,
            },
            count: None,
        };
        let sampler = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        };

        let globals = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[
                uniform(0, wgpu::ShaderStages::VERTEX_FRAGMENT, None),
                uniform(1, wgpu::ShaderStages::FRAGMENT, None),
            ],
        });
        let model = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("model_bind_group_layout"),
            entries: &[uniform(
                0,
                wgpu::ShaderStages::VERTEX,
                Some(std::mem::size_of::<ModelUniform>() as u64),
            )],
        });
        let material = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bind_group_layout"),
            entries: &[
                texture(0, wgpu::TextureViewDimension::D2),
                texture(1, wgpu::TextureViewDimension::D2),
                sampler(2),
            ],
        });
        let sky = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky_bind_group_layout"),
            entries: &[texture(0, wgpu::TextureViewDimension::Cube), sampler(1)],
        });

        Self {
            globals,
            model,
            material,
            gbuffer: GBuffer::bind_group_layout(device),
            sky,
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    shading: Shading,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    buffers: &[wgpu::VertexBufferLayout<'_>],
    formats: &[wgpu::TextureFormat],
) -> wgpu::RenderPipeline {
    let label = format!("{shading}_pipeline");
    let state = shading.state();
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(shaders::source(shading).into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&label),
        bind_group_layouts,
        push_constant_ranges: &[],
    });
    let targets = color_targets(formats, state);
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &targets,
        }),
        primitive: primitive_state(state.cull),
        depth_stencil: depth_stencil_state(state.depth),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

fn color_load(load: Option<Load>, clear: wgpu::Color) -> wgpu::LoadOp<wgpu::Color> {
    match load {
        Some(Load::Clear) => wgpu::LoadOp::Clear(clear),
        _ => wgpu::LoadOp::Load,
    }
}

fn depth_ops(load: Load) -> wgpu::Operations<f32> {
    wgpu::Operations {
        load: match load {
            Load::Clear => wgpu::LoadOp::Clear(1.0),
            Load::Keep => wgpu::LoadOp::Load,
        },
        store: wgpu::StoreOp::Store,
    }
}

/// Background colour as a clear value. An sRGB surface re-encodes on
/// write, so the picked colour is linearised first.
pub fn clear_value(color: Vec3, surface_is_srgb: bool) -> wgpu::Color {
    let c = if surface_is_srgb {
        Vec3::new(
            srgb_to_linear(color.x),
            srgb_to_linear(color.y),
            srgb_to_linear(color.z),
        )
    } else {
        color
    };
    wgpu::Color {
        r: c.x as f64,
        g: c.y as f64,
        b: c.z as f64,
        a: 1.0,
    }
}

/// wgpu backend that executes a [`FramePlan`] for the tabletop scene.
pub struct SceneRenderer {
    surface_format: wgpu::TextureFormat,
    layouts: Layouts,
    pipelines: Pipelines,
    globals_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    model_stride: u64,
    materials: BTreeMap<SceneObject, wgpu::BindGroup>,
    sky_bind_group: wgpu::BindGroup,
    gbuffer: GBuffer,
    gbuffer_bind_group: wgpu::BindGroup,
    scene_depth: Target,
    cube: GpuMesh,
    cup: Option<GpuMesh>,
    grass: GpuMesh,
    sky: GpuMesh,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        assets: &SceneAssets,
    ) -> Self {
        let layouts = Layouts::new(device);

        let mesh_layout = [&layouts.globals, &layouts.model, &layouts.material];
        let surface = [surface_format];
        let pipelines = Pipelines {
            gbuffer: create_pipeline(
                device,
                Shading::GBuffer,
                &mesh_layout,
                &[Vertex::layout()],
                &COLOR_FORMATS,
            ),
            resolve: create_pipeline(
                device,
                Shading::DeferredResolve,
                &[&layouts.globals, &layouts.gbuffer],
                &[],
                &surface,
            ),
            lit: create_pipeline(device, Shading::Lit, &mesh_layout, &[Vertex::layout()], &surface),
            cutout: create_pipeline(
                device,
                Shading::Cutout,
                &mesh_layout,
                &[Vertex::layout()],
                &surface,
            ),
            sky: create_pipeline(
                device,
                Shading::Sky,
                &[&layouts.globals, &layouts.sky],
                &[sky_layout()],
                &surface,
            ),
        };

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_buffer"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let lights_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lights_buffer"),
            size: std::mem::size_of::<LightsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &layouts.globals,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        let model_size = std::mem::size_of::<ModelUniform>() as u64;
        let model_stride = align_to(
            model_size,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let model_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("model_buffer"),
            size: model_stride * MAX_OBJECTS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("model_bind_group"),
            layout: &layouts.model,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &model_buffer,
                    offset: 0,
                    size: NonZeroU64::new(model_size),
                }),
            }],
        });

        let sampler = material_sampler(device);
        let textures: BTreeMap<TextureId, GpuTexture> = TextureId::ALL
            .into_iter()
            .map(|id| {
                let space = match id {
                    TextureId::CrateSpecular => ColorSpace::Linear,
                    _ => ColorSpace::Srgb,
                };
                let texture = upload_2d(device, queue, id.label(), &assets.texture(id), space);
                tracing::debug!(
                    texture = id.label(),
                    mips = texture.texture.mip_level_count(),
                    "texture uploaded"
                );
                (id, texture)
            })
            .collect();
        let no_specular = upload_2d(
            device,
            queue,
            "no_specular",
            &ImageData::solid(ImageData::BLACK),
            ColorSpace::Linear,
        );

        let materials = SceneObject::placed()
            .filter_map(|obj| {
                let material = obj.material()?;
                let diffuse = &textures.get(&material.diffuse)?.view;
                let specular = material
                    .specular
                    .and_then(|id| textures.get(&id))
                    .unwrap_or(&no_specular);
                let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{}_material", obj.name())),
                    layout: &layouts.material,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(diffuse),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(&specular.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::Sampler(&sampler),
                        },
                    ],
                });
                Some((obj, group))
            })
            .collect();

        let cubemap = upload_cubemap(device, queue, &assets.cubemap);
        let sky_sampler = sky_sampler(device);
        let sky_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky_bind_group"),
            layout: &layouts.sky,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&cubemap.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sky_sampler),
                },
            ],
        });

        let gbuffer = GBuffer::new(device, width, height);
        let gbuffer_bind_group = gbuffer.bind_group(device, &layouts.gbuffer);
        let scene_depth = Target::scene_depth(device, width, height);

        let cup = match &assets.cup_mesh {
            Some(mesh) => Some(GpuMesh::from_mesh_data(device, "cup_mesh", mesh)),
            None => {
                tracing::warn!("cup mesh unavailable, drawing a cube in its place");
                None
            }
        };

        tracing::info!(
            format = ?surface_format,
            width,
            height,
            model_stride,
            "scene renderer ready"
        );

        Self {
            surface_format,
            layouts,
            pipelines,
            globals_buffer,
            lights_buffer,
            globals_bind_group,
            model_buffer,
            model_bind_group,
            model_stride,
            materials,
            sky_bind_group,
            gbuffer,
            gbuffer_bind_group,
            scene_depth,
            cube: GpuMesh::cube(device),
            cup,
            grass: GpuMesh::upload(device, "grass_mesh", &grass_quad()),
            sky: GpuMesh::upload(device, "sky_mesh", &skybox_cube()),
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Recreate the size-dependent targets.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.gbuffer = GBuffer::new(device, width, height);
        self.gbuffer_bind_group = self.gbuffer.bind_group(device, &self.layouts.gbuffer);
        self.scene_depth = Target::scene_depth(device, width, height);
        let size = self.gbuffer.size();
        tracing::debug!(width = size.width, height = size.height, "render targets resized");
    }

    /// Encode and submit every pass of `plan` that targets the scene.
    /// The overlay pass is left to the caller, which owns the UI renderer.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        plan: &FramePlan,
        inputs: &FrameInputs,
    ) -> Result<(), RenderError> {
        plan.validate()?;
        self.write_uniforms(queue, inputs)?;

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });
        for pass in &plan.passes {
            self.encode_pass(&mut encoder, target, pass, inputs)?;
        }
        queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn write_uniforms(&self, queue: &wgpu::Queue, inputs: &FrameInputs) -> Result<(), RenderError> {
        if inputs.instances.len() > MAX_OBJECTS {
            return Err(RenderError::InvalidPlan(format!(
                "{} objects exceed {MAX_OBJECTS} model slots",
                inputs.instances.len()
            )));
        }
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&GlobalsUniform::from_inputs(inputs)),
        );
        queue.write_buffer(
            &self.lights_buffer,
            0,
            bytemuck::bytes_of(&LightsUniform::from_inputs(inputs)),
        );

        let stride = self.model_stride as usize;
        let mut slots = vec![0u8; stride * inputs.instances.len()];
        for (slot, instance) in slots.chunks_exact_mut(stride).zip(&inputs.instances) {
            let uniform = ModelUniform::from(instance);
            let bytes = bytemuck::bytes_of(&uniform);
            slot[..bytes.len()].copy_from_slice(bytes);
        }
        if !slots.is_empty() {
            queue.write_buffer(&self.model_buffer, 0, &slots);
        }
        Ok(())
    }

    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        pass: &Pass,
        inputs: &FrameInputs,
    ) -> Result<(), RenderError> {
        let label = pass.kind.as_str();
        let background = clear_value(inputs.clear_color, self.surface_format.is_srgb());

        let (color_attachments, depth_view) = match pass.kind {
            PassKind::DepthCopy => {
                self.gbuffer
                    .copy_depth_to(encoder, &self.scene_depth.texture);
                return Ok(());
            }
            // The UI renderer draws the overlay after the scene is submitted.
            PassKind::Overlay => return Ok(()),
            PassKind::Geometry => {
                let attachments: Vec<_> = self
                    .gbuffer
                    .color_views()
                    .into_iter()
                    .map(|view| {
                        Some(wgpu::RenderPassColorAttachment {
                            view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                // Zero alpha in the position target marks empty pixels.
                                load: color_load(pass.color, wgpu::Color::TRANSPARENT),
                                store: wgpu::StoreOp::Store,
                            },
                        })
                    })
                    .collect();
                (attachments, &self.gbuffer.depth.view)
            }
            PassKind::LightingResolve | PassKind::Forward => (
                vec![Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: color_load(pass.color, background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                &self.scene_depth.view,
            ),
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &color_attachments,
            depth_stencil_attachment: pass.depth.map(|load| {
                wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(depth_ops(load)),
                    stencil_ops: None,
                }
            }),
            ..Default::default()
        });

        for draw in &pass.draws {
            self.encode_draw(&mut rpass, draw, inputs)?;
        }
        Ok(())
    }

    fn encode_draw(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        draw: &Draw,
        inputs: &FrameInputs,
    ) -> Result<(), RenderError> {
        rpass.set_pipeline(self.pipelines.get(draw.shading));
        rpass.set_bind_group(0, &self.globals_bind_group, &[]);

        match draw.item {
            DrawItem::FullScreen => {
                rpass.set_bind_group(1, &self.gbuffer_bind_group, &[]);
                rpass.draw(0..3, 0..1);
            }
            DrawItem::Object(SceneObject::Skybox) => {
                rpass.set_bind_group(1, &self.sky_bind_group, &[]);
                self.sky.draw(rpass);
            }
            DrawItem::Object(obj) => {
                let missing = || RenderError::MissingGeometry(obj.name());
                let slot = inputs
                    .instances
                    .iter()
                    .position(|i| i.object == obj)
                    .ok_or_else(missing)?;
                let material = self.materials.get(&obj).ok_or_else(missing)?;
                let offset = (slot as u64 * self.model_stride) as u32;
                rpass.set_bind_group(1, &self.model_bind_group, &[offset]);
                rpass.set_bind_group(2, material, &[]);
                self.mesh_for(obj).draw(rpass);
            }
        }
        Ok(())
    }

    fn mesh_for(&self, obj: SceneObject) -> &GpuMesh {
        match obj {
            SceneObject::Cup => self.cup.as_ref().unwrap_or(&self.cube),
            SceneObject::Grass => &self.grass,
            SceneObject::Skybox => &self.sky,
            SceneObject::Platform | SceneObject::Leg(_) | SceneObject::Pot | SceneObject::Land => {
                &self.cube
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_value_linearises_for_srgb() {
        let c = clear_value(Vec3::new(0.5, 0.0, 1.0), true);
        assert!(c.r < 0.5 && c.r > 0.2);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 1.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn clear_value_passes_through_for_linear() {
        let c = clear_value(Vec3::new(0.5, 0.25, 0.0), false);
        assert_eq!((c.r, c.g, c.b), (0.5, 0.25, 0.0));
    }

    #[test]
    fn load_ops() {
        assert!(matches!(
            color_load(Some(Load::Clear), wgpu::Color::BLACK),
            wgpu::LoadOp::Clear(_)
        ));
        assert!(matches!(color_load(Some(Load::Keep), wgpu::Color::BLACK), wgpu::LoadOp::Load));
        assert!(matches!(depth_ops(Load::Clear).load, wgpu::LoadOp::Clear(v) if v == 1.0));
        assert!(matches!(depth_ops(Load::Keep).load, wgpu::LoadOp::Load));
    }

    #[test]
    fn model_slots_fit_every_placed_object() {
        assert!(SceneObject::placed().count() <= MAX_OBJECTS);
    }
}
