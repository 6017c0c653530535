use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::draw::DrawList;
use crate::render::{RenderCtx, RenderTarget};

const VERTICES_PER_FILL: u32 = 6;
const MIN_INSTANCE_CAPACITY: usize = 64;

/// Draws the solid fills of a [`DrawList`] with one instanced call.
///
/// GPU objects are created on first use and rebuilt if the surface format
/// changes. Fills are drawn over the target's existing contents.
#[derive(Default)]
pub struct FillRenderer {
    gpu: Option<FillGpu>,
    instances: Vec<FillInstance>,
}

impl FillRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &mut DrawList) {
        self.instances.clear();
        self.instances.extend(draw_list.iter_in_paint_order().map(|item| {
            let r = item.cmd.rect;
            FillInstance {
                origin: [r.origin.x, r.origin.y],
                size: [r.size.x, r.size.y],
                color: item.cmd.color.to_array(),
            }
        }));
        if self.instances.is_empty() {
            return;
        }

        let gpu = match self.gpu.take() {
            Some(gpu) if gpu.format == ctx.surface_format => gpu,
            _ => FillGpu::new(ctx.device, ctx.surface_format),
        };
        let gpu = self.gpu.insert(gpu);
        gpu.reserve(ctx.device, self.instances.len());

        let viewport = ViewportUniform {
            size: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            _pad: [0.0; 2],
        };
        ctx.queue.write_buffer(&gpu.viewport_ubo, 0, bytemuck::bytes_of(&viewport));
        ctx.queue.write_buffer(&gpu.instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("onyx fill pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&gpu.pipeline);
        pass.set_bind_group(0, &gpu.bind_group, &[]);
        pass.set_vertex_buffer(0, gpu.instance_vbo.slice(..));
        pass.draw(0..VERTICES_PER_FILL, 0..self.instances.len() as u32);
    }
}

/// Pipeline, uniform and instance storage for one surface format.
struct FillGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    viewport_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_vbo: wgpu::Buffer,
    capacity: usize,
}

impl FillGpu {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        log::debug!("building fill pipeline for {format:?}");

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("onyx fill shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/fill.wgsl").into()),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("onyx fill viewport layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(size_of::<ViewportUniform>() as u64),
                },
                count: None,
            }],
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("onyx fill viewport"),
            size: size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("onyx fill viewport binding"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("onyx fill pipeline layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("onyx fill pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[FillInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // Colors are premultiplied.
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            format,
            pipeline,
            viewport_ubo,
            bind_group,
            instance_vbo: Self::instance_buffer(device, MIN_INSTANCE_CAPACITY),
            capacity: MIN_INSTANCE_CAPACITY,
        }
    }

    fn instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("onyx fill instances"),
            size: (capacity * size_of::<FillInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Grows the instance buffer to the next power of two above `required`.
    fn reserve(&mut self, device: &wgpu::Device, required: usize) {
        if required <= self.capacity {
            return;
        }
        self.capacity = required.next_power_of_two();
        self.instance_vbo = Self::instance_buffer(device, self.capacity);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FillInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl FillInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<FillInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_matches_shader() {
        assert_eq!(size_of::<FillInstance>(), 32);
        assert_eq!(size_of::<ViewportUniform>(), 16);
        let offsets: Vec<u64> = FillInstance::ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8, 16]);
    }
}
