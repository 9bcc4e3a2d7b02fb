use super::helpers::{self, DynamicBuffer, DEPTH_FORMAT};
use crate::core::mesh::{build_mesh, MeshKey};
use crate::core::{MeshInstance, OrbitCamera, Primitive};
use fnv::FnvHashMap;
use glam::Vec3;
use std::ops::Range;
use wgpu;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
    /// xyz: camera right, w: particle edge length in world units.
    right_size: [f32; 4],
    /// xyz: camera up, w: particle opacity.
    up_opacity: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshInstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ParticleRaw {
    position: [f32; 3],
    color: [f32; 3],
}

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

struct Batch {
    key: MeshKey,
    instances: Range<u32>,
    translucent: bool,
}

/// Particle billboards plus instanced flat-color meshes, drawn into the HDR target.
pub(crate) struct ScenePass {
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_pipeline: wgpu::RenderPipeline,
    /// Same as `mesh_pipeline` without depth writes, so particles behind
    /// a translucent mesh still pass the depth test.
    translucent_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    meshes: FnvHashMap<MeshKey, GpuMesh>,
    mesh_instances: DynamicBuffer,
    particles: DynamicBuffer,
    particle_count: u32,
    batches: Vec<Batch>,
    scratch: Vec<MeshInstanceRaw>,
    particle_scratch: Vec<ParticleRaw>,
    // Per-frame grouping; cleared, never freed.
    groups: FnvHashMap<MeshKey, Vec<MeshInstanceRaw>>,
    group_order: Vec<MeshKey>,
    translucent: Vec<(MeshKey, MeshInstanceRaw)>,
}

fn depth_state(write: bool) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

impl ScenePass {
    pub(crate) fn new(device: &wgpu::Device, hdr_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let camera_buffer = helpers::uniform_buffer(
            device,
            "camera_uniforms",
            std::mem::size_of::<CameraUniforms>() as u64,
        );
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshInstanceRaw>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    1 => Float32x4, 2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4
                ],
            },
        ];
        let mesh_pipeline_for = |label: &str, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_mesh"),
                    buffers: &mesh_buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                // Flat shapes (the star) are seen from both sides.
                primitive: wgpu::PrimitiveState {
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(depth_state(depth_write)),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_mesh"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: hdr_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };
        let mesh_pipeline = mesh_pipeline_for("mesh_pipeline", true);
        let translucent_pipeline = mesh_pipeline_for("translucent_mesh_pipeline", false);

        let particle_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
        }];
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &particle_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(depth_state(false)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: hdr_format,
                    blend: Some(ADDITIVE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Self {
            camera_buffer,
            camera_bind_group,
            mesh_pipeline,
            translucent_pipeline,
            particle_pipeline,
            meshes: FnvHashMap::default(),
            mesh_instances: DynamicBuffer::new(device, "mesh_instances", 64 * 1024),
            particles: DynamicBuffer::new(device, "particles", 256 * 1024),
            particle_count: 0,
            batches: Vec::new(),
            scratch: Vec::new(),
            particle_scratch: Vec::new(),
            groups: FnvHashMap::default(),
            group_order: Vec::new(),
            translucent: Vec::new(),
        }
    }

    fn ensure_mesh(&mut self, device: &wgpu::Device, key: MeshKey, primitive: &Primitive) {
        self.meshes.entry(key).or_insert_with(|| {
            let data = build_mesh(primitive);
            let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vertices"),
                contents: bytemuck::cast_slice(&data.positions),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_indices"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            GpuMesh {
                vertices,
                indices,
                index_count: data.indices.len() as u32,
            }
        });
    }

    /// Upload this frame's camera, particles and mesh instances.
    ///
    /// Opaque instances sharing a primitive are drawn as one batch;
    /// translucent instances keep their order and are drawn last.
    pub(crate) fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &OrbitCamera,
        aspect: f32,
        particle_size: f32,
        particle_opacity: f32,
        particles: (&[Vec3], &[[f32; 3]]),
        meshes: &[MeshInstance],
    ) {
        let eye = camera.eye();
        let forward = (camera.target - eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let uniforms = CameraUniforms {
            view_proj: camera.view_proj(aspect).to_cols_array_2d(),
            right_size: right.extend(particle_size).to_array(),
            up_opacity: up.extend(particle_opacity).to_array(),
        };
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniforms));

        let (positions, colors) = particles;
        self.particle_scratch.clear();
        self.particle_scratch
            .extend(positions.iter().zip(colors).map(|(p, c)| ParticleRaw {
                position: p.to_array(),
                color: *c,
            }));
        self.particles
            .write(device, queue, bytemuck::cast_slice(&self.particle_scratch));
        self.particle_count = self.particle_scratch.len() as u32;

        // Group opaque instances by mesh, first-seen order.
        for list in self.groups.values_mut() {
            list.clear();
        }
        self.group_order.clear();
        self.translucent.clear();
        for inst in meshes {
            let key = MeshKey::from(&inst.primitive);
            self.ensure_mesh(device, key, &inst.primitive);
            let [r, g, b] = inst.color;
            let raw = MeshInstanceRaw {
                model: inst.model.to_cols_array_2d(),
                color: [r, g, b, inst.opacity],
            };
            if inst.is_translucent() {
                self.translucent.push((key, raw));
                continue;
            }
            let list = self.groups.entry(key).or_default();
            if list.is_empty() {
                self.group_order.push(key);
            }
            list.push(raw);
        }

        self.scratch.clear();
        self.batches.clear();
        for key in &self.group_order {
            let Some(list) = self.groups.get(key) else {
                continue;
            };
            let start = self.scratch.len() as u32;
            self.scratch.extend_from_slice(list);
            self.batches.push(Batch {
                key: *key,
                instances: start..self.scratch.len() as u32,
                translucent: false,
            });
        }
        for (key, raw) in &self.translucent {
            let start = self.scratch.len() as u32;
            self.scratch.push(*raw);
            self.batches.push(Batch {
                key: *key,
                instances: start..start + 1,
                translucent: true,
            });
        }
        self.mesh_instances
            .write(device, queue, bytemuck::cast_slice(&self.scratch));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(0, &self.camera_bind_group, &[]);

        if !self.batches.is_empty() {
            rpass.set_vertex_buffer(1, self.mesh_instances.buffer.slice(..));
            let mut bound_translucent = None;
            for batch in &self.batches {
                let Some(mesh) = self.meshes.get(&batch.key) else {
                    continue;
                };
                if bound_translucent != Some(batch.translucent) {
                    rpass.set_pipeline(if batch.translucent {
                        &self.translucent_pipeline
                    } else {
                        &self.mesh_pipeline
                    });
                    bound_translucent = Some(batch.translucent);
                }
                rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, batch.instances.clone());
            }
        }

        if self.particle_count > 0 {
            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_vertex_buffer(0, self.particles.buffer.slice(..));
            rpass.draw(0..6, 0..self.particle_count);
        }
    }
}
