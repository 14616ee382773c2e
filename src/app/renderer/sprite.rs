//! Sprite renderer for drawing textured, tinted quads
//!
//! Each sprite becomes two triangles. Consecutive sprites that share a
//! texture frame and camera are drawn with a single call.

use std::ops::Range;

use enum_map::EnumMap;
use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPass, RenderPipeline, util::DeviceExt};

use crate::app::assets::AssetStore;
use crate::sim::camera::Bounds;
use crate::sim::{Sprite, TextureKey};

/// WGSL shader code for sprite rendering
const SPRITE_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
}

struct Camera {
    center: vec2<f32>,
    half_size: vec2<f32>,
}

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var sprite_texture: texture_2d<f32>;
@group(1) @binding(1)
var sprite_sampler: sampler;

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;

    // World and UI coordinates are y-up, like clip space
    let clip = (in.position - camera.center) / camera.half_size;

    out.clip_position = vec4<f32>(clip, 0.0, 1.0);
    out.uv = in.uv;
    out.color = in.color;

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(sprite_texture, sprite_sampler, in.uv) * in.color;
}
"#;

/// Vertex data for sprite rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Uniform buffer for a camera
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniform {
    center: [f32; 2],
    half_size: [f32; 2],
}

impl From<Bounds> for CameraUniform {
    fn from(bounds: Bounds) -> Self {
        Self {
            center: bounds.center(),
            half_size: [bounds.width() / 2.0, bounds.height() / 2.0],
        }
    }
}

/// Images are stored top row first, the quad corners start bottom-left
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
const QUAD_INDICES: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Generates the six vertices of a sprite's quad
pub fn quad_vertices(sprite: &Sprite) -> [Vertex; 6] {
    let corners = sprite.corners();
    QUAD_INDICES.map(|i| Vertex {
        position: corners[i],
        uv: CORNER_UVS[i],
        color: sprite.color,
    })
}

/// One draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub layer: usize,
    pub texture: TextureKey,
    pub frame: usize,
    pub vertices: Range<u32>,
}

/// Sprites of one frame, flattened into vertices and draw calls
#[derive(Debug, Default)]
pub struct SpriteBatch {
    vertices: Vec<Vertex>,
    calls: Vec<DrawCall>,
    layers: Vec<Bounds>,
}

impl SpriteBatch {
    /// Queues `sprites` seen through `camera`, back to front
    pub fn push_layer(&mut self, camera: Bounds, sprites: &[Sprite]) {
        let layer = self.layers.len();
        self.layers.push(camera);

        for sprite in sprites.iter().filter(|s| !s.is_degenerate()) {
            let start = self.vertices.len() as u32;
            self.vertices.extend(quad_vertices(sprite));
            let end = self.vertices.len() as u32;

            match self.calls.last_mut() {
                Some(call)
                    if call.layer == layer
                        && call.texture == sprite.texture
                        && call.frame == sprite.frame =>
                {
                    call.vertices.end = end;
                }
                _ => self.calls.push(DrawCall {
                    layer,
                    texture: sprite.texture,
                    frame: sprite.frame,
                    vertices: start..end,
                }),
            }
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn layers(&self) -> &[Bounds] {
        &self.layers
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.calls.clear();
        self.layers.clear();
    }
}

/// A texture frame uploaded to the GPU
struct GpuFrame {
    _texture: wgpu::Texture,
    bind_group: BindGroup,
}

/// Sprite renderer shader
pub struct SpriteRenderer {
    pipeline: RenderPipeline,
    camera_layout: BindGroupLayout,
    frames: EnumMap<TextureKey, Vec<GpuFrame>>,
    batch: SpriteBatch,
    vertex_buffer: Option<Buffer>,
    camera_bind_groups: Vec<BindGroup>,
}

impl SpriteRenderer {
    /// Creates the pipeline and uploads every texture in `assets`
    pub fn new(
        device: &Device,
        queue: &Queue,
        format: wgpu::TextureFormat,
        assets: &AssetStore,
    ) -> Self {
        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let frames = EnumMap::from_fn(|key: TextureKey| {
            assets
                .frames(key)
                .iter()
                .enumerate()
                .map(|(index, image)| {
                    let label = format!("{key:?} frame {index}");
                    upload_frame(device, queue, &texture_layout, &sampler, image, &label)
                })
                .collect()
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(SPRITE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Negative scale flips the winding
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_layout,
            frames,
            batch: SpriteBatch::default(),
            vertex_buffer: None,
            camera_bind_groups: Vec::new(),
        }
    }

    /// Queues a layer of sprites for this frame
    pub fn draw_layer(&mut self, camera: Bounds, sprites: &[Sprite]) {
        self.batch.push_layer(camera, sprites);
    }

    /// Uploads this frame's vertices and cameras
    pub fn begin_frame(&mut self, device: &Device) {
        self.vertex_buffer = (!self.batch.vertices().is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Vertex Buffer"),
                contents: bytemuck::cast_slice(self.batch.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        self.camera_bind_groups = self
            .batch
            .layers()
            .iter()
            .map(|&bounds| {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Sprite Camera Buffer"),
                    contents: bytemuck::cast_slice(&[CameraUniform::from(bounds)]),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Sprite Camera Bind Group"),
                    layout: &self.camera_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                })
            })
            .collect();
    }

    pub fn render(&self, rpass: &mut RenderPass<'_>) {
        let Some(vertex_buffer) = &self.vertex_buffer else {
            return;
        };

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, vertex_buffer.slice(..));

        for call in self.batch.calls() {
            let frames = &self.frames[call.texture];
            // Frame indices past the end reuse the last frame
            let Some(frame) = frames.get(call.frame).or_else(|| frames.last()) else {
                continue;
            };
            let Some(camera) = self.camera_bind_groups.get(call.layer) else {
                continue;
            };
            rpass.set_bind_group(0, camera, &[]);
            rpass.set_bind_group(1, &frame.bind_group, &[]);
            rpass.draw(call.vertices.clone(), 0..1);
        }
    }

    pub fn end_frame(&mut self) {
        self.batch.clear();
    }

    pub fn draw_call_count(&self) -> usize {
        self.batch.calls().len()
    }
}

fn upload_frame(
    device: &Device,
    queue: &Queue,
    layout: &BindGroupLayout,
    sampler: &wgpu::Sampler,
    image: &image::RgbaImage,
    label: &str,
) -> GpuFrame {
    let size = wgpu::Extent3d {
        width: image.width().max(1),
        height: image.height().max(1),
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width()),
            rows_per_image: Some(image.height()),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    GpuFrame {
        _texture: texture,
        bind_group,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(texture: TextureKey, frame: usize) -> Sprite {
        Sprite {
            texture,
            frame,
            position: [10.0, 20.0],
            size: [4.0, 2.0],
            origin: [0.0, 0.0],
            rotation: 0.0,
            scale: [1.0, 1.0],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    #[test]
    fn test_quad_uvs_flip_vertically() {
        let vertices = quad_vertices(&sprite(TextureKey::Target, 0));
        // First triangle: bottom-left, bottom-right, top-right
        assert_eq!(vertices[0].position, [10.0, 20.0]);
        assert_eq!(vertices[0].uv, [0.0, 1.0]);
        assert_eq!(vertices[2].position, [14.0, 22.0]);
        assert_eq!(vertices[2].uv, [1.0, 0.0]);
        assert_eq!(vertices[5].position, [10.0, 22.0]);
    }

    #[test]
    fn test_batch_merges_runs() {
        let mut batch = SpriteBatch::default();
        batch.push_layer(
            Bounds::from_size([100.0, 100.0]),
            &[
                sprite(TextureKey::Target, 0),
                sprite(TextureKey::Target, 0),
                sprite(TextureKey::Player, 1),
            ],
        );
        batch.push_layer(Bounds::from_size([50.0, 50.0]), &[sprite(TextureKey::Player, 1)]);

        assert_eq!(batch.vertices().len(), 24);
        assert_eq!(batch.layers().len(), 2);
        let calls = batch.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].vertices, 0..12);
        assert_eq!(calls[1].texture, TextureKey::Player);
        // Same texture on a new layer still needs its own call
        assert_eq!(calls[2].layer, 1);
    }

    #[test]
    fn test_degenerate_sprites_are_skipped() {
        let mut faded = sprite(TextureKey::Banner, 0);
        faded.color[3] = 0.0;
        let mut shrunk = sprite(TextureKey::Target, 0);
        shrunk.scale = [0.0, 0.0];

        let mut batch = SpriteBatch::default();
        batch.push_layer(Bounds::from_size([1.0, 1.0]), &[faded, shrunk]);
        assert!(batch.vertices().is_empty());
        assert!(batch.calls().is_empty());

        batch.clear();
        assert!(batch.layers().is_empty());
    }

    #[test]
    fn test_camera_uniform() {
        let uniform = CameraUniform::from(Bounds::new([100.0, 0.0], [740.0, 480.0]));
        assert_eq!(uniform.center, [420.0, 240.0]);
        assert_eq!(uniform.half_size, [320.0, 240.0]);
    }
}
