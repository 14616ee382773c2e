use super::sprite::SpriteRenderer;
use super::viewport::RenderTarget;
use crate::app::assets::AssetStore;
use crate::sim::Scene;
use crate::sim::camera::Bounds;

/// Renderer for the game view
///
/// Draws a screen's [`Scene`] into an offscreen texture that egui displays.
pub struct SceneRenderer {
    target: RenderTarget,
    sprites: SpriteRenderer,
}

impl SceneRenderer {
    /// Creates a new scene renderer
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        egui_renderer: &mut egui_wgpu::Renderer,
        assets: &AssetStore,
        size: [u32; 2],
    ) -> Self {
        let target = RenderTarget::new(device, egui_renderer, size, "Scene Texture");
        let sprites = SpriteRenderer::new(device, queue, RenderTarget::FORMAT, assets);

        Self { target, sprites }
    }

    /// Returns the texture ID for egui
    pub fn texture_id(&self) -> egui::TextureId {
        self.target.texture_id()
    }

    pub fn size(&self) -> [u32; 2] {
        self.target.size()
    }

    /// Resizes the render texture
    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
        size: [u32; 2],
    ) -> bool {
        self.target.resize(device, egui_renderer, size)
    }

    /// Draws the scene to the texture, returning the number of draw calls
    pub fn draw(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        device: &wgpu::Device,
        scene: &Scene,
    ) -> usize {
        self.sprites.draw_layer(scene.camera, &scene.world);
        self.sprites
            .draw_layer(Bounds::from_size(scene.ui_size), &scene.ui);

        self.sprites.begin_frame(device);
        let draw_calls = self.sprites.draw_call_count();

        {
            let [r, g, b, a] = scene.clear_color.map(f64::from);
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.target.view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprites.render(&mut rpass);
        }

        self.sprites.end_frame();
        draw_calls
    }
}
