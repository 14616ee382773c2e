//! Rendering module for the scene and the egui UI with a wgpu backend
//!
//! ## Architecture
//!
//! - `gpu`: Surface, device and queue setup
//! - `sprite`: Textured quad pipeline with per-layer cameras
//! - `scene`: Draws a screen's scene to an offscreen texture
//! - `viewport`: Offscreen render target registered with egui
//! - `overlay`: egui pass composed over the swapchain image
//! - `hud`: Paints text labels over the displayed scene with egui
//!
//! Each frame the scene is drawn into its render target first, then egui
//! shows that texture as an image and paints labels and debug windows on top.

use std::sync::Arc;

use egui::Context;
use tracing::{info, trace};
use wgpu::SurfaceConfiguration;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::Window;

use super::assets::AssetStore;
use crate::sim::Scene;

mod gpu;
pub mod hud;
mod overlay;
pub mod scene;
pub mod sprite;
pub mod viewport;

use gpu::Gpu;
use overlay::Overlay;
use scene::SceneRenderer;

/// Owns the GPU, the scene renderer and the egui overlay
pub struct Renderer {
    gpu: Gpu,
    overlay: Overlay,
    scene_renderer: SceneRenderer,
    last_draw_calls: usize,
}

impl Renderer {
    /// Creates a new renderer for the given window and uploads every texture
    pub async fn new(window: Arc<Window>, assets: &AssetStore, vsync: bool) -> anyhow::Result<Self> {
        info!("Initializing wgpu renderer");

        let gpu = Gpu::connect(window.clone(), vsync).await?;
        let mut overlay = Overlay::new(&window, &gpu);
        let scene_renderer = SceneRenderer::new(
            &gpu.device,
            &gpu.queue,
            overlay.renderer_mut(),
            assets,
            gpu.size(),
        );

        info!(textures = assets.texture_count(), "Renderer ready");

        Ok(Self {
            gpu,
            overlay,
            scene_renderer,
            last_draw_calls: 0,
        })
    }

    /// Returns a reference to the surface configuration
    pub fn config(&self) -> &SurfaceConfiguration {
        &self.gpu.config
    }

    /// Returns the size of the offscreen scene texture
    pub fn scene_size(&self) -> [u32; 2] {
        self.scene_renderer.size()
    }

    /// Number of sprite draw calls issued last frame
    pub fn last_draw_calls(&self) -> usize {
        self.last_draw_calls
    }

    /// Handles window events for egui
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.overlay.handle_event(window, event)
    }

    /// Resizes the surface; the scene texture follows the window size
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if !self.gpu.reconfigure(new_size) {
            return;
        }

        let scene_resized = self.scene_renderer.resize(
            &self.gpu.device,
            self.overlay.renderer_mut(),
            self.gpu.size(),
        );

        info!(
            width = new_size.width,
            height = new_size.height,
            scene_resized,
            "Surface resized"
        );
    }

    /// Draws `scene`, then the UI built by `render_ui` around the scene texture
    pub fn draw(
        &mut self,
        window: &Window,
        scene: &Scene,
        mut render_ui: impl FnMut(&Context, egui::TextureId),
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.gpu.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.last_draw_calls = self
            .scene_renderer
            .draw(&mut encoder, &self.gpu.device, scene);
        trace!(draw_calls = self.last_draw_calls, "Scene drawn");

        let texture_id = self.scene_renderer.texture_id();
        let output = self
            .overlay
            .run(window, |ctx| render_ui(ctx, texture_id));
        self.overlay.paint(
            &self.gpu,
            &mut encoder,
            &view,
            window.scale_factor() as f32,
            output,
        );

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}
