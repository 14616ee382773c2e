//! Offscreen render target shown through egui

/// Texture size for a window of `window` pixels, never zero on either axis
pub fn target_extent(window: [u32; 2]) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: window[0].max(1),
        height: window[1].max(1),
        depth_or_array_layers: 1,
    }
}

/// A texture the scene is drawn into and egui displays as an image
pub struct RenderTarget {
    texture_id: egui::TextureId,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    label: String,
}

impl RenderTarget {
    /// Sprite textures are sRGB too, so blending happens in linear space
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    pub fn new(
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
        size: [u32; 2],
        label: impl Into<String>,
    ) -> Self {
        let label = label.into();
        let (texture, view) = create_texture(device, target_extent(size), &label);
        let texture_id =
            egui_renderer.register_native_texture(device, &view, wgpu::FilterMode::Linear);

        Self {
            texture_id,
            texture,
            view,
            label,
        }
    }

    pub fn texture_id(&self) -> egui::TextureId {
        self.texture_id
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn size(&self) -> [u32; 2] {
        [self.texture.width(), self.texture.height()]
    }

    /// Recreates the texture at `size`, returning false when it already matches
    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
        size: [u32; 2],
    ) -> bool {
        let extent = target_extent(size);
        if self.size() == [extent.width, extent.height] {
            return false;
        }

        egui_renderer.free_texture(&self.texture_id);
        let (texture, view) = create_texture(device, extent, &self.label);
        self.texture_id =
            egui_renderer.register_native_texture(device, &view, wgpu::FilterMode::Linear);
        self.texture = texture;
        self.view = view;
        true
    }
}

fn create_texture(
    device: &wgpu::Device,
    size: wgpu::Extent3d,
    label: &str,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: RenderTarget::FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimized_window_keeps_a_pixel() {
        let extent = target_extent([0, 0]);
        assert_eq!((extent.width, extent.height), (1, 1));

        let extent = target_extent([640, 480]);
        assert_eq!((extent.width, extent.height, extent.depth_or_array_layers), (640, 480, 1));
    }
}
