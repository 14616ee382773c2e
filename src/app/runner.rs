//! Main application handler for the game

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use super::assets::AssetStore;
use super::config::AppConfig;
use super::debug_ui::{DebugUIState, RendererStats};
use super::input::InputCollector;
use super::renderer::{Renderer, hud};
use super::window::window_attributes_from_config;
use crate::sim::{ScreenRequest, World};

/// Longest frame the simulation is advanced by, in seconds
const MAX_FRAME_DELTA: f32 = 0.25;

/// Main game application
pub struct App {
    config: AppConfig,
    assets: AssetStore,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    world: World,
    debug_ui: DebugUIState,
    last_update: Option<Instant>,
    input_collector: InputCollector,
}

impl App {
    /// Creates a new game application with the provided configuration
    ///
    /// Loads every texture up front; a missing asset is fatal.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        info!(profile = %config.profile, "Starting game");
        info!(?config.window, "Window configuration");

        let assets = AssetStore::load(&config.assets).context("failed to load assets")?;
        let world = World::new(config.level.clone(), assets.metrics())
            .with_menu_prompt(config.keys.menu_prompt())
            .with_start_screen(ScreenRequest::from(config.start_screen));

        Ok(Self {
            config,
            assets,
            window: None,
            renderer: None,
            world,
            debug_ui: DebugUIState::default(),
            last_update: None,
            input_collector: InputCollector::new(),
        })
    }

    /// Returns the game world
    pub fn world(&self) -> &World {
        &self.world
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attributes = window_attributes_from_config(&self.config.window);

            match event_loop.create_window(window_attributes) {
                Ok(window) => {
                    let size = window.inner_size();
                    info!(
                        window.width = size.width,
                        window.height = size.height,
                        "Window created successfully"
                    );

                    let window = Arc::new(window);

                    // Initialize renderer using tokio runtime
                    // We create a runtime here because winit's event loop is synchronous
                    let renderer = tokio::runtime::Runtime::new()
                        .context("failed to create tokio runtime")
                        .and_then(|runtime| {
                            runtime.block_on(Renderer::new(
                                window.clone(),
                                &self.assets,
                                self.config.window.vsync,
                            ))
                        });

                    match renderer {
                        Ok(renderer) => {
                            info!("Renderer initialized successfully");
                            self.renderer = Some(renderer);
                            self.window = Some(window);
                            self.last_update = Some(Instant::now());
                        }
                        Err(e) => {
                            error!(error = ?e, "Failed to initialize renderer");
                            event_loop.exit();
                        }
                    }
                }
                Err(e) => {
                    error!(error = %e, "Failed to create window");
                    event_loop.exit();
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(last_update) = self.last_update {
            let now = Instant::now();
            // Stalls (window drags, breakpoints) advance at most one capped step
            let delta_time = (now - last_update).as_secs_f32().min(MAX_FRAME_DELTA);
            self.last_update = Some(now);

            let input = self.input_collector.state().poller(&self.config.keys);
            self.world.tick(delta_time, &input);

            // Advance frame AFTER the tick so edges are seen exactly once
            self.input_collector.advance_frame();

            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Feed events to input collector FIRST (before egui)
        self.input_collector.handle_window_event(&event);

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            let _ = renderer.handle_event(window, &event);
        }

        if let WindowEvent::KeyboardInput { event, .. } = &event
            && event.state.is_pressed()
            && !event.repeat
            && let PhysicalKey::Code(KeyCode::Backquote) = event.physical_key
        {
            self.debug_ui.toggle_window();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Focused(focused) => {
                if focused {
                    info!("Window focused, resuming");
                    self.world.resume();
                    // Skip the time spent unfocused
                    self.last_update = self.last_update.map(|_| Instant::now());
                } else {
                    info!("Window lost focus, pausing");
                    self.world.pause();
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
                self.world.resize(new_size.width, new_size.height);
            }
            WindowEvent::RedrawRequested => {
                if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
                    let scene = self.world.scene();
                    let surface = renderer.config().clone();
                    let scene_size = renderer.scene_size();
                    let draw_calls = renderer.last_draw_calls();
                    let debug_ui = &mut self.debug_ui;
                    let world = &mut self.world;

                    let result = renderer.draw(window, &scene, |ctx, texture_id| {
                        egui::CentralPanel::default()
                            .frame(egui::Frame::NONE)
                            .show(ctx, |ui| {
                                let size = ui.available_size();
                                let response =
                                    ui.image(egui::load::SizedTexture::new(texture_id, size));
                                hud::paint_labels(ui.painter(), response.rect, &scene);
                            });

                        debug_ui.render(
                            ctx,
                            world,
                            RendererStats {
                                surface: &surface,
                                scene_size,
                                draw_calls,
                            },
                        );
                    });

                    match result {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            warn!("Surface lost, reconfiguring");
                            let size = window.inner_size();
                            renderer.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("Out of memory, exiting");
                            event_loop.exit();
                        }
                        Err(e) => {
                            error!(error = %e, "Render error");
                        }
                    }
                }
            }
            _ => {}
        }
    }
}
