//! Debug UI state and rendering

use std::time::Instant;

use sysinfo::System;

use crate::sim::World;

/// Debug UI state for toggling different panels
#[derive(Debug, Clone)]
pub struct DebugUIState {
    pub show_window: bool,
    pub show_fps: bool,
    pub show_world_state: bool,
    pub show_level: bool,
    pub show_debug_info: bool,
    pub show_system_info: bool,
    frame_times: Vec<f32>,
    last_frame_time: Instant,
    system_summary: Option<Vec<String>>,
}

impl Default for DebugUIState {
    fn default() -> Self {
        Self {
            show_window: cfg!(debug_assertions),
            show_fps: true,
            show_world_state: true,
            show_level: true,
            show_debug_info: false,
            show_system_info: false,
            frame_times: Vec::with_capacity(100),
            last_frame_time: Instant::now(),
            system_summary: None,
        }
    }
}

/// Renderer numbers shown in the debug window
pub struct RendererStats<'a> {
    pub surface: &'a wgpu::SurfaceConfiguration,
    pub scene_size: [u32; 2],
    pub draw_calls: usize,
}

impl DebugUIState {
    /// Toggles the debug window visibility
    pub fn toggle_window(&mut self) {
        self.show_window = !self.show_window;
    }

    /// Updates frame timing information
    pub fn update_frame_time(&mut self) {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.remove(0);
        }
    }

    /// Gets the current FPS
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg_frame_time: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// System details are gathered once, on first display
    fn system_summary(&mut self) -> &[String] {
        self.system_summary.get_or_insert_with(|| {
            let mut sys = System::new_all();
            sys.refresh_all();

            let os_name = System::name().unwrap_or_else(|| "Unknown".to_string());
            let os_version = System::os_version().unwrap_or_else(|| "Unknown".to_string());
            let kernel_version = System::kernel_version().unwrap_or_else(|| "Unknown".to_string());
            let physical_cores = System::physical_core_count().unwrap_or(0);
            let total_memory_gb = sys.total_memory() as f64 / 1_073_741_824.0;

            vec![
                format!("OS: {} {}", os_name, os_version),
                format!("Kernel: {}", kernel_version),
                format!("Physical cores: {}", physical_cores),
                format!("Logical cores: {}", sys.cpus().len()),
                format!("Memory: {:.1} GB", total_memory_gb),
            ]
        })
    }

    /// Renders the debug UI
    pub fn render(&mut self, ctx: &egui::Context, world: &mut World, renderer: RendererStats<'_>) {
        if !self.show_window {
            return;
        }

        self.update_frame_time();

        egui::Window::new("Debug Info")
            .default_pos([10.0, 40.0])
            .default_width(300.0)
            .resizable(true)
            .scroll([false, true])
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.checkbox(&mut self.show_fps, "FPS");
                    ui.checkbox(&mut self.show_world_state, "World");
                    ui.checkbox(&mut self.show_level, "Level");
                    ui.checkbox(&mut self.show_debug_info, "Renderer");
                    ui.checkbox(&mut self.show_system_info, "System");
                });
                ui.separator();

                if self.show_fps {
                    ui.heading("FPS");
                    ui.label(format!("FPS: {:.1}", self.fps()));
                    let last = self.frame_times.last().copied().unwrap_or(0.0);
                    ui.label(format!("Frame time: {:.2}ms", last * 1000.0));
                    ui.separator();
                }

                if self.show_world_state {
                    ui.heading("World State");
                    ui.label(format!("Screen: {}", world.screen().name()));
                    ui.label(format!("Simulation time: {:.2}s", world.sim_time()));
                    ui.label(format!("Tick count: {}", world.tick_count()));

                    let tuning = world.level_config();
                    ui.label(format!(
                        "Movement: {:?} at {:.0} units/s",
                        tuning.movement, tuning.player_speed
                    ));
                    ui.label(format!(
                        "Animation: {:?}, {:.2}s per frame",
                        tuning.play_mode, tuning.frame_duration
                    ));

                    let mut paused = world.is_paused();
                    if ui.checkbox(&mut paused, "Paused").changed() {
                        if paused {
                            world.pause();
                        } else {
                            world.resume();
                        }
                    }

                    let mut time_scale = world.time_scale();
                    if ui
                        .add(egui::Slider::new(&mut time_scale, 0.0..=4.0).text("Time scale"))
                        .changed()
                    {
                        world.set_time_scale(time_scale);
                    }
                    ui.separator();
                }

                if self.show_level
                    && let Some(level) = world.level()
                {
                    let player = level.player();
                    let camera = level.camera();
                    ui.heading("Level");
                    ui.label(format!("State: {:?}", level.state()));
                    ui.label(format!("Elapsed: {:.2}s", level.elapsed()));
                    ui.label(format!(
                        "Player: ({:.1}, {:.1}) frame {}",
                        player.position[0],
                        player.position[1],
                        player.frame()
                    ));
                    ui.label(format!(
                        "Velocity: ({:.0}, {:.0})",
                        player.velocity[0], player.velocity[1]
                    ));
                    ui.label(format!(
                        "Camera: ({:.1}, {:.1})",
                        camera.center[0], camera.center[1]
                    ));
                    ui.label(format!("Target actions: {}", level.target().action_count()));
                    ui.separator();
                }

                if self.show_debug_info {
                    ui.heading("Renderer Info");
                    ui.label(format!(
                        "Surface: {}x{}",
                        renderer.surface.width, renderer.surface.height
                    ));
                    ui.label(format!("Format: {:?}", renderer.surface.format));
                    ui.label(format!(
                        "Scene texture: {}x{}",
                        renderer.scene_size[0], renderer.scene_size[1]
                    ));
                    ui.label(format!("Draw calls: {}", renderer.draw_calls));
                    ui.separator();
                }

                if self.show_system_info {
                    ui.heading("System Info");
                    for line in self.system_summary() {
                        ui.label(line);
                    }
                }
            });
    }
}
