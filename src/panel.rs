//! Debug control panel.
//!
//! An egui overlay exposing the two tunable generation fields: particle
//! count and point size. Both commit only when the edit finishes (drag
//! released or focus lost), never while dragging, and each commit requests
//! a full regeneration of the point cloud.

use std::sync::Arc;

use winit::window::Window;

use crate::params::SceneParameters;

/// Egui context, winit bridge and wgpu renderer for the panel overlay.
pub struct ControlPanel {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Tessellated panel output for one frame.
pub struct PanelFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// What the panel asked for this frame.
#[derive(Debug, Default)]
pub struct PanelResponse {
    /// A tunable was committed; rebuild the particle buffers.
    pub regenerate: bool,
}

impl ControlPanel {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();

        let mut style = egui::Style::default();
        style.visuals = egui::Visuals::dark();
        style.visuals.window_shadow = egui::Shadow::NONE;
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(device, output_format, None, 1, false);

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feed a winit event to the panel.
    ///
    /// Returns true if the panel consumed it (pointer over a widget); the
    /// scene should not react to consumed events.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run the panel UI for this frame.
    pub fn run(
        &mut self,
        window: &Window,
        params: &mut SceneParameters,
    ) -> (PanelFrame, PanelResponse) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);

        let mut response = PanelResponse::default();
        egui::Window::new("Generation")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(&self.ctx, |ui| {
                let count = ui.add(
                    egui::Slider::new(
                        &mut params.count,
                        SceneParameters::COUNT_MIN..=SceneParameters::COUNT_MAX,
                    )
                    .step_by(SceneParameters::COUNT_STEP as f64)
                    .text("count"),
                );
                let size = ui.add(
                    egui::Slider::new(
                        &mut params.size,
                        SceneParameters::SIZE_MIN..=SceneParameters::SIZE_MAX,
                    )
                    .step_by(1.0)
                    .text("size"),
                );

                // Commit on end of edit only, so dragging does not thrash
                // the buffers.
                for widget in [&count, &size] {
                    if widget.drag_stopped() || widget.lost_focus() {
                        response.regenerate = true;
                    }
                }
            });

        let full_output = self.ctx.end_pass();
        self.state
            .handle_platform_output(window, full_output.platform_output);
        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (
            PanelFrame {
                paint_jobs,
                textures_delta: full_output.textures_delta,
                pixels_per_point: full_output.pixels_per_point,
            },
            response,
        )
    }

    /// Upload panel textures and buffers. Call before the render pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        frame: &PanelFrame,
        screen: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &frame.paint_jobs, screen);
    }

    /// Draw the panel into an open render pass.
    pub fn paint(
        &self,
        pass: &mut wgpu::RenderPass<'static>,
        frame: &PanelFrame,
        screen: &egui_wgpu::ScreenDescriptor,
    ) {
        self.renderer.render(pass, &frame.paint_jobs, screen);
    }

    /// Free textures retired this frame. Call after submitting.
    pub fn cleanup(&mut self, frame: &PanelFrame) {
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
