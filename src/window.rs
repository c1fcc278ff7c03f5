//! Windowed application: event loop wiring and the per-frame driver.
//!
//! One logical thread runs everything: the self-rescheduling redraw chain
//! (the animation driver), the resize handler, and the pointer handler.
//! Regeneration is synchronous inside the event that requested it. The only
//! background work is the single-shot mesh load, polled from the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::camera::Camera;
use crate::error::{AppError, RegenError};
use crate::gpu::{GpuState, PointCloud};
use crate::loader::MeshLoader;
use crate::panel::ControlPanel;
use crate::params::SceneParameters;
use crate::pointer;
use crate::sampler::MeshSampler;
use crate::system::ParticleSystem;
use crate::time::Clock;
use crate::uniforms::AnimationUniforms;

/// Display pixel density is capped, matching the original renderer setup.
const MAX_PIXEL_RATIO: f32 = 2.0;

/// Externally-triggerable shutdown flag.
///
/// The frame loop has no termination condition of its own; setting this
/// signal makes the event loop exit cleanly on its next turn, disposing the
/// live particle generation on the way out.
#[derive(Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a clean shutdown.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The windowed point-cloud application.
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    panel: Option<ControlPanel>,
    system: ParticleSystem<MeshSampler, PointCloud>,
    loader: Option<MeshLoader>,
    params: SceneParameters,
    camera: Camera,
    animation: AnimationUniforms,
    clock: Clock,
    stop: StopSignal,
    init_error: Option<AppError>,
}

impl App {
    /// Create the app with an in-flight mesh load.
    pub fn new(loader: MeshLoader) -> Self {
        let params = SceneParameters::default();
        let animation = AnimationUniforms::new(params.size);
        Self {
            window: None,
            gpu: None,
            panel: None,
            system: ParticleSystem::new(),
            loader: Some(loader),
            params,
            camera: Camera::new(1.0),
            animation,
            clock: Clock::new(),
            stop: StopSignal::new(),
            init_error: None,
        }
    }

    /// Handle for requesting shutdown from outside the event loop.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// The error that aborted window or GPU initialization, if any.
    ///
    /// Initialization happens inside the event loop, so failures cannot be
    /// returned from `resumed`; they are stashed here and the loop exits.
    /// Check after `run_app` returns.
    pub fn take_init_error(&mut self) -> Option<AppError> {
        self.init_error.take()
    }

    /// Dispose the old generation and build a fresh one.
    fn rebuild(
        gpu: &GpuState,
        system: &mut ParticleSystem<MeshSampler, PointCloud>,
        animation: &mut AnimationUniforms,
        params: &SceneParameters,
        scale_factor: f64,
    ) {
        animation.point_size = params.size * (scale_factor as f32).min(MAX_PIXEL_RATIO);
        match system.regenerate(params.count, |set| gpu.create_point_cloud(set)) {
            Ok(count) => log::info!("rebuilt point cloud with {} particles", count),
            Err(RegenError::NotReady) => {
                log::debug!("model not loaded yet; skipping rebuild")
            }
            Err(e) => log::warn!("regeneration rejected: {}", e),
        }
    }

    /// Check whether the mesh load finished; on success install the sampler
    /// and build the first generation.
    fn poll_loader(&mut self) {
        let Some(loader) = &self.loader else { return };
        // Hold the result in the channel until the GPU exists.
        let Some(gpu) = self.gpu.as_ref() else { return };
        let Some(result) = loader.poll() else { return };
        self.loader = None;

        let mesh = match result {
            Ok(mesh) => mesh,
            Err(e) => {
                log::warn!("mesh load failed: {}; scene stays empty", e);
                return;
            }
        };
        match MeshSampler::build(&mesh) {
            Ok(sampler) => {
                self.system.make_ready(sampler);
                let scale = self
                    .window
                    .as_ref()
                    .map(|w| w.scale_factor())
                    .unwrap_or(1.0);
                Self::rebuild(gpu, &mut self.system, &mut self.animation, &self.params, scale);
            }
            Err(e) => log::warn!("surface sampler rejected mesh: {}; scene stays empty", e),
        }
    }

    fn pointer_moved(&mut self, screen: Vec2) {
        let Some(gpu) = self.gpu.as_ref() else { return };
        let viewport = Vec2::new(gpu.config.width as f32, gpu.config.height as f32);

        // Project first, then nudge: the projection uses the camera pose
        // from before this event, as the original did.
        if let Some(world) = pointer::project_to_plane(screen, viewport, &self.camera) {
            self.animation.pointer_world = world;
        }
        let offset = pointer::parallax_offset(screen, viewport);
        self.camera.position.x = offset.x;
        self.camera.position.y = offset.y;
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else { return };
        let (Some(gpu), Some(panel)) = (self.gpu.as_mut(), self.panel.as_mut()) else {
            return;
        };

        let (elapsed, _delta) = self.clock.update();
        self.animation.elapsed_time = elapsed;

        let (frame, response) = panel.run(&window, &mut self.params);
        if response.regenerate {
            Self::rebuild(
                gpu,
                &mut self.system,
                &mut self.animation,
                &self.params,
                window.scale_factor(),
            );
        }

        let viewport = Vec2::new(gpu.config.width as f32, gpu.config.height as f32);
        gpu.write_uniforms(
            &self
                .animation
                .to_raw(self.camera.view_proj_matrix(), viewport),
        );

        match gpu.render(self.system.handle(), panel, &frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                gpu.resize(window.inner_size());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory; shutting down");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }

        // Reschedule: the loop runs until the host tears it down or the
        // stop signal fires.
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("pointmorph")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                self.init_error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                self.init_error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.camera
            .set_aspect(size.width as f32 / size.height.max(1) as f32);
        self.animation.point_size =
            self.params.size * (window.scale_factor() as f32).min(MAX_PIXEL_RATIO);

        self.panel = Some(ControlPanel::new(gpu.device(), gpu.surface_format(), &window));
        self.gpu = Some(gpu);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = match (&mut self.panel, &self.window) {
            (Some(panel), Some(window)) => panel.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size);
                }
                self.camera
                    .set_aspect(size.width as f32 / size.height.max(1) as f32);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.animation.point_size =
                    self.params.size * (scale_factor as f32).min(MAX_PIXEL_RATIO);
            }
            WindowEvent::CursorMoved { position, .. } => {
                if !consumed {
                    self.pointer_moved(Vec2::new(position.x as f32, position.y as f32));
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.stop.is_stopped() {
            event_loop.exit();
            return;
        }
        self.poll_loader();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_signal_round_trip() {
        let signal = StopSignal::new();
        assert!(!signal.is_stopped());

        let shared = signal.clone();
        signal.stop();
        assert!(shared.is_stopped());
    }

    #[test]
    fn test_init_failure_surfaces_after_the_loop() {
        let loader = MeshLoader::spawn(|| {
            Err(crate::error::MeshError::Empty)
        });
        let mut app = App::new(loader);
        assert!(app.take_init_error().is_none());

        // A failed GPU bring-up is stashed for the caller of run_app.
        app.init_error = Some(crate::error::GpuError::NoAdapter.into());
        assert!(matches!(
            app.take_init_error(),
            Some(AppError::Gpu(crate::error::GpuError::NoAdapter))
        ));
        assert!(app.take_init_error().is_none());
    }
}
