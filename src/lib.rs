//! # pointmorph
//!
//! A morphing point cloud: hundreds of thousands of particles start as a
//! random planar cloud and drift into the surface shape of a 3D model,
//! reacting to the pointer, all driven by a per-vertex shader.
//!
//! ## How it fits together
//!
//! - [`sampler::MeshSampler`] draws area-weighted random points from a
//!   [`mesh::TriangleMesh`] surface.
//! - [`particles::ParticleSet`] builds the three parallel attribute arrays
//!   (origin, target, drift) the shader consumes.
//! - [`system::ParticleSystem`] owns the current GPU generation and makes
//!   the dispose-then-create regeneration sequence a type-checked
//!   transition instead of a null-check convention.
//! - [`gpu::GpuState`] uploads buffers and uniforms and draws each frame
//!   with additive blending.
//! - [`pointer`] projects the 2D pointer onto the particle plane and
//!   applies the parallax camera nudge.
//! - [`window::App`] wires it all into a winit event loop; the redraw
//!   chain is the animation driver.
//!
//! ## Quick start
//!
//! ```ignore
//! use pointmorph::prelude::*;
//! use winit::event_loop::{ControlFlow, EventLoop};
//!
//! let loader = MeshLoader::spawn(|| load_my_mesh());
//! let event_loop = EventLoop::new()?;
//! event_loop.set_control_flow(ControlFlow::Poll);
//! event_loop.run_app(&mut App::new(loader))?;
//! ```

pub mod camera;
pub mod error;
pub mod gpu;
pub mod loader;
pub mod mesh;
pub mod panel;
pub mod params;
pub mod particles;
pub mod pointer;
pub mod sampler;
pub mod shader;
pub mod system;
pub mod time;
pub mod uniforms;
pub mod window;

pub use bytemuck;
pub use glam::{Vec2, Vec3};

pub use camera::Camera;
pub use error::{AppError, GpuError, MeshError, RegenError};
pub use loader::MeshLoader;
pub use mesh::TriangleMesh;
pub use params::SceneParameters;
pub use particles::ParticleSet;
pub use sampler::{MeshSampler, SurfaceSampler};
pub use system::{Dispose, ParticleSystem};
pub use uniforms::AnimationUniforms;
pub use window::{App, StopSignal};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::error::{AppError, MeshError, RegenError};
    pub use crate::loader::MeshLoader;
    pub use crate::mesh::TriangleMesh;
    pub use crate::params::SceneParameters;
    pub use crate::particles::ParticleSet;
    pub use crate::sampler::{MeshSampler, SurfaceSampler};
    pub use crate::system::{Dispose, ParticleSystem};
    pub use crate::window::{App, StopSignal};
    pub use crate::{Vec2, Vec3};
}
