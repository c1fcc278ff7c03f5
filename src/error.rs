//! Error types for pointmorph.
//!
//! This module provides error types for GPU initialization, mesh validation,
//! and particle regeneration.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors produced when constructing or sampling a triangle mesh.
#[derive(Debug)]
pub enum MeshError {
    /// The mesh has no triangles.
    Empty,
    /// The index buffer length is not a multiple of three.
    RaggedIndices(usize),
    /// An index points past the end of the vertex array.
    IndexOutOfRange { index: u32, vertex_count: usize },
    /// Every triangle in the mesh is degenerate, so the surface has no area.
    ZeroArea,
    /// Failed to read mesh data from disk.
    Io(std::io::Error),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Empty => write!(f, "Mesh has no triangles"),
            MeshError::RaggedIndices(n) => {
                write!(f, "Index buffer length {} is not a multiple of 3", n)
            }
            MeshError::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "Index {} out of range for {} vertices",
                index, vertex_count
            ),
            MeshError::ZeroArea => write!(f, "Mesh surface has zero total area"),
            MeshError::Io(e) => write!(f, "Failed to read mesh data: {}", e),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MeshError {
    fn from(e: std::io::Error) -> Self {
        MeshError::Io(e)
    }
}

/// Errors returned when a particle regeneration is requested.
#[derive(Debug, PartialEq, Eq)]
pub enum RegenError {
    /// The surface sampler is not available yet (mesh still loading or failed).
    NotReady,
    /// A particle count of zero was requested.
    ZeroCount,
}

impl fmt::Display for RegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegenError::NotReady => {
                write!(f, "Particle system is not ready: no surface sampler installed")
            }
            RegenError::ZeroCount => write!(f, "Particle count must be greater than zero"),
        }
    }
}

impl std::error::Error for RegenError {}

/// Errors that can occur when running the application.
#[derive(Debug)]
pub enum AppError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            AppError::Window(e) => write!(f, "Failed to create window: {}", e),
            AppError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::EventLoop(e) => Some(e),
            AppError::Window(e) => Some(e),
            AppError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for AppError {
    fn from(e: winit::error::EventLoopError) -> Self {
        AppError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for AppError {
    fn from(e: winit::error::OsError) -> Self {
        AppError::Window(e)
    }
}

impl From<GpuError> for AppError {
    fn from(e: GpuError) -> Self {
        AppError::Gpu(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_error_routes_into_app_error() {
        let err: AppError = GpuError::NoAdapter.into();
        assert!(matches!(err, AppError::Gpu(GpuError::NoAdapter)));
        assert!(err.to_string().contains("No compatible GPU adapter"));
    }

    #[test]
    fn test_mesh_error_display() {
        let err = MeshError::IndexOutOfRange {
            index: 9,
            vertex_count: 4,
        };
        assert_eq!(err.to_string(), "Index 9 out of range for 4 vertices");
    }
}
