use pointmorph::{App, AppError, MeshError, MeshLoader, TriangleMesh, Vec3};
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> Result<(), AppError> {
    env_logger::init();

    let loader = MeshLoader::spawn(blade_mesh);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(loader);
    event_loop.run_app(&mut app)?;
    match app.take_init_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Procedural stand-in for a model file: a tall, thin double pyramid that
/// reads as a blade once the particles settle on it.
fn blade_mesh() -> Result<TriangleMesh, MeshError> {
    let positions = vec![
        Vec3::new(0.0, 22.0, 0.0),  // tip
        Vec3::new(1.4, 4.0, 0.0),   // guard ring
        Vec3::new(0.0, 4.0, 0.5),
        Vec3::new(-1.4, 4.0, 0.0),
        Vec3::new(0.0, 4.0, -0.5),
        Vec3::new(0.0, 0.0, 0.0),   // pommel
    ];
    let indices = vec![
        // Upper pyramid toward the tip.
        0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1, //
        // Lower pyramid toward the pommel.
        5, 2, 1, 5, 3, 2, 5, 4, 3, 5, 1, 4,
    ];
    TriangleMesh::new(positions, indices)
}
