//! Bouncing Sphere entry point
//!
//! Runs the simulation headless: loads settings, starts a session and steps
//! it at the target frame rate, drawing each frame into a command list.
//!
//! Usage: `bouncing-sphere [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bouncing_sphere::Settings;
    use bouncing_sphere::camera::{CameraInput, OrbitalCamera};
    use bouncing_sphere::consts::FPS;
    use bouncing_sphere::renderer::DrawList;
    use bouncing_sphere::sim::{GameState, TickInput, clamp_frame_time, tick};
    use glam::Vec2;
    use std::path::PathBuf;

    env_logger::init();
    log::info!("Bouncing Sphere (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("bouncing-sphere.json"));
    let seconds: f32 = match args.next().map(|s| s.parse()) {
        Some(Ok(seconds)) => seconds,
        Some(Err(e)) => {
            log::warn!("Invalid duration ({}), using 10 seconds", e);
            10.0
        }
        None => 10.0,
    };

    let settings = Settings::load(&settings_path);
    let max_frame_time = settings.max_frame_time;
    let mut state = GameState::new(settings);
    let mut camera = OrbitalCamera::default();
    let mut draw_list = DrawList::new();

    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &start, 0.0);

    let frames = (seconds.max(0.0) * FPS as f32) as u64;
    let frame_time = clamp_frame_time(1.0 / FPS as f32, max_frame_time);
    let input = TickInput::default();
    let mut bounces = 0u64;

    for frame in 0..frames {
        // Slow drag to orbit the camera around the arena
        let camera_input = CameraInput {
            mouse: Vec2::new(frame as f32, 0.0),
            button_down: true,
            ..Default::default()
        };
        camera.update(&camera_input, frame_time);

        if tick(&mut state, &input, frame_time) {
            bounces += state.last_contact.bounces() as u64;
            log::debug!(
                "Frame {}: {:?} at {:?}",
                frame,
                state.last_contact,
                state.scene.ball.pos
            );
        }

        draw_list.clear();
        state.scene.draw(&mut draw_list);
    }

    log::info!(
        "Simulated {} frames: {} bounces over {} contact frames, ball at {:?}",
        state.time_ticks,
        bounces,
        state.bounce_frames,
        state.scene.ball.pos
    );
    log::info!(
        "Last frame: {} draw commands, camera at {:?} looking at {:?}",
        draw_list.len(),
        camera.position(),
        camera.target()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web front end; the library is driven by the host
}
