//! Freefall entry point
//!
//! Headless demo host: wires the plugin table, the audio backend chain and
//! a recording GPU boundary together and runs a short scripted session.
//! A windowed host replaces the null/recording backends with real ones and
//! feeds live input snapshots; the step contract is identical.

use freefall::assets::{AssetStore, Mesh, MeshKey, Primitive, Shader, ShaderKey, WavKey};
use freefall::audio::{StereoFrame, Wav, open_audio};
use freefall::input::{HeadlessWindow, Input, Key};
use freefall::plugin;
use freefall::render::RecordingBackend;
use freefall::settings::Settings;

/// Frames the scripted session runs for
const DEMO_FRAMES: u32 = 600;
const DEMO_FPS: f32 = 60.0;

fn main() {
    env_logger::init();
    log::info!("freefall (headless demo) starting");

    let settings = Settings::default();
    let assets = demo_assets();

    // No platform transports compiled into the demo; the chain lands on the
    // null device
    let mut audio_io = open_audio(&[]);

    let api = plugin::api();
    let mut ctx = (api.init)(&assets, settings, 0xF411);
    let mut win = HeadlessWindow::default();
    let mut gpu = RecordingBackend::default();

    let mut input = Input::default();
    input.width = 1080;
    input.height = 800;

    let mut audio_buf = Vec::new();

    for frame in 0..DEMO_FRAMES {
        input.time = frame as f32 / DEMO_FPS;
        script_input(&mut input, frame);

        let slots = audio_io.frames_needed();
        audio_buf.resize(slots, StereoFrame::SILENCE);

        (api.step)(
            &mut ctx,
            &assets,
            &mut win,
            &input,
            &mut audio_buf,
            &mut gpu,
        );
        audio_io.submit(&audio_buf);

        if win.close_requested {
            log::info!("close requested at frame {frame}");
            break;
        }
    }

    log::info!(
        "session over: round {}, {} draws, {} shader binds, {} mesh binds",
        ctx.state.round,
        gpu.draws,
        gpu.shader_binds,
        gpu.mesh_binds,
    );
    (api.fini)(ctx);
}

/// Scripted session: linger on the menu, pick the start entry, confirm,
/// then steer left while falling
fn script_input(input: &mut Input, frame: u32) {
    match frame {
        60 => input.set_key(Key::Up, true),
        61 => input.set_key(Key::Up, false),
        90 => input.set_key(Key::Enter, true),
        91 => input.set_key(Key::Enter, false),
        120 => input.set_key(Key::A, true),
        300 => input.set_key(Key::A, false),
        _ => {}
    }
}

/// Procedural stand-in assets.
///
/// A real host loads these from disk and uploads them to the GPU; the demo
/// only needs plausible shapes and PCM so culling, picking and mixing have
/// something to chew on.
fn demo_assets() -> AssetStore {
    let mut store = AssetStore::new();

    for key in [
        ShaderKey::Wall,
        ShaderKey::Screen,
        ShaderKey::Text,
        ShaderKey::Solid,
    ] {
        store.insert_shader(key, Shader::new(key as u64 + 1));
    }

    // Wall segment: an open tube approximated by a quad strip around the
    // shaft radius
    store.insert_mesh(
        MeshKey::Wall,
        Mesh::from_positions(1, Primitive::Triangles, tube_positions(26.0, 40.0, 12)),
    );
    store.insert_mesh(
        MeshKey::Cap,
        Mesh::from_positions(2, Primitive::Triangles, quad_positions(52.0, 52.0)),
    );
    store.insert_mesh(
        MeshKey::Rock,
        Mesh::from_positions(3, Primitive::Triangles, tube_positions(1.2, 8.0, 6)),
    );
    store.insert_mesh(
        MeshKey::Player,
        Mesh::from_positions(4, Primitive::Triangles, quad_positions(1.0, 2.0)),
    );
    store.insert_mesh(
        MeshKey::Room,
        Mesh::from_positions(5, Primitive::Triangles, quad_positions(8.0, 4.0)),
    );
    store.insert_mesh(
        MeshKey::Screen,
        Mesh::from_positions(6, Primitive::Triangles, quad_positions(2.0, 2.0)),
    );
    store.insert_mesh(
        MeshKey::MenuStart,
        Mesh::from_positions(7, Primitive::Triangles, quad_positions(1.0, 0.25)),
    );
    store.insert_mesh(
        MeshKey::MenuQuit,
        Mesh::from_positions(8, Primitive::Triangles, quad_positions(1.0, 0.25)),
    );
    store.insert_mesh(
        MeshKey::DebugCross,
        Mesh::from_positions(9, Primitive::Lines, vec![-1.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
    );
    store.insert_mesh(
        MeshKey::DebugCylinder,
        Mesh::from_positions(10, Primitive::Lines, tube_positions(1.0, 1.0, 8)),
    );

    store.insert_wav(WavKey::Theme, tone(110.0, 96_000));
    store.insert_wav(WavKey::Choir, tone(220.0, 48_000));
    store.insert_wav(WavKey::Wind, tone(55.0, 48_000));
    store.insert_wav(WavKey::Blip, tone(880.0, 2_400));
    for i in 0..4 {
        store.insert_wav(WavKey::woosh(i), tone(330.0 + 20.0 * i as f32, 9_600));
        store.insert_wav(WavKey::crash(i), tone(70.0 + 10.0 * i as f32, 19_200));
    }

    store
}

/// Axis-aligned quad in the XY plane, two triangles
fn quad_positions(w: f32, h: f32) -> Vec<f32> {
    let (x, y) = (w / 2.0, h / 2.0);
    vec![
        -x, -y, 0.0, x, -y, 0.0, x, y, 0.0, //
        -x, -y, 0.0, x, y, 0.0, -x, y, 0.0,
    ]
}

/// Open tube around the Y axis: `sides` quads from y=0 to y=height
fn tube_positions(radius: f32, height: f32, sides: u32) -> Vec<f32> {
    let mut positions = Vec::with_capacity(sides as usize * 18);
    for i in 0..sides {
        let a0 = std::f32::consts::TAU * i as f32 / sides as f32;
        let a1 = std::f32::consts::TAU * (i + 1) as f32 / sides as f32;
        let (x0, z0) = (radius * a0.cos(), radius * a0.sin());
        let (x1, z1) = (radius * a1.cos(), radius * a1.sin());
        positions.extend_from_slice(&[
            x0, 0.0, z0, x1, 0.0, z1, x1, height, z1, //
            x0, 0.0, z0, x1, height, z1, x0, height, z0,
        ]);
    }
    positions
}

/// Mono 16-bit sine burst
fn tone(freq: f32, len: usize) -> Wav {
    let rate = 48_000u32;
    let samples = (0..len)
        .map(|i| {
            let t = i as f32 / rate as f32;
            ((std::f32::consts::TAU * freq * t).sin() * 8000.0) as i16
        })
        .collect();
    Wav::new(1, rate, samples)
}
