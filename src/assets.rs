//! Symbolic asset keys and the provider boundary
//!
//! Loading, decoding and GPU upload happen outside the core; the core only
//! sees ready-to-use descriptions behind [`AssetProvider`]. Every lookup
//! returns `Option`: `None` means "not loaded yet" and the frame must degrade
//! gracefully (skip the draw, keep the previous binding), never crash.

use std::sync::Arc;

use glam::Vec3;

use crate::audio::Wav;

/// Shader program keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKey {
    /// Textured shaft/room surfaces
    Wall,
    /// Animated screen effect
    Screen,
    /// Menu text
    Text,
    /// Flat-color debug lines
    Solid,
}

impl ShaderKey {
    pub const COUNT: usize = 4;
}

/// Mesh keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKey {
    Room,
    Screen,
    MenuStart,
    MenuQuit,
    Wall,
    Rock,
    Cap,
    Player,
    DebugCross,
    DebugCylinder,
}

impl MeshKey {
    pub const COUNT: usize = 10;
}

/// PCM source keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavKey {
    /// Menu theme, loops whole
    Theme,
    /// Menu choir layer, loops past its intro
    Choir,
    /// Falling wind ambience
    Wind,
    /// Menu selection blip
    Blip,
    Woosh0,
    Woosh1,
    Woosh2,
    Woosh3,
    Crash0,
    Crash1,
    Crash2,
    Crash3,
}

impl WavKey {
    pub const COUNT: usize = 12;

    /// Near-miss voice key by pool index (0..4)
    pub fn woosh(index: usize) -> Self {
        match index % 4 {
            0 => WavKey::Woosh0,
            1 => WavKey::Woosh1,
            2 => WavKey::Woosh2,
            _ => WavKey::Woosh3,
        }
    }

    /// Impact voice key by pool index (0..4)
    pub fn crash(index: usize) -> Self {
        match index % 4 {
            0 => WavKey::Crash0,
            1 => WavKey::Crash1,
            2 => WavKey::Crash2,
            _ => WavKey::Crash3,
        }
    }
}

/// Uniforms a shader program exposes.
///
/// Draw parameters for absent uniforms are silently skipped.
#[derive(Debug, Clone, Copy)]
pub struct UniformSet {
    pub model: bool,
    pub time: bool,
    pub camera_pos: bool,
    pub color: bool,
    pub resolution: bool,
}

impl Default for UniformSet {
    fn default() -> Self {
        Self {
            model: true,
            time: true,
            camera_pos: true,
            color: true,
            resolution: true,
        }
    }
}

/// A linked, ready-to-bind shader program
#[derive(Debug, Clone)]
pub struct Shader {
    /// Opaque program handle owned by the GPU backend
    pub handle: u64,
    pub uniforms: UniformSet,
}

impl Shader {
    pub fn new(handle: u64) -> Self {
        Self {
            handle,
            uniforms: UniformSet::default(),
        }
    }
}

/// Mesh primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Lines,
}

/// Bounding sphere in mesh-local space
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// Center offset from the mesh origin
    pub offset: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Bounds from a flat xyz position array
    pub fn from_positions(positions: &[f32]) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for v in positions.chunks_exact(3) {
            let p = Vec3::new(v[0], v[1], v[2]);
            min = min.min(p);
            max = max.max(p);
        }
        if min.x > max.x {
            return Self {
                offset: Vec3::ZERO,
                radius: 0.0,
            };
        }
        let offset = (min + max) * 0.5;
        let mut radius: f32 = 0.0;
        for v in positions.chunks_exact(3) {
            let p = Vec3::new(v[0], v[1], v[2]);
            radius = radius.max((p - offset).length());
        }
        Self { offset, radius }
    }
}

/// An uploaded mesh plus the CPU-side data the core still needs
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Opaque buffer handle owned by the GPU backend
    pub handle: u64,
    pub primitive: Primitive,
    /// Retained flat xyz positions for ray queries; may be empty
    pub positions: Vec<f32>,
    pub vertex_count: u32,
    pub index_count: u32,
    pub bounding: BoundingSphere,
}

impl Mesh {
    /// Mesh from a flat xyz position array, computing counts and bounds
    pub fn from_positions(handle: u64, primitive: Primitive, positions: Vec<f32>) -> Self {
        let bounding = BoundingSphere::from_positions(&positions);
        let vertex_count = (positions.len() / 3) as u32;
        Self {
            handle,
            primitive,
            positions,
            vertex_count,
            index_count: 0,
            bounding,
        }
    }
}

/// Resource lookup boundary; `None` means "not loaded yet"
pub trait AssetProvider {
    fn shader(&self, key: ShaderKey) -> Option<&Shader>;
    fn mesh(&self, key: MeshKey) -> Option<&Mesh>;
    fn wav(&self, key: WavKey) -> Option<Arc<Wav>>;
}

/// Plain in-memory asset table, indexed by key
pub struct AssetStore {
    shaders: [Option<Shader>; ShaderKey::COUNT],
    meshes: [Option<Mesh>; MeshKey::COUNT],
    wavs: [Option<Arc<Wav>>; WavKey::COUNT],
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore {
    pub fn new() -> Self {
        Self {
            shaders: std::array::from_fn(|_| None),
            meshes: std::array::from_fn(|_| None),
            wavs: std::array::from_fn(|_| None),
        }
    }

    pub fn insert_shader(&mut self, key: ShaderKey, shader: Shader) {
        self.shaders[key as usize] = Some(shader);
    }

    pub fn insert_mesh(&mut self, key: MeshKey, mesh: Mesh) {
        self.meshes[key as usize] = Some(mesh);
    }

    pub fn insert_wav(&mut self, key: WavKey, wav: Wav) {
        self.wavs[key as usize] = Some(Arc::new(wav));
    }
}

impl AssetProvider for AssetStore {
    fn shader(&self, key: ShaderKey) -> Option<&Shader> {
        self.shaders[key as usize].as_ref()
    }

    fn mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes[key as usize].as_ref()
    }

    fn wav(&self, key: WavKey) -> Option<Arc<Wav>> {
        self.wavs[key as usize].clone()
    }
}
