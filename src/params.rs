//! Tunable generation parameters.
//!
//! Only [`SceneParameters::count`] and [`SceneParameters::size`] affect
//! behavior; changing either through the control panel triggers a full
//! regeneration of the point cloud. The remaining fields are reserved:
//! they come from a broader generative-art parameter set and are kept with
//! their original defaults, but nothing reads them yet.

/// User-tunable parameters for point-cloud generation.
#[derive(Debug, Clone)]
pub struct SceneParameters {
    /// Number of particles. Regenerates the cloud on commit.
    pub count: u32,
    /// Point size in pixels, before display-density scaling.
    pub size: f32,

    // Reserved fields, not read by the particle or shader logic.
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: [f32; 3],
    pub outside_color: [f32; 3],
    pub time_scale: f32,
}

impl SceneParameters {
    /// Smallest selectable particle count.
    pub const COUNT_MIN: u32 = 100;
    /// Largest selectable particle count.
    pub const COUNT_MAX: u32 = 1_000_000;
    /// Slider step for the particle count.
    pub const COUNT_STEP: u32 = 100;

    /// Smallest selectable point size.
    pub const SIZE_MIN: f32 = 1.0;
    /// Largest selectable point size.
    pub const SIZE_MAX: f32 = 100.0;
}

impl Default for SceneParameters {
    fn default() -> Self {
        Self {
            count: 400_000,
            size: 5.0,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            // #ff6030
            inside_color: [1.0, 0.376, 0.188],
            // #1b3984
            outside_color: [0.106, 0.224, 0.518],
            time_scale: 1.0,
        }
    }
}
