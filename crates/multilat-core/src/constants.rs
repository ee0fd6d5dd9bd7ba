//! Simulation constants and tuning parameters.

/// Default simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World ---

/// Default number of spatial dimensions.
pub const DEFAULT_DIMENSION: usize = 2;

/// Default half-width of the world on every axis (units).
pub const DEFAULT_WORLD_EXTENT: f64 = 100.0;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

// --- Target motion ---

/// Maximum velocity change per second on each axis (units/s²).
pub const TARGET_ACCELERATION: f64 = 5.0;

/// Speed cap for targets (units/s).
pub const TARGET_MAX_SPEED: f64 = 10.0;

/// Velocity factor applied to an axis component after a boundary bounce.
pub const BOUNCE_DAMPING: f64 = 0.8;

// --- Sensors ---

/// Default detection radius for randomly placed sensors (units).
pub const DEFAULT_DETECTION_RADIUS: f64 = 100.0;

// --- Solver ---

/// Relative tolerance below which a pivot or singular value counts as zero.
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Sentinel for "no estimate" residuals and localisation errors.
pub const NO_ESTIMATE: f64 = -1.0;
