//! Simulation constants and tuning parameters.
//!
//! Distances are screen pixels, speeds are pixels per tick, durations are ticks.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Screen ---

/// Playfield width.
pub const SCREEN_WIDTH: f32 = 1000.0;

/// Playfield height.
pub const SCREEN_HEIGHT: f32 = 660.0;

// --- Player ---

pub const PLAYER_SPAWN_X: f32 = 100.0;
pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 30.0;

/// Horizontal acceleration while a direction is held.
pub const PLAYER_ACCELERATION: f32 = 0.2;

/// Horizontal deceleration with no direction held.
pub const PLAYER_DECELERATION: f32 = 0.1;

/// Braking rate when the held direction opposes current motion.
pub const PLAYER_TURN_SPEED: f32 = 0.2;

/// Constant downward pull with no vertical input.
pub const PLAYER_GRAVITY: f32 = 0.175;

/// Upward acceleration while ascending (negative is up).
pub const PLAYER_LIFT: f32 = -0.7;

pub const PLAYER_MAX_HORIZONTAL_SPEED: f32 = 6.0;
pub const PLAYER_MAX_VERTICAL_SPEED: f32 = 6.0;

/// Gravity can only pull the craft down to this speed.
pub const PLAYER_GRAVITY_CAP: f32 = PLAYER_MAX_VERTICAL_SPEED / 2.0;

/// Fraction of the velocity gap closed each tick under pointer control.
pub const POINTER_SMOOTHING: f32 = 0.1;

/// Below this distance to the pointer, a little gravity is reapplied so the craft hovers.
pub const POINTER_HOVER_RADIUS: f32 = 20.0;

pub const PLAYER_DEFAULT_MAX_HEALTH: i32 = 100;
pub const PLAYER_DEFAULT_SHOOT_DELAY: i32 = 15;
pub const PLAYER_BULLET_DAMAGE: i32 = 10;
pub const PLAYER_BULLET_SPEED: f32 = 10.0;

pub const PLAYER_MAX_MISSILES: u32 = 3;

/// Ticks to recharge one missile (15 seconds).
pub const PLAYER_MISSILE_RECHARGE_TICKS: u32 = 900;

/// Invulnerability window after a non-lethal hit.
pub const PLAYER_HIT_FLASH_TICKS: u32 = 10;

/// Length of the death animation before the run ends.
pub const PLAYER_DEATH_TICKS: u32 = 60;

// --- Enemies ---

pub const ENEMY_WIDTH: f32 = 50.0;
pub const ENEMY_HEIGHT: f32 = 30.0;

/// Enemies beyond this margin past either side edge are removed.
pub const ENEMY_OFFSCREEN_MARGIN: f32 = 100.0;

/// Vertical offset of an enemy's gun relative to its top edge.
pub const ENEMY_GUN_OFFSET_Y: f32 = 15.0;

/// Spawn y is kept this far from the top and bottom edges.
pub const ENEMY_SPAWN_MARGIN: i32 = 50;

/// Default horizontal speed of non-banking enemies.
pub const ENEMY_CRUISE_SPEED: f32 = 3.0;

pub const ENEMY_BULLET_DAMAGE: i32 = 10;

/// Bankers never exceed this bank angle (degrees) in either direction.
pub const BANKER_MAX_ANGLE: i32 = 25;

/// Fraction of the remaining angle closed each tick while banking.
pub const BANKER_TURN_RATE: f32 = 0.05;

/// Below this angle gap (degrees) the banker flies level at full speed.
pub const BANKER_TURN_THRESHOLD: f32 = 0.5;

/// Speed factor while a turn is in progress.
pub const BANKER_TURN_SPEED_FACTOR: f32 = 0.8;

pub const BANKER_FIRST_RETARGET_MIN: u32 = 120;
pub const BANKER_FIRST_RETARGET_MAX: u32 = 210;
pub const BANKER_RETARGET_MIN: u32 = 180;
pub const BANKER_RETARGET_MAX: u32 = 240;

/// Banker shots leave along the heading at this speed.
pub const BANKER_SHOT_SPEED: f32 = 10.0;

/// Flanker shots travel right at this speed.
pub const FLANKER_SHOT_SPEED: f32 = 8.0;

/// Bombers only drop while this far inside either side edge.
pub const BOMBER_DROP_MARGIN: f32 = 50.0;

/// Per-tick chance of a flanker exhaust particle.
pub const FLANKER_TRAIL_CHANCE: f64 = 0.2;

/// Health fraction at or below which damaged entities trail smoke.
pub const SMOKE_HEALTH_FRACTION: f32 = 0.5;

/// Per-tick chance of a smoke puff on a damaged entity.
pub const SMOKE_CHANCE: f64 = 0.2;

// --- Projectiles ---

pub const BULLET_WIDTH: f32 = 8.0;
pub const BULLET_HEIGHT: f32 = 4.0;
pub const ENEMY_BULLET_SPEED: f32 = 7.0;

pub const PLAYER_MISSILE_WIDTH: f32 = 15.0;
pub const PLAYER_MISSILE_HEIGHT: f32 = 5.0;
pub const PLAYER_MISSILE_SPEED: f32 = 9.0;
pub const PLAYER_MISSILE_DAMAGE: i32 = 30;

pub const ENEMY_MISSILE_SPEED: f32 = 3.0;
pub const ENEMY_MISSILE_DAMAGE: i32 = 20;

/// Constant leftward drift applied to enemy missiles on top of their heading.
pub const ENEMY_MISSILE_DRIFT: f32 = 1.5;

/// Default enemy missile lifespan (5 seconds).
pub const ENEMY_MISSILE_LIFESPAN_TICKS: u32 = 300;

/// Enemy missiles re-derive their heading at this interval.
pub const ENEMY_MISSILE_RETARGET_TICKS: u32 = 12;

/// Homing missiles are removed once this far outside the screen.
pub const MISSILE_OFFSCREEN_MARGIN: f32 = 50.0;

pub const BOMB_WIDTH: f32 = 10.0;
pub const BOMB_HEIGHT: f32 = 15.0;
pub const BOMB_DRIFT_X: f32 = -0.5;
pub const BOMB_FALL_SPEED: f32 = 4.0;
pub const BOMB_DAMAGE: i32 = 30;

/// Minimum distance used as a divisor in targeting math.
pub const MIN_TARGET_DISTANCE: f32 = 1.0;

// --- Scheduling ---

/// Endless-mode spawn interval.
pub const ENDLESS_SPAWN_INTERVAL: u32 = 120;

/// Endless-mode variant weights, in `EnemyKind::ALL` order.
pub const ENDLESS_SPAWN_WEIGHTS: [u32; 7] = [20, 30, 20, 10, 10, 7, 7];

/// Generated-level variant weights, in `EnemyKind::ALL` order.
pub const LEVEL_SPAWN_WEIGHTS: [u32; 7] = [30, 25, 15, 10, 10, 5, 5];

/// Number of levels in the campaign.
pub const LEVEL_COUNT: u32 = 25;

// --- Particles ---

pub const ENEMY_DEATH_PARTICLES: usize = 15;
pub const PLAYER_DEATH_PARTICLES: usize = 20;
pub const PLAYER_HIT_PARTICLES: usize = 8;
pub const ENEMY_HIT_PARTICLES: usize = 3;
pub const BOMB_TRAIL_PARTICLES: usize = 5;

// --- Shop ---

pub const HEALTH_UPGRADE_STEP: i32 = 10;
pub const HEALTH_UPGRADE_COST_MULTIPLIER: f64 = 1.5;
pub const FIRERATE_UPGRADE_STEP: i32 = 3;
pub const FIRERATE_UPGRADE_COST_MULTIPLIER: f64 = 1.75;

/// Shoot delay never drops below this.
pub const MIN_SHOOT_DELAY: i32 = 5;

pub const DEFAULT_HEALTH_UPGRADE_COST: u32 = 100;
pub const DEFAULT_FIRERATE_UPGRADE_COST: u32 = 150;
