//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    MainMenu,
    LevelSelect,
    Playing,
    Paused,
    Shop,
    LevelComplete,
    GameOver,
    /// Terminal: the process should exit.
    Quit,
}

impl GameState {
    /// Whether the simulation advances in this state.
    pub fn is_simulating(&self) -> bool {
        matches!(self, GameState::Playing)
    }
}

/// Enemy aircraft variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Constant leftward drift, periodic straight shot.
    Drifter,
    /// Drifts to a stop line, then holds and fires.
    Sentry,
    /// Drifts to a stop line, then patrols vertically.
    Patroller,
    /// Holds at a stop line and launches homing missiles when aligned with the player.
    Launcher,
    /// Banks smoothly between angles and fires along its heading.
    Banker,
    /// Enters from the left edge, flying right.
    Flanker,
    /// Flies the top band and drops bombs.
    Bomber,
}

impl EnemyKind {
    /// All variants, in catalogue order. Spawn weight tables index into this.
    pub const ALL: [EnemyKind; 7] = [
        EnemyKind::Drifter,
        EnemyKind::Sentry,
        EnemyKind::Patroller,
        EnemyKind::Launcher,
        EnemyKind::Banker,
        EnemyKind::Flanker,
        EnemyKind::Bomber,
    ];
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Projectile family, used by render views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileClass {
    Bullet,
    PlayerMissile,
    EnemyMissile,
    Bomb,
}

/// Player steering input scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Discrete acceleration from directional keys.
    #[default]
    Keyboard,
    /// Exponential smoothing toward the pointer position.
    Pointer,
}

impl ControlScheme {
    pub fn toggled(self) -> Self {
        match self {
            ControlScheme::Keyboard => ControlScheme::Pointer,
            ControlScheme::Pointer => ControlScheme::Keyboard,
        }
    }
}

/// Purchasable shop upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// +10 max health.
    Health,
    /// -3 ticks shoot delay.
    FireRate,
}

/// Cosmetic particle family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Death,
    Hit,
    Smoke,
    Trail,
}

/// Coarse health tier for selecting damage decals. Cosmetic only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DamageState {
    #[default]
    Pristine,
    Scratched,
    Damaged,
    Critical,
}

impl DamageState {
    /// Tier for a health fraction in [0, 1].
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.75 {
            DamageState::Pristine
        } else if fraction > 0.5 {
            DamageState::Scratched
        } else if fraction > 0.25 {
            DamageState::Damaged
        } else {
            DamageState::Critical
        }
    }
}
