//! The player's craft.
//!
//! Owned directly by `SimulationEngine` rather than the ECS world: there is
//! exactly one, and every system needs it.

use glam::Vec2;

use skyraid_campaign::Upgrades;
use skyraid_core::components::{Health, Hitbox};
use skyraid_core::constants::*;
use skyraid_core::enums::ControlScheme;
use skyraid_core::input::InputFrame;
use skyraid_core::state::PlayerView;
use skyraid_core::types::{floored_distance, Rect};

/// Result of a projectile striking the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Invulnerable or already dead; nothing happened.
    Ignored,
    /// Survived; hit flash started.
    Flashed,
    /// Health reached zero; death sequence started.
    Killed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner.
    pub position: Vec2,
    pub velocity: Vec2,
    pub hitbox: Hitbox,
    pub health: Health,
    /// Ticks between shots.
    pub shoot_delay: i32,
    pub shoot_cooldown: i32,
    pub missiles: u32,
    pub missile_recharge: u32,
    pub invulnerable: bool,
    pub hit_flash: u32,
    pub dead: bool,
    pub death_timer: u32,
    pub death_complete: bool,
}

impl Player {
    /// Fresh craft at the spawn point with the purchased upgrades applied.
    pub fn new(upgrades: &Upgrades) -> Self {
        Self {
            position: Vec2::new(PLAYER_SPAWN_X, (SCREEN_HEIGHT / 2.0).floor()),
            velocity: Vec2::ZERO,
            hitbox: Hitbox::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            health: Health::new(upgrades.max_health),
            shoot_delay: upgrades.shoot_delay.max(MIN_SHOOT_DELAY),
            shoot_cooldown: 0,
            missiles: PLAYER_MAX_MISSILES,
            missile_recharge: 0,
            invulnerable: false,
            hit_flash: 0,
            dead: false,
            death_timer: 0,
            death_complete: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.hitbox.rect(self.position)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Muzzle position: the middle of the nose.
    pub fn nose(&self) -> Vec2 {
        self.position + Vec2::new(self.hitbox.size.x, (self.hitbox.size.y / 2.0).floor())
    }

    /// Apply one tick of steering input to the velocity.
    pub fn steer(&mut self, input: &InputFrame, scheme: ControlScheme) {
        match (scheme, input.pointer) {
            (ControlScheme::Pointer, Some(target)) => self.steer_pointer(target),
            _ => self.steer_keyboard(input),
        }
        self.velocity.x = self
            .velocity
            .x
            .clamp(-PLAYER_MAX_HORIZONTAL_SPEED, PLAYER_MAX_HORIZONTAL_SPEED);
    }

    fn steer_keyboard(&mut self, input: &InputFrame) {
        let v = &mut self.velocity;

        if input.left {
            v.x = if v.x > 0.0 {
                (v.x - PLAYER_TURN_SPEED).max(0.0)
            } else {
                (v.x - PLAYER_ACCELERATION).max(-PLAYER_MAX_HORIZONTAL_SPEED)
            };
        } else if input.right {
            v.x = if v.x < 0.0 {
                (v.x + PLAYER_TURN_SPEED).min(0.0)
            } else {
                (v.x + PLAYER_ACCELERATION).min(PLAYER_MAX_HORIZONTAL_SPEED)
            };
        } else if v.x > 0.0 {
            v.x = (v.x - PLAYER_DECELERATION).max(0.0);
        } else if v.x < 0.0 {
            v.x = (v.x + PLAYER_DECELERATION).min(0.0);
        }

        if input.up {
            v.y = (v.y + PLAYER_LIFT).max(-PLAYER_MAX_VERTICAL_SPEED);
        } else if input.down {
            v.y = (v.y + PLAYER_ACCELERATION).min(PLAYER_MAX_VERTICAL_SPEED);
        } else {
            v.y += PLAYER_GRAVITY.min(PLAYER_GRAVITY_CAP - v.y);
        }
    }

    fn steer_pointer(&mut self, target: Vec2) {
        let delta = target - self.center();
        let dist = floored_distance(delta, MIN_TARGET_DISTANCE);
        let wanted = delta / dist
            * Vec2::new(PLAYER_MAX_HORIZONTAL_SPEED, PLAYER_MAX_VERTICAL_SPEED);
        self.velocity += (wanted - self.velocity) * POINTER_SMOOTHING;
        if dist < POINTER_HOVER_RADIUS {
            self.velocity.y += PLAYER_GRAVITY * 0.5;
        }
    }

    /// Move by the current velocity and clamp to the screen. Returns true if
    /// the craft hit the ground, which kills it outright.
    pub fn integrate(&mut self) -> bool {
        self.position += self.velocity;

        let max_x = SCREEN_WIDTH - self.hitbox.size.x;
        if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = 0.0;
        }
        if self.position.x > max_x {
            self.position.x = max_x;
            self.velocity.x = 0.0;
        }
        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.velocity.y = 0.0;
        }

        let floor = SCREEN_HEIGHT - self.hitbox.size.y;
        if self.position.y >= floor {
            self.position.y = floor;
            if !self.health.is_depleted() {
                self.health.deplete();
                return self.start_death();
            }
        }
        false
    }

    /// Fire the gun if it is ready. Returns the bullet origin.
    pub fn try_shoot(&mut self, trigger: bool) -> Option<Vec2> {
        if trigger && self.shoot_cooldown <= 0 {
            self.shoot_cooldown = self.shoot_delay;
            Some(self.nose())
        } else {
            None
        }
    }

    /// Spend one missile. Only call when a target exists. Returns the launch origin.
    pub fn take_missile(&mut self) -> Option<Vec2> {
        if self.dead || self.missiles == 0 {
            return None;
        }
        self.missiles -= 1;
        Some(self.nose())
    }

    /// Per-tick timers: gun cooldown, missile recharge, hit flash.
    pub fn tick_timers(&mut self) {
        if self.shoot_cooldown > 0 {
            self.shoot_cooldown -= 1;
        }

        if self.missiles < PLAYER_MAX_MISSILES {
            self.missile_recharge += 1;
            if self.missile_recharge >= PLAYER_MISSILE_RECHARGE_TICKS {
                self.missiles = (self.missiles + 1).min(PLAYER_MAX_MISSILES);
                self.missile_recharge = 0;
            }
        }

        if self.hit_flash > 0 {
            self.hit_flash -= 1;
            if self.hit_flash == 0 {
                self.invulnerable = false;
            }
        }
    }

    /// Take projectile damage.
    pub fn take_hit(&mut self, damage: i32) -> HitOutcome {
        if self.dead || self.invulnerable {
            return HitOutcome::Ignored;
        }
        self.health.apply_damage(damage);
        if self.health.is_depleted() {
            self.start_death();
            HitOutcome::Killed
        } else {
            self.hit_flash = PLAYER_HIT_FLASH_TICKS;
            self.invulnerable = true;
            HitOutcome::Flashed
        }
    }

    /// Instant kill from ramming an enemy. Returns true if this started the death sequence.
    pub fn ram(&mut self) -> bool {
        if self.dead || self.invulnerable {
            return false;
        }
        self.health.deplete();
        self.start_death()
    }

    /// Begin the death animation. Returns false if already dead.
    fn start_death(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        self.death_timer = PLAYER_DEATH_TICKS;
        self.death_complete = false;
        true
    }

    /// Count down the death animation. Returns true on the tick it finishes.
    pub fn advance_death(&mut self) -> bool {
        if !self.dead || self.death_complete {
            return false;
        }
        self.death_timer = self.death_timer.saturating_sub(1);
        if self.death_timer == 0 {
            self.death_complete = true;
            return true;
        }
        false
    }

    /// Alive and damaged enough to trail smoke.
    pub fn is_smoking(&self) -> bool {
        !self.dead && self.health.fraction() <= SMOKE_HEALTH_FRACTION
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            position: self.position,
            velocity: self.velocity,
            size: self.hitbox.size,
            health: self.health.current(),
            max_health: self.health.max(),
            health_fraction: self.health.fraction(),
            damage_state: self.health.damage_state(),
            missiles: self.missiles,
            max_missiles: PLAYER_MAX_MISSILES,
            invulnerable: self.invulnerable,
            hit_flash: self.hit_flash,
            dead: self.dead,
        }
    }
}
