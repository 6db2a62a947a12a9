//! Entity spawn factories for the simulation world.
//!
//! Creates enemy and projectile entities with the appropriate component
//! bundles. Every entity gets a fresh `SpawnIndex`.

use glam::Vec2;
use hecs::{Entity, World};

use skyraid_core::components::*;
use skyraid_core::constants::*;
use skyraid_core::enums::Side;
use skyraid_enemy_ai::behavior::{Shot, ShotKind};
use skyraid_enemy_ai::profiles::SpawnState;

/// Hands out monotonically increasing spawn indices.
#[derive(Debug, Clone, Default)]
pub struct SpawnCounter {
    next: u64,
}

impl SpawnCounter {
    pub fn next(&mut self) -> SpawnIndex {
        let index = SpawnIndex(self.next);
        self.next += 1;
        index
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// Spawn an enemy from a pre-rolled spawn state.
pub fn spawn_enemy(world: &mut World, counter: &mut SpawnCounter, state: &SpawnState) -> Entity {
    world.spawn((
        Enemy {
            kind: state.kind,
            fire_cooldown: state.fire_cooldown,
            dead: false,
        },
        state.behavior,
        Position(state.position),
        Velocity(Vec2::ZERO),
        Hitbox::new(ENEMY_WIDTH, ENEMY_HEIGHT),
        Health::new(state.max_health),
        counter.next(),
    ))
}

fn spawn_projectile(
    world: &mut World,
    counter: &mut SpawnCounter,
    projectile: Projectile,
    origin: Vec2,
    velocity: Vec2,
    hitbox: Hitbox,
) -> Entity {
    world.spawn((
        projectile,
        Position(origin),
        Velocity(velocity),
        hitbox,
        counter.next(),
    ))
}

/// Player gun round, flying right.
pub fn spawn_player_bullet(world: &mut World, counter: &mut SpawnCounter, origin: Vec2) -> Entity {
    spawn_projectile(
        world,
        counter,
        Projectile {
            motion: ProjectileMotion::Straight,
            side: Side::Player,
            damage: PLAYER_BULLET_DAMAGE,
        },
        origin,
        Vec2::new(PLAYER_BULLET_SPEED, 0.0),
        Hitbox::new(BULLET_WIDTH, BULLET_HEIGHT),
    )
}

/// Player homing missile, launched straight at `target`.
pub fn spawn_player_missile(
    world: &mut World,
    counter: &mut SpawnCounter,
    origin: Vec2,
    target: Vec2,
) -> Entity {
    spawn_projectile(
        world,
        counter,
        Projectile {
            motion: ProjectileMotion::PlayerHoming {
                speed: PLAYER_MISSILE_SPEED,
            },
            side: Side::Player,
            damage: PLAYER_MISSILE_DAMAGE,
        },
        origin,
        crate::guidance::pure_pursuit(origin, target, PLAYER_MISSILE_SPEED),
        Hitbox::new(PLAYER_MISSILE_WIDTH, PLAYER_MISSILE_HEIGHT),
    )
}

/// Turn an enemy's shot into a projectile entity.
pub fn spawn_enemy_shot(
    world: &mut World,
    counter: &mut SpawnCounter,
    shot: &Shot,
    missile_lifespan: u32,
) -> Entity {
    let (motion, hitbox) = match shot.kind {
        ShotKind::Bullet => (
            ProjectileMotion::Straight,
            Hitbox::new(BULLET_WIDTH, BULLET_HEIGHT),
        ),
        ShotKind::HomingMissile => (
            enemy_missile_motion(missile_lifespan),
            Hitbox::new(BULLET_WIDTH, BULLET_HEIGHT),
        ),
        ShotKind::Bomb => (
            ProjectileMotion::Ballistic {
                rotation: 0.0,
                spin: 0.0,
            },
            Hitbox::new(BOMB_WIDTH, BOMB_HEIGHT),
        ),
    };
    spawn_projectile(
        world,
        counter,
        Projectile {
            motion,
            side: Side::Enemy,
            damage: shot.damage,
        },
        shot.origin,
        shot.velocity,
        hitbox,
    )
}

/// Fresh enemy missile state. The heading starts due left and is re-derived
/// on the first tick.
pub fn enemy_missile_motion(lifespan: u32) -> ProjectileMotion {
    ProjectileMotion::EnemyHoming {
        speed: ENEMY_MISSILE_SPEED,
        heading: Vec2::NEG_X,
        age: 0,
        lifespan,
        retarget_timer: 0,
        retarget_interval: ENEMY_MISSILE_RETARGET_TICKS,
    }
}
