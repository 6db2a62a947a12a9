#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use skyraid_core::components::{Enemy, EnemyBehavior};
    use skyraid_core::constants::*;
    use skyraid_core::enums::EnemyKind;

    use crate::behavior::{advance, fire, is_off_screen, should_fire, FireContext, ShotKind};
    use crate::profiles::{get_profile, initial_state};

    struct TestEnemy {
        enemy: Enemy,
        behavior: EnemyBehavior,
        position: Vec2,
    }

    fn spawn(kind: EnemyKind, rng: &mut ChaCha8Rng) -> TestEnemy {
        let state = initial_state(kind, rng);
        TestEnemy {
            enemy: Enemy {
                kind,
                fire_cooldown: state.fire_cooldown,
                dead: false,
            },
            behavior: state.behavior,
            position: state.position,
        }
    }

    fn step(e: &mut TestEnemy, rng: &mut ChaCha8Rng, ticks: u32) {
        for _ in 0..ticks {
            advance(&mut e.enemy, &mut e.behavior, &mut e.position, rng);
        }
    }

    fn ctx_at(y: f32) -> FireContext {
        FireContext {
            player_position: Vec2::new(PLAYER_SPAWN_X, y),
        }
    }

    #[test]
    fn test_spawn_bands() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            for kind in EnemyKind::ALL {
                let state = initial_state(kind, &mut rng);
                let profile = get_profile(kind);
                assert!(state.position.y >= profile.spawn_y_min as f32);
                assert!(state.position.y <= profile.spawn_y_max as f32);
                assert!(state.fire_cooldown >= profile.initial_cooldown.min);
                assert!(state.fire_cooldown <= profile.initial_cooldown.max);
            }
        }
    }

    #[test]
    fn test_flanker_enters_from_left() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut e = spawn(EnemyKind::Flanker, &mut rng);
        assert_eq!(e.position.x, -ENEMY_OFFSCREEN_MARGIN);
        assert!(!is_off_screen(e.position));
        step(&mut e, &mut rng, 10);
        assert!((e.position.x - (-70.0)).abs() < 1e-4);
    }

    #[test]
    fn test_drifter_moves_left_and_leaves() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut e = spawn(EnemyKind::Drifter, &mut rng);
        let velocity = advance(&mut e.enemy, &mut e.behavior, &mut e.position, &mut rng);
        assert_eq!(velocity, Vec2::new(-3.0, 0.0));
        // (1000 + 100) / 3 ticks brings it just past the removal margin.
        step(&mut e, &mut rng, 367);
        assert!(is_off_screen(e.position));
    }

    #[test]
    fn test_sentry_holds_at_stop_line() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut e = spawn(EnemyKind::Sentry, &mut rng);
        step(&mut e, &mut rng, 200);
        let held = e.position;
        assert!(held.x <= SCREEN_WIDTH * 0.8);
        assert!(held.x > SCREEN_WIDTH * 0.8 - ENEMY_CRUISE_SPEED);
        step(&mut e, &mut rng, 50);
        assert_eq!(e.position, held);
    }

    #[test]
    fn test_patroller_reverses_at_edges() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut e = spawn(EnemyKind::Patroller, &mut rng);
        step(&mut e, &mut rng, 2000);
        assert!(e.position.y >= -1.5);
        assert!(e.position.y <= SCREEN_HEIGHT - ENEMY_HEIGHT + 1.5);
        assert!(e.position.x <= SCREEN_WIDTH * 0.7);
    }

    #[test]
    fn test_launcher_fires_only_when_stopped_and_aligned() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut e = spawn(EnemyKind::Launcher, &mut rng);
        assert_eq!(e.enemy.fire_cooldown, 210);

        // Still approaching after a few ticks, even with a cold gun.
        step(&mut e, &mut rng, 5);
        e.enemy.fire_cooldown = 0;
        assert!(!should_fire(&e.enemy, &e.behavior, e.position, &ctx_at(e.position.y)));

        step(&mut e, &mut rng, 40);
        e.enemy.fire_cooldown = 0;
        assert!(e.position.x <= SCREEN_WIDTH * 0.9);
        assert!(should_fire(&e.enemy, &e.behavior, e.position, &ctx_at(e.position.y)));

        let far = if e.position.y > SCREEN_HEIGHT / 2.0 {
            e.position.y - SCREEN_HEIGHT / 2.0 - 1.0
        } else {
            e.position.y + SCREEN_HEIGHT / 2.0 + 1.0
        };
        assert!(!should_fire(&e.enemy, &e.behavior, e.position, &ctx_at(far)));

        let shot = fire(&mut e.enemy, &mut e.behavior, e.position, &mut rng);
        assert_eq!(shot.kind, ShotKind::HomingMissile);
        assert_eq!(shot.damage, ENEMY_MISSILE_DAMAGE);
        assert_eq!(e.enemy.fire_cooldown, 240);
    }

    #[test]
    fn test_banker_stays_in_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut e = spawn(EnemyKind::Banker, &mut rng);
        for _ in 0..600 {
            advance(&mut e.enemy, &mut e.behavior, &mut e.position, &mut rng);
            assert!(e.position.y >= SCREEN_HEIGHT * 0.2 - 1e-3);
            assert!(e.position.y <= SCREEN_HEIGHT * 0.8 + 1e-3);
            let angle = e.behavior.heading_degrees();
            assert!(angle.abs() <= BANKER_MAX_ANGLE as f32 + 1e-3);
        }
    }

    #[test]
    fn test_banker_shot_follows_heading() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut e = spawn(EnemyKind::Banker, &mut rng);
        if let EnemyBehavior::Bank { angle, .. } = &mut e.behavior {
            *angle = 20.0;
        }
        let shot = fire(&mut e.enemy, &mut e.behavior, e.position, &mut rng);
        let rad = 20f32.to_radians();
        assert!((shot.velocity.x + 10.0 * rad.cos()).abs() < 1e-4);
        assert!((shot.velocity.y - 10.0 * rad.sin()).abs() < 1e-4);
        assert_eq!(shot.damage, 20);
    }

    #[test]
    fn test_flanker_shoots_right_from_nose() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut e = spawn(EnemyKind::Flanker, &mut rng);
        let shot = fire(&mut e.enemy, &mut e.behavior, e.position, &mut rng);
        assert_eq!(shot.velocity, Vec2::new(FLANKER_SHOT_SPEED, 0.0));
        assert_eq!(shot.origin.x, e.position.x + ENEMY_WIDTH);
        assert!(e.enemy.fire_cooldown >= 60 && e.enemy.fire_cooldown <= 120);
    }

    #[test]
    fn test_bomber_drops_only_inside_margins() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let mut e = spawn(EnemyKind::Bomber, &mut rng);
        if let EnemyBehavior::Bomb { bomb_cooldown, .. } = &mut e.behavior {
            *bomb_cooldown = 0;
        }
        // Spawns at the right edge, outside the drop window.
        assert!(!should_fire(&e.enemy, &e.behavior, e.position, &ctx_at(300.0)));

        e.position.x = 500.0;
        assert!(should_fire(&e.enemy, &e.behavior, e.position, &ctx_at(300.0)));
        let shot = fire(&mut e.enemy, &mut e.behavior, e.position, &mut rng);
        assert_eq!(shot.kind, ShotKind::Bomb);
        assert_eq!(shot.velocity, Vec2::new(BOMB_DRIFT_X, BOMB_FALL_SPEED));
        assert_eq!(shot.damage, BOMB_DAMAGE);
        assert!(!should_fire(&e.enemy, &e.behavior, e.position, &ctx_at(300.0)));
    }

    #[test]
    fn test_dead_enemy_never_fires() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut e = spawn(EnemyKind::Drifter, &mut rng);
        e.enemy.fire_cooldown = 0;
        e.enemy.dead = true;
        assert!(!should_fire(&e.enemy, &e.behavior, e.position, &ctx_at(300.0)));
    }

    #[test]
    fn test_same_seed_same_enemy() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for kind in EnemyKind::ALL {
            assert_eq!(initial_state(kind, &mut a), initial_state(kind, &mut b));
        }
    }
}
