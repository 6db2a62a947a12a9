use skyraid_core::constants::*;
use skyraid_core::enums::UpgradeKind;

use crate::progress::Progress;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShopError {
    /// Banked plus session score does not cover the price.
    #[error("Insufficient score: {upgrade:?} costs {cost}, {available} available")]
    InsufficientScore {
        upgrade: UpgradeKind,
        cost: u32,
        available: u32,
    },
}

/// What a successful purchase took and from where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub upgrade: UpgradeKind,
    pub cost: u32,
    /// Portion paid from the current session score.
    pub from_session: u32,
    /// Portion paid from banked unspent score.
    pub from_unspent: u32,
}

/// Current price of `upgrade`.
pub fn upgrade_cost(progress: &Progress, upgrade: UpgradeKind) -> u32 {
    match upgrade {
        UpgradeKind::Health => progress.upgrades.health_upgrade_cost,
        UpgradeKind::FireRate => progress.upgrades.firerate_upgrade_cost,
    }
}

/// Score the player can spend right now.
pub fn available_score(progress: &Progress, session_score: u32) -> u32 {
    progress.unspent_score.saturating_add(session_score)
}

/// Buy one step of `upgrade`, draining the session score before banked score.
pub fn purchase(
    progress: &mut Progress,
    session_score: &mut u32,
    upgrade: UpgradeKind,
) -> Result<Receipt, ShopError> {
    let cost = upgrade_cost(progress, upgrade);
    let available = available_score(progress, *session_score);
    if available < cost {
        return Err(ShopError::InsufficientScore {
            upgrade,
            cost,
            available,
        });
    }

    let from_session = cost.min(*session_score);
    let from_unspent = cost - from_session;
    *session_score -= from_session;
    progress.unspent_score -= from_unspent;

    let upgrades = &mut progress.upgrades;
    match upgrade {
        UpgradeKind::Health => {
            upgrades.max_health += HEALTH_UPGRADE_STEP;
            upgrades.health_upgrade_cost =
                (upgrades.health_upgrade_cost as f64 * HEALTH_UPGRADE_COST_MULTIPLIER) as u32;
        }
        UpgradeKind::FireRate => {
            upgrades.shoot_delay = (upgrades.shoot_delay - FIRERATE_UPGRADE_STEP).max(MIN_SHOOT_DELAY);
            upgrades.firerate_upgrade_cost =
                (upgrades.firerate_upgrade_cost as f64 * FIRERATE_UPGRADE_COST_MULTIPLIER) as u32;
        }
    }

    tracing::info!(?upgrade, cost, from_session, from_unspent, "upgrade purchased");

    Ok(Receipt {
        upgrade,
        cost,
        from_session,
        from_unspent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_cost_purchase_zeroes_available() {
        let mut progress = Progress {
            unspent_score: 100,
            ..Progress::default()
        };
        let mut session = 0;
        let receipt = purchase(&mut progress, &mut session, UpgradeKind::Health).unwrap();
        assert_eq!(receipt.cost, 100);
        assert_eq!(available_score(&progress, session), 0);
        assert_eq!(progress.upgrades.max_health, 110);
        assert_eq!(progress.upgrades.health_upgrade_cost, 150);
    }

    #[test]
    fn session_score_is_spent_first() {
        let mut progress = Progress {
            unspent_score: 500,
            ..Progress::default()
        };
        let mut session = 60;
        let receipt = purchase(&mut progress, &mut session, UpgradeKind::FireRate).unwrap();
        assert_eq!(receipt.from_session, 60);
        assert_eq!(receipt.from_unspent, 90);
        assert_eq!(session, 0);
        assert_eq!(progress.unspent_score, 410);
        assert_eq!(progress.upgrades.shoot_delay, 12);
        assert_eq!(progress.upgrades.firerate_upgrade_cost, 262);
    }

    #[test]
    fn insufficient_score_changes_nothing() {
        let mut progress = Progress {
            unspent_score: 40,
            ..Progress::default()
        };
        let before = progress.clone();
        let mut session = 59;
        let err = purchase(&mut progress, &mut session, UpgradeKind::Health).unwrap_err();
        assert_eq!(
            err,
            ShopError::InsufficientScore {
                upgrade: UpgradeKind::Health,
                cost: 100,
                available: 99,
            }
        );
        assert_eq!(progress, before);
        assert_eq!(session, 59);
    }

    #[test]
    fn fire_rate_floors_at_minimum_delay() {
        let mut progress = Progress {
            unspent_score: 100_000,
            ..Progress::default()
        };
        let mut session = 0;
        for _ in 0..6 {
            purchase(&mut progress, &mut session, UpgradeKind::FireRate).unwrap();
        }
        assert_eq!(progress.upgrades.shoot_delay, MIN_SHOOT_DELAY);
    }

    #[test]
    fn health_cost_truncates() {
        let mut progress = Progress {
            unspent_score: 10_000,
            ..Progress::default()
        };
        let mut session = 0;
        // 100 -> 150 -> 225 -> 337
        for _ in 0..3 {
            purchase(&mut progress, &mut session, UpgradeKind::Health).unwrap();
        }
        assert_eq!(progress.upgrades.health_upgrade_cost, 337);
        assert_eq!(progress.upgrades.max_health, 130);
    }
}
