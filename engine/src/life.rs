use serde::{Deserialize, Serialize};

/// Death floor: a combatant whose hit points reach this value is dead.
pub const DEATH_THRESHOLD: i32 = -10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Conscious,
    Unconscious,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
    pub state: LifeState,
}

impl Health {
    pub fn new(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            state: LifeState::Conscious,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state != LifeState::Dead
    }

    pub fn is_conscious(&self) -> bool {
        self.state == LifeState::Conscious
    }
}

/// Apply damage and handle the unconscious/dead transitions. Dead creatures
/// and non-positive amounts are no-ops. Hit points keep falling below zero;
/// at [`DEATH_THRESHOLD`] the state turns Dead and stays there. Returns true
/// when the blow changed the life state.
pub fn apply_damage(
    name: &str,
    health: &mut Health,
    amount: i32,
    mut log: impl FnMut(String),
) -> bool {
    if health.state == LifeState::Dead || amount <= 0 {
        return false;
    }
    let before = health.hp;
    health.hp -= amount;
    log(format!(
        "[DMG][{}] {} → {} (-{})",
        name, before, health.hp, amount
    ));

    let next = if health.hp <= DEATH_THRESHOLD {
        LifeState::Dead
    } else if health.hp < 1 {
        LifeState::Unconscious
    } else {
        LifeState::Conscious
    };
    if next == health.state {
        return false;
    }
    health.state = next;
    match next {
        LifeState::Unconscious => log(format!(
            "[STATE][{}] falls unconscious at {} HP",
            name, health.hp
        )),
        LifeState::Dead => log(format!("[STATE][{}] dies at {} HP", name, health.hp)),
        LifeState::Conscious => {}
    }
    true
}

/// Healing; wakes an unconscious creature once it is back above zero. Dead
/// creatures and non-positive amounts are no-ops; hit points clamp at
/// `max_hp`.
pub fn heal(name: &str, health: &mut Health, amount: i32, mut log: impl FnMut(String)) {
    if health.state == LifeState::Dead || amount <= 0 {
        return;
    }
    let before = health.hp;
    let was_uncon = health.state == LifeState::Unconscious;
    health.hp = (health.hp + amount).min(health.max_hp);
    if was_uncon && health.hp > 0 {
        health.state = LifeState::Conscious;
        log(format!(
            "[HEAL][{}] +{} HP ({} → {}) and regains consciousness",
            name, amount, before, health.hp
        ));
    } else {
        log(format!(
            "[HEAL][{}] +{} HP ({} → {})",
            name, amount, before, health.hp
        ));
    }
}
