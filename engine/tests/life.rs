use skirmish::life::*;

fn noop_log(_: String) {}

#[test]
fn dropping_below_one_knocks_unconscious() {
    let mut h = Health::new(1);
    let changed = apply_damage("Hero", &mut h, 2, noop_log);
    assert!(changed);
    assert_eq!(h.hp, -1);
    assert_eq!(h.state, LifeState::Unconscious);
    assert!(h.is_alive());
    assert!(!h.is_conscious());
}

#[test]
fn exactly_zero_hp_is_unconscious_not_dead() {
    let mut h = Health::new(5);
    apply_damage("Hero", &mut h, 5, noop_log);
    assert_eq!(h.hp, 0);
    assert_eq!(h.state, LifeState::Unconscious);
}

#[test]
fn the_death_threshold_kills() {
    let mut h = Health::new(1);
    apply_damage("Hero", &mut h, 11, noop_log);
    assert_eq!(h.hp, DEATH_THRESHOLD);
    assert_eq!(h.state, LifeState::Dead);
    assert!(!h.is_alive());
}

#[test]
fn dead_is_terminal() {
    let mut h = Health::new(1);
    apply_damage("Hero", &mut h, 20, noop_log);
    assert_eq!(h.state, LifeState::Dead);

    let hp_at_death = h.hp;
    assert!(!apply_damage("Hero", &mut h, 5, noop_log));
    assert_eq!(h.hp, hp_at_death);

    heal("Hero", &mut h, 50, noop_log);
    assert_eq!(h.hp, hp_at_death);
    assert_eq!(h.state, LifeState::Dead);
}

#[test]
fn state_change_is_reported_once() {
    let mut h = Health::new(10);
    assert!(!apply_damage("Hero", &mut h, 3, noop_log));
    assert!(apply_damage("Hero", &mut h, 7, noop_log));
    // already unconscious, falling further is not a change
    assert!(!apply_damage("Hero", &mut h, 3, noop_log));
    assert_eq!(h.hp, -3);
}

#[test]
fn nonpositive_damage_is_a_noop() {
    let mut h = Health::new(10);
    assert!(!apply_damage("Hero", &mut h, 0, noop_log));
    assert!(!apply_damage("Hero", &mut h, -4, noop_log));
    assert_eq!(h.hp, 10);
}

#[test]
fn healing_clamps_at_max() {
    let mut h = Health::new(10);
    apply_damage("Hero", &mut h, 3, noop_log);
    heal("Hero", &mut h, 50, noop_log);
    assert_eq!(h.hp, 10);
    assert_eq!(h.state, LifeState::Conscious);
}

#[test]
fn healing_above_zero_wakes() {
    let mut h = Health::new(10);
    apply_damage("Hero", &mut h, 13, noop_log);
    assert_eq!(h.state, LifeState::Unconscious);

    heal("Hero", &mut h, 5, noop_log);
    assert_eq!(h.hp, 2);
    assert_eq!(h.state, LifeState::Conscious);
}

#[test]
fn healing_that_leaves_hp_at_or_below_zero_does_not_wake() {
    let mut h = Health::new(10);
    apply_damage("Hero", &mut h, 15, noop_log);
    assert_eq!(h.hp, -5);

    heal("Hero", &mut h, 3, noop_log);
    assert_eq!(h.hp, -2);
    assert_eq!(h.state, LifeState::Unconscious);

    heal("Hero", &mut h, 0, noop_log);
    assert_eq!(h.hp, -2);
}

#[test]
fn transitions_are_logged() {
    let mut h = Health::new(5);
    let mut seen = vec![];
    apply_damage("Hero", &mut h, 6, |s| seen.push(s));
    assert!(seen.iter().any(|s| s.contains("falls unconscious")));

    heal("Hero", &mut h, 4, |s| seen.push(s));
    assert!(seen.iter().any(|s| s.contains("regains consciousness")));

    apply_damage("Hero", &mut h, 20, |s| seen.push(s));
    assert!(seen.iter().any(|s| s.contains("dies at")));
}
