use skirmish::LifeState;
use skirmish::api::{MatchupConfig, run_matchup};

#[test]
fn matchup_api_smoke() {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let target_path = manifest
        .join("content/targets/goblin.json")
        .to_string_lossy()
        .into_owned();
    let weapons_path = manifest
        .join("content/weapons/basic.json")
        .to_string_lossy()
        .into_owned();

    let cfg = MatchupConfig {
        target_path: Some(target_path),
        weapons_path: Some(weapons_path),
        target_id: None,
        weapons_id: None,
        weapon: "longsword".to_string(),
        attacker_strength: Some(2),
        seed: 2025,
        max_swings: None,
    };
    let report = run_matchup(cfg).expect("matchup ran");
    assert!(report.swings > 0);
    assert!(!report.log.is_empty());
    // end state and hit points must agree
    if report.target_state == LifeState::Conscious {
        assert!(report.target_hp_end > 0);
    } else {
        assert!(report.target_hp_end <= 0);
    }
}

#[test]
fn a_bad_target_path_reports_the_file() {
    let cfg = MatchupConfig {
        target_path: Some("/no/such/goblin.json".into()),
        target_id: None,
        weapons_path: None,
        weapons_id: Some("basic".into()),
        weapon: "longsword".into(),
        attacker_strength: None,
        seed: 1,
        max_swings: None,
    };
    let err = run_matchup(cfg).unwrap_err();
    assert!(err.to_string().contains("goblin.json"));
}
