use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("skirmish-cli").unwrap()
}

#[test]
fn roll_is_deterministic_per_seed() {
    let first = cli()
        .args(["roll", "2d6 +1", "--seed", "42", "--times", "3"])
        .output()
        .unwrap();
    let second = cli()
        .args(["roll", "2d6 +1", "--seed", "42", "--times", "3"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(String::from_utf8_lossy(&first.stdout).lines().count(), 3);
}

#[test]
fn roll_rejects_bare_numbers() {
    cli()
        .args(["roll", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a leading"));
}

#[test]
fn d20_shows_the_raw_rolls() {
    cli()
        .args(["d20", "--adv", "advantage", "--modifier", "3", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rolls=[").and(predicate::str::contains("total=")));
}

#[test]
fn weapons_lists_the_builtin_table() {
    cli()
        .args(["weapons"])
        .assert()
        .success()
        .stdout(predicate::str::contains("longsword").and(predicate::str::contains("rapier")));
}

#[test]
fn weapon_dump_emits_json() {
    cli()
        .args(["weapon-dump", "--name", "rapier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"crit_range\": 19"));
}

#[test]
fn weapon_load_describes_the_file() {
    let path = std::env::temp_dir().join("skirmish-cli-test-weapon.json");
    std::fs::write(
        &path,
        r#"{"name": "mace", "damage": "1d6", "damage_type": "bludgeoning",
            "crit_range": 20, "bonuses": 0, "description": ""}"#,
    )
    .unwrap();
    cli()
        .args(["weapon-load", "--file", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: mace, 1d6 bludgeoning"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn sheet_prints_the_sample_fighter() {
    cli()
        .args(["sheet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Armor Class: 10"));
}

#[test]
fn demo_prints_two_sheets_and_a_swing() {
    cli()
        .args(["demo", "--seed", "222"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("thing1")
                .and(predicate::str::contains("thing2"))
                .and(predicate::str::contains("Inventory: 300gp")),
        );
}

#[test]
fn matchup_prints_a_transcript() {
    cli()
        .args(["matchup", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[START]").and(predicate::str::contains("[END]")));
}

#[test]
fn simulate_vs_reports_stats() {
    let target = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../engine/content/targets/goblin.json");
    Command::cargo_bin("simulate-vs")
        .unwrap()
        .args(["--target", target.to_str().unwrap(), "--trials", "20"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("simulate-vs results")
                .and(predicate::str::contains("drop rate")),
        );
}

#[test]
fn simulate_vs_adds_the_weapon_bonus_to_damage() {
    // Flat hit points and a zeroed dice override pin every number: with
    // strength 0 and the +1 longsword, each hit must deal exactly 1.
    let path = std::env::temp_dir().join("skirmish-cli-test-pinata.json");
    std::fs::write(
        &path,
        r#"{"name": "pinata", "armor_class": 1, "hit_points": "+5"}"#,
    )
    .unwrap();
    Command::cargo_bin("simulate-vs")
        .unwrap()
        .args([
            "--target",
            path.to_str().unwrap(),
            "--weapon",
            "longsword +1",
            "--dice",
            "+0",
            "--strength",
            "0",
            "--trials",
            "5",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("avg dmg per hit:    1.00")
                .and(predicate::str::contains("drop rate:          100.0%")),
        );
    let _ = std::fs::remove_file(&path);
}
