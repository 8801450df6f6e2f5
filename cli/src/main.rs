use clap::{Parser, Subcommand, ValueEnum};
use skirmish::api::{self, MatchupConfig};
use skirmish::{AdMode, Combatant, Dice, evaluate, roll_ability_scores, Weapon};
use std::{fs, path::PathBuf};

#[derive(Copy, Clone, ValueEnum)]
enum Adv {
    Normal,
    Advantage,
    Disadvantage,
}

#[derive(Subcommand)]
enum Cmd {
    /// Evaluate dice notation one or more times
    Roll {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Number of evaluations
        #[arg(long, default_value_t = 1)]
        times: u32,
        /// Notation such as "2d8 +3" or "1d20"
        notation: String,
    },
    /// Roll a d20 with a modifier and (dis)advantage
    D20 {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Advantage mode
        #[arg(long, value_enum, default_value_t = Adv::Normal)]
        adv: Adv,
        /// Modifier added to the kept die
        #[arg(long, default_value_t = 0)]
        modifier: i32,
    },
    /// Generate six ability scores, best three of 5d6 each
    Abilities {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// List weapons from a JSON file, or the builtin table
    Weapons {
        /// Path to a JSON array of weapons (defaults to builtins)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Serialize a builtin weapon to JSON (stdout)
    WeaponDump {
        /// Weapon name, case-insensitive
        #[arg(long, default_value = "longsword")]
        name: String,
        /// Pretty-print JSON
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
    /// Load a weapon from a JSON file and describe it
    WeaponLoad {
        /// Path to JSON file containing one weapon
        #[arg(long)]
        file: PathBuf,
    },
    /// Print the sample fighter's character sheet
    Sheet {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 222)]
        seed: u64,
    },
    /// Demo: two fresh combatants, one swing
    Demo {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 222)]
        seed: u64,
    },
    /// Swing at a builtin target until it drops, printing the transcript
    Matchup {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Builtin target id
        #[arg(long, default_value = "goblin")]
        target: String,
        /// Weapon name from the builtin table
        #[arg(long, default_value = "longsword")]
        weapon: String,
        /// Attacker strength modifier
        #[arg(long, default_value_t = 2)]
        strength: i32,
        /// Cap on the number of swings
        #[arg(long, default_value_t = 30)]
        max_swings: u32,
    },
}

#[derive(Parser)]
#[command(name = "skirmish-cli")]
#[command(about = "Skirmish CLI harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_mode(a: Adv) -> AdMode {
    match a {
        Adv::Normal => AdMode::Normal,
        Adv::Advantage => AdMode::Advantage,
        Adv::Disadvantage => AdMode::Disadvantage,
    }
}

fn sample_fighter(name: &str, dice: &mut Dice) -> Combatant {
    // The classic demo fighter: +2 strength, book defaults elsewhere.
    let mut c = Combatant::new(name, dice);
    c.abilities.strength = 2;
    c
}

fn builtin_weapon_list() -> anyhow::Result<Vec<Weapon>> {
    let mut weapons = Vec::new();
    for (_, text) in skirmish::content::builtin_weapons() {
        let mut batch: Vec<Weapon> = serde_json::from_str(text)?;
        weapons.append(&mut batch);
    }
    Ok(weapons)
}

fn main() -> anyhow::Result<()> {
    skirmish::init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Roll {
            seed,
            times,
            notation,
        } => {
            let mut dice = Dice::from_seed(seed);
            for _ in 0..times {
                println!("{}", evaluate(&mut dice, &notation)?);
            }
        }
        Cmd::D20 {
            seed,
            adv,
            modifier,
        } => {
            let mode = to_mode(adv);
            let mut dice = Dice::from_seed(seed);
            let (rolls, kept) = dice.d20_detailed(mode);
            println!(
                "rolls={:?} kept={} mod={:+} total={}",
                rolls,
                kept,
                modifier,
                kept as i32 + modifier
            );
        }
        Cmd::Abilities { seed } => {
            let mut dice = Dice::from_seed(seed);
            for score in roll_ability_scores(&mut dice) {
                println!("{}", score);
            }
        }
        Cmd::Weapons { file } => {
            let weapons = match file {
                Some(path) => {
                    let json = fs::read_to_string(path)?;
                    serde_json::from_str::<Vec<Weapon>>(&json)?
                }
                None => builtin_weapon_list()?,
            };
            for weapon in &weapons {
                println!("{}", weapon);
            }
        }
        Cmd::WeaponDump { name, pretty } => {
            let weapons = builtin_weapon_list()?;
            let weapon = api::find_weapon(&weapons, &name)
                .ok_or_else(|| anyhow::anyhow!("no builtin weapon named '{name}'"))?;
            if pretty {
                println!("{}", serde_json::to_string_pretty(weapon)?);
            } else {
                println!("{}", weapon.to_json()?);
            }
        }
        Cmd::WeaponLoad { file } => {
            let weapon = Weapon::load(&file)?;
            println!("{}", weapon);
        }
        Cmd::Sheet { seed } => {
            let mut dice = Dice::from_seed(seed);
            let fighter = sample_fighter("thing1", &mut dice);
            println!("{}", fighter);
        }
        Cmd::Demo { seed } => {
            let mut dice = Dice::from_seed(seed);
            let thing1 = sample_fighter("thing1", &mut dice);
            let mut thing2 = Combatant::new("thing2", &mut dice);
            thing2.add_item("300gp");
            println!("{}", thing1);
            println!();
            println!("{}", thing2);
            println!();
            let outcome = thing1.attack(&mut dice, &mut thing2)?;
            println!("{}", outcome);
        }
        Cmd::Matchup {
            seed,
            target,
            weapon,
            strength,
            max_swings,
        } => {
            let cfg = MatchupConfig {
                target_path: None,
                target_id: Some(target),
                weapons_path: None,
                weapons_id: Some("basic".into()),
                weapon,
                attacker_strength: Some(strength),
                seed,
                max_swings: Some(max_swings),
            };
            let report = api::run_matchup(cfg)?;
            for line in &report.log {
                println!("{}", line);
            }
            println!(
                "swings={} hits={} crits={} misses={} damage={} => {:?} at {} HP",
                report.swings,
                report.hits,
                report.crits,
                report.misses,
                report.damage_dealt,
                report.target_state,
                report.target_hp_end
            );
        }
    }
    Ok(())
}
