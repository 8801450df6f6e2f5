use clap::Parser;
use encoding_rs::Encoding;
use serde::Deserialize;
use skirmish::api::find_weapon;
use skirmish::{AdMode, attack, damage, Dice, DiceExpression, Weapon};
use std::{fs, path::PathBuf};

#[derive(Parser)]
#[command(name = "simulate-vs")]
#[command(about = "Monte Carlo sim: many matchups vs a JSON target")]
struct Args {
    /// Path to target JSON (name, armor_class, hit_points)
    #[arg(long)]
    target: Option<PathBuf>,

    /// Builtin target id, used when --target is omitted
    #[arg(long)]
    target_id: Option<String>,

    /// How many seeded trials to run
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on swings per trial
    #[arg(long, default_value_t = 30)]
    max_swings: u32,

    /// Weapon name (or override its dice with --dice)
    #[arg(long, default_value = "longsword")]
    weapon: String,

    /// Damage notation override. Omit to use the weapon's own dice.
    #[arg(long)]
    dice: Option<String>,

    /// Attacker strength modifier
    #[arg(long, default_value_t = 2)]
    strength: i32,

    /// Optional weapons JSON file (falls back to the builtin table)
    #[arg(long)]
    weapons: Option<PathBuf>,

    /// Base seed; trial i rolls with seed+i
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// normal | advantage | disadvantage
    #[arg(long, default_value = "normal")]
    adv: String,
}

#[derive(Deserialize)]
struct Target {
    name: String,
    armor_class: i32,
    hit_points: DiceExpression,
}

fn to_mode(s: &str) -> AdMode {
    match s.to_lowercase().as_str() {
        "advantage" => AdMode::Advantage,
        "disadvantage" => AdMode::Disadvantage,
        _ => AdMode::Normal,
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn read_text_auto(path: &std::path::Path) -> anyhow::Result<String> {
    let raw = fs::read(path)?;
    match Encoding::for_bom(&raw) {
        Some((enc, bom_len)) => {
            let (text, _, _) = enc.decode(&raw[bom_len..]);
            Ok(text.into_owned())
        }
        None => Ok(String::from_utf8(raw)?),
    }
}

fn read_target_auto(path: &std::path::Path) -> anyhow::Result<Target> {
    let text = read_text_auto(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn load_weapons_file(path: &std::path::Path) -> anyhow::Result<Vec<Weapon>> {
    let text = read_text_auto(path)?;
    let weapons: Vec<Weapon> = serde_json::from_str(&text)?;
    Ok(weapons)
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
    let args = Args::parse();

    // Target: file first, then builtin id
    let target = if let Some(ref path) = args.target {
        read_target_auto(path)?
    } else if let Some(ref id) = args.target_id {
        let text = skirmish::content::builtin_targets()
            .get(id.as_str())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("unknown builtin target: {}", id))?;
        serde_json::from_str(text)?
    } else {
        anyhow::bail!("pass --target or --target-id");
    };

    // Weapon from the optional file, else the builtin table
    let loaded: Option<Vec<Weapon>> = args
        .weapons
        .as_ref()
        .and_then(|p| load_weapons_file(p).ok());
    let builtin = builtin_weapon_list()?;
    let weapon = loaded
        .as_deref()
        .and_then(|list| find_weapon(list, &args.weapon))
        .or_else(|| find_weapon(&builtin, &args.weapon))
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("unknown weapon: {}", args.weapon))?;

    // --dice overrides the weapon's own notation
    let damage_expr: DiceExpression = match args.dice {
        Some(ref s) => s.parse()?,
        None => weapon.damage().clone(),
    };

    // The weapon's flat bonus rides on both the attack and the damage roll.
    let attack_bonus = args.strength + weapon.bonuses();
    let damage_mod = args.strength + weapon.bonuses();
    let crit_range = weapon.crit_range();
    let mode = to_mode(&args.adv);

    let mut drops = 0u32;
    let mut hits = 0u32;
    let mut crits = 0u32;
    let mut misses = 0u32;
    let mut damage_on_hits = 0i64;
    let mut drop_swings: Vec<u32> = Vec::with_capacity(args.trials as usize);

    for i in 0..args.trials {
        let mut rng = Dice::from_seed(args.seed.wrapping_add(i as u64));
        let mut hp_left = target.hit_points.roll(&mut rng).max(1);
        let mut swings = 0u32;

        while swings < args.max_swings && hp_left > 0 {
            swings += 1;
            let swing = attack(&mut rng, mode, attack_bonus, target.armor_class, crit_range);
            if !swing.hit {
                misses += 1;
                continue;
            }
            hits += 1;
            if swing.is_crit {
                crits += 1;
            }
            let dealt = damage(&mut rng, &damage_expr, damage_mod, swing.is_crit);
            damage_on_hits += dealt as i64;
            hp_left = (hp_left - dealt).max(0);
        }

        if hp_left <= 0 {
            drops += 1;
            drop_swings.push(swings);
        }
    }

    drop_swings.sort_unstable();
    let drop_rate = ratio(drops, args.trials);
    let hit_rate = ratio(hits, hits + misses);
    let crit_rate = ratio(crits, hits);
    let avg_dmg_per_hit = if hits == 0 {
        0.0
    } else {
        damage_on_hits as f64 / hits as f64
    };
    let avg_swings = if drop_swings.is_empty() {
        0.0
    } else {
        drop_swings.iter().map(|&s| s as u64).sum::<u64>() as f64 / drop_swings.len() as f64
    };
    let median_swings = if drop_swings.is_empty() {
        0
    } else {
        let mid = drop_swings.len() / 2;
        if drop_swings.len() % 2 == 1 {
            drop_swings[mid]
        } else {
            (drop_swings[mid - 1] + drop_swings[mid]) / 2
        }
    };

    println!("simulate-vs results");
    println!("-------------------");
    println!("trials:             {}", args.trials);
    println!(
        "target:             {} (AC {}, HP {})",
        target.name, target.armor_class, target.hit_points
    );
    println!(
        "weapon:             {} [{} {}]",
        weapon.name(),
        damage_expr,
        weapon.damage_type()
    );
    println!("attack bonus:       {:+}", attack_bonus);
    println!("advantage:          {}", args.adv);
    println!();
    println!("drop rate:          {:.1}%", drop_rate * 100.0);
    println!("hit rate:           {:.1}%", hit_rate * 100.0);
    println!("crit rate:          {:.1}%", crit_rate * 100.0);
    println!("avg dmg per hit:    {:.2}", avg_dmg_per_hit);
    println!("avg swings (drops): {:.2}", avg_swings);
    println!("median swings:      {}", median_swings);

    Ok(())
}
