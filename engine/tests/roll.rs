use skirmish::{
    Dice, InvalidDiceSpec, roll, roll_ability_scores, roll_best_of, roll_with_advantage,
    roll_with_disadvantage,
};

#[test]
fn roll_keeps_every_die_and_adds_the_modifier() {
    let mut dice = Dice::from_scripted(vec![2, 3, 4]);
    let r = roll(&mut dice, 3, 6, 1).unwrap();
    assert_eq!(r.values, vec![2, 3, 4]);
    assert_eq!(r.modifier, 1);
    assert_eq!(r.total, 10);
}

#[test]
fn roll_stays_within_bounds() {
    let mut dice = Dice::from_seed(42);
    for _ in 0..200 {
        let r = roll(&mut dice, 4, 6, -2).unwrap();
        assert_eq!(r.values.len(), 4);
        assert!(r.values.iter().all(|&v| (1..=6).contains(&v)));
        assert!((2..=22).contains(&r.total));
    }
}

#[test]
fn zero_count_and_zero_sides_are_rejected() {
    let mut dice = Dice::from_seed(1);
    assert_eq!(roll(&mut dice, 0, 6, 0), Err(InvalidDiceSpec::ZeroCount));
    assert_eq!(roll(&mut dice, 2, 0, 0), Err(InvalidDiceSpec::ZeroSides));
}

#[test]
fn counts_and_sides_above_the_cap_are_rejected() {
    let mut dice = Dice::from_seed(1);
    assert_eq!(
        roll(&mut dice, u32::MAX, 6, 0),
        Err(InvalidDiceSpec::CountTooLarge)
    );
    assert_eq!(
        roll(&mut dice, 1, u32::MAX, 0),
        Err(InvalidDiceSpec::SidesTooLarge)
    );
    assert_eq!(
        roll_best_of(&mut dice, u32::MAX, 6, 3),
        Err(InvalidDiceSpec::CountTooLarge)
    );

    // The cap itself rolls, and the total stays inside its bounds.
    let r = roll(&mut dice, 1000, 1000, 0).unwrap();
    assert!((1000..=1_000_000).contains(&r.total));
}

#[test]
fn best_of_keeps_the_highest_sorted_descending() {
    let mut dice = Dice::from_scripted(vec![1, 5, 3, 2]);
    let b = roll_best_of(&mut dice, 4, 6, 3).unwrap();
    assert_eq!(b.kept, vec![5, 3, 2]);
    assert_eq!(b.total, 10);
}

#[test]
fn best_of_keep_saturates_at_the_dice_rolled() {
    let mut dice = Dice::from_scripted(vec![1, 5, 3, 2]);
    let b = roll_best_of(&mut dice, 4, 6, 10).unwrap();
    assert_eq!(b.kept, vec![5, 3, 2, 1]);
    assert_eq!(b.total, 11);
}

#[test]
fn advantage_keeps_high_disadvantage_keeps_low() {
    let mut dice = Dice::from_scripted(vec![7, 15]);
    assert_eq!(roll_with_advantage(&mut dice, 2), 17);

    let mut dice = Dice::from_scripted(vec![7, 15]);
    assert_eq!(roll_with_disadvantage(&mut dice, 2), 9);
}

#[test]
fn ability_scores_keep_the_best_three_of_five() {
    // each score consumes five d6 samples
    let script: Vec<u32> = [1, 2, 3, 4, 5].repeat(6);
    let mut dice = Dice::from_scripted(script);
    assert_eq!(roll_ability_scores(&mut dice), [12; 6]);
}

#[test]
fn ability_scores_stay_within_bounds() {
    let mut dice = Dice::from_seed(222);
    for score in roll_ability_scores(&mut dice) {
        assert!((3..=18).contains(&score));
    }
}
