use proptest::prelude::*;
use skirmish::{Dice, DiceExpression, roll};

proptest! {
    #[test]
    fn roll_totals_stay_within_bounds(
        count in 1u32..=20,
        sides in 1u32..=100,
        modifier in -50i32..=50,
        seed in any::<u64>(),
    ) {
        let mut dice = Dice::from_seed(seed);
        let r = roll(&mut dice, count, sides, modifier).unwrap();
        prop_assert_eq!(r.values.len(), count as usize);
        let low = count as i32 + modifier;
        let high = (count * sides) as i32 + modifier;
        prop_assert!(r.total >= low && r.total <= high);
    }

    #[test]
    fn parsed_expressions_roll_within_min_max(
        count in 1u32..=10,
        sides in 1u32..=20,
        modifier in -20i32..=20,
        seed in any::<u64>(),
    ) {
        let notation = format!("{}d{}{:+}", count, sides, modifier);
        let expr: DiceExpression = notation.parse().unwrap();
        let mut dice = Dice::from_seed(seed);
        let total = expr.roll(&mut dice);
        prop_assert!(total >= expr.min() && total <= expr.max());
    }

    #[test]
    fn display_and_parse_are_inverses(
        terms in proptest::collection::vec((1u32..=10, 1u32..=30), 1..4),
        modifier in -30i32..=30,
    ) {
        let mut notation = String::new();
        for (i, (count, sides)) in terms.iter().enumerate() {
            if i > 0 {
                notation.push('+');
            }
            notation.push_str(&format!("{}d{}", count, sides));
        }
        notation.push_str(&format!("{:+}", modifier));

        let parsed: DiceExpression = notation.parse().unwrap();
        let reparsed: DiceExpression = parsed.to_string().parse().unwrap();
        prop_assert_eq!(parsed, reparsed);
    }
}
