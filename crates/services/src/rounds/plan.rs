use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::OPTIONS_PER_ROUND;
use quiz_core::model::{Item, Roster};

/// Target and answer options drawn for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPlan {
    pub target: Item,
    pub options: Vec<Item>,
}

/// Draws a round: a uniform target, distinct distractors, shuffled options.
pub struct RoundBuilder<'a> {
    roster: &'a Roster,
}

impl<'a> RoundBuilder<'a> {
    #[must_use]
    pub fn new(roster: &'a Roster) -> Self {
        Self { roster }
    }

    /// Build a round plan.
    ///
    /// - the target is picked uniformly from the roster
    /// - distractors are a uniform draw without replacement from the rest of the roster
    /// - the option order is a Fisher-Yates shuffle, so the target's slot is unpredictable
    pub fn build<R: Rng>(self, rng: &mut R) -> RoundPlan {
        let items = self.roster.items();
        let target = items[rng.random_range(0..items.len())].clone();

        let mut distractors: Vec<&Item> = items.iter().filter(|item| item.id != target.id).collect();
        distractors.shuffle(rng);
        distractors.truncate(OPTIONS_PER_ROUND - 1);

        let mut options = Vec::with_capacity(OPTIONS_PER_ROUND);
        options.push(target.clone());
        options.extend(distractors.into_iter().cloned());
        options.shuffle(rng);

        RoundPlan { target, options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    use quiz_core::catalog;
    use quiz_core::model::{ItemGroup, ItemId};

    #[test]
    fn options_are_distinct_and_contain_target_once() {
        let roster = catalog::roster_for(None).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let plan = RoundBuilder::new(&roster).build(&mut rng);
            assert_eq!(plan.options.len(), OPTIONS_PER_ROUND);

            let ids: HashSet<_> = plan.options.iter().map(|item| &item.id).collect();
            assert_eq!(ids.len(), OPTIONS_PER_ROUND);
            assert_eq!(
                plan.options.iter().filter(|item| item.id == plan.target.id).count(),
                1
            );
            assert!(plan.options.iter().all(|item| roster.contains(&item.id)));
        }
    }

    #[test]
    fn minimal_roster_uses_every_item() {
        let roster = catalog::roster_for(Some(ItemGroup::Poultry)).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let plan = RoundBuilder::new(&roster).build(&mut rng);

        let mut got: Vec<_> = plan.options.iter().map(|item| item.id.clone()).collect();
        got.sort();
        let mut expected: Vec<_> = roster.items().iter().map(|item| item.id.clone()).collect();
        expected.sort();
        assert_eq!(got, expected);
    }

    #[test]
    fn target_and_slot_are_spread_out() {
        let roster = catalog::roster_for(Some(ItemGroup::Barn)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut targets: HashMap<ItemId, usize> = HashMap::new();
        let mut slots = [0_usize; OPTIONS_PER_ROUND];

        for _ in 0..2_000 {
            let plan = RoundBuilder::new(&roster).build(&mut rng);
            let slot = plan
                .options
                .iter()
                .position(|item| item.id == plan.target.id)
                .unwrap();
            slots[slot] += 1;
            *targets.entry(plan.target.id).or_default() += 1;
        }

        // 5 targets at ~400 each, 4 slots at ~500 each; loose bounds keep this stable
        assert_eq!(targets.len(), roster.len());
        assert!(targets.values().all(|&n| (250..=550).contains(&n)));
        assert!(slots.iter().all(|&n| (350..=650).contains(&n)));
    }
}
