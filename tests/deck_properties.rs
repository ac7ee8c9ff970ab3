//! Property tests over arbitrary draw/reset sequences.

use proptest::prelude::*;

use dice_decks::{DeckRegistry, DieColor, Face, Instance, DECK_SIZE};

#[derive(Debug, Clone)]
enum Action {
    Draw(Instance, DieColor, Face),
    Reset(Instance, DieColor),
}

fn instance_strategy() -> impl Strategy<Value = Instance> {
    prop::sample::select(Instance::ALL.to_vec())
}

fn color_strategy() -> impl Strategy<Value = DieColor> {
    prop::sample::select(DieColor::ALL.to_vec())
}

/// Any face a user could ask for, including ones no deck contains.
fn face_strategy() -> impl Strategy<Value = Face> {
    prop_oneof![
        Just(Face::Blank),
        (1u8..=5).prop_map(Face::Number),
        (1u8..=6).prop_map(Face::Exploding),
    ]
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        9 => (instance_strategy(), color_strategy(), face_strategy())
            .prop_map(|(i, c, f)| Action::Draw(i, c, f)),
        1 => (instance_strategy(), color_strategy()).prop_map(|(i, c)| Action::Reset(i, c)),
    ]
}

fn apply(registry: &mut DeckRegistry, action: &Action) {
    match *action {
        Action::Draw(i, c, f) => {
            registry.draw(i, c, f);
        }
        Action::Reset(i, c) => registry.reset(i, c),
    }
}

fn sorted(faces: &[Face]) -> Vec<Face> {
    let mut v = faces.to_vec();
    v.sort();
    v
}

proptest! {
    // Draw and discard piles always partition the full composition
    #[test]
    fn piles_partition_composition(actions in prop::collection::vec(action_strategy(), 0..120)) {
        let mut registry = DeckRegistry::default();
        for action in &actions {
            apply(&mut registry, action);

            for instance in Instance::ALL {
                for color in DieColor::ALL {
                    let deck = registry.deck(instance, color);
                    prop_assert_eq!(deck.remaining() + deck.discard_pile().len(), DECK_SIZE);

                    let mut union = deck.draw_pile().to_vec();
                    union.extend_from_slice(deck.discard_pile());
                    prop_assert_eq!(sorted(&union), sorted(deck.composition()));
                }
            }
        }
    }

    // Composition counts sum to the remaining count
    #[test]
    fn composition_sums_to_total(actions in prop::collection::vec(action_strategy(), 0..120)) {
        let mut registry = DeckRegistry::default();
        for action in &actions {
            apply(&mut registry, action);
        }
        for instance in Instance::ALL {
            for color in DieColor::ALL {
                let stats = registry.statistics(instance, color);
                let sum: usize = stats.composition.iter().map(|s| s.count).sum();
                prop_assert_eq!(sum, stats.total);
                prop_assert!(stats.miss_ratio >= 0.0 && stats.miss_ratio <= 1.0);
                prop_assert!(stats.crit_ratio >= 0.0 && stats.crit_ratio <= 1.0);
            }
        }
    }

    // Reset after any sequence restores the initial deck
    #[test]
    fn reset_restores_initial(
        actions in prop::collection::vec(action_strategy(), 0..120),
        instance in instance_strategy(),
        color in color_strategy(),
    ) {
        let fresh = DeckRegistry::default();
        let mut registry = DeckRegistry::default();
        for action in &actions {
            apply(&mut registry, action);
        }
        registry.reset(instance, color);

        let deck = registry.deck(instance, color);
        prop_assert_eq!(deck.draw_pile(), fresh.deck(instance, color).draw_pile());
        prop_assert!(deck.discard_pile().is_empty());
    }

    // A draw never changes any other deck
    #[test]
    fn draw_touches_one_deck(
        instance in instance_strategy(),
        color in color_strategy(),
        face in face_strategy(),
    ) {
        let before = DeckRegistry::default();
        let mut after = before.clone();
        after.draw(instance, color, face);

        for i in Instance::ALL {
            for c in DieColor::ALL {
                if (i, c) != (instance, color) {
                    prop_assert_eq!(after.deck(i, c).draw_pile(), before.deck(i, c).draw_pile());
                }
            }
        }
    }
}

#[test]
fn fresh_decks_are_tripled_catalog_entries() {
    let registry = DeckRegistry::default();
    for instance in Instance::ALL {
        for color in DieColor::ALL {
            let deck = registry.deck(instance, color);
            assert_eq!(deck.remaining(), DECK_SIZE);
            for &face in registry.catalog().faces(color) {
                let in_catalog = registry.catalog().faces(color).iter().filter(|&&f| f == face).count();
                assert_eq!(deck.count(face), 3 * in_catalog);
            }
        }
    }
}

#[test]
fn empty_deck_statistics() {
    let mut registry = DeckRegistry::default();
    let faces = registry.deck(Instance::Encounter, DieColor::Red).composition().to_vec();
    for face in faces {
        registry.draw(Instance::Encounter, DieColor::Red, face);
    }

    let stats = registry.statistics(Instance::Encounter, DieColor::Red);
    assert_eq!(stats.total, 0);
    for share in &stats.composition {
        assert_eq!(share.count, 0);
        assert_eq!(share.percentage, 0.0);
    }
}
