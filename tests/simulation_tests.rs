//! Monte-Carlo behaviour of the hand simulator.

use dice_decks::{
    process_hand, simulate_hands, simulate_hands_par, DeckRegistry, DieColor, Face, FaceCatalog, HandScore,
    Instance, RandomSampler, SampleSource, Sampler, SimConfig, MAX_BONUS_CHAIN,
};

fn white() -> Vec<Face> {
    FaceCatalog::default().tripled(DieColor::White)
}

/// Always hands out the same bonus card, counting draws.
struct FixedBonus {
    card: Face,
    draws: usize,
}

impl Sampler for FixedBonus {
    fn sample_hand(&mut self, pool: &[Face], size: usize) -> Vec<Face> {
        pool.iter().copied().take(size).collect()
    }

    fn draw_one(&mut self, _pool: &[Face]) -> Option<Face> {
        self.draws += 1;
        Some(self.card)
    }
}

#[test]
fn one_exploding_card_draws_exactly_one_bonus() {
    let mut sampler = FixedBonus { card: Face::Number(1), draws: 0 };
    let hand = [Face::Number(2), Face::Exploding(2), Face::Blank];
    let result = process_hand(&hand, &white(), &mut sampler);

    assert_eq!(sampler.draws, 1);
    assert_eq!(result, HandScore { score: 5, misses: 1 });
}

#[test]
fn blank_bonus_card_counts_as_miss() {
    let mut sampler = FixedBonus { card: Face::Blank, draws: 0 };
    let result = process_hand(&[Face::Blank, Face::Exploding(3)], &white(), &mut sampler);

    assert_eq!(sampler.draws, 1);
    assert_eq!(result, HandScore { score: 3, misses: 2 });
    assert!(!result.is_hit());
}

#[test]
fn two_exploding_cards_draw_two_bonuses() {
    let mut sampler = FixedBonus { card: Face::Number(1), draws: 0 };
    let result = process_hand(&[Face::Exploding(2), Face::Exploding(2)], &white(), &mut sampler);

    assert_eq!(sampler.draws, 2);
    assert_eq!(result.score, 6);
}

// One card from the full White deck: E = (0+0+1+1+2 + (2+E)) / 6, so E = 1.2
#[test]
fn single_card_average_matches_exploding_expectation() {
    let summary = simulate_hands(&white(), 1, 200_000, &mut RandomSampler::seeded(2024));
    assert!((summary.average - 1.2).abs() < 0.05, "average {}", summary.average);
    // a single card never holds two misses
    assert_eq!(summary.hit_chance, 100.0);
}

#[test]
fn large_runs_converge() {
    let pool = white();
    let a = simulate_hands(&pool, 4, 200_000, &mut RandomSampler::seeded(1));
    let b = simulate_hands(&pool, 4, 200_000, &mut RandomSampler::seeded(2));
    let c = simulate_hands_par(&pool, 4, 200_000, 3);

    for other in [&b, &c] {
        assert!((a.average - other.average).abs() <= a.average * 0.05);
        assert!((a.hit_chance - other.hit_chance).abs() <= a.hit_chance * 0.05);
    }
}

#[test]
fn heavier_dice_score_more() {
    let registry = DeckRegistry::default();
    let config = SimConfig::default().with_trials(50_000).with_seed(8);

    let white = registry.simulate_hands(Instance::Oathsworn, DieColor::White, 3, &config);
    let black = registry.simulate_hands(Instance::Oathsworn, DieColor::Black, 3, &config);
    assert!(black.average > white.average);
}

#[test]
fn full_composition_ignores_draws() {
    let mut registry = DeckRegistry::default();
    let config = SimConfig::default().with_trials(5_000).with_seed(99);
    let before = registry.simulate_hands(Instance::Oathsworn, DieColor::Yellow, 2, &config);

    registry.draw(Instance::Oathsworn, DieColor::Yellow, Face::Exploding(3));
    registry.draw(Instance::Oathsworn, DieColor::Yellow, Face::Blank);
    let after = registry.simulate_hands(Instance::Oathsworn, DieColor::Yellow, 2, &config);

    assert_eq!(before, after);
}

#[test]
fn exploding_bonus_chain_stops_at_cap() {
    let mut sampler = FixedBonus { card: Face::Exploding(2), draws: 0 };
    let result = process_hand(&[Face::Exploding(2)], &white(), &mut sampler);

    assert_eq!(sampler.draws, MAX_BONUS_CHAIN as usize);
    assert_eq!(result.score, 2 * (MAX_BONUS_CHAIN + 1));
}

#[test]
fn crit_only_draw_pile_gives_finite_summary() {
    let mut registry = DeckRegistry::default();
    for face in [Face::Blank, Face::Number(1), Face::Number(2)] {
        while registry.draw(Instance::Oathsworn, DieColor::White, face) == dice_decks::DrawResult::Drawn {}
    }
    assert!(registry.deck(Instance::Oathsworn, DieColor::White).draw_pile().iter().all(|f| f.is_exploding()));

    let config = SimConfig::default().with_trials(200).with_seed(7).with_sample_source(SampleSource::DrawPile);
    let summary = registry.simulate_hands(Instance::Oathsworn, DieColor::White, 3, &config);

    assert!(summary.average.is_finite());
    assert_eq!(summary.average, 3.0 * 2.0 * (MAX_BONUS_CHAIN + 1) as f64);
    assert_eq!(summary.hit_chance, 100.0);
}
