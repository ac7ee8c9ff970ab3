use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::deck::Deck;
use crate::face::{DieColor, Face};
use crate::registry::Instance;

/// Remaining copies of one face and their share of the draw pile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FaceShare {
    pub face: Face,
    pub count: usize,
    pub percentage: f64, // one decimal, 0 when the pile is empty
}

/// How favourable a ratio is for the side owning the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Good,
    Neutral,
    Bad,
}

impl Rating {
    pub fn name(self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::Neutral => "neutral",
            Rating::Bad => "bad",
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            Rating::Good => Rating::Bad,
            Rating::Neutral => Rating::Neutral,
            Rating::Bad => Rating::Good,
        }
    }

    fn for_instance(self, instance: Instance) -> Self {
        match instance {
            Instance::Oathsworn => self,
            Instance::Encounter => self.inverted(),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived values for one deck, recomputed on every query.
#[derive(Clone, Debug, Serialize)]
pub struct Statistics {
    pub instance: Instance,
    pub color: DieColor,
    pub total: usize,
    pub discarded: usize,
    pub composition: Vec<FaceShare>,
    pub miss_ratio: f64,
    pub crit_ratio: f64,
    pub miss_rating: Rating,
    pub crit_rating: Rating,
    pub average_hit_value: f64,
}

impl Statistics {
    pub fn compute(deck: &Deck, instance: Instance) -> Self {
        let total = deck.remaining();

        let composition = deck
            .unique_faces()
            .into_iter()
            .map(|face| {
                let count = deck.count(face);
                FaceShare {
                    face,
                    count,
                    percentage: round1(ratio(count, total) * 100.0),
                }
            })
            .collect();

        let misses = deck.draw_pile().iter().filter(|f| f.is_blank()).count();
        let crits = deck.draw_pile().iter().filter(|f| f.is_exploding()).count();

        Statistics {
            instance,
            color: deck.color(),
            total,
            discarded: deck.discard_pile().len(),
            composition,
            miss_ratio: ratio(misses, total),
            crit_ratio: ratio(crits, total),
            miss_rating: miss_rating(misses, total).for_instance(instance),
            crit_rating: crit_rating(crits, total).for_instance(instance),
            average_hit_value: average_hit_value(deck.faces(), instance),
        }
    }

    pub fn share(&self, face: Face) -> Option<&FaceShare> {
        self.composition.iter().find(|s| s.face == face)
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Bad above one miss in three, good below it.
fn miss_rating(misses: usize, total: usize) -> Rating {
    match (3 * misses).cmp(&total) {
        Ordering::Greater => Rating::Bad,
        Ordering::Less => Rating::Good,
        Ordering::Equal => Rating::Neutral,
    }
}

/// Bad below one crit in six, good above it.
fn crit_rating(crits: usize, total: usize) -> Rating {
    match (6 * crits).cmp(&total) {
        Ordering::Less => Rating::Bad,
        Ordering::Greater => Rating::Good,
        Ordering::Equal => Rating::Neutral,
    }
}

/// Expected hit value of one roll of `faces`.
///
/// Single left-to-right pass: the last face rerolls for the Oathsworn side, so it
/// adds its own value plus the running total accumulated so far. This is an
/// approximation of the reroll, not a fixed-point expectation, and is kept that
/// way so the numbers match what players are used to seeing.
pub fn average_hit_value(faces: &[Face], instance: Instance) -> f64 {
    let Some(last) = faces.len().checked_sub(1) else {
        return 0.0;
    };
    let p = 1.0 / faces.len() as f64;
    let rerolls = instance != Instance::Encounter;

    faces.iter().enumerate().fold(0.0, |acc, (i, face)| {
        let value = face.value() as f64;
        if i == last && rerolls {
            acc + p * (value + acc)
        } else {
            acc + p * value
        }
    })
}
