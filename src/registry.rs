//! Session state: every deck of both sides, plus the notifications their
//! changes produce.
//!
//! The registry is the only owner of mutable deck state. Adapters (the CLI, the
//! Python bindings) call the operations below and read notifications back with
//! [`DeckRegistry::drain_notifications`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::config::{SampleSource, SimConfig};
use crate::deck::{Deck, DrawResult};
use crate::error::{Error, Result};
use crate::face::{DieColor, Face, FaceCatalog};
use crate::sim::{self, HandSummary};
use crate::stats::Statistics;

/// Which side a set of decks belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Instance {
    /// Player-controlled decks.
    Oathsworn,
    /// Adversary-controlled decks.
    Encounter,
}

impl Instance {
    pub const ALL: [Instance; 2] = [Instance::Oathsworn, Instance::Encounter];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Instance::Oathsworn => "Oathsworn",
            Instance::Encounter => "Encounter",
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Instance::ALL
            .into_iter()
            .find(|i| i.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownInstance(s.to_string()))
    }
}

/// Emitted after every state change, for the adapter to show as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    Drew { instance: Instance, color: DieColor, face: Face },
    Reset { instance: Instance, color: DieColor },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // blanks read as "0" here, unlike their empty card label
            Notification::Drew { instance, color, face } => write!(
                f,
                "Drew \"{}\" from {} {} deck",
                if face.is_blank() { "0".to_string() } else { face.to_string() },
                color.name().to_lowercase(),
                instance.name().to_lowercase()
            ),
            Notification::Reset { instance, color } => write!(
                f,
                "Reset {} {} deck",
                color.name().to_lowercase(),
                instance.name().to_lowercase()
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeckRegistry {
    catalog: FaceCatalog,
    decks: [[Deck; 4]; 2],
    notifications: Vec<Notification>,
}

impl Default for DeckRegistry {
    fn default() -> Self {
        Self::new(FaceCatalog::default())
    }
}

impl DeckRegistry {
    pub fn new(catalog: FaceCatalog) -> Self {
        let decks = Instance::ALL.map(|_| DieColor::ALL.map(|color| Deck::new(&catalog, color)));
        DeckRegistry {
            catalog,
            decks,
            notifications: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &FaceCatalog {
        &self.catalog
    }

    pub fn deck(&self, instance: Instance, color: DieColor) -> &Deck {
        &self.decks[instance.index()][color.index()]
    }

    fn deck_mut(&mut self, instance: Instance, color: DieColor) -> &mut Deck {
        &mut self.decks[instance.index()][color.index()]
    }

    pub fn draw(&mut self, instance: Instance, color: DieColor, face: Face) -> DrawResult {
        let result = self.deck_mut(instance, color).draw(face);
        match result {
            DrawResult::Drawn => {
                debug!(%instance, %color, %face, "card drawn");
                self.notifications.push(Notification::Drew { instance, color, face });
            }
            DrawResult::Absent => debug!(%instance, %color, %face, "no copy left to draw"),
        }
        result
    }

    pub fn reset(&mut self, instance: Instance, color: DieColor) {
        self.deck_mut(instance, color).reset();
        debug!(%instance, %color, "deck reset");
        self.notifications.push(Notification::Reset { instance, color });
    }

    /// Rebuilds every deck of both sides without emitting notifications.
    pub fn reset_all(&mut self) {
        for deck in self.decks.iter_mut().flatten() {
            deck.reset();
        }
        debug!("all decks reset");
    }

    pub fn statistics(&self, instance: Instance, color: DieColor) -> Statistics {
        Statistics::compute(self.deck(instance, color), instance)
    }

    pub fn simulate_hands(
        &self,
        instance: Instance,
        color: DieColor,
        hand_size: usize,
        config: &SimConfig,
    ) -> HandSummary {
        let deck = self.deck(instance, color);
        let pool = match config.sample_source {
            SampleSource::FullComposition => deck.composition(),
            SampleSource::DrawPile => deck.draw_pile(),
        };
        sim::run(pool, hand_size, config)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
