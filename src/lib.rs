pub mod config;
pub mod deck;
pub mod error;
pub mod face;
pub mod registry;
pub mod session;
pub mod sim;
pub mod stats;

#[cfg(feature = "python")]
mod python;

pub use crate::config::{AppConfig, SampleSource, SimConfig};
pub use crate::deck::{Deck, DrawResult};
pub use crate::error::{Error, Result};
pub use crate::face::{DieColor, Face, FaceCatalog, DECK_SIZE};
pub use crate::registry::{DeckRegistry, Instance, Notification};
pub use crate::sim::{process_hand, simulate_hands, simulate_hands_par, HandScore, HandSummary, RandomSampler, Sampler, MAX_BONUS_CHAIN};
pub use crate::stats::{FaceShare, Rating, Statistics};
