//! Line-based command scripts replayed against a [`DeckRegistry`].
//!
//! ```text
//! # comments and blank lines are ignored
//! draw oathsworn white {2}
//! draw encounter red 3
//! stats oathsworn white
//! simulate oathsworn white 4
//! reset oathsworn white
//! ```

use serde::Serialize;

use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::face::{DieColor, Face};
use crate::registry::{DeckRegistry, Instance, Notification};
use crate::sim::HandSummary;
use crate::stats::Statistics;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Draw { instance: Instance, color: DieColor, face: Face },
    Reset { instance: Instance, color: DieColor },
    Stats { instance: Instance, color: DieColor },
    Simulate { instance: Instance, color: DieColor, hand_size: usize },
}

/// What replaying one command produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Notification { message: String },
    Statistics(Statistics),
    Simulation { instance: Instance, color: DieColor, hand_size: usize, summary: HandSummary },
}

impl Command {
    /// Parses one script line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: usize, text: &str) -> Result<Option<Command>> {
        let text = text.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            return Ok(None);
        }

        let invalid = |reason: String| Error::InvalidCommand { line, reason };
        let words: Vec<&str> = text.split_whitespace().collect();

        let target = |words: &[&str]| -> Result<(Instance, DieColor)> {
            match words {
                [instance, color, ..] => Ok((instance.parse::<Instance>()?, color.parse::<DieColor>()?)),
                _ => Err(invalid("expected an instance and a die color".to_string())),
            }
        };

        let name = words[0].to_ascii_lowercase();
        let arity = match name.as_str() {
            "draw" | "simulate" => 4,
            "reset" | "stats" => 3,
            _ => usize::MAX,
        };
        if words.len() > arity {
            return Err(invalid(format!("unexpected `{}` after `{}` command", words[arity], name)));
        }

        let command = match name.as_str() {
            "draw" => {
                let (instance, color) = target(&words[1..])?;
                let face = words
                    .get(3)
                    .ok_or_else(|| invalid("draw needs a face".to_string()))?
                    .parse::<Face>()?;
                Command::Draw { instance, color, face }
            }
            "reset" => {
                let (instance, color) = target(&words[1..])?;
                Command::Reset { instance, color }
            }
            "stats" => {
                let (instance, color) = target(&words[1..])?;
                Command::Stats { instance, color }
            }
            "simulate" => {
                let (instance, color) = target(&words[1..])?;
                let hand_size = words
                    .get(3)
                    .and_then(|w| w.parse::<usize>().ok())
                    .ok_or_else(|| invalid("simulate needs a hand size".to_string()))?;
                Command::Simulate { instance, color, hand_size }
            }
            other => return Err(invalid(format!("unknown command `{}`", other))),
        };

        Ok(Some(command))
    }
}

pub fn parse_script(script: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (idx, text) in script.lines().enumerate() {
        if let Some(command) = Command::parse(idx + 1, text)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

fn notifications(registry: &mut DeckRegistry) -> impl Iterator<Item = SessionEvent> {
    registry
        .drain_notifications()
        .into_iter()
        .map(|n: Notification| SessionEvent::Notification { message: n.to_string() })
}

pub fn replay(registry: &mut DeckRegistry, commands: &[Command], config: &SimConfig) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    for command in commands {
        match *command {
            Command::Draw { instance, color, face } => {
                registry.draw(instance, color, face);
            }
            Command::Reset { instance, color } => registry.reset(instance, color),
            Command::Stats { instance, color } => {
                events.push(SessionEvent::Statistics(registry.statistics(instance, color)));
            }
            Command::Simulate { instance, color, hand_size } => {
                let summary = registry.simulate_hands(instance, color, hand_size, config);
                events.push(SessionEvent::Simulation { instance, color, hand_size, summary });
            }
        }
        events.extend(notifications(registry));
    }

    events
}
