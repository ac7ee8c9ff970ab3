use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{SampleSource, SimConfig, DEFAULT_TRIALS};
use crate::deck::DrawResult;
use crate::face::{DieColor, Face};
use crate::registry::{DeckRegistry, Instance};
use crate::stats::Statistics;

fn value_err(e: crate::Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pyclass(name = "Statistics")]
pub struct PyStatistics {
    #[pyo3(get)]
    pub total: usize,
    #[pyo3(get)]
    pub discarded: usize,
    /// `(face label, count, percentage)` per distinct face.
    #[pyo3(get)]
    pub composition: Vec<(String, usize, f64)>,
    #[pyo3(get)]
    pub miss_ratio: f64,
    #[pyo3(get)]
    pub crit_ratio: f64,
    #[pyo3(get)]
    pub miss_rating: String,
    #[pyo3(get)]
    pub crit_rating: String,
    #[pyo3(get)]
    pub average_hit_value: f64,
}

impl From<Statistics> for PyStatistics {
    fn from(s: Statistics) -> Self {
        PyStatistics {
            total: s.total,
            discarded: s.discarded,
            composition: s
                .composition
                .iter()
                .map(|c| (c.face.to_string(), c.count, c.percentage))
                .collect(),
            miss_ratio: s.miss_ratio,
            crit_ratio: s.crit_ratio,
            miss_rating: s.miss_rating.to_string(),
            crit_rating: s.crit_rating.to_string(),
            average_hit_value: s.average_hit_value,
        }
    }
}

#[pyclass(name = "HandSummary")]
pub struct PyHandSummary {
    #[pyo3(get)]
    pub trials: usize,
    #[pyo3(get)]
    pub average: f64,
    #[pyo3(get)]
    pub hit_chance: f64,
}

#[pyclass(name = "DeckSession")]
pub struct PyDeckSession {
    inner: DeckRegistry,
}

#[pymethods]
impl PyDeckSession {
    #[new]
    fn new() -> Self {
        PyDeckSession { inner: DeckRegistry::default() }
    }

    /// Returns True when a card was drawn.
    fn draw(&mut self, instance: &str, color: &str, face: &str) -> PyResult<bool> {
        let instance: Instance = instance.parse().map_err(value_err)?;
        let color: DieColor = color.parse().map_err(value_err)?;
        let face: Face = face.parse().map_err(value_err)?;
        Ok(self.inner.draw(instance, color, face) == DrawResult::Drawn)
    }

    fn reset(&mut self, instance: &str, color: &str) -> PyResult<()> {
        let instance: Instance = instance.parse().map_err(value_err)?;
        let color: DieColor = color.parse().map_err(value_err)?;
        self.inner.reset(instance, color);
        Ok(())
    }

    fn statistics(&self, instance: &str, color: &str) -> PyResult<PyStatistics> {
        let instance: Instance = instance.parse().map_err(value_err)?;
        let color: DieColor = color.parse().map_err(value_err)?;
        Ok(self.inner.statistics(instance, color).into())
    }

    #[pyo3(signature = (instance, color, hand_size, trials = DEFAULT_TRIALS, seed = None, from_draw_pile = false))]
    fn simulate_hands(
        &self,
        instance: &str,
        color: &str,
        hand_size: usize,
        trials: usize,
        seed: Option<u64>,
        from_draw_pile: bool,
    ) -> PyResult<PyHandSummary> {
        let instance: Instance = instance.parse().map_err(value_err)?;
        let color: DieColor = color.parse().map_err(value_err)?;
        let mut config = SimConfig::default().with_trials(trials);
        config.seed = seed;
        if from_draw_pile {
            config = config.with_sample_source(SampleSource::DrawPile);
        }
        let summary = self.inner.simulate_hands(instance, color, hand_size, &config);
        Ok(PyHandSummary {
            trials: summary.trials,
            average: summary.average,
            hit_chance: summary.hit_chance,
        })
    }

    /// Pending toast messages, oldest first. Clears the queue.
    fn notifications(&mut self) -> Vec<String> {
        self.inner
            .drain_notifications()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }
}

#[pymodule]
fn dice_decks(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDeckSession>()?;
    m.add_class::<PyStatistics>()?;
    m.add_class::<PyHandSummary>()?;
    Ok(())
}
