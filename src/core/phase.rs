use crate::core::easing::sanitize_unit;
use crate::core::error::ConfigError;

/// Index of a phase inside its [`PhaseTable`] (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhaseId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Phase {
    pub label: String,
    pub start: f32,
    pub end: f32,
}

/// Display labels for scroll progress ranges.
///
/// Phases cover `[start, end)` and partition [0, 1]; the last phase also owns 1.0.
/// This lookup is independent of the continuous camera tween.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTable {
    phases: Vec<Phase>,
}

impl PhaseTable {
    /// `boundaries` are the interior cut points, one fewer than `labels`.
    pub fn new<S: Into<String>>(labels: Vec<S>, boundaries: &[f32]) -> Result<Self, ConfigError> {
        if labels.is_empty() {
            return Err(ConfigError::NoPhases);
        }
        if boundaries.len() + 1 != labels.len() {
            return Err(ConfigError::BoundaryCount {
                expected: labels.len() - 1,
                got: boundaries.len(),
            });
        }
        let mut prev = 0.0_f32;
        for (index, &value) in boundaries.iter().enumerate() {
            if !(value > prev && value < 1.0) {
                return Err(ConfigError::BoundaryOrder { index, value });
            }
            prev = value;
        }
        let starts = std::iter::once(0.0).chain(boundaries.iter().copied());
        let ends = boundaries.iter().copied().chain(std::iter::once(1.0));
        let phases = labels
            .into_iter()
            .zip(starts.zip(ends))
            .map(|(label, (start, end))| Phase {
                label: label.into(),
                start,
                end,
            })
            .collect();
        Ok(Self { phases })
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn select(&self, progress: f32) -> PhaseId {
        let p = sanitize_unit(progress);
        let idx = self
            .phases
            .iter()
            .position(|ph| p >= ph.start && p < ph.end)
            .unwrap_or(self.phases.len() - 1);
        PhaseId(idx)
    }

    pub fn label(&self, id: PhaseId) -> &str {
        self.phases
            .get(id.0)
            .map(|p| p.label.as_str())
            .unwrap_or_default()
    }

    pub fn label_at(&self, progress: f32) -> &str {
        self.label(self.select(progress))
    }
}
