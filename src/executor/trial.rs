/// The outcome of one sampling trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trial {
    /// The query vertex at position `depth` of the DAG order had nothing to extend to.
    Dead { depth: usize },
    /// Every query vertex was mapped; the value is the product of the extension sizes.
    Completed(f64),
}

impl Trial {
    pub fn weight(&self) -> f64 {
        match self {
            Trial::Dead { .. } => 0.0,
            Trial::Completed(weight) => *weight,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Trial::Completed(_))
    }
}

/// The running sum over trials.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Estimate {
    sum: f64,
    trials: usize,
    completed: usize,
}

impl Estimate {
    pub fn add(mut self, trial: Trial) -> Self {
        self.sum += trial.weight();
        self.trials += 1;
        self.completed += trial.is_completed() as usize;
        self
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            trials: self.trials + other.trials,
            completed: self.completed + other.completed,
        }
    }

    /// Returns the mean weight, counting dead trials as zero.
    pub fn mean(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.sum / self.trials as f64
        }
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn completed(&self) -> usize {
        self.completed
    }
}

impl FromIterator<Trial> for Estimate {
    fn from_iter<I: IntoIterator<Item = Trial>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::add)
    }
}
