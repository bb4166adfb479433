use crate::seed::RandomSource;

/// Replays a fixed sequence of draws, starting over when it runs out.
pub(crate) struct ScriptedRandom {
    values: Vec<f64>,
    position: usize,
}

impl ScriptedRandom {
    #[track_caller]
    pub(crate) fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "a scripted sequence needs at least one value");

        Self {
            values: values.to_vec(),
            position: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
