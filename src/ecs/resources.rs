use smallvec::SmallVec;

/// Narration produced while resolving a step or a monster turn.
#[derive(Default)]
pub struct TurnLog {
    pub entries: SmallVec<[String; 4]>,
}

impl TurnLog {
    pub fn push<S: Into<String>>(&mut self, entry: S) {
        self.entries.push(entry.into());
    }

    pub fn drain(&mut self) -> Vec<String> {
        self.entries.drain(..).collect()
    }
}
