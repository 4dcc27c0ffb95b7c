use crate::api::Brain;

/// Brains the user can work on, and which one is current.
#[derive(Debug, Clone, Default)]
pub struct BrainPicker {
    pub brains: Vec<Brain>,
    pub current: Option<usize>,
}

impl BrainPicker {
    /// Keeps the current brain across reloads when it still exists.
    pub fn set_brains(&mut self, brains: Vec<Brain>) {
        let current_id = self.current_id().map(str::to_string);
        self.current = match current_id {
            Some(id) => brains.iter().position(|b| b.id == id),
            None => None,
        }
        .or(if brains.is_empty() { None } else { Some(0) });
        self.brains = brains;
    }

    pub fn current(&self) -> Option<&Brain> {
        self.brains.get(self.current?)
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current().map(|b| b.id.as_str())
    }

    pub fn select_id(&mut self, id: &str) {
        if let Some(index) = self.brains.iter().position(|b| b.id == id) {
            self.current = Some(index);
        }
    }

    /// Drops a brain; the current one falls back to the first remaining.
    pub fn remove(&mut self, id: &str) {
        let remaining: Vec<Brain> = self.brains.iter().filter(|b| b.id != id).cloned().collect();
        if self.current_id() == Some(id) {
            self.current = None;
        }
        self.set_brains(remaining);
    }

    pub fn cycle(&mut self) {
        if self.brains.is_empty() {
            self.current = None;
            return;
        }
        self.current = Some(self.current.map_or(0, |i| (i + 1) % self.brains.len()));
    }
}
