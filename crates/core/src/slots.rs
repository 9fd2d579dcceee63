use std::collections::BTreeSet;

/// Places option words into a question's blanks.
///
/// Slots fill leftmost-empty first. Each option index can sit in at most one
/// slot, and the number of used indices always equals the number of filled
/// slots. Rejected operations are silent no-ops and report `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankSlotFiller {
    options: Vec<String>,
    filled: Vec<Option<String>>,
    used: BTreeSet<usize>,
}

impl BlankSlotFiller {
    #[must_use]
    pub fn new(options: Vec<String>, slot_count: usize) -> Self {
        Self {
            options,
            filled: vec![None; slot_count],
            used: BTreeSet::new(),
        }
    }

    /// Put `options[option_index]` into the first empty slot.
    ///
    /// Returns `false` without changing anything if the index is unknown or
    /// already used, or every slot is taken.
    pub fn select_word(&mut self, option_index: usize) -> bool {
        let Some(word) = self.options.get(option_index) else {
            return false;
        };
        if self.used.contains(&option_index) {
            return false;
        }
        let Some(slot) = self.filled.iter_mut().find(|slot| slot.is_none()) else {
            return false;
        };

        *slot = Some(word.clone());
        self.used.insert(option_index);
        true
    }

    /// Empty `slot_index` and release the option it came from.
    ///
    /// The option is matched by value: the lowest used index whose word equals
    /// the cleared word is released. With duplicate words in the pool this may
    /// free a different index than the one originally picked.
    pub fn clear_slot(&mut self, slot_index: usize) -> bool {
        let Some(word) = self.filled.get_mut(slot_index).and_then(Option::take) else {
            return false;
        };

        let released = self
            .used
            .iter()
            .copied()
            .find(|&index| self.options[index] == word);
        if let Some(index) = released {
            self.used.remove(&index);
        }
        true
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.filled.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn filled(&self) -> &[Option<String>] {
        &self.filled
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn is_used(&self, option_index: usize) -> bool {
        self.used.contains(&option_index)
    }

    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.filled.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.filled.len()
    }
}
