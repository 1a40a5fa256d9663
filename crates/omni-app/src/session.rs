use omni_types::{HistoryItem, TranslationResult};

/// In-memory history, the active search filter and the current result.
#[derive(Debug, Default)]
pub struct Session {
    history: Vec<TranslationResult>,
    /// Lowercased search text, empty when no search is active
    search: String,
    /// Indices into `history` matching `search`
    filtered: Vec<usize>,
    last_result: Option<TranslationResult>,
}

impl Session {
    /// The most recent entry becomes the current result
    pub fn new(history: Vec<TranslationResult>) -> Self {
        let last_result = history.last().cloned();
        let mut session = Self {
            history,
            last_result,
            ..Self::default()
        };
        session.refresh();
        session
    }

    pub fn history(&self) -> &[TranslationResult] {
        &self.history
    }

    pub fn last_result(&self) -> Option<&TranslationResult> {
        self.last_result.as_ref()
    }

    pub fn set_last_result(&mut self, result: TranslationResult) {
        self.last_result = Some(result);
    }

    /// Finds an entry by input, ignoring case
    pub fn find(&self, input: &str) -> Option<(usize, &TranslationResult)> {
        let input = input.to_lowercase();

        self.history
            .iter()
            .enumerate()
            .find(|(_, result)| result.input.to_lowercase() == input)
    }

    pub fn add(&mut self, result: TranslationResult) {
        self.history.push(result.clone());
        self.last_result = Some(result);
        self.refresh();
    }

    /// Filters by a case-insensitive substring of the input or translation
    pub fn filter(&mut self, search: &str) {
        self.search = search.trim().to_lowercase();
        self.refresh();
    }

    pub fn items(&self) -> Vec<HistoryItem> {
        self.filtered
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                let result = &self.history[position];
                HistoryItem {
                    index,
                    input: result.input.clone(),
                    summary: result
                        .dictionary
                        .as_ref()
                        .and_then(|record| record.primary_definition())
                        .unwrap_or(result.translation.as_str())
                        .to_string(),
                }
            })
            .collect()
    }

    /// Makes a filtered entry the current result
    pub fn select(&mut self, index: usize) -> Option<TranslationResult> {
        let position = *self.filtered.get(index)?;
        let result = self.history[position].clone();

        self.last_result = Some(result.clone());
        Some(result)
    }

    /// Removes a filtered entry from the history
    pub fn delete(&mut self, index: usize) -> Option<TranslationResult> {
        let position = *self.filtered.get(index)?;
        let removed = self.history.remove(position);

        if self
            .last_result
            .as_ref()
            .is_some_and(|last| last.id == removed.id)
        {
            self.last_result = None;
        }

        self.refresh();
        Some(removed)
    }

    fn refresh(&mut self) {
        let search = &self.search;

        self.filtered = self
            .history
            .iter()
            .enumerate()
            .filter(|(_, result)| {
                search.is_empty()
                    || result.input.to_lowercase().contains(search.as_str())
                    || result.translation.to_lowercase().contains(search.as_str())
            })
            .map(|(position, _)| position)
            .collect();
    }
}
