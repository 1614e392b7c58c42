use chrono::{DateTime, Local};
use iced::widget::image::Handle;

use super::data::{EntryId, HistoryEntry};

/// Past exchanges, newest first.
///
/// Entries are only ever prepended; the one other mutation is a bulk clear.
/// Thumbnail handles are owned by the entries and released with them.
#[derive(Debug, Default)]
pub struct HistoryList {
    entries: Vec<HistoryEntry>,
    last_id: Option<EntryId>,
}

impl HistoryList {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed exchange at the front of the list
    /// Returns the id given to the new entry
    pub fn push_front(
        &mut self,
        thumbnail: Handle,
        question: String,
        answer: String,
        created_at: DateTime<Local>,
    ) -> EntryId {
        let id = self.mint_id(created_at.timestamp_millis());
        self.entries.insert(
            0,
            HistoryEntry {
                id,
                thumbnail,
                question,
                answer,
                created_at,
            },
        );
        id
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn first(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creation-time id, forced past the previous one so ids stay unique
    /// even when the clock stalls or steps backwards
    fn mint_id(&mut self, millis: i64) -> EntryId {
        let id = match self.last_id {
            Some(EntryId(last)) if millis <= last => EntryId(last + 1),
            _ => EntryId(millis),
        };
        self.last_id = Some(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn thumb() -> Handle {
        Handle::from_bytes(vec![0u8; 4])
    }

    fn at(millis: i64) -> DateTime<Local> {
        Local.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_newest_first() {
        let mut history = HistoryList::new();
        history.push_front(thumb(), "first?".into(), "one".into(), at(1_000));
        history.push_front(thumb(), "second?".into(), "two".into(), at(2_000));

        let questions: Vec<_> = history.entries().iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["second?", "first?"]);
        assert_eq!(history.first().unwrap().answer, "two");
    }

    #[test]
    fn test_ids_unique_and_increasing() {
        let mut history = HistoryList::new();
        let a = history.push_front(thumb(), "a".into(), "a".into(), at(5_000));
        let b = history.push_front(thumb(), "b".into(), "b".into(), at(5_000));
        let c = history.push_front(thumb(), "c".into(), "c".into(), at(4_000));
        let d = history.push_front(thumb(), "d".into(), "d".into(), at(9_000));

        assert_eq!(a, EntryId(5_000));
        assert_eq!(b, EntryId(5_001));
        assert_eq!(c, EntryId(5_002));
        assert_eq!(d, EntryId(9_000));
    }

    #[test]
    fn test_clear_empties_any_size() {
        let mut history = HistoryList::new();
        history.clear();
        assert!(history.is_empty());

        for i in 0..25 {
            history.push_front(thumb(), format!("q{i}"), format!("a{i}"), at(i));
        }
        assert_eq!(history.len(), 25);

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_ids_stay_unique_after_clear() {
        let mut history = HistoryList::new();
        let before = history.push_front(thumb(), "a".into(), "a".into(), at(7_000));
        history.clear();
        let after = history.push_front(thumb(), "b".into(), "b".into(), at(7_000));
        assert!(after > before);
    }
}
