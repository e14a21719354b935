#[cfg(test)]
mod tests {
    use crate::cache::{EventCache, LastError};
    use chrono::{TimeZone, Utc};
    use datepoll_common::models::Event;

    fn event(id: &str, title: &str) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            memo: String::new(),
            contact: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            candidates: Vec::new(),
            participants: Vec::new(),
        }
    }

    #[test]
    fn test_second_upsert_replaces_first() {
        let cache = EventCache::new();
        cache.upsert(event("x", "first fetch"));
        cache.upsert(event("x", "second fetch"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("x").unwrap().title, "second fetch");
    }

    #[test]
    fn test_get_unknown_is_none() {
        let cache = EventCache::new();
        assert!(cache.get("missing").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = EventCache::new();
        cache.upsert(event("a", "A"));
        cache.upsert(event("b", "B"));

        assert_eq!(cache.remove("a").map(|e| e.title), Some("A".to_string()));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_last_error_slot() {
        let slot = LastError::new();
        assert_eq!(slot.get(), None);
        slot.set("Database error: disk full");
        assert_eq!(slot.get().as_deref(), Some("Database error: disk full"));
        slot.clear();
        assert_eq!(slot.get(), None);
    }
}
