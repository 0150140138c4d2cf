//! Seed events used when no event list has been stored yet.

use std::path::Path;

use agenda_core::Event;

/// Reads the seed event list from a JSON file.
///
/// Returns an empty list if no path is configured or the file is missing or
/// unreadable; problems are logged rather than returned so startup never fails
/// on seed data.
pub fn load_seed(path: Option<&Path>) -> Vec<Event> {
    let Some(path) = path else {
        return Vec::new();
    };
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "failed to read seed file");
            return Vec::new();
        }
    };
    match serde_json::from_str(&content) {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "failed to parse seed file");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_empty_seed() {
        assert!(load_seed(None).is_empty());
        let dir = tempfile::tempdir().unwrap();
        assert!(load_seed(Some(&dir.path().join("nope.json"))).is_empty());
    }

    #[test]
    fn reads_event_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "title": "Kickoff", "date": "2024-03-10", "startTime": "09:00", "endTime": "10:00", "repeat": "none"}]"#,
        )
        .unwrap();

        let events = load_seed(Some(&path));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Kickoff");
        assert_eq!(events[0].extra["repeat"], "none");
    }

    #[test]
    fn garbage_yields_empty_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_seed(Some(&path)).is_empty());
    }
}
