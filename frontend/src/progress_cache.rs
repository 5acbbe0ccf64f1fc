//! Per-topic checklist completion kept in local storage, never synced.
//!
//! Stored under `progress-<topic slug>`. The current format remembers the
//! section titles so a change in the source can be migrated: completion
//! follows the title, new sections start unchecked. The older format is a
//! bare bool array that is only trusted when its length still matches.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::PROGRESS_PREFIX;
use crate::markdown::Section;
use crate::progress::percent;
use crate::storage::KeyValueStore;

const RECORD_VERSION: u32 = 2;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ProgressRecord {
    version: u32,
    titles: Vec<String>,
    sections: Vec<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Record(ProgressRecord),
    Legacy(Vec<bool>),
}

pub fn storage_key(topic_key: &str) -> String {
    format!("{PROGRESS_PREFIX}{topic_key}")
}

/// Maps whatever is stored onto the current `titles`.
fn reconcile(raw: Option<&str>, titles: &[String]) -> Vec<bool> {
    let fresh = || vec![false; titles.len()];
    let Some(raw) = raw else {
        return fresh();
    };

    match serde_json::from_str::<Stored>(raw) {
        Ok(Stored::Legacy(flags)) if flags.len() == titles.len() => flags,
        Ok(Stored::Legacy(flags)) => {
            info!("progress reset: {} stored sections, {} now", flags.len(), titles.len());
            fresh()
        }
        Ok(Stored::Record(rec)) if rec.titles.len() != rec.sections.len() => {
            warn!("progress record is inconsistent, resetting");
            fresh()
        }
        Ok(Stored::Record(rec)) if rec.titles == titles => rec.sections,
        Ok(Stored::Record(rec)) => migrate(&rec, titles),
        Err(e) => {
            warn!("unreadable progress record: {e}");
            fresh()
        }
    }
}

/// Carries completion over by title. Duplicate titles pair up in order.
fn migrate(rec: &ProgressRecord, titles: &[String]) -> Vec<bool> {
    let mut used = vec![false; rec.titles.len()];
    titles
        .iter()
        .map(|title| {
            let hit = rec
                .titles
                .iter()
                .enumerate()
                .position(|(i, old)| !used[i] && old == title);
            match hit {
                Some(i) => {
                    used[i] = true;
                    rec.sections[i]
                }
                None => false,
            }
        })
        .collect()
}

pub struct ProgressCache<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self, topic_key: &str, sections: &[Section]) -> Vec<bool> {
        let titles = titles_of(sections);
        reconcile(self.store.get(&storage_key(topic_key)).as_deref(), &titles)
    }

    pub fn save(&self, topic_key: &str, sections: &[Section], done: &[bool]) {
        let record = ProgressRecord {
            version: RECORD_VERSION,
            titles: titles_of(sections),
            sections: done.to_vec(),
        };
        match serde_json::to_string(&record) {
            Ok(json) => self.store.set(&storage_key(topic_key), &json),
            Err(e) => warn!("progress not saved: {e}"),
        }
    }

    /// Flips one section, persists, and returns the new flags.
    pub fn toggle(&self, topic_key: &str, sections: &[Section], index: usize) -> Vec<bool> {
        let mut done = self.load(topic_key, sections);
        if let Some(flag) = done.get_mut(index) {
            *flag = !*flag;
        }
        self.save(topic_key, sections, &done);
        done
    }
}

pub fn completion(done: &[bool]) -> u8 {
    percent(done.iter().filter(|d| **d).count(), done.len())
}

fn titles_of(sections: &[Section]) -> Vec<String> {
    sections.iter().map(|s| s.title.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::split_sections;
    use crate::storage::memory::MemoryStore;

    fn titles(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn legacy_array_of_matching_length_is_kept() {
        let flags = reconcile(Some("[true,false]"), &titles(&["A", "B"]));
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn legacy_array_of_other_length_resets() {
        let flags = reconcile(Some("[true,true,true]"), &titles(&["A", "B"]));
        assert_eq!(flags, vec![false, false]);
    }

    #[test]
    fn missing_or_garbage_resets() {
        assert_eq!(reconcile(None, &titles(&["A"])), vec![false]);
        assert_eq!(reconcile(Some("not json"), &titles(&["A"])), vec![false]);
        assert_eq!(reconcile(Some(r#"{"version":2,"titles":["A"],"sections":[]}"#), &titles(&["A"])), vec![false]);
    }

    #[test]
    fn record_migrates_by_title() {
        let stored = r#"{"version":2,"titles":["A","B","C"],"sections":[true,false,true]}"#;
        let flags = reconcile(Some(stored), &titles(&["C", "New", "A"]));
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn duplicate_titles_pair_up_in_order() {
        let stored = r#"{"version":2,"titles":["Notes","Notes"],"sections":[false,true]}"#;
        let flags = reconcile(Some(stored), &titles(&["Notes", "X", "Notes"]));
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn save_load_and_toggle_through_store() {
        let cache = ProgressCache::new(MemoryStore::default());
        let sections = split_sections("## A\nfoo\n## B\nbar");

        assert_eq!(cache.load("graphs", &sections), vec![false, false]);
        assert_eq!(cache.toggle("graphs", &sections, 1), vec![false, true]);
        assert_eq!(cache.load("graphs", &sections), vec![false, true]);
        assert_eq!(completion(&cache.load("graphs", &sections)), 50);

        // out-of-range index is a no-op
        assert_eq!(cache.toggle("graphs", &sections, 9), vec![false, true]);
        assert!(cache.store.get("progress-graphs").unwrap().contains("\"version\":2"));
    }

    #[test]
    fn completion_of_nothing_is_zero() {
        assert_eq!(completion(&[]), 0);
        assert_eq!(completion(&[true, true, false]), 67);
    }
}
