use chrono::{Datelike, NaiveDate};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::calendar;
use crate::fetch::ExtractSource;
use crate::parser;
use crate::report::Report;

type DayKey = (i32, u32, u32);

struct Slot {
    key: DayKey,
    report: Report,
}

/// One-report cache keyed by calendar day.
///
/// The lock is held across fetch and parse, so concurrent misses for the same
/// day wait for the first one instead of fetching again.
pub struct ReportCache<S> {
    source: S,
    slot: Mutex<Option<Slot>>,
}

impl<S: ExtractSource> ReportCache<S> {
    pub fn new(source: S) -> Self {
        ReportCache {
            source,
            slot: Mutex::new(None),
        }
    }

    pub async fn get(&self, date: NaiveDate) -> Report {
        let key = (date.year(), date.month(), date.day());
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.as_ref().filter(|cached| cached.key == key) {
            return cached.report.clone();
        }

        let text = self.source.fetch(date).await;
        match parser::parse(&text) {
            Ok(mut report) => {
                report.stats = calendar::stats(date);
                info!(day = %date, "cached new report");
                *slot = Some(Slot {
                    key,
                    report: report.clone(),
                });
                report
            }
            Err(e) => {
                warn!(day = %date, "Error: {}", e);
                Report::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    struct StubSource {
        text: String,
        calls: Arc<AtomicUsize>,
    }

    impl ExtractSource for StubSource {
        async fn fetch(&self, _date: NaiveDate) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.text.clone()
        }
    }

    fn stub(text: &str) -> (ReportCache<StubSource>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = ReportCache::new(StubSource {
            text: text.to_string(),
            calls: Arc::clone(&calls),
        });
        (cache, calls)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[tokio::test]
    async fn same_day_fetches_once() {
        let (cache, calls) = stub("== Приметы ==\nСвятки\n");
        let first = cache.get(date(7)).await;
        let second = cache.get(date(7)).await;
        assert_eq!(first, second);
        assert_eq!(first.omens, vec!["Святки"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn new_day_refetches() {
        let (cache, calls) = stub("== Приметы ==\nСвятки\n");
        cache.get(date(7)).await;
        let next = cache.get(date(8)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(next.stats.contains("8 января 2026 года"));
    }

    #[tokio::test]
    async fn stats_attached() {
        let (cache, _) = stub("== Приметы ==\nСвятки\n");
        let report = cache.get(date(7)).await;
        assert_eq!(report.stats, calendar::stats(date(7)));
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let (cache, calls) = stub("");
        assert_eq!(cache.get(date(7)).await, Report::default());
        assert_eq!(cache.get(date(7)).await, Report::default());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_misses_share_one_fetch() {
        let (cache, calls) = stub("== Приметы ==\nСвятки\n");
        let cache = Arc::new(cache);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get(date(7)).await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().omens, vec!["Святки"]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
