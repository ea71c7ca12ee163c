use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Month, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::calendar;
use crate::fetch::{ExtractSource, WikiClient};
use crate::parser;
use crate::report::Report;
use crate::settings::Settings;

pub const DEFAULT_YEAR: i32 = 2024;

/// One day of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHolidays {
    pub month: String,
    pub day: String,
    pub report: Report,
}

/// month number → day number → day.
pub type YearHolidays = BTreeMap<u32, BTreeMap<u32, DayHolidays>>;

/// Batch stats returned after completion.
pub struct BatchStats {
    pub total: usize,
    pub fetched: usize,
    pub parsed: usize,
}

/// Every day of `year`, in order.
pub fn year_days(year: i32) -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|first| {
            first
                .iter_days()
                .take_while(|d| d.year() == year)
                .collect()
        })
        .unwrap_or_default()
}

/// Fetch all `days` concurrently, keeping only non-empty extracts.
pub async fn fetch_days<S>(
    source: Arc<S>,
    days: Vec<NaiveDate>,
    concurrency: usize,
) -> Vec<(NaiveDate, String)>
where
    S: ExtractSource + Send + Sync + 'static,
{
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let total = days.len();

    let pb = ProgressBar::new(total as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    let (tx, mut rx) = tokio::sync::mpsc::channel::<(NaiveDate, String)>(concurrency * 2);

    for date in days {
        let source = Arc::clone(&source);
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let Ok(_permit) = sem.acquire().await else {
                return;
            };
            let text = source.fetch(date).await;
            let _ = tx.send((date, text)).await;
        });
    }

    // rx closes once every task has dropped its sender
    drop(tx);

    let mut pages = Vec::with_capacity(total);
    while let Some((date, text)) = rx.recv().await {
        if text.is_empty() {
            warn!(day = %date, "empty extract, skipping");
        } else {
            pages.push((date, text));
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Fetched {} of {} days", pages.len(), total);
    pages
}

/// Parse extracts in parallel and attach each day's stats.
pub fn parse_days(pages: &[(NaiveDate, String)]) -> Vec<(NaiveDate, Report)> {
    pages
        .par_iter()
        .filter_map(|(date, text)| match parser::parse(text) {
            Ok(mut report) => {
                report.stats = calendar::stats(*date);
                Some((*date, report))
            }
            Err(e) => {
                warn!(day = %date, "Error: {}", e);
                None
            }
        })
        .collect()
}

pub fn group_by_month(reports: Vec<(NaiveDate, Report)>) -> YearHolidays {
    let mut year = YearHolidays::new();
    for (date, report) in reports {
        let month = Month::try_from(date.month() as u8)
            .map(|m| m.name().to_string())
            .unwrap_or_default();
        year.entry(date.month()).or_default().insert(
            date.day(),
            DayHolidays {
                month,
                day: date.day().to_string(),
                report,
            },
        );
    }
    year
}

/// Fetch, parse and write a whole year of reports as one JSON document.
pub async fn run(settings: &Settings, year: i32, out: &Path) -> Result<BatchStats> {
    let days = year_days(year);
    if days.len() != 366 {
        anyhow::bail!("{} is not a leap year; 29 февраля would be missing", year);
    }
    let total = days.len();

    let client = Arc::new(WikiClient::new(settings)?);
    let pages = fetch_days(client, days, settings.concurrency).await;
    let fetched = pages.len();

    let reports = parse_days(&pages);
    let parsed = reports.len();

    let document = group_by_month(reports);
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(out, json).with_context(|| format!("Failed to write {}", out.display()))?;
    info!("Wrote {} reports to {}", parsed, out.display());

    Ok(BatchStats {
        total,
        fetched,
        parsed,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct StubSource {
        calls: AtomicUsize,
    }

    impl ExtractSource for StubSource {
        async fn fetch(&self, date: NaiveDate) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if date.day() == 13 {
                return String::new();
            }
            format!("== Приметы ==\n{}\n", calendar::article_title(date))
        }
    }

    #[test]
    fn leap_year_has_feb_29() {
        let days = year_days(2024);
        assert_eq!(days.len(), 366);
        assert!(days.contains(&NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert_eq!(days.first(), NaiveDate::from_ymd_opt(2024, 1, 1).as_ref());
        assert_eq!(days.last(), NaiveDate::from_ymd_opt(2024, 12, 31).as_ref());
        assert_eq!(year_days(2025).len(), 365);
    }

    #[tokio::test]
    async fn empty_extracts_are_skipped() {
        let source = Arc::new(StubSource {
            calls: AtomicUsize::new(0),
        });
        let days = year_days(2024);
        let pages = fetch_days(Arc::clone(&source), days, 4).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 366);
        // the 13th of every month comes back empty
        assert_eq!(pages.len(), 366 - 12);
    }

    #[tokio::test]
    async fn zero_concurrency_still_fetches() {
        let source = Arc::new(StubSource {
            calls: AtomicUsize::new(0),
        });
        let days: Vec<_> = year_days(2024).into_iter().take(3).collect();
        let pages = fetch_days(Arc::clone(&source), days, 0).await;
        assert_eq!(pages.len(), 3);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn grouping_uses_english_months() {
        let pages = vec![
            (NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), "== Приметы ==\nВисокосный\n".to_string()),
            (NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(), "== Приметы ==\nСвятки\n".to_string()),
            (NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(), String::new()),
        ];
        let year = group_by_month(parse_days(&pages));

        assert_eq!(year.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        let jan7 = &year[&1][&7];
        assert_eq!(jan7.month, "January");
        assert_eq!(jan7.day, "7");
        assert_eq!(jan7.report.omens, vec!["Святки"]);
        assert_eq!(jan7.report.stats, calendar::stats(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()));
        assert_eq!(year[&2][&29].month, "February");
        assert!(!year[&1].contains_key(&8));
    }

    #[test]
    fn document_shape() {
        let pages = vec![(
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            "== Праздники ==\nМеждународный женский день\n".to_string(),
        )];
        let json = serde_json::to_value(group_by_month(parse_days(&pages))).unwrap();
        let day = &json["3"]["8"];
        assert_eq!(day["month"], "March");
        assert_eq!(day["day"], "8");
        assert_eq!(
            day["report"]["holidaysInternational"][0],
            "Международный женский день"
        );
    }
}
