//! Monthly per-article aggregation.
//!
//! Pure transform over the production-entry and worker collections; no
//! store access and no side effects.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::model::{ProductionEntry, UNKNOWN_WORKER, Worker};
use crate::month::cmp_labels_desc;

/// One contributing entry inside a summary, with the worker name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerShare {
    pub worker_id: String,
    pub worker_name: String,
    pub quantity: i64,
}

/// Total production of one article in one month, with the per-worker
/// breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyArticleSummary {
    pub article: String,
    pub month: String,
    pub total_quantity: i64,
    pub earliest_date: DateTime<Utc>,
    pub workers: Vec<WorkerShare>,
}

/// Group entries by `(month, article)`, summing quantities and tracking
/// the earliest update date per group. The breakdown carries one row per
/// contributing entry; a `worker_id` that does not resolve renders as the
/// unknown-worker sentinel rather than failing.
///
/// The result is in display order: months descending by calendar date,
/// then summaries ascending by earliest date, article breaking ties.
#[must_use]
pub fn summarize(entries: &[ProductionEntry], workers: &[Worker]) -> Vec<MonthlyArticleSummary> {
    let names: HashMap<&str, &str> = workers
        .iter()
        .map(|w| (w.id.as_str(), w.name.as_str()))
        .collect();

    let mut groups: Vec<MonthlyArticleSummary> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for entry in entries {
        let key = (entry.month.clone(), entry.article.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(MonthlyArticleSummary {
                article: entry.article.clone(),
                month: entry.month.clone(),
                total_quantity: 0,
                earliest_date: entry.date,
                workers: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.total_quantity += entry.quantity;
        if entry.date < group.earliest_date {
            group.earliest_date = entry.date;
        }
        group.workers.push(WorkerShare {
            worker_id: entry.worker_id.clone(),
            worker_name: names
                .get(entry.worker_id.as_str())
                .map_or(UNKNOWN_WORKER, |name| name)
                .to_string(),
            quantity: entry.quantity,
        });
    }

    groups.sort_by(|a, b| {
        cmp_labels_desc(&a.month, &b.month)
            .then_with(|| a.earliest_date.cmp(&b.earliest_date))
            .then_with(|| a.article.cmp(&b.article))
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use crate::model::{ProductionEntry, UNKNOWN_WORKER, Worker};
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, month, day, 12, 0, 0)
            .single()
            .expect("valid date")
    }

    fn entry(
        id: &str,
        worker_id: &str,
        article: &str,
        quantity: i64,
        month: &str,
        date: DateTime<Utc>,
    ) -> ProductionEntry {
        ProductionEntry {
            id: id.to_string(),
            worker_id: worker_id.to_string(),
            article: article.to_string(),
            quantity,
            month: month.to_string(),
            date,
        }
    }

    fn worker(id: &str, name: &str) -> Worker {
        Worker {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn sums_quantities_per_month_and_article() {
        let workers = [worker("a", "Petrov"), worker("b", "Sidorov")];
        let entries = [
            entry("e1", "a", "X", 5, "January 2026", at(1, 10)),
            entry("e2", "b", "X", 3, "January 2026", at(1, 12)),
        ];

        let summaries = summarize(&entries, &workers);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].article, "X");
        assert_eq!(summaries[0].month, "January 2026");
        assert_eq!(summaries[0].total_quantity, 8);
        assert_eq!(summaries[0].earliest_date, at(1, 10));
        assert_eq!(summaries[0].workers.len(), 2);
        assert_eq!(summaries[0].workers[0].worker_name, "Petrov");
        assert_eq!(summaries[0].workers[1].quantity, 3);
    }

    #[test]
    fn dangling_worker_reference_renders_sentinel() {
        let entries = [entry("e1", "ghost", "X", 2, "January 2026", at(1, 10))];
        let summaries = summarize(&entries, &[]);
        assert_eq!(summaries[0].workers[0].worker_name, UNKNOWN_WORKER);
    }

    #[test]
    fn months_descend_and_articles_ascend_by_earliest_date() {
        let workers = [worker("a", "Petrov")];
        let entries = [
            entry("e1", "a", "LATE", 1, "January 2026", at(1, 20)),
            entry("e2", "a", "EARLY", 1, "January 2026", at(1, 5)),
            entry("e3", "a", "X", 1, "February 2026", at(2, 1)),
        ];

        let summaries = summarize(&entries, &workers);
        let order: Vec<(&str, &str)> = summaries
            .iter()
            .map(|s| (s.month.as_str(), s.article.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("February 2026", "X"),
                ("January 2026", "EARLY"),
                ("January 2026", "LATE"),
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(summarize(&[], &[]).is_empty());
    }

    proptest! {
        /// The per-(month, article) total always equals the sum of the
        /// matching entries' quantities.
        #[test]
        fn totals_equal_sum_of_matching_entries(
            quantities in proptest::collection::vec((0i64..10_000, 0usize..3, 0usize..2), 1..40)
        ) {
            let months = ["January 2026", "February 2026", "March 2026"];
            let articles = ["AB-1", "CD-2"];
            let entries: Vec<_> = quantities
                .iter()
                .enumerate()
                .map(|(i, &(qty, m, a))| {
                    entry(&format!("e{i}"), "w", articles[a], qty, months[m], at(1, 1))
                })
                .collect();

            let summaries = summarize(&entries, &[]);
            for summary in &summaries {
                let expected: i64 = entries
                    .iter()
                    .filter(|e| e.month == summary.month && e.article == summary.article)
                    .map(|e| e.quantity)
                    .sum();
                prop_assert_eq!(summary.total_quantity, expected);
                prop_assert_eq!(
                    summary.workers.iter().map(|w| w.quantity).sum::<i64>(),
                    expected
                );
            }

            let grouped: usize = summaries.iter().map(|s| s.workers.len()).sum();
            prop_assert_eq!(grouped, entries.len());
        }
    }
}
