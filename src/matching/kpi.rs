//! Match quality metrics (KPIs).
//!
//! Computes indicators from a finished outcome.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | (assigned + auto_adjusted) / total |
//! | Exact Rate | assigned / total |
//! | First-Choice Rate | exact matches at priority 1 / total |
//! | Avg / Max Adjustment | minutes moved for auto-adjusted records |
//! | Slot Utilization | placed records / offered slots |

use std::collections::BTreeMap;

use crate::models::{AssignmentOutcome, AssignmentStatus};

/// Outcome quality indicators.
#[derive(Debug, Clone)]
pub struct MatchKpi {
    /// Fraction of requests that received a slot (0.0..1.0).
    pub fill_rate: f64,
    /// Fraction of requests matched exactly on some preference.
    pub exact_rate: f64,
    /// Fraction of requests matched exactly on their priority-1 preference.
    pub first_choice_rate: f64,
    /// Mean adjustment over auto-adjusted records (minutes).
    pub avg_adjustment_minutes: f64,
    /// Largest single adjustment (minutes).
    pub max_adjustment_minutes: i64,
    /// Fraction of offered slots that were claimed.
    pub slot_utilization: f64,
    /// Exact matches per matched priority.
    pub matches_by_priority: BTreeMap<u32, usize>,
}

impl MatchKpi {
    /// Computes KPIs for an outcome.
    ///
    /// # Arguments
    /// * `outcome` - Result of a scheduling run.
    /// * `slot_count` - Number of slots offered to that run.
    pub fn calculate(outcome: &AssignmentOutcome, slot_count: usize) -> Self {
        let summary = outcome.summary();
        let mut first_choice = 0usize;
        let mut matches_by_priority = BTreeMap::new();
        let mut total_adjustment: i64 = 0;
        let mut max_adjustment: i64 = 0;

        for record in outcome.assignments() {
            match record.status() {
                AssignmentStatus::Assigned => {
                    if let Some(priority) = record.matched_priority() {
                        *matches_by_priority.entry(priority).or_insert(0) += 1;
                        if priority == 1 {
                            first_choice += 1;
                        }
                    }
                }
                AssignmentStatus::AutoAdjusted => {
                    let delta = record.adjustment_minutes().unwrap_or(0);
                    total_adjustment += delta;
                    max_adjustment = max_adjustment.max(delta);
                }
                AssignmentStatus::Unassigned => {}
            }
        }

        // Nothing requested → nothing missed.
        let rate = |count: usize| {
            if summary.total == 0 {
                1.0
            } else {
                count as f64 / summary.total as f64
            }
        };

        let avg_adjustment_minutes = if summary.auto_adjusted == 0 {
            0.0
        } else {
            total_adjustment as f64 / summary.auto_adjusted as f64
        };

        let slot_utilization = if slot_count == 0 {
            0.0
        } else {
            summary.placed() as f64 / slot_count as f64
        };

        Self {
            fill_rate: rate(summary.placed()),
            exact_rate: rate(summary.assigned),
            first_choice_rate: rate(first_choice),
            avg_adjustment_minutes,
            max_adjustment_minutes: max_adjustment,
            slot_utilization,
            matches_by_priority,
        }
    }

    /// Whether the outcome meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, max_adjustment_minutes: i64) -> bool {
        self.fill_rate >= min_fill_rate && self.max_adjustment_minutes <= max_adjustment_minutes
    }
}
