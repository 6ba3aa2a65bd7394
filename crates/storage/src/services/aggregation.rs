//! Read-only analytics derived from the score ledger.
//!
//! Every function here is a pure function of the joined ledger slice, which
//! the repository supplies in insertion order. Grouping preserves first-seen
//! order and the leaderboard sort is stable, so tied contestants keep their
//! submission order.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::analytics::{
    ContestantAnalyticsEntry, ContestantInfo, ContestantRoundEntry, JudgeBreakdownEntry,
    JudgeInfo, JudgeScore, RoundInfo, RoundSummaryEntry, ScoreEntryResponse,
};
use crate::dto::decimal_to_f64;
use crate::models::ScoreDetail;

/// Per-contestant totals and averages across all rounds and judges, ranked
/// by total score descending (the leaderboard).
pub fn contestant_analytics(entries: &[ScoreDetail]) -> Vec<ContestantAnalyticsEntry> {
    struct Acc {
        contestant: ContestantInfo,
        total: Decimal,
        count: i64,
    }

    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut groups: Vec<Acc> = Vec::new();

    for entry in entries {
        let idx = *index.entry(entry.contestant_id).or_insert_with(|| {
            groups.push(Acc {
                contestant: ContestantInfo {
                    contestant_id: entry.contestant_id,
                    name: entry.contestant_name.clone(),
                },
                total: Decimal::ZERO,
                count: 0,
            });
            groups.len() - 1
        });

        groups[idx].total += entry.score;
        groups[idx].count += 1;
    }

    groups.sort_by(|a, b| b.total.cmp(&a.total));

    groups
        .into_iter()
        .enumerate()
        .map(|(i, acc)| ContestantAnalyticsEntry {
            rank: (i + 1) as i64,
            contestant: acc.contestant,
            total_score: decimal_to_f64(acc.total),
            average_score: decimal_to_f64(average(acc.total, acc.count)),
            score_count: acc.count,
        })
        .collect()
}

/// Totals and averages grouped by (contestant, round).
pub fn contestant_round_breakdown(entries: &[ScoreDetail]) -> Vec<ContestantRoundEntry> {
    struct Acc {
        contestant: ContestantInfo,
        round: RoundInfo,
        total: Decimal,
        count: i64,
    }

    let mut index: HashMap<(Uuid, Uuid), usize> = HashMap::new();
    let mut groups: Vec<Acc> = Vec::new();

    for entry in entries {
        let key = (entry.contestant_id, entry.round_id);
        let idx = *index.entry(key).or_insert_with(|| {
            groups.push(Acc {
                contestant: ContestantInfo {
                    contestant_id: entry.contestant_id,
                    name: entry.contestant_name.clone(),
                },
                round: RoundInfo {
                    round_id: entry.round_id,
                    name: entry.round_name.clone(),
                },
                total: Decimal::ZERO,
                count: 0,
            });
            groups.len() - 1
        });

        groups[idx].total += entry.score;
        groups[idx].count += 1;
    }

    groups
        .into_iter()
        .map(|acc| ContestantRoundEntry {
            contestant: acc.contestant,
            round: acc.round,
            total_score: decimal_to_f64(acc.total),
            average_score: decimal_to_f64(average(acc.total, acc.count)),
            score_count: acc.count,
        })
        .collect()
}

/// Every entry grouped per judge. A detail view, no aggregation.
pub fn judge_breakdown(entries: &[ScoreDetail]) -> Vec<JudgeBreakdownEntry> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut groups: Vec<JudgeBreakdownEntry> = Vec::new();

    for entry in entries {
        let idx = *index.entry(entry.judge_id).or_insert_with(|| {
            groups.push(JudgeBreakdownEntry {
                judge: JudgeInfo {
                    judge_id: entry.judge_id,
                    name: entry.judge_name.clone(),
                },
                scores: Vec::new(),
            });
            groups.len() - 1
        });

        groups[idx].scores.push(ScoreEntryResponse::from(entry.clone()));
    }

    groups
}

/// Per (contestant, round): each judge's score plus sum, average, count and
/// the round's max score as the possible ceiling.
pub fn round_summary(entries: &[ScoreDetail]) -> Vec<RoundSummaryEntry> {
    struct Acc {
        contestant: ContestantInfo,
        round: RoundInfo,
        judge_scores: Vec<JudgeScore>,
        total: Decimal,
        max_score: Decimal,
    }

    let mut index: HashMap<(Uuid, Uuid), usize> = HashMap::new();
    let mut groups: Vec<Acc> = Vec::new();

    for entry in entries {
        let key = (entry.contestant_id, entry.round_id);
        let idx = *index.entry(key).or_insert_with(|| {
            groups.push(Acc {
                contestant: ContestantInfo {
                    contestant_id: entry.contestant_id,
                    name: entry.contestant_name.clone(),
                },
                round: RoundInfo {
                    round_id: entry.round_id,
                    name: entry.round_name.clone(),
                },
                judge_scores: Vec::new(),
                total: Decimal::ZERO,
                max_score: entry.max_score,
            });
            groups.len() - 1
        });

        groups[idx].judge_scores.push(JudgeScore {
            judge: JudgeInfo {
                judge_id: entry.judge_id,
                name: entry.judge_name.clone(),
            },
            score: decimal_to_f64(entry.score),
            comment: entry.comment.clone(),
        });
        groups[idx].total += entry.score;
    }

    groups
        .into_iter()
        .map(|acc| {
            let count = acc.judge_scores.len() as i64;
            RoundSummaryEntry {
                contestant: acc.contestant,
                round: acc.round,
                total_score: decimal_to_f64(acc.total),
                average_score: decimal_to_f64(average(acc.total, count)),
                score_count: count,
                max_possible_score: decimal_to_f64(acc.max_score),
                judge_scores: acc.judge_scores,
            }
        })
        .collect()
}

fn average(total: Decimal, count: i64) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(contestant: u128, judge: u128, round: u128, score: i64) -> ScoreDetail {
        ScoreDetail {
            score_id: Uuid::new_v4(),
            round_id: Uuid::from_u128(round),
            round_name: format!("Round {round}"),
            max_score: Decimal::from(10),
            judge_id: Uuid::from_u128(judge),
            judge_name: format!("Judge {judge}"),
            contestant_id: Uuid::from_u128(contestant),
            contestant_name: format!("Contestant {contestant}"),
            score: Decimal::from(score),
            comment: None,
            question: None,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn three_judges_aggregate_to_total_and_average() {
        let ledger = [
            entry(1, 10, 100, 7),
            entry(1, 11, 100, 8),
            entry(1, 12, 100, 9),
        ];

        let analytics = contestant_analytics(&ledger);
        assert_eq!(analytics.len(), 1);
        assert_eq!(analytics[0].total_score, 24.0);
        assert_eq!(analytics[0].average_score, 8.0);
        assert_eq!(analytics[0].score_count, 3);
        assert_eq!(analytics[0].rank, 1);
    }

    #[test]
    fn leaderboard_orders_by_total_descending() {
        // A: 24, B: 30, C: 18 -> B, A, C
        let ledger = [
            entry(1, 10, 100, 24),
            entry(2, 10, 100, 30),
            entry(3, 10, 100, 18),
        ];

        let analytics = contestant_analytics(&ledger);
        let names: Vec<&str> = analytics
            .iter()
            .map(|e| e.contestant.name.as_str())
            .collect();
        assert_eq!(names, ["Contestant 2", "Contestant 1", "Contestant 3"]);
        assert_eq!(
            analytics.iter().map(|e| e.rank).collect::<Vec<_>>(),
            [1, 2, 3]
        );
    }

    #[test]
    fn tied_totals_keep_submission_order() {
        let ledger = [entry(1, 10, 100, 9), entry(2, 10, 100, 9)];

        let analytics = contestant_analytics(&ledger);
        assert_eq!(analytics[0].contestant.name, "Contestant 1");
        assert_eq!(analytics[1].contestant.name, "Contestant 2");
    }

    #[test]
    fn analytics_are_pure() {
        let ledger = [entry(1, 10, 100, 7), entry(2, 11, 101, 8)];
        assert_eq!(contestant_analytics(&ledger), contestant_analytics(&ledger));
        assert_eq!(round_summary(&ledger), round_summary(&ledger));
    }

    #[test]
    fn breakdown_groups_by_contestant_and_round() {
        let ledger = [
            entry(1, 10, 100, 7),
            entry(1, 11, 100, 9),
            entry(1, 10, 101, 5),
            entry(2, 10, 100, 6),
        ];

        let breakdown = contestant_round_breakdown(&ledger);
        assert_eq!(breakdown.len(), 3);

        assert_eq!(breakdown[0].contestant.name, "Contestant 1");
        assert_eq!(breakdown[0].round.name, "Round 100");
        assert_eq!(breakdown[0].total_score, 16.0);
        assert_eq!(breakdown[0].average_score, 8.0);
        assert_eq!(breakdown[0].score_count, 2);

        assert_eq!(breakdown[1].round.name, "Round 101");
        assert_eq!(breakdown[1].total_score, 5.0);
    }

    #[test]
    fn judge_breakdown_groups_all_entries_per_judge() {
        let ledger = [
            entry(1, 10, 100, 7),
            entry(2, 10, 100, 8),
            entry(1, 11, 100, 9),
        ];

        let breakdown = judge_breakdown(&ledger);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].judge.name, "Judge 10");
        assert_eq!(breakdown[0].scores.len(), 2);
        assert_eq!(breakdown[1].judge.name, "Judge 11");
        assert_eq!(breakdown[1].scores.len(), 1);
        assert_eq!(breakdown[1].scores[0].contestant.name, "Contestant 1");
    }

    #[test]
    fn round_summary_lists_judges_with_fixed_ceiling() {
        let ledger = [
            entry(1, 10, 100, 7),
            entry(1, 11, 100, 8),
            entry(1, 12, 100, 9),
        ];

        let summary = round_summary(&ledger);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].judge_scores.len(), 3);
        assert_eq!(summary[0].total_score, 24.0);
        assert_eq!(summary[0].average_score, 8.0);
        assert_eq!(summary[0].score_count, 3);
        // The ceiling is the round's max_score, not max_score * judges.
        assert_eq!(summary[0].max_possible_score, 10.0);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let ledger = [entry(1, 10, 100, 7), entry(1, 11, 100, 8)];
        let analytics = contestant_analytics(&ledger);
        assert_eq!(analytics[0].average_score, 7.5);

        let ledger = [
            entry(1, 10, 100, 10),
            entry(1, 11, 100, 10),
            entry(1, 12, 100, 9),
        ];
        let analytics = contestant_analytics(&ledger);
        assert_eq!(analytics[0].average_score, 9.67);
    }

    #[test]
    fn empty_ledger_yields_empty_views() {
        assert!(contestant_analytics(&[]).is_empty());
        assert!(contestant_round_breakdown(&[]).is_empty());
        assert!(judge_breakdown(&[]).is_empty());
        assert!(round_summary(&[]).is_empty());
    }
}
