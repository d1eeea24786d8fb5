//! Milestone detection over a shot history.
//!
//! Each shot is scored exactly once into a memoized list; streaks and
//! bests are derived from that list instead of rescoring per check.

use crate::analysis::config::BrewTuning;
use crate::analysis::scorer::score_shot;
use crate::analysis::types::Milestone;
use crate::db::models::Shot;

const STREAK_LENGTHS: [usize; 3] = [3, 5, 10];

/// Detect milestones across `shots`, scored against `context`. Shots
/// are walked oldest first; each streak length is reported once, at the
/// shot that first reached it.
pub fn detect_milestones(shots: &[Shot], context: &[Shot], tuning: &BrewTuning) -> Vec<Milestone> {
    if shots.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&Shot> = shots.iter().collect();
    ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    // The single scoring pass everything below reads from.
    let scored: Vec<(&Shot, i64)> = ordered
        .iter()
        .map(|shot| (*shot, score_shot(shot, context, tuning).total))
        .collect();

    let mut milestones = Vec::new();

    let mut streak = 0usize;
    let mut reported_streaks = [false; STREAK_LENGTHS.len()];
    let mut perfect_reported = false;
    for (shot, score) in &scored {
        if *score >= tuning.tier_good {
            streak += 1;
            for (idx, length) in STREAK_LENGTHS.iter().enumerate() {
                if streak == *length && !reported_streaks[idx] {
                    reported_streaks[idx] = true;
                    milestones.push(Milestone::GoodStreak {
                        shot_id: shot.id.clone(),
                        length: *length,
                    });
                }
            }
        } else {
            streak = 0;
        }

        if *score == 100 && !perfect_reported {
            perfect_reported = true;
            milestones.push(Milestone::PerfectShot {
                shot_id: shot.id.clone(),
            });
        }
    }

    // Personal best only makes sense with history to beat, and only for
    // the latest shot; older bests were news at the time, not now.
    if scored.len() >= 2 {
        let (last, last_score) = scored[scored.len() - 1];
        let best_before = scored[..scored.len() - 1]
            .iter()
            .map(|(_, score)| *score)
            .max()
            .unwrap_or(0);
        if last_score > best_before {
            milestones.push(Milestone::NewPersonalBest {
                shot_id: last.id.clone(),
                score: last_score,
            });
        }
    }

    milestones
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::shot;
    use crate::db::models::TastePrimary;

    #[test]
    fn empty_history_has_no_milestones() {
        assert!(detect_milestones(&[], &[], &BrewTuning::default()).is_empty());
    }

    #[test]
    fn streaks_are_reported_once_at_the_reaching_shot() {
        let tuning = BrewTuning::default();
        let shots: Vec<_> = (0..6)
            .map(|i| shot("bean-a", 18.0, 36.0, 28, Some(TastePrimary::Perfect), i))
            .collect();

        let milestones = detect_milestones(&shots, &shots, &tuning);

        let streaks: Vec<_> = milestones
            .iter()
            .filter_map(|m| match m {
                Milestone::GoodStreak { shot_id, length } => Some((shot_id.clone(), *length)),
                _ => None,
            })
            .collect();
        assert_eq!(
            streaks,
            vec![(shots[2].id.clone(), 3), (shots[4].id.clone(), 5)]
        );
    }

    #[test]
    fn bad_shot_resets_the_streak() {
        let tuning = BrewTuning::default();
        let mut shots = vec![
            shot("bean-a", 18.0, 36.0, 28, Some(TastePrimary::Perfect), 0),
            shot("bean-a", 18.0, 36.0, 28, Some(TastePrimary::Perfect), 1),
            // A disaster in the middle.
            shot("bean-a", 18.0, 12.0, 55, Some(TastePrimary::Bitter), 2),
        ];
        shots.extend((3..5).map(|i| shot("bean-a", 18.0, 36.0, 28, Some(TastePrimary::Perfect), i)));

        let milestones = detect_milestones(&shots, &shots, &tuning);
        assert!(!milestones
            .iter()
            .any(|m| matches!(m, Milestone::GoodStreak { .. })));
    }

    #[test]
    fn latest_shot_beating_history_is_a_personal_best() {
        let tuning = BrewTuning::default();
        let shots = vec![
            shot("bean-a", 18.0, 36.0, 22, None, 0),
            shot("bean-a", 18.0, 36.0, 23, None, 1),
            shot("bean-a", 18.0, 36.0, 28, Some(TastePrimary::Perfect), 2),
        ];

        let milestones = detect_milestones(&shots, &shots, &tuning);
        assert!(milestones
            .iter()
            .any(|m| matches!(m, Milestone::NewPersonalBest { shot_id, .. } if *shot_id == shots[2].id)));
    }
}
