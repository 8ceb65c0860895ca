use std::collections::HashMap;

use crate::dto::leaderboard::LeaderboardEntry;
use crate::models::StudentClaim;

/// Sum of the multipliers snapshotted into the claims, saturating at the `i64` bounds.
pub fn total_score(claims: &[StudentClaim]) -> i64 {
    claims
        .iter()
        .fold(0i64, |total, claim| total.saturating_add(claim.multiplier))
}

/// Per-enrollment totals, highest score first.
///
/// Enrollments with equal scores keep the order in which they first appear
/// in the claim log, so whoever started scoring earlier ranks higher.
pub fn build_leaderboard(claims: &[StudentClaim]) -> Vec<LeaderboardEntry> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<LeaderboardEntry> = Vec::new();

    for claim in claims {
        let index = *positions
            .entry(claim.enrollment_no.as_str())
            .or_insert_with(|| {
                entries.push(LeaderboardEntry {
                    enrollment_no: claim.enrollment_no.clone(),
                    score: 0,
                });
                entries.len() - 1
            });
        entries[index].score = entries[index].score.saturating_add(claim.multiplier);
    }

    // Stable sort preserves first-appearance order among ties
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(enrollment_no: &str, multiplier: i64) -> StudentClaim {
        StudentClaim {
            enrollment_no: enrollment_no.to_string(),
            secret_code: format!("{}-{}", enrollment_no, multiplier),
            timestamp: String::new(),
            multiplier,
        }
    }

    fn ranking(entries: &[LeaderboardEntry]) -> Vec<(&str, i64)> {
        entries
            .iter()
            .map(|e| (e.enrollment_no.as_str(), e.score))
            .collect()
    }

    #[test]
    fn test_total_score() {
        assert_eq!(total_score(&[]), 0);
        assert_eq!(total_score(&[claim("E1", 5), claim("E1", 1)]), 6);
    }

    #[test]
    fn test_leaderboard_sums_and_sorts() {
        let claims = vec![
            claim("E1", 1),
            claim("E2", 5),
            claim("E1", 2),
            claim("E3", 4),
        ];

        let board = build_leaderboard(&claims);
        assert_eq!(ranking(&board), vec![("E2", 5), ("E3", 4), ("E1", 3)]);
    }

    #[test]
    fn test_ties_keep_first_appearance_order() {
        let claims = vec![claim("E3", 2), claim("E1", 2), claim("E2", 1), claim("E2", 1)];

        let board = build_leaderboard(&claims);
        assert_eq!(ranking(&board), vec![("E3", 2), ("E1", 2), ("E2", 2)]);
    }

    #[test]
    fn test_huge_multipliers_saturate() {
        let claims = vec![claim("E1", i64::MAX), claim("E1", 7), claim("E2", i64::MIN), claim("E2", -1)];

        assert_eq!(total_score(&claims[..2]), i64::MAX);
        assert_eq!(total_score(&claims[2..]), i64::MIN);

        let board = build_leaderboard(&claims);
        assert_eq!(ranking(&board), vec![("E1", i64::MAX), ("E2", i64::MIN)]);
    }

    #[test]
    fn test_empty_log_gives_empty_leaderboard() {
        assert!(build_leaderboard(&[]).is_empty());
    }
}
