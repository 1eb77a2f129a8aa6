//! Committee arithmetic: vote tallies and the compatibility score.

use crate::agent::Vote;
use serde::{Deserialize, Serialize};

/// How a tally concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusType {
    /// Every vote was `for`.
    Unanimous,
    /// A strict majority voted `for`, but not everyone.
    Majority,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyResult {
    pub votes_for: usize,
    pub votes_against: usize,
    pub abstentions: usize,
    pub total: usize,
    pub consensus_reached: bool,
    pub consensus_type: ConsensusType,
}

/// Count votes. Consensus needs a strict majority of all votes cast,
/// abstentions included (3 of 5).
pub fn tally_votes(votes: &[Vote]) -> TallyResult {
    let count = |wanted: Vote| votes.iter().filter(|v| **v == wanted).count();

    let total = votes.len();
    let votes_for = count(Vote::For);
    let consensus_reached = votes_for >= total / 2 + 1;

    let consensus_type = if !consensus_reached {
        ConsensusType::None
    } else if votes_for == total {
        ConsensusType::Unanimous
    } else {
        ConsensusType::Majority
    };

    TallyResult {
        votes_for,
        votes_against: count(Vote::Against),
        abstentions: count(Vote::Abstain),
        total,
        consensus_reached,
        consensus_type,
    }
}

/// Weighted compatibility score in 0..=100.
///
/// Weights: color 25%, size validity 35% (all or nothing), personality 20%,
/// history 20%.
pub fn generate_compatibility_score(
    color_score: f64,
    size_valid: bool,
    personality_score: f64,
    historical_score: f64,
) -> u8 {
    let size_score = if size_valid { 100.0 } else { 0.0 };
    let weighted = 0.25 * color_score + 0.35 * size_score + 0.20 * personality_score
        + 0.20 * historical_score;

    if weighted.is_finite() {
        weighted.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Vote::{Abstain, Against, For};

    #[test]
    fn three_of_five_is_a_majority() {
        let tally = tally_votes(&[For, For, For, Against, Abstain]);
        assert_eq!(tally.votes_for, 3);
        assert_eq!(tally.votes_against, 1);
        assert_eq!(tally.abstentions, 1);
        assert_eq!(tally.total, 5);
        assert!(tally.consensus_reached);
        assert_eq!(tally.consensus_type, ConsensusType::Majority);
    }

    #[test]
    fn all_for_is_unanimous() {
        let tally = tally_votes(&[For; 5]);
        assert!(tally.consensus_reached);
        assert_eq!(tally.consensus_type, ConsensusType::Unanimous);
    }

    #[test]
    fn two_of_five_is_no_consensus() {
        let tally = tally_votes(&[For, For, Against, Abstain, Abstain]);
        assert!(!tally.consensus_reached);
        assert_eq!(tally.consensus_type, ConsensusType::None);
    }

    #[test]
    fn every_five_vote_tuple_follows_the_threshold() {
        let options = [For, Against, Abstain];
        for a in options {
            for b in options {
                for c in options {
                    for d in options {
                        for e in options {
                            let votes = [a, b, c, d, e];
                            let fors = votes.iter().filter(|v| **v == For).count();
                            let tally = tally_votes(&votes);
                            assert_eq!(tally.consensus_reached, fors >= 3, "{votes:?}");
                            assert_eq!(
                                tally.consensus_type == ConsensusType::Unanimous,
                                fors == 5,
                                "{votes:?}"
                            );
                            assert_eq!(
                                tally.votes_for + tally.votes_against + tally.abstentions,
                                5
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn empty_tally_has_no_consensus() {
        let tally = tally_votes(&[]);
        assert_eq!(tally.total, 0);
        assert!(!tally.consensus_reached);
        assert_eq!(tally.consensus_type, ConsensusType::None);
    }

    #[test]
    fn tally_serializes_camel_case() {
        let value = serde_json::to_value(tally_votes(&[For, For, For, For, For])).unwrap();
        assert_eq!(value["votesFor"], 5);
        assert_eq!(value["consensusReached"], true);
        assert_eq!(value["consensusType"], "unanimous");
    }

    #[test]
    fn compatibility_score_is_weighted_sum() {
        assert_eq!(generate_compatibility_score(100.0, true, 100.0, 100.0), 100);
        assert_eq!(generate_compatibility_score(0.0, false, 0.0, 0.0), 0);
        // 0.25*80 + 35 + 0.2*85 + 0.2*100 = 20 + 35 + 17 + 20
        assert_eq!(generate_compatibility_score(80.0, true, 85.0, 100.0), 92);
        // 0.25*90 + 0 + 0.2*50 + 0.2*70 = 22.5 + 10 + 14 = 46.5
        assert_eq!(generate_compatibility_score(90.0, false, 50.0, 70.0), 47);
    }

    #[test]
    fn compatibility_score_is_clamped() {
        assert_eq!(generate_compatibility_score(1000.0, true, 1000.0, 1000.0), 100);
        assert_eq!(generate_compatibility_score(-500.0, false, -10.0, 0.0), 0);
        assert_eq!(generate_compatibility_score(f64::NAN, true, 50.0, 50.0), 0);
    }
}
