use serde::{Deserialize, Serialize};
use validator::Validate;

/// Path parameters for scoring a pair of profiles
#[derive(Debug, Clone, Deserialize)]
pub struct ScorePairPath {
    pub profile_a: String,
    pub profile_b: String,
}

/// Request to rank candidate profiles against one profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidatesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: String,
    #[validate(length(min = 1, max = 500))]
    #[serde(alias = "candidate_ids", rename = "candidateIds")]
    pub candidate_ids: Vec<String>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[validate(range(max = 100))]
    #[serde(default, alias = "min_score", rename = "minScore")]
    pub min_score: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_request_validation() {
        let valid: RankCandidatesRequest = serde_json::from_str(
            r#"{"profileId": "a", "candidateIds": ["b", "c"], "limit": 10}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());
        assert_eq!(valid.min_score, None);

        let no_candidates: RankCandidatesRequest =
            serde_json::from_str(r#"{"profileId": "a", "candidateIds": []}"#).unwrap();
        assert!(no_candidates.validate().is_err());

        let bad_limit: RankCandidatesRequest =
            serde_json::from_str(r#"{"profileId": "a", "candidateIds": ["b"], "limit": 0}"#)
                .unwrap();
        assert!(bad_limit.validate().is_err());

        let bad_score: RankCandidatesRequest = serde_json::from_str(
            r#"{"profile_id": "a", "candidate_ids": ["b"], "min_score": 101}"#,
        )
        .unwrap();
        assert!(bad_score.validate().is_err());
    }
}
