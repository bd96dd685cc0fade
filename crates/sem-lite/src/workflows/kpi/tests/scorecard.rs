use super::common::*;
use crate::ads::{AdStrength, BiddingStrategyType};
use crate::workflows::kpi::{
    data_maturity_score, DataAssessment, FirstPartyDataLevel, Ga4Level, KpiResult, KpiStatus,
    LevelError, MaturityScorecard,
};

#[test]
fn data_maturity_averages_both_assessments() {
    let assessment = DataAssessment {
        ga4: Ga4Level::Advanced,
        first_party: FirstPartyDataLevel::EnhancedConversions,
    };
    assert_eq!(
        data_maturity_score(&assessment),
        KpiResult {
            score: 70,
            status: KpiStatus::Pass
        }
    );

    let assessment = DataAssessment::from_levels(2, 1).expect("levels in range");
    assert_eq!(
        data_maturity_score(&assessment),
        KpiResult {
            score: 55,
            status: KpiStatus::Fail
        }
    );
}

#[test]
fn data_levels_outside_zero_to_three_are_rejected() {
    assert_eq!(DataAssessment::from_levels(4, 0), Err(LevelError(4)));
    assert_eq!(DataAssessment::from_levels(0, 9), Err(LevelError(9)));
}

#[test]
fn data_assessment_deserializes_from_numeric_levels() {
    let assessment: DataAssessment =
        serde_json::from_str(r#"{"ga4": 3, "firstParty": 0}"#).expect("assessment parses");
    assert_eq!(assessment.ga4, Ga4Level::PrimaryBidSource);
    assert_eq!(assessment.first_party, FirstPartyDataLevel::NotUsed);

    let invalid = serde_json::from_str::<DataAssessment>(r#"{"ga4": 5, "firstParty": 0}"#);
    assert!(invalid.is_err());
}

#[test]
fn scorecard_hides_coverage_until_gatekeeper_passes() {
    let mut campaigns = named_campaigns(1, 1);
    campaigns.push(brand_campaign("b", 1_000, 0.4));

    let scorecard = MaturityScorecard::compute(&campaigns, &[], None);

    assert_eq!(scorecard.gatekeeper.status, KpiStatus::Fail);
    assert!(!scorecard.coverage_visible());
    assert_eq!(scorecard.coverage.score, 60);
    assert!(scorecard.view().coverage.is_none());
    assert_eq!(scorecard.data, KpiResult::EMPTY);

    let worklist = scorecard.worklist(&campaigns, &[]);
    assert!(worklist.coverage.is_empty());
}

#[test]
fn scorecard_exposes_coverage_and_worklist_when_names_comply() {
    let campaigns = vec![
        brand_campaign("b1", 9_000, 0.02),
        brand_campaign("b2", 1_000, 0.1),
        bidding_campaign("g1", BiddingStrategyType::TargetRoas, 10_000_000),
    ];
    let groups = vec![
        ad_group("1", AdStrength::Excellent, 1_000),
        ad_group("2", AdStrength::Poor, 200),
    ];
    let assessment = DataAssessment::from_levels(3, 2).expect("levels");

    let scorecard = MaturityScorecard::compute(&campaigns, &groups, Some(&assessment));
    let view = scorecard.view();

    assert!(scorecard.coverage_visible());
    assert_eq!(view.coverage.map(|kpi| kpi.score), Some(97));
    assert_eq!(view.data.score, 85);

    let worklist = scorecard.worklist(&campaigns, &groups);
    assert_eq!(worklist.coverage.len(), 1);
    assert_eq!(worklist.coverage[0].entity_id, "b2");
    assert_eq!(worklist.quality.len(), 1);
    assert_eq!(worklist.quality[0].metric_value, "POOR");
    assert_eq!(worklist.ai_adoption.len(), 2);

    let json = serde_json::to_value(&view).expect("view serializes");
    assert_eq!(json["aiAdoption"]["score"], 83);
    assert_eq!(json["aiAdoption"]["status"], "PASS");
    assert_eq!(json["coverage"]["status"], "PASS");
}
