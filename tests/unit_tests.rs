// Unit tests for Kindred Match scoring properties

use chrono::NaiveDate;
use kindred_match::core::{calculate_match_score, Matcher};
use kindred_match::models::{Attribute, CatalogId, CatalogRef, Profile, ScoringWeights};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
}

fn refs(ids: &[i64]) -> Vec<CatalogRef> {
    ids.iter().copied().map(CatalogRef::new).collect()
}

fn born(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

fn create_complete_profile(id: &str) -> Profile {
    Profile {
        id: id.to_string(),
        name: Some("Ada".to_string()),
        email: Some("ada@example.com".to_string()),
        avatar: None,
        date_of_birth: born(1992),
        city: Some("Lagos".to_string()),
        country: Some("Nigeria".to_string()),
        education_level_id: Some(CatalogId::Int(3)),
        occupation_id: Some(CatalogId::Text("occ-12".to_string())),
        income_range_id: Some(CatalogId::Int(5)),
        core_values: refs(&[1, 2, 3]),
        personality_traits: refs(&[4, 5]),
        personal_interests: refs(&[6]),
        intellectual_interests: refs(&[7]),
        wellness_interests: refs(&[8]),
        life_style: refs(&[9]),
        religions: refs(&[10]),
        cultural_fits: refs(&[11]),
        ethnicities: refs(&[12]),
        love_language: refs(&[13]),
        prefered_dates: refs(&[14]),
        partner_qualities: refs(&[15]),
        background_preferences: refs(&[16]),
        relationship_expectations: refs(&[17]),
    }
}

/// A spread of profiles with different amounts of overlap and missing data
fn sample_profiles() -> Vec<Profile> {
    let mut profiles = vec![create_complete_profile("full"), Profile::new("empty")];

    for i in 0..12i64 {
        let mut profile = Profile::new(format!("p{}", i));
        if i % 2 == 0 {
            profile.date_of_birth = born(1970 + (i as i32) * 3);
        }
        if i % 3 != 0 {
            profile.city = Some(["Lagos", "Abuja", "Accra"][(i % 3) as usize].to_string());
            profile.country = Some(if i % 3 == 2 { "Ghana" } else { "Nigeria" }.to_string());
        }
        if i % 4 != 0 {
            profile.education_level_id = Some(CatalogId::Int(i % 2));
        }
        profile.core_values = refs(&(0..i % 5).collect::<Vec<_>>());
        profile.personal_interests = refs(&[i % 3]);
        profile.religions = refs(&[i % 2]);
        profile.partner_qualities = if i % 2 == 0 { refs(&[1, 2]) } else { vec![] };
        profiles.push(profile);
    }

    profiles
}

#[test]
fn test_score_is_symmetric() {
    let profiles = sample_profiles();

    for a in &profiles {
        for b in &profiles {
            let ab = calculate_match_score(a, b, today(), &ScoringWeights::DEFAULT);
            let ba = calculate_match_score(b, a, today(), &ScoringWeights::DEFAULT);
            assert_eq!(ab, ba, "asymmetric score for {} / {}", a.id, b.id);
        }
    }
}

#[test]
fn test_self_comparison_is_100() {
    let profile = create_complete_profile("me");
    let result = calculate_match_score(&profile, &profile, today(), &ScoringWeights::DEFAULT);

    assert_eq!(result.score, 100);
}

#[test]
fn test_scores_within_bounds() {
    let profiles = sample_profiles();

    for a in &profiles {
        for b in &profiles {
            let result = calculate_match_score(a, b, today(), &ScoringWeights::DEFAULT);
            assert!(result.score <= 100);
            assert_eq!(result.breakdown.len(), Attribute::ALL.len());
            assert!(result.breakdown.values().all(|v| *v <= 100));
        }
    }
}

#[test]
fn test_neutral_default() {
    let result = calculate_match_score(
        &Profile::new("a"),
        &Profile::new("b"),
        today(),
        &ScoringWeights::DEFAULT,
    );

    for attribute in Attribute::SCALAR.iter().chain(Attribute::SET_OVERLAP.iter()) {
        assert_eq!(result.breakdown[attribute], 50, "{} not neutral", attribute);
    }
    assert_eq!(result.score, 50);
}

#[test]
fn test_age_decay() {
    let mut a = Profile::new("a");
    let mut b = Profile::new("b");
    a.date_of_birth = born(1996); // 30

    b.date_of_birth = born(1976); // 50
    let result = calculate_match_score(&a, &b, today(), &ScoringWeights::DEFAULT);
    assert_eq!(result.breakdown[&Attribute::Age], 0);

    b.date_of_birth = born(1986); // 40
    let result = calculate_match_score(&a, &b, today(), &ScoringWeights::DEFAULT);
    assert_eq!(result.breakdown[&Attribute::Age], 50);

    b.date_of_birth = None;
    let result = calculate_match_score(&a, &b, today(), &ScoringWeights::DEFAULT);
    assert_eq!(result.breakdown[&Attribute::Age], 50);
}

#[test]
fn test_core_values_jaccard() {
    let mut a = Profile::new("a");
    let mut b = Profile::new("b");
    a.core_values = refs(&[1, 2, 3]);
    b.core_values = refs(&[2, 3, 4]);

    let result = calculate_match_score(&a, &b, today(), &ScoringWeights::DEFAULT);
    assert_eq!(result.breakdown[&Attribute::CoreValues], 50);
}

#[test]
fn test_string_and_numeric_ids_do_not_collide() {
    let mut a = Profile::new("a");
    let mut b = Profile::new("b");
    a.core_values = vec![CatalogRef::new(CatalogId::Int(1))];
    b.core_values = vec![CatalogRef::new("1")];

    let result = calculate_match_score(&a, &b, today(), &ScoringWeights::DEFAULT);
    assert_eq!(result.breakdown[&Attribute::CoreValues], 0);
}

#[test]
fn test_location_tiers() {
    let location = |a: &Profile, b: &Profile| {
        calculate_match_score(a, b, today(), &ScoringWeights::DEFAULT).breakdown[&Attribute::Location]
    };

    let mut a = Profile::new("a");
    let mut b = Profile::new("b");
    assert_eq!(location(&a, &b), 50);

    a.city = Some("Lagos".to_string());
    b.city = Some("Lagos".to_string());
    assert_eq!(location(&a, &b), 100);

    b.city = Some("Abuja".to_string());
    a.country = Some("Nigeria".to_string());
    b.country = Some("Nigeria".to_string());
    assert_eq!(location(&a, &b), 80);

    a.city = None;
    b.city = None;
    b.country = Some("Ghana".to_string());
    assert_eq!(location(&a, &b), 30);
}

#[test]
fn test_scalar_equality() {
    let mut a = Profile::new("a");
    let mut b = Profile::new("b");
    a.income_range_id = Some(CatalogId::Int(2));
    b.income_range_id = Some(CatalogId::Int(2));
    a.occupation_id = Some(CatalogId::Int(7));
    b.occupation_id = Some(CatalogId::Int(8));
    a.education_level_id = Some(CatalogId::Int(1));

    let result = calculate_match_score(&a, &b, today(), &ScoringWeights::DEFAULT);
    assert_eq!(result.breakdown[&Attribute::Income], 100);
    assert_eq!(result.breakdown[&Attribute::Occupation], 0);
    assert_eq!(result.breakdown[&Attribute::Education], 50);
}

#[test]
fn test_repeated_scoring_is_identical() {
    let matcher = Matcher::with_default_weights();
    let profiles = sample_profiles();

    let first = matcher.score_on(&profiles[0], &profiles[5], today());
    let copy_a = profiles[0].clone();
    let copy_b = profiles[5].clone();

    for _ in 0..10 {
        assert_eq!(matcher.score_on(&copy_a, &copy_b, today()), first);
    }
}

#[test]
fn test_weighted_total_for_partial_overlap() {
    // Everything neutral except core values at 1/3 and age at 1
    let mut a = Profile::new("a");
    let mut b = Profile::new("b");
    a.date_of_birth = born(1990);
    b.date_of_birth = born(1990);
    a.core_values = refs(&[1, 2]);
    b.core_values = refs(&[2, 3]);

    // 0.5 * (1 - 0.15 - 0.10) + 0.15 * 1 + 0.10 / 3 = 0.5583
    let result = calculate_match_score(&a, &b, today(), &ScoringWeights::DEFAULT);
    assert_eq!(result.score, 56);
    assert_eq!(result.breakdown[&Attribute::CoreValues], 33);
}
