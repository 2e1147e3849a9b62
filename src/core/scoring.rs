use crate::core::similarity::{
    age_similarity, id_set, jaccard, jaccard_sets, location_similarity, mean_jaccard,
    scalar_similarity,
};
use crate::models::{Attribute, Breakdown, CompatibilityScore, Profile, ScoringWeights};
use chrono::NaiveDate;

/// Unweighted per-attribute similarities (each 0-1) between two profiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeScores {
    pub age: f64,
    pub location: f64,
    pub education: f64,
    pub occupation: f64,
    pub income: f64,
    pub core_values: f64,
    pub personality: f64,
    pub interests: f64,
    pub lifestyle: f64,
    pub culture_religion: f64,
    pub love_language: f64,
    pub prefered_dates: f64,
    pub other: f64,
}

impl AttributeScores {
    /// Compare two profiles attribute by attribute, with ages taken on `today`
    pub fn compare(a: &Profile, b: &Profile, today: NaiveDate) -> Self {
        let interests = jaccard_sets(
            &id_set([
                a.personal_interests.as_slice(),
                a.intellectual_interests.as_slice(),
                a.wellness_interests.as_slice(),
            ]),
            &id_set([
                b.personal_interests.as_slice(),
                b.intellectual_interests.as_slice(),
                b.wellness_interests.as_slice(),
            ]),
        );

        let culture_religion = mean_jaccard(&[
            (a.religions.as_slice(), b.religions.as_slice()),
            (a.cultural_fits.as_slice(), b.cultural_fits.as_slice()),
            (a.ethnicities.as_slice(), b.ethnicities.as_slice()),
        ]);

        let other = mean_jaccard(&[
            (a.partner_qualities.as_slice(), b.partner_qualities.as_slice()),
            (
                a.background_preferences.as_slice(),
                b.background_preferences.as_slice(),
            ),
            (
                a.relationship_expectations.as_slice(),
                b.relationship_expectations.as_slice(),
            ),
        ]);

        Self {
            age: age_similarity(a.date_of_birth, b.date_of_birth, today),
            location: location_similarity(
                a.city.as_deref(),
                a.country.as_deref(),
                b.city.as_deref(),
                b.country.as_deref(),
            ),
            education: scalar_similarity(
                a.education_level_id.as_ref(),
                b.education_level_id.as_ref(),
            ),
            occupation: scalar_similarity(a.occupation_id.as_ref(), b.occupation_id.as_ref()),
            income: scalar_similarity(a.income_range_id.as_ref(), b.income_range_id.as_ref()),
            core_values: jaccard(&a.core_values, &b.core_values),
            personality: jaccard(&a.personality_traits, &b.personality_traits),
            interests,
            lifestyle: jaccard(&a.life_style, &b.life_style),
            culture_religion,
            love_language: jaccard(&a.love_language, &b.love_language),
            prefered_dates: jaccard(&a.prefered_dates, &b.prefered_dates),
            other,
        }
    }

    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Age => self.age,
            Attribute::Location => self.location,
            Attribute::Education => self.education,
            Attribute::Occupation => self.occupation,
            Attribute::Income => self.income,
            Attribute::CoreValues => self.core_values,
            Attribute::Personality => self.personality,
            Attribute::Interests => self.interests,
            Attribute::Lifestyle => self.lifestyle,
            Attribute::CultureReligion => self.culture_religion,
            Attribute::LoveLanguage => self.love_language,
            Attribute::PreferedDates => self.prefered_dates,
            Attribute::Other => self.other,
        }
    }

    /// Weighted sum of all attributes, clamped to 0-1
    pub fn weighted_total(&self, weights: &ScoringWeights) -> f64 {
        Attribute::ALL
            .iter()
            .map(|attribute| self.get(*attribute) * weights.weight(*attribute))
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }

    pub fn breakdown(&self) -> Breakdown {
        Attribute::ALL
            .iter()
            .map(|attribute| (*attribute, to_percent(self.get(*attribute))))
            .collect()
    }
}

/// Scale a 0-1 similarity to a rounded 0-100 integer
#[inline]
pub fn to_percent(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Calculate the compatibility score (0-100) of two profiles
///
/// Scoring formula:
/// score = round(clamp(
///     age * 0.15 + location * 0.12 +
///     education * 0.06 + occupation * 0.06 + income * 0.06 +
///     core_values * 0.10 + personality * 0.10 + interests * 0.10 +
///     lifestyle * 0.05 + culture_religion * 0.05 +
///     love_language * 0.03 + prefered_dates * 0.02 + other * 0.06
/// ) * 100)
///
/// with the default weights. Pure: the only input besides the profiles is
/// the date ages are taken on.
pub fn calculate_match_score(
    a: &Profile,
    b: &Profile,
    today: NaiveDate,
    weights: &ScoringWeights,
) -> CompatibilityScore {
    let scores = AttributeScores::compare(a, b, today);

    CompatibilityScore {
        score: to_percent(scores.weighted_total(weights)),
        breakdown: scores.breakdown(),
    }
}
