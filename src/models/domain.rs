use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a catalog entry (core value, interest, income range...)
///
/// Catalogs are keyed by integers or strings depending on where they came
/// from. `1` and `"1"` are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogId {
    Int(i64),
    Text(String),
}

impl From<i64> for CatalogId {
    fn from(value: i64) -> Self {
        CatalogId::Int(value)
    }
}

impl From<&str> for CatalogId {
    fn from(value: &str) -> Self {
        CatalogId::Text(value.to_string())
    }
}

impl From<String> for CatalogId {
    fn from(value: String) -> Self {
        CatalogId::Text(value)
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogId::Int(id) => write!(f, "{}", id),
            CatalogId::Text(id) => f.write_str(id),
        }
    }
}

/// A profile's selection of one catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRef {
    pub id: CatalogId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CatalogRef {
    pub fn new(id: impl Into<CatalogId>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn named(id: impl Into<CatalogId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

/// Fully-hydrated user profile, including every selection collection used
/// for compatibility scoring.
///
/// Empty collections mean "no selection" and score as neutral.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub education_level_id: Option<CatalogId>,
    #[serde(default)]
    pub occupation_id: Option<CatalogId>,
    #[serde(default)]
    pub income_range_id: Option<CatalogId>,
    #[serde(default)]
    pub core_values: Vec<CatalogRef>,
    #[serde(default)]
    pub personality_traits: Vec<CatalogRef>,
    #[serde(default)]
    pub personal_interests: Vec<CatalogRef>,
    #[serde(default)]
    pub intellectual_interests: Vec<CatalogRef>,
    #[serde(default)]
    pub wellness_interests: Vec<CatalogRef>,
    #[serde(default)]
    pub life_style: Vec<CatalogRef>,
    #[serde(default)]
    pub religions: Vec<CatalogRef>,
    #[serde(default)]
    pub cultural_fits: Vec<CatalogRef>,
    #[serde(default)]
    pub ethnicities: Vec<CatalogRef>,
    #[serde(default)]
    pub love_language: Vec<CatalogRef>,
    #[serde(default)]
    pub prefered_dates: Vec<CatalogRef>,
    #[serde(default)]
    pub partner_qualities: Vec<CatalogRef>,
    #[serde(default)]
    pub background_preferences: Vec<CatalogRef>,
    #[serde(default)]
    pub relationship_expectations: Vec<CatalogRef>,
}

impl Profile {
    /// Empty profile with only an identifier set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Identity fields attached to responses for display
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Display-only identity of a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

/// Scored compatibility attributes, in breakdown order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    Age,
    Location,
    Education,
    Occupation,
    Income,
    CoreValues,
    Personality,
    Interests,
    Lifestyle,
    CultureReligion,
    LoveLanguage,
    PreferedDates,
    Other,
}

impl Attribute {
    pub const ALL: [Attribute; 13] = [
        Attribute::Age,
        Attribute::Location,
        Attribute::Education,
        Attribute::Occupation,
        Attribute::Income,
        Attribute::CoreValues,
        Attribute::Personality,
        Attribute::Interests,
        Attribute::Lifestyle,
        Attribute::CultureReligion,
        Attribute::LoveLanguage,
        Attribute::PreferedDates,
        Attribute::Other,
    ];

    /// Attributes scored by plain equality of a scalar catalog reference
    pub const SCALAR: [Attribute; 3] = [
        Attribute::Education,
        Attribute::Occupation,
        Attribute::Income,
    ];

    /// Attributes scored by set overlap of catalog selections
    pub const SET_OVERLAP: [Attribute; 8] = [
        Attribute::CoreValues,
        Attribute::Personality,
        Attribute::Interests,
        Attribute::Lifestyle,
        Attribute::CultureReligion,
        Attribute::LoveLanguage,
        Attribute::PreferedDates,
        Attribute::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Age => "age",
            Attribute::Location => "location",
            Attribute::Education => "education",
            Attribute::Occupation => "occupation",
            Attribute::Income => "income",
            Attribute::CoreValues => "coreValues",
            Attribute::Personality => "personality",
            Attribute::Interests => "interests",
            Attribute::Lifestyle => "lifestyle",
            Attribute::CultureReligion => "cultureReligion",
            Attribute::LoveLanguage => "loveLanguage",
            Attribute::PreferedDates => "preferedDates",
            Attribute::Other => "other",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-attribute similarity, each scaled to 0-100
pub type Breakdown = BTreeMap<Attribute, u8>;

/// Result of comparing two profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub score: u8,
    pub breakdown: Breakdown,
}

/// One candidate in a ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub profile: ProfileSummary,
    pub score: u8,
    pub breakdown: Breakdown,
}

/// Scoring weights
///
/// Missing fields in a configuration source fall back to the default table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
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

impl ScoringWeights {
    pub const DEFAULT: ScoringWeights = ScoringWeights {
        age: 0.15,
        location: 0.12,
        education: 0.06,
        occupation: 0.06,
        income: 0.06,
        core_values: 0.10,
        personality: 0.10,
        interests: 0.10,
        lifestyle: 0.05,
        culture_religion: 0.05,
        love_language: 0.03,
        prefered_dates: 0.02,
        other: 0.06,
    };

    pub fn weight(&self, attribute: Attribute) -> f64 {
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

    pub fn sum(&self) -> f64 {
        Attribute::ALL.iter().map(|a| self.weight(*a)).sum()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}
