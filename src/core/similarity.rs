use crate::models::{CatalogId, CatalogRef};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Similarity used when neither side carries a signal
pub const NEUTRAL: f64 = 0.5;

/// Average year length used for age computation
const DAYS_PER_YEAR: f64 = 365.25;

/// Age gap (in years) at which age similarity reaches zero
const MAX_AGE_GAP_YEARS: f64 = 20.0;

const SAME_CITY: f64 = 1.0;
const SAME_COUNTRY: f64 = 0.8;
const DIFFERENT_COUNTRY: f64 = 0.3;

/// Whole years elapsed between `date_of_birth` and `today`
///
/// Uses a 365.25-day year and floors, so the value can lag the calendar
/// birthday by a day.
#[inline]
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> i64 {
    let days = (today - date_of_birth).num_days();
    (days as f64 / DAYS_PER_YEAR).floor() as i64
}

/// Age similarity (0-1), decaying linearly to zero at a 20-year gap
#[inline]
pub fn age_similarity(a: Option<NaiveDate>, b: Option<NaiveDate>, today: NaiveDate) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => {
            let gap = (age_in_years(a, today) - age_in_years(b, today)).abs() as f64;
            (1.0 - gap / MAX_AGE_GAP_YEARS).max(0.0)
        }
        _ => NEUTRAL,
    }
}

/// Tiered location similarity (0-1)
///
/// Same city wins outright, then same country. A country on only one side,
/// or two different countries, scores low. No country data at all is neutral.
/// Blank strings count as absent.
pub fn location_similarity(
    city_a: Option<&str>,
    country_a: Option<&str>,
    city_b: Option<&str>,
    country_b: Option<&str>,
) -> f64 {
    let city_a = non_blank(city_a);
    let city_b = non_blank(city_b);
    let country_a = non_blank(country_a);
    let country_b = non_blank(country_b);

    if city_a.is_some() && city_a == city_b {
        return SAME_CITY;
    }

    if country_a.is_some() && country_a == country_b {
        return SAME_COUNTRY;
    }

    if country_a.is_some() || country_b.is_some() {
        return DIFFERENT_COUNTRY;
    }

    NEUTRAL
}

#[inline]
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Equality of two optional scalar references (0, 0.5 or 1)
#[inline]
pub fn scalar_similarity<T: PartialEq>(a: Option<&T>, b: Option<&T>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => 1.0,
        (Some(_), Some(_)) => 0.0,
        _ => NEUTRAL,
    }
}

/// Collect the identifiers of one or more selection collections into a set
pub fn id_set<'a, I>(groups: I) -> HashSet<&'a CatalogId>
where
    I: IntoIterator<Item = &'a [CatalogRef]>,
{
    groups
        .into_iter()
        .flat_map(|group| group.iter().map(|r| &r.id))
        .collect()
}

/// Jaccard similarity of two identifier sets; two empty sets are neutral
pub fn jaccard_sets(a: &HashSet<&CatalogId>, b: &HashSet<&CatalogId>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return NEUTRAL;
    }

    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;

    intersection / union
}

/// Jaccard similarity of two selection collections
#[inline]
pub fn jaccard(a: &[CatalogRef], b: &[CatalogRef]) -> f64 {
    jaccard_sets(&id_set([a]), &id_set([b]))
}

/// Equal-weight mean of independent Jaccard similarities, one per pair
pub fn mean_jaccard(pairs: &[(&[CatalogRef], &[CatalogRef])]) -> f64 {
    if pairs.is_empty() {
        return NEUTRAL;
    }

    let total: f64 = pairs.iter().map(|(a, b)| jaccard(a, b)).sum();
    total / pairs.len() as f64
}
