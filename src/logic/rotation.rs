use crate::models::{normalize_crop_name, CropRecord, RotationAdvice, RotationStatus};

/// Crops that should not directly follow the given crop.
fn avoid_after(previous: &str) -> &'static [&'static str] {
    match previous {
        "porumb" => &["porumb"],
        "floarea-soarelui" => &["floarea-soarelui"],
        _ => &[],
    }
}

/// Crops that benefit from following the given crop.
fn prefer_after(previous: &str) -> &'static [&'static str] {
    match previous {
        "leguminoase" => &["grâu"],
        "rapiță" => &["grâu"],
        _ => &[],
    }
}

/// Classify a proposed crop/year for a field against its history.
///
/// Looks at the crop grown on the field in the season before the
/// proposal and checks it against the static succession tables. The
/// avoid table is checked before the prefer table. With no prior-season
/// record the proposal passes as ok.
///
/// If the history holds duplicate records for the same field and year,
/// the first match in slice order wins.
pub fn classify(
    history: &[CropRecord],
    field_id: i64,
    proposed_crop: &str,
    proposed_year: i32,
) -> RotationAdvice {
    let proposed = normalize_crop_name(proposed_crop);

    let last = history
        .iter()
        .find(|c| c.field_id == field_id && c.season_year == proposed_year - 1);

    let Some(last) = last else {
        return RotationAdvice::new(RotationStatus::Ok, "no crop recorded for previous season");
    };

    let previous = normalize_crop_name(&last.crop_name);

    if avoid_after(&previous).contains(&proposed.as_str()) {
        return RotationAdvice::new(
            RotationStatus::Avoid,
            format!("avoid {} after {}", proposed, previous),
        );
    }

    if prefer_after(&previous).contains(&proposed.as_str()) {
        return RotationAdvice::new(
            RotationStatus::Prefer,
            format!("good succession: {} before {}", previous, proposed),
        );
    }

    RotationAdvice::new(RotationStatus::Ok, "ok")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(field_id: i64, crop: &str, year: i32) -> CropRecord {
        CropRecord::new(field_id, crop, year)
    }

    #[test]
    fn no_prior_season_is_ok() {
        let advice = classify(&[], 1, "porumb", 2024);
        assert_eq!(advice.status, RotationStatus::Ok);
        assert!(advice.note.contains("previous season"));
    }

    #[test]
    fn prior_season_on_other_field_is_ignored() {
        let history = vec![record(2, "porumb", 2023)];
        let advice = classify(&history, 1, "porumb", 2024);
        assert_eq!(advice.status, RotationStatus::Ok);
    }

    #[test]
    fn maize_after_maize_is_avoided() {
        let history = vec![record(1, "porumb", 2023)];
        let advice = classify(&history, 1, "porumb", 2024);
        assert_eq!(advice.status, RotationStatus::Avoid);
        assert!(advice.note.contains("porumb"));
    }

    #[test]
    fn sunflower_after_sunflower_is_avoided() {
        let history = vec![record(1, "floarea-soarelui", 2023)];
        let advice = classify(&history, 1, "floarea-soarelui", 2024);
        assert_eq!(advice.status, RotationStatus::Avoid);
    }

    #[test]
    fn wheat_after_legumes_is_preferred() {
        let history = vec![record(1, "leguminoase", 2023)];
        let advice = classify(&history, 1, "grâu", 2024);
        assert_eq!(advice.status, RotationStatus::Prefer);
    }

    #[test]
    fn wheat_after_rapeseed_is_preferred() {
        let history = vec![record(1, "rapiță", 2023)];
        let advice = classify(&history, 1, "grâu", 2024);
        assert_eq!(advice.status, RotationStatus::Prefer);
    }

    #[test]
    fn unknown_succession_is_ok() {
        let history = vec![record(1, "grâu", 2023)];
        let advice = classify(&history, 1, "porumb", 2024);
        assert_eq!(advice.status, RotationStatus::Ok);
    }

    #[test]
    fn crop_names_compare_case_insensitively() {
        let history = vec![record(1, "Porumb", 2023)];
        let advice = classify(&history, 1, "PORUMB", 2024);
        assert_eq!(advice.status, RotationStatus::Avoid);
    }

    #[test]
    fn only_directly_preceding_season_counts() {
        // Maize two seasons back does not block maize now
        let history = vec![record(1, "porumb", 2022), record(1, "grâu", 2023)];
        let advice = classify(&history, 1, "porumb", 2024);
        assert_eq!(advice.status, RotationStatus::Ok);
    }

    #[test]
    fn duplicate_year_records_use_first_match() {
        let history = vec![record(1, "leguminoase", 2023), record(1, "porumb", 2023)];
        let advice = classify(&history, 1, "grâu", 2024);
        assert_eq!(advice.status, RotationStatus::Prefer);
    }
}
