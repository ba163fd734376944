use super::catalog::RecommendationRecord;

/// Matches kept per result, in catalog order.
pub const MAX_RECOMMENDATIONS: usize = 2;

/// Herb properties that qualify a treatment for an element imbalance.
pub fn element_properties(element: &str) -> Option<&'static [&'static str]> {
    match element {
        "気" => Some(&["理気", "補気"]),
        "血" => Some(&["補血", "活血"]),
        "水" => Some(&["利水", "化湿"]),
        "精" => Some(&["補腎", "益精"]),
        _ => None,
    }
}

/// Filters the treatment catalog for a scored category or element.
pub struct RecommendationMatcher<'a> {
    catalog: &'a [RecommendationRecord],
}

impl<'a> RecommendationMatcher<'a> {
    pub fn new(catalog: &'a [RecommendationRecord]) -> Self {
        Self { catalog }
    }

    /// A treatment matches when one of its target keywords appears inside a
    /// detected prompt, or the keyword itself mentions the category. The
    /// category check only applies while at least one prompt was detected.
    pub fn functional(&self, category: &str, detected: &[String]) -> Vec<RecommendationRecord> {
        self.first_matches(|record| {
            record.target_symptoms.iter().any(|keyword| {
                detected
                    .iter()
                    .any(|prompt| prompt.contains(keyword.as_str()) || keyword.contains(category))
            })
        })
    }

    pub fn traditional(&self, element: &str) -> Vec<RecommendationRecord> {
        let Some(wanted) = element_properties(element) else {
            return Vec::new();
        };
        self.first_matches(|record| record.has_property(wanted))
    }

    fn first_matches<F>(&self, predicate: F) -> Vec<RecommendationRecord>
    where
        F: Fn(&RecommendationRecord) -> bool,
    {
        self.catalog
            .iter()
            .filter(|record| predicate(record))
            .take(MAX_RECOMMENDATIONS)
            .cloned()
            .collect()
    }
}
