//! Content topic catalogue

use crate::error::{Error, Result};

/// Default category for content runs
pub const DEFAULT_CATEGORY: &str = "technology";

static CATALOGUE: [(&str, [&str; 5]); 3] = [
    (
        "technology",
        [
            "Artificial Intelligence",
            "Machine Learning",
            "Blockchain",
            "Internet of Things",
            "Cybersecurity",
        ],
    ),
    (
        "business",
        [
            "Digital Transformation",
            "Entrepreneurship",
            "Project Management",
            "Marketing Strategy",
            "Financial Technology",
        ],
    ),
    (
        "science",
        [
            "Climate Change",
            "Quantum Computing",
            "Biotechnology",
            "Space Exploration",
            "Renewable Energy",
        ],
    ),
];

/// Category names, in catalogue order
#[must_use]
pub fn categories() -> Vec<&'static str> {
    CATALOGUE.iter().map(|(name, _)| *name).collect()
}

fn category_topics(category: &str) -> Option<&'static [&'static str; 5]> {
    CATALOGUE
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, topics)| topics)
}

/// Topic at `index` in `category`
pub fn get_topic(category: &str, index: usize) -> Result<&'static str> {
    category_topics(category)
        .and_then(|topics| topics.get(index).copied())
        .ok_or_else(|| Error::TopicIndex {
            category: category.to_string(),
            index,
        })
}

/// Topics of one category, or all of them in category order
///
/// An unknown category yields an empty list.
#[must_use]
pub fn all_topics(category: Option<&str>) -> Vec<&'static str> {
    match category {
        Some(category) => category_topics(category)
            .map(|topics| topics.to_vec())
            .unwrap_or_default(),
        None => CATALOGUE
            .iter()
            .flat_map(|(_, topics)| topics.iter().copied())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_topic() {
        assert_eq!(get_topic("technology", 0).unwrap(), "Artificial Intelligence");
        assert_eq!(get_topic("science", 4).unwrap(), "Renewable Energy");
        assert!(matches!(
            get_topic("technology", 5),
            Err(Error::TopicIndex { index: 5, .. })
        ));
        assert!(get_topic("cooking", 0).is_err());
    }

    #[test]
    fn test_all_topics() {
        let all = all_topics(None);
        assert_eq!(all.len(), 15);
        assert_eq!(all[5], "Digital Transformation");
        assert_eq!(all_topics(Some("business")).len(), 5);
        assert!(all_topics(Some("cooking")).is_empty());
        assert_eq!(categories(), vec!["technology", "business", "science"]);
    }
}
