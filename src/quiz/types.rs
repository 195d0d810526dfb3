use std::collections::HashMap;

/// A named sensory profile, keyed by its scoring category.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub key: String, // category key, e.g. "fruity"
    pub name: String,
    pub description: String,
}

/// The fixed set of profiles a questionnaire can resolve to.
///
/// Declaration order is the canonical category order: tie descriptions and
/// score breakdowns iterate in this order, never in answer or score order.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    entries: Vec<Profile>,
}

impl ProfileCatalog {
    pub fn new(entries: Vec<Profile>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Profile> {
        self.entries.iter().find(|p| p.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Profiles in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One selectable answer, carrying weighted contributions to one or more
/// categories. Usually a single entry of weight 1.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOption {
    pub text: String,
    pub score: HashMap<String, u32>,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, score: &[(&str, u32)]) -> Self {
        Self {
            text: text.into(),
            score: score
                .iter()
                .map(|(key, weight)| (key.to_string(), *weight))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub title: String,
    /// Short lead-in shown under the title.
    pub subtitle: String,
    /// "Why we ask" note shown under the options.
    pub note: String,
    pub options: Vec<AnswerOption>,
}

/// An ordered, immutable-after-start sequence of questions.
#[derive(Debug, Clone, Default)]
pub struct QuizDefinition {
    questions: Vec<Question>,
}

impl QuizDefinition {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Wording for the synthetic (non-catalog) results.
///
/// `tie_description` must contain a `{profiles}` placeholder; the tied
/// display names are joined with ` {tie_connective} ` and substituted in.
#[derive(Debug, Clone)]
pub struct ResultStrings {
    pub undetermined_name: String,
    pub undetermined_description: String,
    pub tie_name: String,
    pub tie_description: String,
    pub tie_connective: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_preserves_declaration_order() {
        let catalog = ProfileCatalog::new(vec![
            Profile {
                key: "b".to_string(),
                name: "B".to_string(),
                description: String::new(),
            },
            Profile {
                key: "a".to_string(),
                name: "A".to_string(),
                description: String::new(),
            },
        ]);
        let keys: Vec<&str> = catalog.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn catalog_lookup_by_key() {
        let catalog = ProfileCatalog::new(vec![Profile {
            key: "fruity".to_string(),
            name: "Fruity".to_string(),
            description: "desc".to_string(),
        }]);
        assert!(catalog.contains("fruity"));
        assert!(!catalog.contains("smoky"));
        assert_eq!(catalog.get("fruity").unwrap().name, "Fruity");
    }

    #[test]
    fn answer_option_builder_collects_weights() {
        let option = AnswerOption::new("Tiramisu", &[("chocolatey", 1), ("fermented", 2)]);
        assert_eq!(option.score.get("chocolatey"), Some(&1));
        assert_eq!(option.score.get("fermented"), Some(&2));
        assert_eq!(option.score.len(), 2);
    }
}
