use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::quiz::{
    builtin_questionnaire, AnswerOption, Profile, ProfileCatalog, Question, QuizDefinition,
    ResultStrings,
};

/// Top-level config file.
///
/// Everything is optional: with no file at all the built-in questionnaire
/// runs and no webhook is called.
///
/// Example YAML:
/// ```yaml
/// profiles:
///   - key: fruity
///     name: Fruity
///     description: "You find pleasure in lively lightness."
/// questions:
///   - title: "Which of these desserts speaks to you the most?"
///     subtitle: "Choose with your palate, not your reason."
///     note: "Your sweet choice says a lot."
///     options:
///       - text: Cheesecake
///         score: { fruity: 1 }
///       - text: Tiramisu
///         score: { chocolatey: 1 }
/// webhook:
///   url: "https://hook.example.com/abcdef"
///   source: "Sensory Quiz"
///   timeout: 10s
/// cta:
///   url: "https://example.com/fruity-coffees"
///   label: "Taste the coffees made for you"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Profile catalog, in the order ties should be reported.
    #[serde(default)]
    pub profiles: Vec<ProfileConfig>,

    /// The questionnaire. Empty (together with `profiles`) means "use the
    /// built-in one".
    #[serde(default)]
    pub questions: Vec<QuestionConfig>,

    /// Where to deliver the lead payload. Absent = collect but don't send.
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,

    /// Optional call-to-action link on the result screen.
    #[serde(default)]
    pub cta: Option<CtaConfig>,

    /// Overrides for the synthetic result wording.
    #[serde(default)]
    pub strings: Option<StringsConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuestionConfig {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub note: String,
    pub options: Vec<OptionConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OptionConfig {
    pub text: String,
    /// Profile key -> positive weight. Usually a single entry of 1.
    pub score: HashMap<String, u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WebhookConfig {
    pub url: String,

    /// Value of the payload's `source` field (default: "palate quiz").
    #[serde(default)]
    pub source: Option<String>,

    /// Request timeout as a humantime string, e.g. "10s" (the default).
    #[serde(default)]
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CtaConfig {
    pub url: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StringsConfig {
    #[serde(default)]
    pub undetermined_name: Option<String>,
    #[serde(default)]
    pub undetermined_description: Option<String>,
    #[serde(default)]
    pub tie_name: Option<String>,
    #[serde(default)]
    pub tie_description: Option<String>,
    #[serde(default)]
    pub tie_connective: Option<String>,
}

impl Config {
    /// The questionnaire in effect: the configured one, or the built-in
    /// one when the file defines neither profiles nor questions. A file
    /// that defines only one of the two is handed to validation as-is so
    /// the mismatch is reported instead of silently mixed with defaults.
    pub fn questionnaire(&self) -> (QuizDefinition, ProfileCatalog) {
        if self.profiles.is_empty() && self.questions.is_empty() {
            return builtin_questionnaire();
        }

        let catalog = ProfileCatalog::new(
            self.profiles
                .iter()
                .map(|p| Profile {
                    key: p.key.clone(),
                    name: p.name.clone(),
                    description: p.description.clone(),
                })
                .collect(),
        );
        let quiz = QuizDefinition::new(
            self.questions
                .iter()
                .map(|q| Question {
                    title: q.title.clone(),
                    subtitle: q.subtitle.clone(),
                    note: q.note.clone(),
                    options: q
                        .options
                        .iter()
                        .map(|o| AnswerOption {
                            text: o.text.clone(),
                            score: o.score.clone(),
                        })
                        .collect(),
                })
                .collect(),
        );
        (quiz, catalog)
    }

    pub fn result_strings(&self) -> ResultStrings {
        let mut strings = ResultStrings::default();
        if let Some(overrides) = &self.strings {
            if let Some(v) = &overrides.undetermined_name {
                strings.undetermined_name = v.clone();
            }
            if let Some(v) = &overrides.undetermined_description {
                strings.undetermined_description = v.clone();
            }
            if let Some(v) = &overrides.tie_name {
                strings.tie_name = v.clone();
            }
            if let Some(v) = &overrides.tie_description {
                strings.tie_description = v.clone();
            }
            if let Some(v) = &overrides.tie_connective {
                strings.tie_connective = v.clone();
            }
        }
        strings
    }

    /// A config carrying the built-in questionnaire inline, for `init` to
    /// write out as an editable starting point.
    pub fn with_builtin_questionnaire(mut self) -> Self {
        let (quiz, catalog) = builtin_questionnaire();
        self.profiles = catalog
            .iter()
            .map(|p| ProfileConfig {
                key: p.key.clone(),
                name: p.name.clone(),
                description: p.description.clone(),
            })
            .collect();
        self.questions = quiz
            .questions()
            .iter()
            .map(|q| QuestionConfig {
                title: q.title.clone(),
                subtitle: q.subtitle.clone(),
                note: q.note.clone(),
                options: q
                    .options
                    .iter()
                    .map(|o| OptionConfig {
                        text: o.text.clone(),
                        score: o.score.clone(),
                    })
                    .collect(),
            })
            .collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::validate_quiz;

    #[test]
    fn empty_config_falls_back_to_builtin() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        let (quiz, catalog) = config.questionnaire();
        assert_eq!(quiz.len(), 5);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn full_config_parse() {
        let yaml = r#"
profiles:
  - key: fruity
    name: Fruity
    description: "Lively lightness."
  - key: chocolatey
    name: Chocolatey
questions:
  - title: "Pick a dessert"
    subtitle: "Go on"
    options:
      - text: Cheesecake
        score: { fruity: 1 }
      - text: Tiramisu
        score: { chocolatey: 2 }
webhook:
  url: "https://hook.example.com/abc"
  source: "Quiz"
  timeout: 5s
cta:
  url: "https://example.com/coffee"
  label: "Taste them"
strings:
  tie_connective: "e"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let (quiz, catalog) = config.questionnaire();
        assert_eq!(quiz.len(), 1);
        assert_eq!(catalog.len(), 2);
        assert_eq!(quiz.question(0).unwrap().options[1].score["chocolatey"], 2);
        assert!(validate_quiz(&quiz, &catalog).is_ok());
        assert_eq!(config.webhook.as_ref().unwrap().timeout.as_deref(), Some("5s"));
        assert_eq!(config.cta.as_ref().unwrap().label.as_deref(), Some("Taste them"));
        assert_eq!(config.result_strings().tie_connective, "e");
    }

    #[test]
    fn questions_without_profiles_is_not_mixed_with_builtin() {
        let yaml = r#"
questions:
  - title: "Pick one"
    options:
      - text: A
        score: { fruity: 1 }
      - text: B
        score: { floral: 1 }
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let (quiz, catalog) = config.questionnaire();
        assert!(catalog.is_empty());
        assert!(validate_quiz(&quiz, &catalog).is_err());
    }

    #[test]
    fn unknown_fields_rejected() {
        let yaml = "totally_unknown: 1\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn strings_override_defaults() {
        let yaml = r#"
strings:
  undetermined_name: "No label today"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let strings = config.result_strings();
        assert_eq!(strings.undetermined_name, "No label today");
        // Untouched fields keep their defaults.
        assert!(strings.tie_description.contains("{profiles}"));
    }

    #[test]
    fn builtin_dump_round_trips() {
        let config = Config::default().with_builtin_questionnaire();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
        let (quiz, catalog) = parsed.questionnaire();
        assert!(validate_quiz(&quiz, &catalog).is_ok());
    }
}
