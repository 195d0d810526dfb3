use std::collections::HashSet;

use crate::quiz::{ProfileCatalog, QuizDefinition};

/// Validate a questionnaire against its profile catalog at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_quiz(quiz: &QuizDefinition, catalog: &ProfileCatalog) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if catalog.is_empty() {
        errors.push("profiles: at least one profile is required".to_string());
    }

    let mut seen_keys = HashSet::new();
    for (i, profile) in catalog.iter().enumerate() {
        if profile.key.trim().is_empty() {
            errors.push(format!("profiles[{}].key: must not be empty", i));
        }
        if profile.name.trim().is_empty() {
            errors.push(format!("profiles[{}].name: must not be empty", i));
        }
        if !seen_keys.insert(profile.key.as_str()) {
            errors.push(format!(
                "profiles[{}].key: duplicate key '{}'",
                i, profile.key
            ));
        }
    }

    if quiz.is_empty() {
        errors.push("questions: at least one question is required".to_string());
    }

    for (qi, question) in quiz.questions().iter().enumerate() {
        if question.title.trim().is_empty() {
            errors.push(format!("questions[{}].title: must not be empty", qi));
        }
        if question.options.len() < 2 {
            errors.push(format!(
                "questions[{}].options: at least 2 options are required, found {}",
                qi,
                question.options.len()
            ));
        }
        for (oi, option) in question.options.iter().enumerate() {
            if option.text.trim().is_empty() {
                errors.push(format!(
                    "questions[{}].options[{}].text: must not be empty",
                    qi, oi
                ));
            }
            if option.score.is_empty() {
                errors.push(format!(
                    "questions[{}].options[{}].score: must contribute to at least one profile",
                    qi, oi
                ));
            }
            for (key, weight) in &option.score {
                if !catalog.contains(key) {
                    errors.push(format!(
                        "questions[{}].options[{}].score: unknown profile '{}'",
                        qi, oi, key
                    ));
                }
                if *weight == 0 {
                    errors.push(format!(
                        "questions[{}].options[{}].score['{}']: weight must be positive",
                        qi, oi, key
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{builtin_questionnaire, AnswerOption, Profile, Question};

    fn catalog() -> ProfileCatalog {
        ProfileCatalog::new(vec![
            Profile {
                key: "a".to_string(),
                name: "Alpha".to_string(),
                description: String::new(),
            },
            Profile {
                key: "b".to_string(),
                name: "Bravo".to_string(),
                description: String::new(),
            },
        ])
    }

    fn question(options: Vec<AnswerOption>) -> Question {
        Question {
            title: "q".to_string(),
            subtitle: String::new(),
            note: String::new(),
            options,
        }
    }

    #[test]
    fn builtin_is_valid() {
        let (quiz, catalog) = builtin_questionnaire();
        assert!(validate_quiz(&quiz, &catalog).is_ok());
    }

    #[test]
    fn empty_catalog_rejected() {
        let quiz = QuizDefinition::new(vec![question(vec![
            AnswerOption::new("x", &[("a", 1)]),
            AnswerOption::new("y", &[("b", 1)]),
        ])]);
        let errors = validate_quiz(&quiz, &ProfileCatalog::default()).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("at least one profile")));
    }

    #[test]
    fn empty_question_pool_rejected() {
        let errors = validate_quiz(&QuizDefinition::default(), &catalog()).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("at least one question")));
    }

    #[test]
    fn single_option_question_rejected() {
        let quiz = QuizDefinition::new(vec![question(vec![AnswerOption::new("x", &[("a", 1)])])]);
        let errors = validate_quiz(&quiz, &catalog()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("questions[0].options") && e.contains("at least 2")));
    }

    #[test]
    fn unknown_category_rejected() {
        let quiz = QuizDefinition::new(vec![question(vec![
            AnswerOption::new("x", &[("a", 1)]),
            AnswerOption::new("y", &[("smoky", 1)]),
        ])]);
        let errors = validate_quiz(&quiz, &catalog()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unknown profile 'smoky'"));
    }

    #[test]
    fn zero_weight_rejected() {
        let quiz = QuizDefinition::new(vec![question(vec![
            AnswerOption::new("x", &[("a", 0)]),
            AnswerOption::new("y", &[("b", 1)]),
        ])]);
        let errors = validate_quiz(&quiz, &catalog()).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("weight must be positive")));
    }

    #[test]
    fn empty_score_map_rejected() {
        let quiz = QuizDefinition::new(vec![question(vec![
            AnswerOption::new("x", &[]),
            AnswerOption::new("y", &[("b", 1)]),
        ])]);
        let errors = validate_quiz(&quiz, &catalog()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("at least one profile") && e.contains("options[0]")));
    }

    #[test]
    fn duplicate_profile_key_rejected() {
        let catalog = ProfileCatalog::new(vec![
            Profile {
                key: "a".to_string(),
                name: "Alpha".to_string(),
                description: String::new(),
            },
            Profile {
                key: "a".to_string(),
                name: "Again".to_string(),
                description: String::new(),
            },
        ]);
        let quiz = QuizDefinition::new(vec![question(vec![
            AnswerOption::new("x", &[("a", 1)]),
            AnswerOption::new("y", &[("a", 1)]),
        ])]);
        let errors = validate_quiz(&quiz, &catalog).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("duplicate key 'a'")));
    }

    #[test]
    fn blank_texts_rejected() {
        let quiz = QuizDefinition::new(vec![Question {
            title: "  ".to_string(),
            subtitle: String::new(),
            note: String::new(),
            options: vec![
                AnswerOption::new("", &[("a", 1)]),
                AnswerOption::new("y", &[("b", 1)]),
            ],
        }]);
        let errors = validate_quiz(&quiz, &catalog()).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("questions[0].title")));
        assert!(errors
            .iter()
            .any(|e| e.contains("questions[0].options[0].text")));
    }

    #[test]
    fn collects_all_errors() {
        let quiz = QuizDefinition::new(vec![question(vec![AnswerOption::new(
            "x",
            &[("smoky", 0)],
        )])]);
        let errors = validate_quiz(&quiz, &catalog()).unwrap_err();
        // Too few options, unknown profile, zero weight.
        assert_eq!(errors.len(), 3);
    }
}
