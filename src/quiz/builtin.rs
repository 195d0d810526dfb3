use super::types::{AnswerOption, Profile, ProfileCatalog, Question, QuizDefinition, ResultStrings};

/// The questionnaire shipped with the binary, used whenever no config file
/// provides one. Five questions over five sensory categories.
pub fn builtin_questionnaire() -> (QuizDefinition, ProfileCatalog) {
    let catalog = ProfileCatalog::new(vec![
        profile(
            "chocolatey",
            "Chocolatey",
            "You prefer coffees that embrace you. Deep, dense, with warmth at the bottom of the cup.",
        ),
        profile(
            "fruity",
            "Fruity",
            "You find pleasure in lively lightness. Sweet, natural, with energy that surprises without weighing you down.",
        ),
        profile(
            "citric",
            "Citric",
            "You look for brightness. Freshness, focus, clarity. A coffee that clears the mind and wakes up the body.",
        ),
        profile(
            "fermented",
            "Fermented",
            "You prefer the unusual. You like layers, contrasts and stories nobody has told before.",
        ),
        profile(
            "floral",
            "Floral",
            "You notice what few people do. You like precise elegance, real lightness, quiet beauty.",
        ),
    ]);

    let questions = vec![
        Question {
            title: "Which of these desserts speaks to you the most?".to_string(),
            subtitle: "Choose with your palate, not your reason.".to_string(),
            note: "Your sweet choice says a lot about what you look for in a coffee.".to_string(),
            options: vec![
                AnswerOption::new("Tiramisu", &[("chocolatey", 1)]),
                AnswerOption::new("Cheesecake", &[("fruity", 1)]),
                AnswerOption::new("Lemon tart", &[("citric", 1)]),
                AnswerOption::new("Rum-raisin ice cream", &[("fermented", 1)]),
                AnswerOption::new("Orange-blossom macaron", &[("floral", 1)]),
            ],
        },
        Question {
            title: "How would you start a perfect day?".to_string(),
            subtitle: "Think of what does you good, effortlessly.".to_string(),
            note: "Your favorite breakfast mirrors your taste for energy, comfort or lightness."
                .to_string(),
            options: vec![
                AnswerOption::new("Warm bread and melting butter", &[("chocolatey", 1)]),
                AnswerOption::new("Fresh fruit and creamy yogurt", &[("fruity", 1)]),
                AnswerOption::new("Cured cheese and olive pate", &[("fermented", 1)]),
                AnswerOption::new("Green tea with a banana-oat cookie", &[("floral", 1)]),
                AnswerOption::new("Green juice and eggs", &[("citric", 1)]),
            ],
        },
        Question {
            title: "Which scene do you identify with the most?".to_string(),
            subtitle: "Let your intuition speak, without overthinking.".to_string(),
            note: "Sometimes the ideal coffee is not in the flavor but in the scene it creates inside you."
                .to_string(),
            options: vec![
                AnswerOption::new("Soft, warm sheets", &[("chocolatey", 1)]),
                AnswerOption::new("A day at the amusement park", &[("fruity", 1)]),
                AnswerOption::new("Traveling to a faraway country", &[("fermented", 1)]),
                AnswerOption::new("A weekend at a country house", &[("floral", 1)]),
                AnswerOption::new("Sea breeze on the sand", &[("citric", 1)]),
            ],
        },
        Question {
            title: "What wins you over at the first sip?".to_string(),
            subtitle: "That feeling that makes you stop for a second.".to_string(),
            note: "The first impression of a coffee is usually the truest one.".to_string(),
            options: vec![
                AnswerOption::new("Creamy, intense texture", &[("chocolatey", 1)]),
                AnswerOption::new("Clean, light, lively sweetness", &[("fruity", 1)]),
                AnswerOption::new("Something surprising and exotic", &[("fermented", 1)]),
                AnswerOption::new("Depth and layers", &[("floral", 1)]),
                AnswerOption::new("Freshness with clarity", &[("citric", 1)]),
            ],
        },
        Question {
            title: "Which fruit do you most appreciate in a flavor?".to_string(),
            subtitle: "It is about taste, not labels.".to_string(),
            note: "Without noticing, you look for echoes in coffee of the natural flavors that mark you the most."
                .to_string(),
            options: vec![
                AnswerOption::new("Cacao", &[("chocolatey", 1)]),
                AnswerOption::new("Peach", &[("fruity", 1)]),
                AnswerOption::new("Raisins", &[("fermented", 1)]),
                AnswerOption::new("Apple", &[("floral", 1)]),
                AnswerOption::new("Lemon", &[("citric", 1)]),
            ],
        },
    ];

    (QuizDefinition::new(questions), catalog)
}

impl Default for ResultStrings {
    fn default() -> Self {
        Self {
            undetermined_name: "Nothing determined yet. And that is fine.".to_string(),
            undetermined_description:
                "Sometimes the absence of a label is where real discovery begins.".to_string(),
            tie_name: "Between profiles, a territory of your own".to_string(),
            tie_description:
                "Your taste runs along multiple paths: {profiles}. An invitation to feel more, with no rush to define it."
                    .to_string(),
            tie_connective: "and".to_string(),
        }
    }
}

fn profile(key: &str, name: &str, description: &str) -> Profile {
    Profile {
        key: key.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::validate_quiz;

    #[test]
    fn builtin_questionnaire_is_valid() {
        let (quiz, catalog) = builtin_questionnaire();
        assert!(validate_quiz(&quiz, &catalog).is_ok());
    }

    #[test]
    fn builtin_has_five_questions_of_five_options() {
        let (quiz, catalog) = builtin_questionnaire();
        assert_eq!(quiz.len(), 5);
        assert_eq!(catalog.len(), 5);
        for question in quiz.questions() {
            assert_eq!(question.options.len(), 5);
        }
    }

    #[test]
    fn every_builtin_question_covers_every_category() {
        let (quiz, catalog) = builtin_questionnaire();
        for question in quiz.questions() {
            for profile in catalog.iter() {
                assert!(
                    question
                        .options
                        .iter()
                        .any(|o| o.score.contains_key(&profile.key)),
                    "question '{}' has no option scoring '{}'",
                    question.title,
                    profile.key
                );
            }
        }
    }

    #[test]
    fn default_tie_description_has_placeholder() {
        let strings = ResultStrings::default();
        assert!(strings.tie_description.contains("{profiles}"));
    }
}
