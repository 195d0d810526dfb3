use crate::quiz::{ProfileCatalog, QuizDefinition, ResultStrings};

/// How the final result was reached.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultKind {
    /// Exactly one category held the maximum total.
    Dominant { key: String },
    /// Several categories tied at the maximum; keys in catalog order.
    Tie { keys: Vec<String> },
    /// Not every question was answered, or every total was zero.
    Undetermined,
}

/// One category's accumulated total, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub key: String,
    pub name: String,
    pub total: u32,
}

/// The resolved profile, plus the per-category breakdown that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileResult {
    pub name: String,
    pub description: String,
    pub kind: ResultKind,
    pub totals: Vec<CategoryTotal>,
}

impl ProfileResult {
    pub fn is_undetermined(&self) -> bool {
        matches!(self.kind, ResultKind::Undetermined)
    }
}

/// Resolve a final profile from the recorded answers.
///
/// `answers[i]` is the selected option index for question `i`, or `None`
/// when unanswered. Pure: depends only on its inputs.
///
/// An undetermined result is returned when fewer answers than questions
/// were recorded or when no category accumulated anything. Ties are
/// surfaced as a joint result, never broken by a secondary key.
pub fn compute_profile(
    answers: &[Option<usize>],
    quiz: &QuizDefinition,
    catalog: &ProfileCatalog,
    strings: &ResultStrings,
) -> ProfileResult {
    let mut totals: Vec<CategoryTotal> = catalog
        .iter()
        .map(|profile| CategoryTotal {
            key: profile.key.clone(),
            name: profile.name.clone(),
            total: 0,
        })
        .collect();

    let mut answered = 0usize;
    for (index, answer) in answers.iter().enumerate() {
        let Some(option_index) = answer else {
            continue;
        };
        // Validation guarantees in-range indices and known category keys;
        // a corrupted answer sheet degrades to skipped entries, never a panic.
        let Some(option) = quiz
            .question(index)
            .and_then(|q| q.options.get(*option_index))
        else {
            continue;
        };
        answered += 1;
        for (key, weight) in &option.score {
            if let Some(entry) = totals.iter_mut().find(|t| &t.key == key) {
                entry.total += weight;
            }
        }
    }

    let max = totals.iter().map(|t| t.total).max().unwrap_or(0);

    if answered < quiz.len() || max == 0 {
        return ProfileResult {
            name: strings.undetermined_name.clone(),
            description: strings.undetermined_description.clone(),
            kind: ResultKind::Undetermined,
            totals,
        };
    }

    let leaders: Vec<&CategoryTotal> = totals.iter().filter(|t| t.total == max).collect();

    if leaders.len() > 1 {
        let joined = leaders
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(&format!(" {} ", strings.tie_connective));
        return ProfileResult {
            name: strings.tie_name.clone(),
            description: strings.tie_description.replace("{profiles}", &joined),
            kind: ResultKind::Tie {
                keys: leaders.iter().map(|t| t.key.clone()).collect(),
            },
            totals,
        };
    }

    let leader_key = leaders[0].key.clone();
    match catalog.get(&leader_key) {
        Some(winner) => ProfileResult {
            name: winner.name.clone(),
            description: winner.description.clone(),
            kind: ResultKind::Dominant {
                key: winner.key.clone(),
            },
            totals,
        },
        // Unreachable: totals are built from catalog keys. Kept as a
        // graceful fallback instead of a panic.
        None => ProfileResult {
            name: strings.undetermined_name.clone(),
            description: strings.undetermined_description.clone(),
            kind: ResultKind::Undetermined,
            totals,
        },
    }
}
