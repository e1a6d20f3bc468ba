//! Interactive learner profile
//!
//! The interview asks for one dimension at a time, each question offering
//! only the values still reachable under the answers given so far, then a
//! material, then which of its prerequisites are already known, and finally
//! plans the learning path. Rendering the questions is left to a
//! [`Prompter`].

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::graph::Dimension;
use crate::library::Library;
use crate::query::{Criteria, CriterionValue, FacetValue, MaterialRow, SearchOrder};
use crate::storage::StorageError;

/// Interview states, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AskAge,
    AskTopic,
    AskLanguage,
    AskConcept,
    AskEducationLevel,
    AskMaterial,
    AskAlreadyKnown,
    ComputePath,
    Done,
}

impl Step {
    pub fn next(self) -> Step {
        match self {
            Step::AskAge => Step::AskTopic,
            Step::AskTopic => Step::AskLanguage,
            Step::AskLanguage => Step::AskConcept,
            Step::AskConcept => Step::AskEducationLevel,
            Step::AskEducationLevel => Step::AskMaterial,
            Step::AskMaterial => Step::AskAlreadyKnown,
            Step::AskAlreadyKnown => Step::ComputePath,
            Step::ComputePath | Step::Done => Step::Done,
        }
    }

    /// Dimension a facet step asks about
    pub fn dimension(self) -> Option<Dimension> {
        match self {
            Step::AskAge => Some(Dimension::Age),
            Step::AskTopic => Some(Dimension::Topic),
            Step::AskLanguage => Some(Dimension::Language),
            Step::AskConcept => Some(Dimension::Concept),
            Step::AskEducationLevel => Some(Dimension::Education),
            _ => None,
        }
    }

    pub fn question(self) -> &'static str {
        match self {
            Step::AskAge => "How old are you?",
            Step::AskTopic => "Which topic would you like to study?",
            Step::AskLanguage => "Which language do you want to study about?",
            Step::AskConcept => "Which concept would you like to learn?",
            Step::AskEducationLevel => "What is your education level?",
            Step::AskMaterial => "Which educational material would you like to use?",
            Step::AskAlreadyKnown => "What do you know already?",
            Step::ComputePath | Step::Done => "",
        }
    }

    /// Whether the step accepts several selections
    pub fn is_multi_select(self) -> bool {
        self == Step::AskAlreadyKnown
    }

    /// Dimensions that must be answered before this step
    fn required_dimensions(self) -> &'static [Dimension] {
        let answered = match self {
            Step::AskAge => 0,
            Step::AskTopic => 1,
            Step::AskLanguage => 2,
            Step::AskConcept => 3,
            Step::AskEducationLevel => 4,
            _ => 5,
        };
        &Dimension::ALL[..answered]
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::AskAge => "ask-age",
            Step::AskTopic => "ask-topic",
            Step::AskLanguage => "ask-language",
            Step::AskConcept => "ask-concept",
            Step::AskEducationLevel => "ask-education-level",
            Step::AskMaterial => "ask-material",
            Step::AskAlreadyKnown => "ask-already-known",
            Step::ComputePath => "compute-path",
            Step::Done => "done",
        };
        f.write_str(name)
    }
}

/// What selecting a choice records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Facet(FacetValue),
    Material(MaterialRow),
    Known(String),
}

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub answer: Answer,
}

/// Renders a question and collects selections by index
pub trait Prompter {
    fn select_one(&mut self, question: &str, choices: &[Choice]) -> std::io::Result<usize>;

    fn select_many(&mut self, question: &str, choices: &[Choice]) -> std::io::Result<Vec<usize>>;
}

/// Answers collected during one interview
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub criteria: Criteria,
    pub material: Option<MaterialRow>,
    pub already_known: BTreeSet<String>,
    /// `(id) title` lines, filled by the compute-path step
    pub path: Vec<String>,
}

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("No choices available at step {0}")]
    NoChoices(Step),

    #[error("Invalid selection at step {step}: {detail}")]
    InvalidSelection { step: Step, detail: String },
}

/// Choices offered at `step` given the answers in `session`
///
/// Panics if the session lacks an answer the step depends on; that is a
/// caller ordering bug, not bad input.
pub fn choices_for(library: &Library, step: Step, session: &Session) -> Result<Vec<Choice>, InterviewError> {
    for dimension in step.required_dimensions() {
        assert!(
            session.criteria.is_set(*dimension),
            "interview step {} requires the {} criterion",
            step,
            dimension
        );
    }

    let choices: Vec<Choice> = match step {
        Step::AskAge | Step::AskTopic | Step::AskLanguage | Step::AskConcept | Step::AskEducationLevel => {
            let dimension = step.dimension().unwrap_or(Dimension::Age);
            let apply_filter = step != Step::AskAge;
            library
                .list_values(dimension, &session.criteria, apply_filter)?
                .into_iter()
                .map(|value| Choice {
                    label: value.to_string(),
                    answer: Answer::Facet(value),
                })
                .collect()
        }
        Step::AskMaterial => library
            .search_ordered(&session.criteria, SearchOrder::ByCourse)?
            .into_iter()
            .map(|row| Choice {
                label: format!("{} {}", row.course, row.title),
                answer: Answer::Material(row),
            })
            .collect(),
        Step::AskAlreadyKnown => {
            let material = session
                .material
                .as_ref()
                .unwrap_or_else(|| panic!("interview step {} requires a chosen material", step));
            library
                .resolve_prerequisites(&material.id)?
                .into_iter()
                .filter(|p| p.id != material.id)
                .map(|p| Choice {
                    label: p.title.clone(),
                    answer: Answer::Known(p.id),
                })
                .collect()
        }
        Step::ComputePath | Step::Done => Vec::new(),
    };

    if choices.is_empty() && !matches!(step, Step::ComputePath | Step::Done) {
        return Err(InterviewError::NoChoices(step));
    }
    Ok(choices)
}

/// Drives a session through the interview steps
pub struct Interview<'a> {
    library: &'a Library,
    session: Session,
    step: Step,
}

impl<'a> Interview<'a> {
    pub fn new(library: &'a Library) -> Self {
        Self {
            library,
            session: Session::default(),
            step: Step::AskAge,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Choices for the current step
    pub fn choices(&self) -> Result<Vec<Choice>, InterviewError> {
        choices_for(self.library, self.step, &self.session)
    }

    /// Record the selected choices and advance
    pub fn answer(&mut self, choices: &[Choice], selection: &[usize]) -> Result<Step, InterviewError> {
        if !self.step.is_multi_select() && selection.len() != 1 {
            return Err(self.invalid(format!("expected one selection, got {}", selection.len())));
        }

        for &index in selection {
            let choice = choices
                .get(index)
                .ok_or_else(|| self.invalid(format!("no choice at index {}", index)))?;
            match (&choice.answer, self.step.dimension()) {
                (Answer::Facet(value), Some(dimension)) => {
                    let value = match value {
                        FacetValue::NonSpecific => CriterionValue::NonSpecific,
                        FacetValue::Value(v) => CriterionValue::Literal(v.clone()),
                    };
                    self.session.criteria.set_value(dimension, value);
                }
                (Answer::Material(row), None) if self.step == Step::AskMaterial => {
                    self.session.material = Some(row.clone());
                }
                (Answer::Known(id), None) if self.step == Step::AskAlreadyKnown => {
                    self.session.already_known.insert(id.clone());
                }
                _ => return Err(self.invalid(format!("choice '{}' does not answer this step", choice.label))),
            }
        }

        tracing::debug!(step = %self.step, selected = selection.len(), "interview answer");
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Plan the learning path from the collected answers
    pub fn compute_path(&mut self) -> Result<&[String], InterviewError> {
        assert_eq!(
            self.step,
            Step::ComputePath,
            "learning path computed before the interview reached {}",
            Step::ComputePath
        );
        let material = self
            .session
            .material
            .as_ref()
            .unwrap_or_else(|| panic!("interview step {} requires a chosen material", Step::ComputePath));
        self.session.path = self
            .library
            .learning_path(&material.id, &self.session.already_known)?;
        self.step = Step::Done;
        Ok(&self.session.path)
    }

    /// Run every step against a prompter
    ///
    /// A material without prerequisites skips the already-known question.
    pub fn run(mut self, prompter: &mut dyn Prompter) -> Result<Session, InterviewError> {
        loop {
            match self.step {
                Step::Done => return Ok(self.session),
                Step::ComputePath => {
                    self.compute_path()?;
                }
                step => {
                    let choices = match self.choices() {
                        Err(InterviewError::NoChoices(Step::AskAlreadyKnown)) => {
                            self.answer(&[], &[])?;
                            continue;
                        }
                        other => other?,
                    };
                    let selection = if step.is_multi_select() {
                        prompter.select_many(step.question(), &choices)?
                    } else {
                        vec![prompter.select_one(step.question(), &choices)?]
                    };
                    self.answer(&choices, &selection)?;
                }
            }
        }
    }

    fn invalid(&self, detail: String) -> InterviewError {
        InterviewError::InvalidSelection {
            step: self.step,
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
- id: T1.1
  title: Variables
  ages: 8-10
  topics: Programming
  concepts: Variables
  levels: all
- id: T1.2
  title: Conditions
  requires: T1.1
  ages: 8-10
  topics: Programming
  concepts: Conditions
  levels: all
- id: T2.1
  title: Python loops
  requires: T1.1-T1.2
  ages: 8-10
  topics: Programming
  languages: Python
  concepts: Loops
  levels: all
"#;

    /// Picks choices by label
    struct Scripted {
        answers: Vec<Vec<&'static str>>,
        asked: Vec<(String, Vec<String>)>,
    }

    impl Scripted {
        fn new(answers: Vec<Vec<&'static str>>) -> Self {
            Self {
                answers,
                asked: Vec::new(),
            }
        }

        fn pick(&mut self, question: &str, choices: &[Choice]) -> Vec<usize> {
            let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
            self.asked.push((question.to_string(), labels.clone()));
            let wanted = self.answers.remove(0);
            wanted
                .iter()
                .map(|w| labels.iter().position(|l| l == w).expect("scripted label offered"))
                .collect()
        }
    }

    impl Prompter for Scripted {
        fn select_one(&mut self, question: &str, choices: &[Choice]) -> std::io::Result<usize> {
            Ok(self.pick(question, choices)[0])
        }

        fn select_many(&mut self, question: &str, choices: &[Choice]) -> std::io::Result<Vec<usize>> {
            Ok(self.pick(question, choices))
        }
    }

    fn library() -> Library {
        Library::from_catalog_str(CATALOG).unwrap().0
    }

    #[test]
    fn test_full_interview() {
        let library = library();
        let mut prompter = Scripted::new(vec![
            vec!["8-10"],
            vec!["Programming"],
            vec!["Python"],
            vec!["Loops"],
            vec!["all"],
            vec!["T2 Python loops"],
            vec!["Variables"],
        ]);

        let session = Interview::new(&library).run(&mut prompter).unwrap();

        assert_eq!(session.material.as_ref().unwrap().id, "T2.1");
        assert_eq!(session.already_known, BTreeSet::from(["T1.1".to_string()]));
        assert_eq!(session.path, vec!["(T1.2) Conditions"]);

        // The language question offered the sentinel first
        assert_eq!(prompter.asked[2].1, vec!["Non-specific", "Python"]);
        // The already-known question offered the closure only
        assert_eq!(prompter.asked[6].1, vec!["Variables", "Conditions"]);
    }

    #[test]
    fn test_non_specific_answer_narrows_to_materials_without_language() {
        let library = library();
        let mut interview = Interview::new(&library);
        for label in ["8-10", "Programming", "Non-specific"] {
            let choices = interview.choices().unwrap();
            let index = choices.iter().position(|c| c.label == label).unwrap();
            interview.answer(&choices, &[index]).unwrap();
        }
        assert_eq!(
            interview.session().criteria.get(Dimension::Language),
            Some(&CriterionValue::NonSpecific)
        );
        let concepts: Vec<_> = interview.choices().unwrap().into_iter().map(|c| c.label).collect();
        assert_eq!(concepts, vec!["Conditions", "Variables"]);
    }

    #[test]
    fn test_material_without_prerequisites_has_no_choices() {
        let library = library();
        let mut session = Session {
            material: Some(MaterialRow {
                id: "T1.1".into(),
                course: "T1".into(),
                title: "Variables".into(),
            }),
            ..Default::default()
        };
        for dimension in Dimension::ALL {
            session.criteria.set(dimension, "any");
        }
        let err = choices_for(&library, Step::AskAlreadyKnown, &session).unwrap_err();
        assert!(matches!(err, InterviewError::NoChoices(Step::AskAlreadyKnown)));
    }

    #[test]
    fn test_root_material_interview_has_empty_path() {
        let library = library();
        let mut prompter = Scripted::new(vec![
            vec!["8-10"],
            vec!["Programming"],
            vec!["Non-specific"],
            vec!["Variables"],
            vec!["all"],
            vec!["T1 Variables"],
        ]);

        let session = Interview::new(&library).run(&mut prompter).unwrap();

        assert_eq!(session.material.as_ref().unwrap().id, "T1.1");
        assert!(session.already_known.is_empty());
        assert!(session.path.is_empty());
        // The already-known question was never put to the prompter
        assert_eq!(prompter.asked.len(), 6);
    }

    #[test]
    fn test_single_select_rejects_multiple() {
        let library = library();
        let mut interview = Interview::new(&library);
        let choices = interview.choices().unwrap();
        let err = interview.answer(&choices, &[]).unwrap_err();
        assert!(matches!(err, InterviewError::InvalidSelection { .. }));
        assert_eq!(interview.step(), Step::AskAge);
    }

    #[test]
    #[should_panic(expected = "requires the age criterion")]
    fn test_out_of_order_step_panics() {
        let library = library();
        let _ = choices_for(&library, Step::AskTopic, &Session::default());
    }
}
