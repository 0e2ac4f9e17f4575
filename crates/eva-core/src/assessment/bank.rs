use super::domain::{AnswerMap, ChoiceSet, Question, QuestionId};

/// Ordered, immutable collection of questions presented to respondents.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The fifteen-item bank shipped with the questionnaire.
    pub fn reference() -> Self {
        Self::new(reference_questions())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.questions.iter().map(|question| question.id)
    }

    /// Bank-ordered ids that have no answer.
    pub fn missing_answers(&self, answers: &AnswerMap) -> Vec<QuestionId> {
        self.ids().filter(|id| answers.get(*id).is_none()).collect()
    }

    /// Answered ids that do not belong to this bank.
    pub fn unknown_answers(&self, answers: &AnswerMap) -> Vec<QuestionId> {
        answers
            .iter()
            .map(|(id, _)| id)
            .filter(|id| self.get(*id).is_none())
            .collect()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::reference()
    }
}

fn question(id: u32, prompt: &str, choices: [&str; 4], weight: f64) -> Question {
    let [a, b, c, d] = choices;
    Question {
        id: QuestionId(id),
        prompt: prompt.to_string(),
        choices: ChoiceSet {
            a: a.to_string(),
            b: b.to_string(),
            c: c.to_string(),
            d: d.to_string(),
        },
        weight: Some(weight),
    }
}

fn reference_questions() -> Vec<Question> {
    vec![
        question(
            1,
            "Milo is walking through the office when he notices a tennis ball under a desk. In this situation, the response should be:",
            [
                "Milo ignores it and continues — play is not scheduled",
                "Milo pauses briefly, evaluates relevance, then moves on",
                "Milo acknowledges it momentarily before continuing",
                "Milo immediately engages and begins playing",
            ],
            1.0,
        ),
        question(
            2,
            "Luna is working at a café when no customers arrive for several hours. This period is generally regarded as:",
            [
                "Inefficient use of time",
                "A transitional lull",
                "Preparation time for future demand",
                "Time that holds value on its own",
            ],
            0.5,
        ),
        question(
            3,
            "Theo completes a project and receives positive feedback from a manager. This kind of feedback typically results in:",
            [
                "No meaningful internal change",
                "Acknowledgment of confirmation",
                "A short-lived increase in motivation",
                "A lasting improvement in overall mood",
            ],
            0.7,
        ),
        question(
            4,
            "Pip is deciding how often to check the weather app during a normal day. Which approach is most appropriate?",
            [
                "Keep an eye on it continuously in case conditions change",
                "Check it out of habit throughout the day",
                "Check it at a few reasonable times (morning / mid-day / evening)",
                "Check it only when there’s a specific reason to need it",
            ],
            2.1,
        ),
        question(
            5,
            "Alex notices their phone battery draining faster than expected. This is most often attributed to:",
            [
                "Inconsistent system data",
                "Misjudgment of usage",
                "Environmental conditions",
                "Normal variation",
            ],
            1.1,
        ),
        question(
            6,
            "When people describe a good day, it is most commonly defined by:",
            [
                "All tasks being completed",
                "Efficient use of time",
                "Minimal friction throughout the day",
                "How pleasant the day felt",
            ],
            0.5,
        ),
        question(
            7,
            "Sam spends the day alone and feels fine but does not share this with anyone. This kind of state is typically considered:",
            [
                "Unreliable without confirmation",
                "Unclear without outside input",
                "Acceptable, though unverified",
                "Valid on its own",
            ],
            2.0,
        ),
        question(
            8,
            "Sunny continues giggling during a moment others treat as serious. This behavior is typically logged as:",
            [
                "Inappropriate for the situation",
                "Confusing to observers",
                "Odd but tolerable",
                "Not especially relevant",
            ],
            1.3,
        ),
        question(
            9,
            "Casey reports that a situation is “going well,” despite no external confirmation. This assessment is generally treated as:",
            [
                "Unsupported",
                "Treated with caution",
                "Mostly reasonable",
                "Fully reliable",
            ],
            0.6,
        ),
        question(
            10,
            "Jerry has been near a loud, constant noise for several hours. When the noise finally stops, the moment that follows is best described as:",
            [
                "An absence that feels preferable to the noise",
                "A neutral state, separate from anything positive",
                "Part of what makes a situation feel good",
                "A positive state in its own right",
            ],
            0.8,
        ),
        question(
            11,
            "Taylor becomes aware that she is enjoying a quiet moment at the beach. When this happens, her experience will begin to:",
            [
                "Suffice",
                "Change upon reflection",
                "Continue with slight adjustment",
                "Remain stable",
            ],
            2.0,
        ),
        question(
            12,
            "Robin finishes repairing her guitar and writes a note about it for herself. Later, when deciding how much that moment mattered, what tends to carry the most weight?",
            [
                "How her friend, Frank, reacted to it",
                "Whether the note she wrote still makes sense when reread",
                "How it fit into what else was happening at the time",
                "Whether the feeling stayed with her afterward",
            ],
            2.3,
        ),
        question(
            13,
            "Over a long period, Greg's reported state shows no meaningful variation. A pattern like this is usually understood as:",
            [
                "A properly regulated state",
                "A consistent but uncommon case",
                "A stable pattern with minor variance",
                "A condition that likely won’t persist",
            ],
            1.3,
        ),
        question(
            14,
            "Daniela notices that a brief moment during her day feels unexpectedly pleasant. In this situation, the appropriate response is:",
            [
                "Daniela notes the moment and continues with her tasks",
                "Daniela allows the feeling to pass without interruption",
                "Daniela adjusts her pace to extend the feeling if possible",
                "Daniela redirects her attention to actively preserve the feeling",
            ],
            1.3,
        ),
        question(
            15,
            "Jerry is sitting on a bench at the park, watching the water. Someone walking by casually asks how things are going. In this situation, the appropriate response is:",
            [
                "Jerry acknowledges the question briefly and returns his attention to the water",
                "Jerry pauses what he’s doing for a moment before responding",
                "Jerry responds while shifting part of his attention to the person",
                "Jerry turns fully to the person and engages with them",
            ],
            1.6,
        ),
    ]
}
