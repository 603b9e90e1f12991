/// Identity of the embedded question list. Share tokens carry it, so any
/// edit to question order, count or polarity must bump this value.
pub const CATALOG_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub position: usize,
    pub text: &'static str,
    /// `true`: a "yes" counts toward the score. `false`: a "no" counts.
    pub polarity: bool,
}

impl Question {
    /// 1-based number shown next to the question.
    pub const fn number(&self) -> usize {
        self.position + 1
    }
}

const fn q(position: usize, text: &'static str, polarity: bool) -> Question {
    Question {
        position,
        text,
        polarity,
    }
}

static REAN_QUESTIONS: [Question; 20] = [
    q(0, "I have the an optimism for success when starting a task.", true),
    q(1, "I'm active in my job.", true),
    q(2, "I show initiative.", true),
    q(
        3,
        "In fulfilling the responsible tasks, I try to find justifiable reasons for refusing to fulfill these tasks.",
        false,
    ),
    q(
        4,
        "I often choose extremes: either too easy or too complicated tasks.",
        false,
    ),
    q(
        5,
        "I never leave obstacles while facing difficult situations, but I'm looking for ways to overcome them.",
        true,
    ),
    q(
        6,
        "When the success is mixed with failing, I tend to overestimate my own success.",
        false,
    ),
    q(
        7,
        "The productivity of my actions, above all, depends on my own purpose, not on external control.",
        true,
    ),
    q(
        8,
        "Fulfilling difficult-enough tasks in a limited time frame, my work results get worse.",
        false,
    ),
    q(9, "Usually I'm persistent in achieving the set goal.", true),
    q(10, "I usually plan my future quite a long way ahead.", true),
    q(
        11,
        "If i have to take risks, I do it carefully, mindfully, not impulsevly with prudence.",
        true,
    ),
    q(
        12,
        "I am not particularly persistent in achieving the goal, especially in the absence of external control.",
        false,
    ),
    q(
        13,
        "Typically, I put myself on either an averagely complex or very complicated but achievable task, rather than setting myself unrealistically high goals.",
        true,
    ),
    q(
        14,
        "If, in the course of any task, I fail, then this task for me loses it's attraction.",
        false,
    ),
    q(
        15,
        "When the success is mixed with failing, I tend to exaggerate my failures.",
        true,
    ),
    q(16, "I usually plan my future for the near future.", false),
    q(
        17,
        "Working under limited time conditions, the results of my work tend to improve, even if the task is quite complicated.",
        true,
    ),
    q(
        18,
        "If I fail to complete a task, I don't give up on my goal.",
        true,
    ),
    q(
        19,
        "If I have chosen a task myself, in the event of a failure, its attractiveness increases even more.",
        true,
    ),
];

/// Ordered, immutable question list. Its length is authoritative for
/// completeness and for the progress denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    version: u32,
    questions: &'static [Question],
}

impl Catalog {
    pub const fn new(version: u32, questions: &'static [Question]) -> Self {
        Self { version, questions }
    }

    /// The 20-item Rean motivation instrument.
    pub fn rean() -> Self {
        Self::new(CATALOG_VERSION, &REAN_QUESTIONS)
    }

    pub const fn version(&self) -> u32 {
        self.version
    }

    pub const fn len(&self) -> usize {
        self.questions.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    pub fn contains(&self, position: usize) -> bool {
        position < self.questions.len()
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::rean()
    }
}
