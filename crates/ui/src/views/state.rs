#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    EmptyQuiz,
    MalformedQuestion,
    IncompleteAnswer,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::EmptyQuiz => "There are no questions to practice yet.",
            Self::MalformedQuestion => {
                "This question has a different number of blanks than answers."
            }
            Self::IncompleteAnswer => "Fill every blank before moving on.",
        }
    }

    /// Whether the quiz can carry on once the message is dismissed.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IncompleteAnswer)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Ready,
    Error(ViewError),
}
