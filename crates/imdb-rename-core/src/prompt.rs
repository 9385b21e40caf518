use std::io;

/// Answer to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        self == Confirmation::Confirmed
    }
}

/// Asks the user yes/no questions. The terminal implementation lives in the
/// CLI; tests script the answers.
pub trait Prompter {
    fn confirm(&self, message: &str, default: Confirmation) -> io::Result<Confirmation>;
}

/// Accepts every default without asking.
pub struct DefaultAnswers;

impl Prompter for DefaultAnswers {
    fn confirm(&self, _message: &str, default: Confirmation) -> io::Result<Confirmation> {
        Ok(default)
    }
}
