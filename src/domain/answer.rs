//! Yes/no answer parsing

/// A parsed reply to a yes/no prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Exact match: only `yes` and `y` affirm.
    ///
    /// Used for tree questions, guesses and the play-again prompt. Empty input
    /// and end of input count as `No`.
    pub fn strict(input: &str) -> Self {
        match input {
            "yes" | "y" => Answer::Yes,
            _ => Answer::No,
        }
    }

    /// Case-insensitive match on `yes`/`y`, ignoring surrounding whitespace.
    pub fn lenient(input: &str) -> Self {
        let input = input.trim();
        if input.eq_ignore_ascii_case("yes") || input.eq_ignore_ascii_case("y") {
            Answer::Yes
        } else {
            Answer::No
        }
    }

    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}
