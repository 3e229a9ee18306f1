//! Game service
//!
//! Plays rounds against the user: walks the tree by asking its questions,
//! makes a guess at the leaf and learns a new question when the guess is wrong.

use tracing::{debug, info, instrument};

use crate::application::services::TreeStore;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::codec::{MAX_DEPTH, NULL_RECORD};
use crate::domain::{Answer, Node};
use crate::infrastructure::traits::Console;

/// Default limit for typed animal names and questions, in characters.
pub const DEFAULT_MAX_INPUT_LEN: usize = 255;

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The guess was right.
    Win,
    /// The guess was wrong and the tree learned a new question.
    Learned,
    /// The guess was wrong and nothing was learned: input ended early, or
    /// the leaf is already as deep as a stored tree may go.
    Abandoned,
}

/// Result of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub outcome: Outcome,
    /// Questions answered before the guess (the depth of the guessed leaf).
    pub questions_asked: usize,
}

/// Tally over all rounds of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds: usize,
    pub wins: usize,
    pub learned: usize,
}

impl SessionSummary {
    fn record(&mut self, report: &RoundReport) {
        self.rounds += 1;
        match report.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Learned => self.learned += 1,
            Outcome::Abandoned => {}
        }
    }
}

/// Everything that happened in [`GameService::run`].
#[derive(Debug)]
pub struct SessionReport {
    /// The tree as it was saved.
    pub tree: Node,
    pub played: ApplicationResult<SessionSummary>,
    pub saved: ApplicationResult<()>,
}

/// Service playing the guessing game over a [`Console`].
pub struct GameService<C> {
    console: C,
    max_input_len: usize,
}

impl<C: Console> GameService<C> {
    /// Create a new game service.
    ///
    /// Typed animal names and questions are cut to `max_input_len` characters.
    pub fn new(console: C, max_input_len: usize) -> Self {
        Self {
            console,
            max_input_len: max_input_len.max(1),
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Load the tree, greet, play until the user stops, then save once.
    ///
    /// The tree is saved even when the session ends on a console error.
    #[instrument(level = "debug", skip_all)]
    pub fn run(&mut self, store: &TreeStore) -> SessionReport {
        let mut tree = store.load();
        let played = self
            .greet()
            .and_then(|()| self.play_session(&mut tree));
        let saved = store.save(&tree);
        SessionReport {
            tree,
            played,
            saved,
        }
    }

    fn greet(&mut self) -> ApplicationResult<()> {
        self.say("Welcome to the Animal Guessing Game!")?;
        self.say("Think of an animal and I'll try to guess it.")?;
        self.say("")
    }

    /// Play rounds until the play-again prompt is not answered `yes`/`y`.
    #[instrument(level = "debug", skip_all)]
    pub fn play_session(&mut self, root: &mut Node) -> ApplicationResult<SessionSummary> {
        let mut summary = SessionSummary::default();
        loop {
            let report = self.play_round(root)?;
            debug!("round finished: {:?}", report);
            summary.record(&report);

            if !self.ask_yes_no("\nDo you want to play again")? {
                break;
            }
            self.say("")?;
        }
        Ok(summary)
    }

    /// Play one round from `root`, learning in place on a wrong guess.
    pub fn play_round(&mut self, root: &mut Node) -> ApplicationResult<RoundReport> {
        self.descend(root, 0)
    }

    fn descend(&mut self, node: &mut Node, depth: usize) -> ApplicationResult<RoundReport> {
        if node.is_leaf() {
            return self.guess(node, depth);
        }
        let affirmed = self.ask_yes_no(node.text())?;
        match node.child_mut(affirmed) {
            Some(child) => self.descend(child, depth + 1),
            None => self.guess(node, depth),
        }
    }

    fn guess(&mut self, leaf: &mut Node, depth: usize) -> ApplicationResult<RoundReport> {
        let outcome = if self.ask_yes_no(leaf.text())? {
            self.say("I win! Great game.")?;
            Outcome::Win
        } else if depth >= MAX_DEPTH {
            debug!("learn: leaf at depth {} cannot grow", depth);
            self.say("I can't learn any more questions down this path.")?;
            Outcome::Abandoned
        } else if self.learn(leaf)? {
            Outcome::Learned
        } else {
            Outcome::Abandoned
        };
        Ok(RoundReport {
            outcome,
            questions_asked: depth,
        })
    }

    /// Ask for the right animal and a question telling it apart from the
    /// wrong guess, then graft both onto `leaf`.
    ///
    /// Returns `false` when input ends before the question is known; `leaf`
    /// is then left untouched.
    fn learn(&mut self, leaf: &mut Node) -> ApplicationResult<bool> {
        let guessed = leaf.guessed_animal().to_string();

        let Some(animal) = self.ask_text("What animal were you thinking of", false)? else {
            debug!("learn: input ended before the animal was named");
            return Ok(false);
        };
        let prompt = format!("What question would distinguish a {guessed} from a {animal}");
        let Some(question) = self.ask_text(&prompt, true)? else {
            debug!("learn: input ended before the question was given");
            return Ok(false);
        };

        let reply = self
            .console
            .read_line(&format!(
                "For a {animal}, what is the answer to \"{question}\" (yes/no): "
            ))
            .or_input_error()?
            .unwrap_or_default();
        let new_animal_is_yes = Answer::lenient(&reply).is_yes();

        leaf.learn(&animal, question, new_animal_is_yes)?;
        info!(
            "learned {} (yes branch: {}) vs {}",
            animal, new_animal_is_yes, guessed
        );
        self.say("Thanks! I'll remember that for next time.")?;
        Ok(true)
    }

    fn ask_yes_no(&mut self, text: &str) -> ApplicationResult<bool> {
        let reply = self
            .console
            .read_line(&format!("{text} (yes/no): "))
            .or_input_error()?;
        Ok(Answer::strict(reply.as_deref().unwrap_or_default()).is_yes())
    }

    /// Read non-empty free text, repeating the prompt on blank input.
    ///
    /// With `record_safe`, the literal sentinel record is refused as well,
    /// since it cannot be stored as a question.
    fn ask_text(&mut self, prompt: &str, record_safe: bool) -> ApplicationResult<Option<String>> {
        loop {
            let Some(line) = self
                .console
                .read_line(&format!("{prompt}: "))
                .or_input_error()?
            else {
                return Ok(None);
            };
            let text = clip(line.trim(), self.max_input_len).trim_end();
            if text.is_empty() {
                self.say("Please type an answer.")?;
                continue;
            }
            if record_safe && text == NULL_RECORD {
                self.say("That text is reserved, please rephrase.")?;
                continue;
            }
            return Ok(Some(text.to_string()));
        }
    }

    fn say(&mut self, msg: &str) -> ApplicationResult<()> {
        self.console.say(msg).or_input_error()
    }
}

/// Cut `s` to at most `max` characters.
fn clip(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dog", 10, "dog")]
    #[case("elephant", 3, "ele")]
    #[case("éléphant", 2, "él")]
    #[case("", 5, "")]
    fn test_clip(#[case] input: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(clip(input, max), expected);
    }

    #[test]
    fn given_reports_when_recording_then_tallies_outcomes() {
        let mut summary = SessionSummary::default();
        for outcome in [Outcome::Win, Outcome::Learned, Outcome::Abandoned, Outcome::Win] {
            summary.record(&RoundReport {
                outcome,
                questions_asked: 0,
            });
        }
        assert_eq!(
            summary,
            SessionSummary {
                rounds: 4,
                wins: 2,
                learned: 1,
            }
        );
    }
}
