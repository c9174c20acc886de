//! Tutor prompt construction.

use serde::{Deserialize, Serialize};

use super::scope::Scope;
use crate::analysis::{render_steps, Step};
use crate::error::{Error, Result};

/// Kind of feedback a student can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCommand {
    /// Judge correctness and rigor against the reference solution
    Compare,
    /// Judge whether the attempt heads the same way as the reference solution
    Direction,
    /// Continue from the last step that matches with a hint
    Hint,
}

impl FeedbackCommand {
    pub const ALL: [FeedbackCommand; 3] = [Self::Compare, Self::Direction, Self::Hint];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compare => "compare",
            Self::Direction => "direction",
            Self::Hint => "hint",
        }
    }

    /// Sentence the model must use when the student leaves the scope.
    pub fn refusal(&self) -> &'static str {
        match self {
            Self::Compare => "I cannot verify this answer as it uses information out of my scope.",
            Self::Direction => {
                "The direction is dissimilar, and I cannot verify this direction as it uses information out of my scope."
            }
            Self::Hint => {
                "I cannot verify the student's solution as it uses information out of my scope. I will provide a hint starting from the beginning."
            }
        }
    }

    fn task(&self) -> &'static str {
        match self {
            Self::Compare => "reviewing a student's solution to an exercise",
            Self::Direction => "evaluating the direction a student is taking to solve a problem",
            Self::Hint => "giving hints that guide a student toward a correct solution",
        }
    }

    fn student_material(&self) -> &'static str {
        match self {
            Self::Compare => "the student's solution",
            Self::Direction => "the student's partial or complete attempt",
            Self::Hint => "the student's partial or empty attempt",
        }
    }

    fn instructions(&self) -> &'static [&'static str] {
        match self {
            Self::Compare => &[
                "Break both solutions down into their individual steps.",
                "Compare the Student Solution to the Official Solution for correctness, rigor and use of the Scope.",
                "If the student relies on methods or facts outside the Scope, say exactly: \"{refusal}\"",
                "If the student's answer is wrong or less rigorous than the official one, explain where.",
                "If the student's solution is correct and rigorous within the Scope, confirm it.",
            ],
            Self::Direction => &[
                "Break down the logical flow and method of both solutions.",
                "Decide whether the Student Solution is heading in the same general direction as the Official Solution.",
                "If the direction differs and relies on concepts outside the Scope, say exactly: \"{refusal}\"",
                "If the direction is similar and within the Scope, confirm it and briefly explain why.",
            ],
            Self::Hint => &[
                "Find the furthest step of the Student Solution that matches a step of the Official Solution.",
                "Ignore student steps that are neither in the Official Solution nor within the Scope.",
                "From the last matching step, or from the beginning when nothing matches, give one rigorous hint toward the answer.",
                "State which step the hint continues from.",
                "If no progress can be verified because of out-of-scope content, say exactly: \"{refusal}\"",
            ],
        }
    }
}

impl std::fmt::Display for FeedbackCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeedbackCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::invalid_input(format!("Invalid command: {}", s)))
    }
}

/// Build the tutor prompt for `command`.
///
/// The student's proof is embedded in its annotated form, one
/// `Step N: text [label]` line per step, which is the same form the
/// reference solutions are stored in.
pub fn build_prompt(
    command: FeedbackCommand,
    model_answer: &str,
    student_steps: &[Step],
    scope: &Scope,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are an expert calculus tutor {}. You will be given:\n",
        command.task()
    ));
    prompt.push_str("- the official solution (\"Official Solution\")\n");
    prompt.push_str(&format!(
        "- {} (\"Student Solution\")\n",
        command.student_material()
    ));
    prompt.push_str("- the knowledge the student may rely on (\"Scope\")\n");

    prompt.push_str("\nYour task:\n");
    for (i, instruction) in command.instructions().iter().enumerate() {
        let instruction = instruction.replace("{refusal}", command.refusal());
        prompt.push_str(&format!("{}. {}\n", i + 1, instruction));
    }

    prompt.push_str("\nOfficial Solution:\n");
    prompt.push_str(model_answer.trim());
    prompt.push('\n');

    prompt.push_str("\nStudent Solution:\n");
    if student_steps.is_empty() {
        prompt.push_str("(no steps)");
    } else {
        prompt.push_str(&render_steps(student_steps));
    }
    prompt.push('\n');

    prompt.push_str("\nScope:\n");
    prompt.push_str(scope.as_str());
    prompt.push('\n');

    prompt
}
