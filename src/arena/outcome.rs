use serde::{Deserialize, Serialize};

/// Who won a match, from the point of view of a pair of scores `(x, y)`.
///
/// In a batch run `x` is always agent A's normalised score and `y` agent
/// B's, so `XWins` reads as "agent A won".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    XWins,
    YWins,
    Tie,
}

/// Strict comparison; equal scores are a tie.
pub fn classify(x: i32, y: i32) -> Outcome {
    match x.cmp(&y) {
        std::cmp::Ordering::Greater => Outcome::XWins,
        std::cmp::Ordering::Less => Outcome::YWins,
        std::cmp::Ordering::Equal => Outcome::Tie,
    }
}
