//! Built-in calculus exercises used to bootstrap an empty store.

use super::types::{Exercise, ExerciseKey};
use crate::error::Result;

const EX1_Q1_QUESTION: &str = "Prove the following statement:
If a + 1/a is an integer, then a^3 + 1/a^3 is also an integer.";

const EX1_Q1_ANSWER: &str = "Step 1: § PROOF: [other]
Step 2: Let a ∈ℤ [assumption]
Step 3: Assume that: a + 1/a = b, where b ∈ℤ [assumption]
Step 4: We want to show that a^3 + 1/a^3∈ℤ [other]
Step 5: We use the identity: ( a + 1/a)^3 = a^3 + 1/a^3 + 3a ·1/a( a + 1/a) [other]
Step 6: Since a ·1/a = 1, we simplify: ( a + 1/a)^3 = a^3 + 1/a^3 + 3 ( a + 1/a) [other]
Step 7: Substitute b into the expression: b^3 = a^3 + 1/a^3 + 3b [other]
Step 8: Rearrange to isolate a^3 + 1/a^3: a^3 + 1/a^3 = b^3 - 3b [inference]
Step 9: Since b ∈ℤ, then b^3 - 3b ∈ℤ, and hence: a^3 + 1/a^3∈ℤ [inference]
Step 10: § CONCLUSION: [other]
Step 11: If a + 1/a is an integer, then a^3 + 1/a^3 is also an integer [inference]";

const EX1_Q2_QUESTION: &str = "Prove the following inequality,
and find a necessary and sufficient condition for equality to hold:
|a + 1/a| ≥ 2";

const EX1_Q2_ANSWER: &str = "Step 1: § PART 2 [other]
Step 2: Let a ∈ℝ, with a ≠ 0 [assumption]
Step 3: Then: [inference]
Step 4: |a + 1/a| = |a| + | 1/a| [other]
Step 5: By the Arithmetic-Geometric Mean Inequality (AM-GM), we have: [other]
Step 6: |a| + | 1/a|/2≥√( |a| ·| 1/a| ) = √(1) = 1 [other]
Step 7: Multiplying both sides by 2: [other]
Step 8: |a| + | 1/a| ≥ 2 [other]
Step 9: Equality holds if and only if: [case]
Step 10: |a| = | 1/a| ⇒ a = ± 1 [other]";

const EX1_Q3_QUESTION: &str = "Prove by induction:
The sum from k = 1 to n (n ∈ ℕ) of k² = (1/6)n(2n+1)*(n+1)";

const EX1_Q3_ANSWER: &str = "Step 1: § PROOF BY INDUCTION [induction]
Step 2: We aim to prove the following identity for all n ∈ℕ: [assumption]
Step 3: ∑_k=1^n k^2 = 1/6n(n+1)(2n+1) [other]
Step 4: Base case: [induction]
Step 5: n = 1 [other]
Step 6: ∑_k=1^1 k^2 = 1^2 = 1 1/6· 1 · (1+1) · (2 · 1 + 1) = 1/6· 1 · 2 · 3 = 1 [other]
Step 7: Thus, the formula holds for n = 1 [inference]
Step 8: Inductive step: [induction]
Step 9: Assume the formula holds for some n = m ∈ℕ: [assumption]
Step 10: ∑_k=1^m k^2 = 1/6m(m+1)(2m+1) [other]
Step 11: We want to show that the formula holds for n = m+1, i.e., ∑_k=1^m+1 k^2 = 1/6(m+1)(m+2)(2m+3) [other]
Step 12: Start from the inductive hypothesis: [induction]
Step 13: ∑_k=1^m+1 k^2 = ∑_k=1^m k^2 + (m+1)^2 = 1/6m(m+1)(2m+1) + (m+1)^2 [other]
Step 14: Factor out (m+1): [other]
Step 15: = (m+1) [ 1/6m(2m+1) + (m+1) ] [other]
Step 16: = (m+1) [ 1/6m(2m+1) + 6(m+1)/6] [other]
Step 17: = (m+1) [ 1/6( m(2m+1) + 6(m+1) ) ] [other]
Step 18: = 1/6(m+1) ( 2m^2 + m + 6m + 6 ) = 1/6(m+1)(2m^2 + 7m + 6) [other]
Step 19: Factor the quadratic: [other]
Step 20: 2m^2 + 7m + 6 = (m+2)(2m+3) [other]
Step 21: ⇒∑_k=1^m+1 k^2 = 1/6(m+1)(m+2)(2m+3) [other]
Step 22: Thus, the formula holds for m+1, completing the inductive step [inference]
Step 23: Conclusion: [other]
Step 24: By mathematical induction, the identity ∑_k=1^n k^2 = 1/6n(n+1)(2n+1) holds for all n ∈ℕ [assumption]";

const EX1_Q4_QUESTION: &str = "Prove that for any n ∈ ℕ:
The sum from k = 0 to n of (-1)^k * (n choose k) = 0";

const EX1_Q4_ANSWER: &str = "Step 1: § PROOF [other]
Step 2: We aim to prove that for every n ∈ℕ, n ≥ 1, [other]
Step 3: ∑_k=0^n (-1)^k C(n, k) = 0 [other]
Step 4: Proof using the Binomial Theorem: [other]
Step 5: Recall the Binomial Theorem: [other]
Step 6: (1 + x)^n = ∑_k=0^n C(n, k) x^k [other]
Step 7: Substitute x = -1 into the identity: [other]
Step 8: (1 + (-1))^n = ∑_k=0^n C(n, k) (-1)^k [other]
Step 9: 0^n = ∑_k=0^n (-1)^k C(n, k) [other]
Step 10: Since n ≥ 1, we have 0^n = 0 [other]
Step 11: Therefore, [conclusion]
Step 12: ∑_k=0^n (-1)^k C(n, k) = 0 [other]
Step 13: Conclusion: [other]
Step 14: ∑_k=0^n (-1)^k C(n, k) = 0 for all n ∈ℕ, n ≥ 1 [assumption]";

/// The four exercises of sheet 1.
pub fn builtin_exercises() -> Result<Vec<Exercise>> {
    [
        (1, EX1_Q1_QUESTION, EX1_Q1_ANSWER),
        (2, EX1_Q2_QUESTION, EX1_Q2_ANSWER),
        (3, EX1_Q3_QUESTION, EX1_Q3_ANSWER),
        (4, EX1_Q4_QUESTION, EX1_Q4_ANSWER),
    ]
    .into_iter()
    .map(|(question_num, question, answer)| {
        Exercise::new(ExerciseKey::new(1, question_num), question, answer)
    })
    .collect()
}
