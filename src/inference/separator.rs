//! Field delimiter detection for delimiter-separated files
//!
//! The delimiter is taken to be the most frequent character across a small
//! head sample once letters, digits, spaces and common punctuation are
//! removed. Counting is a commutative reduction, so the result does not depend
//! on the order of the sampled lines.

use std::collections::BTreeMap;

/// Accented Latin letters treated as text rather than delimiter candidates
const ACCENTED_LETTERS: &str = "àâäáãåçéèêëíìîïñóòôöõúùûüýÿœæÀÂÄÁÃÅÇÉÈÊËÍÌÎÏÑÓÒÔÖÕÚÙÛÜÝŸŒÆ";

/// Whether a character is excluded from delimiter candidates
pub fn is_noise(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, ' ' | '"' | '\'' | '(' | ')' | '@' | '?' | '!' | '+' | '\r' | '\n')
        || ACCENTED_LETTERS.contains(c)
}

/// Count delimiter candidates across all sampled lines
pub fn candidate_counts<S: AsRef<str>>(lines: &[S]) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for c in lines
        .iter()
        .flat_map(|line| line.as_ref().chars())
        .filter(|c| !is_noise(*c))
    {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Detect the field delimiter of a line sample
///
/// Returns `None` when the sample is empty or no candidate character remains.
/// Among characters tied for the highest count, the one with the lowest
/// Unicode scalar value wins.
pub fn detect_separator<S: AsRef<str>>(lines: &[S]) -> Option<char> {
    let counts = candidate_counts(lines);
    tracing::debug!(candidates = ?counts, "Separator candidates");

    // BTreeMap iterates in ascending order, so keeping the incumbent on ties
    // selects the smallest character.
    counts
        .into_iter()
        .fold(None, |best: Option<(char, usize)>, (c, count)| match best {
            Some((_, max)) if max >= count => best,
            _ => Some((c, count)),
        })
        .map(|(c, _)| c)
}
