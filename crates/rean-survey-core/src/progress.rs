use crate::answers::{count_as_f64, AnswerSet};

/// Completion percentage in `[0, 100]`. Lenient sets holding more entries than
/// the catalog are capped at 100.
pub fn progress(answers: &AnswerSet, catalog_len: usize) -> f64 {
    if catalog_len == 0 {
        return 0.0;
    }
    (100.0 * count_as_f64(answers.len()) / count_as_f64(catalog_len)).min(100.0)
}

/// [`progress`] rounded to the nearest whole percent for display.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_percent_rounded(answers: &AnswerSet, catalog_len: usize) -> u8 {
    progress(answers, catalog_len).round() as u8
}
