use crate::answers::{AnswerSet, Response};
use crate::catalog::{Catalog, Question};

/// Whether `response` to `question` counts toward the score.
pub fn counts_toward_score(question: &Question, response: Response) -> bool {
    match response {
        Response::Yes => question.polarity,
        Response::No => !question.polarity,
    }
}

/// Number of polarity-matching responses. Positions the catalog does not know
/// are skipped, so partial or foreign sets still yield a value in
/// `[0, catalog.len()]`.
pub fn score(answers: &AnswerSet, catalog: &Catalog) -> usize {
    answers
        .iter()
        .filter(|(position, response)| {
            catalog
                .get(*position)
                .is_some_and(|question| counts_toward_score(question, *response))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scoring_response(question: &Question) -> Response {
        if question.polarity {
            Response::Yes
        } else {
            Response::No
        }
    }

    #[test]
    fn all_matching_responses_score_full() {
        let catalog = Catalog::rean();
        let answers = AnswerSet::from_entries(
            catalog.len(),
            catalog
                .questions()
                .iter()
                .map(|q| (q.position, scoring_response(q))),
        );
        assert_eq!(score(&answers, &catalog), 20);
    }

    #[test]
    fn all_yes_scores_the_positive_items() {
        let catalog = Catalog::rean();
        let answers =
            AnswerSet::from_entries(catalog.len(), (0..catalog.len()).map(|p| (p, Response::Yes)));
        assert_eq!(score(&answers, &catalog), 13);

        let answers =
            AnswerSet::from_entries(catalog.len(), (0..catalog.len()).map(|p| (p, Response::No)));
        assert_eq!(score(&answers, &catalog), 7);
    }

    #[test]
    fn partial_and_foreign_positions() {
        let catalog = Catalog::rean();
        let answers = AnswerSet::from_entries(
            catalog.len(),
            [(0, Response::Yes), (3, Response::No), (42, Response::Yes)],
        );
        assert_eq!(score(&answers, &catalog), 2);
        assert_eq!(score(&AnswerSet::for_catalog(&catalog), &catalog), 0);
    }
}
