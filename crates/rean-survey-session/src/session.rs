use rean_survey_core::{
    classify, progress, progress_percent_rounded, score, AnswerSet, Catalog, Classification,
    Response,
};
use rean_survey_token::TokenCodec;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clipboard::{Clipboard, Notification};
use crate::error::SessionError;
use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Editing,
    ResultsShown,
    /// Bootstrapped from a share token; read-only until reset.
    SharedLocked,
}

/// One respondent's survey. All transitions are synchronous; only the share
/// action awaits an external clipboard, and it never changes state.
#[derive(Debug, Clone)]
pub struct Session {
    codec: TokenCodec,
    answers: AnswerSet,
    results_visible: bool,
    locked: bool,
    location: Location,
}

impl Session {
    pub fn new(catalog: Catalog, base: impl Into<String>) -> Self {
        Self {
            codec: TokenCodec::new(catalog),
            answers: AnswerSet::for_catalog(&catalog),
            results_visible: false,
            locked: false,
            location: Location::new(base),
        }
    }

    /// Starts a session from an external location. A decodable fragment
    /// yields a locked, shared result; anything else is dropped and the
    /// session starts empty.
    pub fn bootstrap(catalog: Catalog, location: Location) -> Self {
        let mut session = Self::new(catalog, location.base());
        session.load_fragment(location.fragment());
        session
    }

    /// Re-runs bootstrap against `fragment`, discarding the current session.
    pub fn load_fragment(&mut self, fragment: Option<&str>) {
        self.clear();
        let Some(fragment) = fragment.map(str::trim).filter(|f| !f.is_empty()) else {
            return;
        };

        match self.codec.decode(fragment) {
            Ok(answers) => {
                info!(
                    answered = answers.len(),
                    complete = answers.is_complete(),
                    "loaded shared result"
                );
                self.answers = answers;
                self.results_visible = true;
                self.locked = true;
                self.location.set_fragment(Some(fragment.to_string()));
            }
            Err(err) => {
                warn!(error = %err, "discarding unreadable share token");
            }
        }
    }

    pub const fn state(&self) -> SessionState {
        if self.locked {
            SessionState::SharedLocked
        } else if self.results_visible {
            SessionState::ResultsShown
        } else {
            SessionState::Editing
        }
    }

    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub const fn catalog(&self) -> &Catalog {
        self.codec.catalog()
    }

    pub const fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_complete(&self) -> bool {
        self.answers.is_complete()
    }

    pub fn progress(&self) -> f64 {
        progress(&self.answers, self.catalog().len())
    }

    pub fn progress_percent(&self) -> u8 {
        progress_percent_rounded(&self.answers, self.catalog().len())
    }

    /// Records a response. Any visible result is hidden again.
    pub fn set_answer(&mut self, position: usize, response: Response) -> Result<(), SessionError> {
        if self.locked {
            return Err(SessionError::Locked);
        }
        self.answers.set_answer(position, response)?;
        if self.results_visible {
            debug!(position, "answer changed, hiding result");
        }
        self.results_visible = false;
        self.location.set_fragment(None);
        Ok(())
    }

    /// Reveals the result of a complete survey and publishes its token.
    pub fn show_results(&mut self) -> Result<Classification, SessionError> {
        if self.locked {
            return Err(SessionError::Locked);
        }
        if !self.answers.is_complete() {
            return Err(SessionError::Incomplete {
                answered: self.answers.len(),
                expected: self.catalog().len(),
            });
        }

        let token = self.codec.encode(&self.answers)?;
        self.location.set_fragment(Some(token.into_string()));
        self.results_visible = true;
        debug!("results shown");
        Ok(self.classification())
    }

    /// The result view, present only while results are visible and every
    /// question has an answer.
    pub fn result(&self) -> Option<Classification> {
        (self.results_visible && self.answers.is_complete()).then(|| self.classification())
    }

    pub fn score(&self) -> usize {
        score(&self.answers, self.catalog())
    }

    /// Clears answers, hides results, unlocks and drops the published token.
    pub fn reset(&mut self) {
        self.clear();
        debug!("session reset");
    }

    pub const fn location(&self) -> &Location {
        &self.location
    }

    pub fn fragment(&self) -> Option<&str> {
        self.location.fragment()
    }

    /// Copies the current link. Clipboard failures turn into a failure
    /// notification; the session is left untouched either way.
    pub async fn share(&self, clipboard: &dyn Clipboard) -> Result<Notification, SessionError> {
        if self.result().is_none() {
            return Err(SessionError::NothingToShare);
        }

        let href = self.location.href();
        match clipboard.write_text(&href).await {
            Ok(()) => {
                info!(clipboard = clipboard.name(), "share link copied");
                Ok(Notification::LINK_COPIED)
            }
            Err(err) => {
                warn!(clipboard = clipboard.name(), error = %err, "share link copy failed");
                Ok(Notification::COPY_FAILED)
            }
        }
    }

    fn classification(&self) -> Classification {
        classify(self.score(), self.catalog().len())
    }

    fn clear(&mut self) {
        self.answers.reset();
        self.results_visible = false;
        self.locked = false;
        self.location.set_fragment(None);
    }
}
