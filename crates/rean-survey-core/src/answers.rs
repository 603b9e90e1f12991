use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::SurveyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Yes,
    No,
}

impl Response {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Response {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Self::Yes),
            "no" | "n" => Ok(Self::No),
            _ => Err(SurveyError::UnknownResponse(s.to_string())),
        }
    }
}

/// Responses keyed by question position. Unanswered questions have no entry.
///
/// Sets built through [`AnswerSet::set_answer`] only hold positions inside the
/// catalog. Sets rebuilt from a share token via [`AnswerSet::from_entries`]
/// are taken as-is and may hold foreign positions or miss some.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    catalog_len: usize,
    entries: BTreeMap<usize, Response>,
}

impl AnswerSet {
    pub const fn new(catalog_len: usize) -> Self {
        Self {
            catalog_len,
            entries: BTreeMap::new(),
        }
    }

    pub const fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.len())
    }

    pub fn from_entries(
        catalog_len: usize,
        entries: impl IntoIterator<Item = (usize, Response)>,
    ) -> Self {
        Self {
            catalog_len,
            entries: entries.into_iter().collect(),
        }
    }

    /// Inserts or overwrites the response for `position`, returning the
    /// previous one. Positions outside the catalog leave the set untouched.
    pub fn set_answer(
        &mut self,
        position: usize,
        response: Response,
    ) -> Result<Option<Response>, SurveyError> {
        if position >= self.catalog_len {
            return Err(SurveyError::PositionOutOfRange {
                position,
                len: self.catalog_len,
            });
        }
        Ok(self.entries.insert(position, response))
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, position: usize) -> Option<Response> {
        self.entries.get(&position).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn catalog_len(&self) -> usize {
        self.catalog_len
    }

    /// True iff the entry count equals the catalog length, whichever
    /// positions those entries hold.
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.catalog_len
    }

    pub fn completion_fraction(&self) -> f64 {
        if self.catalog_len == 0 {
            return 0.0;
        }
        (count_as_f64(self.entries.len()) / count_as_f64(self.catalog_len)).min(1.0)
    }

    /// Entries in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Response)> + '_ {
        self.entries.iter().map(|(position, response)| (*position, *response))
    }
}

pub(crate) fn count_as_f64(n: usize) -> f64 {
    u32::try_from(n).map_or(f64::from(u32::MAX), f64::from)
}
