//! Pure formatting over search and analysis results.
//!
//! Nothing here touches the network; front ends build a view model from
//! controller state and draw it however they like.

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::{AnalysisResult, Paper};

/// Abstracts longer than this (in characters) are collapsed by default.
pub const ABSTRACT_PREVIEW_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";
/// Placeholder cards shown while a search is loading.
pub const PLACEHOLDER_COUNT: usize = 3;
pub const AUTHOR_SEPARATOR: &str = ", ";
pub const NO_RESULTS_MESSAGE: &str = "No papers found. Try a different search query.";
pub const ARXIV_ABS_URL: &str = "https://arxiv.org/abs/";

/// Per-paper expansion flags keyed by [`Paper::id`]. Missing means collapsed.
#[derive(Debug, Clone, Default)]
pub struct ExpansionMap {
    expanded: HashMap<String, bool>,
}

impl ExpansionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// Flip `id` and return its new state. Other ids are untouched.
    pub fn toggle(&mut self, id: &str) -> bool {
        let entry = self.expanded.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }
}

pub fn is_truncatable(abstract_text: &str) -> bool {
    abstract_text.chars().count() > ABSTRACT_PREVIEW_CHARS
}

/// The abstract as it should be shown.
///
/// Collapsed long abstracts are cut to [`ABSTRACT_PREVIEW_CHARS`] characters
/// plus [`ELLIPSIS`]; everything else is returned unchanged.
pub fn display_abstract(abstract_text: &str, expanded: bool) -> Cow<'_, str> {
    if expanded {
        return Cow::Borrowed(abstract_text);
    }
    match abstract_text.char_indices().nth(ABSTRACT_PREVIEW_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &abstract_text[..cut], ELLIPSIS)),
        None => Cow::Borrowed(abstract_text),
    }
}

pub fn join_authors(authors: &[String]) -> String {
    authors.join(AUTHOR_SEPARATOR)
}

/// Short numeric date (`M/D/YYYY`), or the raw string if it can't be parsed.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

pub fn arxiv_url(arxiv_id: &str) -> String {
    format!("{ARXIV_ABS_URL}{arxiv_id}")
}

/// Label for the expand/collapse control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleLabel {
    ShowMore,
    ShowLess,
}

impl ToggleLabel {
    pub fn text(self) -> &'static str {
        match self {
            ToggleLabel::ShowMore => "Show More",
            ToggleLabel::ShowLess => "Show Less",
        }
    }
}

/// Everything needed to draw one paper.
#[derive(Debug, Clone)]
pub struct PaperCard<'a> {
    pub paper: &'a Paper,
    pub authors: String,
    pub date: String,
    pub abstract_text: Cow<'a, str>,
    /// `None` when the abstract is short enough to show in full.
    pub toggle: Option<ToggleLabel>,
    pub link: String,
}

impl<'a> PaperCard<'a> {
    pub fn build(paper: &'a Paper, expansion: &ExpansionMap) -> Self {
        let expanded = expansion.is_expanded(&paper.id);
        let toggle = is_truncatable(&paper.abstract_text).then_some(if expanded {
            ToggleLabel::ShowLess
        } else {
            ToggleLabel::ShowMore
        });
        Self {
            paper,
            authors: join_authors(&paper.authors),
            date: format_date(&paper.published_date),
            abstract_text: display_abstract(&paper.abstract_text, expanded),
            toggle,
            link: arxiv_url(&paper.arxiv_id),
        }
    }

    /// `"A, B • 1/1/2021"`, omitting empty parts.
    pub fn byline(&self) -> String {
        match (self.authors.is_empty(), self.date.is_empty()) {
            (false, false) => format!("{} \u{2022} {}", self.authors, self.date),
            (false, true) => self.authors.clone(),
            (true, false) => self.date.clone(),
            (true, true) => String::new(),
        }
    }
}

/// What the paper list area should show.
#[derive(Debug, Clone)]
pub enum PaperListView<'a> {
    /// No search has completed yet.
    Idle,
    Loading { placeholders: usize },
    Empty,
    Papers(Vec<PaperCard<'a>>),
}

impl<'a> PaperListView<'a> {
    pub fn build(papers: Option<&'a [Paper]>, loading: bool, expansion: &ExpansionMap) -> Self {
        if loading {
            return PaperListView::Loading {
                placeholders: PLACEHOLDER_COUNT,
            };
        }
        match papers {
            None => PaperListView::Idle,
            Some([]) => PaperListView::Empty,
            Some(list) => PaperListView::Papers(
                list.iter()
                    .map(|p| PaperCard::build(p, expansion))
                    .collect(),
            ),
        }
    }

    /// Number of entries drawn, placeholders included.
    pub fn len(&self) -> usize {
        match self {
            PaperListView::Idle | PaperListView::Empty => 0,
            PaperListView::Loading { placeholders } => *placeholders,
            PaperListView::Papers(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Summary block plus ordered insights. `sentiment` and `topics` are not shown.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisView<'a> {
    pub summary: &'a str,
    pub insights: &'a [String],
}

impl<'a> AnalysisView<'a> {
    pub fn build(result: Option<&'a AnalysisResult>) -> Option<Self> {
        result.map(|r| Self {
            summary: &r.summary,
            insights: &r.insights,
        })
    }
}
