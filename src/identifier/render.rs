use crate::identifier::core::{ModelStatus, Notice, Phase, State};
use crate::image_source::core::ImageRef;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub label: String,
    pub confidence: String,
    pub best_guess: bool,
}

impl fmt::Display for PredictionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.label, self.confidence)?;
        if self.best_guess {
            write!(f, " (Best Guess)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupRow {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Everything a display needs, detached from the session state.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub model_loading: bool,
    pub model_error: Option<String>,
    pub current: Option<ImageRef>,
    pub can_identify: bool,
    pub identifying: bool,
    pub looking_up: bool,
    pub predictions: Vec<PredictionRow>,
    pub lookup_results: Vec<LookupRow>,
    pub notice: Option<Notice>,
    pub history: Vec<ImageRef>,
}

pub fn view(state: &State) -> View {
    let current = state.sources.current().cloned();

    View {
        model_loading: state.model == ModelStatus::Loading,
        model_error: match &state.model {
            ModelStatus::Failed(message) => Some(message.clone()),
            _ => None,
        },
        can_identify: current.is_some()
            && state.model == ModelStatus::Ready
            && state.pending().is_none(),
        current,
        identifying: matches!(state.phase, Phase::Classifying { .. }),
        looking_up: matches!(state.phase, Phase::LookingUp { .. }),
        predictions: state
            .predictions()
            .iter()
            .enumerate()
            .map(|(index, prediction)| PredictionRow {
                label: prediction.label.clone(),
                confidence: format_confidence(prediction.confidence),
                best_guess: index == 0,
            })
            .collect(),
        lookup_results: state
            .lookup_results()
            .iter()
            .map(|result| LookupRow {
                title: result.title.clone(),
                url: result.url.clone(),
                snippet: strip_markup(&result.snippet),
            })
            .collect(),
        notice: state.notice().cloned(),
        history: state.sources.history().to_vec(),
    }
}

pub fn format_confidence(confidence: f32) -> String {
    format!("{:.2}%", confidence as f64 * 100.0)
}

/// Drops tags and decodes the handful of entities search snippets use.
pub fn strip_markup(snippet: &str) -> String {
    let mut text = String::with_capacity(snippet.len());
    let mut in_tag = false;

    for c in snippet.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
