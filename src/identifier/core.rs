use crate::image_classifier::interface::{ClassificationError, ModelLoadError, Prediction};
use crate::image_source::core::{ImageId, ImageRef, ImageSources, Upload};
use crate::lookup::interface::{LookupError, LookupResult};

#[derive(Debug, Clone, PartialEq)]
pub enum ModelStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Identifies one asynchronous request. A completion is only applied while
/// the state is still waiting on the same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub image: ImageId,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Error(String),
    Warning(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    ImageSelected {
        notice: Option<Notice>,
    },
    Classifying {
        tag: RequestTag,
    },
    Classified {
        tag: RequestTag,
        predictions: Vec<Prediction>,
    },
    LookingUp {
        tag: RequestTag,
        predictions: Vec<Prediction>,
        term: String,
    },
    Complete {
        tag: RequestTag,
        predictions: Vec<Prediction>,
        results: Vec<LookupResult>,
        notice: Option<Notice>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub model: ModelStatus,
    pub sources: ImageSources,
    pub phase: Phase,
    pub seq: u64,
}

impl State {
    pub fn predictions(&self) -> &[Prediction] {
        match &self.phase {
            Phase::Classified { predictions, .. }
            | Phase::LookingUp { predictions, .. }
            | Phase::Complete { predictions, .. } => predictions,
            _ => &[],
        }
    }

    pub fn lookup_results(&self) -> &[LookupResult] {
        match &self.phase {
            Phase::Complete { results, .. } => results,
            _ => &[],
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match &self.phase {
            Phase::ImageSelected { notice } | Phase::Complete { notice, .. } => notice.as_ref(),
            _ => None,
        }
    }

    /// The request currently in flight, if any.
    pub fn pending(&self) -> Option<RequestTag> {
        match &self.phase {
            Phase::Classifying { tag } | Phase::LookingUp { tag, .. } => Some(*tag),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Msg {
    ModelLoadDone(Result<(), ModelLoadError>),
    ReloadModelRequested,
    UploadSelected(Option<Upload>),
    UrlEntered(String),
    HistoryPicked(usize),
    IdentifyRequested,
    ClassifyDone {
        tag: RequestTag,
        result: Result<Vec<Prediction>, ClassificationError>,
    },
    LookupDone {
        tag: RequestTag,
        result: Result<Vec<LookupResult>, LookupError>,
    },
}

impl Msg {
    fn is_user_intent(&self) -> bool {
        matches!(
            self,
            Msg::UploadSelected(_)
                | Msg::UrlEntered(_)
                | Msg::HistoryPicked(_)
                | Msg::IdentifyRequested
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadModel,
    Classify { tag: RequestTag, image: ImageRef },
    Lookup { tag: RequestTag, term: String },
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State {
            model: ModelStatus::Loading,
            sources: ImageSources::default(),
            phase: Phase::Idle,
            seq: 0,
        },
        vec![Effect::LoadModel],
    )
}

pub fn transition(mut state: State, msg: Msg) -> (State, Vec<Effect>) {
    // nothing is interactive until the model has finished loading
    if state.model == ModelStatus::Loading && msg.is_user_intent() {
        return (state, vec![]);
    }

    match msg {
        Msg::ModelLoadDone(result) => {
            state.model = match result {
                Ok(()) => ModelStatus::Ready,
                Err(error) => ModelStatus::Failed(error.to_string()),
            };
            (state, vec![])
        }

        Msg::ReloadModelRequested => match state.model {
            ModelStatus::Failed(_) => {
                state.model = ModelStatus::Loading;
                (state, vec![Effect::LoadModel])
            }
            _ => (state, vec![]),
        },

        Msg::UploadSelected(upload) => {
            state.sources.select_from_upload(upload);
            (image_changed(state), vec![])
        }

        Msg::UrlEntered(text) => {
            state.sources.select_from_text(text);
            (image_changed(state), vec![])
        }

        Msg::HistoryPicked(index) => {
            if state.sources.select_from_history(index).is_some() {
                (image_changed(state), vec![])
            } else {
                (state, vec![])
            }
        }

        Msg::IdentifyRequested => {
            let resting = matches!(
                state.phase,
                Phase::ImageSelected { .. } | Phase::Classified { .. } | Phase::Complete { .. }
            );

            match state.sources.current().cloned() {
                Some(image) if resting && state.model == ModelStatus::Ready => {
                    state.seq += 1;
                    let tag = RequestTag {
                        image: image.id,
                        seq: state.seq,
                    };
                    state.phase = Phase::Classifying { tag };
                    (state, vec![Effect::Classify { tag, image }])
                }
                _ => (state, vec![]),
            }
        }

        Msg::ClassifyDone { tag, result } => {
            if !matches!(state.phase, Phase::Classifying { tag: pending } if pending == tag) {
                return (state, vec![]);
            }

            match result {
                Ok(predictions) => classified(state, tag, predictions),
                Err(error) => {
                    state.phase = Phase::ImageSelected {
                        notice: Some(Notice::Error(format!(
                            "Could not identify image: {}",
                            error
                        ))),
                    };
                    (state, vec![])
                }
            }
        }

        Msg::LookupDone { tag, result } => {
            match std::mem::replace(&mut state.phase, Phase::Idle) {
                Phase::LookingUp {
                    tag: pending,
                    predictions,
                    ..
                } if pending == tag => {
                    state.phase = match result {
                        Ok(results) => Phase::Complete {
                            tag,
                            predictions,
                            results,
                            notice: None,
                        },
                        Err(error) => Phase::Complete {
                            tag,
                            predictions,
                            results: vec![],
                            notice: Some(Notice::Warning(format!(
                                "Could not fetch related articles: {}",
                                error
                            ))),
                        },
                    };
                }
                phase => state.phase = phase,
            }
            (state, vec![])
        }
    }
}

/// Any change of the current image invalidates results and in-flight work.
fn image_changed(mut state: State) -> State {
    state.seq += 1;
    state.phase = match state.sources.current() {
        Some(_) => Phase::ImageSelected { notice: None },
        None => Phase::Idle,
    };
    state
}

fn classified(mut state: State, tag: RequestTag, predictions: Vec<Prediction>) -> (State, Vec<Effect>) {
    let term = predictions
        .first()
        .map(|best_guess| best_guess.label.clone())
        .filter(|label| !label.is_empty());

    match term {
        Some(term) => {
            state.phase = Phase::LookingUp {
                tag,
                predictions,
                term: term.clone(),
            };
            (state, vec![Effect::Lookup { tag, term }])
        }
        None => {
            state.phase = Phase::Classified { tag, predictions };
            (state, vec![])
        }
    }
}
