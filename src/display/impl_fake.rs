use crate::display::interface::Display;
use crate::identifier::render::View;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Keeps every rendered view so tests can inspect what was shown.
#[derive(Clone, Default)]
pub struct DisplayFake {
    views: Arc<Mutex<Vec<View>>>,
}

impl DisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn views(&self) -> Vec<View> {
        self.views
            .lock()
            .map(|views| views.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<View> {
        self.views().pop()
    }
}

impl Display for DisplayFake {
    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.views
            .lock()
            .map_err(|_| "views lock poisoned")?
            .push(view.clone());
        Ok(())
    }
}
