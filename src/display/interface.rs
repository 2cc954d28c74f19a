use crate::identifier::render::View;
use std::error::Error;

/// Draws view snapshots. User intents travel back separately as messages.
pub trait Display {
    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>>;
}
