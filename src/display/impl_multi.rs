use crate::display::interface::Display;
use crate::identifier::render::View;
use std::error::Error;

/// Renders every view to each display in order.
pub struct DisplayMulti {
    displays: Vec<Box<dyn Display + Send>>,
}

impl DisplayMulti {
    pub fn new(displays: Vec<Box<dyn Display + Send>>) -> Self {
        Self { displays }
    }
}

impl Display for DisplayMulti {
    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        for display in &mut self.displays {
            display.render(view)?;
        }
        Ok(())
    }
}
