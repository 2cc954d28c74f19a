use crate::display::interface::Display;
use crate::identifier::core::Notice;
use crate::identifier::render::View;
use std::error::Error;

pub struct DisplayConsole {
    last: Vec<String>,
}

impl DisplayConsole {
    pub fn new() -> Self {
        Self { last: vec![] }
    }
}

pub fn format_view(view: &View) -> Vec<String> {
    let mut lines = vec!["Image Identification".to_string()];

    if view.model_loading {
        lines.push("Model Loading...".to_string());
        return lines;
    }

    if let Some(error) = &view.model_error {
        lines.push(format!("Model failed to load: {}", error));
    }

    match &view.current {
        Some(image) => lines.push(format!("Image: {}", image.describe())),
        None => lines.push("No image selected".to_string()),
    }

    if view.identifying {
        lines.push("Identifying...".to_string());
    }

    for row in &view.predictions {
        lines.push(format!("  {}", row));
    }

    if view.looking_up {
        lines.push("Searching...".to_string());
    }

    for result in &view.lookup_results {
        lines.push(format!("  {}", result.title));
        lines.push(format!("    {}", result.url));
        lines.push(format!("    {}", result.snippet));
    }

    match &view.notice {
        Some(Notice::Error(message)) => lines.push(format!("Error: {}", message)),
        Some(Notice::Warning(message)) => lines.push(format!("Notice: {}", message)),
        None => {}
    }

    if !view.history.is_empty() {
        lines.push("Recent Images".to_string());
        for (index, image) in view.history.iter().enumerate() {
            lines.push(format!("  {}. {}", index + 1, image.describe()));
        }
    }

    lines
}

impl Display for DisplayConsole {
    fn render(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        let lines = format_view(view);
        if lines == self.last {
            return Ok(());
        }

        println!("┌────────────────────────────────");
        for line in &lines {
            println!("│ {}", line);
        }
        println!("└────────────────────────────────");

        self.last = lines;
        Ok(())
    }
}
