use super::main::Identifier;
use crate::identifier::core::{Effect, Msg};

impl Identifier {
    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::LoadModel => {
                let loaded = self.model_gateway.load();
                if let Err(e) = &loaded {
                    let _ = self.logger.error(&format!("Model failed to load: {}", e));
                }
                self.send(Msg::ModelLoadDone(loaded));
            }
            Effect::Classify { tag, image } => {
                let result = self
                    .image_loader
                    .load(&image)
                    .and_then(|pixels| self.model_gateway.classify(&pixels));
                if let Err(e) = &result {
                    let _ = self
                        .logger
                        .error(&format!("Classifying {} failed: {}", image.describe(), e));
                }
                self.send(Msg::ClassifyDone { tag, result });
            }
            Effect::Lookup { tag, term } => {
                let result = self.lookup.search(&term);
                if let Err(e) = &result {
                    let _ = self
                        .logger
                        .error(&format!("Lookup for {:?} failed: {}", term, e));
                }
                self.send(Msg::LookupDone { tag, result });
            }
        }
    }
}
