use crate::image_classifier::interface::{
    ClassificationError, ImageClassifier, ImageClassifierLoader, ModelLoadError, Prediction,
};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::{Arc, RwLock};

/// Owns the loaded model for the lifetime of the process.
pub struct ModelGateway {
    loader: Arc<dyn ImageClassifierLoader + Send + Sync>,
    handle: RwLock<Option<Arc<dyn ImageClassifier + Send + Sync>>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ModelGateway {
    pub fn new(
        loader: Arc<dyn ImageClassifierLoader + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            loader,
            handle: RwLock::new(None),
            logger: logger.with_namespace("model_gateway"),
        }
    }

    pub fn load(&self) -> Result<(), ModelLoadError> {
        let _ = self.logger.info("Loading model...");

        let classifier = self.loader.load()?;

        let mut handle = self
            .handle
            .write()
            .map_err(|_| ModelLoadError::Model("model handle lock poisoned".to_string()))?;

        if handle.is_some() {
            let _ = self.logger.info("Replacing previously loaded model");
        }
        *handle = Some(classifier);

        let _ = self.logger.info("Model loaded");
        Ok(())
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.handle.read().map(|h| h.is_some()).unwrap_or(false)
    }

    /// Predictions come back ranked by descending confidence.
    pub fn classify(&self, image: &DynamicImage) -> Result<Vec<Prediction>, ClassificationError> {
        let classifier = self
            .handle
            .read()
            .ok()
            .and_then(|handle| handle.clone())
            .ok_or(ClassificationError::NotLoaded)?;

        let mut predictions = classifier.classify(image)?;
        predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        Ok(predictions)
    }
}
