use crate::image_classifier::interface::{
    ClassificationError, ImageClassifier, ImageClassifierLoader, ModelLoadError, Prediction,
};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

const OBJECTS: [&str; 18] = [
    "dog", "cat", "person", "car", "chair", "table", "bird", "tree", "bicycle", "book", "laptop",
    "phone", "cup", "bottle", "keyboard", "mouse", "plant", "clock",
];

#[derive(Clone, Debug)]
enum Behavior {
    Random,
    Scripted(Vec<Prediction>),
    Failing(String),
}

#[derive(Clone)]
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    behavior: Behavior,
    load_error: Option<String>,
}

impl ImageClassifierFake {
    /// Three distinct random labels with confidences summing to one.
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            behavior: Behavior::Random,
            load_error: None,
        }
    }

    pub fn with_predictions(
        logger: Arc<dyn Logger + Send + Sync>,
        predictions: Vec<Prediction>,
    ) -> Self {
        Self {
            behavior: Behavior::Scripted(predictions),
            ..Self::new(logger)
        }
    }

    pub fn failing(logger: Arc<dyn Logger + Send + Sync>, message: &str) -> Self {
        Self {
            behavior: Behavior::Failing(message.to_string()),
            ..Self::new(logger)
        }
    }

    pub fn with_load_error(mut self, message: &str) -> Self {
        self.load_error = Some(message.to_string());
        self
    }

    fn random_predictions(&self) -> Result<Vec<Prediction>, ClassificationError> {
        let mut rng = rand::rng();

        let picked = rand::seq::index::sample(&mut rng, OBJECTS.len(), 3);

        let confidence_dist = Uniform::new(0.0f32, 1.0)
            .map_err(|e| ClassificationError::Inference(e.to_string()))?;

        let weights: Vec<f32> = picked
            .iter()
            .map(|_| confidence_dist.sample(&mut rng))
            .collect();
        let total = weights.iter().sum::<f32>().max(f32::EPSILON);

        Ok(picked
            .iter()
            .zip(weights)
            .map(|(index, weight)| Prediction::new(OBJECTS[index], weight / total))
            .collect())
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Prediction>, ClassificationError> {
        let _ = self.logger.info(&format!(
            "Classifying {}x{} image with fake classifier...",
            image.width(),
            image.height()
        ));

        match &self.behavior {
            Behavior::Random => self.random_predictions(),
            Behavior::Scripted(predictions) => Ok(predictions.clone()),
            Behavior::Failing(message) => Err(ClassificationError::Inference(message.clone())),
        }
    }
}

impl ImageClassifierLoader for ImageClassifierFake {
    fn load(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>, ModelLoadError> {
        let _ = self.logger.info("Loading fake model...");

        match &self.load_error {
            Some(message) => Err(ModelLoadError::Model(message.clone())),
            None => Ok(Arc::new(self.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;

    #[test]
    fn test_random_predictions_are_distinct_and_normalized() {
        let logger = Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()));
        let fake = ImageClassifierFake::new(logger);

        let predictions = fake.classify(&DynamicImage::new_rgb8(4, 4)).unwrap();

        assert_eq!(predictions.len(), 3);
        assert_ne!(predictions[0].label, predictions[1].label);
        assert_ne!(predictions[1].label, predictions[2].label);
        assert_ne!(predictions[0].label, predictions[2].label);
        let total: f32 = predictions.iter().map(|p| p.confidence).sum();
        assert!((total - 1.0).abs() < 1e-4);
        assert!(predictions
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.confidence)));
    }
}
