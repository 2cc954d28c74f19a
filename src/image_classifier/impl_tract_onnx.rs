use crate::image_classifier::interface::{
    ClassificationError, ImageClassifier, ImageClassifierLoader, ModelLoadError, Prediction,
};
use crate::image_classifier::tract::image::resize_image_to_tensor;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

use super::models::model_config::ModelConfig;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

pub struct ImageClassifierTractOnnx {
    model: Plan,
    labels: Vec<String>,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig) -> Result<Self, ModelLoadError> {
        let labels = read_labels(&config.labels_path)?;

        std::fs::metadata(&config.onnx_model_path).map_err(|source| ModelLoadError::Io {
            path: config.onnx_model_path.clone(),
            source,
        })?;

        let model = load_plan(&config).map_err(|e| {
            ModelLoadError::Model(format!("{}: {}", config.onnx_model_path, e))
        })?;

        if let Some(outputs) = output_size(&model) {
            if outputs != labels.len() {
                return Err(ModelLoadError::LabelMismatch {
                    outputs,
                    labels: labels.len(),
                });
            }
        }

        Ok(Self {
            model,
            labels,
            config,
        })
    }
}

fn load_plan(config: &ModelConfig) -> TractResult<Plan> {
    let (height, width) = config.input_shape;

    tract_onnx::onnx()
        .model_for_path(&config.onnx_model_path)?
        .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
        .into_optimized()?
        .into_runnable()
}

fn output_size(model: &Plan) -> Option<usize> {
    let fact = model.model().output_fact(0).ok()?;
    fact.shape.as_concrete()?.last().copied()
}

fn read_labels(path: &str) -> Result<Vec<String>, ModelLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
        path: path.to_string(),
        source,
    })?;

    Ok(parse_labels(&contents))
}

fn parse_labels(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.iter().map(|e| e / total).collect()
}

pub(crate) fn top_k(probabilities: &[f32], labels: &[String], k: usize) -> Vec<Prediction> {
    let mut ranked: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);

    ranked
        .into_iter()
        .filter_map(|(index, confidence)| {
            labels.get(index).map(|label| Prediction {
                label: label.clone(),
                confidence,
            })
        })
        .collect()
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Prediction>, ClassificationError> {
        let (height, width) = self.config.input_shape;
        let input = resize_image_to_tensor(
            image,
            width,
            height,
            &self.config.mean,
            &self.config.std,
        )?;

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassificationError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| ClassificationError::Inference("model produced no output".to_string()))?;

        let scores: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| ClassificationError::Inference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        if scores.len() != self.labels.len() {
            return Err(ClassificationError::Inference(format!(
                "model produced {} scores for {} labels",
                scores.len(),
                self.labels.len()
            )));
        }

        let probabilities = if self.config.apply_softmax {
            softmax(&scores)
        } else {
            scores
        };

        Ok(top_k(&probabilities, &self.labels, self.config.top_k))
    }
}

pub struct ImageClassifierTractOnnxLoader {
    config: ModelConfig,
}

impl ImageClassifierTractOnnxLoader {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }
}

impl ImageClassifierLoader for ImageClassifierTractOnnxLoader {
    fn load(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>, ModelLoadError> {
        Ok(Arc::new(ImageClassifierTractOnnx::new(self.config.clone())?))
    }
}
