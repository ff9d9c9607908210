//! Model invocation: a process-wide ONNX plan loaded once at startup and
//! shared read-only across requests.

use std::path::Path;

use anyhow::bail;
use ndarray::Array4;
use tract_onnx::prelude::*;

use crate::error::PredictError;
use crate::models::ClassificationResult;
use crate::policy::CLASSES;
use crate::preprocess::IMAGE_SIZE;

/// Seam between the request handler and the inference runtime. Inference is
/// stateless per call, so implementations take `&self`.
pub trait Classify: Send + Sync {
    fn classify(&self, tensor: Array4<f32>) -> Result<ClassificationResult, PredictError>;
}

pub struct OnnxClassifier {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxClassifier {
    /// Load and optimize the model. Called once before the server starts
    /// accepting connections; failure here is fatal to the process.
    pub fn load(path: &Path) -> TractResult<Self> {
        let size = IMAGE_SIZE as i32;
        let model = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, size, size, 3)),
            )?
            .into_optimized()?;

        // Fail fast if the model disagrees with the fixed 2-class label list.
        if let Some(shape) = model.output_fact(0)?.shape.as_concrete() {
            let classes = shape.last().copied().unwrap_or(0);
            if classes != CLASSES.len() {
                bail!(
                    "model outputs {} classes, expected {}",
                    classes,
                    CLASSES.len()
                );
            }
        }

        let plan = model.into_runnable()?;
        Ok(Self { plan })
    }
}

impl Classify for OnnxClassifier {
    fn classify(&self, tensor: Array4<f32>) -> Result<ClassificationResult, PredictError> {
        let size = IMAGE_SIZE as usize;
        let data = tensor
            .as_slice()
            .ok_or_else(|| PredictError::Inference("non-contiguous input tensor".into()))?;
        let input = tract_ndarray::Array4::from_shape_vec((1, size, size, 3), data.to_vec())
            .map_err(|e| PredictError::Inference(e.to_string()))?
            .into_tensor();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| PredictError::Inference(e.to_string()))?;
        let probabilities = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| PredictError::Inference(e.to_string()))?;

        interpret_probabilities(&probabilities.iter().copied().collect::<Vec<_>>())
    }
}

/// Arg-max over the class probabilities. The first maximum wins on ties, so
/// equal probabilities resolve to the lowest index.
pub(crate) fn interpret_probabilities(
    probabilities: &[f32],
) -> Result<ClassificationResult, PredictError> {
    if probabilities.len() != CLASSES.len() {
        return Err(PredictError::Inference(format!(
            "expected {} class probabilities, got {}",
            CLASSES.len(),
            probabilities.len()
        )));
    }

    let mut index = 0;
    for (i, &p) in probabilities.iter().enumerate() {
        if p > probabilities[index] {
            index = i;
        }
    }

    Ok(ClassificationResult {
        label: CLASSES[index],
        confidence_score: probabilities[index] * 100.0,
    })
}
