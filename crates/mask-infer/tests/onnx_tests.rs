#![cfg(feature = "onnx")]

use mask_base::Vec2;
use mask_image::Frame;
use mask_infer::backends::OnnxBackend;
use mask_infer::{
    Backend, ClassifierConfig, Device, InferError, MaskClassifier, ModelBytes, ModelSource,
};
use std::path::PathBuf;

#[test]
fn test_onnx_backend_name() {
    let backend = OnnxBackend::new(Device::Cpu);
    assert_eq!(backend.name(), "onnx");
    assert_eq!(backend.device(), Device::Cpu);
}

#[test]
fn test_first_two_takes_leading_scores() {
    use mask_infer::backends::onnx::first_two;

    let output = first_two([0.25, 0.75, 9.0].into_iter()).unwrap();
    assert_eq!(output, [[0.25, 0.75]]);
}

#[test]
fn test_first_two_rejects_short_output() {
    use mask_infer::backends::onnx::first_two;

    let result = first_two([0.5].into_iter());
    assert!(matches!(result, Err(InferError::Shape(_))));
}

#[test]
fn test_create_registry_includes_onnx() {
    use mask_infer::create_registry;

    let registry = create_registry();
    assert!(registry.list().contains(&"onnx"));
    assert!(registry.get("onnx").is_some());
    assert_eq!(registry.require("onnx").unwrap().name(), "onnx");
}

#[test]
fn test_registry_unknown_backend() {
    let registry = mask_infer::create_registry();
    let result = registry.require("tflite");
    assert!(matches!(result, Err(InferError::UnknownBackend(name)) if name == "tflite"));
}

#[test]
fn test_garbage_model_is_rejected() {
    let backend = OnnxBackend::new(Device::Cpu);
    let bytes = ModelBytes::load(ModelSource::Memory(b"definitely not onnx".to_vec())).unwrap();
    let result = backend.load_model(&bytes);
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
}

#[cfg(not(feature = "cuda"))]
#[test]
fn test_cuda_without_feature_is_unsupported() {
    let backend = OnnxBackend::new(Device::Cuda { device_id: 0 });
    let bytes = ModelBytes::load(ModelSource::Memory(vec![0; 4])).unwrap();
    let result = backend.load_model(&bytes);
    assert!(matches!(
        result,
        Err(InferError::UnsupportedDevice(Device::Cuda { device_id: 0 }))
    ));
}

fn model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/mask_unquant.onnx")
}

#[test]
fn test_classify_with_real_model() {
    let path = model_path();
    if !path.exists() {
        eprintln!("Skipping: model not found at {}", path.display());
        return;
    }

    let backend = OnnxBackend::new(Device::Cpu);
    let config = ClassifierConfig::default();
    let mut classifier =
        MaskClassifier::new(&backend, ModelSource::File(path), config.clone()).unwrap();

    let frame = Frame::filled(config.image_size(), 0xFF80_8080);
    let result = classifier.classify(&frame).unwrap();
    assert!(result.to_string().ends_with("ms"));
    assert!(classifier.prob_mask().is_finite());
    assert!(classifier.prob_non_mask().is_finite());

    // same frame, same scores
    let (mask, non_mask) = (classifier.prob_mask(), classifier.prob_non_mask());
    classifier.classify(&frame).unwrap();
    assert_eq!(classifier.prob_mask(), mask);
    assert_eq!(classifier.prob_non_mask(), non_mask);

    classifier.close().unwrap();
    let wrong = Frame::filled(Vec2::new(10, 10), 0);
    assert_eq!(
        classifier.classify(&wrong).unwrap().to_string(),
        "Uninitialized Classifier."
    );
}
