use mask_base::{init_file_logger, init_stdout_logger, log, log_fatal};
use mask_image::decode_frame;
use mask_infer::{
    Backend, ClassifierConfig, Device, MaskClassifier, ModelSource, backends::OnnxBackend,
    create_registry,
};
use std::{env, path::PathBuf};

fn init_logging() {
    match env::var("MASK_LOG_DIR") {
        Ok(dir) => {
            if let Err(e) = init_file_logger(&dir) {
                init_stdout_logger();
                log::warn!("Cannot log to {}: {}; using stdout", dir, e);
            }
        }
        Err(_) => init_stdout_logger(),
    }
}

fn cuda_device() -> Option<Device> {
    let id = env::var("MASK_CUDA_DEVICE").ok()?;
    match id.parse() {
        Ok(device_id) => Some(Device::Cuda { device_id }),
        Err(_) => log_fatal!("MASK_CUDA_DEVICE must be an integer, got {:?}", id),
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        log_fatal!("Usage: mask-check <image>...");
    }

    let model_path: PathBuf = env::var("MASK_MODEL_PATH")
        .unwrap_or_else(|_| "models/mask_unquant.onnx".to_string())
        .into();
    log::info!("Model: {}", model_path.display());

    let config = ClassifierConfig::default();
    let registry = create_registry();
    let cuda_backend = cuda_device().map(OnnxBackend::new);
    let backend: &dyn Backend = match &cuda_backend {
        Some(backend) => backend,
        None => match registry.require("onnx") {
            Ok(backend) => backend,
            Err(e) => log_fatal!("{}", e),
        },
    };

    let mut classifier =
        match MaskClassifier::new(backend, ModelSource::File(model_path), config.clone()) {
            Ok(classifier) => classifier,
            Err(e) => log_fatal!("Failed to create mask classifier: {}", e),
        };

    for path in &paths {
        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(e) => {
                log::error!("{}: {}", path, e);
                continue;
            }
        };
        let frame = match decode_frame(&data).await {
            Ok(frame) => frame.scale_to(config.image_size()),
            Err(e) => {
                log::error!("{}: {}", path, e);
                continue;
            }
        };
        match classifier.classify(&frame) {
            Ok(result) => log::info!(
                "{}: {} (mask {:.4}, no mask {:.4}) in {}",
                path,
                classifier.verdict(),
                classifier.prob_mask(),
                classifier.prob_non_mask(),
                result
            ),
            Err(e) => log::error!("{}: {}", path, e),
        }
    }

    if let Err(e) = classifier.close() {
        log::warn!("{}", e);
    }
}
