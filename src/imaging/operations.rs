//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take a target, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_long_edge_dimensions;
use super::params::{Quality, ResizeParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Plan a long-edge resize without executing it.
pub fn plan_long_edge_resize(
    source: &Path,
    output: &Path,
    original_dims: (u32, u32),
    long_edge: u32,
    quality: Quality,
) -> ResizeParams {
    let (width, height) = calculate_long_edge_dimensions(original_dims, long_edge);
    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality,
    }
}

/// Resize `source` so its long edge equals `long_edge` and write a JPEG to `output`.
///
/// Returns the dimensions that were written.
pub fn resize_to_long_edge(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    long_edge: u32,
    quality: Quality,
) -> Result<(u32, u32)> {
    let original = get_dimensions(backend, source)?;
    let params = plan_long_edge_resize(source, output, original, long_edge, quality);
    backend.resize(&params)?;
    Ok((params.width, params.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 1920,
            height: 1080,
        }]);

        let dims = get_dimensions(&backend, Path::new("/test.jpg")).unwrap();
        assert_eq!(dims, (1920, 1080));
    }

    #[test]
    fn plan_resize_landscape() {
        let params = plan_long_edge_resize(
            Path::new("/in.jpg"),
            Path::new("/out/in-1.jpeg"),
            (3000, 2000),
            2500,
            Quality::default(),
        );
        assert_eq!((params.width, params.height), (2500, 1667));
        assert_eq!(params.quality.value(), 90);
    }

    #[test]
    fn plan_resize_portrait() {
        let params = plan_long_edge_resize(
            Path::new("/in.jpg"),
            Path::new("/out/in-1.jpeg"),
            (2000, 3000),
            2500,
            Quality::default(),
        );
        assert_eq!((params.width, params.height), (1667, 2500));
    }

    #[test]
    fn resize_identifies_then_resizes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("photo-1.jpeg");
        let backend = MockBackend::with_sizes(
            Dimensions {
                width: 3000,
                height: 2000,
            },
            vec![10],
        );

        let written = resize_to_long_edge(
            &backend,
            Path::new("/photo.jpg"),
            &output,
            2500,
            Quality::new(85),
        )
        .unwrap();
        assert_eq!(written, (2500, 1667));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/photo.jpg"));
        assert!(matches!(
            &ops[1],
            RecordedOp::Resize {
                width: 2500,
                height: 1667,
                quality: 85,
                ..
            }
        ));
    }

    #[test]
    fn resize_propagates_identify_failure() {
        let backend = MockBackend::new();
        let result = resize_to_long_edge(
            &backend,
            Path::new("/missing.jpg"),
            Path::new("/out.jpeg"),
            2500,
            Quality::default(),
        );
        assert!(result.is_err());
        assert_eq!(backend.get_operations().len(), 1);
    }
}
