//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Which axis of an image is the long edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongEdge {
    Width,
    Height,
}

impl LongEdge {
    /// Width wins only when strictly larger; squares resize on height.
    pub fn of(dims: (u32, u32)) -> Self {
        if dims.0 > dims.1 {
            LongEdge::Width
        } else {
            LongEdge::Height
        }
    }
}

/// Calculate output dimensions so the long edge equals `target`.
///
/// The short edge is scaled by the same ratio and rounded, never below 1px.
/// Images smaller than `target` are enlarged.
///
/// # Examples
/// ```
/// # use downsize::imaging::calculate_long_edge_dimensions;
/// // 3000x2000 landscape → 2500x1667
/// assert_eq!(calculate_long_edge_dimensions((3000, 2000), 2500), (2500, 1667));
///
/// // 2000x3000 portrait → 1333x2000
/// assert_eq!(calculate_long_edge_dimensions((2000, 3000), 2000), (1333, 2000));
/// ```
pub fn calculate_long_edge_dimensions(original: (u32, u32), target: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;

    match LongEdge::of(original) {
        LongEdge::Width => {
            let ratio = target as f64 / orig_w as f64;
            (target, ((orig_h as f64 * ratio).round() as u32).max(1))
        }
        LongEdge::Height => {
            let ratio = target as f64 / orig_h as f64;
            (((orig_w as f64 * ratio).round() as u32).max(1), target)
        }
    }
}

/// Long-edge target for the next attempt, or `None` once the step would
/// take it below `floor`.
pub fn next_long_edge(current: u32, step: u32, floor: u32) -> Option<u32> {
    current
        .checked_sub(step)
        .filter(|&next| next >= floor && next > 0)
}

/// Convert a megabyte limit (MiB) to bytes.
///
/// A file is over the limit when its size is strictly greater than the
/// returned value.
pub fn mb_to_bytes(mb: f64) -> u64 {
    (mb * 1024.0 * 1024.0).floor() as u64
}
