//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::config::Fit;

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while maintaining
/// the source aspect ratio. One dimension will match exactly, the other may exceed.
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.max(1), h)
    } else {
        // Source is taller: width will match, height will exceed
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.max(1))
    }
}

/// Calculate the largest dimensions that fit inside a target area.
///
/// Maintains the source aspect ratio. One dimension will match exactly, the
/// other may fall short.
pub fn calculate_fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let scale = (tgt_w as f64 / src_w as f64).min(tgt_h as f64 / src_h as f64);
    let w = (src_w as f64 * scale).round() as u32;
    let h = (src_h as f64 * scale).round() as u32;
    (w.clamp(1, tgt_w), h.clamp(1, tgt_h))
}

/// How a source image is turned into an output of a given fit.
///
/// The source is first scaled to `resize`, then placed centered on a canvas
/// of size `canvas`: cropped where the canvas is smaller, padded where larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitPlan {
    pub resize: (u32, u32),
    pub canvas: (u32, u32),
}

/// Plan how `source` is fitted into `target` under the given strategy.
pub fn plan_fit(source: (u32, u32), target: (u32, u32), fit: Fit) -> FitPlan {
    match fit {
        Fit::Cover => FitPlan {
            resize: calculate_fill_dimensions(source, target),
            canvas: target,
        },
        Fit::Contain => FitPlan {
            resize: calculate_fit_dimensions(source, target),
            canvas: target,
        },
        Fit::Fill => FitPlan {
            resize: target,
            canvas: target,
        },
        Fit::Inside => {
            let dims = calculate_fit_dimensions(source, target);
            FitPlan {
                resize: dims,
                canvas: dims,
            }
        }
        Fit::Outside => {
            let dims = calculate_fill_dimensions(source, target);
            FitPlan {
                resize: dims,
                canvas: dims,
            }
        }
    }
}

/// Target box for the large rendition, or `None` if no resize is needed.
///
/// Only images with a side above `max_size` are resized. The box is clamped
/// to the source on each axis so no fit strategy can enlarge the image.
pub fn calculate_large_bounds(source: (u32, u32), max_size: u32) -> Option<(u32, u32)> {
    let (w, h) = source;
    if w <= max_size && h <= max_size {
        return None;
    }
    Some((w.min(max_size), h.min(max_size)))
}

/// Offset that centers a `inner`-sized span inside an `outer`-sized one.
///
/// Negative when `inner` is larger (the overflow is cropped evenly).
pub fn center_offset(outer: u32, inner: u32) -> i64 {
    (outer as i64 - inner as i64) / 2
}
