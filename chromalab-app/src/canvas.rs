//! Fitting images into the side-by-side canvases.

/// Scale factor for drawing an `image`-sized picture inside `canvas`.
///
/// Never enlarges beyond the canvas, and normally not beyond 1:1. Pictures
/// that would cover less than half the canvas in either direction are
/// blown up to at least 2x, still capped by the canvas.
pub fn fit_scale(image: [f32; 2], canvas: [f32; 2]) -> f32 {
    let [iw, ih] = image;
    let [cw, ch] = canvas;
    if iw <= 0.0 || ih <= 0.0 {
        return 1.0;
    }
    let fit = (cw / iw).min(ch / ih).max(0.0);
    let mut scale = fit.min(1.0);
    if iw * scale < cw * 0.5 || ih * scale < ch * 0.5 {
        scale = scale.max(2.0).min(fit);
    }
    scale
}

/// Drawn size in whole pixels, at least 1x1.
pub fn fitted_size(image: [f32; 2], canvas: [f32; 2]) -> [f32; 2] {
    let scale = fit_scale(image, canvas);
    [
        (image[0] * scale).floor().max(1.0),
        (image[1] * scale).floor().max(1.0),
    ]
}
