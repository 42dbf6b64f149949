use log::warn;
use web_sys::Window;

/// Ratio that fits the logical game area into the viewport while keeping its
/// aspect. Degenerate inputs (zero, negative, NaN) fall back to `fallback`.
pub fn scale_ratio(viewport_w: f64, viewport_h: f64, game_w: f64, game_h: f64, fallback: f64) -> f64 {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !(usable(viewport_w) && usable(viewport_h) && usable(game_w) && usable(game_h)) {
        return fallback;
    }
    let ratio = if viewport_w / viewport_h < game_w / game_h {
        // narrower than the game: width bound
        viewport_w / game_w
    } else {
        viewport_h / game_h
    };
    if usable(ratio) { ratio } else { fallback }
}

/// Current viewport size: the smaller of the window's inner size and the
/// document element's client size, like the browser reports after zoom.
pub fn viewport_size(win: &Window) -> (f64, f64) {
    let inner_w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(f64::NAN);
    let inner_h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(f64::NAN);
    let (client_w, client_h) = win
        .document()
        .and_then(|d| d.document_element())
        .map(|el| (el.client_width() as f64, el.client_height() as f64))
        .unwrap_or((inner_w, inner_h));
    (inner_w.min(client_w), inner_h.min(client_h))
}

pub fn window_ratio(win: &Window, game_w: f64, game_h: f64, fallback: f64) -> f64 {
    let (w, h) = viewport_size(win);
    let ratio = scale_ratio(w, h, game_w, game_h, fallback);
    if ratio == fallback {
        warn!("viewport {w}x{h} unusable, scale ratio falls back to {fallback}");
    }
    ratio
}
