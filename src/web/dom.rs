use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::game::GameObserver;
use crate::game::prize::{PRIZE_THRESHOLDS, PrizeTier};

pub const PROGRESS_BAR_ID: &str = "myBar";

fn html_element(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn set_style(doc: &Document, id: &str, property: &str, value: &str) {
    if let Some(el) = html_element(doc, id) {
        el.style().set_property(property, value).ok();
    }
}

/// Shows the prize panel for the final score; hides every panel when a new
/// run starts. Pages without the panels simply get nothing.
pub struct DomObserver {
    doc: Document,
}

impl DomObserver {
    pub fn new(doc: Document) -> Self {
        Self { doc }
    }
}

impl GameObserver for DomObserver {
    fn on_run_started(&mut self) {
        for (_, tier) in PRIZE_THRESHOLDS {
            set_style(&self.doc, &tier.panel_id(), "display", "none");
        }
    }

    fn on_game_over(&mut self, final_score: f64, tier: Option<PrizeTier>) {
        if let Some(tier) = tier {
            debug!("showing prize panel {} for {final_score:.0}", tier.number());
            set_style(&self.doc, &tier.panel_id(), "display", "block");
        }
    }
}

/// Paint the progress bar at `percent` width.
pub fn paint_progress(doc: &Document, percent: f64) {
    set_style(doc, PROGRESS_BAR_ID, "width", &format!("{percent}%"));
    set_style(doc, PROGRESS_BAR_ID, "opacity", "1");
}
