// DOM construction and view updates for the proposal page.
// All styling lives in one injected stylesheet; per-state changes only flip
// classes, display and the rejection control's inline position.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::ProposalConfig;
use crate::engine::{InteractionState, IntroPhase, Motion, Point, Rect, Size};
use crate::error::ProposalError;

const STYLE_ID: &str = "vp-style";

const STYLESHEET: &str = r#"
@keyframes vp-twinkle { 0%,100% { opacity: 0.8; } 50% { opacity: 0.2; } }
@keyframes vp-fade-in { from { opacity: 0; } to { opacity: 1; } }
@keyframes vp-glow { 0% { transform: scale(0.85); text-shadow: 0 0 10px #fff; } 50% { transform: scale(1); text-shadow: 0 0 40px #ffd700; } 100% { transform: scale(0.85); text-shadow: 0 0 10px #fff; } }
.vp-page { min-height: 100vh; background: radial-gradient(circle at bottom, #0b0f2a 0%, #000 100%); display: flex; justify-content: center; align-items: center; font-family: "Poppins", sans-serif; color: white; position: relative; overflow: hidden; padding: 20px; box-sizing: border-box; }
.vp-star { position: absolute; width: 2px; height: 2px; background: white; animation-name: vp-twinkle; animation-iteration-count: infinite; }
.vp-moon { position: absolute; top: 60px; right: 60px; width: 120px; height: 120px; background: radial-gradient(circle, #ffffff 40%, #ddd 70%); border-radius: 50%; box-shadow: 0 0 60px #ffffff; }
@media (max-width: 600px) { .vp-moon { width: 90px; height: 90px; top: 40px; right: 30px; } }
.vp-card { width: 100%; max-width: 420px; border-radius: 24px; padding: 30px; text-align: center; z-index: 2; position: relative; overflow: hidden; background: rgba(10, 15, 40, 0.35); backdrop-filter: blur(6px); animation: vp-fade-in 0.6s ease; box-sizing: border-box; }
.vp-card::before { content: ""; position: absolute; inset: 0; background: var(--vp-card-image) center 35% / cover no-repeat; opacity: 0.8; z-index: -1; pointer-events: none; transition: background 0.4s ease; }
.vp-card.vp-accepted::before { background-image: var(--vp-accepted-image); }
.vp-title { font-size: 2.4rem; margin-bottom: 18px; font-weight: 700; letter-spacing: 1px; color: #ff6fa5; text-shadow: 0 0 8px rgba(255,111,165,0.7), 0 0 18px rgba(255,111,165,0.5); }
.vp-text { font-size: 1.05rem; margin-bottom: 20px; color: #fff; text-shadow: 0 2px 6px rgba(0,0,0,0.7); }
.vp-message { color: #ffd700; font-weight: bold; }
.vp-love { font-size: 1.15rem; line-height: 1.8; margin: 10px 0 25px; font-weight: 500; text-shadow: 0 2px 8px rgba(0,0,0,0.6); }
.vp-forever { margin-top: 30px; font-size: 1.4rem; letter-spacing: 1px; font-weight: 600; color: #ffb3d9; text-shadow: 0 0 10px rgba(157,55,70,0.6); animation: vp-glow 2s infinite; }
.vp-buttons { display: flex; justify-content: center; gap: 15px; }
.vp-btn { padding: 10px 22px; border-radius: 25px; border: none; font-weight: 600; font-size: 0.9rem; cursor: pointer; background: white; color: #ff2e63; }
.vp-primary { background: #ff2e63; color: white; }
.vp-no.vp-merged { position: static; margin-left: 8px; padding: 2px 8px; font-size: 0.7rem; }
.vp-overlay { position: fixed; inset: 0; background: black; display: flex; justify-content: center; align-items: center; z-index: 100; text-align: center; }
.vp-count { font-size: 3rem; }
.vp-credit { position: fixed; bottom: 15px; right: 20px; font-size: 0.75rem; letter-spacing: 1px; color: rgba(255,182,193,0.7); text-shadow: 0 0 8px rgba(255,105,180,0.4); z-index: 200; }
"#;

pub(crate) fn element(doc: &Document, tag: &str, class: &str) -> Result<HtmlElement, ProposalError> {
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.dyn_into::<HtmlElement>()
        .map_err(|_| ProposalError::Dom(format!("<{tag}> is not an HTML element")))
}

fn text_element(doc: &Document, tag: &str, class: &str, text: &str) -> Result<HtmlElement, ProposalError> {
    let el = element(doc, tag, class)?;
    el.set_text_content(Some(text));
    Ok(el)
}

fn show(el: &HtmlElement, visible: bool) {
    let style = el.style();
    if visible {
        style.remove_property("display").ok();
    } else {
        style.set_property("display", "none").ok();
    }
}

fn ensure_stylesheet(doc: &Document) -> Result<(), ProposalError> {
    if doc.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(STYLESHEET));
    match doc.head() {
        Some(head) => head.append_child(&style)?,
        None => doc
            .body()
            .ok_or_else(|| ProposalError::NoMountPoint("document has neither head nor body".to_string()))?
            .append_child(&style)?,
    };
    Ok(())
}

/// Handles to every element the page updates after mount.
pub(crate) struct View {
    pub page: HtmlElement,
    overlay: HtmlElement,
    warning: HtmlElement,
    countdown: HtmlElement,
    countdown_value: HtmlElement,
    pub ready_button: HtmlElement,
    card: HtmlElement,
    question: HtmlElement,
    message: HtmlElement,
    pub yes_button: HtmlElement,
    pub no_button: HtmlElement,
    forever: HtmlElement,
}

impl View {
    pub fn build(doc: &Document, root: &Element, config: &ProposalConfig) -> Result<Self, ProposalError> {
        ensure_stylesheet(doc)?;
        let copy = &config.copy;

        let page = element(doc, "div", "vp-page")?;

        // Intro overlay
        let overlay = element(doc, "div", "vp-overlay")?;
        let warning = element(doc, "div", "")?;
        let el = text_element(doc, "h2", "", &copy.warning_title)?;
        warning.append_child(&el)?;
        let el = text_element(doc, "p", "", &copy.warning_text)?;
        warning.append_child(&el)?;
        let ready_button = text_element(doc, "button", "vp-btn vp-primary", &copy.ready_label)?;
        warning.append_child(&ready_button)?;
        let countdown = element(doc, "div", "")?;
        let el = text_element(doc, "h2", "", &copy.countdown_title)?;
        countdown.append_child(&el)?;
        let countdown_value = text_element(doc, "h1", "vp-count", &config.intro.countdown_from.to_string())?;
        countdown.append_child(&countdown_value)?;
        overlay.append_child(&warning)?;
        overlay.append_child(&countdown)?;

        // Card: question panel and terminal panel
        let card = element(doc, "div", "vp-card")?;
        let card_style = card.style();
        card_style.set_property("--vp-card-image", &format!("url({})", config.scene.card_image))?;
        card_style.set_property("--vp-accepted-image", &format!("url({})", config.scene.accepted_image))?;

        let question = element(doc, "div", "vp-panel")?;
        let el = text_element(doc, "h1", "vp-title", &copy.title)?;
        question.append_child(&el)?;
        let el = text_element(doc, "p", "vp-text", &copy.question)?;
        question.append_child(&el)?;
        let message = element(doc, "p", "vp-text vp-message")?;
        question.append_child(&message)?;
        let buttons = element(doc, "div", "vp-buttons vp-panel")?;
        let yes_button = text_element(doc, "button", "vp-btn vp-primary", &copy.yes_label)?;
        let no_button = text_element(doc, "button", "vp-btn vp-no", &copy.no_label)?;
        buttons.append_child(&yes_button)?;
        buttons.append_child(&no_button)?;
        question.append_child(&buttons)?;

        let forever = element(doc, "div", "vp-panel")?;
        let el = text_element(doc, "h1", "vp-title", &copy.forever_title)?;
        forever.append_child(&el)?;
        let el = text_element(doc, "p", "vp-love", &copy.forever_text)?;
        forever.append_child(&el)?;
        let el = text_element(doc, "h3", "vp-forever", &copy.forever_banner)?;
        forever.append_child(&el)?;

        card.append_child(&question)?;
        card.append_child(&forever)?;

        page.append_child(&overlay)?;
        page.append_child(&card)?;
        root.append_child(&page)?;

        Ok(Self {
            page,
            overlay,
            warning,
            countdown,
            countdown_value,
            ready_button,
            card,
            question,
            message,
            yes_button,
            no_button,
            forever,
        })
    }

    /// Bring the DOM in line with `state`.
    pub fn render(&self, state: &InteractionState) {
        let intro_done = state.intro_phase == IntroPhase::Done;
        show(&self.overlay, !intro_done);
        show(&self.warning, state.intro_phase == IntroPhase::Warning);
        show(&self.countdown, state.intro_phase == IntroPhase::Countdown);
        self.countdown_value.set_text_content(Some(&state.countdown_value.to_string()));

        show(&self.question, intro_done && !state.accepted);
        show(&self.forever, state.accepted);
        self.card.class_list().toggle_with_force("vp-accepted", state.accepted).ok();

        match state.escalation_message {
            Some(text) => {
                self.message.set_text_content(Some(text));
                show(&self.message, true);
            }
            None => show(&self.message, false),
        }

        if !state.surrendered {
            if let Some(pos) = state.rejection_position {
                self.place_rejection(pos);
            }
        }
    }

    fn place_rejection(&self, pos: Point) {
        let style = self.no_button.style();
        style.set_property("position", "absolute").ok();
        style.set_property("left", &format!("{:.1}px", pos.x)).ok();
        style.set_property("top", &format!("{:.1}px", pos.y)).ok();
    }

    /// Set the transition used by the next move of the rejection control.
    pub fn set_motion(&self, motion: Motion) {
        self.no_button.style().set_property("transition", &motion.transition_css()).ok();
    }

    pub fn set_rejection_visible(&self, visible: bool) {
        let value = if visible { "visible" } else { "hidden" };
        self.no_button.style().set_property("visibility", value).ok();
    }

    /// Park the rejection control inside the accept control as a small badge.
    pub fn merge_rejection(&self) -> Result<(), ProposalError> {
        let style = self.no_button.style();
        for prop in ["position", "left", "top", "transition", "visibility"] {
            style.remove_property(prop)?;
        }
        self.no_button.class_list().add_1("vp-merged")?;
        self.yes_button.append_child(&self.no_button)?;
        Ok(())
    }

    /// Viewport box of the rejection control; `None` while it is detached.
    pub fn rejection_rect(&self) -> Option<Rect> {
        if !self.no_button.is_connected() {
            return None;
        }
        let r = self.no_button.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }

    /// Size of the card the rejection control moves around in.
    pub fn container_size(&self) -> Option<Size> {
        if !self.card.is_connected() {
            return None;
        }
        let r = self.card.get_bounding_client_rect();
        Some(Size::new(r.width(), r.height()))
    }

    /// Remove the page and the injected stylesheet.
    pub fn remove(&self) {
        if let Some(style) = self.page.owner_document().and_then(|doc| doc.get_element_by_id(STYLE_ID)) {
            style.remove();
        }
        self.page.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(selector: &str) -> &'static str {
        STYLESHEET
            .lines()
            .find(|line| line.starts_with(selector) && line[selector.len()..].trim_start().starts_with('{'))
            .unwrap_or_else(|| panic!("no rule for {selector}"))
    }

    #[test]
    fn test_card_backdrop_stays_behind_content() {
        let backdrop = rule(".vp-card::before");
        assert!(backdrop.contains("z-index: -1"), "backdrop must paint under the card content");
        assert!(backdrop.contains("pointer-events: none"), "backdrop must not swallow clicks");
        // the card itself is the stacking context and the containing block
        let card = rule(".vp-card");
        assert!(card.contains("position: relative"));
        assert!(card.contains("z-index: 2"));
    }

    #[test]
    fn test_panels_stay_unpositioned() {
        // the absolute rejection control must resolve against the card
        assert!(!STYLESHEET.contains(".vp-card > *"));
        assert!(!rule(".vp-buttons").contains("position"));
    }
}
