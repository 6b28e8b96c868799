// Browser tests: run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Reflect};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

const FAST_CONFIG: &str = r#"{"intro":{"tick_ms":10},"scene":{"star_count":0}}"#;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn html(doc: &Document, selector: &str) -> HtmlElement {
    doc.query_selector(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("missing {selector}"))
        .dyn_into()
        .unwrap()
}

fn state() -> Value {
    serde_json::from_str(&valentine_proposal::proposal_state_json().expect("page mounted")).unwrap()
}

// Replace window.confetti with a counter and reset it.
fn stub_confetti() {
    let win = web_sys::window().unwrap();
    let counter = Function::new_with_args("opts", "window.__confettiCalls = (window.__confettiCalls || 0) + 1;");
    Reflect::set(&win, &JsValue::from_str("confetti"), &counter).unwrap();
    Reflect::set(&win, &JsValue::from_str("__confettiCalls"), &JsValue::from(0)).unwrap();
}

fn confetti_calls() -> u32 {
    let win = web_sys::window().unwrap();
    Reflect::get(&win, &JsValue::from_str("__confettiCalls")).unwrap().as_f64().unwrap_or(0.0) as u32
}

fn move_pointer_to(el: &HtmlElement) {
    let r = el.get_bounding_client_rect();
    let init = MouseEventInit::new();
    init.set_client_x((r.left() + r.width() / 2.0) as i32);
    init.set_client_y((r.top() + r.height() / 2.0) as i32);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

async fn mount_past_intro() -> Document {
    stub_confetti();
    valentine_proposal::start_proposal_with_config(FAST_CONFIG).expect("mount");
    let doc = document();
    assert_eq!(state()["intro_phase"], "Warning");
    html(&doc, ".vp-overlay .vp-btn").click();
    assert_eq!(state()["intro_phase"], "Countdown");
    TimeoutFuture::new(200).await;
    assert_eq!(state()["intro_phase"], "Done");
    assert_eq!(state()["countdown_value"], 0);
    doc
}

#[wasm_bindgen_test]
fn mount_and_unmount() {
    valentine_proposal::start_proposal().expect("mount");
    let doc = document();
    assert!(doc.query_selector(".vp-overlay").unwrap().is_some());
    assert_eq!(doc.query_selector_all(".vp-star").unwrap().length(), 80);
    assert!(doc.get_element_by_id("vp-style").is_some());

    let json = valentine_proposal::proposal_state_json().expect("state while mounted");
    assert!(json.contains("\"intro_phase\":\"Warning\""));

    valentine_proposal::stop_proposal();
    assert!(doc.query_selector(".vp-page").unwrap().is_none());
    assert!(doc.get_element_by_id("vp-style").is_none());
    assert!(valentine_proposal::proposal_state_json().is_none());
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    assert!(valentine_proposal::start_proposal_with_config(r#"{"intro":{"tick_ms":0}}"#).is_err());
}

#[wasm_bindgen_test]
async fn pointer_dodges_until_accepted() {
    let doc = mount_past_intro().await;
    let no = html(&doc, ".vp-no");

    move_pointer_to(&no);
    assert_eq!(state()["rejection_attempts"], 1);
    assert!(state()["rejection_position"].is_object());

    html(&doc, ".vp-buttons .vp-primary").click();
    assert_eq!(state()["accepted"], true);
    assert_eq!(confetti_calls(), 1);

    // pointer listener is gone and acceptance does not fire twice
    move_pointer_to(&no);
    html(&doc, ".vp-buttons .vp-primary").click();
    assert_eq!(state()["rejection_attempts"], 1);
    assert_eq!(confetti_calls(), 1);

    valentine_proposal::stop_proposal();
}

#[wasm_bindgen_test]
async fn surrendered_no_becomes_yes() {
    let doc = mount_past_intro().await;
    let no = html(&doc, ".vp-no");
    for n in 1..=6 {
        no.click();
        assert_eq!(state()["rejection_attempts"], n);
    }
    assert_eq!(state()["surrendered"], true);
    assert_eq!(state()["accepted"], false);
    let merged = html(&doc, ".vp-buttons .vp-primary .vp-no.vp-merged");
    assert!(merged.is_same_node(Some(&no)));

    no.click();
    assert_eq!(state()["accepted"], true);
    assert_eq!(state()["rejection_attempts"], 6);
    assert_eq!(confetti_calls(), 1);

    valentine_proposal::stop_proposal();
}

#[wasm_bindgen_test]
async fn card_buttons_receive_the_pointer() {
    let doc = mount_past_intro().await;
    for selector in [".vp-buttons .vp-primary", ".vp-no"] {
        let button = html(&doc, selector);
        button.scroll_into_view();
        let r = button.get_bounding_client_rect();
        let hit = doc
            .element_from_point((r.left() + r.width() / 2.0) as f32, (r.top() + r.height() / 2.0) as f32)
            .expect("something under the button centre");
        assert!(button.contains(Some(&hit)), "{selector} is covered by another element");
    }
    valentine_proposal::stop_proposal();
}
