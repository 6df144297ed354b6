use wasm_bindgen::JsCast as _;
use web_sys::{CssStyleDeclaration, HtmlElement};

use crate::capability::provider::EnvironmentProbe;

/// [`EnvironmentProbe`] backed by the live browser: `navigator.userAgent` plus a detached
/// scratch element whose `backdrop-filter` is assigned and read back.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserProbe;

fn scratch_style() -> Option<CssStyleDeclaration> {
    let document = web_sys::window()?.document()?;
    let el: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    Some(el.style())
}

/// Value the engine kept after assigning `backdrop-filter: value`; empty if it was rejected.
fn accepted_backdrop_filter(value: &str) -> Option<String> {
    let style = scratch_style()?;
    style.set_property("backdrop-filter", value).ok()?;
    style.get_property_value("backdrop-filter").ok()
}

impl EnvironmentProbe for BrowserProbe {
    fn supports_backdrop_blur(&self) -> bool {
        accepted_backdrop_filter("blur(1px)").is_some_and(|v| !v.is_empty())
    }

    fn user_agent(&self) -> Option<String> {
        web_sys::window()?.navigator().user_agent().ok()
    }

    fn accepts_backdrop_filter_url(&self) -> bool {
        accepted_backdrop_filter("url(#test)").is_some_and(|v| v.contains("url"))
    }
}
