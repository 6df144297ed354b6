//! Browser adapter: binds a [`GlassController`] to a DOM element.
//!
//! [`GlassElement::connect`] attaches an open shadow root, translates DOM signals (attribute
//! mutations, pointer events, window resize, content mutations, element resize, animation
//! frames) into [`ControllerEvent`]s and applies the resulting styles to the surface.

mod probe;

pub use probe::BrowserProbe;

use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use tracing::warn;
use wasm_bindgen::{JsCast as _, JsValue, closure::Closure};
use web_sys::{
    EventTarget, HtmlElement, MutationObserver, MutationObserverInit, MutationRecord,
    ResizeObserver, ShadowRoot, ShadowRootInit, ShadowRootMode,
};

use crate::{
    capability::{cache::CapabilityCache, provider::HeuristicByEnvironmentTag},
    controller::{
        GlassController,
        host::{ControllerEvent, GlassHost, Listener},
    },
    foundation::core::Size,
    style::template::SURFACE_CLASS,
};

static BROWSER_CAPABILITY: HeuristicByEnvironmentTag<BrowserProbe> =
    HeuristicByEnvironmentTag::new(BrowserProbe);

/// A glass effect bound to one host element. Dropping it detaches the effect.
pub struct GlassElement {
    inner: Rc<RefCell<Inner>>,
    _attribute_observer: Registration,
}

struct Inner {
    controller: GlassController<'static>,
    host: WebHost,
}

impl GlassElement {
    /// Attaches the effect to `element`, reusing an existing open shadow root.
    pub fn connect(element: HtmlElement) -> Result<Self, JsValue> {
        let shadow = match element.shadow_root() {
            Some(shadow) => shadow,
            None => element.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))?,
        };
        let controller = GlassController::new(
            element_attributes(&element),
            CapabilityCache::global(),
            &BROWSER_CAPABILITY,
        );

        let inner = Rc::new_cyclic(|this: &Weak<RefCell<Inner>>| {
            RefCell::new(Inner {
                controller,
                host: WebHost {
                    element: element.clone(),
                    shadow,
                    surface: None,
                    this: this.clone(),
                    registrations: Vec::new(),
                },
            })
        });

        let attribute_observer = observe_attributes(&element, Rc::downgrade(&inner))?;
        dispatch(&Rc::downgrade(&inner), ControllerEvent::Attach);

        Ok(Self {
            inner,
            _attribute_observer: attribute_observer,
        })
    }

    /// Releases every listener; the element keeps its last styles.
    pub fn disconnect(&self) {
        dispatch(&Rc::downgrade(&self.inner), ControllerEvent::Detach);
    }
}

impl Drop for GlassElement {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl core::fmt::Debug for GlassElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.inner.try_borrow().map(|i| i.controller.state()).ok();
        f.debug_struct("GlassElement")
            .field("state", &state)
            .finish()
    }
}

fn dispatch(this: &Weak<RefCell<Inner>>, event: ControllerEvent) {
    let Some(inner) = this.upgrade() else {
        return;
    };
    let Ok(mut guard) = inner.try_borrow_mut() else {
        warn!(?event, "glass element busy, dropping event");
        return;
    };
    let Inner { controller, host } = &mut *guard;
    controller.handle(event, host);
}

fn element_attributes(element: &HtmlElement) -> BTreeMap<String, String> {
    element
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| element.get_attribute(&name).map(|value| (name, value)))
        .collect()
}

fn observe_attributes(
    element: &HtmlElement,
    this: Weak<RefCell<Inner>>,
) -> Result<Registration, JsValue> {
    let target = element.clone();
    let closure = Closure::<dyn FnMut(js_sys::Array)>::new(move |records: js_sys::Array| {
        for record in records.iter() {
            let Ok(record) = record.dyn_into::<MutationRecord>() else {
                continue;
            };
            let Some(name) = record.attribute_name() else {
                continue;
            };
            let value = target.get_attribute(&name);
            dispatch(&this, ControllerEvent::AttributeChanged { name, value });
        }
    });
    let observer = MutationObserver::new(closure.as_ref().unchecked_ref())?;
    let init = MutationObserverInit::new();
    init.set_attributes(true);
    observer.observe_with_options(element, &init)?;
    Ok(Registration::Mutation {
        observer,
        _closure: closure,
    })
}

/// A live DOM subscription; dropping it unsubscribes.
enum Registration {
    Event {
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut()>,
    },
    Mutation {
        observer: MutationObserver,
        _closure: Closure<dyn FnMut(js_sys::Array)>,
    },
    Resize {
        observer: ResizeObserver,
        _closure: Closure<dyn FnMut()>,
    },
}

impl Drop for Registration {
    fn drop(&mut self) {
        match self {
            Self::Event {
                target,
                kind,
                closure,
            } => {
                let _ = target.remove_event_listener_with_callback(
                    kind,
                    closure.as_ref().unchecked_ref(),
                );
            }
            Self::Mutation { observer, .. } => observer.disconnect(),
            Self::Resize { observer, .. } => observer.disconnect(),
        }
    }
}

struct WebHost {
    element: HtmlElement,
    shadow: ShadowRoot,
    surface: Option<HtmlElement>,
    this: Weak<RefCell<Inner>>,
    registrations: Vec<(Listener, Registration)>,
}

impl WebHost {
    fn callback(&self, event: ControllerEvent) -> Closure<dyn FnMut()> {
        let this = self.this.clone();
        Closure::<dyn FnMut()>::new(move || dispatch(&this, event.clone()))
    }

    fn one_shot(&self, event: ControllerEvent) -> JsValue {
        let this = self.this.clone();
        Closure::once_into_js(move || dispatch(&this, event))
    }

    fn add_event(
        &self,
        target: EventTarget,
        kind: &'static str,
        event: ControllerEvent,
    ) -> Option<Registration> {
        let closure = self.callback(event);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Registration::Event {
            target,
            kind,
            closure,
        })
    }

    fn registrations_for(&self, listener: Listener) -> Vec<Registration> {
        let window = web_sys::window();
        match listener {
            Listener::SurfacePointer => {
                let target: EventTarget = self.element.clone().into();
                [
                    ("pointerdown", ControllerEvent::PointerDown),
                    ("pointerup", ControllerEvent::PointerUp),
                    ("pointerleave", ControllerEvent::PointerLeave),
                ]
                .into_iter()
                .filter_map(|(kind, event)| self.add_event(target.clone(), kind, event))
                .collect()
            }
            Listener::GlobalPointerUp => window
                .and_then(|w| w.document())
                .and_then(|doc| {
                    self.add_event(doc.into(), "pointerup", ControllerEvent::GlobalPointerUp)
                })
                .into_iter()
                .collect(),
            Listener::WindowResize => window
                .and_then(|w| self.add_event(w.into(), "resize", ControllerEvent::WindowResize))
                .into_iter()
                .collect(),
            Listener::ContentMutation => {
                let this = self.this.clone();
                let closure = Closure::<dyn FnMut(js_sys::Array)>::new(move |_: js_sys::Array| {
                    dispatch(&this, ControllerEvent::ContentMutated)
                });
                let Ok(observer) = MutationObserver::new(closure.as_ref().unchecked_ref()) else {
                    return Vec::new();
                };
                let init = MutationObserverInit::new();
                init.set_child_list(true);
                init.set_subtree(true);
                init.set_character_data(true);
                if observer.observe_with_options(&self.element, &init).is_err() {
                    return Vec::new();
                }
                vec![Registration::Mutation {
                    observer,
                    _closure: closure,
                }]
            }
            Listener::SurfaceResize => {
                let closure = self.callback(ControllerEvent::ElementResized);
                let Ok(observer) = ResizeObserver::new(closure.as_ref().unchecked_ref()) else {
                    return Vec::new();
                };
                if let Some(surface) = &self.surface {
                    observer.observe(surface);
                }
                vec![Registration::Resize {
                    observer,
                    _closure: closure,
                }]
            }
        }
    }
}

impl GlassHost for WebHost {
    fn install_template(&mut self, markup: &str) {
        self.shadow.set_inner_html(markup);
        self.surface = self
            .shadow
            .query_selector(&format!(".{SURFACE_CLASS}"))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        for (_, registration) in &self.registrations {
            if let (Registration::Resize { observer, .. }, Some(surface)) =
                (registration, &self.surface)
            {
                observer.disconnect();
                observer.observe(surface);
            }
        }
    }

    fn apply_style(&mut self, property: &str, value: &str) {
        if let Some(surface) = &self.surface {
            let _ = surface.style().set_property(property, value);
        }
    }

    fn force_layout(&mut self) {
        if let Some(surface) = &self.surface {
            let _ = surface.offset_width();
            let _ = surface.offset_height();
        }
    }

    fn measure_host(&mut self) -> Size {
        let rect = self.element.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }

    fn measure_surface(&mut self) -> Size {
        self.surface.as_ref().map_or(Size::ZERO, |surface| {
            let rect = surface.get_bounding_client_rect();
            Size::new(rect.width(), rect.height())
        })
    }

    fn viewport_width(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let _ = self.element.set_attribute(name, value);
    }

    fn request_animation_frame(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = self.one_shot(ControllerEvent::AnimationFrame);
        if window
            .request_animation_frame(callback.unchecked_ref())
            .is_err()
        {
            warn!("requestAnimationFrame rejected");
        }
    }

    fn request_idle_tick(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = self.one_shot(ControllerEvent::IdleTick);
        if window
            .set_timeout_with_callback(callback.unchecked_ref())
            .is_err()
        {
            warn!("setTimeout rejected");
        }
    }

    fn listen(&mut self, listener: Listener) {
        let registrations = self.registrations_for(listener);
        self.registrations
            .extend(registrations.into_iter().map(|r| (listener, r)));
    }

    fn unlisten(&mut self, listener: Listener) {
        self.registrations.retain(|(l, _)| *l != listener);
    }
}
