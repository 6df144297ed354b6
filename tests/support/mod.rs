#![allow(dead_code)]

use std::{
    cell::Cell,
    collections::{BTreeMap, VecDeque},
};

use liquid_glass::{CapabilityProvider, GlassHost, Listener, Size};

/// In-memory host that records everything a controller asks of it.
///
/// Measurements are served from queues; once a queue is drained the last value keeps being
/// returned.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub templates: Vec<String>,
    pub styles: BTreeMap<String, String>,
    pub style_log: Vec<(String, String)>,
    pub attributes: BTreeMap<String, String>,
    pub frames_requested: usize,
    pub idle_requested: usize,
    pub listening: Vec<Listener>,
    pub layout_flushes: usize,
    pub viewport: f64,
    host_sizes: VecDeque<Size>,
    surface_sizes: VecDeque<Size>,
    last_host: Size,
    last_surface: Size,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            viewport: 1280.0,
            ..Self::default()
        }
    }

    pub fn with_surface_sizes(mut self, sizes: &[(f64, f64)]) -> Self {
        self.surface_sizes
            .extend(sizes.iter().map(|&(w, h)| Size::new(w, h)));
        self
    }

    pub fn with_host_sizes(mut self, sizes: &[(f64, f64)]) -> Self {
        self.host_sizes
            .extend(sizes.iter().map(|&(w, h)| Size::new(w, h)));
        self
    }

    pub fn push_surface_size(&mut self, w: f64, h: f64) {
        self.surface_sizes.push_back(Size::new(w, h));
    }

    pub fn push_host_size(&mut self, w: f64, h: f64) {
        self.host_sizes.push_back(Size::new(w, h));
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listening.contains(&listener)
    }
}

impl GlassHost for ScriptedHost {
    fn install_template(&mut self, markup: &str) {
        self.templates.push(markup.to_string());
    }

    fn apply_style(&mut self, property: &str, value: &str) {
        self.styles.insert(property.to_string(), value.to_string());
        self.style_log
            .push((property.to_string(), value.to_string()));
    }

    fn force_layout(&mut self) {
        self.layout_flushes += 1;
    }

    fn measure_host(&mut self) -> Size {
        if let Some(size) = self.host_sizes.pop_front() {
            self.last_host = size;
        }
        self.last_host
    }

    fn measure_surface(&mut self) -> Size {
        if let Some(size) = self.surface_sizes.pop_front() {
            self.last_surface = size;
        }
        self.last_surface
    }

    fn viewport_width(&self) -> f64 {
        self.viewport
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn request_animation_frame(&mut self) {
        self.frames_requested += 1;
    }

    fn request_idle_tick(&mut self) {
        self.idle_requested += 1;
    }

    fn listen(&mut self, listener: Listener) {
        self.listening.push(listener);
    }

    fn unlisten(&mut self, listener: Listener) {
        self.listening.retain(|l| *l != listener);
    }
}

/// Provider that counts how often it is consulted.
#[derive(Debug)]
pub struct CountingProvider {
    pub answer: bool,
    pub calls: Cell<usize>,
}

impl CountingProvider {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            calls: Cell::new(0),
        }
    }
}

impl CapabilityProvider for CountingProvider {
    fn detect(&self) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.answer
    }
}

pub fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
