//! Per-element state machine: capability, sizing, interaction and re-render triggers.

pub(crate) mod host;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    capability::{cache::CapabilityCache, provider::CapabilityProvider},
    config::{
        DEFAULT_BACKGROUND, GlassConfig,
        attributes::is_observed,
        responsive::{base_size, scaled_size},
    },
    controller::host::{ControllerEvent, GlassHost, Listener},
    foundation::core::GeometrySpec,
    sizing::{
        Measurement, SizingMode, fixed_geometry, measured_geometry, measurement_floor,
        retry::{RetryBudget, RetryPolicy},
    },
    style::{
        strategy::RenderStrategy,
        template::shadow_markup,
        visual::{FilterCache, VisualState, render_with, surface_size},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    /// Template installed, no geometry resolved yet.
    Mounted,
    Rendering {
        strategy: RenderStrategy,
        geometry: GeometrySpec,
    },
}

/// Drives one glass element.
///
/// The controller owns configuration, the sizing mode, the pressed flag and the listener set;
/// the host adapter owns the actual element. Every render recomputes from current state, so a
/// newer trigger simply supersedes an older one.
pub struct GlassController<'c> {
    attributes: BTreeMap<String, String>,
    config: GlassConfig,
    mode: SizingMode,
    state: ControllerState,
    capability_cache: &'c CapabilityCache,
    provider: &'c dyn CapabilityProvider,
    capability: Option<bool>,
    pressed: bool,
    filters: FilterCache,
    retry_policy: RetryPolicy,
    retries: RetryBudget,
    frame_pending: bool,
    idle_pending: bool,
    listeners: Vec<Listener>,
    template: Option<String>,
    /// Width/height last written to the host by responsive scaling. `attributes` keeps only
    /// what the element declared.
    responsive_size: Option<(u32, u32)>,
    visual: Option<VisualState>,
}

impl<'c> GlassController<'c> {
    pub fn new(
        attributes: BTreeMap<String, String>,
        capability_cache: &'c CapabilityCache,
        provider: &'c dyn CapabilityProvider,
    ) -> Self {
        let config = GlassConfig::from_attributes(&attributes);
        let mode = config.sizing_mode();
        Self {
            attributes,
            config,
            mode,
            state: ControllerState::Uninitialized,
            capability_cache,
            provider,
            capability: None,
            pressed: false,
            filters: FilterCache::default(),
            retry_policy: RetryPolicy::default(),
            retries: RetryBudget::default(),
            frame_pending: false,
            idle_pending: false,
            listeners: Vec::new(),
            template: None,
            responsive_size: None,
            visual: None,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn config(&self) -> &GlassConfig {
        &self.config
    }

    pub fn sizing_mode(&self) -> SizingMode {
        self.mode
    }

    /// Capability observed at attach; `None` before the first attach.
    pub fn capability(&self) -> Option<bool> {
        self.capability
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Styles applied by the most recent render pass.
    pub fn visual_state(&self) -> Option<&VisualState> {
        self.visual.as_ref()
    }

    /// Listeners currently registered with the host.
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Number of displacement map / filter builds performed so far.
    pub fn filter_builds(&self) -> usize {
        self.filters.builds()
    }

    #[tracing::instrument(level = "debug", skip(self, host))]
    pub fn handle(&mut self, event: ControllerEvent, host: &mut dyn GlassHost) {
        match event {
            ControllerEvent::Attach => self.attach(host),
            ControllerEvent::Detach => self.detach(host),
            ControllerEvent::AttributeChanged { name, value } => {
                self.attribute_changed(name, value, host)
            }
            _ if self.state == ControllerState::Uninitialized => {
                debug!("ignoring event while detached");
            }
            ControllerEvent::PointerDown => self.set_pressed(true, host),
            ControllerEvent::PointerUp | ControllerEvent::PointerLeave => {
                self.set_pressed(false, host)
            }
            ControllerEvent::GlobalPointerUp => {
                if self.pressed {
                    self.set_pressed(false, host);
                }
            }
            ControllerEvent::WindowResize => self.window_resized(host),
            ControllerEvent::ContentMutated | ControllerEvent::ElementResized => {
                if self.mode == SizingMode::AutoSize {
                    self.request_idle(host);
                }
            }
            ControllerEvent::AnimationFrame => {
                self.frame_pending = false;
                self.refresh(host);
            }
            ControllerEvent::IdleTick => {
                self.idle_pending = false;
                self.refresh(host);
            }
        }
    }

    fn attach(&mut self, host: &mut dyn GlassHost) {
        if self.state != ControllerState::Uninitialized {
            return;
        }

        self.mode = self.config.sizing_mode();
        self.capability = Some(self.capability_cache.get_or_detect(self.provider));
        if self.config.responsive {
            self.apply_responsive(host);
        }

        self.install_template(host);
        self.state = ControllerState::Mounted;
        self.sync_listeners(host);
        debug!(mode = ?self.mode, capability = ?self.capability, "attached");

        match self.mode {
            SizingMode::Fixed => self.refresh(host),
            SizingMode::Fluid | SizingMode::AutoSize => self.request_frame(host),
        }
    }

    fn detach(&mut self, host: &mut dyn GlassHost) {
        for listener in self.listeners.drain(..) {
            host.unlisten(listener);
        }
        self.state = ControllerState::Uninitialized;
        self.pressed = false;
        self.frame_pending = false;
        self.idle_pending = false;
        self.retries.reset();
        self.template = None;
        self.visual = None;
        self.filters.clear();
        debug!("detached");
    }

    fn attribute_changed(&mut self, name: String, value: Option<String>, host: &mut dyn GlassHost) {
        if self.is_responsive_echo(&name, value.as_deref()) {
            return;
        }
        let changed = match value {
            Some(v) => self.attributes.insert(name.clone(), v.clone()).as_ref() != Some(&v),
            None => self.attributes.remove(&name).is_some(),
        };
        if !changed {
            return;
        }
        self.rebuild_config();

        if self.state == ControllerState::Uninitialized || !is_observed(&name) {
            return;
        }

        if self.config.responsive {
            if matches!(
                name.as_str(),
                "responsive" | "width" | "height" | "base-width" | "base-height"
            ) {
                self.apply_responsive(host);
            }
        } else if self.responsive_size.take().is_some() {
            self.restore_declared_size(host);
        }

        self.sync_listeners(host);
        self.install_template(host);
        self.refresh(host);
    }

    fn set_pressed(&mut self, pressed: bool, host: &mut dyn GlassHost) {
        self.pressed = pressed;
        self.refresh(host);
    }

    fn window_resized(&mut self, host: &mut dyn GlassHost) {
        let rescaled = self.config.responsive && self.apply_responsive(host);
        if rescaled || self.mode == SizingMode::Fluid {
            self.refresh(host);
        }
    }

    /// Rewrites width/height for the current viewport; `true` if they changed.
    ///
    /// Scaling always starts from the declared size, never from a previously scaled one.
    fn apply_responsive(&mut self, host: &mut dyn GlassHost) -> bool {
        let declared = GlassConfig::from_attributes(&self.attributes);
        let (w, h) = scaled_size(base_size(&declared), host.viewport_width());
        if self.responsive_size == Some((w, h)) {
            return false;
        }

        self.responsive_size = Some((w, h));
        host.set_attribute("width", &w.to_string());
        host.set_attribute("height", &h.to_string());
        self.rebuild_config();
        debug!(width = w, height = h, "responsive resize");
        true
    }

    /// The host reporting back a size this controller wrote.
    fn is_responsive_echo(&self, name: &str, value: Option<&str>) -> bool {
        let Some((w, h)) = self.responsive_size else {
            return false;
        };
        let written = match name {
            "width" => w,
            "height" => h,
            _ => return false,
        };
        value == Some(written.to_string().as_str())
    }

    fn restore_declared_size(&mut self, host: &mut dyn GlassHost) {
        for name in ["width", "height"] {
            if let Some(value) = self.attributes.get(name) {
                host.set_attribute(name, value);
            }
        }
        debug!("responsive scaling off, declared size restored");
    }

    fn rebuild_config(&mut self) {
        let mut config = GlassConfig::from_attributes(&self.attributes);
        if self.state != ControllerState::Uninitialized {
            config.auto_size = self.mode == SizingMode::AutoSize;
            config.fluid = self.mode == SizingMode::Fluid;
        }
        if config.responsive
            && let Some((w, h)) = self.responsive_size
        {
            config.width = Some(w);
            config.height = Some(h);
        }
        self.config = config;
    }

    fn sync_listeners(&mut self, host: &mut dyn GlassHost) {
        let mut wanted = vec![Listener::SurfacePointer, Listener::GlobalPointerUp];
        if self.mode == SizingMode::Fluid || self.config.responsive {
            wanted.push(Listener::WindowResize);
        }
        if self.mode == SizingMode::AutoSize {
            wanted.push(Listener::ContentMutation);
            wanted.push(Listener::SurfaceResize);
        }

        for listener in wanted {
            if !self.listeners.contains(&listener) {
                host.listen(listener);
                self.listeners.push(listener);
            }
        }
    }

    fn install_template(&mut self, host: &mut dyn GlassHost) {
        let markup = shadow_markup(&self.config);
        if self.template.as_deref() == Some(markup.as_str()) {
            return;
        }
        host.install_template(&markup);
        self.template = Some(markup);
    }

    fn request_frame(&mut self, host: &mut dyn GlassHost) {
        if !self.frame_pending {
            self.frame_pending = true;
            host.request_animation_frame();
        }
    }

    fn request_idle(&mut self, host: &mut dyn GlassHost) {
        if !self.idle_pending {
            self.idle_pending = true;
            host.request_idle_tick();
        }
    }

    fn resolve_geometry(&mut self, host: &mut dyn GlassHost) -> Measurement {
        match self.mode {
            SizingMode::Fixed => Measurement::Ready(fixed_geometry(&self.config)),
            SizingMode::Fluid => {
                let (width, height) = surface_size(&self.config);
                if let Some(w) = width {
                    host.apply_style("width", &w);
                }
                if let Some(h) = height {
                    host.apply_style("height", &h);
                }
                let measured = host.measure_host();
                measured_geometry(&self.config, measured, (0, 0))
            }
            SizingMode::AutoSize => {
                // The effect must not feed back into the size it is measured from.
                host.apply_style("backdrop-filter", "none");
                host.apply_style("background", DEFAULT_BACKGROUND);
                host.force_layout();
                let measured = host.measure_surface();
                let floor = measurement_floor(&self.config, self.mode);
                measured_geometry(&self.config, measured, floor)
            }
        }
    }

    fn refresh(&mut self, host: &mut dyn GlassHost) {
        if self.state == ControllerState::Uninitialized {
            return;
        }

        let geometry = match self.resolve_geometry(host) {
            Measurement::Ready(geometry) => geometry,
            Measurement::Deferred => {
                if self.retries.try_consume(self.retry_policy) {
                    debug!(attempt = self.retries.used(), "zero-size layout, retrying next frame");
                    self.request_frame(host);
                } else {
                    warn!(
                        attempts = self.retries.used(),
                        "layout stayed zero-size, waiting for the next trigger"
                    );
                }
                return;
            }
        };
        self.retries.reset();

        let capability = self.capability.unwrap_or(false);
        let visual = render_with(&self.config, &geometry, capability, &mut self.filters);
        for (property, value) in visual.declarations() {
            host.apply_style(property, value);
        }

        debug!(strategy = ?visual.strategy, ?geometry, pressed = self.pressed, "rendered");
        self.state = ControllerState::Rendering {
            strategy: visual.strategy,
            geometry,
        };
        self.visual = Some(visual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::provider::ProbedTrue;
    use crate::foundation::core::Size;

    #[derive(Default)]
    struct NullHost {
        frames: usize,
        styles: Vec<(String, String)>,
    }

    impl GlassHost for NullHost {
        fn install_template(&mut self, _markup: &str) {}
        fn apply_style(&mut self, property: &str, value: &str) {
            self.styles.push((property.to_string(), value.to_string()));
        }
        fn measure_host(&mut self) -> Size {
            Size::ZERO
        }
        fn measure_surface(&mut self) -> Size {
            Size::ZERO
        }
        fn viewport_width(&self) -> f64 {
            1280.0
        }
        fn set_attribute(&mut self, _name: &str, _value: &str) {}
        fn request_animation_frame(&mut self) {
            self.frames += 1;
        }
        fn request_idle_tick(&mut self) {}
        fn listen(&mut self, _listener: Listener) {}
        fn unlisten(&mut self, _listener: Listener) {}
    }

    #[test]
    fn fixed_attach_renders_immediately() {
        let cache = CapabilityCache::new();
        let mut c = GlassController::new(BTreeMap::new(), &cache, &ProbedTrue);
        let mut host = NullHost::default();
        c.handle(ControllerEvent::Attach, &mut host);
        assert!(matches!(
            c.state(),
            ControllerState::Rendering {
                strategy: RenderStrategy::Full,
                ..
            }
        ));
        assert_eq!(host.frames, 0);
        assert!(host.styles.iter().any(|(k, _)| k == "backdrop-filter"));
    }

    #[test]
    fn retries_stop_at_policy_cap() {
        let cache = CapabilityCache::new();
        let attrs = BTreeMap::from([("auto-size".to_string(), String::new())]);
        let mut c = GlassController::new(attrs, &cache, &ProbedTrue)
            .with_retry_policy(RetryPolicy { max_attempts: 2 });
        let mut host = NullHost::default();
        c.handle(ControllerEvent::Attach, &mut host);
        for _ in 0..10 {
            c.handle(ControllerEvent::AnimationFrame, &mut host);
        }
        // initial settle frame + two retries
        assert_eq!(host.frames, 3);
        assert_eq!(c.state(), ControllerState::Mounted);
    }
}
