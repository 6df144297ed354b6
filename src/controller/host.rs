use crate::foundation::core::Size;

/// Signal sources a controller subscribes to while attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Pointer down/up/leave on the surface.
    SurfacePointer,
    /// Pointer release anywhere in the document, for releases outside the surface.
    GlobalPointerUp,
    WindowResize,
    /// Child list, subtree and character data changes of the hosted content.
    ContentMutation,
    /// Size changes of the surface element.
    SurfaceResize,
}

/// Events a host adapter feeds into [`GlassController::handle`](crate::GlassController::handle).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerEvent {
    Attach,
    Detach,
    AttributeChanged { name: String, value: Option<String> },
    PointerDown,
    PointerUp,
    PointerLeave,
    GlobalPointerUp,
    WindowResize,
    ContentMutated,
    ElementResized,
    /// Delivery of a frame requested with [`GlassHost::request_animation_frame`].
    AnimationFrame,
    /// Delivery of a tick requested with [`GlassHost::request_idle_tick`].
    IdleTick,
}

/// The environment a glass controller renders into.
///
/// Scheduling methods only enqueue; the adapter later calls back with
/// [`ControllerEvent::AnimationFrame`] or [`ControllerEvent::IdleTick`].
pub trait GlassHost {
    /// Replaces the element's shadow content with `markup`.
    fn install_template(&mut self, markup: &str);

    /// Sets one inline style declaration on the surface element.
    fn apply_style(&mut self, property: &str, value: &str);

    /// Flushes pending layout so the next measurement is current.
    fn force_layout(&mut self) {}

    /// Layout box of the host element itself.
    fn measure_host(&mut self) -> Size;

    /// Layout box of the surface element.
    fn measure_surface(&mut self) -> Size;

    fn viewport_width(&self) -> f64;

    /// Reflects an attribute the controller rewrote (responsive scaling) back onto the element.
    fn set_attribute(&mut self, name: &str, value: &str);

    fn request_animation_frame(&mut self);

    fn request_idle_tick(&mut self);

    fn listen(&mut self, listener: Listener);

    fn unlisten(&mut self, listener: Listener);
}
