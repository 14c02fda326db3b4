use std::cell::RefCell;
use std::rc::Rc;

use gpui::prelude::*;
use gpui::{
    Bounds, MouseButton, MouseMoveEvent, MouseUpEvent, Pixels, SharedString, Window, canvas, div,
    px,
};
use tracing::error;

use crate::control::{ControlPanel, FormError, Readout};
use crate::error::TrackerError;
use crate::geom::PixelPoint;
use crate::interaction::{Measurement, TrackedPoint};
use crate::render::RenderList;
use crate::surface::{ListenerGuard, SurfaceState, TrackingSurface};

use super::config::TrackerViewConfig;
use super::paint::{paint_list, to_hsla};

type SharedTracker = Rc<RefCell<TrackingSurface<RenderList>>>;
type SharedError = Rc<RefCell<Option<String>>>;

/// A GPUI view that renders a [`TrackingSurface`] and feeds it events.
///
/// The surface is mounted on first layout and re-measured whenever the
/// canvas bounds change. A left click toggles tracking. Mouse-moved callbacks
/// run while the surface is borrowed and must not call back into the view.
///
/// Text is painted upright. Labels land where the decorator's transform puts
/// them, but their recorded rotation is not applied, so the abs label is
/// neither tilted along its guide nor flipped left of the origin.
pub struct GpuiTrackerView {
    tracker: SharedTracker,
    pending_listener: Rc<RefCell<Option<ListenerGuard>>>,
    last_error: SharedError,
    config: TrackerViewConfig,
}

impl GpuiTrackerView {
    /// Create a view around `tracker`.
    ///
    /// Uses the default [`TrackerViewConfig`].
    pub fn new(
        tracker: TrackingSurface<RenderList>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        Self::with_config(tracker, TrackerViewConfig::default(), window, cx)
    }

    /// Create a view with a custom configuration.
    pub fn with_config(
        tracker: TrackingSurface<RenderList>,
        config: TrackerViewConfig,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let subscription = cx.observe_window_bounds(window, |_, _, cx| cx.notify());
        let listener = ListenerGuard::new(move || drop(subscription));
        Self {
            tracker: Rc::new(RefCell::new(tracker)),
            pending_listener: Rc::new(RefCell::new(Some(listener))),
            last_error: Rc::new(RefCell::new(None)),
            config,
        }
    }

    /// Validate the panel and reconfigure the plane window.
    ///
    /// Form errors are returned untouched. Surface errors, including callback
    /// failures, are logged and kept as [`last_error`](Self::last_error).
    pub fn submit(
        &mut self,
        panel: &ControlPanel,
        cx: &mut Context<Self>,
    ) -> Result<Option<TrackedPoint>, FormError> {
        let bounds = panel.submit()?;
        let result = self.tracker.borrow_mut().set_bounds(bounds);
        cx.notify();
        Ok(self.settle(result))
    }

    /// Whether pointer moves are tracked.
    pub fn tracking(&self) -> bool {
        self.tracker.borrow().tracking()
    }

    /// Last tracked point.
    pub fn point(&self) -> Option<TrackedPoint> {
        self.tracker.borrow().point()
    }

    /// Text readout of the last tracked point.
    pub fn readout(&self) -> Readout {
        Readout::new(
            self.point().as_ref(),
            self.config.readout_decimal_places,
        )
    }

    /// Message of the last failed event, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    /// Tear the surface down and release the resize subscription.
    pub fn unmount(&mut self, cx: &mut Context<Self>) {
        self.tracker.borrow_mut().unmount();
        self.pending_listener.borrow_mut().take();
        cx.notify();
    }

    fn settle<T: Default>(&self, result: Result<T, TrackerError>) -> T {
        match result {
            Ok(value) => {
                self.last_error.borrow_mut().take();
                value
            }
            Err(err) => {
                report(&self.last_error, &err);
                T::default()
            }
        }
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        let result = self.tracker.borrow_mut().click();
        self.settle(result);
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let client = PixelPoint::new(f32::from(ev.position.x), f32::from(ev.position.y));
        let result = self.tracker.borrow_mut().pointer_move(client);
        let tracked = result.as_ref().map_or(true, Option::is_some);
        self.settle(result);
        if tracked {
            cx.notify();
        }
    }
}

impl Render for GpuiTrackerView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let tracker = Rc::clone(&self.tracker);
        let pending = Rc::clone(&self.pending_listener);
        let last_error = Rc::clone(&self.last_error);
        let (width, height) = {
            let tracker = self.tracker.borrow();
            (tracker.config().width, tracker.config().height)
        };

        let plane = div()
            .w(px(width))
            .h(px(height))
            .bg(to_hsla(self.config.background))
            .child(
                canvas(
                    move |bounds, _, _| {
                        let mut tracker = tracker.borrow_mut();
                        if let Err(err) = sync_layout(&mut tracker, &pending, bounds) {
                            report(&last_error, &err);
                        }
                        tracker.surface().clone()
                    },
                    move |bounds, list, window, cx| {
                        paint_list(&list, bounds.origin, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }));

        let mut lines: Vec<String> = Vec::new();
        if self.config.show_readout {
            lines.extend(self.readout().lines());
        }
        if let Some(message) = self.last_error() {
            lines.push(message);
        }

        div()
            .flex()
            .flex_col()
            .child(plane)
            .children(lines.into_iter().map(|line| div().child(SharedString::from(line))))
    }
}

/// Mount on first layout, re-measure when the canvas moved or changed size.
fn sync_layout(
    tracker: &mut TrackingSurface<RenderList>,
    pending: &RefCell<Option<ListenerGuard>>,
    bounds: Bounds<Pixels>,
) -> Result<(), TrackerError> {
    let measurement = Measurement::at(
        PixelPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y)),
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    );
    if !measurement.rect.is_valid() {
        return Ok(());
    }
    match tracker.state() {
        SurfaceState::Unmounted => {
            let listener = pending.borrow_mut().take().unwrap_or_else(ListenerGuard::noop);
            tracker.mount(measurement, listener)
        }
        SurfaceState::Mounted { .. } => {
            let current = tracker.snapshot().map(|snapshot| snapshot.measurement());
            if current == Some(measurement) {
                Ok(())
            } else {
                tracker.resize(measurement)
            }
        }
        SurfaceState::TornDown => Ok(()),
    }
}

fn report(last_error: &RefCell<Option<String>>, err: &TrackerError) {
    error!(%err, "tracking surface event failed");
    *last_error.borrow_mut() = Some(err.to_string());
}
