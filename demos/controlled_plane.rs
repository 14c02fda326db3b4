use std::time::Duration;

use gpui::prelude::*;
use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};

use gpui_tracker_plane::{
    AnnotatedPlane, ControlPanel, Decorations, GpuiTrackerView, RenderList, TrackingSurface,
};

/// Windows the demo cycles through, as typed into the control panel.
const PANELS: [(&str, &str, &str); 4] = [
    ("0", "0", "1"),
    ("1", "1", "2"),
    ("-0.5", "0.25", "0.75"),
    ("0", "0", "not a number"),
];

fn spawn_reconfigure(
    window: &mut gpui::Window,
    cx: &mut gpui::App,
    view: gpui::Entity<GpuiTrackerView>,
) {
    window
        .spawn(cx, move |cx: &mut AsyncWindowContext| {
            let mut cx = cx.clone();
            async move {
                for (center_x, center_y, radius) in PANELS.iter().cycle() {
                    Timer::after(Duration::from_secs(3)).await;
                    let panel = ControlPanel {
                        center_x: center_x.to_string(),
                        center_y: center_y.to_string(),
                        radius: radius.to_string(),
                    };
                    let _ = cx.update(|_, cx| {
                        view.update(cx, |view, view_cx| {
                            if let Err(err) = view.submit(&panel, view_cx) {
                                tracing::warn!(%err, ?panel, "submission rejected");
                            }
                        });
                    });
                }
            }
        })
        .detach();
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(560.0), px(640.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let plane = AnnotatedPlane::new().with_decorations(Decorations {
                abs_label: true,
                polar_label: true,
                ..Decorations::default()
            });
            let tracker = TrackingSurface::builder(RenderList::new())
                .decorator(plane)
                .on_mouse_moved(|point| {
                    tracing::info!(
                        x = point.cartesian.x,
                        y = point.cartesian.y,
                        "mouse moved"
                    );
                    Ok(())
                })
                .build();
            let view = cx.new(|cx| GpuiTrackerView::new(tracker, window, cx));
            spawn_reconfigure(window, cx, view.clone());
            view
        })
        .unwrap();
    });
}
