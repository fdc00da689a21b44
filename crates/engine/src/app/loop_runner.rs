use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::level::SceneRuntime;
use super::metrics::MetricsAccumulator;
use super::{
    screen_px_to_cell, CellMetrics, Level, Point, PointerButton, PointerEvent, Renderer, Scene,
};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub columns: u32,
    pub rows: u32,
    pub cell_metrics: CellMetrics,
    pub target_fps: u32,
    pub max_frame_delta: Duration,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "grid".to_string(),
            columns: 100,
            rows: 40,
            cell_metrics: CellMetrics::default(),
            target_fps: 60,
            max_frame_delta: Duration::from_millis(250),
            metrics_log_interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, scene: Box<dyn Scene>, level: Level) -> Result<(), AppError> {
    let cell_metrics = config.cell_metrics.normalized();
    let mut runtime = SceneRuntime::new(scene, level);

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                (config.columns.max(1) * cell_metrics.width_px) as f64,
                (config.rows.max(1) * cell_metrics.height_px) as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer =
        Renderer::new(Arc::clone(&window), cell_metrics).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(5));
    let frame_target = target_frame_duration(normalize_fps(config.target_fps));
    let mut input_collector = InputCollector::new(cell_metrics);

    runtime.load();
    info!(
        entity_count = runtime.level().entity_count(),
        "level_ready"
    );
    info!(
        target_fps = config.target_fps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        cell_width_px = cell_metrics.width_px,
        cell_height_px = cell_metrics.height_px,
        "loop_config"
    );

    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);
    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input_collector.handle_cursor_moved(position.x, position.y);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_collector.handle_mouse_input(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_key(event.physical_key, event.state);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;
                    let frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);

                    let events = input_collector.take_events();
                    runtime.run_frame(&events, frame_dt);

                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep = compute_cap_sleep(elapsed_since_last_present, frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    if let Err(error) = renderer.render_level(runtime.level()) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();

                    let next_title = runtime.debug_title();
                    if next_title != last_applied_title {
                        match &next_title {
                            Some(title) => window.set_title(title),
                            None => window.set_title(&config.window_title),
                        }
                        last_applied_title = next_title;
                    }

                    metrics_accumulator.record_frame(raw_frame_dt);
                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            frame_time_ms = snapshot.frame_time_ms,
                            entity_count = runtime.level().entity_count(),
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                runtime.shutdown();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// Turns raw window input into grid-cell pointer events, queued until the
/// next frame drains them.
#[derive(Debug, Default)]
struct InputCollector {
    cell_metrics: CellMetrics,
    cursor_cell: Option<Point>,
    pending: Vec<PointerEvent>,
    quit_requested: bool,
}

impl InputCollector {
    fn new(cell_metrics: CellMetrics) -> Self {
        Self {
            cell_metrics,
            ..Self::default()
        }
    }

    fn handle_cursor_moved(&mut self, x_px: f64, y_px: f64) {
        let cell = screen_px_to_cell(x_px, y_px, self.cell_metrics);
        if self.cursor_cell == Some(cell) {
            return;
        }
        self.cursor_cell = Some(cell);
        self.pending.push(PointerEvent::moved(cell));
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        let position = self.cursor_cell.unwrap_or(Point::ORIGIN);
        match state {
            ElementState::Pressed => {
                let Some(button) = pointer_button(button) else {
                    return;
                };
                self.pending.push(PointerEvent::pressed(button, position));
            }
            ElementState::Released => {
                if pointer_button(button).is_some() {
                    self.pending.push(PointerEvent::released(position));
                }
            }
        }
    }

    fn handle_key(&mut self, key: PhysicalKey, state: ElementState) {
        if key == PhysicalKey::Code(KeyCode::Escape) && state == ElementState::Pressed {
            self.quit_requested = true;
        }
    }

    fn take_events(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.pending)
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Left),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Right => Some(PointerButton::Right),
        _ => None,
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_fps(fps: u32) -> Option<u32> {
    Some(fps).filter(|value| *value > 0)
}

fn target_frame_duration(fps: Option<u32>) -> Option<Duration> {
    fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PointerEventKind;

    fn collector() -> InputCollector {
        InputCollector::new(CellMetrics {
            width_px: 10,
            height_px: 10,
        })
    }

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        assert_eq!(
            clamp_frame_delta(Duration::from_millis(600), max_frame_delta),
            max_frame_delta
        );
        assert_eq!(
            clamp_frame_delta(Duration::from_millis(16), max_frame_delta),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn cursor_motion_reports_only_cell_changes() {
        let mut input = collector();
        input.handle_cursor_moved(12.0, 3.0);
        input.handle_cursor_moved(17.0, 9.0);
        input.handle_cursor_moved(21.0, 9.0);

        assert_eq!(
            input.take_events(),
            vec![
                PointerEvent::moved(Point::new(1, 0)),
                PointerEvent::moved(Point::new(2, 0)),
            ]
        );
        assert!(input.take_events().is_empty());
    }

    #[test]
    fn presses_carry_button_and_current_cell() {
        let mut input = collector();
        input.handle_cursor_moved(55.0, 31.0);
        input.take_events();

        input.handle_mouse_input(MouseButton::Middle, ElementState::Pressed);
        input.handle_mouse_input(MouseButton::Middle, ElementState::Released);

        let events = input.take_events();
        assert_eq!(
            events,
            vec![
                PointerEvent::pressed(PointerButton::Middle, Point::new(5, 3)),
                PointerEvent::released(Point::new(5, 3)),
            ]
        );
        assert_eq!(events[1].kind, PointerEventKind::ButtonUp);
    }

    #[test]
    fn press_before_any_motion_uses_origin() {
        let mut input = collector();
        input.handle_mouse_input(MouseButton::Left, ElementState::Pressed);
        assert_eq!(
            input.take_events(),
            vec![PointerEvent::pressed(PointerButton::Left, Point::ORIGIN)]
        );
    }

    #[test]
    fn extra_mouse_buttons_are_ignored() {
        let mut input = collector();
        input.handle_mouse_input(MouseButton::Back, ElementState::Pressed);
        input.handle_mouse_input(MouseButton::Back, ElementState::Released);
        assert!(input.take_events().is_empty());
    }

    #[test]
    fn escape_requests_quit() {
        let mut input = collector();
        input.handle_key(PhysicalKey::Code(KeyCode::KeyA), ElementState::Pressed);
        assert!(!input.quit_requested);
        input.handle_key(PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed);
        assert!(input.quit_requested);
    }

    #[test]
    fn target_frame_duration_none_when_fps_zero() {
        assert_eq!(target_frame_duration(normalize_fps(0)), None);
    }

    #[test]
    fn target_frame_duration_for_60hz_is_expected() {
        let duration = target_frame_duration(normalize_fps(60)).expect("duration");
        assert!((duration.as_secs_f64() - (1.0 / 60.0)).abs() < 0.000_001);
    }

    #[test]
    fn compute_cap_sleep_zero_when_over_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(20), target_frame_duration(Some(60)));
        assert_eq!(sleep, Duration::ZERO);
    }

    #[test]
    fn compute_cap_sleep_positive_when_under_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(5), target_frame_duration(Some(60)));
        assert!(sleep > Duration::ZERO);
    }

    #[test]
    fn zero_durations_fall_back() {
        assert_eq!(
            normalize_non_zero_duration(Duration::ZERO, Duration::from_secs(1)),
            Duration::from_secs(1)
        );
        assert_eq!(
            normalize_non_zero_duration(Duration::from_millis(3), Duration::from_secs(1)),
            Duration::from_millis(3)
        );
    }
}
