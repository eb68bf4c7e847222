//! Shape generation for 2D primitives
//!
//! Everything is built in surface pixels (origin top-left, y down); the
//! pipeline maps to clip space on upload.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, PipeView, Rect, RenderSnapshot};

/// Largest bird tilt in radians (nose down)
const MAX_TILT: f32 = 1.2;
/// Tilt per unit of vertical velocity
const TILT_PER_VELOCITY: f32 = 0.08;
/// Height of the level progress bar
const PROGRESS_HEIGHT: f32 = 6.0;

/// Two triangles covering an axis-aligned rectangle
pub fn quad(rect: Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.w, rect.y + rect.h);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Rectangle rotated by `angle` around `pivot`
pub fn rotated_quad(rect: Rect, pivot: Vec2, angle: f32, color: [f32; 4]) -> [Vertex; 6] {
    let rot = Vec2::from_angle(angle);
    quad(rect, color).map(|v| {
        let p = pivot + rot.rotate(Vec2::from(v.position) - pivot);
        Vertex::new(p.x, p.y, v.color)
    })
}

/// Bird tilt for a vertical velocity: nose up while rising, down while falling
pub fn bird_tilt(velocity: f32) -> f32 {
    (velocity * TILT_PER_VELOCITY).clamp(-0.5, MAX_TILT)
}

/// Body, wing and eye of the bird
pub fn bird(rect: Rect, velocity: f32) -> Vec<Vertex> {
    let center = Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
    let angle = bird_tilt(velocity);

    let wing = Rect::new(rect.x + rect.w * 0.1, rect.y + rect.h * 0.45, rect.w * 0.45, rect.h * 0.35);
    let eye = Rect::new(rect.x + rect.w * 0.62, rect.y + rect.h * 0.15, rect.w * 0.22, rect.h * 0.3);
    let pupil = Rect::new(rect.x + rect.w * 0.74, rect.y + rect.h * 0.25, rect.w * 0.08, rect.h * 0.12);

    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rotated_quad(rect, center, angle, colors::BIRD));
    vertices.extend(rotated_quad(wing, center, angle, colors::BIRD_WING));
    vertices.extend(rotated_quad(eye, center, angle, colors::BIRD_EYE));
    vertices.extend(rotated_quad(pupil, center, angle, colors::BIRD_PUPIL));
    vertices
}

/// Both halves of a pipe, caps drawn over the bodies
pub fn pipe(view: &PipeView, body: [f32; 4], cap: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(quad(view.top_body, body));
    vertices.extend(quad(view.bottom_body, body));
    vertices.extend(quad(view.top_cap, cap));
    vertices.extend(quad(view.bottom_cap, cap));
    vertices
}

/// Track plus fill along the top edge
pub fn progress_bar(width: f32, progress: f32) -> Vec<Vertex> {
    let fill = width * progress.clamp(0.0, 1.0);
    let mut vertices = Vec::with_capacity(12);
    vertices.extend(quad(Rect::new(0.0, 0.0, width, PROGRESS_HEIGHT), colors::PROGRESS_TRACK));
    if fill > 0.0 {
        vertices.extend(quad(Rect::new(0.0, 0.0, fill, PROGRESS_HEIGHT), colors::PROGRESS_FILL));
    }
    vertices
}

/// Dimmed screen with a pause icon
pub fn pause_overlay(width: f32, height: f32) -> Vec<Vertex> {
    let bar_w = (width * 0.04).max(8.0);
    let bar_h = (height * 0.12).max(24.0);
    let cx = width / 2.0;
    let top = height / 2.0 - bar_h / 2.0;

    let mut vertices = Vec::with_capacity(18);
    vertices.extend(quad(Rect::new(0.0, 0.0, width, height), colors::PAUSE_DIM));
    vertices.extend(quad(Rect::new(cx - bar_w * 1.5, top, bar_w, bar_h), colors::PAUSE_ICON));
    vertices.extend(quad(Rect::new(cx + bar_w * 0.5, top, bar_w, bar_h), colors::PAUSE_ICON));
    vertices
}

/// Full vertex list for one frame
pub fn scene(snapshot: &RenderSnapshot) -> Vec<Vertex> {
    let width = snapshot.surface.width;
    let height = snapshot.surface.height;
    let (body, cap) = colors::pipe(snapshot.theme);

    let mut vertices = Vec::with_capacity(snapshot.pipes.len() * 24 + 64);
    for view in &snapshot.pipes {
        vertices.extend(pipe(view, body, cap));
    }
    vertices.extend(bird(snapshot.bird, snapshot.bird_velocity));
    vertices.extend(progress_bar(width, snapshot.level_progress));

    match snapshot.phase {
        GamePhase::Paused => vertices.extend(pause_overlay(width, height)),
        GamePhase::Ended => {
            vertices.extend(quad(Rect::new(0.0, 0.0, width, height), colors::GAME_OVER_TINT))
        }
        GamePhase::Initial | GamePhase::Running => {}
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, Pipe, Surface};
    use crate::tuning::Tuning;

    fn snapshot_with_pipe(phase: GamePhase) -> RenderSnapshot {
        let mut state = GameState::new(1, Tuning::default());
        let surface = Surface::new(480.0, 640.0);
        state.reset_run(surface);
        state.surface = surface;
        state.phase = phase;
        state.pipes.push(Pipe { x: 300.0, top: 200.0, bottom: 240.0, scored: false });
        RenderSnapshot::capture(&state)
    }

    #[test]
    fn test_quad_covers_rect() {
        let v = quad(Rect::new(10.0, 20.0, 30.0, 40.0), colors::BIRD);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[5].position, [40.0, 60.0]);
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let rect = Rect::new(5.0, 5.0, 10.0, 10.0);
        let plain = quad(rect, colors::BIRD);
        let turned = rotated_quad(rect, Vec2::new(10.0, 10.0), 0.0, colors::BIRD);
        assert_eq!(plain, turned);
    }

    #[test]
    fn test_bird_tilt_clamped() {
        assert_eq!(bird_tilt(100.0), MAX_TILT);
        assert_eq!(bird_tilt(-100.0), -0.5);
        assert_eq!(bird_tilt(0.0), 0.0);
    }

    #[test]
    fn test_scene_counts() {
        let running = scene(&snapshot_with_pipe(GamePhase::Running));
        // pipe 24 + bird 24 + empty progress track 6
        assert_eq!(running.len(), 54);

        let paused = scene(&snapshot_with_pipe(GamePhase::Paused));
        assert_eq!(paused.len(), 54 + 18);

        let ended = scene(&snapshot_with_pipe(GamePhase::Ended));
        assert_eq!(ended.len(), 54 + 6);
    }

    #[test]
    fn test_progress_bar_fill() {
        let v = progress_bar(200.0, 0.25);
        assert_eq!(v.len(), 12);
        assert_eq!(v[11].position, [50.0, PROGRESS_HEIGHT]);
    }
}
