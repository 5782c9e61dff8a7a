//! Maps the device-space cursor position onto the UI surface.

use padpointer_core::types::{Point, Size};
use tracing::trace;

use crate::settings::SurfaceMode;

/// Projection reference for non-overlay surfaces.
///
/// Supplied by the host when the cursor surface is rendered through a
/// camera (world- or camera-space UI). Overlay surfaces never consult it.
pub trait CameraProjection {
    fn screen_to_surface(&self, screen: Point, surface: Size) -> Point;
}

/// Presentation state of the on-screen cursor sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorSprite {
    pub anchored_position: Point,
    pub visible: bool,
    pub alpha: f64,
}

/// Recomputes the sprite's surface-anchored position and visibility from
/// the device-space cursor position each frame.
pub struct CursorPresenter {
    mode: SurfaceMode,
    camera: Option<Box<dyn CameraProjection>>,
    sprite: CursorSprite,
    last_rendered: Point,
    scheme_visible: bool,
}

impl CursorPresenter {
    pub fn new(mode: SurfaceMode) -> Self {
        Self {
            mode,
            camera: None,
            sprite: CursorSprite { alpha: 1.0, ..CursorSprite::default() },
            last_rendered: Point::ZERO,
            scheme_visible: false,
        }
    }

    pub fn with_camera(mut self, camera: Box<dyn CameraProjection>) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn sprite(&self) -> CursorSprite {
        self.sprite
    }

    /// Visibility as decided by the scheme transition logic, before the
    /// inactivity gate is applied.
    pub fn scheme_visible(&self) -> bool {
        self.scheme_visible
    }

    pub fn set_scheme_visible(&mut self, visible: bool) {
        self.scheme_visible = visible;
    }

    /// Projects `screen_point` into surface-local coordinates and moves
    /// the sprite there. Returns `false` when the projection reference is
    /// missing (camera-mode surface without a camera); the sprite then
    /// keeps its previous position for this frame.
    pub fn present(&mut self, screen_point: Point, surface: Size) -> bool {
        let anchored = match self.mode {
            SurfaceMode::Overlay => {
                // Direct screen-to-local projection, origin at the
                // surface center.
                screen_point - Point::new(surface.width() / 2.0, surface.height() / 2.0)
            }
            SurfaceMode::Camera => match self.camera.as_ref() {
                Some(camera) => camera.screen_to_surface(screen_point, surface),
                None => {
                    trace!("camera-mode surface without camera; skipping presentation");
                    return false;
                }
            },
        };
        self.sprite.anchored_position = anchored;
        true
    }

    /// Whether the sprite moved since [`mark_rendered`](Self::mark_rendered)
    /// last ran; drives the inactivity timer's movement detection.
    pub fn sprite_moved(&self) -> bool {
        self.sprite.anchored_position != self.last_rendered
    }

    pub fn mark_rendered(&mut self) {
        self.last_rendered = self.sprite.anchored_position;
    }

    /// Final visibility: the scheme decision gated by the inactivity
    /// timer. A scheme transition in the same frame wins over an expiring
    /// countdown because transitions reset the timer before this runs.
    pub fn apply_visibility(&mut self, idle_allows: bool) {
        self.sprite.visible = self.scheme_visible && idle_allows;
    }

    /// Sets the sprite's opacity channel only; position and visibility
    /// logic are unaffected. Out-of-range values are clamped.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.sprite.alpha = alpha.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SURFACE: Size = Size::new(1920.0, 1080.0);

    struct HalfScaleCamera;

    impl CameraProjection for HalfScaleCamera {
        fn screen_to_surface(&self, screen: Point, _surface: Size) -> Point {
            screen * 0.5
        }
    }

    #[rstest]
    fn overlay_projects_about_surface_center() {
        let mut presenter = CursorPresenter::new(SurfaceMode::Overlay);
        assert!(presenter.present(Point::new(960.0, 540.0), SURFACE));
        assert_eq!(presenter.sprite().anchored_position, Point::ZERO);

        assert!(presenter.present(Point::new(0.0, 1080.0), SURFACE));
        assert_eq!(presenter.sprite().anchored_position, Point::new(-960.0, 540.0));
    }

    #[rstest]
    fn camera_mode_requires_projection_reference() {
        let mut presenter = CursorPresenter::new(SurfaceMode::Camera);
        assert!(!presenter.present(Point::new(100.0, 100.0), SURFACE));
        assert_eq!(presenter.sprite().anchored_position, Point::ZERO);

        let mut presenter =
            CursorPresenter::new(SurfaceMode::Camera).with_camera(Box::new(HalfScaleCamera));
        assert!(presenter.present(Point::new(100.0, 100.0), SURFACE));
        assert_eq!(presenter.sprite().anchored_position, Point::new(50.0, 50.0));
    }

    #[rstest]
    fn visibility_is_scheme_and_idle_conjunction() {
        let mut presenter = CursorPresenter::new(SurfaceMode::Overlay);
        presenter.set_scheme_visible(true);
        presenter.apply_visibility(true);
        assert!(presenter.sprite().visible);
        presenter.apply_visibility(false);
        assert!(!presenter.sprite().visible);
        presenter.set_scheme_visible(false);
        presenter.apply_visibility(true);
        assert!(!presenter.sprite().visible);
    }

    #[rstest]
    fn movement_detection_tracks_rendered_position() {
        let mut presenter = CursorPresenter::new(SurfaceMode::Overlay);
        presenter.present(Point::new(960.0, 540.0), SURFACE);
        presenter.mark_rendered();
        assert!(!presenter.sprite_moved());
        presenter.present(Point::new(961.0, 540.0), SURFACE);
        assert!(presenter.sprite_moved());
    }

    #[rstest]
    fn alpha_clamps_into_unit_range() {
        let mut presenter = CursorPresenter::new(SurfaceMode::Overlay);
        presenter.set_alpha(1.7);
        assert_eq!(presenter.sprite().alpha, 1.0);
        presenter.set_alpha(-0.2);
        assert_eq!(presenter.sprite().alpha, 0.0);
        presenter.set_alpha(0.25);
        assert_eq!(presenter.sprite().alpha, 0.25);
    }
}
