//! Projection between world space and the photo/viewport plane.

use nalgebra::{Isometry3, Perspective3, Point3, Vector3};

/// Maps points between world space and screen space.
///
/// Screen points are `(x, y, depth)` with `x`/`y` in viewport pixels
/// (origin bottom-left) and `depth` in `[0, 1]` from the near to the far
/// clip plane. This is the capability the host's 3D view exposes.
pub trait ViewProjector {
    /// Projects a world point to screen space.
    fn project_point(&self, world: &Point3<f64>) -> Point3<f64>;

    /// Unprojects a screen point (with depth) back to world space.
    fn unproject_point(&self, screen: &Point3<f64>) -> Point3<f64>;
}

/// A look-at perspective camera with a pixel viewport.
///
/// # Example
///
/// ```
/// use dental_registration::{PerspectiveProjector, ViewProjector};
/// use nalgebra::{Point3, Vector3};
///
/// let camera = PerspectiveProjector::look_at(
///     Point3::new(0.0, 0.0, 200.0),
///     Point3::origin(),
///     Vector3::y(),
///     0.6,
///     (1920.0, 1080.0),
/// );
///
/// let screen = camera.project_point(&Point3::origin());
/// assert!((screen.x - 960.0).abs() < 1e-6);
/// assert!((screen.y - 540.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveProjector {
    view: Isometry3<f64>,
    projection: Perspective3<f64>,
    viewport: (f64, f64),
}

impl PerspectiveProjector {
    /// Default near clip distance (mm).
    pub const DEFAULT_ZNEAR: f64 = 1.0;
    /// Default far clip distance (mm).
    pub const DEFAULT_ZFAR: f64 = 2000.0;
    /// Smallest distance kept between the near and far planes (mm).
    pub const MIN_CLIP_DEPTH: f64 = 1e-3;

    /// Creates a camera at `eye` looking at `target`.
    ///
    /// `fovy` is the vertical field of view in radians; `viewport` is the
    /// pixel size `(width, height)`.
    #[must_use]
    pub fn look_at(
        eye: Point3<f64>,
        target: Point3<f64>,
        up: Vector3<f64>,
        fovy: f64,
        viewport: (f64, f64),
    ) -> Self {
        Self::with_clip(eye, target, up, fovy, viewport, Self::DEFAULT_ZNEAR, Self::DEFAULT_ZFAR)
    }

    /// Creates a camera with explicit clip planes.
    ///
    /// A near plane that is not positive and finite falls back to
    /// [`Self::DEFAULT_ZNEAR`]. The far plane is kept at least
    /// [`Self::MIN_CLIP_DEPTH`] beyond the near plane.
    #[must_use]
    pub fn with_clip(
        eye: Point3<f64>,
        target: Point3<f64>,
        up: Vector3<f64>,
        fovy: f64,
        viewport: (f64, f64),
        znear: f64,
        zfar: f64,
    ) -> Self {
        let width = viewport.0.max(1.0);
        let height = viewport.1.max(1.0);
        let znear = if znear.is_finite() && znear > 0.0 {
            znear
        } else {
            Self::DEFAULT_ZNEAR
        };
        let zfar = if zfar.is_finite() { zfar } else { Self::DEFAULT_ZFAR };
        let zfar = zfar.max(znear + Self::MIN_CLIP_DEPTH);
        Self {
            view: Isometry3::look_at_rh(&eye, &target, &up),
            projection: Perspective3::new(width / height, fovy, znear, zfar),
            viewport: (width, height),
        }
    }

    /// Near and far clip distances.
    #[must_use]
    pub fn clip(&self) -> (f64, f64) {
        (self.projection.znear(), self.projection.zfar())
    }

    /// Viewport size in pixels.
    #[must_use]
    pub const fn viewport(&self) -> (f64, f64) {
        self.viewport
    }
}

impl ViewProjector for PerspectiveProjector {
    fn project_point(&self, world: &Point3<f64>) -> Point3<f64> {
        let ndc = self.projection.project_point(&self.view.transform_point(world));
        let (width, height) = self.viewport;
        Point3::new(
            (ndc.x + 1.0) * 0.5 * width,
            (ndc.y + 1.0) * 0.5 * height,
            (ndc.z + 1.0) * 0.5,
        )
    }

    fn unproject_point(&self, screen: &Point3<f64>) -> Point3<f64> {
        let (width, height) = self.viewport;
        let ndc = Point3::new(
            2.0 * screen.x / width - 1.0,
            2.0 * screen.y / height - 1.0,
            2.0 * screen.z - 1.0,
        );
        let eye_space = self.projection.unproject_point(&ndc);
        self.view.inverse_transform_point(&eye_space)
    }
}
