//! Region-of-convergence geometry for s-plane and z-plane pole/zero diagrams.
//!
//! Every builder reconstructs its output from the boundary description alone.
//! Points are `[x, y]` pairs in plot coordinates (real axis horizontal).

use num_complex::Complex64;
use std::f64::consts::PI;
use thiserror::Error;

pub type Point = [f64; 2];

/// Points on a full boundary circle: 0..=360 degrees in 1 degree steps.
pub const CIRCLE_POINTS: usize = 361;

const BOUNDARY_STEP_DEGREES: usize = 1;
const SHADING_STEP_DEGREES: usize = 5;
const SHADING_RADIUS_STEP: f64 = 0.05;
const SHADING_INSET: f64 = 0.01;

#[derive(Debug, Error, PartialEq)]
pub enum RocError {
    #[error("RoC boundary must be finite, got {0}")]
    NonFiniteBoundary(f64),
    #[error("RoC strip needs lower < upper, got {lower} and {upper}")]
    InvertedStrip { lower: f64, upper: f64 },
    #[error("RoC radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
    #[error("RoC annulus needs inner < outer, got {inner} and {outer}")]
    InvertedAnnulus { inner: f64, outer: f64 },
    #[error("pole/zero set has no poles to bound a RoC")]
    NoPoles,
}

/// Visible coordinate window of a diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotWindow {
    pub const LAPLACE: PlotWindow = PlotWindow {
        x_min: -4.0,
        x_max: 4.0,
        y_min: -4.0,
        y_max: 4.0,
    };
    pub const Z_DOMAIN: PlotWindow = PlotWindow {
        x_min: -1.5,
        x_max: 1.5,
        y_min: -1.5,
        y_max: 1.5,
    };

    pub fn square(half_width: f64) -> Self {
        Self {
            x_min: -half_width,
            x_max: half_width,
            y_min: -half_width,
            y_max: half_width,
        }
    }

    fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

// LAPLACE ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaplaceRoc {
    /// Re[s] > b
    Right(f64),
    /// Re[s] < b
    Left(f64),
    /// lower < Re[s] < upper
    Strip { lower: f64, upper: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Closed outline, counter-clockwise from the bottom-left corner.
    pub fn outline(&self) -> Vec<Point> {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.x + self.width, self.y + self.height);
        vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaplaceGeometry {
    pub region: Rect,
    pub outline: Vec<Point>,
    pub label: String,
    pub label_anchor: Point,
}

pub fn build_roc_laplace(
    roc: &LaplaceRoc,
    window: &PlotWindow,
) -> Result<LaplaceGeometry, RocError> {
    let label_y = window.y_max - 0.2;
    let (x_left, x_right, label, label_anchor) = match *roc {
        LaplaceRoc::Right(b) => {
            check_boundary(b)?;
            (b, window.x_max, format!("Re[s] > {:.1}", b), [b + 0.1, label_y])
        }
        LaplaceRoc::Left(b) => {
            check_boundary(b)?;
            (window.x_min, b, format!("Re[s] < {:.1}", b), [b - 0.1, label_y])
        }
        LaplaceRoc::Strip { lower, upper } => {
            check_boundary(lower)?;
            check_boundary(upper)?;
            if lower >= upper {
                return Err(RocError::InvertedStrip { lower, upper });
            }
            (
                lower,
                upper,
                format!("{:.1} < Re[s] < {:.1}", lower, upper),
                [(lower + upper) / 2.0, label_y],
            )
        }
    };

    // Boundaries beyond the window are pinned to its edges.
    let x_left = x_left.clamp(window.x_min, window.x_max);
    let x_right = x_right.clamp(window.x_min, window.x_max);
    let region = Rect {
        x: x_left,
        y: window.y_min,
        width: (x_right - x_left).max(0.0),
        height: window.height(),
    };
    Ok(LaplaceGeometry {
        outline: region.outline(),
        region,
        label,
        label_anchor,
    })
}

fn check_boundary(b: f64) -> Result<(), RocError> {
    if b.is_finite() {
        Ok(())
    } else {
        Err(RocError::NonFiniteBoundary(b))
    }
}

// Z-DOMAIN --------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZRoc {
    /// |z| > r
    Outside(f64),
    /// |z| < r
    Inside(f64),
    /// inner < |z| < outer
    Annular { inner: f64, outer: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZGeometry {
    /// One 361-point circle per boundary radius, inner first.
    pub boundaries: Vec<Vec<Point>>,
    /// Concentric coarse rings filling the included region.
    pub shading: Vec<Point>,
    pub label: String,
    pub label_anchor: Point,
}

pub fn build_roc_zdomain(roc: &ZRoc, window: &PlotWindow) -> Result<ZGeometry, RocError> {
    match *roc {
        ZRoc::Outside(r) => {
            check_radius(r)?;
            Ok(ZGeometry {
                boundaries: vec![circle(r, BOUNDARY_STEP_DEGREES)],
                shading: shading_rings(r + SHADING_INSET, |radius| radius < window.x_max),
                label: format!("|z| > {:.2}", r),
                label_anchor: [window.x_max - 0.1, window.y_max - 0.1],
            })
        }
        ZRoc::Inside(r) => {
            check_radius(r)?;
            let start = (r - SHADING_INSET).min(window.x_max - SHADING_INSET);
            Ok(ZGeometry {
                boundaries: vec![circle(r, BOUNDARY_STEP_DEGREES)],
                shading: shading_rings_inward(start),
                label: format!("|z| < {:.2}", r),
                label_anchor: [window.x_min + 0.1, window.y_max - 0.1],
            })
        }
        ZRoc::Annular { inner, outer } => {
            check_radius(inner)?;
            check_radius(outer)?;
            if inner >= outer {
                return Err(RocError::InvertedAnnulus { inner, outer });
            }
            let limit = (outer - SHADING_INSET).min(window.x_max);
            Ok(ZGeometry {
                boundaries: vec![
                    circle(inner, BOUNDARY_STEP_DEGREES),
                    circle(outer, BOUNDARY_STEP_DEGREES),
                ],
                shading: shading_rings(inner + SHADING_INSET, |radius| radius < limit),
                label: format!("{:.2} < |z| < {:.2}", inner, outer),
                label_anchor: [0.0, (inner + outer) / 2.0],
            })
        }
    }
}

/// Dashed reference circle of radius 1.
pub fn unit_circle() -> Vec<Point> {
    circle(1.0, BOUNDARY_STEP_DEGREES)
}

fn check_radius(r: f64) -> Result<(), RocError> {
    if r.is_finite() && r >= 0.0 {
        Ok(())
    } else {
        Err(RocError::InvalidRadius(r))
    }
}

fn circle(radius: f64, step_degrees: usize) -> Vec<Point> {
    (0..=360)
        .step_by(step_degrees)
        .map(|degrees| {
            let angle = PI * degrees as f64 / 180.0;
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect()
}

fn shading_rings(start: f64, keep: impl Fn(f64) -> bool) -> Vec<Point> {
    (0..)
        .map(|k| start + k as f64 * SHADING_RADIUS_STEP)
        .take_while(|&radius| keep(radius))
        .flat_map(|radius| circle(radius, SHADING_STEP_DEGREES))
        .collect()
}

fn shading_rings_inward(start: f64) -> Vec<Point> {
    (0..)
        .map(|k| start - k as f64 * SHADING_RADIUS_STEP)
        .take_while(|&radius| radius > 0.0)
        .flat_map(|radius| circle(radius, SHADING_STEP_DEGREES))
        .collect()
}

// EXAMPLE POLE/ZERO SETS ------------------------------------------------------

const fn c(re: f64, im: f64) -> Complex64 {
    Complex64 { re, im }
}

pub const LAPLACE_EXAMPLE_POLES: [Complex64; 3] = [c(-0.5, 0.0), c(-0.5, 2.0), c(-0.5, -2.0)];
pub const LAPLACE_EXAMPLE_ZEROS: [Complex64; 3] = [c(-2.0, 0.0), c(1.0, 1.0), c(1.0, -1.0)];

pub const Z_EXAMPLE_POLES: [Complex64; 3] = [c(0.5, 0.0), c(-0.8, 0.3), c(-0.8, -0.3)];
pub const Z_EXAMPLE_ZEROS: [Complex64; 4] = [c(0.0, 0.0), c(0.9, 0.0), c(0.9, 0.9), c(0.9, -0.9)];

/// Margin added beyond the outermost z-plane pole when suggesting a causal RoC.
pub const Z_ROC_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct PoleZeroSet {
    pub poles: Vec<Complex64>,
    pub zeros: Vec<Complex64>,
}

impl PoleZeroSet {
    pub fn laplace_example() -> Self {
        Self {
            poles: LAPLACE_EXAMPLE_POLES.to_vec(),
            zeros: LAPLACE_EXAMPLE_ZEROS.to_vec(),
        }
    }

    pub fn z_example() -> Self {
        Self {
            poles: Z_EXAMPLE_POLES.to_vec(),
            zeros: Z_EXAMPLE_ZEROS.to_vec(),
        }
    }

    pub fn pole_points(&self) -> Vec<Point> {
        self.poles.iter().map(|p| [p.re, p.im]).collect()
    }

    pub fn zero_points(&self) -> Vec<Point> {
        self.zeros.iter().map(|z| [z.re, z.im]).collect()
    }

    /// Right-sided RoC starting at the rightmost pole.
    pub fn suggested_laplace_roc(&self) -> Option<LaplaceRoc> {
        self.poles
            .iter()
            .map(|p| p.re)
            .max_by(f64::total_cmp)
            .map(LaplaceRoc::Right)
    }

    /// Exterior RoC just outside the largest pole magnitude.
    pub fn suggested_z_roc(&self, margin: f64) -> Option<ZRoc> {
        self.poles
            .iter()
            .map(|p| p.norm())
            .max_by(f64::total_cmp)
            .map(|r| ZRoc::Outside(r + margin))
    }
}

/// Both example diagrams, as shown when the user asks for an analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub laplace: PoleZeroSet,
    pub laplace_roc: LaplaceGeometry,
    pub z: PoleZeroSet,
    pub z_roc: ZGeometry,
    pub unit_circle: Vec<Point>,
}

pub fn analyze() -> Result<Analysis, RocError> {
    let laplace = PoleZeroSet::laplace_example();
    let z = PoleZeroSet::z_example();

    let laplace_bound = laplace.suggested_laplace_roc().ok_or(RocError::NoPoles)?;
    let laplace_roc = build_roc_laplace(&laplace_bound, &PlotWindow::LAPLACE)?;
    let z_bound = z.suggested_z_roc(Z_ROC_MARGIN).ok_or(RocError::NoPoles)?;
    let z_roc = build_roc_zdomain(&z_bound, &PlotWindow::Z_DOMAIN)?;

    Ok(Analysis {
        laplace,
        laplace_roc,
        z,
        z_roc,
        unit_circle: unit_circle(),
    })
}
