//! Piecewise-polynomial interpolant over a [`SampleSeries`].
//!
//! Per-segment antiderivatives are precomputed at fit time so a definite
//! integral is two O(log n) segment lookups rather than numerical
//! quadrature. Sign convention: `integral(a, b) == -integral(b, a)`.
//! Query points outside the knot domain are clamped to it.

use crate::FocusError;
use crate::types::{SampleSeries, SplineOrder};

/// Cubic segment on `t = x - x_i`: `y + b t + c t^2 + d t^3`.
#[derive(Debug, Clone, Copy)]
struct Segment {
    y: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Segment {
    fn value(&self, t: f64) -> f64 {
        self.y + t * (self.b + t * (self.c + t * self.d))
    }

    /// Antiderivative with F(0) = 0.
    fn primitive(&self, t: f64) -> f64 {
        t * (self.y + t * (self.b / 2.0 + t * (self.c / 3.0 + t * self.d / 4.0)))
    }
}

/// Interpolant fitted through a sample series.
///
/// `SplineOrder::Linear` joins the samples with straight segments;
/// `SplineOrder::Cubic` is a natural cubic spline (zero second derivative at
/// both ends). With only two samples the cubic degenerates to the linear
/// case.
#[derive(Debug, Clone)]
pub struct Spline {
    knots: Vec<f64>,
    segments: Vec<Segment>,
    /// Cumulative integral at each knot, `cumulative[0] == 0`.
    cumulative: Vec<f64>,
}

impl Spline {
    /// Fit an interpolant of the given order.
    ///
    /// # Errors
    /// `Data` if the series holds fewer than two samples.
    pub fn fit(series: &SampleSeries, order: SplineOrder) -> Result<Self, FocusError> {
        let samples = series.samples();
        let n = samples.len();
        if n < 2 {
            return Err(FocusError::Data(format!(
                "need at least 2 samples to interpolate, got {n}"
            )));
        }
        let knots: Vec<f64> = samples.iter().map(|s| s.mjd).collect();
        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();

        let second_derivs = match order {
            SplineOrder::Linear => vec![0.0; n],
            SplineOrder::Cubic => natural_second_derivatives(&knots, &values),
        };

        let mut segments = Vec::with_capacity(n - 1);
        let mut cumulative = Vec::with_capacity(n);
        cumulative.push(0.0);
        for i in 0..n - 1 {
            let h = knots[i + 1] - knots[i];
            let (m0, m1) = (second_derivs[i], second_derivs[i + 1]);
            let seg = Segment {
                y: values[i],
                b: (values[i + 1] - values[i]) / h - h * (2.0 * m0 + m1) / 6.0,
                c: m0 / 2.0,
                d: (m1 - m0) / (6.0 * h),
            };
            cumulative.push(cumulative[i] + seg.primitive(h));
            segments.push(seg);
        }

        Ok(Self {
            knots,
            segments,
            cumulative,
        })
    }

    /// Knot domain `[min, max]` the interpolant is defined on.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.knots.len() - 1])
    }

    /// Evaluate at `x`, clamped to the knot domain.
    #[must_use]
    pub fn value(&self, x: f64) -> f64 {
        let (i, t) = self.locate(x);
        self.segments[i].value(t)
    }

    /// Definite integral over `[a, b]`, endpoints clamped to the domain.
    #[must_use]
    pub fn integral(&self, a: f64, b: f64) -> f64 {
        self.primitive_at(b) - self.primitive_at(a)
    }

    /// Index of the segment containing `x` and the local offset into it.
    fn locate(&self, x: f64) -> (usize, f64) {
        let (lo, hi) = self.domain();
        let x = x.clamp(lo, hi);
        let i = self
            .knots
            .partition_point(|&k| k <= x)
            .saturating_sub(1)
            .min(self.segments.len() - 1);
        (i, x - self.knots[i])
    }

    fn primitive_at(&self, x: f64) -> f64 {
        let (i, t) = self.locate(x);
        self.cumulative[i] + self.segments[i].primitive(t)
    }
}

/// Second derivatives of the natural cubic spline through `(xs, ys)`.
///
/// Tridiagonal system solved with the Thomas algorithm; the end conditions
/// pin the second derivative to zero at both boundary knots.
fn natural_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }
    let rows = n - 2;
    let mut diag = vec![0.0; rows];
    let mut rhs = vec![0.0; rows];

    for k in 0..rows {
        let h_lo = xs[k + 1] - xs[k];
        let h_hi = xs[k + 2] - xs[k + 1];
        diag[k] = 2.0 * (h_lo + h_hi);
        rhs[k] = 6.0 * ((ys[k + 2] - ys[k + 1]) / h_hi - (ys[k + 1] - ys[k]) / h_lo);
    }
    // Forward elimination: the sub-diagonal entry for row k is h(k), the
    // super-diagonal for row k-1 is also h(k) (the shared interval width).
    for k in 1..rows {
        let shared = xs[k + 1] - xs[k];
        let w = shared / diag[k - 1];
        diag[k] -= w * shared;
        rhs[k] -= w * rhs[k - 1];
    }
    // Back substitution into m[1..=rows].
    m[rows] = rhs[rows - 1] / diag[rows - 1];
    for k in (0..rows - 1).rev() {
        let shared = xs[k + 2] - xs[k + 1];
        m[k + 1] = (rhs[k] - shared * m[k + 2]) / diag[k];
    }
    m
}
