//! Derivative-free minimization
//!
//! Powell's direction-set method with a Brent line search. No gradients are
//! needed, so objectives that are non-smooth or infinite at a domain
//! boundary are fine as long as the starting point is feasible. Non-finite
//! objective values (`NaN`, `+inf`) are treated as an infinite penalty.

use cgrowth_core::{Error, Result};
use tracing::debug;

/// Golden ratio used for bracket expansion
const GOLD: f64 = 1.618_033_988_749_895;
/// Golden-section fraction used by Brent's method
const CGOLD: f64 = 0.381_966_011_250_105;
/// Protects the relative tolerance near zero
const ZEPS: f64 = 1e-12;
/// Iteration caps for the one-dimensional routines
const BRACKET_MAX_ITER: usize = 200;
const BRENT_MAX_ITER: usize = 500;

/// Result of a successful minimization
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// Location of the minimum
    pub point: Vec<f64>,
    /// Objective value at `point`
    pub value: f64,
    /// Number of outer iterations used
    pub iterations: usize,
    /// Number of objective evaluations
    pub evaluations: usize,
}

/// A derivative-free minimizer over `R^n`
pub trait Minimizer: Clone + Send + Sync {
    /// Minimize `f` starting from `x0`
    fn minimize<F>(&self, f: F, x0: &[f64]) -> Result<Minimum>
    where
        F: FnMut(&[f64]) -> f64;

    /// Method name for diagnostics
    fn name(&self) -> &'static str;
}

/// Powell's conjugate direction method
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Powell {
    /// Relative tolerance on the objective between outer iterations
    pub ftol: f64,
    /// Relative tolerance on the step length in each line search
    pub xtol: f64,
    /// Maximum number of outer iterations
    pub max_iterations: usize,
}

impl Default for Powell {
    fn default() -> Self {
        Self {
            ftol: 1e-10,
            xtol: 1e-8,
            max_iterations: 1000,
        }
    }
}

impl Powell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relative objective tolerance
    pub fn with_ftol(mut self, ftol: f64) -> Self {
        assert!(ftol > 0.0, "ftol must be positive");
        self.ftol = ftol;
        self
    }

    /// Set the line search tolerance
    pub fn with_xtol(mut self, xtol: f64) -> Self {
        assert!(xtol > 0.0, "xtol must be positive");
        self.xtol = xtol;
        self
    }

    /// Set the maximum number of outer iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "max_iterations must be positive");
        self.max_iterations = max_iterations;
        self
    }
}

/// Objective wrapper that counts evaluations and maps non-finite values
struct Objective<F> {
    f: F,
    evaluations: usize,
}

impl<F: FnMut(&[f64]) -> f64> Objective<F> {
    fn eval(&mut self, x: &[f64]) -> f64 {
        self.evaluations += 1;
        let value = (self.f)(x);
        if value.is_nan() {
            f64::INFINITY
        } else {
            value
        }
    }

    /// Value along the line `x + alpha * dir`
    fn eval_along(&mut self, x: &[f64], dir: &[f64], alpha: f64, buf: &mut [f64]) -> f64 {
        for ((b, &xi), &di) in buf.iter_mut().zip(x).zip(dir) {
            *b = xi + alpha * di;
        }
        self.eval(buf)
    }
}

impl Minimizer for Powell {
    fn minimize<F>(&self, f: F, x0: &[f64]) -> Result<Minimum>
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = x0.len();
        if n == 0 {
            return Err(Error::InvalidParameter(
                "Cannot minimize over an empty parameter vector".to_string(),
            ));
        }
        if x0.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter(
                "Initial point contains NaN or infinite values".to_string(),
            ));
        }

        let mut objective = Objective { f, evaluations: 0 };
        let mut x = x0.to_vec();
        let mut fx = objective.eval(&x);
        if fx == f64::INFINITY {
            return Err(Error::Convergence {
                message: "objective is infinite at the initial point".to_string(),
                iterations: 0,
            });
        }

        let mut directions: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let mut d = vec![0.0; n];
                d[i] = 1.0;
                d
            })
            .collect();

        for iteration in 1..=self.max_iterations {
            let fx_start = fx;
            let x_start = x.clone();
            let mut biggest_decrease = 0.0;
            let mut biggest_index = 0;

            for (i, dir) in directions.iter().enumerate() {
                let fx_prev = fx;
                fx = line_minimize(&mut objective, &mut x, dir, fx, self.xtol);
                if fx_prev - fx > biggest_decrease {
                    biggest_decrease = fx_prev - fx;
                    biggest_index = i;
                }
            }

            if fx == f64::NEG_INFINITY {
                return Err(Error::Convergence {
                    message: "objective is unbounded below".to_string(),
                    iterations: iteration,
                });
            }

            if 2.0 * (fx_start - fx) <= self.ftol * (fx_start.abs() + fx.abs()) + ZEPS {
                debug!(
                    "Powell converged after {} iterations ({} evaluations), f={:.6}",
                    iteration, objective.evaluations, fx
                );
                return Ok(Minimum {
                    point: x,
                    value: fx,
                    iterations: iteration,
                    evaluations: objective.evaluations,
                });
            }

            // Try replacing the direction of largest decrease with the
            // average direction moved during this iteration.
            let new_dir: Vec<f64> = x.iter().zip(&x_start).map(|(a, b)| a - b).collect();
            let extrapolated: Vec<f64> = x.iter().zip(&x_start).map(|(a, b)| 2.0 * a - b).collect();
            let f_ext = objective.eval(&extrapolated);

            if f_ext < fx_start {
                let t = 2.0 * (fx_start - 2.0 * fx + f_ext)
                    * (fx_start - fx - biggest_decrease).powi(2)
                    - biggest_decrease * (fx_start - f_ext).powi(2);
                if t < 0.0 {
                    fx = line_minimize(&mut objective, &mut x, &new_dir, fx, self.xtol);
                    directions[biggest_index] = directions[n - 1].clone();
                    directions[n - 1] = new_dir;
                }
            }
        }

        Err(Error::Convergence {
            message: format!(
                "maximum number of iterations ({}) reached, f={fx}",
                self.max_iterations
            ),
            iterations: self.max_iterations,
        })
    }

    fn name(&self) -> &'static str {
        "Powell"
    }
}

/// Minimize along `dir` from `x`, moving `x` to the line minimum
///
/// Returns the new objective value, never larger than `fx`.
fn line_minimize<F: FnMut(&[f64]) -> f64>(
    objective: &mut Objective<F>,
    x: &mut [f64],
    dir: &[f64],
    fx: f64,
    xtol: f64,
) -> f64 {
    if dir.iter().all(|&d| d == 0.0) {
        return fx;
    }

    let origin = x.to_vec();
    let mut buf = vec![0.0; x.len()];
    let mut g = |alpha: f64| objective.eval_along(&origin, dir, alpha, &mut buf);

    let (a, b, c, fb) = bracket(&mut g, fx);
    let (alpha, f_min) = brent(&mut g, a, b, c, fb, xtol);

    if f_min < fx {
        for ((xi, &oi), &di) in x.iter_mut().zip(&origin).zip(dir) {
            *xi = oi + alpha * di;
        }
        f_min
    } else {
        fx
    }
}

/// Bracket a minimum of `g` around `alpha = 0`
///
/// Returns `(a, b, c, g(b))` with `b` between `a` and `c` and
/// `g(b) <= g(a)`, `g(b) <= g(c)`. Expansion is purely golden so that
/// infinite penalties never enter an extrapolation formula.
fn bracket<G: FnMut(f64) -> f64>(g: &mut G, f0: f64) -> (f64, f64, f64, f64) {
    let mut a = 0.0;
    let (mut b, mut fb) = (1.0, g(1.0));

    if fb >= f0 {
        let fm = g(-1.0);
        if fm >= f0 {
            return (-1.0, 0.0, 1.0, f0);
        }
        b = -1.0;
        fb = fm;
    }

    let mut c = b + GOLD * (b - a);
    let mut fc = g(c);
    let mut iter = 0;
    while fc < fb && iter < BRACKET_MAX_ITER {
        a = b;
        b = c;
        fb = fc;
        c = b + GOLD * (b - a);
        fc = g(c);
        iter += 1;
    }

    (a, b, c, fb)
}

/// Brent's method on a bracketing triplet
///
/// Returns `(alpha, g(alpha))` for the best point found.
fn brent<G: FnMut(f64) -> f64>(g: &mut G, ax: f64, bx: f64, cx: f64, fbx: f64, tol: f64) -> (f64, f64) {
    let (mut a, mut b) = if ax < cx { (ax, cx) } else { (cx, ax) };
    let (mut x, mut w, mut v) = (bx, bx, bx);
    let (mut fx, mut fw, mut fv) = (fbx, fbx, fbx);
    let mut d: f64 = 0.0;
    let mut e: f64 = 0.0;

    for _ in 0..BRENT_MAX_ITER {
        let xm = 0.5 * (a + b);
        let tol1 = tol * x.abs() + ZEPS;
        let tol2 = 2.0 * tol1;
        if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
            break;
        }

        let mut use_golden = true;
        if e.abs() > tol1 && fx.is_finite() && fw.is_finite() && fv.is_finite() {
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let e_prev = e;
            e = d;
            let acceptable = p.is_finite()
                && q != 0.0
                && p.abs() < (0.5 * q * e_prev).abs()
                && p > q * (a - x)
                && p < q * (b - x);
            if acceptable {
                d = p / q;
                let u = x + d;
                if u - a < tol2 || b - u < tol2 {
                    d = tol1.copysign(xm - x);
                }
                use_golden = false;
            }
        }
        if use_golden {
            e = if x >= xm { a - x } else { b - x };
            d = CGOLD * e;
        }

        let u = if d.abs() >= tol1 { x + d } else { x + tol1.copysign(d) };
        let fu = g(u);

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    (x, fx)
}
