//! Real roots of low-degree polynomials.
//!
//! Used by the swept (time-of-impact) collision utilities. Quadratics use the
//! numerically stable closed form; cubics and quartics are bracketed between
//! the roots of their derivative (where the polynomial is monotonic) and then
//! bisected, which never misses a sign change and never produces NaN.

/// Coefficients this small relative to the rest are treated as zero.
const RELATIVE_EPSILON: f64 = 1e-12;

/// Bisection iteration cap (f64 converges long before this).
const MAX_BISECTIONS: u32 = 200;

/// Real roots of `a*t^2 + b*t + c = 0`, ascending. Degrades to linear when `a` vanishes.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    real_roots(&[a, b, c])
}

/// Real roots of `a*t^3 + b*t^2 + c*t + d = 0`, ascending.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    real_roots(&[a, b, c, d])
}

/// Real roots of `a*t^4 + b*t^3 + c*t^2 + d*t + e = 0`, ascending.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Vec<f64> {
    real_roots(&[a, b, c, d, e])
}

/// Real roots of a polynomial given highest-degree coefficient first.
pub fn real_roots(coeffs: &[f64]) -> Vec<f64> {
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Vec::new();
    }

    let coeffs = trim_leading(coeffs);
    let mut roots = match coeffs.len() {
        0 | 1 => Vec::new(),
        2 => vec![-coeffs[1] / coeffs[0]],
        3 => quadratic(coeffs[0], coeffs[1], coeffs[2]),
        _ => bracketed(coeffs),
    };

    roots.retain(|r| r.is_finite());
    roots.sort_by(|a, b| a.total_cmp(b));
    roots.dedup_by(|a, b| (*a - *b).abs() <= 1e-9 * (1.0 + b.abs()));
    roots
}

/// Evaluate the polynomial at `t` (Horner).
pub fn evaluate(coeffs: &[f64], t: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, c| acc * t + c)
}

fn trim_leading(coeffs: &[f64]) -> &[f64] {
    let scale = coeffs.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    if scale == 0.0 {
        return &[];
    }
    let start = coeffs
        .iter()
        .position(|c| c.abs() > RELATIVE_EPSILON * scale)
        .unwrap_or(coeffs.len());
    &coeffs[start..]
}

fn quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Vec::new();
    }
    if disc == 0.0 {
        return vec![-b / (2.0 * a)];
    }
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    if q == 0.0 {
        return vec![0.0];
    }
    vec![q / a, c / q]
}

fn bracketed(coeffs: &[f64]) -> Vec<f64> {
    let degree = coeffs.len() - 1;
    let derivative: Vec<f64> = coeffs[..degree]
        .iter()
        .enumerate()
        .map(|(i, c)| c * (degree - i) as f64)
        .collect();

    // Cauchy bound: every real root lies in [-bound, bound].
    let lead = coeffs[0];
    let bound = 1.0 + coeffs[1..].iter().fold(0.0_f64, |m, c| m.max((c / lead).abs()));

    let mut points = Vec::with_capacity(degree + 1);
    points.push(-bound);
    points.extend(
        real_roots(&derivative)
            .into_iter()
            .filter(|x| x.abs() < bound),
    );
    points.push(bound);

    let mut roots = Vec::with_capacity(degree);
    for pair in points.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        let f_lo = evaluate(coeffs, lo);
        if f_lo == 0.0 {
            roots.push(lo);
            continue;
        }
        let f_hi = evaluate(coeffs, hi);
        if f_lo.signum() != f_hi.signum() && f_hi != 0.0 {
            roots.push(bisect(coeffs, lo, hi, f_lo));
        }
    }
    if let Some(&last) = points.last() {
        if evaluate(coeffs, last) == 0.0 {
            roots.push(last);
        }
    }
    roots
}

fn bisect(coeffs: &[f64], mut lo: f64, mut hi: f64, mut f_lo: f64) -> f64 {
    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        let f_mid = evaluate(coeffs, mid);
        if f_mid == 0.0 {
            return mid;
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
