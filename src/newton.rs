//! Newton-Raphson iteration safeguarded by a bracketing interval.

// Once the iterates have changed sides of the root this many times, Newton
// is evidently not converging on its own and we switch to bisection.
const MAX_OSCILLATIONS: u32 = 3;

// Newton converges only linearly at multiple roots. Rather than crawl, we
// switch to bisection after this many steps.
const MAX_NEWTON_STEPS: u32 = 64;

/// Finds a root of `f` between `neg` and `pos`, starting from `start`.
///
/// `f` returns the value and derivative of the function. We need
/// `f(neg) < 0 < f(pos)`, but `neg` and `pos` may come in either order.
/// If `start` isn't in the closed interval between them, we start at the
/// midpoint.
///
/// Every Newton step that would leave the current bracket is replaced by a
/// bisection step, so this always converges (to a sign change, if `f` isn't
/// continuous). It stops when an iterate evaluates to exactly zero or the
/// step is below `f64::EPSILON` relative to the iterate.
pub(crate) fn find_root(
    f: impl Fn(f64) -> (f64, f64),
    start: f64,
    mut neg: f64,
    mut pos: f64,
) -> f64 {
    debug_assert!(f(neg).0 <= 0.0 && f(pos).0 >= 0.0);

    let mut x = if start == neg || start == pos || is_between(start, neg, pos) {
        start
    } else {
        midpoint(neg, pos)
    };
    let mut oscillations = 0;
    let mut last_sign = None;
    let mut steps = 0;

    loop {
        let (y, dy) = f(x);
        steps += 1;
        if y == 0.0 {
            log::trace!("exact root {x:e} after {steps} steps");
            return x;
        }

        let sign = y > 0.0;
        if sign {
            pos = x;
        } else {
            neg = x;
        }
        if last_sign.is_some_and(|s| s != sign) {
            oscillations += 1;
        }
        last_sign = Some(sign);

        let bisect = oscillations >= MAX_OSCILLATIONS || steps > MAX_NEWTON_STEPS;
        let newton = x - y / dy;
        let next = if !bisect && dy != 0.0 && is_between(newton, neg, pos) {
            newton
        } else {
            midpoint(neg, pos)
        };

        if (next - x).abs() <= f64::EPSILON * next.abs() || next == neg || next == pos {
            log::trace!("converged to {next:e} after {steps} steps, {oscillations} oscillations");
            return next;
        }
        x = next;
    }
}

// Is `x` strictly between `a` and `b`?
fn is_between(x: f64, a: f64, b: f64) -> bool {
    (a < x && x < b) || (b < x && x < a)
}

// Overflow-proof midpoint between two numbers.
fn midpoint(x: f64, y: f64) -> f64 {
    if (x > 0.0) == (y > 0.0) {
        x + (y - x) / 2.0
    } else {
        (x + y) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cubic;

    fn cubic(p: Cubic) -> impl Fn(f64) -> (f64, f64) {
        let d = p.deriv();
        move |x| (p.eval(x), d.eval(x))
    }

    #[test]
    fn simple_root() {
        // x^3 - 2
        let f = cubic(Cubic::new([-2.0, 0.0, 0.0, 1.0]));
        let r = find_root(&f, 1.0, 0.0, 2.0);
        assert!((r - 2.0f64.cbrt()).abs() <= 4.0 * f64::EPSILON);

        // The bracket can be given in either order.
        let f = cubic(Cubic::new([2.0, 0.0, 0.0, -1.0]));
        let r = find_root(&f, 1.0, 2.0, 0.0);
        assert!((r - 2.0f64.cbrt()).abs() <= 4.0 * f64::EPSILON);
    }

    #[test]
    fn start_outside_bracket() {
        let f = cubic(Cubic::new([-2.0, 0.0, 0.0, 1.0]));
        let r = find_root(&f, 100.0, 0.0, 2.0);
        assert!((r - 2.0f64.cbrt()).abs() <= 4.0 * f64::EPSILON);
    }

    #[test]
    fn start_at_endpoint() {
        let f = cubic(Cubic::new([-2.0, 0.0, 0.0, 1.0]));
        let r = find_root(&f, 2.0, 0.0, 2.0);
        assert!((r - 2.0f64.cbrt()).abs() <= 4.0 * f64::EPSILON);
    }

    #[test]
    fn triple_root() {
        // (x - 1)^3: Newton crawls here and the derivative vanishes at the
        // root, so we rely on bisection.
        let f = cubic(Cubic::new([-1.0, 3.0, -3.0, 1.0]));
        let r = find_root(&f, 1.9, 0.0, 2.0);
        assert!((r - 1.0).abs() <= 1e-4);
    }

    #[test]
    fn zero_derivative_start() {
        // x^3 - x - 1 has a critical point at 1/sqrt(3)
        let f = cubic(Cubic::new([-1.0, -1.0, 0.0, 1.0]));
        let r = find_root(&f, 3.0f64.sqrt().recip(), 0.0, 2.0);
        assert!(f(r).0.abs() <= 1e-14);
    }

    #[test]
    fn bisects_after_oscillating() {
        // Newton maps 1 + d to 1 - 2d/3 for |x - 1|^0.6, so it hops across
        // the root at every step.
        let points = std::cell::RefCell::new(Vec::new());
        let f = |x: f64| {
            points.borrow_mut().push(x);
            let d = x - 1.0;
            (d.signum() * d.abs().powf(0.6), 0.6 * d.abs().powf(-0.4))
        };
        let r = find_root(f, 1.9, 0.0, 2.0);
        assert!((r - 1.0).abs() <= 1e-12);

        let points = points.into_inner();
        // Debug builds also evaluate the bracket endpoints up front.
        let points = &points[if cfg!(debug_assertions) { 2 } else { 0 }..];
        let expected = [1.9, 0.4, 1.4, 1.0 - 0.8 / 3.0];
        for (x, e) in points.iter().zip(expected) {
            assert!((x - e).abs() <= 1e-12, "{points:?}");
        }
        // The third change of sides switches to bisection.
        assert!((points[4] - midpoint(points[3], points[2])).abs() <= 1e-15, "{points:?}");
    }

    #[test]
    fn always_converges() {
        arbtest::arbtest(|u| {
            // x^3 + a2 x^2 + a1 x + a0 with |a_i| <= 1 and a0 < 0 has a root in (0, 2).
            let a2 = u.int_in_range(-1000..=1000)? as f64 / 1000.0;
            let a1 = u.int_in_range(-1000..=1000)? as f64 / 1000.0;
            let a0 = u.int_in_range(-1000..=-1)? as f64 / 1000.0;
            let start = u.int_in_range(0..=2000)? as f64 / 1000.0;
            let p = Cubic::new([a0, a1, a2, 1.0]);
            let r = find_root(cubic(p), start, 0.0, 2.0);
            assert!((0.0..=2.0).contains(&r));
            assert!(p.eval(r).abs() <= 1e-13, "{p:?} at {r}");
            Ok(())
        })
        .budget_ms(1_000);
    }
}
