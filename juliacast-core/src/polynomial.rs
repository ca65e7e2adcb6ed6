use crate::complex::Complex;

/// Maximum number of dense terms (degrees `0..MAX_DEGREE`).
pub const MAX_DEGREE: usize = 32;

/// A coefficient whose squared modulus falls below this is treated as zero.
pub const COEFF_ZERO: f64 = 1e-40;

/// A dense, degree-capped complex polynomial.
///
/// Coefficients are stored for every degree up to [`MAX_DEGREE`]; a parallel
/// flag array marks which of them are (numerically) zero so the derivative
/// rule can skip them. The iterated maps only ever use degrees up to 6, but
/// the representation is generic.
#[derive(Debug, Clone)]
pub struct Polynomial {
    degree: usize,
    coeff: [Complex; MAX_DEGREE],
    zero: [bool; MAX_DEGREE],
}

impl Polynomial {
    pub fn new() -> Self {
        Self {
            degree: 0,
            coeff: [Complex::ZERO; MAX_DEGREE],
            zero: [true; MAX_DEGREE],
        }
    }

    /// Reset to the zero polynomial.
    pub fn clear(&mut self) {
        self.coeff = [Complex::ZERO; MAX_DEGREE];
        self.zero = [true; MAX_DEGREE];
        self.degree = 0;
    }

    /// Set the coefficient of `z^idx`.
    ///
    /// A value below the zero threshold is stored but flagged, and does not
    /// raise the degree.
    pub fn set_coeff(&mut self, idx: usize, c: Complex) {
        assert!(idx < MAX_DEGREE, "coefficient index {idx} out of range");
        self.coeff[idx] = c;
        if c.norm_sq() < COEFF_ZERO {
            self.zero[idx] = true;
        } else {
            self.zero[idx] = false;
            if idx > self.degree {
                self.degree = idx;
            }
        }
    }

    pub fn set_coeff_re(&mut self, idx: usize, re: f64) {
        self.set_coeff(idx, Complex::new(re, 0.0));
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn coeff(&self, idx: usize) -> Complex {
        self.coeff[idx]
    }

    /// Evaluate at `z` via Horner's scheme.
    pub fn eval(&self, z: Complex) -> Complex {
        let mut acc = self.coeff[self.degree];
        for i in (1..=self.degree).rev() {
            acc = acc * z + self.coeff[i - 1];
        }
        acc
    }

    /// The formal derivative, skipping flagged-zero coefficients.
    pub fn derivative(&self) -> Self {
        let mut d = Self::new();
        for i in 1..=self.degree {
            if !self.zero[i] {
                d.set_coeff(i - 1, self.coeff[i] * (i as f64));
            }
        }
        d
    }

    /// Smallest power of two `R` such that the filled-in Julia set of the
    /// iterated polynomial is contained in the square `[-R, R]²` (Lagrange
    /// root bound, after Douady).
    pub fn lagrange_radius(&self) -> f64 {
        let mut res = 1.0;
        for i in 0..=self.degree {
            res += self.coeff[i].norm();
        }
        res /= self.coeff[self.degree].norm();
        (res.ceil() as u64).next_power_of_two() as f64
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p(z)=")?;
        let mut first = true;
        for i in (0..=self.degree).rev() {
            if self.zero[i] {
                continue;
            }
            if !first {
                write!(f, "+")?;
            }
            first = false;
            match i {
                0 => write!(f, "({})", self.coeff[i])?,
                1 => write!(f, "({})*z", self.coeff[i])?,
                _ => write!(f, "({})*z^{}", self.coeff[i], i)?,
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// z² + c for the basilica seed.
    fn basilica() -> Polynomial {
        let mut p = Polynomial::new();
        p.set_coeff_re(2, 1.0);
        p.set_coeff(0, Complex::new(-1.0, 0.0));
        p
    }

    #[test]
    fn degree_tracks_highest_nonzero() {
        let p = basilica();
        assert_eq!(p.degree(), 2);

        let mut q = Polynomial::new();
        q.set_coeff_re(5, 1.0);
        q.set_coeff(3, Complex::new(1e-30, 0.0)); // below threshold
        assert_eq!(q.degree(), 5);
    }

    #[test]
    fn horner_matches_direct_evaluation() {
        let p = basilica();
        let z = Complex::new(0.3, -0.4);
        let direct = z * z + Complex::new(-1.0, 0.0);
        let horner = p.eval(z);
        assert!((direct - horner).norm_sq() < 1e-24);
    }

    #[test]
    fn derivative_of_square() {
        // d/dz (z² - 1) = 2z
        let d = basilica().derivative();
        assert_eq!(d.degree(), 1);
        let v = d.eval(Complex::new(3.0, 0.0));
        assert!((v - Complex::new(6.0, 0.0)).norm_sq() < 1e-24);
    }

    #[test]
    fn derivative_skips_flagged_zero_terms() {
        let mut p = Polynomial::new();
        p.set_coeff_re(3, 1.0);
        p.set_coeff(2, Complex::new(1e-25, 1e-25)); // flagged zero
        p.set_coeff_re(1, 2.0);
        let d = p.derivative();
        // 3z² + 2; the z term from the flagged coefficient must be absent.
        assert_eq!(d.degree(), 2);
        let at_one = d.eval(Complex::ONE);
        assert!((at_one - Complex::new(5.0, 0.0)).norm_sq() < 1e-24);
    }

    #[test]
    fn lagrange_radius_basilica() {
        // res = (1 + |1| + |-1|) / 1 = 3 → next power of two is 4.
        assert_eq!(basilica().lagrange_radius(), 4.0);
    }

    #[test]
    fn lagrange_radius_pure_power() {
        // z³: res = (1 + 1) / 1 = 2 → already a power of two.
        let mut p = Polynomial::new();
        p.set_coeff_re(3, 1.0);
        assert_eq!(p.lagrange_radius(), 2.0);
    }

    #[test]
    fn display_form() {
        assert_eq!(basilica().to_string(), "p(z)=(1+0i)*z^2+(-1+0i)");
    }
}
