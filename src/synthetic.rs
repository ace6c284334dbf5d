//! Deterministic synthetic data: demo spectra for the sample generator and
//! the illustrative scatter panel of the dashboard.

pub fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Sum of Gaussian bands `(mu, sigma, amplitude)` plus white noise.
pub fn generate_spectrum(
    wavenumbers: &[f64],
    peaks: &[(f64, f64, f64)],
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    wavenumbers
        .iter()
        .map(|&wn| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(wn, mu, sigma, amp))
                .sum();
            signal + rng.gauss(0.0, noise_level)
        })
        .collect()
}

/// `n` points with standard-normal coordinates.
pub fn random_points(n: usize, rng: &mut SimpleRng) -> Vec<[f64; 3]> {
    (0..n)
        .map(|_| [rng.gauss(0.0, 1.0), rng.gauss(0.0, 1.0), rng.gauss(0.0, 1.0)])
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}
