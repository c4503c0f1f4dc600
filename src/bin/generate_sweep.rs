use std::fmt::Write as _;
use std::f64::consts::PI;

use anyhow::{Context, Result};

/// Reflection magnitude of a synthetic antenna: a high-reflection baseline
/// with Lorentzian dips at each resonance.
fn reflection_magnitude(freq: f64, resonances: &[(f64, f64, f64)]) -> f64 {
    let mut mag = 0.95;
    for &(f0, bandwidth, depth) in resonances {
        let x = (freq - f0) / bandwidth;
        mag -= depth / (1.0 + x * x);
    }
    mag.clamp(0.02, 0.99)
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output_path = args.next().unwrap_or_else(|| "sample_sweep.s1p".to_string());
    let points: usize = args
        .next()
        .map(|n| n.parse().context("point count must be an integer"))
        .transpose()?
        .unwrap_or(801);

    let mut rng = SimpleRng::new(42);

    // Sweep 50 MHz → 1.5 GHz; a dual-band antenna with resonances at
    // 146 MHz and 435 MHz plus a shallow harmonic near 1.3 GHz.
    let f_start = 50e6;
    let f_stop = 1.5e9;
    let resonances = [
        (146e6, 4e6, 0.85),
        (435e6, 9e6, 0.70),
        (1.3e9, 40e6, 0.25),
    ];
    let group_delay = 1.1e-9;

    let mut body = String::new();
    writeln!(body, "! synthetic dual-band antenna sweep")?;
    writeln!(body, "! generated by s11scope generate_sweep, seed 42")?;
    writeln!(body, "# Hz S RI R 50")?;

    for i in 0..points {
        let freq = f_start + (f_stop - f_start) * i as f64 / (points - 1) as f64;
        let mag = reflection_magnitude(freq, &resonances) + rng.gauss(0.0, 0.003);
        let phase = -2.0 * PI * freq * group_delay + rng.gauss(0.0, 0.002);
        let re = mag * phase.cos();
        let im = mag * phase.sin();
        writeln!(body, "{freq:.0} {re:.6} {im:.6}")?;
    }

    let sweep = s11scope::parse_sweep(&body).context("generated sweep does not parse")?;

    std::fs::write(&output_path, &body)
        .with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {} sweep points to {output_path}", sweep.len());
    Ok(())
}
