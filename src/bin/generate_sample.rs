use anyhow::{Context, Result};
use serde_json::json;

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
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const COMPONENTS: usize = 4;

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    // Each group sits around its own centre in the first two components;
    // later components carry shrinking noise only.
    let groups = [
        ("Sample_A", [2.0, 1.0]),
        ("Sample_B", [-1.5, 2.5]),
        ("Sample_C", [0.0, -2.0]),
    ];
    let per_group = 10;

    let mut scores: Vec<Vec<f64>> = Vec::new();
    let mut infos = Vec::new();
    for (sample, centre) in &groups {
        for replicate in 0..per_group {
            let row: Vec<f64> = (0..COMPONENTS)
                .map(|c| {
                    let mean = centre.get(c).copied().unwrap_or(0.0);
                    rng.gauss(mean, 0.4 / (c + 1) as f64)
                })
                .collect();
            scores.push(row);
            infos.push(json!({ "sample": sample, "replicate": replicate }));
        }
    }

    let rows = scores.len();
    let pca = json!({ "model": { "name": "PCA" }, "data": scores });
    std::fs::write("sample_pca.json", serde_json::to_string_pretty(&pca)?)
        .context("writing sample_pca.json")?;
    std::fs::write("sample_infos.json", serde_json::to_string_pretty(&infos)?)
        .context("writing sample_infos.json")?;

    // Correlation-like symmetric matrix between the components.
    let mut writer = csv::Writer::from_path("sample_matrix.csv").context("creating CSV")?;
    for i in 0..COMPONENTS {
        let row: Vec<String> = (0..COMPONENTS)
            .map(|j| {
                let v = if i == j {
                    1.0
                } else {
                    1.0 / (1.0 + (i as f64 - j as f64).abs())
                };
                format!("{v:.4}")
            })
            .collect();
        writer.write_record(&row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {} PCA rows ({COMPONENTS} components), infos and a {COMPONENTS}x{COMPONENTS} matrix",
        rows
    );
    Ok(())
}
