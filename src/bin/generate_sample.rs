use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// Logistic growth towards `adult` grams, `days` after hatching.
fn growth(days: f64, hatch: f64, adult: f64, rate: f64, midpoint: f64) -> f64 {
    hatch + (adult - hatch) / (1.0 + (-rate * (days - midpoint)).exp())
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
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Gecko {
    name: &'static str,
    first_weigh_in: NaiveDate,
    adult_mass: f64,
    weigh_ins: usize,
}

fn weigh_ins(gecko: &Gecko, rng: &mut SimpleRng) -> Vec<(NaiveDate, f64)> {
    let mut date = gecko.first_weigh_in;
    let mut days = 30.0;
    let mut rows = Vec::with_capacity(gecko.weigh_ins);
    for _ in 0..gecko.weigh_ins {
        let mass = growth(days, 3.0, gecko.adult_mass, 0.012, 300.0) + rng.gauss(0.0, 1.2);
        rows.push((date, (mass.max(1.0) * 10.0).round() / 10.0));

        let gap = 14 + (rng.next_u64() % 21) as i64;
        date += Duration::days(gap);
        days += gap as f64;
    }
    rows
}

fn write_per_gecko(dir: &Path, gecko: &Gecko, rows: &[(NaiveDate, f64)]) -> Result<PathBuf> {
    let path = dir.join(format!("{}.csv", gecko.name));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["date", "mass"])?;
    for (date, mass) in rows {
        writer.write_record([date.format("%Y-%m-%d").to_string(), mass.to_string()])?;
    }
    writer.flush()?;
    Ok(path)
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let start = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).context("invalid start date");

    let geckos = [
        Gecko { name: "murphey", first_weigh_in: start(2019, 3, 1)?, adult_mass: 62.0, weigh_ins: 40 },
        Gecko { name: "bojack", first_weigh_in: start(2019, 6, 15)?, adult_mass: 75.0, weigh_ins: 36 },
        Gecko { name: "lu", first_weigh_in: start(2020, 2, 1)?, adult_mass: 48.0, weigh_ins: 28 },
    ];

    // Combined file: padded header and names, like a hand-kept log.
    let combined_path = dir.join("geckos.csv");
    let mut combined = csv::Writer::from_path(&combined_path)
        .with_context(|| format!("creating {}", combined_path.display()))?;
    combined.write_record(["gecko ", " date", " mass"])?;

    let mut total = 0;
    for gecko in &geckos {
        let rows = weigh_ins(gecko, &mut rng);
        let path = write_per_gecko(&dir, gecko, &rows)?;
        println!("Wrote {} weigh-ins to {}", rows.len(), path.display());

        for (date, mass) in &rows {
            combined.write_record([
                format!("{} ", gecko.name),
                date.format("%Y-%m-%d").to_string(),
                mass.to_string(),
            ])?;
        }
        total += rows.len();
    }
    combined.flush()?;

    println!("Wrote {total} weigh-ins to {}", combined_path.display());
    Ok(())
}
