use anyhow::{Context, Result};

use cereal_dash::data::export::serialize;
use cereal_dash::data::model::{Column, Dataset, Row};

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

fn round(v: f64, digits: i32) -> f64 {
    let p = 10f64.powi(digits);
    (v * p).round() / p
}

/// Per-region climate baseline: (precipitation mm, mean temperature °C).
const REGIONS: [(&str, f64, f64); 5] = [
    ("Boucle du Mouhoun", 850.0, 28.0),
    ("Centre", 750.0, 28.6),
    ("Est", 800.0, 28.9),
    ("Hauts-Bassins", 1000.0, 27.4),
    ("Sahel", 450.0, 29.8),
];

/// Per-cereal (area ha, yield t/ha) baseline.
const CEREALS: [(&str, f64, f64); 4] = [
    ("Maïs", 90_000.0, 1.6),
    ("Mil", 250_000.0, 0.8),
    ("Riz", 15_000.0, 2.1),
    ("Sorgho", 300_000.0, 0.9),
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::new();

    for &(region, rain_base, temp_base) in &REGIONS {
        for year in 1996..=2022 {
            // Climate is a property of the region-year, shared by every cereal.
            let trend = (year - 1996) as f64;
            let precipitation = round(rng.gauss(rain_base, rain_base * 0.12), 1);
            let rain_days = (precipitation / 14.0 + rng.gauss(0.0, 4.0)).round().max(10.0);
            let mean_temp = round(rng.gauss(temp_base + trend * 0.03, 0.4), 2);
            let humidity = round(rng.gauss(60.0 + precipitation / 40.0, 3.0).min(100.0), 1);
            let wind = round(rng.gauss(2.5, 0.3).max(0.1), 2);
            let sunshine = round(rng.gauss(8.2, 0.4), 2);

            for &(cereal, area_base, yield_base) in &CEREALS {
                let rain_factor = (precipitation / rain_base).clamp(0.5, 1.5);
                let area = round(rng.gauss(area_base * (1.0 + trend * 0.01), area_base * 0.08).max(100.0), 0);
                let yield_t = round((yield_base * rain_factor * rng.gauss(1.0, 0.08)).max(0.05), 3);

                let mut row = Row::new(region, cereal, year);
                row.production = Some(round(area * yield_t, 0));
                row.area = Some(area);
                row.yield_t_per_ha = Some(yield_t);
                row.precipitation = Some(precipitation);
                row.rain_days = Some(rain_days);
                row.mean_temp = Some(mean_temp);
                row.max_rel_humidity = Some(humidity);
                row.mean_wind = Some(wind);
                row.sunshine = Some(sunshine);
                rows.push(row);
            }
        }
    }

    let dataset = Dataset::from_rows(Column::ALL.to_vec(), rows);
    let bytes = serialize(&dataset.view(), "Feuil1").context("building workbook")?;

    let output_path = "sample_cereals.xlsx";
    std::fs::write(output_path, &bytes).with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {} rows ({} regions × {} cereals) to {output_path}",
        dataset.len(),
        dataset.regions.len(),
        dataset.cereals.len()
    );
    Ok(())
}
