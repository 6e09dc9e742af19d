use serde::Serialize;

/// One output row, in the column order of the public salary dataset.
#[derive(Serialize)]
struct SampleRow<'a> {
    work_year: i32,
    job_title: &'a str,
    job_category: &'a str,
    salary_currency: &'a str,
    salary: f64,
    salary_in_usd: f64,
    employee_residence: &'a str,
    experience_level: &'a str,
    employment_type: &'a str,
    work_setting: &'a str,
    company_location: &'a str,
    company_size: &'a str,
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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (title, category, base salary in USD)
const TITLES: [(&str, &str, f64); 6] = [
    ("Data Scientist", "Data Science and Research", 140_000.0),
    ("Data Engineer", "Data Engineering", 135_000.0),
    ("Data Analyst", "Data Analysis", 100_000.0),
    ("Machine Learning Engineer", "Machine Learning and AI", 160_000.0),
    ("Research Scientist", "Data Science and Research", 170_000.0),
    ("Analytics Engineer", "Data Engineering", 150_000.0),
];

/// (experience level, salary multiplier)
const LEVELS: [(&str, f64); 4] = [
    ("Entry-level", 0.6),
    ("Mid-level", 0.8),
    ("Senior", 1.0),
    ("Executive", 1.3),
];

/// (country, currency, USD per unit of currency, salary multiplier)
const LOCATIONS: [(&str, &str, f64, f64); 6] = [
    ("United States", "USD", 1.0, 1.0),
    ("United Kingdom", "GBP", 1.25, 0.7),
    ("Germany", "EUR", 1.08, 0.65),
    ("Canada", "CAD", 0.74, 0.8),
    ("India", "INR", 0.012, 0.25),
    ("Spain", "EUR", 1.08, 0.5),
];

const EMPLOYMENT: [&str; 4] = ["Full-time", "Full-time", "Contract", "Part-time"];
const SETTINGS: [&str; 3] = ["Remote", "Hybrid", "In-person"];
const SIZES: [&str; 3] = ["S", "M", "L"];
const YEARS: [i32; 4] = [2020, 2021, 2022, 2023];

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "jobs_in_data.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    let n_rows = 2000;
    for _ in 0..n_rows {
        let &(title, category, base) = rng.pick(&TITLES);
        let &(level, level_mult) = rng.pick(&LEVELS);
        let &(location, currency, usd_rate, loc_mult) = rng.pick(&LOCATIONS);
        let &year = rng.pick(&YEARS);
        let growth = 1.0 + 0.04 * f64::from(year - YEARS[0]);

        let usd = (base * level_mult * loc_mult * growth + rng.gauss(0.0, 15_000.0)).max(15_000.0);
        let usd = (usd / 100.0).round() * 100.0;

        writer.serialize(SampleRow {
            work_year: year,
            job_title: title,
            job_category: category,
            salary_currency: currency,
            salary: (usd / usd_rate).round(),
            salary_in_usd: usd,
            employee_residence: location,
            experience_level: level,
            employment_type: *rng.pick(&EMPLOYMENT),
            work_setting: *rng.pick(&SETTINGS),
            company_location: location,
            company_size: *rng.pick(&SIZES),
        })?;
    }
    writer.flush()?;

    println!("Wrote {n_rows} salary records to {output_path}");
    Ok(())
}
