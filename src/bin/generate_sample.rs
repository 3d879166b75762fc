use anyhow::{Context, Result};

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

    fn range(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Pick an index from cumulative weights summing to 1.0.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let roll = self.next_f64();
        let mut acc = 0.0;
        for (i, w) in weights.iter().enumerate() {
            acc += w;
            if roll < acc {
                return i;
            }
        }
        weights.len() - 1
    }
}

const CONTRACTS: [&str; 3] = ["Month-to-month", "One year", "Two year"];
const SERVICES: [&str; 3] = ["DSL", "Fiber optic", "No"];
const PAYMENTS: [&str; 4] = [
    "Electronic check",
    "Mailed check",
    "Bank transfer (automatic)",
    "Credit card (automatic)",
];

fn customer_id(rng: &mut SimpleRng) -> String {
    let digits: String = (0..4)
        .map(|_| char::from(b'0' + rng.range(10) as u8))
        .collect();
    let letters: String = (0..5)
        .map(|_| char::from(b'A' + rng.range(26) as u8))
        .collect();
    format!("{digits}-{letters}")
}

fn main() -> Result<()> {
    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/telco_customer_churn.csv".to_string());

    if let Some(parent) = std::path::Path::new(&out).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("creating output directory")?;
        }
    }

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&out).context("opening output CSV")?;
    writer.write_record([
        "customerID",
        "Contract",
        "InternetService",
        "PaymentMethod",
        "tenure",
        "MonthlyCharges",
        "TotalCharges",
        "Churn",
    ])?;

    let n_rows = 1500;
    for _ in 0..n_rows {
        let contract = CONTRACTS[rng.weighted(&[0.55, 0.21, 0.24])];
        let service = SERVICES[rng.weighted(&[0.34, 0.44, 0.22])];
        let payment = PAYMENTS[rng.range(PAYMENTS.len())];

        // Longer contracts skew towards longer tenure.
        let tenure = match contract {
            "Month-to-month" => rng.range(36) as u32,
            "One year" => (6 + rng.range(54)) as u32,
            _ => (18 + rng.range(55)) as u32,
        };

        let base = match service {
            "Fiber optic" => 70.0,
            "DSL" => 45.0,
            _ => 20.0,
        };
        let monthly = base + rng.next_f64() * 45.0;

        // Churn odds mirror the classic telco pattern: short month-to-month
        // fiber accounts leave the most.
        let mut odds: f64 = 0.12;
        if contract == "Month-to-month" {
            odds += 0.25;
        }
        if service == "Fiber optic" {
            odds += 0.12;
        }
        if tenure < 6 {
            odds += 0.18;
        }
        let churn = if rng.next_f64() < odds { "Yes" } else { "No" };

        // Brand-new accounts have no total yet, like the real export.
        let total = if tenure == 0 {
            String::new()
        } else {
            let drift = 0.95 + rng.next_f64() * 0.1;
            format!("{:.2}", tenure as f64 * monthly * drift)
        };

        let id = customer_id(&mut rng);
        let tenure_cell = tenure.to_string();
        let monthly_cell = format!("{monthly:.2}");
        writer.write_record([
            id.as_str(),
            contract,
            service,
            payment,
            tenure_cell.as_str(),
            monthly_cell.as_str(),
            total.as_str(),
            churn,
        ])?;
    }

    writer.flush().context("writing output CSV")?;
    println!("Wrote {n_rows} rows to {out}");
    Ok(())
}
