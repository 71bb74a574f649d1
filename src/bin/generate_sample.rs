use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

/// Weighted pick: `choices` pairs an option with its probability mass.
fn pick<'a>(rng: &mut SimpleRng, choices: &[(Option<&'a str>, f64)]) -> Option<&'a str> {
    let roll = rng.next_f64();
    let mut acc = 0.0;
    for (value, weight) in choices {
        acc += weight;
        if roll < acc {
            return *value;
        }
    }
    choices.last().and_then(|(value, _)| *value)
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let clients = [
        "ACME Corp",
        "Borealis SA",
        "Cafetal del Sur",
        "Distribuidora Norte",
        "Estudio Lumen",
        "Ferretería Ruiz",
        "Grupo Andino",
        "Hotel Mirador",
    ];

    // Status mix includes missing values and one status the color mapping
    // does not anticipate ("Pendiente"), so the fallback path shows up.
    let status_mix: [(Option<&str>, f64); 4] = [
        (Some("Activo"), 0.55),
        (Some("Desactivado"), 0.25),
        (None, 0.12),
        (Some("Pendiente"), 0.08),
    ];
    let hosting_mix: [(Option<&str>, f64); 3] = [
        (Some("Activo"), 0.5),
        (Some("Inactivo"), 0.3),
        (None, 0.2),
    ];

    let n_rows = 200;
    let mut all_client: Vec<Option<String>> = Vec::with_capacity(n_rows);
    let mut all_status: Vec<Option<String>> = Vec::with_capacity(n_rows);
    let mut all_hosting: Vec<Option<String>> = Vec::with_capacity(n_rows);
    let mut all_monto: Vec<f64> = Vec::with_capacity(n_rows);

    for _ in 0..n_rows {
        // A few rows miss the client name too.
        let client = if rng.next_f64() < 0.05 {
            None
        } else {
            let idx = (rng.next_u64() % clients.len() as u64) as usize;
            Some(clients[idx].to_string())
        };
        all_client.push(client);
        all_status.push(pick(&mut rng, &status_mix).map(str::to_string));
        all_hosting.push(pick(&mut rng, &hosting_mix).map(str::to_string));
        all_monto.push(rng.gauss(2500.0, 800.0).max(100.0).round());
    }

    // Build Arrow arrays
    let client_array = StringArray::from(
        all_client
            .iter()
            .map(|v| v.as_deref())
            .collect::<Vec<_>>(),
    );
    let status_array = StringArray::from(
        all_status
            .iter()
            .map(|v| v.as_deref())
            .collect::<Vec<_>>(),
    );
    let hosting_array = StringArray::from(
        all_hosting
            .iter()
            .map(|v| v.as_deref())
            .collect::<Vec<_>>(),
    );
    let monto_array = Float64Array::from(all_monto);

    let schema = Arc::new(Schema::new(vec![
        Field::new("Nombre Cliente", DataType::Utf8, true),
        Field::new("Apagado Orlando", DataType::Utf8, true),
        Field::new("WebHosting", DataType::Utf8, true),
        Field::new("Monto Contrato", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(client_array),
            Arc::new(status_array),
            Arc::new(hosting_array),
            Arc::new(monto_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "sample_data.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n_rows} client records to {output_path}");
}
