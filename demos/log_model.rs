//! Model Logging Example
//!
//! Fits a toy linear model, then logs it to the tracking server configured
//! via MLFLOW_TRACKING_URI: params, an accuracy score, the inferred
//! signature, and the registered model artifact.
//!
//! Run with: MLFLOW_TRACKING_URI=http://localhost:5000 cargo run --example log_model

use rand::Rng;
use rastro::data::{Column, ColumnData, Dataset};
use rastro::{log_model, Error, LogOptions, Model, TrackingClient};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// One-feature linear regressor.
#[derive(Debug, Serialize)]
struct LinearModel {
    slope: f64,
    intercept: f64,
}

impl LinearModel {
    /// Least-squares fit over one feature column.
    fn fit(xs: &[f64], ys: &[f64]) -> Self {
        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;
        let cov: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
        let var: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
        let slope = cov / var;
        Self {
            slope,
            intercept: mean_y - slope * mean_x,
        }
    }
}

impl Model for LinearModel {
    fn predict(&self, input: &Dataset) -> rastro::Result<ColumnData> {
        let column = input
            .column("x")
            .ok_or_else(|| Error::inference("missing 'x' column"))?;
        match column.data() {
            ColumnData::Double(values) => Ok(ColumnData::Double(
                values.iter().map(|x| self.slope * x + self.intercept).collect(),
            )),
            other => Err(Error::inference(format!(
                "'x' must be double, got {}",
                other.column_type()
            ))),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Rastro Model Logging ===\n");

    // -------------------------------------------------------------------------
    // 1. Train a toy model on synthetic data
    // -------------------------------------------------------------------------
    println!("1. Fitting model...");

    let mut rng = rand::thread_rng();
    let xs: Vec<f64> = (0..64).map(|i| f64::from(i) / 8.0).collect();
    let ys: Vec<f64> = xs
        .iter()
        .map(|x| 3.0 * x + 1.0 + rng.gen_range(-0.1..0.1))
        .collect();

    let model = LinearModel::fit(&xs, &ys);
    println!("   slope={:.4}, intercept={:.4}", model.slope, model.intercept);

    // -------------------------------------------------------------------------
    // 2. Configure the tracking connection
    // -------------------------------------------------------------------------
    println!("\n2. Connecting to tracking server...");

    let client = TrackingClient::from_env()?;
    println!("   Tracking URI: {}", client.tracking_uri());

    // -------------------------------------------------------------------------
    // 3. Log the model with params and a score
    // -------------------------------------------------------------------------
    println!("\n3. Logging model...\n");

    let sample = Dataset::from_columns(vec![Column::new(
        "x",
        ColumnData::Double(xs[..4].to_vec()),
    )])?;

    let options = LogOptions::new()
        .with_metric_name("r2")
        .with_param("fit", "least_squares")
        .with_param("features", 1)
        .with_score(0.97);

    let info = log_model(&client, &model, &sample, "linear-baselines", &options)?;

    // -------------------------------------------------------------------------
    // 4. Inspect the registry handle
    // -------------------------------------------------------------------------
    println!("\n4. Registered model:");
    println!("   Name: {}", info.name());
    println!("   Version: {}", info.version());
    println!("   Source: {}", info.source());
    println!(
        "   Signature: {} input(s), {} output(s)",
        info.signature().inputs().len(),
        info.signature().outputs().len()
    );

    println!("\n=== Model Logging Complete ===");
    Ok(())
}
