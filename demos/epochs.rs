/// Epoch traversal demo - shuffled mini-batches over a synthetic dataset
use minibatch::{BatchConfig, BatchIterator};
use ndarray::{Array1, Array2};

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Synthetic dataset: 256 observations of 16 features each, plus labels.
    // The trailing axis indexes observations.
    let features = Array2::from_shape_fn((16, 256), |(f, o)| (f * o) as f32);
    let labels = Array1::from_shape_fn(256, |o| (o % 10) as f32);

    let mut loader = BatchIterator::new(
        (features, labels),
        BatchConfig::default().batch_size(32).shuffle(true).seed(7),
    )?;

    log::info!("Loader created:");
    log::info!("  - Observations: {}", loader.num_observations());
    log::info!("  - Batch size: {}", loader.batch_size());
    log::info!("  - Batches per epoch: {}", loader.num_batches());

    for epoch in 0..3 {
        let mut seen = 0;
        let mut label_sum = 0.0;

        for (x, y) in &mut loader {
            // A real training step would consume x and y here
            assert_eq!(x.shape()[1], y.len());
            seen += y.len();
            label_sum += y.sum();
        }

        log::info!(
            "Epoch {} complete: {} observations, label sum {:.1}",
            epoch,
            seen,
            label_sum
        );
    }

    Ok(())
}
