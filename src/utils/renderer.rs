use burn::train::renderer::{MetricState, MetricsRenderer, TrainingProgress};
use derive_new::new;

/// A Simple renderer for TUI-disabled modes, reporting progress through the log
#[derive(new)]
pub struct Simple {}

impl MetricsRenderer for Simple {
    fn update_train(&mut self, _state: MetricState) {}

    fn update_valid(&mut self, _state: MetricState) {}

    fn render_train(&mut self, item: TrainingProgress) {
        log::info!("[train] {:?}", item);
    }

    fn render_valid(&mut self, item: TrainingProgress) {
        log::info!("[valid] {:?}", item);
    }
}
