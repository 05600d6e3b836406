use crate::{
    error::DispatchError,
    metrics::MetricValue,
};

/// Delivers metric values to a backend.
///
/// `deliver` is called once per value in emission order, `flush` once at the end of every cycle.
pub trait Dispatcher: Send + Sync {
    fn deliver(&mut self, value: &MetricValue) -> Result<(), DispatchError>;

    fn flush(&mut self) -> Result<(), DispatchError> {
        Ok(())
    }

    fn name(&self) -> &'static str;
}
