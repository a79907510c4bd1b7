use std::future::Future;

use storefront_core::{FetchRequest, ProductPage};

use crate::error::ClassifiedError;

/// Outcome of a single store call.
pub type AcquisitionResult = Result<ProductPage, ClassifiedError>;

/// A backing product store.
///
/// Implementations translate the request into their store's own query form
/// and make exactly one network call, with no internal retry. Failures are
/// returned already classified.
pub trait DataSource: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    fn get(&self, request: &FetchRequest) -> impl Future<Output = AcquisitionResult> + Send;
}
