/*!
 * Reporter Traits
 */

use crate::core::errors::Result;

/// Publishes the current state of a registry somewhere
pub trait Reporter: Send + Sync {
    fn report(&self) -> Result<()>;
}

impl<R: Reporter + ?Sized> Reporter for std::sync::Arc<R> {
    fn report(&self) -> Result<()> {
        (**self).report()
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&self) -> Result<()> {
        (**self).report()
    }
}
