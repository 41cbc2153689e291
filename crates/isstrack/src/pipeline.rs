//! Fetch-then-store pipeline.

use tracing::debug;

use crate::error::Result;
use crate::locator::Locator;
use crate::reading::PositionReading;
use crate::sink::ReadingSink;

/// Fetch the current position and hand it to `sink`.
///
/// The sink is only called once the fetch has succeeded.
///
/// # Errors
///
/// Returns the first error from either stage.
pub async fn run<S>(locator: &Locator, sink: &S) -> Result<PositionReading>
where
    S: ReadingSink + ?Sized,
{
    let reading = locator.fetch_position().await?;
    debug!("Recording reading to {}", sink.name());
    sink.record(&reading).await?;
    Ok(reading)
}
