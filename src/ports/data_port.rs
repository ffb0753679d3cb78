//! Market data access port trait.

use crate::domain::error::StockscanError;
use crate::domain::ohlcv::OhlcvBar;

/// Source of price history. Implementations are shared across the analysis
/// worker pool, hence `Sync`.
pub trait DataPort: Sync {
    /// Bars for `ticker`, oldest first. An empty vector means the source has
    /// nothing for this ticker. `period` and `interval` are passed through
    /// uninterpreted by the analysis core.
    fn fetch_bars(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<OhlcvBar>, StockscanError>;

    /// Human-readable instrument name, if the source knows one.
    fn display_name(&self, ticker: &str) -> Option<String>;
}
