//! Executed trades.

use serde::{Deserialize, Serialize};

/// Trade direction. Only long/flat transitions exist, so a buy always opens
/// the position and a sell always closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

/// Record of a single fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Timestamp of the observation that triggered the trade
    pub timestamp: String,
    pub action: TradeAction,
    /// Whole shares filled
    pub shares: u64,
    /// Fill price after latency and slippage
    pub price: f64,
    /// Notional value (shares * price)
    pub value: f64,
}

impl Trade {
    /// Create a trade, deriving its notional value.
    pub fn new(timestamp: impl Into<String>, action: TradeAction, shares: u64, price: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            action,
            shares,
            price,
            value: shares as f64 * price,
        }
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} {} shares @ ${:.2} = ${:.2}",
            self.timestamp, self.action, self.shares, self.price, self.value
        )
    }
}
