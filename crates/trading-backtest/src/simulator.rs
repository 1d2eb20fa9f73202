//! Execution simulator.

use tracing::{debug, warn};
use trading_core::types::{equity_values, simple_returns, EquityPoint, Observation, Trade, TradeAction};

use crate::execution::ExecutionModel;
use crate::statistics::drawdown_series;
use crate::BacktestConfig;

/// Output of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    /// Executed trades in order
    pub trades: Vec<Trade>,
    /// One point per observation
    pub equity_curve: Vec<EquityPoint>,
    /// Simple return per observation; the first is measured against initial capital
    pub returns: Vec<f64>,
    /// Drawdown percentage per observation
    pub drawdowns: Vec<f64>,
    /// Cash left after the last observation
    pub final_cash: f64,
    /// Shares held after the last observation
    pub final_position: u64,
}

impl Ledger {
    /// Last equity value, or `None` for an empty run.
    pub fn final_equity(&self) -> Option<f64> {
        self.equity_curve.last().map(|p| p.equity)
    }
}

/// Mutable cash/position state of a single run.
#[derive(Debug)]
struct LedgerState {
    cash: f64,
    position: u64,
    last_signal: i32,
    trades: Vec<Trade>,
}

impl LedgerState {
    fn new(initial_capital: f64) -> Self {
        Self {
            cash: initial_capital,
            position: 0,
            last_signal: 0,
            trades: Vec::new(),
        }
    }

    /// Spend all available cash on whole shares.
    fn buy(&mut self, timestamp: &str, price: f64) {
        if !(price.is_finite() && price > 0.0) {
            warn!(timestamp, price, "Skipping buy at non-positive price");
            return;
        }

        let mut shares = (self.cash / price).floor() as u64;
        // Division rounding can land on the next integer
        if shares > 0 && shares as f64 * price > self.cash {
            shares -= 1;
        }
        if shares == 0 {
            debug!(timestamp, price, cash = self.cash, "Insufficient cash for one share");
            return;
        }

        let trade = Trade::new(timestamp, TradeAction::Buy, shares, price);
        self.cash -= trade.value;
        self.position = shares;
        debug!(%trade, "Executed");
        self.trades.push(trade);
    }

    /// Liquidate the whole position.
    fn sell(&mut self, timestamp: &str, price: f64) {
        let trade = Trade::new(timestamp, TradeAction::Sell, self.position, price);
        self.cash += trade.value;
        self.position = 0;
        debug!(%trade, "Executed");
        self.trades.push(trade);
    }

    #[inline]
    fn equity(&self, price: f64) -> f64 {
        self.cash + self.position as f64 * price
    }
}

/// Replays observations as an all-in/all-out long/flat strategy.
///
/// The simulator holds only immutable parameters. Each call to [`run`]
/// builds its own ledger state, so one instance can be shared freely.
///
/// [`run`]: Simulator::run
#[derive(Debug, Clone)]
pub struct Simulator {
    initial_capital: f64,
    execution: ExecutionModel,
}

impl Simulator {
    pub fn new(config: &BacktestConfig) -> Self {
        Self {
            initial_capital: config.initial_capital,
            execution: ExecutionModel::from_config(config),
        }
    }

    /// Run the simulation.
    ///
    /// Trades fire only when the signal differs from the last one acted on,
    /// so runs of identical signals never re-trigger. Equity is marked at
    /// the raw observation price.
    pub fn run(&self, observations: &[Observation]) -> Ledger {
        let mut state = LedgerState::new(self.initial_capital);
        let mut equity_curve = Vec::with_capacity(observations.len());

        for (index, observation) in observations.iter().enumerate() {
            if observation.signal != state.last_signal {
                if observation.wants_long() && state.position == 0 {
                    let price = self
                        .execution
                        .fill_price(observations, index, TradeAction::Buy);
                    state.buy(&observation.timestamp, price);
                } else if observation.wants_flat() && state.position > 0 {
                    let price = self
                        .execution
                        .fill_price(observations, index, TradeAction::Sell);
                    state.sell(&observation.timestamp, price);
                }
                state.last_signal = observation.signal;
            }

            equity_curve.push(EquityPoint::new(
                observation.timestamp.clone(),
                state.equity(observation.price),
            ));
        }

        let returns = simple_returns(&equity_curve, self.initial_capital);
        let drawdowns = drawdown_series(&equity_values(&equity_curve), self.initial_capital);

        Ledger {
            trades: state.trades,
            equity_curve,
            returns,
            drawdowns,
            final_cash: state.cash,
            final_position: state.position,
        }
    }
}
