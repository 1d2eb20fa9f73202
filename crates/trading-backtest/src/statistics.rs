//! Performance statistics.
//!
//! Every reported statistic is computed here, from the equity curve and the
//! per-step return series of a run. The functions are pure so they can be
//! applied to curves that did not come from a full simulation.

use serde::{Deserialize, Serialize};
use trading_core::types::{equity_values, EquityPoint};

/// Trading periods per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Summary statistics of a backtest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Total return percentage
    pub total_return_pct: f64,
    /// Annualized return percentage
    pub annualized_return_pct: f64,
    /// Maximum drawdown percentage, in [0, 100]
    pub max_drawdown_pct: f64,
    /// Annualized Sharpe ratio
    pub sharpe_ratio: f64,
    /// Annualized Sortino ratio
    pub sortino_ratio: f64,
    /// Total number of trades
    pub total_trades: usize,
}

impl PerformanceStats {
    /// Compute all statistics.
    ///
    /// Drawdown is measured from a high-water mark that starts at
    /// `initial_capital`, so a loss on the very first step counts.
    /// Empty equity or return series produce all-zero statistics; the trade
    /// count is reported either way.
    pub fn compute(
        equity: &[EquityPoint],
        returns: &[f64],
        initial_capital: f64,
        risk_free_rate: f64,
        total_trades: usize,
    ) -> Self {
        if equity.is_empty() || returns.is_empty() {
            return Self {
                total_trades,
                ..Self::default()
            };
        }

        let total_return_pct = total_return_pct(equity, initial_capital);

        Self {
            total_return_pct,
            annualized_return_pct: annualized_return_pct(total_return_pct, returns.len()),
            max_drawdown_pct: max_drawdown_pct(&equity_values(equity), initial_capital),
            sharpe_ratio: sharpe_ratio(returns, risk_free_rate),
            sortino_ratio: sortino_ratio(returns, risk_free_rate),
            total_trades,
        }
    }
}

/// Total return percentage of the final equity over initial capital.
pub fn total_return_pct(equity: &[EquityPoint], initial_capital: f64) -> f64 {
    match equity.last() {
        Some(last) if initial_capital > 0.0 => {
            finite_or_zero((last.equity / initial_capital - 1.0) * 100.0)
        }
        _ => 0.0,
    }
}

/// Per-step drawdown percentages from the running high-water mark.
///
/// The high-water mark starts at `initial_peak` (normally the initial
/// capital) and rises with every new equity high.
pub fn drawdown_series(values: &[f64], initial_peak: f64) -> Vec<f64> {
    let mut peak = initial_peak;

    values
        .iter()
        .map(|&value| {
            if value > peak {
                peak = value;
            }
            if peak > 0.0 {
                finite_or_zero((peak - value) / peak * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            }
        })
        .collect()
}

/// Maximum drawdown percentage over the whole series.
pub fn max_drawdown_pct(values: &[f64], initial_peak: f64) -> f64 {
    drawdown_series(values, initial_peak)
        .into_iter()
        .fold(0.0, f64::max)
}

/// Population mean and standard deviation.
///
/// A deviation that is pure rounding noise of the mean (at most
/// `n * EPSILON * |mean|`) is returned as exactly zero, so constant series
/// report zero variance.
fn mean_std(returns: &[f64]) -> (f64, f64) {
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev <= n * f64::EPSILON * mean.abs() {
        (mean, 0.0)
    } else {
        (mean, std_dev)
    }
}

/// Mean per-step return in excess of the per-step risk-free rate.
fn excess_mean(mean: f64, risk_free_rate: f64) -> f64 {
    mean - risk_free_rate / TRADING_DAYS_PER_YEAR
}

/// Annualized Sharpe ratio using population standard deviation.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let (mean, std_dev) = mean_std(returns);
    if std_dev.is_nan() || std_dev == 0.0 {
        return 0.0;
    }

    finite_or_zero(excess_mean(mean, risk_free_rate) / std_dev * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Annualized Sortino ratio.
///
/// The numerator matches Sharpe. The denominator is the root mean square of
/// the strictly negative returns, averaged over their count only.
pub fn sortino_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let (mean, _) = mean_std(returns);

    let (downside_sq, downside_count) = returns
        .iter()
        .filter(|&&r| r < 0.0)
        .fold((0.0, 0usize), |(sum, count), r| (sum + r * r, count + 1));

    if downside_count == 0 {
        return 0.0;
    }

    let downside_dev = (downside_sq / downside_count as f64).sqrt();
    if downside_dev.is_nan() || downside_dev <= 0.0 {
        return 0.0;
    }

    finite_or_zero(excess_mean(mean, risk_free_rate) / downside_dev * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Compound annual growth rate implied by `total_return_pct` over
/// `return_count` trading periods.
pub fn annualized_return_pct(total_return_pct: f64, return_count: usize) -> f64 {
    let years = return_count as f64 / TRADING_DAYS_PER_YEAR;
    if years <= 0.0 {
        return 0.0;
    }

    let growth = 1.0 + total_return_pct / 100.0;
    finite_or_zero((growth.powf(1.0 / years) - 1.0) * 100.0)
}

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(values: &[f64]) -> Vec<EquityPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| EquityPoint::new(format!("t{}", i), *v))
            .collect()
    }

    #[test]
    fn test_total_return() {
        let equity = curve(&[10000.0, 10500.0, 9000.0]);
        assert!((total_return_pct(&equity, 10000.0) + 10.0).abs() < 1e-9);
        assert_eq!(total_return_pct(&[], 10000.0), 0.0);
    }

    #[test]
    fn test_max_drawdown() {
        let dd = max_drawdown_pct(&[100.0, 120.0, 90.0, 130.0, 117.0], 100.0);
        assert!((dd - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_drawdown_peak_starts_at_initial_capital() {
        let series = drawdown_series(&[100.0, 50.0, 100.0], 100.0);
        assert_eq!(series, vec![0.0, 50.0, 0.0]);

        // A first-step loss below starting capital is a drawdown
        let series = drawdown_series(&[8000.0, 8400.0, 10000.0, 10400.0], 10000.0);
        assert_eq!(series, vec![20.0, 16.0, 0.0, 0.0]);
        assert_eq!(max_drawdown_pct(&[8000.0, 8400.0], 10000.0), 20.0);
    }

    #[test]
    fn test_drawdown_bounds() {
        let inputs: [(&[f64], f64); 6] = [
            (&[], 100.0),
            (&[0.0, 0.0], 0.0),
            (&[100.0, 0.0], 100.0),
            (&[5.0, 10.0, 1e-9, 1e9], 5.0),
            (&[-10.0, -5.0, 3.0], 10.0),
            (&[1.0, 2.0], -1.0),
        ];
        for (values, initial_peak) in inputs {
            let dd = max_drawdown_pct(values, initial_peak);
            assert!((0.0..=100.0).contains(&dd), "drawdown {} out of bounds", dd);
        }
        assert_eq!(max_drawdown_pct(&[100.0, 0.0], 100.0), 100.0);
    }

    #[test]
    fn test_sharpe_zero_variance() {
        assert_eq!(sharpe_ratio(&[0.0, 0.0, 0.0], 0.0), 0.0);
        assert_eq!(sharpe_ratio(&[0.01; 300], 0.0), 0.0);
        assert_eq!(sharpe_ratio(&[], 0.0), 0.0);
    }

    #[test]
    fn test_sharpe_tiny_but_nonzero_variance() {
        // mean 1e-13, population std 1e-13
        let sharpe = sharpe_ratio(&[2e-13, 0.0], 0.0);
        assert!((sharpe - 252.0_f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_sharpe_population_std() {
        let returns = [0.01, -0.01];
        // mean 0, population std 0.01
        assert!(sharpe_ratio(&returns, 0.0).abs() < 1e-12);

        let returns = [0.02, 0.0];
        // mean 0.01, population std 0.01
        let expected = 252.0_f64.sqrt();
        assert!((sharpe_ratio(&returns, 0.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sharpe_risk_free_rate() {
        let returns = [0.02, 0.0];
        let expected = (0.01 - 0.0252 / 252.0) / 0.01 * 252.0_f64.sqrt();
        assert!((sharpe_ratio(&returns, 0.0252) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sortino() {
        assert_eq!(sortino_ratio(&[0.01, 0.02], 0.0), 0.0);
        assert_eq!(sortino_ratio(&[], 0.0), 0.0);

        let returns = [0.03, -0.01, 0.01];
        let mean = 0.01;
        let downside = 0.01;
        let expected = mean / downside * 252.0_f64.sqrt();
        assert!((sortino_ratio(&returns, 0.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sortino_uses_negative_count() {
        // Two negatives out of four: denominator averages over 2, not 4
        let returns = [0.04, -0.02, 0.0, -0.02];
        let mean = 0.0;
        assert_eq!(sortino_ratio(&returns, 0.0), mean);

        let returns = [0.06, -0.02, 0.0, -0.02];
        let expected = 0.005 / 0.02 * 252.0_f64.sqrt();
        assert!((sortino_ratio(&returns, 0.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_annualized_return() {
        // One full year: annualized equals total
        assert!((annualized_return_pct(10.0, 252) - 10.0).abs() < 1e-9);
        // Half a year of 10% compounds to 21% annualized
        assert!((annualized_return_pct(10.0, 126) - 21.0).abs() < 1e-9);
        assert_eq!(annualized_return_pct(10.0, 0), 0.0);
    }

    #[test]
    fn test_annualized_return_overflow_guarded() {
        assert_eq!(annualized_return_pct(1e6, 1), 0.0);
    }

    #[test]
    fn test_compute_empty_is_all_zero() {
        let stats = PerformanceStats::compute(&[], &[], 10000.0, 0.0, 0);
        assert_eq!(stats, PerformanceStats::default());

        let stats = PerformanceStats::compute(&curve(&[10000.0]), &[], 10000.0, 0.0, 3);
        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.total_return_pct, 0.0);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let equity = curve(&[10000.0, 10100.0, 9950.0, 10200.0, 10150.0]);
        let returns = trading_core::types::simple_returns(&equity, 10000.0);

        let a = PerformanceStats::compute(&equity, &returns, 10000.0, 0.01, 2);
        let b = PerformanceStats::compute(&equity, &returns, 10000.0, 0.01, 2);
        assert_eq!(a.sharpe_ratio.to_bits(), b.sharpe_ratio.to_bits());
        assert_eq!(a.sortino_ratio.to_bits(), b.sortino_ratio.to_bits());
        assert_eq!(a, b);
    }
}
