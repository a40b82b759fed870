use crate::domain::PriceRecord;

/// Canonicalize a price series: sort ascending by day, then dedupe.
///
/// When a day appears more than once the last occurrence in input order
/// wins (later rows in an export are corrections). Returns the canonical
/// series and the number of rows dropped.
pub fn canonicalize_prices(mut prices: Vec<PriceRecord>) -> (Vec<PriceRecord>, usize) {
    // Stable: equal days keep input order, so the last one is the newest.
    prices.sort_by_key(|p| p.trading_day);

    let before = prices.len();
    let mut out: Vec<PriceRecord> = Vec::with_capacity(before);
    for price in prices {
        match out.last_mut() {
            Some(prev) if prev.trading_day == price.trading_day => *prev = price,
            _ => out.push(price),
        }
    }
    let dropped = before - out.len();
    (out, dropped)
}

/// Suspicious but valid observations worth a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyReport {
    pub anomaly_type: AnomalyType,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyType {
    /// Volume of zero on a trading day.
    ZeroVolume,
}

/// Scan a canonical series for anomalies.
pub fn detect_anomalies(prices: &[PriceRecord]) -> Vec<AnomalyReport> {
    let mut anomalies = Vec::new();

    let zero_volume = prices.iter().filter(|p| p.volume == 0).count();
    if zero_volume > 0 {
        anomalies.push(AnomalyReport {
            anomaly_type: AnomalyType::ZeroVolume,
            count: zero_volume,
        });
    }

    anomalies
}
