//! Exponential Moving Average, recursive form.
//!
//! k = 2/(span+1), seeded with the first value (no SMA seed, no
//! re-normalisation): EMA[0] = X[0], EMA[i] = EMA[i-1] + k*(X[i] - EMA[i-1]).
//! Defined from the first value onward.

pub fn ema_values(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return Vec::new();
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter();

    if let Some(&first) = iter.next() {
        let mut ema = first;
        out.push(ema);
        for &x in iter {
            ema += k * (x - ema);
            out.push(ema);
        }
    }

    out
}
