/// Format an amount in the given currency with two decimals: `RWF 1250.00`.
pub fn money(val: f64, currency: &str) -> String {
    let val = if val.is_finite() { val } else { 0.0 };
    if val < 0.0 {
        format!("-{currency} {:.2}", val.abs())
    } else {
        format!("{currency} {val:.2}")
    }
}
