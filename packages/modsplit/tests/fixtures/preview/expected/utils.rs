pub fn clamp_time(time: f64, duration: f64) -> f64 {
    time.clamp(0.0, duration)
}
