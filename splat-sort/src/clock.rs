//! Wall-clock timing that also works where `std::time::Instant` is unavailable.

#[cfg(not(target_arch = "wasm32"))]
pub(crate) struct Stopwatch(std::time::Instant);

#[cfg(not(target_arch = "wasm32"))]
impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self(std::time::Instant::now())
    }

    pub(crate) fn elapsed_seconds(&self) -> f64 {
        self.0.elapsed().as_secs_f64()
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) struct Stopwatch(f64);

#[cfg(target_arch = "wasm32")]
impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self(js_sys::Date::now())
    }

    pub(crate) fn elapsed_seconds(&self) -> f64 {
        (js_sys::Date::now() - self.0) / 1000.0
    }
}
