//! Monotonic wall-clock helpers used to compute the reporter's elapsed-time
//! figure, read via `clock_gettime(CLOCK_MONOTONIC)` rather than
//! `std::time::Instant` so the crate measures the same clock a host written
//! in C/C++ instrumentation code would.

/// Nanoseconds since an unspecified epoch, monotonic for the life of the
/// process.
#[inline]
pub fn monotonic_now_ns() -> u64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    unsafe {
        libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts);
    }
    (ts.tv_sec as u64) * 1_000_000_000 + ts.tv_nsec as u64
}

/// Seconds elapsed between two `monotonic_now_ns()` readings.
pub fn elapsed_secs(start_ns: u64, end_ns: u64) -> f64 {
    end_ns.saturating_sub(start_ns) as f64 / 1_000_000_000.0
}
