pub mod capture;
pub mod channel;
pub mod session;

/// Current wall-clock time as unix milliseconds.
///
/// All timestamps in the ledgers (capture observation, tax accrual,
/// settlement) use this single representation.
pub fn unix_ms() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
