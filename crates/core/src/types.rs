/// Projects are keyed by random UUIDs so concurrent creates never collide.
pub type ProjectId = uuid::Uuid;

/// All timestamps are UTC. On the wire they are epoch milliseconds.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Source of "now" for anything that stamps records.
///
/// A plain function pointer so stores can be given a fixed or stepping
/// clock in tests without any trait machinery.
pub type Clock = fn() -> Timestamp;

/// The wall clock.
pub fn system_clock() -> Timestamp {
    chrono::Utc::now()
}

/// Return `now`, or `previous` if the clock has gone backwards.
///
/// Keeps modification stamps non-decreasing across mutations.
pub fn monotonic_after(previous: Timestamp, now: Timestamp) -> Timestamp {
    now.max(previous)
}
