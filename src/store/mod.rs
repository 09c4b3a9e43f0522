// src/store/mod.rs
//
// The canonical Progress Store Adapter: every table the service touches has
// exactly one typed access path here. Handlers never write SQL. Reads map to
// `StoreReadFailed`, writes to `StoreWriteFailed`, so call sites can apply
// the degradation policy (reads fall back to defaults, practice writes are
// logged and swallowed).

pub mod attempts;
pub mod enrollments;
pub mod progress;
pub mod sessions;
pub mod users;
pub mod weak_spots;
