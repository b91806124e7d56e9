use crate::queue::Queue;

pub mod bottom_up;
pub mod recursive;

/// Sorts the queue with the engine named by `algorithm`, falling back to the
/// bottom-up engine for anything unrecognized.
pub fn sort(queue: &mut Queue, algorithm: &str) {
    match algorithm {
        "recursive" => recursive::sort(queue),
        "bottomup" => bottom_up::sort(queue),
        _ => bottom_up::sort(queue),
    }
}
