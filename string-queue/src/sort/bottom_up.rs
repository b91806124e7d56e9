use std::cmp::Ordering;

use crate::compare::compare;
use crate::queue::{Link, Queue};

/// Iterative bottom-up merge sort over the queue's links.
///
/// Each pass carves the chain into consecutive block pairs of up to `block`
/// nodes, merges each pair, and relinks the merged runs through a running
/// insertion cursor. The block size doubles until it covers the whole queue,
/// so there is no recursion and no extra storage beyond a few links.
pub fn sort(queue: &mut Queue) {
    let len = queue.len();
    if len <= 1 {
        return;
    }
    let mut block = 1;
    while block < len {
        let mut rest = queue.head.take();
        let mut cursor: Link = None;
        while rest.is_some() {
            let (first, after_first) = carve(queue, rest, block);
            let (second, after_second) = carve(queue, after_first, block);
            rest = after_second;
            let (run_head, run_tail) = merge_runs(queue, first, second);
            match cursor {
                None => queue.head = run_head,
                Some(previous) => queue.set_next(previous, run_head),
            }
            cursor = run_tail;
        }
        // the last node written this pass is the tail candidate
        queue.tail = cursor;
        block *= 2;
    }
}

/// Cuts a run of at most `count` nodes off the front of the chain and returns
/// it together with whatever follows.
fn carve(queue: &mut Queue, head: Link, count: usize) -> (Link, Link) {
    let Some(first) = head else {
        return (None, None);
    };
    let mut last = first;
    for _ in 1..count {
        match queue.next(last) {
            Some(next) => last = next,
            None => break,
        }
    }
    let rest = queue.next(last);
    queue.set_next(last, None);
    (head, rest)
}

/// Merges two sorted runs and returns the merged run's head and tail.
fn merge_runs(queue: &mut Queue, mut first: Link, mut second: Link) -> (Link, Link) {
    let mut head = None;
    let mut last: Link = None;
    while let (Some(a), Some(b)) = (first, second) {
        // a tie goes to the second run's front
        let picked = if compare(queue.value(a), queue.value(b)) != Ordering::Less {
            second = queue.next(b);
            b
        } else {
            first = queue.next(a);
            a
        };
        match last {
            None => head = Some(picked),
            Some(previous) => queue.set_next(previous, Some(picked)),
        }
        last = Some(picked);
    }
    let mut rest = first.or(second);
    match last {
        None => head = rest,
        Some(previous) => queue.set_next(previous, rest),
    }
    // the tail of the run is the end of the spliced remainder
    while let Some(index) = rest {
        last = Some(index);
        rest = queue.next(index);
    }
    (head, last)
}
