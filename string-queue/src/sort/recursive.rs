use std::cmp::Ordering;

use crate::compare::compare;
use crate::queue::{Link, Queue};

/// Recursive divide-and-conquer merge sort over the queue's links.
pub fn sort(queue: &mut Queue) {
    if queue.len() <= 1 {
        return;
    }
    let head = queue.head;
    queue.head = sort_chain(queue, head);
    // The old tail is somewhere in the middle now; walk to the new one.
    let mut tail = queue.head;
    while let Some(index) = tail {
        if queue.next(index).is_none() {
            break;
        }
        tail = queue.next(index);
    }
    queue.tail = tail;
}

fn sort_chain(queue: &mut Queue, head: Link) -> Link {
    let Some(first) = head else {
        return None;
    };
    if queue.next(first).is_none() {
        return head;
    }
    let second = split(queue, first);
    let left = sort_chain(queue, head);
    let right = sort_chain(queue, second);
    merge(queue, left, right)
}

/// Tortoise-and-hare cut: the slow cursor lands on the last node of the first
/// half, the chain is severed after it, and the second half's head returned.
fn split(queue: &mut Queue, head: usize) -> Link {
    let mut slow = head;
    let mut fast = queue.next(head);
    while let Some(ahead) = fast {
        match queue.next(ahead) {
            Some(two_ahead) => {
                // its safe to unwrap here because fast is always ahead of slow
                slow = queue.next(slow).unwrap();
                fast = queue.next(two_ahead);
            }
            None => break,
        }
    }
    let second = queue.next(slow);
    queue.set_next(slow, None);
    second
}

fn merge(queue: &mut Queue, mut first: Link, mut second: Link) -> Link {
    let mut head = None;
    let mut cursor: Link = None;
    while let (Some(a), Some(b)) = (first, second) {
        // a tie goes to the second chain's front
        let picked = if compare(queue.value(a), queue.value(b)) != Ordering::Less {
            second = queue.next(b);
            b
        } else {
            first = queue.next(a);
            a
        };
        match cursor {
            None => head = Some(picked),
            Some(previous) => queue.set_next(previous, Some(picked)),
        }
        cursor = Some(picked);
    }
    // Splice whichever chain remains; this also terminates the merged chain.
    let rest = first.or(second);
    match cursor {
        None => head = rest,
        Some(previous) => queue.set_next(previous, rest),
    }
    head
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::queue::Queue;

    fn queue_of(values: &[&str]) -> Queue {
        let mut queue = Queue::new();
        queue.extend(values.iter().copied());
        queue
    }

    #[test]
    fn sorts_into_non_descending_order() {
        let values = ["banana", "apple", "cherry", "apple", "date", ""];
        let mut queue = queue_of(&values);
        super::sort(&mut queue);
        let expected = values.iter().copied().sorted().collect_vec();
        assert_eq!(queue.iter().collect_vec(), expected);
        assert_eq!(queue.len(), values.len());
    }

    #[test]
    fn reestablishes_the_tail() {
        let mut queue = queue_of(&["bb", "aa", "cc"]);
        super::sort(&mut queue);
        assert_eq!(queue.iter().collect_vec(), ["aa", "bb", "cc"]);
        assert_eq!(queue.tail.map(|index| queue.value(index)), Some("cc"));
        queue.push_back("dd");
        assert_eq!(queue.iter().collect_vec(), ["aa", "bb", "cc", "dd"]);
    }

    #[test]
    fn sorting_twice_changes_nothing() {
        let mut queue = queue_of(&["pear", "fig", "fig", "apricot"]);
        super::sort(&mut queue);
        let first_pass = queue.iter().map(str::to_owned).collect_vec();
        super::sort(&mut queue);
        assert_eq!(queue.iter().collect_vec(), first_pass);
    }

    #[test]
    fn empty_and_singleton_queues_are_untouched() {
        let mut queue = Queue::new();
        super::sort(&mut queue);
        assert!(queue.is_empty());
        queue.push_back("only");
        super::sort(&mut queue);
        assert_eq!(queue.iter().collect_vec(), ["only"]);
        assert_eq!(queue.head, queue.tail);
    }

    #[test]
    fn two_elements_swap_when_out_of_order() {
        let mut queue = queue_of(&["b", "a"]);
        super::sort(&mut queue);
        assert_eq!(queue.iter().collect_vec(), ["a", "b"]);
        assert_eq!(queue.tail.map(|index| queue.value(index)), Some("b"));
    }
}
