//! Unbounded, lock-free, multi-producer single-consumer completion queue.
//!
//! Producers link nodes onto the tail with a single atomic swap, so the order in
//! which `push` calls linearize is the order values come out of `pop`. There is
//! exactly one consumer: the thread waiting on the round.

use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

/// A node in the queue. The head node is always a consumed stub.
struct Node<T> {
    next: AtomicPtr<Node<T>>,
    value: Option<T>,
}

impl<T> Node<T> {
    fn alloc(value: Option<T>) -> *mut Self {
        Box::into_raw(Box::new(Self {
            next: AtomicPtr::new(ptr::null_mut()),
            value,
        }))
    }
}

/// Result of a single `pop` attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Pop<T> {
    /// A value was dequeued.
    Data(T),
    /// No value has been pushed since the last pop.
    Empty,
    /// A producer has swapped the tail but not yet linked its node.
    ///
    /// The value becomes visible as soon as that producer finishes its push.
    Inconsistent,
}

/// The accumulator shared by every completion sink of a round.
pub struct CompletionQueue<T> {
    /// Only touched by the consumer.
    head: CachePadded<UnsafeCell<*mut Node<T>>>,
    tail: CachePadded<AtomicPtr<Node<T>>>,
}

// Safety: values move between threads through the queue; the consumer-only head
// is guarded by the `pop` contract.
unsafe impl<T: Send> Send for CompletionQueue<T> {}
unsafe impl<T: Send> Sync for CompletionQueue<T> {}

impl<T> CompletionQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        let stub = Node::alloc(None);
        Self {
            head: CachePadded::new(UnsafeCell::new(stub)),
            tail: CachePadded::new(AtomicPtr::new(stub)),
        }
    }

    /// Appends a value. Safe to call from any number of threads at once.
    pub fn push(&self, value: T) {
        let node = Node::alloc(Some(value));
        let prev = self.tail.swap(node, Ordering::AcqRel);
        // Safety: `prev` stays allocated until the consumer moves past it, and the
        // consumer cannot move past it before this store makes `node` reachable.
        unsafe {
            (*prev).next.store(node, Ordering::Release);
        }
    }

    /// Attempts to dequeue the oldest value.
    ///
    /// # Safety
    /// At most one thread may call `pop` (or `pop_spin`) on a queue at any time.
    pub unsafe fn pop(&self) -> Pop<T> {
        let head_ptr = self.head.get();
        let head = *head_ptr;
        let next = (*head).next.load(Ordering::Acquire);

        if next.is_null() {
            return if self.tail.load(Ordering::Acquire) == head {
                Pop::Empty
            } else {
                Pop::Inconsistent
            };
        }

        *head_ptr = next;
        // The producer wrote `value` before publishing `next`; later producers
        // only touch `(*next).next`.
        let value = (*next).value.take();
        drop(Box::from_raw(head));

        match value {
            Some(v) => Pop::Data(v),
            None => Pop::Empty,
        }
    }

    /// Dequeues a value that is known to have been pushed, riding out the short
    /// window where a producer has claimed the tail but not linked its node.
    ///
    /// Returns `None` only if the queue is genuinely empty.
    ///
    /// # Safety
    /// Same single-consumer contract as [`pop`](Self::pop).
    pub unsafe fn pop_spin(&self) -> Option<T> {
        let backoff = crossbeam_utils::Backoff::new();
        loop {
            match self.pop() {
                Pop::Data(v) => return Some(v),
                Pop::Empty => return None,
                Pop::Inconsistent => backoff.snooze(),
            }
        }
    }
}

impl<T> Default for CompletionQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for CompletionQueue<T> {
    fn drop(&mut self) {
        // `&mut self` means every producer is gone; values still queued here were
        // never observed by a consumer.
        let mut curr = *self.head.get_mut();
        while !curr.is_null() {
            // Safety: every node was created by `Node::alloc` and is owned by the
            // queue once reachable from head.
            let node = unsafe { Box::from_raw(curr) };
            curr = node.next.load(Ordering::Relaxed);
        }
    }
}
