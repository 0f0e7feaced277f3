// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The per-context monitor.

Every [Context](crate::Context) keeps its mutable state behind one of these.
It is a reader/writer spinlock that only hands out access through closures, so a
critical section can't escape its scope.  Critical sections must be short: copy
what you need out, release, then do the slow work (calling writers, visiting
other contexts).

The lock is released when the closure unwinds, so a panic inside a critical
section does not wedge the context.
*/

use std::cell::UnsafeCell;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

const UNLOCKED: u8 = 0;
//we allow for 254 readers or 1 writer (val = 255)
const LOCKED_WRITE: u8 = u8::MAX;

pub struct Spinlock<T> {
    data: UnsafeCell<T>,
    locked: AtomicU8,
}

unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send + Sync> Sync for Spinlock<T> {}

/// Releases a held lock on drop, including during unwinding.
struct Unlock<'a> {
    locked: &'a AtomicU8,
    write: bool,
}

impl Drop for Unlock<'_> {
    fn drop(&mut self) {
        if self.write {
            self.locked.store(UNLOCKED, Release);
        } else {
            self.locked.fetch_sub(1, Release);
        }
    }
}

impl<T> Spinlock<T> {
    pub const fn new(data: T) -> Self {
        Spinlock {
            data: UnsafeCell::new(data),
            locked: AtomicU8::new(UNLOCKED),
        }
    }

    fn lock_write(&self) -> Unlock<'_> {
        while self
            .locked
            .compare_exchange_weak(UNLOCKED, LOCKED_WRITE, Acquire, Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        Unlock {
            locked: &self.locked,
            write: true,
        }
    }

    fn lock_read(&self) -> Unlock<'_> {
        while self
            .locked
            .fetch_update(Acquire, Relaxed, |v| {
                if v < (LOCKED_WRITE - 1) {
                    Some(v + 1)
                } else {
                    None
                }
            })
            .is_err()
        {
            std::hint::spin_loop();
        }
        Unlock {
            locked: &self.locked,
            write: false,
        }
    }

    /// Exclusive access.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let _unlock = self.lock_write();
        // SAFETY: the write lock excludes every other reader and writer until _unlock drops
        unsafe { f(&mut *self.data.get()) }
    }

    /// Shared access.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let _unlock = self.lock_read();
        // SAFETY: only readers can hold the lock concurrently with us
        unsafe { f(&*self.data.get()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn many_writers() {
        let lock = Arc::new(Spinlock::new(0u32));
        std::thread::scope(|s| {
            for _ in 0..8 {
                let lock = lock.clone();
                s.spawn(move || {
                    for _ in 0..1000 {
                        lock.with_mut(|v| *v += 1);
                    }
                });
            }
        });
        assert_eq!(lock.with(|v| *v), 8000);
    }

    #[test]
    fn nested_reads() {
        let lock = Spinlock::new(vec![1, 2, 3]);
        let sum = lock.with(|outer| lock.with(|inner| outer.len() + inner.len()));
        assert_eq!(sum, 6);
    }

    #[test]
    fn released_after_panic() {
        let lock = Spinlock::new(1);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            lock.with_mut(|v| {
                if *v == 1 {
                    panic!("inside critical section");
                }
            });
        }));
        assert!(result.is_err());
        lock.with_mut(|v| *v += 1);
        assert_eq!(lock.with(|v| *v), 2);
    }
}
