// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A fixed-size pool of worker threads draining a FIFO queue.
//!
//! The pool is told up front exactly how many jobs it will ever be
//! given.  Each worker takes a ticket off a shared countdown before it
//! goes looking for work; when the countdown has nothing left to give,
//! the worker exits.  That makes the pool single-use: once the last
//! expected job has been taken, every worker is on its way out and
//! nothing posted afterwards would run, so `post` refuses it.
//!
//! The flip side is that a pool which is promised `n` jobs and given
//! fewer never finishes.  Workers holding a ticket wait on the queue
//! forever, and `join` (or dropping the pool) waits on them.

use std::collections::VecDeque;
use std::convert::TryFrom;
use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use error::{Error, Result};

type Task = Box<dyn FnOnce() + Send + 'static>;

struct Queue {
    tasks: Mutex<VecDeque<Task>>,
    available: Condvar,
    remaining: AtomicIsize,
}

impl Queue {
    // Tasks are run outside the lock, so a poisoned queue is still a
    // consistent one.
    fn lock(&self) -> MutexGuard<VecDeque<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next(&self) -> Task {
        let mut tasks = self.lock();
        loop {
            if let Some(task) = tasks.pop_front() {
                return task;
            }
            tasks = self
                .available
                .wait(tasks)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn work(&self) {
        while self.remaining.fetch_sub(1, Ordering::SeqCst) > 0 {
            let task = self.next();
            task();
        }
    }
}

/// A single-use pool of `workers` threads that will run exactly
/// `expected` jobs and then shut down.
pub struct ThreadPool {
    queue: Arc<Queue>,
    workers: Vec<JoinHandle<()>>,
    expected: usize,
    posted: usize,
}

impl ThreadPool {
    /// Spawn the workers.  They start waiting for jobs immediately.
    pub fn new(workers: usize, expected: usize) -> Result<ThreadPool> {
        if workers == 0 {
            return Err(Error::NoWorkers);
        }
        let remaining = isize::try_from(expected).map_err(|_| Error::JobCount { expected })?;

        let queue = Arc::new(Queue {
            tasks: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            remaining: AtomicIsize::new(remaining),
        });

        let mut pool = ThreadPool {
            queue,
            workers: Vec::with_capacity(workers),
            expected,
            posted: 0,
        };

        for id in 0..workers {
            let queue = Arc::clone(&pool.queue);
            let spawned = thread::Builder::new()
                .name(format!("mandel-pool-{}", id))
                .spawn(move || {
                    queue.work();
                    trace!("pool worker {} exiting", id);
                });
            match spawned {
                Ok(handle) => pool.workers.push(handle),
                Err(e) => {
                    pool.release();
                    return Err(Error::Spawn(e));
                }
            }
        }

        debug!("pool started: {} workers, {} jobs expected", workers, expected);
        Ok(pool)
    }

    // Let the workers we did manage to start go home: no more tickets,
    // and one no-op for each worker that may already hold one.
    fn release(&mut self) {
        self.queue.remaining.store(0, Ordering::SeqCst);
        {
            let mut tasks = self.queue.lock();
            for _ in 0..self.workers.len() {
                tasks.push_back(Box::new(|| ()));
            }
        }
        self.queue.available.notify_all();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }

    fn reserve(&mut self, count: usize) -> Result<()> {
        if self.posted + count > self.expected {
            return Err(Error::JobOverflow {
                expected: self.expected,
            });
        }
        self.posted += count;
        Ok(())
    }

    /// Queue one job and wake one waiting worker.
    pub fn post<F>(&mut self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.reserve(1)?;
        self.queue.lock().push_back(Box::new(job));
        self.queue.available.notify_one();
        Ok(())
    }

    /// Queue a batch of jobs in one critical section, so workers see
    /// all of them or none of them, then wake every worker.  A batch
    /// that would exceed the expected count is refused whole.
    pub fn post_batch<I, F>(&mut self, jobs: I) -> Result<()>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() + Send + 'static,
    {
        let jobs: Vec<Task> = jobs.into_iter().map(|f| Box::new(f) as Task).collect();
        self.reserve(jobs.len())?;
        self.queue.lock().extend(jobs);
        self.queue.available.notify_all();
        Ok(())
    }

    /// Jobs promised at construction that have not been posted yet.
    /// Anything but zero here means `join` will block forever.
    pub fn unposted(&self) -> usize {
        self.expected - self.posted
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    /// Wait for every worker to run out of tickets and exit.  When this
    /// returns, every posted job has run and its writes are visible.
    pub fn join(mut self) -> Result<()> {
        let mut panicked = false;
        for handle in self.workers.drain(..) {
            panicked |= handle.join().is_err();
        }
        debug!("pool finished {} jobs", self.posted);
        if panicked {
            Err(Error::WorkerPanicked)
        } else {
            Ok(())
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}
