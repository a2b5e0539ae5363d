//! Reusable scratch buffers for record formatting
//!
//! Formatting a record needs a byte buffer. Instead of allocating one per
//! call, buffers are taken from a bounded free list and handed back when the
//! [`PooledBuffer`] guard drops, whatever path the caller leaves by.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

/// Buffers kept in the shared pool
pub const DEFAULT_POOL_SIZE: usize = 64;

/// Initial capacity of a fresh buffer
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Buffers that grew beyond this are dropped instead of pooled
pub const MAX_POOLED_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct BufferPool {
    sender: Sender<Vec<u8>>,
    receiver: Receiver<Vec<u8>>,
}

impl BufferPool {
    pub fn new(max_buffers: usize) -> Self {
        let (sender, receiver) = bounded(max_buffers.max(1));
        Self { sender, receiver }
    }

    /// The process-wide pool used by every logger
    pub fn shared() -> &'static BufferPool {
        static SHARED: OnceLock<BufferPool> = OnceLock::new();
        SHARED.get_or_init(|| BufferPool::new(DEFAULT_POOL_SIZE))
    }

    /// Take an empty buffer, allocating when the pool is drained
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self
            .receiver
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(DEFAULT_BUFFER_CAPACITY));
        PooledBuffer { buf, pool: self }
    }

    /// Number of idle buffers currently held
    pub fn idle(&self) -> usize {
        self.receiver.len()
    }

    fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_POOLED_CAPACITY {
            return;
        }
        buf.clear();
        // A full pool just lets the buffer go.
        let _ = self.sender.try_send(buf);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

/// Scratch buffer on loan from a [`BufferPool`]
pub struct PooledBuffer<'a> {
    buf: Vec<u8>,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_returned_on_drop() {
        let pool = BufferPool::new(4);
        assert_eq!(pool.idle(), 0);

        {
            let mut buf = pool.acquire();
            buf.extend_from_slice(b"hello");
        }

        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_reused_buffer_is_empty() {
        let pool = BufferPool::new(4);
        {
            let mut buf = pool.acquire();
            buf.extend_from_slice(b"some bytes");
        }

        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= b"some bytes".len());
    }

    #[test]
    fn test_pool_is_bounded() {
        let pool = BufferPool::new(2);
        let a = pool.acquire();
        let b = pool.acquire();
        let c = pool.acquire();
        drop((a, b, c));

        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn test_oversized_buffer_not_pooled() {
        let pool = BufferPool::new(2);
        {
            let mut buf = pool.acquire();
            buf.resize(MAX_POOLED_CAPACITY + 1, b'x');
        }
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_returned_on_early_exit() {
        fn fails(pool: &BufferPool) -> Result<(), ()> {
            let mut buf = pool.acquire();
            buf.push(b'x');
            Err(())
        }

        let pool = BufferPool::new(2);
        assert!(fails(&pool).is_err());
        assert_eq!(pool.idle(), 1);
    }
}
