//! Library-private worker pool for render batches.

use crate::RenderResult;
use perceptual_core::Rgba8;
use perceptual_math::split_list;
use rayon::prelude::*;
use std::ops::Range;
use std::sync::OnceLock;
use tracing::debug;

/// A rayon thread pool dedicated to rendering.
///
/// Render batches run on this pool instead of rayon's global pool, so
/// image work does not compete with unrelated parallel code of the host
/// application. One process-wide instance is available through
/// [`RenderContext::shared`]; tests and tools may build their own.
///
/// # Example
///
/// ```rust
/// use perceptual_render::RenderContext;
///
/// let ctx = RenderContext::new(2).unwrap();
/// assert_eq!(ctx.threads(), 2);
/// let squares = ctx.map_split(&[1, 2, 3], |x| x * x);
/// assert_eq!(squares, vec![1, 4, 9]);
/// ```
pub struct RenderContext {
    pool: rayon::ThreadPool,
}

static SHARED: OnceLock<RenderContext> = OnceLock::new();

impl RenderContext {
    /// Builds a pool with `threads` workers; 0 means one per logical CPU.
    pub fn new(threads: usize) -> RenderResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("perceptual-render-{}", index))
            .build()?;
        debug!(threads = pool.current_num_threads(), "created render pool");
        Ok(Self { pool })
    }

    /// The process-wide pool, created on first use.
    pub fn shared() -> RenderResult<&'static Self> {
        if let Some(ctx) = SHARED.get() {
            return Ok(ctx);
        }
        let ctx = Self::new(0)?;
        // A concurrent first call may have won; its pool is kept and ours dropped
        Ok(SHARED.get_or_init(|| ctx))
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `op` inside the pool, so rayon iterators in it use these workers.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        self.pool.install(op)
    }

    /// Processes disjoint row bands of a row-major pixel buffer in parallel.
    ///
    /// `bands` must be sorted, non-overlapping row ranges within the buffer.
    /// Each task receives its band and the pixels of exactly those rows.
    /// Returns after every task finished.
    pub fn for_each_band<F>(&self, pixels: &mut [Rgba8], width: usize, bands: &[Range<usize>], work: F)
    where
        F: Fn(Range<usize>, &mut [Rgba8]) + Sync,
    {
        let work = &work;
        let mut rest = pixels;
        let mut consumed_rows = 0;
        self.pool.scope(|scope| {
            for band in bands {
                let skip = (band.start - consumed_rows) * width;
                let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);
                let (chunk, tail) = tail.split_at_mut(band.len() * width);
                rest = tail;
                consumed_rows = band.end;
                let band = band.clone();
                scope.spawn(move |_| work(band, chunk));
            }
        });
    }

    /// Maps `items` in parallel, split into one contiguous part per worker.
    ///
    /// Results keep the order of `items`.
    pub fn map_split<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        let parts = split_list(items, self.threads());
        let mapped: Vec<Vec<R>> = self.pool.install(|| {
            parts
                .par_iter()
                .map(|part| part.iter().map(&f).collect())
                .collect()
        });
        mapped.into_iter().flatten().collect()
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("threads", &self.threads())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_is_singleton() {
        let a = RenderContext::shared().unwrap();
        let b = RenderContext::shared().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(a.threads() >= 1);
    }

    #[test]
    fn test_for_each_band_writes_disjoint_rows() {
        let ctx = RenderContext::new(3).unwrap();
        let width = 4;
        let mut pixels = vec![Rgba8::TRANSPARENT; width * 10];
        let bands = [1..3, 3..4, 6..10];
        ctx.for_each_band(&mut pixels, width, &bands, |band, chunk| {
            assert_eq!(chunk.len(), band.len() * width);
            for (row, line) in band.zip(chunk.chunks_mut(width)) {
                line.fill(Rgba8::opaque(row as u8, 0, 0));
            }
        });
        for (row, line) in pixels.chunks(width).enumerate() {
            let touched = matches!(row, 1..=3 | 6..=9);
            let expected = if touched { Rgba8::opaque(row as u8, 0, 0) } else { Rgba8::TRANSPARENT };
            assert!(line.iter().all(|p| *p == expected), "row {row}");
        }
    }

    #[test]
    fn test_map_split_keeps_order() {
        let ctx = RenderContext::new(4).unwrap();
        let items: Vec<u32> = (0..103).collect();
        let doubled = ctx.map_split(&items, |x| x * 2);
        assert_eq!(doubled, items.iter().map(|x| x * 2).collect::<Vec<_>>());
        assert!(ctx.map_split(&[] as &[u32], |x| *x).is_empty());
    }
}
