//! Parallel frame renderer
//!
//! The image is split into contiguous row ranges, one per worker thread.
//! Workers write disjoint byte ranges of the frame buffer, so the hot path
//! needs no locks or atomics; the only synchronization point is the join at
//! the end of the frame.

use crate::scene::Scene;

/// Environment variable overriding the worker count
pub const THREADS_ENV_VAR: &str = "RAYTRACER_THREADS";

/// Render the scene into `frame`, a packed RGB buffer of
/// `3 * width * height` bytes.
///
/// The worker count comes from [`THREADS_ENV_VAR`] when set (clamped to
/// `[1, height]`; a non-numeric value silently falls back), otherwise from
/// the detected hardware parallelism.
///
/// # Panics
///
/// Panics if `frame` does not match the scene's dimensions.
pub fn render(scene: &Scene, frame: &mut [u8]) {
    render_with_workers(scene, frame, worker_count(scene.height()));
}

/// Render with an explicit worker count (clamped to `[1, height]`).
///
/// Single- and multi-threaded runs produce byte-identical output.
///
/// # Panics
///
/// Panics if `frame` does not match the scene's dimensions.
pub fn render_with_workers(scene: &Scene, frame: &mut [u8], workers: usize) {
    let expected = 3 * scene.width() as usize * scene.height() as usize;
    assert_eq!(frame.len(), expected, "frame buffer size mismatch");

    let started = std::time::Instant::now();
    let aspect = scene.width() as f32 / scene.height() as f32;
    let workers = workers.clamp(1, scene.height() as usize);

    if workers == 1 {
        render_rows(scene, frame, 0, scene.height(), aspect);
    } else {
        let row_bytes = 3 * scene.width() as usize;
        std::thread::scope(|s| {
            let mut rest = frame;
            for (start_row, end_row) in row_ranges(scene.height(), workers) {
                let chunk_len = (end_row - start_row) as usize * row_bytes;
                let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(chunk_len);
                rest = tail;
                s.spawn(move || render_rows(scene, chunk, start_row, end_row, aspect));
            }
        });
    }

    tracing::debug!(
        workers,
        elapsed_ms = started.elapsed().as_secs_f32() * 1000.0,
        "frame rendered"
    );
}

/// Contiguous row ranges for `workers` threads: `height / workers` rows
/// each, with the first `height % workers` ranges taking one extra row.
fn row_ranges(height: u32, workers: usize) -> Vec<(u32, u32)> {
    let workers = workers as u32;
    let rows_per_worker = height / workers;
    let remaining_rows = height % workers;

    let mut ranges = Vec::with_capacity(workers as usize);
    let mut row = 0;
    for i in 0..workers {
        let rows = rows_per_worker + u32::from(i < remaining_rows);
        ranges.push((row, row + rows));
        row += rows;
    }
    ranges
}

/// Shade rows `[start_row, end_row)` into `rows`, which holds exactly those
/// rows' bytes.
fn render_rows(scene: &Scene, rows: &mut [u8], start_row: u32, end_row: u32, aspect: f32) {
    let width = scene.width();
    for y in start_row..end_row {
        for x in 0..width {
            let rgb = scene.render_pixel(x, y, aspect);
            let idx = (((y - start_row) * width + x) * 3) as usize;
            rows[idx..idx + 3].copy_from_slice(&rgb);
        }
    }
}

fn worker_count(height: u32) -> usize {
    let detected = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
    let requested = std::env::var(THREADS_ENV_VAR)
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or(detected as i64);
    requested.clamp(1, i64::from(height)) as usize
}
