use std::collections::HashSet;

use rayon::prelude::*;

use crate::{
    composition::model::Composition,
    eval::{
        evaluator::{EvaluatedFrame, Evaluator},
        fingerprint::{FrameFingerprint, fingerprint_frame},
    },
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{FramecastError, FramecastResult},
    },
    timeline::config::SceneParams,
};

/// How [`evaluate_range`] spreads frames across threads.
#[derive(Clone, Debug)]
pub struct EvalThreading {
    /// Evaluate chunks on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames per chunk. `0` is treated as `1`.
    pub chunk_size: usize,
    /// Pool size. `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Counters reported by [`evaluate_range_with_stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RangeStats {
    /// Frames evaluated.
    pub frames_total: u64,
    /// Frames with a fingerprint not seen earlier in the range.
    pub frames_distinct: u64,
}

/// Evaluate every frame of `range`, in frame order.
///
/// Results are identical whether the range is evaluated sequentially or in parallel.
pub fn evaluate_range(
    comp: &Composition,
    range: FrameRange,
    threading: &EvalThreading,
) -> FramecastResult<Vec<EvaluatedFrame>> {
    evaluate_range_impl(comp, range, threading)
}

/// [`evaluate_range`] plus a fingerprint per frame and repetition counters.
pub fn evaluate_range_with_stats(
    comp: &Composition,
    range: FrameRange,
    threading: &EvalThreading,
) -> FramecastResult<(Vec<EvaluatedFrame>, Vec<FrameFingerprint>, RangeStats)> {
    let frames = evaluate_range_impl(comp, range, threading)?;
    let prints: Vec<FrameFingerprint> = frames.iter().map(fingerprint_frame).collect();
    let distinct = prints.iter().collect::<HashSet<_>>().len();
    let stats = RangeStats {
        frames_total: frames.len() as u64,
        frames_distinct: distinct as u64,
    };
    Ok((frames, prints, stats))
}

#[tracing::instrument(skip(comp, threading), fields(start = range.start.0, end = range.end.0))]
fn evaluate_range_impl(
    comp: &Composition,
    range: FrameRange,
    threading: &EvalThreading,
) -> FramecastResult<Vec<EvaluatedFrame>> {
    comp.validate()?;
    let params = comp.scene_params()?;
    if range.end.0 > params.total_duration_frames() {
        return Err(FramecastError::evaluation(format!(
            "range end {} is past the {}-frame composition",
            range.end.0,
            params.total_duration_frames()
        )));
    }

    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut out = Vec::with_capacity(range.len_frames() as usize);
    for chunk in range.chunks(normalized_chunk_size(threading.chunk_size)) {
        tracing::debug!(
            start = chunk.start.0,
            end = chunk.end.0,
            parallel = pool.is_some(),
            "evaluating chunk"
        );
        let frames = match &pool {
            Some(pool) => eval_chunk_parallel(comp, &params, chunk, pool)?,
            None => eval_chunk_sequential(comp, &params, chunk)?,
        };
        out.extend(frames);
    }
    Ok(out)
}

fn eval_chunk_sequential(
    comp: &Composition,
    params: &SceneParams,
    range: FrameRange,
) -> FramecastResult<Vec<EvaluatedFrame>> {
    (range.start.0..range.end.0)
        .map(|f| Evaluator::eval_frame_unchecked(comp, params, FrameIndex(f)))
        .collect()
}

fn eval_chunk_parallel(
    comp: &Composition,
    params: &SceneParams,
    range: FrameRange,
    pool: &rayon::ThreadPool,
) -> FramecastResult<Vec<EvaluatedFrame>> {
    let frames: Vec<u64> = (range.start.0..range.end.0).collect();
    pool.install(|| {
        frames
            .par_iter()
            .map(|&f| Evaluator::eval_frame_unchecked(comp, params, FrameIndex(f)))
            .collect()
    })
}

fn build_thread_pool(threads: Option<usize>) -> FramecastResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FramecastError::invalid_config(
            "evaluation 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FramecastError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/range.rs"]
mod tests;
