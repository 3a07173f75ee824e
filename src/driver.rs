//! Drivers for applying several operators.
//!
//! Operators are single-step and single-threaded. The functions here are
//! what a verification harness uses around them: union of one step of many
//! operators, iteration to a fixed point, and fan-out of independent
//! operators over worker threads.

use std::collections::HashSet;
use std::thread;

use crossbeam_channel::{bounded, Sender};

use crate::config::DriverConfig;
use crate::context::TypeContext;
use crate::error::{GeneraliseError, GeneraliseResult};
use crate::logging;
use crate::operator::Operator;
use crate::pattern::Conjunction;

/// Applies every operator once to `src` and returns the union of outputs.
///
/// # Errors
///
/// The first error raised by an operator.
pub fn apply_chain(
    ops: &[Box<dyn Operator>],
    src: &Conjunction,
    ctx: &dyn TypeContext,
) -> GeneraliseResult<HashSet<Conjunction>> {
    let mut out = HashSet::new();
    for op in ops {
        let before = out.len();
        out.extend(op.apply(src, ctx)?);
        logging::trace!("{} produced {} new patterns", op.kind(), out.len() - before);
    }
    Ok(out)
}

/// Applies `ops` repeatedly, starting from `src`, until no new pattern
/// appears. Returns every pattern reached, `src` included.
///
/// # Errors
///
/// [`GeneraliseError::DidNotConverge`] if new patterns still appear after
/// `config.max_rounds` rounds, and any operator error.
pub fn converge(
    src: &Conjunction,
    ops: &[Box<dyn Operator>],
    ctx: &dyn TypeContext,
    config: &DriverConfig,
) -> GeneraliseResult<HashSet<Conjunction>> {
    config.validate()?;

    let mut seen = HashSet::from([src.clone()]);
    let mut frontier = vec![src.clone()];
    for round in 0..config.max_rounds {
        let mut next = Vec::new();
        for pattern in &frontier {
            for generalised in apply_chain(ops, pattern, ctx)? {
                if seen.insert(generalised.clone()) {
                    next.push(generalised);
                }
            }
        }
        logging::debug!("round {round}: {} new patterns, {} total", next.len(), seen.len());
        if next.is_empty() {
            return Ok(seen);
        }
        frontier = next;
    }

    logging::warn!(
        "no fixed point after {} rounds, {} patterns pending",
        config.max_rounds,
        frontier.len()
    );
    Err(GeneraliseError::DidNotConverge {
        rounds: config.max_rounds,
        remaining: frontier.len(),
    })
}

/// Applies every operator once to `src`, each on its own worker thread.
///
/// Workers stream their outputs through a bounded channel of
/// `config.channel_capacity` entries, so a slow collector throttles the
/// workers instead of buffering every output. The result equals
/// [`apply_chain`] on the same input, up to the fresh values fuzzers draw
/// from the context.
///
/// # Errors
///
/// The first error received from a worker, or an internal error if a worker
/// thread cannot be started.
pub fn apply_parallel(
    ops: &[Box<dyn Operator>],
    src: &Conjunction,
    ctx: &dyn TypeContext,
    config: &DriverConfig,
) -> GeneraliseResult<HashSet<Conjunction>> {
    config.validate()?;
    let (tx, rx) = bounded::<GeneraliseResult<Conjunction>>(config.channel_capacity);

    thread::scope(|scope| {
        for op in ops {
            let tx = tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("pattern-ops-{}", op.kind()))
                .spawn_scoped(scope, move || run_worker(op.as_ref(), src, ctx, &tx));
            if let Err(e) = spawned {
                // Workers already running must not stay blocked on a full
                // channel while the scope joins them.
                drop(rx);
                return Err(GeneraliseError::internal(format!("spawn worker: {e}")));
            }
        }
        drop(tx);

        let mut out = HashSet::new();
        for received in rx {
            out.insert(received?);
        }
        logging::debug!("{} operators produced {} patterns", ops.len(), out.len());
        Ok(out)
    })
}

/// Streams the outputs of `op` into `tx`, stopping once the receiver is gone.
fn run_worker(
    op: &dyn Operator,
    src: &Conjunction,
    ctx: &dyn TypeContext,
    tx: &Sender<GeneraliseResult<Conjunction>>,
) {
    match op.apply(src, ctx) {
        Ok(outputs) => {
            for pattern in outputs {
                if tx.send(Ok(pattern)).is_err() {
                    break;
                }
            }
        }
        Err(e) => {
            let _ = tx.send(Err(e));
        }
    }
}
