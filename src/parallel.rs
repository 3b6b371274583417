//! Utilities for parallelism

/// Runs the two specified closures in parallel on scoped threads
/// if and only if `parallel` is set to `true`, otherwise one after the other.
pub(crate) fn run_maybe_in_parallel<A, B, RA, RB>(parallel: bool, oper_a: A, oper_b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        std::thread::scope(|s| {
            let handle_b = s.spawn(oper_b);
            let ra = oper_a();
            let rb = match handle_b.join() {
                Ok(rb) => rb,
                Err(payload) => std::panic::resume_unwind(payload),
            };
            (ra, rb)
        })
    } else {
        (oper_a(), oper_b())
    }
}
