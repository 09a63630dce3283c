use skolero_infra::SkoleroContext;

/// The timestamp used for reschedule math. The server clock is
/// authoritative; a client supplied `now` is honored only when the
/// deployment explicitly opted into trusting client time.
pub fn resolve_now(ctx: &SkoleroContext, client_now: Option<i64>) -> i64 {
    if ctx.config.trust_client_time {
        if let Some(now) = client_now {
            return now;
        }
    }
    ctx.sys.get_timestamp_millis()
}
