//! Serve command - run the HTTP API

use std::sync::Arc;
use std::thread;

use tiny_http::Server;

use mentor_verify::output::OperationResult;

use super::Context;
use crate::server::tiny_http::handle_api_request;

/// Serve the HTTP API until the process is stopped
pub fn serve(ctx: &Context, bind: Option<&str>) -> anyhow::Result<()> {
    let addr = bind.unwrap_or(&ctx.config.server.bind).to_string();
    let orchestrator = Arc::new(ctx.orchestrator()?);
    let runtime = tokio::runtime::Runtime::new()?;
    let server = Arc::new(
        Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?,
    );

    OperationResult::ok(format!("Listening on http://{addr}/api/v1")).render(ctx.mode);
    log::info!("serving verification API on {addr}");

    let workers = thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get);
    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let server = Arc::clone(&server);
            let orchestrator = Arc::clone(&orchestrator);
            let handle = runtime.handle().clone();
            thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let response = handle.block_on(handle_api_request(&orchestrator, &mut request));
                    if let Err(e) = request.respond(response) {
                        log::warn!("failed to send response: {e}");
                    }
                }
            })
        })
        .collect();

    for worker in handles {
        if worker.join().is_err() {
            log::error!("server worker panicked");
        }
    }
    Ok(())
}
