//! Serving HTTP with rouille.

pub use rouille::{Request, Response};
use std::fmt::Display;
use std::time::Instant;
use log::*;

/// Errors that map onto an HTTP status code.
pub trait StatusCode {
    fn status_code(&self) -> u16;
}

/// Something that can answer HTTP requests.
///
/// Implementors write `on_request`; `process_request` wraps it with error
/// rendering and an access log line, and is what the server calls.
pub trait HttpServer: Sync + Send + 'static {
    type Error: StatusCode + Display;

    fn on_request(&self, req: &Request) -> Result<Response, Self::Error>;

    /// Turns an error from `on_request` into a response.
    ///
    /// Defaults to plain text; servers with templates override this.
    fn render_error(&self, _req: &Request, err: &Self::Error) -> Response {
        Response::text(format!("error: {}\n", err))
            .with_status_code(err.status_code())
    }

    fn process_request(&self, req: &Request) -> Response {
        let start = Instant::now();
        let resp = self.on_request(req)
            .unwrap_or_else(|e| {
                warn!("{} {} failed ({}): {}", req.method(), req.raw_url(), e.status_code(), e);
                self.render_error(req, &e)
            });
        log_access(req, &resp, start);
        resp
    }
}

fn log_access(req: &Request, resp: &Response, start: Instant) {
    let dur = start.elapsed();
    info!("{} {} \"{}\" - {} [{}.{:03}s]",
          req.remote_addr(),
          req.method(),
          req.raw_url(),
          resp.status_code,
          dur.as_secs(),
          dur.subsec_millis());
}

/// Serves `srv` on `listen_url` until the process dies.
pub fn start_server<H: HttpServer>(listen_url: &str, srv: H) -> ! {
    info!("Listening on http://{}/", listen_url);
    rouille::start_server(listen_url, move |req| {
        srv.process_request(req)
    })
}
