use super::request::{parse_request, ParsedRequest};
use super::response::{
    write_create_error, write_html, write_json, write_json_error, write_payload, write_status_only,
};
use crate::pipeline::{CreateContext, Reply};
use crate::params::QueryParams;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// `may_minihttp` service answering the create endpoint and `/health`.
#[derive(Clone)]
pub struct CreateService {
    ctx: Arc<CreateContext>,
}

impl CreateService {
    pub fn new(ctx: Arc<CreateContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &CreateContext {
        &self.ctx
    }

    /// Answer the create endpoint. `HEAD` gets the `GET` status and headers
    /// with an empty body.
    fn create(&self, query: &QueryParams, res: &mut Response, with_body: bool) {
        let started = Instant::now();
        match self.ctx.handle(query) {
            Ok(Reply::Form(html)) => write_html(res, if with_body { html } else { String::new() }),
            Ok(Reply::Download(mut payload)) => {
                if !with_body {
                    payload.bytes.clear();
                }
                write_payload(res, payload)
            }
            Err(err) => {
                warn!(
                    status = err.status(),
                    field = err.field(),
                    error = %err,
                    "Create request failed"
                );
                if with_body {
                    write_create_error(res, &err);
                } else {
                    write_status_only(res, err.status(), "Content-Type: application/json");
                }
                return;
            }
        }
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Create request served"
        );
    }
}

/// Basic health check endpoint returning `{ "status": "ok" }`.
pub fn health_endpoint(res: &mut Response) -> io::Result<()> {
    write_json(res, 200, &json!({ "status": "ok" }));
    Ok(())
}

impl HttpService for CreateService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let ParsedRequest {
            method,
            path,
            query,
        } = parse_request(req);

        if path == "/health" && method == "GET" {
            return health_endpoint(res);
        }
        if path == self.ctx.form_action {
            if method == "GET" || method == "HEAD" {
                self.create(&query, res, method == "GET");
            } else {
                write_json_error(
                    res,
                    405,
                    json!({"error": "Method Not Allowed", "method": method, "path": path}),
                );
            }
            return Ok(());
        }

        write_json_error(
            res,
            404,
            json!({"error": "Not Found", "method": method, "path": path}),
        );
        Ok(())
    }
}
