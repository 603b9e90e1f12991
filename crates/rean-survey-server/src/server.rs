use std::io::{self, BufRead, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use rean_survey_content::{
    resource_text, resources, INSTRUCTIONS_TEXT, SURVEY_SUBTITLE, SURVEY_TITLE,
};
use rean_survey_core::{Catalog, Classification, Response};
use rean_survey_session::{build_clipboard, Clipboard, Notification, Session, SessionError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::framing::{write_frame, FrameReader, Inbound};
use crate::protocol::{Method, RpcError, RpcRequest, RpcResponse};

/// Owns the single survey session and answers JSON-RPC requests against it.
pub struct SurveyServer {
    session: Mutex<Session>,
    clipboard: Arc<dyn Clipboard>,
    runtime: tokio::runtime::Runtime,
}

#[derive(Debug, Deserialize)]
struct AnswerParams {
    position: usize,
    response: String,
}

#[derive(Debug, Default, Deserialize)]
struct LoadParams {
    #[serde(default)]
    fragment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResourceParams {
    uri: String,
}

type RpcResult = Result<Value, RpcError>;

impl SurveyServer {
    pub fn new(config: &ServerConfig) -> io::Result<Self> {
        let session = Session::bootstrap(Catalog::rean(), config.bootstrap_location());
        Self::with_session(session, build_clipboard(config.clipboard.clone()))
    }

    pub fn with_session(session: Session, clipboard: Arc<dyn Clipboard>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            session: Mutex::new(session),
            clipboard,
            runtime,
        })
    }

    /// Answers one request. Notifications run but produce no response.
    pub fn handle_request(&self, request: RpcRequest) -> Option<RpcResponse> {
        let outcome = if request.jsonrpc == "2.0" {
            debug!(method = %request.method, "request");
            match Method::parse(&request.method) {
                Some(method) => self.dispatch(method, request.params),
                None => Err(RpcError::MethodNotFound(request.method)),
            }
        } else {
            Err(RpcError::InvalidRequest(format!(
                "unsupported jsonrpc version {:?}",
                request.jsonrpc
            )))
        };

        let id = request.id?;
        Some(RpcResponse::new(id, outcome))
    }

    fn dispatch(&self, method: Method, params: Value) -> RpcResult {
        match method {
            Method::Initialize => Ok(json!({
                "serverInfo": {"name": "rean-surveyd", "version": env!("CARGO_PKG_VERSION")},
                "survey": {"title": SURVEY_TITLE, "subtitle": SURVEY_SUBTITLE},
            })),
            Method::Ping => Ok(json!({})),
            Method::Catalog => Ok(self.catalog_result()),
            Method::Resources => Ok(resources_result()),
            Method::Resource => read_resource(params),
            Method::State => Ok(self.state_result()),
            Method::Answer => self.handle_answer(params),
            Method::ShowResults => self.handle_show_results(),
            Method::Result => Ok(self.current_result()),
            Method::Reset => {
                self.session.lock().reset();
                Ok(self.state_result())
            }
            Method::Share => self.handle_share(),
            Method::Load => self.handle_load(params),
        }
    }

    /// Runs `f` against the session under the lock.
    pub fn with_session_mut<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        f(&mut self.session.lock())
    }

    /// Copies the current link; see [`Session::share`].
    pub fn share(&self) -> Result<Notification, SessionError> {
        let session = self.session.lock();
        self.runtime.block_on(session.share(self.clipboard.as_ref()))
    }

    fn handle_answer(&self, params: Value) -> RpcResult {
        let params: AnswerParams = parse_params(params)?;
        let response: Response = params
            .response
            .parse()
            .map_err(|e| RpcError::InvalidParams(format!("{e}")))?;
        self.session.lock().set_answer(params.position, response)?;
        Ok(self.state_result())
    }

    fn handle_show_results(&self) -> RpcResult {
        let mut session = self.session.lock();
        let classification = session.show_results()?;
        Ok(result_json(&classification, &session))
    }

    fn handle_share(&self) -> RpcResult {
        let note = self.share()?;
        let href = self.session.lock().location().href();
        Ok(json!({
            "ok": note.is_success(),
            "kind": note.kind,
            "message": note.message,
            "href": href,
        }))
    }

    fn handle_load(&self, params: Value) -> RpcResult {
        let params: LoadParams = if params.is_null() {
            LoadParams::default()
        } else {
            parse_params(params)?
        };
        let fragment = params
            .fragment
            .as_deref()
            .map(|raw| raw.split_once('#').map_or(raw, |(_, fragment)| fragment));
        self.session.lock().load_fragment(fragment);
        Ok(self.state_result())
    }

    fn catalog_result(&self) -> Value {
        let session = self.session.lock();
        let questions = session
            .catalog()
            .questions()
            .iter()
            .map(|q| {
                json!({
                    "position": q.position,
                    "number": q.number(),
                    "text": q.text,
                    "polarity": q.polarity,
                })
            })
            .collect::<Vec<_>>();
        json!({
            "version": session.catalog().version(),
            "title": SURVEY_TITLE,
            "instructions": INSTRUCTIONS_TEXT,
            "questions": questions,
        })
    }

    fn state_result(&self) -> Value {
        state_json(&self.session.lock())
    }

    fn current_result(&self) -> Value {
        let session = self.session.lock();
        session
            .result()
            .map_or(Value::Null, |classification| result_json(&classification, &session))
    }

    pub fn serve_stdio(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.serve(io::BufReader::new(stdin.lock()), &mut stdout)
    }

    /// Reads messages until EOF. Replies use the framing of the message
    /// they answer; unreadable frames and JSON get a parse error reply.
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> io::Result<()> {
        let mut frames = FrameReader::new(reader);
        while let Some(inbound) = frames.next_inbound()? {
            let (response, frame) = match inbound {
                Inbound::Message { payload, frame } => {
                    match serde_json::from_slice::<RpcRequest>(&payload) {
                        Ok(request) => (self.handle_request(request), frame),
                        Err(err) => (
                            Some(RpcResponse::rejected(&RpcError::Parse(err.to_string()))),
                            frame,
                        ),
                    }
                }
                Inbound::Rejected { reason, frame } => {
                    warn!(%reason, "dropping stdio frame");
                    (Some(RpcResponse::rejected(&RpcError::Frame(reason))), frame)
                }
            };
            if let Some(response) = response {
                write_frame(writer, frame, &serde_json::to_vec(&response)?)?;
            }
        }
        Ok(())
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(|e| RpcError::InvalidParams(e.to_string()))
}

fn state_json(session: &Session) -> Value {
    let answers = session
        .answers()
        .iter()
        .map(|(position, response)| (position.to_string(), json!(response)))
        .collect::<Map<_, _>>();
    json!({
        "state": session.state(),
        "locked": session.is_locked(),
        "answers": answers,
        "answered": session.answers().len(),
        "total": session.catalog().len(),
        "complete": session.is_complete(),
        "progress": session.progress(),
        "progressPercent": session.progress_percent(),
        "fragment": session.fragment(),
        "href": session.location().href(),
    })
}

fn result_json(classification: &Classification, session: &Session) -> Value {
    json!({
        "score": classification.score,
        "maxScore": classification.max_score,
        "category": classification.category,
        "lean": classification.lean,
        "title": classification.title,
        "text": classification.display_text,
        "fragment": session.fragment(),
        "href": session.location().href(),
    })
}

fn resources_result() -> Value {
    let items = resources()
        .iter()
        .map(|r| {
            json!({
                "uri": r.uri,
                "name": r.name,
                "description": r.description,
                "mimeType": r.mime_type,
            })
        })
        .collect::<Vec<_>>();
    json!({ "resources": items })
}

fn read_resource(params: Value) -> RpcResult {
    let ResourceParams { uri } = parse_params(params)?;
    let text = resource_text(&uri)
        .ok_or_else(|| RpcError::InvalidParams(format!("unknown resource: {uri}")))?;
    Ok(json!({ "uri": uri, "mimeType": "text/markdown", "text": text }))
}

#[cfg(test)]
mod tests {
    use rean_survey_session::{MemoryClipboard, UnavailableClipboard};

    use super::*;

    const BASE: &str = "http://localhost:5173/psychology/rean-survey/";

    fn server() -> SurveyServer {
        SurveyServer::with_session(
            Session::new(Catalog::rean(), BASE),
            Arc::new(MemoryClipboard::default()),
        )
        .unwrap_or_else(|e| panic!("runtime: {e}"))
    }

    fn call(server: &SurveyServer, method: &str, params: Value) -> RpcResponse {
        server
            .handle_request(RpcRequest {
                jsonrpc: "2.0".to_string(),
                id: Some(json!(1)),
                method: method.to_string(),
                params,
            })
            .unwrap_or_else(|| panic!("no response for {method}"))
    }

    fn error_code(response: &RpcResponse) -> Option<i64> {
        response.error().map(|e| e.code)
    }

    #[test]
    fn answer_then_results_flow() {
        let server = server();
        for position in 0..20 {
            let resp = call(
                &server,
                "survey/answer",
                json!({"position": position, "response": "no"}),
            );
            assert!(resp.error().is_none(), "answer {position} failed");
        }

        let resp = call(&server, "survey/results", Value::Null);
        let result = resp.result().cloned().unwrap_or_else(|| panic!("no result"));
        assert_eq!(result["score"], json!(7));
        assert_eq!(result["category"], json!("avoid_failure"));
        assert!(result["fragment"].is_string());

        let state = call(&server, "survey/state", Value::Null)
            .result()
            .cloned()
            .unwrap_or_else(|| panic!("no state"));
        assert_eq!(state["state"], json!("results_shown"));
        assert_eq!(state["progressPercent"], json!(100));
    }

    #[test]
    fn results_before_completion_is_an_error() {
        let server = server();
        let resp = call(&server, "survey/results", Value::Null);
        assert_eq!(error_code(&resp), Some(-32002));
        let resp = call(&server, "survey/share", Value::Null);
        assert_eq!(error_code(&resp), Some(-32003));
    }

    #[test]
    fn bad_answer_params_are_rejected() {
        let server = server();
        let resp = call(
            &server,
            "survey/answer",
            json!({"position": 0, "response": "perhaps"}),
        );
        assert_eq!(error_code(&resp), Some(-32602));
        let resp = call(
            &server,
            "survey/answer",
            json!({"position": 20, "response": "yes"}),
        );
        assert_eq!(error_code(&resp), Some(-32602));
        let resp = call(&server, "survey/answer", json!({"position": "x"}));
        assert_eq!(error_code(&resp), Some(-32602));
    }

    #[test]
    fn loaded_link_locks_session() {
        let server = server();
        for position in 0..20 {
            call(
                &server,
                "survey/answer",
                json!({"position": position, "response": "yes"}),
            );
        }
        let shown = call(&server, "survey/results", Value::Null)
            .result()
            .cloned()
            .unwrap_or_else(|| panic!("no result"));
        let href = shown["href"].as_str().unwrap_or_default().to_string();

        call(&server, "survey/reset", Value::Null);
        let state = call(&server, "survey/load", json!({"fragment": href}))
            .result()
            .cloned()
            .unwrap_or_else(|| panic!("no state"));
        assert_eq!(state["state"], json!("shared_locked"));

        let resp = call(
            &server,
            "survey/answer",
            json!({"position": 0, "response": "no"}),
        );
        assert_eq!(error_code(&resp), Some(-32001));

        let result = call(&server, "survey/result", Value::Null)
            .result()
            .cloned()
            .unwrap_or_else(|| panic!("no result"));
        assert_eq!(result["score"], json!(13));
        assert_eq!(result["lean"], json!("toward_success"));
    }

    #[test]
    fn share_without_clipboard_reports_failure() {
        let mut session = Session::new(Catalog::rean(), BASE);
        for position in 0..20 {
            session
                .set_answer(position, Response::Yes)
                .unwrap_or_else(|e| panic!("{e}"));
        }
        session.show_results().unwrap_or_else(|e| panic!("{e}"));
        let server = SurveyServer::with_session(session, Arc::new(UnavailableClipboard))
            .unwrap_or_else(|e| panic!("runtime: {e}"));

        let result = call(&server, "survey/share", Value::Null)
            .result()
            .cloned()
            .unwrap_or_else(|| panic!("no result"));
        assert_eq!(result["ok"], json!(false));
        assert_eq!(result["message"], json!("Couldn't copy link"));
        assert_eq!(
            call(&server, "survey/state", Value::Null).result().map(|s| s["state"].clone()),
            Some(json!("results_shown"))
        );
    }

    #[test]
    fn resources_are_listed_and_readable() {
        let server = server();
        let list = call(&server, "survey/resources", Value::Null)
            .result()
            .cloned()
            .unwrap_or_else(|| panic!("no list"));
        let uris = list["resources"]
            .as_array()
            .map(|items| items.iter().filter_map(|r| r["uri"].as_str()).count())
            .unwrap_or_default();
        assert_eq!(uris, 4);

        let read = call(
            &server,
            "survey/resource",
            json!({"uri": rean_survey_content::MIXED_URI}),
        );
        let text = read.result().cloned().unwrap_or_else(|| panic!("no text"));
        assert!(text["text"].as_str().is_some_and(|t| t.contains("{lean}")));

        let missing = call(&server, "survey/resource", json!({"uri": "rean://nope"}));
        assert_eq!(error_code(&missing), Some(-32602));
    }

    #[test]
    fn notifications_get_no_response() {
        let server = server();
        let out = server.handle_request(RpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "survey/reset".to_string(),
            params: Value::Null,
        });
        assert!(out.is_none());
    }

    #[test]
    fn serve_handles_both_framings() {
        let server = server();
        let body = r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#;
        let input = format!(
            "{{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}}\nContent-Length: {}\r\n\r\n{body}not json\n",
            body.len()
        );
        let mut reader = io::Cursor::new(input.into_bytes());
        let mut out = Vec::new();
        server
            .serve(&mut reader, &mut out)
            .unwrap_or_else(|e| panic!("serve: {e}"));

        let text = String::from_utf8(out).unwrap_or_default();
        let mut lines = text.split('\n');
        assert_eq!(
            lines.next(),
            Some(r#"{"jsonrpc":"2.0","id":1,"result":{}}"#)
        );
        assert!(text.contains("Content-Length: 36\r\n\r\n{\"jsonrpc\":\"2.0\",\"id\":2,\"result\":{}}"));
        assert!(text.contains("parse error"));
    }

    #[test]
    fn oversized_frame_gets_parse_error_and_serving_continues() {
        let server = server();
        let input = "Content-Length: 18446744073709551615\r\n\r\n{}\n{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}\n";
        let mut out = Vec::new();
        server
            .serve(io::Cursor::new(input.as_bytes()), &mut out)
            .unwrap_or_else(|e| panic!("serve: {e}"));

        let text = String::from_utf8(out).unwrap_or_default();
        assert!(text.starts_with("Content-Length: "));
        assert!(text.contains(r#""code":-32700,"message":"invalid stdio frame: content-length"#));
        assert!(text.ends_with("{\"jsonrpc\":\"2.0\",\"id\":9,\"result\":{}}\n"));
    }

    #[test]
    fn unknown_method_and_version_are_reported() {
        let server = server();
        let resp = call(&server, "survey/teleport", Value::Null);
        assert_eq!(error_code(&resp), Some(-32601));

        let resp = server
            .handle_request(RpcRequest {
                jsonrpc: "1.0".to_string(),
                id: Some(json!(4)),
                method: "ping".to_string(),
                params: Value::Null,
            })
            .unwrap_or_else(|| panic!("no response"));
        assert_eq!(error_code(&resp), Some(-32600));
        assert_eq!(resp.id, json!(4));
    }
}
