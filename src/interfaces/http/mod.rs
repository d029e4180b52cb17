use crate::application::ContentClient;
use crate::domain::catalog::{essay_sample, word_list, ESSAY_SAMPLES, WORD_LISTS};
use crate::domain::error::{AppError, Result};
use crate::domain::response::{ResponseSet, UserResponse};
use crate::domain::session::{Action, AppState, View, DEFAULT_QUESTION_COUNT};
use crate::domain::skill::Skill;
use crate::domain::test_content::GeneratedTest;
use crate::infrastructure::config::ServerSettings;
use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{delete, dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder, Scope};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{error, warn};
use uuid::Uuid;
use validator::Validate;

const MAX_LOG_ENTRIES: usize = 100;
const MAX_SESSIONS: usize = 1000;
const CANCELLED_MESSAGE: &str = "Request cancelled before the operation completed";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub content_client: Arc<ContentClient>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    max_sessions: usize,
}

struct SessionEntry {
    state: AppState,
    touched: Instant,
}

impl SessionEntry {
    fn new(state: AppState) -> Self {
        Self {
            state,
            touched: Instant::now(),
        }
    }
}

impl HttpState {
    pub fn new(content_client: Arc<ContentClient>, logs: Arc<Mutex<Vec<LogEntry>>>) -> Self {
        Self::with_session_limit(content_client, logs, MAX_SESSIONS)
    }

    pub fn with_session_limit(
        content_client: Arc<ContentClient>,
        logs: Arc<Mutex<Vec<LogEntry>>>,
        max_sessions: usize,
    ) -> Self {
        Self {
            content_client,
            logs,
            sessions: Mutex::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a fresh session, evicting the least recently used ones past the limit.
    fn create_session(&self) -> (Uuid, AppState) {
        let id = Uuid::new_v4();
        let state = AppState::new();

        let mut sessions = self.sessions();
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(key, _)| *key);
            match oldest {
                Some(key) => {
                    sessions.remove(&key);
                    warn!(session_id = %key, "Evicted least recently used session");
                }
                None => break,
            }
        }
        sessions.insert(id, SessionEntry::new(state.clone()));
        (id, state)
    }

    fn session(&self, id: Uuid) -> Result<AppState> {
        let mut sessions = self.sessions();
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
        entry.touched = Instant::now();
        Ok(entry.state.clone())
    }

    fn remove_session(&self, id: Uuid) -> Result<()> {
        self.sessions()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
    }

    /// Applies `action` to the stored state and commits the result. A rejected
    /// action leaves the stored state untouched.
    fn transition(&self, id: Uuid, action: Action) -> Result<AppState> {
        let mut sessions = self.sessions();
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
        let next = entry.state.clone().apply(action)?;
        entry.state = next.clone();
        entry.touched = Instant::now();
        Ok(next)
    }

    /// Commits a Begin action and returns a guard that must be finished with
    /// the matching completion.
    fn begin_operation(&self, id: Uuid, action: Action) -> Result<(PendingOperation<'_>, AppState)> {
        let state = self.transition(id, action)?;
        Ok((PendingOperation { data: self, id, armed: true }, state))
    }
}

/// An in-flight generation or evaluation. Dropping it unfinished, as happens
/// when actix cancels a handler whose client disconnected, records
/// `OperationFailed` so the session leaves the loading state.
struct PendingOperation<'a> {
    data: &'a HttpState,
    id: Uuid,
    armed: bool,
}

impl PendingOperation<'_> {
    fn finish(mut self, action: Action) -> Result<AppState> {
        self.armed = false;
        self.data.transition(self.id, action)
    }

    fn fail(self, err: &AppError) {
        let id = self.id;
        let data = self.data;
        if let Err(store_err) = self.finish(Action::OperationFailed(err.to_string())) {
            add_log(&data.logs, "WARN", "Session", &format!("Session {}: {}", id, store_err));
        }
    }
}

impl Drop for PendingOperation<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!(session_id = %self.id, "Operation abandoned before completion");
        let cancelled = Action::OperationFailed(CANCELLED_MESSAGE.to_string());
        if let Err(err) = self.data.transition(self.id, cancelled) {
            add_log(
                &self.data.logs,
                "WARN",
                "Session",
                &format!("Session {}: {}", self.id, err),
            );
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub state: AppState,
}

impl SessionResponse {
    fn new(id: Uuid, state: &AppState) -> Self {
        Self {
            id,
            state: state.public_view(),
        }
    }
}

/// Session actions a client may send directly. Generation and evaluation go
/// through the `start` and `submit` endpoints instead.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionAction {
    Navigate { view: View },
    SelectSkill { skill: Skill },
    SetQuestionCount { count: u32 },
    Answer { response: UserResponse },
    Restart,
}

impl From<SessionAction> for Action {
    fn from(action: SessionAction) -> Self {
        match action {
            SessionAction::Navigate { view } => Action::Navigate(view),
            SessionAction::SelectSkill { skill } => Action::SelectSkill(skill),
            SessionAction::SetQuestionCount { count } => Action::SetQuestionCount(count),
            SessionAction::Answer { response } => Action::Answer {
                key: response.key,
                answer: response.answer,
            },
            SessionAction::Restart => Action::Restart,
        }
    }
}

fn default_question_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestRequest {
    pub skill: Skill,
    #[serde(default = "default_question_count")]
    #[validate(range(min = 1, max = 50))]
    pub question_count: u32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateTestRequest {
    pub skill: Skill,
    pub test: GeneratedTest,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub responses: Vec<UserResponse>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DefineWordRequest {
    #[validate(length(min = 1, max = 64))]
    pub word: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeEssayRequest {
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub question: String,
    #[validate(length(min = 1, max = 20000))]
    pub essay: String,
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::InvalidTransition(_) => StatusCode::CONFLICT,
        AppError::EmptyResponse(_) | AppError::MalformedContent(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AppError::Transport(_) => StatusCode::BAD_GATEWAY,
        AppError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
        AppError::SecurityError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(data: &HttpState, source: &str, context: &str, err: &AppError) -> HttpResponse {
    add_log(&data.logs, "ERROR", source, &format!("{}: {}", context, err));
    error!(source, error = %err, "{}", context);
    HttpResponse::build(status_for(err)).json(ErrorBody {
        error: err.kind(),
        message: err.to_string(),
    })
}

fn respond<T: Serialize>(
    data: &HttpState,
    source: &str,
    context: &str,
    result: Result<T>,
) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(data, source, context, &e),
    }
}

#[post("/sessions")]
async fn create_session(data: web::Data<HttpState>) -> impl Responder {
    let (id, state) = data.create_session();
    add_log(&data.logs, "INFO", "Session", &format!("Created session {}", id));
    HttpResponse::Created().json(SessionResponse::new(id, &state))
}

#[get("/sessions/{id}")]
async fn get_session(data: web::Data<HttpState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    let result = data.session(id).map(|state| SessionResponse::new(id, &state));
    respond(&data, "Session", "Failed to load session", result)
}

#[post("/sessions/{id}/actions")]
async fn session_action(
    data: web::Data<HttpState>,
    path: web::Path<Uuid>,
    req: web::Json<SessionAction>,
) -> impl Responder {
    let id = path.into_inner();
    let action = Action::from(req.into_inner());
    let name = action.name();

    let result = data
        .transition(id, action)
        .map(|state| SessionResponse::new(id, &state));
    respond(&data, "Session", &format!("Action {} rejected", name), result)
}

#[delete("/sessions/{id}")]
async fn delete_session(data: web::Data<HttpState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    match data.remove_session(id) {
        Ok(()) => {
            add_log(&data.logs, "INFO", "Session", &format!("Deleted session {}", id));
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(&data, "Session", "Failed to delete session", &e),
    }
}

#[post("/sessions/{id}/start")]
async fn start_session_test(data: web::Data<HttpState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    let (pending, state) = match data.begin_operation(id, Action::BeginGeneration) {
        Ok(started) => started,
        Err(e) => return error_response(&data, "Session", "Cannot start test", &e),
    };
    let Some(skill) = state.selected_skill else {
        let err = AppError::Internal("Loading state without a skill".to_string());
        pending.fail(&err);
        return error_response(&data, "Session", "Cannot start test", &err);
    };

    add_log(
        &data.logs,
        "INFO",
        "Session",
        &format!("Generating {} test for session {}", skill, id),
    );

    match data
        .content_client
        .generate_test(skill, state.question_count)
        .await
    {
        Ok(test) => {
            let result = pending
                .finish(Action::TestGenerated(test))
                .map(|state| SessionResponse::new(id, &state));
            respond(&data, "Session", "Failed to store generated test", result)
        }
        Err(e) => {
            pending.fail(&e);
            error_response(&data, "Session", "Test generation failed", &e)
        }
    }
}

#[post("/sessions/{id}/submit")]
async fn submit_session_test(data: web::Data<HttpState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    let (pending, state) = match data.begin_operation(id, Action::BeginEvaluation) {
        Ok(started) => started,
        Err(e) => return error_response(&data, "Session", "Cannot submit test", &e),
    };
    let Some(test) = state.current_test else {
        let err = AppError::Internal("Test view without a test".to_string());
        pending.fail(&err);
        return error_response(&data, "Session", "Cannot submit test", &err);
    };

    add_log(
        &data.logs,
        "INFO",
        "Session",
        &format!(
            "Evaluating {} test {} ({} responses)",
            test.skill(),
            test.id,
            state.responses.len()
        ),
    );

    match data
        .content_client
        .evaluate_test(test.skill(), &test, &state.responses)
        .await
    {
        Ok(result) => {
            let result = pending
                .finish(Action::EvaluationCompleted(result))
                .map(|state| SessionResponse::new(id, &state));
            respond(&data, "Session", "Failed to store evaluation", result)
        }
        Err(e) => {
            pending.fail(&e);
            error_response(&data, "Session", "Evaluation failed", &e)
        }
    }
}

#[post("/tests/generate")]
async fn generate_test(
    data: web::Data<HttpState>,
    req: web::Json<GenerateTestRequest>,
) -> impl Responder {
    if let Err(e) = req.validate() {
        return error_response(&data, "HttpApi", "Invalid generate request", &e.into());
    }

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Generating {} test (questions={} model={})",
            req.skill,
            req.question_count,
            data.content_client.model()
        ),
    );

    let result = data
        .content_client
        .generate_test(req.req_data().skill, req.req_data().question_count)
        .await;
    respond(&data, "HttpApi", "Test generation failed", result)
}

#[post("/tests/evaluate")]
async fn evaluate_test(
    data: web::Data<HttpState>,
    req: web::Json<EvaluateTestRequest>,
) -> impl Responder {
    if let Err(e) = req.validate() {
        return error_response(&data, "HttpApi", "Invalid evaluate request", &e.into());
    }

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Evaluating {} test {}", req.skill, req.test.id),
    );

    let responses: ResponseSet = req.req_data().responses.iter().cloned().collect();
    let result = data
        .content_client
        .evaluate_test(req.req_data().skill, &req.req_data().test, &responses)
        .await;
    respond(&data, "HttpApi", "Evaluation failed", result)
}

#[post("/vocabulary/define")]
async fn define_word(
    data: web::Data<HttpState>,
    req: web::Json<DefineWordRequest>,
) -> impl Responder {
    if let Err(e) = req.validate() {
        return error_response(&data, "Vocabulary", "Invalid define request", &e.into());
    }

    add_log(
        &data.logs,
        "INFO",
        "Vocabulary",
        &format!("Defining '{}'", req.word.trim()),
    );

    let definition = data
        .content_client
        .get_word_definition_or_placeholder(&req.req_data().word)
        .await;
    HttpResponse::Ok().json(definition)
}

#[post("/essays/analyze")]
async fn analyze_essay(
    data: web::Data<HttpState>,
    req: web::Json<AnalyzeEssayRequest>,
) -> impl Responder {
    if let Err(e) = req.validate() {
        return error_response(&data, "Essays", "Invalid analyze request", &e.into());
    }

    add_log(&data.logs, "INFO", "Essays", "Analyzing writing technique");

    let result = data
        .content_client
        .analyze_writing_technique(&req.req_data().question, &req.req_data().essay)
        .await;
    respond(&data, "Essays", "Essay analysis failed", result)
}

#[get("/vocabulary/lists")]
async fn list_word_lists() -> impl Responder {
    HttpResponse::Ok().json(WORD_LISTS)
}

#[get("/vocabulary/lists/{name}")]
async fn get_word_list(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    let result = word_list(&name)
        .ok_or_else(|| AppError::NotFound(format!("Word list '{}' not found", name)));
    respond(&data, "Vocabulary", "Unknown word list", result)
}

#[get("/essays/samples")]
async fn list_essay_samples() -> impl Responder {
    HttpResponse::Ok().json(ESSAY_SAMPLES)
}

#[get("/essays/samples/{id}")]
async fn get_essay_sample(data: web::Data<HttpState>, path: web::Path<u32>) -> impl Responder {
    let id = path.into_inner();
    let result =
        essay_sample(id).ok_or_else(|| AppError::NotFound(format!("Essay sample {} not found", id)));
    respond(&data, "Essays", "Unknown essay sample", result)
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap_or_else(PoisonError::into_inner);
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(PoisonError::into_inner);
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(create_session)
        .service(get_session)
        .service(delete_session)
        .service(session_action)
        .service(start_session_test)
        .service(submit_session_test)
        .service(generate_test)
        .service(evaluate_test)
        .service(define_word)
        .service(analyze_essay)
        .service(list_word_lists)
        .service(get_word_list)
        .service(list_essay_samples)
        .service(get_essay_sample)
        .service(get_logs)
}

pub fn start_server(state: web::Data<HttpState>, settings: &ServerSettings) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new().wrap(cors).app_data(state.clone()).service(api_scope())
    })
    .bind((settings.host.as_str(), settings.port))?
    .run();

    Ok(server)
}

// Helper trait to avoid move issues in handlers
trait RequestData<T> {
    fn req_data(&self) -> &T;
}

impl<T> RequestData<T> for web::Json<T> {
    fn req_data(&self) -> &T {
        &**self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm_config::LLMConfig;
    use crate::infrastructure::config::{CredentialProvider, CredentialResolver, SettingsCredential};
    use crate::infrastructure::llm_clients::{GenerationRequest, LLMClient};
    use actix_web::test;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::VecDeque;

    const SPEAKING_TEST: &str = r#"```json
    {"parts":[
        {"title":"Part 1","questions":["Where do you live?"]},
        {"title":"Part 2","questions":["Describe a memorable journey."]},
        {"title":"Part 3","questions":["How has travel changed?"]}
    ]}
    ```"#;

    const SPEAKING_EVALUATION: &str = r#"{
        "overallBand": 7,
        "criteria": [
            {"name":"Fluency & Coherence","score":7,"feedback":"Fluent.","improvement":"Vary linkers."},
            {"name":"Lexical Resource","score":7,"feedback":"Good range.","improvement":"Use idioms."},
            {"name":"Grammatical Range & Accuracy","score":6.5,"feedback":"Minor slips.","improvement":"Check articles."},
            {"name":"Pronunciation","score":7.5,"feedback":"Clear.","improvement":"Work on stress."}
        ],
        "generalFeedback":"Solid performance.",
        "improvementPlan":["Practise Part 2 timing"]
    }"#;

    struct QueuedClient {
        replies: Mutex<VecDeque<Result<String>>>,
    }

    #[async_trait]
    impl LLMClient for QueuedClient {
        async fn generate(&self, _config: &LLMConfig, _request: &GenerationRequest) -> Result<String> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::Transport("no scripted reply".to_string())))
        }
    }

    /// Never answers, like a model call that hangs until the client gives up.
    struct StalledClient;

    #[async_trait]
    impl LLMClient for StalledClient {
        async fn generate(&self, _config: &LLMConfig, _request: &GenerationRequest) -> Result<String> {
            std::future::pending().await
        }
    }

    fn state_with(llm: Arc<dyn LLMClient + Send + Sync>, max_sessions: usize) -> web::Data<HttpState> {
        let providers: Vec<Box<dyn CredentialProvider>> = vec![Box::new(SettingsCredential::new(
            "API_KEY",
            Some("test-key".to_string()),
        ))];
        let client = ContentClient::new(
            llm,
            LLMConfig::default(),
            Arc::new(CredentialResolver::new(providers)),
        );
        web::Data::new(HttpState::with_session_limit(
            Arc::new(client),
            Arc::new(Mutex::new(Vec::new())),
            max_sessions,
        ))
    }

    fn state(replies: Vec<Result<String>>) -> web::Data<HttpState> {
        let llm = Arc::new(QueuedClient {
            replies: Mutex::new(replies.into_iter().collect()),
        });
        state_with(llm, MAX_SESSIONS)
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).service(api_scope())).await
        };
    }

    #[actix_web::test]
    async fn test_session_runs_from_home_to_results() {
        let data = state(vec![
            Ok(SPEAKING_TEST.to_string()),
            Ok(SPEAKING_EVALUATION.to_string()),
        ]);
        let app = app!(data);

        let created: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post().uri("/api/sessions").to_request(),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["state"]["view"], "home");
        assert_eq!(created["state"]["questionCount"], 15);

        let selected: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/sessions/{}/actions", id))
                .set_json(json!({ "type": "select_skill", "skill": "speaking" }))
                .to_request(),
        )
        .await;
        assert_eq!(selected["state"]["view"], "setup");

        let started: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/sessions/{}/start", id))
                .to_request(),
        )
        .await;
        assert_eq!(started["state"]["view"], "test");
        assert_eq!(started["state"]["currentTest"]["skill"], "speaking");
        assert!(started["state"]["loading"].is_null());

        let answered: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/sessions/{}/actions", id))
                .set_json(json!({
                    "type": "answer",
                    "response": { "partId": 2, "answer": "A trip to Kyoto." }
                }))
                .to_request(),
        )
        .await;
        assert_eq!(answered["state"]["responses"].as_array().unwrap().len(), 1);

        let submitted: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/sessions/{}/submit", id))
                .to_request(),
        )
        .await;
        assert_eq!(submitted["state"]["view"], "results");
        assert_eq!(submitted["state"]["result"]["overallBand"], 7.0);
        assert_eq!(
            submitted["state"]["result"]["criteria"].as_array().unwrap().len(),
            4
        );
    }

    #[actix_web::test]
    async fn test_failed_generation_keeps_session_in_setup() {
        let data = state(vec![Ok("   ".to_string())]);
        let app = app!(data);

        let created: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post().uri("/api/sessions").to_request(),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();
        let select = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/actions", id))
            .set_json(json!({ "type": "select_skill", "skill": "writing" }))
            .to_request();
        test::call_service(&app, select).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/sessions/{}/start", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "empty_response");

        let session: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/sessions/{}", id))
                .to_request(),
        )
        .await;
        assert_eq!(session["state"]["view"], "setup");
        assert!(session["state"]["loading"].is_null());
        assert!(session["state"]["lastError"].as_str().unwrap().contains("Empty response"));
    }

    #[actix_web::test]
    async fn test_invalid_transition_is_conflict() {
        let data = state(Vec::new());
        let app = app!(data);

        let created: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post().uri("/api/sessions").to_request(),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/sessions/{}/submit", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_transition");
    }

    #[actix_web::test]
    async fn test_unknown_session_is_not_found() {
        let data = state(Vec::new());
        let app = app!(data);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/sessions/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_generate_rejects_out_of_range_count() {
        let data = state(Vec::new());
        let app = app!(data);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/tests/generate")
                .set_json(json!({ "skill": "reading", "questionCount": 51 }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation");
    }

    #[actix_web::test]
    async fn test_define_degrades_to_placeholder() {
        let data = state(vec![Err(AppError::Transport("timeout".to_string()))]);
        let app = app!(data);

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/vocabulary/define")
                .set_json(json!({ "word": "ubiquitous" }))
                .to_request(),
        )
        .await;
        assert_eq!(body["definition"], "Could not load definition.");

        let logs = data.logs.lock().unwrap();
        assert!(logs.iter().any(|entry| entry.source == "Vocabulary"));
    }

    #[actix_web::test]
    async fn test_catalog_endpoints() {
        let data = state(Vec::new());
        let app = app!(data);

        let lists: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/vocabulary/lists").to_request(),
        )
        .await;
        assert_eq!(lists.as_array().unwrap().len(), 5);

        let sample: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/essays/samples/1").to_request(),
        )
        .await;
        assert_eq!(sample["id"], 1);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/essays/samples/99").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_log_ring_is_bounded() {
        let logs = Mutex::new(Vec::new());
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            add_log(&logs, "INFO", "Test", &format!("entry {}", i));
        }
        let logs = logs.lock().unwrap();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "entry 5");
    }

    macro_rules! new_session {
        ($app:expr) => {{
            let created: Value = test::call_and_read_body_json(
                $app,
                test::TestRequest::post().uri("/api/sessions").to_request(),
            )
            .await;
            created["id"].as_str().unwrap().to_string()
        }};
    }

    #[actix_web::test]
    async fn test_abandoned_start_releases_session() {
        let data = state_with(Arc::new(StalledClient), MAX_SESSIONS);
        let app = app!(data);
        let id = new_session!(&app);
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/sessions/{}/actions", id))
                .set_json(json!({ "type": "select_skill", "skill": "writing" }))
                .to_request(),
        )
        .await;

        let start = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/sessions/{}/start", id))
                .to_request(),
        );
        let outcome = tokio::time::timeout(std::time::Duration::from_millis(200), start).await;
        assert!(outcome.is_err(), "stalled generation should not complete");

        let session: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/sessions/{}", id))
                .to_request(),
        )
        .await;
        assert_eq!(session["state"]["view"], "setup");
        assert!(session["state"]["loading"].is_null());
        assert_eq!(session["state"]["lastError"], CANCELLED_MESSAGE);

        let home = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/sessions/{}/actions", id))
                .set_json(json!({ "type": "navigate", "view": "home" }))
                .to_request(),
        )
        .await;
        assert_eq!(home.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_deleted_session_is_gone() {
        let data = state(Vec::new());
        let app = app!(data);
        let id = new_session!(&app);

        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/sessions/{}", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        for req in [
            test::TestRequest::get().uri(&format!("/api/sessions/{}", id)),
            test::TestRequest::delete().uri(&format!("/api/sessions/{}", id)),
        ] {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        }
    }

    #[actix_web::test]
    async fn test_session_limit_evicts_least_recently_used() {
        let data = state_with(
            Arc::new(QueuedClient {
                replies: Mutex::new(VecDeque::new()),
            }),
            2,
        );
        let app = app!(data);

        let first = new_session!(&app);
        let second = new_session!(&app);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let touched = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/sessions/{}", first))
                .to_request(),
        )
        .await;
        assert_eq!(touched.status(), StatusCode::OK);

        let third = new_session!(&app);

        for (id, expected) in [
            (&first, StatusCode::OK),
            (&second, StatusCode::NOT_FOUND),
            (&third, StatusCode::OK),
        ] {
            let resp = test::call_service(
                &app,
                test::TestRequest::get()
                    .uri(&format!("/api/sessions/{}", id))
                    .to_request(),
            )
            .await;
            assert_eq!(resp.status(), expected, "session {}", id);
        }
        assert_eq!(data.sessions().len(), 2);
    }
}
