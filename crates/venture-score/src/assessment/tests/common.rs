use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;

use crate::assessment::domain::{
    Answer, Evaluation, EvaluationSource, Question, QuestionId, ScoredAnswer,
};
use crate::assessment::oracle::{AnswerOracle, OracleUnavailable, ProviderKind};
use crate::config::OracleSettings;

pub(super) const AVERAGE_ANSWER: &str = "We do things.";
pub(super) const DATA_RICH_ANSWER: &str = "We have $5M ARR growing 20% month over month with 1,200 paying customers and three enterprise partnership contracts signed in Q2.";

pub(super) fn question(id: &str, category: &'static str, weight: u32) -> Question {
    Question {
        id: QuestionId::from(id),
        text: "Describe the business.",
        category,
        weight,
    }
}

pub(super) fn scored(id: &str, category: &'static str, weight: u32, score: u8) -> ScoredAnswer {
    ScoredAnswer::new(
        &question(id, category, weight),
        &Answer::new(id, "answer text"),
        Evaluation::clamped(i64::from(score), "feedback", "reasoning"),
        EvaluationSource::Heuristic,
    )
}

/// Oracle that replays canned outcomes and counts calls.
pub(super) struct ScriptedOracle {
    replies: Mutex<VecDeque<Result<Evaluation, OracleUnavailable>>>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub(super) fn new(replies: Vec<Result<Evaluation, OracleUnavailable>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerOracle for ScriptedOracle {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn cost_per_million(&self) -> f64 {
        1.0
    }

    async fn evaluate(
        &self,
        _question: &Question,
        _answer: &Answer,
    ) -> Result<Evaluation, OracleUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .expect("replies mutex poisoned")
            .pop_front()
            .unwrap_or(Err(OracleUnavailable::QuotaExceeded))
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub(super) async fn spawn_provider(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("provider stub serves");
    });
    format!("http://{addr}")
}

pub(super) fn oracle_settings(provider: ProviderKind, endpoint: String) -> OracleSettings {
    OracleSettings {
        enabled: true,
        provider,
        model: provider.default_model().id.to_string(),
        api_key: Some("test-key".to_string()),
        endpoint: Some(endpoint),
        call_delay: Duration::ZERO,
        timeout: Some(Duration::from_secs(5)),
    }
}
