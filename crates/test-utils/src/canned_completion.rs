use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use contentdag::llm::{
    CompletionRequest, CompletionService, JsonCompletionService, Sleeper, TextCompletion,
    TransportError,
};

/// System-prompt markers for each completion-backed step.
pub const QUESTIONS_MARKER: &str = "content specialist";
pub const PRODUCT_MARKER: &str = "copywriter";
pub const COMPARISON_MARKER: &str = "comparison expert";
pub const FAQ_MARKER: &str = "customer service specialist";

/// One scripted transport reply.
#[derive(Debug, Clone)]
pub enum CannedReply {
    Text(String),
    RateLimited,
    ApiError(u16, String),
}

impl CannedReply {
    pub fn text(s: impl Into<String>) -> Self {
        CannedReply::Text(s.into())
    }

    fn into_result(self) -> Result<String, TransportError> {
        match self {
            CannedReply::Text(s) => Ok(s),
            CannedReply::RateLimited => {
                Err(TransportError::RateLimited("429 Too Many Requests".to_string()))
            }
            CannedReply::ApiError(status, message) => Err(TransportError::Api { status, message }),
        }
    }
}

struct Route {
    marker: String,
    replies: VecDeque<CannedReply>,
}

/// Deterministic text-completion stub.
///
/// Each route matches requests whose system prompt contains its marker.
/// Replies are served in order; the last one repeats forever. Every request
/// is recorded.
#[derive(Clone, Default)]
pub struct CannedCompletion {
    routes: Arc<Mutex<Vec<Route>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl CannedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, marker: &str, text: impl Into<String>) -> Self {
        self.route_sequence(marker, vec![CannedReply::text(text)])
    }

    pub fn route_sequence(self, marker: &str, replies: Vec<CannedReply>) -> Self {
        self.routes.lock().unwrap().push(Route {
            marker: marker.to_string(),
            replies: replies.into(),
        });
        self
    }

    /// Well-formed replies for every step, with the usual model noise
    /// (code fences, leading prose) around some of them.
    pub fn standard() -> Self {
        Self::new()
            .route(QUESTIONS_MARKER, standard_questions_reply())
            .route(PRODUCT_MARKER, standard_product_reply())
            .route(COMPARISON_MARKER, standard_comparison_reply())
            .route(FAQ_MARKER, standard_faq_reply())
    }

    /// Standard replies, except `marker` serves `replies` instead.
    pub fn standard_with_override(marker: &str, replies: Vec<CannedReply>) -> Self {
        let standard = [
            (QUESTIONS_MARKER, standard_questions_reply()),
            (PRODUCT_MARKER, standard_product_reply()),
            (COMPARISON_MARKER, standard_comparison_reply()),
            (FAQ_MARKER, standard_faq_reply()),
        ];
        standard
            .into_iter()
            .fold(Self::new(), |canned, (m, text)| {
                if m == marker {
                    canned.route_sequence(m, replies.clone())
                } else {
                    canned.route(m, text)
                }
            })
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded requests whose system prompt contains `marker`.
    pub fn calls_matching(&self, marker: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.system.contains(marker))
            .count()
    }

    /// Wrap in the production JSON layer with an instant sleeper.
    pub fn into_service(self, max_attempts: u32) -> Arc<dyn CompletionService> {
        Arc::new(JsonCompletionService::new(
            self,
            Arc::new(RecordingSleeper::new()),
            max_attempts,
            Duration::from_secs(2),
        ))
    }
}

#[async_trait]
impl TextCompletion for CannedCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(request.clone());

        let mut routes = self.routes.lock().unwrap();
        let route = routes
            .iter_mut()
            .find(|r| request.system.contains(&r.marker))
            .ok_or_else(|| TransportError::Request("no canned route for request".to_string()))?;

        let reply = if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        };
        reply
            .ok_or_else(|| TransportError::Request("canned route has no replies".to_string()))?
            .into_result()
    }
}

/// Sleeper that returns immediately and records each requested duration.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

pub fn standard_questions_reply() -> String {
    let questions = [
        ("INFORMATIONAL", "What are the key benefits of GlowBoost Vitamin C Serum?"),
        ("INFORMATIONAL", "What ingredients are in GlowBoost Vitamin C Serum?"),
        ("INFORMATIONAL", "What does the serum do for the skin?"),
        ("INFORMATIONAL", "How strong is the vitamin C concentration?"),
        ("SAFETY", "What are the side effects?"),
        ("SAFETY", "Who should avoid using this serum?"),
        ("SAFETY", "Is it safe for sensitive skin?"),
        ("USAGE", "How do I apply the serum?"),
        ("USAGE", "When is the best time to use it?"),
        ("USAGE", "Can I use it with sunscreen?"),
        ("PURCHASE", "How much does it cost?"),
        ("PURCHASE", "Is it worth the price?"),
        ("PURCHASE", "Where can I buy it?"),
        ("COMPARISON", "How does it compare to other vitamin C serums?"),
        ("COMPARISON", "What are the alternatives?"),
    ];
    let items: Vec<String> = questions
        .iter()
        .enumerate()
        .map(|(i, (cat, text))| {
            format!(r#"{{"id": "q{}", "text": "{}", "category": "{}"}}"#, i + 1, text, cat)
        })
        .collect();
    format!("```json\n[\n  {}\n]\n```", items.join(",\n  "))
}

pub fn standard_product_reply() -> String {
    r#"Here is the content you asked for:
{
  "description": "GlowBoost is a lightweight vitamin C serum that brightens dull skin.",
  "benefits_section": ["Brightening", "Fades dark spots", "Evens tone"],
  "usage_section": "Apply 2-3 drops every morning before sunscreen.",
  "ingredients_section": "Vitamin C brightens; hyaluronic acid hydrates.",
  "safety_section": "Patch test first; mild tingling is normal."
}"#
    .to_string()
}

pub fn standard_comparison_reply() -> String {
    r#"{
  "ingredient_analysis": "Both serums rely on vitamin C.",
  "value_assessment": "GlowBoost costs less for a similar routine.",
  "concentration_analysis": "RadiantGlow carries a higher concentration.",
  "recommendation": "Oily skin suits GlowBoost; dry skin suits RadiantGlow."
}"#
    .to_string()
}

pub fn standard_faq_reply() -> String {
    let answers: Vec<String> = (1..=5)
        .map(|i| format!(r#"{{"question": "q{i}", "answer": "Answer number {i}."}}"#))
        .collect();
    format!("[{}]", answers.join(", "))
}
