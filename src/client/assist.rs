//! AI assist flows: block rephrasing and generated-markup fixes
//!
//! Both flows are gated on the locally held credential and validated
//! before any request leaves the process. The rephrase presentation state
//! lives in [`RephraseSession`]: one suggestion is in flight at a time,
//! and accepting it is the only AI path that mutates the document tree.

use serde::{Deserialize, Serialize};

use crate::client::{ClientError, ClientResult};
use crate::core::section::SectionId;
use crate::core::store::DocumentStore;
use crate::core::transient::FlagToken;

/// Instruction sent to the markup fixer when the user supplies none.
pub const DEFAULT_FIX_INSTRUCTION: &str =
    "Fix grammar, make the tone professional, and ensure HTML structure is clean.";

/// Client for the external AI assist service.
#[derive(Debug, Clone)]
pub struct AssistClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct RephraseRequest<'a> {
    text: &'a str,
    api_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct RephraseResponse {
    #[serde(default)]
    success: bool,
    rephrased: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct FixRequest<'a> {
    html: &'a str,
    api_key: &'a str,
    instruction: &'a str,
}

#[derive(Debug, Deserialize)]
struct FixResponse {
    #[serde(default)]
    success: bool,
    fixed_html: Option<String>,
    error: Option<String>,
}

impl AssistClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Rephrase a block's text. Empty text and a missing credential are
    /// validation errors; no request is made for either.
    pub async fn rephrase(&self, text: &str, api_key: &str) -> ClientResult<String> {
        if text.trim().is_empty() {
            return Err(ClientError::EmptyInput("text"));
        }
        if api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        let response: RephraseResponse = self
            .http
            .post(format!("{}/api/rephrase", self.base_url))
            .json(&RephraseRequest { text, api_key })
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            response
                .rephrased
                .map(|text| text.trim().to_string())
                .ok_or_else(|| ClientError::Remote("rephrase returned no text".to_string()))
        } else {
            Err(ClientError::Remote(response.error.unwrap_or_else(|| {
                "rephrase failed".to_string()
            })))
        }
    }

    /// Ask the service for an alternative version of the rendered body
    /// markup. The result is presented side by side; accepting or
    /// discarding it is the caller's decision, no merging happens here.
    pub async fn fix_markup(
        &self,
        html: &str,
        api_key: &str,
        instruction: Option<&str>,
    ) -> ClientResult<String> {
        if html.trim().is_empty() {
            return Err(ClientError::EmptyInput("HTML"));
        }
        if api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        let request = FixRequest {
            html,
            api_key,
            instruction: instruction.unwrap_or(DEFAULT_FIX_INSTRUCTION),
        };
        let response: FixResponse = self
            .http
            .post(format!("{}/api/fix-html", self.base_url))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            response
                .fixed_html
                .ok_or_else(|| ClientError::Remote("fix returned no markup".to_string()))
        } else {
            Err(ClientError::Remote(response.error.unwrap_or_else(|| {
                "markup fix failed".to_string()
            })))
        }
    }
}

/// The single in-flight rephrase presentation context.
///
/// Tracks which block the currently displayed suggestion would replace.
/// Beginning a new session supersedes the previous one; accepting
/// overwrites exactly that block's content and clears the session;
/// dismissing clears it without touching the tree.
#[derive(Debug, Default)]
pub struct RephraseSession {
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    section: SectionId,
    block: usize,
    suggestion: Option<String>,
}

impl RephraseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a candidate block, discarding any previous context.
    pub fn begin(&mut self, section: SectionId, block: usize) {
        self.pending = Some(Pending {
            section,
            block,
            suggestion: None,
        });
    }

    /// Attach the suggestion once the rephrase call resolves. Ignored if
    /// the session was dismissed in the meantime.
    pub fn offer(&mut self, suggestion: String) {
        if let Some(pending) = &mut self.pending {
            pending.suggestion = Some(suggestion);
        }
    }

    pub fn target(&self) -> Option<(SectionId, usize)> {
        self.pending.as_ref().map(|p| (p.section, p.block))
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.pending.as_ref()?.suggestion.as_deref()
    }

    /// Atomically replace the candidate block's content with the
    /// suggestion and clear the session. Arms the block's reveal hint and
    /// returns its token so the shell can schedule the clear. `None` when
    /// there is no suggestion to accept.
    pub fn accept(&mut self, store: &mut DocumentStore) -> Option<FlagToken> {
        let pending = self.pending.take()?;
        let suggestion = pending.suggestion?;
        store.set_block_content(&pending.section, pending.block, suggestion);
        store.arm_reveal(&pending.section, pending.block)
    }

    /// Drop the context without mutating any content.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::section::BlockType;

    fn store_with_text(content: &str) -> (DocumentStore, SectionId) {
        let mut store = DocumentStore::new();
        let id = store.add_section(None).unwrap();
        store.set_block_content(&id, 0, content.to_string());
        (store, id)
    }

    #[tokio::test]
    async fn rephrase_validates_before_any_request() {
        let client = AssistClient::new("http://127.0.0.1:1");
        assert!(matches!(
            client.rephrase("  ", "key").await,
            Err(ClientError::EmptyInput("text"))
        ));
        assert!(matches!(
            client.rephrase("some text", "").await,
            Err(ClientError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn fix_validates_before_any_request() {
        let client = AssistClient::new("http://127.0.0.1:1");
        assert!(matches!(
            client.fix_markup("", "key", None).await,
            Err(ClientError::EmptyInput("HTML"))
        ));
        assert!(matches!(
            client.fix_markup("<p>hi</p>", "", None).await,
            Err(ClientError::MissingApiKey)
        ));
    }

    #[test]
    fn accept_replaces_content_and_clears_session() {
        let (mut store, id) = store_with_text("draft");
        let mut session = RephraseSession::new();
        session.begin(id, 0);
        session.offer("polished".to_string());

        let token = session.accept(&mut store).unwrap();
        assert_eq!(store.block_content(&id, 0), Some("polished"));
        assert!(session.target().is_none());
        assert!(store.expire_reveal(&id, 0, token));
    }

    #[test]
    fn dismiss_leaves_content_untouched() {
        let (mut store, id) = store_with_text("draft");
        let mut session = RephraseSession::new();
        session.begin(id, 0);
        session.offer("polished".to_string());
        session.dismiss();

        assert!(session.accept(&mut store).is_none());
        assert_eq!(store.block_content(&id, 0), Some("draft"));
    }

    #[test]
    fn accept_without_suggestion_is_a_no_op() {
        let (mut store, id) = store_with_text("draft");
        let mut session = RephraseSession::new();
        session.begin(id, 0);
        assert!(session.accept(&mut store).is_none());
        assert_eq!(store.block_content(&id, 0), Some("draft"));
    }

    #[test]
    fn late_offer_after_dismiss_is_ignored() {
        let mut session = RephraseSession::new();
        session.begin(SectionId::new(), 0);
        session.dismiss();
        session.offer("stale response".to_string());
        assert!(session.suggestion().is_none());
    }

    #[test]
    fn beginning_a_new_session_supersedes_the_old() {
        let (mut store, id) = store_with_text("draft");
        store.add_block(&id, BlockType::Text);
        store.set_block_content(&id, 1, "other".to_string());

        let mut session = RephraseSession::new();
        session.begin(id, 0);
        session.offer("first".to_string());
        session.begin(id, 1);
        session.offer("second".to_string());

        session.accept(&mut store);
        assert_eq!(store.block_content(&id, 0), Some("draft"));
        assert_eq!(store.block_content(&id, 1), Some("second"));
    }
}
