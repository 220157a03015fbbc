//! Two-phase trade submission.
//!
//! Phase one acquires the optional screenshot in the background; phase two
//! inserts the completed draft in one step. Only one submission may be in
//! flight, and removals go through the gate as well, so no other journal
//! mutation can interleave with a pending read.

use crate::application::attachment::Screenshot;
use crate::application::journal::TradeJournal;
use crate::domain::errors::JournalError;
use crate::domain::trading::types::{Trade, TradeDraft};
use std::path::PathBuf;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::warn;

type AttachmentResult = Result<Screenshot, JournalError>;

struct PendingSubmission {
    draft: TradeDraft,
    rx: oneshot::Receiver<AttachmentResult>,
}

#[derive(Debug)]
pub enum SubmissionStatus {
    Idle,
    /// Screenshot read still running; submit stays disabled.
    Reading,
    Saved(Trade),
    Failed(JournalError),
}

#[derive(Default)]
pub struct SubmissionGate {
    pending: Option<PendingSubmission>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a submission. Without a screenshot the trade is inserted
    /// immediately; otherwise the read is spawned on `runtime` and the
    /// insert happens in a later [`poll`](Self::poll).
    pub fn submit(
        &mut self,
        journal: &mut TradeJournal,
        draft: TradeDraft,
        screenshot: Option<PathBuf>,
        runtime: &Handle,
    ) -> Result<SubmissionStatus, JournalError> {
        if self.is_busy() {
            return Err(JournalError::SubmissionInFlight);
        }

        let Some(path) = screenshot else {
            return Ok(SubmissionStatus::Saved(journal.insert(draft)?));
        };

        let (tx, rx) = oneshot::channel();
        runtime.spawn(async move {
            let result = Screenshot::read(path).await;
            let _ = tx.send(result);
        });
        self.pending = Some(PendingSubmission { draft, rx });
        Ok(SubmissionStatus::Reading)
    }

    /// Delete a trade after `confirm` approves it, unless a submission is
    /// still waiting on its screenshot. See [`TradeJournal::remove_confirmed`].
    pub fn remove(
        &self,
        journal: &mut TradeJournal,
        id: &str,
        confirm: impl FnOnce(&Trade) -> bool,
    ) -> Result<Option<Trade>, JournalError> {
        if self.is_busy() {
            return Err(JournalError::SubmissionInFlight);
        }
        journal.remove_confirmed(id, confirm)
    }

    /// Complete the pending submission if its screenshot is ready.
    pub fn poll(&mut self, journal: &mut TradeJournal) -> SubmissionStatus {
        let Some(mut pending) = self.pending.take() else {
            return SubmissionStatus::Idle;
        };

        match pending.rx.try_recv() {
            Ok(Ok(screenshot)) => {
                let mut draft = pending.draft;
                draft.screenshot = Some(screenshot.into_data_uri());
                match journal.insert(draft) {
                    Ok(trade) => SubmissionStatus::Saved(trade),
                    Err(e) => SubmissionStatus::Failed(e),
                }
            }
            Ok(Err(e)) => {
                warn!("Screenshot read failed: {}", e);
                SubmissionStatus::Failed(e)
            }
            Err(TryRecvError::Empty) => {
                self.pending = Some(pending);
                SubmissionStatus::Reading
            }
            Err(TryRecvError::Closed) => SubmissionStatus::Failed(JournalError::Attachment {
                reason: "screenshot reader stopped unexpectedly".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::journal::DEFAULT_STORAGE_KEY;
    use crate::domain::trading::types::Side;
    use crate::infrastructure::repositories::InMemoryKeyValueStore;
    use std::sync::Arc;
    use std::time::Duration;
    use uuid::Uuid;

    fn journal() -> (Arc<InMemoryKeyValueStore>, TradeJournal) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let journal = TradeJournal::load(store.clone(), DEFAULT_STORAGE_KEY).unwrap();
        (store, journal)
    }

    async fn wait_for(gate: &mut SubmissionGate, journal: &mut TradeJournal) -> SubmissionStatus {
        for _ in 0..200 {
            match gate.poll(journal) {
                SubmissionStatus::Reading => tokio::time::sleep(Duration::from_millis(5)).await,
                other => return other,
            }
        }
        panic!("screenshot read never completed");
    }

    #[tokio::test]
    async fn test_submit_without_screenshot_saves_immediately() {
        let (_, mut journal) = journal();
        let mut gate = SubmissionGate::new();
        let status = gate
            .submit(
                &mut journal,
                TradeDraft::new("EURUSD", Side::Long, 1.1, 1.1010),
                None,
                &Handle::current(),
            )
            .unwrap();

        assert!(matches!(status, SubmissionStatus::Saved(_)));
        assert!(!gate.is_busy());
        assert_eq!(journal.len(), 1);
    }

    #[tokio::test]
    async fn test_screenshot_is_attached_before_insert() {
        let path = std::env::temp_dir().join(format!("submit-{}.png", Uuid::new_v4()));
        tokio::fs::write(&path, b"png").await.unwrap();

        let (store, mut journal) = journal();
        let mut gate = SubmissionGate::new();
        let status = gate
            .submit(
                &mut journal,
                TradeDraft::new("XAUUSD", Side::Long, 2000.0, 2001.0),
                Some(path.clone()),
                &Handle::current(),
            )
            .unwrap();
        assert!(matches!(status, SubmissionStatus::Reading));
        assert!(gate.is_busy());

        // a second submission is refused while the read is pending
        let err = gate
            .submit(
                &mut journal,
                TradeDraft::new("EURUSD", Side::Long, 1.0, 1.1),
                None,
                &Handle::current(),
            )
            .unwrap_err();
        assert!(matches!(err, JournalError::SubmissionInFlight));
        assert_eq!(store.writes(), 0);

        match wait_for(&mut gate, &mut journal).await {
            SubmissionStatus::Saved(trade) => {
                assert_eq!(trade.screenshot.as_deref(), Some("data:image/png;base64,cG5n"));
            }
            other => panic!("unexpected status {:?}", other),
        }
        assert!(!gate.is_busy());
        assert_eq!(journal.len(), 1);
        assert_eq!(store.writes(), 1);

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_failed_read_inserts_nothing() {
        let (store, mut journal) = journal();
        let mut gate = SubmissionGate::new();
        gate.submit(
            &mut journal,
            TradeDraft::new("XAUUSD", Side::Long, 2000.0, 2001.0),
            Some(PathBuf::from("/no/such/screenshot.png")),
            &Handle::current(),
        )
        .unwrap();

        let status = wait_for(&mut gate, &mut journal).await;
        assert!(matches!(status, SubmissionStatus::Failed(JournalError::Attachment { .. })));
        assert!(journal.is_empty());
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_removal_waits_for_pending_screenshot() {
        let path = std::env::temp_dir().join(format!("submit-{}.png", Uuid::new_v4()));
        tokio::fs::write(&path, b"png").await.unwrap();

        let (store, mut journal) = journal();
        let mut gate = SubmissionGate::new();
        let existing = journal
            .insert(TradeDraft::new("EURUSD", Side::Short, 1.1, 1.09))
            .unwrap();
        gate.submit(
            &mut journal,
            TradeDraft::new("XAUUSD", Side::Long, 2000.0, 2001.0),
            Some(path.clone()),
            &Handle::current(),
        )
        .unwrap();

        let err = gate.remove(&mut journal, &existing.id, |_| true).unwrap_err();
        assert!(matches!(err, JournalError::SubmissionInFlight));
        assert_eq!(journal.len(), 1);
        assert_eq!(store.writes(), 1);

        assert!(matches!(
            wait_for(&mut gate, &mut journal).await,
            SubmissionStatus::Saved(_)
        ));
        let removed = gate.remove(&mut journal, &existing.id, |_| true).unwrap();
        assert_eq!(removed.map(|t| t.id), Some(existing.id));
        assert_eq!(journal.len(), 1);
        assert_eq!(journal.snapshot()[0].symbol, "XAUUSD");

        tokio::fs::remove_file(&path).await.ok();
    }

    #[test]
    fn test_idle_gate_polls_idle() {
        let (_, mut journal) = journal();
        let mut gate = SubmissionGate::new();
        assert!(matches!(gate.poll(&mut journal), SubmissionStatus::Idle));
    }
}
