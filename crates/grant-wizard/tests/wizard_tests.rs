use grant_model::{mime, DocumentType, FileRef, Risk, Step, SubmissionDraft};
use grant_rules::RuleViolation;
use grant_store::{
    DraftStore, KeyValueStore, MemoryStore, MetaStore, StorageKeys, SubmissionStatus,
};
use grant_test_utils::{file_of, sample_draft, CountingStore, FailingStore, RejectingStore};
use grant_wizard::{
    ProjectDashboard, Route, SessionProvider, StaticSession, SubmitMode, UserIdentity, Wizard,
    WizardConfig, WizardError,
};
use std::sync::Arc;
use std::time::Duration;

fn sync_config() -> WizardConfig {
    WizardConfig::new().with_quiet_period(Duration::ZERO)
}

#[test]
fn restart_resumes_draft_and_step() {
    let kv = Arc::new(MemoryStore::new());
    {
        let mut wizard = Wizard::start(kv.clone(), sync_config());
        wizard.update(|d| d.proposal.title = "Seed bank".into());
        wizard.add_risk(Risk::new("Pests", "Sealed storage"));
        wizard.add_activity("Collection trips");
        wizard.toggle_activity_month(1, 6);
        wizard.go_to(4);
    }

    let wizard = Wizard::start(kv, sync_config());
    assert_eq!(wizard.current_step(), 4);
    assert_eq!(wizard.step(), Step::Risks);
    assert_eq!(wizard.draft().proposal.title, "Seed bank");
    assert_eq!(wizard.draft().risks.len(), 1);
    assert!(wizard.draft().activities[1].runs_in(6));
}

#[test]
fn restore_round_trips_a_full_draft() {
    let kv = Arc::new(MemoryStore::new());
    let drafts = DraftStore::new(kv.clone(), StorageKeys::default());
    drafts.save_draft(&sample_draft()).unwrap();

    let wizard = Wizard::start(kv, sync_config());
    assert_eq!(wizard.draft(), &sample_draft());
    assert!(wizard.is_valid());
    assert!(wizard.missing_attachments().is_empty());
}

#[test]
fn malformed_snapshot_falls_back_to_seed() {
    let kv = Arc::new(MemoryStore::with_entries([
        ("draft_submission", "{{{"),
        ("draft_step_index", "banana"),
    ]));
    let wizard = Wizard::start(kv, sync_config());
    assert_eq!(wizard.draft(), &SubmissionDraft::seeded());
    assert_eq!(wizard.current_step(), 0);
}

#[test]
fn stored_step_is_clamped() {
    let kv = Arc::new(MemoryStore::with_entries([("draft_step_index", "25")]));
    assert_eq!(Wizard::start(kv, sync_config()).current_step(), 9);
}

#[test]
fn empty_collections_in_snapshot_stay_empty() {
    let kv = Arc::new(MemoryStore::with_entries([(
        "draft_submission",
        r#"{"activities": [], "budgetLines": []}"#,
    )]));
    let wizard = Wizard::start(kv, sync_config());
    assert!(wizard.draft().activities.is_empty());
    assert!(wizard.draft().budget_lines.is_empty());
    assert!(!wizard.is_valid());
}

#[test]
fn stored_bad_month_is_reported_not_discarded() {
    let kv = Arc::new(MemoryStore::with_entries([(
        "draft_submission",
        r#"{"proposal":{"title":"Seed bank"},"activities":[{"label":"Trips","months":[2,300]},{"label":"Audit","months":[-1]}]}"#,
    )]));
    let wizard = Wizard::start(kv, sync_config());

    assert_eq!(wizard.draft().proposal.title, "Seed bank");
    let months: Vec<_> = wizard
        .validation()
        .for_step(Step::Activities)
        .filter_map(|v| match v.violation {
            RuleViolation::InvalidMonth { month } => Some(month),
            _ => None,
        })
        .collect();
    assert_eq!(months, vec![300, -1]);
}

#[test]
fn restore_does_not_write_back() {
    let kv = Arc::new(CountingStore::new());
    DraftStore::new(kv.clone(), StorageKeys::default())
        .save_draft(&sample_draft())
        .unwrap();

    let _wizard = Wizard::start(kv.clone(), sync_config());
    assert_eq!(kv.writes("draft_submission"), 1);
}

#[test]
fn failing_store_never_breaks_editing() {
    let mut wizard = Wizard::start(Arc::new(FailingStore), sync_config());
    wizard.update(|d| d.proposal.title = "Offline".into());
    assert!(wizard.go_to(3));
    assert_eq!(wizard.draft().proposal.title, "Offline");

    let err = wizard.submit().unwrap_err();
    assert!(matches!(err, WizardError::Storage(_)));
}

#[test]
fn non_finite_budget_is_reported_and_never_persisted() {
    let kv = Arc::new(MemoryStore::new());
    {
        let mut wizard = Wizard::start(kv.clone(), sync_config());
        wizard.update(|d| d.proposal.title = "Keep me".into());
        wizard.update(|d| d.budget_lines[0].total = f64::NAN);
        assert!(!wizard.is_valid());
        assert!(wizard
            .validation()
            .field_violations()
            .iter()
            .any(|v| matches!(v.violation, RuleViolation::NonFiniteAmount { .. })));
    }

    let mut wizard = Wizard::start(kv.clone(), sync_config());
    assert_eq!(wizard.draft().proposal.title, "Keep me");
    assert_eq!(wizard.draft().budget_lines[0].total, 0.0);

    wizard.update(|d| d.budget_lines[0].part_own_fund = f64::INFINITY);
    drop(wizard);
    assert_eq!(Wizard::start(kv, sync_config()).draft().budget_lines[0].part_own_fund, 0.0);
}

#[test]
fn file_gate_examples() {
    let kv = Arc::new(MemoryStore::new());
    let mut wizard = Wizard::start(kv, sync_config());
    let mib = 1024 * 1024;

    assert!(matches!(
        wizard.attach(DocumentType::Map, file_of(mime::PDF, 11 * mib)),
        Err(RuleViolation::FileTooLarge { .. })
    ));
    assert!(matches!(
        wizard.attach(DocumentType::Timeline, file_of(mime::TEXT, 2 * mib)),
        Err(RuleViolation::UnsupportedFileType { .. })
    ));
    assert_eq!(wizard.attach(DocumentType::Cv, file_of(mime::PNG, 2 * mib)), Ok(()));
}

#[tokio::test]
async fn unreadable_attachment_leaves_slots_untouched() {
    let kv = Arc::new(MemoryStore::new());
    let mut wizard = Wizard::start(kv, sync_config());
    wizard.attach(DocumentType::Cv, FileRef::new("cv.pdf", mime::PDF, vec![1])).unwrap();
    let before = wizard.draft().clone();

    let err = wizard
        .attach_file(DocumentType::Statutes, "/nonexistent/statutes.pdf")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WizardError::AttachmentRead { document: DocumentType::Statutes, .. }
    ));
    assert_eq!(wizard.draft(), &before);
}

#[tokio::test]
async fn attach_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("letter.docx");
    std::fs::write(&path, b"motivation").unwrap();

    let mut wizard = Wizard::start(Arc::new(MemoryStore::new()), sync_config());
    assert_eq!(wizard.attach_file(DocumentType::MotivationLetter, &path).await.unwrap(), Ok(()));

    let file = wizard.draft().attachments.get(DocumentType::MotivationLetter).unwrap();
    assert_eq!(file.file_name(), "letter.docx");
    assert_eq!(file.mime_type(), mime::DOCX);
}

#[tokio::test(start_paused = true)]
async fn burst_of_wizard_edits_is_written_once() {
    let kv = Arc::new(CountingStore::new());
    let mut wizard = Wizard::start(kv.clone(), WizardConfig::new());

    for i in 0..5 {
        wizard.update(|d| d.activities_summary = format!("revision {i}"));
        tokio::time::sleep(Duration::from_millis(60)).await;
    }
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(kv.writes("draft_submission"), 1);
    let stored = DraftStore::new(kv.clone(), StorageKeys::default()).load_snapshot().unwrap();
    assert_eq!(stored.activities_summary, "revision 4");
}

#[tokio::test(start_paused = true)]
async fn submit_drops_pending_autosave() {
    let kv = Arc::new(CountingStore::new());
    let mut wizard = Wizard::start(kv.clone(), WizardConfig::new());
    wizard.update(|d| d.proposal.title = "Final".into());

    wizard.submit().unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(!kv.contains("draft_submission"));
    assert_eq!(kv.writes("draft_submission"), 0);
    wizard.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn failed_submit_keeps_pending_edits() {
    let kv = Arc::new(RejectingStore::new("submission_meta"));
    let mut wizard = Wizard::start(kv.clone(), WizardConfig::new());
    wizard.update(|d| d.proposal.title = "typed just before submit".into());

    let err = wizard.submit().unwrap_err();
    assert!(matches!(err, WizardError::Storage(_)));
    tokio::time::sleep(Duration::from_secs(2)).await;
    wizard.shutdown().await;

    assert!(kv.raw("submission_meta").is_none());
    let stored = DraftStore::new(kv, StorageKeys::default()).load_snapshot().unwrap();
    assert_eq!(stored.proposal.title, "typed just before submit");
}

#[test]
fn strict_submit_accepts_complete_draft() {
    let kv = Arc::new(MemoryStore::new());
    DraftStore::new(kv.clone(), StorageKeys::default())
        .save_draft(&sample_draft())
        .unwrap();

    let mut wizard = Wizard::start(kv.clone(), sync_config().with_submit_mode(SubmitMode::Strict));
    let receipt = wizard.submit().unwrap();
    assert_eq!(receipt.summary.status, SubmissionStatus::Submitted);
    assert_eq!(
        MetaStore::new(kv, "submission_meta").load().map(|s| s.status),
        Some(SubmissionStatus::Submitted)
    );
}

#[test]
fn strict_submit_blocks_invalid_budget() {
    let kv = Arc::new(MemoryStore::new());
    DraftStore::new(kv.clone(), StorageKeys::default())
        .save_draft(&sample_draft())
        .unwrap();

    let mut wizard = Wizard::start(kv, sync_config().with_submit_mode(SubmitMode::Strict));
    wizard.update(|d| d.budget_lines[2].total = 5_000.0);
    assert!(wizard.budget_error().is_some());

    match wizard.submit() {
        Err(WizardError::SubmissionBlocked { validation, missing }) => {
            assert!(missing.is_empty());
            assert!(validation.budget_error().is_some());
        }
        other => panic!("expected a blocked submission, got {other:?}"),
    }
}

#[test]
fn dashboard_follows_project_lifecycle() {
    let kv = Arc::new(MemoryStore::new());
    let session: Arc<dyn SessionProvider> =
        Arc::new(StaticSession::signed_in(UserIdentity::dev("Awa Diop", "awa@example.org")));
    let config = sync_config();
    let dashboard = ProjectDashboard::new(kv.clone(), &config, session.clone());

    assert_eq!(dashboard.landing(), Route::Dashboard);
    assert_eq!(dashboard.start_project(), Route::Form);
    assert!(dashboard.is_draft());

    let mut wizard = Wizard::start_with_session(kv.clone(), config, session.as_ref());
    wizard.update(|d| d.proposal.title = "Water points".into());
    assert!(dashboard.has_saved_draft());

    let receipt = wizard.submit().unwrap();
    assert_eq!(receipt.next, Route::Dashboard);
    assert!(!dashboard.is_draft());
    assert!(!dashboard.has_saved_draft());
    assert_eq!(
        dashboard.summary().and_then(|s| s.title).as_deref(),
        Some("Water points")
    );
}

#[test]
fn namespaced_users_keep_separate_drafts() {
    let kv = Arc::new(MemoryStore::new());
    let config = sync_config().with_namespace_by_user(true);
    let alice = StaticSession::signed_in(UserIdentity::new("alice", "Alice", "a@example.org"));
    let bob = StaticSession::signed_in(UserIdentity::new("bob", "Bob", "b@example.org"));

    let mut wizard = Wizard::start_with_session(kv.clone(), config.clone(), &alice);
    wizard.update(|d| d.proposal.title = "Alice's project".into());
    assert!(kv.contains("alice:draft_submission"));

    let other = Wizard::start_with_session(kv.clone(), config, &bob);
    assert_eq!(other.draft(), &SubmissionDraft::seeded());
    assert!(kv.get("draft_submission").unwrap().is_none());
}
