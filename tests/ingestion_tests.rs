
use std::sync::Arc;

use test_utils::*;
use uuid::Uuid;

use findnaukari_backend::entities::resume::ResumeStatus;
use findnaukari_backend::errors::AppError;
use findnaukari_backend::use_cases::ingestion::{IngestionService, ProfileSync, UploadedFile};
use findnaukari_backend::use_cases::profile::ProfileService;

fn service(
    parser: MockParser,
    resumes: MockResumeRepo,
    profiles: MockProfileRepo,
) -> IngestionService {
    IngestionService::new(
        Arc::new(parser),
        Arc::new(resumes),
        ProfileService::new(Arc::new(profiles)),
    )
}

fn pdf_upload() -> UploadedFile {
    UploadedFile {
        file_name: "resume.pdf".into(),
        content_type: Some("application/pdf".into()),
        bytes: pdf_bytes(),
    }
}

#[actix_rt::test]
async fn non_pdf_upload_never_reaches_the_parser() {
    let mut parser = MockParser::new();
    parser.expect_parse().times(0);
    let mut resumes = MockResumeRepo::new();
    resumes.expect_insert().times(0);

    let svc = service(parser, resumes, MockProfileRepo::new());
    let upload = UploadedFile {
        content_type: Some("image/png".into()),
        ..pdf_upload()
    };

    match svc.ingest(Uuid::new_v4(), upload).await {
        Err(AppError::Validation(fields)) => assert_eq!(fields[0].field, "file"),
        other => panic!("expected validation error, got {:?}", other.map(|_| ())),
    }
}

#[actix_rt::test]
async fn oversize_upload_never_reaches_the_parser() {
    let mut parser = MockParser::new();
    parser.expect_parse().times(0);
    let mut resumes = MockResumeRepo::new();
    resumes.expect_insert().times(0);

    let svc = service(parser, resumes, MockProfileRepo::new());
    let mut bytes = pdf_bytes();
    bytes.resize(5 * 1024 * 1024 + 1, 0);
    let upload = UploadedFile {
        bytes,
        ..pdf_upload()
    };

    assert!(svc.ingest(Uuid::new_v4(), upload).await.is_err());
}

#[actix_rt::test]
async fn parser_failure_stores_no_record() {
    let mut parser = MockParser::new();
    parser.expect_parse().times(1).returning(|_, _| {
        Err(AppError::Upstream {
            status: Some(500),
            message: "Resume parsing service is unavailable".into(),
        })
    });
    let mut resumes = MockResumeRepo::new();
    resumes.expect_insert().times(0);
    let mut profiles = MockProfileRepo::new();
    profiles.expect_upsert().times(0);

    let svc = service(parser, resumes, profiles);

    match svc.ingest(Uuid::new_v4(), pdf_upload()).await {
        Err(AppError::Upstream { status, .. }) => assert_eq!(status, Some(500)),
        other => panic!("expected upstream error, got {:?}", other.map(|_| ())),
    }
}

#[actix_rt::test]
async fn successful_ingest_stores_parsed_record_and_syncs_profile() {
    let account_id = Uuid::new_v4();

    let mut parser = MockParser::new();
    parser
        .expect_parse()
        .times(1)
        .returning(|_, _| Ok(sample_parsed()));

    let mut resumes = MockResumeRepo::new();
    resumes
        .expect_insert()
        .withf(move |new| {
            new.account_id == account_id
                && new.original_name == "resume.pdf"
                && new.status == ResumeStatus::Parsed
                && new.word_count == 8
                && !new.raw_text.is_empty()
        })
        .times(1)
        .returning(move |_| Ok(stored_record(account_id, 1)));

    let mut profiles = MockProfileRepo::new();
    profiles
        .expect_find()
        .times(1)
        .returning(|_| Ok(None));
    profiles
        .expect_upsert()
        .withf(move |profile| {
            profile.account_id == account_id
                && profile.full_name.as_deref() == Some("Asha Verma")
                && profile.last_resume_id.is_some()
                && profile.last_synced_at.is_some()
        })
        .times(1)
        .returning(|_| Ok(()));

    let svc = service(parser, resumes, profiles);
    let outcome = svc.ingest(account_id, pdf_upload()).await.unwrap();

    assert_eq!(outcome.resume.version, 1);
    assert!(outcome.resume.is_latest);
    match outcome.profile_sync {
        // name, email, phone, skills, experience, education, links
        ProfileSync::Synced { completeness } => assert_eq!(completeness, 90),
        ProfileSync::Degraded { reason } => panic!("unexpected degraded sync: {}", reason),
    }
}

#[actix_rt::test]
async fn profile_failure_degrades_but_keeps_the_upload() {
    let account_id = Uuid::new_v4();

    let mut parser = MockParser::new();
    parser
        .expect_parse()
        .times(1)
        .returning(|_, _| Ok(sample_parsed()));

    let mut resumes = MockResumeRepo::new();
    resumes
        .expect_insert()
        .times(1)
        .returning(move |_| Ok(stored_record(account_id, 2)));

    let mut profiles = MockProfileRepo::new();
    profiles.expect_find().times(1).returning(|_| Ok(None));
    profiles
        .expect_upsert()
        .times(1)
        .returning(|_| Err(AppError::Internal("connection reset".into())));

    let svc = service(parser, resumes, profiles);
    let outcome = svc.ingest(account_id, pdf_upload()).await.unwrap();

    assert_eq!(outcome.resume.version, 2);
    assert!(matches!(outcome.profile_sync, ProfileSync::Degraded { .. }));
}

#[actix_rt::test]
async fn parser_text_fallbacks_fill_counts() {
    // Parser omits the counters; the service derives them from the text.
    let account_id = Uuid::new_v4();

    let mut parser = MockParser::new();
    parser.expect_parse().times(1).returning(|_, _| {
        let mut parsed = sample_parsed();
        parsed.full_text = None;
        parsed.raw_text = Some("one two three".into());
        parsed.text_length = None;
        parsed.word_count = None;
        Ok(parsed)
    });

    let mut resumes = MockResumeRepo::new();
    resumes
        .expect_insert()
        .withf(|new| new.raw_text == "one two three" && new.text_length == 13 && new.word_count == 3)
        .times(1)
        .returning(move |_| Ok(stored_record(account_id, 1)));

    let mut profiles = MockProfileRepo::new();
    profiles.expect_find().returning(|_| Ok(None));
    profiles.expect_upsert().returning(|_| Ok(()));

    let svc = service(parser, resumes, profiles);
    assert!(svc.ingest(account_id, pdf_upload()).await.is_ok());
}
