
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

use findnaukari_backend::auth::password::hash_password;
use findnaukari_backend::entities::account::AccountRole;
use findnaukari_backend::entities::profile::UserProfile;
use findnaukari_backend::errors::AppError;

fn empty_state() -> actix_web::web::Data<findnaukari_backend::AppState> {
    state_with(
        MockAccountRepo::new(),
        MockResumeRepo::new(),
        MockProfileRepo::new(),
        MockParser::new(),
    )
}

#[actix_rt::test]
async fn signup_returns_201_with_session_cookie() {
    let mut accounts = MockAccountRepo::new();
    accounts
        .expect_create()
        .withf(|account| account.email == "asha@example.com" && account.password_hash != "secret123")
        .times(1)
        .returning(|account| Ok(account.clone()));

    let state = state_with(
        accounts,
        MockResumeRepo::new(),
        MockProfileRepo::new(),
        MockParser::new(),
    );
    let app = test_app!(state);

    let req = TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({
            "name": "Asha Verma",
            "email": "Asha@Example.com",
            "password": "secret123",
            "role": "student",
            "headline": "Backend developer",
            "top_skills": "rust, postgres"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);

    let set_cookie = res
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("session cookie missing")
        .to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/"));

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "student");
    assert_eq!(body["user"]["headline"], "Backend developer");
    assert_eq!(body["user"]["top_skills"], json!(["rust", "postgres"]));
    assert!(body["user"].get("password_hash").is_none());
}

#[actix_rt::test]
async fn recruiter_signup_reports_every_missing_field() {
    let mut accounts = MockAccountRepo::new();
    accounts.expect_create().times(0);

    let state = state_with(
        accounts,
        MockResumeRepo::new(),
        MockProfileRepo::new(),
        MockParser::new(),
    );
    let app = test_app!(state);

    let req = TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({
            "name": "Rhea Kapoor",
            "email": "rhea@example.com",
            "password": "secret123",
            "role": "recruiter"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], false);
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["company", "position"]);
}

#[actix_rt::test]
async fn duplicate_email_is_a_validation_error() {
    let mut accounts = MockAccountRepo::new();
    accounts
        .expect_create()
        .times(1)
        .returning(|_| Err(AppError::validation("email", "Email already registered")));

    let state = state_with(
        accounts,
        MockResumeRepo::new(),
        MockProfileRepo::new(),
        MockParser::new(),
    );
    let app = test_app!(state);

    let req = TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({
            "name": "Asha Verma",
            "email": "asha@example.com",
            "password": "secret123",
            "role": "student",
            "headline": "Backend developer"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"][0]["field"], "email");
}

#[actix_rt::test]
async fn login_failures_are_indistinguishable() {
    let account_id = Uuid::new_v4();
    let hash = hash_password("correct-password").unwrap();

    let mut accounts = MockAccountRepo::new();
    accounts.expect_find_by_email().returning(move |email| {
        if email == "known@example.com" {
            let mut account = student_account(account_id, "known@example.com");
            account.password_hash = hash.clone();
            Ok(Some(account))
        } else {
            Ok(None)
        }
    });

    let state = state_with(
        accounts,
        MockResumeRepo::new(),
        MockProfileRepo::new(),
        MockParser::new(),
    );
    let app = test_app!(state);

    let wrong_password = TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "known@example.com", "password": "wrong"}))
        .to_request();
    let unknown_email = TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "nobody@example.com", "password": "whatever"}))
        .to_request();

    let res_a = test::call_service(&app, wrong_password).await;
    assert_eq!(res_a.status(), StatusCode::UNAUTHORIZED);
    let body_a = test::read_body(res_a).await;

    let res_b = test::call_service(&app, unknown_email).await;
    assert_eq!(res_b.status(), StatusCode::UNAUTHORIZED);
    let body_b = test::read_body(res_b).await;

    assert_eq!(body_a, body_b);
}

#[actix_rt::test]
async fn login_with_correct_password_sets_cookie() {
    let account_id = Uuid::new_v4();
    let hash = hash_password("correct-password").unwrap();

    let mut accounts = MockAccountRepo::new();
    accounts.expect_find_by_email().returning(move |_| {
        let mut account = student_account(account_id, "known@example.com");
        account.password_hash = hash.clone();
        Ok(Some(account))
    });

    let state = state_with(
        accounts,
        MockResumeRepo::new(),
        MockProfileRepo::new(),
        MockParser::new(),
    );
    let app = test_app!(state);

    let req = TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "known@example.com", "password": "correct-password"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("set-cookie"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[actix_rt::test]
async fn protected_routes_reject_missing_token() {
    let app = test_app!(empty_state());

    for (method, uri) in [
        ("GET", "/profile"),
        ("PATCH", "/profile"),
        ("GET", "/resume/list"),
        ("POST", "/resume/upload"),
    ] {
        let req = match method {
            "GET" => TestRequest::get(),
            "PATCH" => TestRequest::patch(),
            _ => TestRequest::post(),
        }
        .uri(uri)
        .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Authentication required");
    }
}

#[actix_rt::test]
async fn expired_token_is_rejected() {
    let app = test_app!(empty_state());

    let req = TestRequest::get()
        .uri("/profile")
        .cookie(Cookie::new("token", expired_token(Uuid::new_v4())))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn bearer_header_works_without_cookie() {
    let account_id = Uuid::new_v4();
    let mut profiles = MockProfileRepo::new();
    profiles.expect_find().returning(|_| Ok(None));

    let state = state_with(
        MockAccountRepo::new(),
        MockResumeRepo::new(),
        profiles,
        MockParser::new(),
    );
    let app = test_app!(state);

    let token = auth_token(account_id, AccountRole::Student);
    let req = TestRequest::get()
        .uri("/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn profile_before_first_upload_reports_absent() {
    let account_id = Uuid::new_v4();
    let mut profiles = MockProfileRepo::new();
    profiles.expect_find().times(1).returning(|_| Ok(None));

    let state = state_with(
        MockAccountRepo::new(),
        MockResumeRepo::new(),
        profiles,
        MockParser::new(),
    );
    let app = test_app!(state);

    let req = TestRequest::get()
        .uri("/profile")
        .cookie(Cookie::new("token", auth_token(account_id, AccountRole::Student)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["exists"], false);
}

#[actix_rt::test]
async fn profile_patch_returns_new_completeness() {
    let account_id = Uuid::new_v4();
    let mut profiles = MockProfileRepo::new();
    profiles
        .expect_find()
        .times(1)
        .returning(move |id| Ok(Some(UserProfile::empty(id))));
    profiles
        .expect_upsert()
        .withf(|profile| {
            profile.full_name.as_deref() == Some("Asha Verma") && profile.completeness == 20
        })
        .times(1)
        .returning(|_| Ok(()));

    let state = state_with(
        MockAccountRepo::new(),
        MockResumeRepo::new(),
        profiles,
        MockParser::new(),
    );
    let app = test_app!(state);

    let req = TestRequest::patch()
        .uri("/profile")
        .cookie(Cookie::new("token", auth_token(account_id, AccountRole::Student)))
        .set_json(json!({"full_name": "Asha Verma", "summary": "Backend engineer"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["completeness"], 20);
}

#[actix_rt::test]
async fn resume_list_includes_count() {
    let account_id = Uuid::new_v4();
    let mut resumes = MockResumeRepo::new();
    resumes.expect_list().times(1).returning(move |_| {
        let first = stored_record(account_id, 2);
        let second = stored_record(account_id, 1);
        Ok(vec![first, second]
            .into_iter()
            .map(|r| findnaukari_backend::entities::resume::ResumeSummaryRow {
                id: r.id,
                original_name: r.original_name,
                uploaded_at: r.uploaded_at,
                status: r.status,
                version: r.version,
                is_latest: r.version == 2,
                extracted: r.extracted,
            })
            .collect())
    });

    let state = state_with(
        MockAccountRepo::new(),
        resumes,
        MockProfileRepo::new(),
        MockParser::new(),
    );
    let app = test_app!(state);

    let req = TestRequest::get()
        .uri("/resume/list")
        .cookie(Cookie::new("token", auth_token(account_id, AccountRole::Student)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["version"], 2);
    assert_eq!(body["data"][0]["skill_count"], 3);
    assert!(body["data"][0].get("raw_text").is_none());
}

#[actix_rt::test]
async fn foreign_resume_id_looks_like_missing() {
    let account_id = Uuid::new_v4();
    let mut resumes = MockResumeRepo::new();
    resumes.expect_get().times(1).returning(|_, _| Ok(None));
    resumes.expect_delete().times(1).returning(|_, _| Ok(0));

    let state = state_with(
        MockAccountRepo::new(),
        resumes,
        MockProfileRepo::new(),
        MockParser::new(),
    );
    let app = test_app!(state);
    let token = auth_token(account_id, AccountRole::Student);
    let foreign_id = Uuid::new_v4();

    let get_req = TestRequest::get()
        .uri(&format!("/resume/{foreign_id}"))
        .cookie(Cookie::new("token", token.clone()))
        .to_request();
    let get_res = test::call_service(&app, get_req).await;
    assert_eq!(get_res.status(), StatusCode::NOT_FOUND);
    let get_body: Value = test::read_body_json(get_res).await;

    let del_req = TestRequest::delete()
        .uri(&format!("/resume/{foreign_id}"))
        .cookie(Cookie::new("token", token))
        .to_request();
    let del_res = test::call_service(&app, del_req).await;
    assert_eq!(del_res.status(), StatusCode::NOT_FOUND);
    let del_body: Value = test::read_body_json(del_res).await;

    assert_eq!(get_body["error"], "Resume not found");
    assert_eq!(del_body["error"], "Resume not found");
}

#[actix_rt::test]
async fn resume_detail_previews_text() {
    let account_id = Uuid::new_v4();
    let mut resumes = MockResumeRepo::new();
    resumes.expect_get().times(1).returning(move |id, _| {
        let mut record = stored_record(account_id, 1);
        record.id = id;
        record.raw_text = "y".repeat(1500);
        Ok(Some(record))
    });

    let state = state_with(
        MockAccountRepo::new(),
        resumes,
        MockProfileRepo::new(),
        MockParser::new(),
    );
    let app = test_app!(state);
    let resume_id = Uuid::new_v4();

    let req = TestRequest::get()
        .uri(&format!("/resume/{resume_id}"))
        .cookie(Cookie::new("token", auth_token(account_id, AccountRole::Student)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let preview = body["data"]["text_preview"].as_str().unwrap();
    assert_eq!(preview.len(), 1003);
    assert!(preview.ends_with("..."));
    assert_eq!(body["data"]["personal_info"]["name"], "Asha Verma");
}

#[actix_rt::test]
async fn upload_round_trip_over_http() {
    let account_id = Uuid::new_v4();

    let mut parser = MockParser::new();
    parser
        .expect_parse()
        .withf(|file_name, bytes| file_name == "resume.pdf" && bytes.starts_with(b"%PDF"))
        .times(1)
        .returning(|_, _| Ok(sample_parsed()));

    let mut resumes = MockResumeRepo::new();
    resumes
        .expect_insert()
        .times(1)
        .returning(move |_| Ok(stored_record(account_id, 1)));

    let mut profiles = MockProfileRepo::new();
    profiles.expect_find().returning(|_| Ok(None));
    profiles.expect_upsert().returning(|_| Ok(()));

    let state = state_with(MockAccountRepo::new(), resumes, profiles, parser);
    let app = test_app!(state);

    let boundary = "testboundary123";
    let body = multipart_body(boundary, "resume.pdf", "application/pdf", &pdf_bytes());
    let req = TestRequest::post()
        .uri("/resume/upload")
        .cookie(Cookie::new("token", auth_token(account_id, AccountRole::Student)))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["profile_sync"]["status"], "synced");
    assert_eq!(body["profile_sync"]["completeness"], 90);
    assert_eq!(body["data"]["version"], 1);
}

#[actix_rt::test]
async fn upload_of_renamed_docx_is_rejected() {
    let account_id = Uuid::new_v4();

    let mut parser = MockParser::new();
    parser.expect_parse().times(0);
    let mut resumes = MockResumeRepo::new();
    resumes.expect_insert().times(0);

    let state = state_with(
        MockAccountRepo::new(),
        resumes,
        MockProfileRepo::new(),
        parser,
    );
    let app = test_app!(state);

    let mut zip_bytes = vec![0x50, 0x4b, 0x03, 0x04];
    zip_bytes.extend_from_slice(&[0u8; 64]);
    let boundary = "testboundary123";
    let body = multipart_body(boundary, "resume.pdf", "application/pdf", &zip_bytes);
    let req = TestRequest::post()
        .uri("/resume/upload")
        .cookie(Cookie::new("token", auth_token(account_id, AccountRole::Student)))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn unknown_route_returns_json_404() {
    let app = test_app!(empty_state());

    let req = TestRequest::get()
        .uri("/no-such-route")
        .cookie(Cookie::new(
            "token",
            auth_token(Uuid::new_v4(), AccountRole::Student),
        ))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Route not found");
}

#[actix_rt::test]
async fn health_endpoint_is_public() {
    let app = test_app!(empty_state());

    let req = TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}
