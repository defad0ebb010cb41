//! Liveness checking: verdicts, bounded retry on transport failure, and
//! link reconstruction for url-less records.

mod common;

use std::time::Duration;

use mockito::Server;

use common::{ScriptProbe, probe_ok, transport_err};
use oubot::models::{ActiveStatus, Code, CourseRecord, HttpConfig};
use oubot::services::LivenessChecker;

const SITE: &str = "http://www.open.ac.uk/courses";

fn checker(probe: Box<ScriptProbe>, retries: u32) -> LivenessChecker {
    LivenessChecker::with_probe(probe, SITE, retries, Duration::from_millis(1))
}

fn record(code: &str, url: Option<&str>) -> CourseRecord {
    CourseRecord {
        code: Code::new(code),
        title: "Some module".to_string(),
        url: url.map(String::from),
    }
}

#[tokio::test]
async fn test_no_url_means_no_verdict_and_no_call() {
    let (probe, calls) = ScriptProbe::new(vec![]);
    let verdict = checker(probe, 2).check(None, &Code::new("A123")).await;

    assert_eq!(verdict, None);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_live_url_containing_code_is_active() {
    let (probe, _) = ScriptProbe::new(vec![probe_ok(200, "http://x/modules/a123")]);
    let verdict = checker(probe, 2)
        .check(Some("http://x/modules/a123"), &Code::new("A123"))
        .await;

    assert_eq!(verdict, Some(true));
}

#[tokio::test]
async fn test_redirect_to_generic_page_is_inactive() {
    // stale codes redirect to a landing page that no longer names them
    let (probe, _) = ScriptProbe::new(vec![probe_ok(200, "http://x/courses/do-it")]);
    let verdict = checker(probe, 2)
        .check(Some("http://x/modules/a123"), &Code::new("A123"))
        .await;

    assert_eq!(verdict, Some(false));
}

#[tokio::test]
async fn test_non_200_is_inactive() {
    let (probe, _) = ScriptProbe::new(vec![probe_ok(404, "http://x/modules/a123")]);
    let verdict = checker(probe, 2)
        .check(Some("http://x/modules/a123"), &Code::new("A123"))
        .await;

    assert_eq!(verdict, Some(false));
}

#[tokio::test]
async fn test_two_failures_then_success_within_retries() {
    let (probe, calls) = ScriptProbe::new(vec![
        transport_err(),
        transport_err(),
        probe_ok(200, "http://x/modules/a123"),
    ]);
    let verdict = checker(probe, 2)
        .check(Some("http://x/modules/a123"), &Code::new("A123"))
        .await;

    assert_eq!(verdict, Some(true));
    assert_eq!(calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_exhausted_retries_is_inactive_not_unknown() {
    let (probe, calls) = ScriptProbe::new(vec![transport_err(), transport_err(), transport_err()]);
    let verdict = checker(probe, 2)
        .check(Some("http://x/modules/a123"), &Code::new("A123"))
        .await;

    assert_eq!(verdict, Some(false));
    assert_eq!(calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_zero_retries_fails_on_first_error() {
    let (probe, calls) = ScriptProbe::new(vec![transport_err()]);
    let verdict = checker(probe, 0)
        .check(Some("http://x/modules/a123"), &Code::new("A123"))
        .await;

    assert_eq!(verdict, Some(false));
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_ensure_link_trusts_existing_url() {
    let (probe, calls) = ScriptProbe::new(vec![]);
    let module = checker(probe, 0)
        .ensure_link(record("A123", Some("fake_url1")))
        .await;

    assert_eq!(module.url, Some("fake_url1".to_string()));
    assert_eq!(module.status, ActiveStatus::Unknown);
    assert!(module.linkable());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_ensure_link_probes_both_module_candidates() {
    let (probe, calls) = ScriptProbe::new(vec![transport_err(), transport_err()]);
    let module = checker(probe, 0).ensure_link(record("B321", None)).await;

    assert_eq!(module.url, None);
    assert_eq!(module.status, ActiveStatus::Inactive);
    assert!(!module.linkable());
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            format!("{SITE}/qualifications/details/b321"),
            format!("{SITE}/modules/b321"),
        ]
    );
}

#[tokio::test]
async fn test_ensure_link_revives_qualification() {
    let candidate = format!("{SITE}/qualifications/b31");
    let (probe, calls) = ScriptProbe::new(vec![probe_ok(200, &candidate)]);
    let module = checker(probe, 0).ensure_link(record("B31", None)).await;

    assert_eq!(module.url, Some(candidate.clone()));
    assert_eq!(module.status, ActiveStatus::Active);
    assert_eq!(*calls.lock().unwrap(), vec![candidate]);
}

#[tokio::test]
async fn test_http_probe_follows_redirects() {
    let mut server = Server::new_async().await;
    let moved = server
        .mock("HEAD", "/modules/a123")
        .with_status(301)
        .with_header("location", &format!("{}/courses/do-it", server.url()))
        .create_async()
        .await;
    let landing = server
        .mock("HEAD", "/courses/do-it")
        .with_status(200)
        .create_async()
        .await;

    let checker = LivenessChecker::new(
        SITE,
        &HttpConfig::default(),
        0,
        Duration::from_millis(1),
    )
    .unwrap();
    let url = format!("{}/modules/a123", server.url());
    let verdict = checker.check(Some(&url), &Code::new("A123")).await;

    // followed to the generic landing page, which drops the code
    assert_eq!(verdict, Some(false));
    moved.assert_async().await;
    landing.assert_async().await;
}

#[tokio::test]
async fn test_http_probe_direct_hit() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", "/modules/a123")
        .with_status(200)
        .create_async()
        .await;

    let checker = LivenessChecker::new(
        SITE,
        &HttpConfig::default(),
        0,
        Duration::from_millis(1),
    )
    .unwrap();
    let url = format!("{}/modules/a123", server.url());
    let verdict = checker.check(Some(&url), &Code::new("A123")).await;

    assert_eq!(verdict, Some(true));
}
