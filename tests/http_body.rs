use nes_submit::config::{Config, Credentials, FormFields};
use nes_submit::{SubmitError, Submitter};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn part_names(body: &str) -> Vec<String> {
    body.split("Content-Disposition: form-data; name=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_multipart_parts_sent() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nes.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("HW5-Exp-1.1b.teIn");
    let run = "51 Q0 clueweb09-en0000-00-00000 1 12.5 run-1\n";
    std::fs::write(&file_path, run).expect("write run file");

    let config = Config {
        url: format!("{}/nes.cgi", server.uri()),
        form: FormFields {
            qrel: "cw09a.diversity.1-200.qrel.indexed".to_string(),
            hwid: "HW5".to_string(),
        },
        file_path,
        credentials: Some(Credentials {
            username: "user".to_string(),
            password: "pass".to_string(),
        }),
        ..Config::default()
    };

    let submitter = Submitter::new(config).expect("submitter should build");
    submitter.submit().await.expect("request should succeed");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let content_type = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .expect("content type");
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&request.body);
    assert_eq!(part_names(&body), vec!["qrel", "hwid", "infile"]);
    assert!(body.contains("name=\"qrel\"\r\n\r\ncw09a.diversity.1-200.qrel.indexed\r\n"));
    assert!(body.contains("name=\"hwid\"\r\n\r\nHW5\r\n"));
    assert!(body.contains("name=\"infile\"; filename=\"HW5-Exp-1.1b.teIn\""));
    assert!(body.contains(run));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_missing_file_fails_before_network() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().expect("tempdir");
    let config = Config {
        url: format!("{}/nes.cgi", server.uri()),
        file_path: dir.path().join("missing.teIn"),
        ..Config::default()
    };

    let submitter = Submitter::new(config).expect("submitter should build");
    let err = submitter.submit().await.expect_err("missing file");
    assert!(matches!(err, SubmitError::FileAccess { .. }));

    let requests = server.received_requests().await.expect("requests");
    assert!(requests.is_empty());
}
