//! Integration tests for the resume extractor

use resume_extractor::config::Config;
use resume_extractor::input::InputManager;
use resume_extractor::processing::ResumeRecordBuilder;
use resume_extractor::ranking::rank_resumes;
use resume_extractor::ResumeExtractorError;
use std::path::{Path, PathBuf};

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Docker / Node / PostgreSQL"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Python"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let err = manager.extract_text(path).await.unwrap_err();
    assert!(matches!(err, ResumeExtractorError::UnsupportedFormat(_)));
    assert!(err.is_unreadable_document());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let err = manager.extract_text(path).await.unwrap_err();
    assert!(matches!(err, ResumeExtractorError::DocumentUnreadable(_)));
    assert!(err.is_unreadable_document());
}

#[test]
fn test_blank_configured_header_is_a_configuration_error() {
    let config = Config::from_toml(
        r#"
        [extraction.headers]
        skills = ["skills", " "]
        "#,
    )
    .unwrap();

    let err = config.extraction.record_builder().err().unwrap();
    assert!(matches!(err, ResumeExtractorError::Configuration(_)));
    assert!(!err.is_unreadable_document());
}

#[tokio::test]
async fn test_parse_markdown_loose_list() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("loose.md");
    std::fs::write(&path, "# Jane\n\n## Skills\n\n- Python\n\n- React\n\n- AWS\n\n## Hobbies\n\nChess\n").unwrap();

    let builder = ResumeRecordBuilder::new().unwrap();
    let record = InputManager::new().parse_resume(&path, &builder).await.unwrap();

    assert_eq!(record.skills(), ["Python", "React", "AWS"]);
    assert_eq!(record.hobbies(), ["Chess"]);
}

#[tokio::test]
async fn test_parse_text_resume() {
    let mut manager = InputManager::new();
    let builder = ResumeRecordBuilder::new().unwrap();

    let record = manager
        .parse_resume(Path::new("tests/fixtures/sample_resume.txt"), &builder)
        .await
        .unwrap();

    assert_eq!(record.skills(), ["Python", "JavaScript", "React", "AWS"]);
    assert_eq!(record.technologies(), ["Docker", "Node.js", "PostgreSQL"]);
    assert_eq!(
        record.experience(),
        ["Senior Software Engineer At Acme", "Software Engineer At Initech"]
    );
    assert_eq!(record.hobbies(), ["Chess", "Hiking"]);
    assert!(record.raw_text().starts_with("John Doe"));
}

#[tokio::test]
async fn test_parse_markdown_resume() {
    let mut manager = InputManager::new();
    let builder = ResumeRecordBuilder::new().unwrap();

    let record = manager
        .parse_resume(Path::new("tests/fixtures/sample_resume.md"), &builder)
        .await
        .unwrap();

    assert_eq!(record.skills(), ["Python", "React", "AWS"]);
    assert_eq!(record.hobbies(), ["Chess", "Hiking"]);
    assert!(record.technologies().is_empty());
    assert!(record.experience().is_empty());
}

#[tokio::test]
async fn test_parse_with_configured_headers() {
    let config = Config::from_toml(
        r#"
        [extraction.headers]
        hobbies = ["summary"]
        "#,
    )
    .unwrap();
    let builder = config.extraction.record_builder().unwrap();
    let mut manager = InputManager::new();

    let record = manager
        .parse_resume(Path::new("tests/fixtures/sample_resume.txt"), &builder)
        .await
        .unwrap();

    assert_eq!(
        record.hobbies(),
        ["Backend Engineer Who Enjoys Building Reliable Services."]
    );
    // Other categories keep their defaults
    assert_eq!(record.skills().len(), 4);
}

#[tokio::test]
async fn test_rank_resumes_with_limit_and_unreadable_file() {
    let builder = ResumeRecordBuilder::new().unwrap();
    let mut manager = InputManager::new();
    let paths: Vec<PathBuf> = [
        "tests/fixtures/unsupported.xyz",
        "tests/fixtures/sample_resume.md",
        "tests/fixtures/sample_resume.txt",
        "tests/fixtures/nonexistent.txt",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();

    let mut seen = Vec::new();
    let ranking = rank_resumes(
        &paths,
        "python, js, kubernetes",
        &builder,
        &mut manager,
        3,
        |path| seen.push(path.to_path_buf()),
    )
    .await
    .unwrap();

    assert_eq!(seen.len(), 3);
    assert_eq!(ranking.required, vec!["Python", "JavaScript", "Kubernetes"]);
    assert_eq!(ranking.skipped, vec!["tests/fixtures/nonexistent.txt"]);

    let order: Vec<&str> = ranking.results.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "tests/fixtures/sample_resume.txt",
            "tests/fixtures/sample_resume.md",
            "tests/fixtures/unsupported.xyz",
        ]
    );

    assert_eq!(ranking.results[0].score, 2);
    assert_eq!(ranking.results[0].match_percent, 66);
    assert_eq!(ranking.results[1].matched, vec!["Python"]);
    assert!(ranking.results[2].error.is_some());
    assert_eq!(ranking.results[2].score, 0);
}
