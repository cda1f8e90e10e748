// ABOUTME: End-to-end tests for DocumentProcessor against real files in a temp directory.
// ABOUTME: Covers table separation, artifact naming, image-paragraph wrapping and re-cleaning stability.

use std::fs;
use std::path::{Path, PathBuf};

use docscrub::{CleanerOptions, Document, DocumentProcessor, ProcessOptions};
use tempfile::TempDir;

const LESSON: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head><title>Frações</title></head>
<body>
<div class="page">
  <h1 id="titulo">Frações equivalentes</h1>
  <p class="intro">Duas frações são equivalentes quando representam a mesma parte do inteiro.</p>
  <p>Observe a pizza <img src="pizza.png"></p>
  <table><tr><td> </td></tr></table>
  <table class="dados"><tr><td>1/2</td><td>2/4</td></tr></table>
  <p>Resposta: 2/4</p>
</div>
</body>
</html>"#;

fn write_lesson(dir: &TempDir, name: &str, html: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, html).unwrap();
    path
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn separate_tables_moves_only_non_empty_tables() {
    let tmp = TempDir::new().unwrap();
    let input = write_lesson(&tmp, "aula.html", LESSON);
    let out = tmp.path().join("files");

    let mut processor = DocumentProcessor::builder()
        .output_dir(&out)
        .open(&input)
        .unwrap();
    let report = processor
        .process(ProcessOptions {
            separate_tables: true,
            ..ProcessOptions::default()
        })
        .unwrap();

    assert!(report.content.is_none());
    let tables_path = report.tables.expect("tables artifact");
    assert_eq!(tables_path.path, out.join("tables-1.html"));
    assert_eq!(report.file.path, out.join("file-1.html"));

    let tables = fs::read_to_string(&tables_path.path).unwrap();
    assert!(tables.contains("2/4"));
    assert_eq!(tables.matches("<table>").count(), 1);
    assert!(!tables.contains("class="));

    let main = fs::read_to_string(&report.file.path).unwrap();
    assert!(!main.contains("<table"));
    assert!(!main.contains("Resposta"));
    assert!(!main.contains("lang="));
    assert!(!main.contains("id="));
    assert!(main.contains("Frações equivalentes"));
}

#[test]
fn remove_tables_without_separating() {
    let tmp = TempDir::new().unwrap();
    let input = write_lesson(&tmp, "aula.html", LESSON);
    let out = tmp.path().join("files");

    let mut processor = DocumentProcessor::builder()
        .output_dir(&out)
        .open(&input)
        .unwrap();
    let report = processor
        .process(ProcessOptions {
            remove_tables: true,
            ..ProcessOptions::default()
        })
        .unwrap();

    assert!(report.tables.is_none());
    assert_eq!(file_names(&out), vec!["file-1.html".to_string()]);
    assert!(!fs::read_to_string(&report.file.path)
        .unwrap()
        .contains("<table"));
}

#[test]
fn artifacts_never_overwrite_earlier_runs() {
    let tmp = TempDir::new().unwrap();
    let input = write_lesson(&tmp, "aula.html", LESSON);
    let out = tmp.path().join("files");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("file-1.html"), "old one").unwrap();
    fs::write(out.join("file-2.html"), "old two").unwrap();

    let mut processor = DocumentProcessor::builder()
        .output_dir(&out)
        .open(&input)
        .unwrap();
    let report = processor
        .process(ProcessOptions {
            separate_content: true,
            ..ProcessOptions::default()
        })
        .unwrap();

    assert_eq!(report.file.path, out.join("file-3.html"));
    assert_eq!(report.content.unwrap().path, out.join("content-1.html"));
    assert_eq!(fs::read_to_string(out.join("file-1.html")).unwrap(), "old one");
    assert_eq!(fs::read_to_string(out.join("file-2.html")).unwrap(), "old two");
}

#[test]
fn content_is_extracted_from_original_markup() {
    let tmp = TempDir::new().unwrap();
    let input = write_lesson(&tmp, "aula.html", LESSON);
    let out = tmp.path().join("files");

    let processor = DocumentProcessor::builder()
        .output_dir(&out)
        .open(&input)
        .unwrap();
    let artifact = processor.save_only_content().unwrap();

    assert_eq!(artifact.path, out.join("content-1.html"));
    let content = fs::read_to_string(&artifact.path).unwrap();
    assert!(content.contains("Duas frações são equivalentes"));
    assert_eq!(file_names(&out), vec!["content-1.html".to_string()]);
}

#[test]
fn wrap_runs_before_image_removal() {
    let tmp = TempDir::new().unwrap();
    let html = "<html><body><p>Observe a pizza <img src=\"pizza.png\"></p><p>Fim da aula.</p></body></html>";
    let input = write_lesson(&tmp, "aula.html", html);

    let mut wrapped = DocumentProcessor::builder()
        .output_dir(tmp.path().join("a"))
        .open(&input)
        .unwrap();
    let report = wrapped.process(ProcessOptions::default()).unwrap();
    let main = fs::read_to_string(&report.file.path).unwrap();
    assert!(main.contains("<div class=\"exercise\"><p>Observe a pizza </p></div>"));
    assert!(!main.contains("<img"));

    let mut plain = DocumentProcessor::builder()
        .output_dir(tmp.path().join("b"))
        .open(&input)
        .unwrap();
    let report = plain
        .process(ProcessOptions {
            wrap_images: false,
            ..ProcessOptions::default()
        })
        .unwrap();
    let main = fs::read_to_string(&report.file.path).unwrap();
    assert!(!main.contains("exercise"));
    assert!(main.contains("<p>Observe a pizza </p>"));
}

#[test]
fn cleaned_output_is_stable_when_cleaned_again() {
    let tmp = TempDir::new().unwrap();
    let input = write_lesson(&tmp, "aula.html", LESSON);
    let out = tmp.path().join("files");

    let mut processor = DocumentProcessor::builder()
        .output_dir(&out)
        .open(&input)
        .unwrap();
    let first = processor.process(ProcessOptions::default()).unwrap();
    let first_html = fs::read_to_string(&first.file.path).unwrap();

    let mut again = DocumentProcessor::builder()
        .output_dir(&out)
        .open(&first.file.path)
        .unwrap();
    let second = again.process(ProcessOptions::default()).unwrap();

    assert_eq!(second.file.path, out.join("file-2.html"));
    assert_eq!(fs::read_to_string(&second.file.path).unwrap(), first_html);
}

#[test]
fn disabled_rules_are_skipped() {
    let tmp = TempDir::new().unwrap();
    let input = write_lesson(&tmp, "aula.html", LESSON);
    let opts = CleanerOptions {
        remove_answers: false,
        remove_ids: false,
        ..CleanerOptions::default()
    };

    let mut processor = DocumentProcessor::builder()
        .output_dir(tmp.path().join("files"))
        .cleaner_options(opts)
        .open(&input)
        .unwrap();
    let report = processor.process(ProcessOptions::default()).unwrap();

    let doc = Document::parse(&fs::read_to_string(&report.file.path).unwrap()).unwrap();
    assert!(doc.text().contains("Resposta: 2/4"));
    assert_eq!(doc.find_by_attr("id").len(), 1);
}

#[test]
fn invalid_input_creates_no_output() {
    let tmp = TempDir::new().unwrap();
    let input = write_lesson(&tmp, "aula.txt", LESSON);
    let out = tmp.path().join("files");

    let err = DocumentProcessor::builder()
        .output_dir(&out)
        .open(&input)
        .unwrap_err();

    assert!(err.is_invalid_format());
    assert!(!out.exists());
}

#[test]
fn noscript_markup_survives_repeated_cleaning() {
    let tmp = TempDir::new().unwrap();
    let html = r#"<!DOCTYPE html>
<html>
<head><noscript><link rel="stylesheet" href="a.css"></noscript></head>
<body>
<p>Duas frações são equivalentes quando representam a mesma parte.</p>
<noscript><p>Ative o JavaScript</p></noscript>
</body>
</html>"#;
    let input = write_lesson(&tmp, "aula.html", html);
    let out = tmp.path().join("files");

    let mut processor = DocumentProcessor::builder()
        .output_dir(&out)
        .open(&input)
        .unwrap();
    let first = processor.process(ProcessOptions::default()).unwrap();
    let once = fs::read_to_string(&first.file.path).unwrap();
    assert!(once.contains(r#"<noscript><link rel="stylesheet" href="a.css"></noscript>"#));
    assert!(once.contains("<noscript><p>Ative o JavaScript</p></noscript>"));

    let mut again = DocumentProcessor::builder()
        .output_dir(&out)
        .open(&first.file.path)
        .unwrap();
    let second = again.process(ProcessOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(&second.file.path).unwrap(), once);
}

#[test]
fn transitional_doctype_is_preserved() {
    let tmp = TempDir::new().unwrap();
    let doctype = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#;
    let html = format!("{doctype}<html><body><p>Metade de dois é um.</p></body></html>");
    let input = write_lesson(&tmp, "aula.html", &html);

    let mut processor = DocumentProcessor::builder()
        .output_dir(tmp.path().join("files"))
        .open(&input)
        .unwrap();
    let report = processor.process(ProcessOptions::default()).unwrap();

    assert!(fs::read_to_string(&report.file.path)
        .unwrap()
        .starts_with(doctype));
}

#[test]
fn deeply_nested_input_is_rejected_without_output() {
    let tmp = TempDir::new().unwrap();
    let html = format!(
        "<html><body><p>{}Texto{}</p></body></html>",
        "<span>".repeat(20_000),
        "</span>".repeat(20_000)
    );
    let input = write_lesson(&tmp, "fundo.html", &html);
    let out = tmp.path().join("files");

    let err = DocumentProcessor::builder()
        .output_dir(&out)
        .open(&input)
        .unwrap_err();

    assert!(err.is_parse_failed());
    assert!(!out.exists());
}
