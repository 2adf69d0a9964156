//! End-to-end library scenarios against on-disk fixtures.

use std::fs;

use log::Level;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use calldoc::core::{CallPatterns, Documentor};
use calldoc::export::{JsonExport, UsageExport};

fn patterns() -> CallPatterns {
    let mut patterns = CallPatterns::new();
    patterns.register("prop", ["notify"]);
    patterns.register("logger", ["info", "warn"]);
    patterns.register("Registry", ["get"]);
    patterns
}

#[test]
fn property_call_records_classified_arguments() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("notify.php"),
        "<?php\n\
         class Job {\n\
             public function run($obj) {\n\
                 $obj->prop->notify('hello', SOME_CONST);\n\
             }\n\
         }\n",
    )
    .unwrap();

    let mut documentor = Documentor::new(dir.path(), patterns());
    let result = documentor.retrieve().unwrap();

    assert_eq!(
        result.usages.get("prop->notify").unwrap(),
        &[vec!["hello".to_string(), "SOME_CONST".to_string()]]
    );
}

#[test]
fn mixed_corpus_aggregates_by_signature() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("a.php"),
        "<?php\n\
         $this->logger->info('db ' . DB_NAME);\n\
         Registry::get('mailer');\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("b.php"),
        "<?php $this->logger->info($attempt, ['retry', 3]);\n",
    )
    .unwrap();

    let mut documentor = Documentor::new(dir.path(), patterns());
    let result = documentor.retrieve().unwrap();

    assert_eq!(result.files_scanned, 2);
    assert_eq!(result.usages.len(), 2);
    assert_eq!(
        result.usages.get("logger->info").unwrap(),
        &[
            vec!["db DB_NAME".to_string()],
            vec!["$attempt".to_string(), "['retry', '3']".to_string()],
        ]
    );
    assert_eq!(
        result.usages.get("Registry::get").unwrap(),
        &[vec!["mailer".to_string()]]
    );
}

#[test]
fn broken_file_is_reported_and_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.php"), "<?php class {{{").unwrap();
    fs::write(
        dir.path().join("fine.php"),
        "<?php $this->logger->warn('kept');",
    )
    .unwrap();

    let mut documentor = Documentor::new(dir.path(), patterns());
    let result = documentor.retrieve().unwrap();

    assert_eq!(result.parse_errors.len(), 1);
    assert!(result.parse_errors[0].file_path.ends_with("broken.php"));
    assert_eq!(
        result.usages.get("logger->warn").unwrap(),
        &[vec!["kept".to_string()]]
    );
    // No partial results from the broken file.
    assert_eq!(result.usages.len(), 1);
}

#[test]
fn excluded_directories_use_substring_semantics() {
    let dir = tempdir().unwrap();
    let vendor = dir.path().join("vendor").join("pkg");
    fs::create_dir_all(&vendor).unwrap();
    fs::write(
        vendor.join("dep.php"),
        "<?php $this->logger->info('from vendor');",
    )
    .unwrap();
    fs::write(
        dir.path().join("app.php"),
        "<?php $this->logger->info('from app');",
    )
    .unwrap();

    let mut documentor =
        Documentor::new(dir.path(), patterns()).excluded_directories(vec!["vendor".to_string()]);
    let result = documentor.retrieve().unwrap();

    assert_eq!(result.files_scanned, 1);
    assert_eq!(
        result.usages.get("logger->info").unwrap(),
        &[vec!["from app".to_string()]]
    );
}

#[test]
fn unknown_formatter_name_warns_and_valid_one_applies() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("app.php"),
        "<?php $this->logger->info('SHOUTING');",
    )
    .unwrap();

    let mut documentor = Documentor::new(dir.path(), patterns())
        .formatter_names(&["lowercase".to_string(), "does-not-exist".to_string()]);
    let result = documentor.retrieve().unwrap();

    assert_eq!(
        result.usages.get("logger->info").unwrap(),
        &[vec!["shouting".to_string()]]
    );

    let messages = documentor.log_messages(false);
    assert_eq!(messages[&Level::Warn].len(), 1);
    assert!(messages[&Level::Warn][0].contains("does-not-exist"));
}

#[test]
fn sorted_report_exports_signatures_in_order() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("app.php"),
        "<?php\n\
         Registry::get('z');\n\
         $this->logger->info('i');\n",
    )
    .unwrap();

    let mut documentor = Documentor::new(dir.path(), patterns()).sorting(true);
    let result = documentor.retrieve().unwrap();

    let json = JsonExport.export(&result.usages).unwrap();
    let registry_pos = json.find("Registry::get").unwrap();
    let logger_pos = json.find("logger->info").unwrap();
    // Lexicographic: uppercase 'R' sorts before lowercase 'l'.
    assert!(registry_pos < logger_pos);
}

#[test]
fn guard_and_cast_arguments_stay_transparent() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("app.php"),
        "<?php $this->logger->info(isset($mode), (int) $count);",
    )
    .unwrap();

    let mut documentor = Documentor::new(dir.path(), patterns());
    let result = documentor.retrieve().unwrap();

    assert_eq!(
        result.usages.get("logger->info").unwrap(),
        &[vec!["$mode".to_string(), "$count".to_string()]]
    );
}
