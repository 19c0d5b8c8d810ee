use labels2annotations::{
    collect_label_files, convert_label_file, process_dataset, Args, ConvertError, ParseError,
};
use std::fs;
use std::path::Path;

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn args_for(root: &Path, splits: &[&str]) -> Args {
    Args {
        labels_dir: root.join("labels").to_string_lossy().into_owned(),
        annotations_dir: root.join("annotations").to_string_lossy().into_owned(),
        splits: splits.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_convert_label_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let label_path = temp_dir.path().join("sample_3.txt");
    write_file(&label_path, "cat 100 100 20 10\ndog 50 60 7 9\n");

    let converted = convert_label_file(&label_path, temp_dir.path()).unwrap();
    assert_eq!(converted.output_path, temp_dir.path().join("sample_3.xml"));
    assert_eq!(converted.objects, 2);

    let xml = fs::read_to_string(&converted.output_path).unwrap();
    assert!(xml.contains("<filename>sample_3.npy</filename>"));
    assert_eq!(xml.matches("<object>").count(), 2);

    let cat = xml.find("<name>cat</name>").unwrap();
    let dog = xml.find("<name>dog</name>").unwrap();
    assert!(cat < dog);
    assert!(xml.contains("<xmin>47</xmin>"));
    assert!(xml.contains("<ymax>64</ymax>"));
}

#[test]
fn test_convert_empty_label_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let label_path = temp_dir.path().join("empty.txt");
    write_file(&label_path, "");

    let converted = convert_label_file(&label_path, temp_dir.path()).unwrap();
    assert_eq!(converted.objects, 0);

    let xml = fs::read_to_string(&converted.output_path).unwrap();
    assert!(xml.contains("<filename>empty.npy</filename>"));
    assert!(xml.contains("<width>512</width>"));
    assert!(xml.contains("<height>512</height>"));
    assert!(xml.contains("<depth>6</depth>"));
    assert!(!xml.contains("<object>"));
}

#[test]
fn test_malformed_label_file_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let label_path = temp_dir.path().join("broken.txt");
    write_file(&label_path, "cat 1 2 3 4\ncat 100 100\n");

    match convert_label_file(&label_path, temp_dir.path()) {
        Err(ConvertError::Parse { path, line, source }) => {
            assert_eq!(path, label_path);
            assert_eq!(line, 2);
            assert_eq!(source, ParseError::FieldCount { found: 3 });
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(!temp_dir.path().join("broken.xml").exists());
}

#[test]
fn test_convert_overwrites_existing_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let label_path = temp_dir.path().join("frame.txt");
    write_file(&label_path, "cat 10 10 2 2\n");
    write_file(&temp_dir.path().join("frame.xml"), "stale contents that are quite long");

    convert_label_file(&label_path, temp_dir.path()).unwrap();
    let xml = fs::read_to_string(temp_dir.path().join("frame.xml")).unwrap();
    assert!(xml.starts_with("<annotation>"));
    assert!(!xml.contains("stale"));
}

#[test]
fn test_collect_label_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(&root.join("b.txt"), "");
    write_file(&root.join("a"), "");
    write_file(&root.join("nested/deeper/c.label"), "");
    write_file(&root.join(".hidden.txt"), "");

    let mut files = collect_label_files(root).unwrap();
    files.sort();
    let mut expected = vec![
        root.join(".hidden.txt"),
        root.join("a"),
        root.join("b.txt"),
        root.join("nested/deeper/c.label"),
    ];
    expected.sort();
    assert_eq!(files, expected);
}

#[test]
fn test_collect_label_files_missing_split() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("missing");
    assert!(matches!(
        collect_label_files(&missing),
        Err(ConvertError::MissingSplit { path }) if path == missing
    ));
}

#[test]
fn test_process_dataset() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(
        &root.join("labels/train_seg/0001.txt"),
        "cat 100 100 20 10\n\ndog 40 40 8 8\n",
    );
    write_file(&root.join("labels/train_seg/sub/0002.txt"), "bird 5 5 1 1\n");
    write_file(&root.join("labels/val_seg/0003.txt"), "");

    let args = args_for(root, &["train_seg", "val_seg"]);
    let stats = process_dataset(&args).unwrap();

    assert_eq!(stats.files_converted, 3);
    assert_eq!(stats.objects_written, 3);
    assert_eq!(stats.blank_lines_skipped, 1);
    assert_eq!(stats.outputs_overwritten, 0);

    let annotations = root.join("annotations");
    assert!(annotations.join("train_seg/0001.xml").is_file());
    // Nested label files land flat in the split's annotation directory
    assert!(annotations.join("train_seg/0002.xml").is_file());
    assert!(annotations.join("val_seg/0003.xml").is_file());

    let xml = fs::read_to_string(annotations.join("train_seg/0001.xml")).unwrap();
    assert_eq!(xml.matches("<object>").count(), 2);
    assert!(xml.contains("<xmin>90</xmin>"));
}

#[test]
fn test_process_dataset_is_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(&root.join("labels/train/x.txt"), "a 1 2 3 4\nb 10 20 30 40\n");

    let args = args_for(root, &["train"]);
    let output = root.join("annotations/train/x.xml");

    process_dataset(&args).unwrap();
    let first = fs::read(&output).unwrap();
    process_dataset(&args).unwrap();
    let second = fs::read(&output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_process_dataset_counts_stem_collisions() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(&root.join("labels/train/frame.txt"), "a 1 1 2 2\n");
    write_file(&root.join("labels/train/frame.csv"), "b 1 1 2 2\n");

    let stats = process_dataset(&args_for(root, &["train"])).unwrap();
    assert_eq!(stats.files_converted, 2);
    assert_eq!(stats.outputs_overwritten, 1);

    // frame.txt sorts last and wins; the input extension never leaks into filename
    let xml = fs::read_to_string(root.join("annotations/train/frame.xml")).unwrap();
    assert!(xml.contains("<filename>frame.npy</filename>"));
    assert!(xml.contains("<name>a</name>"));
}

#[test]
fn test_filename_always_ends_in_npy() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out_dir = temp_dir.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();
    for (name, stem) in [
        ("scan.txt", "scan"),
        ("scan2.csv", "scan2"),
        ("scan3", "scan3"),
        ("scan4.tar.gz", "scan4"),
    ] {
        let label_path = temp_dir.path().join("labels").join(name);
        write_file(&label_path, "cat 10 10 2 2\n");
        let converted = convert_label_file(&label_path, &out_dir).unwrap();
        assert_eq!(converted.output_path, out_dir.join(format!("{}.xml", stem)));

        let xml = fs::read_to_string(&converted.output_path).unwrap();
        assert!(xml.contains(&format!("<filename>{}.npy</filename>", stem)));
    }
}

#[test]
#[cfg(unix)]
fn test_convert_keeps_stem_characters() {
    let temp_dir = tempfile::tempdir().unwrap();
    let label_path = temp_dir.path().join("frame:01.txt");
    write_file(&label_path, "cat 10 10 2 2\n");
    let other_path = temp_dir.path().join("a?b.txt");
    write_file(&other_path, "");

    let converted = convert_label_file(&label_path, temp_dir.path()).unwrap();
    assert_eq!(converted.output_path, temp_dir.path().join("frame:01.xml"));
    let xml = fs::read_to_string(&converted.output_path).unwrap();
    assert!(xml.contains("<filename>frame:01.npy</filename>"));

    let converted = convert_label_file(&other_path, temp_dir.path()).unwrap();
    assert_eq!(converted.output_path, temp_dir.path().join("a?b.xml"));
    assert!(!temp_dir.path().join("ab.xml").exists());
}

#[test]
fn test_coordinate_overflow_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let label_path = temp_dir.path().join("huge.txt");
    write_file(&label_path, "cat 1 2 3 4\n\ncat 9223372036854775807 0 2 2\n");

    match convert_label_file(&label_path, temp_dir.path()) {
        Err(ConvertError::Parse { line, source, .. }) => {
            assert_eq!(line, 3);
            assert!(matches!(source, ParseError::CoordinateOverflow { .. }));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(!temp_dir.path().join("huge.xml").exists());
}

#[test]
fn test_control_character_label_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let label_path = temp_dir.path().join("ctrl.txt");
    write_file(&label_path, "c\u{1}t 10 10 2 2\n");

    match convert_label_file(&label_path, temp_dir.path()) {
        Err(ConvertError::Parse { line, source, .. }) => {
            assert_eq!(line, 1);
            assert!(matches!(source, ParseError::InvalidLabelCharacter { .. }));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(!temp_dir.path().join("ctrl.xml").exists());
}

#[test]
fn test_process_dataset_aborts_on_parse_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(&root.join("labels/train/bad.txt"), "cat 100 100\n");

    let result = process_dataset(&args_for(root, &["train", "val"]));
    assert!(matches!(result, Err(ConvertError::Parse { line: 1, .. })));
    assert!(root.join("annotations/train").is_dir());
    assert!(!root.join("annotations/train/bad.xml").exists());
}

#[test]
fn test_process_dataset_missing_split() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_file(&root.join("labels/train/ok.txt"), "cat 1 1 2 2\n");

    let result = process_dataset(&args_for(root, &["train", "val"]));
    assert!(matches!(result, Err(ConvertError::MissingSplit { .. })));
    // Output written before the failure stays on disk
    assert!(root.join("annotations/train/ok.xml").is_file());
    assert!(root.join("annotations/val").is_dir());
}
