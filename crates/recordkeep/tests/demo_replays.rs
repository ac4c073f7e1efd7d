use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use recordkeep::render::RecordingRenderer;
use recordkeep::{Demo, Error, ListId, Notice, Workspace};

fn demo_file(name: &str) -> BufReader<File> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name);
    BufReader::new(File::open(&path).unwrap())
}

#[test]
fn library_demo_file_replays() {
    let mut ws = Workspace::new(Demo::Library, RecordingRenderer::new());
    let report = ws.replay(demo_file("library.jsonl"), false).unwrap();

    assert_eq!(report.applied, 6);
    assert_eq!(report.rejected.len(), 2);
    assert!(matches!(
        report.rejected[0].error,
        Error::BookUnavailable { .. }
    ));
    assert!(matches!(
        report.rejected[1].error,
        Error::InvalidBorrowRequest { .. }
    ));

    let Workspace::Library(library) = &ws else {
        panic!("expected library workspace");
    };
    assert!(library.books().iter().all(|book| book.is_available));
    assert!(library
        .members()
        .iter()
        .all(|member| member.borrowed_books.is_empty()));

    let notices = library.renderer().notices();
    assert_eq!(notices.len(), 2);
    assert!(matches!(notices[0], Notice::Borrowed { .. }));
    assert!(matches!(notices[1], Notice::Returned { .. }));
}

#[test]
fn inventory_demo_file_replays() {
    let mut ws = Workspace::new(Demo::Inventory, RecordingRenderer::new());
    let report = ws.replay(demo_file("inventory.jsonl"), false).unwrap();

    assert_eq!(report.applied, 4);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].line, 5);

    let Workspace::Inventory(inventory) = &ws else {
        panic!("expected inventory workspace");
    };
    assert_eq!(
        inventory.renderer().list(ListId::Inventory).unwrap(),
        &["Pen - Quantity: 8".to_string(), "Ink - Quantity: 4".to_string()]
    );
}

#[test]
fn seeded_registration_snapshot_matches_sample_enrollments() {
    let mut ws = Workspace::new(Demo::Registration, RecordingRenderer::new());
    ws.seed().unwrap();
    ws.apply_line(1, r#"{"form": "enroll", "id": 651, "code": "CHM101"}"#)
        .unwrap();

    let snapshot = ws.snapshot().unwrap();
    let chibuike: Vec<&str> = snapshot["students"][1]["courses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|course| course["code"].as_str().unwrap())
        .collect();
    assert_eq!(chibuike, vec!["BIO101", "CHM101"]);
}
