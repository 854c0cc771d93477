use bootmac_core::safety::{validate_for_write, RejectionReason, ValidatedDisk};
use bootmac_core::write::{is_confirmed, WritePrompter};
use bootmac_hal::{FakeHal, FakeResponse};
use bootmac_installer::ui::confirm::TerminalPrompter;
use std::io::Cursor;
use std::path::Path;

fn usb_disk(id: &str) -> ValidatedDisk {
    let hal = FakeHal::elevated();
    hal.respond(
        "diskutil",
        &["info"],
        FakeResponse::success("Protocol: USB\nRemovable Media: Yes\n"),
    );
    validate_for_write(&hal, id).expect("validated disk")
}

fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
    TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

#[test]
fn exact_literal_confirms() {
    let mut p = prompter("YES\n");
    let answer = p
        .confirmation(Path::new("/tmp/a.iso"), &usb_disk("disk4"))
        .expect("answer");
    assert!(is_confirmed(&answer));

    let (_, out) = p.into_inner();
    let shown = String::from_utf8(out).expect("utf8");
    assert!(shown.contains("ALL DATA on /dev/disk4"));
    assert!(shown.contains("/dev/rdisk4"));
    assert!(shown.contains("Type YES to continue"));
}

#[test]
fn near_misses_do_not_confirm() {
    for input in ["yes\n", "Yes\n", "YES \n", " YES\n", "Y\n", "\n", ""] {
        let mut p = prompter(input);
        let answer = p
            .confirmation(Path::new("/tmp/a.iso"), &usb_disk("disk4"))
            .expect("answer");
        assert!(!is_confirmed(&answer), "{input:?} must not confirm");
    }
}

#[test]
fn windows_line_ending_still_confirms() {
    let mut p = prompter("YES\r\n");
    let answer = p
        .confirmation(Path::new("/tmp/a.iso"), &usb_disk("disk4"))
        .expect("answer");
    assert!(is_confirmed(&answer));
}

#[test]
fn inventory_shown_once_and_rejection_reported() {
    let mut p = prompter("disk0\ndisk4\n");
    let first = p
        .disk_identifier("/dev/disk4 (external, physical):", None)
        .expect("first");
    assert_eq!(first.as_deref(), Some("disk0"));

    let reason = RejectionReason::RefusedBootDisk("disk0".to_string());
    let second = p
        .disk_identifier("/dev/disk4 (external, physical):", Some(&reason))
        .expect("second");
    assert_eq!(second.as_deref(), Some("disk4"));

    let (_, out) = p.into_inner();
    let shown = String::from_utf8(out).expect("utf8");
    assert_eq!(shown.matches("/dev/disk4 (external, physical):").count(), 1);
    assert!(shown.contains("disk0 is the boot disk"));
}

#[test]
fn empty_answer_or_eof_cancels_selection() {
    let mut p = prompter("\n");
    assert_eq!(p.disk_identifier("", None).expect("answer"), None);
    assert_eq!(p.disk_identifier("", None).expect("eof"), None);
}
