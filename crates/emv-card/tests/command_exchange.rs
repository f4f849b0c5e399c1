//! Terminal-side command sequences against recorded card responses

use emv_card::apdu::commands;
use emv_card::{aids, parse_afl, ApduCommand, ApduResponse};

#[test]
fn test_select_ppse_command() {
    let bytes = commands::select(aids::PPSE).build().unwrap();
    let parsed = ApduCommand::parse(&bytes).unwrap();

    assert_eq!(parsed.instruction_name(), "SELECT");
    assert_eq!(parsed.case(), 4);
    assert!(aids::is_directory(&parsed.data));
}

#[test]
fn test_select_application_and_read_records() {
    // SELECT Visa, card answers with an FCI and 9000
    let select = commands::select(aids::VISA).build().unwrap();
    assert_eq!(&select[5..12], aids::VISA);

    let fci = hex::decode("6F098407A00000000310109000").unwrap();
    let response = ApduResponse::parse(&fci).unwrap();
    assert!(response.is_success());
    assert_eq!(response.data.len(), 11);

    // GPO format 1: 80 06 | AIP 1980 | AFL 08010200, then 9000
    let gpo = ApduResponse::parse(&hex::decode("80061980080102009000").unwrap()).unwrap();
    assert!(gpo.is_success());

    let afl = parse_afl(&gpo.data[4..]);
    let reads: Vec<ApduCommand> = afl.iter().flat_map(|entry| entry.read_commands()).collect();
    assert_eq!(reads.len(), 2);
    assert_eq!(reads[0].p1, 0x01);
    assert_eq!(reads[1].p1, 0x02);
    assert!(reads.iter().all(|cmd| cmd.p2 == 0x0C));
    assert!(reads.iter().all(|cmd| cmd.instruction_name() == "READ RECORD"));
}

#[test]
fn test_error_status_words() {
    let not_found = ApduResponse::parse(&[0x6A, 0x82]).unwrap();
    assert!(!not_found.is_success());
    assert_eq!(not_found.status_string(), "6A82");

    let more_data = ApduResponse::parse(&[0x61, 0x1C]).unwrap();
    assert_eq!(more_data.status_description(), "28 more bytes available (GET RESPONSE)");

    let wrong_le = ApduResponse::parse(&[0x6C, 0x10]).unwrap();
    assert_eq!(wrong_le.status_description(), "Wrong Le, 16 bytes available");
}
