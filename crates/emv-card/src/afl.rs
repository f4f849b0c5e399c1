//! Application File Locator (tag 94)

use crate::apdu::{commands, ApduCommand};

/// One 4-byte AFL entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AflEntry {
    /// Short File Identifier
    pub sfi: u8,
    pub first_record: u8,
    pub last_record: u8,
    /// Number of records, starting at `first_record`, involved in offline data authentication
    pub offline_auth_records: u8,
}

impl AflEntry {
    /// READ RECORD commands for every record in this entry
    pub fn read_commands(&self) -> Vec<ApduCommand> {
        (self.first_record..=self.last_record)
            .map(|record| commands::read_record(record, self.sfi))
            .collect()
    }
}

/// Parse AFL bytes.
///
/// AFL format: groups of 4 bytes
/// Byte 1: SFI (upper 5 bits), lower 3 bits zero
/// Byte 2: First record number
/// Byte 3: Last record number
/// Byte 4: Number of records involved in offline data auth
///
/// Trailing bytes that do not form a full group are ignored, as are entries
/// with a zero SFI, a zero first record or a last record before the first.
pub fn parse_afl(afl_data: &[u8]) -> Vec<AflEntry> {
    afl_data
        .chunks_exact(4)
        .map(|chunk| AflEntry {
            sfi: chunk[0] >> 3,
            first_record: chunk[1],
            last_record: chunk[2],
            offline_auth_records: chunk[3],
        })
        .filter(|entry| entry.sfi != 0 && entry.first_record != 0 && entry.last_record >= entry.first_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_afl() {
        let entries = parse_afl(&[0x08, 0x01, 0x01, 0x00, 0x10, 0x01, 0x03, 0x01, 0xFF]);
        assert_eq!(
            entries,
            vec![
                AflEntry { sfi: 1, first_record: 1, last_record: 1, offline_auth_records: 0 },
                AflEntry { sfi: 2, first_record: 1, last_record: 3, offline_auth_records: 1 },
            ]
        );
    }

    #[test]
    fn test_parse_afl_skips_invalid_entries() {
        assert!(parse_afl(&[0x00, 0x01, 0x01, 0x00]).is_empty());
        assert!(parse_afl(&[0x08, 0x00, 0x01, 0x00]).is_empty());
        assert!(parse_afl(&[0x08, 0x03, 0x01, 0x00]).is_empty());
    }

    #[test]
    fn test_read_commands() {
        let entry = AflEntry { sfi: 2, first_record: 1, last_record: 2, offline_auth_records: 0 };
        let commands: Vec<Vec<u8>> = entry
            .read_commands()
            .iter()
            .map(|cmd| cmd.build().unwrap())
            .collect();
        assert_eq!(
            commands,
            vec![
                vec![0x00, 0xB2, 0x01, 0x14, 0x00],
                vec![0x00, 0xB2, 0x02, 0x14, 0x00],
            ]
        );
    }
}
