use emv_card::ApduCommand;

use crate::formatters::{render_nodes, FormatMode};

use super::{ApduArgs, CommandError};

pub fn cmd_apdu(args: &ApduArgs, format_mode: FormatMode) -> Result<(), CommandError> {
    let bytes = args.input.read_bytes()?;
    let command = ApduCommand::parse(&bytes)?;

    println!("APDU Command - {} Mode\n", format_mode.description());
    println!("  Instruction: {}", command.instruction_name());
    println!("  Case: {}", command.case());
    println!(
        "  CLA={:02X} INS={:02X} P1={:02X} P2={:02X}",
        command.cla, command.ins, command.p1, command.p2
    );

    if !command.data.is_empty() {
        println!(
            "  Data ({} bytes): {}",
            command.data.len(),
            hex::encode_upper(&command.data)
        );

        // SELECT carries an AID or directory name, other commands often carry TLV
        if command.ins == 0xA4 {
            if let Some(scheme) = emv_card::aids::scheme_name(&command.data) {
                println!("  Scheme: {}", scheme);
            } else if emv_card::aids::is_directory(&command.data) {
                println!("  Directory: {}", emv_common::to_ascii_lossy(&command.data));
            }
        } else if format_mode == FormatMode::Human {
            let outcome = emv_tlv::decode(&command.data, 0);
            if outcome.is_clean() {
                println!("  Data as TLV:");
                for line in render_nodes(&outcome.nodes, format_mode, 2) {
                    println!("{}", line);
                }
            }
        }
    }

    if let Some(le) = command.le {
        println!("  Le: {:02X}", le);
    }

    Ok(())
}
