use emv_card::ApduResponse;
use tracing::info;

use crate::formatters::FormatMode;

use super::{print_outcome, CommandError, DecodeArgs};

pub fn cmd_response(args: &DecodeArgs, format_mode: FormatMode) -> Result<(), CommandError> {
    let data = args.input.read_bytes()?;
    let response = ApduResponse::parse(&data)?;
    info!(status = %response.status_string(), bytes = response.data.len(), "Parsed card response");

    println!("EMV Card Response - {} Mode\n", format_mode.description());
    println!(
        "Status: {} ({})",
        response.status_string(),
        response.status_description()
    );
    println!("Data ({} bytes)\n", response.data.len());

    if response.data.is_empty() {
        return Ok(());
    }

    let outcome = emv_tlv::decode_with(&response.data, args.offset, &args.options());
    print_outcome(&outcome, &args.show_option(), response.data.len(), format_mode);

    Ok(())
}
