use tracing::info;

use crate::formatters::FormatMode;

use super::{print_outcome, CommandError, DecodeArgs};

pub fn cmd_decode(args: &DecodeArgs, format_mode: FormatMode) -> Result<(), CommandError> {
    let data = args.input.read_bytes()?;
    info!(bytes = data.len(), offset = args.offset, "Decoding TLV buffer");

    println!("EMV TLV Decode - {} Mode\n", format_mode.description());

    let outcome = emv_tlv::decode_with(&data, args.offset, &args.options());
    print_outcome(&outcome, &args.show_option(), data.len(), format_mode);

    Ok(())
}
