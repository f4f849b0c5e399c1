use emv_tlv::{describe_tag, interpret};

use super::{CommandError, DescribeArgs};

pub fn cmd_describe(args: &DescribeArgs) -> Result<(), CommandError> {
    let value = match &args.value {
        Some(text) => Some(emv_common::parse_hex(text)?),
        None => None,
    };

    for tag in &args.tags {
        let tag = tag.trim().to_ascii_uppercase();
        let name = match describe_tag(&tag) {
            "" => "Unknown Tag",
            name => name,
        };
        println!("[{}] {}", tag, name);

        if let Some(ref value) = value {
            let interpretation = interpret(&tag, value);
            if !interpretation.is_empty() {
                println!("  => {}", interpretation);
            }
        }
    }

    Ok(())
}
