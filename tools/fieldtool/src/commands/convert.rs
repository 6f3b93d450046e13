use anyhow::Result;
use clap::Args;
use fieldtype::FieldTypeRegistry;

use super::{lookup, parse_value};

#[derive(Args)]
pub struct ConvertArgs {
    /// Source field type name
    from: String,

    /// Target field type name
    to: String,

    /// Value in the source type's text form
    #[arg(allow_hyphen_values = true)]
    value: String,

    /// Print the converted value's encoding as hex instead of text
    #[arg(long)]
    hex: bool,
}

impl ConvertArgs {
    pub fn run(self, registry: &FieldTypeRegistry) -> Result<()> {
        let from = lookup(registry, &self.from)?;
        let to = lookup(registry, &self.to)?;
        let value = parse_value(from.as_ref(), &self.value)?;
        let converted = to.convert(from.as_ref(), &value)?;

        if self.hex {
            println!("{}", hex::encode(to.encode(&converted)?));
        } else {
            println!("{}", to.to_parseable_string(&converted)?);
        }
        Ok(())
    }
}
