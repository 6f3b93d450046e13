use anyhow::Result;
use clap::Args;
use fieldtype::FieldTypeRegistry;

use super::{lookup, parse_value};

#[derive(Args)]
pub struct EncodeArgs {
    /// Field type name, e.g. int, string?, long[][]
    type_name: String,

    /// Value in text form, e.g. 42, "hi", [1, 2]
    #[arg(allow_hyphen_values = true)]
    value: String,
}

impl EncodeArgs {
    pub fn run(self, registry: &FieldTypeRegistry) -> Result<()> {
        let ty = lookup(registry, &self.type_name)?;
        let value = parse_value(ty.as_ref(), &self.value)?;
        let bytes = ty.encode(&value)?;
        println!("{}", hex::encode(bytes));
        Ok(())
    }
}
