use std::cmp::Ordering;

use anyhow::{Result, ensure};
use clap::Args;
use fieldtype::FieldTypeRegistry;

use super::{lookup, parse_value};

#[derive(Args)]
pub struct CompareArgs {
    /// Field type name
    type_name: String,

    /// First value in text form
    #[arg(allow_hyphen_values = true)]
    a: String,

    /// Second value in text form
    #[arg(allow_hyphen_values = true)]
    b: String,
}

impl CompareArgs {
    pub fn run(self, registry: &FieldTypeRegistry) -> Result<()> {
        let ty = lookup(registry, &self.type_name)?;
        let a = parse_value(ty.as_ref(), &self.a)?;
        let b = parse_value(ty.as_ref(), &self.b)?;

        let ord = ty.compare(&a, &b)?;
        let byte_ord = ty.encode(&a)?.cmp(&ty.encode(&b)?);
        ensure!(
            ord == byte_ord,
            "comparator and encoding disagree for {} ({ord:?} vs {byte_ord:?})",
            ty.name()
        );

        let sign = match ord {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        };
        println!("{sign}");
        Ok(())
    }
}
