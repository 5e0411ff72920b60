use super::BoardContext;
use anyhow::Result;

pub fn list_suppliers(ctx: &BoardContext) -> Result<()> {
    print_names("Suppliers", &ctx.store.suppliers()?);
    Ok(())
}

pub fn list_services(ctx: &BoardContext) -> Result<()> {
    print_names("Services", &ctx.store.services()?);
    Ok(())
}

fn print_names(heading: &str, names: &[String]) {
    if names.is_empty() {
        println!("No {} recorded yet.", heading.to_lowercase());
        return;
    }
    println!("{}:", heading);
    for name in names {
        println!("  - {}", name);
    }
}
