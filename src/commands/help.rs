use anyhow::Result;

pub fn print_help() -> Result<()> {
    println!("Bookboard - supplier booking board");
    println!("\nUsage:");
    println!("  bookboard <command> [options]     Run a single command");
    println!("  bookboard                         Start the interactive terminal");

    println!("\nBooking Commands:");
    println!("  import <file> [--delimiter ;] [--dry-run]");
    println!("  add --supplier <name> --service <name> --client <name> --date <YYYY-MM-DD>");
    println!("      --start <HH:MM> --end <HH:MM> [--pax <n>] [--status booked|hold]");
    println!("  edit <event-id> [--supplier ..] [--date ..] [--start ..] [--end ..] ...");
    println!("  delete <event-id>");
    println!("  list [--from <date>] [--to <date>] [--supplier ..] [--service ..] [--status ..]");
    println!("  export [filters] [--id <id,id>] [-o <file.ics>]");

    println!("\nMaster Lists:");
    println!("  suppliers                         List known suppliers");
    println!("  services                          List known services");

    println!("\nConfiguration:");
    println!("  config show [key]                 Show current settings");
    println!("  config set <key> <value>          Change a setting");

    println!("\nInteractive terminal:");
    println!("  help                              Show this help");
    println!("  exit                              Leave the terminal");
    Ok(())
}
